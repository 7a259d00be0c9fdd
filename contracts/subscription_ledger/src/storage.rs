//! Typed accessors over instance and persistent storage.
//!
//! Every write to a persistent entry bumps its TTL, and the sweep bumps every
//! entry it reads, so subscriber records are never archived out from under
//! the counters that include them.

use crate::types::{DataKey, Error, SubscriberRecord};
use soroban_sdk::{Address, Env};

/// Instance TTL threshold / bump, in ledgers (~1 day / ~5 days at 5 s).
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 86_400;
/// Persistent TTL threshold / bump, in ledgers (~7 days / ~60 days at 5 s).
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = 120_960;
pub const PERSISTENT_BUMP_AMOUNT: u32 = 1_036_800;

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn require_initialized(env: &Env) -> Result<(), Error> {
    if is_initialized(env) {
        Ok(())
    } else {
        Err(Error::NotInitialized)
    }
}

// ── Instance scalars ─────────────────────────────────────────────────────────

pub fn get_owner(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)
}

pub fn get_token(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)
}

pub fn get_price(env: &Env) -> Result<i128, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Price)
        .ok_or(Error::NotInitialized)
}

pub fn set_price(env: &Env, price: i128) {
    env.storage().instance().set(&DataKey::Price, &price);
}

pub fn get_duration(env: &Env) -> Result<u64, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Duration)
        .ok_or(Error::NotInitialized)
}

pub fn get_balance(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::Balance)
        .unwrap_or(0)
}

pub fn set_balance(env: &Env, balance: i128) {
    env.storage().instance().set(&DataKey::Balance, &balance);
}

fn get_counter(env: &Env, key: &DataKey) -> u32 {
    env.storage().instance().get(key).unwrap_or(0)
}

pub fn get_active_count(env: &Env) -> u32 {
    get_counter(env, &DataKey::ActiveCount)
}

pub fn get_inactive_count(env: &Env) -> u32 {
    get_counter(env, &DataKey::InactiveCount)
}

pub fn get_subscriber_count(env: &Env) -> u32 {
    get_counter(env, &DataKey::SubscriberCount)
}

/// Writes both aggregate counters together so they are never observed half-updated.
pub fn set_counts(env: &Env, active: u32, inactive: u32) {
    env.storage().instance().set(&DataKey::ActiveCount, &active);
    env.storage()
        .instance()
        .set(&DataKey::InactiveCount, &inactive);
}

// ── Persistent records ───────────────────────────────────────────────────────

pub fn get_record(env: &Env, subscriber: &Address) -> Option<SubscriberRecord> {
    env.storage()
        .persistent()
        .get(&DataKey::Subscriber(subscriber.clone()))
}

pub fn set_record(env: &Env, record: &SubscriberRecord) {
    let key = DataKey::Subscriber(record.subscriber.clone());
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage().persistent().extend_ttl(
        key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

/// Extends the index entry and record of a subscriber that was only read.
///
/// Inactive records are never rewritten, so the sweep keeps them live.
pub fn bump_subscriber(env: &Env, index: u32, subscriber: &Address) {
    bump_persistent(env, &DataKey::SubscriberAt(index));
    bump_persistent(env, &DataKey::Subscriber(subscriber.clone()));
}

/// Length the subscriber index will have after one more append.
///
/// Checked up front so a first-time subscribe can fail before any funds move.
pub fn next_subscriber_count(env: &Env) -> Result<u32, Error> {
    get_subscriber_count(env)
        .checked_add(1)
        .ok_or(Error::Overflow)
}

/// Appends a first-time subscriber to the enumeration index. `next` comes from
/// [`next_subscriber_count`].
pub fn push_subscriber(env: &Env, subscriber: &Address, next: u32) {
    let key = DataKey::SubscriberAt(next - 1);
    env.storage().persistent().set(&key, subscriber);
    bump_persistent(env, &key);
    env.storage()
        .instance()
        .set(&DataKey::SubscriberCount, &next);
}

pub fn subscriber_at(env: &Env, index: u32) -> Option<Address> {
    env.storage().persistent().get(&DataKey::SubscriberAt(index))
}
