//! Read-only views. Nothing here writes storage.

use crate::state_machine::is_valid_at;
use crate::storage;
use crate::types::{Error, LedgerSummary, SubscriberRecord};
use soroban_sdk::{Address, Env};

/// Exact validity at the current ledger timestamp, regardless of whether a
/// sweep has reconciled the counters yet.
pub fn is_active_subscriber(env: &Env, subscriber: &Address) -> bool {
    let now = env.ledger().timestamp();
    storage::get_record(env, subscriber)
        .map(|record| is_valid_at(&record, now))
        .unwrap_or(false)
}

pub fn get_subscriber(env: &Env, subscriber: &Address) -> Result<SubscriberRecord, Error> {
    storage::get_record(env, subscriber)
        .filter(|record| record.ever_subscribed)
        .ok_or(Error::UnknownIdentity)
}

pub fn get_subscription_expiry(env: &Env, subscriber: &Address) -> Result<u64, Error> {
    get_subscriber(env, subscriber).map(|record| record.expiry_time)
}

pub fn get_ledger_summary(env: &Env) -> Result<LedgerSummary, Error> {
    Ok(LedgerSummary {
        owner: storage::get_owner(env)?,
        token: storage::get_token(env)?,
        price: storage::get_price(env)?,
        duration: storage::get_duration(env)?,
        balance: storage::get_balance(env),
        total_active: storage::get_active_count(env),
        total_inactive: storage::get_inactive_count(env),
        subscriber_count: storage::get_subscriber_count(env),
    })
}
