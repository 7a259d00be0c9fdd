//! Subscriber entrypoint: subscribe.
//!
//! **PRs that only change payment or renewal rules should edit this file only.**

use crate::state_machine::{counts_after_subscribe, on_subscribe};
use crate::storage;
use crate::types::{Error, SubscribeKind, SubscribedEvent};
use soroban_sdk::{symbol_short, token, Address, Env};

/// Pays exactly one cycle and activates or extends `subscriber`.
///
/// Every precondition and every derived value is computed before the first
/// write, so a rejected call leaves records, counters and balance untouched.
pub fn do_subscribe(env: &Env, subscriber: Address, paid_amount: i128) -> Result<u64, Error> {
    storage::require_initialized(env)?;
    subscriber.require_auth();

    let price = storage::get_price(env)?;
    if paid_amount != price {
        return Err(Error::IncorrectPayment);
    }

    let now = env.ledger().timestamp();
    let duration = storage::get_duration(env)?;
    let existing = storage::get_record(env, &subscriber);
    let (record, kind) = on_subscribe(existing, &subscriber, now, duration)?;

    let (active, inactive) = counts_after_subscribe(
        storage::get_active_count(env),
        storage::get_inactive_count(env),
        kind,
    )?;
    let balance = storage::get_balance(env)
        .checked_add(paid_amount)
        .ok_or(Error::Overflow)?;
    let index_len = match kind {
        SubscribeKind::Activated => Some(storage::next_subscriber_count(env)?),
        _ => None,
    };
    let token_address = storage::get_token(env)?;

    // Funds move into custody first; a failed transfer aborts the whole call.
    token::Client::new(env, &token_address).transfer(
        &subscriber,
        &env.current_contract_address(),
        &paid_amount,
    );

    if let Some(next) = index_len {
        storage::push_subscriber(env, &subscriber, next);
    }
    storage::set_record(env, &record);
    storage::set_counts(env, active, inactive);
    storage::set_balance(env, balance);
    storage::bump_instance(env);

    env.events().publish(
        (symbol_short!("subscribe"), subscriber.clone()),
        SubscribedEvent {
            subscriber,
            amount: paid_amount,
            expiry_time: record.expiry_time,
            kind,
        },
    );
    Ok(record.expiry_time)
}
