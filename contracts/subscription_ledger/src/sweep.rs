//! Expiry sweep: reconciles lapsed subscriptions into the inactive counter.
//!
//! `is_active_subscriber` is always exact; the aggregate counters only catch
//! up with the passage of time when a sweep runs. The full sweep is linear in
//! the number of identities that ever subscribed. Metered callers should page
//! through the index with [`do_expire_page`] instead.

use crate::state_machine::on_sweep;
use crate::storage;
use crate::types::{Error, SubscriberRecord, SubscriptionsExpiredEvent, SweepResult};
use soroban_sdk::{log, symbol_short, Env, Vec};

/// Upper bound on index entries examined by one paginated call.
pub const MAX_SWEEP_PAGE: u32 = 100;

/// Sweeps the whole index. Returns how many records moved to inactive.
pub fn do_expire_subscriptions(env: &Env) -> Result<u32, Error> {
    storage::require_initialized(env)?;
    let end = storage::get_subscriber_count(env);
    let (_, expired) = sweep_range(env, 0, end)?;
    Ok(expired)
}

/// Sweeps at most `min(limit, MAX_SWEEP_PAGE)` index entries starting at `start`.
pub fn do_expire_page(env: &Env, start: u32, limit: u32) -> Result<SweepResult, Error> {
    storage::require_initialized(env)?;
    if limit == 0 {
        return Err(Error::InvalidPageSize);
    }

    let count = storage::get_subscriber_count(env);
    let start = start.min(count);
    let end = start.saturating_add(limit.min(MAX_SWEEP_PAGE)).min(count);
    let (examined, expired) = sweep_range(env, start, end)?;

    Ok(SweepResult {
        examined,
        expired,
        next_start: end,
        done: end >= count,
    })
}

fn sweep_range(env: &Env, start: u32, end: u32) -> Result<(u32, u32), Error> {
    let now = env.ledger().timestamp();
    storage::bump_instance(env);
    let examined = end.saturating_sub(start);
    let mut swept: Vec<SubscriberRecord> = Vec::new(env);

    for index in start..end {
        let Some(subscriber) = storage::subscriber_at(env, index) else {
            continue;
        };
        let Some(record) = storage::get_record(env, &subscriber) else {
            continue;
        };
        storage::bump_subscriber(env, index, &subscriber);
        if let Some(next) = on_sweep(&record, now) {
            swept.push_back(next);
        }
    }

    let expired = swept.len();
    if expired == 0 {
        return Ok((examined, 0));
    }

    let active = storage::get_active_count(env)
        .checked_sub(expired)
        .ok_or(Error::Overflow)?;
    let inactive = storage::get_inactive_count(env)
        .checked_add(expired)
        .ok_or(Error::Overflow)?;
    for record in swept.iter() {
        storage::set_record(env, &record);
    }
    storage::set_counts(env, active, inactive);
    log!(env, "sweep", start, end, expired);

    env.events().publish(
        (symbol_short!("expired"),),
        SubscriptionsExpiredEvent {
            expired,
            total_active: active,
            total_inactive: inactive,
            timestamp: now,
        },
    );
    Ok((examined, expired))
}
