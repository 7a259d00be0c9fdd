//! Per-subscriber state machine.
//!
//! ```text
//! (none)   --subscribe-->             Active    (expiry = now + duration)
//! Active   --subscribe-->             Active    (expiry += duration)
//! Active   --sweep, expiry <= now-->  Inactive
//! Inactive --subscribe-->             Active    (expiry = now + duration)
//! ```
//!
//! Everything here is pure: callers load the record, ask for the next one,
//! and persist it together with the counter changes. Nothing is written when
//! a transition is rejected.

use crate::types::{Error, SubscribeKind, SubscriberRecord, SubscriberStatus};
use soroban_sdk::Address;

/// Computes the record a successful `subscribe` at `now` leaves behind.
///
/// A record still counted `Active` stacks a cycle onto its current expiry. If
/// that expiry already lapsed but no sweep has run yet, the cycle starts from
/// `now` so the subscriber always ends up valid after paying.
pub fn on_subscribe(
    existing: Option<SubscriberRecord>,
    subscriber: &Address,
    now: u64,
    duration: u64,
) -> Result<(SubscriberRecord, SubscribeKind), Error> {
    let (base, kind) = match existing {
        Some(record) if record.ever_subscribed => match record.status {
            SubscriberStatus::Active => (record.expiry_time.max(now), SubscribeKind::Extended),
            SubscriberStatus::Inactive => (now, SubscribeKind::Reactivated),
        },
        _ => (now, SubscribeKind::Activated),
    };

    let expiry_time = base.checked_add(duration).ok_or(Error::Overflow)?;
    let record = SubscriberRecord {
        subscriber: subscriber.clone(),
        expiry_time,
        ever_subscribed: true,
        status: SubscriberStatus::Active,
    };
    Ok((record, kind))
}

/// Returns the swept record if `record` must move from active to inactive at `now`.
///
/// Inactive records and records that have not reached their expiry are left alone.
pub fn on_sweep(record: &SubscriberRecord, now: u64) -> Option<SubscriberRecord> {
    if !record.ever_subscribed || record.status != SubscriberStatus::Active {
        return None;
    }
    if record.expiry_time > now {
        return None;
    }
    let mut swept = record.clone();
    swept.status = SubscriberStatus::Inactive;
    Some(swept)
}

/// Exact validity predicate, independent of counter membership.
pub fn is_valid_at(record: &SubscriberRecord, now: u64) -> bool {
    record.ever_subscribed && record.expiry_time > now
}

/// Applies the counter movement implied by `kind` to `(active, inactive)`.
pub fn counts_after_subscribe(
    active: u32,
    inactive: u32,
    kind: SubscribeKind,
) -> Result<(u32, u32), Error> {
    match kind {
        SubscribeKind::Activated => Ok((active.checked_add(1).ok_or(Error::Overflow)?, inactive)),
        SubscribeKind::Extended => Ok((active, inactive)),
        SubscribeKind::Reactivated => Ok((
            active.checked_add(1).ok_or(Error::Overflow)?,
            inactive.checked_sub(1).ok_or(Error::Overflow)?,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::Env;

    fn record(env: &Env, expiry_time: u64, status: SubscriberStatus) -> SubscriberRecord {
        SubscriberRecord {
            subscriber: Address::generate(env),
            expiry_time,
            ever_subscribed: true,
            status,
        }
    }

    #[test]
    fn first_subscribe_starts_from_now() {
        let env = Env::default();
        let who = Address::generate(&env);
        let (rec, kind) = on_subscribe(None, &who, 50, 1000).unwrap();
        assert_eq!(kind, SubscribeKind::Activated);
        assert_eq!(rec.expiry_time, 1050);
        assert!(rec.ever_subscribed);
        assert_eq!(rec.status, SubscriberStatus::Active);
    }

    #[test]
    fn active_subscribe_stacks_cycles() {
        let env = Env::default();
        let existing = record(&env, 1000, SubscriberStatus::Active);
        let who = existing.subscriber.clone();
        let (rec, kind) = on_subscribe(Some(existing), &who, 500, 1000).unwrap();
        assert_eq!(kind, SubscribeKind::Extended);
        assert_eq!(rec.expiry_time, 2000);
    }

    #[test]
    fn lapsed_but_unswept_subscribe_restarts_from_now() {
        let env = Env::default();
        let existing = record(&env, 1000, SubscriberStatus::Active);
        let who = existing.subscriber.clone();
        let (rec, kind) = on_subscribe(Some(existing), &who, 1500, 1000).unwrap();
        assert_eq!(kind, SubscribeKind::Extended);
        assert_eq!(rec.expiry_time, 2500);
        assert!(is_valid_at(&rec, 1500));
    }

    #[test]
    fn inactive_subscribe_resets_from_now() {
        let env = Env::default();
        let existing = record(&env, 2000, SubscriberStatus::Inactive);
        let who = existing.subscriber.clone();
        let (rec, kind) = on_subscribe(Some(existing), &who, 2500, 1000).unwrap();
        assert_eq!(kind, SubscribeKind::Reactivated);
        assert_eq!(rec.expiry_time, 3500);
        assert_eq!(rec.status, SubscriberStatus::Active);
    }

    #[test]
    fn expiry_overflow_is_rejected() {
        let env = Env::default();
        let who = Address::generate(&env);
        assert_eq!(on_subscribe(None, &who, u64::MAX, 1), Err(Error::Overflow));
    }

    #[test]
    fn sweep_moves_only_lapsed_active_records() {
        let env = Env::default();
        let lapsed = record(&env, 1000, SubscriberStatus::Active);
        let live = record(&env, 1001, SubscriberStatus::Active);
        let already = record(&env, 10, SubscriberStatus::Inactive);

        let swept = on_sweep(&lapsed, 1000).unwrap();
        assert_eq!(swept.status, SubscriberStatus::Inactive);
        assert_eq!(swept.expiry_time, 1000);
        assert!(on_sweep(&live, 1000).is_none());
        assert!(on_sweep(&already, 1000).is_none());
        assert!(on_sweep(&swept, 5000).is_none());
    }

    #[test]
    fn validity_boundary_is_exclusive() {
        let env = Env::default();
        let rec = record(&env, 1000, SubscriberStatus::Active);
        assert!(is_valid_at(&rec, 999));
        assert!(!is_valid_at(&rec, 1000));
    }

    #[test]
    fn counter_movement_per_kind() {
        assert_eq!(counts_after_subscribe(0, 0, SubscribeKind::Activated), Ok((1, 0)));
        assert_eq!(counts_after_subscribe(3, 1, SubscribeKind::Extended), Ok((3, 1)));
        assert_eq!(counts_after_subscribe(0, 1, SubscribeKind::Reactivated), Ok((1, 0)));
        assert_eq!(
            counts_after_subscribe(0, 0, SubscribeKind::Reactivated),
            Err(Error::Overflow)
        );
    }
}
