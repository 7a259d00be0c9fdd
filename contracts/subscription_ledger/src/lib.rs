#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────
mod admin;
mod queries;
mod state_machine;
mod storage;
mod subscription;
mod sweep;
mod types;

// ── Re-exports (used by tests and external consumers) ────────────────────────
pub use state_machine::{counts_after_subscribe, is_valid_at, on_subscribe, on_sweep};
pub use sweep::MAX_SWEEP_PAGE;
pub use types::*;

use soroban_sdk::{contract, contractimpl, Address, Env};

// ── Contract ─────────────────────────────────────────────────────────────────

/// Time-bounded subscription ledger.
///
/// Subscribers pay exactly the current price in the configured token for one
/// cycle of `duration` seconds. The owner sets the price and withdraws what
/// has been collected. Expired subscriptions are moved from the active to the
/// inactive counter lazily, by a sweep anyone may run.
#[contract]
pub struct SubscriptionLedger;

#[contractimpl]
impl SubscriptionLedger {
    // ── Owner / Config ───────────────────────────────────────────────────

    /// Initialize the ledger. May only be called once.
    ///
    /// `owner` is fixed for the lifetime of the contract. `token` is the
    /// asset subscribers pay in. `price` (token base units) and `duration`
    /// (seconds) must both be positive.
    pub fn init(
        env: Env,
        owner: Address,
        token: Address,
        price: i128,
        duration: u64,
    ) -> Result<(), Error> {
        admin::do_init(&env, owner, token, price, duration)
    }

    /// Replace the per-cycle price. Owner only; `new_price` must be positive.
    pub fn set_subscription_price(env: Env, caller: Address, new_price: i128) -> Result<(), Error> {
        admin::do_set_price(&env, caller, new_price)
    }

    /// Transfer the whole collected balance to the owner. Returns the amount sent.
    ///
    /// # Errors
    /// - [`Error::Unauthorized`] if `caller` is not the owner.
    /// - [`Error::NothingToWithdraw`] if the balance is zero.
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, Error> {
        admin::do_withdraw(&env, caller)
    }

    // ── Subscription lifecycle ───────────────────────────────────────────

    /// Pay for one cycle. `paid_amount` must equal the current price exactly;
    /// there is no change or refund. Returns the new expiry timestamp.
    ///
    /// # State Transitions
    /// - No record: created `Active`, expiry = now + duration.
    /// - `Active`: expiry += duration (unused time is kept). If the expiry has
    ///   already passed but no sweep has run, the cycle starts from now instead,
    ///   i.e. expiry = max(expiry, now) + duration.
    /// - `Inactive`: back to `Active`, expiry = now + duration.
    pub fn subscribe(env: Env, subscriber: Address, paid_amount: i128) -> Result<u64, Error> {
        subscription::do_subscribe(&env, subscriber, paid_amount)
    }

    // ── Sweep ────────────────────────────────────────────────────────────

    /// Move every lapsed active record to inactive. Callable by anyone.
    ///
    /// Idempotent. Linear in the number of identities that ever subscribed;
    /// prefer [`SubscriptionLedger::expire_subscriptions_page`] on large ledgers.
    pub fn expire_subscriptions(env: Env) -> Result<u32, Error> {
        sweep::do_expire_subscriptions(&env)
    }

    /// Bounded sweep over `[start, start + min(limit, MAX_SWEEP_PAGE))` of the
    /// subscriber index. Feed `next_start` back in until `done`.
    pub fn expire_subscriptions_page(
        env: Env,
        start: u32,
        limit: u32,
    ) -> Result<SweepResult, Error> {
        sweep::do_expire_page(&env, start, limit)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// True iff `subscriber` has paid for a cycle that has not yet lapsed.
    pub fn is_active_subscriber(env: Env, subscriber: Address) -> bool {
        queries::is_active_subscriber(&env, &subscriber)
    }

    pub fn get_subscription_expiry(env: Env, subscriber: Address) -> Result<u64, Error> {
        queries::get_subscription_expiry(&env, &subscriber)
    }

    pub fn get_subscriber(env: Env, subscriber: Address) -> Result<SubscriberRecord, Error> {
        queries::get_subscriber(&env, &subscriber)
    }

    /// Active counter as of the last write or sweep. May include lapsed
    /// subscriptions until [`SubscriptionLedger::expire_subscriptions`] runs.
    pub fn get_total_active_subscribers(env: Env) -> u32 {
        storage::get_active_count(&env)
    }

    pub fn get_total_inactive_subscribers(env: Env) -> u32 {
        storage::get_inactive_count(&env)
    }

    /// Number of distinct identities that ever subscribed.
    pub fn get_subscriber_count(env: Env) -> u32 {
        storage::get_subscriber_count(&env)
    }

    pub fn get_subscription_price(env: Env) -> Result<i128, Error> {
        storage::get_price(&env)
    }

    pub fn get_subscription_duration(env: Env) -> Result<u64, Error> {
        storage::get_duration(&env)
    }

    /// Collected funds not yet withdrawn.
    pub fn get_balance(env: Env) -> i128 {
        storage::get_balance(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, Error> {
        storage::get_owner(&env)
    }

    pub fn get_token(env: Env) -> Result<Address, Error> {
        storage::get_token(&env)
    }

    pub fn get_ledger_summary(env: Env) -> Result<LedgerSummary, Error> {
        queries::get_ledger_summary(&env)
    }
}
