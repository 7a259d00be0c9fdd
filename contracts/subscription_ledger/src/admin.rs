//! Owner and config: init, set_subscription_price, withdraw.
//!
//! **PRs that only change owner-privileged behavior should edit this file only.**

use crate::storage;
use crate::types::{
    DataKey, Error, LedgerInitializedEvent, PriceUpdatedEvent, WithdrawalEvent,
};
use soroban_sdk::{log, symbol_short, token, Address, Env};

pub fn do_init(
    env: &Env,
    owner: Address,
    token: Address,
    price: i128,
    duration: u64,
) -> Result<(), Error> {
    if storage::is_initialized(env) {
        return Err(Error::AlreadyInitialized);
    }
    owner.require_auth();

    if price <= 0 {
        return Err(Error::InvalidPrice);
    }
    if duration == 0 {
        return Err(Error::InvalidDuration);
    }

    let instance = env.storage().instance();
    instance.set(&DataKey::Owner, &owner);
    instance.set(&DataKey::Token, &token);
    instance.set(&DataKey::Price, &price);
    instance.set(&DataKey::Duration, &duration);
    instance.set(&DataKey::Balance, &0i128);
    instance.set(&DataKey::SubscriberCount, &0u32);
    storage::set_counts(env, 0, 0);
    storage::bump_instance(env);

    env.events().publish(
        (symbol_short!("init"),),
        LedgerInitializedEvent {
            owner,
            token,
            price,
            duration,
        },
    );
    Ok(())
}

/// Checks that `caller` signed the invocation and is the stored owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    let owner = storage::get_owner(env)?;
    if *caller != owner {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

pub fn do_set_price(env: &Env, caller: Address, new_price: i128) -> Result<(), Error> {
    storage::require_initialized(env)?;
    require_owner(env, &caller)?;
    if new_price <= 0 {
        return Err(Error::InvalidPrice);
    }

    let old_price = storage::get_price(env)?;
    storage::set_price(env, new_price);
    storage::bump_instance(env);

    env.events().publish(
        (symbol_short!("price"),),
        PriceUpdatedEvent {
            owner: caller,
            old_price,
            new_price,
        },
    );
    Ok(())
}

/// Sends the whole collected balance to the owner.
///
/// The stored balance is zeroed before the token transfer, so any nested
/// withdrawal attempt inside the same transaction observes zero and fails
/// with [`Error::NothingToWithdraw`].
pub fn do_withdraw(env: &Env, caller: Address) -> Result<i128, Error> {
    storage::require_initialized(env)?;
    require_owner(env, &caller)?;

    let amount = storage::get_balance(env);
    if amount <= 0 {
        return Err(Error::NothingToWithdraw);
    }
    let token_address = storage::get_token(env)?;

    storage::set_balance(env, 0);
    storage::bump_instance(env);

    token::Client::new(env, &token_address).transfer(
        &env.current_contract_address(),
        &caller,
        &amount,
    );
    log!(env, "withdrawal", caller, amount);

    env.events().publish(
        (symbol_short!("withdraw"),),
        WithdrawalEvent {
            owner: caller,
            amount,
        },
    );
    Ok(amount)
}
