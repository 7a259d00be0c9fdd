use soroban_sdk::{contracterror, contracttype, Address};

/// Storage keys.
///
/// Scalars live in instance storage; per-subscriber records and the
/// enumeration index live in persistent storage, one entry each.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,
    Token,
    Price,
    Duration,
    Balance,
    ActiveCount,
    InactiveCount,
    /// Number of distinct identities that ever subscribed. Also the length
    /// of the `SubscriberAt` index.
    SubscriberCount,
    /// Full [`SubscriberRecord`] keyed by identity.
    Subscriber(Address),
    /// Insertion-ordered index used by the expiry sweep.
    SubscriberAt(u32),
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    InvalidPrice = 400,
    Unauthorized = 401,
    /// Attached payment does not equal the current subscription price.
    IncorrectPayment = 402,
    /// Query for an identity that never subscribed.
    UnknownIdentity = 404,
    NothingToWithdraw = 409,
    NotInitialized = 1001,
    AlreadyInitialized = 1002,
    InvalidDuration = 1003,
    Overflow = 1004,
    InvalidPageSize = 1005,
}

impl Error {
    /// Stable numeric code, as carried in the contract's error value.
    pub const fn to_code(self) -> u32 {
        self as u32
    }
}

/// Which aggregate counter a subscriber is currently counted in.
///
/// `NeverSubscribed` is not represented: it is the absence of a record.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SubscriberStatus {
    Active = 0,
    Inactive = 1,
}

/// Per-identity subscription state. Created on first subscribe, never deleted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriberRecord {
    pub subscriber: Address,
    /// Absolute ledger timestamp after which the subscription is no longer valid.
    pub expiry_time: u64,
    pub ever_subscribed: bool,
    /// Counter membership. May lag behind `expiry_time` until the next sweep.
    pub status: SubscriberStatus,
}

/// How a successful `subscribe` moved the subscriber through the state machine.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SubscribeKind {
    /// First subscription for this identity.
    Activated = 0,
    /// Already counted active; a cycle was stacked onto the expiry.
    Extended = 1,
    /// Previously swept to inactive; a fresh cycle starts from now.
    Reactivated = 2,
}

/// Outcome of one bounded page of the expiry sweep.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SweepResult {
    /// Index entries looked at in this page.
    pub examined: u32,
    /// Records moved from active to inactive in this page.
    pub expired: u32,
    /// Where the next page should start.
    pub next_start: u32,
    /// True once `next_start` has reached the end of the index.
    pub done: bool,
}

/// All ledger scalars in one read.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerSummary {
    pub owner: Address,
    pub token: Address,
    pub price: i128,
    pub duration: u64,
    pub balance: i128,
    pub total_active: u32,
    pub total_inactive: u32,
    pub subscriber_count: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LedgerInitializedEvent {
    pub owner: Address,
    pub token: Address,
    pub price: i128,
    pub duration: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PriceUpdatedEvent {
    pub owner: Address,
    pub old_price: i128,
    pub new_price: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SubscribedEvent {
    pub subscriber: Address,
    pub amount: i128,
    pub expiry_time: u64,
    pub kind: SubscribeKind,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SubscriptionsExpiredEvent {
    pub expired: u32,
    pub total_active: u32,
    pub total_inactive: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct WithdrawalEvent {
    pub owner: Address,
    pub amount: i128,
}
