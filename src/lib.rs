/// A single ledger entry: balance plus the rules that keep it non-negative.
pub mod account;

/// The account directory and its operations. Coordinates id allocation,
/// balance changes and persistence after every successful mutation.
pub mod bank;

/// CSV codec for the durable state file backing [`bank::Bank`].
pub mod storage;

/// Ideally, this module should exist in its own crate, as a way to
/// bootstrap the core logic. However, I want to use it for integration
/// tests so I put it here.
pub mod bin_utils;
