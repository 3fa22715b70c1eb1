// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Pending transaction tracking for the bridge dApp backend.
//!
//! Keeps an observable, ordered list of in-flight Ethereum transactions.
//! Each tracked transaction is watched through the submitting signer's
//! provider until it is mined (or the watch times out), at which point the
//! entry is removed from the list and the outcome is reported through an
//! awaitable [`tracker::Confirmation`].

pub mod config;
pub mod error;
pub mod metrics;
pub mod store;
pub mod tracker;
pub mod types;

#[cfg(test)]
pub mod eth_mock_provider;

#[cfg(test)]
pub(crate) fn init_test_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
