// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Type definitions for pending transaction tracking

use ethers::types::{Address as EthAddress, TxHash};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A transaction held in the pending list while unconfirmed.
///
/// The tracker only interprets `tx_hash`; the remaining fields are carried
/// for subscribers (UI, RPC) and are opaque to the tracking logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedTx {
    /// Transaction hash on the Eth side, the identifying key
    pub tx_hash: TxHash,
    /// Address that submitted the transaction
    pub sender: EthAddress,
    /// What the transaction does, e.g. "deposit" or "claim"
    pub action: String,
    /// Wall-clock submission time in milliseconds
    pub submitted_at_ms: u64,
}

impl TrackedTx {
    pub fn new(tx_hash: TxHash, sender: EthAddress, action: impl Into<String>) -> Self {
        Self {
            tx_hash,
            sender,
            action: action.into(),
            submitted_at_ms: now_ms(),
        }
    }
}

impl fmt::Display for TrackedTx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.action, self.tx_hash)
    }
}

pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
