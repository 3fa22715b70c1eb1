// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

use ethers::types::TransactionReceipt;
use thiserror::Error;

/// Errors surfaced to the owner of a [`crate::tracker::Confirmation`].
///
/// Every failure is terminal for its submission: nothing here is retried.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The transaction was mined but reverted (receipt status 0).
    /// Carries the full receipt so the caller can inspect gas usage and logs.
    #[error("transaction {:?} reverted on chain", .receipt.transaction_hash)]
    TxFailed { receipt: Box<TransactionReceipt> },

    /// The confirmation watch did not observe a mined transaction within
    /// the configured bound.
    #[error("transaction confirmation timed out after {timeout_secs}s")]
    ConfirmationTimeout { timeout_secs: u64 },

    /// The provider returned an error while watching for the receipt.
    #[error("provider error: {0}")]
    Provider(String),

    /// Unexpected internal failure, e.g. the watch task was aborted.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TrackerError {
    /// Returns a short string identifying the error type for metrics labels
    pub fn error_type(&self) -> &'static str {
        match self {
            TrackerError::TxFailed { .. } => "tx_failed",
            TrackerError::ConfirmationTimeout { .. } => "confirmation_timeout",
            TrackerError::Provider(_) => "provider_error",
            TrackerError::Internal(_) => "internal_error",
        }
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;
