// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Observable store for the pending transaction list
//!
//! The list lives behind a `tokio::sync::watch` channel: every mutation
//! publishes a new value and wakes all subscribers. Construct one per
//! application root and share it via `Arc`; there is no process-wide
//! singleton.

use crate::types::TrackedTx;
use ethers::types::TxHash;
use tokio::sync::watch;
use tracing::debug;

/// Ordered collection of in-flight transactions, observable by any number
/// of subscribers.
///
/// Entries are keyed by transaction hash. Mutations are serialized through
/// the watch sender, so concurrent inserts and removals from different
/// tasks never clobber each other.
#[derive(Debug)]
pub struct PendingTxStore {
    list: watch::Sender<Vec<TrackedTx>>,
}

impl PendingTxStore {
    pub fn new() -> Self {
        let (list, _) = watch::channel(Vec::new());
        Self { list }
    }

    /// Subscribe to the pending list. The receiver always observes the
    /// latest published value; reading never mutates the list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<TrackedTx>> {
        self.list.subscribe()
    }

    /// Snapshot of the current pending list.
    pub fn current(&self) -> Vec<TrackedTx> {
        self.list.borrow().clone()
    }

    /// Atomically replace the whole list, notifying all subscribers.
    pub fn replace(&self, txs: Vec<TrackedTx>) {
        debug!("PendingTxStore: replacing list, new_len={}", txs.len());
        self.list.send_replace(txs);
    }

    /// Append one transaction, notifying all subscribers.
    pub fn insert(&self, tx: TrackedTx) {
        debug!("PendingTxStore: insert {}", tx);
        self.list.send_modify(|list| list.push(tx));
    }

    /// Remove the entry with the given hash, if present.
    ///
    /// Removal is keyed by hash rather than by position so that
    /// interleaved removals from concurrently settling watches can never
    /// delete the wrong entry. Subscribers are only notified when an entry
    /// was actually removed.
    pub fn remove(&self, tx_hash: TxHash) -> Option<TrackedTx> {
        let mut removed = None;
        self.list.send_if_modified(|list| {
            match list.iter().position(|tx| tx.tx_hash == tx_hash) {
                Some(pos) => {
                    removed = Some(list.remove(pos));
                    true
                }
                None => false,
            }
        });
        if let Some(tx) = &removed {
            debug!("PendingTxStore: removed {}", tx);
        }
        removed
    }

    pub fn contains(&self, tx_hash: TxHash) -> bool {
        self.list.borrow().iter().any(|tx| tx.tx_hash == tx_hash)
    }

    pub fn pending_count(&self) -> usize {
        self.list.borrow().len()
    }
}

impl Default for PendingTxStore {
    fn default() -> Self {
        Self::new()
    }
}
