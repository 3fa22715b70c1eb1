// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Confirmation watching for tracked transactions
//!
//! [`PendingTxTracker::track`] appends the transaction to the shared
//! [`PendingTxStore`] synchronously, then spawns a watch task that polls the
//! signer's provider for the receipt. The entry is removed from the store
//! before the returned [`Confirmation`] settles, so a caller that awaits the
//! confirmation always observes the post-removal list.

use crate::config::TrackerConfig;
use crate::error::{TrackerError, TrackerResult};
use crate::metrics::TrackerMetrics;
use crate::store::PendingTxStore;
use crate::types::TrackedTx;
use ethers::providers::Middleware;
use ethers::types::{TransactionReceipt, TxHash, U64};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Awaitable outcome of one tracked transaction.
///
/// Resolves exactly once: `Ok` with the status-1 receipt, or `Err` with a
/// [`TrackerError`] on revert, watch timeout or provider failure. Dropping
/// the handle detaches it; the watch keeps running and still maintains the
/// pending list.
pub struct Confirmation {
    tx_hash: TxHash,
    handle: JoinHandle<TrackerResult<TransactionReceipt>>,
}

impl Confirmation {
    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }
}

impl Future for Confirmation {
    type Output = TrackerResult<TransactionReceipt>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(e)) => Poll::Ready(Err(TrackerError::Internal(format!(
                "confirmation watch task failed: {e}"
            )))),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Tracks in-flight transactions until they are mined.
///
/// One instance is owned by the application root and shared where needed;
/// the observable state lives in the injected [`PendingTxStore`].
pub struct PendingTxTracker {
    store: Arc<PendingTxStore>,
    config: TrackerConfig,
    metrics: Arc<TrackerMetrics>,
}

impl PendingTxTracker {
    pub fn new(
        store: Arc<PendingTxStore>,
        config: TrackerConfig,
        metrics: Arc<TrackerMetrics>,
    ) -> Self {
        Self {
            store,
            config,
            metrics,
        }
    }

    pub fn store(&self) -> &Arc<PendingTxStore> {
        &self.store
    }

    /// Start tracking a submitted transaction.
    ///
    /// The transaction is appended to the pending list before this method
    /// returns; the confirmation watch runs on a spawned task. `signer` is
    /// any [`Middleware`] whose provider can serve receipt and block-number
    /// queries, typically the `SignerMiddleware` that submitted the
    /// transaction.
    pub fn track<M: Middleware + 'static>(&self, tx: TrackedTx, signer: Arc<M>) -> Confirmation {
        let tx_hash = tx.tx_hash;
        info!("Tracking transaction {}", tx);

        self.store.insert(tx);
        self.metrics.txs_tracked.inc();
        self.metrics
            .pending_txs
            .set(self.store.pending_count() as i64);

        let store = self.store.clone();
        let config = self.config.clone();
        let metrics = self.metrics.clone();
        let handle =
            tokio::spawn(
                async move { watch_and_settle(store, config, metrics, tx_hash, signer).await },
            );

        Confirmation { tx_hash, handle }
    }
}

/// Runs one confirmation watch to its terminal outcome and maintains the
/// pending list accordingly. The store mutation happens before this function
/// returns, which is what gives the remove-before-resolve ordering.
async fn watch_and_settle<M: Middleware>(
    store: Arc<PendingTxStore>,
    config: TrackerConfig,
    metrics: Arc<TrackerMetrics>,
    tx_hash: TxHash,
    signer: Arc<M>,
) -> TrackerResult<TransactionReceipt> {
    let started = Instant::now();
    let watch = wait_for_receipt(
        signer.as_ref(),
        tx_hash,
        config.required_confirmations,
        config.receipt_poll_interval(),
    );

    match tokio::time::timeout(config.confirmation_timeout(), watch).await {
        Ok(Ok(receipt)) => {
            // Mined, successfully or not: the entry leaves the pending list.
            store.remove(tx_hash);
            metrics.pending_txs.set(store.pending_count() as i64);
            metrics
                .confirmation_latency
                .observe(started.elapsed().as_secs_f64());

            if receipt.status == Some(U64::one()) {
                info!(
                    "Transaction {:?} confirmed in block {:?}",
                    tx_hash, receipt.block_number
                );
                metrics.txs_confirmed.inc();
                Ok(receipt)
            } else {
                warn!(
                    "Transaction {:?} reverted in block {:?}",
                    tx_hash, receipt.block_number
                );
                metrics.txs_failed.inc();
                Err(TrackerError::TxFailed {
                    receipt: Box::new(receipt),
                })
            }
        }
        Ok(Err(e)) => {
            warn!("Watch for transaction {:?} failed: {}", tx_hash, e);
            if config.remove_on_failure {
                store.remove(tx_hash);
                metrics.pending_txs.set(store.pending_count() as i64);
            }
            metrics.txs_failed.inc();
            Err(e)
        }
        Err(_elapsed) => {
            warn!(
                "Transaction {:?} not confirmed within {}s, giving up",
                tx_hash, config.confirmation_timeout_secs
            );
            if config.remove_on_failure {
                store.remove(tx_hash);
                metrics.pending_txs.set(store.pending_count() as i64);
            }
            metrics.txs_timed_out.inc();
            Err(TrackerError::ConfirmationTimeout {
                timeout_secs: config.confirmation_timeout_secs,
            })
        }
    }
}

/// Poll the provider until the transaction is mined at the requested
/// confirmation depth. Loops forever if the transaction never lands; the
/// caller bounds it with a timeout.
pub async fn wait_for_receipt<M: Middleware>(
    provider: &M,
    tx_hash: TxHash,
    required_confirmations: u64,
    poll_interval: Duration,
) -> TrackerResult<TransactionReceipt> {
    loop {
        let receipt = provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| TrackerError::Provider(e.to_string()))?;

        if let Some(receipt) = receipt {
            match receipt.block_number {
                Some(_) if required_confirmations <= 1 => return Ok(receipt),
                Some(included) => {
                    let latest = provider
                        .get_block_number()
                        .await
                        .map_err(|e| TrackerError::Provider(e.to_string()))?;
                    // The inclusion block itself counts as one confirmation.
                    if latest.as_u64() + 1 >= included.as_u64() + required_confirmations {
                        return Ok(receipt);
                    }
                    debug!(
                        "Transaction {:?} at block {} has {} of {} confirmations",
                        tx_hash,
                        included,
                        latest.as_u64() + 1 - included.as_u64(),
                        required_confirmations
                    );
                }
                None => {
                    debug!("Receipt for {:?} has no block number yet", tx_hash);
                }
            }
        } else {
            debug!("No receipt for {:?} yet", tx_hash);
        }

        tokio::time::sleep(poll_interval).await;
    }
}
