// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

use prometheus::{
    register_histogram_with_registry, register_int_counter_with_registry,
    register_int_gauge_with_registry, Histogram, IntCounter, IntGauge, Registry,
};

const CONFIRMATION_LATENCY_SEC_BUCKETS: &[f64] = &[
    1., 2., 5., 10., 15., 20., 30., 45., 60., 90., 120., 180., 240., 300.,
];

#[derive(Clone, Debug)]
pub struct TrackerMetrics {
    pub(crate) txs_tracked: IntCounter,
    pub(crate) txs_confirmed: IntCounter,
    pub(crate) txs_failed: IntCounter,
    pub(crate) txs_timed_out: IntCounter,
    pub(crate) pending_txs: IntGauge,
    pub(crate) confirmation_latency: Histogram,
}

impl TrackerMetrics {
    pub fn new(registry: &Registry) -> Self {
        Self {
            txs_tracked: register_int_counter_with_registry!(
                "pending_tx_tracked_total",
                "Total number of transactions submitted for tracking",
                registry,
            )
            .unwrap(),
            txs_confirmed: register_int_counter_with_registry!(
                "pending_tx_confirmed_total",
                "Total number of tracked transactions confirmed successfully",
                registry,
            )
            .unwrap(),
            txs_failed: register_int_counter_with_registry!(
                "pending_tx_failed_total",
                "Total number of tracked transactions that reverted or whose watch errored",
                registry,
            )
            .unwrap(),
            txs_timed_out: register_int_counter_with_registry!(
                "pending_tx_timed_out_total",
                "Total number of tracked transactions whose confirmation watch timed out",
                registry,
            )
            .unwrap(),
            pending_txs: register_int_gauge_with_registry!(
                "pending_tx_inflight",
                "Number of transactions currently in the pending list",
                registry,
            )
            .unwrap(),
            confirmation_latency: register_histogram_with_registry!(
                "pending_tx_confirmation_latency_seconds",
                "Time from tracking start to observed confirmation",
                CONFIRMATION_LATENCY_SEC_BUCKETS.to_vec(),
                registry,
            )
            .unwrap(),
        }
    }

    pub fn new_for_testing() -> Self {
        let registry = Registry::new();
        Self::new(&registry)
    }
}
