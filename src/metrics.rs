//! Lightweight global metrics for ImageHooks.
//!
//! Атомарные счётчики по подсистемам:
//! - Registry (register/remove)
//! - Dispatch
//! - Chains (mipmaps / frames)

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

// ----- Registry -----
static HANDLERS_REGISTERED: AtomicU64 = AtomicU64::new(0);
static HANDLERS_REMOVED: AtomicU64 = AtomicU64::new(0);

// ----- Dispatch -----
static DISPATCH_HITS: AtomicU64 = AtomicU64::new(0);
static DISPATCH_MISSES: AtomicU64 = AtomicU64::new(0);
static DISPATCH_NO_EXT: AtomicU64 = AtomicU64::new(0);

// ----- Chains -----
static CHAIN_REBUILDS: AtomicU64 = AtomicU64::new(0);
static CHAIN_NODES_ALLOCATED: AtomicU64 = AtomicU64::new(0);
static CHAIN_NODES_RELEASED: AtomicU64 = AtomicU64::new(0);
static CHAIN_ROLLBACKS: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    // Registry
    pub handlers_registered: u64,
    pub handlers_removed: u64,

    // Dispatch
    pub dispatch_hits: u64,
    pub dispatch_misses: u64,
    pub dispatch_no_ext: u64,

    // Chains
    pub chain_rebuilds: u64,
    pub chain_nodes_allocated: u64,
    pub chain_nodes_released: u64,
    pub chain_rollbacks: u64,
}

impl MetricsSnapshot {
    pub fn dispatch_hit_ratio(&self) -> f64 {
        let total = self.dispatch_hits + self.dispatch_misses;
        if total == 0 {
            0.0
        } else {
            self.dispatch_hits as f64 / total as f64
        }
    }
}

// ----- Recorders (Registry) -----
pub fn record_handler_registered() {
    HANDLERS_REGISTERED.fetch_add(1, Ordering::Relaxed);
}
pub fn record_handlers_removed(n: usize) {
    HANDLERS_REMOVED.fetch_add(n as u64, Ordering::Relaxed);
}

// ----- Recorders (Dispatch) -----
pub fn record_dispatch_hit() {
    DISPATCH_HITS.fetch_add(1, Ordering::Relaxed);
}
pub fn record_dispatch_miss() {
    DISPATCH_MISSES.fetch_add(1, Ordering::Relaxed);
}
pub fn record_dispatch_no_ext() {
    DISPATCH_NO_EXT.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Chains) -----
pub fn record_chain_rebuild() {
    CHAIN_REBUILDS.fetch_add(1, Ordering::Relaxed);
}
pub fn record_chain_node_allocated() {
    CHAIN_NODES_ALLOCATED.fetch_add(1, Ordering::Relaxed);
}
pub fn record_chain_nodes_released(n: u64) {
    CHAIN_NODES_RELEASED.fetch_add(n, Ordering::Relaxed);
}
pub fn record_chain_rollback() {
    CHAIN_ROLLBACKS.fetch_add(1, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        handlers_registered: HANDLERS_REGISTERED.load(Ordering::Relaxed),
        handlers_removed: HANDLERS_REMOVED.load(Ordering::Relaxed),

        dispatch_hits: DISPATCH_HITS.load(Ordering::Relaxed),
        dispatch_misses: DISPATCH_MISSES.load(Ordering::Relaxed),
        dispatch_no_ext: DISPATCH_NO_EXT.load(Ordering::Relaxed),

        chain_rebuilds: CHAIN_REBUILDS.load(Ordering::Relaxed),
        chain_nodes_allocated: CHAIN_NODES_ALLOCATED.load(Ordering::Relaxed),
        chain_nodes_released: CHAIN_NODES_RELEASED.load(Ordering::Relaxed),
        chain_rollbacks: CHAIN_ROLLBACKS.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    HANDLERS_REGISTERED.store(0, Ordering::Relaxed);
    HANDLERS_REMOVED.store(0, Ordering::Relaxed);

    DISPATCH_HITS.store(0, Ordering::Relaxed);
    DISPATCH_MISSES.store(0, Ordering::Relaxed);
    DISPATCH_NO_EXT.store(0, Ordering::Relaxed);

    CHAIN_REBUILDS.store(0, Ordering::Relaxed);
    CHAIN_NODES_ALLOCATED.store(0, Ordering::Relaxed);
    CHAIN_NODES_RELEASED.store(0, Ordering::Relaxed);
    CHAIN_ROLLBACKS.store(0, Ordering::Relaxed);
}
