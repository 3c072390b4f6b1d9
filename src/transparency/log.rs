//! Collection transparency log.
//!
//! This module counts what the collector did without recording any of the
//! values it read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters for snapshot collection.
#[derive(Debug)]
pub struct CollectionLog {
    /// Number of snapshots assembled
    snapshots_assembled: AtomicU64,
    /// Number of exported fields that carried a value
    fields_populated: AtomicU64,
    /// Number of exported fields that were absent
    fields_absent: AtomicU64,
    /// Number of attribution probes attempted
    attribution_probes: AtomicU64,
    /// Number of probes stopped by the signature check
    signature_rejections: AtomicU64,
    /// Number of probes that returned a token
    attribution_tokens: AtomicU64,
    /// Log creation time
    started_at: DateTime<Utc>,
}

impl CollectionLog {
    /// Create a new collection log.
    pub fn new() -> Self {
        Self {
            snapshots_assembled: AtomicU64::new(0),
            fields_populated: AtomicU64::new(0),
            fields_absent: AtomicU64::new(0),
            attribution_probes: AtomicU64::new(0),
            signature_rejections: AtomicU64::new(0),
            attribution_tokens: AtomicU64::new(0),
            started_at: Utc::now(),
        }
    }

    /// Record an assembled snapshot and its field coverage.
    pub fn record_snapshot(&self, populated: u64, absent: u64) {
        self.snapshots_assembled.fetch_add(1, Ordering::Relaxed);
        self.fields_populated
            .fetch_add(populated, Ordering::Relaxed);
        self.fields_absent.fetch_add(absent, Ordering::Relaxed);
    }

    /// Record an attribution probe run.
    pub fn record_probe(&self, signature_rejected: bool, token_found: bool) {
        self.attribution_probes.fetch_add(1, Ordering::Relaxed);
        if signature_rejected {
            self.signature_rejections.fetch_add(1, Ordering::Relaxed);
        }
        if token_found {
            self.attribution_tokens.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get the current statistics.
    pub fn stats(&self) -> CollectionStats {
        CollectionStats {
            snapshots_assembled: self.snapshots_assembled.load(Ordering::Relaxed),
            fields_populated: self.fields_populated.load(Ordering::Relaxed),
            fields_absent: self.fields_absent.load(Ordering::Relaxed),
            attribution_probes: self.attribution_probes.load(Ordering::Relaxed),
            signature_rejections: self.signature_rejections.load(Ordering::Relaxed),
            attribution_tokens: self.attribution_tokens.load(Ordering::Relaxed),
            started_at: self.started_at,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Collection Statistics:\n\
             - Snapshots assembled: {}\n\
             - Fields populated: {}\n\
             - Fields absent: {}\n\
             - Attribution probes: {}\n\
             - Signature rejections: {}\n\
             - Attribution tokens read: {}\n\
             \n\
             Privacy Guarantee:\n\
             - Counts only, no field values retained\n\
             - No network I/O, no persisted state",
            stats.snapshots_assembled,
            stats.fields_populated,
            stats.fields_absent,
            stats.attribution_probes,
            stats.signature_rejections,
            stats.attribution_tokens
        )
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.snapshots_assembled.store(0, Ordering::Relaxed);
        self.fields_populated.store(0, Ordering::Relaxed);
        self.fields_absent.store(0, Ordering::Relaxed);
        self.attribution_probes.store(0, Ordering::Relaxed);
        self.signature_rejections.store(0, Ordering::Relaxed);
        self.attribution_tokens.store(0, Ordering::Relaxed);
    }
}

impl Default for CollectionLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of collection statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub snapshots_assembled: u64,
    pub fields_populated: u64,
    pub fields_absent: u64,
    pub attribution_probes: u64,
    pub signature_rejections: u64,
    pub attribution_tokens: u64,
    pub started_at: DateTime<Utc>,
}

/// Thread-safe shared collection log.
pub type SharedCollectionLog = Arc<CollectionLog>;

/// Create a new shared collection log.
pub fn create_shared_log() -> SharedCollectionLog {
    Arc::new(CollectionLog::new())
}
