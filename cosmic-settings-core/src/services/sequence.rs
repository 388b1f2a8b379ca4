//! Response ordering
//!
//! Two list requests for the same panel may complete out of order. Each response is tagged
//! with the number of the request that produced it, and a host applies a response only if
//! nothing newer was applied before it.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Monotonic request counter. The first number handed out is 1.
#[derive(Debug, Default)]
pub struct RequestSequence {
    last: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number for the next request.
    pub fn next(&self) -> u64 {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// A value tagged with the sequence number of the request that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sequenced<T> {
    pub seq: u64,
    pub value: T,
}

/// Tracks the newest response a host has applied.
#[derive(Debug, Default)]
pub struct LatestResponse {
    applied: AtomicU64,
}

impl LatestResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `seq` as applied if it is newer than everything applied so far.
    ///
    /// Returns `false` for a stale (or repeated) sequence number; the caller should drop
    /// that response.
    pub fn accept(&self, seq: u64) -> bool {
        self.applied.fetch_max(seq, Ordering::AcqRel) < seq
    }

    /// Unwrap `response` if it is the newest seen so far.
    pub fn take<T>(&self, response: Sequenced<T>) -> Option<T> {
        self.accept(response.seq).then_some(response.value)
    }

    /// Newest applied sequence number, 0 before the first.
    pub fn applied(&self) -> u64 {
        self.applied.load(Ordering::Acquire)
    }
}
