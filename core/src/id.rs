//! Identity types for admix entities.
//!
//! Fragment identity is the basis for de-duplication in the composer: the
//! `mixed` ledger records FragmentIds, not fragment contents. Identifiers are:
//! - Unique within the process
//! - Immutable once assigned
//! - Opaque to external users

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_FRAGMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a fragment.
///
/// Allocated once per fragment at construction time, so two fragments built
/// from identical members still have distinct identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentId(u64);

impl FragmentId {
    /// Allocate the next process-unique id.
    pub(crate) fn next() -> Self {
        Self(NEXT_FRAGMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}
