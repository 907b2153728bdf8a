//! Bounded free-list pool for the per-branch state snapshots `brut` takes
//! around every recursive call.
//!
//! Every branch exit must leave the caller's [`SearchContext`] bitwise
//! identical to its state before the call. This pool is the single
//! snapshot strategy used throughout `hohha-recover` (no ad hoc
//! save-local-then-restore) — it recycles freed snapshots instead of
//! allocating one per recursion frame, keeping the hot path
//! allocation-free after warmup.

use crate::constraint::SearchContext;

/// A saved copy of a [`SearchContext`], reusable across many branches.
#[derive(Debug, Clone)]
pub struct Snapshot(SearchContext);

/// Single-threaded, capacity-bounded free list of [`Snapshot`]s.
pub struct SnapshotPool {
    free: Vec<Snapshot>,
    capacity: usize,
}

impl SnapshotPool {
    pub fn new(capacity: usize) -> SnapshotPool {
        SnapshotPool {
            free: Vec::new(),
            capacity,
        }
    }

    /// Take a snapshot of `ctx`'s current state, reusing a pooled buffer
    /// if one is available.
    pub fn take(&mut self, ctx: &SearchContext) -> Snapshot {
        match self.free.pop() {
            Some(mut snap) => {
                snap.0.clone_from(ctx);
                snap
            }
            None => Snapshot(ctx.clone()),
        }
    }

    /// Restore `ctx` to the state held by `snap`, then return `snap` to
    /// the free list if there is room, or drop it.
    pub fn restore(&mut self, ctx: &mut SearchContext, snap: Snapshot) {
        ctx.clone_from(&snap.0);
        if self.free.len() < self.capacity {
            self.free.push(snap);
        }
    }

    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}

/// Default bound on the number of snapshots kept warm in the free list.
pub const DEFAULT_POOL_CAPACITY: usize = 1 << 14;

impl Default for SnapshotPool {
    fn default() -> SnapshotPool {
        SnapshotPool::new(DEFAULT_POOL_CAPACITY)
    }
}
