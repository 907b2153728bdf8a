//! Polled progress oracle: a flag a signal handler (or any other caller)
//! can raise, checked once per entry to `brut` — never inside `advance` —
//! so a user-triggered event can ask the search to report where it is
//! without touching the hot recursion's control flow.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Shared, cheaply-cloned handle to a pending-progress-request flag plus
/// a counter of how many times the search has polled it.
#[derive(Debug, Clone, Default)]
pub struct ProgressFlag {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    requested: AtomicBool,
    polls: AtomicU64,
}

impl ProgressFlag {
    pub fn new() -> ProgressFlag {
        ProgressFlag::default()
    }

    /// Raise the flag (e.g. from a SIGUSR1 handler).
    pub fn request(&self) {
        self.inner.requested.store(true, Ordering::SeqCst);
    }

    /// Check and clear the flag, returning whether a report was pending.
    /// Also increments the poll counter, so tests can assert the
    /// recursion actually polls once per entry.
    pub fn poll(&self) -> bool {
        self.inner.polls.fetch_add(1, Ordering::Relaxed);
        self.inner.requested.swap(false, Ordering::SeqCst)
    }

    pub fn poll_count(&self) -> u64 {
        self.inner.polls.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_then_poll_clears_flag() {
        let flag = ProgressFlag::new();
        assert!(!flag.poll());
        flag.request();
        assert!(flag.poll());
        assert!(!flag.poll());
    }

    #[test]
    fn poll_count_increments() {
        let flag = ProgressFlag::new();
        flag.poll();
        flag.poll();
        assert_eq!(flag.poll_count(), 2);
    }

    #[test]
    fn clone_shares_the_same_flag() {
        let flag = ProgressFlag::new();
        let clone = flag.clone();
        clone.request();
        assert!(flag.poll());
    }
}
