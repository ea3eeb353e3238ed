//! Run-wide probe budget.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Maximum number of probes allowed for one run.
///
/// A unit is reserved with [`ProbeBudget::try_acquire`] before each probe is
/// issued. Reservation is a single atomic update, so concurrent callers can
/// never push the total past the limit.
#[derive(Debug, Default)]
pub struct ProbeBudget {
    limit: Option<usize>,
    used: AtomicUsize,
}

impl ProbeBudget {
    /// Creates a budget; `None` means unbounded.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            used: AtomicUsize::new(0),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Reserves one probe. Returns `false` once the budget is spent.
    pub fn try_acquire(&self) -> bool {
        match self.limit {
            None => {
                self.used.fetch_add(1, Ordering::SeqCst);
                true
            }
            Some(max) => self
                .used
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                    (n < max).then_some(n + 1)
                })
                .is_ok(),
        }
    }

    /// Number of probes reserved so far.
    pub fn used(&self) -> usize {
        self.used.load(Ordering::SeqCst)
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn is_exhausted(&self) -> bool {
        self.limit.is_some_and(|max| self.used() >= max)
    }
}
