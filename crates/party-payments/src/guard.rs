//! Execution Guard
//!
//! One-shot latch owned by a single mount of the payment-success page. The UI
//! framework may run the page's setup more than once for one navigation; only
//! the first entry does any work. This suppresses re-entry on a single event
//! loop and is not a lock. A fresh mount gets a fresh guard.

use std::cell::Cell;

#[derive(Debug, Default)]
pub struct ExecutionGuard {
    entered: Cell<bool>,
}

impl ExecutionGuard {
    pub const fn new() -> Self {
        Self {
            entered: Cell::new(false),
        }
    }

    /// Check-and-set. Returns `true` only for the first caller.
    pub fn try_enter(&self) -> bool {
        !self.entered.replace(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits_once() {
        let guard = ExecutionGuard::new();
        assert!(guard.try_enter());
        assert!(!guard.try_enter());
        assert!(!guard.try_enter());
    }

    #[test]
    fn test_fresh_guard_is_open() {
        let first = ExecutionGuard::new();
        assert!(first.try_enter());
        assert!(ExecutionGuard::default().try_enter());
    }
}
