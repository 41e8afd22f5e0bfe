//! Rejects a second concurrent run of the same logical operation.

use std::{
    collections::HashSet,
    sync::{Mutex, PoisonError},
};

/// Registry of operations currently running.
#[derive(Debug, Default)]
pub struct InFlight {
    active: Mutex<HashSet<&'static str>>,
}

impl InFlight {
    /// A registry with nothing running.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `operation` as running. Returns `None` when it already is.
    #[must_use]
    pub fn begin(&self, operation: &'static str) -> Option<InFlightGuard<'_>> {
        let inserted = self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(operation);
        inserted.then_some(InFlightGuard {
            owner: self,
            operation,
        })
    }

    /// Whether `operation` is currently running.
    #[must_use]
    pub fn is_active(&self, operation: &str) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(operation)
    }
}

/// Releases the operation when dropped.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    owner: &'a InFlight,
    operation: &'static str,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(self.operation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_is_rejected_until_release() {
        let in_flight = InFlight::new();
        let guard = in_flight.begin("login").expect("first caller wins");
        assert!(in_flight.is_active("login"));
        assert!(in_flight.begin("login").is_none());

        drop(guard);
        assert!(!in_flight.is_active("login"));
        assert!(in_flight.begin("login").is_some());
    }

    #[test]
    fn distinct_operations_do_not_block_each_other() {
        let in_flight = InFlight::new();
        let _login = in_flight.begin("login").unwrap();
        assert!(in_flight.begin("register").is_some());
    }
}
