//! Single-flight guard for rapid repeated actions.
//!
//! A guarded request kind may have at most one request in flight. A request
//! that never reports back stops blocking its kind after `STALE_AFTER`, so a
//! hung call can't lock an action out for the rest of the session.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::dispatch::RequestKind;

pub const STALE_AFTER: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct SingleFlight {
    enabled: bool,
    inflight: HashMap<RequestKind, Instant>,
}

impl SingleFlight {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            inflight: HashMap::new(),
        }
    }

    /// Claim `kind`. Returns false when an earlier request of the same kind is
    /// still in flight.
    pub fn try_acquire(&mut self, kind: RequestKind) -> bool {
        self.try_acquire_at(kind, Instant::now())
    }

    fn try_acquire_at(&mut self, kind: RequestKind, now: Instant) -> bool {
        if !self.enabled || !kind.is_guarded() {
            return true;
        }
        if let Some(since) = self.inflight.get(&kind) {
            if now.duration_since(*since) < STALE_AFTER {
                return false;
            }
        }
        self.inflight.insert(kind, now);
        true
    }

    pub fn release(&mut self, kind: RequestKind) {
        self.inflight.remove(&kind);
    }

    pub fn is_in_flight(&self, kind: RequestKind) -> bool {
        self.inflight.contains_key(&kind)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inflight.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_blocked_until_release() {
        let mut guard = SingleFlight::new(true);
        assert!(guard.try_acquire(RequestKind::Play));
        assert!(!guard.try_acquire(RequestKind::Play));
        assert!(guard.try_acquire(RequestKind::Stop));
        assert_eq!(guard.len(), 2);
        guard.release(RequestKind::Play);
        assert!(!guard.is_in_flight(RequestKind::Play));
        assert!(guard.try_acquire(RequestKind::Play));
    }

    #[test]
    fn test_refreshes_are_never_blocked() {
        let mut guard = SingleFlight::new(true);
        assert!(guard.try_acquire(RequestKind::FetchVideos));
        assert!(guard.try_acquire(RequestKind::FetchVideos));
        assert_eq!(guard.len(), 0);
    }

    #[test]
    fn test_disabled_guard_admits_everything() {
        let mut guard = SingleFlight::new(false);
        assert!(guard.try_acquire(RequestKind::Play));
        assert!(guard.try_acquire(RequestKind::Play));
    }

    #[test]
    fn test_stale_entry_is_replaced() {
        let mut guard = SingleFlight::new(true);
        let start = Instant::now();
        assert!(guard.try_acquire_at(RequestKind::Delete, start));
        assert!(!guard.try_acquire_at(RequestKind::Delete, start + Duration::from_secs(5)));
        assert!(guard.try_acquire_at(RequestKind::Delete, start + STALE_AFTER));
    }
}
