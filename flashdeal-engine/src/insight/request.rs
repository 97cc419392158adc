//! Busy flag plus monotonic request tokens for one UI affordance.
//!
//! A response is applied only when it carries the token of the request that
//! is still outstanding. Anything else (a reply that lost a race with
//! `cancel`, or one from before a reset) is dropped.

use serde::{Deserialize, Serialize};

use crate::constants::LOG_TARGET_INSIGHT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestGate {
    issued: u64,
    pending: Option<RequestToken>,
}

impl RequestGate {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            issued: 0,
            pending: None,
        }
    }

    /// Issue a token, or `None` while a request is still outstanding.
    pub fn begin(&mut self) -> Option<RequestToken> {
        if self.pending.is_some() {
            log::debug!(target: LOG_TARGET_INSIGHT, "request ignored: already busy");
            return None;
        }
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.pending = Some(token);
        Some(token)
    }

    /// Settle a request. Returns `true` when its result should be applied.
    pub fn complete(&mut self, token: RequestToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            log::debug!(
                target: LOG_TARGET_INSIGHT,
                "discarding stale response #{} (pending: {:?})",
                token.sequence(),
                self.pending.map(RequestToken::sequence)
            );
            false
        }
    }

    /// Forget the outstanding request; its response will be discarded.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_while_busy_is_a_no_op() {
        let mut gate = RequestGate::new();
        let first = gate.begin().unwrap();
        assert!(gate.is_busy());
        assert_eq!(gate.begin(), None);
        assert_eq!(gate.issued(), 1);
        assert!(gate.complete(first));
        assert!(!gate.is_busy());
    }

    #[test]
    fn tokens_are_monotonic() {
        let mut gate = RequestGate::new();
        let a = gate.begin().unwrap();
        gate.complete(a);
        let b = gate.begin().unwrap();
        assert!(b > a);
        assert_eq!(b.sequence(), 2);
    }

    #[test]
    fn cancelled_response_is_discarded() {
        let mut gate = RequestGate::new();
        let stale = gate.begin().unwrap();
        gate.cancel();
        let fresh = gate.begin().unwrap();
        assert!(!gate.complete(stale));
        assert!(gate.is_busy(), "stale reply must not clear the busy flag");
        assert!(gate.complete(fresh));
    }

    #[test]
    fn double_complete_applies_once() {
        let mut gate = RequestGate::new();
        let token = gate.begin().unwrap();
        assert!(gate.complete(token));
        assert!(!gate.complete(token));
    }
}
