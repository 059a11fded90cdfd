//! Single-use signals
//!
//! A signal is armed with a payload, then fired at most once. Firing hands
//! the payload to the caller and leaves the slot empty, so a second fire is
//! a no-op. Re-arming a slot that has not fired yet is a logic error.

/// One-shot signal slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneShot<T> {
    /// Nothing pending
    Idle,
    /// Waiting to fire with this payload
    Armed(T),
}

impl<T> Default for OneShot<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> OneShot<T> {
    pub fn new() -> Self {
        Self::Idle
    }

    /// Arm the slot. Panics in debug builds if it is already armed.
    pub fn arm(&mut self, payload: T) {
        debug_assert!(!self.is_armed(), "one-shot signal armed twice");
        *self = Self::Armed(payload);
    }

    /// Fire the signal, consuming its payload. `None` if not armed.
    pub fn fire(&mut self) -> Option<T> {
        match std::mem::take(self) {
            Self::Armed(payload) => Some(payload),
            Self::Idle => None,
        }
    }

    /// Drop any pending payload without firing
    pub fn disarm(&mut self) {
        *self = Self::Idle;
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        matches!(self, Self::Armed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_exactly_once() {
        let mut signal = OneShot::new();
        signal.arm(5);
        assert!(signal.is_armed());
        assert_eq!(signal.fire(), Some(5));
        assert_eq!(signal.fire(), None);
        assert!(!signal.is_armed());
    }

    #[test]
    fn test_disarm_prevents_fire() {
        let mut signal = OneShot::new();
        signal.arm(());
        signal.disarm();
        assert_eq!(signal.fire(), None);
    }

    #[test]
    fn test_can_rearm_after_fire() {
        let mut signal = OneShot::new();
        signal.arm("a");
        signal.fire();
        signal.arm("b");
        assert_eq!(signal.fire(), Some("b"));
    }

    #[test]
    #[should_panic(expected = "armed twice")]
    #[cfg(debug_assertions)]
    fn test_double_arm_is_a_logic_error() {
        let mut signal = OneShot::new();
        signal.arm(1);
        signal.arm(2);
    }
}
