//! # Pending-Event Set
//!
//! A single word of independent event flags. Interrupt handlers set flags
//! with [`EventQueue::post`]; the main loop is the only reader and clears
//! exactly the flag it is about to service with [`EventQueue::take`].
//!
//! Every update is a single atomic read-modify-write, so a flag posted by an
//! ISR while the consumer services another flag is never lost.

use portable_atomic::{AtomicU16, Ordering};

bitflags::bitflags! {
    /// Event classes. Bit values are part of the firmware ABI (ISRs post
    /// raw words), so they are fixed.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Events: u16 {
        const SWITCH_1 = 0x0001;
        const SWITCH_2 = 0x0002;
        const SWITCH_3 = 0x0004;
        const SWITCH_4 = 0x0008;

        const START_GAME = 0x0010;
        const NEXT_LEVEL = 0x0020;
        const END_GAME = 0x0040;
        const NEW_GAME = 0x0080;

        const MOVE_SNAKE = 0x0100;
        const LCD_UPDATE = 0x0200;

        const SWITCHES = Self::SWITCH_1.bits()
            | Self::SWITCH_2.bits()
            | Self::SWITCH_3.bits()
            | Self::SWITCH_4.bits();
    }
}

/// Interrupt-safe set of pending events.
pub struct EventQueue {
    pending: AtomicU16,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            pending: AtomicU16::new(0),
        }
    }

    /// Mark `events` pending. Callable from any context.
    #[inline]
    pub fn post(&self, events: Events) {
        self.pending.fetch_or(events.bits(), Ordering::Release);
    }

    /// Snapshot of the pending set, including bits outside the known classes.
    #[inline]
    pub fn pending(&self) -> Events {
        Events::from_bits_retain(self.pending.load(Ordering::Acquire))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.load(Ordering::Acquire) == 0
    }

    /// Clear `class` and report whether any of it was pending.
    ///
    /// Only the bits of `class` are touched; flags posted concurrently for
    /// other classes survive.
    #[inline]
    pub fn take(&self, class: Events) -> bool {
        let prev = self.pending.fetch_and(!class.bits(), Ordering::AcqRel);
        prev & class.bits() != 0
    }

    /// Clear and return everything pending.
    #[inline]
    pub fn drain(&self) -> Events {
        Events::from_bits_retain(self.pending.swap(0, Ordering::AcqRel))
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_accumulates_flags() {
        let queue = EventQueue::new();
        assert!(queue.is_empty());

        queue.post(Events::MOVE_SNAKE);
        queue.post(Events::SWITCH_1);
        queue.post(Events::MOVE_SNAKE);

        assert_eq!(queue.pending(), Events::MOVE_SNAKE | Events::SWITCH_1);
    }

    #[test]
    fn test_take_clears_only_its_class() {
        let queue = EventQueue::new();
        queue.post(Events::MOVE_SNAKE | Events::SWITCH_1 | Events::NEW_GAME);

        assert!(queue.take(Events::SWITCH_1));
        assert_eq!(queue.pending(), Events::MOVE_SNAKE | Events::NEW_GAME);

        // Not pending: no effect, reports false
        assert!(!queue.take(Events::END_GAME));
        assert_eq!(queue.pending(), Events::MOVE_SNAKE | Events::NEW_GAME);
    }

    #[test]
    fn test_drain_keeps_unknown_bits() {
        let queue = EventQueue::new();
        queue.post(Events::from_bits_retain(0x8000) | Events::START_GAME);

        let drained = queue.drain();
        assert_eq!(drained.bits(), 0x8010);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_switch_group() {
        assert_eq!(Events::SWITCHES.bits(), 0x000f);
        assert!(Events::SWITCHES.contains(Events::SWITCH_3));
    }
}
