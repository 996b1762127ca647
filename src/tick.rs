//! # Tick Counters
//!
//! Three logical counters derived from the periodic tick:
//!
//! - **per-second**: counts elapsed whole seconds (level time limits)
//! - **move cadence**: fires `MOVE_SNAKE` every `cadence` ticks
//! - **debounce**: armed by a button edge, fires once after the window
//!
//! The counters are plain data. The scheduler keeps them behind a
//! critical-section mutex because the tick ISR advances them while the
//! main loop changes the cadence.

use crate::config::{DEBOUNCE_TICKS, Level, TICKS_PER_SECOND};

/// What one tick produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Time to move the snake.
    pub move_due: bool,
    /// The debounce window closed; sample the switches now.
    pub debounce_done: bool,
    /// A whole second elapsed.
    pub second_elapsed: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct TickCounters {
    second_countdown: u16,
    seconds: u32,
    move_countdown: u16,
    move_cadence: u16,
    debounce: u16,
}

impl TickCounters {
    pub const fn new() -> Self {
        Self {
            second_countdown: TICKS_PER_SECOND,
            seconds: 0,
            move_countdown: Level::One.move_cadence(),
            move_cadence: Level::One.move_cadence(),
            debounce: 0,
        }
    }

    /// Advance all counters by one tick.
    pub fn tick(&mut self) -> Tick {
        let mut out = Tick::default();

        self.second_countdown -= 1;
        if self.second_countdown == 0 {
            self.second_countdown = TICKS_PER_SECOND;
            self.seconds = self.seconds.wrapping_add(1);
            out.second_elapsed = true;
        }

        self.move_countdown -= 1;
        if self.move_countdown == 0 {
            self.move_countdown = self.move_cadence;
            out.move_due = true;
        }

        if self.debounce > 0 {
            self.debounce -= 1;
            out.debounce_done = self.debounce == 0;
        }

        out
    }

    /// Change the move cadence. A countdown already longer than the new
    /// cadence is cut short so a faster level takes effect immediately.
    pub fn set_move_cadence(&mut self, ticks: u16) {
        self.move_cadence = ticks.max(1);
        self.move_countdown = self.move_countdown.min(self.move_cadence);
    }

    #[inline]
    pub const fn move_cadence(&self) -> u16 {
        self.move_cadence
    }

    /// (Re)start the debounce window. Bouncing edges keep pushing it out.
    #[inline]
    pub fn arm_debounce(&mut self) {
        self.debounce = DEBOUNCE_TICKS;
    }

    #[inline]
    pub const fn seconds(&self) -> u32 {
        self.seconds
    }
}

impl Default for TickCounters {
    fn default() -> Self {
        Self::new()
    }
}
