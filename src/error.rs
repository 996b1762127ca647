//! Unrecoverable conditions. Every one of them halts the control loop;
//! game over is a normal transition, not an error.

use core::fmt;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fatal {
    /// Board bring-up failed (peripherals already taken, clocks, ...).
    BoardInit,
    /// The display did not come up.
    DisplayInit,
    /// A draw call failed while the game was running.
    Display,
    /// Pending bits that match no event class. Carries the raw word.
    UnrecognizedEvent(u16),
}

impl Fatal {
    /// Diagnostic code shown by the halt primitive.
    pub const fn code(&self) -> u8 {
        match self {
            Fatal::BoardInit => 1,
            Fatal::DisplayInit => 2,
            Fatal::Display => 3,
            Fatal::UnrecognizedEvent(_) => 10,
        }
    }
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fatal::BoardInit => f.write_str("board init failed"),
            Fatal::DisplayInit => f.write_str("display init failed"),
            Fatal::Display => f.write_str("display write failed"),
            Fatal::UnrecognizedEvent(bits) => write!(f, "unrecognized event {:#06x}", bits),
        }
    }
}
