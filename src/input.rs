//! # Push-Button Input
//!
//! Four switches on one port, active low with pull-ups. A falling edge on
//! any of them arms the debounce counter; when the window closes the
//! scheduler samples the port through a [`ButtonSampler`] and posts one
//! `SWITCH_n` event per pressed switch.

use crate::event::Events;

bitflags::bitflags! {
    /// Pressed switches. Bit `n` is switch `n + 1`.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const SW1 = 0x01;
        const SW2 = 0x02;
        const SW3 = 0x04;
        const SW4 = 0x08;
    }
}

/// Reads the switch port. Runs in tick ISR context.
pub type ButtonSampler = fn() -> Buttons;

impl Buttons {
    /// Decode a raw port value where a pressed switch reads 0.
    #[inline]
    pub const fn from_active_low(port: u8) -> Self {
        Self::from_bits_truncate(!port)
    }

    /// The `SWITCH_n` events for these buttons.
    pub fn events(self) -> Events {
        let mut events = Events::empty();
        if self.contains(Buttons::SW1) {
            events |= Events::SWITCH_1;
        }
        if self.contains(Buttons::SW2) {
            events |= Events::SWITCH_2;
        }
        if self.contains(Buttons::SW3) {
            events |= Events::SWITCH_3;
        }
        if self.contains(Buttons::SW4) {
            events |= Events::SWITCH_4;
        }
        events
    }
}

/// Sampler for boards with no switch port wired up.
pub fn no_buttons() -> Buttons {
    Buttons::empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_low_decoding() {
        // Pull-ups high, SW1 and SW3 grounded, upper nibble is other pins
        assert_eq!(Buttons::from_active_low(0b1111_1010), Buttons::SW1 | Buttons::SW3);
        assert_eq!(Buttons::from_active_low(0xff), Buttons::empty());
        assert_eq!(Buttons::from_active_low(0x00), Buttons::all());
    }

    #[test]
    fn test_button_events() {
        assert_eq!(Buttons::SW1.events(), Events::SWITCH_1);
        assert_eq!(
            (Buttons::SW2 | Buttons::SW4).events(),
            Events::SWITCH_2 | Events::SWITCH_4
        );
        assert_eq!(Buttons::all().events(), Events::SWITCHES);
        assert!(no_buttons().events().is_empty());
    }
}
