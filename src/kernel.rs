//! # Kernel
//!
//! Global scheduler instance and the API interrupt handlers and `main` use
//! to reach it.
//!
//! ## Startup Sequence
//!
//! ```text
//! reset_handler (cortex-m-rt)
//!   └─► main()
//!         ├─► kernel::init()        ← Reset pending events, post NEW_GAME
//!         ├─► Game::new()           ← Display + configuration
//!         └─► kernel::start()       ← Configure SysTick, run the loop (no return)
//!               └─► Scheduler::run_forever()
//! ```
//!
//! ## Interrupt Entry Points
//!
//! - `SysTick` → [`on_tick`]
//! - switch port ISR (board specific) → [`on_button_edge`]

use crate::arch::cortex_m4;
use crate::display::Display;
use crate::event::Events;
use crate::game::Game;
use crate::input::ButtonSampler;
use crate::scheduler::Scheduler;

// ---------------------------------------------------------------------------
// Global scheduler instance
// ---------------------------------------------------------------------------

/// The one scheduler. Every field is an atomic or sits behind a
/// critical-section mutex, so it is shared by plain reference from both
/// the ISRs and the main loop.
static SCHEDULER: Scheduler = Scheduler::new();

#[inline]
pub fn scheduler() -> &'static Scheduler {
    &SCHEDULER
}

// ---------------------------------------------------------------------------
// Kernel API
// ---------------------------------------------------------------------------

/// Prepare the scheduler for a fresh run.
///
/// Drops anything posted before bring-up finished, installs the switch
/// sampler and queues `NEW_GAME` so the first pass draws the title screen.
pub fn init(sampler: ButtonSampler) {
    SCHEDULER.drain();
    SCHEDULER.set_button_sampler(sampler);
    SCHEDULER.post(Events::NEW_GAME);
}

/// Tick entry point, called from the SysTick handler.
#[inline]
pub fn on_tick() {
    SCHEDULER.tick();
}

/// Switch edge entry point, called from the board's port ISR.
#[inline]
pub fn on_button_edge() {
    SCHEDULER.button_edge();
}

/// Start the tick source and run the event loop. **Does not return.**
///
/// A [`Fatal`](crate::error::Fatal) raised by the loop halts the core
/// through [`cortex_m4::halt`].
pub fn start<D: Display>(mut game: Game<D>, mut core_peripherals: cortex_m::Peripherals) -> ! {
    cortex_m4::configure_systick(&mut core_peripherals.SYST);
    cortex_m4::set_interrupt_priorities(&mut core_peripherals.SCB);

    SCHEDULER.run_forever(&mut game, &mut cortex_m4::Wfi, cortex_m4::halt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Buttons;

    fn none_pressed() -> Buttons {
        Buttons::empty()
    }

    // The global instance is shared by every test in this module; keep to a
    // single test so nothing races on it.
    #[test]
    fn test_init_queues_new_game_only() {
        scheduler().post(Events::SWITCH_2 | Events::MOVE_SNAKE);
        init(none_pressed);
        assert_eq!(scheduler().pending(), Events::NEW_GAME);

        on_button_edge();
        for _ in 0..crate::config::DEBOUNCE_TICKS {
            on_tick();
        }
        assert_eq!(scheduler().pending(), Events::NEW_GAME);
        scheduler().drain();
    }
}
