//! # snake-core Firmware
//!
//! Brings the board up and hands control to the event loop.
//!
//! The display is the on-chip [`Framebuffer`]; a panel driver flushes
//! [`Framebuffer::as_bytes`] to the glass. Switches are not wired on the
//! reference board, so the sampler reports none pressed; a board with
//! switches installs its own sampler and calls
//! [`kernel::on_button_edge`] from the port interrupt.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use panic_halt as _;

#[cfg(feature = "defmt")]
use defmt_rtt as _;

use snake_core::arch::cortex_m4;
use snake_core::config::GameConfig;
use snake_core::display::{Display, Framebuffer, GraphicsDisplay};
use snake_core::error::Fatal;
use snake_core::game::Game;
use snake_core::{input, kernel};

/// Firmware entry point. Does not return.
#[entry]
fn main() -> ! {
    let cp = match cortex_m::Peripherals::take() {
        Some(cp) => cp,
        None => cortex_m4::halt(Fatal::BoardInit),
    };

    let mut display = GraphicsDisplay::new(Framebuffer::new());
    if display.clear().is_err() {
        cortex_m4::halt(Fatal::DisplayInit);
    }

    #[cfg(feature = "defmt")]
    defmt::info!("snake-core up");

    kernel::init(input::no_buttons);
    let game = Game::new(display, GameConfig::new());

    // Start the event loop; does not return
    kernel::start(game, cp)
}
