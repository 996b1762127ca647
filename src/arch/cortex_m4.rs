//! # Cortex-M4 Port Layer
//!
//! Hardware-specific glue for the ARM Cortex-M4: the SysTick tick source,
//! the `WFI` sleeper used by the event loop, and the halt primitive for
//! unrecoverable errors.
//!
//! ## Interrupt Priorities
//!
//! SysTick runs at the lowest priority so board interrupts (switch port,
//! display DMA) are never delayed by the tick.

use cortex_m::peripheral::scb::SystemHandler;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::{SCB, SYST};

use crate::config::{SYSTEM_CLOCK_HZ, TICK_HZ};
use crate::error::Fatal;
use crate::sync::Sleep;

// ---------------------------------------------------------------------------
// SysTick configuration
// ---------------------------------------------------------------------------

/// Configure SysTick to fire at `TICK_HZ` from the core clock. Each tick
/// enters [`SysTick`], which feeds the scheduler's counters.
pub fn configure_systick(syst: &mut SYST) {
    let reload = SYSTEM_CLOCK_HZ / TICK_HZ - 1;
    syst.set_reload(reload);
    syst.clear_current();
    syst.set_clock_source(SystClkSource::Core);
    syst.enable_counter();
    syst.enable_interrupt();
}

/// Put SysTick at the lowest priority (0xF0 with 4 priority bits).
pub fn set_interrupt_priorities(scb: &mut SCB) {
    unsafe {
        scb.set_priority(SystemHandler::SysTick, 0xF0);
    }
}

// ---------------------------------------------------------------------------
// Sleep / halt
// ---------------------------------------------------------------------------

/// Sleeps with `WFI`. Called with PRIMASK set; a pending interrupt still
/// wakes the core and is taken once the critical section ends.
pub struct Wfi;

impl Sleep for Wfi {
    #[inline]
    fn sleep(&mut self) {
        cortex_m::asm::wfi();
    }
}

/// Report `fatal` and stop forward progress for good.
///
/// Interrupts stay disabled so no producer can post into a loop that will
/// never run again; a debugger attached over SWD still sees the halt.
#[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
pub fn halt(fatal: Fatal) -> ! {
    #[cfg(feature = "defmt")]
    defmt::error!("fatal error {}: {}", fatal.code(), fatal);

    cortex_m::interrupt::disable();
    loop {
        cortex_m::asm::wfi();
    }
}

// ---------------------------------------------------------------------------
// SysTick handler
// ---------------------------------------------------------------------------

/// SysTick exception handler, the tick source entry point.
#[no_mangle]
pub extern "C" fn SysTick() {
    crate::kernel::on_tick();
}
