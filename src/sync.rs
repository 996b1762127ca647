//! # Synchronization Primitives
//!
//! Interrupt-safe critical section abstractions shared by the tick ISR, the
//! button ISR and the main loop.
//!
//! On target the critical section is provided by `cortex-m`
//! (`critical-section-single-core`: PRIMASK save/restore). Host tests link
//! the `std` implementation of the `critical-section` crate instead.

use critical_section::CriticalSection;

/// Execute a closure within a critical section (interrupts disabled).
///
/// Interrupts are disabled on entry and restored on exit, so the enclosed
/// operation is atomic with respect to every producer.
///
/// # Usage
/// ```ignore
/// sync::critical_section(|cs| {
///     let counters = COUNTERS.borrow_ref_mut(cs);
/// });
/// ```
///
/// Keep critical sections short: the tick ISR is held off for as long as
/// the closure runs.
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce(CriticalSection<'_>) -> R,
{
    critical_section::with(f)
}

/// Low-power suspend of the consumer.
///
/// `sleep` is called with interrupts masked and must return once any
/// interrupt is pending. On Cortex-M this is `WFI`, which wakes on a
/// pending interrupt regardless of PRIMASK; the handler then runs as soon
/// as the critical section ends.
pub trait Sleep {
    fn sleep(&mut self);
}
