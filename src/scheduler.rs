//! # Scheduler
//!
//! Single-consumer event loop. Interrupt handlers post event flags and
//! advance the tick counters; the main loop sleeps until something is
//! pending, then services exactly one event class per pass.
//!
//! ## Service Order
//!
//! Each pass takes the first pending class in this order:
//!
//! ```text
//!   END_GAME > MOVE_SNAKE > SWITCH_1 > START_GAME > NEW_GAME
//!     > SWITCH_2 > SWITCH_3 > SWITCH_4 > NEXT_LEVEL > LCD_UPDATE   (not wired)
//! ```
//!
//! A lethal strike is settled on the very next pass, before any further
//! move of the dead snake. Movement, the highest-frequency event, otherwise
//! never starves; every pass
//! re-checks the whole chain from the top, so input is still serviced
//! between moves. Bits outside every class are a logic defect and halt the
//! loop.
//!
//! ## Sleep Without Lost Wakeups
//!
//! The "anything pending?" check and the suspend happen inside one critical
//! section. A flag posted after the check cannot slip in unnoticed: its
//! interrupt stays pending, `WFI` returns immediately, and the handler runs
//! as soon as the section ends.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;

use crate::display::Display;
use crate::error::Fatal;
use crate::event::{EventQueue, Events};
use crate::game::Game;
use crate::input::{self, ButtonSampler};
use crate::sync::{self, Sleep};
use crate::tick::TickCounters;

/// Classes declared for future transitions, serviced after every wired one.
const UNWIRED: [Events; 5] = [
    Events::SWITCH_2,
    Events::SWITCH_3,
    Events::SWITCH_4,
    Events::NEXT_LEVEL,
    Events::LCD_UPDATE,
];

/// The event scheduler. Producers and the consumer share it by `&`
/// reference; it is stored as a plain `static` in `kernel.rs`.
pub struct Scheduler {
    events: EventQueue,
    counters: Mutex<RefCell<TickCounters>>,
    sampler: Mutex<Cell<ButtonSampler>>,
}

impl Scheduler {
    pub const fn new() -> Self {
        Self {
            events: EventQueue::new(),
            counters: Mutex::new(RefCell::new(TickCounters::new())),
            sampler: Mutex::new(Cell::new(input::no_buttons as ButtonSampler)),
        }
    }

    // -----------------------------------------------------------------------
    // Producer side (any context)
    // -----------------------------------------------------------------------

    /// Mark `events` pending. May wake a sleeping consumer.
    #[inline]
    pub fn post(&self, events: Events) {
        self.events.post(events);
    }

    /// Periodic tick. Called from the timer ISR.
    ///
    /// Advances the counters, posts `MOVE_SNAKE` on cadence and, when a
    /// debounce window closes, samples the switches and posts their events.
    pub fn tick(&self) {
        let (tick, sampler) = sync::critical_section(|cs| {
            let tick = self.counters.borrow_ref_mut(cs).tick();
            (tick, self.sampler.borrow(cs).get())
        });

        let mut events = Events::empty();
        if tick.move_due {
            events |= Events::MOVE_SNAKE;
        }
        if tick.debounce_done {
            events |= sampler().events();
        }
        if !events.is_empty() {
            self.post(events);
        }
    }

    /// Switch edge. Called from the port ISR; restarts the debounce window.
    pub fn button_edge(&self) {
        sync::critical_section(|cs| self.counters.borrow_ref_mut(cs).arm_debounce());
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    pub fn set_button_sampler(&self, sampler: ButtonSampler) {
        sync::critical_section(|cs| self.sampler.borrow(cs).set(sampler));
    }

    pub fn set_move_cadence(&self, ticks: u16) {
        sync::critical_section(|cs| self.counters.borrow_ref_mut(cs).set_move_cadence(ticks));
    }

    pub fn move_cadence(&self) -> u16 {
        sync::critical_section(|cs| self.counters.borrow_ref(cs).move_cadence())
    }

    /// Whole seconds counted by the tick source.
    pub fn elapsed_seconds(&self) -> u32 {
        sync::critical_section(|cs| self.counters.borrow_ref(cs).seconds())
    }

    // -----------------------------------------------------------------------
    // Consumer side (main loop only)
    // -----------------------------------------------------------------------

    #[inline]
    pub fn pending(&self) -> Events {
        self.events.pending()
    }

    /// Discard everything pending and return it.
    #[inline]
    pub fn drain(&self) -> Events {
        self.events.drain()
    }

    /// Suspend until an event is pending. Returns at once if one already is.
    pub fn wait_for_event<S: Sleep>(&self, sleep: &mut S) {
        sync::critical_section(|_cs| {
            if self.events.is_empty() {
                sleep.sleep();
            }
        });
    }

    /// Service at most one event class.
    ///
    /// # Returns
    /// - `Ok(Some(class))`: `class` was cleared and its handler ran
    /// - `Ok(None)`: nothing was pending (spurious wakeup)
    /// - `Err(Fatal)`: a handler failed, or only unrecognized bits remain
    pub fn run_once<D: Display>(&self, game: &mut Game<D>) -> Result<Option<Events>, Fatal> {
        let serviced = if self.events.take(Events::END_GAME) {
            game.end_game(self)?;
            Events::END_GAME
        } else if self.events.take(Events::MOVE_SNAKE) {
            game.move_snake(self)?;
            Events::MOVE_SNAKE
        } else if self.events.take(Events::SWITCH_1) {
            game.switch_1(self);
            Events::SWITCH_1
        } else if self.events.take(Events::START_GAME) {
            game.start_game(self);
            Events::START_GAME
        } else if self.events.take(Events::NEW_GAME) {
            game.new_game(self)?;
            Events::NEW_GAME
        } else if let Some(class) = self.take_unwired() {
            game.unwired(class);
            class
        } else if self.events.is_empty() {
            return Ok(None);
        } else {
            let stray = self.events.pending().bits() & !Events::all().bits();
            return Err(Fatal::UnrecognizedEvent(stray));
        };

        Ok(Some(serviced))
    }

    fn take_unwired(&self) -> Option<Events> {
        UNWIRED.into_iter().find(|class| self.events.take(*class))
    }

    /// The consumer loop. **Does not return.**
    ///
    /// Any [`Fatal`] is handed to `halt`.
    pub fn run_forever<D: Display, S: Sleep>(
        &self,
        game: &mut Game<D>,
        sleep: &mut S,
        halt: fn(Fatal) -> !,
    ) -> ! {
        loop {
            self.wait_for_event(sleep);
            if let Err(fatal) = self.run_once(game) {
                halt(fatal);
            }
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Level, X_MAX, DEBOUNCE_TICKS};
    use crate::game::tests::game;
    use crate::game::Mode;
    use crate::input::Buttons;
    use crate::snake::{Direction, Point};

    /// Sleeper that counts suspends and optionally "receives" an interrupt.
    struct FakeSleep<'a> {
        scheduler: &'a Scheduler,
        wake_with: Events,
        sleeps: usize,
    }

    impl Sleep for FakeSleep<'_> {
        fn sleep(&mut self) {
            self.sleeps += 1;
            self.scheduler.post(self.wake_with);
        }
    }

    #[test]
    fn test_move_snake_outranks_switch_1() {
        let scheduler = Scheduler::new();
        let mut game = game();
        scheduler.post(Events::SWITCH_1 | Events::MOVE_SNAKE);

        assert_eq!(scheduler.run_once(&mut game), Ok(Some(Events::MOVE_SNAKE)));
        assert_eq!(scheduler.pending(), Events::SWITCH_1, "switch stays pending");

        assert_eq!(scheduler.run_once(&mut game), Ok(Some(Events::SWITCH_1)));
    }

    #[test]
    fn test_full_priority_chain() {
        let scheduler = Scheduler::new();
        let mut game = game();
        scheduler.post(
            Events::NEW_GAME
                | Events::START_GAME
                | Events::SWITCH_1
                | Events::MOVE_SNAKE
                | Events::LCD_UPDATE
                | Events::SWITCH_3,
        );

        let mut order = [Events::empty(); 6];
        for slot in order.iter_mut() {
            *slot = scheduler.run_once(&mut game).unwrap().unwrap();
        }

        assert_eq!(
            order,
            [
                Events::MOVE_SNAKE,
                Events::SWITCH_1,
                Events::START_GAME,
                Events::NEW_GAME,
                Events::START_GAME, // re-posted by NEW_GAME
                Events::SWITCH_3,
            ]
        );
        assert_eq!(scheduler.run_once(&mut game), Ok(Some(Events::LCD_UPDATE)));
        assert_eq!(scheduler.run_once(&mut game), Ok(None));
    }

    #[test]
    fn test_unrecognized_bits_are_fatal() {
        let scheduler = Scheduler::new();
        let mut game = game();
        scheduler.post(Events::from_bits_retain(0x8000) | Events::LCD_UPDATE);

        assert_eq!(scheduler.run_once(&mut game), Ok(Some(Events::LCD_UPDATE)));
        let err = scheduler.run_once(&mut game).unwrap_err();
        assert_eq!(err, Fatal::UnrecognizedEvent(0x8000));
        assert_eq!(err.code(), 10);
    }

    #[test]
    fn test_new_game_then_start_game() {
        let scheduler = Scheduler::new();
        let mut game = game();
        scheduler.post(Events::NEW_GAME);

        assert_eq!(scheduler.run_once(&mut game), Ok(Some(Events::NEW_GAME)));
        assert_eq!(game.mode(), Mode::Idle);
        assert_eq!(scheduler.run_once(&mut game), Ok(Some(Events::START_GAME)));
        assert_eq!(game.mode(), Mode::Playing);
        assert_eq!(game.level(), Level::Two);
        assert_eq!(game.body().len(), 10);
        assert_eq!(game.body().head(), Point::new(9, 0));
    }

    #[test]
    fn test_lethal_wall_ends_game_on_next_pass() {
        let scheduler = Scheduler::new();
        let mut game = crate::game::Game::new(
            crate::game::tests::Recorder::default(),
            crate::config::GameConfig {
                start_level: Level::Three,
                start_length: 4,
            },
        );
        scheduler.post(Events::NEW_GAME);
        scheduler.run_once(&mut game).unwrap();
        scheduler.run_once(&mut game).unwrap();
        assert_eq!(game.mode(), Mode::Playing);

        // Head at (3, 0) heading right: 20 moves reach the last column
        for _ in 0..(X_MAX - 4) {
            scheduler.post(Events::MOVE_SNAKE);
            scheduler.run_once(&mut game).unwrap();
        }
        assert_eq!(game.body().head(), Point::new(X_MAX - 1, 0));
        assert!(scheduler.pending().is_empty());

        scheduler.post(Events::MOVE_SNAKE);
        scheduler.run_once(&mut game).unwrap();
        assert_eq!(scheduler.pending(), Events::END_GAME, "posted exactly once");
        assert_eq!(game.mode(), Mode::Playing);

        assert_eq!(scheduler.run_once(&mut game), Ok(Some(Events::END_GAME)));
        assert_eq!(game.mode(), Mode::Idle);
        assert_eq!(game.direction(), Direction::Right);
    }

    #[test]
    fn test_end_game_outranks_pending_move() {
        let scheduler = Scheduler::new();
        let mut game = crate::game::Game::new(
            crate::game::tests::Recorder::default(),
            crate::config::GameConfig {
                start_level: Level::Three,
                start_length: 1,
            },
        );
        scheduler.post(Events::NEW_GAME);
        scheduler.run_once(&mut game).unwrap();
        scheduler.run_once(&mut game).unwrap();

        // Single cell at (0, 0) heading right: walk into the right wall
        for _ in 0..X_MAX {
            scheduler.post(Events::MOVE_SNAKE);
            scheduler.run_once(&mut game).unwrap();
        }
        assert_eq!(scheduler.pending(), Events::END_GAME);
        assert_eq!(game.body().head(), Point::new(0, 0));

        // The cadence fires again before the consumer gets back round
        scheduler.post(Events::MOVE_SNAKE);
        assert_eq!(scheduler.run_once(&mut game), Ok(Some(Events::END_GAME)));
        assert_eq!(game.mode(), Mode::Idle);

        let drawn = game.display().drawn;
        assert_eq!(scheduler.run_once(&mut game), Ok(Some(Events::MOVE_SNAKE)));
        assert_eq!(game.display().drawn, drawn, "no move after game over");
        assert_eq!(game.body().head(), Point::ORIGIN);
        assert_eq!(scheduler.run_once(&mut game), Ok(None));
    }

    #[test]
    fn test_wait_returns_immediately_when_pending() {
        let scheduler = Scheduler::new();
        let mut sleep = FakeSleep {
            scheduler: &scheduler,
            wake_with: Events::empty(),
            sleeps: 0,
        };
        scheduler.post(Events::NEW_GAME);
        scheduler.wait_for_event(&mut sleep);
        assert_eq!(sleep.sleeps, 0);
    }

    #[test]
    fn test_flag_posted_during_sleep_is_serviced_on_wake() {
        let scheduler = Scheduler::new();
        let mut game = game();
        let mut sleep = FakeSleep {
            scheduler: &scheduler,
            wake_with: Events::SWITCH_1,
            sleeps: 0,
        };

        scheduler.wait_for_event(&mut sleep);
        assert_eq!(sleep.sleeps, 1);
        assert_eq!(scheduler.run_once(&mut game), Ok(Some(Events::SWITCH_1)));
        assert_eq!(scheduler.pending(), Events::START_GAME);
    }

    #[test]
    fn test_tick_posts_move_on_cadence() {
        let scheduler = Scheduler::new();
        scheduler.set_move_cadence(Level::Three.move_cadence());

        for _ in 0..61 {
            scheduler.tick();
        }
        assert!(scheduler.pending().is_empty());
        scheduler.tick();
        assert_eq!(scheduler.pending(), Events::MOVE_SNAKE);
    }

    #[test]
    fn test_button_edge_posts_after_debounce() {
        fn sw1_held() -> Buttons {
            Buttons::SW1
        }

        let scheduler = Scheduler::new();
        scheduler.set_move_cadence(u16::MAX);
        scheduler.set_button_sampler(sw1_held);

        scheduler.button_edge();
        for _ in 0..DEBOUNCE_TICKS - 1 {
            scheduler.tick();
        }
        assert!(scheduler.pending().is_empty());

        scheduler.tick();
        assert_eq!(scheduler.pending(), Events::SWITCH_1);
    }

    #[test]
    fn test_elapsed_seconds() {
        let scheduler = Scheduler::new();
        for _ in 0..1000 {
            scheduler.tick();
        }
        assert_eq!(scheduler.elapsed_seconds(), 1);
        scheduler.drain();
    }
}
