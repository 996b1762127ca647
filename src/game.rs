//! # Game State Machine
//!
//! Tracks idle/playing mode, the level, the direction and the score, and
//! owns the snake body. Every handler runs in main-loop context, called by
//! the scheduler for exactly one serviced event.
//!
//! ## Transitions
//!
//! ```text
//!            NEW_GAME                 START_GAME
//!   Idle ───────────────► Idle' ───────────────────► Playing(start_level, Right)
//!    ▲   (reset field, seed snake,                        │
//!    │    post START_GAME)                                │ MOVE_SNAKE hits a
//!    │                                                    │ lethal wall (level ≥ 3)
//!    └────────────────────── END_GAME ◄───────────────────┘
//!            (reset field, wait for SWITCH_1)
//! ```
//!
//! `SWITCH_1` in `Idle` selects level 1 and posts `START_GAME`; while
//! playing it turns the snake right unless it is heading left.
//!
//! `NEXT_LEVEL`, `SWITCH_2..4` and `LCD_UPDATE` are declared classes with no
//! transition yet; they reach [`Game::unwired`] and are dropped.

use crate::config::{GameConfig, Level, MAX_SNAKE};
use crate::display::{self, Display, ImageId, Pen};
use crate::error::Fatal;
use crate::event::Events;
use crate::movement::{self, Step};
use crate::scheduler::Scheduler;
use crate::snake::{Direction, Point, SnakeBody};

/// Title artwork placement, device coordinates.
const LOGO_POS: (i16, i16) = ((159 - 60) / 2, 60);
const TITLE_POS: (i16, i16) = ((159 - 111) / 2, 20);

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Playing,
}

pub struct Game<D> {
    display: D,
    config: GameConfig,
    body: SnakeBody<MAX_SNAKE>,
    mode: Mode,
    level: Level,
    direction: Direction,
    score: u16,
    /// Length the current body was seeded with. The score starts at this
    /// value; the two only diverge once scoring exists.
    start_length: u8,
}

impl<D: Display> Game<D> {
    pub fn new(display: D, config: GameConfig) -> Self {
        Self {
            display,
            config,
            body: SnakeBody::new(),
            mode: Mode::Idle,
            level: config.start_level,
            direction: Direction::Right,
            score: 0,
            start_length: 0,
        }
    }

    // --- accessors ---------------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u16 {
        self.score
    }

    pub fn start_length(&self) -> u8 {
        self.start_length
    }

    pub fn body(&self) -> &SnakeBody<MAX_SNAKE> {
        &self.body
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    // --- body operations ---------------------------------------------------

    /// Seed a fresh body at the origin and grow it to `length` cells in
    /// `direction`. The score starts at the seeded length.
    ///
    /// `length` is clamped to `1..=MAX_SNAKE - 1`: a move pushes the new
    /// head before the tail is retired, so one ring slot stays free. Seeding
    /// never ends the game, even if the body has to cross a lethal wall.
    pub fn new_snake(&mut self, length: u8, direction: Direction) {
        let length = (length as usize).clamp(1, SnakeBody::<MAX_SNAKE>::MAX_LEN);
        self.body.reset(Point::ORIGIN);
        self.direction = direction;
        self.start_length = length as u8;
        self.score = length as u16;
        for _ in 1..length {
            self.add_head();
        }
    }

    /// Advance the head one cell in the current direction, following any
    /// bounce redirects within this call.
    pub fn add_head(&mut self) -> Step {
        let head = self.body.push_head();
        movement::settle(head, &mut self.direction, self.level.boundary())
    }

    /// Erase the tail cell and retire it. Call after [`Game::add_head`] so the
    /// vacated cell is erased only once the head has moved on.
    pub fn delete_tail(&mut self) -> Result<(), Fatal> {
        let (col, row) = display::to_device(self.body.tail());
        self.display.erase_point(col, row).map_err(display_err)?;
        self.body.pop_tail();
        Ok(())
    }

    // --- event handlers ----------------------------------------------------

    /// `MOVE_SNAKE`: one step of the snake while playing.
    pub fn move_snake(&mut self, scheduler: &Scheduler) -> Result<(), Fatal> {
        if self.mode != Mode::Playing {
            return Ok(());
        }

        if self.add_head() == Step::Struck {
            #[cfg(feature = "defmt")]
            defmt::info!("wall strike at level {}", self.level);
            scheduler.post(Events::END_GAME);
        }

        let (col, row) = display::to_device(self.body.head());
        self.display
            .draw_point(col, row, Pen::Segment)
            .map_err(display_err)?;
        self.delete_tail()
    }

    /// `SWITCH_1`: start from idle, or turn right.
    pub fn switch_1(&mut self, scheduler: &Scheduler) {
        match self.mode {
            Mode::Idle => {
                self.level = Level::One;
                scheduler.set_move_cadence(Level::One.move_cadence());
                scheduler.post(Events::START_GAME);
            }
            Mode::Playing => {
                if self.direction != Direction::Left {
                    self.direction = Direction::Right;
                }
            }
        }
    }

    /// `START_GAME`: enter play at the configured starting level.
    pub fn start_game(&mut self, scheduler: &Scheduler) {
        self.mode = Mode::Playing;
        self.level = self.config.start_level;
        scheduler.set_move_cadence(self.level.move_cadence());

        #[cfg(feature = "defmt")]
        defmt::info!("game started at level {}", self.level);
    }

    /// `NEW_GAME`: title screen, fresh snake, then start immediately.
    pub fn new_game(&mut self, scheduler: &Scheduler) -> Result<(), Fatal> {
        self.reset_field()?;
        scheduler.post(Events::START_GAME);
        Ok(())
    }

    /// `END_GAME`: back to idle with a fresh field. Ignored when not playing,
    /// so a strike reported twice ends the game once.
    pub fn end_game(&mut self, _scheduler: &Scheduler) -> Result<(), Fatal> {
        if self.mode != Mode::Playing {
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::info!("game over at level {}, score {}", self.level, self.score);

        self.reset_field()
    }

    /// Declared event classes with no transition yet.
    #[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
    pub fn unwired(&mut self, class: Events) {
        #[cfg(feature = "defmt")]
        defmt::warn!("event {=u16:#x} is not wired, dropped", class.bits());
    }

    fn reset_field(&mut self) -> Result<(), Fatal> {
        self.mode = Mode::Idle;
        self.display.clear().map_err(display_err)?;
        self.display.set_backlight(true).map_err(display_err)?;
        self.display
            .draw_image(ImageId::Logo, LOGO_POS.0, LOGO_POS.1)
            .map_err(display_err)?;
        self.display
            .draw_image(ImageId::Title, TITLE_POS.0, TITLE_POS.1)
            .map_err(display_err)?;

        self.new_snake(self.config.start_length, Direction::Right);
        Ok(())
    }
}

fn display_err<E>(_: E) -> Fatal {
    Fatal::Display
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
