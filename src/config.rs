//! # Snake Configuration
//!
//! Compile-time constants governing the playfield, the tick source and the
//! four levels of play. All limits are fixed at compile time; the only
//! runtime knobs live in [`GameConfig`].

use crate::movement::Boundary;

/// Playfield columns.
pub const X_MAX: u8 = 24;

/// Playfield rows.
pub const Y_MAX: u8 = 23;

/// Capacity of the snake body ring buffer. Must be a power of two so the
/// next index can be computed with a mask.
pub const MAX_SNAKE: usize = 128;

/// Maximum number of foods on the field at once. Declared for the food
/// subsystem, which has no resident logic yet.
pub const MAX_FOOD: u8 = 10;

/// Tick source frequency in Hz. One tick is one millisecond, so every
/// cadence below reads directly in milliseconds.
pub const TICK_HZ: u32 = 1000;

/// Ticks per second, reload value of the per-second counter.
pub const TICKS_PER_SECOND: u16 = TICK_HZ as u16;

/// Switch debounce window (~20 ms).
pub const DEBOUNCE_TICKS: u16 = (TICK_HZ / 50) as u16;

/// Core clock used to derive the SysTick reload (16 MHz HSI).
pub const SYSTEM_CLOCK_HZ: u32 = 16_000_000;

/// Snake length, and initial score, at the start of every game.
pub const START_SCORE: u8 = 10;

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

/// Game level. Each level carries its own wall behavior and move cadence.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl Level {
    /// Static parameters of this level.
    pub const fn params(self) -> LevelParams {
        LEVELS[self as usize - 1]
    }

    /// Ticks between two `MOVE_SNAKE` events.
    #[inline]
    pub const fn move_cadence(self) -> u16 {
        self.params().move_ticks
    }

    /// What happens when the head reaches the perimeter.
    #[inline]
    pub const fn boundary(self) -> Boundary {
        self.params().boundary
    }
}

/// Per-level parameters.
///
/// `time_limit_secs` and `food` are declared for the timed food levels; no
/// countdown or food spawner consumes them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelParams {
    pub boundary: Boundary,
    pub move_ticks: u16,
    pub time_limit_secs: u16,
    pub food: u8,
}

/// Level table, indexed by `level - 1`.
pub const LEVELS: [LevelParams; 4] = [
    LevelParams {
        boundary: Boundary::Cyclic,
        move_ticks: (TICK_HZ / 4) as u16,
        time_limit_secs: 30,
        food: 5,
    },
    LevelParams {
        boundary: Boundary::Bouncing,
        move_ticks: (TICK_HZ / 8) as u16,
        time_limit_secs: 30,
        food: MAX_FOOD,
    },
    LevelParams {
        boundary: Boundary::Lethal,
        move_ticks: (TICK_HZ / 16) as u16,
        time_limit_secs: 30,
        food: MAX_FOOD,
    },
    LevelParams {
        boundary: Boundary::Lethal,
        move_ticks: (TICK_HZ / 32) as u16,
        time_limit_secs: 60,
        food: MAX_FOOD,
    },
];

// ---------------------------------------------------------------------------
// Runtime configuration
// ---------------------------------------------------------------------------

/// Knobs fixed when a [`Game`](crate::game::Game) is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Level entered on `START_GAME`. The demo build enters level 2.
    pub start_level: Level,
    /// Body length seeded on `NEW_GAME`; the score starts at this value.
    pub start_length: u8,
}

impl GameConfig {
    pub const fn new() -> Self {
        Self {
            start_level: Level::Two,
            start_length: START_SCORE,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
