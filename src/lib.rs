//! # snake-core
//!
//! Event-driven core of an interrupt-driven snake game for ARM Cortex-M
//! microcontrollers.
//!
//! ## Overview
//!
//! Interrupt handlers never touch game state. They post *event classes*
//! into a single pending-events word; the main loop takes the classes out
//! in a fixed priority order and runs one handler per pass, sleeping with
//! `WFI` whenever nothing is pending.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                 Firmware entry (main.rs)                │
//! ├────────────────────────────────────────────────────────┤
//! │                 Kernel API (kernel.rs)                  │
//! │     init() · on_tick() · on_button_edge() · start()     │
//! ├──────────────┬────────────────────┬───────────────────┤
//! │  Scheduler   │   Game             │  Display          │
//! │  scheduler.rs│   game.rs          │  display.rs       │
//! │  ─ run_once()│   ─ move_snake()   │  ─ Display trait  │
//! │  ─ tick()    │   ─ new_game()     │  ─ Framebuffer    │
//! ├──────────────┼────────────────────┼───────────────────┤
//! │  event.rs    │  snake.rs          │  movement.rs      │
//! │  tick.rs     │  ring body buffer  │  boundary policy  │
//! │  input.rs    │                    │                   │
//! ├──────────────┴────────────────────┴───────────────────┤
//! │     Arch Port (arch/cortex_m4.rs) · sync.rs             │
//! │     SysTick · WFI sleep · halt · critical sections      │
//! ├────────────────────────────────────────────────────────┤
//! │         ARM Cortex-M4 Hardware (Thumb-2)                │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Event Priority
//!
//! | Pass order | Class        | Handler                   |
//! |------------|--------------|---------------------------|
//! | 1          | `END_GAME`   | [`game::Game::end_game`]   |
//! | 2          | `MOVE_SNAKE` | [`game::Game::move_snake`] |
//! | 3          | `SWITCH_1`   | [`game::Game::switch_1`]   |
//! | 4          | `START_GAME` | [`game::Game::start_game`] |
//! | 5          | `NEW_GAME`   | [`game::Game::new_game`]   |
//! | 6          | others       | logged and dropped        |
//!
//! Bits outside every known class halt the system with
//! [`error::Fatal::UnrecognizedEvent`].
//!
//! ## Levels
//!
//! | Level | Boundary | Move period |
//! |-------|----------|-------------|
//! | 1     | Cyclic   | 250 ticks   |
//! | 2     | Bouncing | 125 ticks   |
//! | 3     | Lethal   | 62 ticks    |
//! | 4     | Lethal   | 31 ticks    |
//!
//! ## Memory Model
//!
//! - **No heap**: All state is statically allocated
//! - **No `alloc`**: Pure `core` only
//! - **Fixed-size body ring**: `[Point; MAX_SNAKE]`
//! - **Critical sections**: `critical-section` mutexes around tick counters
//!   and the check-then-sleep step

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod event;
pub mod sync;
pub mod tick;
pub mod input;
pub mod snake;
pub mod movement;
pub mod display;
pub mod game;
pub mod scheduler;
pub mod arch;
pub mod kernel;
