//! # Movement Engine
//!
//! Advances the snake head one cell and applies the level's wall policy
//! when the head would leave the playfield.
//!
//! | Boundary   | Levels | At the wall                                  |
//! |------------|--------|----------------------------------------------|
//! | `Cyclic`   | 1      | wrap to the opposite edge                    |
//! | `Bouncing` | 2      | stay put, turn 90°, retry in the same tick   |
//! | `Lethal`   | 3, 4   | wrap, and report the strike (game over)      |
//!
//! The bounce turn is fixed: a wall on the x axis turns `Down` when
//! `y != 0` and `Up` when `y == 0`; a wall on the y axis turns `Left` when
//! `x != 0` and `Right` when `x == 0`.

use crate::config::{X_MAX, Y_MAX};
use crate::snake::{Direction, Point};

/// Wall behavior of a level.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Cyclic,
    Bouncing,
    Lethal,
}

/// Outcome of one advance attempt.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The head moved one cell, wrapping at a cyclic wall.
    Moved,
    /// The head hit a lethal wall. It still wrapped; the game is over.
    Struck,
    /// The head hit a bouncing wall and did not move. Retry in the
    /// returned direction within the same tick.
    Redirect(Direction),
}

/// Four directions and a redirect never reverses, so three turns settle
/// any move.
pub const MAX_REDIRECTS: usize = 3;

/// Advance `head` one cell in `direction` under `boundary`.
pub fn advance(direction: Direction, head: &mut Point, boundary: Boundary) -> Step {
    match direction {
        Direction::Right => move_right(head, boundary),
        Direction::Up => move_up(head, boundary),
        Direction::Left => move_left(head, boundary),
        Direction::Down => move_down(head, boundary),
    }
}

/// Advance `head`, following redirects until the move settles.
///
/// `direction` is updated in place when a bouncing wall turns the snake.
/// Returns [`Step::Moved`] or [`Step::Struck`]; a trailing
/// [`Step::Redirect`] is only possible on a degenerate one-cell grid.
pub fn settle(head: &mut Point, direction: &mut Direction, boundary: Boundary) -> Step {
    for _ in 0..=MAX_REDIRECTS {
        match advance(*direction, head, boundary) {
            Step::Redirect(turn) => {
                debug_assert!(turn != direction.reverse());
                *direction = turn;
            }
            settled => return settled,
        }
    }
    Step::Redirect(*direction)
}

// ---------------------------------------------------------------------------
// Per-direction moves
// ---------------------------------------------------------------------------

fn move_right(head: &mut Point, boundary: Boundary) -> Step {
    if head.x + 1 < X_MAX {
        head.x += 1;
        return Step::Moved;
    }
    let turn = if head.y != 0 { Direction::Down } else { Direction::Up };
    at_wall(&mut head.x, 0, boundary, turn)
}

fn move_up(head: &mut Point, boundary: Boundary) -> Step {
    if head.y + 1 < Y_MAX {
        head.y += 1;
        return Step::Moved;
    }
    let turn = if head.x != 0 { Direction::Left } else { Direction::Right };
    at_wall(&mut head.y, 0, boundary, turn)
}

fn move_left(head: &mut Point, boundary: Boundary) -> Step {
    if head.x > 0 {
        head.x -= 1;
        return Step::Moved;
    }
    let turn = if head.y != 0 { Direction::Down } else { Direction::Up };
    at_wall(&mut head.x, X_MAX - 1, boundary, turn)
}

fn move_down(head: &mut Point, boundary: Boundary) -> Step {
    if head.y > 0 {
        head.y -= 1;
        return Step::Moved;
    }
    let turn = if head.x != 0 { Direction::Left } else { Direction::Right };
    at_wall(&mut head.y, Y_MAX - 1, boundary, turn)
}

/// Shared wall handling. `axis` is the coordinate that would leave the
/// field and `wrap_to` the opposite edge.
fn at_wall(axis: &mut u8, wrap_to: u8, boundary: Boundary, turn: Direction) -> Step {
    match boundary {
        Boundary::Cyclic => {
            *axis = wrap_to;
            Step::Moved
        }
        Boundary::Lethal => {
            *axis = wrap_to;
            Step::Struck
        }
        Boundary::Bouncing => Step::Redirect(turn),
    }
}
