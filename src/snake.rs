//! # Snake Body Buffer
//!
//! Fixed-capacity ring of body segment coordinates. `tail` is the oldest
//! segment and `head` the newest; the occupied range is `[tail, head]`
//! inclusive, modulo `N`.
//!
//! ```text
//!   index:   0   1   2   3   4   5   6   7      (N = 8)
//!           [ ] [T] [ ] [ ] [H] [ ] [ ] [ ]
//!                tail ──────► head             len = 4
//! ```
//!
//! `N` must be a power of two; the next index is `(i + 1) & (N - 1)`.

// ---------------------------------------------------------------------------
// Coordinates and directions
// ---------------------------------------------------------------------------

/// A grid cell. `x < X_MAX`, `y < Y_MAX`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u8,
    pub y: u8,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// Movement direction. `Up` increases `y`, `Down` decreases it.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Up,
    Left,
    Down,
}

impl Direction {
    pub const fn reverse(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
        }
    }
}

// ---------------------------------------------------------------------------
// Ring buffer
// ---------------------------------------------------------------------------

/// Ring buffer of body segments with capacity `N`.
pub struct SnakeBody<const N: usize> {
    segments: [Point; N],
    head: usize,
    tail: usize,
}

impl<const N: usize> SnakeBody<N> {
    /// Index mask; fails to compile unless `N` is a power of two.
    const MASK: usize = {
        assert!(N.is_power_of_two(), "snake capacity must be a power of two");
        N - 1
    };

    /// Longest body that still leaves a free slot for the next head.
    /// [`push_head`](SnakeBody::push_head) runs before
    /// [`pop_tail`](SnakeBody::pop_tail) on every move.
    pub const MAX_LEN: usize = N - 1;

    /// A one-segment body at the origin.
    pub const fn new() -> Self {
        let _ = Self::MASK;
        Self {
            segments: [Point::ORIGIN; N],
            head: 0,
            tail: 0,
        }
    }

    /// Collapse to a single segment at `at`, with `head = tail = 0`.
    pub fn reset(&mut self, at: Point) {
        self.head = 0;
        self.tail = 0;
        self.segments[0] = at;
    }

    #[inline]
    const fn next(index: usize) -> usize {
        (index + 1) & Self::MASK
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of occupied segments, always in `1..=N`.
    #[inline]
    pub const fn len(&self) -> usize {
        ((self.head + N - self.tail) & Self::MASK) + 1
    }

    #[inline]
    pub const fn head_index(&self) -> usize {
        self.head
    }

    #[inline]
    pub const fn tail_index(&self) -> usize {
        self.tail
    }

    #[inline]
    pub const fn head(&self) -> Point {
        self.segments[self.head]
    }

    #[inline]
    pub const fn tail(&self) -> Point {
        self.segments[self.tail]
    }

    /// Open a new head slot holding a copy of the current head and return
    /// it for the movement engine to advance.
    ///
    /// When the ring is already full the new head overwrites the tail slot
    /// and the oldest segment is lost. Keep `len() <= MAX_LEN` before
    /// pushing and pair every push with [`pop_tail`].
    ///
    /// [`pop_tail`]: SnakeBody::pop_tail
    pub fn push_head(&mut self) -> &mut Point {
        let current = self.segments[self.head];
        let new_head = Self::next(self.head);
        if new_head == self.tail {
            self.tail = Self::next(self.tail);
        }
        self.segments[new_head] = current;
        self.head = new_head;
        &mut self.segments[new_head]
    }

    /// Retire the tail segment and return its coordinate.
    ///
    /// A single-segment body is left untouched: the head and tail share the
    /// slot, so the coordinate is returned but nothing is removed.
    pub fn pop_tail(&mut self) -> Point {
        let vacated = self.segments[self.tail];
        if self.tail != self.head {
            self.tail = Self::next(self.tail);
        }
        vacated
    }

    /// Segments from tail to head.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.len()).map(move |i| self.segments[(self.tail + i) & Self::MASK])
    }
}

impl<const N: usize> Default for SnakeBody<N> {
    fn default() -> Self {
        Self::new()
    }
}
