//! # Architecture Abstraction Layer
//!
//! Tick source, sleep and halt primitives for the event loop. Only the
//! Cortex-M4 port exists; other cores add a sibling module providing the
//! same three pieces.

pub mod cortex_m4;
