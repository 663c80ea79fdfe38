//! Simulation core of Snake Advance, a turn-based tactical grid combat game.
//!
//! Everything here is rendering- and input-agnostic: the host advances the
//! simulation with fixed time steps and reads positions, clip indices and
//! status labels back out.

pub mod core;
pub mod error;
pub mod utils;

pub type ZResult<T = ()> = Result<T, error::ZError>;
