//! Rules engine for the 4x4 sliding-tile merge puzzle.
//!
//! The crate owns board state, tile spawning, move resolution, scoring and
//! the won/over projections. Randomness is always injected through
//! [`RandomSource`], so every sequence of play can be replayed exactly.

pub mod engine;
pub mod error;
pub mod render;

pub use engine::{
    BOARD_SIZE, Board, Direction, Grid, MAX_TILE, MoveOutcome, RandomSource, RngSource,
    ScriptedSource, SpawnedTile, Traversal, WINNING_TILE, traversal_order,
};
pub use error::{EngineError, ParseDirectionError};
pub use render::{ParseRenderError, Rendered, parse_rendered, render};
