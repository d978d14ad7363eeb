//! Engine module: 4x4 board state, move resolution and tile spawning.
//!
//! - `Board` owns the grid, score and move counter, with the public methods.
//! - `RandomSource` is the injected generator used for every tile spawn.
//! - Move resolution and the terminal checks live in `ops`; they work on a
//!   bare grid so checks like `Board::can_move` can reuse them on a copy.

mod ops;
pub mod random;
pub mod state;

pub use ops::{Traversal, traversal_order};
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use state::{
    BOARD_SIZE, Board, Direction, Grid, MAX_TILE, MoveOutcome, SpawnedTile, WINNING_TILE,
};
