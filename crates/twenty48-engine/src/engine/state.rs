use std::fmt;
use std::str::FromStr;

use log::{debug, trace};

use super::ops;
use super::random::RandomSource;
use crate::error::{EngineError, ParseDirectionError};

/// Side length of the square board.
pub const BOARD_SIZE: usize = 4;

/// Tile value that wins the game.
pub const WINNING_TILE: u32 = 2048;

/// Largest value `place_tile` and `with_tiles` accept: the highest tile a
/// 4x4 board can build from spawns alone.
pub const MAX_TILE: u32 = 1 << 17;

/// Row-major cell values, indexed `[y][x]`. `0` is an empty cell.
pub type Grid = [[u32; BOARD_SIZE]; BOARD_SIZE];

/// A direction to shift/merge tiles towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(s)
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// A tile written by a random spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedTile {
    pub x: usize,
    pub y: usize,
    pub value: u32,
}

/// What a call to [`Board::make_move`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// False when no tile could shift or merge; nothing else changed then.
    pub changed: bool,
    /// Sum of the values produced by merges in this move.
    pub merged_score: u64,
    pub spawned: Option<SpawnedTile>,
}

/// The 4x4 game board: cell values, running score and move counter.
///
/// Cells are addressed as `(x, y)` with `x` growing rightward and `y`
/// downward. The random source is not part of the board; it is handed to
/// each operation that needs to draw.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: Grid,
    score: u64,
    moves: u64,
}

impl Board {
    /// An empty board: all cells zero, score 0, moves 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scenario board from row-major values (`rows[y][x]`).
    ///
    /// ```
    /// use twenty48_engine::Board;
    /// let b = Board::with_tiles([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// assert_eq!(b.value_at(1, 0), Ok(2));
    /// ```
    pub fn with_tiles(rows: Grid) -> Result<Self, EngineError> {
        if let Some(&bad) = rows.iter().flatten().find(|&&v| !is_valid_tile(v)) {
            return Err(EngineError::InvalidTile(bad));
        }
        Ok(Self {
            cells: rows,
            ..Self::default()
        })
    }

    #[inline]
    pub fn board_size(&self) -> usize {
        BOARD_SIZE
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Value at column `x`, row `y` (0 when empty).
    pub fn value_at(&self, x: usize, y: usize) -> Result<u32, EngineError> {
        check_bounds(x, y)?;
        Ok(self.cells[y][x])
    }

    /// Write a cell directly, bypassing spawn randomness and move rules.
    ///
    /// Score and move count are untouched. Meant for setting up scenarios.
    pub fn place_tile(&mut self, x: usize, y: usize, value: u32) -> Result<(), EngineError> {
        check_bounds(x, y)?;
        if !is_valid_tile(value) {
            return Err(EngineError::InvalidTile(value));
        }
        self.cells[y][x] = value;
        Ok(())
    }

    /// Copy of the grid, row-major.
    #[inline]
    pub fn rows(&self) -> Grid {
        self.cells
    }

    pub fn empty_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// Largest tile on the board, 0 for an empty board.
    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// True once any cell holds [`WINNING_TILE`].
    #[inline]
    pub fn is_won(&self) -> bool {
        ops::is_won(&self.cells)
    }

    /// True when the game is won or no move can change the board.
    #[inline]
    pub fn is_over(&self) -> bool {
        ops::is_over(&self.cells)
    }

    /// Whether `make_move(direction, ..)` would change the board.
    pub fn can_move(&self, direction: Direction) -> bool {
        let mut scratch = self.cells;
        ops::resolve(&mut scratch, direction).changed
    }

    /// Place two random tiles. Intended for a fresh board, but not guarded.
    ///
    /// ```
    /// use twenty48_engine::{Board, ScriptedSource};
    /// // row 1, column 1, value draw 0 -> 4; row 1, column 2, value draw 1 -> 2
    /// let mut rng = ScriptedSource::new([1, 1, 0, 1, 2, 1]);
    /// let mut b = Board::new();
    /// b.initialize(&mut rng).unwrap();
    /// assert_eq!(b.value_at(1, 1), Ok(4));
    /// assert_eq!(b.value_at(2, 1), Ok(2));
    /// ```
    pub fn initialize<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        self.place_random_tile(rng)?;
        self.place_random_tile(rng)?;
        Ok(())
    }

    /// Spawn a 2 (9/10) or 4 (1/10) on a random empty cell.
    ///
    /// Fails with [`EngineError::NoEmptyCell`] on a full board without
    /// drawing from `rng`.
    pub fn place_random_tile<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<SpawnedTile, EngineError> {
        let tile = ops::spawn_tile(&mut self.cells, rng)?;
        trace!("spawned {} at ({}, {})", tile.value, tile.x, tile.y);
        Ok(tile)
    }

    /// Shift and merge every tile towards `direction`.
    ///
    /// When anything moved, the move counter grows by one and exactly one
    /// random tile is spawned. Otherwise the board is left untouched.
    ///
    /// ```
    /// use twenty48_engine::{Board, Direction, ScriptedSource};
    /// let mut b = Board::with_tiles([[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// let mut rng = ScriptedSource::new([3, 3, 1]);
    /// let out = b.make_move(Direction::Left, &mut rng).unwrap();
    /// assert_eq!(b.rows()[0], [4, 4, 0, 0]);
    /// assert_eq!(out.merged_score, 8);
    /// assert_eq!(b.moves(), 1);
    /// ```
    pub fn make_move<R: RandomSource + ?Sized>(
        &mut self,
        direction: Direction,
        rng: &mut R,
    ) -> Result<MoveOutcome, EngineError> {
        let resolved = ops::resolve(&mut self.cells, direction);
        if !resolved.changed {
            debug!("move {direction}: nothing to shift");
            return Ok(MoveOutcome::default());
        }
        self.score += resolved.merged_score;
        self.moves += 1;
        let spawned = self.place_random_tile(rng)?;
        debug!(
            "move {direction}: +{} (score {}, moves {})",
            resolved.merged_score, self.score, self.moves
        );
        Ok(MoveOutcome {
            changed: true,
            merged_score: resolved.merged_score,
            spawned: Some(spawned),
        })
    }

    /// Canonical text form; same as `to_string()`.
    pub fn render(&self) -> String {
        crate::render::render(self)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::render(self))
    }
}

#[inline]
fn check_bounds(x: usize, y: usize) -> Result<(), EngineError> {
    if x < BOARD_SIZE && y < BOARD_SIZE {
        Ok(())
    } else {
        Err(EngineError::OutOfBounds { x, y })
    }
}

#[inline]
fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}
