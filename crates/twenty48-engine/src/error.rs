use std::fmt;

/// Precondition failures raised by the board engine.
///
/// None of these are transient: they mean the caller asked for something the
/// current board cannot do, and they are returned immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// A coordinate outside `[0, BOARD_SIZE)` was used.
    OutOfBounds { x: usize, y: usize },
    /// A random tile was requested on a board with no empty cell.
    NoEmptyCell,
    /// A tile value that is neither empty (0) nor a power of two >= 2.
    InvalidTile(u32),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::OutOfBounds { x, y } => {
                write!(f, "cell ({x}, {y}) is outside the board")
            }
            EngineError::NoEmptyCell => write!(f, "no empty cell left to place a tile"),
            EngineError::InvalidTile(v) => {
                write!(f, "tile value {v} is not a power of two >= 2")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Returned when a direction token cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(pub String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown direction '{}', expected up|down|left|right (or u|d|l|r)",
            self.0
        )
    }
}

impl std::error::Error for ParseDirectionError {}
