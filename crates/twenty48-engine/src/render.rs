//! Canonical text rendering of a board, and the parser that reads it back.
//!
//! Layout:
//! ```text
//! Moves: 1\t\tScore: 4
//! 4    .    .    .
//! .    .    .    .
//! .    .    2    .
//! .    .    .    .
//! ```
//! Every cell is left-justified in a 5-character field with `.` for empty;
//! trailing whitespace is trimmed per line and from the whole text.

use std::fmt;

use crate::engine::{BOARD_SIZE, Board, Grid};

const CELL_WIDTH: usize = 5;
/// Digits in `u32::MAX`, the widest tile a merge can produce.
const MAX_TILE_DIGITS: usize = 10;
const MOVES_PREFIX: &str = "Moves: ";
const SCORE_SEPARATOR: &str = "\t\tScore: ";

/// Render `board` in the canonical text form.
pub fn render(board: &Board) -> String {
    let mut out = format!("{MOVES_PREFIX}{}{SCORE_SEPARATOR}{}", board.moves(), board.score());
    for row in board.rows() {
        let line: String = row
            .iter()
            .map(|&v| match v {
                0 => format!("{:<CELL_WIDTH$}", "."),
                v => format!("{v:<CELL_WIDTH$}"),
            })
            .collect();
        out.push('\n');
        out.push_str(line.trim_end());
    }
    out.truncate(out.trim_end().len());
    out
}

/// A rendering read back into numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub moves: u64,
    pub score: u64,
    pub rows: Grid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseRenderError {
    /// The first line is not `Moves: <n>\t\tScore: <n>`.
    BadHeader(String),
    /// Number of board lines after the header.
    RowCount(usize),
    /// A row that does not hold exactly four cells.
    CellCount { row: usize, found: usize },
    /// A token that is neither `.` nor a power of two.
    BadCell { row: usize, token: String },
}

impl fmt::Display for ParseRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseRenderError::BadHeader(h) => write!(f, "malformed header line '{h}'"),
            ParseRenderError::RowCount(n) => {
                write!(f, "expected {BOARD_SIZE} board rows, found {n}")
            }
            ParseRenderError::CellCount { row, found } => {
                write!(f, "row {row}: expected {BOARD_SIZE} cells, found {found}")
            }
            ParseRenderError::BadCell { row, token } => {
                write!(f, "row {row}: invalid cell '{token}'")
            }
        }
    }
}

impl std::error::Error for ParseRenderError {}

/// Parse the canonical rendering back into moves, score and grid.
///
/// ```
/// use twenty48_engine::{Board, parse_rendered};
/// let mut b = Board::new();
/// b.place_tile(2, 1, 16).unwrap();
/// let parsed = parse_rendered(&b.render()).unwrap();
/// assert_eq!(parsed.rows, b.rows());
/// ```
pub fn parse_rendered(text: &str) -> Result<Rendered, ParseRenderError> {
    let mut lines = text.lines();
    let header = lines.next().unwrap_or_default();
    let (moves, score) =
        parse_header(header).ok_or_else(|| ParseRenderError::BadHeader(header.to_string()))?;

    let body: Vec<&str> = lines.collect();
    if body.len() != BOARD_SIZE {
        return Err(ParseRenderError::RowCount(body.len()));
    }
    let mut rows = [[0u32; BOARD_SIZE]; BOARD_SIZE];
    for (y, line) in body.iter().enumerate() {
        let cells = parse_row(y, line)?;
        if cells.len() != BOARD_SIZE {
            return Err(ParseRenderError::CellCount {
                row: y,
                found: cells.len(),
            });
        }
        rows[y].copy_from_slice(&cells);
    }
    Ok(Rendered { moves, score, rows })
}

fn parse_header(line: &str) -> Option<(u64, u64)> {
    let rest = line.strip_prefix(MOVES_PREFIX)?;
    let (moves, score) = rest.split_once(SCORE_SEPARATOR)?;
    Some((moves.parse().ok()?, score.trim_end().parse().ok()?))
}

/// Tiles of five or more digits fill their field, so neighbours can touch
/// (`16384.` or `1638432768`); digit runs are split back into tiles.
fn parse_row(row: usize, line: &str) -> Result<Vec<u32>, ParseRenderError> {
    let bad = |token: &str| ParseRenderError::BadCell {
        row,
        token: token.to_string(),
    };
    let mut cells = Vec::with_capacity(BOARD_SIZE);
    let mut rest = line.trim_start();
    while let Some(c) = rest.chars().next() {
        if c == '.' {
            cells.push(0);
            rest = rest[1..].trim_start();
        } else if c.is_ascii_digit() {
            let end = rest
                .find(|ch: char| !ch.is_ascii_digit())
                .unwrap_or(rest.len());
            let run = &rest[..end];
            cells.extend(split_digit_run(run).ok_or_else(|| bad(run))?);
            rest = rest[end..].trim_start();
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            return Err(bad(&rest[..end]));
        }
    }
    Ok(cells)
}

fn split_digit_run(run: &str) -> Option<Vec<u32>> {
    if run.is_empty() {
        return Some(Vec::new());
    }
    for len in (1..=run.len().min(MAX_TILE_DIGITS)).rev() {
        // A short tile is always followed by padding, so it ends the run.
        if len < CELL_WIDTH && len != run.len() {
            continue;
        }
        let Ok(v) = run[..len].parse::<u32>() else {
            continue;
        };
        if v < 2 || !v.is_power_of_two() {
            continue;
        }
        if let Some(mut tail) = split_digit_run(&run[len..]) {
            tail.insert(0, v);
            return Some(tail);
        }
    }
    None
}
