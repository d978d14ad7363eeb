use super::random::RandomSource;
use super::state::{BOARD_SIZE, Direction, Grid, SpawnedTile, WINNING_TILE};
use crate::error::EngineError;

/// Scan order for one direction: where the cursor starts on each line, which
/// way it walks, and whether lines are columns.
///
/// The cursor always starts at the edge tiles move towards, so every tile
/// in front of the one being advanced is already settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Traversal {
    pub start: usize,
    pub step: isize,
    pub vertical: bool,
}

impl Traversal {
    /// Line positions in processing order.
    #[inline]
    pub fn order(self) -> [usize; BOARD_SIZE] {
        std::array::from_fn(|i| self.start.wrapping_add_signed(self.step * i as isize))
    }

    /// `(x, y)` of position `pos` on line `lane`.
    #[inline]
    fn cell(self, lane: usize, pos: usize) -> (usize, usize) {
        if self.vertical { (lane, pos) } else { (pos, lane) }
    }

    /// Next position towards the target edge, `None` at the edge itself.
    #[inline]
    fn toward_edge(self, pos: usize) -> Option<usize> {
        pos.checked_add_signed(-self.step).filter(|&p| p < BOARD_SIZE)
    }
}

/// Left/up scan ascending from 0, right/down descending from the far edge.
pub fn traversal_order(direction: Direction) -> Traversal {
    match direction {
        Direction::Left | Direction::Up => Traversal {
            start: 0,
            step: 1,
            vertical: direction.is_vertical(),
        },
        Direction::Right | Direction::Down => Traversal {
            start: BOARD_SIZE - 1,
            step: -1,
            vertical: direction.is_vertical(),
        },
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resolution {
    pub(crate) changed: bool,
    pub(crate) merged_score: u64,
}

/// Slide and merge every line of `cells` towards `direction` in one pass.
///
/// Each tile advances one cell at a time: into empty cells, or onto an
/// equal tile that has not already been produced by a merge in this pass.
/// A tile that merged stops there. Two `1 << 31` tiles block each other.
/// No randomness.
pub(crate) fn resolve(cells: &mut Grid, direction: Direction) -> Resolution {
    let t = traversal_order(direction);
    let order = t.order();
    // Cells that already received a merge during this call.
    let mut merged = [[false; BOARD_SIZE]; BOARD_SIZE];
    let mut res = Resolution::default();

    for lane in 0..BOARD_SIZE {
        for &from in &order {
            let (x, y) = t.cell(lane, from);
            let value = cells[y][x];
            if value == 0 {
                continue;
            }
            let mut pos = from;
            while let Some(next) = t.toward_edge(pos) {
                let (sx, sy) = t.cell(lane, pos);
                let (tx, ty) = t.cell(lane, next);
                let target = cells[ty][tx];
                let merge = merge_of(target, value).filter(|_| !merged[ty][tx]);
                if target == 0 {
                    cells[ty][tx] = value;
                    cells[sy][sx] = 0;
                    res.changed = true;
                    pos = next;
                } else if let Some(doubled) = merge {
                    cells[ty][tx] = doubled;
                    cells[sy][sx] = 0;
                    merged[ty][tx] = true;
                    res.merged_score += u64::from(doubled);
                    res.changed = true;
                    break;
                } else {
                    break;
                }
            }
        }
    }
    res
}

/// The tile two equal neighbours merge into, `None` when they differ or the
/// result would not fit in a `u32`.
#[inline]
fn merge_of(a: u32, b: u32) -> Option<u32> {
    if a == b { a.checked_mul(2) } else { None }
}

pub(crate) fn is_won(cells: &Grid) -> bool {
    cells.iter().flatten().any(|&v| v == WINNING_TILE)
}

/// Won, or full with no two orthogonal neighbours sharing a value.
pub(crate) fn is_over(cells: &Grid) -> bool {
    if is_won(cells) {
        return true;
    }
    for y in 0..BOARD_SIZE {
        for x in 0..BOARD_SIZE {
            let v = cells[y][x];
            if v == 0 {
                return false;
            }
            // Checking right and down covers every adjacent pair once.
            if (x + 1 < BOARD_SIZE && merge_of(cells[y][x + 1], v).is_some())
                || (y + 1 < BOARD_SIZE && merge_of(cells[y + 1][x], v).is_some())
            {
                return false;
            }
        }
    }
    true
}

/// Draw row then column until an empty cell comes up, then the value:
/// 4 when a draw in `[0, 10)` is 0, else 2.
pub(crate) fn spawn_tile<R: RandomSource + ?Sized>(
    cells: &mut Grid,
    rng: &mut R,
) -> Result<SpawnedTile, EngineError> {
    if !cells.iter().flatten().any(|&v| v == 0) {
        return Err(EngineError::NoEmptyCell);
    }
    let bound = BOARD_SIZE as u32;
    let (x, y) = loop {
        let y = rng.next_int(bound) as usize;
        let x = rng.next_int(bound) as usize;
        debug_assert!(x < BOARD_SIZE && y < BOARD_SIZE);
        if cells[y][x] == 0 {
            break (x, y);
        }
    };
    let value = if rng.next_int(10) == 0 { 4 } else { 2 };
    cells[y][x] = value;
    Ok(SpawnedTile { x, y, value })
}
