use std::fmt;
use std::io::Write;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use twenty48_engine::{Board, Direction, RandomSource};

use crate::config::Replay;

/// Where the board stands when a replay ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndState {
    Active,
    Won,
    Over,
}

impl EndState {
    pub fn of(board: &Board) -> Self {
        if board.is_won() {
            EndState::Won
        } else if board.is_over() {
            EndState::Over
        } else {
            EndState::Active
        }
    }
}

impl fmt::Display for EndState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EndState::Active => "active",
            EndState::Won => "won",
            EndState::Over => "over",
        };
        f.write_str(s)
    }
}

/// Totals for a finished replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Script entries consumed, including no-ops.
    pub applied: u64,
    pub no_ops: u64,
    pub moves: u64,
    pub score: u64,
    pub highest_tile: u32,
    pub state: EndState,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "applied={} no_ops={} moves={} score={} highest_tile={} state={}",
            self.applied, self.no_ops, self.moves, self.score, self.highest_tile, self.state
        )
    }
}

/// Apply `script` to `board` in order, printing the board to `out` as
/// configured, and stop early on win/over or after `max_moves` entries.
pub fn replay<R, W>(
    board: &mut Board,
    script: &[Direction],
    settings: &Replay,
    rng: &mut R,
    out: &mut W,
) -> Result<Summary>
where
    R: RandomSource + ?Sized,
    W: Write,
{
    let mut applied = 0u64;
    let mut no_ops = 0u64;
    let mut shown = false;

    for &dir in script {
        if settings.max_moves.is_some_and(|max| applied >= max) {
            info!("reached max_moves={applied}, stopping");
            break;
        }
        if board.is_won() && settings.stop_when_won {
            info!("board won after {} moves", board.moves());
            break;
        }
        // is_over() also holds for a won board.
        if board.is_over() && !board.is_won() && settings.stop_when_over {
            info!("no moves left after {} moves", board.moves());
            break;
        }

        let outcome = board
            .make_move(dir, rng)
            .with_context(|| format!("applying move #{} ({dir})", applied + 1))?;
        applied += 1;
        shown = false;
        if outcome.changed {
            debug!("#{applied} {dir}: +{} -> {}", outcome.merged_score, board.score());
        } else {
            no_ops += 1;
            debug!("#{applied} {dir}: no change");
        }

        if settings.show_every > 0 && applied % settings.show_every == 0 {
            writeln!(out, "{board}\n").context("writing board")?;
            shown = true;
        }
    }

    let remaining = script.len() as u64 - applied;
    if remaining > 0 {
        warn!("{remaining} scripted move(s) not applied");
    }
    if !shown {
        writeln!(out, "{board}\n").context("writing board")?;
    }

    Ok(Summary {
        applied,
        no_ops,
        moves: board.moves(),
        score: board.score(),
        highest_tile: board.highest_tile(),
        state: EndState::of(board),
    })
}
