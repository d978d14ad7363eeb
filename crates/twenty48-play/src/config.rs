use std::io::Read;

use anyhow::{Context, Result};
use twenty48_engine::Direction;

/// Replay settings loaded from TOML.
///
/// ```toml
/// seed = 7
/// moves = ["left", "up", "r,r,d"]
///
/// [replay]
/// stop_when_won = true
/// max_moves = 50
/// show_every = 10
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    /// Seed for the tile spawner.
    #[serde(default)]
    pub seed: u64,

    /// Direction tokens; an entry may hold several separated by commas or spaces.
    #[serde(default)]
    pub moves: Vec<String>,

    #[serde(default)]
    pub replay: Replay,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Replay {
    #[serde(default = "defaults::stop_when_won")]
    pub stop_when_won: bool,
    #[serde(default = "defaults::stop_when_over")]
    pub stop_when_over: bool,
    /// Stop after this many script entries (changing or not).
    #[serde(default)]
    pub max_moves: Option<u64>,
    /// Print the board every N entries; 0 prints only the final board.
    #[serde(default = "defaults::show_every")]
    pub show_every: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 0,
            moves: Vec::new(),
            replay: Replay::default(),
        }
    }
}

impl Default for Replay {
    fn default() -> Self {
        Self {
            stop_when_won: defaults::stop_when_won(),
            stop_when_over: defaults::stop_when_over(),
            max_moves: None,
            show_every: defaults::show_every(),
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let cfg: Self = toml::from_str(&contents)?;
        Ok(cfg)
    }

    /// All scripted directions, in order.
    pub fn directions(&self) -> Result<Vec<Direction>> {
        let mut out = Vec::new();
        for entry in &self.moves {
            out.extend(parse_script(entry)?);
        }
        Ok(out)
    }
}

/// Parse `"l,r up Down"` style scripts.
pub fn parse_script(text: &str) -> Result<Vec<Direction>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .enumerate()
        .map(|(i, tok)| {
            tok.parse::<Direction>()
                .with_context(|| format!("move #{} in '{text}'", i + 1))
        })
        .collect()
}

mod defaults {
    pub fn stop_when_won() -> bool { true }
    pub fn stop_when_over() -> bool { true }
    pub fn show_every() -> u64 { 1 }
}
