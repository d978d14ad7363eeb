use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform integers used for tile spawns.
///
/// The board never creates one itself; callers build a source once and pass
/// it by `&mut` to every operation that draws from it.
pub trait RandomSource {
    /// Return an integer in `[0, bound)`. `bound` is never zero.
    fn next_int(&mut self, bound: u32) -> u32;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    #[inline]
    fn next_int(&mut self, bound: u32) -> u32 {
        (**self).next_int(bound)
    }
}

/// Adapter turning any `rand` generator into a [`RandomSource`].
///
/// ```
/// use twenty48_engine::{Board, RngSource};
/// let mut rng = RngSource::seeded(7);
/// let mut board = Board::new();
/// board.initialize(&mut rng).unwrap();
/// assert_eq!(board.empty_cells(), 14);
/// ```
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource(rng)
    }

    pub fn into_inner(self) -> R {
        self.0
    }
}

impl RngSource<StdRng> {
    /// Deterministic `StdRng`-backed source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    #[inline]
    fn next_int(&mut self, bound: u32) -> u32 {
        self.0.gen_range(0..bound)
    }
}

/// Replays a fixed list of integers, wrapping around once exhausted.
///
/// Each value is reduced modulo the requested bound so the `[0, bound)`
/// contract always holds. An empty script always yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_int(&mut self, bound: u32) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v % bound
    }
}
