use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of uniform random indices. Everything random in a round (the pool
/// shuffle, the target, the AI's move) goes through this.
pub trait RandomSource {
    /// Uniform value in `0..bound`. `bound` is never zero.
    fn index_below(&mut self, bound: usize) -> usize;

    /// Uniform value in `low..=high`.
    fn in_range(&mut self, low: i64, high: i64) -> i64 {
        if low >= high {
            return low;
        }
        let span = (high - low) as usize + 1;
        low + self.index_below(span) as i64
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn index_below(&mut self, bound: usize) -> usize {
        (**self).index_below(bound)
    }
}

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for RngState {
    fn index_below(&mut self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }
}

/// Replays a fixed list of values, each reduced modulo the requested bound.
/// Wraps around when exhausted. Used to pin exact shuffles and AI moves.
#[derive(Debug, Clone, Default)]
pub struct SequenceRng {
    values: Vec<usize>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<usize>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// A source that always answers zero.
    pub fn zeros() -> Self {
        Self::new(vec![0])
    }

    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRng {
    fn index_below(&mut self, bound: usize) -> usize {
        if self.values.is_empty() || bound <= 1 {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % bound
    }
}
