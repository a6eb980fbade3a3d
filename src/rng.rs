use rand::Rng;

/// Injectable random oracle for battle resolution.
///
/// Every probabilistic decision in the engine (accuracy, effect chances,
/// damage variance, speed-tie coin flips, encounter picks) draws through this
/// trait, so a battle can be replayed deterministically under test.
pub trait BattleRng {
    /// Uniform integer draw in `1..=100`.
    fn percent(&mut self, reason: &str) -> i32;

    /// Uniform damage variance in `[0.85, 1.01)`.
    fn variance(&mut self, reason: &str) -> f32;

    /// Uniform index draw in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize, reason: &str) -> usize;
}

/// Production oracle backed by the thread-local generator.
pub struct SystemRng {
    inner: rand::rngs::ThreadRng,
}

impl SystemRng {
    pub fn new() -> Self {
        Self { inner: rand::rng() }
    }
}

impl Default for SystemRng {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleRng for SystemRng {
    fn percent(&mut self, _reason: &str) -> i32 {
        self.inner.random_range(1..=100)
    }

    fn variance(&mut self, _reason: &str) -> f32 {
        self.inner.random_range(0.85..1.01)
    }

    fn pick(&mut self, len: usize, _reason: &str) -> usize {
        debug_assert!(len > 0, "pick called with an empty range");
        self.inner.random_range(0..len)
    }
}

/// Deterministic oracle for tests: integer draws come from a pre-scripted
/// outcome list, damage variance is pinned.
///
/// Exhausting the script is a test bug, so it panics with the reason of the
/// draw that failed.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    outcomes: Vec<i32>,
    index: usize,
    variance: f32,
}

impl ScriptedRng {
    pub fn new(outcomes: Vec<i32>) -> Self {
        Self {
            outcomes,
            index: 0,
            variance: 1.0,
        }
    }

    pub fn with_variance(mut self, variance: f32) -> Self {
        self.variance = variance;
        self
    }

    fn next_outcome(&mut self, reason: &str) -> i32 {
        if self.index >= self.outcomes.len() {
            panic!(
                "ScriptedRng exhausted! Tried to get a value for: '{}'. Need more scripted values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        self.index += 1;
        outcome
    }
}

impl BattleRng for ScriptedRng {
    fn percent(&mut self, reason: &str) -> i32 {
        self.next_outcome(reason)
    }

    fn variance(&mut self, _reason: &str) -> f32 {
        self.variance
    }

    fn pick(&mut self, len: usize, reason: &str) -> usize {
        debug_assert!(len > 0, "pick called with an empty range");
        self.next_outcome(reason).unsigned_abs() as usize % len
    }
}
