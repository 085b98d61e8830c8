//! Injectable random source.
//!
//! Template selection and ambient like-growth both draw from this seam so
//! tests can supply a deterministic sequence instead of live randomness.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// A source of bounded random indices.
pub trait RandomSource: Send {
  /// A uniform value in `0..bound`. `bound` is always ≥ 1.
  fn next_in(&mut self, bound: usize) -> usize;
}

// ─── Default ─────────────────────────────────────────────────────────────────

/// Entropy-seeded source used outside tests.
pub struct DefaultRandom(StdRng);

impl DefaultRandom {
  pub fn new() -> Self {
    Self(StdRng::from_entropy())
  }
}

impl Default for DefaultRandom {
  fn default() -> Self {
    Self::new()
  }
}

impl RandomSource for DefaultRandom {
  fn next_in(&mut self, bound: usize) -> usize {
    self.0.gen_range(0..bound)
  }
}

// ─── Scripted ────────────────────────────────────────────────────────────────

/// Replays a fixed sequence of values, cycling when exhausted. Each value is
/// reduced modulo the requested bound, so a script of `[0]` always picks the
/// first option.
pub struct ScriptedRandom {
  values: Vec<usize>,
  cursor: usize,
}

impl ScriptedRandom {
  pub fn new(values: impl Into<Vec<usize>>) -> Self {
    let values = values.into();
    assert!(!values.is_empty(), "script must not be empty");
    Self { values, cursor: 0 }
  }
}

impl RandomSource for ScriptedRandom {
  fn next_in(&mut self, bound: usize) -> usize {
    let v = self.values[self.cursor % self.values.len()];
    self.cursor += 1;
    v % bound
  }
}
