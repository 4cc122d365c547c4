//! Injectable randomness.
//!
//! Every random draw the bot makes (identity and channel suffixes, channel and
//! message picks, pause lengths) goes through [`RandomSource`]. Any `rand::Rng`
//! qualifies, so production uses an entropy-seeded `StdRng` and tests replay a
//! fixed seed.

use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

pub trait RandomSource: Send {
    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn index(&mut self, len: usize) -> usize;

    /// `len` lowercase ASCII letters.
    fn lowercase(&mut self, len: usize) -> String;

    /// Uniform duration in `[min, max)` at millisecond resolution.
    ///
    /// Returns `min` when the range is empty.
    fn duration_between(&mut self, min: Duration, max: Duration) -> Duration;
}

impl<R: Rng + Send> RandomSource for R {
    fn index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn lowercase(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| LOWERCASE[self.gen_range(0..LOWERCASE.len())] as char)
            .collect()
    }

    fn duration_between(&mut self, min: Duration, max: Duration) -> Duration {
        let lo = saturating_millis(min);
        let hi = saturating_millis(max);
        if hi <= lo {
            return min;
        }
        Duration::from_millis(self.gen_range(lo..hi))
    }
}

fn saturating_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Entropy-seeded source, or a fixed seed for deterministic replay.
pub fn source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_entropy()),
    }
}
