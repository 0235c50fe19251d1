//! Wave schedule - fixed opening followed by a seeded random tail
//!
//! The whole schedule is generated once at match start and consumed
//! monotonically by a cursor; it is never regenerated mid-match. The tail is
//! sized so the cursor cannot run off the end in a real session.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use thiserror::Error;

/// One scheduled spawn event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveKind {
    /// One entity, forced safe
    OneSafe,
    /// One entity, default kind
    One,
    /// One forced safe plus one forced hazard
    TwoWithOneHazard,
    /// Two entities, default kind
    Two,
    /// Three entities, default kind
    Three,
    /// Four entities, default kind
    Four,
    /// Five entities spread over the chain window
    Chain,
    /// Five entities spread over half the chain window
    FastChain,
}

/// Fixed opening waves, easing the player in before the random tail
pub const OPENING_WAVES: [WaveKind; 7] = [
    WaveKind::OneSafe,
    WaveKind::OneSafe,
    WaveKind::TwoWithOneHazard,
    WaveKind::TwoWithOneHazard,
    WaveKind::Three,
    WaveKind::One,
    WaveKind::Chain,
];

/// Kinds eligible for the random tail (the two no-hazard singles excluded)
pub const RANDOM_POOL: [WaveKind; 6] = [
    WaveKind::TwoWithOneHazard,
    WaveKind::Two,
    WaveKind::Three,
    WaveKind::Four,
    WaveKind::Chain,
    WaveKind::FastChain,
];

/// Default random-tail length; 7 + 1001 entries outlast any real session
pub const DEFAULT_TAIL_COUNT: usize = 1001;

/// The wave cursor ran past the end of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("wave schedule exhausted")]
pub struct OutOfWaves;

/// Precomputed wave schedule with a consuming cursor
#[derive(Debug, Clone)]
pub struct Schedule {
    waves: Vec<WaveKind>,
    cursor: usize,
}

impl Schedule {
    /// Build the fixed opening plus `tail_count` uniform draws from the pool.
    ///
    /// Same seed, same schedule - byte for byte.
    pub fn generate(seed: u64, tail_count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut waves = Vec::with_capacity(OPENING_WAVES.len() + tail_count);
        waves.extend_from_slice(&OPENING_WAVES);
        for _ in 0..tail_count {
            waves.push(RANDOM_POOL[rng.random_range(0..RANDOM_POOL.len())]);
        }
        Self { waves, cursor: 0 }
    }

    /// Next wave kind, advancing the cursor
    pub fn next(&mut self) -> Result<WaveKind, OutOfWaves> {
        let kind = self.waves.get(self.cursor).copied().ok_or(OutOfWaves)?;
        self.cursor += 1;
        Ok(kind)
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Waves not yet consumed
    pub fn remaining(&self) -> usize {
        self.waves.len() - self.cursor
    }

    /// Full schedule contents, cursor-independent
    pub fn waves(&self) -> &[WaveKind] {
        &self.waves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_starts_with_fixed_opening() {
        let schedule = Schedule::generate(42, DEFAULT_TAIL_COUNT);
        assert_eq!(schedule.len(), 7 + DEFAULT_TAIL_COUNT);
        assert_eq!(&schedule.waves()[..7], &OPENING_WAVES);
    }

    #[test]
    fn test_schedule_is_seed_deterministic() {
        let a = Schedule::generate(99999, DEFAULT_TAIL_COUNT);
        let b = Schedule::generate(99999, DEFAULT_TAIL_COUNT);
        assert_eq!(a.waves(), b.waves());

        let c = Schedule::generate(12345, DEFAULT_TAIL_COUNT);
        assert_ne!(a.waves(), c.waves());
    }

    #[test]
    fn test_tail_draws_only_from_pool() {
        let schedule = Schedule::generate(7, 500);
        for kind in &schedule.waves()[7..] {
            assert!(
                RANDOM_POOL.contains(kind),
                "tail contains no-hazard kind {kind:?}"
            );
        }
    }

    #[test]
    fn test_tail_covers_the_whole_pool() {
        // 1001 uniform draws from 6 kinds miss one with probability ~1e-79
        let schedule = Schedule::generate(0, DEFAULT_TAIL_COUNT);
        for kind in RANDOM_POOL {
            assert!(schedule.waves()[7..].contains(&kind));
        }
    }

    #[test]
    fn test_cursor_consumes_monotonically() {
        let mut schedule = Schedule::generate(1, 1);
        for expected in OPENING_WAVES {
            assert_eq!(schedule.next(), Ok(expected));
        }
        assert_eq!(schedule.remaining(), 1);
        assert!(schedule.next().is_ok());
        assert_eq!(schedule.next(), Err(OutOfWaves));
        // Still exhausted on re-entry
        assert_eq!(schedule.next(), Err(OutOfWaves));
    }
}
