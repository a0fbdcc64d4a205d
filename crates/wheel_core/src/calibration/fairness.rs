//! FairnessRunner - Winner Distribution Check
//!
//! Runs many independent seeded spins over the same roster size and measures
//! how evenly the winners spread across segments. Equal segments with a wide
//! launch-speed range should give a near-uniform histogram; a skewed one
//! points at a bias in the decay law or the pointer mapping.

use rayon::prelude::*;

use crate::engine::config::SpinConfig;
use crate::error::{Result, WheelError};
use crate::runner::HeadlessRunner;

/// Aggregate result of a fairness run.
#[derive(Debug, Clone)]
pub struct FairnessReport {
    pub participants: usize,
    pub spins: usize,
    /// Wins per segment index
    pub counts: Vec<u64>,
    /// `counts[i] / spins`
    pub shares: Vec<f64>,
    /// Pearson chi-square against the uniform distribution
    pub chi_square: f64,
    /// Largest `|share - 1/n|`
    pub max_share_deviation: f64,
    /// Spins ended by the safety watchdog
    pub forced_stops: u64,
    pub mean_frames: f64,
}

impl FairnessReport {
    /// Degrees of freedom for the chi-square statistic.
    pub fn degrees_of_freedom(&self) -> usize {
        self.participants.saturating_sub(1)
    }

    pub fn is_within(&self, tolerance: f64) -> bool {
        self.max_share_deviation <= tolerance
    }
}

/// Outcome of one calibration spin
#[derive(Debug, Clone, Copy)]
struct SpinSample {
    index: usize,
    frames: u64,
    forced: bool,
}

pub struct FairnessRunner {
    /// Base seed; spin `i` uses `seed + i`
    seed: u64,
    spins: usize,
    participants: usize,
    config: SpinConfig,
}

impl FairnessRunner {
    pub fn new(seed: u64, spins: usize, participants: usize) -> Self {
        Self { seed, spins, participants, config: SpinConfig::default() }
    }

    pub fn with_config(mut self, config: SpinConfig) -> Self {
        self.config = config;
        self
    }

    fn spin_one(&self, offset: usize) -> Result<SpinSample> {
        let names = (0..self.participants).map(|i| format!("p{}", i));
        let mut runner = HeadlessRunner::with_participants(
            self.config.clone(),
            self.seed.wrapping_add(offset as u64),
            names,
        )?;
        let report = runner.spin_once()?;
        Ok(SpinSample {
            index: report.winner.index,
            frames: report.frames,
            forced: report.winner.forced,
        })
    }

    /// Run every spin (in parallel) and summarize the winner histogram.
    pub fn run(&self) -> Result<FairnessReport> {
        if self.participants < 2 {
            return Err(WheelError::NotEnoughParticipants { count: self.participants });
        }
        if self.spins == 0 {
            return Err(WheelError::InvalidConfig("fairness run needs at least one spin".into()));
        }
        self.config.validate()?;

        let samples = (0..self.spins)
            .into_par_iter()
            .map(|offset| self.spin_one(offset))
            .collect::<Result<Vec<_>>>()?;

        let n = self.participants;
        let mut counts = vec![0u64; n];
        let mut forced_stops = 0u64;
        let mut total_frames = 0u64;
        for sample in &samples {
            counts[sample.index] += 1;
            total_frames += sample.frames;
            if sample.forced {
                forced_stops += 1;
            }
        }

        let spins = samples.len() as f64;
        let expected = spins / n as f64;
        let shares: Vec<f64> = counts.iter().map(|&c| c as f64 / spins).collect();
        let chi_square = counts
            .iter()
            .map(|&c| {
                let diff = c as f64 - expected;
                diff * diff / expected
            })
            .sum();
        let uniform = 1.0 / n as f64;
        let max_share_deviation =
            shares.iter().map(|s| (s - uniform).abs()).fold(0.0_f64, f64::max);

        log::info!(
            "Fairness run: n={}, spins={}, chi2={:.3}, max deviation={:.4}",
            n,
            samples.len(),
            chi_square,
            max_share_deviation
        );

        Ok(FairnessReport {
            participants: n,
            spins: samples.len(),
            counts,
            shares,
            chi_square,
            max_share_deviation,
            forced_stops,
            mean_frames: total_frames as f64 / spins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_way_distribution_is_even() {
        let report = FairnessRunner::new(0, 1_000, 4).run().unwrap();
        assert_eq!(report.counts.iter().sum::<u64>(), 1_000);
        assert!(report.counts.iter().all(|&c| c > 0));
        assert!(report.is_within(0.06), "shares: {:?}", report.shares);
        assert_eq!(report.forced_stops, 0);
        assert_eq!(report.degrees_of_freedom(), 3);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = FairnessRunner::new(17, 200, 3).run().unwrap();
        let b = FairnessRunner::new(17, 200, 3).run().unwrap();
        assert_eq!(a.counts, b.counts);
    }

    #[test]
    fn test_quick_config_spins_shorter() {
        let classic = FairnessRunner::new(1, 50, 2).run().unwrap();
        let quick = FairnessRunner::new(1, 50, 2).with_config(SpinConfig::quick()).run().unwrap();
        assert!(quick.mean_frames < classic.mean_frames);
    }

    #[test]
    fn test_rejects_degenerate_runs() {
        assert!(FairnessRunner::new(0, 10, 1).run().is_err());
        assert!(FairnessRunner::new(0, 0, 4).run().is_err());
    }
}
