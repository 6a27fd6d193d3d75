//! Geometric cooling schedule and Metropolis acceptance.
//!
//! The temperature is a pure function of the iteration index,
//! `T(i) = T0 · alpha^i`, so the schedule carries no state beyond its
//! constants. A run stops at the iteration cap or once `T(i)` falls to the
//! temperature floor, whichever comes first.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strata_config::AnnealConfig;

/// Where a run is in its schedule at a given iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulePhase {
    /// First iteration, at the starting temperature.
    Running,
    /// Subsequent iterations while the temperature is above the floor.
    Cooling,
    /// Iteration cap reached or temperature at the floor; no more moves.
    Terminated,
}

/// Cooling constants for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealingSchedule {
    /// Starting temperature `T0`.
    pub initial_temperature: f64,
    /// Geometric cooling factor `alpha`.
    pub cooling_rate: f64,
    /// Temperature floor.
    pub min_temperature: f64,
    /// Maximum number of iterations.
    pub iteration_cap: u64,
}

impl AnnealingSchedule {
    /// Builds the schedule for a run over `num_blocks` blocks on `layers` layers.
    pub fn for_run(config: &AnnealConfig, num_blocks: usize, layers: u32) -> Self {
        Self {
            initial_temperature: config.initial_temperature,
            cooling_rate: config.cooling_rate,
            min_temperature: config.min_temperature,
            iteration_cap: iteration_cap(config, num_blocks, layers),
        }
    }

    /// Temperature at iteration `i`.
    pub fn temperature(&self, iteration: u64) -> f64 {
        let exponent = i32::try_from(iteration).unwrap_or(i32::MAX);
        self.initial_temperature * self.cooling_rate.powi(exponent)
    }

    /// Phase of the schedule at iteration `i`.
    pub fn phase(&self, iteration: u64) -> SchedulePhase {
        if iteration >= self.iteration_cap || self.temperature(iteration) <= self.min_temperature {
            SchedulePhase::Terminated
        } else if iteration == 0 {
            SchedulePhase::Running
        } else {
            SchedulePhase::Cooling
        }
    }

    /// Number of iterations a run performs if it never terminates early.
    pub fn effective_budget(&self) -> u64 {
        let mut lo = 0;
        let mut hi = self.iteration_cap;
        // Smallest i with phase(i) == Terminated; temperature is monotone in i.
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.phase(mid) == SchedulePhase::Terminated {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        lo
    }
}

/// Iteration cap for a run: `num_blocks · layers · iterations_per_block_layer`,
/// bounded by `max_iterations`.
pub fn iteration_cap(config: &AnnealConfig, num_blocks: usize, layers: u32) -> u64 {
    (num_blocks as u64)
        .saturating_mul(layers as u64)
        .saturating_mul(config.iterations_per_block_layer)
        .min(config.max_iterations)
}

/// Metropolis probability of accepting an energy change `delta` at `temperature`.
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta <= 0.0 {
        1.0
    } else {
        (-delta / temperature).exp()
    }
}

/// Metropolis criterion: always accept improvements, accept a worsening
/// `delta` with probability `exp(-delta / T)`.
///
/// A random number is drawn only for uphill moves.
pub fn accept<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    debug_assert!(!delta.is_nan(), "NaN energy delta");
    if delta <= 0.0 {
        return true;
    }
    rng.gen::<f64>() < acceptance_probability(delta, temperature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn default_schedule(num_blocks: usize, layers: u32) -> AnnealingSchedule {
        AnnealingSchedule::for_run(&AnnealConfig::default(), num_blocks, layers)
    }

    #[test]
    fn geometric_cooling() {
        let s = default_schedule(20, 3);
        assert_eq!(s.temperature(0), 1000.0);
        assert!((s.temperature(1) - 997.0).abs() < 1e-9);
        assert!((s.temperature(100) - 1000.0 * 0.997f64.powi(100)).abs() < 1e-9);
        assert!(s.temperature(500) < s.temperature(499));
    }

    #[test]
    fn cap_scales_with_blocks_and_layers() {
        let config = AnnealConfig::default();
        assert_eq!(iteration_cap(&config, 4, 1), 2000);
        assert_eq!(iteration_cap(&config, 2, 3), 3000);
        assert_eq!(iteration_cap(&config, 20, 3), 10_000);
        assert_eq!(iteration_cap(&config, 1, 1), 500);
    }

    #[test]
    fn default_budget_is_capped_by_floor() {
        // T0 = 1000, alpha = 0.997, floor = 1: the floor is reached at iteration 2300.
        assert_eq!(default_schedule(20, 3).effective_budget(), 2300);
        assert_eq!(default_schedule(4, 1).effective_budget(), 2000);
    }

    #[test]
    fn phases() {
        let s = default_schedule(4, 1);
        assert_eq!(s.phase(0), SchedulePhase::Running);
        assert_eq!(s.phase(1), SchedulePhase::Cooling);
        assert_eq!(s.phase(1999), SchedulePhase::Cooling);
        assert_eq!(s.phase(2000), SchedulePhase::Terminated);

        let long = default_schedule(20, 3);
        assert_eq!(long.phase(2299), SchedulePhase::Cooling);
        assert_eq!(long.phase(2300), SchedulePhase::Terminated);
    }

    #[test]
    fn downhill_always_accepted() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(accept(-5.0, 0.001, &mut rng));
        assert!(accept(0.0, 0.001, &mut rng));
        assert_eq!(acceptance_probability(-1.0, 10.0), 1.0);
    }

    #[test]
    fn uphill_probability_follows_boltzmann() {
        assert!((acceptance_probability(10.0, 10.0) - (-1.0f64).exp()).abs() < 1e-12);
        assert!(acceptance_probability(1e6, 1.0) < 1e-100);
    }

    #[test]
    fn uphill_acceptance_rate_matches_probability() {
        let mut rng = StdRng::seed_from_u64(99);
        let trials = 20_000;
        let accepted = (0..trials).filter(|_| accept(10.0, 10.0, &mut rng)).count();
        let rate = accepted as f64 / trials as f64;
        assert!((rate - (-1.0f64).exp()).abs() < 0.02, "rate {rate}");
    }

    #[test]
    fn hot_accepts_more_than_cold() {
        let mut rng = StdRng::seed_from_u64(5);
        let hot = (0..2000).filter(|_| accept(50.0, 1000.0, &mut rng)).count();
        let cold = (0..2000).filter(|_| accept(50.0, 1.0, &mut rng)).count();
        assert!(hot > cold);
        assert_eq!(cold, 0);
    }
}
