//! Simulated annealing placement engine for multi-layer floorplans.
//!
//! Given an initial [`FloorplanState`], the engine searches for a lower-energy
//! assignment of blocks to layers and positions.
//!
//! # Pipeline
//!
//! 1. **Cost**: [`CostModel`] scores a floorplan from wirelength, overlap,
//!    power, and area terms
//! 2. **Schedule**: [`AnnealingSchedule`] maps the iteration index to a
//!    temperature and decides termination
//! 3. **Anneal**: [`Annealer`] perturbs, scores, and accepts or rejects
//!    candidates, recording a [`Trajectory`]
//! 4. **Chains**: optionally, several isolated chains run in parallel and the
//!    best one is kept
//!
//! The loop itself is strictly sequential; runs share no mutable state, so
//! independent runs may execute concurrently.

#![warn(missing_docs)]

pub mod anneal;
pub mod chains;
pub mod cost;
pub mod schedule;

pub use anneal::{Annealer, AnnealingState, OptimizerOutcome, Trajectory, TrajectoryRecord};
pub use chains::{chain_seeds, run_chains};
pub use cost::{CostModel, EnergyBreakdown};
pub use schedule::{
    accept, acceptance_probability, iteration_cap, AnnealingSchedule, SchedulePhase,
};

use rand::Rng;
use strata_config::StrataConfig;
use strata_floorplan::FloorplanState;

/// Optimizes `initial` according to `config`.
///
/// With a single chain the annealer consumes `rng` directly. With more, one
/// seed per chain is drawn from `rng` and the chains run in parallel.
pub fn place<R: Rng>(
    initial: FloorplanState,
    config: &StrataConfig,
    rng: &mut R,
) -> OptimizerOutcome {
    let annealer = Annealer::new(config);
    let schedule = annealer.schedule_for(&initial);
    log::info!(
        "placing {} blocks on {} layers ({} connections), {} iterations (cap {}), {} chain(s)",
        initial.block_count(),
        initial.layers,
        initial.connection_count(),
        schedule.effective_budget(),
        schedule.iteration_cap,
        config.run.chains
    );

    if config.run.chains <= 1 {
        return annealer.run(initial, rng);
    }

    let seeds = chain_seeds(rng, config.run.chains);
    match run_chains(&annealer, &initial, &seeds) {
        Some(outcome) => outcome,
        None => annealer.run(initial, rng),
    }
}
