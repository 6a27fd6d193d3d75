//! Simulated annealing over block placements.
//!
//! Starting from an initial floorplan, repeatedly proposes a single move and
//! accepts or rejects it with the Metropolis criterion. The temperature
//! decreases geometrically with the iteration index. The lowest-energy state
//! seen is tracked separately from the current state, so the reported result
//! can never be worse than the starting point.

use crate::cost::CostModel;
use crate::schedule::{accept, AnnealingSchedule, SchedulePhase};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strata_config::{MoveConfig, StrataConfig};
use strata_floorplan::{perturb, FloorplanError, FloorplanState, MoveKind};

/// Mutable loop state of one annealing run.
#[derive(Debug, Clone)]
pub struct AnnealingState {
    /// Index of the next iteration to run.
    pub iteration: u64,
    /// Temperature at `iteration`.
    pub temperature: f64,
    /// Most recently accepted state.
    pub current: FloorplanState,
    /// Energy of `current`.
    pub current_energy: f64,
    /// Lowest-energy state seen so far.
    pub best: FloorplanState,
    /// Energy of `best`.
    pub best_energy: f64,
}

/// One iteration of the search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    /// Iteration index, starting at 0.
    pub iteration: u64,
    /// Temperature the acceptance decision was made at.
    pub temperature: f64,
    /// Schedule temperature after this iteration, i.e. at `iteration + 1`.
    pub cooled_temperature: f64,
    /// Energy of the current state after the decision.
    pub energy: f64,
    /// Energy of the proposed candidate.
    pub candidate_energy: f64,
    /// Best energy seen after this iteration.
    pub best_energy: f64,
    /// Kind of move proposed.
    pub move_kind: MoveKind,
    /// Whether the candidate replaced the current state.
    pub accepted: bool,
}

/// Append-only log of the iterations of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory {
    records: Vec<TrajectoryRecord>,
}

impl Trajectory {
    /// Creates an empty trajectory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn push(&mut self, record: TrajectoryRecord) {
        debug_assert!(self
            .records
            .last()
            .map_or(true, |last| last.iteration < record.iteration));
        self.records.push(record);
    }

    /// Returns all records in iteration order.
    pub fn records(&self) -> &[TrajectoryRecord] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether no iteration was recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of accepted moves.
    pub fn accepted_count(&self) -> usize {
        self.records.iter().filter(|r| r.accepted).count()
    }
}

/// Everything a finished run hands to the summarizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerOutcome {
    /// The starting floorplan.
    pub initial: FloorplanState,
    /// Energy of `initial`.
    pub initial_energy: f64,
    /// Lowest-energy floorplan seen.
    pub best: FloorplanState,
    /// Energy of `best`.
    pub best_energy: f64,
    /// Schedule temperature at the start of the run.
    pub initial_temperature: f64,
    /// Schedule temperature at the iteration where the run stopped.
    pub final_temperature: f64,
    /// Per-iteration log.
    pub trajectory: Trajectory,
    /// Number of iterations actually run.
    pub iterations: u64,
    /// Whether the run stopped because no valid move existed.
    pub terminated_early: bool,
}

/// Simulated annealing optimizer.
#[derive(Debug, Clone)]
pub struct Annealer {
    /// Energy function.
    pub cost: CostModel,
    /// Enabled move kinds.
    pub moves: MoveConfig,
    anneal: strata_config::AnnealConfig,
}

impl Annealer {
    /// Builds an annealer from the full configuration.
    pub fn new(config: &StrataConfig) -> Self {
        Self {
            cost: CostModel::from_config(&config.cost),
            moves: config.moves.clone(),
            anneal: config.anneal.clone(),
        }
    }

    /// Returns the schedule this annealer uses for `state`.
    pub fn schedule_for(&self, state: &FloorplanState) -> AnnealingSchedule {
        AnnealingSchedule::for_run(&self.anneal, state.block_count(), state.layers)
    }

    /// Runs the annealing loop from `initial` to termination.
    ///
    /// Floorplans with fewer than two blocks have placement-invariant energy,
    /// so they return immediately with the initial state as the result.
    pub fn run<R: Rng>(&self, initial: FloorplanState, rng: &mut R) -> OptimizerOutcome {
        let schedule = self.schedule_for(&initial);
        let initial_energy = self.cost.energy(&initial);

        if initial.block_count() < 2 {
            log::debug!("single-block floorplan, skipping annealing");
            return OptimizerOutcome {
                best: initial.clone(),
                initial,
                initial_energy,
                best_energy: initial_energy,
                initial_temperature: schedule.initial_temperature,
                final_temperature: schedule.temperature(0),
                trajectory: Trajectory::new(),
                iterations: 0,
                terminated_early: false,
            };
        }

        let mut state = AnnealingState {
            iteration: 0,
            temperature: schedule.temperature(0),
            current: initial.clone(),
            current_energy: initial_energy,
            best: initial.clone(),
            best_energy: initial_energy,
        };
        let mut trajectory = Trajectory::new();
        let mut terminated_early = false;

        while schedule.phase(state.iteration) != SchedulePhase::Terminated {
            match self.step(&mut state, &schedule, rng) {
                Ok(record) => trajectory.push(record),
                Err(err) => {
                    log::warn!("{err} at iteration {}, stopping early", state.iteration);
                    terminated_early = true;
                    break;
                }
            }

            let interval = self.anneal.progress_interval;
            if interval > 0 && state.iteration % interval == 0 {
                log::info!(
                    "iteration {}, temperature {:.2}, best energy {:.2}",
                    state.iteration,
                    state.temperature,
                    state.best_energy
                );
            }
        }

        log::info!(
            "annealing finished after {} iterations ({} accepted): energy {:.2} -> {:.2}",
            state.iteration,
            trajectory.accepted_count(),
            initial_energy,
            state.best_energy
        );

        OptimizerOutcome {
            initial,
            initial_energy,
            best: state.best,
            best_energy: state.best_energy,
            initial_temperature: schedule.initial_temperature,
            final_temperature: state.temperature,
            trajectory,
            iterations: state.iteration,
            terminated_early,
        }
    }

    /// Proposes one candidate, applies the acceptance rule, updates the best
    /// state, and advances `state` to the next iteration's temperature.
    ///
    /// On error `state` is left untouched.
    fn step<R: Rng>(
        &self,
        state: &mut AnnealingState,
        schedule: &AnnealingSchedule,
        rng: &mut R,
    ) -> Result<TrajectoryRecord, FloorplanError> {
        let (candidate, mv) = perturb(&state.current, &self.moves, rng)?;
        let candidate_energy = self.cost.energy(&candidate);
        let delta = candidate_energy - state.current_energy;

        let accepted = accept(delta, state.temperature, rng);
        if accepted {
            state.current = candidate;
            state.current_energy = candidate_energy;
            if state.current_energy < state.best_energy {
                state.best = state.current.clone();
                state.best_energy = state.current_energy;
            }
        }

        let iteration = state.iteration;
        let temperature = state.temperature;
        state.iteration += 1;
        state.temperature = schedule.temperature(state.iteration);

        Ok(TrajectoryRecord {
            iteration,
            temperature,
            cooled_temperature: state.temperature,
            energy: state.current_energy,
            candidate_energy,
            best_energy: state.best_energy,
            move_kind: mv.kind(),
            accepted,
        })
    }
}
