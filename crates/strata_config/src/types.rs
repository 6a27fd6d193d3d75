//! Configuration types deserialized from `strata.toml`.
//!
//! The defaults below are the tuned constants the optimizer ships with. They
//! materially affect run time and convergence quality, so changing one should
//! come with a look at the conformance scenarios.

use serde::{Deserialize, Serialize};

/// The top-level optimizer configuration parsed from `strata.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrataConfig {
    /// Annealing schedule constants.
    #[serde(default)]
    pub anneal: AnnealConfig,
    /// Energy function weights.
    #[serde(default)]
    pub cost: CostConfig,
    /// Enabled perturbation kinds.
    #[serde(default)]
    pub moves: MoveConfig,
    /// Block footprint sizing used at initialization.
    #[serde(default)]
    pub blocks: BlockConfig,
    /// Per-run settings (seed, number of chains).
    #[serde(default)]
    pub run: RunConfig,
    /// Largest floorplan a request may ask for.
    #[serde(default)]
    pub limits: LimitConfig,
}

/// Geometric cooling schedule and iteration budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealConfig {
    /// Starting temperature `T0`.
    pub initial_temperature: f64,
    /// Geometric cooling factor `alpha`; the temperature at iteration `i` is `T0 * alpha^i`.
    pub cooling_rate: f64,
    /// Temperature floor. The run stops once the temperature drops to or below it.
    pub min_temperature: f64,
    /// Iterations granted per block per layer before the hard cap applies.
    pub iterations_per_block_layer: u64,
    /// Hard upper bound on the iteration count of one run.
    pub max_iterations: u64,
    /// Emit a progress log line every this many iterations (0 disables).
    pub progress_interval: u64,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_rate: 0.997,
            min_temperature: 1.0,
            iterations_per_block_layer: 500,
            max_iterations: 10_000,
            progress_interval: 1000,
        }
    }
}

/// Weights of the additive energy terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// Weight of total connection length.
    pub wire_weight: f64,
    /// Weight of the same-layer footprint overlap area.
    pub overlap_weight: f64,
    /// Weight of the connection power proxy `1 / (1 + distance)`.
    pub power_weight: f64,
    /// Weight of the summed per-layer bounding-box area.
    pub area_weight: f64,
    /// Distance added per layer crossed by a vertical interconnect.
    pub layer_penalty: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            wire_weight: 1.0,
            overlap_weight: 10.0,
            power_weight: 25.0,
            area_weight: 0.05,
            layer_penalty: 10.0,
        }
    }
}

/// Which perturbation kinds the move generator may propose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveConfig {
    /// Move one block to a new position on its current layer.
    pub relocate: bool,
    /// Move one block to a different layer.
    pub relayer: bool,
    /// Exchange the placements of two blocks.
    pub swap: bool,
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self {
            relocate: true,
            relayer: true,
            swap: true,
        }
    }
}

impl MoveConfig {
    /// Returns whether at least one move kind is enabled.
    pub fn any_enabled(&self) -> bool {
        self.relocate || self.relayer || self.swap
    }
}

/// Range of block side lengths, clamped to the floorplan size at initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    /// Smallest block side length.
    pub min_side: u32,
    /// Largest block side length.
    pub max_side: u32,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            min_side: 5,
            max_side: 15,
        }
    }
}

/// Settings that vary between runs rather than between deployments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Fixed random seed. When absent every run draws a fresh one.
    pub seed: Option<u64>,
    /// Number of independent annealing chains; the best one wins.
    pub chains: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            chains: 1,
        }
    }
}

/// Upper bounds on request parameters.
///
/// Connection generation is quadratic in the block count and every energy
/// evaluation visits each layer, so unbounded requests can exhaust memory or
/// run for hours. Requests above these limits are rejected before any work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Largest accepted `num_blocks`. Also bounds `connections_per_block`,
    /// which must stay below `num_blocks`.
    pub max_blocks: u32,
    /// Largest accepted `layers`.
    pub max_layers: u32,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_blocks: 1000,
            max_layers: 64,
        }
    }
}
