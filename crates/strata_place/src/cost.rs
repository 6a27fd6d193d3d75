//! Placement energy.
//!
//! Energy is a weighted sum of four additive terms evaluated on a floorplan:
//!
//! - **wirelength**: `Σ w · distance(a, b)` over connections, where distance
//!   includes the per-layer vertical penalty,
//! - **overlap**: `Σ` footprint intersection area over same-layer block pairs,
//! - **power**: `Σ w / (1 + distance(a, b))` over connections,
//! - **area**: `Σ` occupied bounding-box area over layers.
//!
//! The raw terms are kept in an [`EnergyBreakdown`] so reports can quote
//! per-term reductions; [`CostModel::energy`] folds them with the weights.

use serde::{Deserialize, Serialize};
use strata_config::CostConfig;
use strata_floorplan::{distance, FloorplanState};

/// Weights for the energy function components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    /// Weight for the wirelength term.
    pub wire_weight: f64,
    /// Weight for the overlap term.
    pub overlap_weight: f64,
    /// Weight for the power term.
    pub power_weight: f64,
    /// Weight for the area term.
    pub area_weight: f64,
    /// Distance added per layer crossed by a connection.
    pub layer_penalty: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::from_config(&CostConfig::default())
    }
}

impl CostModel {
    /// Builds a cost model from the `[cost]` configuration table.
    pub fn from_config(config: &CostConfig) -> Self {
        Self {
            wire_weight: config.wire_weight,
            overlap_weight: config.overlap_weight,
            power_weight: config.power_weight,
            area_weight: config.area_weight,
            layer_penalty: config.layer_penalty,
        }
    }

    /// Evaluates every raw (unweighted) energy term of `state`.
    pub fn breakdown(&self, state: &FloorplanState) -> EnergyBreakdown {
        EnergyBreakdown {
            wirelength: total_wirelength(state, self.layer_penalty),
            overlap: total_overlap(state),
            power: total_power(state, self.layer_penalty),
            area: total_area(state),
        }
    }

    /// Folds a breakdown into a scalar energy.
    pub fn weigh(&self, terms: &EnergyBreakdown) -> f64 {
        let energy = self.wire_weight * terms.wirelength
            + self.overlap_weight * terms.overlap
            + self.power_weight * terms.power
            + self.area_weight * terms.area;
        debug_assert!(energy.is_finite(), "non-finite energy from {terms:?}");
        energy
    }

    /// Computes the scalar energy of `state`. Lower is better.
    pub fn energy(&self, state: &FloorplanState) -> f64 {
        self.weigh(&self.breakdown(state))
    }
}

/// Raw values of the four energy terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyBreakdown {
    /// Total weighted connection length.
    pub wirelength: f64,
    /// Total same-layer overlap area.
    pub overlap: f64,
    /// Connection power proxy.
    pub power: f64,
    /// Sum of per-layer occupied bounding-box areas.
    pub area: f64,
}

/// Sum of weighted connection distances.
pub fn total_wirelength(state: &FloorplanState, layer_penalty: f64) -> f64 {
    state
        .connections
        .iter()
        .map(|c| c.weight * distance(state.block(c.a), state.block(c.b), layer_penalty))
        .sum()
}

/// Sum of `weight / (1 + distance)` over connections.
pub fn total_power(state: &FloorplanState, layer_penalty: f64) -> f64 {
    state
        .connections
        .iter()
        .map(|c| c.weight / (1.0 + distance(state.block(c.a), state.block(c.b), layer_penalty)))
        .sum()
}

/// Sum of footprint intersection areas over all same-layer block pairs.
pub fn total_overlap(state: &FloorplanState) -> f64 {
    let mut total = 0u64;
    for layer in state.layer_ids() {
        let blocks: Vec<_> = state.layer_blocks(layer).collect();
        for (i, a) in blocks.iter().enumerate() {
            for b in &blocks[i + 1..] {
                total += a.overlap_area(b);
            }
        }
    }
    total as f64
}

/// Sum over layers of the bounding box spanned by the layer's blocks.
///
/// Empty layers contribute nothing.
pub fn total_area(state: &FloorplanState) -> f64 {
    state
        .layer_ids()
        .map(|layer| {
            let mut blocks = state.layer_blocks(layer);
            let Some(first) = blocks.next() else {
                return 0.0;
            };
            let (mut x0, mut y0) = (first.position.x, first.position.y);
            let (mut x1, mut y1) = (first.right(), first.top());
            for b in blocks {
                x0 = x0.min(b.position.x);
                y0 = y0.min(b.position.y);
                x1 = x1.max(b.right());
                y1 = y1.max(b.top());
            }
            (x1 - x0) as f64 * (y1 - y0) as f64
        })
        .sum()
}
