//! Random initial floorplans.
//!
//! Every block gets a random footprint, a uniformly random layer, and a
//! uniformly random in-bounds position. Overlaps are allowed here; the cost
//! function penalizes them and the optimizer removes them.

use crate::block::{Block, Position};
use crate::connection::generate_connections;
use crate::error::FloorplanError;
use crate::ids::{BlockId, LayerId};
use crate::state::FloorplanState;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strata_config::{BlockConfig, LimitConfig};

/// Validated request parameters describing the floorplan to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorplanParams {
    /// Number of blocks to place.
    pub num_blocks: usize,
    /// Number of stacked layers.
    pub layers: u32,
    /// Upper bound on connections per block.
    pub connections_per_block: usize,
    /// Side length of every layer.
    pub floorplan_size: u32,
}

impl FloorplanParams {
    /// Validates raw request integers and converts them to parameters.
    ///
    /// Rejects non-positive block, layer, and size counts, negative connection
    /// counts, and `connections_per_block >= num_blocks`.
    pub fn new(
        num_blocks: i64,
        layers: i64,
        connections_per_block: i64,
        floorplan_size: i64,
    ) -> Result<Self, FloorplanError> {
        if num_blocks <= 0 {
            return Err(FloorplanError::invalid(format!(
                "num_blocks must be greater than 0, got {num_blocks}"
            )));
        }
        if layers <= 0 {
            return Err(FloorplanError::invalid(format!(
                "layers must be greater than 0, got {layers}"
            )));
        }
        if connections_per_block < 0 {
            return Err(FloorplanError::invalid(format!(
                "connections_per_block must not be negative, got {connections_per_block}"
            )));
        }
        if connections_per_block >= num_blocks {
            return Err(FloorplanError::invalid(format!(
                "connections_per_block ({connections_per_block}) must be less than num_blocks ({num_blocks})"
            )));
        }
        if floorplan_size <= 0 {
            return Err(FloorplanError::invalid(format!(
                "floorplan_size must be greater than 0, got {floorplan_size}"
            )));
        }

        let to_u32 = |name: &str, v: i64| {
            u32::try_from(v).map_err(|_| FloorplanError::invalid(format!("{name} is too large: {v}")))
        };
        Ok(Self {
            num_blocks: to_u32("num_blocks", num_blocks)? as usize,
            layers: to_u32("layers", layers)?,
            connections_per_block: connections_per_block as usize,
            floorplan_size: to_u32("floorplan_size", floorplan_size)?,
        })
    }

    /// Rejects parameters above the configured limits.
    pub fn within(self, limits: &LimitConfig) -> Result<Self, FloorplanError> {
        if self.num_blocks > limits.max_blocks as usize {
            return Err(FloorplanError::invalid(format!(
                "num_blocks must be at most {}, got {}",
                limits.max_blocks, self.num_blocks
            )));
        }
        if self.layers > limits.max_layers {
            return Err(FloorplanError::invalid(format!(
                "layers must be at most {}, got {}",
                limits.max_layers, self.layers
            )));
        }
        Ok(self)
    }
}

/// Validates the raw parameters and builds a random initial floorplan.
pub fn initialize<R: Rng>(
    num_blocks: i64,
    layers: i64,
    connections_per_block: i64,
    floorplan_size: i64,
    sizing: &BlockConfig,
    rng: &mut R,
) -> Result<FloorplanState, FloorplanError> {
    let params = FloorplanParams::new(num_blocks, layers, connections_per_block, floorplan_size)?;
    Ok(initialize_from_params(&params, sizing, rng))
}

/// Builds a random initial floorplan from already-validated parameters.
///
/// Block sides are drawn from `sizing`, clamped to the floorplan size, so every
/// block fits on its layer.
pub fn initialize_from_params<R: Rng>(
    params: &FloorplanParams,
    sizing: &BlockConfig,
    rng: &mut R,
) -> FloorplanState {
    let size = params.floorplan_size;
    let hi = sizing.max_side.min(size).max(1);
    let lo = sizing.min_side.min(hi).max(1);

    let blocks = (0..params.num_blocks)
        .map(|i| {
            let width = rng.gen_range(lo..=hi);
            let height = rng.gen_range(lo..=hi);
            let layer = LayerId::from_raw(rng.gen_range(0..params.layers));
            let x = rng.gen_range(0..=size - width);
            let y = rng.gen_range(0..=size - height);
            Block {
                id: BlockId::from_raw(i as u32),
                layer,
                position: Position::new(x, y),
                width,
                height,
            }
        })
        .collect();

    let connections = generate_connections(rng, params.num_blocks, params.connections_per_block);
    FloorplanState::new(blocks, connections, params.layers, size)
}
