//! The optimization request consumed from the presentation layer.

use serde::{Deserialize, Serialize};

/// Parameters of one optimization request.
///
/// Fields are signed so out-of-range values survive deserialization and are
/// rejected with a descriptive message instead of a parse error. Absent fields
/// take the defaults of the web form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeRequest {
    /// Number of blocks to place.
    pub num_blocks: i64,
    /// Number of stacked layers.
    pub layers: i64,
    /// Connections generated per block.
    pub connections_per_block: i64,
    /// Side length of every layer.
    pub floorplan_size: i64,
}

impl Default for OptimizeRequest {
    fn default() -> Self {
        Self {
            num_blocks: 20,
            layers: 3,
            connections_per_block: 3,
            floorplan_size: 100,
        }
    }
}

impl OptimizeRequest {
    /// Creates a request from its four parameters.
    pub fn new(
        num_blocks: i64,
        layers: i64,
        connections_per_block: i64,
        floorplan_size: i64,
    ) -> Self {
        Self {
            num_blocks,
            layers,
            connections_per_block,
            floorplan_size,
        }
    }
}
