//! Errors surfaced at the request boundary.

use strata_config::ConfigError;
use strata_floorplan::FloorplanError;

/// Reasons an optimization request is rejected.
#[derive(Debug, thiserror::Error)]
pub enum OptimizeError {
    /// The request parameters do not describe a buildable floorplan.
    #[error(transparent)]
    Floorplan(#[from] FloorplanError),

    /// The optimizer constants are out of range.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
