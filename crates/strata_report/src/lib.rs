//! Request boundary of the Strata placement optimizer.
//!
//! Takes an [`OptimizeRequest`] as submitted by a presentation layer, builds a
//! random initial floorplan, runs the annealing engine, and summarizes the run
//! into an [`OptimizeResponse`]. Invalid requests never panic; they come back
//! as [`OptimizeResponse::Error`].
//!
//! # Example
//!
//! ```
//! use strata_config::StrataConfig;
//! use strata_report::{optimize, OptimizeRequest};
//!
//! let mut config = StrataConfig::default();
//! config.run.seed = Some(7);
//! let response = optimize(&OptimizeRequest::new(4, 1, 1, 10), &config);
//! let report = response.report().unwrap();
//! assert!(report.optimized_energy <= report.initial_energy);
//! assert_eq!(report.optimized_images.len(), 1);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod request;
pub mod response;
pub mod summary;

pub use error::OptimizeError;
pub use request::OptimizeRequest;
pub use response::{
    CsvRow, LayerPlacement, OptimizationReport, OptimizeResponse, PlacedBlock, TermMetrics,
    TEMPERATURE_KIND,
};
pub use summary::{image_ids, layer_placements, reduction, summarize, trajectory_rows, RunInfo};

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use strata_config::{validate_config, StrataConfig};
use strata_floorplan::{initialize_from_params, FloorplanParams};
use strata_place::CostModel;

/// Handles one optimization request.
///
/// Errors are logged and folded into [`OptimizeResponse::Error`].
pub fn optimize(request: &OptimizeRequest, config: &StrataConfig) -> OptimizeResponse {
    match run(request, config) {
        Ok(report) => OptimizeResponse::Success(Box::new(report)),
        Err(err) => {
            log::warn!("rejected optimization request {request:?}: {err}");
            OptimizeResponse::Error {
                message: err.to_string(),
            }
        }
    }
}

/// Runs one optimization request and returns the report.
///
/// Uses `config.run.seed` when set, fresh entropy otherwise; the seed used is
/// recorded in the report. `execution_time` covers the annealing phase only.
pub fn run(
    request: &OptimizeRequest,
    config: &StrataConfig,
) -> Result<OptimizationReport, OptimizeError> {
    validate_config(config)?;

    let seed = config.run.seed.unwrap_or_else(rand::random::<u64>);
    let mut rng = StdRng::seed_from_u64(seed);
    let params = FloorplanParams::new(
        request.num_blocks,
        request.layers,
        request.connections_per_block,
        request.floorplan_size,
    )?
    .within(&config.limits)?;
    let initial = initialize_from_params(&params, &config.blocks, &mut rng);
    log::debug!("seed {seed}, initial placements {}", initial.placement_listing());

    let start = Instant::now();
    let outcome = strata_place::place(initial, config, &mut rng);
    let execution_time = start.elapsed().as_secs_f64();

    let cost = CostModel::from_config(&config.cost);
    Ok(summarize(
        &outcome,
        &cost,
        RunInfo {
            seed,
            execution_time,
        },
    ))
}
