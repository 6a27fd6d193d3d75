//! Conformance test helpers for the Strata floorplan optimizer.
//!
//! Provides shared functions that push a request through the full pipeline
//! (validate → initialize → anneal → summarize) with a fixed seed and return
//! structured results for assertion in integration tests.

#![warn(missing_docs)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use strata_config::StrataConfig;
use strata_floorplan::{initialize, FloorplanState};
use strata_place::OptimizerOutcome;
use strata_report::{LayerPlacement, OptimizationReport, OptimizeRequest, OptimizeResponse};

/// Creates a request from its four parameters.
pub fn request(
    num_blocks: i64,
    layers: i64,
    connections_per_block: i64,
    floorplan_size: i64,
) -> OptimizeRequest {
    OptimizeRequest::new(num_blocks, layers, connections_per_block, floorplan_size)
}

/// Creates a default configuration pinned to `seed`.
pub fn make_config(seed: u64) -> StrataConfig {
    make_config_with(seed, "")
}

/// Creates a configuration from the TOML tables in `extra`, pinned to `seed`.
///
/// A `run.seed` in `extra` is overridden.
pub fn make_config_with(seed: u64, extra: &str) -> StrataConfig {
    let mut config: StrataConfig = toml::from_str(extra).unwrap();
    config.run.seed = Some(seed);
    config
}

/// Runs `request` through the request boundary with the default configuration and `seed`.
pub fn run_seeded(request: &OptimizeRequest, seed: u64) -> OptimizeResponse {
    strata_report::optimize(request, &make_config(seed))
}

/// Like [`run_seeded`], with extra configuration tables.
pub fn run_seeded_with(request: &OptimizeRequest, seed: u64, extra: &str) -> OptimizeResponse {
    strata_report::optimize(request, &make_config_with(seed, extra))
}

/// Runs `request` and returns the report, panicking on an error response.
pub fn report_seeded(request: &OptimizeRequest, seed: u64) -> OptimizationReport {
    match run_seeded(request, seed) {
        OptimizeResponse::Success(report) => *report,
        OptimizeResponse::Error { message } => panic!("request {request:?} rejected: {message}"),
    }
}

/// Builds the initial floorplan and anneals it directly, bypassing the report layer.
///
/// Consumes the RNG in the same order as the request boundary, so the states
/// match what [`run_seeded`] summarizes.
pub fn anneal_seeded(request: &OptimizeRequest, config: &StrataConfig) -> OptimizerOutcome {
    let seed = config.run.seed.unwrap_or_default();
    let mut rng = StdRng::seed_from_u64(seed);
    let initial: FloorplanState = initialize(
        request.num_blocks,
        request.layers,
        request.connections_per_block,
        request.floorplan_size,
        &config.blocks,
        &mut rng,
    )
    .unwrap();
    strata_place::place(initial, config, &mut rng)
}

/// Returns all block IDs in a per-layer listing, sorted.
pub fn block_ids(layers: &[LayerPlacement]) -> Vec<u32> {
    let mut ids: Vec<u32> = layers
        .iter()
        .flat_map(|l| l.blocks.iter().map(|b| b.id))
        .collect();
    ids.sort_unstable();
    ids
}

/// Returns whether every block in the listing fits inside a `size` x `size` layer.
pub fn all_within(layers: &[LayerPlacement], size: u32) -> bool {
    layers
        .iter()
        .flat_map(|l| l.blocks.iter())
        .all(|b| b.x + b.width <= size && b.y + b.height <= size)
}
