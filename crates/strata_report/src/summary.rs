//! Turns an optimizer outcome into the caller-facing report.
//!
//! Everything here is a pure function of the outcome: no randomness, no I/O.

use crate::response::{
    CsvRow, LayerPlacement, OptimizationReport, PlacedBlock, TermMetrics, TEMPERATURE_KIND,
};
use strata_floorplan::FloorplanState;
use strata_place::{CostModel, OptimizerOutcome};

/// Run facts the outcome itself does not carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunInfo {
    /// Seed the run was started from.
    pub seed: u64,
    /// Wall-clock time of the annealing phase, in seconds.
    pub execution_time: f64,
}

/// Builds the report for `outcome`, scoring both states with `cost`.
pub fn summarize(
    outcome: &OptimizerOutcome,
    cost: &CostModel,
    info: RunInfo,
) -> OptimizationReport {
    let before = cost.breakdown(&outcome.initial);
    let after = cost.breakdown(&outcome.best);

    OptimizationReport {
        initial_energy: outcome.initial_energy,
        optimized_energy: outcome.best_energy,
        area_reduction: reduction(before.area, after.area),
        interconnect_reduction: reduction(before.wirelength, after.wirelength),
        power_reduction: reduction(before.power, after.power),
        initial_temp: outcome.initial_temperature,
        optimized_temp: outcome.final_temperature,
        temp_reduction: outcome.initial_temperature - outcome.final_temperature,
        temperature_kind: TEMPERATURE_KIND.to_string(),
        execution_time: round2(info.execution_time),
        initial_images: image_ids("initial", outcome.initial.layers),
        optimized_images: image_ids("optimized", outcome.best.layers),
        initial_layers: layer_placements(&outcome.initial),
        optimized_layers: layer_placements(&outcome.best),
        metrics: TermMetrics {
            initial_area: before.area,
            optimized_area: after.area,
            initial_interconnect: before.wirelength,
            optimized_interconnect: after.wirelength,
            initial_power: before.power,
            optimized_power: after.power,
            initial_overlap: before.overlap,
            optimized_overlap: after.overlap,
        },
        seed: info.seed,
        iterations: outcome.iterations,
        terminated_early: outcome.terminated_early,
        csv_data: trajectory_rows(outcome),
    }
}

/// Percentage reduction from `initial` to `optimized`, rounded to 2 decimals.
///
/// Returns 0 when `initial` is 0. Negative when the term grew.
pub fn reduction(initial: f64, optimized: f64) -> f64 {
    if initial == 0.0 {
        return 0.0;
    }
    round2((initial - optimized) / initial * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Image identifiers for each layer of a floorplan, bottom layer first.
pub fn image_ids(stage: &str, layers: u32) -> Vec<String> {
    (0..layers)
        .map(|layer| format!("static/images/{stage}_layer_{layer}.png"))
        .collect()
}

/// Per-layer block footprints, bottom layer first, blocks in ID order.
pub fn layer_placements(state: &FloorplanState) -> Vec<LayerPlacement> {
    state
        .layer_ids()
        .map(|layer| LayerPlacement {
            layer: layer.as_raw(),
            blocks: state
                .layer_blocks(layer)
                .map(|b| PlacedBlock {
                    id: b.id.as_raw(),
                    x: b.position.x,
                    y: b.position.y,
                    width: b.width,
                    height: b.height,
                })
                .collect(),
        })
        .collect()
}

/// Trajectory table: an iteration-0 row for the initial state, then one row
/// per proposed move numbered from 1. Row `k` carries the schedule
/// temperature at `k`, so the last row's temperature is the final one. The
/// final row lists the initial placements.
pub fn trajectory_rows(outcome: &OptimizerOutcome) -> Vec<CsvRow> {
    let mut rows = Vec::with_capacity(outcome.trajectory.len() + 1);
    rows.push(CsvRow {
        iteration: 0,
        temperature: outcome.initial_temperature,
        energy: outcome.initial_energy,
        candidate_energy: outcome.initial_energy,
        best_energy: outcome.initial_energy,
        move_kind: "initial".to_string(),
        accepted: true,
        initial_block_placements: String::new(),
    });
    rows.extend(outcome.trajectory.records().iter().map(|r| CsvRow {
        iteration: r.iteration + 1,
        temperature: r.cooled_temperature,
        energy: r.energy,
        candidate_energy: r.candidate_energy,
        best_energy: r.best_energy,
        move_kind: r.move_kind.name().to_string(),
        accepted: r.accepted,
        initial_block_placements: String::new(),
    }));

    if let Some(last) = rows.last_mut() {
        last.initial_block_placements = outcome.initial.placement_listing();
    }
    rows
}
