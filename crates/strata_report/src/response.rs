//! The structured response handed back to the presentation layer.
//!
//! Serialized with a `status` tag: `{"status": "success", ...metrics}` or
//! `{"status": "error", "message": "..."}`. Callers must check `status`
//! before reading any metric.

use serde::{Deserialize, Serialize};

/// Value of `temperature_kind`: reported temperatures are the annealing
/// control parameter, not a physical temperature.
pub const TEMPERATURE_KIND: &str = "annealing_control_parameter";

/// Outcome of one optimization request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OptimizeResponse {
    /// The run completed; all metrics are populated.
    Success(Box<OptimizationReport>),
    /// The request was rejected; only `message` is populated.
    Error {
        /// Human-readable reason.
        message: String,
    },
}

impl OptimizeResponse {
    /// Returns whether the response carries a report.
    pub fn is_success(&self) -> bool {
        matches!(self, OptimizeResponse::Success(_))
    }

    /// Returns the report of a successful run.
    pub fn report(&self) -> Option<&OptimizationReport> {
        match self {
            OptimizeResponse::Success(report) => Some(report),
            OptimizeResponse::Error { .. } => None,
        }
    }

    /// Returns the error message of a rejected request.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            OptimizeResponse::Success(_) => None,
            OptimizeResponse::Error { message } => Some(message),
        }
    }
}

/// Before/after comparison of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    /// Energy of the initial floorplan.
    pub initial_energy: f64,
    /// Energy of the best floorplan found.
    pub optimized_energy: f64,
    /// Reduction of the area term, in percent.
    pub area_reduction: f64,
    /// Reduction of the wirelength term, in percent.
    pub interconnect_reduction: f64,
    /// Reduction of the power term, in percent.
    pub power_reduction: f64,
    /// Annealing temperature at the start of the run.
    pub initial_temp: f64,
    /// Annealing temperature where the run stopped.
    pub optimized_temp: f64,
    /// `initial_temp - optimized_temp`.
    pub temp_reduction: f64,
    /// What the temperature fields measure; always [`TEMPERATURE_KIND`].
    pub temperature_kind: String,
    /// Wall-clock time of the annealing phase, in seconds, rounded to 2 decimals.
    pub execution_time: f64,
    /// One image identifier per layer for the initial floorplan.
    pub initial_images: Vec<String>,
    /// One image identifier per layer for the optimized floorplan.
    pub optimized_images: Vec<String>,
    /// Per-layer block placements of the initial floorplan.
    pub initial_layers: Vec<LayerPlacement>,
    /// Per-layer block placements of the optimized floorplan.
    pub optimized_layers: Vec<LayerPlacement>,
    /// Raw energy terms before and after.
    pub metrics: TermMetrics,
    /// Seed the run used; replaying it reproduces the run.
    pub seed: u64,
    /// Iterations actually run.
    pub iterations: u64,
    /// Whether the run stopped because no valid move existed.
    pub terminated_early: bool,
    /// Tabular search trajectory, one row per iteration after an initial-state row.
    pub csv_data: Vec<CsvRow>,
}

/// Raw (unweighted) energy terms of the initial and optimized floorplans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermMetrics {
    /// Initial summed bounding-box area.
    pub initial_area: f64,
    /// Optimized summed bounding-box area.
    pub optimized_area: f64,
    /// Initial total interconnect length.
    pub initial_interconnect: f64,
    /// Optimized total interconnect length.
    pub optimized_interconnect: f64,
    /// Initial power proxy.
    pub initial_power: f64,
    /// Optimized power proxy.
    pub optimized_power: f64,
    /// Initial overlap area.
    pub initial_overlap: f64,
    /// Optimized overlap area.
    pub optimized_overlap: f64,
}

/// The blocks of one layer, for external rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerPlacement {
    /// Layer index.
    pub layer: u32,
    /// Blocks on the layer, in ID order.
    pub blocks: Vec<PlacedBlock>,
}

/// A block's footprint as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedBlock {
    /// Block ID.
    pub id: u32,
    /// Lower-left x.
    pub x: u32,
    /// Lower-left y.
    pub y: u32,
    /// Footprint width.
    pub width: u32,
    /// Footprint height.
    pub height: u32,
}

/// One row of the trajectory table. Keys are the column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvRow {
    /// Iteration index; the initial-state row is iteration 0.
    #[serde(rename = "Iteration")]
    pub iteration: u64,
    /// Schedule temperature at this iteration index.
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    /// Current energy after the acceptance decision.
    #[serde(rename = "Energy")]
    pub energy: f64,
    /// Energy of the proposed candidate.
    #[serde(rename = "Candidate Energy")]
    pub candidate_energy: f64,
    /// Best energy so far.
    #[serde(rename = "Best Energy")]
    pub best_energy: f64,
    /// Move kind proposed, or `initial` for the first row.
    #[serde(rename = "Move")]
    pub move_kind: String,
    /// Whether the candidate was accepted.
    #[serde(rename = "Accepted")]
    pub accepted: bool,
    /// Empty except on the final row, which lists the initial placements.
    #[serde(rename = "Initial Block Placements")]
    pub initial_block_placements: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_serializes_with_status_and_message_only() {
        let resp = OptimizeResponse::Error {
            message: "invalid configuration: layers must be greater than 0, got 0".into(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json["message"].as_str().unwrap().contains("layers"));
        assert_eq!(json.as_object().unwrap().len(), 2);
        assert!(!resp.is_success());
        assert!(resp.report().is_none());
    }

    #[test]
    fn csv_row_uses_column_headers() {
        let row = CsvRow {
            iteration: 3,
            temperature: 991.0,
            energy: 10.0,
            candidate_energy: 12.0,
            best_energy: 9.0,
            move_kind: "swap".into(),
            accepted: false,
            initial_block_placements: String::new(),
        };
        let json = serde_json::to_value(&row).unwrap();
        for key in [
            "Iteration",
            "Temperature",
            "Energy",
            "Candidate Energy",
            "Best Energy",
            "Move",
            "Accepted",
            "Initial Block Placements",
        ] {
            assert!(json.get(key).is_some(), "missing column {key}");
        }
        assert_eq!(json["Move"], "swap");
    }

    #[test]
    fn error_roundtrips() {
        let resp = OptimizeResponse::Error {
            message: "bad".into(),
        };
        let text = serde_json::to_string(&resp).unwrap();
        let back: OptimizeResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(back.error_message(), Some("bad"));
    }
}
