//! End-to-end request scenarios: valid runs succeed, invalid requests come
//! back as error responses and never panic.

use strata_conformance::{report_seeded, request, run_seeded, run_seeded_with};
use strata_report::OptimizeResponse;

#[test]
fn small_single_layer_run_succeeds() {
    let report = report_seeded(&request(4, 1, 1, 10), 42);
    assert!(report.optimized_energy <= report.initial_energy);
    assert_eq!(report.initial_images, vec!["static/images/initial_layer_0.png"]);
    assert_eq!(report.optimized_images, vec!["static/images/optimized_layer_0.png"]);
    assert!(report.iterations <= 2000);
    assert!(!report.terminated_early);
}

#[test]
fn single_block_energies_are_equal() {
    let report = report_seeded(&request(1, 1, 0, 10), 42);
    assert_eq!(report.initial_energy, report.optimized_energy);
    assert_eq!(report.iterations, 0);
    assert_eq!(report.area_reduction, 0.0);
    assert_eq!(report.interconnect_reduction, 0.0);
    assert_eq!(report.power_reduction, 0.0);
}

#[test]
fn stuck_floorplan_succeeds_and_reports_early_stop() {
    // Two 1x1 blocks on the only cell of the only layer: nothing can move.
    let response = run_seeded(&request(2, 1, 1, 1), 3);
    assert!(response.is_success());
    let report = response.report().unwrap();
    assert!(report.terminated_early);
    assert_eq!(report.iterations, 0);
    assert_eq!(report.initial_energy, report.optimized_energy);
    assert_eq!(report.initial_layers, report.optimized_layers);
    assert_eq!(report.optimized_temp, report.initial_temp);
    assert_eq!(report.csv_data.len(), 1);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["terminated_early"], true);
}

#[test]
fn default_request_succeeds_with_one_image_per_layer() {
    let report = report_seeded(&Default::default(), 3);
    assert_eq!(report.initial_images.len(), 3);
    assert_eq!(report.optimized_images.len(), 3);
    assert_eq!(report.initial_layers.len(), 3);
    assert_eq!(report.optimized_layers.len(), 3);
    assert!(report.optimized_energy <= report.initial_energy);
}

#[test]
fn connections_equal_to_blocks_rejected() {
    let response = run_seeded(&request(5, 2, 5, 50), 1);
    match response {
        OptimizeResponse::Error { message } => {
            assert!(message.contains("connections_per_block"), "{message}");
        }
        OptimizeResponse::Success(_) => panic!("expected error response"),
    }
}

#[test]
fn non_positive_parameters_rejected() {
    let cases = [
        (request(0, 1, 0, 10), "num_blocks"),
        (request(-3, 1, 0, 10), "num_blocks"),
        (request(4, 0, 1, 10), "layers"),
        (request(4, 1, -1, 10), "connections_per_block"),
        (request(4, 1, 1, 0), "floorplan_size"),
        (request(4, 1, 1, -10), "floorplan_size"),
    ];
    for (req, field) in cases {
        let response = run_seeded(&req, 1);
        let message = response
            .error_message()
            .unwrap_or_else(|| panic!("{req:?} should be rejected"));
        assert!(message.contains(field), "{req:?}: {message}");
    }
}

#[test]
fn oversized_requests_rejected() {
    let cases = [
        (request(1_001, 1, 1, 100), "num_blocks"),
        (request(4_294_967_295, 3, 4_294_967_294, 100), "num_blocks"),
        (request(4, 65, 1, 100), "layers"),
    ];
    for (req, field) in cases {
        let response = run_seeded(&req, 1);
        let message = response
            .error_message()
            .unwrap_or_else(|| panic!("{req:?} should be rejected"));
        assert!(message.contains(field), "{req:?}: {message}");
        assert!(message.contains("at most"), "{req:?}: {message}");
    }
}

#[test]
fn limits_are_configurable() {
    let extra = "[limits]\nmax_blocks = 8\nmax_layers = 2\n";
    assert!(run_seeded_with(&request(8, 2, 2, 30), 1, extra).is_success());
    assert!(run_seeded_with(&request(9, 2, 2, 30), 1, extra)
        .error_message()
        .is_some_and(|m| m.contains("num_blocks")));
    assert!(run_seeded_with(&request(4, 3, 1, 30), 1, extra)
        .error_message()
        .is_some_and(|m| m.contains("layers")));
}

#[test]
fn error_response_json_shape() {
    let response = run_seeded(&request(2, 1, 2, 10), 1);
    let json = serde_json::to_value(&response).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    assert_eq!(obj["status"], "error");
    assert!(obj["message"].is_string());
}

#[test]
fn success_response_json_shape() {
    let response = run_seeded(&request(4, 1, 1, 10), 8);
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["status"], "success");
    for key in [
        "initial_energy",
        "optimized_energy",
        "area_reduction",
        "interconnect_reduction",
        "power_reduction",
        "initial_temp",
        "optimized_temp",
        "execution_time",
        "initial_images",
        "optimized_images",
        "csv_data",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["temperature_kind"], "annealing_control_parameter");
    let rows = json["csv_data"].as_array().unwrap();
    let last = rows.last().unwrap();
    let listing = last["Initial Block Placements"].as_str().unwrap();
    assert_eq!(listing.split(';').count(), 4);
    assert!(listing.starts_with("0@("));
}
