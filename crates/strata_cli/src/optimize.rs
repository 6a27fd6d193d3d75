//! `strata optimize`: run one optimization request and emit its JSON response.
//!
//! 1. Load config (`--config`, else `./strata.toml`, else defaults)
//! 2. Apply `--seed` / `--chains` overrides
//! 3. Build the request from `--request` and the parameter flags
//! 4. Optimize and serialize the response

use std::fs;
use std::path::Path;

use strata_config::StrataConfig;
use strata_report::{OptimizeRequest, OptimizeResponse};

use crate::settings::load_settings;
use crate::{GlobalArgs, OptimizeArgs};

/// Runs the `strata optimize` command.
///
/// Returns exit code 0 for a success response, 1 for an error response.
pub fn run(args: &OptimizeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut config = load_settings(global.config.as_deref())?;
    apply_overrides(&mut config, args);

    let request = build_request(args)?;
    let response = strata_report::optimize(&request, &config);

    if let Some(report) = response.report() {
        log::info!(
            "energy {:.2} -> {:.2} in {:.3}s (seed {})",
            report.initial_energy,
            report.optimized_energy,
            report.execution_time,
            report.seed
        );
    }

    let json = render(&response, args.compact)?;
    match args.output {
        Some(ref path) => {
            fs::write(path, format!("{json}\n"))?;
            log::info!("wrote response to {path}");
        }
        None => println!("{json}"),
    }

    Ok(if response.is_success() { 0 } else { 1 })
}

/// Applies the run overrides given on the command line.
fn apply_overrides(config: &mut StrataConfig, args: &OptimizeArgs) {
    if let Some(seed) = args.seed {
        config.run.seed = Some(seed);
    }
    if let Some(chains) = args.chains {
        config.run.chains = chains;
    }
}

/// Builds the request: `--request` file first, then explicit flags on top.
fn build_request(args: &OptimizeArgs) -> Result<OptimizeRequest, Box<dyn std::error::Error>> {
    let mut request = match args.request {
        Some(ref path) => read_request(Path::new(path))?,
        None => OptimizeRequest::default(),
    };
    if let Some(v) = args.num_blocks {
        request.num_blocks = v;
    }
    if let Some(v) = args.layers {
        request.layers = v;
    }
    if let Some(v) = args.connections_per_block {
        request.connections_per_block = v;
    }
    if let Some(v) = args.floorplan_size {
        request.floorplan_size = v;
    }
    Ok(request)
}

fn read_request(path: &Path) -> Result<OptimizeRequest, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let request = serde_json::from_str(&content)
        .map_err(|e| format!("invalid request file {}: {e}", path.display()))?;
    Ok(request)
}

fn render(response: &OptimizeResponse, compact: bool) -> Result<String, serde_json::Error> {
    if compact {
        serde_json::to_string(response)
    } else {
        serde_json::to_string_pretty(response)
    }
}
