//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::StrataConfig;
use std::path::Path;

/// File name looked up inside a configuration directory.
pub const CONFIG_FILE_NAME: &str = "strata.toml";

/// Loads and validates a `strata.toml` configuration from a directory.
///
/// Reads `<dir>/strata.toml`, parses it, and validates every value.
pub fn load_config(dir: &Path) -> Result<StrataConfig, ConfigError> {
    load_config_file(&dir.join(CONFIG_FILE_NAME))
}

/// Loads and validates a configuration from an explicit file path.
pub fn load_config_file(path: &Path) -> Result<StrataConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `strata.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<StrataConfig, ConfigError> {
    let config: StrataConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that all configuration values are in range and mutually consistent.
///
/// Callers that patch a loaded configuration (for example with CLI overrides)
/// should re-run this before handing it to the optimizer.
pub fn validate_config(config: &StrataConfig) -> Result<(), ConfigError> {
    let anneal = &config.anneal;
    if !(anneal.initial_temperature.is_finite() && anneal.initial_temperature > 0.0) {
        return invalid("anneal.initial_temperature must be a positive number");
    }
    if !(anneal.cooling_rate > 0.0 && anneal.cooling_rate < 1.0) {
        return invalid("anneal.cooling_rate must lie in (0, 1)");
    }
    if !(anneal.min_temperature > 0.0 && anneal.min_temperature < anneal.initial_temperature) {
        return invalid("anneal.min_temperature must lie in (0, initial_temperature)");
    }
    if anneal.iterations_per_block_layer == 0 {
        return invalid("anneal.iterations_per_block_layer must be at least 1");
    }
    if anneal.max_iterations == 0 {
        return invalid("anneal.max_iterations must be at least 1");
    }

    let cost = &config.cost;
    for (name, value) in [
        ("cost.wire_weight", cost.wire_weight),
        ("cost.overlap_weight", cost.overlap_weight),
        ("cost.power_weight", cost.power_weight),
        ("cost.area_weight", cost.area_weight),
        ("cost.layer_penalty", cost.layer_penalty),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            return invalid(&format!("{name} must be a finite, non-negative number"));
        }
    }

    if !config.moves.any_enabled() {
        return invalid("at least one of moves.relocate, moves.relayer, moves.swap must be enabled");
    }

    let blocks = &config.blocks;
    if blocks.min_side == 0 {
        return invalid("blocks.min_side must be at least 1");
    }
    if blocks.min_side > blocks.max_side {
        return invalid("blocks.min_side must not exceed blocks.max_side");
    }

    if config.run.chains == 0 {
        return invalid("run.chains must be at least 1");
    }

    if config.limits.max_blocks == 0 {
        return invalid("limits.max_blocks must be at least 1");
    }
    if config.limits.max_layers == 0 {
        return invalid("limits.max_layers must be at least 1");
    }
    Ok(())
}

fn invalid(message: &str) -> Result<(), ConfigError> {
    Err(ConfigError::ValidationError(message.to_string()))
}
