//! `strata check-config`: validate a configuration and print the resolved constants.

use crate::settings::load_settings;
use crate::GlobalArgs;

/// Runs the `strata check-config` command.
///
/// `path` takes precedence over `--config`. Invalid configurations surface as
/// errors (exit code 1). The resolved configuration is printed as TOML.
pub fn run(path: Option<&str>, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let explicit = path.or(global.config.as_deref());
    let config = load_settings(explicit)?;
    if !global.quiet {
        eprintln!("   Checked configuration: ok");
    }
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            config: None,
        }
    }

    #[test]
    fn valid_config_passes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("strata.toml");
        fs::write(&path, "[anneal]\ncooling_rate = 0.99\n").unwrap();
        assert_eq!(run(path.to_str(), &quiet()).unwrap(), 0);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("strata.toml");
        fs::write(&path, "[run]\nchains = 0\n").unwrap();
        let err = run(path.to_str(), &quiet()).unwrap_err();
        assert!(err.to_string().contains("chains"));
    }

    #[test]
    fn positional_path_beats_global_config() {
        let good = TempDir::new().unwrap();
        fs::write(good.path().join("strata.toml"), "").unwrap();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            config: Some("/nonexistent/strata.toml".to_string()),
        };
        assert_eq!(run(good.path().to_str(), &global).unwrap(), 0);
    }
}
