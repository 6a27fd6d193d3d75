//! Logging setup and configuration discovery shared by the subcommands.

use std::path::{Path, PathBuf};

use strata_config::{load_config_file, StrataConfig, CONFIG_FILE_NAME};

use crate::GlobalArgs;

/// Installs the global logger on stderr.
///
/// `--quiet` limits output to errors, `--verbose` enables debug output.
/// `RUST_LOG` overrides both.
pub fn init_logging(global: &GlobalArgs) {
    let env = env_logger::Env::default().default_filter_or(log_level(global));
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

/// Default log filter for the global flags.
pub fn log_level(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        "info"
    }
}

/// Resolves which configuration file to read.
///
/// An explicit path may name a file or a directory holding `strata.toml`.
/// Without one, `strata.toml` in `cwd` is used if present; otherwise `None`,
/// meaning built-in defaults.
pub fn resolve_config_path(explicit: Option<&str>, cwd: &Path) -> Option<PathBuf> {
    match explicit {
        Some(path) => {
            let p = PathBuf::from(path);
            if p.is_dir() {
                Some(p.join(CONFIG_FILE_NAME))
            } else {
                Some(p)
            }
        }
        None => {
            let candidate = cwd.join(CONFIG_FILE_NAME);
            candidate.is_file().then_some(candidate)
        }
    }
}

/// Loads the configuration selected by `explicit` (or the current directory).
pub fn load_settings(explicit: Option<&str>) -> Result<StrataConfig, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    match resolve_config_path(explicit, &cwd) {
        Some(path) => {
            log::debug!("loading configuration from {}", path.display());
            Ok(load_config_file(&path)?)
        }
        None => {
            log::debug!("no {CONFIG_FILE_NAME} found, using defaults");
            Ok(StrataConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn global(quiet: bool, verbose: bool) -> GlobalArgs {
        GlobalArgs {
            quiet,
            verbose,
            config: None,
        }
    }

    #[test]
    fn log_levels() {
        assert_eq!(log_level(&global(false, false)), "info");
        assert_eq!(log_level(&global(true, false)), "error");
        assert_eq!(log_level(&global(false, true)), "debug");
        assert_eq!(log_level(&global(true, true)), "error");
    }

    #[test]
    fn explicit_file_is_used_as_is() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("custom.toml");
        fs::write(&file, "").unwrap();
        let resolved = resolve_config_path(file.to_str(), tmp.path());
        assert_eq!(resolved, Some(file));
    }

    #[test]
    fn explicit_dir_points_at_strata_toml() {
        let tmp = TempDir::new().unwrap();
        let resolved = resolve_config_path(tmp.path().to_str(), Path::new("/"));
        assert_eq!(resolved, Some(tmp.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn cwd_config_found_when_present() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(resolve_config_path(None, tmp.path()), None);

        fs::write(tmp.path().join(CONFIG_FILE_NAME), "[run]\nseed = 3\n").unwrap();
        assert_eq!(
            resolve_config_path(None, tmp.path()),
            Some(tmp.path().join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn load_explicit_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "[run]\nchains = 2\n").unwrap();
        let config = load_settings(tmp.path().to_str()).unwrap();
        assert_eq!(config.run.chains, 2);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(load_settings(missing.to_str()).is_err());
    }
}
