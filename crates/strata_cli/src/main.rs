//! Strata CLI: the command-line front end of the multi-layer floorplan optimizer.
//!
//! Provides `strata optimize` for running one optimization request and
//! printing its JSON response, and `strata check-config` for validating a
//! `strata.toml` file.

#![warn(missing_docs)]

mod check;
mod optimize;
mod settings;

use std::process;

use clap::{Parser, Subcommand};

/// Strata: simulated-annealing placement for stacked floorplans.
#[derive(Parser, Debug)]
#[command(name = "strata", version, about = "Strata Floorplan Optimizer")]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a `strata.toml` file or a directory containing one.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Optimize a randomly generated floorplan and print the report.
    Optimize(OptimizeArgs),
    /// Validate a configuration file and print the resolved constants.
    CheckConfig {
        /// Configuration file or directory. Defaults to `--config`, then the
        /// current directory.
        path: Option<String>,
    },
}

/// Arguments for the `strata optimize` subcommand.
///
/// Explicit flags override the fields of `--request`.
#[derive(Parser, Debug, Default)]
pub struct OptimizeArgs {
    /// Number of blocks to place.
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub num_blocks: Option<i64>,

    /// Number of stacked layers.
    #[arg(short, long, allow_negative_numbers = true)]
    pub layers: Option<i64>,

    /// Connections generated per block.
    #[arg(short, long, allow_negative_numbers = true)]
    pub connections_per_block: Option<i64>,

    /// Side length of every layer.
    #[arg(short = 's', long, allow_negative_numbers = true)]
    pub floorplan_size: Option<i64>,

    /// JSON request file with any of the four parameters.
    #[arg(short, long)]
    pub request: Option<String>,

    /// Random seed; overrides `run.seed`.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Independent annealing chains; overrides `run.chains`.
    #[arg(long)]
    pub chains: Option<usize>,

    /// Write the response to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Emit single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file or directory.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    settings::init_logging(&global);

    let result = match cli.command {
        Command::Optimize(ref args) => optimize::run(args, &global),
        Command::CheckConfig { ref path } => check::run(path.as_deref(), &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_optimize_default() {
        let cli = Cli::parse_from(["strata", "optimize"]);
        match cli.command {
            Command::Optimize(ref args) => {
                assert!(args.num_blocks.is_none());
                assert!(args.layers.is_none());
                assert!(args.connections_per_block.is_none());
                assert!(args.floorplan_size.is_none());
                assert!(args.request.is_none());
                assert!(args.seed.is_none());
                assert!(args.chains.is_none());
                assert!(args.output.is_none());
                assert!(!args.compact);
            }
            _ => panic!("expected Optimize command"),
        }
    }

    #[test]
    fn parse_optimize_with_args() {
        let cli = Cli::parse_from([
            "strata",
            "optimize",
            "--num-blocks",
            "4",
            "--layers",
            "1",
            "--connections-per-block",
            "1",
            "--floorplan-size",
            "10",
            "--seed",
            "42",
            "--chains",
            "2",
            "--output",
            "out.json",
            "--compact",
        ]);
        match cli.command {
            Command::Optimize(ref args) => {
                assert_eq!(args.num_blocks, Some(4));
                assert_eq!(args.layers, Some(1));
                assert_eq!(args.connections_per_block, Some(1));
                assert_eq!(args.floorplan_size, Some(10));
                assert_eq!(args.seed, Some(42));
                assert_eq!(args.chains, Some(2));
                assert_eq!(args.output.as_deref(), Some("out.json"));
                assert!(args.compact);
            }
            _ => panic!("expected Optimize command"),
        }
    }

    #[test]
    fn parse_negative_parameters() {
        let cli = Cli::parse_from(["strata", "optimize", "--layers", "-1"]);
        match cli.command {
            Command::Optimize(ref args) => assert_eq!(args.layers, Some(-1)),
            _ => panic!("expected Optimize command"),
        }
    }

    #[test]
    fn parse_short_flags() {
        let cli = Cli::parse_from([
            "strata", "optimize", "-n", "6", "-l", "2", "-c", "2", "-s", "30",
        ]);
        match cli.command {
            Command::Optimize(ref args) => {
                assert_eq!(args.num_blocks, Some(6));
                assert_eq!(args.layers, Some(2));
                assert_eq!(args.connections_per_block, Some(2));
                assert_eq!(args.floorplan_size, Some(30));
            }
            _ => panic!("expected Optimize command"),
        }
    }

    #[test]
    fn parse_check_config() {
        let cli = Cli::parse_from(["strata", "check-config", "strata.toml"]);
        match cli.command {
            Command::CheckConfig { path } => assert_eq!(path.as_deref(), Some("strata.toml")),
            _ => panic!("expected CheckConfig command"),
        }

        let cli = Cli::parse_from(["strata", "check-config"]);
        match cli.command {
            Command::CheckConfig { path } => assert!(path.is_none()),
            _ => panic!("expected CheckConfig command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from([
            "strata",
            "--quiet",
            "--config",
            "/etc/strata.toml",
            "optimize",
        ]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("/etc/strata.toml"));
    }

    #[test]
    fn parse_verbose_after_subcommand() {
        let cli = Cli::parse_from(["strata", "optimize", "--verbose"]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }
}
