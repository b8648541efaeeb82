//! CLI plumbing for the `snaprot` binary.
//!
//! Argument parsing, configuration loading and validation, command
//! execution, and exit-code mapping. The binary in `main.rs` wires the
//! real collaborators (EC2 client, system clock, configured log sink)
//! into [`commands::execute_rotation`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod exit;

pub use cli::{parse_from, Cli, DEFAULT_CONFIG_FILE};
pub use commands::{execute_rotation, CommandError, RunSummary};
pub use config::{
    build_logger, load_config, print_config_example, ConfigError, RawConfig, SnapshotConfig,
    CONFIG_EXAMPLE,
};
