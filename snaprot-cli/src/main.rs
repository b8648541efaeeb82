//! snaprot: create a tagged snapshot of a volume, then delete the oldest
//! tagged snapshots beyond the configured retention count.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use snaprot_clock::SystemClock;
use snaprot_cli::exit::{codes, exit_code};
use snaprot_cli::{config, execute_rotation, Cli, ConfigError};
use snaprot_log::Logger;
use snaprot_service::Ec2SnapshotService;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let raw = match config::load_config(&cli.config_file) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            config::print_config_example();
            return ExitCode::from(codes::CONFIG_ERROR as u8);
        }
    };

    // Relative log paths resolve against the configuration file's home.
    let config_dir = cli.config_file.parent().unwrap_or(Path::new("."));

    let logger = match config::build_logger(&raw, config_dir) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            config::print_config_example();
            return ExitCode::from(codes::CONFIG_ERROR as u8);
        }
    };

    let config = match raw.validate(config_dir) {
        Ok(config) => config,
        Err(err) => {
            logger.fatal(&err.to_string());
            match &err {
                ConfigError::MissingField(field) => eprintln!("ERROR: {} required.", field),
                other => eprintln!("ERROR: {}", other),
            }
            config::print_config_example();
            return ExitCode::from(codes::CONFIG_ERROR as u8);
        }
    };

    let service =
        Ec2SnapshotService::connect(&config.access_key, &config.secret_key, &config.region).await;
    let clock = SystemClock;

    match execute_rotation(&service, &clock, &logger, &config, cli.rotate_tag.as_deref()).await {
        Ok(_) => ExitCode::from(codes::SUCCESS as u8),
        Err(err) => {
            logger.fatal(&err.to_string());
            eprintln!("error: {}", err);
            ExitCode::from(exit_code(&err) as u8)
        }
    }
}
