//! formwire - HTML form filling and parameter encoding
//!
//! Main entry point for the formwire CLI.

mod cli;
mod cmd_classify;
mod cmd_encode;

use std::path::Path;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use formwire_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};

use crate::cli::{Cli, Commands};
use crate::cmd_classify::handle_classify;
use crate::cmd_encode::handle_encode;

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    // RUST_LOG wins over the configured level
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level)
            .with_context(|| format!("Invalid log level '{}'", logging.level))?,
    };

    let file_layer = match &logging.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("formwire")
                .filename_suffix("log")
                .max_log_files(7)
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Keep the worker alive until exit so buffered lines get flushed
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    // Console output goes to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ConfigLoader::load_default().context("Failed to load default config")?,
    };
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging)?;

    let validation = ConfigValidator::validate(&config);
    for warning in &validation.warnings {
        warn!("{}: {}", warning.path, warning.message);
    }
    debug!("Using {} encoding profile by default", config.encoding.profile);

    match cli.command {
        Commands::Encode {
            form,
            form_index,
            profile,
            actions,
        } => {
            let profile = profile.unwrap_or(config.encoding.profile);
            handle_encode(&form, form_index, profile, &actions)
        }
        Commands::Classify { form } => handle_classify(&form),
        Commands::CheckConfig => {
            if validation.is_valid() {
                println!("Configuration OK ({} warnings)", validation.warnings.len());
                return Ok(());
            }
            for error in &validation.errors {
                println!("error: {}: {}", error.path, error.message);
            }
            bail!("configuration has {} errors", validation.errors.len())
        }
    }
}
