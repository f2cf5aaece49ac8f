//! Gateway configuration and logging setup
//!
//! Every flag can also be supplied through its environment variable.

use clap::{Parser, ValueEnum};
use matching_engine::EngineConfig;
use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
    /// Compact format (less verbose than pretty)
    Compact,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "gateway", about = "HTTP front door for the matching engine")]
pub struct GatewayConfig {
    /// Address the HTTP server listens on
    #[arg(long, env = "GATEWAY_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Log output format
    #[arg(long, env = "GATEWAY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Leave emptied price levels in the books instead of removing them
    #[arg(long, env = "GATEWAY_KEEP_EMPTY_LEVELS")]
    pub keep_empty_levels: bool,
}

impl GatewayConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            prune_empty_levels: !self.keep_empty_levels,
            ..EngineConfig::default()
        }
    }
}

/// Install the global tracing subscriber
///
/// The level comes from `RUST_LOG` (e.g. `info`, `matching_engine=debug,info`)
/// and defaults to `info`.
pub fn init_logging(service_name: &str, format: LogFormat) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(true),
            )
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .try_init()?,
        LogFormat::Compact => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().compact())
            .try_init()?,
    }

    tracing::info!(service = service_name, format = ?format, "Logging initialized");

    Ok(())
}
