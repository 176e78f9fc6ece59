//! Telemetry initialization and structured resolution events.

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::lib::errors::ErrorReport;

/// Initialize `tracing` and format developer logs.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Payload for logging a successful resolution as structured telemetry.
#[derive(Debug, Serialize)]
pub struct ResolutionTelemetry<'a> {
    pub server_dir: Option<&'a str>,
    pub no_delete_server_dir: bool,
    pub external_server_config: Option<String>,
    pub deployment: Option<String>,
    pub cli_script: Option<String>,
    pub help: bool,
    pub version: bool,
    pub launch_args: &'a [String],
}

/// Emit the resolved launch configuration to `tracing`.
pub fn emit_resolution(telemetry: &ResolutionTelemetry<'_>) {
    info!(
        target: "uberjar_runtime::runtime",
        server_dir = telemetry.server_dir.unwrap_or(""),
        no_delete_server_dir = telemetry.no_delete_server_dir,
        external_server_config = telemetry.external_server_config.as_deref().unwrap_or(""),
        deployment = telemetry.deployment.as_deref().unwrap_or(""),
        cli_script = telemetry.cli_script.as_deref().unwrap_or(""),
        help = telemetry.help,
        version = telemetry.version,
        launch_args = ?telemetry.launch_args,
        "Resolved launch configuration"
    );
}

/// Emit a rejected resolution to `tracing`.
pub fn emit_rejection(report: &ErrorReport) {
    warn!(
        target: "uberjar_runtime::runtime",
        code = report.code,
        argument = %report.argument,
        reason = %report.message,
        "Rejected launch arguments"
    );
}
