use std::{ffi::OsString, process::ExitCode};

use anyhow::{anyhow, Error};
use serde::Serialize;

use crate::{
    cli::{resolve, ResolvedConfiguration},
    config::PropertySnapshot,
    lib::{
        errors::{ArgumentError, ErrorReport},
        telemetry::{self, ResolutionTelemetry},
    },
};

/// Generic failure status for errors without a dedicated exit code.
const FAILURE_EXIT_CODE: u8 = 1;

/// Bundles a runtime error message with an exit code and optional structured report.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: u8,
    report: Option<ErrorReport>,
}

impl RuntimeExit {
    pub fn structured(report: ErrorReport, exit_code: u8) -> Self {
        Self {
            message: report.message.clone(),
            exit_code,
            report: Some(report),
        }
    }

    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: FAILURE_EXIT_CODE,
            report: None,
        }
    }

    pub fn report(self) -> ExitCode {
        if let Some(report) = self.report {
            if let Ok(serialized) = serde_json::to_string(&report) {
                eprintln!("{serialized}");
            } else {
                eprintln!("{}", report.message);
            }
        } else {
            eprintln!("{}", self.message);
        }
        ExitCode::from(self.exit_code)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error_report(&self) -> Option<&ErrorReport> {
        self.report.as_ref()
    }
}

impl From<ArgumentError> for RuntimeExit {
    fn from(error: ArgumentError) -> Self {
        Self::structured(error.report(), error.descriptor().exit_code)
    }
}

/// Document handed to the launcher that actually starts the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub configuration: ResolvedConfiguration,
    pub launch_args: Vec<String>,
}

/// Convert raw process arguments into UTF-8 tokens, rejecting any that are not.
pub fn collect_args(args: impl IntoIterator<Item = OsString>) -> Result<Vec<String>, Error> {
    args.into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|raw| anyhow!("Argument {} is not valid UTF-8", raw.to_string_lossy()))
        })
        .collect()
}

/// Resolve launch arguments against the captured properties and build the launch plan.
pub fn prepare_launch<I>(args: I, properties: &PropertySnapshot) -> Result<LaunchPlan, RuntimeExit>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let configuration = resolve(args, properties).map_err(|error| {
        let exit = RuntimeExit::from(error);
        if let Some(report) = exit.error_report() {
            telemetry::emit_rejection(report);
        }
        exit
    })?;

    let launch_args = configuration.launch_args();
    telemetry::emit_resolution(&ResolutionTelemetry {
        server_dir: configuration.server_dir(),
        no_delete_server_dir: configuration.no_delete_server_dir(),
        external_server_config: configuration
            .external_server_config()
            .map(|path| path.display().to_string()),
        deployment: configuration
            .deployment()
            .map(|path| path.display().to_string()),
        cli_script: configuration
            .cli_script()
            .map(|path| path.display().to_string()),
        help: configuration.help(),
        version: configuration.version(),
        launch_args: &launch_args,
    });

    Ok(LaunchPlan {
        configuration,
        launch_args,
    })
}
