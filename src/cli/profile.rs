//! Resolved launch configuration and the accumulator that builds it.
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::args::{FlagOption, ValuedOption};
use crate::lib::{errors::ArgumentError, fs::existing_path};

/// Resolved launch configuration. Immutable once returned by `resolve`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedConfiguration {
    server_dir: Option<String>,
    no_delete_server_dir: bool,
    cli_script: Option<PathBuf>,
    external_server_config: Option<PathBuf>,
    deployment: Option<PathBuf>,
    help: bool,
    version: bool,
    server_arguments: Vec<String>,
}

impl ResolvedConfiguration {
    pub fn server_dir(&self) -> Option<&str> {
        self.server_dir.as_deref()
    }

    pub fn no_delete_server_dir(&self) -> bool {
        self.no_delete_server_dir
    }

    pub fn cli_script(&self) -> Option<&Path> {
        self.cli_script.as_deref()
    }

    pub fn external_server_config(&self) -> Option<&Path> {
        self.external_server_config.as_deref()
    }

    pub fn deployment(&self) -> Option<&Path> {
        self.deployment.as_deref()
    }

    pub fn help(&self) -> bool {
        self.help
    }

    pub fn version(&self) -> bool {
        self.version
    }

    /// Tokens forwarded verbatim to the server process, in arrival order.
    pub fn server_arguments(&self) -> &[String] {
        &self.server_arguments
    }

    /// Build launch arguments suitable for reproduction/logging.
    ///
    /// The version flag is not emitted separately since its token already
    /// sits in `server_arguments`.
    ///
    /// An empty server directory (only reachable through the property overlay)
    /// is emitted as `--server-dir=`, which the command line rejects as
    /// `InvalidArgument`; such a configuration does not replay.
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        let valued = [
            (ValuedOption::ExternalServerConfig, self.external_server_config.as_deref()),
            (ValuedOption::Deployment, self.deployment.as_deref()),
            (ValuedOption::CliScript, self.cli_script.as_deref()),
            (ValuedOption::ServerDir, self.server_dir.as_deref().map(Path::new)),
        ];
        for (option, value) in valued {
            if let Some(value) = value {
                args.push(format!("{}={}", option.name(), value.display()));
            }
        }
        if self.no_delete_server_dir {
            args.push(FlagOption::NoDeleteServerDir.name().to_string());
        }
        if self.help {
            args.push(FlagOption::Help.name().to_string());
        }
        args.extend(self.server_arguments.iter().cloned());
        args
    }
}

/// Working record threaded by value through both resolution phases.
#[derive(Debug, Default)]
pub(crate) struct PendingConfiguration {
    server_dir: Option<String>,
    no_delete_server_dir: Option<bool>,
    cli_script: Option<PathBuf>,
    external_server_config: Option<PathBuf>,
    deployment: Option<PathBuf>,
    help: Option<bool>,
    version: Option<bool>,
    server_arguments: Vec<String>,
}

impl PendingConfiguration {
    /// Fail if `option` already holds a value from any earlier source.
    pub(crate) fn ensure_unset(&self, option: ValuedOption) -> Result<(), ArgumentError> {
        let is_set = match option {
            ValuedOption::ExternalServerConfig => self.external_server_config.is_some(),
            ValuedOption::Deployment => self.deployment.is_some(),
            ValuedOption::CliScript => self.cli_script.is_some(),
            ValuedOption::ServerDir => self.server_dir.is_some(),
        };
        if is_set {
            return Err(ArgumentError::DuplicateArgument {
                option: option.name(),
            });
        }
        Ok(())
    }

    pub(crate) fn set_value(
        mut self,
        option: ValuedOption,
        value: &str,
    ) -> Result<Self, ArgumentError> {
        self.ensure_unset(option)?;
        match option {
            ValuedOption::ExternalServerConfig => {
                self.external_server_config = Some(existing_path(value)?)
            }
            ValuedOption::Deployment => self.deployment = Some(existing_path(value)?),
            ValuedOption::CliScript => self.cli_script = Some(existing_path(value)?),
            ValuedOption::ServerDir => self.server_dir = Some(value.to_string()),
        }
        Ok(self)
    }

    pub(crate) fn set_flag(mut self, flag: FlagOption) -> Result<Self, ArgumentError> {
        let slot = match flag {
            FlagOption::NoDeleteServerDir => &mut self.no_delete_server_dir,
            FlagOption::Help => &mut self.help,
            FlagOption::Version => &mut self.version,
        };
        if slot.is_some() {
            return Err(ArgumentError::DuplicateArgument {
                option: flag.name(),
            });
        }
        *slot = Some(true);
        Ok(self)
    }

    pub(crate) fn push_server_argument(mut self, token: &str) -> Self {
        self.server_arguments.push(token.to_string());
        self
    }

    pub(crate) fn freeze(self) -> ResolvedConfiguration {
        ResolvedConfiguration {
            server_dir: self.server_dir,
            no_delete_server_dir: self.no_delete_server_dir.unwrap_or(false),
            cli_script: self.cli_script,
            external_server_config: self.external_server_config,
            deployment: self.deployment,
            help: self.help.unwrap_or(false),
            version: self.version.unwrap_or(false),
            server_arguments: self.server_arguments,
        }
    }
}
