//! Capture the process property snapshot consulted after the command line.
use std::{
    collections::{btree_map, BTreeMap},
    env,
    ffi::OsString,
    path::PathBuf,
};

use serde::Deserialize;
use tracing::{error, info};

use crate::{
    cli::args::{FlagOption, ValuedOption},
    lib::errors::PropertyError,
};

pub mod telemetry;

/// Environment variable naming an optional properties file.
pub const PROPERTIES_FILE_ENV: &str = "UBERJAR_PROPERTIES_FILE";
/// Environment variables with this prefix are translated into properties.
pub const ENV_PREFIX: &str = "UBERJAR_";
/// Namespace shared by every recognized property name.
pub const PROPERTY_NAMESPACE: &str = "uberjar";

pub const EXTERNAL_SERVER_CONFIG_PROP: &str = "uberjar.external-server-config";
pub const DEPLOYMENT_PROP: &str = "uberjar.deployment";
pub const CLI_SCRIPT_PROP: &str = "uberjar.cli-script";
pub const SERVER_DIR_PROP: &str = "uberjar.server-dir";
pub const NO_DELETE_SERVER_DIR_PROP: &str = "uberjar.no-delete-server-dir";

/// Field a recognized property assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyTarget {
    Value(ValuedOption),
    /// Set by presence; the property value is ignored.
    Flag(FlagOption),
}

/// Recognized properties in the order they are applied.
pub const RECOGNIZED_PROPERTIES: [(&str, PropertyTarget); 5] = [
    (
        EXTERNAL_SERVER_CONFIG_PROP,
        PropertyTarget::Value(ValuedOption::ExternalServerConfig),
    ),
    (DEPLOYMENT_PROP, PropertyTarget::Value(ValuedOption::Deployment)),
    (CLI_SCRIPT_PROP, PropertyTarget::Value(ValuedOption::CliScript)),
    (SERVER_DIR_PROP, PropertyTarget::Value(ValuedOption::ServerDir)),
    (
        NO_DELETE_SERVER_DIR_PROP,
        PropertyTarget::Flag(FlagOption::NoDeleteServerDir),
    ),
];

/// Read-only snapshot of named configuration properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySnapshot {
    entries: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPropertiesFile {
    #[serde(default)]
    uberjar: BTreeMap<String, String>,
}

impl PropertySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.entries.iter()
    }

    /// Entries of `overlay` replace same-named entries of `self`.
    pub fn overlaid_with(mut self, overlay: PropertySnapshot) -> Self {
        self.entries.extend(overlay.entries);
        self
    }

    /// Translate `UBERJAR_SERVER_DIR=/x` style variables into `uberjar.server-dir=/x`.
    pub fn from_env_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self::from_pairs(vars.into_iter().filter_map(|(key, value)| {
            if key == PROPERTIES_FILE_ENV {
                return None;
            }
            let suffix = key.strip_prefix(ENV_PREFIX)?;
            if suffix.is_empty() {
                return None;
            }
            let name = suffix.to_ascii_lowercase().replace('_', "-");
            Some((format!("{PROPERTY_NAMESPACE}.{name}"), value))
        }))
    }

    /// Like `from_env_vars`, but for raw OS strings.
    ///
    /// Variables outside the `UBERJAR_` prefix are skipped whatever their
    /// encoding; a prefixed variable whose name or value is not UTF-8 is an error.
    pub fn from_os_env_vars(
        vars: impl IntoIterator<Item = (OsString, OsString)>,
    ) -> Result<Self, PropertyError> {
        let mut translated = Vec::new();
        for (key, value) in vars {
            let lossy_key = key.to_string_lossy();
            if !lossy_key.starts_with(ENV_PREFIX) {
                continue;
            }
            let name = lossy_key.into_owned();
            let key = key
                .into_string()
                .map_err(|_| PropertyError::NonUnicodeEnv { name: name.clone() })?;
            let value = value
                .into_string()
                .map_err(|_| PropertyError::NonUnicodeEnv { name })?;
            translated.push((key, value));
        }
        Ok(Self::from_env_vars(translated))
    }

    /// Load the `[uberjar]` table of a properties file.
    pub fn load_file(path: PathBuf) -> Result<Self, PropertyError> {
        info!(
            target: "uberjar_runtime::config",
            path = %path.display(),
            "Starting properties file load"
        );

        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = PropertyError::from_read_error(path.clone(), err);
            error!(
                target: "uberjar_runtime::config",
                path = %path.display(),
                reason = %error,
                "Failed to read properties file"
            );
            error
        })?;

        let raw: RawPropertiesFile = document.try_deserialize().map_err(|err| {
            let error = PropertyError::from_parse_error(path.clone(), err);
            error!(
                target: "uberjar_runtime::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse properties file"
            );
            error
        })?;

        let snapshot = Self::from_pairs(
            raw.uberjar
                .into_iter()
                .map(|(key, value)| (format!("{PROPERTY_NAMESPACE}.{key}"), value)),
        );
        telemetry::log_loaded(&path, &snapshot);
        Ok(snapshot)
    }

    /// Capture the process properties once: file (if configured), then environment.
    pub fn capture() -> Result<Self, PropertyError> {
        let file = match env::var_os(PROPERTIES_FILE_ENV) {
            Some(path) if !path.is_empty() => {
                let path = PathBuf::from(path);
                telemetry::log_file_source(Some(&path));
                Self::load_file(path)?
            }
            _ => {
                telemetry::log_file_source(None);
                Self::new()
            }
        };

        let from_env = Self::from_os_env_vars(env::vars_os())?;
        let snapshot = file.overlaid_with(from_env);
        telemetry::log_captured(&snapshot);
        Ok(snapshot)
    }
}
