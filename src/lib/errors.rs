use std::path::PathBuf;

use config::ConfigError as ConfigLoaderError;
use serde::Serialize;
use thiserror::Error;

/// Failures that abort launch argument resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArgumentError {
    /// Command-line token matches none of the recognized forms.
    #[error("Unknown argument {argument}")]
    UnknownArgument { argument: String },
    /// Value-bearing option without a value after `=`.
    #[error("Invalid argument {argument}, no value provided")]
    InvalidArgument { argument: String },
    /// Singular option assigned a second time, from either source.
    #[error("Argument {option} already set")]
    DuplicateArgument { option: &'static str },
    /// Path-valued option pointing at nothing.
    #[error("File {path} doesn't exist")]
    FileNotFound { path: PathBuf },
}

impl ArgumentError {
    /// Static metadata for this failure kind.
    pub const fn descriptor(&self) -> &'static ErrorDescriptor {
        match self {
            ArgumentError::UnknownArgument { .. } => &UNKNOWN_ARGUMENT_ERROR,
            ArgumentError::InvalidArgument { .. } => &INVALID_ARGUMENT_ERROR,
            ArgumentError::DuplicateArgument { .. } => &DUPLICATE_ARGUMENT_ERROR,
            ArgumentError::FileNotFound { .. } => &FILE_NOT_FOUND_ERROR,
        }
    }

    /// The token, option name, or path the failure refers to.
    pub fn subject(&self) -> String {
        match self {
            ArgumentError::UnknownArgument { argument }
            | ArgumentError::InvalidArgument { argument } => argument.clone(),
            ArgumentError::DuplicateArgument { option } => (*option).to_string(),
            ArgumentError::FileNotFound { path } => path.display().to_string(),
        }
    }

    /// Build the serializable report shown to the operator.
    pub fn report(&self) -> ErrorReport {
        let descriptor = self.descriptor();
        ErrorReport {
            code: descriptor.code,
            message: self.to_string(),
            remediation: descriptor.remediation,
            argument: self.subject(),
        }
    }
}

/// Errors that can occur while capturing the property snapshot.
#[derive(Debug, Error)]
pub enum PropertyError {
    /// Failed to build (read) the properties file.
    #[error("Failed to read properties file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize the properties file.
    #[error("Failed to parse properties file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// A `UBERJAR_` environment variable whose name or value is not UTF-8.
    #[error("Environment variable {name} is not valid UTF-8")]
    NonUnicodeEnv { name: String },
}

impl PropertyError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Static metadata attached to each argument failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorDescriptor {
    /// Error code.
    pub code: &'static str,
    /// Recommended remediation.
    pub remediation: &'static str,
    /// Process exit status used by the launcher binary.
    pub exit_code: u8,
}

impl ErrorDescriptor {
    /// Simple constructor.
    pub const fn new(code: &'static str, remediation: &'static str, exit_code: u8) -> Self {
        Self {
            code,
            remediation,
            exit_code,
        }
    }
}

/// Structured error payload written to stderr on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub code: &'static str,
    pub message: String,
    pub remediation: &'static str,
    pub argument: String,
}

/// Exit status for malformed or conflicting command lines (`EX_USAGE`).
pub const USAGE_EXIT_CODE: u8 = 64;
/// Exit status for missing input files (`EX_NOINPUT`).
pub const NO_INPUT_EXIT_CODE: u8 = 66;

pub const UNKNOWN_ARGUMENT_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "UNKNOWN_ARGUMENT",
    "Remove the argument or use one of the supported launch options.",
    USAGE_EXIT_CODE,
);

pub const INVALID_ARGUMENT_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "INVALID_ARGUMENT",
    "Supply a value using the `--option=value` form.",
    USAGE_EXIT_CODE,
);

pub const DUPLICATE_ARGUMENT_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "DUPLICATE_ARGUMENT",
    "Set the option once, either on the command line or as a property, not both.",
    USAGE_EXIT_CODE,
);

pub const FILE_NOT_FOUND_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "FILE_NOT_FOUND",
    "Check the path; it must exist before the server is launched.",
    NO_INPUT_EXIT_CODE,
);
