//! Recognized launch tokens and their classification.

use crate::lib::errors::ArgumentError;

pub const EXTERNAL_SERVER_CONFIG: &str = "--external-server-config";
pub const DEPLOYMENT: &str = "--deployment";
pub const CLI_SCRIPT: &str = "--cli-script";
pub const SERVER_DIR: &str = "--server-dir";
pub const NO_DELETE_SERVER_DIR: &str = "--no-delete-server-dir";
pub const VERSION: &str = "--version";
pub const SHORT_VERSION: &str = "-v";
pub const HELP: &str = "--help";
pub const SHORT_HELP: &str = "-h";

// Server process options forwarded without interpretation.
pub const PUBLIC_BIND_ADDRESS: &str = "-b";
pub const PROPERTIES: &str = "--properties";
pub const SHORT_PROPERTIES: &str = "-P";
pub const SECURITY_PROP: &str = "-S";
pub const SYS_PROP: &str = "-D";
pub const START_MODE: &str = "--start-mode";
pub const DEFAULT_MULTICAST_ADDRESS: &str = "-u";

/// Singular options written as `--option=value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValuedOption {
    ExternalServerConfig,
    Deployment,
    CliScript,
    ServerDir,
}

impl ValuedOption {
    pub const fn name(self) -> &'static str {
        match self {
            ValuedOption::ExternalServerConfig => EXTERNAL_SERVER_CONFIG,
            ValuedOption::Deployment => DEPLOYMENT,
            ValuedOption::CliScript => CLI_SCRIPT,
            ValuedOption::ServerDir => SERVER_DIR,
        }
    }
}

/// Singular boolean flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagOption {
    NoDeleteServerDir,
    Help,
    Version,
}

impl FlagOption {
    /// Long form, used when reporting duplicates regardless of the spelling given.
    pub const fn name(self) -> &'static str {
        match self {
            FlagOption::NoDeleteServerDir => NO_DELETE_SERVER_DIR,
            FlagOption::Help => HELP,
            FlagOption::Version => VERSION,
        }
    }

    /// Whether the token is also meaningful to the server process.
    pub const fn forwarded(self) -> bool {
        matches!(self, FlagOption::Version)
    }
}

/// Classification of one command-line token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Valued(ValuedOption),
    Flag(FlagOption),
    Passthrough,
    Unknown,
}

/// Prefix match order matters: the first matching prefix wins.
const VALUED_PREFIXES: [(&str, ValuedOption); 4] = [
    (EXTERNAL_SERVER_CONFIG, ValuedOption::ExternalServerConfig),
    (DEPLOYMENT, ValuedOption::Deployment),
    (CLI_SCRIPT, ValuedOption::CliScript),
    (SERVER_DIR, ValuedOption::ServerDir),
];

const PASSTHROUGH_PREFIXES: [&str; 5] = [
    PUBLIC_BIND_ADDRESS,
    SECURITY_PROP,
    SYS_PROP,
    START_MODE,
    DEFAULT_MULTICAST_ADDRESS,
];

const PASSTHROUGH_EXACT: [&str; 2] = [PROPERTIES, SHORT_PROPERTIES];

/// Classify a single token. Never fails; unrecognized tokens are `Unknown`.
pub fn classify(token: &str) -> TokenKind {
    if let Some((_, option)) = VALUED_PREFIXES
        .iter()
        .find(|(prefix, _)| token.starts_with(prefix))
    {
        return TokenKind::Valued(*option);
    }

    if token == NO_DELETE_SERVER_DIR {
        return TokenKind::Flag(FlagOption::NoDeleteServerDir);
    }

    if PASSTHROUGH_EXACT.contains(&token)
        || PASSTHROUGH_PREFIXES
            .iter()
            .any(|prefix| token.starts_with(prefix))
    {
        return TokenKind::Passthrough;
    }

    match token {
        VERSION | SHORT_VERSION => TokenKind::Flag(FlagOption::Version),
        HELP | SHORT_HELP => TokenKind::Flag(FlagOption::Help),
        _ => TokenKind::Unknown,
    }
}

/// Extract the value after the first `=` of a value-bearing token.
pub fn value_of(token: &str) -> Result<&str, ArgumentError> {
    match token.split_once('=') {
        Some((_, value)) if !value.is_empty() => Ok(value),
        _ => Err(ArgumentError::InvalidArgument {
            argument: token.to_string(),
        }),
    }
}
