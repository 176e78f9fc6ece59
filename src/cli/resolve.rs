//! Two-phase launch argument resolution: command line first, then properties.
use tracing::{debug, trace};

use super::{
    args::{classify, value_of, TokenKind},
    profile::{PendingConfiguration, ResolvedConfiguration},
};
use crate::{
    config::{PropertySnapshot, PropertyTarget, RECOGNIZED_PROPERTIES},
    lib::errors::ArgumentError,
};

/// Resolve the launch configuration from `args` and a captured property snapshot.
///
/// The first violation aborts resolution; no partially built configuration is
/// ever returned.
pub fn resolve<I>(
    args: I,
    properties: &PropertySnapshot,
) -> Result<ResolvedConfiguration, ArgumentError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let pending = parse_arguments(args, PendingConfiguration::default())?;
    let pending = overlay_properties(properties, pending)?;
    let resolved = pending.freeze();
    debug!(
        target: "uberjar_runtime::resolve",
        server_arguments = resolved.server_arguments().len(),
        "Launch arguments resolved"
    );
    Ok(resolved)
}

fn parse_arguments<I>(
    args: I,
    mut pending: PendingConfiguration,
) -> Result<PendingConfiguration, ArgumentError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    for arg in args {
        let token = arg.as_ref();
        let kind = classify(token);
        trace!(target: "uberjar_runtime::resolve", token, ?kind, "Classified argument");

        pending = match kind {
            TokenKind::Valued(option) => {
                // Duplicates are reported before a malformed value.
                pending.ensure_unset(option)?;
                pending.set_value(option, value_of(token)?)?
            }
            TokenKind::Flag(flag) => {
                let pending = pending.set_flag(flag)?;
                if flag.forwarded() {
                    pending.push_server_argument(token)
                } else {
                    pending
                }
            }
            TokenKind::Passthrough => pending.push_server_argument(token),
            TokenKind::Unknown => {
                return Err(ArgumentError::UnknownArgument {
                    argument: token.to_string(),
                })
            }
        };
    }
    Ok(pending)
}

fn overlay_properties(
    properties: &PropertySnapshot,
    mut pending: PendingConfiguration,
) -> Result<PendingConfiguration, ArgumentError> {
    for (name, target) in RECOGNIZED_PROPERTIES {
        let Some(value) = properties.get(name) else {
            continue;
        };
        trace!(target: "uberjar_runtime::resolve", property = name, "Applying property");

        pending = match target {
            PropertyTarget::Value(option) => pending.set_value(option, value)?,
            PropertyTarget::Flag(flag) => pending.set_flag(flag)?,
        };
    }
    Ok(pending)
}
