use std::path::Path;

use tracing::{debug, info};

use super::{PropertySnapshot, ENV_PREFIX, PROPERTIES_FILE_ENV, RECOGNIZED_PROPERTIES};

pub fn log_file_source(path: Option<&Path>) {
    match path {
        Some(path) => info!(
            target: "uberjar_runtime::config",
            path = %path.display(),
            "Loading properties using UBERJAR_PROPERTIES_FILE environment variable"
        ),
        None => debug!(
            target: "uberjar_runtime::config",
            env = PROPERTIES_FILE_ENV,
            "UBERJAR_PROPERTIES_FILE not set; using environment properties only"
        ),
    }
}

pub fn log_loaded(path: &Path, snapshot: &PropertySnapshot) {
    info!(
        target: "uberjar_runtime::config",
        path = %path.display(),
        entries = snapshot.len(),
        "Properties file loaded successfully"
    );
}

pub fn log_captured(snapshot: &PropertySnapshot) {
    if snapshot.is_empty() {
        debug!(
            target: "uberjar_runtime::config",
            env_prefix = ENV_PREFIX,
            "Captured empty property snapshot"
        );
        return;
    }

    let recognized = snapshot
        .iter()
        .map(|(name, _)| name.as_str())
        .filter(|name| RECOGNIZED_PROPERTIES.iter().any(|(known, _)| known == name))
        .collect::<Vec<_>>();
    debug!(
        target: "uberjar_runtime::config",
        env_prefix = ENV_PREFIX,
        entries = snapshot.len(),
        recognized = ?recognized,
        "Captured property snapshot"
    );
}
