//! Shared library modules providing error types, path checks, and telemetry initialization.

pub mod errors;
pub mod fs;
pub mod telemetry;
