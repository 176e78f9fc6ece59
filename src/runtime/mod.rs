//! Launch hand-off: resolve the real process inputs and report the outcome.
mod startup;

pub use startup::{collect_args, prepare_launch, LaunchPlan, RuntimeExit};
