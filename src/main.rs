//! Entry point for the uberjar runtime launcher.
use std::{env, process::ExitCode};

use uberjar_runtime::{
    config::PropertySnapshot,
    lib::telemetry,
    runtime::{self, RuntimeExit},
};

fn main() -> ExitCode {
    match bootstrap() {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

fn bootstrap() -> Result<(), RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;
    let properties = PropertySnapshot::capture().map_err(RuntimeExit::from_error)?;
    let args = runtime::collect_args(env::args_os().skip(1)).map_err(RuntimeExit::from_error)?;

    let plan = runtime::prepare_launch(&args, &properties)?;
    let rendered = serde_json::to_string_pretty(&plan).map_err(RuntimeExit::from_error)?;
    println!("{rendered}");
    Ok(())
}
