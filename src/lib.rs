//! Library crate root re-exporting the launch argument resolver and its support modules.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod cli;
pub mod config;
pub mod runtime;

pub use cli::{resolve, ResolvedConfiguration};
pub use config::PropertySnapshot;
pub use lib::errors::ArgumentError;
