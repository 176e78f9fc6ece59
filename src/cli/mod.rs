//! Command-line launch arguments: token vocabulary, resolution, and the resolved profile.

pub mod args;
pub mod profile;
pub mod resolve;

pub use args::{classify, value_of, FlagOption, TokenKind, ValuedOption};
pub use profile::ResolvedConfiguration;
pub use resolve::resolve;
