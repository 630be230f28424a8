//! Configuration loader for environment variables and files.
//!
//! Responsibilities:
//! - Locate and read the shortcut overrides file.
//! - Provide a builder-pattern `ConfigLoader`.
//!
//! Does NOT handle:
//! - Persisting configuration changes back to disk (see `persistence`).
//!
//! Invariants / Assumptions:
//! - An explicit builder path takes precedence over `SHORTCUTS_CONFIG_PATH`,
//!   which takes precedence over the platform default.
//! - Overrides are validated before they are returned.

mod builder;
mod env;
mod error;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;
