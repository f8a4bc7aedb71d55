//! Error types.  Everything in [`GameError`] is recoverable and only ever
//! shown to the player; [`CatalogError`] is the one fatal startup check.

use thiserror::Error;

use crate::entities::Tier;

/// Player-visible failures captured on `GameState::last_error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Input matched no enemy and no built-in command.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Already at root directory")]
    AlreadyAtRoot,

    /// `mv`/`cp` submitted without a destination argument.
    #[error("{0} requires a destination. Use a PATH variable like $TRASH")]
    MissingDestination(String),

    /// `$NAME` destination with no matching `export`.
    #[error("PATH variable {0} not found. Create it with: export {0}=/path")]
    UnknownPathVariable(String),
}

/// Misconfiguration of the static command catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Command catalog has no commands for tier {0:?}")]
    EmptyTier(Tier),
}

/// Errors that can occur when loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File exists but could not be read.
    #[error("Failed to read config '{path}': {details}")]
    Read { path: String, details: String },

    /// TOML parsing failed.
    #[error("Parse error in config '{path}': {details}")]
    Parse { path: String, details: String },
}
