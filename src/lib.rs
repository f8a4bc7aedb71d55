//! Core game-state engine for Bash Quest, a typing trainer where enemies
//! carry shell commands and the player destroys them by typing the command.
//!
//! Every state-affecting function takes the current [`entities::GameState`]
//! by reference and returns a new one.  Randomness is always injected as a
//! `rand::Rng` so callers control determinism.

pub mod clock;
pub mod commands;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod filesystem;
pub mod input;
pub mod particles;
pub mod spawner;
