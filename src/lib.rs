//! # Connect Four
//!
//! A two-player Connect Four game with saved games and a replay validator
//! that rebuilds the full move-by-move history from the recorded columns.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, state machine
//! - [`replay`] — Replay validator, step records, and the audit-trail report
//! - [`storage`] — Saved-game blob and its file-backed store
//! - [`ui`] — Terminal UI: game view, game-over overlay, history view
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod replay;
pub mod storage;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;
