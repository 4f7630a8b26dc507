//! Table Game (workspace facade crate).
//!
//! Re-exports the workspace crates as `table_game::{core,input,term,types}` and
//! carries the runner configuration and the bundled demo games.

pub mod config;
pub mod demos;

pub use table_game_core as core;
pub use table_game_input as input;
pub use table_game_term as term;
pub use table_game_types as types;
