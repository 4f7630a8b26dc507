//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` events into [`crate::types::InputEvent`]s in grid-cell
//! coordinates. Terminals only report raw presses and pointer positions, so
//! key-press and the enter/leave/over/out pointer events are synthesised here.

pub mod map;

pub use table_game_types as types;

pub use map::{
    is_next_game, map_event, map_key, map_key_event, should_quit, Events, PointerTracker,
    MAX_EVENTS,
};
