//! Terminal front end for table games.
//!
//! The engine paints into an in-memory cell grid; this crate maps that grid into
//! a framebuffer of styled characters and flushes it to the terminal with
//! crossterm. Each grid cell is two columns wide to keep cells roughly square.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Only write changed runs of cells after the first frame
//! - Map terminal positions back to grid cells for pointer input

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use table_game_core as core;
pub use table_game_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameFrame, GameView, Layout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
