//! Core engine module - grid games on a fixed tick, with no I/O
//!
//! This crate holds everything a table-grid game needs except the terminal:
//! sprite registry, collision geometry, rasterisation into a cell grid, the
//! tick scheduler and the flash choreography. Time is a virtual millisecond
//! clock moved forward by the host, which makes every rule reproducible in
//! tests.
//!
//! # Module Structure
//!
//! - [`engine`]: the [`Engine`] instance and its [`EngineConfig`]
//! - [`geometry`]: overlap, polygon collision, approach direction and touching
//! - [`registry`]: ordered sprite registry and the globals map
//! - [`render`]: rectangle and polygon fills, sprite drawing
//! - [`screen`]: the [`GridRenderer`] seam and an in-memory [`Screen`]
//! - [`scheduler`]: tick timer, pause/delay state and one-shot timers
//! - [`flash`]: hide/show pulse plan for end-of-round feedback
//! - [`details`]: scoreboard values and their sink
//!
//! # Example
//!
//! ```
//! use table_game_core::{Engine, EngineConfig, Screen};
//! use table_game_core::types::SpriteOptions;
//!
//! let config = EngineConfig::new()
//!     .with_sprite("ball", SpriteOptions::new().at(0, 2).velocity(1, 0))
//!     .with_update(|e| {
//!         if let Some(ball) = e.sprite_mut("ball") {
//!             ball.x += ball.velocity_x;
//!         }
//!     });
//!
//! let mut engine = Engine::new(config, Screen::new(10, 5));
//! engine.start();
//!
//! // 20ms start-up wait, then one tick every 50ms.
//! engine.advance(20 + 3 * 50);
//! assert_eq!(engine.elapsed_ticks(), 3);
//! assert_eq!(engine.sprite("ball").map(|b| b.x), Some(3));
//! ```

pub mod details;
pub mod engine;
pub mod error;
pub mod flash;
pub mod geometry;
pub mod registry;
pub mod render;
pub mod scheduler;
pub mod screen;

pub use table_game_types as types;

// Re-export commonly used types for convenience
pub use details::{Details, DetailsSink};
pub use engine::{Engine, EngineConfig, Hook, InputHook, TimerCallback};
pub use error::{EngineError, Result};
pub use flash::{FlashPlan, FlashPosition, FlashStep};
pub use geometry::{approaching_from, colliding, colliding_polygons, overlaps, touching, Direction};
pub use registry::{Globals, SpriteRegistry};
pub use scheduler::{Fired, Scheduler, TimerId};
pub use screen::{CellPaint, GridRenderer, Screen};
