//! Runner settings: command-line flags with environment fallbacks.

use std::env;
use std::path::PathBuf;

/// Table size used when neither a flag nor the environment sets one.
pub const DEFAULT_WIDTH: i32 = 20;
pub const DEFAULT_HEIGHT: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub width: i32,
    pub height: i32,
    pub log_path: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            log_path: None,
        }
    }
}

impl RunConfig {
    /// Read `TABLE_GAME_WIDTH`, `TABLE_GAME_HEIGHT` and `TABLE_GAME_LOG`.
    /// Unparsable or non-positive sizes fall back to the defaults.
    pub fn from_env() -> Self {
        let size = |key: &str, default: i32| {
            env::var(key)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .filter(|n: &i32| *n > 0)
                .unwrap_or(default)
        };

        let log_path = env::var("TABLE_GAME_LOG")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            width: size("TABLE_GAME_WIDTH", DEFAULT_WIDTH),
            height: size("TABLE_GAME_HEIGHT", DEFAULT_HEIGHT),
            log_path,
        }
    }

    /// Apply explicit overrides on top of this config.
    pub fn with_overrides(
        mut self,
        width: Option<i32>,
        height: Option<i32>,
        log_path: Option<PathBuf>,
    ) -> Self {
        if let Some(w) = width.filter(|w| *w > 0) {
            self.width = w;
        }
        if let Some(h) = height.filter(|h| *h > 0) {
            self.height = h;
        }
        if log_path.is_some() {
            self.log_path = log_path;
        }
        self
    }
}
