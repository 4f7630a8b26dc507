use thiserror::Error;

/// Errors surfaced by the engine API.
///
/// Lookups never fail (they return `None`) and callback panics are not caught,
/// so this only covers invalid arguments and malformed JSON input.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("tick interval must be greater than zero")]
    InvalidDelay,
    #[error("invalid options for {name:?}: {source}")]
    Options {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
