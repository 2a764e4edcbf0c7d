use thiserror::Error;

/// A transition request the engine refused. State is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("cannot start engine: insufficient fuel ({fuel_percent}%)")]
    InsufficientFuel { fuel_percent: i32 },
    #[error("cannot update readings: engine is not running")]
    NotRunning,
}
