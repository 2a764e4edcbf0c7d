pub mod error;
pub mod observer;
pub mod readings;
pub mod state;
pub mod tags;
pub mod thresholds;

pub use error::EngineError;
pub use observer::{
    EngineEvent, EngineObserver, EventKind, EventLevel, LogObserver, NullObserver,
    RecordingObserver,
};
pub use readings::{EngineSnapshot, Readings};
pub use state::EngineState;
pub use tags::{Parameter, Tag};
pub use thresholds::{Classification, Severity};
