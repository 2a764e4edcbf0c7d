//! Event sink the engine reports into.
//!
//! The engine never logs on its own; every transition and classification
//! is described by an [`EngineEvent`] handed to the injected observer.

use crate::readings::{EngineSnapshot, Readings};
use crate::tags::Parameter;
use crate::thresholds::{Classification, Severity};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventLevel::Trace => "TRACE",
            EventLevel::Debug => "DEBUG",
            EventLevel::Info => "INFO",
            EventLevel::Warning => "WARNING",
            EventLevel::Error => "ERROR",
            EventLevel::Critical => "CRITICAL",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    Initialized,
    StartRequested,
    Started,
    InitialParameters,
    StartRejected,
    Stopped,
    UpdateRequested { requested: Readings },
    ReadingsUpdated,
    UpdateRejected,
    /// Resulting state after a transition, accepted or not.
    StateReport,
    ParameterClassified {
        parameter: Parameter,
        severity: Severity,
        value: i32,
    },
    ClassificationComplete { classification: Classification },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineEvent {
    pub level: EventLevel,
    #[serde(flatten)]
    pub kind: EventKind,
    pub message: String,
    pub snapshot: EngineSnapshot,
}

pub trait EngineObserver {
    fn on_event(&self, event: &EngineEvent);
}

impl<O: EngineObserver + ?Sized> EngineObserver for &O {
    fn on_event(&self, event: &EngineEvent) {
        (**self).on_event(event)
    }
}

impl<O: EngineObserver + ?Sized> EngineObserver for Box<O> {
    fn on_event(&self, event: &EngineEvent) {
        (**self).on_event(event)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl EngineObserver for NullObserver {
    fn on_event(&self, _event: &EngineEvent) {}
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: RefCell<Vec<EngineEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.borrow().clone()
    }

    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&EngineEvent) -> bool,
    {
        self.events.borrow().iter().filter(|e| predicate(e)).count()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EngineObserver for RecordingObserver {
    fn on_event(&self, event: &EngineEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl EngineObserver for LogObserver {
    fn on_event(&self, event: &EngineEvent) {
        match event.level {
            EventLevel::Trace => log::trace!("{}", event.message),
            EventLevel::Debug => log::debug!("{}", event.message),
            EventLevel::Info => log::info!("{}", event.message),
            EventLevel::Warning => log::warn!("{}", event.message),
            EventLevel::Error => log::error!("{}", event.message),
            // `log` stops at error.
            EventLevel::Critical => log::error!("CRITICAL: {}", event.message),
        }
    }
}
