use crate::error::EngineError;
use crate::observer::{EngineEvent, EngineObserver, EventKind, EventLevel, NullObserver};
use crate::readings::{EngineSnapshot, Readings, FULL_TANK_PERCENT};
use crate::thresholds::{Classification, Severity};
use std::fmt;

/// Monitored engine: four readings plus ON/OFF, reporting every transition
/// and classification to its observer.
pub struct EngineState<O: EngineObserver = NullObserver> {
    readings: Readings,
    running: bool,
    observer: O,
}

impl<O: EngineObserver> EngineState<O> {
    pub fn new(observer: O) -> Self {
        Self::with_fuel(observer, FULL_TANK_PERCENT)
    }

    /// Off baseline with a chosen fuel level.
    pub fn with_fuel(observer: O, fuel_percent: i32) -> Self {
        let engine = Self {
            readings: Readings::off(fuel_percent),
            running: false,
            observer,
        };
        engine.emit(
            EventLevel::Info,
            EventKind::Initialized,
            format!(
                "Engine initialized - {}, Status={}",
                engine.readings,
                engine.snapshot().status_label()
            ),
        );
        engine
    }

    pub fn start(&mut self) -> Result<(), EngineError> {
        self.emit(
            EventLevel::Debug,
            EventKind::StartRequested,
            format!(
                "State before start: Fuel={}%, Status={}",
                self.readings.fuel_percent,
                self.snapshot().status_label()
            ),
        );

        let result = if self.readings.fuel_percent > 0 {
            self.readings = Readings::idle(self.readings.fuel_percent);
            self.running = true;
            self.emit(
                EventLevel::Info,
                EventKind::Started,
                "Engine started".to_string(),
            );
            self.emit(
                EventLevel::Debug,
                EventKind::InitialParameters,
                format!(
                    "Initial parameters: RPM={}, Temp={}°C, Pressure={} PSI",
                    self.readings.rpm, self.readings.temperature_c, self.readings.pressure_psi
                ),
            );
            Ok(())
        } else {
            let err = EngineError::InsufficientFuel {
                fuel_percent: self.readings.fuel_percent,
            };
            self.emit(
                EventLevel::Error,
                EventKind::StartRejected,
                format!("Start rejected: {}", err),
            );
            Err(err)
        };

        self.report_state();
        result
    }

    pub fn stop(&mut self) {
        self.readings = Readings::off(self.readings.fuel_percent);
        self.running = false;
        self.emit(
            EventLevel::Info,
            EventKind::Stopped,
            "Engine stopped".to_string(),
        );
        self.report_state();
    }

    /// Overwrites all four readings verbatim. Only accepted while running.
    pub fn set_readings(&mut self, readings: Readings) -> Result<(), EngineError> {
        self.emit(
            EventLevel::Debug,
            EventKind::UpdateRequested {
                requested: readings,
            },
            format!(
                "Updating readings: Temp={}, Pressure={}, RPM={}, Fuel={}",
                readings.temperature_c, readings.pressure_psi, readings.rpm, readings.fuel_percent
            ),
        );

        let result = if self.running {
            self.readings = readings;
            self.emit(
                EventLevel::Info,
                EventKind::ReadingsUpdated,
                "Readings updated".to_string(),
            );
            Ok(())
        } else {
            let err = EngineError::NotRunning;
            self.emit(
                EventLevel::Warning,
                EventKind::UpdateRejected,
                format!("Update rejected: {}", err),
            );
            Err(err)
        };

        self.report_state();
        result
    }

    /// Classifies every reading. Does not change state.
    pub fn classify(&self) -> Classification {
        let classification = Classification::evaluate(&self.readings);

        for (parameter, severity) in classification.iter() {
            let value = parameter.reading(&self.readings);
            let shown = parameter.format_value(value);
            let (level, message) = match severity {
                Severity::Ok => (
                    EventLevel::Debug,
                    format!("{} within normal range: {}", parameter, shown),
                ),
                Severity::Warning => (
                    EventLevel::Warning,
                    format!("{} outside optimal range: {}", parameter, shown),
                ),
                Severity::Critical => (
                    EventLevel::Critical,
                    format!("{} at CRITICAL level: {}", parameter, shown),
                ),
            };
            self.emit(
                level,
                EventKind::ParameterClassified {
                    parameter,
                    severity,
                    value,
                },
                message,
            );
        }

        self.emit(
            EventLevel::Info,
            EventKind::ClassificationComplete { classification },
            format!("Status check complete - {}", classification),
        );
        classification
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn readings(&self) -> Readings {
        self.readings
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            readings: self.readings,
            running: self.running,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn describe(&self) -> String {
        self.to_string()
    }

    fn report_state(&self) {
        self.emit(
            EventLevel::Info,
            EventKind::StateReport,
            format!(
                "Current state - {}: {}",
                self.snapshot().status_label(),
                self.readings
            ),
        );
    }

    fn emit(&self, level: EventLevel, kind: EventKind, message: String) {
        self.observer.on_event(&EngineEvent {
            level,
            kind,
            message,
            snapshot: self.snapshot(),
        });
    }
}

impl Default for EngineState<NullObserver> {
    fn default() -> Self {
        Self::new(NullObserver)
    }
}

impl<O: EngineObserver> fmt::Display for EngineState<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Engine Status ===")?;
        writeln!(f, "Status: {}", self.snapshot().status_label())?;
        writeln!(f, "Temperature: {}°C", self.readings.temperature_c)?;
        writeln!(f, "Pressure: {} PSI", self.readings.pressure_psi)?;
        writeln!(f, "RPM: {}", self.readings.rpm)?;
        write!(f, "Fuel: {}%", self.readings.fuel_percent)
    }
}

impl<O: EngineObserver> fmt::Debug for EngineState<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineState")
            .field("readings", &self.readings)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}
