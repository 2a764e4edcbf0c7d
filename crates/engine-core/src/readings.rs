use serde::{Deserialize, Serialize};
use std::fmt;

/// Off-state temperature, degrees Celsius.
pub const AMBIENT_TEMP_C: i32 = 27;
pub const FULL_TANK_PERCENT: i32 = 100;

pub const IDLE_RPM: i32 = 1000;
pub const IDLE_PRESSURE_PSI: i32 = 45;
pub const IDLE_TEMP_C: i32 = 85;

/// The four numeric engine readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readings {
    pub temperature_c: i32,
    pub pressure_psi: i32,
    pub rpm: i32,
    pub fuel_percent: i32,
}

impl Readings {
    pub const fn new(temperature_c: i32, pressure_psi: i32, rpm: i32, fuel_percent: i32) -> Self {
        Self {
            temperature_c,
            pressure_psi,
            rpm,
            fuel_percent,
        }
    }

    /// Off baseline with the given fuel level.
    pub const fn off(fuel_percent: i32) -> Self {
        Self::new(AMBIENT_TEMP_C, 0, 0, fuel_percent)
    }

    /// Values right after a successful start; fuel is carried over.
    pub const fn idle(fuel_percent: i32) -> Self {
        Self::new(IDLE_TEMP_C, IDLE_PRESSURE_PSI, IDLE_RPM, fuel_percent)
    }
}

impl Default for Readings {
    fn default() -> Self {
        Self::off(FULL_TANK_PERCENT)
    }
}

impl fmt::Display for Readings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Temp={}°C, Pressure={} PSI, RPM={}, Fuel={}%",
            self.temperature_c, self.pressure_psi, self.rpm, self.fuel_percent
        )
    }
}

/// Full copy of the engine state, attached to every observer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub readings: Readings,
    pub running: bool,
}

impl EngineSnapshot {
    pub fn status_label(&self) -> &'static str {
        if self.running {
            "ON"
        } else {
            "OFF"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_off_baseline_with_full_tank() {
        assert_eq!(Readings::default(), Readings::new(27, 0, 0, 100));
    }

    #[test]
    fn display_lists_units() {
        let text = Readings::new(100, 50, 2500, 80).to_string();
        assert_eq!(text, "Temp=100°C, Pressure=50 PSI, RPM=2500, Fuel=80%");
    }
}
