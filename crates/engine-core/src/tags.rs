use crate::readings::Readings;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy)]
pub struct Tag {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
}

pub const TEMPERATURE: Tag = Tag {
    key: "temperature",
    label: "Temperature",
    unit: "°C",
};

pub const PRESSURE: Tag = Tag {
    key: "pressure",
    label: "Pressure",
    unit: " PSI",
};

pub const RPM: Tag = Tag {
    key: "rpm",
    label: "RPM",
    unit: "",
};

pub const FUEL: Tag = Tag {
    key: "fuel",
    label: "Fuel",
    unit: "%",
};

/// Identifies one of the four monitored readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Temperature,
    Pressure,
    Rpm,
    Fuel,
}

impl Parameter {
    /// Fixed reporting order.
    pub const ALL: [Parameter; 4] = [
        Parameter::Temperature,
        Parameter::Pressure,
        Parameter::Rpm,
        Parameter::Fuel,
    ];

    pub fn tag(self) -> &'static Tag {
        match self {
            Parameter::Temperature => &TEMPERATURE,
            Parameter::Pressure => &PRESSURE,
            Parameter::Rpm => &RPM,
            Parameter::Fuel => &FUEL,
        }
    }

    pub fn reading(self, readings: &Readings) -> i32 {
        match self {
            Parameter::Temperature => readings.temperature_c,
            Parameter::Pressure => readings.pressure_psi,
            Parameter::Rpm => readings.rpm,
            Parameter::Fuel => readings.fuel_percent,
        }
    }

    /// Reading rendered with its unit, e.g. `45 PSI`.
    pub fn format_value(self, value: i32) -> String {
        format!("{}{}", value, self.tag().unit)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().label)
    }
}
