//! Severity bands for each engine reading.
//!
//! Temperature, pressure and RPM share one shape: a closed OK band, a
//! half-open warning band on each side of it, and CRITICAL for anything
//! else. Fuel only warns on the low side.

use crate::readings::Readings;
use crate::tags::Parameter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `[ok_min, ok_max]` is OK, `[warn_min, ok_min)` and `(ok_max, warn_max]`
/// warn, everything else is critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub ok_min: i32,
    pub ok_max: i32,
    pub warn_min: i32,
    pub warn_max: i32,
}

impl Band {
    pub fn severity(&self, value: i32) -> Severity {
        if self.ok_min <= value && value <= self.ok_max {
            Severity::Ok
        } else if (self.warn_min <= value && value < self.ok_min)
            || (self.ok_max < value && value <= self.warn_max)
        {
            Severity::Warning
        } else {
            Severity::Critical
        }
    }
}

/// Above `ok_above` is OK, `[warn_min, ok_above]` warns, below is critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowSideBand {
    pub ok_above: i32,
    pub warn_min: i32,
}

impl LowSideBand {
    pub fn severity(&self, value: i32) -> Severity {
        if value > self.ok_above {
            Severity::Ok
        } else if self.warn_min <= value {
            Severity::Warning
        } else {
            Severity::Critical
        }
    }
}

pub const TEMPERATURE_BAND: Band = Band {
    ok_min: 80,
    ok_max: 120,
    warn_min: 70,
    warn_max: 130,
};

pub const PRESSURE_BAND: Band = Band {
    ok_min: 40,
    ok_max: 80,
    warn_min: 30,
    warn_max: 90,
};

pub const RPM_BAND: Band = Band {
    ok_min: 1000,
    ok_max: 5000,
    warn_min: 800,
    warn_max: 5500,
};

pub const FUEL_BAND: LowSideBand = LowSideBand {
    ok_above: 20,
    warn_min: 10,
};

const _: () = assert!(TEMPERATURE_BAND.warn_min < TEMPERATURE_BAND.ok_min);
const _: () = assert!(TEMPERATURE_BAND.ok_min < TEMPERATURE_BAND.ok_max);
const _: () = assert!(TEMPERATURE_BAND.ok_max < TEMPERATURE_BAND.warn_max);
const _: () = assert!(PRESSURE_BAND.warn_min < PRESSURE_BAND.ok_min);
const _: () = assert!(PRESSURE_BAND.ok_min < PRESSURE_BAND.ok_max);
const _: () = assert!(PRESSURE_BAND.ok_max < PRESSURE_BAND.warn_max);
const _: () = assert!(RPM_BAND.warn_min < RPM_BAND.ok_min);
const _: () = assert!(RPM_BAND.ok_min < RPM_BAND.ok_max);
const _: () = assert!(RPM_BAND.ok_max < RPM_BAND.warn_max);
const _: () = assert!(FUEL_BAND.warn_min <= FUEL_BAND.ok_above);

impl Parameter {
    pub fn severity(self, value: i32) -> Severity {
        match self {
            Parameter::Temperature => TEMPERATURE_BAND.severity(value),
            Parameter::Pressure => PRESSURE_BAND.severity(value),
            Parameter::Rpm => RPM_BAND.severity(value),
            Parameter::Fuel => FUEL_BAND.severity(value),
        }
    }
}

/// Severity per parameter for one set of readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub temperature: Severity,
    pub pressure: Severity,
    pub rpm: Severity,
    pub fuel: Severity,
}

impl Classification {
    pub fn evaluate(readings: &Readings) -> Self {
        Self {
            temperature: Parameter::Temperature.severity(readings.temperature_c),
            pressure: Parameter::Pressure.severity(readings.pressure_psi),
            rpm: Parameter::Rpm.severity(readings.rpm),
            fuel: Parameter::Fuel.severity(readings.fuel_percent),
        }
    }

    pub fn get(&self, parameter: Parameter) -> Severity {
        match parameter {
            Parameter::Temperature => self.temperature,
            Parameter::Pressure => self.pressure,
            Parameter::Rpm => self.rpm,
            Parameter::Fuel => self.fuel,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Parameter, Severity)> + '_ {
        Parameter::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    pub fn worst(&self) -> Severity {
        self.iter()
            .map(|(_, severity)| severity)
            .max()
            .unwrap_or(Severity::Ok)
    }

    pub fn to_map(&self) -> BTreeMap<&'static str, Severity> {
        self.iter().map(|(p, s)| (p.tag().key, s)).collect()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (parameter, severity) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}:{}", parameter, severity)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp(value: i32) -> Severity {
        Parameter::Temperature.severity(value)
    }

    #[test]
    fn temperature_boundaries() {
        assert_eq!(temp(80), Severity::Ok);
        assert_eq!(temp(120), Severity::Ok);
        assert_eq!(temp(79), Severity::Warning);
        assert_eq!(temp(70), Severity::Warning);
        assert_eq!(temp(69), Severity::Critical);
        assert_eq!(temp(121), Severity::Warning);
        assert_eq!(temp(130), Severity::Warning);
        assert_eq!(temp(131), Severity::Critical);
        assert_eq!(temp(-40), Severity::Critical);
    }

    #[test]
    fn pressure_boundaries() {
        let p = |v| Parameter::Pressure.severity(v);
        assert_eq!(p(40), Severity::Ok);
        assert_eq!(p(80), Severity::Ok);
        assert_eq!(p(39), Severity::Warning);
        assert_eq!(p(30), Severity::Warning);
        assert_eq!(p(29), Severity::Critical);
        assert_eq!(p(81), Severity::Warning);
        assert_eq!(p(90), Severity::Warning);
        assert_eq!(p(91), Severity::Critical);
        assert_eq!(p(0), Severity::Critical);
    }

    #[test]
    fn rpm_boundaries() {
        let r = |v| Parameter::Rpm.severity(v);
        assert_eq!(r(1000), Severity::Ok);
        assert_eq!(r(5000), Severity::Ok);
        assert_eq!(r(999), Severity::Warning);
        assert_eq!(r(800), Severity::Warning);
        assert_eq!(r(799), Severity::Critical);
        assert_eq!(r(5001), Severity::Warning);
        assert_eq!(r(5500), Severity::Warning);
        assert_eq!(r(5501), Severity::Critical);
        assert_eq!(r(0), Severity::Critical);
    }

    #[test]
    fn fuel_only_warns_low() {
        let f = |v| Parameter::Fuel.severity(v);
        assert_eq!(f(21), Severity::Ok);
        assert_eq!(f(250), Severity::Ok);
        assert_eq!(f(20), Severity::Warning);
        assert_eq!(f(10), Severity::Warning);
        assert_eq!(f(9), Severity::Critical);
        assert_eq!(f(-1), Severity::Critical);
    }

    #[test]
    fn off_baseline_is_critical_except_fuel() {
        let c = Classification::evaluate(&Readings::default());
        assert_eq!(c.temperature, Severity::Critical);
        assert_eq!(c.pressure, Severity::Critical);
        assert_eq!(c.rpm, Severity::Critical);
        assert_eq!(c.fuel, Severity::Ok);
        assert_eq!(c.worst(), Severity::Critical);
    }

    #[test]
    fn idle_readings_are_all_ok() {
        let c = Classification::evaluate(&Readings::idle(100));
        assert!(c.iter().all(|(_, s)| s == Severity::Ok));
        assert_eq!(c.worst(), Severity::Ok);
    }

    #[test]
    fn map_and_summary_use_fixed_order() {
        let c = Classification::evaluate(&Readings::new(75, 85, 3000, 15));
        let map = c.to_map();
        assert_eq!(map["temperature"], Severity::Warning);
        assert_eq!(map["pressure"], Severity::Warning);
        assert_eq!(map["rpm"], Severity::Ok);
        assert_eq!(map["fuel"], Severity::Warning);
        assert_eq!(
            c.to_string(),
            "Temperature:WARNING, Pressure:WARNING, RPM:OK, Fuel:WARNING"
        );
    }
}
