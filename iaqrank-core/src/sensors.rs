//! Sensor Catalog
//!
//! The six indoor air quality metrics the reference data covers, with the
//! unit, direction and valid input domain of each.
//!
//! ## Direction
//!
//! For pollutants (CO2, particulates, VOC) a lower reading is better, so a
//! reading's score is the complement of its percentile. For temperature and
//! humidity the historical percentile itself is read as the score; these are
//! the *reverse* metrics.
//!
//! ```rust
//! use iaqrank_core::sensors::SensorType;
//!
//! let co2: SensorType = "co2".parse()?;
//! assert_eq!(co2.unit(), "ppm");
//! assert!(!co2.is_reverse());
//! assert!(SensorType::Humidity.is_reverse());
//! # Ok::<(), iaqrank_core::IaqError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::sensors::*;
use crate::errors::{IaqError, IaqResult};
use crate::scoring::Direction;

/// One of the six sensor types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorType {
    /// Carbon dioxide
    Co2,
    /// Relative humidity
    Humidity,
    /// PM1.0 mass concentration
    Pm10,
    /// PM2.5 mass concentration
    Pm25,
    /// Air temperature
    Temperature,
    /// Volatile organic compounds
    Voc,
}

impl SensorType {
    /// Every sensor type, in key order
    pub const ALL: [SensorType; 6] = [
        SensorType::Co2,
        SensorType::Humidity,
        SensorType::Pm10,
        SensorType::Pm25,
        SensorType::Temperature,
        SensorType::Voc,
    ];

    /// Stable lowercase key (`co2`, `humidity`, ...)
    pub fn key(self) -> &'static str {
        match self {
            Self::Co2 => "co2",
            Self::Humidity => "humidity",
            Self::Pm10 => "pm10",
            Self::Pm25 => "pm25",
            Self::Temperature => "temperature",
            Self::Voc => "voc",
        }
    }

    /// Human-readable label used in verdict sentences
    pub fn label(self) -> &'static str {
        match self {
            Self::Co2 => "CO2",
            Self::Humidity => "humidity",
            Self::Pm10 => "PM1.0",
            Self::Pm25 => "PM2.5",
            Self::Temperature => "temperature",
            Self::Voc => "VOC",
        }
    }

    /// Measurement unit
    pub fn unit(self) -> &'static str {
        match self {
            Self::Co2 => "ppm",
            Self::Humidity => "%",
            Self::Pm10 | Self::Pm25 => "µg/m³",
            Self::Temperature => "°F",
            Self::Voc => "ppb",
        }
    }

    /// True when the raw percentile itself is the score
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::Temperature | Self::Humidity)
    }

    /// Scoring direction for this sensor
    pub fn direction(self) -> Direction {
        Direction::from_reverse(self.is_reverse())
    }

    /// Valid domain for a user-entered reading
    pub fn input_range(self) -> InputRange {
        match self {
            Self::Co2 => InputRange::new(CO2_INPUT_MIN_PPM, CO2_INPUT_MAX_PPM),
            Self::Humidity => InputRange::new(HUMIDITY_INPUT_MIN_PCT, HUMIDITY_INPUT_MAX_PCT),
            Self::Pm10 => InputRange::new(PM10_INPUT_MIN, PM10_INPUT_MAX),
            Self::Pm25 => InputRange::new(PM25_INPUT_MIN, PM25_INPUT_MAX),
            Self::Temperature => InputRange::new(TEMP_INPUT_MIN_F, TEMP_INPUT_MAX_F),
            Self::Voc => InputRange::new(VOC_INPUT_MIN_PPB, VOC_INPUT_MAX_PPB),
        }
    }

    /// Narrower domain used by the refined entry form.
    ///
    /// Only CO2 has one; the others fall back to [`input_range`](Self::input_range).
    pub fn refined_input_range(self) -> InputRange {
        match self {
            Self::Co2 => InputRange::new(CO2_REFINED_MIN_PPM, CO2_REFINED_MAX_PPM),
            other => other.input_range(),
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SensorType {
    type Err = IaqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "co2" => Ok(Self::Co2),
            "humidity" | "humi" | "hum" => Ok(Self::Humidity),
            "pm10" | "pm1.0" | "pm1" => Ok(Self::Pm10),
            "pm25" | "pm2.5" => Ok(Self::Pm25),
            "temperature" | "temp" => Ok(Self::Temperature),
            "voc" => Ok(Self::Voc),
            _ => Err(IaqError::UnknownSensor(s.to_string())),
        }
    }
}

/// Closed interval a user reading must fall in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputRange {
    /// Smallest accepted value
    pub min: f64,
    /// Largest accepted value
    pub max: f64,
}

impl InputRange {
    /// Create a range from its bounds
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True if `value` lies within the range
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Reject non-finite and out-of-domain readings
    pub fn check(&self, sensor: SensorType, value: f64) -> IaqResult<f64> {
        if !value.is_finite() {
            return Err(IaqError::invalid_input(format!(
                "{sensor} reading is not a finite number"
            )));
        }

        if !self.contains(value) {
            return Err(IaqError::OutOfRange {
                sensor,
                value,
                min: self.min,
                max: self.max,
            });
        }

        Ok(value)
    }
}

/// Parse a user-typed reading
///
/// Only non-numeric text is an error here; range checks are separate.
pub fn parse_reading(sensor: SensorType, text: &str) -> IaqResult<f64> {
    let value: f64 = text.trim().parse().map_err(|_| {
        IaqError::invalid_input(format!("{sensor} reading '{}' is not a number", text.trim()))
    })?;

    if !value.is_finite() {
        return Err(IaqError::invalid_input(format!(
            "{sensor} reading is not a finite number"
        )));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for sensor in SensorType::ALL {
            assert_eq!(sensor.key().parse::<SensorType>().unwrap(), sensor);
        }
        assert!(matches!(
            "radon".parse::<SensorType>(),
            Err(IaqError::UnknownSensor(_))
        ));
    }

    #[test]
    fn only_temperature_and_humidity_are_reverse() {
        let reverse: Vec<_> = SensorType::ALL
            .into_iter()
            .filter(|s| s.is_reverse())
            .collect();
        assert_eq!(reverse, vec![SensorType::Humidity, SensorType::Temperature]);
    }

    #[test]
    fn input_ranges() {
        let co2 = SensorType::Co2.input_range();
        assert!(co2.check(SensorType::Co2, 450.0).is_ok());
        assert!(matches!(
            co2.check(SensorType::Co2, 0.5),
            Err(IaqError::OutOfRange { .. })
        ));

        let refined = SensorType::Co2.refined_input_range();
        assert!(!refined.contains(250.0));
        assert!(refined.contains(300.0));
        assert_eq!(
            SensorType::Voc.refined_input_range(),
            SensorType::Voc.input_range()
        );

        let temp = SensorType::Temperature.input_range();
        assert!(temp.contains(-60.0));
        assert!(temp.contains(160.0));
        assert!(matches!(
            temp.check(SensorType::Temperature, f64::NAN),
            Err(IaqError::InvalidInput { .. })
        ));
    }

    #[test]
    fn parse_rejects_text() {
        assert_eq!(parse_reading(SensorType::Voc, " 120.5 ").unwrap(), 120.5);
        assert!(matches!(
            parse_reading(SensorType::Voc, "high"),
            Err(IaqError::InvalidInput { .. })
        ));
        assert!(parse_reading(SensorType::Voc, "inf").is_err());
    }

    #[test]
    fn serde_uses_keys() {
        let json = serde_json::to_string(&SensorType::Pm25).unwrap();
        assert_eq!(json, "\"pm25\"");
    }
}
