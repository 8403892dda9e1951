//! Synthetic Live Feed
//!
//! Produces one random reading per sensor per tick, drawn uniformly from a
//! plausible indoor band. It exists to drive the live view; the values carry
//! no meaning and are never compared against reference data.
//!
//! ```rust
//! use chrono::Utc;
//! use iaqrank_core::buffer::LiveWindow;
//! use iaqrank_core::feed::SyntheticFeed;
//! use iaqrank_core::SensorType;
//!
//! let mut feed = SyntheticFeed::seeded(7);
//! let mut window: LiveWindow<16> = LiveWindow::new();
//! for _ in 0..20 {
//!     feed.tick(&mut window, Utc::now());
//! }
//! assert_eq!(window.len(), 16);
//! assert_eq!(window.series(SensorType::Co2).len(), 16);
//! ```

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::buffer::{LiveFrame, LiveWindow};
use crate::compare::ReadingSet;
use crate::constants::feed::*;
use crate::sensors::SensorType;

/// Band a synthetic reading is drawn from
pub fn feed_band(sensor: SensorType) -> (f64, f64) {
    match sensor {
        SensorType::Co2 => FEED_CO2_PPM,
        SensorType::Humidity => FEED_HUMIDITY_PCT,
        SensorType::Pm10 => FEED_PM10,
        SensorType::Pm25 => FEED_PM25,
        SensorType::Temperature => FEED_TEMP_F,
        SensorType::Voc => FEED_VOC_PPB,
    }
}

/// Random reading generator
pub struct SyntheticFeed {
    rng: StdRng,
    sensors: Vec<SensorType>,
}

impl Default for SyntheticFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticFeed {
    /// Feed seeded from the OS
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible feed
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            sensors: SensorType::ALL.to_vec(),
        }
    }

    /// Limit the feed to some sensors
    pub fn with_sensors(mut self, sensors: &[SensorType]) -> Self {
        self.sensors = sensors.to_vec();
        self
    }

    /// Draw one frame stamped `at`
    pub fn next_frame(&mut self, at: DateTime<Utc>) -> LiveFrame {
        let readings: ReadingSet = self
            .sensors
            .iter()
            .map(|&sensor| {
                let (lo, hi) = feed_band(sensor);
                (sensor, self.rng.gen_range(lo..=hi))
            })
            .collect();
        LiveFrame::new(at, readings)
    }

    /// Draw a frame and push it into `window`
    pub fn tick<const N: usize>(&mut self, window: &mut LiveWindow<N>, at: DateTime<Utc>) {
        let frame = self.next_frame(at);
        window.push(frame);
    }
}
