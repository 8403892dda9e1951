//! Synthetic Feed Bands
//!
//! Plausible indoor ranges used to draw random live readings. These are not
//! validation limits.

/// CO2 band for synthetic readings (ppm).
pub const FEED_CO2_PPM: (f64, f64) = (400.0, 1_200.0);

/// PM1.0 band (µg/m³).
pub const FEED_PM10: (f64, f64) = (0.5, 25.0);

/// PM2.5 band (µg/m³).
pub const FEED_PM25: (f64, f64) = (1.0, 35.0);

/// VOC band (ppb).
pub const FEED_VOC_PPB: (f64, f64) = (50.0, 600.0);

/// Temperature band (°F).
pub const FEED_TEMP_F: (f64, f64) = (64.0, 80.0);

/// Relative humidity band (%).
pub const FEED_HUMIDITY_PCT: (f64, f64) = (25.0, 65.0);

/// Default number of samples kept in a live window.
pub const DEFAULT_LIVE_WINDOW: usize = 64;
