//! Valid Input Domains
//!
//! Bounds the input-collection boundary enforces before a reading reaches
//! the scorer. The scorer itself accepts any finite value.

// ===== CARBON DIOXIDE =====

/// Lowest CO2 reading accepted from a user (ppm).
pub const CO2_INPUT_MIN_PPM: f64 = 1.0;

/// Highest CO2 reading accepted from a user (ppm).
pub const CO2_INPUT_MAX_PPM: f64 = 10_000.0;

/// Refined CO2 domain (ppm).
///
/// Outdoor air sits near 400 ppm; occupied rooms rarely exceed 2000 ppm.
pub const CO2_REFINED_MIN_PPM: f64 = 300.0;
pub const CO2_REFINED_MAX_PPM: f64 = 2_000.0;

// ===== PARTICULATE MATTER =====

/// PM1.0 mass concentration bounds (µg/m³).
pub const PM10_INPUT_MIN: f64 = 0.01;
pub const PM10_INPUT_MAX: f64 = 10_000.0;

/// PM2.5 mass concentration bounds (µg/m³).
pub const PM25_INPUT_MIN: f64 = 0.01;
pub const PM25_INPUT_MAX: f64 = 10_000.0;

// ===== VOLATILE ORGANIC COMPOUNDS =====

/// VOC bounds (ppb).
pub const VOC_INPUT_MIN_PPB: f64 = 0.1;
pub const VOC_INPUT_MAX_PPB: f64 = 10_000.0;

// ===== TEMPERATURE =====

/// Temperature bounds (°F).
pub const TEMP_INPUT_MIN_F: f64 = -60.0;
pub const TEMP_INPUT_MAX_F: f64 = 160.0;

// ===== HUMIDITY =====

/// Relative humidity bounds (%).
pub const HUMIDITY_INPUT_MIN_PCT: f64 = 0.1;
pub const HUMIDITY_INPUT_MAX_PCT: f64 = 100.0;
