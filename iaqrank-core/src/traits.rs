//! Core traits
//!
//! Where raw tables come from is not this crate's business. Loaders
//! implement [`TableSource`] and preparation pulls one table per sensor
//! through it.

use crate::errors::IaqResult;
use crate::sensors::SensorType;
use crate::table::RawTable;

/// Supplier of raw sensor tables
///
/// Errors should be reported as
/// [`IaqError::SourceUnavailable`](crate::IaqError::SourceUnavailable); they
/// only cost the affected sensor its reference data.
pub trait TableSource {
    /// Load the raw table for `sensor`
    fn load(&self, sensor: SensorType) -> IaqResult<RawTable>;
}

impl<T: TableSource + ?Sized> TableSource for &T {
    fn load(&self, sensor: SensorType) -> IaqResult<RawTable> {
        (**self).load(sensor)
    }
}

impl<T: TableSource + ?Sized> TableSource for Box<T> {
    fn load(&self, sensor: SensorType) -> IaqResult<RawTable> {
        (**self).load(sensor)
    }
}
