//! Bounded Live Window
//!
//! ## Overview
//!
//! The live view shows the most recent readings of a simulated feed. The
//! window holding them is an explicit value owned by whoever drives the
//! feed and passed to whatever draws it; nothing here is global.
//!
//! Capacity is fixed at compile time. When full, pushing a frame evicts
//! the oldest one:
//!
//! ```text
//! LiveWindow<4>:  [f1, f2, f3, f4]  push f5  ->  [f2, f3, f4, f5]
//! ```
//!
//! Storage is a `heapless::HistoryBuffer`, so the window never reallocates.
//!
//! ```rust
//! use chrono::Utc;
//! use iaqrank_core::buffer::{LiveFrame, LiveWindow};
//! use iaqrank_core::{ReadingSet, SensorType};
//!
//! let mut window: LiveWindow<2> = LiveWindow::new();
//! for co2 in [410.0, 420.0, 430.0] {
//!     window.push(LiveFrame::new(Utc::now(), ReadingSet::new().with(SensorType::Co2, co2)));
//! }
//! assert_eq!(window.series(SensorType::Co2), vec![420.0, 430.0]);
//! ```

use chrono::{DateTime, Utc};
use heapless::HistoryBuffer;

use crate::compare::ReadingSet;
use crate::sensors::SensorType;

/// Readings captured at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct LiveFrame {
    /// Capture time
    pub at: DateTime<Utc>,
    /// One value per sensor present in the frame
    pub readings: ReadingSet,
}

impl LiveFrame {
    /// Create a frame
    pub fn new(at: DateTime<Utc>, readings: ReadingSet) -> Self {
        Self { at, readings }
    }
}

/// Most recent `N` live frames, oldest first
pub struct LiveWindow<const N: usize> {
    frames: HistoryBuffer<LiveFrame, N>,
}

impl<const N: usize> Default for LiveWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LiveWindow<N> {
    /// Create an empty window
    pub const fn new() -> Self {
        Self {
            frames: HistoryBuffer::new(),
        }
    }

    /// Append a frame, evicting the oldest when full
    pub fn push(&mut self, frame: LiveFrame) {
        self.frames.write(frame);
    }

    /// Newest frame
    pub fn latest(&self) -> Option<&LiveFrame> {
        self.frames.recent()
    }

    /// Frames from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &LiveFrame> {
        self.frames.oldest_ordered()
    }

    /// Values for one sensor, oldest first, skipping frames without it
    pub fn series(&self, sensor: SensorType) -> Vec<f64> {
        self.iter().filter_map(|f| f.readings.get(sensor)).collect()
    }

    /// Number of frames held
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True if no frames are held
    pub fn is_empty(&self) -> bool {
        self.frames.len() == 0
    }

    /// True once the oldest frame is being evicted on push
    pub fn is_full(&self) -> bool {
        self.frames.len() == N
    }

    /// Maximum number of frames
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Drop all frames
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn frame(second: u32, co2: f64) -> LiveFrame {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, second).unwrap();
        LiveFrame::new(at, ReadingSet::new().with(SensorType::Co2, co2))
    }

    #[test]
    fn evicts_oldest() {
        let mut window: LiveWindow<3> = LiveWindow::new();
        assert!(window.is_empty());
        assert!(window.latest().is_none());

        for (i, v) in [400.0, 410.0, 420.0, 430.0].into_iter().enumerate() {
            window.push(frame(i as u32, v));
        }

        assert!(window.is_full());
        assert_eq!(window.len(), 3);
        assert_eq!(window.series(SensorType::Co2), vec![410.0, 420.0, 430.0]);
        assert_eq!(window.latest().unwrap().readings.get(SensorType::Co2), Some(430.0));
    }

    #[test]
    fn series_skips_absent_sensor() {
        let mut window: LiveWindow<4> = LiveWindow::new();
        window.push(frame(0, 400.0));
        assert!(window.series(SensorType::Voc).is_empty());

        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.capacity(), 4);
    }
}
