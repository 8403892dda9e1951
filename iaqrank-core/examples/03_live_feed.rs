//! Live Feed Example
//!
//! Drives the synthetic feed for a few ticks and prints the window after
//! each one.
//!
//! ```bash
//! cargo run -p iaqrank-core --example 03_live_feed
//! ```

use std::thread;
use std::time::Duration;

use chrono::Utc;
use iaqrank_core::buffer::LiveWindow;
use iaqrank_core::feed::SyntheticFeed;
use iaqrank_core::SensorType;

fn main() {
    let mut feed = SyntheticFeed::seeded(2024).with_sensors(&[SensorType::Co2, SensorType::Voc]);
    let mut window: LiveWindow<5> = LiveWindow::new();

    for tick in 1..=8 {
        feed.tick(&mut window, Utc::now());

        let co2: Vec<String> = window
            .series(SensorType::Co2)
            .iter()
            .map(|v| format!("{v:.0}"))
            .collect();
        println!("tick {tick}: co2 [{}] ({} of {})", co2.join(", "), window.len(), window.capacity());

        thread::sleep(Duration::from_millis(200));
    }
}
