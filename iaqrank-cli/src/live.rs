//! `live` subcommand: a timed redraw over a synthetic feed.

use std::thread;
use std::time::Duration;

use chrono::Utc;
use clap::Args;
use iaqrank_core::constants::feed::DEFAULT_LIVE_WINDOW;
use iaqrank_core::feed::SyntheticFeed;
use iaqrank_core::buffer::LiveWindow;
use iaqrank_core::SensorType;

use crate::report::with_unit;

#[derive(Args)]
pub struct LiveArgs {
    /// Number of frames to draw
    #[arg(long, default_value_t = 10)]
    ticks: u32,

    /// Pause between frames
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

/// Mean of the samples in the window for `sensor`
fn window_mean<const N: usize>(window: &LiveWindow<N>, sensor: SensorType) -> Option<f64> {
    let series = window.series(sensor);
    if series.is_empty() {
        return None;
    }
    Some(series.iter().sum::<f64>() / series.len() as f64)
}

fn render_frame<const N: usize>(window: &LiveWindow<N>) -> String {
    let Some(frame) = window.latest() else {
        return String::new();
    };

    let mut out = format!(
        "{} ({}/{} samples)\n",
        frame.at.format("%H:%M:%S"),
        window.len(),
        window.capacity()
    );
    for (sensor, value) in frame.readings.iter() {
        let mean = window_mean(window, sensor).unwrap_or(value);
        out.push_str(&format!(
            "  {:<12} {:>12}   mean {:>12}\n",
            sensor.label(),
            with_unit((value * 10.0).round() / 10.0, sensor),
            with_unit((mean * 10.0).round() / 10.0, sensor),
        ));
    }
    out
}

pub fn run(args: &LiveArgs) {
    let mut feed = match args.seed {
        Some(seed) => SyntheticFeed::seeded(seed),
        None => SyntheticFeed::new(),
    };
    let mut window: LiveWindow<DEFAULT_LIVE_WINDOW> = LiveWindow::new();

    tracing::debug!(ticks = args.ticks, interval_ms = args.interval_ms, "starting live feed");
    for tick in 0..args.ticks {
        if tick > 0 {
            thread::sleep(Duration::from_millis(args.interval_ms));
        }
        feed.tick(&mut window, Utc::now());
        println!("{}", render_frame(&window));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iaqrank_core::buffer::LiveFrame;
    use iaqrank_core::ReadingSet;

    #[test]
    fn mean_over_window() {
        let mut window: LiveWindow<4> = LiveWindow::new();
        for v in [400.0, 600.0] {
            window.push(LiveFrame::new(Utc::now(), ReadingSet::new().with(SensorType::Co2, v)));
        }
        assert_eq!(window_mean(&window, SensorType::Co2), Some(500.0));
        assert_eq!(window_mean(&window, SensorType::Voc), None);
    }

    #[test]
    fn frame_lists_every_sensor() {
        let mut window: LiveWindow<8> = LiveWindow::new();
        SyntheticFeed::seeded(7).tick(&mut window, Utc::now());

        let text = render_frame(&window);
        assert!(text.contains("(1/8 samples)"));
        for sensor in SensorType::ALL {
            assert!(text.contains(sensor.label()), "missing {sensor}");
        }
    }

    #[test]
    fn empty_window_renders_nothing() {
        let window: LiveWindow<2> = LiveWindow::new();
        assert!(render_frame(&window).is_empty());
    }
}
