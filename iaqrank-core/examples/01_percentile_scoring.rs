//! Percentile Scoring Example
//!
//! Scores a handful of CO2 and humidity readings against small reference
//! samples and prints the verdicts.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run -p iaqrank-core --example 01_percentile_scoring
//! ```

use iaqrank_core::{
    score, score_with, Direction, PercentileKind, ReferenceDistribution, ScoreOptions, Verdict,
};

fn main() {
    println!("IAQRank Percentile Scoring Example");
    println!("==================================\n");

    let co2 = ReferenceDistribution::new([400.0, 450.0, 500.0, 550.0, 600.0]);
    println!("CO2 reference sample (ppm): {:?}\n", co2.sorted());

    for reading in [380.0, 420.0, 450.0, 575.0, 900.0] {
        match score(&co2, reading, Direction::LowerIsBetter) {
            Ok(s) => {
                let verdict = match s.verdict() {
                    Verdict::Better(p) => format!("better than {p:.0}% of buildings"),
                    Verdict::Worse(p) => format!("worse than {p:.0}% of buildings"),
                };
                println!(
                    "  {:>6.1} ppm  percentile {:>5.1}  score {:>5.1}  {}",
                    reading, s.percentile, s.score, verdict
                );
            }
            Err(e) => println!("  {reading}: {e}"),
        }
    }

    println!("\nSame tied reading under each percentile definition:");
    for kind in [
        PercentileKind::Strict,
        PercentileKind::Mean,
        PercentileKind::Rank,
        PercentileKind::Weak,
    ] {
        let options = ScoreOptions::default().with_kind(kind);
        if let Ok(s) = score_with(&co2, 450.0, Direction::LowerIsBetter, &options) {
            println!("  {:<7} percentile {:>5.1}", format!("{kind:?}"), s.percentile);
        }
    }

    let humidity = ReferenceDistribution::new([25.0, 30.0, 35.0, 40.0, 45.0, 50.0]);
    println!("\nHumidity is scored by its percentile directly:");
    for reading in [28.0, 47.0] {
        if let Ok(s) = score(&humidity, reading, Direction::HigherIsBetter) {
            println!("  {:>4.1}%  score {:>5.1}", reading, s.score);
        }
    }

    let empty = ReferenceDistribution::default();
    if let Err(e) = score(&empty, 10.0, Direction::LowerIsBetter) {
        println!("\nScoring against nothing: {e}");
    }
}
