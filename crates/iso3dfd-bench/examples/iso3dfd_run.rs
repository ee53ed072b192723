//! Run the 256³ stress profile end to end and print the report.
//!
//! Demonstrates: build config → Session → warm-up + timed run → reference
//! verification → throughput banner.

use iso3dfd_bench::stress_profile;
use iso3dfd_engine::Session;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = stress_profile();
    println!("=== iso3dfd: {:?} ===\n", config.strategy);

    let session = match Session::new(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    match session.run() {
        Ok(report) => {
            println!("{}", report.perf);
            println!("Final {}", report.final_stats);
            if let Some(v) = &report.verification {
                println!(
                    "verification: {} (L2 {:.3e}, {} of {} points off)",
                    if v.has_error { "FAIL" } else { "OK" },
                    v.l2_norm,
                    v.mismatch_count,
                    v.compared
                );
            }
            if !report.passed() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("run failed: {e}");
            std::process::exit(2);
        }
    }
}
