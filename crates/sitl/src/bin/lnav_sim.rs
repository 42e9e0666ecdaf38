//! Closed-loop LNAV simulation.
//!
//! Loads a scenario (or the built-in demo), flies it with the guidance
//! director in the loop and prints a summary.
//!
//! Usage:
//!   cargo run -p lnav_sitl --bin lnav_sim -- [OPTIONS]
//!
//! Options:
//!   -s, --scenario <PATH>  Scenario JSON file (default: built-in demo)
//!   -n, --steps <N>        Guidance cycles to run (default: 3000)
//!   --step-ms <MS>         Simulated time per cycle (default: 100)
//!   --rate <FACTOR>        Pace at FACTOR x real time (default: unpaced)
//!   --dump-demo            Print the demo scenario as JSON and exit

use std::env;
use std::process;

use lnav_core::mode::ModeSelector;
use lnav_core::navigation::distance_nm;
use lnav_core::route::FlightPlan;
use lnav_sitl::logging::init_logging;
use lnav_sitl::scenario::active_ident;
use lnav_sitl::{Scenario, TimeMode};
use tracing::error;

struct Args {
    scenario: Option<String>,
    steps: u64,
    step_ms: u64,
    rate: Option<f32>,
    dump_demo: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        scenario: None,
        steps: 3000,
        step_ms: 100,
        rate: None,
        dump_demo: false,
    };

    let raw: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "-s" | "--scenario" => {
                i += 1;
                args.scenario = Some(arg_value(&raw, i, "scenario").to_string());
            }
            "-n" | "--steps" => {
                i += 1;
                args.steps = parse_arg(&raw, i, "steps");
            }
            "--step-ms" => {
                i += 1;
                args.step_ms = parse_arg(&raw, i, "step-ms");
            }
            "--rate" => {
                i += 1;
                args.rate = Some(parse_arg(&raw, i, "rate"));
            }
            "--dump-demo" => args.dump_demo = true,
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if args.step_ms == 0 {
        eprintln!("Error: step-ms must be at least 1");
        process::exit(1);
    }

    args
}

fn arg_value<'a>(raw: &'a [String], i: usize, name: &str) -> &'a str {
    raw.get(i).map(String::as_str).unwrap_or_else(|| {
        eprintln!("Error: --{name} requires a value");
        process::exit(1);
    })
}

fn parse_arg<T: std::str::FromStr>(raw: &[String], i: usize, name: &str) -> T {
    arg_value(raw, i, name).parse().unwrap_or_else(|_| {
        eprintln!("Error: invalid value for --{name}");
        process::exit(1);
    })
}

fn print_usage() {
    eprintln!(
        "Usage: lnav_sim [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 -s, --scenario <PATH>  Scenario JSON file (default: built-in demo)\n\
         \x20 -n, --steps <N>        Guidance cycles to run (default: 3000)\n\
         \x20 --step-ms <MS>         Simulated time per cycle (default: 100)\n\
         \x20 --rate <FACTOR>        Pace at FACTOR x real time (default: unpaced)\n\
         \x20 --dump-demo            Print the demo scenario as JSON and exit\n\
         \x20 -h, --help             Show this help"
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = parse_args();

    if args.dump_demo {
        match Scenario::demo().to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        return;
    }

    if let Err(e) = init_logging() {
        eprintln!("Warning: logging not initialised: {e}");
    }

    let scenario = match &args.scenario {
        Some(path) => Scenario::from_file(path),
        None => Ok(Scenario::demo()),
    };
    let scenario = scenario.unwrap_or_else(|e| {
        error!(error = %e, "failed to load scenario");
        process::exit(1);
    });

    let mut bridge = scenario.build().unwrap_or_else(|e| {
        error!(error = %e, "failed to build scenario");
        process::exit(1);
    });

    let step_size_us = args.step_ms * 1000;
    bridge.set_time_mode(match args.rate {
        Some(factor) if step_size_us == lnav_sitl::bridge::DEFAULT_STEP_US => {
            TimeMode::Scaled { factor }
        }
        Some(_) => {
            eprintln!("Error: --rate runs at the default 100 ms step");
            process::exit(1);
        }
        None => TimeMode::Lockstep { step_size_us },
    });

    println!("=== lnav SITL: {} ===", scenario.name);
    println!(
        "Waypoints: {}, steps: {}, mode: {:?}",
        scenario.waypoints.len(),
        args.steps,
        bridge.time_mode()
    );
    println!();

    let summary = match bridge.run(args.steps).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "run failed");
            process::exit(1);
        }
    };

    let route = bridge.route();
    let position = bridge.aircraft().position();
    let to_active = route
        .waypoint(route.active_waypoint_index())
        .map(|wp| distance_nm(&position, &wp.position));

    println!("Simulated time:   {:.1} s", summary.sim_time_us as f64 / 1e6);
    println!("Sequences:        {:?}", summary.sequences);
    println!("Discontinuities:  {}", summary.discontinuities);
    println!("Max |XTK|:        {:.3} NM", summary.max_cross_track);
    println!(
        "Active waypoint:  {} ({}), {:.2} NM",
        active_ident(route),
        summary.final_waypoint,
        to_active.unwrap_or(f64::NAN)
    );
    println!("Guidance state:   {:?}", summary.final_state);
    println!("Lateral mode:     {}", bridge.modes().lateral_active().name());
}
