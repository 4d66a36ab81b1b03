//! Headless flip-birds simulator CLI.
//!
//! Plays sessions with the autopilot through the full screen flow.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 100 steady-clock runs
//!   cargo run --bin simulate -- -n 500 -j 0.4  # 500 runs with frame jitter
//!   cargo run --bin simulate -- --seed 42      # Reproducible run

use flip_birds::core::GameConfig;
use flip_birds::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::Path;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              FLIP-BIRDS SIMULATOR                             ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Max Frames:     {}", config.max_frames_per_run);
    println!("  Frame Jitter:   {:.0}%", config.frame_jitter * 100.0);
    if config.stall_chance > 0.0 {
        println!("  Stall Chance:   {:.1}%", config.stall_chance * 100.0);
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    // Optionally save JSON report
    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => eprintln!("Failed to write JSON report: {}", e),
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-f" | "--frames" => {
                if i + 1 < args.len() {
                    config.max_frames_per_run = args[i + 1].parse().unwrap_or(20_000);
                    i += 1;
                }
            }
            "-j" | "--jitter" => {
                if i + 1 < args.len() {
                    config.frame_jitter = args[i + 1].parse().unwrap_or(0.0);
                    i += 1;
                }
            }
            "--stall" => {
                if i + 1 < args.len() {
                    config.stall_chance = args[i + 1].parse().unwrap_or(0.0);
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    match GameConfig::load(Path::new(&args[i + 1])) {
                        Ok(game) => config.game = game,
                        Err(e) => {
                            eprintln!("{}", e);
                            std::process::exit(1);
                        }
                    }
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig::quick();
            }
            "--stress" => {
                config = SimConfig::stress(config.num_runs);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Flip-Birds Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of sessions (default: 100)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -f, --frames <F>    Max frames per session (default: 20,000)");
    println!("    -j, --jitter <J>    Frame-time jitter fraction, 0.0-1.0");
    println!("    --stall <P>         Per-frame chance of a long stall");
    println!("    -c, --config <PATH> Game config JSON to play under");
    println!("    -v, --verbose       Per-run output");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick test (10 steady runs)");
    println!("    --stress            Heavy jitter plus stalls");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                    # Default run");
    println!("    cargo run --bin simulate -- -n 500 -j 0.4  # Jittered clock");
    println!("    cargo run --bin simulate -- --seed 42      # Reproducible");
    println!("    cargo run --bin simulate -- --stress -v    # Stress the dt clamp");
}
