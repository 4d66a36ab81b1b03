mod audio;
mod input;
mod ui;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flip_birds::build_info;
use flip_birds::core::{FrameClock, GameConfig};
use flip_birds::game::{self, GameEvent, GameSession};
use flip_birds::media::{dispatch_effects, CinematicPlayer, ScriptedCinematic};
use input::InputResult;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::layout::Rect;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Environment variable holding the log filter (e.g. `debug`).
const LOG_ENV: &str = "FLIP_BIRDS_LOG";

/// Parsed command line.
#[derive(Debug, Default)]
struct Args {
    debug: bool,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = parse_args();
    init_logging();

    let mut config = match &args.config_path {
        Some(path) => GameConfig::load(path),
        None => GameConfig::load_or_default(),
    }
    .unwrap_or_else(|e| {
        eprintln!("{} (using defaults)", e);
        tracing::warn!(error = %e, "config rejected, using defaults");
        GameConfig::default()
    });
    if args.debug {
        config.allow_autopilot = true;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    tracing::info!(
        version = build_info::VERSION,
        commit = build_info::BUILD_COMMIT,
        debug = args.debug,
        seed = ?config.seed,
        "flip-birds starting"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, config, args.debug);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    result
}

/// The frame loop: input, tick, effects, draw.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: GameConfig,
    debug: bool,
) -> io::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let frame_budget = Duration::from_secs_f64(config.nominal_frame_ms / 1000.0);
    let mut clock = FrameClock::new(config.nominal_frame_ms, config.max_frame_steps);
    let mut cinematic = ScriptedCinematic::new(&config);

    let mut session = GameSession::new(config);
    let mut mixer = audio::open_mixer(&session.config, session.muted);

    let start = Instant::now();
    let mut pending: Vec<GameEvent> = Vec::new();
    let mut play_area = Rect::default();

    loop {
        let frame_start = Instant::now();
        let now_ms = start.elapsed().as_secs_f64() * 1000.0;

        if let Some(delta) = clock.advance(now_ms) {
            if let Some(event) = cinematic.poll(delta.elapsed_ms) {
                pending.push(event);
            }
            let effects = game::tick(&mut session, delta, &pending, &mut rng);
            pending.clear();
            dispatch_effects(&effects, mixer.as_mut(), &mut cinematic);
        }

        let snap = game::snapshot(&session);
        let clip = cinematic.current().map(|c| (c, cinematic.progress()));
        terminal.draw(|frame| {
            play_area = ui::draw_ui(
                frame,
                &snap,
                &session.config,
                clip,
                session.config.allow_autopilot,
            );
        })?;

        // Drain input until the frame budget is spent
        loop {
            let remaining = frame_budget.saturating_sub(frame_start.elapsed());
            if !event::poll(remaining)? {
                break;
            }
            let ev = event::read()?;
            match input::handle_event(&ev, play_area, &session.config, debug) {
                InputResult::Continue => {}
                InputResult::Quit => {
                    mixer.stop_music();
                    tracing::info!(best = session.best_score, "quit");
                    return Ok(());
                }
                // Skipping a running clip goes through the player so it
                // reports the completion exactly once
                InputResult::Game(GameEvent::Skip) if cinematic.current().is_some() => {
                    cinematic.skip();
                }
                InputResult::Game(event) => pending.push(event),
            }
        }
    }
}

/// Parse `std::env::args`. `--help` and `--version` exit immediately.
fn parse_args() -> Args {
    let raw: Vec<String> = std::env::args().collect();
    let mut args = Args::default();

    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "--debug" | "-d" => args.debug = true,
            "--seed" | "-s" => {
                let Some(value) = raw.get(i + 1) else {
                    usage_error("--seed needs a number");
                };
                match value.parse() {
                    Ok(seed) => args.seed = Some(seed),
                    Err(_) => usage_error(&format!("invalid seed '{}'", value)),
                }
                i += 1;
            }
            "--config" | "-c" => {
                let Some(value) = raw.get(i + 1) else {
                    usage_error("--config needs a path");
                };
                args.config_path = Some(PathBuf::from(value));
                i += 1;
            }
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => usage_error(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    args
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'flip-birds --help' for usage.");
    std::process::exit(1);
}

fn print_help() {
    println!("Flip-Birds - a bird-boy's search for love\n");
    println!("Usage: flip-birds [options]\n");
    println!("Options:");
    println!("  -d, --debug          Allow the autopilot toggle ([A] while playing)");
    println!("  -s, --seed <N>       Fixed seed for pipe gaps");
    println!("  -c, --config <PATH>  Load game settings from a JSON file");
    println!("  -v, --version        Show version information");
    println!("  -h, --help           Show this help message");
    println!();
    println!("Controls:");
    println!("  Space/Up/Enter/click  Flap");
    println!("  M or mute button      Toggle sound");
    println!("  S/Tab                 Skip cinematic");
    println!("  Q/Esc                 Quit");
    println!();
    println!("Set {}=debug to write a log file to the data directory.", LOG_ENV);
}

/// Install a file logger when `FLIP_BIRDS_LOG` is set. The terminal belongs
/// to the game, so nothing is ever written to stdout or stderr.
fn init_logging() {
    let Ok(filter) = std::env::var(LOG_ENV) else {
        return;
    };
    let Some(dirs) = directories::ProjectDirs::from("", "", "flip-birds") else {
        return;
    };
    let dir = dirs.data_dir();
    if std::fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(dir.join("flip-birds.log")) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
