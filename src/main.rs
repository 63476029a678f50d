use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event};
use grid_snake::config::{GameConfig, GridSize, SpeedPreset, THEMES, load_config};
use grid_snake::game::{GameState, TickOutcome};
use grid_snake::input::{DirectionLatch, GameInput, map_key_event};
use grid_snake::logging::init_file_logging;
use grid_snake::scene;
use grid_snake::terminal_runtime::TerminalSession;
use grid_snake::ticker::Ticker;
use grid_snake::ui::hud::HudInfo;
use tracing::{error, info};

/// Upper bound on time between redraws.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// How long the input thread blocks waiting for a terminal event.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug, Parser)]
#[command(version, about = "Grid snake in the terminal")]
struct Cli {
    /// Square grid side in cells.
    #[arg(long)]
    size: Option<u16>,

    /// Grid width in cells (overrides --size).
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells (overrides --size).
    #[arg(long)]
    height: Option<u16>,

    /// Starting tick speed.
    #[arg(long, value_enum)]
    speed: Option<SpeedPreset>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON game config; command-line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append logs to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let config = resolve_config(&cli)?;
    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(config, seed)?,
        None => GameState::new(config)?,
    };
    info!(
        width = config.grid.width,
        height = config.grid.height,
        tick_interval_ms = config.tick_interval_ms,
        seed = ?cli.seed,
        "starting session"
    );

    let mut session = TerminalSession::enter()?;
    let result = run(&mut session, state);
    drop(session);

    match &result {
        Ok(score) => info!(score, "session ended"),
        Err(err) => error!(error = %err, "session failed"),
    }
    result.map(|_| ())
}

fn resolve_config(cli: &Cli) -> io::Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };

    if let Some(side) = cli.size {
        config.grid = GridSize::square(side);
    }
    if let Some(width) = cli.width {
        config.grid.width = width;
    }
    if let Some(height) = cli.height {
        config.grid.height = height;
    }
    if let Some(speed) = cli.speed {
        config.tick_interval_ms = speed.interval_ms();
    }

    config.validate()?;
    Ok(config)
}

/// Runs the tick loop until the player quits; returns the last score.
fn run(session: &mut TerminalSession, mut state: GameState) -> io::Result<u32> {
    let latch = Arc::new(DirectionLatch::new());
    latch.guard(state.reverse_guard());
    let running = Arc::new(AtomicBool::new(true));
    let (sender, receiver) = mpsc::channel();
    let input_thread = spawn_input_thread(Arc::clone(&latch), sender, Arc::clone(&running))?;

    let result = tick_loop(session, &mut state, &latch, &receiver);

    running.store(false, Ordering::Release);
    match input_thread.join() {
        Ok(Ok(())) => {}
        Ok(Err(err)) => error!(error = %err, "input thread failed"),
        Err(_) => error!("input thread panicked"),
    }

    result.map(|()| state.score())
}

fn tick_loop(
    session: &mut TerminalSession,
    state: &mut GameState,
    latch: &DirectionLatch,
    receiver: &Receiver<GameInput>,
) -> io::Result<()> {
    let mut ticker = Ticker::new(state.config().tick_interval(), Instant::now());
    let mut theme_index = 0;

    loop {
        let hud = HudInfo {
            theme: &THEMES[theme_index],
            tick_interval_ms: u64::try_from(ticker.interval().as_millis()).unwrap_or(u64::MAX),
            paused: ticker.is_paused() && !state.is_over(),
        };
        session.draw(&scene::compose(state), &hud)?;

        let wait = ticker.time_until_next(Instant::now()).min(FRAME_INTERVAL);
        match receiver.recv_timeout(wait) {
            Ok(GameInput::Quit) => return Ok(()),
            Ok(GameInput::CycleTheme) => theme_index = (theme_index + 1) % THEMES.len(),
            Ok(input) => handle_control(state, &mut ticker, latch, input),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }

        if ticker.poll(Instant::now()) {
            if let Some(direction) = latch.take() {
                state.set_direction(direction);
            }
            latch.guard(state.reverse_guard());
            if let TickOutcome::GameOver(reason) = state.tick() {
                ticker.pause();
                info!(?reason, score = state.score(), "game over");
            }
        }
    }
}

fn handle_control(
    state: &mut GameState,
    ticker: &mut Ticker,
    latch: &DirectionLatch,
    input: GameInput,
) {
    match input {
        GameInput::Restart if state.is_over() => {
            // Steering pressed on the game-over screen must not leak into the new game.
            let _ = latch.take();
            state.apply_input(input);
            latch.guard(state.reverse_guard());
            ticker.resume(Instant::now());
            info!("game restarted");
        }
        GameInput::Pause if !state.is_over() => {
            if ticker.is_paused() {
                ticker.resume(Instant::now());
            } else {
                ticker.pause();
            }
        }
        GameInput::Faster => {
            ticker.faster();
            info!(interval = ?ticker.interval(), "speed up");
        }
        GameInput::Slower => {
            ticker.slower();
            info!(interval = ?ticker.interval(), "slow down");
        }
        GameInput::Speed(preset) => {
            ticker.set_interval(Duration::from_millis(preset.interval_ms()));
            info!(preset = preset.label(), "speed preset");
        }
        other => state.apply_input(other),
    }
}

/// Reads terminal events on a dedicated thread.
///
/// Directions go into the latch, which drops reversals of the guarded
/// heading and is drained right before each tick; every other input goes
/// over the channel.
fn spawn_input_thread(
    latch: Arc<DirectionLatch>,
    sender: Sender<GameInput>,
    running: Arc<AtomicBool>,
) -> io::Result<JoinHandle<io::Result<()>>> {
    thread::Builder::new()
        .name("input".to_owned())
        .spawn(move || -> io::Result<()> {
            while running.load(Ordering::Acquire) {
                if !event::poll(INPUT_POLL_INTERVAL)? {
                    continue;
                }
                let Event::Key(key) = event::read()? else {
                    continue;
                };

                match map_key_event(key) {
                    Some(GameInput::Direction(direction)) => {
                        latch.store(direction);
                    }
                    Some(input) => {
                        if sender.send(input).is_err() {
                            break;
                        }
                    }
                    None => {}
                }
            }
            Ok(())
        })
}
