mod display;

use std::fs::OpenOptions;
use std::io::{self, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bash_quest::clock::FrameClock;
use bash_quest::commands;
use bash_quest::compute::{advance, new_game, pause, restart, resume, spawn_enemy, start};
use bash_quest::config::GameConfig;
use bash_quest::entities::GameState;
use bash_quest::input::{complete_input, preview_input, process};

// ── Logging ──────────────────────────────────────────────────────────────────

/// The terminal is in raw alternate-screen mode, so logs go to a file.
fn init_logging(config: &GameConfig) -> io::Result<()> {
    if config.log_file.is_empty() {
        return Ok(());
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bash_quest=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── High-score persistence ────────────────────────────────────────────────────

fn high_score_path(config: &GameConfig) -> PathBuf {
    if let Some(path) = &config.high_score_file {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".bash_quest_score")
}

fn load_high_score(config: &GameConfig) -> u32 {
    std::fs::read_to_string(high_score_path(config))
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_high_score(config: &GameConfig, score: u32) {
    if let Err(e) = std::fs::write(high_score_path(config), score.to_string()) {
        warn!(error = %e, "could not save high score");
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Apply one key press to the state.  Returns `false` when the player quits.
fn handle_key(
    code: KeyCode,
    modifiers: KeyModifiers,
    state: &mut GameState,
    clock: &mut FrameClock,
    now_ms: f64,
    config: &GameConfig,
    rng: &mut impl rand::Rng,
) -> bool {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return false,
        KeyCode::Char('q' | 'Q') if !state.started || state.game_over => return false,
        KeyCode::Enter if !state.started => {
            *state = start(state);
            clock.reset(now_ms);
        }
        KeyCode::Enter if state.game_over => {
            *state = restart(config.tuning);
            clock.reset(now_ms);
        }
        KeyCode::Enter if state.is_running() => {
            let line = state.current_input.clone();
            *state = process(&line, state, rng);
        }
        KeyCode::Esc if state.started && !state.game_over => {
            if state.paused {
                *state = resume(state);
                clock.resume(now_ms);
            } else {
                *state = pause(state);
            }
        }
        KeyCode::Tab if state.is_running() => {
            *state = complete_input(state);
        }
        KeyCode::Backspace if state.is_running() => {
            let mut line = state.current_input.clone();
            line.pop();
            *state = preview_input(state, &line);
        }
        KeyCode::Char(c) if state.is_running() => {
            let mut line = state.current_input.clone();
            line.push(c);
            *state = preview_input(state, &line);
        }
        _ => {}
    }
    true
}

/// The external scheduler: drains input, advances the simulation, spawns
/// on the clock's intervals and paints, once per frame.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> io::Result<()> {
    let mut rng = thread_rng();
    let epoch = Instant::now();
    let now_ms = || epoch.elapsed().as_secs_f64() * 1000.0;
    let frame = Duration::from_millis(config.frame_ms.max(1));

    let mut high_score = load_high_score(config);
    // Best score before the current game, for the "new best" banner.
    let mut previous_best = high_score;
    let mut clock = FrameClock::new();
    let mut state = new_game(config.tuning);

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            if kind == KeyEventKind::Release {
                continue;
            }
            let was_over = state.game_over;
            if !handle_key(code, modifiers, &mut state, &mut clock, now_ms(), config, &mut rng) {
                return Ok(());
            }
            if was_over && !state.game_over {
                previous_best = high_score;
            }
        }

        // ── Simulate ──────────────────────────────────────────────────────────
        if state.is_running() {
            let tick = clock.tick(now_ms(), &state.tuning);
            state = advance(&state, tick.delta_ms);
            if tick.spawn_enemy && state.is_running() {
                state = spawn_enemy(&state, false, &mut rng);
            }
            if tick.spawn_boss && state.is_running() {
                state = spawn_enemy(&state, true, &mut rng);
            }
            if state.game_over && state.score > high_score {
                high_score = state.score;
                save_high_score(config, high_score);
            }
        }

        let (width, height) = terminal::size()?;
        display::render(out, &state, previous_best, width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    let config =
        GameConfig::load_default().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    init_logging(&config)?;
    commands::validate().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    info!(?config, "starting bash quest");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &rx, &config);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
