mod catalog;
mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

use dogfight::config::{self, Viewport};
use dogfight::entities::Key;
use dogfight::stats::StatKind;
use dogfight::{GameEvent, World};

use crate::catalog::Catalog;

#[derive(Parser, Debug)]
#[command(name = "dogfight", about = "Side-scrolling arcade shooter in the terminal")]
struct Args {
    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Frame-rate cap
    #[arg(long, default_value_t = config::FPS)]
    fps: u32,

    /// Where log output goes (the terminal is the game screen)
    #[arg(long, default_value = "dogfight.log")]
    log_file: PathBuf,
}

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 8;

/// Keys the simulation understands, most recently pressed wins.
fn held_key(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Option<Key> {
    key_frame
        .iter()
        .filter(|(_, &last)| frame.saturating_sub(last) <= HOLD_WINDOW)
        .filter_map(|(code, &last)| map_key(code).map(|key| (last, key)))
        .max_by_key(|(last, _)| *last)
        .map(|(_, key)| key)
}

fn map_key(code: &KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Space),
        _ => None,
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> Result<MenuResult> {
    let mut help = false;
    display::render_menu(out, help)?;

    // Block until the user makes a choice
    loop {
        let Ok(event) = rx.recv() else {
            return Ok(MenuResult::Quit);
        };
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                modifiers,
                ..
            }) => match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('h') | KeyCode::Char('H') => {
                    help = !help;
                    display::render_menu(out, help)?;
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            },
            Event::Resize(..) => display::render_menu(out, help)?,
            _ => {}
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum Outcome {
    Quit,
    Restart,
}

/// Runs one game until the player quits or asks for a fresh one.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key; each frame the freshest live key is
/// handed to the world. Keys are dropped on release where the terminal
/// reports it and expire after `HOLD_WINDOW` frames otherwise.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    catalog: &Catalog,
    rx: &mpsc::Receiver<Event>,
    frame_time: Duration,
) -> Result<Outcome> {
    let started = Instant::now();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Esc => return Ok(Outcome::Quit),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(Outcome::Quit);
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') if world.is_game_over() => {
                            return Ok(Outcome::Quit);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if world.is_game_over() => {
                            return Ok(Outcome::Restart);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let key = held_key(&key_frame, frame);
        let now_ms = started.elapsed().as_millis() as u64;
        for event in world.step(key, now_ms) {
            match event {
                GameEvent::Sound { sound, looped } => catalog.play(sound, looped),
                GameEvent::PlayerDied => info!(
                    frame = world.frame(),
                    score = world.stats().get(StatKind::Score),
                    "game over"
                ),
                GameEvent::UfoWarning => info!("they've seen you"),
                _ => {}
            }
        }

        display::render(out, world, catalog)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file: {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn new_world(catalog: &mut Catalog, seed: Option<u64>) -> Result<World> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    World::new(catalog, rng, Viewport::default()).context("failed to build the world")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    // Load every asset before touching the terminal so a missing one
    // aborts with a readable message.
    let mut catalog = Catalog::new();
    new_world(&mut catalog, args.seed)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

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

    let result = run(&mut out, &rx, &mut catalog, &args);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    catalog: &mut Catalog,
    args: &Args,
) -> Result<()> {
    let frame_time = config::frame_duration(args.fps);

    if let MenuResult::Quit = show_menu(out, rx)? {
        return Ok(());
    }

    loop {
        let mut world = new_world(catalog, args.seed)?;
        info!(seed = ?args.seed, "new game");
        match game_loop(out, &mut world, catalog, rx, frame_time)? {
            Outcome::Quit => return Ok(()),
            Outcome::Restart => {}
        }
    }
}
