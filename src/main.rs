//! Terminal table-game runner (default binary).
//!
//! Drives one engine in real time: every loop iteration renders the grid,
//! waits for input up to one frame, then advances the engine clock by the
//! wall-clock milliseconds that passed.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing_subscriber::EnvFilter;

use table_game::config::RunConfig;
use table_game::core::{Engine, Screen};
use table_game::demos::{seeded_rng, Demo};
use table_game::input::{is_next_game, map_event, should_quit, PointerTracker};
use table_game::term::{FrameBuffer, GameFrame, GameView, TerminalRenderer, Viewport};

const FRAME_MS: u64 = 16;

#[derive(Debug, Parser)]
#[command(name = "table-game", version, about = "Fixed-tick grid games in the terminal")]
struct Args {
    /// Game to start with (tab switches while running)
    #[arg(short, long, value_enum, default_value_t = Demo::PingPong)]
    game: Demo,

    /// Table width in cells [env: TABLE_GAME_WIDTH]
    #[arg(long)]
    width: Option<i32>,

    /// Table height in cells [env: TABLE_GAME_HEIGHT]
    #[arg(long)]
    height: Option<i32>,

    /// Write logs to this file [env: TABLE_GAME_LOG]
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed for game randomness
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = RunConfig::from_env().with_overrides(args.width, args.height, args.log_file.clone());
    init_logging(config.log_path.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &args, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        tracing::error!(error = %err, "runner failed");
    }
    result
}

/// Logs go to a file because the terminal is in raw mode. Without a path
/// there is no subscriber and logging is silent.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, args: &Args, config: &RunConfig) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = seeded_rng(seed);
    tracing::info!(seed, width = config.width, height = config.height, "runner start");

    let mut demo = args.game;
    let mut engine = Engine::new(demo.config(rng.clone()), Screen::new(config.width, config.height));
    engine.start();
    term.set_mouse_capture(engine.wants_pointer())?;

    let view = GameView::default();
    let mut pointer = PointerTracker::new();
    let mut fb = FrameBuffer::new(0, 0);
    let frame = Duration::from_millis(FRAME_MS);
    let mut last_advance = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let game_frame = GameFrame::from_engine(&engine)
            .with_title(demo.title())
            .with_hint(demo.hint());
        view.render_into(&game_frame, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next frame.
        let timeout = frame.saturating_sub(last_advance.elapsed());
        if event::poll(timeout)? {
            let ev = event::read()?;
            match &ev {
                Event::Key(key) if should_quit(*key) => return Ok(()),
                Event::Key(key) if is_next_game(*key) => {
                    demo = demo.next();
                    tracing::info!(game = demo.title(), "switching game");
                    engine.restart(demo.config(rng.clone()));
                    pointer = PointerTracker::new();
                    term.set_mouse_capture(engine.wants_pointer())?;
                    last_advance = Instant::now();
                    continue;
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }

            let (grid_w, grid_h) = (engine.width(), engine.height());
            let events = map_event(&ev, &mut pointer, |column, row| {
                view.cell_at(grid_w, grid_h, viewport, column, row)
            });
            for input in &events {
                engine.dispatch_input(input);
            }
        }

        // Whole milliseconds only; the remainder carries into the next frame.
        let ms = last_advance.elapsed().as_millis() as u64;
        if ms > 0 {
            last_advance += Duration::from_millis(ms);
            engine.advance(ms);
        }
    }
}
