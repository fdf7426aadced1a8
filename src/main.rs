//! Terminal 2048 runner (default binary).
//!
//! `tui-2048 [play]` runs the interactive game using crossterm for input and the
//! framebuffer renderer from `tui_2048::term`. `tui-2048 resolve` runs a single
//! pure move over a JSON board and prints the result.

use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyEvent};
use log::{debug, info};

use tui_2048::config::{init_logging, AppConfig, LogSink};
use tui_2048::core::{InFlight, Phase, Session};
use tui_2048::input::{handle_key_event, is_press, should_quit};
use tui_2048::oracle::resolve_json;
use tui_2048::term::{FrameBuffer, GameView, SlideAnimation, TerminalRenderer, Viewport};
use tui_2048::types::{Direction, GameAction, TICK_MS};

#[derive(Debug, Parser)]
#[command(author, version, about = "2048 in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// RNG seed (overrides TWENTY48_SEED)
    #[arg(long, value_name = "N", global = true)]
    seed: Option<u64>,

    /// Slide animation length in milliseconds, 0 to disable (overrides TWENTY48_ANIM_MS)
    #[arg(long, value_name = "MS", global = true)]
    anim_ms: Option<u32>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play interactively (default)
    Play,
    /// Resolve one move over a JSON board and print the result as JSON
    Resolve {
        /// Board rows, e.g. '[[2,2,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]'
        #[arg(long, value_name = "JSON")]
        board: String,

        /// up, down, left or right
        #[arg(long, value_parser = parse_direction)]
        direction: Direction,
    },
}

fn parse_direction(s: &str) -> Result<Direction> {
    Direction::from_str(&s.to_ascii_lowercase())
        .ok_or_else(|| anyhow!("unknown direction {s:?} (expected up, down, left or right)"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env().with_overrides(cli.seed, cli.anim_ms);

    match cli.command.unwrap_or(Command::Play) {
        Command::Resolve { board, direction } => {
            init_logging(LogSink::Stderr)?;
            let out = resolve_json(&board, direction)?;
            println!("{}", serde_json::to_string(&out)?);
            Ok(())
        }
        Command::Play => {
            init_logging(LogSink::File(config.log_path.as_deref()))?;
            play(&config)
        }
    }
}

fn play(config: &AppConfig) -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let seed = config.seed_or_random();
    let mut session = Session::new(seed);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let tick = Duration::from_millis(TICK_MS as u64);

    loop {
        let viewport = term.viewport().unwrap_or(Viewport::new(80, 24));
        view.render_into(&session.snapshot(), viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        if !event::poll(tick)? {
            continue;
        }

        let key = match event::read()? {
            Event::Key(key) => key,
            Event::Resize(..) => {
                term.invalidate();
                continue;
            }
            _ => continue,
        };

        let direction = match key_step(&mut session, key) {
            Step::Quit => {
                info!("quit: score {}, {} move(s)", session.score(), session.moves());
                return Ok(());
            }
            Step::Idle => continue,
            Step::Slide(direction) => direction,
        };

        match session.in_flight(direction) {
            Ok(Some(flight)) => {
                if present(term, &view, &mut fb, flight, config.anim_ms)? == Flow::Quit {
                    return Ok(());
                }
            }
            // No-op slide; the session has already re-checked for game over.
            Ok(None) => {}
            Err(rejected) => debug!("input ignored: {rejected}"),
        }
    }
}

/// What the play loop does with one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Quit,
    Idle,
    Slide(Direction),
}

/// Quit keys always win. Before the first game any other key press starts it.
fn key_step(session: &mut Session, key: KeyEvent) -> Step {
    if should_quit(key) {
        return Step::Quit;
    }

    if session.phase() == Phase::NotStarted {
        if is_press(&key) {
            session.start();
        }
        return Step::Idle;
    }

    let Some(action) = handle_key_event(key) else {
        return Step::Idle;
    };

    match action {
        GameAction::Slide(dir) => Step::Slide(dir),
        GameAction::Assist => match session.assist() {
            Some(dir) => {
                debug!("helper suggests {}", dir.as_str());
                Step::Slide(dir)
            }
            None => Step::Idle,
        },
        GameAction::Restart => {
            if let Err(rejected) = session.restart() {
                debug!("restart ignored: {rejected}");
            }
            Step::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Animate an accepted move. Input that arrives meanwhile is dropped, except quit.
///
/// `flight` settles the session when it goes out of scope, including on `?`.
fn present(
    term: &mut TerminalRenderer,
    view: &GameView,
    fb: &mut FrameBuffer,
    flight: InFlight<'_>,
    anim_ms: u32,
) -> Result<Flow> {
    let snap = flight.session().snapshot();
    let mut anim = SlideAnimation::new(flight.transition(), anim_ms);
    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last = Instant::now();

    while !anim.is_done() {
        let viewport = term.viewport().unwrap_or(Viewport::new(80, 24));
        view.render_into_with_animation(&snap, Some(&anim), viewport, fb);
        term.draw_swap(fb)?;

        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) if should_quit(key) => return Ok(Flow::Quit),
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_millis().min(u32::MAX as u128) as u32;
        last = now;
        anim.advance(dt);
    }

    let phase = flight.finish();
    debug!("move presented, phase {:?}", phase);
    Ok(Flow::Continue)
}
