#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a maze chase session in the terminal.

mod config;
mod script;

use std::{io, path::PathBuf, thread, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use maze_chase_core::{EndReason, Position};
use maze_chase_rendering::{Frame, RenderingBackend, WriterBackend};
use maze_chase_system_pursuit::Resolution;
use maze_chase_world::{query, Session, SessionHooks};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
    config::{ensure_run_ends, FileConfig},
    script::MoveScript,
};

/// Maze chase: eat every food cell before the pursuers catch you.
#[derive(Parser, Debug)]
#[command(name = "maze-chase")]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML file with session parameters; flags below take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Player input, one character per frame: U, D, L, R or `.` to keep heading
    #[arg(short, long, default_value = "")]
    moves: String,

    /// Simulated milliseconds advanced per frame
    #[arg(long, default_value = "120")]
    frame_ms: u64,

    /// Stop after this many frames even if the game is still running
    #[arg(long)]
    frames: Option<usize>,

    /// Seconds on the countdown
    #[arg(short, long)]
    time_limit: Option<u32>,

    /// Cap of the pursuer distance field
    #[arg(long)]
    max_distance: Option<u16>,

    /// How pursuers contesting the same cell are settled
    #[arg(short, long)]
    resolution: Option<ResolutionArg>,

    /// Sleep between frames and redraw in place
    #[arg(long)]
    realtime: bool,

    /// Print every frame instead of only the final one
    #[arg(long)]
    show_frames: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Pursuer conflict policies selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ResolutionArg {
    /// Resolve in index order against already committed moves.
    Sequential,
    /// Resolve against the positions every pursuer held before the tick.
    Simultaneous,
}

impl From<ResolutionArg> for Resolution {
    fn from(value: ResolutionArg) -> Self {
        match value {
            ResolutionArg::Sequential => Self::Sequential,
            ResolutionArg::Simultaneous => Self::Simultaneous,
        }
    }
}

/// Logs the moments a player would hear a sound for.
#[derive(Debug, Default)]
struct Announcer {
    ended: Option<EndReason>,
}

impl SessionHooks for Announcer {
    fn food_consumed(&mut self, cell: Position) {
        debug!(%cell, "food eaten");
    }

    fn time_remaining(&mut self, seconds: u32) {
        debug!(seconds, "countdown");
    }

    fn game_ended(&mut self, reason: EndReason) {
        info!(%reason, "session over");
        self.ended = Some(reason);
    }
}

fn init_tracing(verbose: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if verbose {
        filter = filter.add_directive(tracing::Level::DEBUG.into());
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<FileConfig> {
    let mut config = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    config.time_limit_seconds = args.time_limit.or(config.time_limit_seconds);
    config.max_distance = args.max_distance.or(config.max_distance);
    config.resolution = args.resolution.map(Resolution::from).or(config.resolution);
    Ok(config)
}

/// Entry point for the maze chase command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.frame_ms == 0 {
        bail!("--frame-ms must be positive");
    }
    let session_config = load_config(&args)?
        .into_session_config()
        .context("invalid session configuration")?;
    ensure_run_ends(&session_config, args.frames)?;
    let moves = MoveScript::parse(&args.moves).context("invalid --moves script")?;
    info!(?session_config, "starting session");

    let mut session = Session::new(session_config);
    let mut backend = WriterBackend::new(io::stdout().lock()).with_clear_screen(args.realtime);
    let mut announcer = Announcer::default();
    let frame_duration = Duration::from_millis(args.frame_ms);

    let mut frame = 0;
    while !session.is_finished() && args.frames.map_or(true, |limit| frame < limit) {
        if let Some(direction) = moves.direction_at(frame) {
            session.set_player_direction(direction);
        }
        session.advance(frame_duration, &mut announcer);
        frame += 1;

        if args.show_frames || args.realtime {
            backend.present(&Frame::compose(
                query::grid_view(session.world()),
                &session.snapshot(),
            ))?;
        }
        if args.realtime {
            thread::sleep(frame_duration);
        }
    }

    let snapshot = session.snapshot();
    if !(args.show_frames || args.realtime) {
        backend.present(&Frame::compose(query::grid_view(session.world()), &snapshot))?;
    }

    match announcer.ended {
        Some(reason) => println!(
            "game over: {reason} (score {}/{})",
            snapshot.score, snapshot.max_score
        ),
        None => println!(
            "stopped after {frame} frames (score {}/{})",
            snapshot.score, snapshot.max_score
        ),
    }
    Ok(())
}
