#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rendering contracts shared by maze chase adapters.
//!
//! The world never draws itself. Adapters compose a [`Frame`] from a read-only
//! [`GridView`] and a [`Snapshot`], then hand it to a [`RenderingBackend`].

use std::{fmt, io::Write};

use anyhow::{Context, Result as AnyResult};
use maze_chase_core::{Cell, GameStatus, GridView, PursuerId, Snapshot};

/// Glyph drawn for wall cells.
pub const WALL_GLYPH: char = '#';
/// Glyph drawn for cells that still hold food.
pub const FOOD_GLYPH: char = '.';
/// Glyph drawn for empty floor.
pub const EMPTY_GLYPH: char = ' ';
/// Glyph drawn for the player.
pub const PLAYER_GLYPH: char = 'C';
/// Glyph drawn for pursuers whose index has no digit of its own.
pub const OVERFLOW_PURSUER_GLYPH: char = '*';

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Returns the glyph used to draw the pursuer with the provided identifier.
///
/// The first nine pursuers are drawn as the digits `1` through `9`.
#[must_use]
pub fn pursuer_glyph(pursuer: PursuerId) -> char {
    pursuer
        .get()
        .checked_add(1)
        .filter(|digit| *digit <= 9)
        .and_then(|digit| char::from_digit(digit, 10))
        .unwrap_or(OVERFLOW_PURSUER_GLYPH)
}

fn cell_glyph(cell: Cell) -> char {
    match cell {
        Cell::Wall => WALL_GLYPH,
        Cell::Food => FOOD_GLYPH,
        Cell::Empty => EMPTY_GLYPH,
    }
}

/// Text picture of one moment of a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<String>,
    status: String,
}

impl Frame {
    /// Draws the maze with every entity placed on top of it.
    ///
    /// Pursuers are drawn after the player so a capture shows the pursuer
    /// standing on the player's cell. Entities outside the grid are skipped.
    #[must_use]
    pub fn compose(grid: GridView<'_>, snapshot: &Snapshot) -> Self {
        let mut canvas: Vec<Vec<char>> = grid
            .iter_rows()
            .map(|row| row.iter().copied().map(cell_glyph).collect())
            .collect();

        let mut plot = |row: u32, column: u32, glyph: char| {
            let slot = usize::try_from(row)
                .ok()
                .zip(usize::try_from(column).ok())
                .and_then(|(row, column)| canvas.get_mut(row)?.get_mut(column));
            if let Some(slot) = slot {
                *slot = glyph;
            }
        };

        plot(snapshot.player.row(), snapshot.player.column(), PLAYER_GLYPH);
        for pursuer in &snapshot.pursuers {
            plot(
                pursuer.position.row(),
                pursuer.position.column(),
                pursuer_glyph(pursuer.id),
            );
        }

        Self {
            rows: canvas.into_iter().map(String::from_iter).collect(),
            status: status_line(snapshot),
        }
    }

    /// Maze rows, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Score, countdown and lifecycle summary printed under the maze.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Every line of the frame in drawing order, status line last.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.status.as_str()))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn status_line(snapshot: &Snapshot) -> String {
    let state = match snapshot.status.end_reason() {
        None => "running".to_owned(),
        Some(reason) if snapshot.status == GameStatus::Won => format!("won: {reason}"),
        Some(reason) => format!("lost: {reason}"),
    };
    format!(
        "score {}/{}  time {}s  {state}",
        snapshot.score, snapshot.max_score, snapshot.remaining_seconds
    )
}

/// Rendering backend capable of presenting maze chase frames.
pub trait RenderingBackend {
    /// Presents one frame.
    ///
    /// # Errors
    ///
    /// Returns an error when the frame cannot be delivered to its destination.
    fn present(&mut self, frame: &Frame) -> AnyResult<()>;
}

/// Backend that prints frames to any [`Write`] implementation.
#[derive(Debug)]
pub struct WriterBackend<W> {
    writer: W,
    clear_screen: bool,
}

impl<W: Write> WriterBackend<W> {
    /// Creates a backend that appends frames to `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            clear_screen: false,
        }
    }

    /// Clears the terminal before each frame so successive frames animate in place.
    #[must_use]
    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    /// Returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderingBackend for WriterBackend<W> {
    fn present(&mut self, frame: &Frame) -> AnyResult<()> {
        if self.clear_screen {
            self.writer
                .write_all(CLEAR_SCREEN.as_bytes())
                .context("failed to clear the terminal")?;
        }
        write!(self.writer, "{frame}").context("failed to write frame")?;
        self.writer.flush().context("failed to flush frame output")
    }
}
