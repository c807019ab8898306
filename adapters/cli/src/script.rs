//! Scripted directional input that stands in for a keyboard.

use anyhow::{bail, Result};
use maze_chase_core::Direction;

/// Direction changes fed to the session, one entry per frame.
///
/// `U`, `D`, `L` and `R` (either case) steer the player, `.` keeps the
/// current heading for a frame and whitespace is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct MoveScript {
    frames: Vec<Option<Direction>>,
}

impl MoveScript {
    pub(crate) fn parse(script: &str) -> Result<Self> {
        let mut frames = Vec::with_capacity(script.len());
        for (offset, glyph) in script.chars().enumerate() {
            let frame = match glyph.to_ascii_uppercase() {
                'U' => Some(Direction::Up),
                'D' => Some(Direction::Down),
                'L' => Some(Direction::Left),
                'R' => Some(Direction::Right),
                '.' => None,
                glyph if glyph.is_whitespace() => continue,
                _ => bail!("unknown move `{glyph}` at offset {offset}; expected U, D, L, R or ."),
            };
            frames.push(frame);
        }
        Ok(Self { frames })
    }

    /// Direction requested on `frame`, if any. Frames past the end of the
    /// script request nothing.
    pub(crate) fn direction_at(&self, frame: usize) -> Option<Direction> {
        self.frames.get(frame).copied().flatten()
    }
}
