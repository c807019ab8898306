#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement rules shared by the player and the pursuers.
//!
//! [`step`] never mutates entity state. Callers receive the destination an
//! entity would reach and decide themselves whether to commit it.

use maze_chase_core::{Direction, GridView, Position};

/// Applies `direction` to `position`, honouring walls and the horizontal tunnel.
///
/// Vertical steps into a wall, or past the top or bottom edge, leave the
/// position unchanged. Horizontal steps that would leave the grid jump to the
/// opposite edge column without consulting passability; horizontal steps that
/// stay inside the grid only succeed when the destination is passable.
#[must_use]
pub fn step(grid: GridView<'_>, position: Position, direction: Direction) -> Position {
    match direction {
        Direction::None => position,
        Direction::Up | Direction::Down => position
            .neighbor(direction)
            .filter(|destination| grid.is_passable(*destination))
            .unwrap_or(position),
        Direction::Left | Direction::Right => {
            if let Some(wrapped) = tunnel_exit(grid.columns(), position, direction) {
                return wrapped;
            }
            position
                .neighbor(direction)
                .filter(|destination| grid.is_passable(*destination))
                .unwrap_or(position)
        }
    }
}

/// Opposite-edge cell reached when a horizontal step leaves the grid.
fn tunnel_exit(columns: u32, position: Position, direction: Direction) -> Option<Position> {
    let last_column = columns.checked_sub(1)?;
    match direction {
        Direction::Left if position.column() == 0 => Some(Position::new(position.row(), last_column)),
        Direction::Right if position.column() >= last_column => {
            Some(Position::new(position.row(), 0))
        }
        _ => None,
    }
}
