#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic pursuit system that steers pursuers down the distance field.

use maze_chase_core::{Direction, DistanceFieldView, GridView, Position, Pursuer, PursuerId};
use maze_chase_system_movement::step;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Strategy used to settle pursuers that want to enter the same cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Pursuers commit one after another in index order. Each collision check
    /// sees the moves already committed earlier in the same tick.
    #[default]
    Sequential,
    /// Every candidate is computed from the positions held before the tick.
    /// A candidate is rejected when another pursuer started the tick in that
    /// cell, or when a lower-indexed pursuer already committed a move into it.
    Simultaneous,
}

/// Step committed by a pursuer during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PursuerStep {
    /// Identifier of the pursuer that moved.
    pub pursuer: PursuerId,
    /// Cell occupied before the step.
    pub from: Position,
    /// Cell occupied after the step.
    pub to: Position,
}

/// Pure system that moves pursuers toward the player one cell at a time.
#[derive(Debug, Default)]
pub struct Pursuit {
    resolution: Resolution,
    origins: Vec<Position>,
    candidates: Vec<Position>,
    claimed: Vec<Position>,
}

impl Pursuit {
    /// Creates a pursuit system that settles conflicts with `resolution`.
    #[must_use]
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }

    /// Conflict resolution strategy in use.
    #[must_use]
    pub const fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Chooses a direction for every pursuer and commits the moves that do not
    /// collide with another pursuer.
    ///
    /// Rejected pursuers stay in place but keep the direction they chose.
    /// Committed steps are appended to `out` in index order.
    pub fn resolve_moves(
        &mut self,
        pursuers: &mut [Pursuer],
        grid: GridView<'_>,
        field: DistanceFieldView<'_>,
        out: &mut Vec<PursuerStep>,
    ) {
        match self.resolution {
            Resolution::Sequential => resolve_sequential(pursuers, grid, field, out),
            Resolution::Simultaneous => self.resolve_simultaneous(pursuers, grid, field, out),
        }
    }

    fn resolve_simultaneous(
        &mut self,
        pursuers: &mut [Pursuer],
        grid: GridView<'_>,
        field: DistanceFieldView<'_>,
        out: &mut Vec<PursuerStep>,
    ) {
        self.origins.clear();
        self.candidates.clear();
        self.claimed.clear();

        for pursuer in pursuers.iter_mut() {
            let from = pursuer.position();
            let direction = choose_direction(grid, field, from, pursuer.entity.direction);
            pursuer.entity.direction = direction;
            self.origins.push(from);
            self.candidates.push(step(grid, from, direction));
        }

        for (index, pursuer) in pursuers.iter_mut().enumerate() {
            let from = self.origins[index];
            let candidate = self.candidates[index];
            if candidate == from {
                continue;
            }

            let started_there = self
                .origins
                .iter()
                .enumerate()
                .any(|(other, origin)| other != index && *origin == candidate);
            if started_there || self.claimed.contains(&candidate) {
                trace!(pursuer = pursuer.id().get(), %candidate, "pursuer move rejected");
                continue;
            }

            self.claimed.push(candidate);
            pursuer.entity.position = candidate;
            out.push(PursuerStep {
                pursuer: pursuer.id(),
                from,
                to: candidate,
            });
        }
    }
}

fn resolve_sequential(
    pursuers: &mut [Pursuer],
    grid: GridView<'_>,
    field: DistanceFieldView<'_>,
    out: &mut Vec<PursuerStep>,
) {
    for index in 0..pursuers.len() {
        let current = pursuers[index];
        let from = current.position();
        let direction = choose_direction(grid, field, from, current.entity.direction);
        pursuers[index].entity.direction = direction;

        let candidate = step(grid, from, direction);
        if candidate == from {
            continue;
        }

        let occupied = pursuers
            .iter()
            .enumerate()
            .any(|(other, pursuer)| other != index && pursuer.position() == candidate);
        if occupied {
            trace!(pursuer = current.id().get(), %candidate, "pursuer move rejected");
            continue;
        }

        pursuers[index].entity.position = candidate;
        out.push(PursuerStep {
            pursuer: current.id(),
            from,
            to: candidate,
        });
    }
}

/// Picks the direction that descends the distance field from `position`.
///
/// Neighbour distances are compared with the fixed precedence Up, Down,
/// Right, Left; each of the first three must be strictly smaller than every
/// direction ranked after it. Left is the fallback whenever its cell is
/// passable. If no candidate cell is passable `previous` is returned.
#[must_use]
pub fn choose_direction(
    grid: GridView<'_>,
    field: DistanceFieldView<'_>,
    position: Position,
    previous: Direction,
) -> Direction {
    let up = neighbor_distance(field, position, Direction::Up);
    let down = neighbor_distance(field, position, Direction::Down);
    let right = neighbor_distance(field, position, Direction::Right);
    let left = neighbor_distance(field, position, Direction::Left);
    let passable = |direction: Direction| {
        position
            .neighbor(direction)
            .is_some_and(|cell| grid.is_passable(cell))
    };

    if up < down && up < right && up < left && passable(Direction::Up) {
        Direction::Up
    } else if down < right && down < left && passable(Direction::Down) {
        Direction::Down
    } else if right < left && passable(Direction::Right) {
        Direction::Right
    } else if passable(Direction::Left) {
        Direction::Left
    } else {
        previous
    }
}

fn neighbor_distance(field: DistanceFieldView<'_>, position: Position, direction: Direction) -> u16 {
    position
        .neighbor(direction)
        .and_then(|cell| field.distance(cell))
        .unwrap_or_else(|| field.max_distance())
}
