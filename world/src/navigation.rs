//! Shortest-distance field rooted at the player's cell.

use std::collections::VecDeque;

use maze_chase_core::{Direction, DistanceFieldView, GridView, Position};

/// Dense step-count grid that pursuers descend to reach the player.
///
/// The field mirrors the maze dimensions and stores the breadth-first search
/// results from the player's cell through passable cells only. Walls, cells
/// cut off from the origin, and cells at or beyond `max_distance` steps all
/// hold `max_distance`, so pursuers that far away see a flat field.
/// Propagation never follows the horizontal tunnel.
#[derive(Clone, Debug)]
pub struct DistanceField {
    rows: u32,
    columns: u32,
    max_distance: u16,
    distances: Vec<u16>,
}

impl DistanceField {
    /// Creates an empty field that caps distances at `max_distance`.
    #[must_use]
    pub fn new(max_distance: u16) -> Self {
        Self {
            rows: 0,
            columns: 0,
            max_distance,
            distances: Vec::new(),
        }
    }

    /// Builds a field over `grid` rooted at `origin`.
    #[must_use]
    pub fn compute(grid: GridView<'_>, origin: Position, max_distance: u16) -> Self {
        let mut field = Self::new(max_distance);
        field.recompute(grid, origin);
        field
    }

    /// Rebuilds the distances from scratch using a breadth-first search.
    ///
    /// Each cell is written at most once because the first visit in
    /// breadth-first order already carries its shortest distance.
    pub fn recompute(&mut self, grid: GridView<'_>, origin: Position) {
        let cell_count = usize::try_from(u64::from(grid.rows()) * u64::from(grid.columns()))
            .unwrap_or(0);

        self.rows = grid.rows();
        self.columns = grid.columns();
        if self.distances.len() != cell_count {
            self.distances = vec![self.max_distance; cell_count];
        } else {
            self.distances.fill(self.max_distance);
        }

        if self.max_distance == 0 || !grid.is_passable(origin) {
            return;
        }
        let Some(origin_index) = grid.index(origin) else {
            return;
        };

        self.distances[origin_index] = 0;
        let mut queue = VecDeque::from([origin]);

        while let Some(cell) = queue.pop_front() {
            let Some(current_index) = grid.index(cell) else {
                continue;
            };
            let next_distance = self.distances[current_index].saturating_add(1);
            if next_distance >= self.max_distance {
                continue;
            }

            for direction in Direction::CARDINAL {
                let Some(neighbor) = cell.neighbor(direction) else {
                    continue;
                };
                if !grid.is_passable(neighbor) {
                    continue;
                }
                let Some(neighbor_index) = grid.index(neighbor) else {
                    continue;
                };
                if self.distances[neighbor_index] <= next_distance {
                    continue;
                }

                self.distances[neighbor_index] = next_distance;
                queue.push_back(neighbor);
            }
        }
    }

    /// Distance sentinel marking unreachable or too-distant cells.
    #[must_use]
    pub const fn max_distance(&self) -> u16 {
        self.max_distance
    }

    /// Distance captured for `position`, if it lies within the field.
    #[must_use]
    pub fn distance(&self, position: Position) -> Option<u16> {
        self.view().distance(position)
    }

    /// Borrows a read-only view of the field for systems.
    #[must_use]
    pub fn view(&self) -> DistanceFieldView<'_> {
        DistanceFieldView::new(&self.distances, self.rows, self.columns, self.max_distance)
    }
}
