//! Owned maze grid and its textual layout format.

use maze_chase_core::{Cell, GridError, GridView, Position};

const WALL_GLYPH: char = '#';
const FOOD_GLYPH: char = '.';
const EMPTY_GLYPH: char = ' ';

/// Fixed rectangular maze owned by the world for the lifetime of a session.
///
/// The only mutation permitted after construction is the food to empty
/// transition performed by [`Grid::consume_food`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Parses a grid from rows of glyphs: `#` for walls, `.` for food and a
    /// space for empty floor.
    ///
    /// # Errors
    ///
    /// Returns an error when the layout is empty, when rows differ in width,
    /// or when a row contains an unknown glyph.
    pub fn from_rows<S: AsRef<str>>(layout: &[S]) -> Result<Self, GridError> {
        let expected = layout
            .first()
            .map(|row| row.as_ref().chars().count())
            .filter(|width| *width > 0)
            .ok_or(GridError::EmptyLayout)?;

        let mut cells = Vec::with_capacity(expected * layout.len());
        for (row, text) in layout.iter().enumerate() {
            let text = text.as_ref();
            let found = text.chars().count();
            if found != expected {
                return Err(GridError::RaggedLayout {
                    row,
                    expected,
                    found,
                });
            }

            for (column, glyph) in text.chars().enumerate() {
                let cell = match glyph {
                    WALL_GLYPH => Cell::Wall,
                    FOOD_GLYPH => Cell::Food,
                    EMPTY_GLYPH => Cell::Empty,
                    _ => return Err(GridError::InvalidGlyph { glyph, row, column }),
                };
                cells.push(cell);
            }
        }

        Ok(Self {
            rows: dimension(layout.len()),
            columns: dimension(expected),
            cells,
        })
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Borrows a read-only view of the grid for systems.
    #[must_use]
    pub fn view(&self) -> GridView<'_> {
        GridView::new(&self.cells, self.rows, self.columns)
    }

    /// Returns the cell stored at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] when `position` lies outside the grid.
    pub fn cell_at(&self, position: Position) -> Result<Cell, GridError> {
        self.view().cell_at(position)
    }

    /// Reports whether entities may enter `position`.
    #[must_use]
    pub fn is_passable(&self, position: Position) -> bool {
        self.view().is_passable(position)
    }

    /// Number of cells that still hold food.
    #[must_use]
    pub fn food_count(&self) -> usize {
        self.view().food_count()
    }

    /// Removes the food stored at `position`.
    ///
    /// Returns `true` when food was present. Any other cell, including cells
    /// outside the grid, is left untouched and yields `false`.
    pub fn consume_food(&mut self, position: Position) -> bool {
        let Some(index) = self.view().index(position) else {
            return false;
        };

        match self.cells.get_mut(index) {
            Some(cell) if *cell == Cell::Food => {
                *cell = Cell::Empty;
                true
            }
            _ => false,
        }
    }
}

fn dimension(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
