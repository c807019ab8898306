#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that adapters
//! and schedulers react to. Systems never own state; they read the
//! [`GridView`] and [`DistanceFieldView`] borrowed from the world and return
//! the moves they would like to make.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Score awarded for every food cell the player consumes.
pub const FOOD_SCORE: u32 = 10;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Overwrites the direction the player will attempt on its next step.
    SetPlayerDirection {
        /// Direction requested by the presentation layer.
        direction: Direction,
    },
    /// Fires the player-move timer.
    StepPlayer,
    /// Fires the pursuer-move timer.
    StepPursuers,
    /// Fires the one second countdown timer.
    CountDown,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before the step.
        from: Position,
        /// Cell the player occupies after the step.
        to: Position,
    },
    /// Confirms that a pursuer committed a step.
    PursuerMoved {
        /// Identifier of the pursuer that moved.
        pursuer: PursuerId,
        /// Cell the pursuer occupied before the step.
        from: Position,
        /// Cell the pursuer occupies after the step.
        to: Position,
    },
    /// Reports that the player ate the food stored in a cell.
    FoodConsumed {
        /// Cell that transitioned from food to empty.
        cell: Position,
    },
    /// Reports the player's new score.
    ScoreChanged {
        /// Accumulated score after the change.
        score: u32,
    },
    /// Reports the remaining time after a countdown tick.
    TimeRemaining {
        /// Whole seconds left before the session expires.
        seconds: u32,
    },
    /// Announces that the session reached a terminal state.
    GameEnded {
        /// Condition that ended the session.
        reason: EndReason,
    },
}

/// Contents of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Impassable cell.
    Wall,
    /// Walkable cell without food.
    Empty,
    /// Walkable cell holding food worth [`FOOD_SCORE`] points.
    Food,
}

impl Cell {
    /// Reports whether entities may enter the cell.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Movement intent of an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Not moving; newly spawned entities start here.
    #[default]
    None,
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Orthogonal directions in the precedence used by pursuers when breaking ties.
    pub const CARDINAL: [Direction; 4] = [Self::Up, Self::Down, Self::Right, Self::Left];
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: u32,
    column: u32,
}

impl Position {
    /// Creates a new position from zero-based row and column indices.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Adjacent position one step in `direction`, ignoring grid extents.
    ///
    /// Returns `None` when the step would underflow past row or column zero.
    /// [`Direction::None`] yields the position itself.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<Position> {
        match direction {
            Direction::None => Some(self),
            Direction::Up => self.row.checked_sub(1).map(|row| Self::new(row, self.column)),
            Direction::Down => self.row.checked_add(1).map(|row| Self::new(row, self.column)),
            Direction::Left => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(self.row, column)),
            Direction::Right => self
                .column
                .checked_add(1)
                .map(|column| Self::new(self.row, column)),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Unique identifier assigned to a pursuer; equal to its resolution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PursuerId(u32);

impl PursuerId {
    /// Creates a new pursuer identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Position and heading shared by the player and the pursuers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// Cell currently occupied by the entity.
    pub position: Position,
    /// Direction the entity moves in on its next step.
    pub direction: Direction,
}

impl Entity {
    /// Creates a stationary entity at `position`.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self {
            position,
            direction: Direction::None,
        }
    }
}

/// Pursuer record owned by the world and steered by the pursuit system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pursuer {
    id: PursuerId,
    spawn: Position,
    /// Position and heading of the pursuer.
    pub entity: Entity,
}

impl Pursuer {
    /// Creates a stationary pursuer at its spawn cell.
    #[must_use]
    pub const fn spawn(id: PursuerId, spawn: Position) -> Self {
        Self {
            id,
            spawn,
            entity: Entity::at(spawn),
        }
    }

    /// Identifier assigned to the pursuer.
    #[must_use]
    pub const fn id(&self) -> PursuerId {
        self.id
    }

    /// Cell the pursuer spawned in.
    #[must_use]
    pub const fn spawn_cell(&self) -> Position {
        self.spawn
    }

    /// Cell currently occupied by the pursuer.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.entity.position
    }

    /// Captures the pursuer's state for presentation.
    #[must_use]
    pub const fn snapshot(&self) -> PursuerSnapshot {
        PursuerSnapshot {
            id: self.id,
            position: self.entity.position,
            direction: self.entity.direction,
            spawn: self.spawn,
        }
    }
}

/// Reasons the player can lose a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LossReason {
    /// A pursuer occupied the player's cell after a player step.
    Caught,
    /// The countdown reached zero.
    TimeExpired,
}

/// Lifecycle of a session. Transitions only ever leave [`GameStatus::Running`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Timers are live and commands mutate the world.
    #[default]
    Running,
    /// Every food cell was consumed.
    Won,
    /// The player lost for the recorded reason.
    Lost(LossReason),
}

impl GameStatus {
    /// Reports whether the session still accepts mutations.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Condition that ended the session, if it has ended.
    #[must_use]
    pub const fn end_reason(self) -> Option<EndReason> {
        match self {
            Self::Running => None,
            Self::Won => Some(EndReason::AllFoodCollected),
            Self::Lost(LossReason::Caught) => Some(EndReason::Caught),
            Self::Lost(LossReason::TimeExpired) => Some(EndReason::TimeExpired),
        }
    }
}

/// Human-facing description of why a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// A pursuer caught the player.
    Caught,
    /// The countdown ran out.
    TimeExpired,
    /// The player ate every food cell.
    AllFoodCollected,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Caught => "caught",
            Self::TimeExpired => "time expired",
            Self::AllFoodCollected => "all food collected",
        };
        f.write_str(text)
    }
}

/// Immutable representation of a single pursuer's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PursuerSnapshot {
    /// Identifier assigned to the pursuer.
    pub id: PursuerId,
    /// Cell currently occupied by the pursuer.
    pub position: Position,
    /// Direction chosen on the pursuer's most recent tick.
    pub direction: Direction,
    /// Cell the pursuer spawned in.
    pub spawn: Position,
}

/// Read-only view of a session handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    /// Cell occupied by the player.
    pub player: Position,
    /// Direction the player will attempt on its next step.
    pub player_direction: Direction,
    /// Pursuers in resolution order.
    pub pursuers: Vec<PursuerSnapshot>,
    /// Accumulated score.
    pub score: u32,
    /// Score that ends the session with a win.
    pub max_score: u32,
    /// Whole seconds left on the countdown.
    pub remaining_seconds: u32,
    /// Lifecycle status of the session.
    pub status: GameStatus,
}

impl Snapshot {
    /// Iterator over the pursuer positions in resolution order.
    pub fn pursuer_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.pursuers.iter().map(|pursuer| pursuer.position)
    }
}

/// Failures raised by grid queries and maze construction.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// The queried position lies outside the grid.
    #[error("position {position} lies outside the {rows}x{columns} grid")]
    OutOfBounds {
        /// Position that was queried.
        position: Position,
        /// Number of rows in the grid.
        rows: u32,
        /// Number of columns in the grid.
        columns: u32,
    },
    /// A maze layout contained no cells.
    #[error("maze layout is empty")]
    EmptyLayout,
    /// A maze layout row differs in width from the first row.
    #[error("maze row {row} has {found} columns, expected {expected}")]
    RaggedLayout {
        /// Offending row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A maze layout contained a character that does not map to a cell.
    #[error("unrecognised maze glyph {glyph:?} at row {row}, column {column}")]
    InvalidGlyph {
        /// Character that failed to parse.
        glyph: char,
        /// Row of the character.
        row: usize,
        /// Column of the character.
        column: usize,
    },
}

/// Read-only view into the dense maze grid.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [Cell],
    rows: u32,
    columns: u32,
}

impl<'a> GridView<'a> {
    /// Captures a new grid view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(cells: &'a [Cell], rows: u32, columns: u32) -> Self {
        debug_assert_eq!(
            u64::try_from(cells.len()).ok(),
            Some(u64::from(rows) * u64::from(columns)),
            "grid view dimensions must match the cell slice"
        );
        Self {
            cells,
            rows,
            columns,
        }
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

    /// Reports whether `position` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.row() < self.rows && position.column() < self.columns
    }

    /// Returns the cell stored at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] when `position` lies outside the grid.
    pub fn cell_at(&self, position: Position) -> Result<Cell, GridError> {
        self.index(position)
            .and_then(|index| self.cells.get(index).copied())
            .ok_or(GridError::OutOfBounds {
                position,
                rows: self.rows,
                columns: self.columns,
            })
    }

    /// Reports whether entities may enter `position`.
    ///
    /// Positions outside the grid are never passable.
    #[must_use]
    pub fn is_passable(&self, position: Position) -> bool {
        self.cell_at(position).is_ok_and(Cell::is_passable)
    }

    /// Number of cells that still hold food.
    #[must_use]
    pub fn food_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Cell::Food).count()
    }

    /// Iterator over the grid rows from top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &'a [Cell]> {
        let width = usize::try_from(self.columns).unwrap_or(0).max(1);
        self.cells.chunks(width)
    }

    /// Row-major offset of `position`, if it lies inside the grid.
    #[must_use]
    pub fn index(&self, position: Position) -> Option<usize> {
        cell_index(self.columns, self.rows, position)
    }
}

/// Read-only view into a shortest-distance field rooted at the player.
#[derive(Clone, Copy, Debug)]
pub struct DistanceFieldView<'a> {
    distances: &'a [u16],
    rows: u32,
    columns: u32,
    max_distance: u16,
}

impl<'a> DistanceFieldView<'a> {
    /// Captures a new view backed by the provided row-major distance slice.
    #[must_use]
    pub fn new(distances: &'a [u16], rows: u32, columns: u32, max_distance: u16) -> Self {
        Self {
            distances,
            rows,
            columns,
            max_distance,
        }
    }

    /// Sentinel stored in cells that are unreachable or at least this far away.
    #[must_use]
    pub const fn max_distance(&self) -> u16 {
        self.max_distance
    }

    /// Distance stored for `position`, or `None` outside the field.
    #[must_use]
    pub fn distance(&self, position: Position) -> Option<u16> {
        cell_index(self.columns, self.rows, position)
            .and_then(|index| self.distances.get(index).copied())
    }

    /// Dense distances stored in row-major order.
    #[must_use]
    pub fn cells(&self) -> &'a [u16] {
        self.distances
    }

    /// Provides the dimensions of the field as `(rows, columns)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }
}

fn cell_index(columns: u32, rows: u32, position: Position) -> Option<usize> {
    if position.row() < rows && position.column() < columns {
        let row = usize::try_from(position.row()).ok()?;
        let column = usize::try_from(position.column()).ok()?;
        let width = usize::try_from(columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    } else {
        None
    }
}
