#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the maze chase.
//!
//! The [`World`] owns the maze, the player, the pursuers and the scoring
//! state for exactly one session. Every mutation flows through [`apply`],
//! which reacts to one [`Command`] at a time and reports what happened as
//! [`Event`] values. Once the session reaches a terminal status every command
//! except [`Command::SetPlayerDirection`] is ignored.

mod grid;
mod layout;
mod navigation;
mod session;

use maze_chase_core::{
    Command, Entity, Event, GameStatus, LossReason, Position, Pursuer, PursuerId, FOOD_SCORE,
};
use maze_chase_system_movement::step;
use maze_chase_system_pursuit::{PursuerStep, Pursuit, Resolution};
use tracing::{debug, info, trace};

pub use grid::Grid;
pub use navigation::DistanceField;
pub use session::{Session, SessionConfig, SessionHooks};

const DEFAULT_MAX_DISTANCE: u16 = 50;
const DEFAULT_TIME_LIMIT_SECONDS: u32 = 200;

/// Tunable parameters of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    max_distance: u16,
    time_limit_seconds: u32,
    resolution: Resolution,
}

impl Config {
    /// Creates a new configuration.
    ///
    /// `max_distance` caps the pursuer distance field, `time_limit_seconds`
    /// seeds the countdown and `resolution` settles pursuer collisions.
    #[must_use]
    pub const fn new(max_distance: u16, time_limit_seconds: u32, resolution: Resolution) -> Self {
        Self {
            max_distance,
            time_limit_seconds,
            resolution,
        }
    }

    /// Distance sentinel of the pursuer distance field.
    #[must_use]
    pub const fn max_distance(&self) -> u16 {
        self.max_distance
    }

    /// Seconds on the countdown when the session starts.
    #[must_use]
    pub const fn time_limit_seconds(&self) -> u32 {
        self.time_limit_seconds
    }

    /// Strategy used to settle pursuer collisions.
    #[must_use]
    pub const fn resolution(&self) -> Resolution {
        self.resolution
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_DISTANCE,
            DEFAULT_TIME_LIMIT_SECONDS,
            Resolution::Sequential,
        )
    }
}

/// Represents the authoritative state of one maze chase session.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    field: DistanceField,
    player: Entity,
    pursuers: Vec<Pursuer>,
    pursuit: Pursuit,
    score: u32,
    max_score: u32,
    remaining_seconds: u32,
    status: GameStatus,
    steps: Vec<PursuerStep>,
}

impl World {
    /// Creates a session on the classic maze with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a session on the classic maze.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let grid = Grid::from_rows(&layout::CLASSIC_MAZE).expect("classic maze layout is valid");
        Self::from_parts(grid, layout::PLAYER_SPAWN, &layout::PURSUER_SPAWNS, config)
    }

    /// Creates a session on an arbitrary grid.
    ///
    /// Pursuers receive identifiers matching their index in `pursuer_spawns`,
    /// which is also the order their moves are resolved in. The distance
    /// field is computed from the player's spawn immediately.
    #[must_use]
    pub fn from_parts(
        grid: Grid,
        player_spawn: Position,
        pursuer_spawns: &[Position],
        config: Config,
    ) -> Self {
        debug_assert!(
            grid.view().contains(player_spawn),
            "player spawn must lie inside the grid"
        );

        let pursuers = pursuer_spawns
            .iter()
            .enumerate()
            .map(|(index, spawn)| {
                let id = PursuerId::new(u32::try_from(index).unwrap_or(u32::MAX));
                Pursuer::spawn(id, *spawn)
            })
            .collect();
        let food = u32::try_from(grid.food_count()).unwrap_or(u32::MAX);
        let field = DistanceField::compute(grid.view(), player_spawn, config.max_distance);

        Self {
            field,
            player: Entity::at(player_spawn),
            pursuers,
            pursuit: Pursuit::new(config.resolution),
            score: 0,
            max_score: food.saturating_mul(FOOD_SCORE),
            remaining_seconds: config.time_limit_seconds,
            status: GameStatus::Running,
            steps: Vec::new(),
            grid,
        }
    }

    fn step_player(&mut self, out_events: &mut Vec<Event>) {
        let from = self.player.position;
        let to = step(self.grid.view(), from, self.player.direction);
        self.player.position = to;
        if from != to {
            out_events.push(Event::PlayerMoved { from, to });
        }

        self.field.recompute(self.grid.view(), to);

        if self.pursuers.iter().any(|pursuer| pursuer.position() == to) {
            self.finish(GameStatus::Lost(LossReason::Caught), out_events);
            return;
        }

        if self.grid.consume_food(to) {
            self.score = self.score.saturating_add(FOOD_SCORE);
            trace!(cell = %to, score = self.score, "food consumed");
            out_events.push(Event::FoodConsumed { cell: to });
            out_events.push(Event::ScoreChanged { score: self.score });

            if self.score >= self.max_score {
                self.finish(GameStatus::Won, out_events);
            }
        }
    }

    fn step_pursuers(&mut self, out_events: &mut Vec<Event>) {
        self.steps.clear();
        self.pursuit.resolve_moves(
            &mut self.pursuers,
            self.grid.view(),
            self.field.view(),
            &mut self.steps,
        );

        out_events.extend(self.steps.iter().map(|step| Event::PursuerMoved {
            pursuer: step.pursuer,
            from: step.from,
            to: step.to,
        }));
    }

    fn count_down(&mut self, out_events: &mut Vec<Event>) {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        out_events.push(Event::TimeRemaining {
            seconds: self.remaining_seconds,
        });

        if self.remaining_seconds == 0 {
            self.finish(GameStatus::Lost(LossReason::TimeExpired), out_events);
        }
    }

    fn finish(&mut self, status: GameStatus, out_events: &mut Vec<Event>) {
        debug_assert!(self.status.is_running(), "terminal status must be reached once");
        self.status = status;
        if let Some(reason) = status.end_reason() {
            info!(%reason, score = self.score, remaining = self.remaining_seconds, "game ended");
            out_events.push(Event::GameEnded { reason });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SetPlayerDirection { direction } => {
            debug!(?direction, "player direction requested");
            world.player.direction = direction;
        }
        _ if !world.status.is_running() => {
            trace!(?command, status = ?world.status, "command ignored after game end");
        }
        Command::StepPlayer => world.step_player(out_events),
        Command::StepPursuers => world.step_pursuers(out_events),
        Command::CountDown => world.count_down(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_chase_core::{DistanceFieldView, Entity, GameStatus, GridView, Pursuer, Snapshot};

    use super::World;

    /// Captures everything the presentation layer needs to draw a frame.
    #[must_use]
    pub fn snapshot(world: &World) -> Snapshot {
        Snapshot {
            player: world.player.position,
            player_direction: world.player.direction,
            pursuers: world.pursuers.iter().map(Pursuer::snapshot).collect(),
            score: world.score,
            max_score: world.max_score,
            remaining_seconds: world.remaining_seconds,
            status: world.status,
        }
    }

    /// Provides read-only access to the maze.
    #[must_use]
    pub fn grid_view(world: &World) -> GridView<'_> {
        world.grid.view()
    }

    /// Provides read-only access to the distance field computed on the most
    /// recent player step.
    #[must_use]
    pub fn distance_field(world: &World) -> DistanceFieldView<'_> {
        world.field.view()
    }

    /// Position and pending direction of the player.
    #[must_use]
    pub fn player(world: &World) -> Entity {
        world.player
    }

    /// Pursuers in resolution order.
    #[must_use]
    pub fn pursuers(world: &World) -> &[Pursuer] {
        &world.pursuers
    }

    /// Lifecycle status of the session.
    #[must_use]
    pub fn status(world: &World) -> GameStatus {
        world.status
    }
}
