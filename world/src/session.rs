//! Single-threaded driver that pairs a [`World`] with its [`Clock`].

use std::time::Duration;

use maze_chase_core::{Command, Direction, EndReason, Event, Position, PursuerId, Snapshot};
use maze_chase_system_clock::{Clock, Config as ClockConfig};

use crate::{apply, query, Config, World};

/// Combined configuration of the world and its timers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Parameters of the simulation itself.
    pub world: Config,
    /// Periods of the player, pursuer and countdown timers.
    pub clock: ClockConfig,
}

/// Callbacks fired while a session advances.
///
/// Every method defaults to doing nothing so presentation layers only
/// override what they draw.
pub trait SessionHooks {
    /// The player moved between two cells.
    fn player_moved(&mut self, _from: Position, _to: Position) {}

    /// A pursuer committed a step.
    fn pursuer_moved(&mut self, _pursuer: PursuerId, _from: Position, _to: Position) {}

    /// The player ate the food stored in `cell`.
    fn food_consumed(&mut self, _cell: Position) {}

    /// The score changed.
    fn score_changed(&mut self, _score: u32) {}

    /// The countdown ticked.
    fn time_remaining(&mut self, _seconds: u32) {}

    /// The session reached a terminal state.
    fn game_ended(&mut self, _reason: EndReason) {}
}

impl SessionHooks for () {}

/// Records every event in the order it was broadcast.
impl SessionHooks for Vec<Event> {
    fn player_moved(&mut self, from: Position, to: Position) {
        self.push(Event::PlayerMoved { from, to });
    }

    fn pursuer_moved(&mut self, pursuer: PursuerId, from: Position, to: Position) {
        self.push(Event::PursuerMoved { pursuer, from, to });
    }

    fn food_consumed(&mut self, cell: Position) {
        self.push(Event::FoodConsumed { cell });
    }

    fn score_changed(&mut self, score: u32) {
        self.push(Event::ScoreChanged { score });
    }

    fn time_remaining(&mut self, seconds: u32) {
        self.push(Event::TimeRemaining { seconds });
    }

    fn game_ended(&mut self, reason: EndReason) {
        self.push(Event::GameEnded { reason });
    }
}

fn dispatch<H: SessionHooks + ?Sized>(hooks: &mut H, event: Event) {
    match event {
        Event::PlayerMoved { from, to } => hooks.player_moved(from, to),
        Event::PursuerMoved { pursuer, from, to } => hooks.pursuer_moved(pursuer, from, to),
        Event::FoodConsumed { cell } => hooks.food_consumed(cell),
        Event::ScoreChanged { score } => hooks.score_changed(score),
        Event::TimeRemaining { seconds } => hooks.time_remaining(seconds),
        Event::GameEnded { reason } => hooks.game_ended(reason),
    }
}

/// One maze chase session driven by simulated time.
///
/// Timer commands are applied one at a time, so no two ticks ever touch
/// the world concurrently. The clock halts as soon as the game ends and no
/// further timer fires, even within the same advance.
#[derive(Debug)]
pub struct Session {
    world: World,
    clock: Clock,
    events: Vec<Event>,
}

impl Session {
    /// Starts a session on the classic maze.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self::from_world(World::with_config(config.world), config.clock)
    }

    /// Starts a session around an already constructed world.
    #[must_use]
    pub fn from_world(world: World, clock: ClockConfig) -> Self {
        Self {
            world,
            clock: Clock::new(clock),
            events: Vec::new(),
        }
    }

    /// Overwrites the player's pending direction; takes effect on the next
    /// player step.
    pub fn set_player_direction(&mut self, direction: Direction) {
        self.events.clear();
        apply(
            &mut self.world,
            Command::SetPlayerDirection { direction },
            &mut self.events,
        );
    }

    /// Advances simulated time by `dt`, firing `hooks` for every event.
    ///
    /// Timer commands are pulled from the clock one at a time, so the work
    /// done stops at the command that ends the game however large `dt` is.
    pub fn advance<H: SessionHooks + ?Sized>(&mut self, dt: Duration, hooks: &mut H) {
        let deadline = self.clock.deadline_after(dt);
        while let Some(command) = self.clock.next_command(deadline) {
            self.events.clear();
            apply(&mut self.world, command, &mut self.events);
            for event in &self.events {
                dispatch(hooks, *event);
            }
            self.clock.handle(&self.events);
        }
        self.clock.settle(deadline);
    }

    /// Captures the current state for rendering without mutating it.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        query::snapshot(&self.world)
    }

    /// Reports whether the session reached a terminal state.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !query::status(&self.world).is_running()
    }

    /// Provides read-only access to the underlying world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Provides read-only access to the scheduler.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}
