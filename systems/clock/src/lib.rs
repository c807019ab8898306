#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cooperative scheduler that turns elapsed simulated time into timer commands.
//!
//! The three periodic timers of a session never run concurrently. Adapters
//! report how much time passed, the clock emits every command that fell due
//! in chronological order, and the caller applies them one at a time.

use std::time::Duration;

use maze_chase_core::{Command, Event};
use tracing::debug;

const DEFAULT_PLAYER_PERIOD: Duration = Duration::from_millis(120);
const DEFAULT_PURSUER_PERIOD: Duration = Duration::from_millis(220);
const DEFAULT_COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Configuration parameters required to construct the clock.
///
/// A zero period disables the corresponding timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    player_period: Duration,
    pursuer_period: Duration,
    countdown_period: Duration,
}

impl Config {
    /// Creates a new configuration using the provided timer periods.
    #[must_use]
    pub const fn new(
        player_period: Duration,
        pursuer_period: Duration,
        countdown_period: Duration,
    ) -> Self {
        Self {
            player_period,
            pursuer_period,
            countdown_period,
        }
    }

    /// Interval between player steps.
    #[must_use]
    pub const fn player_period(&self) -> Duration {
        self.player_period
    }

    /// Interval between pursuer steps.
    #[must_use]
    pub const fn pursuer_period(&self) -> Duration {
        self.pursuer_period
    }

    /// Interval between countdown decrements.
    #[must_use]
    pub const fn countdown_period(&self) -> Duration {
        self.countdown_period
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            DEFAULT_PLAYER_PERIOD,
            DEFAULT_PURSUER_PERIOD,
            DEFAULT_COUNTDOWN_PERIOD,
        )
    }
}

/// Periodic timers driven by the clock, listed in tie-break order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Timer {
    /// Moves the player.
    Player,
    /// Moves the pursuers.
    Pursuers,
    /// Decrements the remaining time.
    Countdown,
}

impl Timer {
    /// Command the world executes when the timer fires.
    #[must_use]
    pub const fn command(self) -> Command {
        match self {
            Self::Player => Command::StepPlayer,
            Self::Pursuers => Command::StepPursuers,
            Self::Countdown => Command::CountDown,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct PeriodicTimer {
    timer: Timer,
    period: Duration,
    next_due: Duration,
}

impl PeriodicTimer {
    fn new(timer: Timer, period: Duration) -> Self {
        Self {
            timer,
            period,
            next_due: period,
        }
    }

    fn due_by(&self, deadline: Duration) -> bool {
        !self.period.is_zero() && self.next_due <= deadline
    }

    fn rearm(&mut self) {
        match self.next_due.checked_add(self.period) {
            Some(next_due) => self.next_due = next_due,
            None => self.period = Duration::ZERO,
        }
    }
}

/// Single-threaded scheduler for the player, pursuer and countdown timers.
#[derive(Debug)]
pub struct Clock {
    timers: [PeriodicTimer; 3],
    elapsed: Duration,
    halted: bool,
}

impl Clock {
    /// Creates a new clock using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            timers: [
                PeriodicTimer::new(Timer::Player, config.player_period),
                PeriodicTimer::new(Timer::Pursuers, config.pursuer_period),
                PeriodicTimer::new(Timer::Countdown, config.countdown_period),
            ],
            elapsed: Duration::ZERO,
            halted: false,
        }
    }

    /// Advances simulated time by `dt`, emitting every command that fell due.
    ///
    /// Commands are ordered by due time; timers due at the same instant fire
    /// in [`Timer`] declaration order. A halted clock emits nothing.
    pub fn advance(&mut self, dt: Duration, out: &mut Vec<Command>) {
        if self.halted || dt.is_zero() {
            return;
        }

        let deadline = self.deadline_after(dt);
        while let Some(command) = self.next_command(deadline) {
            out.push(command);
        }
        self.settle(deadline);
    }

    /// Instant reached once `dt` more simulated time has passed.
    #[must_use]
    pub fn deadline_after(&self, dt: Duration) -> Duration {
        self.elapsed.saturating_add(dt)
    }

    /// Fires the earliest timer due by `deadline` and moves the clock to the
    /// instant it fired at.
    ///
    /// Pulling one command at a time lets callers react to each command
    /// before the next is produced. A halted clock returns `None`.
    pub fn next_command(&mut self, deadline: Duration) -> Option<Command> {
        if self.halted {
            return None;
        }

        let index = self.next_due_by(deadline)?;
        let timer = &mut self.timers[index];
        self.elapsed = self.elapsed.max(timer.next_due);
        let command = timer.timer.command();
        timer.rearm();
        Some(command)
    }

    /// Moves a running clock forward to `deadline` once every command due by
    /// then has been pulled.
    pub fn settle(&mut self, deadline: Duration) {
        if !self.halted {
            self.elapsed = self.elapsed.max(deadline);
        }
    }

    /// Consumes world events, halting every timer once the session ends.
    pub fn handle(&mut self, events: &[Event]) {
        if events
            .iter()
            .any(|event| matches!(event, Event::GameEnded { .. }))
        {
            self.halt();
        }
    }

    /// Stops all timers permanently.
    pub fn halt(&mut self) {
        if !self.halted {
            debug!(elapsed_ms = self.elapsed.as_millis(), "clock halted");
        }
        self.halted = true;
    }

    /// Reports whether the timers were stopped.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Simulated time accumulated since the clock started.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn next_due_by(&self, deadline: Duration) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due_by(deadline))
            .min_by_key(|(index, timer)| (timer.next_due, *index))
            .map(|(index, _)| index)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
