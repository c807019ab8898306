use std::time::Duration;

use maze_chase_core::{Command, EndReason, Event};
use maze_chase_system_clock::{Clock, Config};

#[test]
fn emits_commands_in_chronological_order() {
    let mut clock = Clock::default();
    let mut commands = Vec::new();

    clock.advance(Duration::from_millis(660), &mut commands);

    assert_eq!(
        commands,
        vec![
            Command::StepPlayer,   // 120
            Command::StepPursuers, // 220
            Command::StepPlayer,   // 240
            Command::StepPlayer,   // 360
            Command::StepPursuers, // 440
            Command::StepPlayer,   // 480
            Command::StepPlayer,   // 600
            Command::StepPursuers, // 660
        ]
    );
}

#[test]
fn simultaneous_timers_fire_player_then_pursuers_then_countdown() {
    let mut clock = Clock::new(Config::new(
        Duration::from_millis(500),
        Duration::from_millis(500),
        Duration::from_millis(500),
    ));
    let mut commands = Vec::new();

    clock.advance(Duration::from_millis(500), &mut commands);

    assert_eq!(
        commands,
        vec![
            Command::StepPlayer,
            Command::StepPursuers,
            Command::CountDown
        ]
    );
}

#[test]
fn splitting_time_does_not_change_the_schedule() {
    let mut whole = Clock::default();
    let mut split = Clock::default();
    let mut whole_commands = Vec::new();
    let mut split_commands = Vec::new();

    whole.advance(Duration::from_millis(3_000), &mut whole_commands);
    for _ in 0..300 {
        split.advance(Duration::from_millis(10), &mut split_commands);
    }

    assert_eq!(whole_commands, split_commands);
    assert_eq!(
        whole_commands
            .iter()
            .filter(|command| **command == Command::CountDown)
            .count(),
        3
    );
}

#[test]
fn game_end_halts_every_timer() {
    let mut clock = Clock::default();
    let mut commands = Vec::new();

    clock.handle(&[Event::ScoreChanged { score: 10 }]);
    assert!(!clock.is_halted());

    clock.handle(&[Event::GameEnded {
        reason: EndReason::TimeExpired,
    }]);
    assert!(clock.is_halted());

    clock.advance(Duration::from_secs(10), &mut commands);
    assert!(commands.is_empty(), "halted clocks must not emit commands");
    assert_eq!(clock.elapsed(), Duration::ZERO);
}
