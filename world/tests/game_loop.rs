use maze_chase_core::{
    Cell, Command, Direction, EndReason, Event, GameStatus, LossReason, Position, PursuerId,
};
use maze_chase_world::{self as world, query, Config, Grid, World};

fn world_from(rows: &[&str], player: Position, pursuers: &[Position]) -> World {
    let grid = Grid::from_rows(rows).expect("valid layout");
    World::from_parts(grid, player, pursuers, Config::default())
}

fn steer(world: &mut World, direction: Direction) {
    let mut events = Vec::new();
    world::apply(world, Command::SetPlayerDirection { direction }, &mut events);
    assert!(events.is_empty(), "steering never emits events");
}

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

#[test]
fn food_is_scored_exactly_once() {
    let mut world = world_from(&["  . .", "#####"], Position::new(0, 1), &[]);

    steer(&mut world, Direction::Right);
    let first = run(&mut world, Command::StepPlayer);
    assert!(first.contains(&Event::ScoreChanged { score: 10 }));

    steer(&mut world, Direction::Left);
    let _ = run(&mut world, Command::StepPlayer);
    steer(&mut world, Direction::Right);
    let revisit = run(&mut world, Command::StepPlayer);

    assert_eq!(
        revisit,
        vec![Event::PlayerMoved {
            from: Position::new(0, 1),
            to: Position::new(0, 2),
        }]
    );
    assert_eq!(query::snapshot(&world).score, 10);
}

#[test]
fn win_requires_every_food_cell() {
    let mut world = world_from(&[". . "], Position::new(0, 1), &[]);
    assert_eq!(query::snapshot(&world).max_score, 20);

    steer(&mut world, Direction::Right);
    let _ = run(&mut world, Command::StepPlayer);
    assert_eq!(query::status(&world), GameStatus::Running);
    assert_eq!(query::snapshot(&world).score, 10);

    steer(&mut world, Direction::Left);
    let _ = run(&mut world, Command::StepPlayer);
    let events = run(&mut world, Command::StepPlayer);

    assert_eq!(query::status(&world), GameStatus::Won);
    assert_eq!(query::snapshot(&world).score, 20);
    assert_eq!(
        events.last(),
        Some(&Event::GameEnded {
            reason: EndReason::AllFoodCollected
        })
    );
    assert_eq!(query::grid_view(&world).food_count(), 0);
}

#[test]
fn terminal_state_freezes_the_simulation() {
    let mut world = world_from(
        &["  .. ", "     "],
        Position::new(0, 0),
        &[Position::new(0, 1), Position::new(1, 4)],
    );
    steer(&mut world, Direction::Right);
    let events = run(&mut world, Command::StepPlayer);
    assert_eq!(
        events.last(),
        Some(&Event::GameEnded {
            reason: EndReason::Caught
        })
    );

    let frozen = query::snapshot(&world);
    for command in [
        Command::StepPlayer,
        Command::StepPursuers,
        Command::CountDown,
        Command::StepPlayer,
    ] {
        assert!(run(&mut world, command).is_empty(), "{command:?} after the end");
    }
    steer(&mut world, Direction::Down);
    let _ = run(&mut world, Command::StepPlayer);

    let after = query::snapshot(&world);
    assert_eq!(after.player, frozen.player);
    assert_eq!(after.pursuers, frozen.pursuers);
    assert_eq!(after.score, frozen.score);
    assert_eq!(after.remaining_seconds, frozen.remaining_seconds);
    assert_eq!(after.status, GameStatus::Lost(LossReason::Caught));
}

#[test]
fn pursuer_detours_around_the_center_wall() {
    let mut world = world_from(
        &["   ", " # ", "   "],
        Position::new(0, 0),
        &[Position::new(2, 2)],
    );

    let events = run(&mut world, Command::StepPursuers);

    assert_eq!(
        events,
        vec![Event::PursuerMoved {
            pursuer: PursuerId::new(0),
            from: Position::new(2, 2),
            to: Position::new(2, 1),
        }]
    );
    assert_eq!(query::pursuers(&world)[0].entity.direction, Direction::Left);
}

#[test]
fn pursuers_close_in_and_catch_a_stationary_player() {
    let mut world = world_from(
        &["#######", "       ", "#######"],
        Position::new(1, 0),
        &[Position::new(1, 6)],
    );

    for _ in 0..5 {
        let events = run(&mut world, Command::StepPursuers);
        assert_eq!(events.len(), 1);
    }
    assert_eq!(query::pursuers(&world)[0].position(), Position::new(1, 1));
    assert_eq!(query::status(&world), GameStatus::Running);

    let _ = run(&mut world, Command::StepPursuers);
    assert_eq!(
        query::pursuers(&world)[0].position(),
        Position::new(1, 0),
        "pursuers may step onto the player's cell"
    );
    assert_eq!(
        query::status(&world),
        GameStatus::Running,
        "capture is only detected on the player's tick"
    );

    let events = run(&mut world, Command::StepPlayer);
    assert_eq!(
        events,
        vec![Event::GameEnded {
            reason: EndReason::Caught
        }]
    );
}

#[test]
fn pursuers_use_the_field_from_the_latest_player_step() {
    let mut world = world_from(&["     "], Position::new(0, 2), &[Position::new(0, 0)]);
    steer(&mut world, Direction::Left);
    let _ = run(&mut world, Command::StepPlayer);
    assert_eq!(query::distance_field(&world).distance(Position::new(0, 0)), Some(1));

    let events = run(&mut world, Command::StepPursuers);
    assert_eq!(
        events,
        vec![Event::PursuerMoved {
            pursuer: PursuerId::new(0),
            from: Position::new(0, 0),
            to: Position::new(0, 1),
        }]
    );
}

#[test]
fn countdown_reports_every_second_and_expires() {
    let grid = Grid::from_rows(&[" ."]).expect("valid layout");
    let config = Config::new(50, 3, Default::default());
    let mut world = World::from_parts(grid, Position::new(0, 0), &[], config);

    assert_eq!(run(&mut world, Command::CountDown), vec![Event::TimeRemaining { seconds: 2 }]);
    assert_eq!(run(&mut world, Command::CountDown), vec![Event::TimeRemaining { seconds: 1 }]);
    assert_eq!(
        run(&mut world, Command::CountDown),
        vec![
            Event::TimeRemaining { seconds: 0 },
            Event::GameEnded {
                reason: EndReason::TimeExpired
            }
        ]
    );
    assert!(run(&mut world, Command::CountDown).is_empty());
}

#[test]
fn classic_tunnel_wraps_the_player_to_the_far_edge() {
    let mut world = World::new();

    steer(&mut world, Direction::Up);
    let _ = run(&mut world, Command::StepPlayer);
    assert_eq!(query::player(&world).position, Position::new(8, 19));

    steer(&mut world, Direction::Left);
    for _ in 0..19 {
        let _ = run(&mut world, Command::StepPlayer);
    }
    assert_eq!(query::player(&world).position, Position::new(8, 0));

    let events = run(&mut world, Command::StepPlayer);
    assert_eq!(
        events,
        vec![Event::PlayerMoved {
            from: Position::new(8, 0),
            to: Position::new(8, 37),
        }]
    );
    assert_eq!(
        query::grid_view(&world).cell_at(Position::new(8, 37)),
        Ok(Cell::Empty)
    );
}

#[test]
fn player_stays_put_against_walls() {
    let mut world = World::new();
    steer(&mut world, Direction::Up);
    for _ in 0..6 {
        let _ = run(&mut world, Command::StepPlayer);
    }

    assert_eq!(query::player(&world).position, Position::new(5, 19));
    assert_eq!(query::snapshot(&world).score, 30);
    assert_eq!(
        query::grid_view(&world).cell_at(Position::new(4, 19)),
        Ok(Cell::Wall)
    );
}
