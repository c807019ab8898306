use maze_chase_core::{Cell, Direction, DistanceFieldView, GridView, Position, Pursuer, PursuerId};
use maze_chase_system_pursuit::{PursuerStep, Pursuit, Resolution};

const MAX: u16 = 50;

fn pursuer(id: u32, row: u32, column: u32) -> Pursuer {
    Pursuer::spawn(PursuerId::new(id), Position::new(row, column))
}

#[test]
fn lower_index_wins_contested_cell() {
    let cells = vec![Cell::Empty; 9];
    let grid = GridView::new(&cells, 3, 3);
    #[rustfmt::skip]
    let distances = vec![
        2, 1, 2,
        1, 0, 1,
        2, 1, 2,
    ];
    let field = DistanceFieldView::new(&distances, 3, 3, MAX);

    for resolution in [Resolution::Sequential, Resolution::Simultaneous] {
        let mut pursuers = vec![pursuer(0, 0, 1), pursuer(1, 1, 0)];
        let mut pursuit = Pursuit::new(resolution);
        let mut steps = Vec::new();

        pursuit.resolve_moves(&mut pursuers, grid, field, &mut steps);

        assert_eq!(
            steps,
            vec![PursuerStep {
                pursuer: PursuerId::new(0),
                from: Position::new(0, 1),
                to: Position::new(1, 1),
            }],
            "{resolution:?} must let pursuer 0 claim the cell"
        );
        assert_eq!(pursuers[0].position(), Position::new(1, 1));
        assert_eq!(pursuers[1].position(), Position::new(1, 0));
        assert_eq!(
            pursuers[1].entity.direction,
            Direction::Right,
            "a rejected pursuer keeps its chosen direction"
        );
    }
}

#[test]
fn sequential_resolution_lets_followers_enter_vacated_cells() {
    let cells = vec![Cell::Empty; 4];
    let grid = GridView::new(&cells, 1, 4);
    let distances = vec![0, 1, 2, 3];
    let field = DistanceFieldView::new(&distances, 1, 4, MAX);
    let mut pursuers = vec![pursuer(0, 0, 1), pursuer(1, 0, 2)];
    let mut steps = Vec::new();

    Pursuit::new(Resolution::Sequential).resolve_moves(&mut pursuers, grid, field, &mut steps);

    assert_eq!(steps.len(), 2);
    assert_eq!(pursuers[0].position(), Position::new(0, 0));
    assert_eq!(pursuers[1].position(), Position::new(0, 1));
}

#[test]
fn simultaneous_resolution_blocks_followers() {
    let cells = vec![Cell::Empty; 4];
    let grid = GridView::new(&cells, 1, 4);
    let distances = vec![0, 1, 2, 3];
    let field = DistanceFieldView::new(&distances, 1, 4, MAX);
    let mut pursuers = vec![pursuer(0, 0, 1), pursuer(1, 0, 2)];
    let mut steps = Vec::new();

    Pursuit::new(Resolution::Simultaneous).resolve_moves(&mut pursuers, grid, field, &mut steps);

    assert_eq!(steps.len(), 1);
    assert_eq!(pursuers[0].position(), Position::new(0, 0));
    assert_eq!(
        pursuers[1].position(),
        Position::new(0, 2),
        "the cell was occupied when the tick began"
    );
}

#[test]
fn resolution_order_does_not_skip_pursuers_that_stay() {
    #[rustfmt::skip]
    let cells = vec![
        Cell::Wall, Cell::Wall, Cell::Wall,
        Cell::Wall, Cell::Empty, Cell::Wall,
        Cell::Empty, Cell::Empty, Cell::Empty,
    ];
    let grid = GridView::new(&cells, 3, 3);
    #[rustfmt::skip]
    let distances = vec![
        MAX, MAX, MAX,
        MAX, 2, MAX,
        0, 1, 2,
    ];
    let field = DistanceFieldView::new(&distances, 3, 3, MAX);
    let mut pursuers = vec![pursuer(0, 1, 1), pursuer(1, 2, 2)];
    let mut steps = Vec::new();

    Pursuit::default().resolve_moves(&mut pursuers, grid, field, &mut steps);

    assert_eq!(pursuers[0].position(), Position::new(2, 1));
    assert_eq!(pursuers[0].entity.direction, Direction::Down);
    assert_eq!(
        pursuers[1].position(),
        Position::new(2, 2),
        "pursuer 1 cannot enter the cell pursuer 0 just took"
    );
    assert_eq!(steps.len(), 1);
}
