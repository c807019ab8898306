//! The fixed maze a session is played on.

use maze_chase_core::Position;

/// Row-by-row glyphs of the classic maze. Rows 8 and 9 are open tunnels.
pub(crate) const CLASSIC_MAZE: [&str; 18] = [
    "######################################",
    "#....................................#",
    "#....................................#",
    "#....................................#",
    "#     ##########################     #",
    "#     #........................#     #",
    "#     #........................#     #",
    "#     #........................#     #",
    "                                      ",
    "                                      ",
    "#     #........................#     #",
    "#     #........................#     #",
    "#     #........................#     #",
    "#     ##########################     #",
    "#....................................#",
    "#....................................#",
    "#....................................#",
    "######################################",
];

/// Cell the player occupies when a classic session begins.
pub(crate) const PLAYER_SPAWN: Position = Position::new(9, 19);

/// Pursuer spawn cells in resolution order.
pub(crate) const PURSUER_SPAWNS: [Position; 6] = [
    Position::new(1, 2),
    Position::new(16, 36),
    Position::new(9, 36),
    Position::new(1, 36),
    Position::new(16, 2),
    Position::new(9, 2),
];
