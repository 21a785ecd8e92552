/// Movement rules: map one input command to a bounded position change.
///
/// Pure functions over `Position`; the grid redraw lives in `sim::step`.

use crate::domain::creature::Position;

/// One discrete input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    Escape,
    Other,
}

/// Result of applying a command.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Move {
    /// Position after the command (unchanged at an edge or for `Other`).
    To(Position),
    /// The session should end. Position is untouched.
    Stop,
}

/// Apply `cmd` to `pos` inside a `size` × `size` grid.
/// Walking into an edge is a no-op, not an error.
pub fn apply(cmd: Command, pos: Position, size: usize) -> Move {
    let max = size as i32 - 1;
    let Position { mut x, mut y } = pos;

    match cmd {
        Command::Up    => if y > 0 { y -= 1 },
        Command::Down  => if y < max { y += 1 },
        Command::Left  => if x > 0 { x -= 1 },
        Command::Right => if x < max { x += 1 },
        Command::Escape => return Move::Stop,
        Command::Other => {}
    }

    Move::To(Position { x, y })
}
