/// Grid cell symbols.
/// The grid is display state only; what a cell means lives here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Empty,
    Unknown,  // an uncaught creature
    Player,
    Captured, // where a creature was caught
    Trophy,   // the player's cell once everything is caught
}

impl Cell {
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty    => '.',
            Cell::Unknown  => '❓',
            Cell::Player   => '💂',
            Cell::Captured => '👍',
            Cell::Trophy   => '🏆',
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}
