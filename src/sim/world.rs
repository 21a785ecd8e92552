/// WorldState: everything one session owns.
///
/// ## Grid
///
/// The grid is derived display state. `rebuild_grid()` recomputes it from
/// the player and the active creatures; movement and capture then stamp
/// individual cells instead of rebuilding.
///
/// ## Collections
///
///   - `active`: creatures still on the board, in the order received.
///   - `caught`: creatures taken off the board, in catch order.
///
/// A creature lives in exactly one of them.

use crate::domain::cell::Cell;
use crate::domain::creature::{Creature, Position};

pub const GRID_SIZE: usize = 20;

pub type Grid = [[Cell; GRID_SIZE]; GRID_SIZE];

#[derive(Clone, Debug)]
pub struct WorldState {
    pub player_name: String,
    pub player: Position,
    pub grid: Grid,
    pub active: Vec<Creature>,
    pub caught: Vec<Creature>,
    /// Pending one-shot message; a newer one replaces an undelivered one.
    notification: Option<String>,
}

impl WorldState {
    /// Start a session: player at the grid centre, creatures drawn as unknowns.
    pub fn new(player_name: impl Into<String>, roster: Vec<Creature>) -> Self {
        let centre = (GRID_SIZE / 2) as i32;
        let mut world = WorldState {
            player_name: player_name.into(),
            player: Position::new(centre, centre),
            grid: [[Cell::Empty; GRID_SIZE]; GRID_SIZE],
            active: roster,
            caught: Vec::new(),
            notification: None,
        };
        world.rebuild_grid();
        world
    }

    /// Clear every cell, stamp each in-range creature, then the player.
    pub fn rebuild_grid(&mut self) {
        self.grid = [[Cell::Empty; GRID_SIZE]; GRID_SIZE];
        for c in &self.active {
            let pos = c.pos();
            if pos.in_bounds(GRID_SIZE) {
                self.grid[pos.y as usize][pos.x as usize] = Cell::Unknown;
            }
        }
        let player = self.player;
        self.set_cell(player, Cell::Player);
    }

    #[cfg(test)]
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        if pos.in_bounds(GRID_SIZE) {
            Some(self.grid[pos.y as usize][pos.x as usize])
        } else {
            None
        }
    }

    /// Stamp one cell. Out-of-range positions are ignored.
    pub fn set_cell(&mut self, pos: Position, cell: Cell) {
        if pos.in_bounds(GRID_SIZE) {
            self.grid[pos.y as usize][pos.x as usize] = cell;
        }
    }

    pub fn all_caught(&self) -> bool {
        self.active.is_empty()
    }

    pub fn set_notification(&mut self, msg: impl Into<String>) {
        self.notification = Some(msg.into());
    }

    /// Hand out the pending notification, at most once.
    pub fn take_notification(&mut self) -> Option<String> {
        self.notification.take()
    }

    #[cfg(test)]
    pub fn count(&self, cell: Cell) -> usize {
        self.grid.iter().flatten().filter(|c| **c == cell).count()
    }
}

#[cfg(test)]
pub mod fixtures {
    use crate::domain::creature::{Creature, Experience};

    pub fn creature(id: &str, x: i32, y: i32) -> Creature {
        Creature {
            id: id.into(),
            name: format!("mon-{id}"),
            types: vec!["normal".into()],
            stats: Default::default(),
            exp: Experience::from("10"),
            when_attacked: Default::default(),
            x,
            y,
        }
    }
}
