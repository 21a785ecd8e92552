/// One simulation step per key press: move, then check for a catch.
///
/// Order matters. The player marker is stamped at the new cell before the
/// catch check, so a catch overwrites it with the captured glyph.

use crate::domain::cell::Cell;
use crate::domain::movement::{self, Command, Move};
use crate::sim::event::GameEvent;
use crate::sim::world::{WorldState, GRID_SIZE};

/// Apply one command and return what happened.
pub fn step(world: &mut WorldState, cmd: Command) -> Vec<GameEvent> {
    let mut events = Vec::with_capacity(3);

    let old = world.player;
    let new = match movement::apply(cmd, old, GRID_SIZE) {
        Move::Stop => {
            events.push(GameEvent::QuitRequested);
            return events;
        }
        Move::To(pos) => pos,
    };

    world.set_cell(old, Cell::Empty);
    world.player = new;
    world.set_cell(new, Cell::Player);
    events.push(GameEvent::PlayerMoved { x: new.x, y: new.y });

    if let Some(ev) = check_capture(world) {
        events.extend(ev);
    }
    events
}

/// Catch the first active creature standing on the player's cell.
///
/// First match in collection order wins; at most one catch per call.
/// Returns `None` when nothing is there.
pub fn check_capture(world: &mut WorldState) -> Option<Vec<GameEvent>> {
    let here = world.player;
    let idx = world.active.iter().position(|c| c.pos() == here)?;

    let creature = world.active.remove(idx);
    log::info!("caught {} ({}) at {},{}", creature.name, creature.id, here.x, here.y);

    world.set_notification(creature.catch_message());
    world.set_cell(creature.pos(), Cell::Captured);

    let mut events = vec![GameEvent::CreatureCaught {
        id: creature.id.clone(),
        x: creature.x,
        y: creature.y,
    }];
    world.caught.push(creature);

    if world.all_caught() {
        world.set_cell(here, Cell::Trophy);
        events.push(GameEvent::AllCaught);
    }
    Some(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::creature::Position;
    use crate::sim::world::fixtures::creature;

    #[test]
    fn move_redraws_two_cells() {
        let mut w = WorldState::new("ash", vec![creature("1", 0, 0)]);
        let ev = step(&mut w, Command::Right);
        assert_eq!(ev, vec![GameEvent::PlayerMoved { x: 11, y: 10 }]);
        assert_eq!(w.cell(Position::new(10, 10)), Some(Cell::Empty));
        assert_eq!(w.cell(Position::new(11, 10)), Some(Cell::Player));
        assert_eq!(w.count(Cell::Player), 1);
        assert_eq!(w.count(Cell::Unknown), 1);
    }

    #[test]
    fn escape_changes_nothing() {
        let mut w = WorldState::new("ash", vec![creature("1", 3, 3)]);
        step(&mut w, Command::Left);
        let before = w.clone();
        let ev = step(&mut w, Command::Escape);
        assert_eq!(ev, vec![GameEvent::QuitRequested]);
        assert_eq!(w.player, before.player);
        assert_eq!(w.grid, before.grid);
    }

    #[test]
    fn no_capture_before_first_move() {
        // Creature on the starting cell is not caught by initialisation.
        let w = WorldState::new("ash", vec![creature("1", 10, 10)]);
        assert_eq!(w.active.len(), 1);
        assert!(w.caught.is_empty());
        assert!(!w.all_caught());
    }

    #[test]
    fn stepping_onto_creature_catches_it() {
        let mut w = WorldState::new("ash", vec![creature("a", 10, 9), creature("b", 0, 0)]);
        let ev = step(&mut w, Command::Up);
        assert_eq!(ev, vec![
            GameEvent::PlayerMoved { x: 10, y: 9 },
            GameEvent::CreatureCaught { id: "a".into(), x: 10, y: 9 },
        ]);
        assert_eq!(w.active.len(), 1);
        assert_eq!(w.caught.len(), 1);
        assert_eq!(w.caught[0].id, "a");
        assert_eq!(w.cell(Position::new(10, 9)), Some(Cell::Captured));
        let note = w.take_notification().unwrap();
        assert!(note.contains("mon-a"));
    }

    #[test]
    fn only_first_of_stacked_creatures_is_caught() {
        let roster = vec![creature("x", 5, 5), creature("first", 11, 10), creature("second", 11, 10)];
        let mut w = WorldState::new("ash", roster);
        let total = w.active.len() + w.caught.len();

        step(&mut w, Command::Right);
        assert_eq!(w.caught.len(), 1);
        assert_eq!(w.caught[0].id, "first");
        assert_eq!(w.active.len() + w.caught.len(), total);

        // Step off and back on to get the second one.
        step(&mut w, Command::Left);
        step(&mut w, Command::Right);
        assert_eq!(w.caught.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), ["first", "second"]);
        assert_eq!(w.active.len(), 1);
    }

    #[test]
    fn last_catch_sets_trophy() {
        let mut w = WorldState::new("ash", vec![creature("only", 10, 11)]);
        let ev = step(&mut w, Command::Down);
        assert_eq!(ev.last(), Some(&GameEvent::AllCaught));
        assert!(w.all_caught());
        assert_eq!(w.cell(w.player), Some(Cell::Trophy));
    }

    #[test]
    fn later_notification_replaces_undelivered_one() {
        let mut w = WorldState::new("ash", vec![creature("a", 11, 10), creature("b", 12, 10), creature("c", 0, 0)]);
        step(&mut w, Command::Right);
        step(&mut w, Command::Right);
        let note = w.take_notification().unwrap();
        assert!(note.contains("mon-b"));
        assert!(w.take_notification().is_none());
    }
}
