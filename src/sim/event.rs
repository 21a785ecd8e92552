/// Events emitted during a simulation step.
/// The session loop consumes these to decide when to persist and stop.

#[derive(Clone, Debug, PartialEq)]
#[allow(dead_code)]
pub enum GameEvent {
    PlayerMoved { x: i32, y: i32 },
    CreatureCaught { id: String, x: i32, y: i32 },
    AllCaught,
    QuitRequested,
}
