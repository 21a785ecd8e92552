pub mod cell;
pub mod creature;
pub mod movement;
