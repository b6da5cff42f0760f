pub mod rig;
pub mod runner;

pub use rig::{SimGyro, SimPanel, SimShip};
pub use runner::{run, run_with, TickRecord};
