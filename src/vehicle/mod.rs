pub mod binding;
pub mod blocks;
pub mod orientation;

pub use binding::{Bindings, BlockGroup, BlockGroupBuilder};
pub use blocks::{Gyro, ShipController, TextPanel};
pub use orientation::{Direction, RotationAxis};
