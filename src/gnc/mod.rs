pub mod action;
pub mod gyro;
pub mod hover;
pub mod module;
pub mod vector;

pub use action::{Action, ActionHost, ActionTable, Step};
pub use gyro::GyroController;
pub use hover::{HoverModule, HoverSettings};
pub use module::{FlightModule, Rig};
pub use vector::VectorModule;
