pub mod config;
pub mod error;
pub mod gnc;
pub mod helpers;
pub mod io;
pub mod program;
pub mod sim;
pub mod vehicle;

pub use error::{FlightAssistError, Result};
pub use program::{ActiveModule, FlightAssist};
