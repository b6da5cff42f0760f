pub mod options;
pub mod store;

pub use options::{default_options, ConfigOption};
pub use store::ConfigStore;
