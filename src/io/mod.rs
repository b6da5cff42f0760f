pub mod csv;
pub mod panel;
