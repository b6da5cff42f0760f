use super::gyro::GyroController;
use crate::vehicle::ShipController;

/// Blocks a flight module drives during one call.
pub struct Rig<'a> {
    pub gyros: &'a mut GyroController,
    pub ship: &'a mut dyn ShipController,
}

/// Trait for flight-assist modules.
///
/// A module owns its action table and step state; the gyro controller and
/// ship controller are lent to it for each command or tick.
pub trait FlightModule {
    /// Apply a tokenized command (`<module> <action> [args..]`).
    /// Returns false when the action name is not registered.
    fn process_command(&mut self, args: &[&str], rig: &mut Rig<'_>) -> bool;

    /// Recompute telemetry, run the active action and refresh status text.
    fn tick(&mut self, rig: &mut Rig<'_>);

    /// Status lines accumulated during the last tick.
    fn status_text(&self) -> &str;

    fn active_action(&self) -> Option<&str>;

    /// True when the active action runs every tick.
    fn has_executor(&self) -> bool;

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}
