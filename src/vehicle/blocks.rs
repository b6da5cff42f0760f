use nalgebra::{Matrix3, Vector3};

use super::orientation::RotationAxis;

// ---------------------------------------------------------------------------
// Host block capabilities
// ---------------------------------------------------------------------------

/// A gyroscope whose rotation rate can be overridden.
pub trait Gyro {
    /// Block orientation relative to the grid.
    fn orientation(&self) -> Matrix3<f64>;

    /// Block orientation in world space.
    fn world_orientation(&self) -> Matrix3<f64>;

    /// Maximum commandable rate on `axis`.
    fn max_rate(&self, axis: RotationAxis) -> f64;

    fn set_rates(&mut self, pitch: f64, yaw: f64, roll: f64);

    /// Commanded (pitch, yaw, roll).
    fn rates(&self) -> (f64, f64, f64);

    fn set_override(&mut self, enabled: bool);

    fn is_override(&self) -> bool;
}

/// Cockpit or remote control: vehicle telemetry plus pilot input.
pub trait ShipController {
    fn linear_velocity(&self) -> Vector3<f64>;

    /// Zero when the ship is outside planetary gravity.
    fn natural_gravity(&self) -> Vector3<f64>;

    fn ship_speed(&self) -> f64;

    /// Controller block orientation relative to the grid.
    fn orientation(&self) -> Matrix3<f64>;

    fn world_orientation(&self) -> Matrix3<f64>;

    fn move_indicator(&self) -> Vector3<f64>;

    fn rotation_indicator(&self) -> Vector3<f64>;

    fn dampeners(&self) -> bool;

    fn set_dampeners(&mut self, enabled: bool);

    /// True while the pilot is giving any move or rotation input.
    fn has_pilot_input(&self) -> bool {
        self.move_indicator().norm() > 0.0 || self.rotation_indicator().norm() > 0.0
    }
}

/// Display surface for status text.
pub trait TextPanel {
    fn write_text(&mut self, text: &str, append: bool);
}
