use nalgebra::{Matrix3, Vector3};

use crate::vehicle::{Gyro, RotationAxis, ShipController, TextPanel};

// ---------------------------------------------------------------------------
// In-memory blocks. No physics: telemetry is whatever the caller sets.
// ---------------------------------------------------------------------------

/// Stock large-grid gyro limit, rad/s.
pub const DEFAULT_GYRO_MAX_RATE: f64 = std::f64::consts::PI;

#[derive(Debug, Clone)]
pub struct SimGyro {
    pub orientation: Matrix3<f64>,       // block → grid
    pub world_orientation: Matrix3<f64>, // block → world
    pub max_rate: f64,                   // rad/s, every axis
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
    pub gyro_override: bool,
}

impl SimGyro {
    pub fn new(orientation: Matrix3<f64>, world_orientation: Matrix3<f64>) -> Self {
        Self { orientation, world_orientation, ..Self::default() }
    }
}

impl Default for SimGyro {
    fn default() -> Self {
        Self {
            orientation: Matrix3::identity(),
            world_orientation: Matrix3::identity(),
            max_rate: DEFAULT_GYRO_MAX_RATE,
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            gyro_override: false,
        }
    }
}

impl Gyro for SimGyro {
    fn orientation(&self) -> Matrix3<f64> { self.orientation }
    fn world_orientation(&self) -> Matrix3<f64> { self.world_orientation }
    fn max_rate(&self, _axis: RotationAxis) -> f64 { self.max_rate }

    fn set_rates(&mut self, pitch: f64, yaw: f64, roll: f64) {
        self.pitch = pitch;
        self.yaw = yaw;
        self.roll = roll;
    }

    fn rates(&self) -> (f64, f64, f64) { (self.pitch, self.yaw, self.roll) }
    fn set_override(&mut self, enabled: bool) { self.gyro_override = enabled; }
    fn is_override(&self) -> bool { self.gyro_override }
}

#[derive(Debug, Clone)]
pub struct SimShip {
    pub velocity: Vector3<f64>,          // m/s, world
    pub gravity: Vector3<f64>,           // m/s^2, world
    pub orientation: Matrix3<f64>,       // cockpit → grid
    pub world_orientation: Matrix3<f64>, // cockpit → world
    pub move_input: Vector3<f64>,
    pub rotation_input: Vector3<f64>,
    pub dampeners: bool,
}

impl SimShip {
    /// Level ship at rest under 1 g (world up = +Y).
    pub fn hovering() -> Self {
        Self { gravity: Vector3::new(0.0, -9.81, 0.0), ..Self::default() }
    }
}

impl Default for SimShip {
    fn default() -> Self {
        Self {
            velocity: Vector3::zeros(),
            gravity: Vector3::zeros(),
            orientation: Matrix3::identity(),
            world_orientation: Matrix3::identity(),
            move_input: Vector3::zeros(),
            rotation_input: Vector3::zeros(),
            dampeners: true,
        }
    }
}

impl ShipController for SimShip {
    fn linear_velocity(&self) -> Vector3<f64> { self.velocity }
    fn natural_gravity(&self) -> Vector3<f64> { self.gravity }
    fn ship_speed(&self) -> f64 { self.velocity.norm() }
    fn orientation(&self) -> Matrix3<f64> { self.orientation }
    fn world_orientation(&self) -> Matrix3<f64> { self.world_orientation }
    fn move_indicator(&self) -> Vector3<f64> { self.move_input }
    fn rotation_indicator(&self) -> Vector3<f64> { self.rotation_input }
    fn dampeners(&self) -> bool { self.dampeners }
    fn set_dampeners(&mut self, enabled: bool) { self.dampeners = enabled; }
}

/// Panel that keeps the last written text.
#[derive(Debug, Clone, Default)]
pub struct SimPanel {
    pub text: String,
}

impl TextPanel for SimPanel {
    fn write_text(&mut self, text: &str, append: bool) {
        if !append {
            self.text.clear();
        }
        self.text.push_str(text);
    }
}
