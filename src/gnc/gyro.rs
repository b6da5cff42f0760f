use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::vehicle::orientation::to_local;
use crate::vehicle::{Gyro, RotationAxis};

// ---------------------------------------------------------------------------
// Gyro controller: reference/target alignment → per-gyro rate commands
// ---------------------------------------------------------------------------

/// Smallest rate scale applied to a non-zero correction axis.
pub const MIN_GYRO_RATE_SCALE: f64 = 0.001;

/// Default proportional gain on misalignment.
pub const DEFAULT_GYRO_VELOCITY_SCALE: f64 = 0.2;

/// Drives every bound gyro so that a grid-frame reference vector turns
/// toward a world-frame target vector.
pub struct GyroController {
    gyros: Vec<Box<dyn Gyro>>,
    velocity_scale: f64,
    gyro_override: bool,
    reference: Vector3<f64>,   // grid frame
    target: Vector3<f64>,      // world frame
    angle: f64,                // rad, [0, pi]
}

impl GyroController {
    pub fn new(gyros: Vec<Box<dyn Gyro>>, velocity_scale: f64) -> Self {
        Self {
            gyros,
            velocity_scale,
            gyro_override: false,
            reference: Vector3::zeros(),
            target: Vector3::zeros(),
            angle: 0.0,
        }
    }

    pub fn tick(&mut self) {
        self.update_gyro_rates();
    }

    /// Hand every gyro to this controller, or release them all.
    pub fn set_override(&mut self, enabled: bool) {
        self.gyro_override = enabled;
        for g in &mut self.gyros {
            g.set_override(enabled);
        }
    }

    pub fn set_target_orientation(&mut self, reference: Vector3<f64>, target: Vector3<f64>) {
        self.reference = reference;
        self.target = target;
        self.update_gyro_rates();
    }

    pub fn is_override(&self) -> bool {
        self.gyro_override
    }

    /// Misalignment from the last rate update, rad.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn velocity_scale(&self) -> f64 {
        self.velocity_scale
    }

    pub fn gyros(&self) -> &[Box<dyn Gyro>] {
        &self.gyros
    }

    fn update_gyro_rates(&mut self) {
        if !self.gyro_override {
            return;
        }

        for g in &mut self.gyros {
            let local_reference = to_local(&g.orientation(), &self.reference);
            let local_target = to_local(&g.world_orientation(), &self.target);

            let axis = local_reference.cross(&local_target);
            let sin = axis.norm();
            let mut angle = sin.atan2((1.0 - sin * sin).max(0.0).sqrt());
            if local_reference.dot(&local_target) < 0.0 {
                angle = PI;
            }
            self.angle = angle;

            // Exactly parallel or anti-parallel vectors leave a zero axis, so
            // no rotation is commanded. Close to anti-parallel the direction
            // is dominated by rounding noise; that instability is kept as is.
            let axis = axis.try_normalize(0.0).unwrap_or_else(Vector3::zeros);
            let scale = MIN_GYRO_RATE_SCALE
                .max(g.max_rate(RotationAxis::Roll) * (angle / PI) * self.velocity_scale);
            let cmd = axis * scale;

            g.set_rates(-cmd.x, -cmd.y, -cmd.z);
        }
    }
}
