use nalgebra::{Unit, UnitQuaternion, Vector3};

use super::action::{Action, ActionHost, ActionTable, Step};
use super::module::{FlightModule, Rig};
use crate::config::options::{GYRO_RESPONSIVENESS, MAX_PITCH, MAX_ROLL, SMART_DELAY_TIME};
use crate::config::ConfigStore;
use crate::error::Result;
use crate::helpers::{not_nan, DEG_TO_RAD, HALF_PI, RAD_TO_DEG};
use crate::io::panel::format_signed;
use crate::vehicle::orientation::{backward, down, forward, left, right};
use crate::vehicle::ShipController;

// ---------------------------------------------------------------------------
// Hover module: planetary leveling and speed holding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HoverSettings {
    pub gyro_responsiveness: i32,
    pub max_pitch: f64,       // deg
    pub max_roll: f64,        // deg
    pub smart_delay_time: i32, // ticks
}

impl HoverSettings {
    pub fn from_config(config: &ConfigStore) -> Result<Self> {
        Ok(Self {
            gyro_responsiveness: config.require(GYRO_RESPONSIVENESS)?,
            max_pitch: config.require(MAX_PITCH)?,
            max_roll: config.require(MAX_ROLL)?,
            smart_delay_time: config.require(SMART_DELAY_TIME)?,
        })
    }
}

impl Default for HoverSettings {
    fn default() -> Self {
        Self { gyro_responsiveness: 8, max_pitch: 45.0, max_roll: 45.0, smart_delay_time: 20 }
    }
}

/// Per-tick memory of the hover module.
#[derive(Debug, Clone, Default)]
pub struct HoverState {
    pub settings: HoverSettings,
    pub smart_delay_timer: i32,
    pub set_speed: f64,            // m/s, smart mode forward speed
    pub world_speed_forward: f64,  // m/s, gravity-aligned frame
    pub world_speed_right: f64,
    pub world_speed_up: f64,
    pub pitch: f64,                // deg between body forward and world up
    pub roll: f64,                 // deg between body right and world up
    pub desired_pitch: f64,        // deg
    pub desired_roll: f64,         // deg
}

impl HoverState {
    /// Tilt (deg) that brakes a horizontal speed error, saturating at `max`.
    fn tilt_for(&self, speed_error: f64, max: f64) -> f64 {
        (speed_error / self.settings.gyro_responsiveness as f64).atan() / HALF_PI * max
    }

    fn hold_speed(&mut self, set_speed: f64) {
        self.desired_pitch =
            self.tilt_for(self.world_speed_forward - set_speed, self.settings.max_pitch);
        self.desired_roll = self.tilt_for(self.world_speed_right, self.settings.max_roll);
    }

    fn calc_world_speed(&mut self, ship: &dyn ShipController) {
        let velocity = ship.linear_velocity().normalize();
        let up = -ship.natural_gravity().normalize();
        let m = ship.world_orientation();
        let speed = ship.ship_speed();

        self.world_speed_forward = not_nan(velocity.dot(&up.cross(&right(&m))) * speed);
        self.world_speed_right = not_nan(velocity.dot(&up.cross(&forward(&m))) * speed);
        self.world_speed_up = not_nan(velocity.dot(&up) * speed);
    }

    fn calc_pitch_and_roll(&mut self, ship: &dyn ShipController) {
        let up = -ship.natural_gravity().normalize();
        let m = ship.world_orientation();
        self.pitch = not_nan(forward(&m).dot(&up).acos() * RAD_TO_DEG);
        self.roll = not_nan(right(&m).dot(&up).acos() * RAD_TO_DEG);
    }

    /// Tilt the cockpit's down axis by the desired pitch/roll and align it
    /// with gravity.
    fn execute_maneuver(&self, rig: &mut Rig<'_>) {
        let reference = tilted_down(&rig.ship.orientation(), self.desired_pitch, self.desired_roll);
        let gravity = rig.ship.natural_gravity();
        rig.gyros.set_target_orientation(reference, gravity);
    }
}

/// Grid-frame "down" of a controller block after pitching about its left
/// axis then rolling about its backward axis (angles in degrees).
pub fn tilted_down(m: &nalgebra::Matrix3<f64>, pitch_deg: f64, roll_deg: f64) -> Vector3<f64> {
    let pitch_axis = Unit::new_normalize(left(m));
    let roll_axis = Unit::new_normalize(backward(m));
    let q_pitch = UnitQuaternion::from_axis_angle(&pitch_axis, pitch_deg * DEG_TO_RAD);
    let q_roll = UnitQuaternion::from_axis_angle(&roll_axis, roll_deg * DEG_TO_RAD);
    (q_pitch * q_roll) * down(m)
}

impl ActionHost for HoverState {
    fn on_activated(&mut self, action: &Action<Self>, rig: &mut Rig<'_>) {
        let driven = action.execute.is_some();
        rig.gyros.set_override(driven);
        if driven {
            rig.ship.set_dampeners(true);
        }
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

fn disable(_s: &mut HoverState, rig: &mut Rig<'_>, _args: &[String]) {
    rig.gyros.set_override(false);
}

fn smart_init(s: &mut HoverState, _rig: &mut Rig<'_>, args: &[String]) {
    s.smart_delay_timer = 0;
    s.set_speed = match args.first() {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "set speed is not a number, holding 0 m/s");
            0.0
        }),
        None => 0.0,
    };
}

fn smart(s: &mut HoverState, rig: &mut Rig<'_>) -> Step {
    if rig.ship.has_pilot_input() {
        s.desired_pitch = -(s.pitch - 90.0);
        s.desired_roll = s.roll - 90.0;
        rig.gyros.set_override(false);
        s.smart_delay_timer = 0;
    } else if s.smart_delay_timer > s.settings.smart_delay_time {
        rig.gyros.set_override(true);
        s.hold_speed(s.set_speed);
    } else {
        // ship stays free until the pilot has been hands-off long enough
        rig.gyros.set_override(false);
        s.smart_delay_timer += 1;
    }
    Step::Continue
}

fn stop(s: &mut HoverState, _rig: &mut Rig<'_>) -> Step {
    s.hold_speed(0.0);
    Step::Continue
}

fn glide(s: &mut HoverState, _rig: &mut Rig<'_>) -> Step {
    s.desired_pitch = 0.0;
    s.desired_roll = s.tilt_for(s.world_speed_right, s.settings.max_roll);
    Step::Continue
}

fn free_glide(s: &mut HoverState, _rig: &mut Rig<'_>) -> Step {
    s.desired_pitch = 0.0;
    s.desired_roll = 0.0;
    Step::Continue
}

// ---------------------------------------------------------------------------
// Module
// ---------------------------------------------------------------------------

pub struct HoverModule {
    actions: ActionTable<HoverState>,
    state: HoverState,
}

impl HoverModule {
    pub fn new(config: &ConfigStore) -> Result<Self> {
        Ok(Self::with_settings(HoverSettings::from_config(config)?))
    }

    pub fn with_settings(settings: HoverSettings) -> Self {
        let mut actions = ActionTable::new();
        actions.add_action("disabled", Some(disable), None);
        actions.add_action("smart", Some(smart_init), Some(smart));
        actions.add_action("stop", None, Some(stop));
        actions.add_action("glide", None, Some(glide));
        actions.add_action("freeglide", None, Some(free_glide));

        Self { actions, state: HoverState { settings, ..HoverState::default() } }
    }

    pub fn state(&self) -> &HoverState {
        &self.state
    }

    /// Swap in new tuning; step memory such as the settle counter is kept.
    pub fn set_settings(&mut self, settings: HoverSettings) {
        self.state.settings = settings;
    }

    fn print_status(&mut self) {
        let mode = self.actions.active_name().unwrap_or_default().to_uppercase();
        self.actions.print_line("    HOVER MODULE ACTIVE");
        self.actions.print_line(&format!("    MODE: {}", mode));
        if self.state.set_speed > 0.0 {
            self.actions.print_line(&format!("    SET SPEED: {}m/s", self.state.set_speed));
        } else {
            self.actions.print_line("");
        }
    }

    fn print_velocity(&mut self) {
        let s = &self.state;
        let line = format!(
            "\n Velocity (m/s)+\n X:{} Y:{} Z:{}",
            format_signed(s.world_speed_forward, 3),
            format_signed(s.world_speed_right, 3),
            format_signed(s.world_speed_up, 3),
        );
        self.actions.print_line(&line);
    }

    fn print_orientation(&mut self) {
        let line = format!(
            " Pitch: {}\u{b0} | Roll: {}\u{b0}",
            format_signed(90.0 - self.state.pitch, 2),
            format_signed((90.0 - self.state.roll) * -1.0, 2),
        );
        self.actions.print_line("\n Orientation");
        self.actions.print_line(&line);
    }
}

impl FlightModule for HoverModule {
    fn process_command(&mut self, args: &[&str], rig: &mut Rig<'_>) -> bool {
        self.actions.process_command(args, &mut self.state, rig)
    }

    fn tick(&mut self, rig: &mut Rig<'_>) {
        self.actions.begin_tick();

        let has_gravity = rig.ship.natural_gravity().norm() > 0.0;
        if !has_gravity {
            if self.actions.active_name() != Some("disabled") {
                tracing::info!("no planetary gravity, hover disabled");
            }
            self.actions.set_active("disabled", &[], &mut self.state, rig);
        }

        self.state.calc_world_speed(&*rig.ship);
        self.state.calc_pitch_and_roll(&*rig.ship);

        self.print_status();
        if has_gravity {
            self.print_velocity();
            self.print_orientation();
        } else {
            self.actions.print_line("\n\n   No Planetary Gravity");
        }

        self.actions.execute(&mut self.state, rig);
        if rig.gyros.is_override() {
            self.state.execute_maneuver(rig);
        }
    }

    fn status_text(&self) -> &str {
        self.actions.status_text()
    }

    fn active_action(&self) -> Option<&str> {
        self.actions.active_name()
    }

    fn has_executor(&self) -> bool {
        self.actions.executor().is_some()
    }

    fn name(&self) -> &str {
        "hover"
    }
}
