use nalgebra::Vector3;

use super::action::{Action, ActionHost, ActionTable, Step};
use super::module::{FlightModule, Rig};
use crate::config::options::SPACE_MAIN_THRUST;
use crate::config::ConfigStore;
use crate::error::Result;
use crate::helpers::equal_with_margin;
use crate::io::panel::{format_unsigned, progress_bar};
use crate::vehicle::{Direction, ShipController};

// ---------------------------------------------------------------------------
// Vector module: free-space alignment and braking
// ---------------------------------------------------------------------------

/// Misalignment (rad) under which braking hands thrust back to the dampeners.
pub const ANGLE_THRESHOLD: f64 = 0.01;

/// Speed (m/s) under which braking is complete.
pub const SPEED_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct VectorState {
    pub thrust_vector: Vector3<f64>, // grid frame
    pub start_speed: f64,            // m/s when braking began
}

impl VectorState {
    /// Point the main thrust axis along `target`. A zero velocity has no
    /// direction, so the previous target is kept.
    fn target_velocity(&self, rig: &mut Rig<'_>, sign: f64) {
        if let Some(dir) = rig.ship.linear_velocity().try_normalize(0.0) {
            rig.gyros.set_target_orientation(self.thrust_vector, dir * sign);
        }
    }
}

impl ActionHost for VectorState {
    fn on_activated(&mut self, action: &Action<Self>, rig: &mut Rig<'_>) {
        rig.gyros.set_override(action.execute.is_some());
    }
}

fn disable(_s: &mut VectorState, rig: &mut Rig<'_>, _args: &[String]) {
    rig.gyros.set_override(false);
}

fn brake_init(s: &mut VectorState, rig: &mut Rig<'_>, _args: &[String]) {
    s.start_speed = rig.ship.ship_speed();
    rig.ship.set_dampeners(false);
}

fn brake(s: &mut VectorState, rig: &mut Rig<'_>) -> Step {
    s.target_velocity(rig, 1.0);

    if equal_with_margin(rig.gyros.angle(), 0.0, ANGLE_THRESHOLD) {
        rig.ship.set_dampeners(true);
    }
    if rig.ship.ship_speed() < SPEED_THRESHOLD {
        tracing::info!(start_speed = s.start_speed, "braking complete");
        return Step::Switch("disabled");
    }
    Step::Continue
}

fn prograde(s: &mut VectorState, rig: &mut Rig<'_>) -> Step {
    s.target_velocity(rig, -1.0);
    Step::Continue
}

fn retrograde(s: &mut VectorState, rig: &mut Rig<'_>) -> Step {
    s.target_velocity(rig, 1.0);
    Step::Continue
}

pub struct VectorModule {
    actions: ActionTable<VectorState>,
    state: VectorState,
}

impl VectorModule {
    /// Resolve the configured main thrust direction against the controller
    /// block; an unknown direction keyword is fatal.
    pub fn new(config: &ConfigStore, ship: &dyn ShipController) -> Result<Self> {
        let direction: Direction = config.require::<String>(SPACE_MAIN_THRUST)?.parse()?;
        Ok(Self::with_thrust(direction.of(&ship.orientation())))
    }

    pub fn with_thrust(thrust_vector: Vector3<f64>) -> Self {
        let mut actions = ActionTable::new();
        actions.add_action("disabled", Some(disable), None);
        actions.add_action("brake", Some(brake_init), Some(brake));
        actions.add_action("prograde", None, Some(prograde));
        actions.add_action("retrograde", None, Some(retrograde));

        Self { actions, state: VectorState { thrust_vector, start_speed: 0.0 } }
    }

    pub fn state(&self) -> &VectorState {
        &self.state
    }

    fn print_status(&mut self, ship: &dyn ShipController) {
        let mode = self.actions.active_name().unwrap_or_default().to_string();
        self.actions.print_line("  VECTOR MODULE ACTIVE");
        self.actions.print_line(&format!("  MODE: {}\n", mode.to_uppercase()));

        let output = if mode == "brake" {
            progress_bar((ship.ship_speed() / self.state.start_speed).abs())
        } else {
            format!(" Speed: {} m/s", format_unsigned(ship.ship_speed().abs(), 3))
        };
        self.actions.print_line(&output);
    }
}

impl FlightModule for VectorModule {
    fn process_command(&mut self, args: &[&str], rig: &mut Rig<'_>) -> bool {
        self.actions.process_command(args, &mut self.state, rig)
    }

    fn tick(&mut self, rig: &mut Rig<'_>) {
        self.actions.begin_tick();
        self.print_status(&*rig.ship);
        if rig.gyros.is_override() {
            self.actions.execute(&mut self.state, rig);
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
        "vector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlightAssistError;
    use crate::gnc::GyroController;
    use crate::io::panel::PROGRESS_BAR_WIDTH;
    use crate::sim::{SimGyro, SimShip};
    use crate::vehicle::Gyro;

    fn gyros() -> GyroController {
        GyroController::new(vec![Box::new(SimGyro::default()) as Box<dyn Gyro>], 0.2)
    }

    fn drifting(v: Vector3<f64>) -> SimShip {
        SimShip { velocity: v, ..SimShip::default() }
    }

    #[test]
    fn thrust_axis_from_config() {
        let config = ConfigStore::defaults();
        let v = VectorModule::new(&config, &SimShip::default()).unwrap();
        assert_eq!(v.state().thrust_vector, Vector3::z());

        let text = config.text().replace("spaceMainThrust=backward", "spaceMainThrust=Down");
        let config = ConfigStore::parse(&text).unwrap();
        let v = VectorModule::new(&config, &SimShip::default()).unwrap();
        assert_eq!(v.state().thrust_vector, -Vector3::y());
    }

    #[test]
    fn unknown_thrust_direction_is_fatal() {
        let text = ConfigStore::defaults()
            .text()
            .replace("spaceMainThrust=backward", "spaceMainThrust=sideways");
        let config = ConfigStore::parse(&text).unwrap();
        match VectorModule::new(&config, &SimShip::default()) {
            Err(FlightAssistError::UnknownDirection(d)) => assert_eq!(d, "sideways"),
            Err(e) => panic!("unexpected error {e}"),
            Ok(_) => panic!("construction should fail"),
        }
    }

    #[test]
    fn brake_runs_to_completion() {
        let mut v = VectorModule::with_thrust(Vector3::z());
        let mut g = gyros();
        let mut ship = drifting(Vector3::new(0.0, 0.0, 100.0));
        {
            let mut rig = Rig { gyros: &mut g, ship: &mut ship };
            assert!(v.process_command(&["vector", "brake"], &mut rig));
            assert!(rig.gyros.is_override());
            assert!(!rig.ship.dampeners());
            assert_eq!(v.state().start_speed, 100.0);

            // thrust already points along velocity: aligned, dampeners back on
            v.tick(&mut rig);
            assert_eq!(rig.gyros.angle(), 0.0);
            assert!(rig.ship.dampeners());
            assert_eq!(v.active_action(), Some("brake"));
        }

        ship.velocity = Vector3::new(0.0, 0.0, 0.2);
        let mut rig = Rig { gyros: &mut g, ship: &mut ship };
        v.tick(&mut rig);
        assert_eq!(v.active_action(), Some("disabled"));
        assert!(!rig.gyros.is_override());
    }

    #[test]
    fn brake_keeps_dampeners_off_while_turning() {
        let mut v = VectorModule::with_thrust(Vector3::z());
        let mut g = gyros();
        let mut ship = drifting(Vector3::new(50.0, 0.0, 0.0));
        let mut rig = Rig { gyros: &mut g, ship: &mut ship };
        v.process_command(&["vector", "brake"], &mut rig);
        v.tick(&mut rig);
        assert!((rig.gyros.angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert!(!rig.ship.dampeners());
    }

    #[test]
    fn prograde_and_retrograde_targets() {
        let mut v = VectorModule::with_thrust(Vector3::z());
        let mut g = gyros();
        let mut ship = drifting(Vector3::new(0.0, 0.0, 20.0));
        let mut rig = Rig { gyros: &mut g, ship: &mut ship };

        v.process_command(&["vector", "retrograde"], &mut rig);
        v.tick(&mut rig);
        assert_eq!(rig.gyros.angle(), 0.0);

        v.process_command(&["vector", "PROGRADE"], &mut rig);
        v.tick(&mut rig);
        assert_eq!(rig.gyros.angle(), std::f64::consts::PI);
        assert_eq!(v.active_action(), Some("prograde"));
    }

    #[test]
    fn zero_velocity_keeps_last_target() {
        let mut v = VectorModule::with_thrust(Vector3::z());
        let mut g = gyros();
        let mut ship = drifting(Vector3::zeros());
        let mut rig = Rig { gyros: &mut g, ship: &mut ship };
        v.process_command(&["vector", "retrograde"], &mut rig);
        v.tick(&mut rig);
        let (p, y, r) = rig.gyros.gyros()[0].rates();
        assert!(p.is_finite() && y.is_finite() && r.is_finite());
    }

    #[test]
    fn disabled_skips_executor() {
        let mut v = VectorModule::with_thrust(Vector3::z());
        let mut g = gyros();
        let mut ship = drifting(Vector3::new(10.0, 0.0, 0.0));
        let mut rig = Rig { gyros: &mut g, ship: &mut ship };
        v.process_command(&["vector", "prograde"], &mut rig);
        v.process_command(&["vector", "disabled"], &mut rig);
        v.tick(&mut rig);
        assert!(!rig.gyros.is_override());
        assert_eq!(rig.gyros.angle(), 0.0);
    }

    #[test]
    fn brake_progress_bar() {
        let mut v = VectorModule::with_thrust(Vector3::z());
        let mut g = gyros();
        let mut ship = drifting(Vector3::new(0.0, 0.0, 100.0));
        {
            let mut rig = Rig { gyros: &mut g, ship: &mut ship };
            v.process_command(&["vector", "brake"], &mut rig);
        }
        ship.velocity = Vector3::new(0.0, 0.0, 40.0);
        let mut rig = Rig { gyros: &mut g, ship: &mut ship };
        v.tick(&mut rig);

        let filled = format!("|{}{}|", "#".repeat(15), " ".repeat(PROGRESS_BAR_WIDTH - 15));
        let expected = format!(
            "  VECTOR MODULE ACTIVE\n  MODE: BRAKE\n\n PROGRESS\n{0}\n{0}\n{0}\n\n",
            filled
        );
        assert_eq!(v.status_text(), expected);
    }

    #[test]
    fn speed_readout() {
        let mut v = VectorModule::with_thrust(Vector3::z());
        let mut g = gyros();
        let mut ship = drifting(Vector3::new(3.0, 4.0, 0.0));
        let mut rig = Rig { gyros: &mut g, ship: &mut ship };
        v.process_command(&["vector", "prograde"], &mut rig);
        v.tick(&mut rig);
        assert_eq!(
            v.status_text(),
            "  VECTOR MODULE ACTIVE\n  MODE: PROGRADE\n\n Speed: 005 m/s\n"
        );
    }
}
