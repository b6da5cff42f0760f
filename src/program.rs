use crate::config::options::{GYRO_VELOCITY_SCALE, START_COMMAND};
use crate::config::ConfigStore;
use crate::error::Result;
use crate::gnc::{FlightModule, GyroController, HoverModule, HoverSettings, Rig, VectorModule};
use crate::io::panel::header;
use crate::vehicle::{Bindings, ShipController, TextPanel};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Which module receives ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveModule {
    Hover,
    Vector,
}

// ---------------------------------------------------------------------------
// Program: command routing and the per-tick entry point
// ---------------------------------------------------------------------------

pub struct FlightAssist<S> {
    config: ConfigStore,
    gyros: GyroController,
    ship: S,
    panel: Option<Box<dyn TextPanel>>,
    hover: HoverModule,
    vector: VectorModule,
    active: Option<ActiveModule>,
    display: String,
}

impl<S: ShipController> FlightAssist<S> {
    /// Build both modules from `config` and run the configured start
    /// command. Config and thrust-direction errors abort construction.
    pub fn new(config: ConfigStore, bindings: Bindings<S>) -> Result<Self> {
        let Bindings { controller, gyros, panel } = bindings;
        let gyros = GyroController::new(gyros, config.require(GYRO_VELOCITY_SCALE)?);
        let hover = HoverModule::new(&config)?;
        let vector = VectorModule::new(&config, &controller)?;

        let mut program = Self {
            config,
            gyros,
            ship: controller,
            panel,
            hover,
            vector,
            active: None,
            display: String::new(),
        };

        let start = program.config.get::<String>(START_COMMAND);
        if start.is_empty() {
            program.gyros.set_override(false);
        } else {
            tracing::info!(command = %start, "running start command");
            program.run_command(&start);
        }
        Ok(program)
    }

    /// Route a text command: `hover|vector <action> [args..]`, `stop` or
    /// `reset`. Anything else is ignored.
    pub fn run_command(&mut self, argument: &str) {
        let args: Vec<&str> = argument.split(' ').collect();
        let Some(first) = args.first() else {
            return;
        };

        match first.to_lowercase().as_str() {
            "hover" => self.select(ActiveModule::Hover),
            "vector" => self.select(ActiveModule::Vector),
            "stop" => {
                tracing::info!("flight assist stopped");
                self.active = None;
                self.gyros.set_override(false);
                return;
            }
            "reset" => {
                tracing::info!("config reset to defaults");
                self.config.reset();
                match HoverSettings::from_config(&self.config) {
                    Ok(settings) => self.hover.set_settings(settings),
                    Err(e) => tracing::warn!(error = %e, "hover settings not refreshed"),
                }
                return;
            }
            other => {
                tracing::warn!(command = %other, "unknown command ignored");
                return;
            }
        }

        let mut rig = Rig { gyros: &mut self.gyros, ship: &mut self.ship };
        let module: &mut dyn FlightModule = match self.active {
            Some(ActiveModule::Hover) => &mut self.hover,
            Some(ActiveModule::Vector) => &mut self.vector,
            None => return,
        };
        module.process_command(&args, &mut rig);
        if !module.has_executor() {
            rig.gyros.set_override(false);
        }
    }

    /// One simulation step: gyro update, active module, panel refresh.
    pub fn tick(&mut self) {
        self.gyros.tick();

        self.display = header(VERSION);
        let mut rig = Rig { gyros: &mut self.gyros, ship: &mut self.ship };
        let module: Option<&mut dyn FlightModule> = match self.active {
            Some(ActiveModule::Hover) => Some(&mut self.hover as &mut dyn FlightModule),
            Some(ActiveModule::Vector) => Some(&mut self.vector as &mut dyn FlightModule),
            None => None,
        };
        if let Some(module) = module {
            module.tick(&mut rig);
            self.display.push_str(module.status_text());
        }

        if let Some(panel) = self.panel.as_mut() {
            panel.write_text(&self.display, false);
        }
    }

    fn select(&mut self, module: ActiveModule) {
        if self.active != Some(module) {
            tracing::info!(?module, "module selected");
        }
        self.active = Some(module);
    }

    pub fn active(&self) -> Option<ActiveModule> {
        self.active
    }

    /// Active module's current action.
    pub fn active_action(&self) -> Option<&str> {
        match self.active? {
            ActiveModule::Hover => self.hover.active_action(),
            ActiveModule::Vector => self.vector.active_action(),
        }
    }

    /// Header plus module status as last written to the panel.
    pub fn display_text(&self) -> &str {
        &self.display
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn gyros(&self) -> &GyroController {
        &self.gyros
    }

    pub fn ship(&self) -> &S {
        &self.ship
    }

    pub fn ship_mut(&mut self) -> &mut S {
        &mut self.ship
    }

    pub fn hover(&self) -> &HoverModule {
        &self.hover
    }

    pub fn vector(&self) -> &VectorModule {
        &self.vector
    }
}
