use super::blocks::{Gyro, ShipController, TextPanel};
use crate::error::{FlightAssistError, Result};

// ---------------------------------------------------------------------------
// Block group: the blocks a program is bound to
// ---------------------------------------------------------------------------

pub struct BlockGroup<S> {
    pub name: String,
    pub controllers: Vec<S>,
    pub gyros: Vec<Box<dyn Gyro>>,
    pub panels: Vec<Box<dyn TextPanel>>,
}

/// Blocks picked out of a group for the program to drive.
pub struct Bindings<S> {
    pub controller: S,
    pub gyros: Vec<Box<dyn Gyro>>,
    pub panel: Option<Box<dyn TextPanel>>,
}

impl<S: ShipController> BlockGroup<S> {
    /// Take the first controller, every gyro and the first panel.
    pub fn bind(self) -> Result<Bindings<S>> {
        let BlockGroup { name, controllers, gyros, panels } = self;

        let controller = controllers
            .into_iter()
            .next()
            .ok_or_else(|| FlightAssistError::NoShipController { group: name.clone() })?;
        if gyros.is_empty() {
            return Err(FlightAssistError::NoGyros { group: name });
        }
        let panel = panels.into_iter().next();

        tracing::info!(
            group = %name,
            gyros = gyros.len(),
            panel = panel.is_some(),
            "bound block group"
        );
        Ok(Bindings { controller, gyros, panel })
    }
}

// ---------------------------------------------------------------------------
// Block group builder
// ---------------------------------------------------------------------------

pub struct BlockGroupBuilder<S> {
    name: String,
    controllers: Vec<S>,
    gyros: Vec<Box<dyn Gyro>>,
    panels: Vec<Box<dyn TextPanel>>,
}

impl<S> BlockGroupBuilder<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), controllers: vec![], gyros: vec![], panels: vec![] }
    }

    pub fn controller(mut self, c: S) -> Self { self.controllers.push(c); self }
    pub fn gyro(mut self, g: impl Gyro + 'static) -> Self { self.gyros.push(Box::new(g)); self }
    pub fn panel(mut self, p: impl TextPanel + 'static) -> Self {
        self.panels.push(Box::new(p));
        self
    }

    pub fn build(self) -> BlockGroup<S> {
        BlockGroup {
            name: self.name,
            controllers: self.controllers,
            gyros: self.gyros,
            panels: self.panels,
        }
    }
}
