//! Parameters of a standard simulation run.
//!
//! Defaults reproduce the reference scenario: a 10 m cube of 1 m cells, one
//! blur and one source, 1000 steps of 0.1 s.

use crate::core_types::Vec3;
use crate::error::ConfigError;
use crate::grid::{GridGeometry, PollutionGrid};
use crate::simulation::PollutionSimulation;
use crate::updater::{Blur, Decay, Source};
use serde::{Deserialize, Serialize};

/// Grid extents and placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub breadth: usize,
    pub height: usize,
    /// Minimum corner of the grid (m)
    pub origin: [f32; 3],
    /// Per-axis cell edge length (m)
    pub cell_size: [f32; 3],
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            width: 10,
            breadth: 10,
            height: 10,
            origin: [0.0; 3],
            cell_size: [1.0; 3],
        }
    }
}

impl GridConfig {
    /// Validate into a geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Grid`] for invalid extents, cell sizes or origin.
    pub fn geometry(&self) -> Result<GridGeometry, ConfigError> {
        let geometry = GridGeometry::new(
            self.width,
            self.breadth,
            self.height,
            Vec3::from(self.origin),
            Vec3::from(self.cell_size),
        )?;
        Ok(geometry)
    }
}

/// Parameters of a [`Blur`] updater
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlurConfig {
    /// Exchange rate per face (particles/m³/s)
    pub blur: f32,
}

impl Default for BlurConfig {
    fn default() -> Self {
        BlurConfig {
            blur: Blur::DEFAULT_BLUR,
        }
    }
}

/// Parameters of a [`Source`] updater
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Injection rate per covered cell (particles/m³/s)
    pub pollution: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Ball radius (m)
    pub radius: f32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            pollution: Source::DEFAULT_POLLUTION,
            x: Source::DEFAULT_X,
            y: Source::DEFAULT_Y,
            z: Source::DEFAULT_Z,
            radius: Source::DEFAULT_RADIUS,
        }
    }
}

/// Parameters of a [`Decay`] updater
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayConfig {
    /// Fractional loss per second (1/s)
    pub rate: f32,
}

/// Complete description of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub grid: GridConfig,
    /// Number of steps for [`PollutionSimulation::run`]
    pub steps: u32,
    /// Time step (s)
    pub dt: f32,
    pub blur: Option<BlurConfig>,
    pub sources: Vec<SourceConfig>,
    pub decay: Option<DecayConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            grid: GridConfig::default(),
            steps: 1000,
            dt: 0.1,
            blur: Some(BlurConfig::default()),
            sources: vec![SourceConfig::default()],
            decay: None,
        }
    }
}

impl SimulationConfig {
    /// Check every parameter without building anything.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found: grid geometry, then time step,
    /// blur rate, source radii and decay rate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.geometry()?;

        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::InvalidTimeStep(self.dt));
        }

        if let Some(blur) = &self.blur {
            if !(blur.blur.is_finite() && blur.blur > 0.0) {
                return Err(ConfigError::InvalidBlur(blur.blur));
            }
        }

        for source in &self.sources {
            if !(source.radius.is_finite() && source.radius >= 0.0) {
                return Err(ConfigError::InvalidRadius(source.radius));
            }
        }

        if let Some(decay) = &self.decay {
            if !(decay.rate.is_finite() && decay.rate >= 0.0) {
                return Err(ConfigError::InvalidDecay(decay.rate));
            }
        }

        Ok(())
    }

    /// Build a simulation with an empty grid and updaters registered in the
    /// order blur, sources, decay.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if [`validate`](Self::validate) fails.
    pub fn build(&self) -> Result<PollutionSimulation, ConfigError> {
        self.validate()?;

        let grid = PollutionGrid::from_geometry(self.grid.geometry()?);
        let mut simulation = PollutionSimulation::new(grid);

        if let Some(blur) = &self.blur {
            simulation.add_updater(Box::new(Blur::new(blur.blur)));
        }
        for source in &self.sources {
            simulation.add_updater(Box::new(Source::new(
                source.pollution,
                source.x,
                source.y,
                source.z,
                source.radius,
            )));
        }
        if let Some(decay) = &self.decay {
            simulation.add_updater(Box::new(Decay::new(decay.rate)));
        }

        Ok(simulation)
    }
}
