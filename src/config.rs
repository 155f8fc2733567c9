use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::solver::DEFAULT_ITERATIONS;

/// Strength of the reference forcing term.
pub const REFERENCE_FORCING: f32 = 500.0;

/// A constant velocity source re-applied at one cell every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forcing {
    /// Active cell `[i, j]`. `None` places it at the reference position
    /// for whatever resolution the simulation is built with.
    #[serde(default)]
    pub cell: Option<[usize; 2]>,
    pub velocity: Vec2,
}

impl Default for Forcing {
    fn default() -> Self {
        Self {
            cell: None,
            velocity: Vec2::X * REFERENCE_FORCING,
        }
    }
}

impl Forcing {
    pub fn at(i: usize, j: usize, velocity: Vec2) -> Self {
        Self {
            cell: Some([i, j]),
            velocity,
        }
    }

    /// Reference placement: a quarter of the way in along X, centred on Y.
    pub fn reference_cell(nx: usize, ny: usize) -> [usize; 2] {
        [(nx / 4).max(1), (ny / 2).max(1)]
    }

    /// The concrete cell this forcing acts on in an `nx * ny` grid.
    pub fn resolve(&self, nx: usize, ny: usize) -> Result<(usize, usize), ConfigError> {
        let [i, j] = self.cell.unwrap_or_else(|| Self::reference_cell(nx, ny));
        if i == 0 || i > nx || j == 0 || j > ny {
            return Err(ConfigError::ForcingOutOfRange {
                cell: [i, j],
                nx,
                ny,
            });
        }
        Ok((i, j))
    }
}

/// Parameters of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Active cells per axis.
    pub resolution: usize,
    pub domain_width: f32,
    pub domain_height: f32,
    pub viscosity: f32,
    pub diffusion: f32,
    pub dt: f32,
    /// Relaxation sweeps per diffusion or projection solve.
    pub iterations: usize,
    pub forcing: Option<Forcing>,
    /// Density injected per tick at the clicked cell.
    pub click_strength: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            resolution: 64,
            domain_width: 512.0,
            domain_height: 512.0,
            viscosity: 0.0001,
            diffusion: 0.0001,
            dt: 0.1,
            iterations: DEFAULT_ITERATIONS,
            forcing: Some(Forcing::default()),
            click_strength: 100.0,
        }
    }
}

impl SimConfig {
    pub fn new(
        resolution: usize,
        domain_width: f32,
        domain_height: f32,
        viscosity: f32,
        diffusion: f32,
        dt: f32,
    ) -> Self {
        Self {
            resolution,
            domain_width,
            domain_height,
            viscosity,
            diffusion,
            dt,
            ..Self::default()
        }
    }

    pub fn with_forcing(mut self, forcing: Option<Forcing>) -> Self {
        self.forcing = forcing;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution == 0 {
            return Err(ConfigError::InvalidResolution(self.resolution));
        }
        validate_time_step(self.dt)?;
        validate_viscosity(self.viscosity)?;
        validate_diffusion(self.diffusion)?;
        if !(self.domain_width > 0.0 && self.domain_height > 0.0)
            || !self.domain_width.is_finite()
            || !self.domain_height.is_finite()
        {
            return Err(ConfigError::InvalidDomain {
                width: self.domain_width,
                height: self.domain_height,
            });
        }
        if self.iterations == 0 {
            return Err(ConfigError::InvalidIterations(self.iterations));
        }
        if let Some(forcing) = &self.forcing {
            forcing.resolve(self.resolution, self.resolution)?;
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub(crate) fn validate_time_step(dt: f32) -> Result<(), ConfigError> {
    if dt > 0.0 && dt.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidTimeStep(dt))
    }
}

pub(crate) fn validate_viscosity(viscosity: f32) -> Result<(), ConfigError> {
    if viscosity >= 0.0 && viscosity.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NegativeViscosity(viscosity))
    }
}

pub(crate) fn validate_diffusion(diffusion: f32) -> Result<(), ConfigError> {
    if diffusion >= 0.0 && diffusion.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NegativeDiffusion(diffusion))
    }
}
