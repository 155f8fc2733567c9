use std::fmt;

/// Everything that can go wrong while building or reconfiguring a simulation.
///
/// The numeric kernel itself has no runtime failure modes; all checks happen
/// up front so a constructed `Simulator` always steps in bounded time.
#[derive(Debug)]
pub enum ConfigError {
    InvalidResolution(usize),
    InvalidTimeStep(f32),
    NegativeViscosity(f32),
    NegativeDiffusion(f32),
    InvalidDomain { width: f32, height: f32 },
    InvalidIterations(usize),
    ForcingOutOfRange { cell: [usize; 2], nx: usize, ny: usize },
    GridTooLarge { nx: usize, ny: usize },
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidResolution(n) => {
                write!(f, "grid resolution must be at least 1, got {}", n)
            }
            ConfigError::InvalidTimeStep(dt) => {
                write!(f, "time step must be positive and finite, got {}", dt)
            }
            ConfigError::NegativeViscosity(v) => {
                write!(f, "viscosity must be non-negative, got {}", v)
            }
            ConfigError::NegativeDiffusion(d) => {
                write!(f, "diffusion must be non-negative, got {}", d)
            }
            ConfigError::InvalidDomain { width, height } => write!(
                f,
                "domain size must be positive, got {}x{}",
                width, height
            ),
            ConfigError::InvalidIterations(n) => {
                write!(f, "relaxation needs at least one sweep, got {}", n)
            }
            ConfigError::ForcingOutOfRange { cell, nx, ny } => write!(
                f,
                "forcing cell ({}, {}) lies outside the active region 1..={} x 1..={}",
                cell[0], cell[1], nx, ny
            ),
            ConfigError::GridTooLarge { nx, ny } => {
                write!(f, "grid of {}x{} cells cannot be addressed", nx, ny)
            }
            ConfigError::Io(err) => write!(f, "failed to read config: {}", err),
            ConfigError::Parse(err) => write!(f, "failed to parse config: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}
