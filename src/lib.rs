//! Stable-fluids grid simulation for driftgrid

pub mod advect;
pub mod analysis;
pub mod boundary;
pub mod config;
pub mod desktop;
pub mod error;
pub mod export;
pub mod grid;
pub mod render;
pub mod simulator;
pub mod solver;

pub use advect::advect;
pub use analysis::{AnalysisRecorder, FluidMetrics};
pub use boundary::{BoundaryMode, set_boundary};
pub use config::{Forcing, SimConfig};
pub use desktop::DesktopApp;
pub use error::ConfigError;
pub use export::ImageExporter;
pub use grid::{Axis, Field, Grid, VectorField};
pub use render::{Render, RenderFlags, Renderer};
pub use simulator::{Simulator, add_source};
pub use solver::{LinearSolver, compute_divergence};
