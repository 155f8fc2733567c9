use std::fmt;

use log::info;

use crate::grid::{Field, Grid};
use crate::solver::compute_divergence;

#[derive(Debug, Clone)]
pub struct FluidMetrics {
    pub total_mass: f32,
    pub max_density: f32,
    pub avg_density: f32,
    pub total_kinetic_energy: f32,
    pub max_velocity: f32,
    pub avg_velocity: f32,
    /// Signed sum of the divergence over the active cells.
    pub net_divergence: f32,
    /// Sum of |divergence| over the active cells.
    pub abs_divergence: f32,
    pub vorticity: f32,
    pub frame: u64,
}

impl FluidMetrics {
    pub fn analyze(grid: &Grid, frame: u64) -> Self {
        let (nx, ny) = (grid.nx(), grid.ny());
        let cells = (nx * ny) as f32;

        let mut divergence = Field::new(nx, ny);
        compute_divergence(&grid.velocity, &mut divergence);

        let mut total_mass: f32 = 0.0;
        let mut max_density: f32 = 0.0;
        let mut total_kinetic_energy: f32 = 0.0;
        let mut max_velocity: f32 = 0.0;
        let mut velocity_sum: f32 = 0.0;
        let mut net_divergence: f32 = 0.0;
        let mut abs_divergence: f32 = 0.0;
        let mut total_vorticity: f32 = 0.0;

        let u = &grid.velocity.x;
        let v = &grid.velocity.y;

        for j in 1..=ny {
            for i in 1..=nx {
                let density = grid.density[(i, j)];
                let speed = grid.velocity.at(i, j).length();

                total_mass += density;
                max_density = max_density.max(density);
                total_kinetic_energy += 0.5 * density * speed * speed;
                max_velocity = max_velocity.max(speed);
                velocity_sum += speed;

                let div = divergence[(i, j)];
                net_divergence += div;
                abs_divergence += div.abs();

                // ∂v/∂x - ∂u/∂y
                let curl = 0.5 * (v[(i + 1, j)] - v[(i - 1, j)] - u[(i, j + 1)] + u[(i, j - 1)]);
                total_vorticity += curl.abs();
            }
        }

        Self {
            total_mass,
            max_density,
            avg_density: total_mass / cells,
            total_kinetic_energy,
            max_velocity,
            avg_velocity: velocity_sum / cells,
            net_divergence,
            abs_divergence,
            vorticity: total_vorticity / cells,
            frame,
        }
    }
}

impl fmt::Display for FluidMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frame {} Metrics:", self.frame)?;
        writeln!(f, "  Total Mass: {:.6}", self.total_mass)?;
        writeln!(f, "  Max Density: {:.6}", self.max_density)?;
        writeln!(f, "  Avg Density: {:.6}", self.avg_density)?;
        writeln!(f, "  Kinetic Energy: {:.6}", self.total_kinetic_energy)?;
        writeln!(f, "  Max Velocity: {:.6}", self.max_velocity)?;
        writeln!(f, "  Avg Velocity: {:.6}", self.avg_velocity)?;
        writeln!(f, "  Net Divergence: {:.6}", self.net_divergence)?;
        writeln!(f, "  |Divergence|: {:.6}", self.abs_divergence)?;
        write!(f, "  Vorticity: {:.6}", self.vorticity)
    }
}

#[derive(Debug, Default)]
pub struct AnalysisRecorder {
    pub metrics_history: Vec<FluidMetrics>,
}

impl AnalysisRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, grid: &Grid, frame: u64) -> &FluidMetrics {
        self.metrics_history.push(FluidMetrics::analyze(grid, frame));
        &self.metrics_history[self.metrics_history.len() - 1]
    }

    /// Relative change of total mass between the first and last frame.
    pub fn mass_change(&self) -> Option<f32> {
        let first = self.metrics_history.first()?;
        let last = self.metrics_history.last()?;
        Some((last.total_mass - first.total_mass) / first.total_mass.max(f32::EPSILON))
    }

    pub fn log_trends(&self) {
        if self.metrics_history.len() < 2 {
            return;
        }

        let first = &self.metrics_history[0];
        let last = &self.metrics_history[self.metrics_history.len() - 1];

        info!("=== TREND ANALYSIS ===");
        info!(
            "Mass change: {:.6} -> {:.6} ({:+.3}%)",
            first.total_mass,
            last.total_mass,
            (last.total_mass - first.total_mass) / first.total_mass.max(0.001) * 100.0
        );
        info!(
            "Kinetic Energy change: {:.6} -> {:.6} ({:+.3}%)",
            first.total_kinetic_energy,
            last.total_kinetic_energy,
            (last.total_kinetic_energy - first.total_kinetic_energy)
                / first.total_kinetic_energy.max(0.001)
                * 100.0
        );
        info!(
            "|Divergence| change: {:.6} -> {:.6}",
            first.abs_divergence, last.abs_divergence
        );
    }
}
