use glam::Vec2;
use log::{debug, trace};

use crate::advect::advect;
use crate::boundary::BoundaryMode;
use crate::config::{self, Forcing, SimConfig};
use crate::error::ConfigError;
use crate::grid::{Axis, Field, Grid, VectorField};
use crate::render::{Render, RenderFlags};
use crate::solver::LinearSolver;

/// `dest += dt * source` over every cell, border included.
pub fn add_source(dest: &mut Field, source: &Field, dt: f32) {
    debug_assert!(dest.same_shape(source));
    for (d, s) in dest.as_mut_slice().iter_mut().zip(source.as_slice()) {
        *d += dt * s;
    }
}

/// Drives one grid through the stable-fluids pipeline.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimConfig,
    grid: Grid,
    solver: LinearSolver,
    velocity_source: VectorField,
    frame: u64,
}

impl Simulator {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let n = config.resolution;
        let grid = Grid::new(n, n, config.domain_width, config.domain_height)?;
        let velocity_source = forcing_field(config.forcing.as_ref(), n, n)?;

        debug!(
            "simulator {}x{} visc={} diff={} dt={} iterations={} forcing={:?}",
            n, n, config.viscosity, config.diffusion, config.dt, config.iterations, config.forcing
        );

        Ok(Self {
            solver: LinearSolver::new(config.iterations),
            config,
            grid,
            velocity_source,
            frame: 0,
        })
    }

    /// Positional constructor with the reference forcing.
    pub fn with_params(
        resolution: usize,
        domain_width: f32,
        domain_height: f32,
        viscosity: f32,
        diffusion: f32,
        dt: f32,
    ) -> Result<Self, ConfigError> {
        Self::new(SimConfig::new(
            resolution,
            domain_width,
            domain_height,
            viscosity,
            diffusion,
            dt,
        ))
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn solver(&self) -> &LinearSolver {
        &self.solver
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn set_viscosity(&mut self, viscosity: f32) -> Result<(), ConfigError> {
        config::validate_viscosity(viscosity)?;
        debug!("viscosity {} -> {}", self.config.viscosity, viscosity);
        self.config.viscosity = viscosity;
        Ok(())
    }

    pub fn set_diffusion(&mut self, diffusion: f32) -> Result<(), ConfigError> {
        config::validate_diffusion(diffusion)?;
        debug!("diffusion {} -> {}", self.config.diffusion, diffusion);
        self.config.diffusion = diffusion;
        Ok(())
    }

    pub fn set_time_step(&mut self, dt: f32) -> Result<(), ConfigError> {
        config::validate_time_step(dt)?;
        debug!("time step {} -> {}", self.config.dt, dt);
        self.config.dt = dt;
        Ok(())
    }

    pub fn set_forcing(&mut self, forcing: Option<Forcing>) -> Result<(), ConfigError> {
        self.velocity_source = forcing_field(forcing.as_ref(), self.grid.nx(), self.grid.ny())?;
        debug!("forcing -> {:?}", forcing);
        self.config.forcing = forcing;
        Ok(())
    }

    /// Arms the interactive density source under a pixel position.
    pub fn register_click(&mut self, pos: Vec2) -> (usize, usize) {
        let cell = self.grid.register_click(pos);
        trace!("click at {:?} -> cell {:?}", pos, cell);
        cell
    }

    pub fn clear_click(&mut self) {
        self.grid.clear_click();
    }

    pub fn reset(&mut self) {
        self.grid.reset();
        self.frame = 0;
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) {
        self.grid.clear_sources();
        self.apply_sources();
        self.v_step();
        self.d_step();
        self.frame += 1;
        trace!(
            "frame {} mass={}",
            self.frame,
            self.grid.density.active_sum()
        );
    }

    /// Advances one tick and hands the settled grid to `target`.
    pub fn tick(&mut self, target: &mut impl Render, flags: RenderFlags) {
        self.step();
        self.render(target, flags);
    }

    pub fn render(&self, target: &mut impl Render, flags: RenderFlags) {
        target.render(&self.grid, flags);
    }

    /// Velocity sub-step: sources, diffusion, projection, self-advection,
    /// projection.
    pub fn v_step(&mut self) {
        let dt = self.config.dt;
        let grid = &mut self.grid;

        for axis in Axis::ALL {
            add_source(
                grid.velocity.component_mut(axis),
                grid.velocity_prev.component(axis),
                dt,
            );
        }
        grid.swap_velocity();

        for axis in Axis::ALL {
            self.solver.diffuse(
                grid.velocity.component_mut(axis),
                grid.velocity_prev.component(axis),
                self.config.viscosity,
                dt,
                BoundaryMode::for_axis(axis),
            );
        }
        self.solver
            .project(&mut grid.velocity, &mut grid.pressure, &mut grid.divergence);
        grid.swap_velocity();

        for axis in Axis::ALL {
            advect(
                grid.velocity.component_mut(axis),
                grid.velocity_prev.component(axis),
                &grid.velocity_prev,
                BoundaryMode::for_axis(axis),
            );
        }
        self.solver
            .project(&mut grid.velocity, &mut grid.pressure, &mut grid.divergence);
    }

    /// Density sub-step: sources, diffusion, advection through the current
    /// velocity.
    pub fn d_step(&mut self) {
        let dt = self.config.dt;
        let grid = &mut self.grid;

        add_source(&mut grid.density, &grid.density_prev, dt);
        grid.swap_density();
        self.solver.diffuse(
            &mut grid.density,
            &grid.density_prev,
            self.config.diffusion,
            dt,
            BoundaryMode::Mirror,
        );
        grid.swap_density();
        advect(
            &mut grid.density,
            &grid.density_prev,
            &grid.velocity,
            BoundaryMode::Mirror,
        );
    }

    fn apply_sources(&mut self) {
        let grid = &mut self.grid;
        add_source(&mut grid.velocity_prev.x, &self.velocity_source.x, 1.0);
        add_source(&mut grid.velocity_prev.y, &self.velocity_source.y, 1.0);
        if let Some(cell) = grid.click() {
            grid.density_prev[cell] += self.config.click_strength;
        }
    }
}

fn forcing_field(
    forcing: Option<&Forcing>,
    nx: usize,
    ny: usize,
) -> Result<VectorField, ConfigError> {
    let mut field = VectorField::new(nx, ny);
    if let Some(forcing) = forcing {
        let cell = forcing.resolve(nx, ny)?;
        field.x[cell] = forcing.velocity.x;
        field.y[cell] = forcing.velocity.y;
    }
    Ok(field)
}
