//! Grid storage: scalar fields with a one-cell border ring, velocity pairs,
//! and the buffers a simulation tick reads and writes.
//!
//! Fields are genuinely two-dimensional. A depth axis would have size 1 and
//! only exists for interface uniformity with 3D grids, so it has no storage.

use std::ops::{Index, IndexMut};

use glam::Vec2;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];
}

/// A scalar field over `nx * ny` active cells plus the surrounding border.
///
/// Cell `(i, j)` has `i` along X and `j` along Y. Active cells are
/// `1..=nx` by `1..=ny`; index `0` and `n + 1` on either axis are border
/// cells owned by the boundary policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    nx: usize,
    ny: usize,
    stride: usize,
    data: Vec<f32>,
}

impl Field {
    pub fn new(nx: usize, ny: usize) -> Self {
        let stride = nx + 2;
        Self {
            nx,
            ny,
            stride,
            data: vec![0.0; stride * (ny + 2)],
        }
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Distance in the backing slice between `(i, j)` and `(i, j + 1)`.
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        i + j * self.stride
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    pub fn clear(&mut self) {
        self.fill(0.0);
    }

    pub fn same_shape(&self, other: &Field) -> bool {
        self.nx == other.nx && self.ny == other.ny
    }

    /// Iterates the `(i, j)` coordinates of every active cell, row by row.
    pub fn active_cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (nx, ny) = (self.nx, self.ny);
        (1..=ny).flat_map(move |j| (1..=nx).map(move |i| (i, j)))
    }

    pub fn active_sum(&self) -> f32 {
        self.active_cells().map(|(i, j)| self[(i, j)]).sum()
    }
}

impl Index<(usize, usize)> for Field {
    type Output = f32;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f32 {
        &self.data[i + j * self.stride]
    }
}

impl IndexMut<(usize, usize)> for Field {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f32 {
        &mut self.data[i + j * self.stride]
    }
}

/// One scalar field per spatial axis.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorField {
    pub x: Field,
    pub y: Field,
}

impl VectorField {
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            x: Field::new(nx, ny),
            y: Field::new(nx, ny),
        }
    }

    pub fn component(&self, axis: Axis) -> &Field {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    pub fn component_mut(&mut self, axis: Axis) -> &mut Field {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
    }

    pub fn at(&self, i: usize, j: usize) -> Vec2 {
        Vec2::new(self.x[(i, j)], self.y[(i, j)])
    }
}

/// All buffers of one simulation, allocated once at construction.
///
/// `*_prev` buffers hold either injected sources (before a sub-step) or the
/// field an operator reads from (after a swap).
#[derive(Debug, Clone)]
pub struct Grid {
    nx: usize,
    ny: usize,
    cell_size: Vec2,
    pub velocity: VectorField,
    pub velocity_prev: VectorField,
    pub density: Field,
    pub density_prev: Field,
    pub pressure: Field,
    pub divergence: Field,
    click: Option<(usize, usize)>,
}

impl Grid {
    /// Builds a grid of `nx * ny` active cells spanning a
    /// `domain_width * domain_height` pixel area.
    pub fn new(
        nx: usize,
        ny: usize,
        domain_width: f32,
        domain_height: f32,
    ) -> Result<Self, ConfigError> {
        if nx == 0 {
            return Err(ConfigError::InvalidResolution(nx));
        }
        if ny == 0 {
            return Err(ConfigError::InvalidResolution(ny));
        }
        if !(domain_width > 0.0 && domain_height > 0.0)
            || !domain_width.is_finite()
            || !domain_height.is_finite()
        {
            return Err(ConfigError::InvalidDomain {
                width: domain_width,
                height: domain_height,
            });
        }
        let cells = nx
            .checked_add(2)
            .zip(ny.checked_add(2))
            .and_then(|(w, h)| w.checked_mul(h));
        if cells.is_none_or(|c| c > isize::MAX as usize / std::mem::size_of::<f32>()) {
            return Err(ConfigError::GridTooLarge { nx, ny });
        }

        Ok(Self {
            nx,
            ny,
            cell_size: Vec2::new(domain_width / nx as f32, domain_height / ny as f32),
            velocity: VectorField::new(nx, ny),
            velocity_prev: VectorField::new(nx, ny),
            density: Field::new(nx, ny),
            density_prev: Field::new(nx, ny),
            pressure: Field::new(nx, ny),
            divergence: Field::new(nx, ny),
            click: None,
        })
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Size of one cell in pixels.
    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// Size of the whole active domain in pixels.
    pub fn domain_size(&self) -> Vec2 {
        self.cell_size * Vec2::new(self.nx as f32, self.ny as f32)
    }

    pub fn swap_velocity(&mut self) {
        std::mem::swap(&mut self.velocity, &mut self.velocity_prev);
    }

    pub fn swap_density(&mut self) {
        std::mem::swap(&mut self.density, &mut self.density_prev);
    }

    /// Zeroes the source accumulators ahead of a tick.
    pub fn clear_sources(&mut self) {
        self.velocity_prev.clear();
        self.density_prev.clear();
    }

    /// Zeroes every buffer. The click state is left alone.
    pub fn reset(&mut self) {
        self.velocity.clear();
        self.velocity_prev.clear();
        self.density.clear();
        self.density_prev.clear();
        self.pressure.clear();
        self.divergence.clear();
    }

    /// Maps a pixel position inside the domain to the active cell under it.
    ///
    /// Positions outside the domain land on the nearest active cell, so the
    /// result is always within `1..=nx` by `1..=ny`.
    pub fn cell_at(&self, pos: Vec2) -> (usize, usize) {
        let cell = (pos / self.cell_size).floor();
        let i = cell.x.clamp(0.0, (self.nx - 1) as f32) as usize + 1;
        let j = cell.y.clamp(0.0, (self.ny - 1) as f32) as usize + 1;
        (i, j)
    }

    /// Records a pointer click at a pixel position and returns its cell.
    pub fn register_click(&mut self, pos: Vec2) -> (usize, usize) {
        let cell = self.cell_at(pos);
        self.click = Some(cell);
        cell
    }

    pub fn clear_click(&mut self) {
        self.click = None;
    }

    pub fn click(&self) -> Option<(usize, usize)> {
        self.click
    }
}
