//! Fixed-iteration Gauss-Seidel relaxation shared by diffusion and the
//! pressure projection.

use crate::boundary::{BoundaryMode, set_boundary};
use crate::grid::{Field, VectorField};

pub const DEFAULT_ITERATIONS: usize = 20;

/// Approximate linear solver with a bounded, deterministic cost per call.
///
/// There is no convergence check: every call performs exactly
/// `iterations` sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearSolver {
    iterations: usize,
}

impl Default for LinearSolver {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

impl LinearSolver {
    pub fn new(iterations: usize) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Relaxes `x = (x0 + a * sum_of_neighbours(x)) / c` over the active
    /// cells, refilling the border of `x` with `mode` after every sweep.
    ///
    /// Updates are in place, so cells later in a sweep already see the new
    /// values of cells earlier in it.
    pub fn relax(&self, x: &mut Field, x0: &Field, a: f32, c: f32, mode: BoundaryMode) {
        debug_assert!(x.same_shape(x0));
        let (nx, ny, w) = (x.nx(), x.ny(), x.stride());

        for _ in 0..self.iterations {
            let cur = x.as_mut_slice();
            let src = x0.as_slice();
            for j in 1..=ny {
                for i in 1..=nx {
                    let idx = i + j * w;
                    cur[idx] = (src[idx]
                        + a * (cur[idx - 1] + cur[idx + 1] + cur[idx - w] + cur[idx + w]))
                        / c;
                }
            }
            set_boundary(x, mode);
        }
    }

    /// Implicit diffusion of `prev` into `cur` with rate `k` over `dt`.
    pub fn diffuse(&self, cur: &mut Field, prev: &Field, k: f32, dt: f32, mode: BoundaryMode) {
        let a = dt * k * (cur.nx() * cur.ny()) as f32;
        self.relax(cur, prev, a, 1.0 + 4.0 * a, mode);
    }

    /// Removes the divergent part of `velocity` by subtracting the gradient
    /// of a pressure field solved from its divergence.
    ///
    /// `pressure` and `divergence` are scratch buffers; their previous
    /// contents are overwritten.
    pub fn project(&self, velocity: &mut VectorField, pressure: &mut Field, divergence: &mut Field) {
        let (nx, ny) = (velocity.x.nx(), velocity.x.ny());
        let lx = 1.0 / nx as f32;
        let ly = 1.0 / ny as f32;

        compute_divergence(velocity, divergence);
        pressure.clear();
        set_boundary(divergence, BoundaryMode::Mirror);
        set_boundary(pressure, BoundaryMode::Mirror);

        self.relax(pressure, divergence, 1.0, 4.0, BoundaryMode::Mirror);

        let w = pressure.stride();
        let p = pressure.as_slice();
        let u = velocity.x.as_mut_slice();
        for j in 1..=ny {
            for i in 1..=nx {
                let idx = i + j * w;
                u[idx] -= 0.5 * (p[idx + 1] - p[idx - 1]) / lx;
            }
        }
        let v = velocity.y.as_mut_slice();
        for j in 1..=ny {
            for i in 1..=nx {
                let idx = i + j * w;
                v[idx] -= 0.5 * (p[idx + w] - p[idx - w]) / ly;
            }
        }

        set_boundary(&mut velocity.x, BoundaryMode::OpposeX);
        set_boundary(&mut velocity.y, BoundaryMode::OpposeY);
    }
}

/// Central-difference divergence of `velocity`, scaled by the reciprocal
/// cell widths and negated, written into the active cells of `out`.
pub fn compute_divergence(velocity: &VectorField, out: &mut Field) {
    let (nx, ny, w) = (out.nx(), out.ny(), out.stride());
    let lx = 1.0 / nx as f32;
    let ly = 1.0 / ny as f32;
    let u = velocity.x.as_slice();
    let v = velocity.y.as_slice();
    let div = out.as_mut_slice();

    for j in 1..=ny {
        for i in 1..=nx {
            let idx = i + j * w;
            div[idx] = -0.5 * (lx * (u[idx + 1] - u[idx - 1]) + ly * (v[idx + w] - v[idx - w]));
        }
    }
}
