use rayon::prelude::*;

use crate::boundary::{BoundaryMode, set_boundary};
use crate::grid::{Field, VectorField};

/// Semi-Lagrangian transport of `prev` along `velocity` into `cur`.
///
/// Each active cell centre is traced backwards by `n * velocity` cells on
/// each axis and `prev` is sampled bilinearly there. The traced position is
/// clamped to `[0.5, n + 0.5]`; the endpoints are valid and blend in the
/// border cells.
pub fn advect(cur: &mut Field, prev: &Field, velocity: &VectorField, mode: BoundaryMode) {
    debug_assert!(cur.same_shape(prev));
    debug_assert!(cur.same_shape(&velocity.x));
    let (nx, ny, w) = (cur.nx(), cur.ny(), cur.stride());
    let nx_f = nx as f32;
    let ny_f = ny as f32;
    let src = prev.as_slice();
    let u = velocity.x.as_slice();
    let v = velocity.y.as_slice();

    // Rows only read `prev` and `velocity`, so they can be filled independently.
    cur.as_mut_slice()
        .par_chunks_mut(w)
        .enumerate()
        .skip(1)
        .take(ny)
        .for_each(|(j, row)| {
            for i in 1..=nx {
                let idx = i + j * w;

                let x = (i as f32 - nx_f * u[idx]).clamp(0.5, nx_f + 0.5);
                let y = (j as f32 - ny_f * v[idx]).clamp(0.5, ny_f + 0.5);

                let i0 = x.floor() as usize;
                let j0 = y.floor() as usize;
                let s1 = x - i0 as f32;
                let s0 = 1.0 - s1;
                let t1 = y - j0 as f32;
                let t0 = 1.0 - t1;

                let idx00 = i0 + j0 * w;
                let idx10 = idx00 + 1;
                let idx01 = idx00 + w;
                let idx11 = idx01 + 1;

                row[i] = s0 * (t0 * src[idx00] + t1 * src[idx01])
                    + s1 * (t0 * src[idx10] + t1 * src[idx11]);
            }
        });

    set_boundary(cur, mode);
}
