use crate::grid::{Axis, Field};

/// How the border ring of a field is filled from its active neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// Every border cell copies its nearest active cell.
    #[default]
    Mirror,
    /// Left and right columns are negated (wall normal to X).
    OpposeX,
    /// Top and bottom rows are negated (wall normal to Y).
    OpposeY,
}

impl BoundaryMode {
    /// The mode a velocity component uses: each axis reflects only its own
    /// component at the walls normal to it.
    pub fn for_axis(axis: Axis) -> Self {
        match axis {
            Axis::X => BoundaryMode::OpposeX,
            Axis::Y => BoundaryMode::OpposeY,
        }
    }
}

/// Fills the border ring of `field` according to `mode`.
///
/// Must run after any pass that writes active cells and before any stencil
/// reads across the border.
pub fn set_boundary(field: &mut Field, mode: BoundaryMode) {
    let (nx, ny) = (field.nx(), field.ny());
    let sign_x = if mode == BoundaryMode::OpposeX { -1.0 } else { 1.0 };
    let sign_y = if mode == BoundaryMode::OpposeY { -1.0 } else { 1.0 };

    for j in 1..=ny {
        field[(0, j)] = sign_x * field[(1, j)];
        field[(nx + 1, j)] = sign_x * field[(nx, j)];
    }

    for i in 1..=nx {
        field[(i, 0)] = sign_y * field[(i, 1)];
        field[(i, ny + 1)] = sign_y * field[(i, ny)];
    }

    // Corners average the two edge cells next to them.
    field[(0, 0)] = 0.5 * (field[(1, 0)] + field[(0, 1)]);
    field[(0, ny + 1)] = 0.5 * (field[(1, ny + 1)] + field[(0, ny)]);
    field[(nx + 1, 0)] = 0.5 * (field[(nx, 0)] + field[(nx + 1, 1)]);
    field[(nx + 1, ny + 1)] = 0.5 * (field[(nx, ny + 1)] + field[(nx + 1, ny)]);
}
