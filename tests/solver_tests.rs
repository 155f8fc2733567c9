use driftgrid::{
    BoundaryMode, Field, LinearSolver, VectorField, advect, compute_divergence, set_boundary,
};

fn divergence_totals(velocity: &VectorField) -> (f32, f32) {
    let mut div = Field::new(velocity.x.nx(), velocity.x.ny());
    compute_divergence(velocity, &mut div);
    let net = div.active_sum();
    let abs = div.active_cells().map(|c| div[c].abs()).sum();
    (net, abs)
}

fn swirling_velocity(n: usize) -> VectorField {
    let mut velocity = VectorField::new(n, n);
    for (i, j) in velocity.x.active_cells() {
        velocity.x[(i, j)] = (i as f32 * 1.3 + j as f32 * 0.7).sin();
        velocity.y[(i, j)] = (i as f32 * 0.4 - j as f32 * 1.1).cos();
    }
    set_boundary(&mut velocity.x, BoundaryMode::OpposeX);
    set_boundary(&mut velocity.y, BoundaryMode::OpposeY);
    velocity
}

#[test]
fn test_diffuse_with_zero_rate_is_identity() {
    let solver = LinearSolver::default();
    let mut prev = Field::new(6, 5);
    for (i, j) in prev.active_cells() {
        prev[(i, j)] = (i * j) as f32 * 0.25;
    }
    set_boundary(&mut prev, BoundaryMode::Mirror);
    let mut cur = Field::new(6, 5);
    cur.fill(3.0);

    solver.diffuse(&mut cur, &prev, 0.0, 0.1, BoundaryMode::Mirror);

    for c in prev.active_cells() {
        assert_eq!(cur[c], prev[c], "cell {:?}", c);
    }
}

#[test]
fn test_diffuse_spreads_and_conserves() {
    let solver = LinearSolver::default();
    let mut prev = Field::new(8, 8);
    prev[(4, 4)] = 1.0;
    let mut cur = Field::new(8, 8);

    solver.diffuse(&mut cur, &prev, 0.1, 0.1, BoundaryMode::Mirror);

    assert!(cur[(4, 4)] < 1.0);
    assert!(cur[(3, 4)] > 0.0);
    assert!(cur[(5, 4)] > 0.0);
    assert!(cur[(4, 3)] > 0.0);
    assert!(cur[(4, 5)] > 0.0);
    // Mirror walls are no-flux, so the total stays put up to relaxation error.
    assert!((cur.active_sum() - 1.0).abs() < 1e-3, "sum {}", cur.active_sum());
}

#[test]
fn test_relax_runs_fixed_sweeps() {
    // One sweep of x = (x0 + sum) / 4 from zero fills the first cell with x0 / 4.
    let solver = LinearSolver::new(1);
    let mut x0 = Field::new(3, 3);
    x0.fill(4.0);
    let mut x = Field::new(3, 3);

    solver.relax(&mut x, &x0, 1.0, 4.0, BoundaryMode::Mirror);

    assert_eq!(x[(1, 1)], 1.0);
    // (4 + 1 + 0 + 0 + 0) / 4, reading the freshly updated left neighbour.
    assert_eq!(x[(2, 1)], 1.25);
}

#[test]
fn test_project_twice_keeps_reducing_divergence() {
    let solver = LinearSolver::default();
    let n = 12;
    let mut velocity = swirling_velocity(n);
    let mut pressure = Field::new(n, n);
    let mut divergence = Field::new(n, n);

    let (_, before) = divergence_totals(&velocity);
    solver.project(&mut velocity, &mut pressure, &mut divergence);
    let (net_first, first) = divergence_totals(&velocity);
    solver.project(&mut velocity, &mut pressure, &mut divergence);
    let (net_second, second) = divergence_totals(&velocity);

    println!("divergence: {} -> {} -> {}", before, first, second);
    assert!(first < before);
    assert!(second <= first);
    assert!(net_first.abs() < 1e-3);
    assert!(net_second.abs() < 1e-3);
}

#[test]
fn test_project_applies_wall_reflection() {
    let solver = LinearSolver::default();
    let n = 6;
    let mut velocity = swirling_velocity(n);
    let mut pressure = Field::new(n, n);
    let mut divergence = Field::new(n, n);

    solver.project(&mut velocity, &mut pressure, &mut divergence);

    for j in 1..=n {
        assert_eq!(velocity.x[(0, j)], -velocity.x[(1, j)]);
        assert_eq!(velocity.x[(n + 1, j)], -velocity.x[(n, j)]);
    }
    for i in 1..=n {
        assert_eq!(velocity.y[(i, 0)], -velocity.y[(i, 1)]);
        assert_eq!(velocity.y[(i, n + 1)], -velocity.y[(i, n)]);
    }
}

#[test]
fn test_project_leaves_still_fluid_still() {
    let solver = LinearSolver::default();
    let mut velocity = VectorField::new(5, 5);
    let mut pressure = Field::new(5, 5);
    let mut divergence = Field::new(5, 5);

    solver.project(&mut velocity, &mut pressure, &mut divergence);

    assert!(velocity.x.as_slice().iter().all(|&u| u == 0.0));
    assert!(velocity.y.as_slice().iter().all(|&v| v == 0.0));
}

#[test]
fn test_advect_with_zero_velocity_is_identity() {
    let n = 6;
    let mut prev = Field::new(n, n);
    for (k, value) in prev.as_mut_slice().iter_mut().enumerate() {
        *value = (k as f32 * 0.37).sin();
    }
    let velocity = VectorField::new(n, n);
    let mut cur = Field::new(n, n);

    advect(&mut cur, &prev, &velocity, BoundaryMode::Mirror);

    for c in prev.active_cells() {
        assert_eq!(cur[c], prev[c], "cell {:?}", c);
    }
}

#[test]
fn test_advect_shifts_by_whole_cells() {
    let n = 8;
    let mut prev = Field::new(n, n);
    for i in 0..=n + 1 {
        for j in 0..=n + 1 {
            prev[(i, j)] = (i * 10 + j) as f32;
        }
    }
    let mut velocity = VectorField::new(n, n);
    // n * 0.125 = one cell per tick along +X.
    velocity.x.fill(0.125);
    let mut cur = Field::new(n, n);

    advect(&mut cur, &prev, &velocity, BoundaryMode::Mirror);

    for j in 1..=n {
        for i in 2..=n {
            assert_eq!(cur[(i, j)], prev[(i - 1, j)]);
        }
        // Backtrace lands on 0 and is clamped to 0.5, halfway into the border.
        assert_eq!(cur[(1, j)], 0.5 * (prev[(0, j)] + prev[(1, j)]));
    }
}

#[test]
fn test_advect_clamps_runaway_backtrace() {
    let n = 4;
    let mut prev = Field::new(n, n);
    for (k, value) in prev.as_mut_slice().iter_mut().enumerate() {
        *value = k as f32;
    }
    let mut velocity = VectorField::new(n, n);
    velocity.x.fill(-1.0e6);
    velocity.y.fill(1.0e6);
    let mut cur = Field::new(n, n);

    advect(&mut cur, &prev, &velocity, BoundaryMode::Mirror);

    // x clamps to n + 0.5 and y to 0.5: every cell samples the same corner blend.
    let expected = 0.25 * (prev[(n, 0)] + prev[(n, 1)] + prev[(n + 1, 0)] + prev[(n + 1, 1)]);
    for c in cur.active_cells() {
        assert_eq!(cur[c], expected);
    }
}
