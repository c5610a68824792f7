use russell_lab::{approx_eq, Vector};
use yieldsurf::base::{DiagnosticKind, SampleParams};
use yieldsurf::prelude::*;
use yieldsurf::surface::ShapeTrait;

// Properties of the extended drift and the return mapping of all surfaces
//
// TEST GOAL
//
// Verifies, for every sample surface and many directions in force space, that:
//
// * the drift is negative inside, positive outside, and zero on the surface
// * the drift is negative inside the inner quadrilateral and positive far outside
// * projecting a point that is already on the surface does not move it
// * the gradient agrees with the finite-difference derivative of the drift
// * all four return policies bring an outside point onto the surface
// * the drift is invariant with respect to the scaling of the capacities
//
// CONFIGURATION AND PARAMETERS
//
// * Frozen evolution (no hardening)
// * Identity transformation: (fx, fy) = (F[0], F[1])
// * Directions from a fixed pseudo-random sequence (reproducible)

const N_POINTS: usize = 240;

const POLICIES: [ReturnPolicy; 4] = [
    ReturnPolicy::DfReturn,
    ReturnPolicy::RadialReturn,
    ReturnPolicy::ConstantXReturn,
    ReturnPolicy::ConstantYReturn,
];

/// Generates reproducible numbers in [0, 1)
struct Sequence {
    state: u64,
}

impl Sequence {
    fn new(seed: u64) -> Self {
        Sequence { state: seed }
    }

    fn next(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a unit direction away from the y-axis (the El-Tawil branches meet at x = 0)
    fn direction(&mut self) -> (f64, f64) {
        loop {
            let alpha = 2.0 * std::f64::consts::PI * self.next();
            let (dx, dy) = (f64::cos(alpha), f64::sin(alpha));
            if f64::abs(dx) > 0.1 {
                return (dx, dy);
            }
        }
    }
}

fn allocate(surface: &ParamYieldSurface) -> YieldSurfaceBoundary2D {
    let mut boundary = YieldSurfaceBoundary2D::new(surface, &ParamEvolution::Null, &Settings::new());
    boundary.set_transformation(0, 1, 1.0, 1.0).unwrap();
    assert_eq!(boundary.diagnostics().n_reported(), 0);
    boundary
}

/// Returns the point on the surface along the ray through (dx, dy) (normalized coordinates)
fn surface_point(boundary: &YieldSurfaceBoundary2D, dx: f64, dy: f64) -> Vector {
    let (cap_x, cap_y) = boundary.capacities_orig();
    let mut force = Vector::from(&[1.8 * cap_x * dx, 1.8 * cap_y * dy]);
    assert_eq!(boundary.classify(&force), ForceLocation::Outside);
    assert!(boundary.project(&mut force, ReturnPolicy::RadialReturn));
    force
}

fn el_tawil_unsym(x_pos_bal: f64, y_pos_bal: f64, x_neg_bal: f64, y_neg_bal: f64, y_pos: f64, y_neg: f64) -> ParamYieldSurface {
    ParamYieldSurface::ElTawilUnsym {
        x_pos_bal,
        y_pos_bal,
        x_neg_bal,
        y_neg_bal,
        y_pos,
        y_neg,
        cz_pos: 1.6,
        ty_pos: 1.9,
        cz_neg: 1.5,
        ty_neg: 2.0,
        cap: 0.95,
    }
}

#[test]
fn test_drift_sign_and_idempotence() {
    for (name, surface) in SampleParams::all_surfaces() {
        let boundary = allocate(&surface);
        let mut seq = Sequence::new(12345);
        for _ in 0..N_POINTS {
            let (dx, dy) = seq.direction();
            let on = surface_point(&boundary, dx, dy);
            assert!(f64::abs(boundary.trial_drift(&on)) < 1e-6, "{} drift on the surface", name);
            assert_eq!(boundary.classify(&on), ForceLocation::OnSurface);

            // inside and outside along the same ray
            let inside = Vector::from(&[0.6 * on[0], 0.6 * on[1]]);
            let outside = Vector::from(&[1.4 * on[0], 1.4 * on[1]]);
            assert!(boundary.trial_drift(&inside) < 0.0, "{} inside", name);
            assert!(boundary.trial_drift(&outside) > 0.0, "{} outside", name);
            assert_eq!(boundary.classify(&inside), ForceLocation::Inside);
            assert_eq!(boundary.classify(&outside), ForceLocation::Outside);

            // projecting or setting an on-surface point does not move it
            let (cap_x, cap_y) = boundary.capacities_orig();
            for policy in POLICIES {
                let mut force = on.clone();
                assert!(boundary.project(&mut force, policy));
                assert_eq!(force.as_data(), on.as_data());
                assert!(boundary.set_to_surface(&mut force, policy));
                approx_eq(force[0] / cap_x, on[0] / cap_x, 1e-12);
                approx_eq(force[1] / cap_y, on[1] / cap_y, 1e-12);
            }
        }
    }
}

#[test]
fn test_drift_gradient_agrees_with_finite_differences() {
    for (name, surface) in SampleParams::all_surfaces() {
        let boundary = allocate(&surface);
        let (cap_x, cap_y) = boundary.capacities_orig();
        let shape = boundary.shape();
        let phi = |fx: f64, fy: f64| shape.drift(fx / cap_x, fy / cap_y);
        let (hx, hy) = (1e-6 * cap_x, 1e-6 * cap_y);
        let mut seq = Sequence::new(2024);
        let mut g = Vector::new(2);
        for _ in 0..N_POINTS {
            let (dx, dy) = seq.direction();
            let on = surface_point(&boundary, dx, dy);
            boundary.gradient(&mut g, &on);
            let num_x = (phi(on[0] + hx, on[1]) - phi(on[0] - hx, on[1])) / (2.0 * hx);
            let num_y = (phi(on[0], on[1] + hy) - phi(on[0], on[1] - hy)) / (2.0 * hy);
            let norm = f64::hypot(g[0], g[1]);
            let diff = f64::hypot(g[0] - num_x, g[1] - num_y);
            assert!(diff <= 1e-3 * norm, "{}: gradient mismatch at ({}, {})", name, on[0], on[1]);
        }
        assert_eq!(boundary.diagnostics().count(DiagnosticKind::PreconditionViolation), 0);
    }
}

#[test]
fn test_all_return_policies_reach_the_surface() {
    for (name, surface) in SampleParams::all_surfaces() {
        let boundary = allocate(&surface);
        let mut seq = Sequence::new(777);
        for _ in 0..N_POINTS {
            let (dx, dy) = seq.direction();
            let on = surface_point(&boundary, dx, dy);
            let scale = 1.05 + 0.5 * seq.next();
            let trial = Vector::from(&[scale * on[0], scale * on[1]]);
            for policy in POLICIES {
                let mut force = trial.clone();
                boundary.project(&mut force, policy);
                let drift = boundary.trial_drift(&force);
                assert!(f64::abs(drift) < 1e-6, "{} {:?}: drift = {}", name, policy, drift);
                match policy {
                    ReturnPolicy::ConstantYReturn => {
                        if f64::abs(force[1] - trial[1]) > 1e-12 * f64::abs(trial[1]) {
                            // the horizontal line misses the surface; the fallback moves toward the center
                            assert!(f64::hypot(force[0], force[1]) < f64::hypot(trial[0], trial[1]));
                        }
                    }
                    ReturnPolicy::ConstantXReturn => {
                        if f64::abs(force[0] - trial[0]) > 1e-12 * f64::abs(trial[0]) {
                            assert!(f64::hypot(force[0], force[1]) < f64::hypot(trial[0], trial[1]));
                        }
                    }
                    _ => (),
                }
            }
        }
    }
}

#[test]
fn test_drift_is_invariant_to_capacity_scaling() {
    let (kx, ky) = (250.0, 40.0);
    let cases = vec![
        (
            ParamYieldSurface::Orbison { cap_x: 1.0, cap_y: 1.0 },
            ParamYieldSurface::Orbison { cap_x: kx, cap_y: ky },
        ),
        (
            ParamYieldSurface::attalla(1.0, 1.0),
            ParamYieldSurface::attalla(kx, ky),
        ),
        (
            ParamYieldSurface::el_tawil(1.0, 0.4, 1.0, -0.5, 1.6, 1.9),
            ParamYieldSurface::el_tawil(kx, 0.4 * ky, ky, -0.5 * ky, 1.6, 1.9),
        ),
        (
            el_tawil_unsym(1.0, 0.4, -0.75, 0.3, 1.0, -0.5),
            el_tawil_unsym(kx, 0.4 * ky, -0.75 * kx, 0.3 * ky, ky, -0.5 * ky),
        ),
    ];
    for (unit, scaled) in &cases {
        let a = allocate(unit);
        let b = allocate(scaled);
        let mut seq = Sequence::new(99);
        for _ in 0..N_POINTS {
            let (dx, dy) = seq.direction();
            let s = 2.0 * seq.next();
            let fa = Vector::from(&[s * dx, s * dy]);
            let fb = Vector::from(&[kx * s * dx, ky * s * dy]);
            approx_eq(a.trial_drift(&fa), b.trial_drift(&fb), 1e-9);
            assert_eq!(a.classify(&fa), b.classify(&fb));
        }
    }
}

#[test]
fn test_drift_far_outside_and_inside_the_inner_quadrilateral() {
    for (name, surface) in SampleParams::all_surfaces() {
        let boundary = allocate(&surface);
        let (cap_x, cap_y) = boundary.capacities_orig();

        // far outside: twice the capacities in every quadrant
        for (sx, sy) in [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)] {
            let force = Vector::from(&[2.0 * sx * cap_x, 2.0 * sy * cap_y]);
            let drift = boundary.trial_drift(&force);
            assert!(drift > 0.0, "{}: drift = {} at ({}, {})", name, drift, force[0], force[1]);
            assert_eq!(boundary.classify(&force), ForceLocation::Outside);
        }

        // inside the inner quadrilateral (points sampled in the extent box)
        let extent = boundary.extent();
        let quad = boundary.inner_quad().unwrap();
        let mut seq = Sequence::new(4321);
        let mut count = 0;
        while count < N_POINTS {
            let x = extent.x_neg + (extent.x_pos - extent.x_neg) * seq.next();
            let y = extent.y_neg + (extent.y_pos - extent.y_neg) * seq.next();
            if !quad.contains(x, y) {
                continue;
            }
            let force = Vector::from(&[x * cap_x, y * cap_y]);
            let drift = boundary.trial_drift(&force);
            assert!(drift < 0.0, "{}: drift = {} at ({}, {})", name, drift, x, y);
            count += 1;
        }
        assert_eq!(boundary.diagnostics().n_reported(), 0);
    }
}
