use crate::base::{N_MAX_ITERATIONS, N_MAX_WALK_STEPS, WALK_INCREMENT};
use serde::{Deserialize, Serialize};

/// Specifies the geometric contract of yield surfaces in normalized force space
///
/// The yield function is written as Φ(x, y) with Φ < 1 inside, Φ = 1 on the surface, and Φ > 1 outside.
pub trait ShapeTrait {
    /// Returns the raw drift Φ(x, y) - 1
    fn drift(&self, x: f64, y: f64) -> f64;

    /// Returns the gradient (∂Φ/∂x, ∂Φ/∂y)
    ///
    /// **Note:** The result is only meaningful at points on the surface.
    fn gradient(&self, x: f64, y: f64) -> (f64, f64);

    /// Returns the normalized axis intercepts
    fn extent(&self) -> Extent;

    /// Indicates that a trial point lies in a zone where only the radial return is reliable
    fn radial_only(&self, _x: f64, _y: f64) -> bool {
        false
    }

    /// Returns the shape parameters as a flat list of numbers
    fn flatten(&self) -> Vec<f64>;
}

/// Holds the normalized axis intercepts of a yield surface
///
/// The negative intercepts are stored as negative numbers.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Extent {
    pub x_pos: f64,
    pub x_neg: f64,
    pub y_pos: f64,
    pub y_neg: f64,
}

/// Holds the four lines y = a x + b of a quadrilateral inscribed in the yield surface
///
/// The quadrants are numbered counterclockwise from (x ≥ 0, y ≥ 0).
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct InnerQuad {
    pub a: [f64; 4],
    pub b: [f64; 4],
}

impl Extent {
    /// Returns the extent of a surface that is never reached
    pub fn infinite() -> Self {
        Extent {
            x_pos: f64::INFINITY,
            x_neg: f64::NEG_INFINITY,
            y_pos: f64::INFINITY,
            y_neg: f64::NEG_INFINITY,
        }
    }

    /// Returns the extent of a surface collapsed onto the origin
    pub fn zero() -> Self {
        Extent {
            x_pos: 0.0,
            x_neg: 0.0,
            y_pos: 0.0,
            y_neg: 0.0,
        }
    }

    /// Indicates that all intercepts are finite and away from the origin
    pub fn is_regular(&self) -> bool {
        let all = [self.x_pos, -self.x_neg, self.y_pos, -self.y_neg];
        all.iter().all(|v| v.is_finite() && *v > 0.0)
    }
}

impl InnerQuad {
    /// Allocates a new instance from the extent of a surface and an inward offset
    ///
    /// Returns None if the extent is not regular (e.g., infinite or zero).
    pub fn new(extent: &Extent, offset: f64) -> Option<Self> {
        if !extent.is_regular() {
            return None;
        }
        let m = 1.0 - offset;
        let vertices = [
            (m * extent.x_pos, m * extent.y_pos),
            (m * extent.x_neg, m * extent.y_pos),
            (m * extent.x_neg, m * extent.y_neg),
            (m * extent.x_pos, m * extent.y_neg),
        ];
        let mut a = [0.0; 4];
        let mut b = [0.0; 4];
        for q in 0..4 {
            let (xe, ye) = vertices[q];
            a[q] = -ye / xe;
            b[q] = ye;
        }
        Some(InnerQuad { a, b })
    }

    /// Returns the quadrant index of a point
    fn quadrant(x: f64, y: f64) -> usize {
        match (x >= 0.0, y >= 0.0) {
            (true, true) => 0,
            (false, true) => 1,
            (false, false) => 2,
            (true, false) => 3,
        }
    }

    /// Indicates whether a point is strictly inside the quadrilateral
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let q = InnerQuad::quadrant(x, y);
        let y_line = self.a[q] * x + self.b[q];
        if y >= 0.0 {
            y < y_line
        } else {
            y > y_line
        }
    }

    /// Returns the distance from the origin to the quadrilateral along a unit direction
    pub fn radius(&self, dx: f64, dy: f64) -> f64 {
        let q = InnerQuad::quadrant(dx, dy);
        self.b[q] / (dy - self.a[q] * dx)
    }
}

/// Finds the distance from the origin to the first crossing of the surface along a unit direction
///
/// Returns infinity if the surface is not reached.
pub(crate) fn axis_intercept<F>(drift: F, dx: f64, dy: f64) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    // walk outward
    let mut r_in = 0.0;
    let mut r_out = WALK_INCREMENT;
    let mut steps = 0;
    while drift(r_out * dx, r_out * dy) <= 0.0 {
        r_in = r_out;
        r_out += WALK_INCREMENT;
        steps += 1;
        if steps == N_MAX_WALK_STEPS {
            return f64::INFINITY;
        }
    }

    // bisection
    for _ in 0..N_MAX_ITERATIONS {
        let r_mid = 0.5 * (r_in + r_out);
        if drift(r_mid * dx, r_mid * dy) > 0.0 {
            r_out = r_mid;
        } else {
            r_in = r_mid;
        }
        if r_out - r_in < f64::EPSILON {
            break;
        }
    }
    0.5 * (r_in + r_out)
}

/// Computes the extent by searching the axis intercepts
pub(crate) fn search_extent<F>(drift: F) -> Extent
where
    F: Fn(f64, f64) -> f64,
{
    Extent {
        x_pos: axis_intercept(&drift, 1.0, 0.0),
        x_neg: -axis_intercept(&drift, -1.0, 0.0),
        y_pos: axis_intercept(&drift, 0.0, 1.0),
        y_neg: -axis_intercept(&drift, 0.0, -1.0),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
