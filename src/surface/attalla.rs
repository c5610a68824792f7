use super::{search_extent, Extent, ShapeTrait};
use serde::{Deserialize, Serialize};

/// Implements the Attalla polynomial yield surface
///
/// ```text
/// Φ = a1 x² + a2 y² + a3 x⁴ + a4 y⁴ + a5 x⁶ + a6 y⁶
/// ```
///
/// The y-part is replaced by its tangent line for |y| > cap (polar cap).
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Attalla {
    a: [f64; 6],
    cap: f64,
    extent: Extent,
}

impl Attalla {
    /// Allocates a new instance
    ///
    /// **Note:** The coefficients must have been validated already.
    pub fn new(coefficients: &[f64; 6], cap: f64) -> Self {
        let mut shape = Attalla {
            a: *coefficients,
            cap,
            extent: Extent::zero(),
        };
        let extent = search_extent(|x, y| shape.drift(x, y));
        shape.extent = extent;
        shape
    }

    /// Calculates the x-part and its derivative
    fn part_x(&self, x: f64) -> (f64, f64) {
        let (a1, a3, a5) = (self.a[0], self.a[2], self.a[4]);
        let x2 = x * x;
        let f = a1 * x2 + a3 * x2 * x2 + a5 * x2 * x2 * x2;
        let df = 2.0 * a1 * x + 4.0 * a3 * x2 * x + 6.0 * a5 * x2 * x2 * x;
        (f, df)
    }

    /// Calculates the y-part (with polar cap) and its derivative
    fn part_y(&self, y: f64) -> (f64, f64) {
        let (a2, a4, a6) = (self.a[1], self.a[3], self.a[5]);
        let poly = |v: f64| {
            let v2 = v * v;
            let g = a2 * v2 + a4 * v2 * v2 + a6 * v2 * v2 * v2;
            let dg = 2.0 * a2 * v + 4.0 * a4 * v2 * v + 6.0 * a6 * v2 * v2 * v;
            (g, dg)
        };
        let abs_y = f64::abs(y);
        if abs_y <= self.cap {
            return poly(y);
        }
        let (gc, dgc) = poly(self.cap);
        let sign = if y < 0.0 { -1.0 } else { 1.0 };
        (gc + dgc * (abs_y - self.cap), sign * dgc)
    }
}

impl ShapeTrait for Attalla {
    fn drift(&self, x: f64, y: f64) -> f64 {
        self.part_x(x).0 + self.part_y(y).0 - 1.0
    }

    fn gradient(&self, x: f64, y: f64) -> (f64, f64) {
        (self.part_x(x).1, self.part_y(y).1)
    }

    fn extent(&self) -> Extent {
        self.extent
    }

    fn radial_only(&self, _x: f64, y: f64) -> bool {
        f64::abs(y) > self.cap
    }

    fn flatten(&self) -> Vec<f64> {
        let mut data = self.a.to_vec();
        data.push(self.cap);
        data
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
