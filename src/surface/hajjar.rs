use super::{Extent, ShapeTrait};
use serde::{Deserialize, Serialize};

/// Implements the Hajjar and Gourley yield surface for rectangular concrete-filled steel tubes
///
/// ```text
/// Φ = c1 x² + c2 y² + c3 x² y² + c4 x⁴
/// ```
///
/// The coefficients and capacities are derived from the cross-section:
///
/// ```text
/// As = 2 t (d + b - 2 t)               Ac = (d - 2 t) (b - 2 t)
/// Py = As fy + 0.85 fc Ac              ρ = 0.85 fc Ac / Py
/// Mp = fy (b d² - (b-2t)(d-2t)²) / 4 + 0.425 fc (b-2t)(d-2t)² / 4
/// c4 = 0.2 ρ    c1 = 1 - c4    c2 = 1    c3 = -0.4 ρ
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Hajjar {
    c: [f64; 4],
    squash: f64,
    plastic_moment: f64,
}

impl Hajjar {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `depth` -- depth of the tube (along the bending direction)
    /// * `width` -- width of the tube
    /// * `thickness` -- wall thickness
    /// * `fc` -- concrete compressive strength
    /// * `fy` -- steel yield strength
    pub fn new(depth: f64, width: f64, thickness: f64, fc: f64, fy: f64) -> Self {
        let (d, b, t) = (depth, width, thickness);
        let (di, bi) = (d - 2.0 * t, b - 2.0 * t);
        let area_steel = 2.0 * t * (d + b - 2.0 * t);
        let area_concrete = di * bi;
        let squash = area_steel * fy + 0.85 * fc * area_concrete;
        let plastic_moment = fy * (b * d * d - bi * di * di) / 4.0 + 0.425 * fc * bi * di * di / 4.0;
        let rho = 0.85 * fc * area_concrete / squash;
        let c4 = 0.2 * rho;
        Hajjar {
            c: [1.0 - c4, 1.0, -0.4 * rho, c4],
            squash,
            plastic_moment,
        }
    }

    /// Returns the squash load Py and the plastic moment Mp (the normalizing capacities)
    pub fn capacities(&self) -> (f64, f64) {
        (self.squash, self.plastic_moment)
    }

    /// Returns the coefficients (c1, c2, c3, c4)
    pub fn coefficients(&self) -> [f64; 4] {
        self.c
    }
}

impl ShapeTrait for Hajjar {
    fn drift(&self, x: f64, y: f64) -> f64 {
        let [c1, c2, c3, c4] = self.c;
        let (x2, y2) = (x * x, y * y);
        c1 * x2 + c2 * y2 + c3 * x2 * y2 + c4 * x2 * x2 - 1.0
    }

    fn gradient(&self, x: f64, y: f64) -> (f64, f64) {
        let [c1, c2, c3, c4] = self.c;
        let gx = 2.0 * c1 * x + 2.0 * c3 * x * y * y + 4.0 * c4 * x * x * x;
        let gy = 2.0 * c2 * y + 2.0 * c3 * x * x * y;
        (gx, gy)
    }

    fn extent(&self) -> Extent {
        // c1 + c4 = 1 and c2 = 1
        Extent {
            x_pos: 1.0,
            x_neg: -1.0,
            y_pos: 1.0,
            y_neg: -1.0,
        }
    }

    fn flatten(&self) -> Vec<f64> {
        let mut data = self.c.to_vec();
        data.push(self.squash);
        data.push(self.plastic_moment);
        data
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Hajjar;
    use crate::surface::ShapeTrait;
    use russell_lab::approx_eq;

    #[test]
    fn capacities_work() {
        // 10 × 10 × 3/8 tube with fc = 5 and fy = 50
        let shape = Hajjar::new(10.0, 10.0, 0.375, 5.0, 50.0);
        let (py, mp) = shape.capacities();
        approx_eq(py, 1085.515625, 1e-10);
        let mp_correct = 50.0 * (1000.0 - 791.453125) / 4.0 + 0.425 * 5.0 * 791.453125 / 4.0;
        approx_eq(mp, mp_correct, 1e-10);
        let rho = 0.85 * 5.0 * 85.5625 / py;
        let c = shape.coefficients();
        approx_eq(c[0], 1.0 - 0.2 * rho, 1e-15);
        assert_eq!(c[1], 1.0);
        approx_eq(c[2], -0.4 * rho, 1e-15);
        approx_eq(c[3], 0.2 * rho, 1e-15);
    }

    #[test]
    fn drift_works() {
        let shape = Hajjar::new(10.0, 10.0, 0.375, 5.0, 50.0);
        assert_eq!(shape.drift(0.0, 0.0), -1.0);
        approx_eq(shape.drift(1.0, 0.0), 0.0, 1e-15);
        approx_eq(shape.drift(-1.0, 0.0), 0.0, 1e-15);
        approx_eq(shape.drift(0.0, 1.0), 0.0, 1e-15);
        approx_eq(shape.drift(0.0, -1.0), 0.0, 1e-15);
        assert!(shape.drift(0.7, 0.7) < 0.0);
        assert!(shape.drift(2.0, 2.0) > 0.0);
        assert!(shape.drift(1.1, 0.2) > 0.0);
    }

    #[test]
    fn gradient_works() {
        let shape = Hajjar::new(12.0, 8.0, 0.5, 4.0, 46.0);
        let h = 1e-6;
        for (x, y) in [(0.8, 0.5), (-0.3, 0.9), (0.5, -0.6), (-0.95, -0.1)] {
            let (gx, gy) = shape.gradient(x, y);
            let num_x = (shape.drift(x + h, y) - shape.drift(x - h, y)) / (2.0 * h);
            let num_y = (shape.drift(x, y + h) - shape.drift(x, y - h)) / (2.0 * h);
            approx_eq(gx, num_x, 1e-8);
            approx_eq(gy, num_y, 1e-8);
        }
    }
}
