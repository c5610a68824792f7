use super::{Extent, ShapeTrait};
use serde::{Deserialize, Serialize};

/// Coefficient of y²
const C_YY: f64 = 1.15;

/// Coefficient of x² y²
const C_XXYY: f64 = 3.67;

/// Implements the Orbison yield surface for wide-flange steel sections
///
/// ```text
/// Φ = x² + 1.15 y² + 3.67 x² y²
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Orbison {}

impl Orbison {
    /// Allocates a new instance
    pub fn new() -> Self {
        Orbison {}
    }
}

impl ShapeTrait for Orbison {
    fn drift(&self, x: f64, y: f64) -> f64 {
        x * x + C_YY * y * y + C_XXYY * x * x * y * y - 1.0
    }

    fn gradient(&self, x: f64, y: f64) -> (f64, f64) {
        let gx = 2.0 * x + 2.0 * C_XXYY * x * y * y;
        let gy = 2.0 * C_YY * y + 2.0 * C_XXYY * x * x * y;
        (gx, gy)
    }

    fn extent(&self) -> Extent {
        let ye = 1.0 / f64::sqrt(C_YY);
        Extent {
            x_pos: 1.0,
            x_neg: -1.0,
            y_pos: ye,
            y_neg: -ye,
        }
    }

    fn flatten(&self) -> Vec<f64> {
        Vec::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
