use super::{Extent, ShapeTrait};
use serde::{Deserialize, Serialize};

/// Implements a yield surface that is never reached
///
/// Every point is inside; hence the section remains elastic.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NullShape {}

/// Implements a yield surface collapsed onto the origin
///
/// Replaces shapes with invalid parameters so that the calculations can continue.
/// Every point except the origin is outside.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DegenerateShape {}

impl NullShape {
    /// Allocates a new instance
    pub fn new() -> Self {
        NullShape {}
    }
}

impl DegenerateShape {
    /// Allocates a new instance
    pub fn new() -> Self {
        DegenerateShape {}
    }
}

impl ShapeTrait for NullShape {
    fn drift(&self, _x: f64, _y: f64) -> f64 {
        -1.0
    }

    fn gradient(&self, _x: f64, _y: f64) -> (f64, f64) {
        (0.0, 0.0)
    }

    fn extent(&self) -> Extent {
        Extent::infinite()
    }

    fn flatten(&self) -> Vec<f64> {
        Vec::new()
    }
}

impl ShapeTrait for DegenerateShape {
    fn drift(&self, x: f64, y: f64) -> f64 {
        f64::hypot(x, y)
    }

    fn gradient(&self, x: f64, y: f64) -> (f64, f64) {
        let r = f64::hypot(x, y);
        if r > 0.0 {
            (x / r, y / r)
        } else {
            (0.0, 0.0)
        }
    }

    fn extent(&self) -> Extent {
        Extent::zero()
    }

    fn flatten(&self) -> Vec<f64> {
        Vec::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{DegenerateShape, NullShape};
    use crate::surface::ShapeTrait;

    #[test]
    fn null_shape_works() {
        let shape = NullShape::new();
        assert_eq!(shape.drift(1e10, -1e10), -1.0);
        assert_eq!(shape.gradient(1.0, 1.0), (0.0, 0.0));
        assert!(!shape.extent().is_regular());
        assert_eq!(shape.extent().x_pos, f64::INFINITY);
        assert_eq!(shape.flatten().len(), 0);
    }

    #[test]
    fn degenerate_shape_works() {
        let shape = DegenerateShape::new();
        assert_eq!(shape.drift(0.0, 0.0), 0.0);
        assert_eq!(shape.drift(3.0, -4.0), 5.0);
        assert_eq!(shape.gradient(3.0, -4.0), (0.6, -0.8));
        assert_eq!(shape.gradient(0.0, 0.0), (0.0, 0.0));
        assert_eq!(shape.extent().y_neg, 0.0);
    }
}
