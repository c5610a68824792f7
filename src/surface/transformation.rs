use crate::StrError;
use russell_lab::Vector;
use serde::{Deserialize, Serialize};

/// Maps the element (section) force vector onto the local x-y force space of a yield surface
///
/// ```text
/// fx = x_fact · force[x_dof]
/// fy = y_fact · force[y_dof]
/// ```
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Transformation {
    /// Index of the element component mapped to x
    pub x_dof: usize,

    /// Index of the element component mapped to y
    pub y_dof: usize,

    /// Factor applied to x (e.g., -1 to flip the sign convention)
    pub x_fact: f64,

    /// Factor applied to y
    pub y_fact: f64,
}

impl Transformation {
    /// Allocates a new instance
    pub fn new(x_dof: usize, y_dof: usize, x_fact: f64, y_fact: f64) -> Result<Self, StrError> {
        if x_dof == y_dof {
            return Err("x_dof and y_dof must be different");
        }
        if x_fact == 0.0 || y_fact == 0.0 || !x_fact.is_finite() || !y_fact.is_finite() {
            return Err("x_fact and y_fact must be finite and non-zero");
        }
        Ok(Transformation {
            x_dof,
            y_dof,
            x_fact,
            y_fact,
        })
    }

    /// Returns the minimum dimension of element vectors
    pub fn min_dim(&self) -> usize {
        usize::max(self.x_dof, self.y_dof) + 1
    }

    /// Converts an element vector into local (fx, fy)
    ///
    /// # Panics
    ///
    /// A panic will occur if the vector is shorter than [Transformation::min_dim]
    pub fn to_local(&self, force: &Vector) -> (f64, f64) {
        (self.x_fact * force[self.x_dof], self.y_fact * force[self.y_dof])
    }

    /// Writes local (fx, fy) into an element vector
    ///
    /// Other components of the element vector are not modified.
    pub fn to_element(&self, fx: f64, fy: f64, force: &mut Vector) {
        force[self.x_dof] = fx / self.x_fact;
        force[self.y_dof] = fy / self.y_fact;
    }

    /// Converts the local gradient (∂Φ/∂fx, ∂Φ/∂fy) into the element gradient
    ///
    /// Other components of the element gradient are set to zero.
    pub fn gradient_to_element(&self, gx: f64, gy: f64, gradient: &mut Vector) {
        gradient.fill(0.0);
        gradient[self.x_dof] = gx * self.x_fact;
        gradient[self.y_dof] = gy * self.y_fact;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Transformation;
    use russell_lab::Vector;

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            Transformation::new(1, 1, 1.0, 1.0).err(),
            Some("x_dof and y_dof must be different")
        );
        assert_eq!(
            Transformation::new(0, 1, 0.0, 1.0).err(),
            Some("x_fact and y_fact must be finite and non-zero")
        );
    }

    #[test]
    fn conversions_work() {
        let tr = Transformation::new(2, 0, -1.0, 2.0).unwrap();
        assert_eq!(tr.min_dim(), 3);
        let force = Vector::from(&[10.0, 20.0, 30.0]);
        assert_eq!(tr.to_local(&force), (-30.0, 20.0));

        let mut back = Vector::from(&[0.0, 5.0, 0.0]);
        tr.to_element(-30.0, 20.0, &mut back);
        assert_eq!(back.as_data(), &[10.0, 5.0, 30.0]);

        let mut g = Vector::from(&[1.0, 1.0, 1.0]);
        tr.gradient_to_element(0.5, 0.25, &mut g);
        assert_eq!(g.as_data(), &[0.5, 0.0, -0.5]);
    }
}
