use super::{INNER_OFFSET, MIN_ISO_FACTOR, N_MAX_ITERATIONS, N_MAX_WALK_STEPS, TOL_NEGATIVE, TOL_POSITIVE, TOL_ROOT};
use super::{ReturnPolicy, WALK_INCREMENT};
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds numerical settings for the yield surface algorithms
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Prints diagnostic messages
    pub verbose: bool,

    /// Drift tolerance to regard small negative values as on the surface
    pub tol_negative: f64,

    /// Drift tolerance to regard small positive values as on the surface
    pub tol_positive: f64,

    /// Tolerance on |drift| to stop the interpolation loop
    pub tol_root: f64,

    /// Maximum number of iterations of the interpolation loop
    pub n_max_iterations: usize,

    /// Radial increment when walking outward to bracket the surface
    pub walk_increment: f64,

    /// Maximum number of outward increments
    pub n_max_walk_steps: usize,

    /// Inward offset (fraction of the extent) of the inner quadrilateral
    pub inner_offset: f64,

    /// Minimum isotropic factor
    pub min_iso_factor: f64,

    /// Return policy used to put the final force of a plastic step onto the surface
    pub final_return: ReturnPolicy,
}

impl Settings {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Settings {
            verbose: false,
            tol_negative: TOL_NEGATIVE,
            tol_positive: TOL_POSITIVE,
            tol_root: TOL_ROOT,
            n_max_iterations: N_MAX_ITERATIONS,
            walk_increment: WALK_INCREMENT,
            n_max_walk_steps: N_MAX_WALK_STEPS,
            inner_offset: INNER_OFFSET,
            min_iso_factor: MIN_ISO_FACTOR,
            final_return: ReturnPolicy::ConstantYReturn,
        }
    }

    /// Enables the printing of diagnostic messages
    pub fn set_verbose(&mut self, flag: bool) -> &mut Self {
        self.verbose = flag;
        self
    }

    /// Sets the tolerances of the force-location classification
    pub fn set_tolerances(&mut self, tol_negative: f64, tol_positive: f64) -> Result<&mut Self, StrError> {
        if !(tol_negative >= 0.0) || !(tol_positive > 0.0) {
            return Err("tolerances must satisfy tol_negative ≥ 0 and tol_positive > 0");
        }
        if self.tol_root > tol_positive {
            return Err("tol_root must not exceed tol_positive");
        }
        self.tol_negative = tol_negative;
        self.tol_positive = tol_positive;
        Ok(self)
    }

    /// Sets the parameters of the interpolation loop
    pub fn set_root_finding(&mut self, tol_root: f64, n_max_iterations: usize) -> Result<&mut Self, StrError> {
        if !(tol_root > 0.0) || tol_root > self.tol_positive {
            return Err("tol_root must satisfy 0 < tol_root ≤ tol_positive");
        }
        if n_max_iterations < 1 {
            return Err("n_max_iterations must be ≥ 1");
        }
        self.tol_root = tol_root;
        self.n_max_iterations = n_max_iterations;
        Ok(self)
    }

    /// Sets the parameters of the outward walk
    pub fn set_walk(&mut self, walk_increment: f64, n_max_walk_steps: usize) -> Result<&mut Self, StrError> {
        if !(walk_increment > 0.0) {
            return Err("walk_increment must be > 0.0");
        }
        if n_max_walk_steps < 1 {
            return Err("n_max_walk_steps must be ≥ 1");
        }
        self.walk_increment = walk_increment;
        self.n_max_walk_steps = n_max_walk_steps;
        Ok(self)
    }

    /// Sets the inward offset of the inner quadrilateral
    pub fn set_inner_offset(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if !(value > 0.0 && value < 1.0) {
            return Err("inner_offset must satisfy 0 < inner_offset < 1");
        }
        self.inner_offset = value;
        Ok(self)
    }

    /// Sets the minimum isotropic factor
    pub fn set_min_iso_factor(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if !(value > 0.0 && value <= 1.0) {
            return Err("min_iso_factor must satisfy 0 < min_iso_factor ≤ 1");
        }
        self.min_iso_factor = value;
        Ok(self)
    }

    /// Sets the return policy used for the final force of a plastic step
    pub fn set_final_return(&mut self, policy: ReturnPolicy) -> Result<&mut Self, StrError> {
        if policy == ReturnPolicy::DfReturn {
            return Err("the final return must not depend on the committed force");
        }
        self.final_return = policy;
        Ok(self)
    }

    /// Validates all values (e.g., after reading from a JSON file)
    pub fn validate(&self) -> Result<(), StrError> {
        let mut checked = *self;
        checked
            .set_tolerances(self.tol_negative, self.tol_positive)?
            .set_root_finding(self.tol_root, self.n_max_iterations)?
            .set_walk(self.walk_increment, self.n_max_walk_steps)?
            .set_inner_offset(self.inner_offset)?
            .set_min_iso_factor(self.min_iso_factor)?
            .set_final_return(self.final_return)?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
