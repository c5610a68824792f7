use super::{TOL_NEGATIVE, TOL_POSITIVE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines the location of a force point with respect to the yield surface
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum ForceLocation {
    /// The force point is strictly inside (elastic)
    Inside,

    /// The force point is on the surface, within tolerance
    OnSurface,

    /// The force point is strictly outside (inadmissible)
    Outside,
}

impl ForceLocation {
    /// Classifies a drift value using the default tolerance bands
    ///
    /// ```text
    /// drift < -TOL_NEGATIVE              ⇒ Inside
    /// -TOL_NEGATIVE ≤ drift ≤ TOL_POSITIVE ⇒ OnSurface
    /// drift > TOL_POSITIVE               ⇒ Outside
    /// ```
    ///
    /// A NaN drift is classified as Outside.
    pub fn from_drift(drift: f64) -> Self {
        ForceLocation::from_drift_tol(drift, TOL_NEGATIVE, TOL_POSITIVE)
    }

    /// Classifies a drift value using the given tolerances
    pub fn from_drift_tol(drift: f64, tol_negative: f64, tol_positive: f64) -> Self {
        if drift.is_nan() {
            ForceLocation::Outside
        } else if drift < -tol_negative {
            ForceLocation::Inside
        } else if drift > tol_positive {
            ForceLocation::Outside
        } else {
            ForceLocation::OnSurface
        }
    }
}

impl fmt::Display for ForceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForceLocation::Inside => write!(f, "inside"),
            ForceLocation::OnSurface => write!(f, "on-surface"),
            ForceLocation::Outside => write!(f, "outside"),
        }
    }
}

/// Defines how a force point is brought back onto the yield surface
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum ReturnPolicy {
    /// Along the line from the last committed force to the trial force
    DfReturn,

    /// Along the line from the surface center to the trial force
    RadialReturn,

    /// Along a line parallel to the y axis (x is kept)
    ConstantXReturn,

    /// Along a line parallel to the x axis (y is kept)
    ConstantYReturn,
}

/// Defines what happened to the size of the yield surface after an evolution
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum EvolutionStatus {
    Expanding,
    Unchanged,
    Shrinking,
}

/// Defines the direction of the kinematic translation
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum KinematicDirection {
    /// Along the outward normal (gradient) at the force point
    Normal,

    /// Along the line from the surface center to the force point
    Radial,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
