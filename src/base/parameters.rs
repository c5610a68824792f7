use super::{KinematicDirection, DEFAULT_ATTALLA_CAP, DEFAULT_EL_TAWIL_CAP};
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds parameters for yield surfaces in normalized two-dimensional force space
///
/// The first force component (x) is usually the axial force and the second (y) the bending moment.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum ParamYieldSurface {
    /// Attalla polynomial surface
    ///
    /// ```text
    /// Φ = a1 x² + a2 y² + a3 x⁴ + a4 y⁴ + a5 x⁶ + a6 y⁶
    /// ```
    Attalla {
        /// Capacity along x
        cap_x: f64,

        /// Capacity along y
        cap_y: f64,

        /// Polynomial coefficients (a1, ..., a6)
        coefficients: [f64; 6],

        /// Normalized |y| above which the surface is replaced by its tangent line (polar cap)
        cap: f64,
    },

    /// Orbison surface for wide-flange steel sections
    ///
    /// ```text
    /// Φ = x² + 1.15 y² + 3.67 x² y²
    /// ```
    Orbison {
        /// Capacity along x
        cap_x: f64,

        /// Capacity along y
        cap_y: f64,
    },

    /// El-Tawil and Deierlein surface for composite sections (symmetric about x = 0)
    ElTawil {
        /// Balance-point capacity along x (the maximum |x|)
        x_bal: f64,

        /// Value of y at the balance point
        y_bal: f64,

        /// Positive y capacity (> y_bal)
        y_pos: f64,

        /// Negative y capacity (< y_bal and < 0)
        y_neg: f64,

        /// Exponent of the branch above the balance point
        cz: f64,

        /// Exponent of the branch below the balance point
        ty: f64,

        /// Fraction of the balance-to-pole distance where the polar cap starts
        cap: f64,
    },

    /// El-Tawil and Deierlein surface with distinct balance points for x ≥ 0 and x < 0
    ElTawilUnsym {
        /// Balance-point capacity for x ≥ 0
        x_pos_bal: f64,

        /// Value of y at the balance point for x ≥ 0
        y_pos_bal: f64,

        /// Balance-point capacity for x < 0 (given as a negative number)
        x_neg_bal: f64,

        /// Value of y at the balance point for x < 0
        y_neg_bal: f64,

        /// Positive y capacity
        y_pos: f64,

        /// Negative y capacity
        y_neg: f64,

        /// Exponent above the balance point for x ≥ 0
        cz_pos: f64,

        /// Exponent below the balance point for x ≥ 0
        ty_pos: f64,

        /// Exponent above the balance point for x < 0
        cz_neg: f64,

        /// Exponent below the balance point for x < 0
        ty_neg: f64,

        /// Fraction of the balance-to-pole distance where the polar cap starts
        cap: f64,
    },

    /// Hajjar and Gourley surface for rectangular concrete-filled steel tubes
    ///
    /// The capacities and coefficients are derived from the cross-section.
    Hajjar {
        /// Depth of the tube
        depth: f64,

        /// Width of the tube
        width: f64,

        /// Wall thickness
        thickness: f64,

        /// Concrete compressive strength
        fc: f64,

        /// Steel yield strength
        fy: f64,
    },

    /// Surface that is never reached (disables plasticity)
    Null,
}

/// Holds parameters for plastic hardening laws
///
/// The value H(Σ) is a dimensionless change of the surface as a function of the
/// accumulated plastic deformation Σ. Negative slopes represent softening.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum ParamHardening {
    /// No hardening
    Null,

    /// Linear hardening H = kp Σ
    Linear {
        /// Slope
        kp: f64,
    },

    /// Saturating hardening H = (kp0 / α) (1 - exp(-α Σ))
    ExponReducing {
        /// Initial slope
        kp0: f64,

        /// Decay coefficient (> 0)
        alpha: f64,
    },

    /// Piecewise-linear hardening through (Σ, H) points
    ///
    /// The curve starts at (0, 0) and is flat after the last point.
    MultiLinear {
        /// The (Σ, H) points with increasing Σ > 0
        points: Vec<(f64, f64)>,
    },
}

/// Holds parameters for the evolution (hardening/softening) of yield surfaces
#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum ParamEvolution {
    /// The surface is frozen (perfect plasticity)
    Null,

    /// Uniform scaling of the surface
    Isotropic {
        /// Hardening law for the isotropic factor
        hardening: ParamHardening,
    },

    /// Rigid translation of the surface
    Kinematic {
        /// Hardening law for the translation magnitude
        hardening: ParamHardening,

        /// Direction of the translation
        direction: KinematicDirection,
    },

    /// Combined isotropic scaling and rigid translation
    Combined {
        /// Hardening law for the isotropic factor
        isotropic: ParamHardening,

        /// Hardening law for the translation magnitude
        kinematic: ParamHardening,

        /// Share of the plastic deformation driving the isotropic part (0 ≤ ratio ≤ 1)
        iso_ratio: f64,

        /// Direction of the translation
        direction: KinematicDirection,
    },
}

/// Holds parameters for a beam-column section with a yield surface
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ParamSection {
    /// Axial rigidity EA
    pub ea: f64,

    /// Flexural rigidity EI
    pub ei: f64,

    /// Yield surface in (axial force, bending moment) space
    pub surface: ParamYieldSurface,

    /// Evolution of the yield surface
    pub evolution: ParamEvolution,
}

impl ParamYieldSurface {
    /// Returns the Attalla surface with the default coefficients
    pub fn attalla(cap_x: f64, cap_y: f64) -> Self {
        ParamYieldSurface::Attalla {
            cap_x,
            cap_y,
            coefficients: [0.19, 0.54, -1.4, -1.64, 2.21, 2.10],
            cap: DEFAULT_ATTALLA_CAP,
        }
    }

    /// Returns the symmetric El-Tawil surface with the default polar cap
    pub fn el_tawil(x_bal: f64, y_bal: f64, y_pos: f64, y_neg: f64, cz: f64, ty: f64) -> Self {
        ParamYieldSurface::ElTawil {
            x_bal,
            y_bal,
            y_pos,
            y_neg,
            cz,
            ty,
            cap: DEFAULT_EL_TAWIL_CAP,
        }
    }

    /// Checks the parameters
    pub fn validate(&self) -> Result<(), StrError> {
        match *self {
            ParamYieldSurface::Attalla {
                cap_x,
                cap_y,
                coefficients,
                cap,
            } => {
                check_caps(cap_x, cap_y)?;
                if coefficients.iter().any(|a| !a.is_finite()) {
                    return Err("Attalla coefficients must be finite");
                }
                if coefficients[0] + coefficients[2] + coefficients[4] <= 0.0 {
                    return Err("Attalla coefficients must give a positive x-intercept");
                }
                if coefficients[1] + coefficients[3] + coefficients[5] <= 0.0 {
                    return Err("Attalla coefficients must give a positive y-intercept");
                }
                check_cap(cap)
            }
            ParamYieldSurface::Orbison { cap_x, cap_y } => check_caps(cap_x, cap_y),
            ParamYieldSurface::ElTawil {
                x_bal,
                y_bal,
                y_pos,
                y_neg,
                cz,
                ty,
                cap,
            } => {
                check_caps(x_bal, y_pos)?;
                check_balance(y_bal, y_pos, y_neg)?;
                check_exponents(cz, ty)?;
                check_cap(cap)
            }
            ParamYieldSurface::ElTawilUnsym {
                x_pos_bal,
                y_pos_bal,
                x_neg_bal,
                y_neg_bal,
                y_pos,
                y_neg,
                cz_pos,
                ty_pos,
                cz_neg,
                ty_neg,
                cap,
            } => {
                check_caps(x_pos_bal, y_pos)?;
                if !(x_neg_bal < 0.0) {
                    return Err("x_neg_bal must be < 0.0");
                }
                check_balance(y_pos_bal, y_pos, y_neg)?;
                check_balance(y_neg_bal, y_pos, y_neg)?;
                check_exponents(cz_pos, ty_pos)?;
                check_exponents(cz_neg, ty_neg)?;
                check_cap(cap)
            }
            ParamYieldSurface::Hajjar {
                depth,
                width,
                thickness,
                fc,
                fy,
            } => {
                if !(depth > 0.0) || !(width > 0.0) {
                    return Err("Hajjar depth and width must be > 0.0");
                }
                if !(thickness > 0.0) || 2.0 * thickness >= f64::min(depth, width) {
                    return Err("Hajjar thickness must be > 0.0 and smaller than half the depth and width");
                }
                if !(fc > 0.0) || !(fy > 0.0) {
                    return Err("Hajjar strengths fc and fy must be > 0.0");
                }
                Ok(())
            }
            ParamYieldSurface::Null => Ok(()),
        }
    }
}

impl ParamHardening {
    /// Checks the parameters
    pub fn validate(&self) -> Result<(), StrError> {
        match self {
            ParamHardening::Null => Ok(()),
            ParamHardening::Linear { kp } => {
                if !kp.is_finite() {
                    return Err("linear hardening kp must be finite");
                }
                Ok(())
            }
            ParamHardening::ExponReducing { kp0, alpha } => {
                if !kp0.is_finite() {
                    return Err("exponential hardening kp0 must be finite");
                }
                if !(*alpha > 0.0) {
                    return Err("exponential hardening alpha must be > 0.0");
                }
                Ok(())
            }
            ParamHardening::MultiLinear { points } => {
                if points.is_empty() {
                    return Err("multi-linear hardening requires at least one point");
                }
                let mut sum_prev = 0.0;
                for (sum, value) in points {
                    if !(*sum > sum_prev) {
                        return Err("multi-linear hardening points must have increasing Σ > 0");
                    }
                    if !value.is_finite() {
                        return Err("multi-linear hardening values must be finite");
                    }
                    sum_prev = *sum;
                }
                Ok(())
            }
        }
    }
}

impl ParamEvolution {
    /// Checks the parameters
    pub fn validate(&self) -> Result<(), StrError> {
        match self {
            ParamEvolution::Null => Ok(()),
            ParamEvolution::Isotropic { hardening } => hardening.validate(),
            ParamEvolution::Kinematic { hardening, .. } => hardening.validate(),
            ParamEvolution::Combined {
                isotropic,
                kinematic,
                iso_ratio,
                ..
            } => {
                isotropic.validate()?;
                kinematic.validate()?;
                if !(*iso_ratio >= 0.0 && *iso_ratio <= 1.0) {
                    return Err("iso_ratio must satisfy 0 ≤ iso_ratio ≤ 1");
                }
                Ok(())
            }
        }
    }
}

impl ParamSection {
    /// Checks the parameters
    pub fn validate(&self) -> Result<(), StrError> {
        if !(self.ea > 0.0) {
            return Err("ea must be > 0.0");
        }
        if !(self.ei > 0.0) {
            return Err("ei must be > 0.0");
        }
        self.surface.validate()?;
        self.evolution.validate()
    }
}

/// Checks the capacities used to normalize the force space
fn check_caps(cap_x: f64, cap_y: f64) -> Result<(), StrError> {
    if !(cap_x > 0.0) || !cap_x.is_finite() {
        return Err("capacity along x must be > 0.0");
    }
    if !(cap_y > 0.0) || !cap_y.is_finite() {
        return Err("capacity along y must be > 0.0");
    }
    Ok(())
}

/// Checks the balance point and poles of the El-Tawil surface
fn check_balance(y_bal: f64, y_pos: f64, y_neg: f64) -> Result<(), StrError> {
    if !(y_neg < 0.0) {
        return Err("y_neg must be < 0.0");
    }
    if !(y_bal > y_neg && y_bal < y_pos) {
        return Err("the balance point must satisfy y_neg < y_bal < y_pos");
    }
    Ok(())
}

/// Checks the exponents of the El-Tawil surface
fn check_exponents(cz: f64, ty: f64) -> Result<(), StrError> {
    if !(cz >= 1.0) || !(ty >= 1.0) {
        return Err("El-Tawil exponents must be ≥ 1.0");
    }
    Ok(())
}

/// Checks the polar cap transition
fn check_cap(cap: f64) -> Result<(), StrError> {
    if !(cap > 0.0 && cap <= 1.0) {
        return Err("polar cap transition must satisfy 0 < cap ≤ 1");
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
