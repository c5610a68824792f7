use super::{Attalla, DegenerateShape, ElTawil, ElTawilBranch, Extent, Hajjar, NullShape, Orbison, ShapeTrait};
use crate::base::ParamYieldSurface;
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds one of the available yield surface shapes
///
/// The shapes are defined in normalized coordinates of the original (undeformed) surface.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum YieldShape {
    Attalla(Attalla),
    Orbison(Orbison),
    ElTawil(ElTawil),
    ElTawilUnsym(ElTawil),
    Hajjar(Hajjar),
    Null(NullShape),
    Degenerate(DegenerateShape),
}

impl YieldShape {
    /// Allocates a new instance
    ///
    /// Returns the shape and the capacities (cap_x, cap_y) used to normalize the force space.
    pub fn new(param: &ParamYieldSurface) -> Result<(Self, f64, f64), StrError> {
        param.validate()?;
        let res = match *param {
            ParamYieldSurface::Attalla {
                cap_x,
                cap_y,
                coefficients,
                cap,
            } => (YieldShape::Attalla(Attalla::new(&coefficients, cap)), cap_x, cap_y),
            ParamYieldSurface::Orbison { cap_x, cap_y } => (YieldShape::Orbison(Orbison::new()), cap_x, cap_y),
            ParamYieldSurface::ElTawil {
                x_bal,
                y_bal,
                y_pos,
                y_neg,
                cz,
                ty,
                cap,
            } => {
                let branch = ElTawilBranch {
                    xb: 1.0,
                    yb: y_bal / y_pos,
                    cz,
                    ty,
                };
                let shape = ElTawil::new(branch, branch, y_neg / y_pos, cap);
                (YieldShape::ElTawil(shape), x_bal, y_pos)
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
                let pos = ElTawilBranch {
                    xb: 1.0,
                    yb: y_pos_bal / y_pos,
                    cz: cz_pos,
                    ty: ty_pos,
                };
                let neg = ElTawilBranch {
                    xb: -x_neg_bal / x_pos_bal,
                    yb: y_neg_bal / y_pos,
                    cz: cz_neg,
                    ty: ty_neg,
                };
                let shape = ElTawil::new(pos, neg, y_neg / y_pos, cap);
                (YieldShape::ElTawilUnsym(shape), x_pos_bal, y_pos)
            }
            ParamYieldSurface::Hajjar {
                depth,
                width,
                thickness,
                fc,
                fy,
            } => {
                let shape = Hajjar::new(depth, width, thickness, fc, fy);
                let (py, mp) = shape.capacities();
                (YieldShape::Hajjar(shape), py, mp)
            }
            ParamYieldSurface::Null => (YieldShape::Null(NullShape::new()), 1.0, 1.0),
        };
        Ok(res)
    }

    /// Returns the name of the shape
    pub fn name(&self) -> &'static str {
        match self {
            YieldShape::Attalla(_) => "Attalla",
            YieldShape::Orbison(_) => "Orbison",
            YieldShape::ElTawil(_) => "ElTawil",
            YieldShape::ElTawilUnsym(_) => "ElTawilUnsym",
            YieldShape::Hajjar(_) => "Hajjar",
            YieldShape::Null(_) => "Null",
            YieldShape::Degenerate(_) => "Degenerate",
        }
    }

    /// Returns the actual shape
    fn actual(&self) -> &dyn ShapeTrait {
        match self {
            YieldShape::Attalla(s) => s,
            YieldShape::Orbison(s) => s,
            YieldShape::ElTawil(s) => s,
            YieldShape::ElTawilUnsym(s) => s,
            YieldShape::Hajjar(s) => s,
            YieldShape::Null(s) => s,
            YieldShape::Degenerate(s) => s,
        }
    }
}

impl ShapeTrait for YieldShape {
    fn drift(&self, x: f64, y: f64) -> f64 {
        self.actual().drift(x, y)
    }

    fn gradient(&self, x: f64, y: f64) -> (f64, f64) {
        self.actual().gradient(x, y)
    }

    fn extent(&self) -> Extent {
        self.actual().extent()
    }

    fn radial_only(&self, x: f64, y: f64) -> bool {
        self.actual().radial_only(x, y)
    }

    fn flatten(&self) -> Vec<f64> {
        self.actual().flatten()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
