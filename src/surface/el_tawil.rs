use super::{Extent, ShapeTrait};
use serde::{Deserialize, Serialize};

/// Holds the normalized data of one side (x ≥ 0 or x < 0) of the El-Tawil surface
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ElTawilBranch {
    /// Balance-point capacity |x| (normalized)
    pub xb: f64,

    /// Value of y at the balance point (normalized)
    pub yb: f64,

    /// Exponent above the balance point
    pub cz: f64,

    /// Exponent below the balance point
    pub ty: f64,
}

/// Implements the El-Tawil and Deierlein yield surface for composite sections
///
/// With u measuring the distance from the balance point toward the pole on each side:
///
/// ```text
///         |x|
/// Φ = ────────── + h(u)     h(u) = u^ζ
///       xb(x)
///
/// u = (y - yb) / (1 - yb)       ζ = cz     if y ≥ yb
/// u = (yb - y) / (yb - y_neg)   ζ = ty     if y < yb
/// ```
///
/// The coordinates are normalized such that the positive pole is at y = 1. Beyond u > cap the
/// power is replaced by its tangent line (polar cap). The branch data (xb, yb, exponents) may
/// differ for x ≥ 0 and x < 0 (unsymmetric variant).
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ElTawil {
    pos: ElTawilBranch,
    neg: ElTawilBranch,
    y_neg: f64,
    cap: f64,
    symmetric: bool,
}

impl ElTawil {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `pos` -- branch for x ≥ 0
    /// * `neg` -- branch for x < 0
    /// * `y_neg` -- normalized negative pole (< 0)
    /// * `cap` -- fraction of the balance-to-pole distance where the polar cap starts
    pub fn new(pos: ElTawilBranch, neg: ElTawilBranch, y_neg: f64, cap: f64) -> Self {
        let symmetric = pos.xb == neg.xb && pos.yb == neg.yb && pos.cz == neg.cz && pos.ty == neg.ty;
        ElTawil {
            pos,
            neg,
            y_neg,
            cap,
            symmetric,
        }
    }

    /// Indicates that both sides share the same data
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Selects the branch and calculates u, du/dy, and ζ
    fn locate(&self, x: f64, y: f64) -> (&ElTawilBranch, f64, f64, f64) {
        let branch = if x >= 0.0 { &self.pos } else { &self.neg };
        if y >= branch.yb {
            let den = 1.0 - branch.yb;
            (branch, (y - branch.yb) / den, 1.0 / den, branch.cz)
        } else {
            let den = branch.yb - self.y_neg;
            (branch, (branch.yb - y) / den, -1.0 / den, branch.ty)
        }
    }

    /// Calculates h(u) and dh/du with the polar cap
    fn power(&self, u: f64, zeta: f64) -> (f64, f64) {
        if u <= self.cap {
            return (f64::powf(u, zeta), zeta * f64::powf(u, zeta - 1.0));
        }
        let hc = f64::powf(self.cap, zeta);
        let dhc = zeta * f64::powf(self.cap, zeta - 1.0);
        (hc + dhc * (u - self.cap), dhc)
    }

    /// Returns the value of u where h(u) = 1
    fn pole_u(&self, zeta: f64) -> f64 {
        if self.cap >= 1.0 {
            return 1.0;
        }
        let hc = f64::powf(self.cap, zeta);
        let dhc = zeta * f64::powf(self.cap, zeta - 1.0);
        self.cap + (1.0 - hc) / dhc
    }
}

impl ShapeTrait for ElTawil {
    fn drift(&self, x: f64, y: f64) -> f64 {
        let (branch, u, _, zeta) = self.locate(x, y);
        let (h, _) = self.power(u, zeta);
        f64::abs(x) / branch.xb + h - 1.0
    }

    fn gradient(&self, x: f64, y: f64) -> (f64, f64) {
        let (branch, u, du_dy, zeta) = self.locate(x, y);
        let (_, dh_du) = self.power(u, zeta);
        let gx = if x > 0.0 {
            1.0 / branch.xb
        } else if x < 0.0 {
            -1.0 / branch.xb
        } else {
            0.0
        };
        (gx, dh_du * du_dy)
    }

    fn extent(&self) -> Extent {
        // x-intercepts (y = 0)
        let intercept_x = |branch: &ElTawilBranch| {
            let (u, zeta) = if branch.yb > 0.0 {
                (branch.yb / (branch.yb - self.y_neg), branch.ty)
            } else {
                (-branch.yb / (1.0 - branch.yb), branch.cz)
            };
            branch.xb * (1.0 - self.power(u, zeta).0)
        };

        // y-intercepts (x = 0 belongs to the positive side)
        let b = &self.pos;
        Extent {
            x_pos: intercept_x(&self.pos),
            x_neg: -intercept_x(&self.neg),
            y_pos: b.yb + self.pole_u(b.cz) * (1.0 - b.yb),
            y_neg: b.yb - self.pole_u(b.ty) * (b.yb - self.y_neg),
        }
    }

    fn radial_only(&self, x: f64, y: f64) -> bool {
        let (_, u, _, _) = self.locate(x, y);
        u > self.cap
    }

    fn flatten(&self) -> Vec<f64> {
        let mut data = Vec::with_capacity(10);
        for b in [&self.pos, &self.neg] {
            data.extend_from_slice(&[b.xb, b.yb, b.cz, b.ty]);
        }
        data.push(self.y_neg);
        data.push(self.cap);
        data
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
