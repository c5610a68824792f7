use crate::base::ParamHardening;
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Implements plastic hardening laws H(Σ)
///
/// Σ is the accumulated magnitude of plastic deformation and H is a dimensionless
/// change of the yield surface (isotropic growth or translation magnitude).
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HardeningLaw {
    param: ParamHardening,
}

impl HardeningLaw {
    /// Allocates a new instance
    pub fn new(param: &ParamHardening) -> Result<Self, StrError> {
        param.validate()?;
        Ok(HardeningLaw { param: param.clone() })
    }

    /// Allocates a law without hardening
    pub fn new_null() -> Self {
        HardeningLaw {
            param: ParamHardening::Null,
        }
    }

    /// Indicates that this law never changes the surface
    pub fn is_null(&self) -> bool {
        match &self.param {
            ParamHardening::Null => true,
            ParamHardening::Linear { kp } => *kp == 0.0,
            _ => false,
        }
    }

    /// Calculates H(Σ)
    pub fn value(&self, sum: f64) -> f64 {
        match &self.param {
            ParamHardening::Null => 0.0,
            ParamHardening::Linear { kp } => kp * sum,
            ParamHardening::ExponReducing { kp0, alpha } => kp0 * (1.0 - f64::exp(-alpha * sum)) / alpha,
            ParamHardening::MultiLinear { points } => {
                let (mut s0, mut h0) = (0.0, 0.0);
                for (s1, h1) in points {
                    if sum <= *s1 {
                        return h0 + (h1 - h0) * (sum - s0) / (s1 - s0);
                    }
                    s0 = *s1;
                    h0 = *h1;
                }
                h0
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
