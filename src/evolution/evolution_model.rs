use super::HardeningLaw;
use crate::base::{EvolutionStatus, KinematicDirection, ParamEvolution, MIN_ISO_FACTOR};
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds the number of values returned by [EvolutionModel::flatten]
pub const EVOLUTION_N_FLAT: usize = 10;

/// Implements the evolution (hardening/softening) of a yield surface
///
/// The surface placed in force space (deformed) is obtained from the fixed (original) shape by
/// an isotropic scaling followed by a translation. All coordinates are normalized by the original
/// capacities:
///
/// ```text
/// p_original = (p_deformed - translate) / iso_factor
/// p_deformed = p_original iso_factor + translate
/// ```
///
/// The trial state is always recomputed from the committed state and the current plastic
/// increment; the committed state is only changed by [EvolutionModel::commit].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EvolutionModel {
    /// Hardening law driving the isotropic factor
    isotropic: HardeningLaw,

    /// Hardening law driving the translation magnitude
    kinematic: HardeningLaw,

    /// Share of the plastic deformation driving the isotropic part
    iso_ratio: f64,

    /// Share of the plastic deformation driving the kinematic part
    kin_ratio: f64,

    /// Direction of the translation
    direction: KinematicDirection,

    /// Minimum isotropic factor
    min_iso_factor: f64,

    /// Trial isotropic factors
    iso_factor: [f64; 2],

    /// Committed isotropic factors
    iso_factor_committed: [f64; 2],

    /// Trial translation
    translate: [f64; 2],

    /// Committed translation
    translate_committed: [f64; 2],

    /// Trial accumulated plastic deformation Σ
    sum_plastic: f64,

    /// Committed accumulated plastic deformation Σ
    sum_plastic_committed: f64,
}

impl EvolutionModel {
    /// Allocates a new instance
    pub fn new(param: &ParamEvolution) -> Result<Self, StrError> {
        let (isotropic, kinematic, iso_ratio, kin_ratio, direction) = match param {
            ParamEvolution::Null => return Ok(EvolutionModel::new_null()),
            ParamEvolution::Isotropic { hardening } => (
                HardeningLaw::new(hardening)?,
                HardeningLaw::new_null(),
                1.0,
                0.0,
                KinematicDirection::Normal,
            ),
            ParamEvolution::Kinematic { hardening, direction } => (
                HardeningLaw::new_null(),
                HardeningLaw::new(hardening)?,
                0.0,
                1.0,
                *direction,
            ),
            ParamEvolution::Combined {
                isotropic,
                kinematic,
                iso_ratio,
                direction,
            } => {
                param.validate()?;
                (
                    HardeningLaw::new(isotropic)?,
                    HardeningLaw::new(kinematic)?,
                    *iso_ratio,
                    1.0 - iso_ratio,
                    *direction,
                )
            }
        };
        Ok(EvolutionModel {
            isotropic,
            kinematic,
            iso_ratio,
            kin_ratio,
            direction,
            min_iso_factor: MIN_ISO_FACTOR,
            iso_factor: [1.0, 1.0],
            iso_factor_committed: [1.0, 1.0],
            translate: [0.0, 0.0],
            translate_committed: [0.0, 0.0],
            sum_plastic: 0.0,
            sum_plastic_committed: 0.0,
        })
    }

    /// Allocates an evolution model that never changes the surface
    pub fn new_null() -> Self {
        EvolutionModel {
            isotropic: HardeningLaw::new_null(),
            kinematic: HardeningLaw::new_null(),
            iso_ratio: 0.0,
            kin_ratio: 0.0,
            direction: KinematicDirection::Normal,
            min_iso_factor: MIN_ISO_FACTOR,
            iso_factor: [1.0, 1.0],
            iso_factor_committed: [1.0, 1.0],
            translate: [0.0, 0.0],
            translate_committed: [0.0, 0.0],
            sum_plastic: 0.0,
            sum_plastic_committed: 0.0,
        }
    }

    /// Sets the minimum isotropic factor
    pub fn set_min_iso_factor(&mut self, value: f64) -> Result<(), StrError> {
        if !(value > 0.0 && value <= 1.0) {
            return Err("min_iso_factor must satisfy 0 < min_iso_factor ≤ 1");
        }
        self.min_iso_factor = value;
        Ok(())
    }

    /// Indicates that the surface is frozen (perfect plasticity)
    pub fn is_frozen(&self) -> bool {
        self.isotropic.is_null() && self.kinematic.is_null()
    }

    /// Converts a deformed (placed) point into the coordinates of the original shape
    pub fn to_original(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.translate[0]) / self.iso_factor[0],
            (y - self.translate[1]) / self.iso_factor[1],
        )
    }

    /// Converts a point of the original shape into deformed (placed) coordinates
    pub fn to_deformed(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.iso_factor[0] + self.translate[0],
            y * self.iso_factor[1] + self.translate[1],
        )
    }

    /// Computes the trial state given a plastic increment
    ///
    /// # Input
    ///
    /// * `magnitude` -- magnitude of the plastic deformation increment (≥ 0)
    /// * `gradient` -- gradient of the yield function at the force point (original coordinates)
    /// * `force` -- force point on the surface (original coordinates)
    ///
    /// # Output
    ///
    /// Returns whether the trial surface is larger, equal, or smaller than the committed one.
    pub fn evolve(&mut self, magnitude: f64, gradient: (f64, f64), force: (f64, f64)) -> EvolutionStatus {
        // start from the committed state
        self.iso_factor = self.iso_factor_committed;
        self.translate = self.translate_committed;
        self.sum_plastic = self.sum_plastic_committed;
        if self.is_frozen() || !(magnitude > 0.0) {
            return EvolutionStatus::Unchanged;
        }

        // accumulated plastic deformation
        let sum_old = self.sum_plastic_committed;
        let sum_new = sum_old + magnitude;
        self.sum_plastic = sum_new;

        // isotropic scaling
        if !self.isotropic.is_null() {
            let h = self.isotropic.value(self.iso_ratio * sum_new);
            let factor = f64::max(1.0 + h, self.min_iso_factor);
            self.iso_factor = [factor, factor];
        }

        // kinematic translation
        if !self.kinematic.is_null() {
            let dh = self.kinematic.value(self.kin_ratio * sum_new) - self.kinematic.value(self.kin_ratio * sum_old);
            let (nx, ny) = match self.direction {
                KinematicDirection::Normal => gradient,
                KinematicDirection::Radial => force,
            };
            let norm = f64::sqrt(nx * nx + ny * ny);
            if norm > 0.0 {
                self.translate[0] += dh * nx / norm;
                self.translate[1] += dh * ny / norm;
            }
        }

        // status
        let delta = self.iso_factor[0] - self.iso_factor_committed[0];
        if delta > 0.0 {
            EvolutionStatus::Expanding
        } else if delta < 0.0 {
            EvolutionStatus::Shrinking
        } else {
            EvolutionStatus::Unchanged
        }
    }

    /// Copies the trial state into the committed state
    pub fn commit(&mut self) {
        self.iso_factor_committed = self.iso_factor;
        self.translate_committed = self.translate;
        self.sum_plastic_committed = self.sum_plastic;
    }

    /// Copies the committed state into the trial state
    pub fn revert_to_last_commit(&mut self) {
        self.iso_factor = self.iso_factor_committed;
        self.translate = self.translate_committed;
        self.sum_plastic = self.sum_plastic_committed;
    }

    /// Resets the trial and committed states to the unmodified surface
    pub fn revert_to_start(&mut self) {
        self.iso_factor = [1.0, 1.0];
        self.iso_factor_committed = [1.0, 1.0];
        self.translate = [0.0, 0.0];
        self.translate_committed = [0.0, 0.0];
        self.sum_plastic = 0.0;
        self.sum_plastic_committed = 0.0;
    }

    /// Returns the trial isotropic factors
    pub fn iso_factor(&self) -> [f64; 2] {
        self.iso_factor
    }

    /// Returns the committed isotropic factors
    pub fn iso_factor_committed(&self) -> [f64; 2] {
        self.iso_factor_committed
    }

    /// Returns the trial translation
    pub fn translate(&self) -> [f64; 2] {
        self.translate
    }

    /// Returns the committed translation
    pub fn translate_committed(&self) -> [f64; 2] {
        self.translate_committed
    }

    /// Returns the trial accumulated plastic deformation
    pub fn sum_plastic(&self) -> f64 {
        self.sum_plastic
    }

    /// Returns the state as a flat list of numbers
    ///
    /// ```text
    /// [iso_x, iso_y, iso_x_committed, iso_y_committed,
    ///  translate_x, translate_y, translate_x_committed, translate_y_committed,
    ///  Σ, Σ_committed]
    /// ```
    pub fn flatten(&self) -> Vec<f64> {
        vec![
            self.iso_factor[0],
            self.iso_factor[1],
            self.iso_factor_committed[0],
            self.iso_factor_committed[1],
            self.translate[0],
            self.translate[1],
            self.translate_committed[0],
            self.translate_committed[1],
            self.sum_plastic,
            self.sum_plastic_committed,
        ]
    }

    /// Restores the state from a flat list of numbers
    ///
    /// Returns the number of consumed values.
    pub fn restore(&mut self, data: &[f64]) -> Result<usize, StrError> {
        if data.len() < EVOLUTION_N_FLAT {
            return Err("not enough data to restore the evolution model");
        }
        if data[0..4].iter().any(|v| !(*v > 0.0)) {
            return Err("isotropic factors must be > 0.0");
        }
        self.iso_factor = [data[0], data[1]];
        self.iso_factor_committed = [data[2], data[3]];
        self.translate = [data[4], data[5]];
        self.translate_committed = [data[6], data[7]];
        self.sum_plastic = data[8];
        self.sum_plastic_committed = data[9];
        Ok(EVOLUTION_N_FLAT)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{EvolutionModel, EVOLUTION_N_FLAT};
    use crate::base::{EvolutionStatus, KinematicDirection, ParamEvolution, ParamHardening};
    use russell_lab::approx_eq;

    fn combined() -> EvolutionModel {
        EvolutionModel::new(&ParamEvolution::Combined {
            isotropic: ParamHardening::Linear { kp: 2.0 },
            kinematic: ParamHardening::Linear { kp: 1.0 },
            iso_ratio: 0.5,
            direction: KinematicDirection::Normal,
        })
        .unwrap()
    }

    #[test]
    fn new_captures_errors() {
        let param = ParamEvolution::Isotropic {
            hardening: ParamHardening::ExponReducing { kp0: 1.0, alpha: 0.0 },
        };
        assert_eq!(
            EvolutionModel::new(&param).err(),
            Some("exponential hardening alpha must be > 0.0")
        );
    }

    #[test]
    fn transformations_work() {
        let mut model = combined();
        model.evolve(0.1, (1.0, 0.0), (1.0, 0.0));
        approx_eq(model.iso_factor()[0], 1.1, 1e-15);
        approx_eq(model.iso_factor()[1], 1.1, 1e-15);
        approx_eq(model.translate()[0], 0.05, 1e-15);
        assert_eq!(model.translate()[1], 0.0);
        let (xo, yo) = model.to_original(1.2, -0.5);
        approx_eq(xo, (1.2 - 0.05) / 1.1, 1e-15);
        approx_eq(yo, -0.5 / 1.1, 1e-15);
        let (x, y) = model.to_deformed(xo, yo);
        approx_eq(x, 1.2, 1e-15);
        approx_eq(y, -0.5, 1e-15);
    }

    #[test]
    fn null_evolution_is_identity() {
        let mut model = EvolutionModel::new_null();
        assert!(model.is_frozen());
        assert_eq!(model.evolve(1.0, (1.0, 0.0), (1.0, 0.0)), EvolutionStatus::Unchanged);
        model.commit();
        assert_eq!(model.iso_factor_committed(), [1.0, 1.0]);
        assert_eq!(model.translate_committed(), [0.0, 0.0]);
        assert_eq!(model.to_original(0.3, 0.4), (0.3, 0.4));
    }

    #[test]
    fn evolve_reports_status() {
        let param = ParamEvolution::Isotropic {
            hardening: ParamHardening::Linear { kp: -1.0 },
        };
        let mut model = EvolutionModel::new(&param).unwrap();
        assert_eq!(model.evolve(0.2, (0.0, 1.0), (0.0, 1.0)), EvolutionStatus::Shrinking);
        approx_eq(model.iso_factor()[0], 0.8, 1e-15);
        assert_eq!(model.evolve(0.0, (0.0, 1.0), (0.0, 1.0)), EvolutionStatus::Unchanged);

        // the surface never shrinks beyond the minimum factor
        model.set_min_iso_factor(0.5).unwrap();
        model.evolve(2.0, (0.0, 1.0), (0.0, 1.0));
        assert_eq!(model.iso_factor(), [0.5, 0.5]);

        let mut model = combined();
        assert_eq!(model.evolve(0.2, (0.0, 1.0), (0.0, 1.0)), EvolutionStatus::Expanding);

        let param = ParamEvolution::Kinematic {
            hardening: ParamHardening::Linear { kp: 1.0 },
            direction: KinematicDirection::Radial,
        };
        let mut model = EvolutionModel::new(&param).unwrap();
        assert_eq!(model.evolve(0.5, (1.0, 0.0), (3.0, 4.0)), EvolutionStatus::Unchanged);
        approx_eq(model.translate()[0], 0.3, 1e-15);
        approx_eq(model.translate()[1], 0.4, 1e-15);
    }

    #[test]
    fn evolve_is_recomputed_from_committed_state() {
        let mut model = combined();
        model.evolve(0.1, (0.0, 1.0), (0.0, 1.0));
        model.evolve(0.1, (0.0, 1.0), (0.0, 1.0));
        approx_eq(model.iso_factor()[0], 1.1, 1e-15);
        approx_eq(model.translate()[1], 0.05, 1e-15);
        approx_eq(model.sum_plastic(), 0.1, 1e-15);
    }

    #[test]
    fn commit_and_revert_work() {
        let mut model = combined();
        model.evolve(0.1, (0.6, 0.8), (0.6, 0.8));
        model.commit();
        let committed = model.flatten();

        // evolve then revert restores the committed state exactly
        model.evolve(0.3, (1.0, 0.0), (1.0, 0.0));
        assert_ne!(model.flatten(), committed);
        model.revert_to_last_commit();
        assert_eq!(model.flatten(), committed);

        // evolve, commit, then revert keeps the new state
        model.evolve(0.3, (1.0, 0.0), (1.0, 0.0));
        model.commit();
        let after = model.flatten();
        model.revert_to_last_commit();
        assert_eq!(model.flatten(), after);
        assert_ne!(model.iso_factor_committed(), [1.0, 1.0]);

        // start
        model.revert_to_start();
        assert_eq!(model.flatten(), EvolutionModel::new_null().flatten());
    }

    #[test]
    fn flatten_and_restore_work() {
        let mut model = combined();
        model.evolve(0.2, (0.6, 0.8), (0.6, 0.8));
        model.commit();
        model.evolve(0.1, (1.0, 0.0), (1.0, 0.0));
        let data = model.flatten();
        assert_eq!(data.len(), EVOLUTION_N_FLAT);

        let mut other = combined();
        assert_eq!(other.restore(&data).unwrap(), EVOLUTION_N_FLAT);
        assert_eq!(other.flatten(), data);

        assert_eq!(
            other.restore(&data[..3]).err(),
            Some("not enough data to restore the evolution model")
        );
        let mut wrong = data.clone();
        wrong[0] = 0.0;
        assert_eq!(other.restore(&wrong).err(), Some("isotropic factors must be > 0.0"));
    }
}
