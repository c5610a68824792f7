use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Specifies the essential functions for beam-column sections (the interface seen by elements)
pub trait SectionTrait: Send {
    /// Sets the trial (total) deformation and updates the stress resultant and tangent
    fn set_trial_deformation(&mut self, deformation: &Vector) -> Result<(), StrError>;

    /// Returns the trial deformation
    fn get_deformation(&self) -> &Vector;

    /// Returns the stress resultant corresponding to the trial deformation
    fn get_stress_resultant(&self) -> &Vector;

    /// Returns the tangent stiffness corresponding to the trial deformation
    fn get_tangent(&self) -> &Matrix;

    /// Returns the elastic stiffness
    fn get_initial_tangent(&self) -> &Matrix;

    /// Accepts the trial state as converged
    fn commit_state(&mut self) -> Result<(), StrError>;

    /// Discards the trial state
    fn revert_to_last_commit(&mut self) -> Result<(), StrError>;

    /// Resets the section to its initial state
    fn revert_to_start(&mut self) -> Result<(), StrError>;
}
