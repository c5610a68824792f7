//! Yield-surface plasticity for structural cross-sections
//!
//! The crate implements a family of closed force-space boundaries (yield surfaces)
//! for beam-column sections, the hardening/softening laws that move and scale them,
//! and a section model performing the return-mapping update of each trial step.
//!
//! You may write `use yieldsurf::prelude::*` to access the commonly used structures.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod evolution;
pub mod prelude;
pub mod section;
pub mod surface;
