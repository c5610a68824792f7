//! Implements the evolution (hardening and softening) of yield surfaces

mod evolution_model;
mod hardening;
pub use crate::evolution::evolution_model::*;
pub use crate::evolution::hardening::*;
