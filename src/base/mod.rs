//! Implements the base structures: constants, enums, parameters and settings

mod constants;
mod diagnostics;
mod enums;
mod parameters;
mod sample_params;
mod settings;
pub use crate::base::constants::*;
pub use crate::base::diagnostics::*;
pub use crate::base::enums::*;
pub use crate::base::parameters::*;
pub use crate::base::sample_params::*;
pub use crate::base::settings::*;
