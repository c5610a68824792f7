//! Makes available common structures needed to run a section analysis
//!
//! You may write `use yieldsurf::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{EvolutionStatus, ForceLocation, ReturnPolicy, Settings};
pub use crate::base::{KinematicDirection, ParamEvolution, ParamHardening, ParamSection, ParamYieldSurface};
pub use crate::evolution::{EvolutionModel, HardeningLaw};
pub use crate::section::{LoadingPath, SectionTrait, YieldSurfaceSection2D};
pub use crate::surface::{YieldShape, YieldSurfaceBoundary2D};
pub use crate::StrError;
