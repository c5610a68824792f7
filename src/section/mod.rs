//! Implements beam-column sections with yield surfaces in (P, M) space

mod loading_path;
mod section_2d;
mod section_trait;
pub use crate::section::loading_path::*;
pub use crate::section::section_2d::*;
pub use crate::section::section_trait::*;
