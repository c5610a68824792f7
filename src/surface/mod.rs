//! Implements yield surfaces in two-dimensional force space

mod attalla;
mod boundary_2d;
mod el_tawil;
mod hajjar;
mod interpolation;
mod null_shape;
mod orbison;
mod plotter;
mod shape;
mod transformation;
mod yield_shape;
pub use crate::surface::attalla::*;
pub use crate::surface::boundary_2d::*;
pub use crate::surface::el_tawil::*;
pub use crate::surface::hajjar::*;
pub use crate::surface::interpolation::*;
pub use crate::surface::null_shape::*;
pub use crate::surface::orbison::*;
pub use crate::surface::plotter::*;
pub use crate::surface::shape::*;
pub use crate::surface::transformation::*;
pub use crate::surface::yield_shape::*;
