use super::YieldSurfaceBoundary2D;
use crate::StrError;
use plotpy::{Curve, Plot};
use std::ffi::OsStr;

/// Plots yield surfaces and force paths in the local (fx, fy) space
pub struct SurfacePlotter {
    /// Do not draw the grid lines
    pub no_grid: bool,

    /// Label of the x-axis
    pub x_label: String,

    /// Label of the y-axis
    pub y_label: String,

    /// Holds all curves
    curves: Vec<Curve>,
}

impl SurfacePlotter {
    /// Allocates a new instance
    pub fn new() -> Self {
        SurfacePlotter {
            no_grid: false,
            x_label: "$P$".to_string(),
            y_label: "$M$".to_string(),
            curves: Vec::new(),
        }
    }

    /// Draws the current (deformed) yield surface
    ///
    /// # Input
    ///
    /// * `boundary` -- the yield surface
    /// * `npoint` -- the number of points along the surface
    /// * `config` -- a function `|curve| {}` to configure the curve
    pub fn draw_surface<F>(&mut self, boundary: &YieldSurfaceBoundary2D, npoint: usize, mut config: F)
    where
        F: FnMut(&mut Curve),
    {
        let (x, y) = boundary.surface_points(npoint);
        let mut curve = Curve::new();
        config(&mut curve);
        curve.draw(&x, &y);
        self.curves.push(curve);
    }

    /// Draws a path of local forces (fx, fy)
    ///
    /// # Input
    ///
    /// * `forces` -- the sequence of points
    /// * `config` -- a function `|curve| {}` to configure the curve
    pub fn draw_path<F>(&mut self, forces: &[(f64, f64)], mut config: F)
    where
        F: FnMut(&mut Curve),
    {
        let x: Vec<_> = forces.iter().map(|f| f.0).collect();
        let y: Vec<_> = forces.iter().map(|f| f.1).collect();
        let mut curve = Curve::new();
        config(&mut curve);
        curve.draw(&x, &y);
        self.curves.push(curve);
    }

    /// Saves the figure
    ///
    /// **Note:** Call this function after [SurfacePlotter::draw_surface()] or [SurfacePlotter::draw_path()].
    ///
    /// # Input
    ///
    /// * `filepath` -- may be a String, &str, or Path
    /// * `extra` -- is a function `|plot, before| {}` to perform some {pre,post}-drawing on the plot area.
    ///   **true** indicates that the function is being called before adding the curves.
    ///   For example, use `|_, _| {}` to do nothing.
    pub fn save<P, F>(&self, filepath: &P, mut extra: F) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
        F: FnMut(&mut Plot, bool),
    {
        if self.curves.is_empty() {
            return Err("there are no curves to be saved");
        }
        let mut plot = Plot::new();
        extra(&mut plot, true);
        for curve in &self.curves {
            plot.add(curve);
        }
        extra(&mut plot, false);
        if self.no_grid {
            plot.set_labels(&self.x_label, &self.y_label);
        } else {
            plot.grid_and_labels(&self.x_label, &self.y_label);
        }
        plot.save(filepath)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::SurfacePlotter;
    use crate::base::{ParamEvolution, ParamHardening, SampleParams, Settings, DEFAULT_TEST_DIR};
    use crate::surface::YieldSurfaceBoundary2D;
    use russell_lab::Vector;

    const SAVE_FIGURE: bool = false;

    #[test]
    fn save_captures_errors() {
        let plotter = SurfacePlotter::new();
        assert_eq!(
            plotter.save("/tmp/yieldsurf/test/empty.svg", |_, _| {}).err(),
            Some("there are no curves to be saved")
        );
    }

    #[test]
    fn draw_works() {
        let evolution = ParamEvolution::Isotropic {
            hardening: ParamHardening::Linear { kp: 2.0 },
        };
        let mut boundary = YieldSurfaceBoundary2D::new(&SampleParams::el_tawil(), &evolution, &Settings::new());
        boundary.set_transformation(0, 1, 1.0, 1.0).unwrap();
        let mut plotter = SurfacePlotter::new();
        plotter.draw_surface(&boundary, 101, |curve| {
            curve.set_line_color("black");
        });

        // grow the surface
        let force = Vector::from(&[400.0, 2000.0]);
        boundary.evolve(0.1, &force);
        boundary.commit(&force);
        plotter.draw_surface(&boundary, 101, |curve| {
            curve.set_line_color("red").set_line_style("--");
        });
        plotter.draw_path(&[(0.0, 0.0), (400.0, 2000.0)], |curve| {
            curve.set_marker_style("o");
        });
        assert_eq!(plotter.curves.len(), 3);

        if SAVE_FIGURE {
            let path = format!("{}/test_draw_el_tawil.svg", DEFAULT_TEST_DIR);
            plotter.save(&path, |_, _| {}).unwrap();
        }
    }
}
