use super::{interpolate_close, DegenerateShape, Extent, InnerQuad, ShapeTrait, Transformation, YieldShape};
use crate::base::{DiagnosticKind, Diagnostics, EvolutionStatus, ForceLocation, ReturnPolicy, Settings};
use crate::base::{ParamEvolution, ParamYieldSurface};
use crate::evolution::{EvolutionModel, EVOLUTION_N_FLAT};
use crate::StrError;
use russell_lab::Vector;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};

/// Holds the number of boundary values returned by flatten (not counting the shape and evolution values)
const BOUNDARY_N_FLAT: usize = 10;

/// Holds the maximum number of doublings when searching for an outside point
const N_MAX_DOUBLINGS: usize = 64;

/// Implements a two-dimensional yield surface placed in force space
///
/// The boundary couples a fixed [YieldShape] (defined in normalized original coordinates) with
/// an [EvolutionModel] (isotropic scaling and translation). A physical force (fx, fy) is
/// converted to the coordinates of the original shape as follows:
///
/// ```text
/// (x, y) = to_original(fx / cap_x_orig, fy / cap_y_orig)
/// ```
///
/// The element force vectors are mapped onto (fx, fy) by a [Transformation], which must be set
/// by [YieldSurfaceBoundary2D::set_transformation] before using the boundary.
///
/// Problems such as non-convergence of the root finding are not fatal; they are recorded
/// in [Diagnostics] and a best-effort result is returned.
#[derive(Debug, Deserialize, Serialize)]
pub struct YieldSurfaceBoundary2D {
    /// Shape in normalized original coordinates
    shape: YieldShape,

    /// Evolution of the surface
    evolution: EvolutionModel,

    /// Settings (tolerances and limits)
    settings: Settings,

    /// Maps element vectors to (fx, fy)
    transformation: Option<Transformation>,

    /// Original capacity along x
    cap_x_orig: f64,

    /// Original capacity along y
    cap_y_orig: f64,

    /// Current (committed) capacity along x
    cap_x: f64,

    /// Current (committed) capacity along y
    cap_y: f64,

    /// Normalized axis intercepts of the shape
    extent: Extent,

    /// Quadrilateral inscribed in the shape (None if the extent is not regular)
    inner: Option<InnerQuad>,

    /// Committed local force (fx, fy)
    hist_force: (f64, f64),

    /// Drift at the committed force
    hist_drift: f64,

    /// Location of the committed force
    hist_location: ForceLocation,

    /// Gradient (original coordinates) at the committed force; zero if not on the surface
    hist_gradient: (f64, f64),

    /// Records problems found during the calculations
    diagnostics: RefCell<Diagnostics>,
}

impl YieldSurfaceBoundary2D {
    /// Allocates a new instance
    ///
    /// Invalid parameters are reported and replaced by a degenerate shape (or a frozen evolution)
    /// so that the calculations can continue. Invalid settings are replaced by the defaults.
    pub fn new(surface: &ParamYieldSurface, evolution: &ParamEvolution, settings: &Settings) -> Self {
        let mut diagnostics = Diagnostics::new(settings.verbose);
        let settings = match settings.validate() {
            Ok(()) => *settings,
            Err(message) => {
                diagnostics.report(DiagnosticKind::InvalidConfiguration, message.to_string());
                let mut defaults = Settings::new();
                defaults.set_verbose(settings.verbose);
                defaults
            }
        };
        let (shape, cap_x, cap_y) = match YieldShape::new(surface) {
            Ok(res) => res,
            Err(message) => {
                diagnostics.report(DiagnosticKind::InvalidConfiguration, message.to_string());
                (YieldShape::Degenerate(DegenerateShape::new()), 1.0, 1.0)
            }
        };
        let mut evolution = match EvolutionModel::new(evolution) {
            Ok(model) => model,
            Err(message) => {
                diagnostics.report(DiagnosticKind::InvalidConfiguration, message.to_string());
                EvolutionModel::new_null()
            }
        };
        if let Err(message) = evolution.set_min_iso_factor(settings.min_iso_factor) {
            diagnostics.report(DiagnosticKind::InvalidConfiguration, message.to_string());
        }
        let extent = shape.extent();
        let inner = InnerQuad::new(&extent, settings.inner_offset);
        YieldSurfaceBoundary2D {
            shape,
            evolution,
            settings,
            transformation: None,
            cap_x_orig: cap_x,
            cap_y_orig: cap_y,
            cap_x,
            cap_y,
            extent,
            inner,
            hist_force: (0.0, 0.0),
            hist_drift: -1.0,
            hist_location: ForceLocation::Inside,
            hist_gradient: (0.0, 0.0),
            diagnostics: RefCell::new(diagnostics),
        }
    }

    /// Sets the transformation from element vectors to the local (fx, fy) force space
    pub fn set_transformation(&mut self, x_dof: usize, y_dof: usize, x_fact: f64, y_fact: f64) -> Result<(), StrError> {
        self.transformation = Some(Transformation::new(x_dof, y_dof, x_fact, y_fact)?);
        Ok(())
    }

    /// Returns a copy of this boundary, including the current state
    ///
    /// # Panics
    ///
    /// A panic will occur if the transformation has not been set
    pub fn get_copy(&self) -> Self {
        if self.transformation.is_none() {
            panic!("the transformation must be set before copying the yield surface boundary");
        }
        YieldSurfaceBoundary2D {
            shape: self.shape.clone(),
            evolution: self.evolution.clone(),
            settings: self.settings,
            transformation: self.transformation,
            cap_x_orig: self.cap_x_orig,
            cap_y_orig: self.cap_y_orig,
            cap_x: self.cap_x,
            cap_y: self.cap_y,
            extent: self.extent,
            inner: self.inner,
            hist_force: self.hist_force,
            hist_drift: self.hist_drift,
            hist_location: self.hist_location,
            hist_gradient: self.hist_gradient,
            diagnostics: RefCell::new(self.diagnostics.borrow().clone()),
        }
    }

    /// Converts a local physical force into the coordinates of the original shape
    pub fn to_surface(&self, fx: f64, fy: f64) -> (f64, f64) {
        self.evolution.to_original(fx / self.cap_x_orig, fy / self.cap_y_orig)
    }

    /// Converts a point of the original shape into a local physical force
    pub fn to_physical(&self, x: f64, y: f64) -> (f64, f64) {
        let (xd, yd) = self.evolution.to_deformed(x, y);
        (xd * self.cap_x_orig, yd * self.cap_y_orig)
    }

    /// Calculates the extended drift at a point of the original shape
    ///
    /// Inside the inner quadrilateral, returns the drift of the shape. Otherwise, returns the
    /// distance |p| - R₀ where R₀ is the radius of the surface along the ray through p.
    pub fn drift(&self, x: f64, y: f64) -> f64 {
        let raw = self.shape.drift(x, y);
        let quad = match &self.inner {
            Some(q) => q,
            None => return raw,
        };
        if quad.contains(x, y) {
            return raw;
        }
        let r = f64::hypot(x, y);
        match self.crossing_radius(x / r, y / r) {
            Some(r0) => r - r0,
            None => raw,
        }
    }

    /// Calculates the extended drift of an element force vector
    ///
    /// # Panics
    ///
    /// A panic will occur if the transformation has not been set
    pub fn trial_drift(&self, force: &Vector) -> f64 {
        let (fx, fy) = self.local(force);
        let (x, y) = self.to_surface(fx, fy);
        self.drift(x, y)
    }

    /// Classifies an element force vector with respect to the current surface
    ///
    /// # Panics
    ///
    /// A panic will occur if the transformation has not been set
    pub fn classify(&self, force: &Vector) -> ForceLocation {
        self.location(self.trial_drift(force))
    }

    /// Projects an outside force back onto the surface
    ///
    /// Forces inside or on the surface are not modified.
    ///
    /// Returns false if the root finding did not converge (the problem is reported).
    ///
    /// # Panics
    ///
    /// A panic will occur if the transformation has not been set
    pub fn project(&self, force: &mut Vector, policy: ReturnPolicy) -> bool {
        if self.classify(force) != ForceLocation::Outside {
            return true;
        }
        self.set_to_surface(force, policy)
    }

    /// Brings an inside or outside force onto the surface along the line defined by the policy
    ///
    /// Returns false if the root finding did not converge (the problem is reported).
    ///
    /// # Panics
    ///
    /// A panic will occur if the transformation has not been set
    pub fn set_to_surface(&self, force: &mut Vector, policy: ReturnPolicy) -> bool {
        let (fx, fy) = self.local(force);
        let (x, y) = self.to_surface(fx, fy);
        let (xr, yr, converged) = self.return_to_surface(x, y, policy);
        let (fx_new, fy_new) = self.to_physical(xr, yr);
        if let Some(tr) = &self.transformation {
            tr.to_element(fx_new, fy_new, force);
        }
        converged
    }

    /// Finds the point where the segment from an inside force to an outside force crosses the surface
    ///
    /// All components of the element vectors are interpolated linearly.
    ///
    /// Returns false if the root finding did not converge (the problem is reported).
    ///
    /// # Panics
    ///
    /// A panic will occur if the transformation has not been set
    pub fn crossing_point(&self, result: &mut Vector, from: &Vector, to: &Vector) -> bool {
        let (fx0, fy0) = self.local(from);
        let (fx1, fy1) = self.local(to);
        let (x0, y0) = self.to_surface(fx0, fy0);
        let (x1, y1) = self.to_surface(fx1, fy1);
        let (lx, ly) = (x1 - x0, y1 - y0);
        let res = interpolate_close(
            |t| self.drift(x0 + t * lx, y0 + t * ly),
            self.drift(x0, y0),
            self.drift(x1, y1),
            self.settings.tol_root,
            self.settings.n_max_iterations,
        );
        if !res.converged {
            self.report(
                DiagnosticKind::NonConvergence,
                format!("crossing point did not converge (drift = {:e})", res.drift),
            );
        }
        for i in 0..result.dim() {
            result[i] = from[i] + res.t * (to[i] - from[i]);
        }
        res.converged
    }

    /// Calculates the gradient of the yield function with respect to the element force vector
    ///
    /// **Note:** The force must be on the surface; otherwise, the problem is reported and the
    /// gradient at the given point is returned anyway.
    ///
    /// # Panics
    ///
    /// A panic will occur if the transformation has not been set
    pub fn gradient(&self, gradient: &mut Vector, force: &Vector) {
        let (gx, gy) = self.surface_gradient(force);
        let iso = self.evolution.iso_factor();
        let gfx = gx / (self.cap_x_orig * iso[0]);
        let gfy = gy / (self.cap_y_orig * iso[1]);
        if let Some(tr) = &self.transformation {
            tr.gradient_to_element(gfx, gfy, gradient);
        }
    }

    /// Returns the gradient with respect to the element force vector at the committed force
    ///
    /// Uses the gradient cached by [YieldSurfaceBoundary2D::commit], which is zero if the committed
    /// force was not on the surface.
    ///
    /// # Panics
    ///
    /// A panic will occur if the transformation has not been set
    pub fn committed_gradient(&self, gradient: &mut Vector) {
        let tr = match &self.transformation {
            Some(tr) => tr,
            None => panic!("the transformation of the yield surface boundary must be set first"),
        };
        let (gx, gy) = self.hist_gradient;
        tr.gradient_to_element(gx / self.cap_x, gy / self.cap_y, gradient);
    }

    /// Calculates the gradient of the yield function in the coordinates of the original shape
    ///
    /// **Note:** The force must be on the surface; otherwise, the problem is reported.
    ///
    /// # Panics
    ///
    /// A panic will occur if the transformation has not been set
    pub fn surface_gradient(&self, force: &Vector) -> (f64, f64) {
        let (fx, fy) = self.local(force);
        let (x, y) = self.to_surface(fx, fy);
        let drift = self.drift(x, y);
        if self.location(drift) != ForceLocation::OnSurface {
            self.report(
                DiagnosticKind::PreconditionViolation,
                format!("gradient requested with force not on the surface (drift = {:e})", drift),
            );
        }
        self.shape.gradient(x, y)
    }

    /// Evolves (hardens/softens) the surface given a plastic increment at a force on the surface
    ///
    /// The trial state of the evolution is always recomputed from the committed state.
    ///
    /// # Panics
    ///
    /// A panic will occur if the transformation has not been set
    pub fn evolve(&mut self, magnitude: f64, force: &Vector) -> EvolutionStatus {
        self.evolution.revert_to_last_commit();
        let (fx, fy) = self.local(force);
        let (x, y) = self.to_surface(fx, fy);
        let drift = self.drift(x, y);
        if self.location(drift) != ForceLocation::OnSurface {
            self.report(
                DiagnosticKind::PreconditionViolation,
                format!("evolve requested with force not on the surface (drift = {:e})", drift),
            );
        }
        let gradient = self.shape.gradient(x, y);
        self.evolution.evolve(magnitude, gradient, (x, y))
    }

    /// Commits the state given the converged force
    ///
    /// # Panics
    ///
    /// A panic will occur if the transformation has not been set
    pub fn commit(&mut self, force: &Vector) {
        let (fx, fy) = self.local(force);
        let (x, y) = self.to_surface(fx, fy);
        let drift = self.drift(x, y);
        let location = self.location(drift);
        if location == ForceLocation::Outside {
            self.report(
                DiagnosticKind::LogicError,
                format!("commit requested with force outside the surface (drift = {:e})", drift),
            );
        }
        self.evolution.commit();
        self.hist_force = (fx, fy);
        self.hist_drift = drift;
        self.hist_location = location;
        self.hist_gradient = if location == ForceLocation::OnSurface {
            self.shape.gradient(x, y)
        } else {
            (0.0, 0.0)
        };
        let iso = self.evolution.iso_factor_committed();
        self.cap_x = self.cap_x_orig * iso[0];
        self.cap_y = self.cap_y_orig * iso[1];
    }

    /// Discards the trial state of the evolution
    pub fn revert_to_last_commit(&mut self) {
        self.evolution.revert_to_last_commit();
    }

    /// Resets the surface to its initial configuration
    pub fn revert_to_start(&mut self) {
        self.evolution.revert_to_start();
        self.hist_force = (0.0, 0.0);
        self.hist_drift = -1.0;
        self.hist_location = ForceLocation::Inside;
        self.hist_gradient = (0.0, 0.0);
        self.cap_x = self.cap_x_orig;
        self.cap_y = self.cap_y_orig;
    }

    /// Samples the current (deformed) surface in local physical coordinates
    ///
    /// Returns empty lists if the surface is never reached (e.g., Null shape).
    pub fn surface_points(&self, npoint: usize) -> (Vec<f64>, Vec<f64>) {
        let mut xx = Vec::new();
        let mut yy = Vec::new();
        if self.inner.is_none() || npoint < 2 {
            return (xx, yy);
        }
        let da = 2.0 * std::f64::consts::PI / ((npoint - 1) as f64);
        for i in 0..npoint {
            let (dx, dy) = (f64::cos(i as f64 * da), f64::sin(i as f64 * da));
            if let Some(r0) = self.crossing_radius(dx, dy) {
                let (fx, fy) = self.to_physical(r0 * dx, r0 * dy);
                xx.push(fx);
                yy.push(fy);
            }
        }
        (xx, yy)
    }

    /// Returns the state as a flat list of numbers
    ///
    /// ```text
    /// [shape parameters...,
    ///  cap_x_orig, cap_y_orig, cap_x, cap_y,
    ///  hist_fx, hist_fy, hist_drift, hist_location, hist_gx, hist_gy,
    ///  evolution state...]
    /// ```
    pub fn flatten(&self) -> Vec<f64> {
        let mut data = self.shape.flatten();
        let location = match self.hist_location {
            ForceLocation::Inside => -1.0,
            ForceLocation::OnSurface => 0.0,
            ForceLocation::Outside => 1.0,
        };
        data.extend_from_slice(&[
            self.cap_x_orig,
            self.cap_y_orig,
            self.cap_x,
            self.cap_y,
            self.hist_force.0,
            self.hist_force.1,
            self.hist_drift,
            location,
            self.hist_gradient.0,
            self.hist_gradient.1,
        ]);
        data.extend_from_slice(&self.evolution.flatten());
        data
    }

    /// Restores the state from a flat list of numbers
    ///
    /// The shape parameters and original capacities must match the ones of this boundary.
    ///
    /// Returns the number of consumed values.
    pub fn restore(&mut self, data: &[f64]) -> Result<usize, StrError> {
        let shape_data = self.shape.flatten();
        let n_shape = shape_data.len();
        if data.len() < n_shape + BOUNDARY_N_FLAT + EVOLUTION_N_FLAT {
            return Err("not enough data to restore the yield surface boundary");
        }
        if data[0..n_shape] != shape_data[..] {
            return Err("shape parameters do not match the yield surface");
        }
        let d = &data[n_shape..];
        if d[0] != self.cap_x_orig || d[1] != self.cap_y_orig {
            return Err("original capacities do not match the yield surface");
        }
        self.evolution.restore(&d[BOUNDARY_N_FLAT..])?;
        self.cap_x = d[2];
        self.cap_y = d[3];
        self.hist_force = (d[4], d[5]);
        self.hist_drift = d[6];
        self.hist_location = if d[7] < -0.5 {
            ForceLocation::Inside
        } else if d[7] > 0.5 {
            ForceLocation::Outside
        } else {
            ForceLocation::OnSurface
        };
        self.hist_gradient = (d[8], d[9]);
        Ok(n_shape + BOUNDARY_N_FLAT + EVOLUTION_N_FLAT)
    }

    /// Returns the shape
    pub fn shape(&self) -> &YieldShape {
        &self.shape
    }

    /// Returns the evolution model
    pub fn evolution(&self) -> &EvolutionModel {
        &self.evolution
    }

    /// Returns the settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the transformation, if set
    pub fn transformation(&self) -> Option<&Transformation> {
        self.transformation.as_ref()
    }

    /// Returns the normalized axis intercepts of the shape
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Returns the inner quadrilateral, if any
    pub fn inner_quad(&self) -> Option<&InnerQuad> {
        self.inner.as_ref()
    }

    /// Returns the original capacities (cap_x, cap_y)
    pub fn capacities_orig(&self) -> (f64, f64) {
        (self.cap_x_orig, self.cap_y_orig)
    }

    /// Returns the committed capacities (cap_x, cap_y)
    pub fn capacities(&self) -> (f64, f64) {
        (self.cap_x, self.cap_y)
    }

    /// Returns the committed local force
    pub fn hist_force(&self) -> (f64, f64) {
        self.hist_force
    }

    /// Returns the drift at the committed force
    pub fn hist_drift(&self) -> f64 {
        self.hist_drift
    }

    /// Returns the location of the committed force
    pub fn hist_location(&self) -> ForceLocation {
        self.hist_location
    }

    /// Returns the gradient (original coordinates) at the committed force
    pub fn hist_gradient(&self) -> (f64, f64) {
        self.hist_gradient
    }

    /// Returns access to the recorded problems
    pub fn diagnostics(&self) -> Ref<'_, Diagnostics> {
        self.diagnostics.borrow()
    }

    /// Clears the recorded problems
    pub fn clear_diagnostics(&self) {
        self.diagnostics.borrow_mut().clear();
    }

    // --- private ---------------------------------------------------------------------------------------------------

    /// Converts an element vector into the local (fx, fy)
    fn local(&self, force: &Vector) -> (f64, f64) {
        match &self.transformation {
            Some(tr) => tr.to_local(force),
            None => panic!("the transformation of the yield surface boundary must be set first"),
        }
    }

    /// Classifies a drift value (a NaN drift is reported and classified as outside)
    fn location(&self, drift: f64) -> ForceLocation {
        if drift.is_nan() {
            self.report(
                DiagnosticKind::PreconditionViolation,
                "drift is NaN; the force is classified as outside".to_string(),
            );
        }
        ForceLocation::from_drift_tol(drift, self.settings.tol_negative, self.settings.tol_positive)
    }

    /// Records a problem
    fn report(&self, kind: DiagnosticKind, message: String) {
        self.diagnostics.borrow_mut().report(kind, message);
    }

    /// Finds the radius of the first crossing of the shape along a unit direction
    ///
    /// The walk starts at the inner quadrilateral. Returns None (and reports) if the surface is not reached.
    fn crossing_radius(&self, dx: f64, dy: f64) -> Option<f64> {
        let drift_at = |r: f64| self.shape.drift(r * dx, r * dy);
        let mut r_in = match &self.inner {
            Some(q) => q.radius(dx, dy),
            None => 0.0,
        };
        if drift_at(r_in) > 0.0 {
            r_in = 0.0;
        }

        // walk outward
        let mut r_out = r_in + self.settings.walk_increment;
        let mut steps = 0;
        while drift_at(r_out) <= 0.0 {
            r_in = r_out;
            r_out += self.settings.walk_increment;
            steps += 1;
            if steps >= self.settings.n_max_walk_steps {
                self.report(
                    DiagnosticKind::NonConvergence,
                    format!("surface not reached along direction ({}, {})", dx, dy),
                );
                return None;
            }
        }

        // crossing (tighter than the projection tolerance)
        let len = r_out - r_in;
        let res = interpolate_close(
            |t| drift_at(r_in + t * len),
            drift_at(r_in),
            drift_at(r_out),
            1e-3 * self.settings.tol_root,
            self.settings.n_max_iterations,
        );
        if !res.converged {
            self.report(
                DiagnosticKind::NonConvergence,
                format!("crossing radius did not converge (drift = {:e})", res.drift),
            );
        }
        Some(r_in + res.t * len)
    }

    /// Returns a starting point strictly inside (or on) the surface for the return policy
    fn start_point(&self, x: f64, y: f64, policy: ReturnPolicy) -> (f64, f64) {
        if self.shape.radial_only(x, y) {
            return (0.0, 0.0);
        }
        let (mut sx, mut sy) = match policy {
            ReturnPolicy::DfReturn => {
                if self.hist_location == ForceLocation::Outside {
                    (0.0, 0.0)
                } else {
                    self.to_surface(self.hist_force.0, self.hist_force.1)
                }
            }
            ReturnPolicy::RadialReturn => (0.0, 0.0),
            ReturnPolicy::ConstantXReturn => (x, 0.0),
            ReturnPolicy::ConstantYReturn => (0.0, y),
        };

        // move toward the center until inside
        for _ in 0..self.settings.n_max_iterations {
            if self.drift(sx, sy) <= self.settings.tol_root {
                return (sx, sy);
            }
            sx *= 0.5;
            sy *= 0.5;
        }
        (0.0, 0.0)
    }

    /// Brings a point of the original shape onto the surface along the line defined by the policy
    fn return_to_surface(&self, x: f64, y: f64, policy: ReturnPolicy) -> (f64, f64, bool) {
        let tol = self.settings.tol_root;
        let drift = self.drift(x, y);
        if f64::abs(drift) <= tol {
            return (x, y, true);
        }
        let (sx, sy) = self.start_point(x, y, policy);

        // segment from an inside point (a) to an outside point (b)
        let ((ax, ay), (bx, by)) = if drift > 0.0 {
            ((sx, sy), (x, y))
        } else {
            let (mut dx, mut dy) = (x - sx, y - sy);
            if dx == 0.0 && dy == 0.0 {
                (dx, dy) = match policy {
                    ReturnPolicy::ConstantXReturn => (0.0, 1.0),
                    _ => (1.0, 0.0),
                };
            }
            let mut k = 1.0;
            let mut found = false;
            for _ in 0..N_MAX_DOUBLINGS {
                if self.drift(x + k * dx, y + k * dy) > 0.0 {
                    found = true;
                    break;
                }
                k *= 2.0;
            }
            if !found {
                self.report(
                    DiagnosticKind::NonConvergence,
                    format!("cannot find the surface beyond the inside point ({}, {})", x, y),
                );
                return (x, y, false);
            }
            ((x, y), (x + k * dx, y + k * dy))
        };

        // root finding
        let (lx, ly) = (bx - ax, by - ay);
        let res = interpolate_close(
            |t| self.drift(ax + t * lx, ay + t * ly),
            self.drift(ax, ay),
            self.drift(bx, by),
            tol,
            self.settings.n_max_iterations,
        );
        if !res.converged {
            self.report(
                DiagnosticKind::NonConvergence,
                format!("return to surface did not converge (drift = {:e})", res.drift),
            );
        }
        (ax + res.t * lx, ay + res.t * ly, res.converged)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
