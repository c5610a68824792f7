use super::SectionTrait;
use crate::base::{ForceLocation, ParamSection, Settings, LAMBDA_ZERO};
use crate::surface::YieldSurfaceBoundary2D;
use crate::StrError;
use russell_lab::{mat_add, mat_copy, mat_vec_mul, vec_add, vec_copy, vec_inner, vec_outer, Matrix, Vector};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds the number of section values returned by flatten (not counting the boundary values)
const SECTION_N_FLAT: usize = 16;

/// Number of deformation (and force) components: (ε, κ) and (P, M)
const NDIM: usize = 2;

/// Holds the data written to JSON files
#[derive(Deserialize, Serialize)]
struct SectionFile {
    param: ParamSection,
    settings: Settings,
    state: Vec<f64>,
}

/// Implements a beam-column section with axial and flexural stiffness and a yield surface in (P, M) space
///
/// The deformation is (ε, κ) and the stress resultant is (P, M). The elastic stiffness is:
///
/// ```text
///      ┌         ┐
/// Ke = │ EA   0  │
///      │  0  EI  │
///      └         ┘
/// ```
///
/// Each trial state is computed from the committed state (elastic predictor followed by a
/// return mapping onto the yield surface); the surface evolves only at commit.
pub struct YieldSurfaceSection2D {
    /// Parameters
    param: ParamSection,

    /// Settings
    settings: Settings,

    /// Yield surface in (P, M) space
    boundary: YieldSurfaceBoundary2D,

    /// Trial deformation (ε, κ)
    deformation: Vector,

    /// Committed deformation
    deformation_committed: Vector,

    /// Trial stress resultant (P, M)
    force: Vector,

    /// Committed stress resultant
    force_committed: Vector,

    /// Elastic stiffness
    ke: Matrix,

    /// Tangent stiffness
    tangent: Matrix,

    /// Indicates that the trial step is elastoplastic
    plastic: bool,

    /// Plastic multiplier of the trial step
    lambda: f64,

    /// Gradient of the yield function at the trial force (zero if elastic)
    gradient: Vector,
}

impl YieldSurfaceSection2D {
    /// Allocates a new instance
    pub fn new(param: &ParamSection, settings: &Settings) -> Result<Self, StrError> {
        param.validate()?;
        settings.validate()?;
        let mut boundary = YieldSurfaceBoundary2D::new(&param.surface, &param.evolution, settings);
        boundary.set_transformation(0, 1, 1.0, 1.0)?;
        let ke = Matrix::from(&[[param.ea, 0.0], [0.0, param.ei]]);
        Ok(YieldSurfaceSection2D {
            param: param.clone(),
            settings: *settings,
            boundary,
            deformation: Vector::new(NDIM),
            deformation_committed: Vector::new(NDIM),
            force: Vector::new(NDIM),
            force_committed: Vector::new(NDIM),
            tangent: ke.clone(),
            ke,
            plastic: false,
            lambda: 0.0,
            gradient: Vector::new(NDIM),
        })
    }

    /// Returns the yield surface
    pub fn boundary(&self) -> &YieldSurfaceBoundary2D {
        &self.boundary
    }

    /// Returns the parameters
    pub fn param(&self) -> &ParamSection {
        &self.param
    }

    /// Indicates that the trial step is elastoplastic
    pub fn is_plastic(&self) -> bool {
        self.plastic
    }

    /// Returns the plastic multiplier of the trial step
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Returns the committed stress resultant
    pub fn get_stress_resultant_committed(&self) -> &Vector {
        &self.force_committed
    }

    /// Returns the location of the trial force with respect to the current surface
    pub fn location(&self) -> ForceLocation {
        self.boundary.classify(&self.force)
    }

    /// Returns the state as a flat list of numbers
    ///
    /// ```text
    /// [ε, κ, ε_committed, κ_committed, P, M, P_committed, M_committed,
    ///  plastic, λ, Kt00, Kt01, Kt10, Kt11, g0, g1,
    ///  boundary values...]
    /// ```
    pub fn flatten(&self) -> Vec<f64> {
        let mut data = Vec::with_capacity(SECTION_N_FLAT + 40);
        data.extend_from_slice(self.deformation.as_data());
        data.extend_from_slice(self.deformation_committed.as_data());
        data.extend_from_slice(self.force.as_data());
        data.extend_from_slice(self.force_committed.as_data());
        data.push(if self.plastic { 1.0 } else { 0.0 });
        data.push(self.lambda);
        for i in 0..NDIM {
            for j in 0..NDIM {
                data.push(self.tangent.get(i, j));
            }
        }
        data.extend_from_slice(self.gradient.as_data());
        data.extend_from_slice(&self.boundary.flatten());
        data
    }

    /// Restores the state from a flat list of numbers
    ///
    /// Returns the number of consumed values.
    pub fn restore(&mut self, data: &[f64]) -> Result<usize, StrError> {
        if data.len() < SECTION_N_FLAT {
            return Err("not enough data to restore the section");
        }
        let n = self.boundary.restore(&data[SECTION_N_FLAT..])?;
        for i in 0..NDIM {
            self.deformation[i] = data[i];
            self.deformation_committed[i] = data[2 + i];
            self.force[i] = data[4 + i];
            self.force_committed[i] = data[6 + i];
            self.gradient[i] = data[14 + i];
        }
        self.plastic = data[8] > 0.5;
        self.lambda = data[9];
        for i in 0..NDIM {
            for j in 0..NDIM {
                self.tangent.set(i, j, data[10 + i * NDIM + j]);
            }
        }
        Ok(SECTION_N_FLAT + n)
    }

    /// Reads a JSON file with the parameters and state of a section
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(input);
        let file: SectionFile = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        let mut section = YieldSurfaceSection2D::new(&file.param, &file.settings)?;
        section.restore(&file.state)?;
        Ok(section)
    }

    /// Writes a JSON file with the parameters and state of this section
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let file = SectionFile {
            param: self.param.clone(),
            settings: self.settings,
            state: self.flatten(),
        };
        let mut output = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer(&mut output, &file).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

impl Clone for YieldSurfaceSection2D {
    fn clone(&self) -> Self {
        YieldSurfaceSection2D {
            param: self.param.clone(),
            settings: self.settings,
            boundary: self.boundary.get_copy(),
            deformation: self.deformation.clone(),
            deformation_committed: self.deformation_committed.clone(),
            force: self.force.clone(),
            force_committed: self.force_committed.clone(),
            ke: self.ke.clone(),
            tangent: self.tangent.clone(),
            plastic: self.plastic,
            lambda: self.lambda,
            gradient: self.gradient.clone(),
        }
    }
}

impl SectionTrait for YieldSurfaceSection2D {
    /// Sets the trial deformation and performs the return mapping
    fn set_trial_deformation(&mut self, deformation: &Vector) -> Result<(), StrError> {
        if deformation.dim() != NDIM {
            return Err("the deformation vector must have dimension 2");
        }

        // reset the trial state
        self.boundary.revert_to_last_commit();
        self.plastic = false;
        self.lambda = 0.0;
        self.gradient.fill(0.0);
        mat_copy(&mut self.tangent, &self.ke)?;
        vec_copy(&mut self.deformation, deformation)?;

        // elastic predictor: F_t = F_c + Ke Δe
        let mut delta = Vector::new(NDIM);
        vec_add(&mut delta, 1.0, &self.deformation, -1.0, &self.deformation_committed)?;
        let mut ke_delta = Vector::new(NDIM);
        mat_vec_mul(&mut ke_delta, 1.0, &self.ke, &delta)?;
        vec_add(&mut self.force, 1.0, &self.force_committed, 1.0, &ke_delta)?;

        // elastic update
        if self.boundary.classify(&self.force) != ForceLocation::Outside {
            return Ok(());
        }

        // starting point on the surface: committed force (cached gradient) or crossing of F_c → F_t
        let mut force_s = Vector::new(NDIM);
        let mut g = Vector::new(NDIM);
        if self.boundary.hist_location() == ForceLocation::OnSurface {
            vec_copy(&mut force_s, &self.force_committed)?;
            self.boundary.committed_gradient(&mut g);
        } else {
            self.boundary.crossing_point(&mut force_s, &self.force_committed, &self.force);
            self.boundary.gradient(&mut g, &force_s);
        }

        // plastic multiplier: λ = gᵀ (F_t - F_s) / (gᵀ Ke g)
        let mut ke_g = Vector::new(NDIM);
        mat_vec_mul(&mut ke_g, 1.0, &self.ke, &g)?;
        let den = vec_inner(&g, &ke_g);
        let mut lambda = 0.0;
        if den > 0.0 {
            let mut df = Vector::new(NDIM);
            vec_add(&mut df, 1.0, &self.force, -1.0, &force_s)?;
            lambda = f64::max(vec_inner(&g, &df) / den, 0.0);
            if lambda < LAMBDA_ZERO {
                lambda = 0.0;
            }
        }

        // corrector: F = F_t - λ Ke g, then snap onto the surface
        for i in 0..NDIM {
            self.force[i] -= lambda * ke_g[i];
        }
        self.boundary.set_to_surface(&mut self.force, self.settings.final_return);

        // tangent: Kt = Ke - (Ke g) (Ke g)ᵀ / (gᵀ Ke g) with g at the final force
        self.boundary.gradient(&mut self.gradient, &self.force);
        mat_vec_mul(&mut ke_g, 1.0, &self.ke, &self.gradient)?;
        let den = vec_inner(&self.gradient, &ke_g);
        if den > 0.0 {
            let mut kgkg = Matrix::new(NDIM, NDIM);
            vec_outer(&mut kgkg, 1.0 / den, &ke_g, &ke_g)?;
            mat_add(&mut self.tangent, 1.0, &self.ke, -1.0, &kgkg)?;
        }

        // elastoplastic update
        self.plastic = true;
        self.lambda = lambda;
        Ok(())
    }

    fn get_deformation(&self) -> &Vector {
        &self.deformation
    }

    fn get_stress_resultant(&self) -> &Vector {
        &self.force
    }

    fn get_tangent(&self) -> &Matrix {
        &self.tangent
    }

    fn get_initial_tangent(&self) -> &Matrix {
        &self.ke
    }

    /// Evolves the surface (if plastic) and commits the trial state
    fn commit_state(&mut self) -> Result<(), StrError> {
        if self.plastic && self.lambda > 0.0 {
            let magnitude = self.lambda * f64::sqrt(vec_inner(&self.gradient, &self.gradient));
            self.boundary.evolve(magnitude, &self.force);
            if self.boundary.classify(&self.force) == ForceLocation::Outside {
                self.boundary.set_to_surface(&mut self.force, self.settings.final_return);
            }
        }
        self.boundary.commit(&self.force);
        vec_copy(&mut self.deformation_committed, &self.deformation)?;
        vec_copy(&mut self.force_committed, &self.force)?;
        Ok(())
    }

    fn revert_to_last_commit(&mut self) -> Result<(), StrError> {
        self.boundary.revert_to_last_commit();
        vec_copy(&mut self.deformation, &self.deformation_committed)?;
        vec_copy(&mut self.force, &self.force_committed)?;
        mat_copy(&mut self.tangent, &self.ke)?;
        self.gradient.fill(0.0);
        self.plastic = false;
        self.lambda = 0.0;
        Ok(())
    }

    fn revert_to_start(&mut self) -> Result<(), StrError> {
        self.boundary.revert_to_start();
        self.deformation.fill(0.0);
        self.deformation_committed.fill(0.0);
        self.force.fill(0.0);
        self.force_committed.fill(0.0);
        mat_copy(&mut self.tangent, &self.ke)?;
        self.gradient.fill(0.0);
        self.plastic = false;
        self.lambda = 0.0;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
