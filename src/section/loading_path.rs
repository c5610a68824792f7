use super::{SectionTrait, YieldSurfaceSection2D};
use crate::base::{ForceLocation, ParamSection, Settings};
use crate::StrError;
use russell_lab::Vector;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds a sequence of total deformations (ε, κ) applied to a section
///
/// Each deformation is set as a trial state and committed, as an analysis driver
/// would do after each converged step.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoadingPath {
    /// Section parameters
    pub section: ParamSection,

    /// Numerical settings
    #[serde(default)]
    pub settings: Settings,

    /// Total deformations (ε, κ)
    pub deformations: Vec<[f64; 2]>,
}

/// Holds the state of the section after one step of a loading path
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoadingPathStep {
    /// Total deformation (ε, κ)
    pub deformation: [f64; 2],

    /// Committed stress resultant (P, M)
    pub force: [f64; 2],

    /// Location of the committed force with respect to the committed surface
    pub location: ForceLocation,

    /// Indicates an elastoplastic step
    pub plastic: bool,

    /// Plastic multiplier
    pub lambda: f64,

    /// Committed isotropic factors
    pub iso_factor: [f64; 2],

    /// Committed kinematic translation
    pub translate: [f64; 2],

    /// Tangent stiffness of the step
    pub tangent: [[f64; 2]; 2],
}

/// Holds the results of running a loading path
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoadingPathResults {
    /// The state after each step
    pub steps: Vec<LoadingPathStep>,

    /// Points (P, M) along the initial surface
    pub surface_initial: Vec<[f64; 2]>,

    /// Points (P, M) along the final surface
    pub surface_final: Vec<[f64; 2]>,

    /// Number of diagnostic messages reported by the yield surface
    pub n_diagnostics: usize,
}

/// Number of points along the surfaces stored in the results
const N_SURFACE_POINTS: usize = 73;

impl LoadingPath {
    /// Allocates a new (empty) path
    pub fn new(section: &ParamSection, settings: &Settings) -> Self {
        LoadingPath {
            section: section.clone(),
            settings: *settings,
            deformations: Vec::new(),
        }
    }

    /// Generates cyclic curvature under a constant axial strain
    ///
    /// Each amplitude produces the cycle `0 → +κ → -κ → 0`, each branch split into increments
    /// of (at most) `dkappa`.
    ///
    /// # Input
    ///
    /// * `section` -- the section parameters
    /// * `settings` -- the numerical settings
    /// * `axial` -- the axial strain, applied in the first step and kept constant
    /// * `amplitudes` -- the curvature amplitudes (> 0)
    /// * `dkappa` -- the maximum curvature increment (> 0)
    pub fn new_cyclic_curvature(
        section: &ParamSection,
        settings: &Settings,
        axial: f64,
        amplitudes: &[f64],
        dkappa: f64,
    ) -> Result<Self, StrError> {
        if !(dkappa > 0.0) {
            return Err("dkappa must be > 0.0");
        }
        if amplitudes.iter().any(|a| !(*a > 0.0)) {
            return Err("curvature amplitudes must be > 0.0");
        }
        let mut path = LoadingPath::new(section, settings);
        path.push(axial, 0.0);
        let mut kappa = 0.0;
        for amplitude in amplitudes {
            for target in [*amplitude, -*amplitude, 0.0] {
                let n = f64::ceil(f64::abs(target - kappa) / dkappa - 1e-10) as usize;
                for i in 0..n {
                    let t = (i + 1) as f64 / n as f64;
                    path.push(axial, kappa + t * (target - kappa));
                }
                kappa = target;
            }
        }
        Ok(path)
    }

    /// Pushes a new total deformation
    pub fn push(&mut self, epsilon: f64, kappa: f64) -> &mut Self {
        self.deformations.push([epsilon, kappa]);
        self
    }

    /// Runs the path on a new section
    pub fn run(&self, verbose: bool) -> Result<LoadingPathResults, StrError> {
        if self.deformations.is_empty() {
            return Err("the loading path must have at least one deformation");
        }
        let mut section = YieldSurfaceSection2D::new(&self.section, &self.settings)?;
        let surface_initial = surface_points(&section);
        let mut deformation = Vector::new(2);
        let mut steps = Vec::with_capacity(self.deformations.len());
        if verbose {
            println!(
                "{:>5} {:>13} {:>13} {:>13} {:>13} {:>11} {:>13}",
                "step", "ε", "κ", "P", "M", "location", "λ"
            );
        }
        for (step, def) in self.deformations.iter().enumerate() {
            deformation[0] = def[0];
            deformation[1] = def[1];
            section.set_trial_deformation(&deformation)?;
            let plastic = section.is_plastic();
            let lambda = section.lambda();
            let kt = section.get_tangent();
            let tangent = [[kt.get(0, 0), kt.get(0, 1)], [kt.get(1, 0), kt.get(1, 1)]];
            section.commit_state()?;
            let force = section.get_stress_resultant();
            let boundary = section.boundary();
            let location = boundary.hist_location();
            if verbose {
                println!(
                    "{:>5} {:>13.6e} {:>13.6e} {:>13.6e} {:>13.6e} {:>11} {:>13.6e}",
                    step,
                    def[0],
                    def[1],
                    force[0],
                    force[1],
                    location.to_string(),
                    lambda
                );
            }
            steps.push(LoadingPathStep {
                deformation: *def,
                force: [force[0], force[1]],
                location,
                plastic,
                lambda,
                iso_factor: boundary.evolution().iso_factor_committed(),
                translate: boundary.evolution().translate_committed(),
                tangent,
            });
        }
        let n_diagnostics = section.boundary().diagnostics().n_reported();
        if verbose && n_diagnostics > 0 {
            println!("number of diagnostic messages = {}", n_diagnostics);
        }
        Ok(LoadingPathResults {
            steps,
            surface_initial,
            surface_final: surface_points(&section),
            n_diagnostics,
        })
    }

    /// Reads a JSON file containing the path
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
        let loading: LoadingPath = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        loading.section.validate()?;
        loading.settings.validate()?;
        Ok(loading)
    }

    /// Writes a JSON file with the path
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        write_json_file(self, full_path)
    }
}

impl LoadingPathResults {
    /// Returns the committed forces as (P, M) pairs
    pub fn forces(&self) -> Vec<(f64, f64)> {
        self.steps.iter().map(|s| (s.force[0], s.force[1])).collect()
    }

    /// Reads a JSON file containing the results
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
        let results = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(results)
    }

    /// Writes a JSON file with the results
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        write_json_file(self, full_path)
    }
}

/// Samples the current surface of a section
fn surface_points(section: &YieldSurfaceSection2D) -> Vec<[f64; 2]> {
    let (x, y) = section.boundary().surface_points(N_SURFACE_POINTS);
    x.iter().zip(y.iter()).map(|(a, b)| [*a, *b]).collect()
}

/// Writes any serializable data to a JSON file, creating the directory if needed
fn write_json_file<T, P>(data: &T, full_path: &P) -> Result<(), StrError>
where
    T: Serialize,
    P: AsRef<OsStr> + ?Sized,
{
    let path = Path::new(full_path).to_path_buf();
    if let Some(p) = path.parent() {
        fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
    }
    let mut file = File::create(&path).map_err(|_| "cannot create file")?;
    serde_json::to_writer(&mut file, data).map_err(|_| "cannot write file")?;
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{LoadingPath, LoadingPathResults};
    use crate::base::{ForceLocation, SampleParams, Settings, DEFAULT_TEST_DIR};
    use crate::surface::SurfacePlotter;
    use russell_lab::approx_eq;

    const SAVE_FIGURE: bool = false;

    #[test]
    fn new_cyclic_curvature_captures_errors() {
        let section = SampleParams::section_orbison();
        let settings = Settings::new();
        assert_eq!(
            LoadingPath::new_cyclic_curvature(&section, &settings, 0.0, &[0.01], 0.0).err(),
            Some("dkappa must be > 0.0")
        );
        assert_eq!(
            LoadingPath::new_cyclic_curvature(&section, &settings, 0.0, &[0.01, -0.02], 0.01).err(),
            Some("curvature amplitudes must be > 0.0")
        );
    }

    #[test]
    fn new_cyclic_curvature_works() {
        let section = SampleParams::section_orbison();
        let path = LoadingPath::new_cyclic_curvature(&section, &Settings::new(), 0.002, &[0.02], 0.01).unwrap();
        // axial step + 2 (0 → 0.02) + 4 (0.02 → -0.02) + 2 (-0.02 → 0)
        assert_eq!(path.deformations.len(), 9);
        assert_eq!(path.deformations[0], [0.002, 0.0]);
        approx_eq(path.deformations[2][1], 0.02, 1e-15);
        approx_eq(path.deformations[6][1], -0.02, 1e-15);
        approx_eq(path.deformations[8][1], 0.0, 1e-15);
        assert!(path.deformations.iter().all(|d| d[0] == 0.002));
    }

    #[test]
    fn run_captures_errors() {
        let path = LoadingPath::new(&SampleParams::section_orbison(), &Settings::new());
        assert_eq!(
            path.run(false).err(),
            Some("the loading path must have at least one deformation")
        );
        let mut param = SampleParams::section_orbison();
        param.ea = -1.0;
        let mut path = LoadingPath::new(&param, &Settings::new());
        path.push(0.0, 0.0);
        assert_eq!(path.run(false).err(), Some("ea must be > 0.0"));
    }

    #[test]
    fn run_works_elastic_perfectly_plastic() {
        let mut path = LoadingPath::new(&SampleParams::section_orbison(), &Settings::new());
        path.push(0.005, 0.0).push(0.015, 0.0).push(0.025, 0.0).push(0.015, 0.0);
        let res = path.run(false).unwrap();
        assert_eq!(res.steps.len(), 4);

        // elastic
        assert!(!res.steps[0].plastic);
        approx_eq(res.steps[0].force[0], 0.5, 1e-15);
        assert_eq!(res.steps[0].location, ForceLocation::Inside);

        // yielding
        assert!(res.steps[1].plastic);
        approx_eq(res.steps[1].force[0], 1.0, 1e-9);
        approx_eq(res.steps[1].lambda, 0.0025, 1e-12);
        assert_eq!(res.steps[1].location, ForceLocation::OnSurface);

        // flow: the force stays on the surface
        assert!(res.steps[2].plastic);
        approx_eq(res.steps[2].force[0], 1.0, 1e-9);
        approx_eq(res.steps[2].lambda, 0.005, 1e-9);

        // elastic unloading
        assert!(!res.steps[3].plastic);
        approx_eq(res.steps[3].force[0], 0.0, 1e-9);
        assert_eq!(res.steps[3].iso_factor, [1.0, 1.0]);
        assert_eq!(res.n_diagnostics, 0);
        assert_eq!(res.surface_initial.len(), res.surface_final.len());
    }

    #[test]
    fn run_works_with_hardening() {
        let section = SampleParams::section_orbison_isotropic(1.0);
        let mut path = LoadingPath::new(&section, &Settings::new());
        path.push(0.015, 0.0).push(0.025, 0.0);
        let res = path.run(false).unwrap();
        approx_eq(res.steps[0].iso_factor[0], 1.005, 1e-10);
        assert!(res.steps[1].iso_factor[0] > res.steps[0].iso_factor[0]);
        assert!(res.steps[1].force[0] > 1.0);
        let (p0, _) = (res.surface_initial[0][0], res.surface_initial[0][1]);
        let (p1, _) = (res.surface_final[0][0], res.surface_final[0][1]);
        assert!(p1 > p0);
    }

    #[test]
    fn read_and_write_json_work() {
        let section = SampleParams::section_el_tawil();
        let path = LoadingPath::new_cyclic_curvature(&section, &Settings::new(), 5e-5, &[0.02, 0.04], 0.005).unwrap();
        let filepath = format!("{}/test_loading_path.json", DEFAULT_TEST_DIR);
        path.write_json(&filepath).unwrap();
        let read = LoadingPath::read_json(&filepath).unwrap();
        assert_eq!(read.deformations, path.deformations);

        let res = read.run(false).unwrap();
        let filepath = format!("{}/test_loading_path_results.json", DEFAULT_TEST_DIR);
        res.write_json(&filepath).unwrap();
        let read = LoadingPathResults::read_json(&filepath).unwrap();
        assert_eq!(read.steps.len(), res.steps.len());
        assert_eq!(read.forces(), res.forces());

        if SAVE_FIGURE {
            let mut plotter = SurfacePlotter::new();
            plotter.draw_path(&res.forces(), |curve| {
                curve.set_line_color("red").set_marker_style(".");
            });
            let initial: Vec<_> = res.surface_initial.iter().map(|p| (p[0], p[1])).collect();
            plotter.draw_path(&initial, |curve| {
                curve.set_line_color("black");
            });
            let path = format!("{}/test_loading_path_el_tawil.svg", DEFAULT_TEST_DIR);
            plotter.save(&path, |_, _| {}).unwrap();
        }
    }

    #[test]
    fn settings_default_to_new_when_missing_in_json() {
        let json = r#"{
            "section": {
                "ea": 100.0,
                "ei": 50.0,
                "surface": { "Orbison": { "cap_x": 1.0, "cap_y": 1.0 } },
                "evolution": "Null"
            },
            "deformations": [[0.005, 0.0], [0.015, 0.0]]
        }"#;
        let path: LoadingPath = serde_json::from_str(json).unwrap();
        assert_eq!(path.settings.tol_root, Settings::new().tol_root);
        let res = path.run(false).unwrap();
        approx_eq(res.steps[1].force[0], 1.0, 1e-9);
    }

    #[test]
    fn read_json_captures_invalid_settings() {
        let mut settings = serde_json::to_value(Settings::new()).unwrap();
        settings["inner_offset"] = serde_json::json!(1.0);
        let json = serde_json::json!({
            "section": SampleParams::section_orbison(),
            "settings": settings,
            "deformations": [[0.005, 0.0], [0.015, 0.0]],
        });
        let filepath = format!("{}/test_loading_path_invalid_settings.json", DEFAULT_TEST_DIR);
        std::fs::create_dir_all(DEFAULT_TEST_DIR).unwrap();
        std::fs::write(&filepath, json.to_string()).unwrap();
        assert_eq!(
            LoadingPath::read_json(&filepath).err(),
            Some("inner_offset must satisfy 0 < inner_offset < 1")
        );
    }
}
