use russell_lab::approx_eq;
use std::fs;
use yieldsurf::base::DEFAULT_TEST_DIR;
use yieldsurf::prelude::*;
use yieldsurf::section::LoadingPathResults;

// Loading path given by a JSON file
//
// TEST GOAL
//
// Verifies the workflow of the command line tool: a loading path is read from
// a JSON file written by hand, the section is driven through all deformations,
// and the results are written to (and read back from) another JSON file.
//
// CONFIGURATION AND PARAMETERS
//
// * Orbison surface with Py = 2000 and Mp = 300
// * EA = 1e6, EI = 2e4
// * Linear isotropic hardening with kp = 0.1
// * Settings: default values except the final return policy (radial)

const NAME: &str = "test_loading_path_json";

const INPUT: &str = r#"{
    "section": {
        "ea": 1e6,
        "ei": 2e4,
        "surface": { "Orbison": { "cap_x": 2000.0, "cap_y": 300.0 } },
        "evolution": { "Isotropic": { "hardening": { "Linear": { "kp": 0.1 } } } }
    },
    "settings": {
        "verbose": false,
        "tol_negative": 1e-7,
        "tol_positive": 1e-5,
        "tol_root": 1e-9,
        "n_max_iterations": 100,
        "walk_increment": 0.01,
        "n_max_walk_steps": 10000,
        "inner_offset": 0.05,
        "min_iso_factor": 0.1,
        "final_return": "RadialReturn"
    },
    "deformations": [
        [0.0005, 0.0],
        [0.0005, 0.01],
        [0.0005, 0.02],
        [0.0005, 0.0],
        [0.0005, -0.02]
    ]
}"#;

#[test]
fn test_loading_path_json() -> Result<(), StrError> {
    // write input file
    let input = format!("{}/{}_input.json", DEFAULT_TEST_DIR, NAME);
    let output = format!("{}/{}_results.json", DEFAULT_TEST_DIR, NAME);
    fs::create_dir_all(DEFAULT_TEST_DIR).map_err(|_| "cannot create directory")?;
    fs::write(&input, INPUT).map_err(|_| "cannot write file")?;

    // run
    let path = LoadingPath::read_json(&input)?;
    assert_eq!(path.settings.final_return, ReturnPolicy::RadialReturn);
    assert_eq!(path.deformations.len(), 5);
    let results = path.run(false)?;
    results.write_json(&output)?;

    // check
    let read = LoadingPathResults::read_json(&output)?;
    assert_eq!(read.steps.len(), 5);
    assert_eq!(read.n_diagnostics, 0);

    // first step: elastic (P = 500)
    let first = &read.steps[0];
    assert!(!first.plastic);
    approx_eq(first.force[0], 500.0, 1e-9);
    approx_eq(first.tangent[0][0], 1e6, 1e-9);

    // bending up to the surface; then hardening
    assert!(read.steps[2].plastic);
    assert_ne!(read.steps[2].location, ForceLocation::Outside);
    assert!(read.steps[2].iso_factor[0] > 1.0);
    assert!(read.steps[2].force[1] > 0.0);

    // unloading is elastic
    assert!(!read.steps[3].plastic);
    assert_eq!(read.steps[3].iso_factor, read.steps[2].iso_factor);

    // reverse bending
    assert!(read.steps[4].force[1] < 0.0);
    assert!(read.surface_final[0][0] > read.surface_initial[0][0]);
    Ok(())
}

#[test]
fn test_loading_path_json_captures_errors() {
    let input = format!("{}/{}_invalid.json", DEFAULT_TEST_DIR, NAME);
    fs::create_dir_all(DEFAULT_TEST_DIR).unwrap();
    fs::write(&input, INPUT.replace("\"ea\": 1e6", "\"ea\": -1e6")).unwrap();
    assert_eq!(LoadingPath::read_json(&input).err(), Some("ea must be > 0.0"));
    fs::write(&input, "{ \"section\": 1 }").unwrap();
    assert_eq!(LoadingPath::read_json(&input).err(), Some("cannot parse JSON file"));
}
