/// Defines the directory where the loading-path result files are saved
pub const DEFAULT_OUT_DIR: &str = "/tmp/yieldsurf/results";

/// Defines an auxiliary directory where the test result files are saved
pub const DEFAULT_TEST_DIR: &str = "/tmp/yieldsurf/test";

/// Holds the drift tolerance allowing small negative values to be regarded as on the surface
pub const TOL_NEGATIVE: f64 = 1e-7;

/// Holds the drift tolerance allowing small positive values to be regarded as on the surface
pub const TOL_POSITIVE: f64 = 1e-5;

/// Holds the tolerance on |drift| to stop the interpolation (root-finding) loop
pub const TOL_ROOT: f64 = 1e-9;

/// Holds the maximum number of iterations of the interpolation (root-finding) loop
pub const N_MAX_ITERATIONS: usize = 100;

/// Holds the radial increment used when walking outward in normalized force space
pub const WALK_INCREMENT: f64 = 0.01;

/// Holds the maximum number of outward increments before giving up
pub const N_MAX_WALK_STEPS: usize = 10_000;

/// Holds the inward offset (fraction of the extent) of the inner quadrilateral
pub const INNER_OFFSET: f64 = 0.05;

/// Holds the minimum isotropic factor (the surface never shrinks to a point)
pub const MIN_ISO_FACTOR: f64 = 0.1;

/// Holds the plastic multiplier below which the step is considered elastic
pub const LAMBDA_ZERO: f64 = 1e-8;

/// Holds the default transition of the Attalla polar cap (fraction of the y-intercept)
pub const DEFAULT_ATTALLA_CAP: f64 = 0.95;

/// Holds the default transition of the El-Tawil polar cap (fraction of the balance-to-pole distance)
pub const DEFAULT_EL_TAWIL_CAP: f64 = 0.95;
