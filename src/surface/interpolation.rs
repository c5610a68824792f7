/// Holds the results of the interpolation (root finding) along a segment
#[derive(Clone, Copy, Debug)]
pub struct Interpolation {
    /// Parameter along the segment (0 ≤ t ≤ 1)
    pub t: f64,

    /// Drift at t
    pub drift: f64,

    /// Number of iterations
    pub n_iterations: usize,

    /// Indicates that |drift| ≤ tolerance has been reached
    pub converged: bool,
}

/// Finds t ∈ [0, 1] such that f(t) ≈ 0 given f(0) ≤ 0 < f(1)
///
/// Uses the regula falsi (false position) method with the Illinois correction. A bisection
/// step replaces the false-position estimate if it falls outside the current bracket.
///
/// # Input
///
/// * `f` -- the function (usually the drift along a segment)
/// * `f0` -- the value f(0)
/// * `f1` -- the value f(1)
/// * `tol` -- the tolerance on |f(t)|
/// * `n_max_iterations` -- the maximum number of iterations
///
/// # Output
///
/// If the root is not bracketed, returns the end with the smallest |f| and `converged = false`.
/// If the maximum number of iterations is reached, returns the last computed t and `converged = false`.
pub fn interpolate_close<F>(mut f: F, f0: f64, f1: f64, tol: f64, n_max_iterations: usize) -> Interpolation
where
    F: FnMut(f64) -> f64,
{
    // check the ends
    if f64::abs(f0) <= tol {
        return Interpolation {
            t: 0.0,
            drift: f0,
            n_iterations: 0,
            converged: true,
        };
    }
    if f64::abs(f1) <= tol {
        return Interpolation {
            t: 1.0,
            drift: f1,
            n_iterations: 0,
            converged: true,
        };
    }
    if f0 > 0.0 || f1 < 0.0 {
        let (t, drift) = if f64::abs(f0) < f64::abs(f1) { (0.0, f0) } else { (1.0, f1) };
        return Interpolation {
            t,
            drift,
            n_iterations: 0,
            converged: false,
        };
    }

    // bracket
    let (mut a, mut fa) = (0.0, f0);
    let (mut b, mut fb) = (1.0, f1);
    let mut t = 0.0;
    let mut ft = f0;
    let mut side = 0;
    for k in 0..n_max_iterations {
        t = (a * fb - b * fa) / (fb - fa);
        if !(t > a && t < b) {
            t = 0.5 * (a + b);
        }
        ft = f(t);
        if f64::abs(ft) <= tol {
            return Interpolation {
                t,
                drift: ft,
                n_iterations: k + 1,
                converged: true,
            };
        }
        if ft > 0.0 {
            b = t;
            fb = ft;
            if side == 1 {
                fa *= 0.5;
            }
            side = 1;
        } else {
            a = t;
            fa = ft;
            if side == -1 {
                fb *= 0.5;
            }
            side = -1;
        }
        if b - a <= f64::EPSILON {
            break;
        }
    }
    Interpolation {
        t,
        drift: ft,
        n_iterations: n_max_iterations,
        converged: false,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
