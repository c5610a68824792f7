use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds the maximum number of recorded messages (older messages are dropped)
const N_MAX_RECORDS: usize = 256;

/// Defines the kinds of reported (non-fatal) problems
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum DiagnosticKind {
    /// A query was made at a point where it is not defined (e.g., gradient off the surface)
    PreconditionViolation,

    /// The interpolation or walking loop reached its iteration cap
    NonConvergence,

    /// The construction parameters are invalid
    InvalidConfiguration,

    /// The calling sequence is wrong (e.g., commit with a force outside the surface)
    LogicError,
}

/// Holds a reported problem
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Records problems that are reported but do not stop the computations
///
/// The calls reporting a problem still return a best-effort value; the caller
/// (e.g., the nonlinear solver) decides whether to reduce the load step or abort.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Diagnostics {
    verbose: bool,
    records: Vec<Diagnostic>,
    n_reported: usize,
}

impl Diagnostics {
    /// Allocates a new instance
    pub fn new(verbose: bool) -> Self {
        Diagnostics {
            verbose,
            records: Vec::new(),
            n_reported: 0,
        }
    }

    /// Reports a problem
    pub fn report(&mut self, kind: DiagnosticKind, message: String) {
        if self.verbose {
            println!("⚠️ {}: {}", kind, message);
        }
        if self.records.len() == N_MAX_RECORDS {
            self.records.remove(0);
        }
        self.records.push(Diagnostic { kind, message });
        self.n_reported += 1;
    }

    /// Returns the recorded problems (most recent last)
    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    /// Returns the total number of reported problems (including dropped ones)
    pub fn n_reported(&self) -> usize {
        self.n_reported
    }

    /// Returns the number of recorded problems of a given kind
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.records.iter().filter(|d| d.kind == kind).count()
    }

    /// Returns the most recent problem
    pub fn last(&self) -> Option<&Diagnostic> {
        self.records.last()
    }

    /// Clears the records
    pub fn clear(&mut self) {
        self.records.clear();
        self.n_reported = 0;
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::PreconditionViolation => write!(f, "precondition violation"),
            DiagnosticKind::NonConvergence => write!(f, "non-convergence"),
            DiagnosticKind::InvalidConfiguration => write!(f, "invalid configuration"),
            DiagnosticKind::LogicError => write!(f, "logic error"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{DiagnosticKind, Diagnostics, N_MAX_RECORDS};

    #[test]
    fn report_works() {
        let mut diag = Diagnostics::new(false);
        assert_eq!(diag.n_reported(), 0);
        assert!(diag.last().is_none());
        diag.report(DiagnosticKind::NonConvergence, "interpolation failed".to_string());
        diag.report(DiagnosticKind::LogicError, "commit outside".to_string());
        assert_eq!(diag.n_reported(), 2);
        assert_eq!(diag.count(DiagnosticKind::NonConvergence), 1);
        assert_eq!(diag.count(DiagnosticKind::PreconditionViolation), 0);
        assert_eq!(diag.last().unwrap().kind, DiagnosticKind::LogicError);
        assert_eq!(diag.records()[0].message, "interpolation failed");
        diag.clear();
        assert_eq!(diag.n_reported(), 0);
        assert_eq!(diag.records().len(), 0);
    }

    #[test]
    fn report_drops_old_records() {
        let mut diag = Diagnostics::new(false);
        for i in 0..(N_MAX_RECORDS + 10) {
            diag.report(DiagnosticKind::NonConvergence, format!("{}", i));
        }
        assert_eq!(diag.records().len(), N_MAX_RECORDS);
        assert_eq!(diag.n_reported(), N_MAX_RECORDS + 10);
        assert_eq!(diag.records()[0].message, "10");
    }

    #[test]
    fn display_works() {
        assert_eq!(format!("{}", DiagnosticKind::InvalidConfiguration), "invalid configuration");
        assert_eq!(format!("{}", DiagnosticKind::PreconditionViolation), "precondition violation");
    }
}
