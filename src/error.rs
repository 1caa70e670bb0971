//! Error type shared by every solver stage.

use thiserror::Error;

/// Error type for invalid configurations and convergence failures.
///
/// All failures inside the solver surface through this enum; modules never
/// report to the user directly. The binary maps variants onto process exit
/// codes via [`OzError::exit_code`].
#[derive(Error, Debug)]
pub enum OzError {
    #[error("{0}")]
    Config(String),
    #[error(
        "density step at rho = {density:.6} did not converge within {iterations} iterations \
         (last residual {residual:.3e})"
    )]
    NotConverged {
        density: f64,
        iterations: usize,
        residual: f64,
    },
    #[error(
        "1 - rho*c(k) became non-positive at k = {k:.6} during the step to rho = {density:.6}; \
         spinodal crossed"
    )]
    SpinodalCrossed { density: f64, k: f64 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl OzError {
    /// Process exit code for the CLI: 1 for bad input, 2 for non-convergence.
    pub fn exit_code(&self) -> u8 {
        match self {
            OzError::NotConverged { .. } | OzError::SpinodalCrossed { .. } => 2,
            _ => 1,
        }
    }
}

/// Convenience type for `Result<T, OzError>`.
pub type OzResult<T> = Result<T, OzError>;
