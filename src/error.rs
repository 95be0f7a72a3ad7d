use thiserror::Error;

/// Failure contract shared by the scan and speed-test simulators.
///
/// Both simulators surface failures to the caller instead of silently
/// mapping them to an empty result; the UI layer decides how to recover.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("simulation failed: {0}")]
    Failed(String),
}
