use std::fmt;

/// Errors surfaced by the analysis pipeline.
///
/// Statistical degeneracies (n < 2, zero variance, division by zero) are
/// absorbed locally as neutral values and never reach this type. Only a
/// missing dataset or an unusable scenario parameter is reported to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No game records are available to analyze
    EmptyFrame,
    /// A marketing scenario parameter cannot be used as given
    InvalidScenario {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::EmptyFrame => write!(f, "no games available for analysis"),
            AnalysisError::InvalidScenario { field, reason } => {
                write!(f, "invalid scenario parameter {field}: {reason}")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

pub type Result<T> = std::result::Result<T, AnalysisError>;
