use std::fmt;

/// Error type for invalid operations.
///
/// Implemented by hand rather than via `thiserror` because the
/// `MissingQuantity` variant has a field named `source` (a `String`
/// naming the data source, mandated by the spec), which `thiserror`
/// would otherwise treat as the error cause.
#[derive(Debug)]
pub enum LstError {
    InvalidCoverage { time_index: usize },
    DivideByZero { time_index: usize },
    MisalignedTimeAxis,
    MissingQuantity { source: String, quantity: String },
    Config(toml::de::Error),
}

impl fmt::Display for LstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LstError::InvalidCoverage { time_index } => write!(
                f,
                "no valid cells at time index {time_index}, a weighted mean is undefined"
            ),
            LstError::DivideByZero { time_index } => write!(
                f,
                "sampling uncertainty is undefined for a single-cell domain at time index {time_index}"
            ),
            LstError::MisalignedTimeAxis => {
                write!(f, "input time axes are not identical")
            }
            LstError::MissingQuantity { source, quantity } => write!(
                f,
                "quantity {quantity} was not loaded for source {source}"
            ),
            LstError::Config(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for LstError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LstError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for LstError {
    fn from(err: toml::de::Error) -> Self {
        LstError::Config(err)
    }
}

/// Convenience type for `Result<T, LstError>`.
pub type LstResult<T> = Result<T, LstError>;
