use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid area code: {0}")]
    InvalidAreaCode(String),
    #[error("invalid local number: {0}")]
    InvalidLocalNumber(String),
    #[error("missing mobile prefix")]
    MissingMobilePrefix,
    #[error("invalid phone length: expected {expected} digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("unsupported country code: {0}")]
    InvalidCountryCode(String),
}
