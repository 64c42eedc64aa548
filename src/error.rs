/// Errors raised by the spectrum summary and component selection operations.
#[derive(Debug, thiserror::Error)]
pub enum PcaError {
    #[error("invalid argument `{name}`: {value} is outside [0, 1]")]
    InvalidArgument { name: &'static str, value: f64 },

    #[error("number of outputs {value} exceeds the maximum of {maximum}")]
    OutOfRange { value: usize, maximum: usize },

    #[error("decomposition mismatch: {what} has length {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("decomposition backend failed: {0}")]
    Backend(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PcaError>;
