use thiserror::Error;

/// A field of an externally supplied value fell outside its declared domain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}
