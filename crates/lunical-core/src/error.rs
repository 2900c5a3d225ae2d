use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid configuration: {0}")]
    ConfigValidation(String),

    #[error("Cannot resolve lunisolar date: {0}")]
    DateResolution(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}
