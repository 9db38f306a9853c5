use crate::css::ColorParseError;

/// Errors raised while configuring or running a CVD transform.
///
/// `UnknownDeficiencyKind`, `InvalidAmount` and `InvalidConfusionLine` are
/// caller-input errors and are reported before any sample is touched.
/// `DivisionByZero` is a per-sample numeric fault.
#[derive(Debug, thiserror::Error)]
pub enum CvdError {
    #[error("unknown deficiency kind: {0}")]
    UnknownDeficiencyKind(String),
    #[error("unknown transform mode: {0}")]
    UnknownMode(String),
    #[error("amount must be within [0, 1], got {0}")]
    InvalidAmount(f64),
    #[error("custom confusion line has non-finite coordinates")]
    InvalidConfusionLine,
    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),
    #[error("RGBA byte buffer length {0} is not a multiple of 4")]
    BufferLength(usize),
    #[error("invalid color string: {0}")]
    ColorParse(#[from] ColorParseError),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, CvdError>;
