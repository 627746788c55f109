use thiserror::Error;

/// Errors raised when the host hands the engine input it cannot render.
///
/// The field math itself is total; every variant here is a contract violation
/// by the caller (bad JSON, NaN coordinates, an empty viewport).
#[derive(Debug, Error)]
pub enum EfieldError {
    /// A charge list or config document failed to parse.
    #[error("malformed input: {0}")]
    Json(#[from] serde_json::Error),

    /// A charge position is NaN or infinite.
    #[error("charge {index} has a non-finite position")]
    NonFiniteCharge { index: usize },

    /// A trace seed is NaN or infinite.
    #[error("trace seed ({x}, {y}) is not finite")]
    NonFiniteSeed { x: f32, y: f32 },

    /// Width or height is zero or larger than `Viewport::MAX_DIMENSION`.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    /// A config field is out of range. The payload names the field.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),

    /// A charge index does not exist in the set.
    #[error("charge index {index} out of range (len {len})")]
    ChargeIndex { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, EfieldError>;
