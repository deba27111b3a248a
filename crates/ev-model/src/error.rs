use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("state correction for '{state}' never settles on a canonical name")]
    CyclicCorrection { state: String },
    #[error("allocation ratio for {category} in region '{region}' must be finite and non-negative, got {ratio}")]
    InvalidRatio {
        region: String,
        category: String,
        ratio: f64,
    },
    #[error("unknown wheeler category label '{0}'")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
