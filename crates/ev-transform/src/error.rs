use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("energy requirement table has no row for year '{label}'")]
    MissingEnergyYear { label: String },
}

pub type Result<T> = std::result::Result<T, TransformError>;
