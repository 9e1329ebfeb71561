use thiserror::Error;

use crate::battle::manifest::ManifestError;
use crate::core::types::UnitId;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unit not found: {0:?}")]
    UnitNotFound(UnitId),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Ability data error: {0}")]
    AbilityData(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
