use thiserror::Error;

use vta::{FormatError, PatchError, VtaError};

use crate::plan::PlanError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Patch(#[from] PatchError),
}

impl From<VtaError> for AppError {
    fn from(e: VtaError) -> Self {
        match e {
            VtaError::Format(e) => AppError::Format(e),
            VtaError::Patch(e) => AppError::Patch(e),
        }
    }
}
