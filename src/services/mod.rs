//! View-model services: pure state transitions plus calls through the backend traits.

use thiserror::Error;

use crate::backend::errors::BackendError;

pub mod appointment;
pub mod chart;
pub mod records;
pub mod report;
pub mod search;
pub mod session;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
