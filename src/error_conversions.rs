//! Error conversion glue between the data layer and the client layer.
//!
//! Domain types and forms do not depend on backend or service errors, so the
//! conversions live here and only exist when the `client` feature is built.

use crate::backend::errors::BackendError;
use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for BackendError {
    fn from(val: TypeConstraintError) -> Self {
        BackendError::ValidationError(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::Form(val.messages().join(" "))
    }
}
