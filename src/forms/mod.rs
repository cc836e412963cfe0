//! Form definitions backing the client views.

use thiserror::Error;
use validator::ValidationErrors;

pub mod appointment;
pub mod lookup;
pub mod report;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    /// User-facing messages, one per violated rule, in display order.
    #[error("{}", .0.join(" "))]
    Rejected(Vec<String>),

    #[error("no infirmary selected for this session")]
    MissingInfirmary,

    #[error("logged-in user name is unknown")]
    MissingNurse,
}

impl FormError {
    /// Messages to render in the error container.
    pub fn messages(&self) -> Vec<String> {
        match self {
            FormError::Rejected(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// Collects the custom messages attached to `fields`, in the given order.
pub(crate) fn ordered_messages(errors: &ValidationErrors, fields: &[&str]) -> Vec<String> {
    let field_errors = errors.field_errors();
    let mut messages = Vec::new();
    for field in fields {
        for (name, errs) in &field_errors {
            if &**name != *field {
                continue;
            }
            messages.extend(errs.iter().map(|err| {
                err.message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("{field}: {}", err.code))
            }));
        }
    }
    messages
}
