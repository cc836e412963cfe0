//! Form used to open a patient's visit history.

use serde::{Deserialize, Serialize};

use crate::domain::types::{NonEmptyString, Registry};
use crate::forms::FormError;

pub const LOOKUP_REQUIRED: &str = "Por favor, preencha pelo menos um dos campos.";

/// Fields marked invalid when the lookup is rejected.
pub const LOOKUP_FIELDS: [&str; 2] = ["name", "registry"];

/// Class added to flagged inputs.
pub const INVALID_FIELD_CLASS: &str = "form-control-danger";

/// Name and registry fields of the record search form.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RecordLookupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub registry: String,
}

/// Validated lookup; the server prefers the name when both are given.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RecordLookup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<NonEmptyString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<Registry>,
}

impl TryFrom<RecordLookupForm> for RecordLookup {
    type Error = FormError;

    fn try_from(form: RecordLookupForm) -> Result<Self, Self::Error> {
        let lookup = RecordLookup {
            name: NonEmptyString::new(form.name).ok(),
            registry: Registry::new(form.registry).ok(),
        };
        if lookup.name.is_none() && lookup.registry.is_none() {
            return Err(FormError::Rejected(vec![LOOKUP_REQUIRED.to_string()]));
        }
        Ok(lookup)
    }
}
