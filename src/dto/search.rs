//! Payloads of the `/patients/{kind}/search/name/` endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::patient::{EmployeeMatch, PatientKind, SearchResult, StudentMatch, VisitorMatch};
use crate::domain::types::{Registry, TypeConstraintError};

/// Query string of a name search.
#[derive(Debug, Serialize)]
pub struct NameSearchQuery<'a> {
    pub q: &'a str,
}

/// One row as the server sends it; which optional fields are present depends on the kind.
///
/// Every field is kept as raw JSON so one oddly typed row is skipped by
/// [`PatientRowDto::into_result`] instead of failing the whole response.
#[derive(Clone, Debug, Deserialize)]
pub struct PatientRowDto {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub registry: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub current_class: Option<Value>,
    #[serde(default)]
    pub department: Option<Value>,
    #[serde(default)]
    pub position: Option<Value>,
    #[serde(default)]
    pub relationship: Option<Value>,
}

/// Body of a successful search response.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchResponseDto {
    #[serde(default)]
    pub results: Vec<PatientRowDto>,
}

/// Renders scalar JSON values (ids, foreign keys) as table text.
fn value_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Ages come as numbers or numeric strings; anything else is left blank.
fn value_age(value: Option<Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl PatientRowDto {
    /// Converts the row into the result variant of `kind`.
    pub fn into_result(self, kind: PatientKind) -> Result<SearchResult, TypeConstraintError> {
        let name = value_text(self.name).ok_or(TypeConstraintError::EmptyString)?;
        let registry = value_text(self.registry);
        let result = match kind {
            PatientKind::Student => SearchResult::Student(StudentMatch {
                registry: Registry::new(registry.unwrap_or_default())?,
                name,
                age: value_age(self.age),
                current_class: value_text(self.current_class),
            }),
            PatientKind::Employee => SearchResult::Employee(EmployeeMatch {
                registry: Registry::new(registry.unwrap_or_default())?,
                name,
                department: value_text(self.department),
                position: value_text(self.position),
            }),
            PatientKind::Visitor => {
                let id = value_text(self.id)
                    .or(registry)
                    .ok_or(TypeConstraintError::EmptyString)?;
                SearchResult::Visitor(VisitorMatch {
                    id,
                    name,
                    age: value_age(self.age),
                    relationship: value_text(self.relationship),
                })
            }
        };
        Ok(result)
    }
}
