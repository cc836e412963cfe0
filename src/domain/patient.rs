use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::{Registry, TypeConstraintError};

/// The three kinds of patient an infirmary attends to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PatientKind {
    Student,
    Employee,
    Visitor,
}

impl PatientKind {
    /// Plural path segment used by the patient search endpoints.
    pub const fn search_segment(self) -> &'static str {
        match self {
            PatientKind::Student => "students",
            PatientKind::Employee => "employees",
            PatientKind::Visitor => "visitors",
        }
    }

    /// Singular path segment used by the appointment record endpoints.
    pub const fn record_segment(self) -> &'static str {
        match self {
            PatientKind::Student => "student",
            PatientKind::Employee => "employee",
            PatientKind::Visitor => "visitor",
        }
    }
}

impl Display for PatientKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.record_segment())
    }
}

impl FromStr for PatientKind {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" | "students" => Ok(PatientKind::Student),
            "employee" | "employees" => Ok(PatientKind::Employee),
            "visitor" | "visitors" => Ok(PatientKind::Visitor),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StudentMatch {
    pub name: String,
    pub registry: Registry,
    pub age: Option<u32>,
    pub current_class: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmployeeMatch {
    pub name: String,
    pub registry: Registry,
    pub department: Option<String>,
    pub position: Option<String>,
}

/// Visitors carry no registry code; their server id is the selection key.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VisitorMatch {
    pub id: String,
    pub name: String,
    pub age: Option<u32>,
    pub relationship: Option<String>,
}

/// One row of the shared results table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchResult {
    Student(StudentMatch),
    Employee(EmployeeMatch),
    Visitor(VisitorMatch),
}

fn optional_cell<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

impl SearchResult {
    pub fn kind(&self) -> PatientKind {
        match self {
            SearchResult::Student(_) => PatientKind::Student,
            SearchResult::Employee(_) => PatientKind::Employee,
            SearchResult::Visitor(_) => PatientKind::Visitor,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SearchResult::Student(s) => &s.name,
            SearchResult::Employee(e) => &e.name,
            SearchResult::Visitor(v) => &v.name,
        }
    }

    /// Text of the cell copied into the registry field when the row is selected.
    pub fn registry_cell(&self) -> &str {
        match self {
            SearchResult::Student(s) => s.registry.as_str(),
            SearchResult::Employee(e) => e.registry.as_str(),
            SearchResult::Visitor(v) => &v.id,
        }
    }

    /// Table cells in display order: name, registry, then the kind-specific fields.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![self.name().to_string(), self.registry_cell().to_string()];
        match self {
            SearchResult::Student(s) => {
                cells.push(optional_cell(&s.age));
                cells.push(optional_cell(&s.current_class));
            }
            SearchResult::Employee(e) => {
                cells.push(optional_cell(&e.department));
                cells.push(optional_cell(&e.position));
            }
            SearchResult::Visitor(v) => {
                cells.push(optional_cell(&v.age));
                cells.push(optional_cell(&v.relationship));
            }
        }
        cells
    }
}
