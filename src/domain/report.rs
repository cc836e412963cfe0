use serde::Serialize;

use crate::domain::types::{InfirmaryName, NonEmptyString, PageNumber};

/// Name of the hidden form field carrying the CSRF token.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Validated filter of the appointment report.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ReportFilter {
    pub date_begin: NonEmptyString,
    pub date_end: NonEmptyString,
    /// Never empty once constructed by the report form.
    pub infirmaries: Vec<InfirmaryName>,
    pub search_term: Option<NonEmptyString>,
}

/// Everything the report endpoint receives for one page request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportSubmission {
    pub action: String,
    pub csrf_token: String,
    pub filter: ReportFilter,
    pub page: PageNumber,
}

impl ReportSubmission {
    pub fn new(
        action: impl Into<String>,
        csrf_token: impl Into<String>,
        filter: ReportFilter,
        page: PageNumber,
    ) -> Self {
        Self {
            action: action.into(),
            csrf_token: csrf_token.into(),
            filter,
            page,
        }
    }

    /// Serialized form fields in submission order; `page` is appended last.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            (CSRF_FIELD, self.csrf_token.clone()),
            ("date_begin", self.filter.date_begin.to_string()),
            ("date_end", self.filter.date_end.to_string()),
        ];
        fields.extend(
            self.filter
                .infirmaries
                .iter()
                .map(|infirmary| ("infirmaries", infirmary.to_string())),
        );
        fields.push((
            "search_term",
            self.filter
                .search_term
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        ));
        fields.push(("page", self.page.to_string()));
        fields
    }
}

/// What the report endpoint answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportResponse {
    /// OK status: markup replacing the results container.
    Fragment(String),
    /// Non-OK status with a structured `errors` list.
    Rejected(Vec<String>),
}

/// What a patient record page request answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordPageResponse {
    /// The visit history page.
    Page(String),
    /// Non-OK status with `{"status": "error", "message": ...}`.
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_repeat_infirmaries_and_end_with_page() {
        let filter = ReportFilter {
            date_begin: NonEmptyString::new("2024-01-01").unwrap(),
            date_end: NonEmptyString::new("2024-01-31").unwrap(),
            infirmaries: vec![
                InfirmaryName::new("A").unwrap(),
                InfirmaryName::new("B").unwrap(),
            ],
            search_term: None,
        };
        let submission =
            ReportSubmission::new("/reports/", "tok", filter, PageNumber::new(3).unwrap());

        let fields = submission.fields();

        assert_eq!(fields[0], (CSRF_FIELD, "tok".to_string()));
        assert_eq!(
            fields
                .iter()
                .filter(|(name, _)| *name == "infirmaries")
                .count(),
            2
        );
        assert_eq!(fields.last(), Some(&("page", "3".to_string())));
    }
}
