//! Search form opening a patient's visit history.

use crate::alerts::AlertKind;
use crate::backend::RecordPages;
use crate::domain::patient::PatientKind;
use crate::domain::report::RecordPageResponse;
use crate::forms::lookup::{LOOKUP_FIELDS, RecordLookup, RecordLookupForm};
use crate::pagination::sanitize_fragment;

pub const LOOKUP_FAILED: &str = "Ocorreu um erro inesperado. Tente novamente.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Sanitized history page.
    Opened { html: String },
    /// Both fields were blank; nothing was sent.
    Invalid {
        errors: Vec<String>,
        flagged: Vec<&'static str>,
    },
    /// The server refused the lookup with its own message.
    Rejected { message: String },
    /// No readable answer.
    Failed,
}

impl LookupOutcome {
    /// Dialog shown for server-side failures.
    pub fn alert(&self) -> Option<AlertKind> {
        match self {
            LookupOutcome::Rejected { message } => Some(AlertKind::ErrorMessage(message.clone())),
            LookupOutcome::Failed => Some(AlertKind::ErrorMessage(LOOKUP_FAILED.to_string())),
            LookupOutcome::Opened { .. } | LookupOutcome::Invalid { .. } => None,
        }
    }
}

/// Opens the visit history of the patient named or registered in `form`.
pub fn open_record_page<B>(backend: &B, kind: PatientKind, form: RecordLookupForm) -> LookupOutcome
where
    B: RecordPages + ?Sized,
{
    let lookup = match RecordLookup::try_from(form) {
        Ok(lookup) => lookup,
        Err(err) => {
            return LookupOutcome::Invalid {
                errors: err.messages(),
                flagged: LOOKUP_FIELDS.to_vec(),
            };
        }
    };

    match backend.record_page(kind, &lookup) {
        Ok(RecordPageResponse::Page(html)) => LookupOutcome::Opened {
            html: sanitize_fragment(&html),
        },
        Ok(RecordPageResponse::Rejected(message)) => {
            log::error!("Server refused the {kind} record lookup: {message}");
            LookupOutcome::Rejected { message }
        }
        Err(err) => {
            log::error!("Failed to load {kind} record page: {err}");
            LookupOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::{always, eq};

    use super::*;
    use crate::backend::errors::BackendError;
    use crate::backend::mock::MockBackend;
    use crate::forms::lookup::LOOKUP_REQUIRED;

    fn by_registry(registry: &str) -> RecordLookupForm {
        RecordLookupForm {
            name: String::new(),
            registry: registry.to_string(),
        }
    }

    #[test]
    fn blank_lookup_flags_both_fields_and_sends_nothing() {
        let mut backend = MockBackend::new();
        backend.expect_record_page().never();

        let outcome = open_record_page(
            &backend,
            PatientKind::Student,
            RecordLookupForm::default(),
        );

        assert_eq!(
            outcome,
            LookupOutcome::Invalid {
                errors: vec![LOOKUP_REQUIRED.to_string()],
                flagged: vec!["name", "registry"],
            }
        );
        assert_eq!(outcome.alert(), None);
    }

    #[test]
    fn record_page_is_sanitized() {
        let mut backend = MockBackend::new();
        backend
            .expect_record_page()
            .with(eq(PatientKind::Employee), always())
            .returning(|_, _| {
                Ok(RecordPageResponse::Page(
                    "<h1>Histórico</h1><script>x()</script>".to_string(),
                ))
            });

        let outcome = open_record_page(&backend, PatientKind::Employee, by_registry("E-1"));

        assert_eq!(
            outcome,
            LookupOutcome::Opened {
                html: "<h1>Histórico</h1>".to_string()
            }
        );
    }

    #[test]
    fn server_message_is_shown_in_error_dialog() {
        let mut backend = MockBackend::new();
        backend.expect_record_page().returning(|_, _| {
            Ok(RecordPageResponse::Rejected(
                "Missing required fields: name or registry".to_string(),
            ))
        });

        let outcome = open_record_page(&backend, PatientKind::Student, by_registry("RA-9"));

        assert_eq!(
            outcome.alert(),
            Some(AlertKind::ErrorMessage(
                "Missing required fields: name or registry".to_string()
            ))
        );
    }

    #[test]
    fn unreadable_answer_falls_back_to_generic_dialog() {
        let mut backend = MockBackend::new();
        backend
            .expect_record_page()
            .returning(|_, _| Err(BackendError::Transport("refused".to_string())));

        let outcome = open_record_page(&backend, PatientKind::Student, by_registry("RA-9"));

        assert_eq!(outcome, LookupOutcome::Failed);
        assert_eq!(
            outcome.alert(),
            Some(AlertKind::ErrorMessage(LOOKUP_FAILED.to_string()))
        );
    }
}
