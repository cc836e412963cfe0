use chrono::{DateTime, Utc};

use crate::alerts::{AlertKind, AlertLevel};
use crate::backend::AppointmentWriter;
use crate::domain::session::SessionContext;
use crate::forms::appointment::AppointmentForm;
use crate::services::{ServiceError, ServiceResult};

pub const RECORD_SAVED: &str = "Atendimento salvo com sucesso!";
pub const RECORD_REJECTED: &str = "Ocorreu um erro ao salvar o atendimento.";
pub const RECORD_FAILED: &str = "Ocorreu um erro na requisição. Por favor, tente novamente.";

/// Where the view navigates after a saved record.
pub const HOME_PATH: &str = "/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    Saved { redirect: &'static str },
    /// The server answered with a non-success status.
    Rejected { server_message: Option<String> },
    /// The request never got a readable answer.
    Failed,
}

impl RecordOutcome {
    /// Message shown to the nurse.
    pub fn message(&self) -> &'static str {
        match self {
            RecordOutcome::Saved { .. } => RECORD_SAVED,
            RecordOutcome::Rejected { .. } => RECORD_REJECTED,
            RecordOutcome::Failed => RECORD_FAILED,
        }
    }

    /// Level of the inline notice left on the form.
    pub fn level(&self) -> AlertLevel {
        match self {
            RecordOutcome::Saved { .. } => AlertLevel::Success,
            RecordOutcome::Rejected { .. } | RecordOutcome::Failed => AlertLevel::Error,
        }
    }

    /// Dialog presenting the outcome.
    pub fn alert(&self) -> AlertKind {
        match self {
            RecordOutcome::Saved { .. } => AlertKind::Basic(RECORD_SAVED.to_string()),
            other => AlertKind::ErrorMessage(other.message().to_string()),
        }
    }
}

/// Validates a visit form, stamps it from the session and posts it.
pub fn record_appointment<B>(
    backend: &B,
    session: &SessionContext,
    form: AppointmentForm,
    now: DateTime<Utc>,
) -> ServiceResult<RecordOutcome>
where
    B: AppointmentWriter + ?Sized,
{
    let kind = form.kind();
    let record = form.into_record(session, now).map_err(|err| {
        log::error!("Failed to validate {kind} visit form: {err}");
        ServiceError::from(err)
    })?;

    let outcome = match backend.record_appointment(&record) {
        Ok(status) if status.is_success() => RecordOutcome::Saved {
            redirect: HOME_PATH,
        },
        Ok(status) => {
            log::error!(
                "Server rejected {kind} record with status {:?}: {}",
                status.status,
                status.message.as_deref().unwrap_or_default()
            );
            RecordOutcome::Rejected {
                server_message: status.message,
            }
        }
        Err(err) => {
            log::error!("Failed to send {kind} record: {err}");
            RecordOutcome::Failed
        }
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use mockall::predicate::function;

    use super::*;
    use crate::backend::errors::BackendError;
    use crate::backend::mock::MockBackend;
    use crate::domain::appointment::AppointmentRecord;
    use crate::domain::types::InfirmaryName;
    use crate::dto::main::RecordStatusDto;
    use crate::forms::appointment::{EmployeeVisitForm, VisitForm};

    fn session() -> SessionContext {
        SessionContext {
            infirmary: Some(InfirmaryName::new("Bloco A").unwrap()),
            user_first_name: Some("Ana".to_string()),
        }
    }

    fn employee_form(reason: &str) -> AppointmentForm {
        AppointmentForm::Employee(EmployeeVisitForm {
            employee_id: "31".to_string(),
            visit: VisitForm {
                reason: reason.to_string(),
                treatment: "Repouso".to_string(),
                ..VisitForm::default()
            },
        })
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap()
    }

    #[test]
    fn success_status_redirects_home() {
        let mut backend = MockBackend::new();
        backend
            .expect_record_appointment()
            .with(function(|record: &AppointmentRecord| {
                record.visit().nurse == "Ana" && record.visit().infirmary == "Bloco A"
            }))
            .times(1)
            .returning(|_| {
                Ok(RecordStatusDto {
                    status: "success".to_string(),
                    message: None,
                })
            });

        let outcome =
            record_appointment(&backend, &session(), employee_form("Tontura"), now()).unwrap();

        assert_eq!(outcome, RecordOutcome::Saved { redirect: "/" });
        assert_eq!(outcome.message(), RECORD_SAVED);
        assert_eq!(outcome.level(), AlertLevel::Success);
    }

    #[test]
    fn error_status_shows_generic_rejection() {
        let mut backend = MockBackend::new();
        backend.expect_record_appointment().returning(|_| {
            Ok(RecordStatusDto {
                status: "error".to_string(),
                message: Some("Employee not found".to_string()),
            })
        });

        let outcome =
            record_appointment(&backend, &session(), employee_form("Tontura"), now()).unwrap();

        assert_eq!(outcome.message(), RECORD_REJECTED);
        assert_eq!(outcome.level(), AlertLevel::Error);
        assert_eq!(
            outcome.alert(),
            AlertKind::ErrorMessage(RECORD_REJECTED.to_string())
        );
    }

    #[test]
    fn transport_failure_asks_to_retry() {
        let mut backend = MockBackend::new();
        backend
            .expect_record_appointment()
            .returning(|_| Err(BackendError::Transport("refused".to_string())));

        let outcome =
            record_appointment(&backend, &session(), employee_form("Tontura"), now()).unwrap();

        assert_eq!(outcome, RecordOutcome::Failed);
        assert_eq!(outcome.message(), RECORD_FAILED);
    }

    #[test]
    fn invalid_form_is_not_sent() {
        let mut backend = MockBackend::new();
        backend.expect_record_appointment().never();

        let result = record_appointment(&backend, &session(), employee_form(""), now());

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
