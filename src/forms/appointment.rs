//! Visit forms filled by the nurse for each patient kind.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::appointment::{
    AppointmentRecord, EmployeeAppointment, StudentAppointment, VisitDetails, VisitorAppointment,
};
use crate::domain::patient::PatientKind;
use crate::domain::session::SessionContext;
use crate::forms::FormError;

#[derive(Clone, Debug, Default, Deserialize, Validate)]
/// Clinical part shared by every visit form.
pub struct VisitForm {
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub patient_notes: String,
    #[validate(length(min = 1))]
    pub reason: String,
    #[validate(length(min = 1))]
    pub treatment: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub revaluation: bool,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct StudentVisitForm {
    #[validate(length(min = 1))]
    pub student_id: String,
    #[serde(default)]
    pub current_class: String,
    #[serde(default)]
    pub contact_parents: bool,
    #[validate(nested)]
    #[serde(flatten)]
    pub visit: VisitForm,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct EmployeeVisitForm {
    #[validate(length(min = 1))]
    pub employee_id: String,
    #[validate(nested)]
    #[serde(flatten)]
    pub visit: VisitForm,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct VisitorVisitForm {
    #[serde(default)]
    pub visitor_id: String,
    #[validate(length(min = 1))]
    pub visitor_name: String,
    #[serde(default)]
    pub visitor_age: String,
    #[serde(default)]
    pub visitor_email: String,
    #[serde(default)]
    pub visitor_gender: String,
    #[serde(default)]
    pub visitor_relationship: String,
    #[validate(nested)]
    #[serde(flatten)]
    pub visit: VisitForm,
}

/// A visit form of any patient kind.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AppointmentForm {
    Student(StudentVisitForm),
    Employee(EmployeeVisitForm),
    Visitor(VisitorVisitForm),
}

/// ISO-8601 timestamp with millisecond precision and a `Z` suffix.
fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

impl VisitForm {
    /// Trims every text field before it is checked.
    fn normalized(self) -> Self {
        Self {
            allergies: trimmed(self.allergies),
            patient_notes: trimmed(self.patient_notes),
            reason: trimmed(self.reason),
            treatment: trimmed(self.treatment),
            notes: trimmed(self.notes),
            revaluation: self.revaluation,
        }
    }

    fn into_details(
        self,
        session: &SessionContext,
        date: Option<String>,
    ) -> Result<VisitDetails, FormError> {
        let infirmary = session
            .infirmary
            .as_ref()
            .ok_or(FormError::MissingInfirmary)?
            .to_string();
        let nurse = session.nurse().ok_or(FormError::MissingNurse)?.to_string();

        Ok(VisitDetails {
            allergies: self.allergies,
            patient_notes: self.patient_notes,
            infirmary,
            nurse,
            reason: self.reason,
            treatment: self.treatment,
            notes: self.notes,
            revaluation: self.revaluation,
            date,
        })
    }
}

impl AppointmentForm {
    pub fn kind(&self) -> PatientKind {
        match self {
            AppointmentForm::Student(_) => PatientKind::Student,
            AppointmentForm::Employee(_) => PatientKind::Employee,
            AppointmentForm::Visitor(_) => PatientKind::Visitor,
        }
    }

    fn normalized(self) -> Self {
        match self {
            AppointmentForm::Student(form) => AppointmentForm::Student(StudentVisitForm {
                student_id: trimmed(form.student_id),
                current_class: trimmed(form.current_class),
                contact_parents: form.contact_parents,
                visit: form.visit.normalized(),
            }),
            AppointmentForm::Employee(form) => AppointmentForm::Employee(EmployeeVisitForm {
                employee_id: trimmed(form.employee_id),
                visit: form.visit.normalized(),
            }),
            AppointmentForm::Visitor(form) => AppointmentForm::Visitor(VisitorVisitForm {
                visitor_id: trimmed(form.visitor_id),
                visitor_name: trimmed(form.visitor_name),
                visitor_age: trimmed(form.visitor_age),
                visitor_email: trimmed(form.visitor_email),
                visitor_gender: trimmed(form.visitor_gender),
                visitor_relationship: trimmed(form.visitor_relationship),
                visit: form.visit.normalized(),
            }),
        }
    }

    fn validate_fields(&self) -> Result<(), FormError> {
        match self {
            AppointmentForm::Student(form) => form.validate()?,
            AppointmentForm::Employee(form) => form.validate()?,
            AppointmentForm::Visitor(form) => form.validate()?,
        }
        Ok(())
    }

    /// Trims and validates the form, then stamps it with the session's infirmary and nurse.
    ///
    /// Student and visitor records carry the submission time; employee
    /// records are dated by the server.
    pub fn into_record(
        self,
        session: &SessionContext,
        now: DateTime<Utc>,
    ) -> Result<AppointmentRecord, FormError> {
        let form = self.normalized();
        form.validate_fields()?;

        let record = match form {
            AppointmentForm::Student(form) => AppointmentRecord::Student(StudentAppointment {
                student_id: form.student_id,
                current_class: form.current_class,
                contact_parents: form.contact_parents,
                visit: form.visit.into_details(session, Some(timestamp(now)))?,
            }),
            AppointmentForm::Employee(form) => AppointmentRecord::Employee(EmployeeAppointment {
                employee_id: form.employee_id,
                visit: form.visit.into_details(session, None)?,
            }),
            AppointmentForm::Visitor(form) => AppointmentRecord::Visitor(VisitorAppointment {
                visitor_id: form.visitor_id,
                visitor_name: form.visitor_name,
                visitor_age: form.visitor_age,
                visitor_email: form.visitor_email,
                visitor_gender: form.visitor_gender,
                visitor_relationship: form.visitor_relationship,
                visit: form.visit.into_details(session, Some(timestamp(now)))?,
            }),
        };
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::types::InfirmaryName;

    fn session() -> SessionContext {
        SessionContext {
            infirmary: Some(InfirmaryName::new("Bloco A").unwrap()),
            user_first_name: Some("Ana".to_string()),
        }
    }

    fn visit() -> VisitForm {
        VisitForm {
            reason: "Febre".to_string(),
            treatment: "Antitérmico".to_string(),
            ..VisitForm::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap()
    }

    #[test]
    fn student_record_is_stamped_from_session() {
        let form = AppointmentForm::Student(StudentVisitForm {
            student_id: " 12 ".to_string(),
            current_class: "5B".to_string(),
            contact_parents: true,
            visit: visit(),
        });

        let record = form.into_record(&session(), now()).unwrap();

        let visit = record.visit();
        assert_eq!(visit.infirmary, "Bloco A");
        assert_eq!(visit.nurse, "Ana");
        assert_eq!(visit.date.as_deref(), Some("2024-03-05T14:30:00.000Z"));
    }

    #[test]
    fn employee_record_has_no_date() {
        let form = AppointmentForm::Employee(EmployeeVisitForm {
            employee_id: "9".to_string(),
            visit: visit(),
        });

        let record = form.into_record(&session(), now()).unwrap();

        assert_eq!(record.visit().date, None);
    }

    #[test]
    fn missing_reason_fails_validation() {
        let form = AppointmentForm::Employee(EmployeeVisitForm {
            employee_id: "9".to_string(),
            visit: VisitForm {
                reason: String::new(),
                ..visit()
            },
        });

        let result = form.into_record(&session(), now());

        assert!(matches!(result, Err(FormError::Validation(_))));
    }

    #[test]
    fn blank_fields_fail_validation() {
        let form = AppointmentForm::Employee(EmployeeVisitForm {
            employee_id: "   ".to_string(),
            visit: VisitForm {
                reason: "   ".to_string(),
                treatment: "  ".to_string(),
                ..VisitForm::default()
            },
        });

        let Err(FormError::Validation(errors)) = form.into_record(&session(), now()) else {
            panic!("blank fields were accepted");
        };

        assert!(errors.field_errors().contains_key("employee_id"));
        assert!(matches!(
            errors.errors().get("visit"),
            Some(validator::ValidationErrorsKind::Struct(_))
        ));
    }

    #[test]
    fn values_are_sent_trimmed() {
        let form = AppointmentForm::Student(StudentVisitForm {
            student_id: " 12 ".to_string(),
            current_class: " 5B ".to_string(),
            contact_parents: false,
            visit: VisitForm {
                reason: " Febre ".to_string(),
                ..visit()
            },
        });

        let AppointmentRecord::Student(record) = form.into_record(&session(), now()).unwrap() else {
            panic!("expected a student record");
        };

        assert_eq!(record.student_id, "12");
        assert_eq!(record.current_class, "5B");
        assert_eq!(record.visit.reason, "Febre");
    }

    #[test]
    fn record_requires_selected_infirmary() {
        let form = AppointmentForm::Employee(EmployeeVisitForm {
            employee_id: "9".to_string(),
            visit: visit(),
        });
        let session = SessionContext {
            infirmary: None,
            ..session()
        };

        let result = form.into_record(&session, now());

        assert!(matches!(result, Err(FormError::MissingInfirmary)));
    }

    #[test]
    fn form_kind_is_read_from_tag() {
        let form: AppointmentForm = serde_json::from_str(
            r#"{"kind": "visitor", "visitor_name": "Carlos", "reason": "Queda", "treatment": "Gelo"}"#,
        )
        .unwrap();

        assert_eq!(form.kind(), PatientKind::Visitor);
    }
}
