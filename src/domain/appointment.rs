use serde::Serialize;

use crate::domain::patient::PatientKind;

/// Fields every appointment record carries regardless of patient kind.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct VisitDetails {
    pub allergies: String,
    pub patient_notes: String,
    pub infirmary: String,
    pub nurse: String,
    pub reason: String,
    pub treatment: String,
    pub notes: String,
    pub revaluation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct StudentAppointment {
    pub student_id: String,
    pub current_class: String,
    pub contact_parents: bool,
    #[serde(flatten)]
    pub visit: VisitDetails,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct EmployeeAppointment {
    pub employee_id: String,
    #[serde(flatten)]
    pub visit: VisitDetails,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct VisitorAppointment {
    pub visitor_id: String,
    pub visitor_name: String,
    pub visitor_age: String,
    pub visitor_email: String,
    pub visitor_gender: String,
    pub visitor_relationship: String,
    #[serde(flatten)]
    pub visit: VisitDetails,
}

/// JSON body posted to `/appointments/{kind}/record/`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AppointmentRecord {
    Student(StudentAppointment),
    Employee(EmployeeAppointment),
    Visitor(VisitorAppointment),
}

impl AppointmentRecord {
    pub fn kind(&self) -> PatientKind {
        match self {
            AppointmentRecord::Student(_) => PatientKind::Student,
            AppointmentRecord::Employee(_) => PatientKind::Employee,
            AppointmentRecord::Visitor(_) => PatientKind::Visitor,
        }
    }

    pub fn visit(&self) -> &VisitDetails {
        match self {
            AppointmentRecord::Student(record) => &record.visit,
            AppointmentRecord::Employee(record) => &record.visit,
            AppointmentRecord::Visitor(record) => &record.visit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit(date: Option<&str>) -> VisitDetails {
        VisitDetails {
            allergies: String::new(),
            patient_notes: String::new(),
            infirmary: "Bloco A".to_string(),
            nurse: "Ana".to_string(),
            reason: "Dor de cabeça".to_string(),
            treatment: "Repouso".to_string(),
            notes: String::new(),
            revaluation: false,
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn employee_record_serializes_flat_without_date() {
        let record = AppointmentRecord::Employee(EmployeeAppointment {
            employee_id: "42".to_string(),
            visit: visit(None),
        });

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["employee_id"], "42");
        assert_eq!(json["infirmary"], "Bloco A");
        assert!(json.get("date").is_none());
        assert!(json.get("contact_parents").is_none());
    }

    #[test]
    fn student_record_carries_contact_parents_and_date() {
        let record = AppointmentRecord::Student(StudentAppointment {
            student_id: "7".to_string(),
            current_class: "3A".to_string(),
            contact_parents: true,
            visit: visit(Some("2024-01-01T10:00:00.000Z")),
        });

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["contact_parents"], true);
        assert_eq!(json["date"], "2024-01-01T10:00:00.000Z");
        assert_eq!(record.kind(), PatientKind::Student);
    }
}
