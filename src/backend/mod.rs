//! Seams between the view models and the infirmary server.
//!
//! Services only see these traits; [`http::HttpBackend`] implements them over
//! HTTP and tests substitute fakes or the mockall mock.

use crate::backend::errors::BackendResult;
use crate::domain::appointment::AppointmentRecord;
use crate::domain::chart::ChartData;
use crate::domain::patient::{PatientKind, SearchResult};
use crate::domain::report::{RecordPageResponse, ReportResponse, ReportSubmission};
use crate::domain::session::SessionContext;
use crate::dto::main::{RecordStatusDto, UserInfoDto};
use crate::forms::lookup::RecordLookup;

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod session;

pub use http::HttpBackend;
pub use session::{FileSessionStore, MemorySessionStore};

pub trait PatientSearcher {
    /// Name search of one patient kind, rows in server order.
    fn search_by_name(&self, kind: PatientKind, query: &str) -> BackendResult<Vec<SearchResult>>;
}

pub trait ReportGateway {
    /// Reads the hidden CSRF token rendered into the report form.
    fn report_token(&self) -> BackendResult<String>;
    fn submit_report(&self, submission: &ReportSubmission) -> BackendResult<ReportResponse>;
}

pub trait AppointmentWriter {
    fn record_appointment(&self, record: &AppointmentRecord) -> BackendResult<RecordStatusDto>;
}

pub trait RecordPages {
    /// Visit history page of the patient matching `lookup`.
    fn record_page(
        &self,
        kind: PatientKind,
        lookup: &RecordLookup,
    ) -> BackendResult<RecordPageResponse>;
}

pub trait UserDirectory {
    fn current_user(&self) -> BackendResult<UserInfoDto>;
}

pub trait ChartSource {
    fn chart_data(&self) -> BackendResult<ChartData>;
}

pub trait CookieMirror {
    /// Installs a `name=value; path=/` cookie sent with subsequent requests.
    fn mirror_cookie(&self, cookie: &str) -> BackendResult<()>;
}

pub trait SessionStore {
    fn load_session(&self) -> BackendResult<SessionContext>;
    fn save_session(&self, session: &SessionContext) -> BackendResult<()>;
}
