//! Mock backend implementations for isolating services in tests.

use mockall::mock;

use crate::backend::errors::BackendResult;
use crate::backend::{
    AppointmentWriter, ChartSource, CookieMirror, PatientSearcher, RecordPages, ReportGateway,
    SessionStore, UserDirectory,
};
use crate::domain::appointment::AppointmentRecord;
use crate::domain::chart::ChartData;
use crate::domain::patient::{PatientKind, SearchResult};
use crate::domain::report::{RecordPageResponse, ReportResponse, ReportSubmission};
use crate::domain::session::SessionContext;
use crate::dto::main::{RecordStatusDto, UserInfoDto};
use crate::forms::lookup::RecordLookup;

mock! {
    pub Backend {}

    impl PatientSearcher for Backend {
        fn search_by_name(&self, kind: PatientKind, query: &str) -> BackendResult<Vec<SearchResult>>;
    }

    impl ReportGateway for Backend {
        fn report_token(&self) -> BackendResult<String>;
        fn submit_report(&self, submission: &ReportSubmission) -> BackendResult<ReportResponse>;
    }

    impl AppointmentWriter for Backend {
        fn record_appointment(&self, record: &AppointmentRecord) -> BackendResult<RecordStatusDto>;
    }

    impl RecordPages for Backend {
        fn record_page(&self, kind: PatientKind, lookup: &RecordLookup) -> BackendResult<RecordPageResponse>;
    }

    impl UserDirectory for Backend {
        fn current_user(&self) -> BackendResult<UserInfoDto>;
    }

    impl ChartSource for Backend {
        fn chart_data(&self) -> BackendResult<ChartData>;
    }

    impl CookieMirror for Backend {
        fn mirror_cookie(&self, cookie: &str) -> BackendResult<()>;
    }

    impl SessionStore for Backend {
        fn load_session(&self) -> BackendResult<SessionContext>;
        fn save_session(&self, session: &SessionContext) -> BackendResult<()>;
    }
}
