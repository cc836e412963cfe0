//! Filtered, paginated report of past appointments.

use serde::Serialize;

use crate::backend::ReportGateway;
use crate::domain::report::{ReportResponse, ReportSubmission};
use crate::domain::types::PageNumber;
use crate::forms::report::ReportForm;
use crate::pagination::{PageLink, ReportFragment};

pub const GENERIC_REPORT_ERROR: &str = "Ocorreu um erro ao processar a requisição.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PagerOutcome {
    /// Local validation failed; nothing was sent.
    Invalid,
    /// The fragment of `page` replaced the results.
    Rendered { page: PageNumber },
    /// The server answered with its own error list.
    Rejected,
    /// Transport or decoding failure; one generic error is shown.
    Failed,
    /// The link came from a fragment that has since been replaced.
    StaleLink,
}

/// What the bound report page should show.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ReportView {
    /// One alert block per entry.
    pub errors: Vec<String>,
    /// Current content of the results container.
    pub fragment: Option<ReportFragment>,
    pub page: PageNumber,
}

/// Drives the report form and the pagination links of its results.
#[derive(Debug)]
pub struct ReportPager {
    action: String,
    form: ReportForm,
    view: ReportView,
    generation: u64,
}

impl ReportPager {
    /// A form without a CSRF token gets the served one on its first valid submission.
    pub fn new(action: impl Into<String>, form: ReportForm) -> Self {
        Self {
            action: action.into(),
            form,
            view: ReportView::default(),
            generation: 0,
        }
    }

    pub fn form(&self) -> &ReportForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ReportForm {
        &mut self.form
    }

    pub fn view(&self) -> &ReportView {
        &self.view
    }

    /// Links of the fragment currently displayed.
    pub fn links(&self) -> &[PageLink] {
        self.view
            .fragment
            .as_ref()
            .map(|fragment| fragment.links.as_slice())
            .unwrap_or_default()
    }

    /// Form submission: always requests the first page.
    pub fn submit<B>(&mut self, backend: &B) -> PagerOutcome
    where
        B: ReportGateway + ?Sized,
    {
        self.request_page(backend, PageNumber::FIRST)
    }

    /// Pagination-link activation.
    pub fn activate<B>(&mut self, backend: &B, link: &PageLink) -> PagerOutcome
    where
        B: ReportGateway + ?Sized,
    {
        let is_current = self
            .view
            .fragment
            .as_ref()
            .is_some_and(|fragment| fragment.owns(link));
        if !is_current {
            log::debug!(
                "Ignoring page link from fragment #{}, showing #{}",
                link.generation(),
                self.generation
            );
            return PagerOutcome::StaleLink;
        }
        self.request_page(backend, link.page)
    }

    fn request_page<B>(&mut self, backend: &B, page: PageNumber) -> PagerOutcome
    where
        B: ReportGateway + ?Sized,
    {
        self.view.errors.clear();

        let filter = match self.form.to_filter() {
            Ok(filter) => filter,
            Err(err) => {
                self.view.errors = err.messages();
                return PagerOutcome::Invalid;
            }
        };

        if self.form.csrf_token.trim().is_empty() {
            match backend.report_token() {
                Ok(token) => self.form.csrf_token = token,
                Err(err) => {
                    log::error!("Failed to read the report form token: {err}");
                    self.view.errors = vec![GENERIC_REPORT_ERROR.to_string()];
                    return PagerOutcome::Failed;
                }
            }
        }

        let submission = ReportSubmission::new(
            self.action.clone(),
            self.form.csrf_token.trim(),
            filter,
            page,
        );

        match backend.submit_report(&submission) {
            Ok(ReportResponse::Fragment(html)) => {
                self.generation += 1;
                self.view.fragment = Some(ReportFragment::new(&html, self.generation));
                self.view.page = page;
                PagerOutcome::Rendered { page }
            }
            Ok(ReportResponse::Rejected(errors)) => {
                self.view.errors = errors;
                PagerOutcome::Rejected
            }
            Err(err) => {
                log::error!("Report request for page {page} failed: {err}");
                self.view.errors = vec![GENERIC_REPORT_ERROR.to_string()];
                PagerOutcome::Failed
            }
        }
    }
}
