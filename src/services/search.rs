//! Search-as-you-type over one patient kind.

use serde::Serialize;

use crate::backend::PatientSearcher;
use crate::backend::errors::BackendError;
use crate::domain::patient::{PatientKind, SearchResult};
use crate::domain::search::{MIN_QUERY_LEN, QueryState, RequestSeq, SearchTicket};

/// What the bound widgets should show.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct SearchView {
    /// Rows of the shared results table, in response order.
    pub rows: Vec<SearchResult>,
    /// Whether the results container is shown.
    pub visible: bool,
    pub name_field: String,
    pub registry_field: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query too short; nothing was sent and the results are hidden.
    Hidden,
    /// The response was the latest one and is now displayed.
    Applied { rows: usize },
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
    /// The request failed; the view is unchanged.
    Failed,
}

/// Controller of the name field, registry field and results table of one kind.
#[derive(Debug)]
pub struct SearchController {
    kind: PatientKind,
    min_query_len: usize,
    last_issued: RequestSeq,
    query: Option<QueryState>,
    view: SearchView,
}

impl SearchController {
    pub fn new(kind: PatientKind) -> Self {
        Self::with_min_query_len(kind, MIN_QUERY_LEN)
    }

    pub fn with_min_query_len(kind: PatientKind, min_query_len: usize) -> Self {
        Self {
            kind,
            min_query_len,
            last_issued: RequestSeq::default(),
            query: None,
            view: SearchView::default(),
        }
    }

    pub fn kind(&self) -> PatientKind {
        self.kind
    }

    pub fn view(&self) -> &SearchView {
        &self.view
    }

    pub fn query(&self) -> Option<&QueryState> {
        self.query.as_ref()
    }

    pub fn last_issued(&self) -> RequestSeq {
        self.last_issued
    }

    fn hide(&mut self) {
        self.view.rows.clear();
        self.view.visible = false;
    }

    /// Handles one keystroke in the name field.
    ///
    /// Every keystroke supersedes the requests issued before it. Returns the
    /// ticket of the request to send, or `None` when the query is too short.
    pub fn keystroke(&mut self, input: &str) -> Option<SearchTicket> {
        let query = QueryState::new(self.kind, input);
        self.view.name_field = input.to_string();
        self.last_issued = self.last_issued.next();

        let ticket = if query.is_searchable(self.min_query_len) {
            Some(SearchTicket {
                seq: self.last_issued,
                kind: self.kind,
                query: query.trimmed().to_string(),
            })
        } else {
            self.hide();
            None
        };
        self.query = Some(query);
        ticket
    }

    /// Applies a response if it answers the latest issued request.
    pub fn apply(&mut self, ticket: &SearchTicket, results: Vec<SearchResult>) -> SearchOutcome {
        if ticket.seq != self.last_issued {
            log::debug!(
                "Discarding {} search #{} for {:?}, latest is #{}",
                self.kind,
                ticket.seq.get(),
                ticket.query,
                self.last_issued.get()
            );
            return SearchOutcome::Stale;
        }

        if results.is_empty() {
            self.hide();
        } else {
            self.view.rows = results;
            self.view.visible = true;
        }
        SearchOutcome::Applied {
            rows: self.view.rows.len(),
        }
    }

    /// Records a failed request; the current view is left as it was.
    pub fn fail(&mut self, ticket: &SearchTicket, err: &BackendError) -> SearchOutcome {
        log::error!(
            "Search #{} for {:?} failed: {err}",
            ticket.seq.get(),
            ticket.query
        );
        SearchOutcome::Failed
    }

    /// Keystroke, request and response in one call.
    pub fn search<B>(&mut self, backend: &B, input: &str) -> SearchOutcome
    where
        B: PatientSearcher + ?Sized,
    {
        let Some(ticket) = self.keystroke(input) else {
            return SearchOutcome::Hidden;
        };
        match backend.search_by_name(ticket.kind, &ticket.query) {
            Ok(results) => self.apply(&ticket, results),
            Err(err) => self.fail(&ticket, &err),
        }
    }

    /// Selects a result row.
    ///
    /// The name field is cleared instead of being filled with the selected
    /// name; homonyms are left for the user to tell apart by typing more.
    pub fn select(&mut self, index: usize) -> Option<SearchResult> {
        let Some(row) = self.view.rows.get(index).cloned() else {
            log::warn!("No {} result row at index {index}", self.kind);
            return None;
        };
        self.view.registry_field = row.registry_cell().to_string();
        self.view.name_field.clear();
        self.hide();
        Some(row)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::backend::errors::BackendResult;
    use crate::backend::mock::MockBackend;
    use crate::domain::patient::StudentMatch;
    use crate::domain::types::Registry;

    #[derive(Default)]
    struct RecordingSearcher {
        queries: RefCell<Vec<String>>,
        results: Vec<SearchResult>,
    }

    impl PatientSearcher for RecordingSearcher {
        fn search_by_name(
            &self,
            _kind: PatientKind,
            query: &str,
        ) -> BackendResult<Vec<SearchResult>> {
            self.queries.borrow_mut().push(query.to_string());
            Ok(self.results.clone())
        }
    }

    fn student(name: &str, registry: &str) -> SearchResult {
        SearchResult::Student(StudentMatch {
            name: name.to_string(),
            registry: Registry::new(registry).unwrap(),
            age: Some(12),
            current_class: Some("7A".to_string()),
        })
    }

    #[test]
    fn short_queries_send_nothing_and_hide_results() {
        let searcher = RecordingSearcher {
            results: vec![student("Ana", "RA1")],
            ..Default::default()
        };
        let mut controller = SearchController::new(PatientKind::Student);

        for input in ["a", "an", " an  ", ""] {
            assert_eq!(controller.search(&searcher, input), SearchOutcome::Hidden);
        }

        assert!(searcher.queries.borrow().is_empty());
        assert!(!controller.view().visible);
    }

    #[test]
    fn each_qualifying_keystroke_sends_one_request() {
        let searcher = RecordingSearcher {
            results: vec![student("Ana Clara", "RA1")],
            ..Default::default()
        };
        let mut controller = SearchController::new(PatientKind::Student);

        for input in ["a", "an", "ana", "ana ", "ana c"] {
            controller.search(&searcher, input);
        }

        assert_eq!(
            *searcher.queries.borrow(),
            vec!["ana".to_string(), "ana".to_string(), "ana c".to_string()]
        );
    }

    #[test]
    fn results_are_shown_in_response_order() {
        let searcher = RecordingSearcher {
            results: vec![student("Bruno", "RA2"), student("Ana", "RA1")],
            ..Default::default()
        };
        let mut controller = SearchController::new(PatientKind::Student);

        let outcome = controller.search(&searcher, "anb");

        assert_eq!(outcome, SearchOutcome::Applied { rows: 2 });
        let view = controller.view();
        assert!(view.visible);
        assert_eq!(view.rows[0].name(), "Bruno");
        assert_eq!(view.rows[1].name(), "Ana");
    }

    #[test]
    fn empty_response_hides_previous_results() {
        let mut controller = SearchController::new(PatientKind::Student);
        let ticket = controller.keystroke("ana").unwrap();
        controller.apply(&ticket, vec![student("Ana", "RA1")]);

        let ticket = controller.keystroke("anaz").unwrap();
        let outcome = controller.apply(&ticket, Vec::new());

        assert_eq!(outcome, SearchOutcome::Applied { rows: 0 });
        assert!(!controller.view().visible);
        assert!(controller.view().rows.is_empty());
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut controller = SearchController::new(PatientKind::Student);
        let first = controller.keystroke("ana").unwrap();
        let second = controller.keystroke("ana c").unwrap();

        let newest = controller.apply(&second, vec![student("Ana Clara", "RA7")]);
        let late = controller.apply(&first, vec![student("Ana", "RA1"), student("Anabel", "RA3")]);

        assert_eq!(newest, SearchOutcome::Applied { rows: 1 });
        assert_eq!(late, SearchOutcome::Stale);
        assert_eq!(controller.view().rows, vec![student("Ana Clara", "RA7")]);
    }

    #[test]
    fn shortening_the_query_supersedes_pending_requests() {
        let mut controller = SearchController::new(PatientKind::Student);
        let pending = controller.keystroke("ana").unwrap();
        assert!(controller.keystroke("an").is_none());

        let outcome = controller.apply(&pending, vec![student("Ana", "RA1")]);

        assert_eq!(outcome, SearchOutcome::Stale);
        assert!(!controller.view().visible);
    }

    #[test]
    fn selecting_a_row_copies_registry_and_clears_name() {
        let searcher = RecordingSearcher {
            results: vec![student("Ana", "RA1"), student("Ana", "RA9")],
            ..Default::default()
        };
        let mut controller = SearchController::new(PatientKind::Student);
        controller.search(&searcher, "Ana");

        let selected = controller.select(1).unwrap();

        let view = controller.view();
        assert_eq!(selected.registry_cell(), "RA9");
        assert_eq!(view.registry_field, "RA9");
        assert_eq!(view.name_field, "");
        assert!(!view.visible);
    }

    #[test]
    fn selecting_a_missing_row_is_a_no_op() {
        let mut controller = SearchController::new(PatientKind::Employee);

        assert_eq!(controller.select(0), None);
        assert_eq!(controller.view(), &SearchView::default());
    }

    #[test]
    fn transport_failure_leaves_view_untouched() {
        let mut backend = MockBackend::new();
        backend
            .expect_search_by_name()
            .times(1)
            .returning(|_, _| Err(BackendError::Transport("connection refused".into())));
        let mut controller = SearchController::new(PatientKind::Visitor);

        let outcome = controller.search(&backend, "Carlos");

        assert_eq!(outcome, SearchOutcome::Failed);
        assert!(!controller.view().visible);
        assert_eq!(controller.view().name_field, "Carlos");
    }
}
