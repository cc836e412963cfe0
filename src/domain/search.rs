use serde::Serialize;

use crate::domain::patient::PatientKind;

/// Minimum number of characters (after trimming) before a search is issued.
pub const MIN_QUERY_LEN: usize = 3;

/// Monotonically increasing number stamped on every issued search request.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Current free-text query and the field it was typed into.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct QueryState {
    pub kind: PatientKind,
    pub text: String,
}

impl QueryState {
    pub fn new(kind: PatientKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// The query as it is sent to the server.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Whether the query is long enough to be sent.
    pub fn is_searchable(&self, min_len: usize) -> bool {
        self.trimmed().chars().count() >= min_len
    }
}

/// A search request that has been issued but not yet answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: RequestSeq,
    pub kind: PatientKind,
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searchable_counts_trimmed_characters() {
        let kind = PatientKind::Student;
        assert!(!QueryState::new(kind, "  ab  ").is_searchable(MIN_QUERY_LEN));
        assert!(QueryState::new(kind, " abc").is_searchable(MIN_QUERY_LEN));
        assert!(QueryState::new(kind, "Zé ").is_searchable(2));
        assert!(QueryState::new(kind, "Joã").is_searchable(MIN_QUERY_LEN));
    }
}
