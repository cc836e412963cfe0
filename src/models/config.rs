//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::domain::search::MIN_QUERY_LEN;

fn default_timeout_secs() -> u64 {
    10
}

fn default_report_path() -> String {
    "/reports/".to_string()
}

fn default_login_path() -> String {
    "/accounts/login/".to_string()
}

fn default_session_file() -> String {
    ".infirmary-session.json".to_string()
}

fn default_min_query_len() -> usize {
    MIN_QUERY_LEN
}

#[derive(Clone, Debug, Deserialize)]
/// Settings of the infirmary client.
pub struct ClientConfig {
    /// Root of the infirmary web application, e.g. `http://localhost:8000`.
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Action of the report form.
    #[serde(default = "default_report_path")]
    pub report_path: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Where the session context is kept between invocations.
    #[serde(default = "default_session_file")]
    pub session_file: String,
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}
