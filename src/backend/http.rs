//! HTTP client adapter talking to the infirmary web application.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use reqwest::Url;
use reqwest::blocking::{Client, Response, multipart};
use reqwest::cookie::Jar;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::Serialize;

use crate::backend::errors::{BackendError, BackendResult};
use crate::backend::{
    AppointmentWriter, ChartSource, CookieMirror, PatientSearcher, RecordPages, ReportGateway,
    UserDirectory,
};
use crate::domain::appointment::AppointmentRecord;
use crate::domain::chart::ChartData;
use crate::domain::patient::{PatientKind, SearchResult};
use crate::domain::report::{CSRF_FIELD, RecordPageResponse, ReportResponse, ReportSubmission};
use crate::dto::main::{RecordStatusDto, UserInfoDto};
use crate::dto::report::ReportErrorsDto;
use crate::dto::search::{NameSearchQuery, SearchResponseDto};
use crate::forms::lookup::RecordLookup;
use crate::models::config::ClientConfig;

static INPUT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<input\b[^>]*>").expect("valid regex"));
static NAME_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\sname\s*=\s*["']([^"']*)["']"#).expect("valid regex"));
static VALUE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\svalue\s*=\s*["']([^"']*)["']"#).expect("valid regex"));

const REQUESTED_WITH: &str = "XMLHttpRequest";

/// Value of the first `<input>` named `name` in `html`.
pub fn hidden_input_value(html: &str, name: &str) -> Option<String> {
    INPUT_TAG.find_iter(html).find_map(|tag| {
        let tag = tag.as_str();
        let tag_name = NAME_ATTR.captures(tag)?.get(1)?.as_str();
        if tag_name != name {
            return None;
        }
        Some(VALUE_ATTR.captures(tag)?.get(1)?.as_str().to_string())
    })
}

fn encode_query<T: Serialize>(query: &T) -> BackendResult<String> {
    serde_html_form::to_string(query).map_err(|e| BackendError::ValidationError(e.to_string()))
}

#[derive(Serialize)]
struct LoginForm<'a> {
    csrfmiddlewaretoken: &'a str,
    login: &'a str,
    password: &'a str,
}

/// Blocking client sharing one cookie jar across every request.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    report_path: String,
    login_path: String,
    cookies: Arc<Jar>,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> BackendResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| BackendError::ValidationError(format!("invalid base_url: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(concat!("infirmary-desk/", env!("CARGO_PKG_VERSION"))),
        );

        let cookies = Arc::new(Jar::default());
        let client = Client::builder()
            .default_headers(headers)
            .cookie_provider(cookies.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            report_path: config.report_path.clone(),
            login_path: config.login_path.clone(),
            cookies,
        })
    }

    fn url(&self, path: &str) -> BackendResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| BackendError::ValidationError(format!("invalid path {path}: {e}")))
    }

    fn url_with_query<T: Serialize>(&self, path: &str, query: &T) -> BackendResult<Url> {
        let mut url = self.url(path)?;
        url.set_query(Some(&encode_query(query)?));
        Ok(url)
    }

    fn get_text(&self, url: Url) -> BackendResult<String> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.text()?)
    }

    fn form_token(&self, path: &str) -> BackendResult<String> {
        let page = self.get_text(self.url(path)?)?;
        hidden_input_value(&page, CSRF_FIELD)
            .ok_or_else(|| BackendError::MissingElement(CSRF_FIELD.to_string()))
    }

    /// Signs in through the account login form; the session cookie stays in the jar.
    pub fn sign_in(&self, login: &str, password: &str) -> BackendResult<()> {
        let token = self.form_token(&self.login_path)?;
        let login_url = self.url(&self.login_path)?;
        let body = encode_query(&LoginForm {
            csrfmiddlewaretoken: &token,
            login,
            password,
        })?;

        let response = self
            .client
            .post(login_url.clone())
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::REFERER, login_url.as_str())
            .header("X-CSRFToken", token.as_str())
            .body(body)
            .send()?
            .error_for_status()?;

        if response.url().path() == login_url.path() {
            return Err(BackendError::ValidationError(
                "login rejected by the server".to_string(),
            ));
        }
        log::info!("Signed in as {login}");
        Ok(())
    }

    fn read_report_response(response: Response) -> BackendResult<ReportResponse> {
        let status = response.status().as_u16();
        let body = response.text()?;
        decode_report(status, body)
    }
}

/// Successful bodies are the results fragment; others must carry `errors`.
fn decode_report(status: u16, body: String) -> BackendResult<ReportResponse> {
    if (200..300).contains(&status) {
        return Ok(ReportResponse::Fragment(body));
    }

    let payload: ReportErrorsDto = serde_json::from_str(&body)?;
    match payload.errors {
        Some(errors) => Ok(ReportResponse::Rejected(errors)),
        None => Err(BackendError::Status { status, body }),
    }
}

/// Record pages are HTML; refusals come as a JSON status body.
fn decode_record_page(status: u16, body: String) -> BackendResult<RecordPageResponse> {
    if (200..300).contains(&status) {
        return Ok(RecordPageResponse::Page(body));
    }

    let payload: RecordStatusDto = serde_json::from_str(&body)?;
    match payload.message {
        Some(message) if !payload.is_success() => Ok(RecordPageResponse::Rejected(message)),
        _ => Err(BackendError::Status { status, body }),
    }
}

impl PatientSearcher for HttpBackend {
    fn search_by_name(&self, kind: PatientKind, query: &str) -> BackendResult<Vec<SearchResult>> {
        let path = format!("/patients/{}/search/name/", kind.search_segment());
        let url = self.url_with_query(&path, &NameSearchQuery { q: query })?;
        log::debug!("GET {url}");

        let payload: SearchResponseDto = self.client.get(url).send()?.error_for_status()?.json()?;

        let mut results = Vec::with_capacity(payload.results.len());
        for row in payload.results {
            match row.into_result(kind) {
                Ok(result) => results.push(result),
                Err(err) => log::warn!("Skipping malformed {kind} search row: {err}"),
            }
        }
        Ok(results)
    }
}

impl ReportGateway for HttpBackend {
    fn report_token(&self) -> BackendResult<String> {
        self.form_token(&self.report_path)
    }

    fn submit_report(&self, submission: &ReportSubmission) -> BackendResult<ReportResponse> {
        let url = self.url(&submission.action)?;
        let form = submission
            .fields()
            .into_iter()
            .fold(multipart::Form::new(), |form, (name, value)| {
                form.text(name, value)
            });
        log::debug!("POST {url} page={}", submission.page);

        let response = self
            .client
            .post(url.clone())
            .header("X-CSRFToken", submission.csrf_token.as_str())
            .header("X-Requested-With", REQUESTED_WITH)
            .header(header::REFERER, url.as_str())
            .multipart(form)
            .send()?;

        Self::read_report_response(response)
    }
}

impl AppointmentWriter for HttpBackend {
    fn record_appointment(&self, record: &AppointmentRecord) -> BackendResult<RecordStatusDto> {
        let path = format!("/appointments/{}/record/", record.kind().record_segment());
        let url = self.url(&path)?;
        log::debug!("POST {url}");

        let status = self.client.post(url).json(record).send()?.json()?;
        Ok(status)
    }
}

impl RecordPages for HttpBackend {
    fn record_page(
        &self,
        kind: PatientKind,
        lookup: &RecordLookup,
    ) -> BackendResult<RecordPageResponse> {
        if kind == PatientKind::Visitor {
            return Err(BackendError::ValidationError(
                "visitors have no record page".to_string(),
            ));
        }
        let path = format!("/reports/records/{}/", kind.record_segment());
        let url = self.url_with_query(&path, lookup)?;
        log::debug!("GET {url}");

        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        decode_record_page(status, response.text()?)
    }
}

impl UserDirectory for HttpBackend {
    fn current_user(&self) -> BackendResult<UserInfoDto> {
        let user = self.client.get(self.url("/get_user/")?).send()?.json()?;
        Ok(user)
    }
}

impl ChartSource for HttpBackend {
    fn chart_data(&self) -> BackendResult<ChartData> {
        let data = self
            .client
            .get(self.url("/get_chart_data/")?)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(data)
    }
}

impl CookieMirror for HttpBackend {
    fn mirror_cookie(&self, cookie: &str) -> BackendResult<()> {
        self.cookies.add_cookie_str(cookie, &self.base_url);
        Ok(())
    }
}
