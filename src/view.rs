//! Rendering of view models into HTML fragments and terminal text.

use serde::Serialize;
use tera::{Context, Tera};

use crate::alerts::{AlertLevel, Dialog, alert_level_to_str};
use crate::domain::patient::PatientKind;
use crate::forms::lookup::{INVALID_FIELD_CLASS, RecordLookupForm};
use crate::pagination::fragment_text;
use crate::services::appointment::RecordOutcome;
use crate::services::records::LookupOutcome;
use crate::services::report::ReportView;
use crate::services::search::SearchView;

const TEMPLATES: [(&str, &str); 7] = [
    (
        "components/alerts.html",
        include_str!("../templates/components/alerts.html"),
    ),
    (
        "components/dialog.txt",
        include_str!("../templates/components/dialog.txt"),
    ),
    (
        "records/lookup.html",
        include_str!("../templates/records/lookup.html"),
    ),
    (
        "report/results.html",
        include_str!("../templates/report/results.html"),
    ),
    (
        "report/results.txt",
        include_str!("../templates/report/results.txt"),
    ),
    (
        "search/results.html",
        include_str!("../templates/search/results.html"),
    ),
    (
        "search/results.txt",
        include_str!("../templates/search/results.txt"),
    ),
];

#[derive(Serialize)]
struct AlertBlock<'a> {
    level: &'static str,
    message: &'a str,
}

fn alert_blocks(level: AlertLevel, messages: &[String]) -> Vec<AlertBlock<'_>> {
    messages
        .iter()
        .map(|message| AlertBlock {
            level: alert_level_to_str(&level),
            message,
        })
        .collect()
}

fn error_blocks(errors: &[String]) -> Vec<AlertBlock<'_>> {
    alert_blocks(AlertLevel::Error, errors)
}

/// Compiled templates of every view.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    fn render(&self, template: &str, context: &Context) -> tera::Result<String> {
        self.tera.render(template, context).inspect_err(|err| {
            log::error!("Failed to render {template}: {err}");
        })
    }

    fn search_context(kind: PatientKind, view: &SearchView) -> Context {
        let rows: Vec<Vec<String>> = view.rows.iter().map(|row| row.cells()).collect();
        let mut context = Context::new();
        context.insert("kind", kind.search_segment());
        context.insert("visible", &view.visible);
        context.insert("rows", &rows);
        context
    }

    /// Results table of one search controller.
    pub fn search_results(&self, kind: PatientKind, view: &SearchView) -> tera::Result<String> {
        self.render("search/results.html", &Self::search_context(kind, view))
    }

    pub fn search_results_text(
        &self,
        kind: PatientKind,
        view: &SearchView,
    ) -> tera::Result<String> {
        self.render("search/results.txt", &Self::search_context(kind, view))
    }

    /// Error container plus results container of the report page.
    pub fn report(&self, view: &ReportView) -> tera::Result<String> {
        let mut context = Context::new();
        context.insert("alerts", &error_blocks(&view.errors));
        context.insert(
            "fragment",
            &view.fragment.as_ref().map(|fragment| fragment.html.as_str()),
        );
        self.render("report/results.html", &context)
    }

    pub fn report_text(&self, view: &ReportView) -> tera::Result<String> {
        let pages: Vec<String> = view
            .fragment
            .iter()
            .flat_map(|fragment| fragment.links.iter())
            .map(|link| link.page.to_string())
            .collect();
        let text = view
            .fragment
            .as_ref()
            .map(|fragment| fragment_text(&fragment.html).trim().to_string());

        let mut context = Context::new();
        context.insert("alerts", &error_blocks(&view.errors));
        context.insert("text", &text);
        context.insert("pages", &pages);
        self.render("report/results.txt", &context)
    }

    /// Record search form, with its error container and flagged inputs.
    pub fn lookup_form(
        &self,
        kind: PatientKind,
        form: &RecordLookupForm,
        outcome: Option<&LookupOutcome>,
    ) -> tera::Result<String> {
        let (errors, flagged): (&[String], &[&str]) = match outcome {
            Some(LookupOutcome::Invalid { errors, flagged }) => (errors, flagged),
            _ => (&[], &[]),
        };

        let mut context = Context::new();
        context.insert(
            "action",
            &format!("/reports/records/{}/", kind.record_segment()),
        );
        context.insert("name", &form.name);
        context.insert("registry", &form.registry);
        context.insert("alerts", &error_blocks(errors));
        context.insert("flagged", flagged);
        context.insert("invalid_class", INVALID_FIELD_CLASS);
        self.render("records/lookup.html", &context)
    }

    /// Inline notice left on a visit form after submitting it.
    pub fn record_notice(&self, outcome: &RecordOutcome) -> tera::Result<String> {
        let messages = [outcome.message().to_string()];
        let mut context = Context::new();
        context.insert("alerts", &alert_blocks(outcome.level(), &messages));
        self.render("components/alerts.html", &context)
    }

    pub fn dialog_text(&self, dialog: &Dialog) -> tera::Result<String> {
        let mut context = Context::new();
        context.insert("dialog", dialog);
        self.render("components/dialog.txt", &context)
    }
}
