//! Terminal front end binding the view models to subcommands.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::alerts::{AlertKind, present};
use crate::backend::{FileSessionStore, HttpBackend};
use crate::domain::patient::PatientKind;
use crate::domain::types::PageNumber;
use crate::forms::appointment::AppointmentForm;
use crate::forms::lookup::RecordLookupForm;
use crate::forms::report::ReportForm;
use crate::models::config::ClientConfig;
use crate::pagination::fragment_text;
use crate::services::appointment::{RecordOutcome, record_appointment};
use crate::services::chart::load_chart;
use crate::services::records::{LookupOutcome, open_record_page};
use crate::services::report::{PagerOutcome, ReportPager};
use crate::services::search::{SearchController, SearchOutcome};
use crate::services::session::{load_user, restore_session, select_infirmary};
use crate::view::Renderer;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "infirmary-desk",
    version,
    about = "Terminal desk for the infirmary record-keeping service",
    long_about = "Searches patients, records visits and browses the appointment report of an infirmary server.\n\nExamples:\n  infirmary-desk infirmary \"Bloco A\"\n  infirmary-desk search employees mar\n  infirmary-desk report --begin 2024-01-01 --end 2024-01-31 -i \"Bloco A\" --page 2"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Searches patients of one kind by name.
    Search {
        #[arg(value_name = "KIND", help = "students, employees or visitors.")]
        kind: PatientKind,
        #[arg(value_name = "QUERY")]
        query: String,
    },
    /// Searches and selects one row, printing the registry it fills in.
    Select {
        #[arg(value_name = "KIND")]
        kind: PatientKind,
        #[arg(value_name = "QUERY")]
        query: String,
        #[arg(long = "row", default_value_t = 0, help = "Zero-based row to select.")]
        row: usize,
    },
    /// Chooses the infirmary of this session.
    Infirmary {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Prints the logged-in user's first name.
    Whoami,
    /// Runs the appointment report.
    Report {
        #[arg(long = "begin", value_name = "DATE", default_value = "")]
        date_begin: String,
        #[arg(long = "end", value_name = "DATE", default_value = "")]
        date_end: String,
        #[arg(
            short = 'i',
            long = "infirmary",
            value_name = "NAME",
            action = clap::ArgAction::Append,
            help = "Infirmary to include (repeatable)."
        )]
        infirmaries: Vec<String>,
        #[arg(long = "term", value_name = "TEXT", default_value = "")]
        search_term: String,
        #[arg(long = "page", default_value_t = PageNumber::FIRST, help = "Page reached through the result links.")]
        page: PageNumber,
    },
    /// Records a visit described by a JSON form file.
    Record {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Opens the visit history of a patient.
    Lookup {
        #[arg(value_name = "KIND")]
        kind: PatientKind,
        #[arg(long = "name", default_value = "")]
        name: String,
        #[arg(long = "registry", default_value = "")]
        registry: String,
    },
    /// Prints the dashboard chart configuration.
    Chart,
    /// Shows one of the page dialogs.
    Alert {
        #[arg(value_name = "NAME")]
        name: String,
        #[arg(long = "message")]
        message: Option<String>,
    },
}

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

/// Executes one subcommand against the configured server.
pub fn run(config: &ClientConfig, backend: &HttpBackend, command: Command) -> std::io::Result<()> {
    let renderer = Renderer::new().map_err(|e| io_error("Template parsing error(s)", e))?;
    let store = FileSessionStore::new(&config.session_file);
    let mut session =
        restore_session(&store, backend).map_err(|e| io_error("Failed to restore session", e))?;

    match command {
        Command::Search { kind, query } => {
            let mut controller = SearchController::with_min_query_len(kind, config.min_query_len);
            if controller.search(backend, &query) == SearchOutcome::Failed {
                return Err(io_error("Search failed", kind));
            }
            let text = renderer
                .search_results_text(kind, controller.view())
                .map_err(|e| io_error("Rendering failed", e))?;
            print!("{text}");
        }
        Command::Select { kind, query, row } => {
            let mut controller = SearchController::with_min_query_len(kind, config.min_query_len);
            controller.search(backend, &query);
            match controller.select(row) {
                Some(selected) => println!("{}\t{}", controller.view().registry_field, selected.name()),
                None => return Err(io_error("No such row", row)),
            }
        }
        Command::Infirmary { name } => {
            let label = select_infirmary(&store, backend, &mut session, &name)
                .map_err(|e| io_error("Failed to select infirmary", e))?;
            println!("{label}");
        }
        Command::Whoami => {
            if let Some(name) = load_user(backend, &store, &mut session) {
                println!("{name}");
            }
        }
        Command::Report {
            date_begin,
            date_end,
            infirmaries,
            search_term,
            page,
        } => {
            let form = ReportForm {
                csrf_token: String::new(),
                date_begin,
                date_end,
                infirmaries,
                search_term,
            };
            let mut pager = ReportPager::new(config.report_path.clone(), form);
            let mut outcome = pager.submit(backend);
            // Pages are only reachable through links of the current fragment.
            while matches!(outcome, PagerOutcome::Rendered { page: shown } if shown < page) {
                let next = pager
                    .links()
                    .iter()
                    .filter(|link| link.page <= page)
                    .max_by_key(|link| link.page.get())
                    .cloned();
                match next {
                    Some(link) if link.page > pager.view().page => {
                        outcome = pager.activate(backend, &link);
                    }
                    _ => {
                        log::error!("Page {page} is not linked from page {}", pager.view().page);
                        break;
                    }
                }
            }
            let text = renderer
                .report_text(pager.view())
                .map_err(|e| io_error("Rendering failed", e))?;
            print!("{text}");
            if !matches!(outcome, PagerOutcome::Rendered { .. }) {
                return Err(io_error("Report not shown", pager.view().errors.join(" ")));
            }
        }
        Command::Record { file } => {
            let raw = fs::read_to_string(&file)
                .map_err(|e| io_error(&format!("Failed to read {}", file.display()), e))?;
            let form: AppointmentForm =
                serde_json::from_str(&raw).map_err(|e| io_error("Invalid visit form", e))?;
            let outcome = record_appointment(backend, &session, form, Utc::now())
                .map_err(|e| io_error("Visit not recorded", e))?;
            let text = renderer
                .dialog_text(&present(&outcome.alert()))
                .map_err(|e| io_error("Rendering failed", e))?;
            print!("{text}");
            if !matches!(outcome, RecordOutcome::Saved { .. }) {
                return Err(io_error("Visit not recorded", outcome.message()));
            }
        }
        Command::Lookup {
            kind,
            name,
            registry,
        } => {
            let outcome = open_record_page(backend, kind, RecordLookupForm { name, registry });
            match &outcome {
                LookupOutcome::Opened { html } => println!("{}", fragment_text(html).trim()),
                LookupOutcome::Invalid { errors, .. } => {
                    return Err(io_error("Record not opened", errors.join(" ")));
                }
                LookupOutcome::Rejected { .. } | LookupOutcome::Failed => {
                    if let Some(alert) = outcome.alert() {
                        let text = renderer
                            .dialog_text(&present(&alert))
                            .map_err(|e| io_error("Rendering failed", e))?;
                        print!("{text}");
                    }
                    return Err(io_error("Record not opened", kind));
                }
            }
        }
        Command::Chart => {
            if let Some(chart) = load_chart(backend) {
                let json = serde_json::to_string_pretty(&chart)
                    .map_err(|e| io_error("Failed to encode chart", e))?;
                println!("{json}");
            }
        }
        Command::Alert { name, message } => {
            let kind = AlertKind::from_name(&name, message.as_deref())
                .map_err(|e| io_error("Unknown dialog", e))?;
            let text = renderer
                .dialog_text(&present(&kind))
                .map_err(|e| io_error("Rendering failed", e))?;
            print!("{text}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::lookup::LOOKUP_REQUIRED;
    use crate::forms::report::DATE_BEGIN_REQUIRED;
    use crate::services::report::GENERIC_REPORT_ERROR;

    #[test]
    fn report_arguments_are_parsed() {
        let args = CliArgs::try_parse_from([
            "infirmary-desk",
            "report",
            "--begin",
            "2024-01-01",
            "--end",
            "2024-01-31",
            "-i",
            "Bloco A",
            "-i",
            "Bloco B",
            "--page",
            "2",
        ])
        .unwrap();

        match args.command {
            Command::Report {
                infirmaries, page, ..
            } => {
                assert_eq!(infirmaries, vec!["Bloco A", "Bloco B"]);
                assert_eq!(page.get(), 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn search_kind_accepts_plural_segment() {
        let args = CliArgs::try_parse_from(["infirmary-desk", "search", "visitors", "ana"]).unwrap();

        assert!(matches!(
            args.command,
            Command::Search {
                kind: PatientKind::Visitor,
                ..
            }
        ));
    }

    fn unreachable_server() -> (tempfile::TempDir, ClientConfig, HttpBackend) {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 1,
            report_path: "/reports/".to_string(),
            login_path: "/accounts/login/".to_string(),
            session_file: dir.path().join("session.json").display().to_string(),
            min_query_len: 3,
            username: None,
            password: None,
        };
        let backend = HttpBackend::new(&config).unwrap();
        (dir, config, backend)
    }

    #[test]
    fn invalid_report_filter_is_reported_without_contacting_the_server() {
        let (_dir, config, backend) = unreachable_server();
        let command = Command::Report {
            date_begin: String::new(),
            date_end: "2024-01-01".to_string(),
            infirmaries: vec!["A".to_string()],
            search_term: String::new(),
            page: PageNumber::FIRST,
        };

        let err = run(&config, &backend, command).unwrap_err();

        assert!(err.to_string().contains(DATE_BEGIN_REQUIRED), "{err}");
    }

    #[test]
    fn failed_report_is_an_error() {
        let (_dir, config, backend) = unreachable_server();
        let command = Command::Report {
            date_begin: "2024-01-01".to_string(),
            date_end: "2024-01-31".to_string(),
            infirmaries: vec!["A".to_string()],
            search_term: String::new(),
            page: PageNumber::FIRST,
        };

        let err = run(&config, &backend, command).unwrap_err();

        assert!(err.to_string().contains(GENERIC_REPORT_ERROR), "{err}");
    }

    #[test]
    fn blank_lookup_is_reported_without_contacting_the_server() {
        let (_dir, config, backend) = unreachable_server();
        let command = Command::Lookup {
            kind: PatientKind::Student,
            name: " ".to_string(),
            registry: String::new(),
        };

        let err = run(&config, &backend, command).unwrap_err();

        assert!(err.to_string().contains(LOOKUP_REQUIRED), "{err}");
    }

    #[test]
    fn page_zero_is_refused() {
        assert!(CliArgs::try_parse_from(["infirmary-desk", "report", "--page", "0"]).is_err());
    }
}
