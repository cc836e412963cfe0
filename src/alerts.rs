//! Modal dialogs and inline alert levels.
//!
//! [`present`] turns an [`AlertKind`] into the static configuration of the
//! modal primitive. Only the timed dialog reports back how it was dismissed.

use std::str::FromStr;

use serde::Serialize;

use crate::domain::types::TypeConstraintError;

/// Lifetime of the self-dismissing dialog.
pub const AUTO_CLOSE_MS: u64 = 2000;

const PRIMARY_BUTTON: &str = "btn btn-primary";
const DANGER_BUTTON: &str = "btn btn-danger";

/// Severity of an inline alert block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertLevel {
    Error,
    Success,
}

/// Bootstrap contextual class of an alert level (`alert alert-{level}`).
pub fn alert_level_to_str(level: &AlertLevel) -> &'static str {
    match level {
        AlertLevel::Error => "danger",
        AlertLevel::Success => "success",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Basic(String),
    /// Error reported by the server; the title is fixed.
    ErrorMessage(String),
    TitleAndText { title: String, text: String },
    SuccessMessage,
    AutoClose,
    WarningMessageAndCancel,
    PasswordPrompt,
}

impl AlertKind {
    /// Resolves the dialog names used by the page scripts.
    pub fn from_name(name: &str, message: Option<&str>) -> Result<Self, TypeConstraintError> {
        let kind = match name {
            "basic" => AlertKind::Basic(
                message
                    .unwrap_or("Any fool can use a computer")
                    .to_string(),
            ),
            "error-message" => AlertKind::ErrorMessage(message.unwrap_or_default().to_string()),
            "title-and-text" => AlertKind::TitleAndText {
                title: "Read the alert!".to_string(),
                text: message.unwrap_or("Click OK to close this alert").to_string(),
            },
            "success-message" => AlertKind::SuccessMessage,
            "auto-close" => AlertKind::AutoClose,
            "warning-message-and-cancel" => AlertKind::WarningMessageAndCancel,
            "custom-html" => AlertKind::PasswordPrompt,
            other => return Err(TypeConstraintError::InvalidValue(other.to_string())),
        };
        Ok(kind)
    }
}

impl FromStr for AlertKind {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s, None)
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DialogIcon {
    Error,
    Success,
    Warning,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ButtonRole {
    Confirm,
    Cancel,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DialogButton {
    pub role: ButtonRole,
    pub text: &'static str,
    /// Value the dialog resolves with; `None` for cancel.
    pub value: Option<bool>,
    pub class_name: &'static str,
    pub close_modal: bool,
}

impl DialogButton {
    fn confirm(text: &'static str) -> Self {
        Self {
            role: ButtonRole::Confirm,
            text,
            value: Some(true),
            class_name: PRIMARY_BUTTON,
            close_modal: true,
        }
    }

    fn cancel(text: &'static str) -> Self {
        Self {
            role: ButtonRole::Cancel,
            text,
            value: None,
            class_name: DANGER_BUTTON,
            close_modal: true,
        }
    }
}

/// Input element embedded in the dialog body.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DialogInput {
    pub input_type: &'static str,
    pub placeholder: &'static str,
    pub class_name: &'static str,
}

/// Configuration handed to the modal primitive.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Dialog {
    pub title: Option<String>,
    pub text: Option<String>,
    pub icon: Option<DialogIcon>,
    pub buttons: Vec<DialogButton>,
    pub timer_ms: Option<u64>,
    pub input: Option<DialogInput>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissReason {
    Timer,
    Confirm,
    Cancel,
    Outside,
}

impl Dialog {
    /// Handles the dialog closing; returns whether the timer closed it.
    pub fn on_dismiss(&self, reason: DismissReason) -> bool {
        let by_timer = self.timer_ms.is_some() && reason == DismissReason::Timer;
        if by_timer {
            log::info!("Dialog {:?} was closed by the timer", self.title);
        }
        by_timer
    }
}

/// Builds the dialog configuration of `kind`.
pub fn present(kind: &AlertKind) -> Dialog {
    match kind {
        AlertKind::Basic(text) => Dialog {
            text: Some(text.clone()),
            buttons: vec![DialogButton::confirm("OK")],
            ..Dialog::default()
        },
        AlertKind::ErrorMessage(message) => Dialog {
            title: Some("Erro!".to_string()),
            text: Some(message.clone()),
            icon: Some(DialogIcon::Error),
            buttons: vec![DialogButton::confirm("OK")],
            ..Dialog::default()
        },
        AlertKind::TitleAndText { title, text } => Dialog {
            title: Some(title.clone()),
            text: Some(text.clone()),
            buttons: vec![DialogButton::confirm("OK")],
            ..Dialog::default()
        },
        AlertKind::SuccessMessage => Dialog {
            title: Some("Congratulations!".to_string()),
            text: Some("You entered the correct answer".to_string()),
            icon: Some(DialogIcon::Success),
            buttons: vec![DialogButton::confirm("Continue")],
            ..Dialog::default()
        },
        AlertKind::AutoClose => Dialog {
            title: Some("Auto close alert!".to_string()),
            text: Some("I will close in 2 seconds.".to_string()),
            timer_ms: Some(AUTO_CLOSE_MS),
            ..Dialog::default()
        },
        AlertKind::WarningMessageAndCancel => Dialog {
            title: Some("Are you sure?".to_string()),
            text: Some("You won't be able to revert this!".to_string()),
            icon: Some(DialogIcon::Warning),
            buttons: vec![DialogButton::cancel("Cancel"), DialogButton::confirm("OK")],
            ..Dialog::default()
        },
        AlertKind::PasswordPrompt => Dialog {
            input: Some(DialogInput {
                input_type: "password",
                placeholder: "Type your password",
                class_name: "form-control",
            }),
            buttons: vec![DialogButton::confirm("OK")],
            ..Dialog::default()
        },
    }
}
