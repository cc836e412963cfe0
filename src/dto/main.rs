//! Payloads of the dashboard endpoints (`/get_user/`, appointment records).

use serde::Deserialize;

/// Response of `/get_user/`: either the first name or an error description.
#[derive(Debug, Default, Deserialize)]
pub struct UserInfoDto {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `/appointments/{kind}/record/`.
#[derive(Debug, Default, Deserialize)]
pub struct RecordStatusDto {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl RecordStatusDto {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
