use serde::{Deserialize, Serialize};

use crate::domain::types::InfirmaryName;

/// Per-session values shared by otherwise unrelated views.
///
/// Every view receives the context explicitly; there is no ambient lookup.
/// Writes are last-write-wins.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionContext {
    pub infirmary: Option<InfirmaryName>,
    pub user_first_name: Option<String>,
}

impl SessionContext {
    pub fn set_infirmary(&mut self, infirmary: InfirmaryName) {
        self.infirmary = Some(infirmary);
    }

    pub fn set_user_first_name(&mut self, first_name: impl Into<String>) {
        self.user_first_name = Some(first_name.into());
    }

    /// Label shown on the selected-infirmary card, empty when nothing was chosen.
    pub fn infirmary_label(&self) -> &str {
        self.infirmary.as_deref().unwrap_or_default()
    }

    /// Value pre-filled into the nurse field of record forms.
    pub fn nurse(&self) -> Option<&str> {
        self.user_first_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }
}
