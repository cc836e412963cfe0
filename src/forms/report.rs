//! Filter form of the appointment report.

use serde::Deserialize;
use validator::Validate;

use crate::domain::report::ReportFilter;
use crate::domain::types::{InfirmaryName, NonEmptyString};
use crate::forms::{FormError, ordered_messages};

pub const DATE_BEGIN_REQUIRED: &str = "Por favor, preencha a data de início.";
pub const DATE_END_REQUIRED: &str = "Por favor, preencha a data de fim.";
pub const INFIRMARY_REQUIRED: &str = "Por favor, selecione pelo menos uma enfermaria.";

const FIELD_ORDER: [&str; 3] = ["date_begin", "date_end", "infirmaries"];

#[derive(Clone, Debug, Default, Deserialize, Validate)]
/// Raw values of the report form as the user left them.
pub struct ReportForm {
    /// Hidden token field rendered into the form by the server.
    #[serde(rename = "csrfmiddlewaretoken", default)]
    pub csrf_token: String,
    #[validate(length(min = 1, message = "Por favor, preencha a data de início."))]
    #[serde(default)]
    pub date_begin: String,
    #[validate(length(min = 1, message = "Por favor, preencha a data de fim."))]
    #[serde(default)]
    pub date_end: String,
    /// Values of the checked infirmary checkboxes.
    #[validate(length(
        min = 1,
        message = "Por favor, selecione pelo menos uma enfermaria."
    ))]
    #[serde(default)]
    pub infirmaries: Vec<String>,
    #[serde(default)]
    pub search_term: String,
}

impl ReportForm {
    /// Trims every value and drops blank checkbox values.
    fn normalized(&self) -> Self {
        Self {
            csrf_token: self.csrf_token.trim().to_string(),
            date_begin: self.date_begin.trim().to_string(),
            date_end: self.date_end.trim().to_string(),
            infirmaries: self
                .infirmaries
                .iter()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .collect(),
            search_term: self.search_term.trim().to_string(),
        }
    }

    /// Runs the local checks and builds the filter sent to the server.
    ///
    /// On failure the error holds one message per violated rule.
    pub fn to_filter(&self) -> Result<ReportFilter, FormError> {
        let form = self.normalized();
        if let Err(errors) = form.validate() {
            return Err(FormError::Rejected(ordered_messages(&errors, &FIELD_ORDER)));
        }

        let rejected = |message: &str| FormError::Rejected(vec![message.to_string()]);
        let infirmaries = form
            .infirmaries
            .into_iter()
            .map(|value| InfirmaryName::new(value).map_err(|_| rejected(INFIRMARY_REQUIRED)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ReportFilter {
            date_begin: NonEmptyString::new(form.date_begin)
                .map_err(|_| rejected(DATE_BEGIN_REQUIRED))?,
            date_end: NonEmptyString::new(form.date_end).map_err(|_| rejected(DATE_END_REQUIRED))?,
            infirmaries,
            search_term: NonEmptyString::new(form.search_term).ok(),
        })
    }
}
