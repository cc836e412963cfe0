use serde::Deserialize;

/// JSON body of a non-OK report response.
#[derive(Debug, Default, Deserialize)]
pub struct ReportErrorsDto {
    /// Missing when the server failed in a way it did not describe.
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}
