use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{source_kind} search failed with status {status}")]
    Api {
        source_kind: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("{0} API key not configured")]
    MissingApiKey(&'static str),

    #[error("all social search instances failed")]
    AllInstancesFailed,
}
