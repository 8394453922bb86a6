use thiserror::Error;

/// Failures surfaced by the locale engine.
///
/// Heuristic outcomes (no locale found, unknown dictionary word) are ordinary
/// results; only input the URL parser rejects ends up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Failed to parse URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl LocaleError {
    pub fn invalid_url(url: &str, source: url::ParseError) -> Self {
        LocaleError::InvalidUrl {
            url: url.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LocaleError>;
