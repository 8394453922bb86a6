use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, trace, warn};
use url::{Host, Url};

use super::codes::LocaleCodes;
use super::error::{LocaleError, Result};
use super::guards::{first_rejection, PathCandidate};
use crate::utils::url_parts::{decoded_path_segments, join_path, path_segments};

/// Pseudo-locale for URLs without any locale marker.
pub const DEFAULT_LOCALE: &str = "default";

/// Query parameter names that may carry a locale, in lookup order.
/// Matched case-sensitively.
pub const LOCALE_QUERY_PARAMS: &[&str] = &["lang", "locale", "language", "hl", "l"];

// Segment 0 handles /en/page, segment 1 handles /content/en/page
const PATH_PROBE_DEPTH: usize = 2;

/// Where in the URL the locale marker was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Subdomain,
    Path,
    Query,
    None,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Subdomain => "subdomain",
            SignalKind::Path => "path",
            SignalKind::Query => "query",
            SignalKind::None => "none",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of locale detection on a single URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleToken {
    pub locale: String,              // Detected code, lowercased; empty when none
    pub signal: SignalKind,          // Which URL component carried it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,     // Segment index for path signals
    pub base_url: String,            // URL with the locale component removed
    pub original_url: String,        // Input as given
}

impl LocaleToken {
    /// The locale, or [`DEFAULT_LOCALE`] when no marker was found.
    pub fn locale_key(&self) -> &str {
        if self.locale.is_empty() {
            DEFAULT_LOCALE
        } else {
            &self.locale
        }
    }

    pub fn has_locale(&self) -> bool {
        self.signal != SignalKind::None
    }
}

/// Finds language markers in URLs.
///
/// Signals are checked in a fixed order (subdomain, path, query) and the
/// first hit wins. The detector is immutable and can be shared freely
/// between threads.
#[derive(Debug, Clone)]
pub struct Detector {
    codes: Arc<LocaleCodes>,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(LocaleCodes::shared())
    }
}

impl Detector {
    pub fn new(codes: Arc<LocaleCodes>) -> Self {
        Self { codes }
    }

    /// Detects the locale marker in `raw_url` and derives its base URL.
    ///
    /// # Errors
    /// Returns [`LocaleError::InvalidUrl`] when the input is not an absolute URL.
    #[instrument(level = "trace", skip(self))]
    pub fn detect(&self, raw_url: &str) -> Result<LocaleToken> {
        let url = Url::parse(raw_url).map_err(|e| {
            debug!("Failed to parse URL '{}': {}", raw_url, e);
            LocaleError::invalid_url(raw_url, e)
        })?;

        if let Some((locale, base_url)) = self.detect_subdomain(&url) {
            trace!("Subdomain locale '{}' found", locale);
            return Ok(LocaleToken {
                locale,
                signal: SignalKind::Subdomain,
                position: None,
                base_url,
                original_url: raw_url.to_string(),
            });
        }

        if let Some((locale, position, base_url)) = self.detect_path(&url) {
            trace!("Path locale '{}' found at segment {}", locale, position);
            return Ok(LocaleToken {
                locale,
                signal: SignalKind::Path,
                position: Some(position),
                base_url,
                original_url: raw_url.to_string(),
            });
        }

        if let Some((locale, base_url)) = self.detect_query(&url) {
            trace!("Query locale '{}' found", locale);
            return Ok(LocaleToken {
                locale,
                signal: SignalKind::Query,
                position: None,
                base_url,
                original_url: raw_url.to_string(),
            });
        }

        trace!("No locale marker found");
        Ok(LocaleToken {
            locale: String::new(),
            signal: SignalKind::None,
            position: None,
            base_url: raw_url.to_string(),
            original_url: raw_url.to_string(),
        })
    }

    /// Checks the first host label, returning the code and the URL without it.
    fn detect_subdomain(&self, url: &Url) -> Option<(String, String)> {
        let domain = match url.host()? {
            Host::Domain(domain) => domain,
            Host::Ipv4(_) | Host::Ipv6(_) => return None,
        };

        let (first_label, rest) = domain.split_once('.')?;
        let locale = self.codes.match_code(first_label)?;

        let mut base = url.clone();
        if let Err(e) = base.set_host(Some(rest)) {
            warn!("Cannot drop locale label from host '{}': {}", domain, e);
            return None;
        }

        Some((locale, base.to_string()))
    }

    fn detect_path(&self, url: &Url) -> Option<(String, usize, String)> {
        if url.cannot_be_a_base() {
            return None;
        }

        let segments = path_segments(url);
        let decoded = decoded_path_segments(url);
        let decoded: Vec<&str> = decoded.iter().map(String::as_str).collect();

        for position in 0..segments.len().min(PATH_PROBE_DEPTH) {
            if let Some(locale) = self.validate_path_segment(&decoded, position) {
                let remaining: Vec<&str> = segments
                    .iter()
                    .enumerate()
                    .filter(|(index, _)| *index != position)
                    .map(|(_, segment)| *segment)
                    .collect();

                let mut base = url.clone();
                base.set_path(&join_path(&remaining));
                return Some((locale, position, base.to_string()));
            }
        }

        None
    }

    /// A segment is a locale when it looks like a code and no guard objects.
    fn validate_path_segment(&self, segments: &[&str], position: usize) -> Option<String> {
        let code = self.codes.match_code(segments[position])?;

        let candidate = PathCandidate {
            code: &code,
            position,
            segments,
        };
        if let Some(guard) = first_rejection(&candidate) {
            debug!(
                "Path segment '{}' at {} rejected by guard '{}'",
                segments[position], position, guard.name
            );
            return None;
        }

        Some(code)
    }

    fn detect_query(&self, url: &Url) -> Option<(String, String)> {
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        if pairs.is_empty() {
            return None;
        }

        for param in LOCALE_QUERY_PARAMS {
            let value = match first_value(&pairs, param) {
                Some(value) if !value.is_empty() => value,
                _ => continue,
            };

            if let Some(locale) = self.codes.match_code(value) {
                let base_url = strip_query_locale(url, &pairs, &locale);
                return Some((locale, base_url));
            }
        }

        None
    }
}

fn first_value<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Drops every locale parameter whose value equals `locale`, keeping the
/// remaining pairs in their original order.
fn strip_query_locale(url: &Url, pairs: &[(String, String)], locale: &str) -> String {
    let stripped: Vec<&str> = LOCALE_QUERY_PARAMS
        .iter()
        .copied()
        .filter(|param| {
            first_value(pairs, param).is_some_and(|value| value.to_lowercase() == locale)
        })
        .collect();

    let kept: Vec<(&str, &str)> = pairs
        .iter()
        .filter(|(key, _)| !stripped.contains(&key.as_str()))
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();

    let mut base = url.clone();
    if kept.is_empty() {
        base.set_query(None);
    } else {
        base.query_pairs_mut().clear().extend_pairs(kept);
    }

    base.to_string()
}
