use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, trace};
use url::Url;

use super::detector::{Detector, LocaleToken, DEFAULT_LOCALE};
use super::error::Result;
use super::scorer::Scorer;
use super::translations::TranslationMatcher;
use crate::utils::url_parts::{decoded_path_segments, normalized_host, query_param_names};

/// Locale used when the caller supplies an empty priority list.
pub const FALLBACK_PRIORITY: &str = "en";

// Share of aligned segments that must be equal or translations of each other,
// expressed in tenths to keep the comparison in integers
const SIMILARITY_TENTHS: usize = 7;

/// URLs that share a group key, at most one per locale.
#[derive(Debug, Clone)]
pub struct LocaleGroup {
    key: String,
    entries: Vec<LocaleToken>, // First-seen order, unique by locale key
    best: Option<usize>,
    url_count: usize,
    priority: Arc<[String]>,
}

impl LocaleGroup {
    fn new(key: String, priority: Arc<[String]>) -> Self {
        Self {
            key,
            entries: Vec::new(),
            best: None,
            url_count: 0,
            priority,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored variants, in the order their locale was first seen.
    pub fn entries(&self) -> &[LocaleToken] {
        &self.entries
    }

    pub fn get(&self, locale: &str) -> Option<&LocaleToken> {
        self.entries.iter().find(|entry| entry.locale_key() == locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(LocaleToken::locale_key)
    }

    pub fn best_url(&self) -> Option<&LocaleToken> {
        self.best.and_then(|index| self.entries.get(index))
    }

    /// Every URL routed to this group, including discarded same-locale repeats.
    pub fn url_count(&self) -> usize {
        self.url_count
    }

    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    /// Stores the token unless its locale is already present.
    fn insert(&mut self, token: LocaleToken) -> bool {
        self.url_count += 1;

        if self.get(token.locale_key()).is_some() {
            trace!(
                "Locale '{}' already stored for group '{}', discarding {}",
                token.locale_key(),
                self.key,
                token.original_url
            );
            return false;
        }

        self.entries.push(token);
        true
    }

    /// Highest listed locale first, then the default entry, then the
    /// earliest-seen entry.
    fn update_best(&mut self) {
        let position_of = |locale: &str| {
            self.entries
                .iter()
                .position(|entry| entry.locale_key() == locale)
        };

        self.best = self
            .priority
            .iter()
            .find_map(|locale| position_of(locale.as_str()))
            .or_else(|| position_of(DEFAULT_LOCALE))
            .or(if self.entries.is_empty() { None } else { Some(0) });
    }
}

/// Accumulates URLs into locale groups for one processing run.
///
/// Not internally synchronized: wrap it in a mutex, or build one grouper per
/// worker, when feeding it from several threads.
#[derive(Debug)]
pub struct Grouper {
    detector: Detector,
    matcher: TranslationMatcher,
    groups: Vec<LocaleGroup>,
    index: HashMap<String, usize>,
    priority: Arc<[String]>,
}

impl Grouper {
    /// Creates a grouper over the shared built-in tables.
    /// An empty priority list falls back to `["en"]`.
    pub fn new(priority: Vec<String>) -> Self {
        Self::with_components(Detector::default(), TranslationMatcher::default(), priority)
    }

    pub fn with_components(
        detector: Detector,
        matcher: TranslationMatcher,
        priority: Vec<String>,
    ) -> Self {
        let priority = if priority.is_empty() {
            vec![FALLBACK_PRIORITY.to_string()]
        } else {
            priority
        };

        Self {
            detector,
            matcher,
            groups: Vec::new(),
            index: HashMap::new(),
            priority: priority.into(),
        }
    }

    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    /// Adds a URL to the group matching its structural key.
    ///
    /// A parse failure leaves the grouper untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn add(&mut self, raw_url: &str) -> Result<()> {
        let token = self.detector.detect(raw_url)?;
        let key = self.key_for(&token);

        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                debug!("Creating group '{}'", key);
                self.groups
                    .push(LocaleGroup::new(key.clone(), Arc::clone(&self.priority)));
                self.index.insert(key, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };

        let group = &mut self.groups[slot];
        if group.insert(token) {
            trace!(
                "Group '{}' now holds locales {:?}",
                group.key,
                group.locales().collect::<Vec<_>>()
            );
        }
        group.update_best();

        Ok(())
    }

    /// Structural key for a single URL.
    pub fn group_key(&self, raw_url: &str) -> Result<String> {
        let token = self.detector.detect(raw_url)?;
        Ok(self.key_for(&token))
    }

    /// Stricter pairwise check: equal keys, then at least 70% of the aligned
    /// path segments identical or translations of each other.
    #[instrument(level = "debug", skip(self))]
    pub fn should_group(&self, first: &str, second: &str) -> Result<bool> {
        let first = self.detector.detect(first)?;
        let second = self.detector.detect(second)?;

        if self.key_for(&first) != self.key_for(&second) {
            return Ok(false);
        }

        Ok(self.validate_similarity(&first, &second))
    }

    /// One representative per group, in group creation order.
    pub fn best_urls(&self) -> Vec<&LocaleToken> {
        self.groups
            .iter()
            .filter_map(LocaleGroup::best_url)
            .collect()
    }

    /// One representative per group chosen by `scorer` instead of the plain
    /// priority lookup.
    pub fn best_urls_scored(&self, scorer: &Scorer) -> Vec<&LocaleToken> {
        self.groups
            .iter()
            .filter_map(|group| scorer.best_from_group(group))
            .collect()
    }

    /// Groups in creation order.
    pub fn groups(&self) -> &[LocaleGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Logs a one-line summary of the run.
    pub fn log_summary(&self) {
        let urls: usize = self.groups.iter().map(LocaleGroup::url_count).sum();
        let variants: usize = self.groups.iter().map(|group| group.entries.len()).sum();
        info!(
            "Grouped {} URLs into {} groups ({} stored locale variants)",
            urls,
            self.groups.len(),
            variants
        );
    }

    /// Host, translation-canonical path and sorted parameter names of the
    /// token's base URL.
    fn key_for(&self, token: &LocaleToken) -> String {
        let url = match Url::parse(&token.base_url) {
            Ok(url) => url,
            Err(_) => return token.base_url.clone(),
        };

        let mut key = normalized_host(&url);
        key.push_str(&self.canonical_path(&url));

        let names = query_param_names(&url);
        if !names.is_empty() {
            key.push('?');
            key.push_str(&names.join("&"));
        }

        key
    }

    fn canonical_path(&self, url: &Url) -> String {
        let segments: Vec<String> = decoded_path_segments(url)
            .iter()
            .map(|segment| {
                let lowered = segment.to_lowercase();
                self.matcher.canonical(&lowered).to_string()
            })
            .collect();

        format!("/{}", segments.join("/"))
    }

    fn validate_similarity(&self, first: &LocaleToken, second: &LocaleToken) -> bool {
        let (first, second) = match (Url::parse(&first.base_url), Url::parse(&second.base_url)) {
            (Ok(first), Ok(second)) => (first, second),
            _ => return false,
        };

        if normalized_host(&first) != normalized_host(&second) {
            return false;
        }

        let first_segments = decoded_path_segments(&first);
        let second_segments = decoded_path_segments(&second);
        if first_segments.len() != second_segments.len() {
            return false;
        }

        let matches = first_segments
            .iter()
            .zip(&second_segments)
            .filter(|(a, b)| a == b || self.matcher.are_translations(a, b))
            .count();

        matches * 10 >= first_segments.len() * SIMILARITY_TENTHS
    }
}
