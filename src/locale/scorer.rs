use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use url::Url;

use super::detector::{LocaleToken, DEFAULT_LOCALE};
use super::grouper::LocaleGroup;
use crate::utils::url_parts::{distinct_param_count, path_segments};

const DEFAULT_LOCALE_SCORE: u32 = 50;
const UNLISTED_LOCALE_SCORE: u32 = 25;
const LISTED_LOCALE_BASE: u32 = 100;
const LISTED_LOCALE_STEP: u32 = 10;
const COMPLETENESS_CAP: u32 = 20;
const FIRST_SEEN_BONUS: u32 = 10;

/// Score breakdown for one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    pub url: String,
    pub locale_score: u32,
    pub completeness_score: u32,
    pub first_seen_bonus: u32,
    pub total: u32,
}

/// Numeric ranking of locale variants, finer grained than the plain
/// priority lookup the grouper uses.
#[derive(Debug, Clone)]
pub struct Scorer {
    locale_priority: HashMap<String, u32>,
}

impl Scorer {
    /// The i-th listed locale (from 0) scores `100 + (N - i) * 10`.
    pub fn new(priorities: &[String]) -> Self {
        let mut locale_priority = HashMap::new();
        locale_priority.insert(DEFAULT_LOCALE.to_string(), DEFAULT_LOCALE_SCORE);

        let count = priorities.len() as u32;
        for (i, locale) in priorities.iter().enumerate() {
            let score = LISTED_LOCALE_BASE + (count - i as u32) * LISTED_LOCALE_STEP;
            locale_priority.insert(locale.clone(), score);
        }

        Self { locale_priority }
    }

    pub fn score(&self, token: &LocaleToken, first_seen: bool) -> Score {
        let locale_score = self
            .locale_priority
            .get(token.locale_key())
            .copied()
            .unwrap_or(UNLISTED_LOCALE_SCORE);
        let completeness_score = completeness(&token.original_url);
        let first_seen_bonus = if first_seen { FIRST_SEEN_BONUS } else { 0 };

        Score {
            url: token.original_url.clone(),
            locale_score,
            completeness_score,
            first_seen_bonus,
            total: locale_score + completeness_score + first_seen_bonus,
        }
    }

    /// Orders two locales by preference; `Greater` means `first` is preferred.
    /// Empty locales count as the default locale, unknown ones rank lowest.
    pub fn compare_priority(&self, first: &str, second: &str) -> Ordering {
        let rank = |locale: &str| {
            let locale = if locale.is_empty() { DEFAULT_LOCALE } else { locale };
            self.locale_priority.get(locale).copied().unwrap_or(0)
        };

        rank(first).cmp(&rank(second))
    }

    /// Entry with the strictly highest total. The first-seen entry gets the
    /// first-seen bonus, and ties keep the earlier entry.
    pub fn best_from_group<'g>(&self, group: &'g LocaleGroup) -> Option<&'g LocaleToken> {
        let mut best: Option<(&LocaleToken, u32)> = None;

        for (index, token) in group.entries().iter().enumerate() {
            let total = self.score(token, index == 0).total;
            match best {
                Some((_, best_total)) if total <= best_total => {}
                _ => best = Some((token, total)),
            }
        }

        best.map(|(token, _)| token)
    }
}

/// Two points per distinct query parameter plus one per path segment,
/// capped so it never outweighs the locale score.
fn completeness(raw_url: &str) -> u32 {
    let url = match Url::parse(raw_url) {
        Ok(url) => url,
        Err(_) => return 0,
    };

    let score = distinct_param_count(&url) * 2 + path_segments(&url).len();
    (score as u32).min(COMPLETENESS_CAP)
}
