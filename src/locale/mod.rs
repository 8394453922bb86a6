//! Locale detection, translation matching, grouping and scoring.
//!
//! Data flows one way: a raw URL goes through the [`Detector`], the
//! resulting [`LocaleToken`] is keyed by the [`Grouper`] with help from the
//! [`TranslationMatcher`], and each [`LocaleGroup`] elects one representative.
//! The [`Scorer`] offers an alternative ranking over the same groups.

pub mod codes;
pub mod detector;
pub mod error;
pub mod grouper;
pub mod guards;
pub mod scorer;
pub mod translations;

#[cfg(test)]
mod tests;

pub use codes::{is_locale_code, LocaleCodes};
pub use detector::{Detector, LocaleToken, SignalKind, DEFAULT_LOCALE, LOCALE_QUERY_PARAMS};
pub use error::{LocaleError, Result};
pub use grouper::{Grouper, LocaleGroup};
pub use scorer::{Score, Scorer};
pub use translations::{normalize_for_matching, Dictionary, TranslationGroup, TranslationMatcher};
