//! Locale-aware URL variant detection and grouping.
//!
//! Sites often serve the same page under several language encodings: a
//! locale subdomain (`es.example.com`), a path prefix (`/en/about`) or a
//! query parameter (`?lang=fr`). This crate detects those markers, clusters
//! the variants of one logical resource, and picks a single representative
//! per cluster according to a caller-supplied locale preference.

pub mod locale;
pub mod settings;
pub mod utils;

pub use locale::{
    is_locale_code, Detector, Dictionary, Grouper, LocaleCodes, LocaleError, LocaleGroup,
    LocaleToken, Score, Scorer, SignalKind, TranslationGroup, TranslationMatcher, DEFAULT_LOCALE,
};
pub use settings::{OutputFormat, Settings};
