use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

/// ISO 639-1 two-letter language codes.
pub const ISO_639_1: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg", "bh",
    "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv", "cy", "da",
    "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi", "fj", "fo", "fr",
    "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr", "ht", "hu", "hy", "hz",
    "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja", "jv", "ka", "kg", "ki", "kj",
    "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw", "ky", "la", "lb", "lg", "li", "ln",
    "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml", "mn", "mr", "ms", "mt", "my", "na", "nb",
    "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv", "ny", "oc", "oj", "om", "or", "os", "pa", "pi",
    "pl", "ps", "pt", "qu", "rm", "rn", "ro", "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk",
    "sl", "sm", "sn", "so", "sq", "sr", "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti",
    "tk", "tl", "tn", "to", "tr", "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo",
    "wa", "wo", "xh", "yi", "yo", "za", "zh", "zu",
];

// Language-region pairs such as en-us or pt-BR, matched after lowercasing
static EXTENDED_LOCALE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]{2}-[a-zA-Z]{2}$").expect("extended locale pattern is valid")
});

static SHARED: Lazy<Arc<LocaleCodes>> = Lazy::new(|| Arc::new(LocaleCodes::new()));

/// Lookup table of recognised locale codes.
///
/// Immutable once built; share it between detectors through [`Arc`].
#[derive(Debug, Clone)]
pub struct LocaleCodes {
    codes: HashSet<&'static str>,
}

impl LocaleCodes {
    pub fn new() -> Self {
        Self {
            codes: ISO_639_1.iter().copied().collect(),
        }
    }

    /// Process-wide instance, built on first use.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Returns the lowercased code when `candidate` is a bare ISO code or a
    /// language-region pair.
    pub fn match_code(&self, candidate: &str) -> Option<String> {
        let lowered = candidate.to_lowercase();
        if self.codes.contains(lowered.as_str()) || EXTENDED_LOCALE_REGEX.is_match(&lowered) {
            Some(lowered)
        } else {
            None
        }
    }

    pub fn is_locale(&self, candidate: &str) -> bool {
        self.match_code(candidate).is_some()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for LocaleCodes {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks a string against the shared code table, ignoring case.
pub fn is_locale_code(code: &str) -> bool {
    SHARED.is_locale(code)
}
