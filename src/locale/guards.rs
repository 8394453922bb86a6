//! False-positive suppression for path-segment locale candidates.
//!
//! Each guard is an independent predicate over a candidate segment; the
//! detector runs them in declaration order and drops the candidate on the
//! first rejection.

/// Two-letter codes that collide with common English words in paths.
pub const ENGLISH_WORD_CODES: &[&str] = &[
    "id", "in", "is", "or", "to", "ad", "as", "at", "by", "go", "no",
];

/// First segments under which `/it/` is read as "information technology".
pub const TECHNICAL_PREFIXES: &[&str] = &["api", "tech", "technology"];

/// A locale candidate found in a URL path.
#[derive(Debug, Clone, Copy)]
pub struct PathCandidate<'a> {
    /// Lowercased candidate code.
    pub code: &'a str,
    /// Index of the candidate among the non-empty segments.
    pub position: usize,
    /// All non-empty segments of the path, as written.
    pub segments: &'a [&'a str],
}

impl PathCandidate<'_> {
    fn first_segment(&self) -> &str {
        self.segments.first().copied().unwrap_or("")
    }
}

pub struct PathGuard {
    pub name: &'static str,
    rejects: fn(&PathCandidate<'_>) -> bool,
}

impl std::fmt::Debug for PathGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathGuard").field("name", &self.name).finish()
    }
}

impl PathGuard {
    pub fn rejects(&self, candidate: &PathCandidate<'_>) -> bool {
        (self.rejects)(candidate)
    }
}

pub static PATH_GUARDS: &[PathGuard] = &[
    PathGuard {
        name: "english-word",
        rejects: english_word,
    },
    PathGuard {
        name: "technical-it",
        rejects: technical_it,
    },
    PathGuard {
        name: "shallow-api-path",
        rejects: shallow_api_path,
    },
];

/// Returns the first guard rejecting the candidate, if any.
pub fn first_rejection(candidate: &PathCandidate<'_>) -> Option<&'static PathGuard> {
    PATH_GUARDS.iter().find(|guard| guard.rejects(candidate))
}

fn english_word(candidate: &PathCandidate<'_>) -> bool {
    ENGLISH_WORD_CODES.contains(&candidate.code)
}

fn technical_it(candidate: &PathCandidate<'_>) -> bool {
    candidate.code == "it"
        && candidate.position > 0
        && TECHNICAL_PREFIXES.contains(&candidate.first_segment())
}

// API routes rarely carry a locale unless the path is deep enough to hold one
fn shallow_api_path(candidate: &PathCandidate<'_>) -> bool {
    candidate.position > 0 && candidate.first_segment() == "api" && candidate.segments.len() < 3
}
