//! Fixed rule data and term matching for the trigger detector.
//!
//! Explicit-request patterns and the frustration lexicon are static; the
//! configurable keyword and phrase lists are compiled into a [`TermMatcher`]
//! whenever the detector's config changes.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ConfigError, ConfigResult};

/// Distinct frustration indicators required before the rule fires.
pub const MIN_FRUSTRATION_INDICATORS: usize = 2;

/// Words and phrases that read as customer frustration.
pub const FRUSTRATION_INDICATORS: &[&str] = &[
    "frustrated",
    "frustrating",
    "angry",
    "annoyed",
    "annoying",
    "furious",
    "ridiculous",
    "absurd",
    "unacceptable",
    "useless",
    "pathetic",
    "hopeless",
    "terrible",
    "horrible",
    "awful",
    "worst",
    "fed up",
    "sick of",
    "tired of",
    "had enough",
    "waste of time",
    "doesn't work",
    "not working",
    "still broken",
    "makes no sense",
    "give up",
];

/// Patterns meaning "connect me to a person". Matched case-insensitively.
const EXPLICIT_REQUEST_PATTERNS: &[&str] = &[
    r"\b(?:talk|speak|chat)\s+(?:to|with)\s+(?:a\s+|an\s+|the\s+|your\s+|some\s+)?(?:real\s+|live\s+|actual\s+)?(?:human|person|agent|representative|rep|someone|somebody|operator|manager|supervisor)\b",
    r"\btransfer\s+me\b",
    r"\bconnect\s+me\s+(?:to|with)\b",
    r"\blive\s+(?:agent|person|chat|representative|support)\b",
    r"\b(?:real|actual)\s+(?:human|person)\b",
    r"\bhuman\s+(?:agent|being|representative|support)\b",
    r"\b(?:want|need|get\s+me)\s+(?:a\s+|an\s+|the\s+)?(?:human|person|representative|operator)\b",
    r"\bno\s+more\s+(?:bot|robot|machine)s?\b",
];

static EXPLICIT_REQUEST_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    EXPLICIT_REQUEST_PATTERNS
        .iter()
        .map(|p| {
            Regex::new(&format!("(?i){p}")).expect("explicit request pattern should compile")
        })
        .collect()
});

static FRUSTRATION_MATCHER: LazyLock<TermMatcher> = LazyLock::new(|| {
    TermMatcher::new(FRUSTRATION_INDICATORS.iter().copied())
        .expect("frustration indicator patterns should compile")
});

/// Fold typographic apostrophes so "doesn’t" matches "doesn't".
pub fn normalize_text(text: &str) -> String {
    text.replace(['\u{2019}', '\u{2018}'], "'")
}

/// Fragments of `text` that ask for a human, in pattern order, de-duplicated.
pub fn find_explicit_requests(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for re in EXPLICIT_REQUEST_RES.iter() {
        for m in re.find_iter(text) {
            let fragment = m.as_str().to_lowercase();
            if !found.contains(&fragment) {
                found.push(fragment);
            }
        }
    }
    found
}

/// Distinct frustration indicators present in `text`, in lexicon order.
pub fn find_frustration_indicators(text: &str) -> Vec<String> {
    FRUSTRATION_MATCHER.find_all(text)
}

/// Regex source for a term: escaped, whitespace-tolerant, and anchored on
/// word boundaries where the term starts or ends with a word character.
pub fn term_pattern(term: &str) -> String {
    let body = term
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let start = if is_word(term.trim().chars().next()) { r"\b" } else { "" };
    let end = if is_word(term.trim().chars().last()) { r"\b" } else { "" };
    format!("(?i){start}{body}{end}")
}

/// Case-insensitive, word-boundary matcher over a list of terms.
#[derive(Debug, Clone, Default)]
pub struct TermMatcher {
    terms: Vec<(String, Regex)>,
}

impl TermMatcher {
    /// Compile every term, failing on the first one that does not compile.
    pub fn new<I, S>(terms: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for term in terms {
            let term = term.as_ref();
            if term.trim().is_empty() {
                continue;
            }
            let re = Regex::new(&term_pattern(term))
                .map_err(|e| ConfigError::invalid_pattern(term, e.to_string()))?;
            compiled.push((term.to_string(), re));
        }
        Ok(Self { terms: compiled })
    }

    /// Compile what compiles; skip and log the rest.
    pub fn lenient<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for term in terms {
            let term = term.as_ref();
            if term.trim().is_empty() {
                continue;
            }
            match Regex::new(&term_pattern(term)) {
                Ok(re) => compiled.push((term.to_string(), re)),
                Err(e) => tracing::warn!(term, error = %e, "skipping term that does not compile"),
            }
        }
        Self { terms: compiled }
    }

    /// Every term present in `text`, in configured order.
    pub fn find_all(&self, text: &str) -> Vec<String> {
        self.terms
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(term, _)| term.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
