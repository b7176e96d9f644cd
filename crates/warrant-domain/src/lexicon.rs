//! Fixed keyword sets used for lexical classification
//!
//! Matching is case-insensitive and whole-word: a keyword never matches
//! inside a longer word, so "cost" does not fire on "costume".

use regex::RegexSet;
use std::sync::LazyLock;

/// A fixed set of keywords or short phrases compiled into one [`RegexSet`]
#[derive(Debug)]
pub struct KeywordSet {
    keywords: &'static [&'static str],
    set: RegexSet,
}

impl KeywordSet {
    /// Compile a keyword set
    ///
    /// # Examples
    ///
    /// ```
    /// use warrant_domain::lexicon::KeywordSet;
    ///
    /// let set = KeywordSet::new(&["leads to", "cost"]);
    /// assert!(set.is_match("Caching leads to lower latency"));
    /// assert!(!set.is_match("A costume party"));
    /// ```
    pub fn new(keywords: &'static [&'static str]) -> Self {
        let set = RegexSet::new(keywords.iter().map(|k| whole_word_pattern(k)))
            .expect("escaped keywords always compile");
        Self { keywords, set }
    }

    /// The keywords in declaration order
    pub fn keywords(&self) -> &'static [&'static str] {
        self.keywords
    }

    /// Whether any keyword occurs in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.set.is_match(text)
    }

    /// Keywords occurring in `text`, in declaration order
    pub fn matches(&self, text: &str) -> Vec<&'static str> {
        self.set
            .matches(text)
            .into_iter()
            .map(|i| self.keywords[i])
            .collect()
    }

    /// Number of distinct keywords occurring in `text`
    pub fn count(&self, text: &str) -> usize {
        self.set.matches(text).iter().count()
    }
}

fn whole_word_pattern(keyword: &str) -> String {
    let lead = if keyword.chars().next().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    let trail = if keyword.chars().last().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    format!("(?i){lead}{}{trail}", regex::escape(keyword))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Phrases that make a claim causal
pub static CAUSAL: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "will cause",
        "causes",
        "results in",
        "will result in",
        "leads to",
        "will lead to",
        "guarantees",
    ])
});

/// Promissory vocabulary forbidden in claims
pub static PROMISSORY: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "guaranteed",
        "guarantee",
        "guarantees",
        "garanti",
        "sure thing",
        "sûr",
        "assured",
        "argent assuré",
        "risk-free",
        "100%",
    ])
});

/// Words marking a claim as important enough to deserve evidence
pub static IMPORTANCE: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "decision",
        "cost",
        "risk",
        "security",
        "critical",
        "must",
        "required",
        "architecture",
    ])
});

/// Phrases attempting to override the review's authority
pub static INJECTION: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "ignore previous instructions",
        "ignore all previous",
        "disregard the rules",
        "system prompt",
        "you are now",
        "override the policy",
        "skip validation",
    ])
});
