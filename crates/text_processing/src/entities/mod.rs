//! Pattern-based entity recognition
//!
//! Recognizes entity mentions in a single sentence using compiled regex
//! patterns and configured gazetteers:
//! - Structured identifiers (card numbers, SSNs, money, dates, quantities)
//! - Person names via honorific and capitalized-run heuristics
//! - Organizations via corporate-suffix patterns
//! - Places via a built-in gazetteer, extensible with [`with_places`]
//!
//! Gazetteer entries are compiled to case-insensitive word-bounded
//! patterns, so "ada lovelace" matches a configured "Ada Lovelace".
//!
//! # Example
//!
//! ```ignore
//! use response_gate_text_processing::PatternEntityRecognizer;
//! use response_gate_core::EntityLabel;
//!
//! let recognizer = PatternEntityRecognizer::new();
//! let found = recognizer.matches("The president is John Smith.");
//!
//! assert!(found.iter().any(|m| m.label == EntityLabel::Person));
//! ```
//!
//! [`with_places`]: PatternEntityRecognizer::with_places

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::TextProcessingError;
use response_gate_core::{EntityLabel, EntityRecognizer, Result};

/// One recognized entity mention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMatch {
    /// Assigned label
    pub label: EntityLabel,
    /// Matched text span
    pub text: String,
}

// Compiled patterns for structured identifiers

static CREDIT_CARD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // 13 to 16 digits, optionally grouped by spaces or dashes
    Regex::new(r"\b\d{4}[ -]?\d{4}[ -]?\d{4}[ -]?\d{1,4}\b").unwrap()
});

static SSN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap());

static MONEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)[$₹€£]\s*\d+(?:,\d{3})*(?:\.\d+)?(?:\s*(?:thousand|million|billion|lakh|crore))?|\b\d+(?:,\d{3})*(?:\.\d+)?\s*(?:dollars?|rupees?|euros?|pounds?|usd|inr|eur|gbp)\b",
    )
    .unwrap()
});

static NUMERIC_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b").unwrap());

static MONTH_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2}(?:,\s*\d{4})?",
    )
    .unwrap()
});

static QUANTITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d+(?:\.\d+)?\s*(?:%|percent|kg|kilograms?|grams?|km|kilometers?|meters?|miles?)")
        .unwrap()
});

// Person and organization heuristics

static HONORIFIC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:Mr|Mrs|Ms|Dr|Prof|Sir|Madam|President|Senator|Judge|Captain)\.?\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*",
    )
    .unwrap()
});

static NAME_RUN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+\b").unwrap());

static ORG_SUFFIX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b[A-Z][A-Za-z]*(?:\s+(?:[A-Z][A-Za-z]*|&))*\s+(?:Inc|Corp|Corporation|Ltd|Limited|LLC|LLP|GmbH|Co)\b\.?",
    )
    .unwrap()
});

/// Capitalized function words that open sentences; a capitalized run is
/// only a person candidate once these are stripped from its front
const SENTENCE_OPENERS: &[&str] = &[
    "The", "A", "An", "This", "That", "These", "Those", "It", "He", "She", "They", "We", "You",
    "I", "My", "Our", "Your", "His", "Her", "Their", "Its", "In", "On", "At", "By", "For", "From",
    "With", "But", "And", "Or", "If", "As", "So", "Not", "No", "Yes", "What", "Who", "Whom",
    "Whose", "Which", "When", "Where", "Why", "How", "There", "Here", "Then", "Now", "Please",
];

/// Built-in place gazetteer; extend per deployment with `with_places`
const DEFAULT_PLACES: &[&str] = &[
    "United States",
    "America",
    "India",
    "China",
    "Russia",
    "France",
    "Germany",
    "Japan",
    "Britain",
    "Canada",
    "Australia",
    "Brazil",
    "London",
    "Paris",
    "New York",
    "Washington",
    "Tokyo",
    "Beijing",
    "Moscow",
    "Berlin",
    "Delhi",
    "Mumbai",
    "California",
    "Texas",
];

/// Regex and gazetteer entity recognizer
///
/// Person, organization, and place gazetteers are empty or minimal by
/// default; load deployment-specific names with the `with_*` builders.
pub struct PatternEntityRecognizer {
    person_patterns: Vec<(String, Regex)>,
    org_patterns: Vec<(String, Regex)>,
    place_patterns: Vec<(String, Regex)>,
    custom_patterns: Vec<(EntityLabel, Regex)>,
}

impl Default for PatternEntityRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_gazetteer(names: Vec<String>) -> Vec<(String, Regex)> {
    names
        .into_iter()
        .filter_map(|name| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(&name));
            Regex::new(&pattern).ok().map(|regex| (name, regex))
        })
        .collect()
}

impl PatternEntityRecognizer {
    /// Recognizer with the built-in place gazetteer and no configured names
    pub fn new() -> Self {
        Self {
            person_patterns: Vec::new(),
            org_patterns: Vec::new(),
            place_patterns: compile_gazetteer(
                DEFAULT_PLACES.iter().map(|s| s.to_string()).collect(),
            ),
            custom_patterns: Vec::new(),
        }
    }

    /// Add known person names (builder)
    pub fn with_people(mut self, names: Vec<String>) -> Self {
        self.person_patterns.extend(compile_gazetteer(names));
        self
    }

    /// Add known organization names (builder)
    pub fn with_organizations(mut self, names: Vec<String>) -> Self {
        self.org_patterns.extend(compile_gazetteer(names));
        self
    }

    /// Add place names on top of the built-in gazetteer (builder)
    pub fn with_places(mut self, names: Vec<String>) -> Self {
        self.place_patterns.extend(compile_gazetteer(names));
        self
    }

    /// Add raw regex patterns for a label (builder)
    ///
    /// Unlike the gazetteer builders, patterns are taken verbatim; a
    /// pattern that fails to compile rejects the whole builder call.
    pub fn with_patterns(
        mut self,
        label: EntityLabel,
        patterns: &[&str],
    ) -> std::result::Result<Self, TextProcessingError> {
        for pattern in patterns {
            let regex = Regex::new(pattern).map_err(|e| {
                TextProcessingError::InvalidPattern(format!("{}: {}", pattern, e))
            })?;
            self.custom_patterns.push((label, regex));
        }
        Ok(self)
    }

    /// All entity mentions in a sentence, with matched spans
    pub fn matches(&self, sentence: &str) -> Vec<EntityMatch> {
        let mut found = Vec::new();

        for m in CREDIT_CARD_PATTERN.find_iter(sentence) {
            found.push(EntityMatch {
                label: EntityLabel::CreditCard,
                text: m.as_str().to_string(),
            });
        }
        for m in SSN_PATTERN.find_iter(sentence) {
            found.push(EntityMatch {
                label: EntityLabel::Ssn,
                text: m.as_str().to_string(),
            });
        }
        for m in MONEY_PATTERN.find_iter(sentence) {
            found.push(EntityMatch {
                label: EntityLabel::Money,
                text: m.as_str().to_string(),
            });
        }
        for m in NUMERIC_DATE_PATTERN
            .find_iter(sentence)
            .chain(MONTH_DATE_PATTERN.find_iter(sentence))
        {
            found.push(EntityMatch {
                label: EntityLabel::Date,
                text: m.as_str().to_string(),
            });
        }
        for m in QUANTITY_PATTERN.find_iter(sentence) {
            found.push(EntityMatch {
                label: EntityLabel::Quantity,
                text: m.as_str().to_string(),
            });
        }

        for m in HONORIFIC_PATTERN.find_iter(sentence) {
            found.push(EntityMatch {
                label: EntityLabel::Person,
                text: m.as_str().to_string(),
            });
        }
        for run in self.person_runs(sentence) {
            found.push(EntityMatch {
                label: EntityLabel::Person,
                text: run,
            });
        }
        for m in ORG_SUFFIX_PATTERN.find_iter(sentence) {
            found.push(EntityMatch {
                label: EntityLabel::Org,
                text: m.as_str().to_string(),
            });
        }

        for (patterns, label) in [
            (&self.person_patterns, EntityLabel::Person),
            (&self.org_patterns, EntityLabel::Org),
            (&self.place_patterns, EntityLabel::Gpe),
        ] {
            for (name, pattern) in patterns {
                if pattern.is_match(sentence) {
                    found.push(EntityMatch {
                        label,
                        text: name.clone(),
                    });
                }
            }
        }

        for (label, pattern) in &self.custom_patterns {
            for m in pattern.find_iter(sentence) {
                found.push(EntityMatch {
                    label: *label,
                    text: m.as_str().to_string(),
                });
            }
        }

        found
    }

    /// Capitalized runs of two or more words, with leading sentence
    /// openers stripped
    fn person_runs(&self, sentence: &str) -> Vec<String> {
        let mut runs = Vec::new();
        for found in NAME_RUN_PATTERN.find_iter(sentence) {
            let words: Vec<&str> = found.as_str().split_whitespace().collect();
            let start = words
                .iter()
                .position(|word| !SENTENCE_OPENERS.contains(word))
                .unwrap_or(words.len());
            if words.len() - start >= 2 {
                runs.push(words[start..].join(" "));
            }
        }
        runs
    }
}

#[async_trait]
impl EntityRecognizer for PatternEntityRecognizer {
    async fn recognize(&self, sentence: &str) -> Result<Vec<EntityLabel>> {
        let mut labels = Vec::new();
        let mut seen = HashSet::new();
        for entity in self.matches(sentence) {
            if seen.insert(entity.label) {
                labels.push(entity.label);
            }
        }
        Ok(labels)
    }

    fn name(&self) -> &str {
        "pattern-recognizer"
    }
}
