//! Shared tokenization for the lexical analyzers

use once_cell::sync::Lazy;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Common English stop words excluded from topic modeling
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be",
        "because", "been", "but", "by", "can", "could", "did", "do", "does", "for", "from", "had",
        "has", "have", "he", "her", "his", "how", "i", "if", "in", "into", "is", "it", "its",
        "just", "me", "more", "most", "my", "no", "not", "of", "on", "only", "or", "our", "out",
        "over", "she", "so", "some", "such", "than", "that", "the", "their", "them", "then",
        "there", "these", "they", "this", "to", "up", "very", "was", "we", "were", "what", "when",
        "where", "which", "who", "will", "with", "would", "you", "your",
    ]
    .into_iter()
    .collect()
});

/// Lowercased word tokens in document order
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

/// Tokens with stop words removed, for topic modeling
pub fn content_tokens(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| !STOP_WORDS.contains(t.as_str()))
        .collect()
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        let tokens = tokenize("The Capital of France is Paris.");
        assert_eq!(tokens, vec!["the", "capital", "of", "france", "is", "paris"]);
    }

    #[test]
    fn test_content_tokens_drop_stop_words() {
        let tokens = content_tokens("The capital of France is Paris");
        assert_eq!(tokens, vec!["capital", "france", "paris"]);
    }

    #[test]
    fn test_punctuation_and_unicode() {
        let tokens = tokenize("Hello, world! Grüße aus München.");
        assert!(tokens.contains(&"grüße".to_string()));
        assert!(!tokens.iter().any(|t| t.contains(',')));
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(content_tokens("   ").is_empty());
    }
}
