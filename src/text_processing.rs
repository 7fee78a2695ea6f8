//! # Text Processing Module
//!
//! This module turns free text, typically an image caption produced by an
//! external vision service, into canonical ingredient names.
//!
//! ## Features
//!
//! - Blunt noise removal (articles, prepositions, preparation adjectives,
//!   unit words, serving-vessel words) by literal substring replacement
//! - Punctuation stripping and whitespace tokenization
//! - 1, 2 and 3-word phrase lookups against the synonym table
//!   (e.g. "olive oil", "bell pepper")
//! - Deduplicated output in first-seen order
//!
//! Unrecognized words are silently dropped; empty input yields an empty list.

use lazy_static::lazy_static;
use log::{debug, info, trace};
use regex::Regex;
use std::collections::HashSet;

use crate::normalizer::IngredientNormalizer;
use crate::recipe_model::IngredientSet;

/// Noise substrings removed before tokenization, applied in this order
///
/// Each entry carries its trailing space, so a hit inside a longer word
/// ("salmon and" contains "on ") is removed too.
pub const DEFAULT_NOISE_WORDS: &[&str] = &[
    // Articles, prepositions, conjunctions
    "a ", "an ", "the ", "with ", "and ", "or ", "of ", "in ", "on ",
    // Preparation
    "fresh ", "dried ", "chopped ", "sliced ", "diced ", "minced ",
    "cooked ", "raw ", "grilled ", "fried ", "baked ", "roasted ",
    // Size
    "large ", "small ", "medium ", "whole ", "half ", "piece ",
    // Units
    "cup ", "cups ", "tablespoon ", "teaspoon ", "pound ", "ounce ",
    // Serving vessels
    "serving ", "plate ", "bowl ", "dish ", "meal ",
];

/// Longest phrase (in words) looked up at each token position
pub const DEFAULT_MAX_PHRASE_WORDS: usize = 3;

lazy_static! {
    static ref NON_TOKEN_CHARS: Regex =
        Regex::new(r"[^a-z0-9\s]").expect("Token character pattern should be valid");
}

/// Configuration options for caption parsing
#[derive(Debug, Clone)]
pub struct CaptionConfig {
    /// Noise entries removed before tokenization
    pub noise_words: Vec<String>,
    /// Longest phrase tried at each position (1 disables phrase lookups)
    pub max_phrase_words: usize,
    /// Drop only whole noise tokens instead of raw substrings
    pub word_boundary_noise: bool,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            noise_words: DEFAULT_NOISE_WORDS.iter().map(|w| w.to_string()).collect(),
            max_phrase_words: DEFAULT_MAX_PHRASE_WORDS,
            word_boundary_noise: false,
        }
    }
}

/// Extracts canonical ingredient names from free text
#[derive(Debug, Clone)]
pub struct CaptionParser {
    normalizer: IngredientNormalizer,
    config: CaptionConfig,
    /// Trimmed noise words, used by the word-boundary mode
    noise_tokens: HashSet<String>,
}

impl CaptionParser {
    /// Create a parser with the default noise list and 3-word phrases
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_matcher::normalizer::IngredientNormalizer;
    /// use recipe_matcher::text_processing::CaptionParser;
    ///
    /// let parser = CaptionParser::new(IngredientNormalizer::default());
    /// let found = parser.extract_ingredients("A plate of grilled salmon, lemons and fresh dill");
    ///
    /// assert!(found.contains(&"lemon".to_string()));
    /// assert!(found.contains(&"dill".to_string()));
    /// ```
    pub fn new(normalizer: IngredientNormalizer) -> Self {
        Self::with_config(normalizer, CaptionConfig::default())
    }

    /// Create a parser with custom configuration
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_matcher::normalizer::IngredientNormalizer;
    /// use recipe_matcher::text_processing::{CaptionConfig, CaptionParser};
    ///
    /// let config = CaptionConfig {
    ///     word_boundary_noise: true,
    ///     ..Default::default()
    /// };
    /// let parser = CaptionParser::with_config(IngredientNormalizer::default(), config);
    /// assert_eq!(parser.extract_ingredients("salmon and rice"), vec!["salmon", "rice"]);
    /// ```
    pub fn with_config(normalizer: IngredientNormalizer, config: CaptionConfig) -> Self {
        let noise_tokens = config
            .noise_words
            .iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();

        info!(
            "Creating CaptionParser: {} noise words, max_phrase_words={}, word_boundary_noise={}",
            config.noise_words.len(),
            config.max_phrase_words,
            config.word_boundary_noise
        );

        Self {
            normalizer,
            config,
            noise_tokens,
        }
    }

    /// Extract canonical ingredient names from `text`
    ///
    /// The text is lowercased, stripped of noise and punctuation, then scanned
    /// position by position: the single word, the two-word phrase and the
    /// three-word phrase starting at each position are looked up in that order.
    /// Every hit is added once, in first-seen order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_matcher::normalizer::IngredientNormalizer;
    /// use recipe_matcher::text_processing::CaptionParser;
    ///
    /// let parser = CaptionParser::new(IngredientNormalizer::default());
    ///
    /// assert_eq!(
    ///     parser.extract_ingredients("a bowl of fresh chopped tomatoes and onions"),
    ///     vec!["tomato", "onion"]
    /// );
    /// assert!(parser.extract_ingredients("   ").is_empty());
    /// ```
    pub fn extract_ingredients(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            trace!("Empty caption, nothing to extract");
            return Vec::new();
        }

        let words = self.tokenize(text);
        debug!("Caption tokenized into {} words", words.len());

        let mut detected = HashSet::new();
        let mut ingredients = Vec::new();

        for i in 0..words.len() {
            for width in 1..=self.config.max_phrase_words {
                if i + width > words.len() {
                    break;
                }

                let phrase = words[i..i + width].join(" ");
                if let Some(canonical) = self.normalizer.lookup(&phrase) {
                    if detected.insert(canonical.to_string()) {
                        trace!("Detected '{}' from phrase '{}'", canonical, phrase);
                        ingredients.push(canonical.to_string());
                    }
                }
            }
        }

        debug!(
            "Extracted {} ingredients: {:?}",
            ingredients.len(),
            ingredients
        );
        ingredients
    }

    /// Like [`extract_ingredients`](Self::extract_ingredients), for an optional caption
    ///
    /// A missing caption (the vision service found nothing) is treated as empty.
    pub fn extract_from_caption(&self, caption: Option<&str>) -> Vec<String> {
        caption
            .map(|text| self.extract_ingredients(text))
            .unwrap_or_default()
    }

    /// Extract ingredients straight into an [`IngredientSet`]
    pub fn extract_ingredient_set(&self, text: &str) -> IngredientSet {
        IngredientSet::from_names(self.extract_ingredients(text))
    }

    /// Lowercase, remove noise and split into clean word tokens
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();

        if self.config.word_boundary_noise {
            return split_words(&lowered)
                .into_iter()
                .filter(|w| !self.noise_tokens.contains(w))
                .collect();
        }

        split_words(&self.remove_noise(&lowered))
    }

    /// Replace every noise entry, wherever it appears, with a single space
    fn remove_noise(&self, text: &str) -> String {
        let mut result = text.to_string();
        for noise in &self.config.noise_words {
            if noise.is_empty() {
                continue;
            }
            result = result.replace(noise.as_str(), " ");
        }
        trace!("Noise removed: '{}' -> '{}'", text, result);
        result
    }

    pub fn config(&self) -> &CaptionConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &IngredientNormalizer {
        &self.normalizer
    }
}

impl Default for CaptionParser {
    fn default() -> Self {
        Self::new(IngredientNormalizer::default())
    }
}

/// Keep only lowercase letters, digits and whitespace, then split on whitespace
fn split_words(text: &str) -> Vec<String> {
    NON_TOKEN_CHARS
        .replace_all(text, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient_table::SynonymTable;
    use std::sync::Arc;

    fn create_parser() -> CaptionParser {
        CaptionParser::default()
    }

    #[test]
    fn test_empty_input() {
        let parser = create_parser();

        assert!(parser.extract_ingredients("").is_empty());
        assert!(parser.extract_ingredients("   \n\t").is_empty());
        assert!(parser.extract_from_caption(None).is_empty());
    }

    #[test]
    fn test_noise_removal_example() {
        let parser = create_parser();
        let found = parser.extract_ingredients("a bowl of fresh chopped tomatoes and onions");

        assert_eq!(found, vec!["tomato", "onion"]);
    }

    #[test]
    fn test_multi_word_phrases() {
        let parser = create_parser();
        let found = parser.extract_ingredients("Drizzle olive oil over the bell pepper");

        // The phrase is tried before the next position's single word
        assert_eq!(found, vec!["olive oil", "oil", "bell pepper", "pepper"]);
    }

    #[test]
    fn test_phrase_lookup_order_at_each_position() {
        let parser = create_parser();
        let found = parser.extract_ingredients("soy sauce");

        // Position 0 tries "soy" (miss) then "soy sauce" (hit); position 1 finds "sauce"
        assert_eq!(found, vec!["soy sauce", "sauce"]);
    }

    #[test]
    fn test_three_word_phrases() {
        let table = SynonymTable::from_pairs([
            ("sweet chili sauce", "chili sauce"),
            ("chili sauce", "chili sauce"),
        ]);
        let parser = CaptionParser::new(IngredientNormalizer::new(Arc::new(table)));

        assert_eq!(
            parser.extract_ingredients("glazed with sweet chili sauce"),
            vec!["chili sauce"]
        );
    }

    #[test]
    fn test_max_phrase_words_limits_lookups() {
        let config = CaptionConfig {
            max_phrase_words: 1,
            ..Default::default()
        };
        let parser = CaptionParser::with_config(IngredientNormalizer::default(), config);

        assert_eq!(parser.extract_ingredients("soy sauce"), vec!["sauce"]);
    }

    #[test]
    fn test_punctuation_and_case() {
        let parser = create_parser();
        let found = parser.extract_ingredients("EGGS, Bacon, toast!!! (with Cheddar)");

        assert_eq!(found, vec!["egg", "bacon", "cheddar"]);
    }

    #[test]
    fn test_deduplication_keeps_first_seen_order() {
        let parser = create_parser();
        let found = parser.extract_ingredients("lemons, limes, lemon and more limes");

        assert_eq!(found, vec!["lemon", "lime"]);
    }

    #[test]
    fn test_synonyms_resolved() {
        let parser = create_parser();
        let found = parser.extract_ingredients("prawns with coriander and yoghurt");

        assert_eq!(found, vec!["shrimp", "cilantro", "yogurt"]);
    }

    #[test]
    fn test_unrecognized_words_dropped() {
        let parser = create_parser();

        assert!(parser
            .extract_ingredients("a person standing next to a table")
            .is_empty());
    }

    #[test]
    fn test_blunt_noise_removal_inside_words() {
        let parser = create_parser();

        // "on " inside "salmon " is removed, leaving the fragment "salm"
        assert_eq!(parser.extract_ingredients("salmon and rice"), vec!["rice"]);
        assert_eq!(parser.tokenize("salmon and rice"), vec!["salm", "rice"]);
    }

    #[test]
    fn test_word_boundary_noise_mode() {
        let config = CaptionConfig {
            word_boundary_noise: true,
            ..Default::default()
        };
        let parser = CaptionParser::with_config(IngredientNormalizer::default(), config);

        assert_eq!(parser.extract_ingredients("salmon and rice"), vec!["salmon", "rice"]);
        assert_eq!(
            parser.extract_ingredients("a bowl of fresh chopped tomatoes and onions"),
            vec!["tomato", "onion"]
        );
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let parser = create_parser();
        let text = "grilled chicken with rice, broccoli, garlic and soy sauce on a plate";

        let first = parser.extract_ingredients(text);
        let second = parser.extract_ingredients(text);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_output_is_always_canonical() {
        let parser = create_parser();
        let normalizer = IngredientNormalizer::default();
        let found = parser.extract_ingredients("potatoes, carrots, peaches, cherries and oats");

        for name in &found {
            assert_eq!(&normalizer.normalize(name), name);
        }
        assert_eq!(found, vec!["potato", "carrot", "peach", "cherry", "oat"]);
    }

    #[test]
    fn test_extract_ingredient_set() {
        let parser = create_parser();
        let set = parser.extract_ingredient_set("Tomatoes and basil");

        assert_eq!(set.len(), 2);
        assert!(set.contains("tomato"));
        assert!(set.contains("basil"));
    }
}
