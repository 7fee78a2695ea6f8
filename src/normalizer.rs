//! # Ingredient Normalizer Module
//!
//! Maps a token or phrase to its canonical ingredient name using an injected
//! [`SynonymTable`]. Normalization never fails: unknown input comes back
//! lowercased and trimmed.

use log::trace;
use std::sync::Arc;

use crate::ingredient_table::SynonymTable;

/// Canonicalizes ingredient tokens against a synonym table
#[derive(Debug, Clone)]
pub struct IngredientNormalizer {
    table: Arc<SynonymTable>,
}

impl IngredientNormalizer {
    /// Create a normalizer over the given table
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_matcher::ingredient_table::SynonymTable;
    /// use recipe_matcher::normalizer::IngredientNormalizer;
    ///
    /// let normalizer = IngredientNormalizer::new(SynonymTable::shared_builtin());
    /// assert_eq!(normalizer.normalize(" Tomatoes "), "tomato");
    /// assert_eq!(normalizer.normalize("Saffron"), "saffron");
    /// assert!(normalizer.is_recognized("coriander"));
    /// ```
    pub fn new(table: Arc<SynonymTable>) -> Self {
        Self { table }
    }

    /// Normalizer over the built-in table
    pub fn with_builtin_table() -> Self {
        Self::new(SynonymTable::shared_builtin())
    }

    /// Canonical form of `token`, or the lowercased, trimmed token when unknown
    pub fn normalize(&self, token: &str) -> String {
        let key = token.trim().to_lowercase();
        match self.table.get(&key) {
            Some(canonical) => {
                trace!("Normalized '{}' -> '{}'", key, canonical);
                canonical.to_string()
            }
            None => key,
        }
    }

    /// Whether the lowercased, trimmed token has a table entry
    pub fn is_recognized(&self, token: &str) -> bool {
        self.table.contains(&token.trim().to_lowercase())
    }

    /// Whole-phrase lookup of an already lowercased phrase
    ///
    /// Used by the caption parser for its 1/2/3-word windows; no trimming or
    /// substring matching happens here.
    pub fn lookup(&self, phrase: &str) -> Option<&str> {
        self.table.get(phrase)
    }

    pub fn table(&self) -> &SynonymTable {
        &self.table
    }
}

impl Default for IngredientNormalizer {
    fn default() -> Self {
        Self::with_builtin_table()
    }
}
