//! # Ingredient Synonym Table Module
//!
//! This module holds the lookup structure mapping ingredient variants (plurals,
//! alternate spellings, multi-word phrases) to canonical ingredient names.
//!
//! The table is an explicit value handed to the normalizer. Tests substitute
//! small fixture tables and deployments may load a replacement table from a
//! JSON file.

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use log::{debug, info, warn};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::errors::{EngineError, EngineResult};

/// Default variant → canonical pairs
const BUILTIN_SYNONYMS: &[(&str, &str)] = &[
    // Vegetables
    ("tomato", "tomato"),
    ("tomatoes", "tomato"),
    ("onion", "onion"),
    ("onions", "onion"),
    ("garlic", "garlic"),
    ("garlics", "garlic"),
    ("pepper", "pepper"),
    ("peppers", "pepper"),
    ("bell pepper", "bell pepper"),
    ("carrot", "carrot"),
    ("carrots", "carrot"),
    ("potato", "potato"),
    ("potatoes", "potato"),
    ("lettuce", "lettuce"),
    ("spinach", "spinach"),
    ("broccoli", "broccoli"),
    ("cucumber", "cucumber"),
    ("cucumbers", "cucumber"),
    ("celery", "celery"),
    ("mushroom", "mushroom"),
    ("mushrooms", "mushroom"),
    ("zucchini", "zucchini"),
    ("eggplant", "eggplant"),
    ("corn", "corn"),
    ("peas", "peas"),
    ("beans", "beans"),
    ("bean", "bean"),
    ("cabbage", "cabbage"),
    ("cauliflower", "cauliflower"),
    ("asparagus", "asparagus"),
    ("leek", "leek"),
    ("leeks", "leek"),
    ("radish", "radish"),
    ("radishes", "radish"),
    ("beet", "beet"),
    ("beets", "beet"),
    ("squash", "squash"),
    ("pumpkin", "pumpkin"),
    ("kale", "kale"),
    ("arugula", "arugula"),
    // Herbs
    ("basil", "basil"),
    ("parsley", "parsley"),
    ("cilantro", "cilantro"),
    ("coriander", "cilantro"),
    ("mint", "mint"),
    ("thyme", "thyme"),
    ("rosemary", "rosemary"),
    ("oregano", "oregano"),
    ("dill", "dill"),
    ("chive", "chive"),
    ("chives", "chive"),
    ("ginger", "ginger"),
    // Proteins
    ("chicken", "chicken"),
    ("beef", "beef"),
    ("pork", "pork"),
    ("lamb", "lamb"),
    ("turkey", "turkey"),
    ("duck", "duck"),
    ("fish", "fish"),
    ("salmon", "salmon"),
    ("tuna", "tuna"),
    ("shrimp", "shrimp"),
    ("prawns", "shrimp"),
    ("crab", "crab"),
    ("lobster", "lobster"),
    ("egg", "egg"),
    ("eggs", "egg"),
    ("bacon", "bacon"),
    ("sausage", "sausage"),
    ("sausages", "sausage"),
    ("ham", "ham"),
    ("tofu", "tofu"),
    // Dairy
    ("cheese", "cheese"),
    ("milk", "milk"),
    ("cream", "cream"),
    ("butter", "butter"),
    ("yogurt", "yogurt"),
    ("yoghurt", "yogurt"),
    ("mozzarella", "mozzarella"),
    ("cheddar", "cheddar"),
    ("parmesan", "parmesan"),
    ("feta", "feta"),
    ("ricotta", "ricotta"),
    // Grains & pasta
    ("rice", "rice"),
    ("pasta", "pasta"),
    ("noodle", "noodle"),
    ("noodles", "noodle"),
    ("bread", "bread"),
    ("flour", "flour"),
    ("oat", "oat"),
    ("oats", "oat"),
    ("quinoa", "quinoa"),
    ("couscous", "couscous"),
    ("barley", "barley"),
    // Fruits
    ("apple", "apple"),
    ("apples", "apple"),
    ("banana", "banana"),
    ("bananas", "banana"),
    ("orange", "orange"),
    ("oranges", "orange"),
    ("lemon", "lemon"),
    ("lemons", "lemon"),
    ("lime", "lime"),
    ("limes", "lime"),
    ("strawberry", "strawberry"),
    ("strawberries", "strawberry"),
    ("blueberry", "blueberry"),
    ("blueberries", "blueberry"),
    ("raspberry", "raspberry"),
    ("raspberries", "raspberry"),
    ("grape", "grape"),
    ("grapes", "grape"),
    ("mango", "mango"),
    ("mangoes", "mango"),
    ("pineapple", "pineapple"),
    ("watermelon", "watermelon"),
    ("peach", "peach"),
    ("peaches", "peach"),
    ("pear", "pear"),
    ("pears", "pear"),
    ("cherry", "cherry"),
    ("cherries", "cherry"),
    ("avocado", "avocado"),
    ("avocados", "avocado"),
    ("coconut", "coconut"),
    // Legumes & nuts
    ("lentil", "lentil"),
    ("lentils", "lentil"),
    ("chickpea", "chickpea"),
    ("chickpeas", "chickpea"),
    ("almond", "almond"),
    ("almonds", "almond"),
    ("walnut", "walnut"),
    ("walnuts", "walnut"),
    ("peanut", "peanut"),
    ("peanuts", "peanut"),
    ("cashew", "cashew"),
    ("cashews", "cashew"),
    ("pistachio", "pistachio"),
    ("pistachios", "pistachio"),
    // Condiments & seasonings
    ("salt", "salt"),
    ("sugar", "sugar"),
    ("oil", "oil"),
    ("olive oil", "olive oil"),
    ("vinegar", "vinegar"),
    ("soy sauce", "soy sauce"),
    ("honey", "honey"),
    ("mustard", "mustard"),
    ("ketchup", "ketchup"),
    ("mayonnaise", "mayonnaise"),
    ("hot sauce", "hot sauce"),
    ("chili", "chili"),
    ("chilli", "chili"),
    ("cumin", "cumin"),
    ("paprika", "paprika"),
    ("turmeric", "turmeric"),
    ("cinnamon", "cinnamon"),
    ("nutmeg", "nutmeg"),
    ("vanilla", "vanilla"),
    // Other
    ("wine", "wine"),
    ("stock", "stock"),
    ("broth", "broth"),
    ("sauce", "sauce"),
    ("soup", "soup"),
];

lazy_static! {
    static ref BUILTIN_TABLE: Arc<SynonymTable> = Arc::new(SynonymTable::builtin());
}

/// Variant → canonical ingredient name lookup
///
/// Keys may be single words ("tomatoes") or whole phrases ("olive oil"); they
/// are only ever matched as complete phrases, never as substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    entries: HashMap<String, String>,
}

impl SynonymTable {
    /// Build the default table covering common vegetables, proteins, dairy,
    /// grains, fruits, nuts and condiments
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_SYNONYMS.iter().copied())
    }

    /// Shared handle to the default table, built once on first use
    pub fn shared_builtin() -> Arc<SynonymTable> {
        Arc::clone(&BUILTIN_TABLE)
    }

    /// Build a table from `(variant, canonical)` pairs
    ///
    /// Keys and values are lowercased and trimmed; pairs with a blank side are
    /// skipped. Later pairs overwrite earlier ones for the same variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_matcher::ingredient_table::SynonymTable;
    ///
    /// let table = SynonymTable::from_pairs([("Tomatoes", "tomato"), ("tomato", "tomato")]);
    /// assert_eq!(table.get("tomatoes"), Some("tomato"));
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries = HashMap::new();
        for (variant, canonical) in pairs {
            let variant = variant.as_ref().trim().to_lowercase();
            let canonical = canonical.as_ref().trim().to_lowercase();
            if variant.is_empty() || canonical.is_empty() {
                warn!(
                    "Skipping synonym entry with blank side: '{}' -> '{}'",
                    variant, canonical
                );
                continue;
            }
            entries.insert(variant, canonical);
        }
        debug!("Built synonym table with {} entries", entries.len());
        Self { entries }
    }

    /// Parse a table from a JSON object of `"variant": "canonical"` pairs
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| EngineError::TableLoad(format!("invalid synonym table JSON: {e}")))?;
        let table = Self::from_pairs(raw);
        table.validate()?;
        Ok(table)
    }

    /// Load and validate a table from a JSON file
    pub fn load_from_file(path: &Path) -> EngineResult<Self> {
        info!("Loading synonym table from {}", path.display());
        let content = read_table_file(path).map_err(|e| EngineError::TableLoad(format!("{e:#}")))?;
        let table = Self::from_json_str(&content)?;
        info!(
            "Loaded synonym table with {} entries from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Validate table contents
    ///
    /// Every canonical name that also appears as a key must map to itself, so
    /// normalizing twice gives the same result as normalizing once.
    pub fn validate(&self) -> EngineResult<()> {
        if self.entries.is_empty() {
            return Err(EngineError::TableLoad("synonym table cannot be empty".to_string()));
        }

        for (variant, canonical) in &self.entries {
            for value in [variant, canonical] {
                if value.chars().any(|c| c.is_control()) {
                    return Err(EngineError::TableLoad(format!(
                        "entry '{}' contains control characters",
                        value
                    )));
                }
                if value.chars().any(|c| c.is_uppercase()) {
                    return Err(EngineError::TableLoad(format!(
                        "entry '{}' must be lowercase",
                        value
                    )));
                }
            }

            if let Some(target) = self.entries.get(canonical) {
                if target != canonical {
                    return Err(EngineError::TableLoad(format!(
                        "canonical name '{}' (from '{}') maps onward to '{}'",
                        canonical, variant, target
                    )));
                }
            }
        }

        Ok(())
    }

    /// Exact lookup of an already lowercased, trimmed variant or phrase
    pub fn get(&self, variant: &str) -> Option<&str> {
        self.entries.get(variant).map(String::as_str)
    }

    pub fn contains(&self, variant: &str) -> bool {
        self.entries.contains_key(variant)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct canonical names, sorted
    pub fn canonical_names(&self) -> Vec<&str> {
        self.entries
            .values()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of words in the longest key
    pub fn longest_phrase_words(&self) -> usize {
        self.entries
            .keys()
            .map(|k| k.split_whitespace().count())
            .max()
            .unwrap_or(0)
    }
}

fn read_table_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read synonym table file '{}'", path.display()))
}
