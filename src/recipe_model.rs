//! # Recipe Data Model
//!
//! This module defines the request-scoped data structures the matching engine
//! works on: catalog recipes, ingredient sets, filter criteria, scored results
//! and preference weights.
//!
//! ## Core Concepts
//!
//! - **Recipe**: an immutable catalog snapshot read from the persistence layer
//! - **IngredientSet**: lowercase ingredient names, deduplicated, first-seen order kept
//! - **FilterCriteria**: optional structured constraints, all combined with AND
//! - **ScoredRecipe**: a recipe with its integer relevance score
//! - **PreferenceWeights**: tag frequencies derived from a user's favorites
//!
//! ## Usage
//!
//! ```rust
//! use recipe_matcher::recipe_model::{Difficulty, FilterCriteria, IngredientSet, Recipe};
//!
//! let recipe = Recipe::new(1, "Simple Tomato Pasta")
//!     .with_tags(&["vegetarian", "pasta"])
//!     .with_difficulty(Difficulty::Easy)
//!     .with_cook_time(20);
//!
//! let criteria = FilterCriteria::new().with_difficulty("easy");
//! let ingredients = IngredientSet::from_names(["Tomato", "pasta "]);
//!
//! assert!(ingredients.contains("tomato"));
//! assert_eq!(criteria.difficulty_key().as_deref(), Some("easy"));
//! assert!(recipe.has_tag("Pasta"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Difficulty levels a catalog recipe can be tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Lowercase name used for storage and comparisons
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

/// A catalog recipe as seen by the matching engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Stable identifier assigned by the persistence layer
    pub id: i64,

    /// Free-text title (e.g., "Tomato Basil Soup")
    pub title: String,

    /// Optional short description, display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Lowercase labels covering diet, cuisine and ingredient markers
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,

    /// Preparation time, display only
    #[serde(default, alias = "prepTimeMinutes", skip_serializing_if = "Option::is_none")]
    pub prep_time_minutes: Option<u32>,

    /// Cooking time used by the max-time filter
    #[serde(default, alias = "cookTimeMinutes", skip_serializing_if = "Option::is_none")]
    pub cook_time_minutes: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
}

impl Recipe {
    /// Create a recipe with only an id and a title
    pub fn new(id: i64, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: None,
            tags: Vec::new(),
            difficulty: None,
            cuisine: None,
            prep_time_minutes: None,
            cook_time_minutes: None,
            servings: None,
        }
    }

    /// Replace the tag list
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_cuisine(mut self, cuisine: &str) -> Self {
        self.cuisine = Some(cuisine.to_string());
        self
    }

    pub fn with_cook_time(mut self, minutes: u32) -> Self {
        self.cook_time_minutes = Some(minutes);
        self
    }

    pub fn with_prep_time(mut self, minutes: u32) -> Self {
        self.prep_time_minutes = Some(minutes);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = Some(servings);
        self
    }

    /// Check for a tag, ignoring case and surrounding whitespace
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.trim().to_lowercase();
        self.tags.iter().any(|t| t.trim().to_lowercase() == wanted)
    }

    /// Tags lowercased and trimmed, blanks dropped, duplicates collapsed (first-seen order)
    pub fn normalized_tags(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect()
    }
}

/// A set of ingredient names used as the target of overlap scoring
///
/// Names are lowercased and trimmed on insertion. Blank names are ignored: an
/// empty string would otherwise be a substring of every title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSet {
    ordered: Vec<String>,
    members: HashSet<String>,
}

impl IngredientSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from any list of names, keeping the first-seen order
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            set.insert(name.as_ref());
        }
        set
    }

    /// Insert a name; returns false when it was blank or already present
    pub fn insert(&mut self, name: &str) -> bool {
        let key = name.trim().to_lowercase();
        if key.is_empty() || self.members.contains(&key) {
            return false;
        }
        self.members.insert(key.clone());
        self.ordered.push(key);
        true
    }

    /// Membership test, ignoring case and surrounding whitespace
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(&name.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Names in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    /// Names in first-seen order, for display upstream
    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }
}

impl<S: AsRef<str>> FromIterator<S> for IngredientSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_names(iter)
    }
}

/// Optional structured constraints applied by the catalog filter
///
/// Every field is independent; `None` (or a blank string) means no constraint
/// on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Must match one of the recipe's tags
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Recipe cook time must be known and not exceed this bound
    #[serde(default)]
    pub max_time_minutes: Option<u32>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diet(mut self, diet: &str) -> Self {
        self.diet = Some(diet.to_string());
        self
    }

    pub fn with_difficulty(mut self, difficulty: &str) -> Self {
        self.difficulty = Some(difficulty.to_string());
        self
    }

    pub fn with_cuisine(mut self, cuisine: &str) -> Self {
        self.cuisine = Some(cuisine.to_string());
        self
    }

    pub fn with_max_time(mut self, minutes: u32) -> Self {
        self.max_time_minutes = Some(minutes);
        self
    }

    /// Merge two criteria; fields already set on `self` win
    pub fn combine(self, other: FilterCriteria) -> Self {
        Self {
            diet: self.diet.or(other.diet),
            difficulty: self.difficulty.or(other.difficulty),
            cuisine: self.cuisine.or(other.cuisine),
            max_time_minutes: self.max_time_minutes.or(other.max_time_minutes),
        }
    }

    /// True when no dimension is constrained
    pub fn is_empty(&self) -> bool {
        self.diet_key().is_none()
            && self.difficulty_key().is_none()
            && self.cuisine_key().is_none()
            && self.max_time_minutes.is_none()
    }

    pub fn diet_key(&self) -> Option<String> {
        comparison_key(&self.diet)
    }

    pub fn difficulty_key(&self) -> Option<String> {
        comparison_key(&self.difficulty)
    }

    pub fn cuisine_key(&self) -> Option<String> {
        comparison_key(&self.cuisine)
    }
}

fn comparison_key(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

/// A recipe paired with its relevance score for a single request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub score: u32,
}

impl ScoredRecipe {
    pub fn new(recipe: Recipe, score: u32) -> Self {
        Self { recipe, score }
    }
}

/// Tag frequencies inferred from a user's favorited recipes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceWeights {
    weights: BTreeMap<String, u32>,
}

impl PreferenceWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of a tag
    pub fn increment(&mut self, tag: &str) {
        let key = tag.trim().to_lowercase();
        if key.is_empty() {
            return;
        }
        let weight = self.weights.entry(key).or_insert(0);
        *weight = weight.saturating_add(1);
    }

    /// Weight of a tag, 0 when the tag was never seen
    pub fn weight(&self, tag: &str) -> u32 {
        self.weights
            .get(&tag.trim().to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.weights.iter().map(|(tag, weight)| (tag.as_str(), *weight))
    }

    /// The `n` heaviest tags, heaviest first, ties in alphabetical order
    pub fn top_tags(&self, n: usize) -> Vec<(&str, u32)> {
        let mut tags: Vec<(&str, u32)> = self.iter().collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        tags.truncate(n);
        tags
    }
}

impl<S: AsRef<str>> FromIterator<(S, u32)> for PreferenceWeights {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut weights = Self::new();
        for (tag, weight) in iter {
            let key = tag.as_ref().trim().to_lowercase();
            if !key.is_empty() {
                let entry = weights.weights.entry(key).or_insert(0);
                *entry = entry.saturating_add(weight);
            }
        }
        weights
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.title)?;

        if let Some(difficulty) = &self.difficulty {
            write!(f, " ({})", difficulty)?;
        }
        if let Some(minutes) = self.cook_time_minutes {
            write!(f, " {} min", minutes)?;
        }
        if !self.tags.is_empty() {
            write!(f, " [{}]", self.tags.join(", "))?;
        }

        Ok(())
    }
}

impl fmt::Display for ScoredRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3}  {}", self.score, self.recipe)
    }
}
