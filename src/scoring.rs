//! # Overlap Scoring Module
//!
//! Scores catalog recipes against a set of detected ingredients. The score of
//! a recipe is the number of its tags whose canonical form is one of the
//! ingredients, plus the number of ingredients found inside its title. Every
//! tag occurrence counts, so repeated or synonymous tags each add a point.
//!
//! Scoring is plain membership and substring counting: no weighting, no
//! fuzzy matching. Zero scores are kept; callers decide whether to drop them.

use log::debug;

use crate::normalizer::IngredientNormalizer;
use crate::recipe_model::{IngredientSet, Recipe, ScoredRecipe};

/// Scores recipes by tag and title overlap with an ingredient set
#[derive(Debug, Clone, Default)]
pub struct OverlapScorer {
    normalizer: IngredientNormalizer,
}

impl OverlapScorer {
    /// Create a scorer that canonicalizes tags with `normalizer`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_matcher::normalizer::IngredientNormalizer;
    /// use recipe_matcher::recipe_model::{IngredientSet, Recipe};
    /// use recipe_matcher::scoring::OverlapScorer;
    ///
    /// let scorer = OverlapScorer::new(IngredientNormalizer::default());
    /// let recipe = Recipe::new(1, "Simple Tomato Pasta").with_tags(&["vegetarian", "pasta"]);
    /// let ingredients = IngredientSet::from_names(["tomato", "pasta"]);
    ///
    /// // tag "pasta" +1, title contains "tomato" +1 and "pasta" +1
    /// assert_eq!(scorer.score_recipe(&ingredients, &recipe), 3);
    /// ```
    pub fn new(normalizer: IngredientNormalizer) -> Self {
        Self { normalizer }
    }

    /// Score every candidate, in input order
    pub fn score(&self, ingredients: &IngredientSet, candidates: &[Recipe]) -> Vec<ScoredRecipe> {
        let scored: Vec<ScoredRecipe> = candidates
            .iter()
            .map(|recipe| ScoredRecipe::new(recipe.clone(), self.score_recipe(ingredients, recipe)))
            .collect();

        debug!(
            "Scored {} candidates against {} ingredients ({} with a non-zero score)",
            scored.len(),
            ingredients.len(),
            scored.iter().filter(|s| s.score > 0).count()
        );
        scored
    }

    /// Score a single recipe
    pub fn score_recipe(&self, ingredients: &IngredientSet, recipe: &Recipe) -> u32 {
        if ingredients.is_empty() {
            return 0;
        }

        let tag_hits = recipe
            .tags
            .iter()
            .filter(|tag| ingredients.contains(&self.normalizer.normalize(tag)))
            .count();

        let title = recipe.title.to_lowercase();
        let title_hits = ingredients
            .iter()
            .filter(|ingredient| title.contains(ingredient))
            .count();

        u32::try_from(tag_hits.saturating_add(title_hits)).unwrap_or(u32::MAX)
    }

    pub fn normalizer(&self) -> &IngredientNormalizer {
        &self.normalizer
    }
}
