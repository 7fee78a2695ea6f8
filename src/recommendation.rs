//! # Recommendation Module
//!
//! Preference profiling and tag-weighted ranking.
//!
//! A user's favorites are folded into [`PreferenceWeights`] (one point per
//! tag occurrence). Candidates are then ranked by the sum of the weights of
//! their tags. Candidates with no overlap are excluded entirely,
//! unlike the ingredient overlap scorer which keeps zero scores.

use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::recipe_model::{PreferenceWeights, Recipe, ScoredRecipe};

/// How recipes with equal scores are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Unstable sort; the relative order of equal scores is unspecified
    #[default]
    Unspecified,
    /// Equal scores ordered by ascending recipe id
    AscendingId,
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unspecified" | "unstable" => Ok(TieBreak::Unspecified),
            "id" | "ascending_id" | "ascending-id" => Ok(TieBreak::AscendingId),
            other => Err(format!("unknown tie-break '{other}'")),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::Unspecified => write!(f, "unspecified"),
            TieBreak::AscendingId => write!(f, "id"),
        }
    }
}

/// Count tag occurrences across a user's favorites
///
/// Every tag occurrence adds one point, so a tag repeated on a favorite
/// counts twice. Weights are raw counts, not normalized by the number of
/// favorites.
///
/// # Examples
///
/// ```rust
/// use recipe_matcher::recipe_model::Recipe;
/// use recipe_matcher::recommendation::build_weights;
///
/// let favorites = vec![
///     Recipe::new(1, "Carbonara").with_tags(&["italian", "pasta"]),
///     Recipe::new(2, "Caprese").with_tags(&["italian", "vegetarian"]),
/// ];
/// let weights = build_weights(&favorites);
///
/// assert_eq!(weights.weight("italian"), 2);
/// assert_eq!(weights.weight("pasta"), 1);
/// assert_eq!(weights.weight("vegetarian"), 1);
/// ```
pub fn build_weights(favorites: &[Recipe]) -> PreferenceWeights {
    let mut weights = PreferenceWeights::new();
    for favorite in favorites {
        for tag in &favorite.tags {
            weights.increment(tag);
        }
    }

    debug!(
        "Built preference weights over {} tags from {} favorites",
        weights.len(),
        favorites.len()
    );
    weights
}

/// Rank candidates by preference weight, with unspecified tie order
pub fn rank(weights: &PreferenceWeights, candidates: &[Recipe], limit: usize) -> Vec<ScoredRecipe> {
    rank_with(weights, candidates, limit, TieBreak::Unspecified)
}

/// Rank candidates by preference weight
///
/// Each candidate scores the sum of `weights[tag]` over its tags. Zero
/// scores are dropped, the rest sorted by descending score and truncated to
/// `limit`.
pub fn rank_with(
    weights: &PreferenceWeights,
    candidates: &[Recipe],
    limit: usize,
    tie_break: TieBreak,
) -> Vec<ScoredRecipe> {
    let mut ranked: Vec<ScoredRecipe> = candidates
        .iter()
        .filter_map(|recipe| {
            let score = recipe
                .tags
                .iter()
                .fold(0u32, |acc, tag| acc.saturating_add(weights.weight(tag)));
            (score > 0).then(|| ScoredRecipe::new(recipe.clone(), score))
        })
        .collect();

    let matched = ranked.len();
    sort_by_score(&mut ranked, tie_break);
    ranked.truncate(limit);

    debug!(
        "Ranked {} candidates: {} with overlap, returning {}",
        candidates.len(),
        matched,
        ranked.len()
    );
    ranked
}

/// Sort by descending score
pub fn sort_by_score(results: &mut [ScoredRecipe], tie_break: TieBreak) {
    match tie_break {
        TieBreak::Unspecified => results.sort_unstable_by(|a, b| b.score.cmp(&a.score)),
        TieBreak::AscendingId => results.sort_by(compare_score_then_id),
    }
}

fn compare_score_then_id(a: &ScoredRecipe, b: &ScoredRecipe) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.recipe.id.cmp(&b.recipe.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn favorites() -> Vec<Recipe> {
        vec![
            Recipe::new(10, "Spaghetti Carbonara").with_tags(&["italian", "pasta"]),
            Recipe::new(11, "Margherita Pizza").with_tags(&["italian", "vegetarian"]),
        ]
    }

    #[test]
    fn test_build_weights_reference_example() {
        let weights = build_weights(&favorites());

        let expected: PreferenceWeights = [("italian", 2), ("pasta", 1), ("vegetarian", 1)]
            .into_iter()
            .collect();
        assert_eq!(weights, expected);
    }

    #[test]
    fn test_build_weights_counts_every_occurrence() {
        let favorites = vec![
            Recipe::new(1, "Soup").with_tags(&["Soup", "soup ", "vegan", ""]),
            Recipe::new(2, "Lasagna").with_tags(&["italian", "italian"]),
        ];
        let weights = build_weights(&favorites);

        assert_eq!(weights.weight("soup"), 2);
        assert_eq!(weights.weight("vegan"), 1);
        assert_eq!(weights.weight("italian"), 2);
        assert_eq!(weights.len(), 3);
        assert!(build_weights(&[]).is_empty());
    }

    #[test]
    fn test_rank_sums_every_tag_occurrence() {
        let weights: PreferenceWeights = [("italian", 2)].into_iter().collect();
        let candidates = vec![Recipe::new(1, "Lasagna").with_tags(&["italian", "Italian"])];

        let ranked = rank(&weights, &candidates, 5);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 4);
    }

    #[test]
    fn test_rank_score_saturates() {
        let weights: PreferenceWeights = [("italian", u32::MAX)].into_iter().collect();
        let candidates = vec![Recipe::new(1, "Lasagna").with_tags(&["italian", "italian"])];

        assert_eq!(rank(&weights, &candidates, 5)[0].score, u32::MAX);
    }

    #[test]
    fn test_rank_excludes_zero_overlap() {
        let weights = build_weights(&favorites());
        let candidates = vec![
            Recipe::new(1, "Beef Tacos").with_tags(&["mexican", "meat"]),
            Recipe::new(2, "Penne Arrabbiata").with_tags(&["italian", "pasta"]),
            Recipe::new(3, "Plain Toast"),
        ];

        let ranked = rank(&weights, &candidates, 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].recipe.id, 2);
        assert_eq!(ranked[0].score, 3);
    }

    #[test]
    fn test_rank_orders_and_truncates() {
        let weights = build_weights(&favorites());
        let candidates = vec![
            Recipe::new(1, "Caprese Salad").with_tags(&["vegetarian"]),
            Recipe::new(2, "Lasagna").with_tags(&["italian", "pasta"]),
            Recipe::new(3, "Minestrone").with_tags(&["italian", "vegetarian", "soup"]),
            Recipe::new(4, "Risotto").with_tags(&["italian"]),
        ];

        let ranked = rank(&weights, &candidates, 2);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| r.score == 3));

        let all = rank(&weights, &candidates, 10);
        let scores: Vec<u32> = all.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![3, 3, 2, 1]);
        assert!(rank(&weights, &candidates, 0).is_empty());
    }

    #[test]
    fn test_ascending_id_tie_break_is_deterministic() {
        let weights = build_weights(&favorites());
        let candidates = vec![
            Recipe::new(9, "Lasagna").with_tags(&["italian", "pasta"]),
            Recipe::new(4, "Risotto").with_tags(&["italian"]),
            Recipe::new(3, "Minestrone").with_tags(&["italian", "vegetarian"]),
            Recipe::new(7, "Focaccia").with_tags(&["italian"]),
        ];

        let ranked = rank_with(&weights, &candidates, 10, TieBreak::AscendingId);
        let ids: Vec<i64> = ranked.iter().map(|r| r.recipe.id).collect();
        assert_eq!(ids, vec![3, 9, 4, 7]);
    }

    #[test]
    fn test_empty_weights_rank_nothing() {
        let candidates = vec![Recipe::new(1, "Lasagna").with_tags(&["italian"])];
        assert!(rank(&PreferenceWeights::new(), &candidates, 5).is_empty());
    }

    #[test]
    fn test_sort_by_score_descending() {
        let mut results = vec![
            ScoredRecipe::new(Recipe::new(1, "A"), 1),
            ScoredRecipe::new(Recipe::new(2, "B"), 5),
            ScoredRecipe::new(Recipe::new(3, "C"), 0),
        ];
        sort_by_score(&mut results, TieBreak::Unspecified);

        let scores: Vec<u32> = results.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![5, 1, 0]);
    }

    #[test]
    fn test_tie_break_parsing() {
        assert_eq!("id".parse::<TieBreak>(), Ok(TieBreak::AscendingId));
        assert_eq!(" Unspecified ".parse::<TieBreak>(), Ok(TieBreak::Unspecified));
        assert!("random".parse::<TieBreak>().is_err());
        assert_eq!(TieBreak::AscendingId.to_string(), "id");
    }
}
