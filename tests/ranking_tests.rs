//! Properties of the preference profiler and recommendation ranker.

use recipe_matcher::recipe_model::{PreferenceWeights, Recipe, ScoredRecipe};
use recipe_matcher::recommendation::{build_weights, rank, rank_with, TieBreak};

fn candidate_pool() -> Vec<Recipe> {
    let tag_sets: [&[&str]; 8] = [
        &["italian", "pasta"],
        &["mexican", "spicy"],
        &["vegetarian"],
        &["italian", "vegetarian", "soup"],
        &[],
        &["dessert"],
        &["pasta", "spicy"],
        &["italian"],
    ];

    tag_sets
        .iter()
        .enumerate()
        .map(|(i, tags)| Recipe::new(i as i64 + 1, &format!("Recipe {}", i + 1)).with_tags(tags))
        .collect()
}

fn weights() -> PreferenceWeights {
    build_weights(&[
        Recipe::new(100, "Carbonara").with_tags(&["italian", "pasta"]),
        Recipe::new(101, "Margherita").with_tags(&["italian", "vegetarian"]),
    ])
}

#[test]
fn test_rank_never_exceeds_limit() {
    let candidates = candidate_pool();
    let weights = weights();

    for limit in 0..12 {
        assert!(rank(&weights, &candidates, limit).len() <= limit);
    }
}

#[test]
fn test_rank_excludes_candidates_without_weighted_tags() {
    let candidates = candidate_pool();
    let ranked = rank(&weights(), &candidates, 1000);
    let ids: Vec<i64> = ranked.iter().map(|r| r.recipe.id).collect();

    // 2 (mexican, spicy), 5 (no tags) and 6 (dessert) share nothing with the favorites
    for excluded in [2, 5, 6] {
        assert!(!ids.contains(&excluded));
    }
    assert_eq!(ranked.len(), 5);
    assert!(ranked.iter().all(|r| r.score > 0));
}

#[test]
fn test_rank_scores_are_descending() {
    let ranked = rank(&weights(), &candidate_pool(), 1000);

    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_tie_break_only_reorders_equal_scores() {
    let candidates = candidate_pool();
    let weights = weights();

    let unspecified = rank_with(&weights, &candidates, 1000, TieBreak::Unspecified);
    let by_id = rank_with(&weights, &candidates, 1000, TieBreak::AscendingId);

    let scores = |ranked: &[ScoredRecipe]| -> Vec<u32> { ranked.iter().map(|r| r.score).collect() };
    assert_eq!(scores(&unspecified), scores(&by_id));

    let ids: Vec<i64> = by_id.iter().map(|r| r.recipe.id).collect();
    assert_eq!(ids, vec![1, 4, 8, 3, 7]);
}

#[test]
fn test_weights_ignore_favorite_count_normalization() {
    let one = build_weights(&[Recipe::new(1, "A").with_tags(&["italian"])]);
    let three = build_weights(&[
        Recipe::new(1, "A").with_tags(&["italian"]),
        Recipe::new(2, "B").with_tags(&["italian"]),
        Recipe::new(3, "C").with_tags(&["italian"]),
    ]);

    assert_eq!(one.weight("italian"), 1);
    assert_eq!(three.weight("italian"), 3);
}
