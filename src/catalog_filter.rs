//! # Catalog Filter Module
//!
//! Narrows a candidate recipe list by structured criteria and by a free-text
//! query. Every constraint is optional and all constraints combine with AND;
//! there is no OR or negation. Relative order of the survivors is preserved.

use log::debug;

use crate::config::PageRequest;
use crate::recipe_model::{FilterCriteria, Recipe};

/// Keep the candidates that satisfy every constraint in `criteria`
///
/// # Examples
///
/// ```rust
/// use recipe_matcher::catalog_filter::filter;
/// use recipe_matcher::recipe_model::{Difficulty, FilterCriteria, Recipe};
///
/// let candidates = vec![
///     Recipe::new(1, "Tomato Pasta").with_difficulty(Difficulty::Easy).with_cook_time(20),
///     Recipe::new(2, "Beef Wellington").with_difficulty(Difficulty::Hard).with_cook_time(90),
/// ];
///
/// let quick = filter(&candidates, &FilterCriteria::new().with_max_time(30));
/// assert_eq!(quick.len(), 1);
/// assert_eq!(quick[0].id, 1);
///
/// // No constraints: identity
/// assert_eq!(filter(&candidates, &FilterCriteria::new()), candidates);
/// ```
pub fn filter(candidates: &[Recipe], criteria: &FilterCriteria) -> Vec<Recipe> {
    let kept: Vec<Recipe> = candidates
        .iter()
        .filter(|recipe| matches(recipe, criteria))
        .cloned()
        .collect();

    debug!(
        "Filter kept {} of {} candidates (criteria: {:?})",
        kept.len(),
        candidates.len(),
        criteria
    );
    kept
}

/// Whether a single recipe satisfies every constraint in `criteria`
pub fn matches(recipe: &Recipe, criteria: &FilterCriteria) -> bool {
    if let Some(difficulty) = criteria.difficulty_key() {
        match &recipe.difficulty {
            Some(d) if d.as_str() == difficulty => {}
            _ => return false,
        }
    }

    if let Some(cuisine) = criteria.cuisine_key() {
        match &recipe.cuisine {
            Some(c) if c.trim().to_lowercase() == cuisine => {}
            _ => return false,
        }
    }

    if let Some(max_time) = criteria.max_time_minutes {
        // Unknown cook time disqualifies
        match recipe.cook_time_minutes {
            Some(minutes) if minutes <= max_time => {}
            _ => return false,
        }
    }

    if let Some(diet) = criteria.diet_key() {
        if !recipe.has_tag(&diet) {
            return false;
        }
    }

    true
}

/// Free-text match against the title and tags
///
/// A blank query matches everything. Otherwise the lowercased, trimmed query
/// must appear inside the lowercased title or inside one of the tags.
pub fn matches_query(recipe: &Recipe, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    recipe.title.to_lowercase().contains(&needle)
        || recipe
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Apply the text query first, then the structured criteria
pub fn search(candidates: &[Recipe], query: &str, criteria: &FilterCriteria) -> Vec<Recipe> {
    candidates
        .iter()
        .filter(|recipe| matches_query(recipe, query) && matches(recipe, criteria))
        .cloned()
        .collect()
}

/// Offset/limit slice of an already filtered list
///
/// An offset at or past the end yields an empty list.
pub fn paginate<T>(items: Vec<T>, page: PageRequest) -> Vec<T> {
    if page.offset >= items.len() {
        return Vec::new();
    }

    items
        .into_iter()
        .skip(page.offset)
        .take(page.limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_model::Difficulty;

    fn catalog() -> Vec<Recipe> {
        vec![
            Recipe::new(1, "Simple Tomato Pasta")
                .with_tags(&["vegetarian", "pasta"])
                .with_difficulty(Difficulty::Easy)
                .with_cuisine("Italian")
                .with_cook_time(20),
            Recipe::new(2, "Chicken Curry")
                .with_tags(&["meat", "spicy"])
                .with_difficulty(Difficulty::Medium)
                .with_cuisine("indian")
                .with_cook_time(45),
            Recipe::new(3, "Vegan Buddha Bowl")
                .with_tags(&["Vegan", "vegetarian", "healthy"])
                .with_difficulty(Difficulty::Easy),
            Recipe::new(4, "Mushroom Risotto")
                .with_tags(&["vegetarian"])
                .with_cuisine("italian")
                .with_cook_time(40),
        ]
    }

    fn ids(recipes: &[Recipe]) -> Vec<i64> {
        recipes.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let candidates = catalog();
        assert_eq!(filter(&candidates, &FilterCriteria::new()), candidates);
        assert!(filter(&[], &FilterCriteria::new().with_diet("vegan")).is_empty());
    }

    #[test]
    fn test_single_dimensions() {
        let candidates = catalog();

        assert_eq!(
            ids(&filter(&candidates, &FilterCriteria::new().with_difficulty("EASY"))),
            vec![1, 3]
        );
        assert_eq!(
            ids(&filter(&candidates, &FilterCriteria::new().with_cuisine(" italian "))),
            vec![1, 4]
        );
        assert_eq!(
            ids(&filter(&candidates, &FilterCriteria::new().with_diet("vegan"))),
            vec![3]
        );
    }

    #[test]
    fn test_missing_fields_disqualify() {
        let candidates = catalog();

        // Recipe 3 has no cook time, recipe 4 no difficulty
        assert_eq!(
            ids(&filter(&candidates, &FilterCriteria::new().with_max_time(60))),
            vec![1, 2, 4]
        );
        assert_eq!(
            ids(&filter(&candidates, &FilterCriteria::new().with_difficulty("medium"))),
            vec![2]
        );
    }

    #[test]
    fn test_max_time_bound_is_inclusive() {
        let candidates = catalog();
        assert_eq!(
            ids(&filter(&candidates, &FilterCriteria::new().with_max_time(20))),
            vec![1]
        );
        assert!(filter(&candidates, &FilterCriteria::new().with_max_time(0)).is_empty());
    }

    #[test]
    fn test_filter_is_conjunctive() {
        let candidates = catalog();
        let diet = FilterCriteria::new().with_diet("vegetarian");
        let time = FilterCriteria::new().with_max_time(30);
        let both = diet.clone().combine(time.clone());

        let combined = filter(&candidates, &both);
        let sequential = filter(&filter(&candidates, &diet), &time);

        assert_eq!(combined, sequential);
        assert_eq!(ids(&combined), vec![1]);
        for recipe in &combined {
            assert!(matches(recipe, &diet));
            assert!(matches(recipe, &time));
        }
    }

    #[test]
    fn test_unknown_difficulty_matches_nothing() {
        let candidates = catalog();
        assert!(filter(&candidates, &FilterCriteria::new().with_difficulty("extreme")).is_empty());
    }

    #[test]
    fn test_matches_query() {
        let recipe = &catalog()[0];

        assert!(matches_query(recipe, ""));
        assert!(matches_query(recipe, "   "));
        assert!(matches_query(recipe, "TOMATO"));
        assert!(matches_query(recipe, "veget"));
        assert!(!matches_query(recipe, "curry"));
    }

    #[test]
    fn test_search_combines_query_and_criteria() {
        let candidates = catalog();
        let criteria = FilterCriteria::new().with_cuisine("italian");

        assert_eq!(ids(&search(&candidates, "vegetarian", &criteria)), vec![1, 4]);
        assert_eq!(ids(&search(&candidates, "risotto", &criteria)), vec![4]);
        assert!(search(&candidates, "curry", &criteria).is_empty());
    }

    #[test]
    fn test_paginate() {
        let items: Vec<i64> = (1..=10).collect();

        assert_eq!(paginate(items.clone(), PageRequest::new(3, 0)), vec![1, 2, 3]);
        assert_eq!(paginate(items.clone(), PageRequest::new(3, 8)), vec![9, 10]);
        assert!(paginate(items.clone(), PageRequest::new(3, 10)).is_empty());
        assert!(paginate(items, PageRequest::new(3, 42)).is_empty());
    }
}
