//! # JSON Catalog Store
//!
//! A read-only recipe catalog backed by a JSON file, used by the CLI and the
//! integration tests in place of a database.
//!
//! The file holds an array of recipe objects:
//!
//! ```json
//! [
//!   {"id": 1, "title": "Simple Tomato Pasta", "tags": ["vegetarian", "pasta"],
//!    "difficulty": "easy", "cuisine": "italian", "cook_time_minutes": 20}
//! ]
//! ```
//!
//! Tags are lowercased, trimmed and deduplicated on ingest. Recipes are kept
//! in ascending id order; a repeated id keeps its first occurrence.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::catalog_filter::matches_query;
use crate::matching::RecipeCatalog;
use crate::recipe_model::Recipe;

/// In-memory catalog loaded from JSON
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    recipes: Vec<Recipe>,
}

impl JsonCatalog {
    /// Build a catalog from recipes already in memory
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(recipes.len());

        for mut recipe in recipes {
            if !seen.insert(recipe.id) {
                warn!("Duplicate recipe id {} ('{}') skipped", recipe.id, recipe.title);
                continue;
            }
            recipe.tags = recipe.normalized_tags();
            kept.push(recipe);
        }
        kept.sort_by_key(|r| r.id);

        debug!("Catalog holds {} recipes", kept.len());
        Self { recipes: kept }
    }

    /// Parse a catalog from a JSON array of recipes
    pub fn from_json_str(json: &str) -> Result<Self> {
        let recipes: Vec<Recipe> =
            serde_json::from_str(json).context("Failed to parse recipe catalog JSON")?;
        Ok(Self::from_recipes(recipes))
    }

    /// Load a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading recipe catalog from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe catalog '{}'", path.display()))?;
        let catalog = Self::from_json_str(&content)
            .with_context(|| format!("Invalid recipe catalog '{}'", path.display()))?;
        info!("Loaded {} recipes from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// All recipes in ascending id order
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }
}

impl RecipeCatalog for JsonCatalog {
    fn fetch_page(&self, query: &str, limit: usize, offset: usize) -> Result<Vec<Recipe>> {
        Ok(self
            .recipes
            .iter()
            .filter(|recipe| matches_query(recipe, query))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Recipe>> {
        let wanted: HashSet<i64> = ids.iter().copied().collect();
        Ok(self
            .recipes
            .iter()
            .filter(|recipe| wanted.contains(&recipe.id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG_JSON: &str = r#"[
        {"id": 3, "title": "Vegan Buddha Bowl", "tags": ["Vegan", "vegan", " healthy "]},
        {"id": 1, "title": "Simple Tomato Pasta", "tags": ["vegetarian", "pasta"],
         "difficulty": "easy", "cook_time_minutes": 20},
        {"id": 2, "title": "Chicken Curry", "tags": ["meat"], "cuisine": "indian"},
        {"id": 1, "title": "Duplicate Pasta"}
    ]"#;

    #[test]
    fn test_ingest_normalizes_and_dedupes() {
        let catalog = JsonCatalog::from_json_str(CATALOG_JSON).unwrap();

        assert_eq!(catalog.len(), 3);
        let ids: Vec<i64> = catalog.recipes().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(catalog.recipes()[0].title, "Simple Tomato Pasta");
        assert_eq!(catalog.recipes()[2].tags, vec!["vegan", "healthy"]);
    }

    #[test]
    fn test_fetch_page() {
        let catalog = JsonCatalog::from_json_str(CATALOG_JSON).unwrap();

        assert_eq!(catalog.fetch_page("", 2, 0).unwrap().len(), 2);
        assert_eq!(catalog.fetch_page("", 10, 2).unwrap()[0].id, 3);
        assert!(catalog.fetch_page("", 10, 3).unwrap().is_empty());

        let curry = catalog.fetch_page("CURRY", 10, 0).unwrap();
        assert_eq!(curry.len(), 1);
        assert_eq!(curry[0].id, 2);
    }

    #[test]
    fn test_find_by_ids() {
        let catalog = JsonCatalog::from_json_str(CATALOG_JSON).unwrap();

        let found = catalog.find_by_ids(&[3, 1, 99]).unwrap();
        let ids: Vec<i64> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(catalog.find_by_ids(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", CATALOG_JSON).unwrap();

        let catalog = JsonCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_load_errors_carry_context() {
        let err = JsonCatalog::load(Path::new("/nonexistent/recipes.json")).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read recipe catalog"));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = JsonCatalog::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid recipe catalog"));
    }
}
