//! # Recipe Matcher
//!
//! Ingredient-based recipe retrieval and ranking. Free-text image captions are
//! turned into canonical ingredient names, catalog recipes are filtered by
//! structured criteria and scored by ingredient overlap, and personalized
//! suggestions are ranked from the tags of a user's favorites.

pub mod catalog_filter;
pub mod catalog_store;
pub mod config;
pub mod detection;
pub mod errors;
pub mod ingredient_table;
pub mod matching;
pub mod normalizer;
pub mod recipe_model;
pub mod recommendation;
pub mod scoring;
pub mod text_processing;
