//! # Caption Matching Example
//!
//! This example walks a few image captions through the matching engine: the
//! caption parser extracts canonical ingredients, the catalog filter narrows
//! the candidates, the overlap scorer ranks them, and the recommendation
//! ranker suggests recipes from a user's favorites.

use recipe_matcher::catalog_filter::search;
use recipe_matcher::catalog_store::JsonCatalog;
use recipe_matcher::config::{EngineConfig, PageRequest};
use recipe_matcher::detection::DetectionResult;
use recipe_matcher::matching::RecipeService;
use recipe_matcher::recipe_model::{Difficulty, FilterCriteria, Recipe};
use recipe_matcher::recommendation::TieBreak;
use recipe_matcher::text_processing::{CaptionConfig, CaptionParser};

fn sample_catalog() -> JsonCatalog {
    JsonCatalog::from_recipes(vec![
        Recipe::new(1, "Simple Tomato Pasta")
            .with_tags(&["vegetarian", "pasta"])
            .with_difficulty(Difficulty::Easy)
            .with_cuisine("italian")
            .with_cook_time(20)
            .with_prep_time(10)
            .with_servings(2)
            .with_description("Spaghetti in a quick garlic and tomato sauce"),
        Recipe::new(2, "Chicken Stir Fry")
            .with_tags(&["meat", "stir-fry", "chicken"])
            .with_difficulty(Difficulty::Medium)
            .with_cuisine("asian")
            .with_cook_time(25)
            .with_prep_time(15)
            .with_servings(4),
        Recipe::new(3, "Garlic Butter Shrimp")
            .with_tags(&["seafood", "shrimp", "garlic"])
            .with_difficulty(Difficulty::Easy)
            .with_cook_time(15),
        Recipe::new(4, "Mushroom Risotto")
            .with_tags(&["vegetarian", "rice", "italian"])
            .with_difficulty(Difficulty::Hard)
            .with_cuisine("italian")
            .with_cook_time(45)
            .with_servings(4)
            .with_description("Arborio rice stirred slowly with porcini stock"),
        Recipe::new(5, "Caprese Salad")
            .with_tags(&["vegetarian", "salad", "tomato"])
            .with_difficulty(Difficulty::Easy)
            .with_cuisine("italian")
            .with_cook_time(5)
            .with_prep_time(10)
            .with_servings(2),
    ])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🍅 Caption Matching Example");
    println!("===========================\n");

    let config = EngineConfig {
        tie_break: TieBreak::AscendingId,
        ..Default::default()
    };
    let service = RecipeService::new(sample_catalog(), config)?;

    // Example 1: Caption parsing and detection results
    println!("📷 Example 1: Parsing Vision Captions");
    println!("-------------------------------------");

    let captions = [
        "a bowl of fresh chopped tomatoes and onions",
        "prawns with garlic and butter on a plate",
        "a person standing next to a table",
    ];
    for caption in captions {
        let detection = DetectionResult::from_caption(service.parser(), caption, "demo");
        println!(
            "  \"{}\"\n    → {:?} (confidence {:.2})",
            caption, detection.ingredients, detection.confidence
        );
    }
    println!();

    // Example 2: Blunt versus word-boundary noise removal
    println!("🔧 Example 2: Noise Removal Modes");
    println!("---------------------------------");

    let strict = CaptionParser::with_config(
        service.parser().normalizer().clone(),
        CaptionConfig {
            word_boundary_noise: true,
            ..Default::default()
        },
    );
    let caption = "salmon and rice";
    println!("  blunt:  {:?}", service.parser().extract_ingredients(caption));
    println!("  strict: {:?}", strict.extract_ingredients(caption));
    println!();

    // Example 3: Matching a caption with filters
    println!("🔍 Example 3: Caption Matching With Filters");
    println!("-------------------------------------------");

    let criteria = FilterCriteria::new().with_difficulty("easy").with_max_time(30);
    let matched = service.match_caption(
        Some("Tomato and pasta on a white plate"),
        &criteria,
        PageRequest::default(),
    )?;
    println!("  ingredients: {:?}", matched.ingredients);
    for result in &matched.results {
        println!("  {}", result);
    }
    println!();

    // Example 4: Suggestions from favorites
    println!("⭐ Example 4: Suggestions From Favorites");
    println!("----------------------------------------");

    let favorites = service.resolve_favorites(&[1, 4])?;
    for suggestion in service.suggestions(&favorites, 3)? {
        println!("  {}", suggestion);
    }
    println!();

    // Example 5: Searching an in-memory recipe list
    println!("🗂  Example 5: Offline Search");
    println!("-----------------------------");

    let vegetarian = FilterCriteria::new().with_diet("vegetarian");
    for recipe in search(service.catalog().recipes(), "italian", &vegetarian) {
        let description = recipe.description.as_deref().unwrap_or("no description");
        let servings = recipe
            .servings
            .map_or_else(|| "?".to_string(), |n| n.to_string());
        println!("  {} | serves {} | {}", recipe, servings, description);
    }

    Ok(())
}
