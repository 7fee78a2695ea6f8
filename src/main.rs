use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use recipe_matcher::catalog_store::JsonCatalog;
use recipe_matcher::config::{max_time_from_raw, suggestion_limit, EngineConfig, PageRequest};
use recipe_matcher::detection::DetectionResult;
use recipe_matcher::matching::RecipeService;
use recipe_matcher::normalizer::IngredientNormalizer;
use recipe_matcher::recipe_model::FilterCriteria;
use recipe_matcher::text_processing::CaptionParser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Match recipes to detected ingredients", long_about = None)]
struct Cli {
    /// Recipe catalog JSON file (overrides RECIPE_CATALOG_PATH)
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// Synonym table JSON file (overrides RECIPE_SYNONYM_TABLE)
    #[arg(long, global = true)]
    synonyms: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract ingredients from a caption
    Parse {
        caption: String,
        #[arg(long, default_value = "cli")]
        provider: String,
    },
    /// Search the catalog by text and filters
    Search {
        #[arg(short, long, default_value = "")]
        query: String,
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Score recipes against ingredients or a caption
    Match {
        /// Comma-separated ingredient names
        #[arg(short, long, value_delimiter = ',', conflicts_with = "caption")]
        ingredients: Vec<String>,
        /// Caption text to extract ingredients from
        #[arg(long)]
        caption: Option<String>,
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Suggest recipes from favorite recipe ids
    Suggest {
        /// Comma-separated favorite recipe ids
        #[arg(short, long, value_delimiter = ',')]
        favorites: Vec<i64>,
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(long)]
    diet: Option<String>,
    #[arg(long)]
    difficulty: Option<String>,
    #[arg(long)]
    cuisine: Option<String>,
    /// Maximum cook time in minutes
    #[arg(long, allow_negative_numbers = true)]
    max_time: Option<i64>,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            diet: self.diet.clone(),
            difficulty: self.difficulty.clone(),
            cuisine: self.cuisine.clone(),
            max_time_minutes: max_time_from_raw(self.max_time),
        }
    }
}

#[derive(Args, Debug)]
struct PageArgs {
    #[arg(short, long, allow_negative_numbers = true)]
    limit: Option<i64>,
    #[arg(short, long, allow_negative_numbers = true)]
    offset: Option<i64>,
}

impl PageArgs {
    fn page(&self) -> PageRequest {
        PageRequest::from_raw(self.limit, self.offset)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env file before reading RUST_LOG
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut config = EngineConfig::from_env();

    if let Some(path) = cli.catalog {
        config.catalog_path = path;
    }
    if let Some(path) = cli.synonyms {
        config.synonym_table_path = Some(path);
    }

    match &cli.command {
        // Caption parsing needs no catalog
        Command::Parse { caption, provider } => {
            let normalizer = IngredientNormalizer::new(config.load_synonym_table()?);
            let parser = CaptionParser::with_config(normalizer, config.caption.clone());
            let result = DetectionResult::from_caption(&parser, caption, provider);
            print_json(&result, cli.pretty)
        }
        Command::Search {
            query,
            filters,
            page,
        } => {
            let service = load_service(config)?;
            let recipes = service.search_and_filter(query, &filters.criteria(), page.page())?;
            print_json(&recipes, cli.pretty)
        }
        Command::Match {
            ingredients,
            caption,
            filters,
            page,
        } => {
            let service = load_service(config)?;
            match caption {
                Some(text) => {
                    let matched =
                        service.match_caption(Some(text), &filters.criteria(), page.page())?;
                    print_json(&matched, cli.pretty)
                }
                None => {
                    let results =
                        service.match_with_filters(ingredients, &filters.criteria(), page.page())?;
                    print_json(&results, cli.pretty)
                }
            }
        }
        Command::Suggest { favorites, limit } => {
            let service = load_service(config)?;
            let favorites = service.resolve_favorites(favorites)?;
            let suggestions = service.suggestions(&favorites, suggestion_limit(*limit))?;
            print_json(&suggestions, cli.pretty)
        }
    }
}

fn load_service(config: EngineConfig) -> Result<RecipeService<JsonCatalog>> {
    let catalog = JsonCatalog::load(&config.catalog_path)?;
    let service = RecipeService::new(catalog, config)?;
    info!(recipes = service.catalog().len(), "Recipe service ready");
    Ok(service)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;

    println!("{json}");
    Ok(())
}
