//! # Recipe Matching Service
//!
//! Request pipelines composing the catalog read collaborator with the caption
//! parser, catalog filter, overlap scorer and recommendation ranker.
//!
//! ## Pipelines
//!
//! - **search_and_filter**: fetch a bounded window, filter, then paginate
//! - **match_recipes**: score one catalog page against detected ingredients
//! - **match_with_filters**: filtered candidates scored against ingredients
//! - **match_caption**: caption text through the parser into `match_with_filters`
//! - **suggestions**: favorites-derived tag weights ranking the catalog
//!
//! Catalog failures surface as [`EngineError::Catalog`]; the scoring core is
//! never invoked on a failed read.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog_filter::{filter, paginate};
use crate::config::{EngineConfig, PageRequest};
use crate::errors::{EngineError, EngineResult};
use crate::normalizer::IngredientNormalizer;
use crate::recipe_model::{FilterCriteria, IngredientSet, Recipe, ScoredRecipe};
use crate::recommendation::{build_weights, rank_with, sort_by_score};
use crate::scoring::OverlapScorer;
use crate::text_processing::CaptionParser;

/// Read access to the recipe catalog
pub trait RecipeCatalog {
    /// Recipes whose title or tags contain `query` (all recipes when blank),
    /// in a stable order, skipping `offset` and returning at most `limit`
    fn fetch_page(&self, query: &str, limit: usize, offset: usize) -> Result<Vec<Recipe>>;

    /// Recipes with the given ids; unknown ids are ignored
    fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Recipe>>;
}

/// Outcome of matching a caption against the catalog
#[derive(Debug, Clone, Serialize)]
pub struct CaptionMatch {
    /// Canonical ingredients found in the caption, first-seen order
    pub ingredients: Vec<String>,
    pub results: Vec<ScoredRecipe>,
}

/// Matching and recommendation pipelines over a catalog
pub struct RecipeService<C: RecipeCatalog> {
    catalog: C,
    parser: CaptionParser,
    scorer: OverlapScorer,
    config: EngineConfig,
}

impl<C: RecipeCatalog> RecipeService<C> {
    /// Create a service, loading the synonym table named by `config`
    ///
    /// Fails with [`EngineError::Config`] when the limits are inconsistent.
    pub fn new(catalog: C, config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let table = config.load_synonym_table()?;
        Ok(Self::with_normalizer(
            catalog,
            IngredientNormalizer::new(table),
            config,
        ))
    }

    /// Create a service around an existing normalizer
    pub fn with_normalizer(catalog: C, normalizer: IngredientNormalizer, config: EngineConfig) -> Self {
        let parser = CaptionParser::with_config(normalizer.clone(), config.caption.clone());
        let scorer = OverlapScorer::new(normalizer);

        Self {
            catalog,
            parser,
            scorer,
            config,
        }
    }

    /// Text search plus structured filters, paginated after filtering
    ///
    /// At most `max(limit + offset, 200)` recipes (capped at 2000) are read from
    /// the start of the catalog, so matches beyond that window are not seen.
    pub fn search_and_filter(
        &self,
        query: &str,
        criteria: &FilterCriteria,
        page: PageRequest,
    ) -> EngineResult<Vec<Recipe>> {
        page.validate()?;
        let window = self.config.limits.fetch_window(page);
        debug!(query = %query, window, "Fetching catalog window");

        let fetched = self.catalog.fetch_page(query, window, 0).map_err(|e| {
            warn!(error = %e, "Catalog read failed");
            EngineError::from(e)
        })?;

        let filtered = filter(&fetched, criteria);
        let total = filtered.len();
        let results = paginate(filtered, page);

        info!(
            fetched = fetched.len(),
            filtered = total,
            returned = results.len(),
            limit = page.limit,
            offset = page.offset,
            "Search and filter complete"
        );
        Ok(results)
    }

    /// Score one catalog page against detected ingredients
    ///
    /// Every recipe of the page is returned, zero scores included, sorted by
    /// descending score.
    pub fn match_recipes(&self, detected: &[String], page: PageRequest) -> EngineResult<Vec<ScoredRecipe>> {
        page.validate()?;
        let candidates = self
            .catalog
            .fetch_page("", page.limit, page.offset)
            .map_err(EngineError::from)?;

        let ingredients = IngredientSet::from_names(detected);
        let results = self.score_and_sort(&ingredients, &candidates);

        info!(
            ingredients = ingredients.len(),
            candidates = candidates.len(),
            "Matched recipes against detected ingredients"
        );
        Ok(results)
    }

    /// Score the filtered catalog against ingredients
    pub fn match_with_filters(
        &self,
        ingredients: &[String],
        criteria: &FilterCriteria,
        page: PageRequest,
    ) -> EngineResult<Vec<ScoredRecipe>> {
        let candidates = self.search_and_filter("", criteria, page)?;
        let ingredients = IngredientSet::from_names(ingredients);
        let results = self.score_and_sort(&ingredients, &candidates);

        info!(
            ingredients = ingredients.len(),
            candidates = candidates.len(),
            "Matched recipes with filters"
        );
        Ok(results)
    }

    /// Extract ingredients from a caption, then match them with filters
    ///
    /// A missing or empty caption matches with no ingredients, so every
    /// candidate comes back with a zero score.
    pub fn match_caption(
        &self,
        caption: Option<&str>,
        criteria: &FilterCriteria,
        page: PageRequest,
    ) -> EngineResult<CaptionMatch> {
        let ingredients = self.parser.extract_from_caption(caption);
        debug!(ingredients = ?ingredients, "Ingredients extracted from caption");

        let results = self.match_with_filters(&ingredients, criteria, page)?;
        Ok(CaptionMatch {
            ingredients,
            results,
        })
    }

    /// Recommend recipes sharing tags with the user's favorites
    ///
    /// Favorites themselves stay eligible as candidates.
    pub fn suggestions(&self, favorites: &[Recipe], limit: usize) -> EngineResult<Vec<ScoredRecipe>> {
        let weights = build_weights(favorites);
        if weights.is_empty() || limit == 0 {
            info!(limit, "No favorite tags or no room, no suggestions");
            return Ok(Vec::new());
        }

        let pool = self.config.limits.suggestion_candidates(limit);
        let candidates =
            self.search_and_filter("", &FilterCriteria::default(), PageRequest::new(pool, 0))?;
        let ranked = rank_with(&weights, &candidates, limit, self.config.tie_break);

        info!(
            favorites = favorites.len(),
            candidates = candidates.len(),
            returned = ranked.len(),
            "Suggestions ranked"
        );
        Ok(ranked)
    }

    /// Look favorites up by id in the catalog
    pub fn resolve_favorites(&self, ids: &[i64]) -> EngineResult<Vec<Recipe>> {
        let favorites = self.catalog.find_by_ids(ids).map_err(EngineError::from)?;
        if favorites.len() < ids.len() {
            warn!(
                requested = ids.len(),
                found = favorites.len(),
                "Some favorite ids are not in the catalog"
            );
        }
        Ok(favorites)
    }

    pub fn parser(&self) -> &CaptionParser {
        &self.parser
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn score_and_sort(&self, ingredients: &IngredientSet, candidates: &[Recipe]) -> Vec<ScoredRecipe> {
        let mut results = self.scorer.score(ingredients, candidates);
        sort_by_score(&mut results, self.config.tie_break);
        results
    }
}
