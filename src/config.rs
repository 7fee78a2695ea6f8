//! # Engine Configuration Module
//!
//! Pagination limits, request parameter sanitizing and the environment-driven
//! engine configuration (catalog location, synonym table, tie-break policy and
//! caption parsing options).

use log::{info, warn};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use crate::errors::{EngineError, EngineResult};
use crate::ingredient_table::SynonymTable;
use crate::recommendation::TieBreak;
use crate::text_processing::CaptionConfig;

// Request limits
pub const DEFAULT_PAGE_LIMIT: usize = 50;
pub const MAX_PAGE_LIMIT: usize = 200;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;
pub const MAX_SUGGESTION_LIMIT: usize = 100;

// Candidate windows fetched from the catalog
pub const FETCH_WINDOW_FLOOR: usize = 200;
pub const FETCH_WINDOW_CAP: usize = 2000;
pub const SUGGESTION_CANDIDATE_MULTIPLIER: usize = 5;
pub const SUGGESTION_CANDIDATE_FLOOR: usize = 100;

pub const DEFAULT_CATALOG_PATH: &str = "recipes.json";

/// An offset/limit window over a result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

impl PageRequest {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Build a page from raw request values
    ///
    /// A limit outside `1..=200` falls back to 50 and a negative offset falls
    /// back to 0, so a malformed request still gets a usable page.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_matcher::config::PageRequest;
    ///
    /// assert_eq!(PageRequest::from_raw(Some(20), Some(40)), PageRequest::new(20, 40));
    /// assert_eq!(PageRequest::from_raw(Some(500), Some(-3)), PageRequest::new(50, 0));
    /// assert_eq!(PageRequest::from_raw(None, None), PageRequest::default());
    /// ```
    pub fn from_raw(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = limit
            .filter(|n| (1..=MAX_PAGE_LIMIT as i64).contains(n))
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_PAGE_LIMIT);
        let offset = offset
            .filter(|n| *n >= 0)
            .map(|n| n as usize)
            .unwrap_or(0);

        Self { limit, offset }
    }

    /// Reject an empty page; `from_raw` never produces one
    pub fn validate(&self) -> EngineResult<()> {
        if self.limit == 0 {
            return Err(EngineError::InvalidInput(
                "page limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

/// Suggestion count from a raw request value, 10 when outside `1..=100`
pub fn suggestion_limit(raw: Option<i64>) -> usize {
    raw.filter(|n| (1..=MAX_SUGGESTION_LIMIT as i64).contains(n))
        .map(|n| n as usize)
        .unwrap_or(DEFAULT_SUGGESTION_LIMIT)
}

/// Max-time constraint from a raw request value; non-positive means none
pub fn max_time_from_raw(raw: Option<i64>) -> Option<u32> {
    raw.filter(|n| *n > 0)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
}

/// Limits applied by the service pipelines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitConfig {
    /// Smallest catalog window fetched before filtering
    pub fetch_window_floor: usize,
    /// Largest catalog window fetched before filtering
    pub fetch_window_cap: usize,
    /// Suggestion candidates fetched per requested suggestion
    pub suggestion_multiplier: usize,
    /// Smallest suggestion candidate pool
    pub suggestion_floor: usize,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            fetch_window_floor: FETCH_WINDOW_FLOOR,
            fetch_window_cap: FETCH_WINDOW_CAP,
            suggestion_multiplier: SUGGESTION_CANDIDATE_MULTIPLIER,
            suggestion_floor: SUGGESTION_CANDIDATE_FLOOR,
        }
    }
}

impl LimitConfig {
    /// Number of recipes pulled from the catalog before filtering a page
    ///
    /// Filtering happens after the fetch, so the window is widened to the
    /// floor and capped at the cap.
    pub fn fetch_window(&self, page: PageRequest) -> usize {
        page.limit
            .saturating_add(page.offset)
            .max(self.fetch_window_floor)
            .min(self.fetch_window_cap)
    }

    /// Candidate pool size for `limit` suggestions
    pub fn suggestion_candidates(&self, limit: usize) -> usize {
        limit
            .saturating_mul(self.suggestion_multiplier)
            .max(self.suggestion_floor)
    }
}

/// Top-level configuration of the matching engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Optional JSON synonym table replacing the built-in one
    pub synonym_table_path: Option<PathBuf>,
    /// JSON catalog file read by the CLI
    pub catalog_path: PathBuf,
    /// Ordering of equal scores
    pub tie_break: TieBreak,
    pub caption: CaptionConfig,
    pub limits: LimitConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            synonym_table_path: None,
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            tie_break: TieBreak::default(),
            caption: CaptionConfig::default(),
            limits: LimitConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Build the configuration from the environment
    ///
    /// A `.env` file is loaded first when present. Recognized variables:
    ///
    /// - `RECIPE_CATALOG_PATH`: catalog JSON file
    /// - `RECIPE_SYNONYM_TABLE`: synonym table JSON file
    /// - `RECIPE_TIE_BREAK`: `unspecified` or `id`
    /// - `RECIPE_STRICT_NOISE`: `true` to drop whole noise words only
    ///
    /// Unparsable values keep their defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = non_blank(lookup("RECIPE_CATALOG_PATH")) {
            config.catalog_path = PathBuf::from(path);
        }

        config.synonym_table_path = non_blank(lookup("RECIPE_SYNONYM_TABLE")).map(PathBuf::from);

        if let Some(raw) = non_blank(lookup("RECIPE_TIE_BREAK")) {
            match raw.parse::<TieBreak>() {
                Ok(tie_break) => config.tie_break = tie_break,
                Err(e) => warn!("Ignoring RECIPE_TIE_BREAK: {}", e),
            }
        }

        if let Some(raw) = non_blank(lookup("RECIPE_STRICT_NOISE")) {
            match parse_bool(&raw) {
                Some(strict) => config.caption.word_boundary_noise = strict,
                None => warn!("Ignoring RECIPE_STRICT_NOISE: expected a boolean, got '{}'", raw),
            }
        }

        info!(
            "Engine configuration: catalog={}, synonym_table={:?}, tie_break={}, strict_noise={}",
            config.catalog_path.display(),
            config.synonym_table_path,
            config.tie_break,
            config.caption.word_boundary_noise
        );
        config
    }

    /// Check the limit and caption settings for values no pipeline can use
    pub fn validate(&self) -> EngineResult<()> {
        let limits = &self.limits;
        if limits.fetch_window_floor > limits.fetch_window_cap {
            return Err(EngineError::Config(format!(
                "fetch window floor {} exceeds cap {}",
                limits.fetch_window_floor, limits.fetch_window_cap
            )));
        }
        if limits.suggestion_multiplier == 0 {
            return Err(EngineError::Config(
                "suggestion multiplier must be positive".to_string(),
            ));
        }
        if self.caption.max_phrase_words == 0 {
            return Err(EngineError::Config(
                "caption phrase width must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured synonym table file, or the shared built-in table
    pub fn load_synonym_table(&self) -> EngineResult<Arc<SynonymTable>> {
        match &self.synonym_table_path {
            Some(path) => Ok(Arc::new(SynonymTable::load_from_file(path)?)),
            None => Ok(SynonymTable::shared_builtin()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
