//! # Detection Result Module
//!
//! Wraps the ingredients parsed from a vision-service caption together with
//! the raw caption, a confidence estimate and provenance metadata, in the
//! JSON shape returned to API clients.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::text_processing::CaptionParser;

/// Confidence when no ingredient was recognized
pub const CONFIDENCE_NONE: f64 = 0.3;
/// Confidence when a single ingredient was recognized
pub const CONFIDENCE_SINGLE: f64 = 0.6;
/// Confidence when several ingredients were recognized
pub const CONFIDENCE_MULTIPLE: f64 = 0.85;

/// Ingredients detected in an image caption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub ingredients: Vec<String>,
    /// Caption text as returned by the vision service
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub raw_response: String,
    pub confidence: f64,
    pub provider: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

impl DetectionResult {
    /// Parse `caption` and build the result for `provider`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_matcher::detection::DetectionResult;
    /// use recipe_matcher::text_processing::CaptionParser;
    ///
    /// let parser = CaptionParser::default();
    /// let result = DetectionResult::from_caption(&parser, "tomatoes and basil on a plate", "huggingface");
    ///
    /// assert_eq!(result.ingredients, vec!["tomato", "basil"]);
    /// assert_eq!(result.confidence, 0.85);
    /// ```
    pub fn from_caption(parser: &CaptionParser, caption: &str, provider: &str) -> Self {
        let ingredients = parser.extract_ingredients(caption);
        let confidence = confidence_for(ingredients.len());

        let mut metadata = BTreeMap::new();
        metadata.insert("caption".to_string(), Value::from(caption));
        metadata.insert(
            "detected_at".to_string(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        metadata.insert(
            "ingredient_count".to_string(),
            Value::from(ingredients.len()),
        );

        Self {
            ingredients,
            raw_response: caption.to_string(),
            confidence,
            provider: provider.to_string(),
            metadata,
        }
    }

    /// Attach an extra metadata entry (model id, file name, ...)
    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

/// Confidence heuristic based on how many ingredients were recognized
pub fn confidence_for(ingredient_count: usize) -> f64 {
    match ingredient_count {
        0 => CONFIDENCE_NONE,
        1 => CONFIDENCE_SINGLE,
        _ => CONFIDENCE_MULTIPLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_confidence_heuristic() {
        assert_eq!(confidence_for(0), 0.3);
        assert_eq!(confidence_for(1), 0.6);
        assert_eq!(confidence_for(2), 0.85);
        assert_eq!(confidence_for(12), 0.85);
    }

    #[test]
    fn test_from_caption_metadata() {
        let parser = CaptionParser::default();
        let result = DetectionResult::from_caption(&parser, "a slice of cheese", "local-ai")
            .with_metadata("model", "blip-large");

        assert_eq!(result.ingredients, vec!["cheese"]);
        assert_eq!(result.confidence, 0.6);
        assert_eq!(result.provider, "local-ai");
        assert_eq!(result.metadata["caption"], "a slice of cheese");
        assert_eq!(result.metadata["ingredient_count"], 1);
        assert_eq!(result.metadata["model"], "blip-large");

        let detected_at = result.metadata["detected_at"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(detected_at).is_ok());
    }

    #[test]
    fn test_unrecognized_caption() {
        let parser = CaptionParser::default();
        let result = DetectionResult::from_caption(&parser, "a person riding a bicycle", "huggingface");

        assert!(result.is_empty());
        assert_eq!(result.confidence, 0.3);
    }

    #[test]
    fn test_serializes_camel_case() {
        let parser = CaptionParser::default();
        let result = DetectionResult::from_caption(&parser, "rice", "huggingface");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["rawResponse"], "rice");
        assert_eq!(json["ingredients"][0], "rice");
        assert!(json.get("raw_response").is_none());
        assert!(json["metadata"].get("detected_at").is_some());
    }
}
