use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::Result,
    provider::{MODELS_URL, OpenRouterClient},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    pub prompt: String,
    pub completion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub context_length: Option<u64>,
    pub pricing: Option<ModelPricing>,
}

/// Decode the `data` array of a models listing.
pub fn models_from_response(body: Value) -> Result<Vec<ModelInfo>> {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => Ok(serde_json::from_value(data)?),
            _ => Ok(Vec::new()),
        },
        _ => Ok(Vec::new()),
    }
}

pub async fn list_models(client: &OpenRouterClient) -> Result<Vec<ModelInfo>> {
    let body = client.get_json(MODELS_URL).await?;
    models_from_response(body)
}

/// Models whose id or name contains `term`, ignoring case.
pub fn filter_models<'a>(models: &'a [ModelInfo], term: &str) -> Vec<&'a ModelInfo> {
    let term = term.to_lowercase();
    models
        .iter()
        .filter(|m| m.id.to_lowercase().contains(&term) || m.name.to_lowercase().contains(&term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<ModelInfo> {
        models_from_response(json!({
            "data": [
                {"id": "openai/gpt-4o", "name": "OpenAI: GPT-4o", "context_length": 128000,
                 "pricing": {"prompt": "0.0000025", "completion": "0.00001"}},
                {"id": "anthropic/claude-sonnet-4", "name": "Anthropic: Claude Sonnet 4",
                 "architecture": {"modality": "text->text"}}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn decodes_listing_and_ignores_unknown_fields() {
        let models = sample();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].context_length, Some(128000));
        assert!(models[1].pricing.is_none());
    }

    #[test]
    fn missing_data_is_empty() {
        assert!(models_from_response(json!({})).unwrap().is_empty());
        assert!(models_from_response(json!({"data": null})).unwrap().is_empty());
    }

    #[test]
    fn filters_case_insensitively() {
        let models = sample();
        let hits = filter_models(&models, "GPT");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "openai/gpt-4o");
        assert_eq!(filter_models(&models, "").len(), 2);
    }
}
