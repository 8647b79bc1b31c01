//! Generative fallback for organizations no table or registry knows
//!
//! Wraps an OpenAI-compatible chat-completions endpoint: the model is asked
//! for the canonical name, country and type of an organization and must
//! answer in JSON. Anything that fails to parse degrades to a miss rather
//! than an error, so the cascade can fall through to the unresolved default.

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use affilia_domain::OrgType;

use crate::http::{HttpClient, HttpError, RetryPolicy};

#[derive(Debug, Error)]
pub enum GenerativeError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("backend returned status {0}")]
    Status(u16),
    #[error("malformed completion: {0}")]
    Parse(String),
}

/// Best-effort inference for a never-seen organization
#[derive(Debug, Clone, PartialEq)]
pub struct GenerativeGuess {
    pub canonical: String,
    pub country: String,
    pub country_code: String,
    pub org_type: OrgType,
}

/// Seam between the resolver's generative tier and a concrete backend.
pub trait GenerativeResolver {
    fn infer(&self, raw: &str) -> Result<Option<GenerativeGuess>, GenerativeError>;
}

const SYSTEM_PROMPT: &str = "You are an expert in academic institutions and tech companies.\n\
Given an organization name, provide:\n\
1. The canonical (official) name\n\
2. The country where it is headquartered\n\
3. The type: university, company, research_institute, government, hospital, nonprofit\n\n\
Respond in JSON format with fields: canonical, country, country_code (ISO 3166-1 alpha-2), type";

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct GuessPayload {
    canonical: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
    #[serde(rename = "type")]
    org_type: Option<String>,
}

/// Chat-completions backed implementation of [`GenerativeResolver`].
pub struct ChatCompletionResolver {
    client: HttpClient,
    endpoint: String,
    api_key: String,
    model: String,
    retry: RetryPolicy,
}

impl ChatCompletionResolver {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        ChatCompletionResolver {
            client: HttpClient::new("affilia/0.1"),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            retry: RetryPolicy::default(),
        }
    }
}

impl GenerativeResolver for ChatCompletionResolver {
    fn infer(&self, raw: &str) -> Result<Option<GenerativeGuess>, GenerativeError> {
        let body = json!({
            "model": self.model,
            "temperature": 0,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": format!("Organization: {}", raw)}
            ]
        });

        let response = self
            .retry
            .run(|| self.client.post_json(&self.endpoint, Some(self.api_key.as_str()), &body))?;

        if response.status != 200 {
            return Err(GenerativeError::Status(response.status));
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&response.body)
            .map_err(|e| GenerativeError::Parse(format!("invalid completion envelope: {}", e)))?;

        let content = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| GenerativeError::Parse("completion had no choices".to_string()))?;

        parse_guess(content, raw)
    }
}

/// Parse the model's JSON answer. The model sometimes wraps its answer in a
/// Markdown code fence; strip that before parsing. A missing canonical name
/// falls back to the raw input; an unrecognized type degrades to `unknown`.
pub fn parse_guess(content: &str, raw: &str) -> Result<Option<GenerativeGuess>, GenerativeError> {
    let trimmed = strip_code_fence(content);

    let payload: GuessPayload = serde_json::from_str(trimmed)
        .map_err(|e| GenerativeError::Parse(format!("completion was not JSON: {}", e)))?;

    let canonical = payload
        .canonical
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| raw.to_string());

    Ok(Some(GenerativeGuess {
        canonical,
        country: payload.country.unwrap_or_else(|| "Unknown".to_string()),
        country_code: payload.country_code.unwrap_or_else(|| "XX".to_string()),
        org_type: payload
            .org_type
            .map(|t| OrgType::parse_lenient(&t))
            .unwrap_or(OrgType::Unknown),
    }))
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open.strip_suffix("```").unwrap_or(without_open).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_guess_plain_json() {
        let guess = parse_guess(
            r#"{"canonical": "Kyoto University", "country": "Japan", "country_code": "JP", "type": "university"}"#,
            "Kyoto Univ.",
        )
        .unwrap()
        .unwrap();
        assert_eq!(guess.canonical, "Kyoto University");
        assert_eq!(guess.country, "Japan");
        assert_eq!(guess.country_code, "JP");
        assert_eq!(guess.org_type, OrgType::University);
    }

    #[test]
    fn test_parse_guess_code_fence() {
        let content = "```json\n{\"canonical\": \"Kyoto University\", \"country\": \"Japan\", \"country_code\": \"JP\", \"type\": \"university\"}\n```";
        let guess = parse_guess(content, "Kyoto Univ.").unwrap().unwrap();
        assert_eq!(guess.canonical, "Kyoto University");
    }

    #[test]
    fn test_parse_guess_unknown_type_degrades() {
        let guess = parse_guess(
            r#"{"canonical": "Some Lab", "country": "France", "country_code": "FR", "type": "collective"}"#,
            "Some Lab",
        )
        .unwrap()
        .unwrap();
        assert_eq!(guess.org_type, OrgType::Unknown);
    }

    #[test]
    fn test_parse_guess_missing_canonical_falls_back_to_input() {
        let guess = parse_guess(r#"{"country": "Japan"}"#, "Kyoto Univ.").unwrap().unwrap();
        assert_eq!(guess.canonical, "Kyoto Univ.");
        assert_eq!(guess.country_code, "XX");
    }

    #[test]
    fn test_parse_guess_non_json_is_error() {
        let result = parse_guess("I do not know this organization.", "Some Lab");
        assert!(matches!(result, Err(GenerativeError::Parse(_))));
    }
}
