//! Blocking HTTP client and retry policy
//!
//! Every network call in the crate goes through this module: a thin wrapper
//! over reqwest's blocking client plus an explicit retry policy with
//! exponential backoff for transient failures.

mod retry;

pub use retry::RetryPolicy;

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request failed: {message}")]
    RequestFailed { message: String },
    #[error("rate limited by server")]
    RateLimited,
    #[error("invalid url: {url}")]
    InvalidUrl { url: String },
    #[error("could not read response body: {message}")]
    Body { message: String },
}

impl HttpError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, HttpError::RequestFailed { .. } | HttpError::RateLimited)
    }
}

pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

pub struct HttpClient {
    client: reqwest::blocking::Client,
    user_agent: String,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            user_agent: user_agent.to_string(),
        }
    }

    pub fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| HttpError::RequestFailed {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(HttpError::RateLimited);
        }

        let body = response.text().map_err(|e| HttpError::Body {
            message: e.to_string(),
        })?;

        Ok(HttpResponse { status, body })
    }

    pub fn get_with_params(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<HttpResponse, HttpError> {
        let url = url::Url::parse_with_params(url, params).map_err(|_| HttpError::InvalidUrl {
            url: url.to_string(),
        })?;

        self.get(url.as_str())
    }

    pub fn post_json(
        &self,
        url: &str,
        bearer_token: Option<&str>,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        let mut request = self
            .client
            .post(url)
            .header("User-Agent", &self.user_agent)
            .json(body);

        if let Some(token) = bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| HttpError::RequestFailed {
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(HttpError::RateLimited);
        }

        let body = response.text().map_err(|e| HttpError::Body {
            message: e.to_string(),
        })?;

        Ok(HttpResponse { status, body })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new("affilia/0.1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(HttpError::RateLimited.is_transient());
        assert!(HttpError::RequestFailed {
            message: "timeout".to_string()
        }
        .is_transient());
        assert!(!HttpError::InvalidUrl {
            url: "::".to_string()
        }
        .is_transient());
    }
}
