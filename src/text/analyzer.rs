//! Optional linguistic-analysis service returning noun tokens

use crate::io::configuration::{ANALYZER_TIMEOUT_SECS, AnalyzerConfig};
use crate::io::error::{CloudError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Extracts noun tokens from text
///
/// The orchestrator treats any error as a signal to fall back to the simple
/// normalizer, so implementations need not retry.
pub trait NounExtractor: Send + Sync {
    /// Return the nouns found in `text`, in order of appearance
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Analysis`] if the service is unreachable or its
    /// answer cannot be decoded
    fn extract_nouns(&self, text: &str) -> Result<Vec<String>>;
}

#[derive(Serialize)]
struct NounRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct NounResponse {
    nouns: Vec<String>,
}

/// Analysis service reached over HTTP
///
/// Posts `{"text": ...}` as JSON and expects `{"nouns": [...]}` back.
pub struct HttpNounExtractor {
    client: reqwest::blocking::Client,
    config: AnalyzerConfig,
}

impl HttpNounExtractor {
    /// Create a client for the configured endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(ANALYZER_TIMEOUT_SECS))
            .build()
            .map_err(analysis_error)?;
        Ok(Self { client, config })
    }

    /// Endpoint this client posts to
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

impl NounExtractor for HttpNounExtractor {
    fn extract_nouns(&self, text: &str) -> Result<Vec<String>> {
        let mut request = self
            .client
            .post(&self.config.endpoint)
            .json(&NounRequest { text });
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response: NounResponse = request
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::json)
            .map_err(analysis_error)?;

        Ok(response.nouns)
    }
}

fn analysis_error(err: reqwest::Error) -> CloudError {
    CloudError::Analysis {
        reason: err.to_string(),
    }
}
