//! Market sentiment provider boundary.
//!
//! A remote endpoint derives two bias multipliers from current AI/job-market
//! news; the counter engine consumes them read-only. The endpoint is designed
//! to always answer 200 with a well-formed payload, substituting neutral
//! values on its own internal failures -- so the client mirrors that posture:
//! `fetch_or_neutral` can never fail, only degrade.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::SentimentError;

/// Allowed range for the anxiety multiplier.
pub const ANXIETY_MULTIPLIER_RANGE: (f64, f64) = (0.7, 1.5);
/// Allowed range for the training-interest multiplier.
pub const INTEREST_MULTIPLIER_RANGE: (f64, f64) = (0.8, 1.4);

const NEUTRAL_CONTEXT: &str = "Unable to fetch current market data";

/// Request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Bias multipliers supplied by the sentiment provider.
///
/// Wire format is camelCase JSON, matching the endpoint. Missing multipliers
/// deserialize as neutral 1.0 so a partial payload never breaks ticking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentBias {
    #[serde(default = "neutral_multiplier")]
    pub ai_anxiety_multiplier: f64,
    #[serde(default = "neutral_multiplier")]
    pub training_interest_multiplier: f64,
    #[serde(default)]
    pub news_context: String,
    /// Epoch milliseconds at which the provider produced this reading.
    #[serde(default)]
    pub timestamp: u64,
}

fn neutral_multiplier() -> f64 {
    1.0
}

impl SentimentBias {
    /// Neutral bias: counters tick at their base rates.
    pub fn neutral() -> Self {
        Self {
            ai_anxiety_multiplier: 1.0,
            training_interest_multiplier: 1.0,
            news_context: NEUTRAL_CONTEXT.to_string(),
            timestamp: 0,
        }
    }

    /// Clamp both multipliers into their documented ranges.
    pub fn clamped(mut self) -> Self {
        let (lo, hi) = ANXIETY_MULTIPLIER_RANGE;
        self.ai_anxiety_multiplier = self.ai_anxiety_multiplier.clamp(lo, hi);
        let (lo, hi) = INTEREST_MULTIPLIER_RANGE;
        self.training_interest_multiplier = self.training_interest_multiplier.clamp(lo, hi);
        self
    }
}

impl Default for SentimentBias {
    fn default() -> Self {
        Self::neutral()
    }
}

/// HTTP client for the sentiment endpoint.
pub struct SentimentClient {
    endpoint: String,
    client: Client,
}

impl SentimentClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Client with an explicit request timeout. A request that outlives it
    /// fails, which `fetch_or_neutral` turns into the neutral bias, so a
    /// hung endpoint never stalls the caller.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "failed to build HTTP client, using defaults");
                Client::new()
            });
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    /// Issue the single sentiment request. The request body is empty JSON;
    /// the server reads the current date itself.
    pub async fn fetch(&self) -> Result<SentimentBias, SentimentError> {
        if self.endpoint.is_empty() {
            return Err(SentimentError::NotConfigured);
        }

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(SentimentError::Status {
                status: resp.status().as_u16(),
            });
        }

        let bias = resp.json::<SentimentBias>().await?;
        Ok(bias.clamped())
    }

    /// Fetch, absorbing every failure into the neutral bias.
    pub async fn fetch_or_neutral(&self) -> SentimentBias {
        match self.fetch().await {
            Ok(bias) => bias,
            Err(err) => {
                tracing::warn!(error = %err, "sentiment fetch failed, using neutral bias");
                SentimentBias::neutral()
            }
        }
    }
}
