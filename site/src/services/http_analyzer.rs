//! Remote analyzer over HTTP
//!
//! Posts the raw image bytes to an analysis endpoint and expects
//! `{"result_url": "..."}` back. Every failure mode collapses into
//! `AnalysisFailed`; the cause only reaches the logs.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use shared::{Locator, ProcessId};
use std::time::Duration;
use url::Url;

use crate::error::{AnalysisFailed, SiteError, SiteResult};
use crate::traits::AnalyzeOperation;
use crate::types::StoredImage;

/// Success body returned by the analysis endpoint
#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    result_url: String,
}

#[derive(Debug, Clone)]
pub struct HttpAnalyzer {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl HttpAnalyzer {
    /// Create an analyzer for `endpoint`. No timeout is applied unless one is given.
    pub fn new(endpoint: Url, api_key: Option<String>, timeout: Option<Duration>) -> SiteResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SiteError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn fail(&self, image: &StoredImage, reason: impl std::fmt::Display) -> AnalysisFailed {
        shared::process_warn!(
            ProcessId::current(),
            "❌ Analysis of {} via {} failed: {}",
            image.locator,
            self.endpoint,
            reason
        );
        AnalysisFailed
    }
}

#[async_trait]
impl AnalyzeOperation for HttpAnalyzer {
    async fn analyze(&self, image: &StoredImage) -> Result<Locator, AnalysisFailed> {
        let request_start = std::time::Instant::now();

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, image.content_type.as_str())
            .body(image.bytes.clone());
        if let Some(api_key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("Bearer {api_key}"));
        }

        let response = request.send().await.map_err(|e| self.fail(image, e))?;

        if !response.status().is_success() {
            return Err(self.fail(image, format!("HTTP {}", response.status())));
        }

        let body: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| self.fail(image, format!("malformed response: {e}")))?;

        let result = Locator::new(body.result_url).map_err(|e| self.fail(image, e))?;

        shared::process_info!(
            ProcessId::current(),
            "✅ Analysis of {} completed in {:?}",
            image.locator,
            request_start.elapsed()
        );
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
