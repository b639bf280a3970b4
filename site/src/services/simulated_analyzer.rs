//! Simulated analyzer
//!
//! Stands in for the remote analysis service: waits, then hands back a fixed
//! result locator. Jitter and a failure rate can be dialed in to exercise the
//! pending and error states from a browser.

use async_trait::async_trait;
use rand::Rng;
use shared::{Locator, ProcessId, SharedError};
use std::time::Duration;

use crate::error::{AnalysisFailed, SiteResult};
use crate::traits::AnalyzeOperation;
use crate::types::StoredImage;

/// Result locator returned by the simulation unless configured otherwise
pub const DEFAULT_RESULT_URL: &str = "https://example.com/processed-image.jpg";

/// Simulated latency in milliseconds unless configured otherwise
pub const DEFAULT_DELAY_MS: u64 = 2000;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(DEFAULT_DELAY_MS);

#[derive(Debug, Clone)]
pub struct SimulatedAnalyzer {
    delay: Duration,
    jitter: Duration,
    failure_rate: f64,
    result: Locator,
}

impl SimulatedAnalyzer {
    pub fn new(delay: Duration, result: Locator) -> Self {
        Self {
            delay,
            jitter: Duration::ZERO,
            failure_rate: 0.0,
            result,
        }
    }

    /// Add a uniformly random extra delay of up to `jitter`
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    /// Fail with probability `rate`, which must lie in `[0, 1]`
    pub fn with_failure_rate(mut self, rate: f64) -> SiteResult<Self> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(SharedError::invalid_config("failure_rate", rate).into());
        }
        self.failure_rate = rate;
        Ok(self)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    /// Draw this call's latency and fate up front
    pub(crate) fn roll(&self) -> (Duration, bool) {
        let mut rng = rand::thread_rng();
        let extra = if self.jitter.is_zero() {
            Duration::ZERO
        } else {
            let bound = u64::try_from(self.jitter.as_millis()).unwrap_or(u64::MAX);
            Duration::from_millis(rng.gen_range(0..=bound))
        };
        let fails = self.failure_rate > 0.0 && rng.gen_bool(self.failure_rate);
        (self.delay.saturating_add(extra), fails)
    }
}

#[async_trait]
impl AnalyzeOperation for SimulatedAnalyzer {
    async fn analyze(&self, image: &StoredImage) -> Result<Locator, AnalysisFailed> {
        let (latency, fails) = self.roll();

        shared::process_debug!(
            ProcessId::current(),
            "🔬 Simulating analysis of {} ({} bytes) for {:?}",
            image.locator,
            image.len(),
            latency
        );
        tokio::time::sleep(latency).await;

        if fails {
            shared::process_warn!(ProcessId::current(), "⚠️ Simulated analysis failure for {}", image.locator);
            return Err(AnalysisFailed);
        }
        Ok(self.result.clone())
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
