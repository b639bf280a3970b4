//! Test helpers for site service tests

use std::time::Duration;
use url::Url;
use wiremock::MockServer;

use crate::services::{HttpAnalyzer, SimulatedAnalyzer};

use super::fixtures::result_locator;

/// Simulated analyzer that answers immediately
pub fn create_instant_analyzer() -> SimulatedAnalyzer {
    SimulatedAnalyzer::new(Duration::ZERO, result_locator())
}

/// Http analyzer pointed at `/analyze` on a mock server
pub fn create_http_analyzer(server: &MockServer, api_key: Option<&str>) -> HttpAnalyzer {
    let endpoint = Url::parse(&format!("{}/analyze", server.uri())).unwrap();
    HttpAnalyzer::new(endpoint, api_key.map(str::to_string), Some(Duration::from_secs(5))).unwrap()
}
