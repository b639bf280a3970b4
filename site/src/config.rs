//! Site configuration
//!
//! Command line flags parsed with clap, secrets read from the environment
//! (after loading `.env` if present), validated into a `SiteConfig`.

use async_trait::async_trait;
use clap::Parser;
use shared::{Locator, SharedError};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::core::{Locale, SelectionPolicy};
use crate::error::{AnalysisFailed, SiteError, SiteResult};
use crate::services::simulated_analyzer::{DEFAULT_DELAY_MS, DEFAULT_RESULT_URL};
use crate::services::{HttpAnalyzer, SimulatedAnalyzer};
use crate::traits::AnalyzeOperation;
use crate::types::StoredImage;

/// Environment variable holding the remote analyzer endpoint
pub const ENDPOINT_ENV: &str = "ANALYZER_ENDPOINT";

/// Environment variable holding the remote analyzer bearer token
pub const API_KEY_ENV: &str = "ANALYZER_API_KEY";

/// Command line arguments for the site binary
#[derive(Parser, Debug, Clone)]
#[command(name = "site")]
#[command(about = "AXIOME marketing site with the image analysis demo")]
pub struct SiteArgs {
    /// Port for the HTTP server
    #[arg(long, default_value = "8080")]
    pub port: u16,

    /// Directory served under /static
    #[arg(long, default_value = "./static")]
    pub static_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Default display locale (en, fr)
    #[arg(long, default_value = "en")]
    pub locale: Locale,

    /// What a new selection does to a stale result or error
    #[arg(long, default_value = "clear-on-select")]
    pub selection_policy: SelectionPolicy,

    /// Analyzer backend (simulated, http)
    #[arg(long, default_value = "simulated")]
    pub analyzer: AnalyzerKind,

    /// Simulated analysis latency in milliseconds
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Upper bound of extra random simulated latency in milliseconds
    #[arg(long, default_value = "0")]
    pub jitter_ms: u64,

    /// Probability in [0, 1] that a simulated analysis fails
    #[arg(long, default_value = "0.0")]
    pub failure_rate: f64,

    /// Result locator returned by the simulated analyzer
    #[arg(long, default_value = DEFAULT_RESULT_URL)]
    pub result_url: String,

    /// Request timeout for the http analyzer in milliseconds (none by default)
    #[arg(long)]
    pub analyzer_timeout_ms: Option<u64>,

    /// Largest accepted upload in megabytes
    #[arg(long, default_value = "10")]
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerKind {
    Simulated,
    Http,
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzerKind::Simulated => write!(f, "simulated"),
            AnalyzerKind::Http => write!(f, "http"),
        }
    }
}

impl FromStr for AnalyzerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simulated" | "sim" => Ok(AnalyzerKind::Simulated),
            "http" | "remote" => Ok(AnalyzerKind::Http),
            _ => Err(format!("Unknown analyzer: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzerConfig {
    Simulated {
        delay: Duration,
        jitter: Duration,
        failure_rate: f64,
        result_url: Locator,
    },
    Http {
        endpoint: Url,
        api_key: Option<String>,
        timeout: Option<Duration>,
    },
}

impl AnalyzerConfig {
    pub fn build(&self) -> SiteResult<ConfiguredAnalyzer> {
        match self {
            AnalyzerConfig::Simulated {
                delay,
                jitter,
                failure_rate,
                result_url,
            } => {
                let analyzer = SimulatedAnalyzer::new(*delay, result_url.clone())
                    .with_jitter(*jitter)
                    .with_failure_rate(*failure_rate)?;
                Ok(ConfiguredAnalyzer::Simulated(analyzer))
            }
            AnalyzerConfig::Http {
                endpoint,
                api_key,
                timeout,
            } => Ok(ConfiguredAnalyzer::Http(HttpAnalyzer::new(
                endpoint.clone(),
                api_key.clone(),
                *timeout,
            )?)),
        }
    }
}

/// Validated configuration for one site process
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub bind_address: SocketAddr,
    pub static_dir: PathBuf,
    pub default_locale: Locale,
    pub selection_policy: SelectionPolicy,
    pub max_upload_bytes: usize,
    pub analyzer: AnalyzerConfig,
}

impl SiteConfig {
    /// Load `.env` if present; variables already set take precedence
    pub fn load_env() {
        let _ = dotenv::dotenv();
    }

    /// Build from arguments and the process environment
    pub fn from_args(args: SiteArgs) -> SiteResult<Self> {
        Self::from_args_with_env(args, |key| std::env::var(key).ok())
    }

    /// Build from arguments, reading environment values through `env`
    pub fn from_args_with_env<F>(args: SiteArgs, env: F) -> SiteResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_upload_bytes = args
            .max_upload_mb
            .checked_mul(1024 * 1024)
            .filter(|bytes| *bytes > 0)
            .ok_or_else(|| SharedError::invalid_config("max_upload_mb", args.max_upload_mb))?;

        let analyzer = match args.analyzer {
            AnalyzerKind::Simulated => {
                if !(0.0..=1.0).contains(&args.failure_rate) {
                    return Err(SharedError::invalid_config("failure_rate", args.failure_rate).into());
                }
                AnalyzerConfig::Simulated {
                    delay: Duration::from_millis(args.delay_ms),
                    jitter: Duration::from_millis(args.jitter_ms),
                    failure_rate: args.failure_rate,
                    result_url: Locator::new(args.result_url)?,
                }
            }
            AnalyzerKind::Http => {
                let raw = env(ENDPOINT_ENV)
                    .filter(|v| !v.trim().is_empty())
                    .ok_or_else(|| SiteError::config(format!("{ENDPOINT_ENV} is required for the http analyzer")))?;
                let endpoint = Url::parse(raw.trim())
                    .map_err(|e| SiteError::config(format!("Invalid {ENDPOINT_ENV} {raw:?}: {e}")))?;
                AnalyzerConfig::Http {
                    endpoint,
                    api_key: env(API_KEY_ENV).filter(|v| !v.trim().is_empty()),
                    timeout: args.analyzer_timeout_ms.map(Duration::from_millis),
                }
            }
        };

        Ok(Self {
            bind_address: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), args.port),
            static_dir: args.static_dir,
            default_locale: args.locale,
            selection_policy: args.selection_policy,
            max_upload_bytes,
            analyzer,
        })
    }
}

/// Analyzer chosen at startup
#[derive(Debug, Clone)]
pub enum ConfiguredAnalyzer {
    Simulated(SimulatedAnalyzer),
    Http(HttpAnalyzer),
}

#[async_trait]
impl AnalyzeOperation for ConfiguredAnalyzer {
    async fn analyze(&self, image: &StoredImage) -> Result<Locator, AnalysisFailed> {
        match self {
            ConfiguredAnalyzer::Simulated(analyzer) => analyzer.analyze(image).await,
            ConfiguredAnalyzer::Http(analyzer) => analyzer.analyze(image).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ConfiguredAnalyzer::Simulated(analyzer) => analyzer.name(),
            ConfiguredAnalyzer::Http(analyzer) => analyzer.name(),
        }
    }
}
