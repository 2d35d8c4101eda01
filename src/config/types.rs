use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Site-Sweep
///
/// Every section and key is optional; missing values fall back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Address the crawl starts from; must include scheme and host
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Pages at this depth are recorded but their links are not followed
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Pause before every request after the first (seconds, 0 disables)
    #[serde(rename = "request-delay")]
    pub request_delay: f64,

    /// Total time allowed for one request (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,
}

impl CrawlerConfig {
    /// The inter-request delay as a `Duration`
    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(self.request_delay.max(0.0))
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed_url: "http://musenko.com".to_string(),
            max_depth: 2,
            request_delay: 0.1,
            request_timeout: 30,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV file name; `{}` or `%s` is replaced by the site host. Empty prints to console.
    #[serde(rename = "file-template")]
    pub file_template: String,
}

impl OutputConfig {
    /// Resolves the report path for a site host, or `None` for console output
    pub fn output_path(&self, host: &str) -> Option<PathBuf> {
        let template = self.file_template.trim();
        if template.is_empty() {
            return None;
        }

        Some(PathBuf::from(
            template.replace("{}", host).replace("%s", host),
        ))
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_template: "crawler_{}.csv".to_string(),
        }
    }
}
