//! Scrape job configuration
//!
//! A job bundles everything one run needs: the page URL template, limits,
//! the CSS extraction schema, HTTP settings and the export destination.
//! Jobs are YAML documents; one is embedded in the binary as the default.

use crate::collector::CollectorConfig;
use crate::error::{Error, Result};
use crate::extract::{CssExtractor, ExtractionSchema};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::output::ExportFormat;
use crate::template::PageUrlTemplate;
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// YAML source of the built-in job
pub const BUILTIN_JOB: &str = include_str!("../jobs/flipkart-laptops.yaml");

// ============================================================================
// Job
// ============================================================================

/// Complete scrape job loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeJob {
    /// Job name, used in logs
    pub name: String,

    /// Listing URL with a `{page}` placeholder
    pub url_template: String,

    /// Highest page index to fetch
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Pause between pages in milliseconds
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// CSS extraction schema
    pub schema: ExtractionSchema,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Export destination
    #[serde(default)]
    pub output: OutputSettings,
}

fn default_max_pages() -> u32 {
    99
}

fn default_page_delay_ms() -> u64 {
    2000
}

/// HTTP settings of a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries per page for transient failures (opt-in, 0 by default)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Extra request headers
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Optional request rate ceiling
    #[serde(default)]
    pub requests_per_second: Option<u32>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    0
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            user_agent: None,
            headers: HashMap::new(),
            requests_per_second: None,
        }
    }
}

/// Export settings of a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// File to write
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Format; inferred from the extension when absent
    #[serde(default)]
    pub format: Option<ExportFormat>,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("laptops.xlsx")
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: None,
        }
    }
}

impl ScrapeJob {
    /// Check the job for errors that would only surface mid-run
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_value("name", "cannot be empty"));
        }

        self.page_template()?;
        self.extractor()?;

        if self.max_pages == 0 {
            return Err(Error::invalid_value("max_pages", "must be at least 1"));
        }

        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_value("http.timeout_secs", "must be at least 1"));
        }

        if self.http.requests_per_second == Some(0) {
            return Err(Error::invalid_value(
                "http.requests_per_second",
                "must be at least 1 when set",
            ));
        }

        self.export_format()?;
        Ok(())
    }

    /// Parsed URL template
    pub fn page_template(&self) -> Result<PageUrlTemplate> {
        PageUrlTemplate::parse(&self.url_template)
    }

    /// Loop settings
    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig::new()
            .with_max_pages(self.max_pages)
            .with_page_delay(Duration::from_millis(self.page_delay_ms))
    }

    /// HTTP client settings
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .max_retries(self.http.max_retries);

        if let Some(agent) = self.http.user_agent.clone().none_if_empty() {
            builder = builder.user_agent(agent);
        }

        for (key, value) in &self.http.headers {
            builder = builder.header(key, value);
        }

        builder = match self.http.requests_per_second {
            Some(rps) if rps > 0 => builder.rate_limit(RateLimiterConfig::per_second(rps)),
            _ => builder.no_rate_limit(),
        };

        builder.build()
    }

    /// Compiled extraction schema
    pub fn extractor(&self) -> Result<CssExtractor> {
        CssExtractor::new(&self.schema)
    }

    /// Export format, explicit or inferred from the output path
    pub fn export_format(&self) -> Result<ExportFormat> {
        ExportFormat::resolve(self.output.format, &self.output.path)
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load and validate a job from a YAML file
pub fn load_job(path: impl AsRef<Path>) -> Result<ScrapeJob> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read job file '{}': {e}",
                path.display()
            ))
        }
    })?;
    load_job_from_str(&content)
}

/// Load and validate a job from a YAML string
pub fn load_job_from_str(yaml: &str) -> Result<ScrapeJob> {
    let job: ScrapeJob = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse job YAML: {e}")))?;

    job.validate()?;
    Ok(job)
}

/// The job embedded in the binary
pub fn builtin_job() -> Result<ScrapeJob> {
    load_job_from_str(BUILTIN_JOB)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordField;
    use pretty_assertions::assert_eq;

    const MINIMAL_JOB: &str = r#"
name: shop
url_template: "https://shop.example.com/list?p={page}"
schema:
  base_selector: "li.item"
  fields:
    - { name: name, selector: "h2" }
"#;

    #[test]
    fn test_builtin_job() {
        let job = builtin_job().unwrap();
        assert_eq!(job.name, "flipkart-laptops");
        assert_eq!(job.max_pages, 99);
        assert_eq!(job.page_delay_ms, 2000);
        assert_eq!(job.http.max_retries, 0);
        assert_eq!(job.schema.base_selector, "a.CGtC98");
        assert_eq!(job.schema.fields.len(), 4);
        assert_eq!(job.output.path, PathBuf::from("laptops.xlsx"));
        assert_eq!(job.export_format().unwrap(), ExportFormat::Xlsx);
        assert_eq!(
            job.page_template().unwrap().render(3),
            "https://www.flipkart.com/search?q=laptops&page=3"
        );
    }

    #[test]
    fn test_minimal_job_defaults() {
        let job = load_job_from_str(MINIMAL_JOB).unwrap();
        assert_eq!(job.max_pages, 99);
        assert_eq!(job.page_delay_ms, 2000);
        assert_eq!(job.http, HttpSettings::default());
        assert_eq!(job.output, OutputSettings::default());
        assert_eq!(job.schema.fields[0].name, RecordField::Name);
    }

    #[test]
    fn test_collector_config() {
        let mut job = load_job_from_str(MINIMAL_JOB).unwrap();
        job.max_pages = 4;
        job.page_delay_ms = 150;

        let config = job.collector_config();
        assert_eq!(config.max_pages, 4);
        assert_eq!(config.page_delay, Duration::from_millis(150));
    }

    #[test]
    fn test_http_config() {
        let yaml = r#"
name: shop
url_template: "https://shop.example.com/list?p={page}"
schema:
  base_selector: "li.item"
  fields:
    - { name: name, selector: "h2" }
http:
  timeout_secs: 5
  max_retries: 3
  user_agent: "harvest-test"
  headers:
    Accept-Language: "en"
  requests_per_second: 3
"#;
        let job = load_job_from_str(yaml).unwrap();
        let config = job.http_config();

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.user_agent, "harvest-test");
        assert_eq!(
            config.default_headers.get("Accept-Language"),
            Some(&"en".to_string())
        );
        assert_eq!(config.rate_limit, Some(RateLimiterConfig::per_second(3)));
    }

    #[test]
    fn test_http_config_without_overrides() {
        let job = load_job_from_str(MINIMAL_JOB).unwrap();
        let config = job.http_config();
        assert!(config.user_agent.starts_with("listing-harvest/"));
        assert!(config.rate_limit.is_none());
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let mut job = load_job_from_str(MINIMAL_JOB).unwrap();
        job.name = "  ".to_string();
        assert!(job.validate().unwrap_err().to_string().contains("name"));
    }

    #[test]
    fn test_validate_rejects_zero_max_pages() {
        let mut job = load_job_from_str(MINIMAL_JOB).unwrap();
        job.max_pages = 0;
        let err = job.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "max_pages"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut job = load_job_from_str(MINIMAL_JOB).unwrap();
        job.http.timeout_secs = 0;
        assert!(job.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_template_without_placeholder() {
        let mut job = load_job_from_str(MINIMAL_JOB).unwrap();
        job.url_template = "https://shop.example.com/list".to_string();
        assert!(matches!(job.validate(), Err(Error::Template { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_selector() {
        let mut job = load_job_from_str(MINIMAL_JOB).unwrap();
        job.schema.fields[0].selector = "h2[".to_string();
        assert!(matches!(job.validate(), Err(Error::Selector { .. })));
    }

    #[test]
    fn test_validate_rejects_unknown_output_extension() {
        let mut job = load_job_from_str(MINIMAL_JOB).unwrap();
        job.output.path = PathBuf::from("laptops.ods");
        assert!(job.validate().is_err());

        job.output.format = Some(ExportFormat::Csv);
        assert!(job.validate().is_ok());
    }

    #[test]
    fn test_parse_error_is_config_error() {
        let err = load_job_from_str("name: [unclosed").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_missing_schema_is_config_error() {
        let yaml = r#"
name: shop
url_template: "https://shop.example.com/list?p={page}"
"#;
        assert!(load_job_from_str(yaml).is_err());
    }

    #[test]
    fn test_load_job_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.yaml");
        fs::write(&path, MINIMAL_JOB).unwrap();

        let job = load_job(&path).unwrap();
        assert_eq!(job.name, "shop");
    }

    #[test]
    fn test_load_job_missing_file() {
        let err = load_job("/nonexistent/job.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
