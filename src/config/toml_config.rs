use crate::adapters::http::DEFAULT_USER_AGENT;
use crate::core::awards::{AwardsExtractor, DEFAULT_AWARDS_PATTERN};
use crate::core::etl::LoadSettings;
use crate::core::output::OutputFormat;
use crate::domain::scoring::ScoringParams;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

static ENV_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub extract: ExtractConfig,
    pub scoring: ScoringParams,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub top_list_url: String,
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            top_list_url: "https://www.imdb.com/chart/top/".to_string(),
            base_url: "https://www.imdb.com".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub limit: usize,
    pub awards_pattern: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            limit: 20,
            awards_pattern: DEFAULT_AWARDS_PATTERN.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: String,
    pub format: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: "./output/top_films.csv".to_string(),
            format: OutputFormat::Csv.as_str().to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| EtlError::ConfigError {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${IMDB_BASE_URL})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn limit(&self) -> usize {
        self.extract.limit
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        self.load.format.parse()
    }

    pub fn awards_extractor(&self) -> Result<AwardsExtractor> {
        AwardsExtractor::with_pattern(&self.extract.awards_pattern)
    }

    pub fn load_settings(&self) -> Result<LoadSettings> {
        Ok(LoadSettings {
            output_path: self.load.output_path.clone(),
            format: self.output_format()?,
        })
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.top_list_url", &self.source.top_list_url)?;
        validation::validate_url("source.base_url", &self.source.base_url)?;
        validation::validate_non_empty_string("source.user_agent", &self.source.user_agent)?;
        validation::validate_positive_number("extract.limit", self.extract.limit, 1)?;
        self.awards_extractor()?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_one_of("load.format", &self.load.format.to_ascii_lowercase(), &OutputFormat::NAMES)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
top_list_url = "https://www.imdb.com/chart/top/"
base_url = "https://www.imdb.com"
timeout_seconds = 15

[extract]
limit = 10

[scoring]
deviation = 100000
deduction = 0.2
precision = 2

[load]
output_path = "./out/films.tsv"
format = "tsv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.limit(), 10);
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.scoring.deduction, 0.2);
        assert_eq!(config.scoring.precision, 2);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Tsv);
        assert_eq!(config.source.user_agent, DEFAULT_USER_AGENT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.limit(), 20);
        assert_eq!(config.scoring, ScoringParams::default());
        assert_eq!(config.extract.awards_pattern, DEFAULT_AWARDS_PATTERN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = TomlConfig::from_toml_str("[scoring]\ndeduction = 0.3\n").unwrap();
        assert_eq!(config.scoring.deviation, 100_000);
        assert_eq!(config.scoring.precision, 1);
        assert_eq!(config.scoring.deduction, 0.3);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("IMDB_ETL_TEST_OUTPUT", "/tmp/imdb-test.csv");

        let config = TomlConfig::from_toml_str(
            "[load]\noutput_path = \"${IMDB_ETL_TEST_OUTPUT}\"\n[source]\nbase_url = \"${IMDB_ETL_UNSET_VAR}\"\n",
        )
        .unwrap();
        assert_eq!(config.load.output_path, "/tmp/imdb-test.csv");
        assert_eq!(config.source.base_url, "${IMDB_ETL_UNSET_VAR}");

        std::env::remove_var("IMDB_ETL_TEST_OUTPUT");
    }

    #[test]
    fn test_config_validation() {
        let invalid = [
            "[source]\ntop_list_url = \"invalid-url\"\n",
            "[extract]\nlimit = 0\n",
            "[extract]\nawards_pattern = \"Won (\\\\d+\"\n",
            "[load]\nformat = \"xlsx\"\n",
            "[load]\noutput_path = \"\"\n",
        ];

        for content in invalid {
            let config = TomlConfig::from_toml_str(content).unwrap();
            assert!(config.validate().is_err(), "should reject: {}", content);
        }
    }

    #[test]
    fn test_zero_deviation_is_left_to_scoring() {
        let config = TomlConfig::from_toml_str("[scoring]\ndeviation = 0\n").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[extract\nlimit = 3").unwrap_err();
        assert!(matches!(err, EtlError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[extract]\nlimit = 5\n").unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.limit(), 5);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = TomlConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, EtlError::ConfigError { .. }));
    }
}
