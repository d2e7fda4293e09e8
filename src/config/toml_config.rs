use crate::adapters::links::{default_catalog, LinkTemplate};
use crate::core::{ConfigProvider, OutputFormat};
use crate::utils::error::{LookupError, Result};
use crate::utils::validation::{validate_one_of, validate_output_dir, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
const VALID_FORMATS: [&str; 2] = ["csv", "json"];
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Optional settings file. Every section may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub output: Option<OutputConfig>,
    pub logging: Option<LoggingConfig>,
    /// Replaces the built-in reference link catalog when present.
    pub links: Option<Vec<LinkTemplate>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub formats: Option<Vec<String>>,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub csv: Option<String>,
    pub json: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl TomlConfig {
    /// Loads a settings file. A path that does not exist is a configuration
    /// error (exit code 1), not an I/O failure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LookupError::MissingConfigError {
                field: format!("config file {}", path.display()),
            },
            _ => LookupError::IoError(e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the value of the environment variable. Unset
    /// variables are left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LookupError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(path) = self.output.as_ref().and_then(|o| o.path.as_deref()) {
            validate_output_dir("output.path", path)?;
        }

        if let Some(formats) = self.output.as_ref().and_then(|o| o.formats.as_ref()) {
            if formats.is_empty() {
                return Err(LookupError::InvalidConfigValueError {
                    field: "output.formats".to_string(),
                    value: "[]".to_string(),
                    reason: "At least one output format is required".to_string(),
                });
            }
            for format in formats {
                validate_one_of("output.formats", format, &VALID_FORMATS)?;
            }
        }

        if let Some(level) = self.log_level() {
            validate_one_of("logging.level", level, &VALID_LOG_LEVELS)?;
        }

        for template in self.links.iter().flatten() {
            template.validate()?;
        }

        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn set_output_path(&mut self, path: String) {
        self.output.get_or_insert_with(OutputConfig::default).path = Some(path);
    }

    pub fn set_output_formats(&mut self, formats: Vec<String>) {
        self.output.get_or_insert_with(OutputConfig::default).formats = Some(formats);
    }
}

impl ConfigProvider for TomlConfig {
    fn output_path(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.path.as_deref())
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn output_formats(&self) -> Vec<OutputFormat> {
        let configured = self.output.as_ref().and_then(|o| o.formats.as_ref());
        match configured {
            Some(formats) => formats
                .iter()
                .filter_map(|f| match f.as_str() {
                    "csv" => Some(OutputFormat::Csv),
                    "json" => Some(OutputFormat::Json),
                    _ => None,
                })
                .collect(),
            None => vec![OutputFormat::Csv],
        }
    }

    fn output_filename(&self, format: OutputFormat) -> String {
        let names = self.output.as_ref().and_then(|o| o.filenames.as_ref());
        match format {
            OutputFormat::Csv => names
                .and_then(|n| n.csv.clone())
                .unwrap_or_else(|| "lookups.csv".to_string()),
            OutputFormat::Json => names
                .and_then(|n| n.json.clone())
                .unwrap_or_else(|| "lookups.json".to_string()),
        }
    }

    fn link_catalog(&self) -> Vec<LinkTemplate> {
        self.links.clone().unwrap_or_else(default_catalog)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
        assert_eq!(config.output_formats(), vec![OutputFormat::Csv]);
        assert_eq!(config.output_filename(OutputFormat::Json), "lookups.json");
        assert_eq!(config.link_catalog().len(), 13);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[output]
path = "./reports"
formats = ["csv", "json"]

[output.filenames]
csv = "dates.csv"

[logging]
level = "debug"

[[links]]
label = "PartSelect"
base = "https://www.partselect.com/ModelSearch.aspx"
query_param = "ModelNum"

[[links]]
label = "Bosch"
base = "https://www.bosch-home.com/us/supportdetail/product"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.output_path(), "./reports");
        assert_eq!(
            config.output_formats(),
            vec![OutputFormat::Csv, OutputFormat::Json]
        );
        assert_eq!(config.output_filename(OutputFormat::Csv), "dates.csv");
        assert_eq!(config.output_filename(OutputFormat::Json), "lookups.json");
        assert_eq!(config.log_level(), Some("debug"));

        let catalog = config.link_catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1].query_param, None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("APPLIANCE_DATE_TEST_OUT", "/tmp/appliance-reports");

        let toml_content = r#"
[output]
path = "${APPLIANCE_DATE_TEST_OUT}"
formats = ["json"]

[logging]
level = "${APPLIANCE_DATE_TEST_UNSET_LEVEL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_path(), "/tmp/appliance-reports");
        assert_eq!(config.log_level(), Some("${APPLIANCE_DATE_TEST_UNSET_LEVEL}"));
        assert!(config.validate().is_err());

        std::env::remove_var("APPLIANCE_DATE_TEST_OUT");
    }

    #[test]
    fn test_config_validation() {
        let bad_format = TomlConfig::from_toml_str("[output]\nformats = [\"tsv\"]\n").unwrap();
        assert!(bad_format.validate().is_err());

        let no_formats = TomlConfig::from_toml_str("[output]\nformats = []\n").unwrap();
        assert!(no_formats.validate().is_err());

        let bad_link = TomlConfig::from_toml_str(
            "[[links]]\nlabel = \"Local\"\nbase = \"file:///tmp/parts\"\n",
        )
        .unwrap();
        assert!(bad_link.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(TomlConfig::from_toml_str("[output\npath = 1").is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = TomlConfig::default();
        config.set_output_path("./elsewhere".to_string());
        config.set_output_formats(vec!["json".to_string()]);
        assert_eq!(config.output_path(), "./elsewhere");
        assert_eq!(config.output_formats(), vec![OutputFormat::Json]);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\npath = \"./from-file\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "./from-file");
    }

    #[test]
    fn test_absent_config_file_is_missing_config() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("appliance-date.toml");

        let err = TomlConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, LookupError::MissingConfigError { .. }));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("appliance-date.toml"));
    }
}
