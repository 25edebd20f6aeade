use crate::domain::model::Domain;
use crate::utils::error::{GrowwellError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowwellConfig {
    pub server: ServerConfig,
    pub models: ModelsConfig,
    pub client: ClientConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Abort startup if any model fails to load, not only when all do.
    pub strict: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            strict: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub crop: PathBuf,
    pub fertilizer: PathBuf,
    pub irrigation: PathBuf,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            crop: PathBuf::from("models/crop_best.json"),
            fertilizer: PathBuf::from("models/fertilizer_best_model.json"),
            irrigation: PathBuf::from("models/irrigation_best_model.json"),
        }
    }
}

impl ModelsConfig {
    pub fn path_for(&self, domain: Domain) -> &Path {
        match domain {
            Domain::Crop => &self.crop,
            Domain::Fertilizer => &self.fertilizer,
            Domain::Irrigation => &self.irrigation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub backend_url: String,
    pub timeout_seconds: u64,
    pub assets_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            timeout_seconds: 10,
            assets_dir: PathBuf::from("assets/crops"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl GrowwellConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GrowwellError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 檔案不存在時使用預設值
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        if path.as_ref().exists() {
            Ok((Self::from_file(path)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GrowwellError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GrowwellError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Backend URL as the client sees it; `BACKEND_URL` wins over the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("BACKEND_URL") {
            if !url.trim().is_empty() {
                self.client.backend_url = url;
            }
        }
    }
}

impl Validate for GrowwellConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_positive_number("server.port", u64::from(self.server.port), 1)?;

        for domain in Domain::ALL {
            let field = format!("models.{}", domain.key());
            let path = self.models.path_for(domain).to_string_lossy();
            validation::validate_path(&field, &path)?;
            validation::validate_file_extension(&field, &path, &["json"])?;
        }

        validation::validate_url("client.backend_url", &self.client.backend_url)?;
        validation::validate_positive_number(
            "client.timeout_seconds",
            self.client.timeout_seconds,
            1,
        )?;
        validation::validate_path(
            "client.assets_dir",
            &self.client.assets_dir.to_string_lossy(),
        )?;

        validation::validate_log_level("logging.level", &self.logging.level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = GrowwellConfig::from_toml_str("").unwrap();
        assert_eq!(config, GrowwellConfig::default());
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.client.backend_url, "http://localhost:8000");
        assert_eq!(config.client.timeout_seconds, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
[server]
port = 9000
strict = true

[models]
crop = "/srv/models/crop.json"

[logging]
json = true
"#;

        let config = GrowwellConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.server.strict);
        assert_eq!(config.models.crop, PathBuf::from("/srv/models/crop.json"));
        assert_eq!(
            config.models.path_for(Domain::Irrigation),
            Path::new("models/irrigation_best_model.json")
        );
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GROWWELL_TEST_MODEL_DIR", "/opt/growwell");

        let toml_content = r#"
[models]
fertilizer = "${GROWWELL_TEST_MODEL_DIR}/fertilizer.json"
irrigation = "${GROWWELL_TEST_UNSET_VAR}/irrigation.json"
"#;

        let config = GrowwellConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.models.fertilizer,
            PathBuf::from("/opt/growwell/fertilizer.json")
        );
        assert_eq!(
            config.models.irrigation,
            PathBuf::from("${GROWWELL_TEST_UNSET_VAR}/irrigation.json")
        );

        std::env::remove_var("GROWWELL_TEST_MODEL_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = GrowwellConfig::from_toml_str(
            r#"
[client]
backend_url = "ftp://example.com"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = GrowwellConfig::from_toml_str(
            r#"
[models]
crop = "models/crop_best.pkl"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = GrowwellConfig::from_toml_str(
            r#"
[client]
timeout_seconds = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = GrowwellConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(config.validate().is_err());
        assert!(GrowwellConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = GrowwellConfig::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, GrowwellError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[client]\nassets_dir = \"static/crops\"\n")
            .unwrap();

        let (config, found) = GrowwellConfig::from_file_or_default(temp_file.path()).unwrap();
        assert!(found);
        assert_eq!(config.client.assets_dir, PathBuf::from("static/crops"));

        let (config, found) =
            GrowwellConfig::from_file_or_default("/definitely/missing/growwell.toml").unwrap();
        assert!(!found);
        assert_eq!(config, GrowwellConfig::default());
    }
}
