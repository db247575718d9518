use crate::config::MatchingSettings;
use crate::core::partition::RemainderPolicy;
use crate::core::MatchingConfig;
use crate::utils::error::{MatchError, Result};
use crate::utils::validation::{validate_data_file, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub matching: MatchingSettings,
    pub directory: DirectoryConfig,
    pub preferences: Option<PreferencesConfig>,
    #[serde(default)]
    pub notification: NotificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// JSON file listing installed teams and their rosters.
    pub roster_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// `member_id,opted_in` CSV.
    pub file: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationMode {
    Webhook,
    #[default]
    Log,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default)]
    pub mode: NotificationMode,
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MatchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MatchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ROSTER_FILE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MatchError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn notification_timeout_seconds(&self) -> u64 {
        self.notification.timeout_seconds.unwrap_or(10)
    }

    pub fn preferences_file(&self) -> Option<&str> {
        self.preferences.as_ref().map(|p| p.file.as_str())
    }
}

impl MatchingConfig for TomlConfig {
    fn group_size(&self) -> usize {
        self.matching.group_size
    }

    fn max_groups_per_team(&self) -> usize {
        self.matching.max_groups_per_team
    }

    fn remainder_policy(&self) -> RemainderPolicy {
        self.matching.remainder_policy
    }

    fn bot_display_name(&self) -> &str {
        &self.matching.bot_display_name
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.matching.validate()?;

        validate_data_file("directory.roster_file", &self.directory.roster_file, "json")?;
        if let Some(file) = self.preferences_file() {
            validate_data_file("preferences.file", file, "csv")?;
        }

        validate_range(
            "notification.timeout_seconds",
            self.notification_timeout_seconds(),
            1,
            300,
        )?;

        Ok(())
    }
}
