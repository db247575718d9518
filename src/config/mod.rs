#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::partition::RemainderPolicy;
use crate::core::MatchingConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_at_least, validate_not_blank, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GROUP_SIZE: usize = 2;
pub const DEFAULT_MAX_GROUPS_PER_TEAM: usize = 1000;
pub const DEFAULT_BOT_DISPLAY_NAME: &str = "Icebreaker";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingSettings {
    pub group_size: usize,
    pub max_groups_per_team: usize,
    pub remainder_policy: RemainderPolicy,
    pub bot_display_name: String,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            group_size: DEFAULT_GROUP_SIZE,
            max_groups_per_team: DEFAULT_MAX_GROUPS_PER_TEAM,
            remainder_policy: RemainderPolicy::default(),
            bot_display_name: DEFAULT_BOT_DISPLAY_NAME.to_string(),
        }
    }
}

impl MatchingConfig for MatchingSettings {
    fn group_size(&self) -> usize {
        self.group_size
    }

    fn max_groups_per_team(&self) -> usize {
        self.max_groups_per_team
    }

    fn remainder_policy(&self) -> RemainderPolicy {
        self.remainder_policy
    }

    fn bot_display_name(&self) -> &str {
        &self.bot_display_name
    }
}

impl Validate for MatchingSettings {
    fn validate(&self) -> Result<()> {
        validate_at_least("matching.group_size", self.group_size, 2)?;
        validate_at_least("matching.max_groups_per_team", self.max_groups_per_team, 1)?;
        validate_not_blank("matching.bot_display_name", &self.bot_display_name)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = MatchingSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.group_size(), 2);
        assert_eq!(settings.remainder_policy(), RemainderPolicy::Merge);
    }

    #[test]
    fn test_rejects_group_size_below_two() {
        let settings = MatchingSettings {
            group_size: 1,
            ..MatchingSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_cap() {
        let settings = MatchingSettings {
            max_groups_per_team: 0,
            ..MatchingSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
