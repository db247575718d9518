use crate::config::toml_config::{NotificationMode, TomlConfig};
use crate::core::partition::RemainderPolicy;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "pairup")]
#[command(about = "Split team members into small groups and notify each group")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "pairup.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Log notifications instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long)]
    pub group_size: Option<usize>,

    #[arg(long)]
    pub max_groups: Option<usize>,

    /// drop, merge or separate
    #[arg(long)]
    pub remainder_policy: Option<RemainderPolicy>,

    /// Seed the shuffle for a reproducible grouping
    #[arg(long)]
    pub seed: Option<u64>,
}

impl CliArgs {
    /// 應用命令列覆蓋設定
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(group_size) = self.group_size {
            config.matching.group_size = group_size;
            tracing::info!("🔧 Group size overridden to: {}", group_size);
        }
        if let Some(max_groups) = self.max_groups {
            config.matching.max_groups_per_team = max_groups;
            tracing::info!("🔧 Max groups per team overridden to: {}", max_groups);
        }
        if let Some(policy) = self.remainder_policy {
            config.matching.remainder_policy = policy;
            tracing::info!("🔧 Remainder policy overridden to: {}", policy);
        }
        if self.dry_run {
            config.notification.mode = NotificationMode::Log;
        }
    }
}
