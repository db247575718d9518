use anyhow::Context;
use clap::Parser;
use pairup::adapters::{CsvPreferenceStore, InMemoryPreferenceStore, JsonDirectory, LogChannel, WebhookChannel};
use pairup::config::toml_config::NotificationMode;
use pairup::core::{NotificationChannel, PreferenceStore};
use pairup::utils::error::ErrorCategory;
use pairup::utils::{logger, validation::Validate};
use pairup::{CancelSignal, CliArgs, MatchingEngine, TomlConfig};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting pairup");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };
    args.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let directory = JsonDirectory::from_file(&config.directory.roster_file)
        .with_context(|| format!("reading roster file {}", config.directory.roster_file))?;

    let preferences: Box<dyn PreferenceStore> = match config.preferences_file() {
        Some(file) => Box::new(CsvPreferenceStore::new(file)),
        None => Box::new(InMemoryPreferenceStore::default()),
    };

    let channel: Box<dyn NotificationChannel> = match config.notification.mode {
        NotificationMode::Webhook => Box::new(
            WebhookChannel::new(Duration::from_secs(config.notification_timeout_seconds()))
                .context("building webhook client")?,
        ),
        NotificationMode::Log => {
            tracing::info!("🔍 DRY RUN MODE - notifications are only logged");
            Box::new(LogChannel)
        }
    };

    let engine = match args.seed {
        Some(seed) => MatchingEngine::with_seed(directory, preferences, channel, config, seed),
        None => MatchingEngine::new(directory, preferences, channel, config),
    };

    let (cancel_handle, cancel) = CancelSignal::pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing notifications already in flight");
            cancel_handle.cancel();
        }
    });

    match engine.run_with_cancel(&cancel).await {
        Ok(summary) => {
            tracing::info!(
                "✅ Run finished: {} groups, {} members notified",
                summary.groups_formed,
                summary.members_notified
            );
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Err(e) => {
            tracing::error!("❌ Run failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.category() {
                ErrorCategory::Configuration => 1,
                ErrorCategory::RunFatal => 3,
                ErrorCategory::TeamRecoverable | ErrorCategory::DispatchLocal => 2,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
