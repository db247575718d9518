pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use config::{toml_config::TomlConfig, MatchingSettings};
pub use core::cancel::{CancelHandle, CancelSignal};
pub use core::engine::MatchingEngine;
pub use core::partition::RemainderPolicy;
pub use domain::model::{Member, NotificationEndpoint, PreferenceLookup, RunSummary, Team};
pub use utils::error::{MatchError, Result};
