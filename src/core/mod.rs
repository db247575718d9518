pub mod cancel;
pub mod eligibility;
pub mod engine;
pub mod fanout;
pub mod partition;
pub mod randomizer;
pub mod team_runner;

pub use crate::domain::model::{Group, Member, PreferenceLookup, RunSummary, Team};
pub use crate::domain::ports::{MatchingConfig, MembershipDirectory, NotificationChannel, PreferenceStore};
pub use crate::utils::error::Result;
