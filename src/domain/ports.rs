use crate::core::partition::RemainderPolicy;
use crate::domain::model::{PreferenceLookup, Roster, Team};
use crate::domain::notification::GroupNotification;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Teams the bot is installed in and their rosters.
#[async_trait]
pub trait MembershipDirectory: Send + Sync {
    async fn list_installed_teams(&self) -> Result<Vec<Team>>;
    async fn list_roster(&self, team: &Team) -> Result<Roster>;
    async fn resolve_team_display_name(&self, team: &Team) -> Result<String>;
}

#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn load_all_opt_in_status(&self) -> Result<PreferenceLookup>;
}

/// Renders and delivers one notification. Retries, if any, live here.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn notify(&self, team: &Team, notification: &GroupNotification) -> Result<()>;
}

pub trait MatchingConfig: Send + Sync {
    fn group_size(&self) -> usize;
    fn max_groups_per_team(&self) -> usize;
    fn remainder_policy(&self) -> RemainderPolicy;
    fn bot_display_name(&self) -> &str;
}

#[async_trait]
impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    async fn load_all_opt_in_status(&self) -> Result<PreferenceLookup> {
        (**self).load_all_opt_in_status().await
    }
}

#[async_trait]
impl<T: NotificationChannel + ?Sized> NotificationChannel for Box<T> {
    async fn notify(&self, team: &Team, notification: &GroupNotification) -> Result<()> {
        (**self).notify(team, notification).await
    }
}
