use crate::core::{NotificationChannel, Result, Team};
use crate::domain::notification::GroupNotification;
use async_trait::async_trait;

/// Dry-run channel: logs what would be sent and always succeeds.
#[derive(Debug, Clone, Default)]
pub struct LogChannel;

#[async_trait]
impl NotificationChannel for LogChannel {
    async fn notify(&self, team: &Team, notification: &GroupNotification) -> Result<()> {
        tracing::info!(
            team = %team.id,
            recipient = %notification.recipient.id,
            "📨 {} -> {}",
            notification.recipient.name,
            notification.meetup_title()
        );
        Ok(())
    }
}
