use crate::core::cancel::CancelSignal;
use crate::domain::model::{Group, Team};
use crate::domain::notification::GroupNotification;
use crate::domain::ports::NotificationChannel;
use futures::future::join_all;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DispatchOutcome {
    Delivered,
    Failed,
    Skipped,
}

/// Per-group dispatch counts, summed locally before reaching the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupDelivery {
    pub delivered: usize,
    pub failed: usize,
    /// Dispatches not started because the run was cancelled.
    pub skipped: usize,
}

/// Sends every member of `group` a notification naming the rest of the group.
///
/// All dispatches run concurrently and are awaited together. A failed
/// dispatch is logged and counted; it never affects its siblings.
pub async fn notify_group<N>(
    channel: &N,
    team: &Team,
    team_name: &str,
    group: &Group,
    bot_display_name: &str,
    cancel: &CancelSignal,
) -> GroupDelivery
where
    N: NotificationChannel + ?Sized,
{
    let notifications: Vec<GroupNotification> = group
        .members
        .iter()
        .enumerate()
        .map(|(position, recipient)| {
            GroupNotification::new(
                team_name,
                recipient.clone(),
                group.rest_of_group(position),
                bot_display_name,
            )
        })
        .collect();

    let dispatches = notifications.iter().map(|notification| async move {
        if cancel.is_cancelled() {
            return DispatchOutcome::Skipped;
        }

        tracing::debug!(
            recipient = %notification.recipient.id,
            "Sending grouping notification"
        );
        match channel.notify(team, notification).await {
            Ok(()) => DispatchOutcome::Delivered,
            Err(e) => {
                tracing::warn!(
                    team = %team.id,
                    recipient = %notification.recipient.id,
                    error = %e,
                    "Failed to notify group member"
                );
                DispatchOutcome::Failed
            }
        }
    });

    join_all(dispatches)
        .await
        .into_iter()
        .fold(GroupDelivery::default(), |mut tally, outcome| {
            match outcome {
                DispatchOutcome::Delivered => tally.delivered += 1,
                DispatchOutcome::Failed => tally.failed += 1,
                DispatchOutcome::Skipped => tally.skipped += 1,
            }
            tally
        })
}
