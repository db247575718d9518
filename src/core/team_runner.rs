use crate::core::cancel::CancelSignal;
use crate::core::eligibility::filter_eligible;
use crate::core::fanout::notify_group;
use crate::core::partition::partition;
use crate::core::randomizer::shuffle;
use crate::domain::model::{Group, PreferenceLookup, Team};
use crate::domain::ports::{MatchingConfig, MembershipDirectory, NotificationChannel};
use crate::utils::error::Result;
use rand::Rng;
use std::sync::Mutex;

/// Contribution of one team to the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamOutcome {
    pub eligible_members: usize,
    /// Groups the partitioner produced, before the per-team cap.
    pub groups_computed: usize,
    pub groups_formed: usize,
    pub members_notified: usize,
    pub cancelled: bool,
}

pub struct TeamRunner<'a, D: ?Sized, N: ?Sized, C: ?Sized, R> {
    directory: &'a D,
    channel: &'a N,
    config: &'a C,
    rng: &'a Mutex<R>,
}

impl<'a, D, N, C, R> TeamRunner<'a, D, N, C, R>
where
    D: MembershipDirectory + ?Sized,
    N: NotificationChannel + ?Sized,
    C: MatchingConfig + ?Sized,
    R: Rng,
{
    pub fn new(directory: &'a D, channel: &'a N, config: &'a C, rng: &'a Mutex<R>) -> Self {
        Self {
            directory,
            channel,
            config,
            rng,
        }
    }

    /// Groups one team's eligible members and notifies up to the configured
    /// number of groups.
    ///
    /// Every fallible step happens before the first notification, so an
    /// error means the team contributed nothing.
    pub async fn run_team(
        &self,
        team: &Team,
        preferences: &PreferenceLookup,
        cancel: &CancelSignal,
    ) -> Result<TeamOutcome> {
        let team_name = self.directory.resolve_team_display_name(team).await?;
        let roster = self.directory.list_roster(team).await?;
        tracing::debug!(team = %team.id, "Found {} roster entries", roster.len());

        let mut eligible = filter_eligible(roster, preferences);
        let eligible_members = eligible.len();

        {
            // 鎖只在洗牌期間持有，不跨越 await
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            shuffle(&mut eligible, &mut *rng);
        }

        let groups: Vec<Group> = partition(
            eligible,
            self.config.group_size(),
            self.config.remainder_policy(),
        )
        .into_iter()
        .map(Group::new)
        .collect();

        let mut outcome = TeamOutcome {
            eligible_members,
            groups_computed: groups.len(),
            ..TeamOutcome::default()
        };

        if groups.is_empty() {
            tracing::info!(
                team = %team.id,
                "Groups could not be made from {} eligible members",
                eligible_members
            );
            return Ok(outcome);
        }
        tracing::info!(
            team = %team.id,
            "Made {} groups among {} members",
            groups.len(),
            eligible_members
        );

        for group in groups.iter().take(self.config.max_groups_per_team()) {
            if cancel.is_cancelled() {
                outcome.cancelled = true;
                break;
            }

            let delivery = notify_group(
                self.channel,
                team,
                &team_name,
                group,
                self.config.bot_display_name(),
                cancel,
            )
            .await;

            // a group counts once any dispatch started, regardless of failures
            if delivery.skipped < group.len() {
                outcome.groups_formed += 1;
            }
            outcome.members_notified += delivery.delivered;
            if delivery.skipped > 0 {
                outcome.cancelled = true;
                break;
            }
        }

        Ok(outcome)
    }
}
