use crate::core::cancel::CancelSignal;
use crate::core::team_runner::{TeamOutcome, TeamRunner};
use crate::domain::model::RunSummary;
use crate::domain::ports::{MatchingConfig, MembershipDirectory, NotificationChannel, PreferenceStore};
use crate::utils::error::{MatchError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Runs grouping and notification across every installed team.
pub struct MatchingEngine<D, P, N, C, R = StdRng> {
    directory: D,
    preferences: P,
    channel: N,
    config: C,
    rng: Mutex<R>,
}

impl<D, P, N, C> MatchingEngine<D, P, N, C, StdRng>
where
    D: MembershipDirectory,
    P: PreferenceStore,
    N: NotificationChannel,
    C: MatchingConfig,
{
    pub fn new(directory: D, preferences: P, channel: N, config: C) -> Self {
        Self::with_rng(directory, preferences, channel, config, StdRng::from_os_rng())
    }

    pub fn with_seed(directory: D, preferences: P, channel: N, config: C, seed: u64) -> Self {
        Self::with_rng(directory, preferences, channel, config, StdRng::seed_from_u64(seed))
    }
}

impl<D, P, N, C, R> MatchingEngine<D, P, N, C, R>
where
    D: MembershipDirectory,
    P: PreferenceStore,
    N: NotificationChannel,
    C: MatchingConfig,
    R: Rng + Send,
{
    pub fn with_rng(directory: D, preferences: P, channel: N, config: C, rng: R) -> Self {
        Self {
            directory,
            preferences,
            channel,
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub async fn run(&self) -> Result<RunSummary> {
        self.run_with_cancel(&CancelSignal::never()).await
    }

    /// One full run.
    ///
    /// Fails only when the teams or the preferences cannot be loaded. A team
    /// that fails is logged and skipped. Cancellation yields the partial
    /// summary with `cancelled` set.
    pub async fn run_with_cancel(&self, cancel: &CancelSignal) -> Result<RunSummary> {
        tracing::info!("Making groups");
        let mut summary = RunSummary::start();

        let teams = self
            .directory
            .list_installed_teams()
            .await
            .map_err(|e| MatchError::run_aborted("listing installed teams", e))?;
        tracing::info!("Generating groups for {} teams", teams.len());

        let preferences = self
            .preferences
            .load_all_opt_in_status()
            .await
            .map_err(|e| MatchError::run_aborted("loading opt-in status", e))?;
        summary.preference_entries = preferences.len();

        let runner = TeamRunner::new(&self.directory, &self.channel, &self.config, &self.rng);

        for team in &teams {
            if cancel.is_cancelled() {
                tracing::warn!("Run cancelled before team {}", team.id);
                summary.cancelled = true;
                break;
            }

            summary.teams_seen += 1;
            tracing::info!(team = %team.id, "Grouping members of team");

            match runner.run_team(team, &preferences, cancel).await {
                Ok(outcome) => {
                    absorb(&mut summary, &outcome);
                    if outcome.cancelled {
                        summary.cancelled = true;
                        break;
                    }
                }
                Err(e) => {
                    summary.teams_failed += 1;
                    tracing::warn!(
                        team = %team.id,
                        error = %e,
                        category = ?e.category(),
                        "Error grouping team members"
                    );
                }
            }
        }

        let summary = summary.finish();
        tracing::info!(
            installed_teams = teams.len(),
            groups_notified = summary.groups_formed,
            users_notified = summary.members_notified,
            preference_entries = summary.preference_entries,
            teams_failed = summary.teams_failed,
            cancelled = summary.cancelled,
            "Processed pairups"
        );
        tracing::info!(
            "Made {} groups, {} notifications sent",
            summary.groups_formed,
            summary.members_notified
        );

        Ok(summary)
    }
}

fn absorb(summary: &mut RunSummary, outcome: &TeamOutcome) {
    summary.groups_formed += outcome.groups_formed;
    summary.members_notified += outcome.members_notified;
}
