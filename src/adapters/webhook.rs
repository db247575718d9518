use crate::core::{NotificationChannel, Result, Team};
use crate::domain::model::Member;
use crate::domain::notification::GroupNotification;
use crate::utils::error::MatchError;
use crate::utils::validation::validate_service_url;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    tenant_id: &'a str,
    team_id: &'a str,
    team_name: &'a str,
    recipient: &'a Member,
    rest_of_group: &'a [Member],
    meetup_title: String,
    meetup_link: String,
}

/// Posts each notification as JSON to the team's service URL.
#[derive(Debug, Clone)]
pub struct WebhookChannel {
    client: Client,
}

impl WebhookChannel {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl NotificationChannel for WebhookChannel {
    async fn notify(&self, team: &Team, notification: &GroupNotification) -> Result<()> {
        validate_service_url("endpoint.service_url", &team.endpoint.service_url)?;

        let payload = WebhookPayload {
            tenant_id: &team.endpoint.tenant_id,
            team_id: &team.id,
            team_name: &notification.team_name,
            recipient: &notification.recipient,
            rest_of_group: &notification.rest_of_group,
            meetup_title: notification.meetup_title(),
            meetup_link: notification.meetup_link(),
        };

        let response = self
            .client
            .post(&team.endpoint.service_url)
            .json(&payload)
            .send()
            .await?;

        tracing::debug!("Webhook response status: {}", response.status());
        if !response.status().is_success() {
            return Err(MatchError::notification(
                notification.recipient.id.clone(),
                format!("endpoint returned {}", response.status()),
            ));
        }

        Ok(())
    }
}
