use httpmock::prelude::*;
use pairup::adapters::{CsvPreferenceStore, JsonDirectory, LogChannel, WebhookChannel};
use pairup::utils::validation::Validate;
use pairup::{MatchingEngine, TomlConfig};
use std::time::Duration;
use tempfile::TempDir;

fn write_directory(dir: &TempDir, service_url: &str) -> String {
    let members: Vec<serde_json::Value> = (0..7)
        .map(|i| {
            serde_json::json!({
                "id": format!("u{}", i),
                "name": format!("User {}", i),
                "contact": format!("u{}@contoso.com", i)
            })
        })
        .collect();

    let directory = serde_json::json!({
        "teams": [
            {
                "id": "19:engineering",
                "name": "Engineering",
                "endpoint": {"service_url": service_url, "tenant_id": "tenant-1"},
                "members": members
            },
            {
                "id": "19:unnamed",
                "endpoint": {"service_url": service_url, "tenant_id": "tenant-1"},
                "members": [
                    {"id": "x1", "name": "X1", "contact": "x1@contoso.com"},
                    {"id": "x2", "name": "X2", "contact": "x2@contoso.com"}
                ]
            }
        ]
    });

    let path = dir.path().join("teams.json");
    std::fs::write(&path, serde_json::to_string_pretty(&directory).unwrap()).unwrap();
    path.to_str().unwrap().to_string()
}

fn write_preferences(dir: &TempDir) -> String {
    let path = dir.path().join("optin.csv");
    std::fs::write(&path, "member_id,opted_in\nu0,optout\nu1,true\n").unwrap();
    path.to_str().unwrap().to_string()
}

fn load_config(roster_file: &str, preferences_file: &str, mode: &str) -> TomlConfig {
    let toml_content = format!(
        r#"
[matching]
group_size = 3
max_groups_per_team = 10
remainder_policy = "merge"
bot_display_name = "Icebreaker"

[directory]
roster_file = "{}"

[preferences]
file = "{}"

[notification]
mode = "{}"
timeout_seconds = 5
"#,
        roster_file, preferences_file, mode
    );
    let config = TomlConfig::from_toml_str(&toml_content).unwrap();
    config.validate().unwrap();
    config
}

#[tokio::test]
async fn test_end_to_end_with_log_channel() {
    let temp_dir = TempDir::new().unwrap();
    let roster_file = write_directory(&temp_dir, "https://smba.example.com/emea/");
    let preferences_file = write_preferences(&temp_dir);
    let config = load_config(&roster_file, &preferences_file, "log");

    let engine = MatchingEngine::with_seed(
        JsonDirectory::from_file(&roster_file).unwrap(),
        CsvPreferenceStore::new(preferences_file),
        LogChannel,
        config,
        7,
    );

    let summary = engine.run().await.unwrap();

    // u0 opted out: 6 eligible members form two groups of three
    assert_eq!(summary.teams_seen, 2);
    assert_eq!(summary.teams_failed, 1);
    assert_eq!(summary.preference_entries, 2);
    assert_eq!(summary.groups_formed, 2);
    assert_eq!(summary.members_notified, 6);
}

#[tokio::test]
async fn test_end_to_end_with_webhook_channel() {
    let server = MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(POST)
            .path("/api/notify")
            .json_body_partial(r#"{"tenant_id": "tenant-1", "team_name": "Engineering"}"#);
        then.status(202);
    });

    let temp_dir = TempDir::new().unwrap();
    let roster_file = write_directory(&temp_dir, &server.url("/api/notify"));
    let preferences_file = write_preferences(&temp_dir);
    let config = load_config(&roster_file, &preferences_file, "webhook");

    let engine = MatchingEngine::with_seed(
        JsonDirectory::from_file(&roster_file).unwrap(),
        CsvPreferenceStore::new(preferences_file),
        WebhookChannel::new(Duration::from_secs(config.notification_timeout_seconds())).unwrap(),
        config,
        7,
    );

    let summary = engine.run().await.unwrap();

    hook.assert_hits(6);
    assert_eq!(summary.groups_formed, 2);
    assert_eq!(summary.members_notified, 6);
}

#[tokio::test]
async fn test_webhook_outage_counts_groups_but_no_members() {
    let server = MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(POST).path("/api/notify");
        then.status(500);
    });

    let temp_dir = TempDir::new().unwrap();
    let roster_file = write_directory(&temp_dir, &server.url("/api/notify"));
    let preferences_file = write_preferences(&temp_dir);
    let config = load_config(&roster_file, &preferences_file, "webhook");

    let engine = MatchingEngine::with_seed(
        JsonDirectory::from_file(&roster_file).unwrap(),
        CsvPreferenceStore::new(preferences_file),
        WebhookChannel::new(Duration::from_secs(5)).unwrap(),
        config,
        3,
    );

    let summary = engine.run().await.unwrap();

    hook.assert_hits(6);
    assert_eq!(summary.groups_formed, 2);
    assert_eq!(summary.members_notified, 0);
}
