use crate::core::{MembershipDirectory, Result};
use crate::domain::model::{Member, NotificationEndpoint, Roster, Team};
use crate::utils::error::MatchError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
struct DirectoryFile {
    teams: Vec<TeamEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct TeamEntry {
    id: String,
    #[serde(default)]
    name: Option<String>,
    endpoint: NotificationEndpoint,
    #[serde(default)]
    members: Vec<Option<MemberEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
struct MemberEntry {
    id: String,
    name: String,
    #[serde(default)]
    given_name: Option<String>,
    contact: String,
    #[serde(default)]
    is_guest: Option<bool>,
}

impl From<MemberEntry> for Member {
    fn from(entry: MemberEntry) -> Self {
        // 未標示時從 UPN 判斷訪客身分
        let is_guest = entry
            .is_guest
            .unwrap_or_else(|| Member::is_guest_principal(&entry.contact));
        Member {
            id: entry.id,
            name: entry.name,
            given_name: entry.given_name,
            contact: entry.contact,
            is_guest,
        }
    }
}

/// Directory backed by a JSON snapshot of installed teams.
#[derive(Debug, Clone)]
pub struct JsonDirectory {
    teams: Vec<Team>,
    names: HashMap<String, String>,
    rosters: HashMap<String, Roster>,
}

impl JsonDirectory {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: DirectoryFile = serde_json::from_str(content)?;

        let mut teams = Vec::with_capacity(file.teams.len());
        let mut names = HashMap::new();
        let mut rosters = HashMap::new();
        for entry in file.teams {
            let team = Team::new(entry.id, entry.endpoint);
            if let Some(name) = entry.name {
                names.insert(team.id.clone(), name);
            }
            let roster: Roster = entry
                .members
                .into_iter()
                .map(|member| member.map(Member::from))
                .collect();
            rosters.insert(team.id.clone(), roster);
            teams.push(team);
        }

        tracing::debug!("Loaded {} teams from directory file", teams.len());
        Ok(Self {
            teams,
            names,
            rosters,
        })
    }
}

#[async_trait]
impl MembershipDirectory for JsonDirectory {
    async fn list_installed_teams(&self) -> Result<Vec<Team>> {
        Ok(self.teams.clone())
    }

    async fn list_roster(&self, team: &Team) -> Result<Roster> {
        self.rosters
            .get(&team.id)
            .cloned()
            .ok_or_else(|| MatchError::directory(format!("no roster for team {}", team.id)))
    }

    async fn resolve_team_display_name(&self, team: &Team) -> Result<String> {
        self.names
            .get(&team.id)
            .cloned()
            .ok_or_else(|| MatchError::directory(format!("team {} has no display name", team.id)))
    }
}
