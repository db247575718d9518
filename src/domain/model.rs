use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// UPN marker carried by externally authenticated (guest) accounts.
const EXTERNALLY_AUTHENTICATED_MARKER: &str = "#ext#";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Directory object id, the key used by the preference store.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub given_name: Option<String>,
    /// Address used to reach the member (UPN, or email for guests).
    pub contact: String,
    #[serde(default)]
    pub is_guest: bool,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            given_name: None,
            contact: contact.into(),
            is_guest: false,
        }
    }

    /// Guests may not have a given name in the directory, so fall back to the full name.
    pub fn greeting_name(&self) -> &str {
        match self.given_name.as_deref() {
            Some(given) if !given.trim().is_empty() => given,
            _ => &self.name,
        }
    }

    pub fn is_guest_principal(principal_name: &str) -> bool {
        principal_name
            .to_ascii_lowercase()
            .contains(EXTERNALLY_AUTHENTICATED_MARKER)
    }
}

/// Routing information for outgoing notifications of one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEndpoint {
    pub service_url: String,
    pub tenant_id: String,
}

/// Roster entries may be missing; consumers skip `None`.
pub type Roster = Vec<Option<Member>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub endpoint: NotificationEndpoint,
}

impl Team {
    pub fn new(id: impl Into<String>, endpoint: NotificationEndpoint) -> Self {
        Self {
            id: id.into(),
            endpoint,
        }
    }
}

/// Members of one team who meet together this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub members: Vec<Member>,
}

impl Group {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Everyone in the group except the member at `position`.
    pub fn rest_of_group(&self, position: usize) -> Vec<Member> {
        self.members
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != position)
            .map(|(_, member)| member.clone())
            .collect()
    }
}

/// Opt-in status per member id, loaded once per run.
///
/// A member without an entry is opted in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceLookup {
    entries: HashMap<String, bool>,
}

impl PreferenceLookup {
    pub fn new(entries: HashMap<String, bool>) -> Self {
        Self { entries }
    }

    pub fn is_opted_in(&self, member_id: &str) -> bool {
        self.entries.get(member_id).copied().unwrap_or(true)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, bool)> for PreferenceLookup {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Action a member takes on their own matching status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchingAction {
    OptIn,
    OptOut,
}

impl MatchingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchingAction::OptIn => "optin",
            MatchingAction::OptOut => "optout",
        }
    }

    pub fn is_opted_in(&self) -> bool {
        matches!(self, MatchingAction::OptIn)
    }
}

impl FromStr for MatchingAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "optin" | "true" => Ok(MatchingAction::OptIn),
            "optout" | "false" => Ok(MatchingAction::OptOut),
            other => Err(format!("unknown matching action: {}", other)),
        }
    }
}

impl fmt::Display for MatchingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts accumulated over one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub teams_seen: usize,
    pub teams_failed: usize,
    pub groups_formed: usize,
    pub members_notified: usize,
    pub preference_entries: usize,
    pub cancelled: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunSummary {
    pub fn start() -> Self {
        Self {
            teams_seen: 0,
            teams_failed: 0,
            groups_formed: 0,
            members_notified: 0,
            preference_entries: 0,
            cancelled: false,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_preference_defaults_to_opted_in() {
        let lookup: PreferenceLookup = vec![
            ("a".to_string(), true),
            ("b".to_string(), false),
        ]
        .into_iter()
        .collect();

        assert!(lookup.is_opted_in("a"));
        assert!(!lookup.is_opted_in("b"));
        assert!(lookup.is_opted_in("unknown"));
        assert_eq!(lookup.len(), 2);
    }

    #[test]
    fn test_greeting_name_falls_back_to_display_name() {
        let mut member = Member::new("1", "Ada Lovelace", "ada@example.com");
        assert_eq!(member.greeting_name(), "Ada Lovelace");

        member.given_name = Some("  ".to_string());
        assert_eq!(member.greeting_name(), "Ada Lovelace");

        member.given_name = Some("Ada".to_string());
        assert_eq!(member.greeting_name(), "Ada");
    }

    #[test]
    fn test_guest_principal_detection() {
        assert!(Member::is_guest_principal(
            "ada_example.com#EXT#@contoso.onmicrosoft.com"
        ));
        assert!(!Member::is_guest_principal("ada@contoso.com"));
    }

    #[test]
    fn test_rest_of_group_excludes_recipient() {
        let group = Group::new(vec![
            Member::new("1", "A", "a@x"),
            Member::new("2", "B", "b@x"),
            Member::new("3", "C", "c@x"),
        ]);
        let rest = group.rest_of_group(1);

        let ids: Vec<&str> = rest.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_matching_action_parse() {
        assert_eq!("optin".parse::<MatchingAction>(), Ok(MatchingAction::OptIn));
        assert_eq!("OptOut".parse::<MatchingAction>(), Ok(MatchingAction::OptOut));
        assert_eq!("false".parse::<MatchingAction>(), Ok(MatchingAction::OptOut));
        assert!("maybe".parse::<MatchingAction>().is_err());
        assert_eq!(MatchingAction::OptIn.to_string(), "optin");
    }
}
