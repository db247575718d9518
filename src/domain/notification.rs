use crate::domain::model::Member;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

const NEW_MEETING_URL: &str = "https://teams.microsoft.com/l/meeting/new";

/// RFC 3986 unreserved characters stay literal; a space becomes `%20`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// What one member is told about their group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupNotification {
    pub team_name: String,
    pub recipient: Member,
    pub rest_of_group: Vec<Member>,
    pub bot_display_name: String,
}

impl GroupNotification {
    pub fn new(
        team_name: impl Into<String>,
        recipient: Member,
        rest_of_group: Vec<Member>,
        bot_display_name: impl Into<String>,
    ) -> Self {
        Self {
            team_name: team_name.into(),
            recipient,
            rest_of_group,
            bot_display_name: bot_display_name.into(),
        }
    }

    pub fn meetup_title(&self) -> String {
        let others: Vec<&str> = self
            .rest_of_group
            .iter()
            .map(|member| member.greeting_name())
            .collect();
        format!(
            "Meetup: {} / {}",
            self.recipient.greeting_name(),
            others.join(" / ")
        )
    }

    pub fn meetup_content(&self) -> String {
        format!(
            "This meetup was suggested by {} in {}.",
            self.bot_display_name, self.team_name
        )
    }

    /// Comma separated contact addresses of the other members.
    pub fn attendees(&self) -> String {
        self.rest_of_group
            .iter()
            .map(|member| member.contact.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Deep link that opens a new meeting pre-filled with the group.
    ///
    /// Attendee addresses are passed through unencoded.
    pub fn meetup_link(&self) -> String {
        format!(
            "{}?subject={}&attendees={}&content={}",
            NEW_MEETING_URL,
            utf8_percent_encode(&self.meetup_title(), QUERY_VALUE),
            self.attendees(),
            utf8_percent_encode(&self.meetup_content(), QUERY_VALUE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification() -> GroupNotification {
        let mut ada = Member::new("1", "Ada Lovelace", "ada@contoso.com");
        ada.given_name = Some("Ada".to_string());
        let grace = Member::new("2", "Grace Hopper", "grace@contoso.com");
        let alan = Member::new("3", "Alan Turing", "alan@fabrikam.com");

        GroupNotification::new("Research", ada, vec![grace, alan], "Icebreaker")
    }

    #[test]
    fn test_meetup_title_uses_greeting_names() {
        assert_eq!(
            notification().meetup_title(),
            "Meetup: Ada / Grace Hopper / Alan Turing"
        );
    }

    #[test]
    fn test_attendees_excludes_recipient() {
        assert_eq!(
            notification().attendees(),
            "grace@contoso.com,alan@fabrikam.com"
        );
    }

    #[test]
    fn test_meetup_link_is_encoded() {
        assert_eq!(
            notification().meetup_link(),
            "https://teams.microsoft.com/l/meeting/new\
             ?subject=Meetup%3A%20Ada%20%2F%20Grace%20Hopper%20%2F%20Alan%20Turing\
             &attendees=grace@contoso.com,alan@fabrikam.com\
             &content=This%20meetup%20was%20suggested%20by%20Icebreaker%20in%20Research."
        );
    }

    #[test]
    fn test_meetup_link_never_uses_plus_for_spaces() {
        let mut notification = notification();
        notification.team_name = "R&D + Ops".to_string();

        let link = notification.meetup_link();
        assert!(!link.contains('+'));
        assert!(link.ends_with("in%20R%26D%20%2B%20Ops."));
    }
}
