use crate::domain::model::{Member, PreferenceLookup};
use std::collections::HashSet;

/// Members who have not opted out, in roster order.
///
/// Missing roster entries and members without an id are skipped. A member
/// listed more than once keeps only the first entry, so nobody is grouped
/// with themselves or notified twice.
pub fn filter_eligible<I>(roster: I, preferences: &PreferenceLookup) -> Vec<Member>
where
    I: IntoIterator<Item = Option<Member>>,
{
    let mut seen = HashSet::new();
    roster
        .into_iter()
        .flatten()
        .filter(|member| !member.id.trim().is_empty())
        .filter(|member| preferences.is_opted_in(&member.id))
        .filter(|member| seen.insert(member.id.clone()))
        .collect()
}
