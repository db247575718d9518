use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What happens to members left over after slicing full groups.
///
/// No policy ever emits a group of one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemainderPolicy {
    /// Leftovers are not grouped this run.
    Drop,
    /// Leftovers join the last full group; without one, two or more
    /// leftovers form a group and a lone member is dropped.
    #[default]
    Merge,
    /// Two or more leftovers form their own smaller group.
    Separate,
}

impl FromStr for RemainderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(RemainderPolicy::Drop),
            "merge" => Ok(RemainderPolicy::Merge),
            "separate" => Ok(RemainderPolicy::Separate),
            other => Err(format!(
                "unknown remainder policy '{}', expected drop, merge or separate",
                other
            )),
        }
    }
}

impl fmt::Display for RemainderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RemainderPolicy::Drop => "drop",
            RemainderPolicy::Merge => "merge",
            RemainderPolicy::Separate => "separate",
        };
        f.write_str(name)
    }
}

/// Slices already shuffled `items` into consecutive groups of `group_size`.
///
/// Output order is selection priority: callers that cap the number of groups
/// keep the first ones, which is fair because the input was shuffled.
pub fn partition<T>(items: Vec<T>, group_size: usize, policy: RemainderPolicy) -> Vec<Vec<T>> {
    let group_size = group_size.max(2);
    let total = items.len();
    let mut groups: Vec<Vec<T>> = Vec::with_capacity(total / group_size + 1);
    let mut iter = items.into_iter();

    for _ in 0..total / group_size {
        groups.push(iter.by_ref().take(group_size).collect());
    }

    let remainder: Vec<T> = iter.collect();
    if remainder.is_empty() {
        return groups;
    }

    match (policy, groups.last_mut()) {
        (RemainderPolicy::Merge, Some(last)) => last.extend(remainder),
        (RemainderPolicy::Drop, _) => {
            tracing::debug!("Dropping {} leftover members", remainder.len());
        }
        _ if remainder.len() < 2 => {
            tracing::debug!("One member left over after grouping, not notified this run");
        }
        (RemainderPolicy::Merge, None) | (RemainderPolicy::Separate, _) => groups.push(remainder),
    }

    groups
}
