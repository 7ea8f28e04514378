//! Per-person hour totals.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sprintload_core::{Item, Overrides, Team};

use crate::duration::resolve_duration;
use crate::interval::resolve_interval;

/// Person display name -> cumulative hours.
pub type PersonTotals = BTreeMap<String, f64>;

/// Returns `true` if the item counts towards a report for `team`:
/// assigned to a team member and not a sub-task.
pub fn is_eligible(team: &Team, item: &Item) -> bool {
    team.contains(&item.assignee) && !item.item_type.is_subtask()
}

/// Sums each team member's working hours over `items`.
///
/// Every member starts at zero so people without work still appear. Items
/// outside the roster, sub-tasks, and items with no resolvable start are
/// skipped. An item still in progress is measured up to `now`.
pub fn aggregate(
    team: &Team,
    items: &[Item],
    overrides: &Overrides,
    now: DateTime<Utc>,
) -> PersonTotals {
    let mut totals: PersonTotals = team.members.iter().map(|m| (m.clone(), 0.0)).collect();

    for item in items.iter().filter(|item| is_eligible(team, item)) {
        let interval = resolve_interval(item);
        let Some(start) = interval.start else {
            continue;
        };
        let end = interval.end.unwrap_or(now);
        let hours = resolve_duration(&item.key, overrides, start, end);
        *totals.entry(item.assignee.clone()).or_insert(0.0) += hours;
    }

    totals
}
