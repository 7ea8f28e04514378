//! Load normalisation: per-item hours as a percentage of the assignee's load.
//!
//! Two passes over the eligible items. The first sums each person's floored
//! hours into a denominator; the second emits one row per item with
//! `hours / denominator * 100`. Both passes read the same memoised
//! [`ItemLoad`], so the floor is applied identically in each.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use sprintload_core::{Item, Overrides, ReportRow, Team};
use sprintload_timeparsing::{format_date, same_calendar_day};

use crate::aggregate::{PersonTotals, is_eligible};
use crate::classify::{WorkClassifier, asset_name};
use crate::duration::resolve_duration;
use crate::interval::resolve_interval;

/// Minimum hours credited to an item closed on the day it started.
pub const SAME_DAY_FLOOR_HOURS: f64 = 1.0;

/// Window assumed for an item with no changelog signal at all.
pub const OPEN_LOOKBACK_HOURS: i64 = 8;

/// The resolved span and credited hours of one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemLoad {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub hours: f64,
}

/// Resolves the span and hours credited to `item`.
///
/// - No resolvable interval: start at the first changelog timestamp, or at
///   `now - 8h` when the changelog has none; end at `now`.
/// - Still open: end at `now`.
/// - A closed item whose computed hours are under one hour and whose start
///   and end share a calendar day is credited one hour. Manual overrides are
///   taken as given and never floored.
pub fn item_load(item: &Item, overrides: &Overrides, now: DateTime<Utc>) -> ItemLoad {
    let interval = resolve_interval(item);
    let (start, end) = match interval.start {
        Some(start) => (start, interval.end.unwrap_or(now)),
        None => {
            let start = item
                .first_change_at()
                .unwrap_or_else(|| now - Duration::hours(OPEN_LOOKBACK_HOURS));
            (start, now)
        }
    };

    let mut hours = resolve_duration(&item.key, overrides, start, end);
    if overrides.get(&item.key).is_none()
        && hours < SAME_DAY_FLOOR_HOURS
        && item.status.is_terminal()
        && same_calendar_day(start, end)
    {
        hours = SAME_DAY_FLOOR_HOURS;
    }

    ItemLoad { start, end, hours }
}

/// Formats a share as `NN.NN%`; a zero denominator yields `0.00%`.
pub fn format_share(hours: f64, person_total: f64) -> String {
    if person_total == 0.0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", hours / person_total * 100.0)
}

/// Pass one: each member's summed, floored hours over the eligible items.
pub fn person_hours(loads: &[(&Item, ItemLoad)]) -> PersonTotals {
    let mut totals = PersonTotals::new();
    for (item, load) in loads {
        *totals.entry(item.assignee.clone()).or_insert(0.0) += load.hours;
    }
    totals
}

/// Produces one report row per eligible item.
///
/// Rows follow the input order. Each row carries the assignee's share in
/// that member's column and empty strings for everyone else; the completion
/// date is only filled for items in a terminal status.
pub fn normalize(
    sprint: &str,
    team: &Team,
    items: &[Item],
    overrides: &Overrides,
    now: DateTime<Utc>,
    classifier: &dyn WorkClassifier,
) -> Vec<ReportRow> {
    let loads: Vec<(&Item, ItemLoad)> = items
        .iter()
        .filter(|item| is_eligible(team, item))
        .map(|item| (item, item_load(item, overrides, now)))
        .collect();

    let denominators = person_hours(&loads);
    let columns: HashMap<&str, usize> = team
        .members
        .iter()
        .enumerate()
        .map(|(idx, m)| (m.as_str(), idx))
        .collect();

    loads
        .iter()
        .map(|(item, load)| {
            let person_total = denominators.get(&item.assignee).copied().unwrap_or(0.0);
            let mut shares = vec![String::new(); team.len()];
            if let Some(&col) = columns.get(item.assignee.as_str()) {
                shares[col] = format_share(load.hours, person_total);
            }

            ReportRow {
                sprint: sprint.to_string(),
                issue_key: item.key.clone(),
                issue_type: item.item_type.to_string(),
                issue_title: item.title.clone(),
                work_type: classifier.classify(item),
                asset_name: asset_name(item),
                status: item.status.to_string(),
                date_started: format_date(load.start),
                date_completed: if item.status.is_terminal() {
                    format_date(load.end)
                } else {
                    String::new()
                },
                shares,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::TypeClassifier;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use sprintload_core::ItemBuilder;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 25, 9, 0, 0).unwrap()
    }

    fn team() -> Team {
        Team::new("core", ["Alice", "Bob", "Carol"])
    }

    fn rows(items: &[Item], overrides: &Overrides) -> Vec<ReportRow> {
        normalize("42", &team(), items, overrides, now(), &TypeClassifier)
    }

    fn parse_pct(s: &str) -> f64 {
        s.trim_end_matches('%').parse().unwrap()
    }

    #[test]
    fn shares_are_relative_to_the_assignee_load() {
        let items = vec![
            ItemBuilder::new("SL-1")
                .assignee("Alice")
                .status("Done")
                .transition("2024-03-20T10:00:00Z", "To Do", "In Progress")
                .transition("2024-03-20T16:00:00Z", "In Progress", "Done")
                .build(),
            ItemBuilder::new("SL-2")
                .assignee("Alice")
                .status("Done")
                .transition("2024-03-21T10:00:00Z", "To Do", "In Progress")
                .transition("2024-03-21T12:00:00Z", "In Progress", "Done")
                .build(),
        ];
        let rows = rows(&items, &Overrides::new());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].shares, vec!["75.00%", "", ""]);
        assert_eq!(rows[1].shares, vec!["25.00%", "", ""]);
        assert_eq!(rows[0].date_started, "2024-03-20");
        assert_eq!(rows[0].date_completed, "2024-03-20");
    }

    #[test]
    fn per_person_shares_sum_to_one_hundred() {
        let items = vec![
            ItemBuilder::new("SL-1")
                .assignee("Bob")
                .status("Done")
                .transition("2024-03-20T10:00:00Z", "To Do", "In Progress")
                .transition("2024-03-20T17:20:00Z", "In Progress", "Done")
                .build(),
            ItemBuilder::new("SL-2")
                .assignee("Bob")
                .status("Done")
                .transition("2024-03-21T10:00:00Z", "To Do", "In Progress")
                .transition("2024-03-22T09:10:00Z", "In Progress", "Done")
                .build(),
            ItemBuilder::new("SL-3")
                .assignee("Bob")
                .status("Won't Do")
                .transition("2024-03-22T10:00:00Z", "To Do", "Won't Do")
                .build(),
        ];
        let rows = rows(&items, &Overrides::new());
        let sum: f64 = rows.iter().map(|r| parse_pct(&r.shares[1])).sum();
        assert!((sum - 100.0).abs() < 0.05, "sum was {sum}");
    }

    #[test]
    fn same_day_close_is_floored_to_one_hour() {
        let items = vec![
            ItemBuilder::new("SL-1")
                .assignee("Alice")
                .status("Done")
                .transition("2024-03-20T10:00:00Z", "To Do", "Done")
                .build(),
            ItemBuilder::new("SL-2")
                .assignee("Alice")
                .status("Done")
                .transition("2024-03-21T10:00:00Z", "To Do", "In Progress")
                .transition("2024-03-21T13:00:00Z", "In Progress", "Done")
                .build(),
        ];
        let load = item_load(&items[0], &Overrides::new(), now());
        assert_eq!(load.hours, 1.0);

        let rows = rows(&items, &Overrides::new());
        assert_eq!(rows[0].shares[0], "25.00%");
        assert_eq!(rows[1].shares[0], "75.00%");
    }

    #[test]
    fn floor_needs_a_terminal_status_and_a_single_day() {
        let open = ItemBuilder::new("SL-1")
            .assignee("Alice")
            .status("In Review")
            .transition("2024-03-20T10:00:00Z", "To Do", "In Progress")
            .transition("2024-03-20T10:30:00Z", "In Progress", "In Review")
            .build();
        // Paused in review: measured from start up to now.
        assert!(item_load(&open, &Overrides::new(), now()).hours > 1.0);

        let overnight = ItemBuilder::new("SL-2")
            .assignee("Alice")
            .status("Done")
            .transition("2024-03-20T23:50:00Z", "To Do", "In Progress")
            .transition("2024-03-21T00:20:00Z", "In Progress", "Done")
            .build();
        assert_eq!(item_load(&overnight, &Overrides::new(), now()).hours, 0.5);
    }

    #[test]
    fn overrides_are_not_floored() {
        let item = ItemBuilder::new("SL-1")
            .assignee("Alice")
            .status("Done")
            .transition("2024-03-20T10:00:00Z", "To Do", "Done")
            .build();
        let overrides: Overrides = [("SL-1", 0.25)].into_iter().collect();
        assert_eq!(item_load(&item, &overrides, now()).hours, 0.25);
    }

    #[test]
    fn zero_load_renders_zero_percent() {
        let item = ItemBuilder::new("SL-1")
            .assignee("Carol")
            .status("Done")
            .transition("2024-03-20T10:00:00Z", "To Do", "Done")
            .build();
        let overrides: Overrides = [("SL-1", 0.0)].into_iter().collect();
        let rows = rows(&[item], &overrides);
        assert_eq!(rows[0].shares, vec!["", "", "0.00%"]);
    }

    #[test]
    fn items_without_signal_use_eight_hour_lookback() {
        let item = ItemBuilder::new("SL-1").assignee("Bob").build();
        let load = item_load(&item, &Overrides::new(), now());
        assert_eq!(load.start, now() - Duration::hours(8));
        assert_eq!(load.end, now());
        assert_eq!(load.hours, 8.0);
    }

    #[test]
    fn items_without_interval_start_at_first_change() {
        let item = ItemBuilder::new("SL-1")
            .assignee("Bob")
            .status("Blocked")
            .transition("2024-03-24T21:00:00Z", "To Do", "Blocked")
            .build();
        let load = item_load(&item, &Overrides::new(), now());
        assert_eq!(load.hours, 12.0);

        let rows = rows(&[item], &Overrides::new());
        assert_eq!(rows[0].date_started, "2024-03-24");
        assert_eq!(rows[0].date_completed, "");
    }

    #[test]
    fn outsiders_and_subtasks_produce_no_rows() {
        let items = vec![
            ItemBuilder::new("SL-1").assignee("Mallory").build(),
            ItemBuilder::new("SL-2").assignee("Alice").item_type("Sub-task").build(),
            ItemBuilder::new("SL-3").assignee("Alice").build(),
        ];
        let rows = rows(&items, &Overrides::new());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].issue_key, "SL-3");
    }

    #[test]
    fn row_fields() {
        let item = ItemBuilder::new("SL-9")
            .title("Ship it")
            .assignee("Carol")
            .item_type("Bug")
            .label("payments")
            .status("Done")
            .transition("2024-03-20T10:00:00Z", "To Do", "In Progress")
            .transition("2024-03-21T15:00:00Z", "In Progress", "Done")
            .build();
        let rows = rows(&[item], &Overrides::new());
        let row = &rows[0];
        assert_eq!(
            row.fixed_fields(),
            [
                "42",
                "SL-9",
                "Bug",
                "Ship it",
                "Maintenance",
                "payments",
                "Done",
                "2024-03-20",
                "2024-03-21",
            ]
        );
        assert_eq!(row.assignee_share(), Some("100.00%"));
    }

    #[test]
    fn normalization_is_idempotent() {
        let items = vec![
            ItemBuilder::new("SL-1")
                .assignee("Alice")
                .transition("2024-03-20T10:00:00Z", "To Do", "In Progress")
                .build(),
            ItemBuilder::new("SL-2").assignee("Bob").build(),
        ];
        assert_eq!(rows(&items, &Overrides::new()), rows(&items, &Overrides::new()));
    }
}
