//! Changelog walking: reconstructs an item's active work interval.
//!
//! The walk is a small state machine over the item's status transitions:
//!
//! ```text
//!            into "In Progress"           into "Done" / "Won't Do"
//!   Idle ---------------------> Active -----------------------------> Completed
//!    ^                            |                                      |
//!    +---- out of "In Progress" --+                                      |
//!    +---------------------- reopened (out of a terminal status) --------+
//! ```
//!
//! - `start` is fixed by the first entry into `In Progress` and never moves.
//! - `end` is the last entry into a terminal status.
//! - Once an entry is older than the one before it, the log is treated as
//!   out of order: from then on `start` only moves earlier and `end` only
//!   moves later.
//! - An item closed without ever being seen in progress gets `start == end`.
//! - Pauses close the current active span but leave `start` alone.
//!
//! Entries are walked in the order given. Entries whose timestamp does not
//! parse are skipped.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sprintload_core::enums::ItemStatus;
use sprintload_core::item::{FieldChange, Item};

/// The reconstructed `(start, end)` span an item was worked on, in UTC.
///
/// `start` may be set while `end` is not (still active). When both are set,
/// `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkInterval {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl WorkInterval {
    /// Returns `true` once a start time is known.
    pub fn is_resolved(&self) -> bool {
        self.start.is_some()
    }
}

/// One uninterrupted stretch in `In Progress`.
///
/// `end` is `None` when the log finishes while the item is still active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveSpan {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

/// Where the walk stands after the last processed entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WalkState {
    /// Not being worked on: never started, paused, or reopened.
    #[default]
    Idle,
    /// In progress since the given instant.
    Active { since: DateTime<Utc> },
    /// Resolved into a terminal status.
    Completed,
}

/// The full outcome of walking one changelog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Walk {
    pub interval: WorkInterval,
    pub spans: Vec<ActiveSpan>,
    pub state: WalkState,
}

#[derive(Debug, Default)]
struct Walker {
    state: WalkState,
    start: Option<DateTime<Utc>>,
    /// `start` was borrowed from a terminal transition, not an `In Progress` entry.
    start_provisional: bool,
    end: Option<DateTime<Utc>>,
    spans: Vec<ActiveSpan>,
    last_at: Option<DateTime<Utc>>,
    out_of_order: bool,
}

impl Walker {
    fn step(&mut self, at: DateTime<Utc>, change: &FieldChange) {
        if self.last_at.is_some_and(|prev| at < prev) {
            self.out_of_order = true;
        }
        self.last_at = Some(at);

        let to = ItemStatus::from(change.to.as_deref().unwrap_or_default());
        let from = ItemStatus::from(change.from.as_deref().unwrap_or_default());

        if to.is_in_progress() {
            self.enter_progress(at);
        } else if to.is_terminal() {
            self.complete(at);
        } else if from.is_in_progress() {
            self.pause(at);
        } else if from.is_terminal() {
            self.state = WalkState::Idle;
        }
    }

    fn enter_progress(&mut self, at: DateTime<Utc>) {
        match self.start {
            None => self.start = Some(at),
            // Reverse-ordered logs list the close before the start.
            Some(current) if self.start_provisional || self.out_of_order => {
                if at < current {
                    self.start = Some(at);
                }
                self.start_provisional = false;
            }
            Some(_) => {}
        }

        if !matches!(self.state, WalkState::Active { .. }) {
            self.state = WalkState::Active { since: at };
        }
    }

    fn pause(&mut self, at: DateTime<Utc>) {
        self.close_span(at);
        self.state = WalkState::Idle;
    }

    fn complete(&mut self, at: DateTime<Utc>) {
        self.close_span(at);
        self.end = match self.end {
            Some(end) if self.out_of_order && end > at => Some(end),
            _ => Some(at),
        };
        if self.start.is_none() {
            self.start = Some(at);
            self.start_provisional = true;
        }
        self.state = WalkState::Completed;
    }

    fn close_span(&mut self, at: DateTime<Utc>) {
        if let WalkState::Active { since } = self.state {
            self.spans.push(ActiveSpan {
                start: since,
                end: Some(at),
            });
        }
    }

    fn finish(mut self) -> Walk {
        if let WalkState::Active { since } = self.state {
            self.spans.push(ActiveSpan {
                start: since,
                end: None,
            });
        }

        let mut interval = WorkInterval {
            start: self.start,
            end: self.end,
        };
        if let (Some(start), Some(end)) = (interval.start, interval.end) {
            if end < start {
                interval.start = Some(end);
                interval.end = Some(start);
            }
        }

        Walk {
            interval,
            spans: self.spans,
            state: self.state,
        }
    }
}

/// Walks an item's changelog, returning the interval plus the measured spans.
pub fn walk(item: &Item) -> Walk {
    let mut walker = Walker::default();
    for event in &item.changelog {
        let Some(change) = event.status_change() else {
            continue;
        };
        let Some(at) = event.created_at() else {
            continue;
        };
        walker.step(at, change);
    }
    walker.finish()
}

/// Resolves the item's active work interval.
pub fn resolve_interval(item: &Item) -> WorkInterval {
    walk(item).interval
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use sprintload_core::item::{ChangeEvent, FieldChange, ItemBuilder};

    fn utc(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, h, 0, 0).unwrap()
    }

    #[test]
    fn no_status_events_leaves_interval_unset() {
        let item = ItemBuilder::new("SL-1")
            .event(ChangeEvent::new(
                "2024-03-20T10:00:00Z",
                vec![FieldChange {
                    field: "summary".into(),
                    from: Some("old".into()),
                    to: Some("new".into()),
                }],
            ))
            .build();
        let walk = walk(&item);
        assert_eq!(walk.interval, WorkInterval::default());
        assert_eq!(walk.state, WalkState::Idle);
        assert!(walk.spans.is_empty());
    }

    #[test]
    fn direct_to_done_collapses_to_a_point() {
        let item = ItemBuilder::new("SL-1")
            .transition("2024-03-20T10:00:00Z", "To Do", "Done")
            .build();
        let interval = resolve_interval(&item);
        assert_eq!(interval.start, Some(utc(20, 10)));
        assert_eq!(interval.end, Some(utc(20, 10)));
    }

    #[test]
    fn direct_to_wont_do_collapses_to_a_point() {
        let item = ItemBuilder::new("SL-1")
            .transition("2024-03-20T10:00:00.000+0000", "To Do", "Won't Do")
            .build();
        let interval = resolve_interval(&item);
        assert_eq!(interval.start, interval.end);
        assert_eq!(interval.end, Some(utc(20, 10)));
    }

    #[test]
    fn single_progress_to_done_pair() {
        let item = ItemBuilder::new("SL-1")
            .transition("2024-03-20T10:00:00Z", "To Do", "In Progress")
            .event(ChangeEvent::new(
                "2024-03-20T11:00:00Z",
                vec![FieldChange {
                    field: "assignee".into(),
                    from: None,
                    to: Some("Alice".into()),
                }],
            ))
            .transition("2024-03-21T15:00:00Z", "In Progress", "Done")
            .build();
        let walk = walk(&item);
        assert_eq!(walk.interval.start, Some(utc(20, 10)));
        assert_eq!(walk.interval.end, Some(utc(21, 15)));
        assert_eq!(walk.state, WalkState::Completed);
        assert_eq!(
            walk.spans,
            vec![ActiveSpan {
                start: utc(20, 10),
                end: Some(utc(21, 15)),
            }]
        );
    }

    #[test]
    fn still_in_progress_has_no_end() {
        let item = ItemBuilder::new("SL-1")
            .transition("2024-03-20T10:00:00Z", "To Do", "In Progress")
            .build();
        let walk = walk(&item);
        assert_eq!(walk.interval.start, Some(utc(20, 10)));
        assert_eq!(walk.interval.end, None);
        assert_eq!(walk.state, WalkState::Active { since: utc(20, 10) });
        assert_eq!(walk.spans[0].end, None);
    }

    #[test]
    fn pause_and_resume_keep_first_start_and_last_end() {
        let item = ItemBuilder::new("SL-1")
            .transition("2024-03-20T10:00:00Z", "To Do", "In Progress")
            .transition("2024-03-20T12:00:00Z", "In Progress", "Blocked")
            .transition("2024-03-21T10:00:00Z", "Blocked", "In Progress")
            .transition("2024-03-21T15:00:00Z", "In Progress", "Done")
            .build();
        let walk = walk(&item);
        assert_eq!(walk.interval.start, Some(utc(20, 10)));
        assert_eq!(walk.interval.end, Some(utc(21, 15)));
        assert_eq!(
            walk.spans,
            vec![
                ActiveSpan {
                    start: utc(20, 10),
                    end: Some(utc(20, 12)),
                },
                ActiveSpan {
                    start: utc(21, 10),
                    end: Some(utc(21, 15)),
                },
            ]
        );
    }

    #[test]
    fn reopen_moves_end_to_last_terminal_transition() {
        let item = ItemBuilder::new("SL-1")
            .transition("2024-03-20T10:00:00Z", "To Do", "In Progress")
            .transition("2024-03-20T14:00:00Z", "In Progress", "Done")
            .transition("2024-03-21T09:00:00Z", "Done", "To Do")
            .transition("2024-03-21T10:00:00Z", "To Do", "In Progress")
            .transition("2024-03-22T11:00:00Z", "In Progress", "Won't Do")
            .build();
        let interval = resolve_interval(&item);
        assert_eq!(interval.start, Some(utc(20, 10)));
        assert_eq!(interval.end, Some(utc(22, 11)));
    }

    #[test]
    fn reopen_after_direct_close_keeps_original_start() {
        let item = ItemBuilder::new("SL-1")
            .transition("2024-03-20T10:00:00Z", "To Do", "Done")
            .transition("2024-03-21T09:00:00Z", "Done", "In Progress")
            .transition("2024-03-21T12:00:00Z", "In Progress", "Done")
            .build();
        let interval = resolve_interval(&item);
        assert_eq!(interval.start, Some(utc(20, 10)));
        assert_eq!(interval.end, Some(utc(21, 12)));
    }

    #[test]
    fn reverse_chronological_log_resolves_earlier_start() {
        let item = ItemBuilder::new("SL-1")
            .transition("2024-03-21T15:00:00Z", "In Progress", "Done")
            .transition("2024-03-20T10:00:00Z", "To Do", "In Progress")
            .build();
        let interval = resolve_interval(&item);
        assert_eq!(interval.start, Some(utc(20, 10)));
        assert_eq!(interval.end, Some(utc(21, 15)));
    }

    #[test]
    fn reverse_chronological_log_with_pause_spans_whole_cycle() {
        let item = ItemBuilder::new("SL-1")
            .transition("2024-03-21T15:00:00Z", "In Progress", "Done")
            .transition("2024-03-21T10:00:00Z", "Blocked", "In Progress")
            .transition("2024-03-20T12:00:00Z", "In Progress", "Blocked")
            .transition("2024-03-20T10:00:00Z", "To Do", "In Progress")
            .build();
        let interval = resolve_interval(&item);
        assert_eq!(interval.start, Some(utc(20, 10)));
        assert_eq!(interval.end, Some(utc(21, 15)));
    }

    #[test]
    fn reverse_chronological_reopen_keeps_latest_close() {
        let item = ItemBuilder::new("SL-1")
            .transition("2024-03-22T11:00:00Z", "In Progress", "Done")
            .transition("2024-03-21T10:00:00Z", "To Do", "In Progress")
            .transition("2024-03-20T14:00:00Z", "In Progress", "Done")
            .transition("2024-03-20T10:00:00Z", "To Do", "In Progress")
            .build();
        let interval = resolve_interval(&item);
        assert_eq!(interval.start, Some(utc(20, 10)));
        assert_eq!(interval.end, Some(utc(22, 11)));
    }

    #[test]
    fn inverted_pair_is_swapped() {
        // Reopened and closed again, but listed with the later close first.
        let item = ItemBuilder::new("SL-1")
            .transition("2024-03-22T10:00:00Z", "To Do", "In Progress")
            .transition("2024-03-21T10:00:00Z", "In Progress", "Done")
            .build();
        let interval = resolve_interval(&item);
        assert_eq!(interval.start, Some(utc(21, 10)));
        assert_eq!(interval.end, Some(utc(22, 10)));
    }

    #[test]
    fn unparsable_timestamps_are_skipped() {
        let item = ItemBuilder::new("SL-1")
            .transition("20/03/2024 10:00", "To Do", "In Progress")
            .transition("2024-03-20T11:00:00Z", "To Do", "In Progress")
            .transition("garbage", "In Progress", "Done")
            .build();
        let interval = resolve_interval(&item);
        assert_eq!(interval.start, Some(utc(20, 11)));
        assert_eq!(interval.end, None);
    }

    #[test]
    fn walking_is_idempotent() {
        let item = ItemBuilder::new("SL-1")
            .transition("2024-03-20T10:00:00Z", "To Do", "In Progress")
            .transition("2024-03-20T12:00:00Z", "In Progress", "Blocked")
            .build();
        assert_eq!(walk(&item), walk(&item));
    }
}
