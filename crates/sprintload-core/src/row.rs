//! Report rows.

use serde::Serialize;

/// One row of the time-allocation report.
///
/// `shares` is aligned with the team roster: the assignee's column holds the
/// percentage string (e.g. `"37.50%"`), every other member's column is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub sprint: String,
    pub issue_key: String,
    pub issue_type: String,
    pub issue_title: String,
    pub work_type: String,
    pub asset_name: String,
    pub status: String,
    pub date_started: String,
    pub date_completed: String,
    pub shares: Vec<String>,
}

impl ReportRow {
    /// The fixed leading columns, in report order.
    pub fn fixed_fields(&self) -> [&str; 9] {
        [
            self.sprint.as_str(),
            self.issue_key.as_str(),
            self.issue_type.as_str(),
            self.issue_title.as_str(),
            self.work_type.as_str(),
            self.asset_name.as_str(),
            self.status.as_str(),
            self.date_started.as_str(),
            self.date_completed.as_str(),
        ]
    }

    /// The non-empty share, i.e. the assignee's percentage.
    pub fn assignee_share(&self) -> Option<&str> {
        self.shares
            .iter()
            .map(String::as_str)
            .find(|s| !s.is_empty())
    }
}
