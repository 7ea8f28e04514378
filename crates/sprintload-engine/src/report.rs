//! Tabular report rendering.
//!
//! Every field is double-quoted (embedded quotes doubled) and every record,
//! header included, ends with `\n`. An empty row set renders as an empty
//! string with no header.

use sprintload_core::{ReportRow, Team};

/// Fixed leading columns of the report header.
pub const FIXED_COLUMNS: [&str; 9] = [
    "sprint",
    "issueKey",
    "issueType",
    "issueTitle",
    "workType",
    "assetName",
    "status",
    "dateStarted",
    "dateCompleted",
];

/// The full header: fixed columns followed by one column per member in roster order.
pub fn header_columns(team: &Team) -> Vec<String> {
    FIXED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(team.members.iter().cloned())
        .collect()
}

/// Renders rows as quoted CSV.
pub fn build_report(team: &Team, rows: &[ReportRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    push_record(&mut out, header_columns(team).iter().map(String::as_str));
    for row in rows {
        push_record(
            &mut out,
            row.fixed_fields()
                .into_iter()
                .chain(row.shares.iter().map(String::as_str)),
        );
    }
    out
}

fn push_record<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(key: &str, title: &str, shares: &[&str]) -> ReportRow {
        ReportRow {
            sprint: "42".into(),
            issue_key: key.into(),
            issue_type: "Story".into(),
            issue_title: title.into(),
            work_type: "Feature".into(),
            asset_name: String::new(),
            status: "Done".into(),
            date_started: "2024-03-20".into(),
            date_completed: "2024-03-21".into(),
            shares: shares.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Minimal reader for fully quoted records, enough to check column counts.
    fn split_record(line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '"' if in_quotes && chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
                other => current.push(other),
            }
        }
        fields.push(current);
        fields
    }

    #[test]
    fn empty_rows_render_nothing() {
        let team = Team::new("core", ["Alice"]);
        assert_eq!(build_report(&team, &[]), "");
    }

    #[test]
    fn renders_header_and_rows() {
        let team = Team::new("core", ["Alice", "Bob"]);
        let rows = vec![
            row("SL-1", "Login page", &["100.00%", ""]),
            row("SL-2", "Say \"hi\", politely", &["", "50.00%"]),
        ];
        insta::assert_snapshot!(build_report(&team, &rows), @r#"
        "sprint","issueKey","issueType","issueTitle","workType","assetName","status","dateStarted","dateCompleted","Alice","Bob"
        "42","SL-1","Story","Login page","Feature","","Done","2024-03-20","2024-03-21","100.00%",""
        "42","SL-2","Story","Say ""hi"", politely","Feature","","Done","2024-03-20","2024-03-21","","50.00%"
        "#);
    }

    #[test]
    fn every_record_has_header_width() {
        let team = Team::new("core", ["Alice", "Bob", "Carol"]);
        let rows = vec![
            row("SL-1", "a, b, c", &["", "12.50%", ""]),
            row("SL-2", "quote \" inside", &["", "87.50%", ""]),
        ];
        let report = build_report(&team, &rows);
        assert!(report.ends_with('\n'));

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        let width = split_record(lines[0]).len();
        assert_eq!(width, 12);
        for line in &lines[1..] {
            assert_eq!(split_record(line).len(), width);
        }
        assert_eq!(split_record(lines[2])[3], "quote \" inside");
    }
}
