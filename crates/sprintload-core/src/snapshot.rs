//! Snapshot read/write support.
//!
//! A snapshot is the already-normalised item list of one sprint. Two layouts
//! are accepted on read: a single JSON array, or JSON Lines (one item per
//! line). Writing always produces JSON Lines.

use std::io::{BufRead, Write};

use crate::error::{CoreError, Result};
use crate::item::Item;

/// Reads a snapshot, detecting the layout from the first non-blank byte.
///
/// # Errors
///
/// Returns [`CoreError::Snapshot`] with the offending line number when an
/// item does not decode, or [`CoreError::Io`] on read failure.
pub fn read_snapshot<R: BufRead>(mut reader: R) -> Result<Vec<Item>> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    if content.trim_start().starts_with('[') {
        return serde_json::from_str(&content).map_err(|e| CoreError::Snapshot {
            line: e.line(),
            source: e,
        });
    }

    let mut items = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let item = serde_json::from_str::<Item>(trimmed).map_err(|e| CoreError::Snapshot {
            line: idx + 1,
            source: e,
        })?;
        items.push(item);
    }
    Ok(items)
}

/// Writes items as JSON Lines.
pub fn write_jsonl<W: Write>(writer: &mut W, items: &[Item]) -> Result<()> {
    for (idx, item) in items.iter().enumerate() {
        serde_json::to_writer(&mut *writer, item).map_err(|e| CoreError::Snapshot {
            line: idx + 1,
            source: e,
        })?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemBuilder;

    #[test]
    fn reads_json_array() {
        let data = br#"[{"key": "SL-1"}, {"key": "SL-2", "status": "Done"}]"#;
        let items = read_snapshot(data.as_slice()).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[1].status.is_terminal());
    }

    #[test]
    fn reads_jsonl_skipping_blank_lines() {
        let data = b"{\"key\":\"SL-1\"}\n\n{\"key\":\"SL-2\"}\n";
        let items = read_snapshot(data.as_slice()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].key, "SL-2");
    }

    #[test]
    fn reports_line_number_on_error() {
        let data = b"{\"key\":\"SL-1\"}\nnot-json\n";
        match read_snapshot(data.as_slice()) {
            Err(CoreError::Snapshot { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected snapshot error, got {:?}", other),
        }
    }

    #[test]
    fn written_jsonl_reads_back() {
        let items = vec![
            ItemBuilder::new("SL-1")
                .assignee("Alice")
                .transition("2024-03-20T10:00:00Z", "To Do", "Done")
                .build(),
        ];
        let mut buf = Vec::new();
        write_jsonl(&mut buf, &items).unwrap();
        assert!(buf.ends_with(b"\n"));
        let back = read_snapshot(buf.as_slice()).unwrap();
        assert_eq!(back, items);
    }
}
