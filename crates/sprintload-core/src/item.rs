//! Item and changelog types -- the snapshot a report run is computed over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sprintload_timeparsing::try_parse_changelog_timestamp;

use crate::enums::{ItemStatus, ItemType};

/// The changelog field that carries workflow status transitions.
pub const STATUS_FIELD: &str = "status";

/// One field transition inside a changelog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,

    #[serde(default)]
    pub from: Option<String>,

    #[serde(default)]
    pub to: Option<String>,
}

impl FieldChange {
    /// Builds a `status` transition.
    pub fn status(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            field: STATUS_FIELD.to_string(),
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    /// Returns `true` if this change touches the status field.
    pub fn is_status(&self) -> bool {
        self.field.eq_ignore_ascii_case(STATUS_FIELD)
    }
}

/// A changelog entry: a timestamp plus the fields changed at that instant.
///
/// `created` is kept verbatim so entries with an unparsable timestamp can be
/// skipped by consumers instead of failing the whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub created: String,

    #[serde(default)]
    pub items: Vec<FieldChange>,
}

impl ChangeEvent {
    pub fn new(created: impl Into<String>, items: Vec<FieldChange>) -> Self {
        Self {
            created: created.into(),
            items,
        }
    }

    /// Shorthand for an entry holding a single status transition.
    pub fn status(created: impl Into<String>, from: &str, to: &str) -> Self {
        Self::new(created, vec![FieldChange::status(from, to)])
    }

    /// Parsed timestamp, or `None` if `created` is in no accepted format.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        try_parse_changelog_timestamp(&self.created)
    }

    /// The first status transition in this entry, if any.
    pub fn status_change(&self) -> Option<&FieldChange> {
        self.items.iter().find(|c| c.is_status())
    }
}

/// A tracked unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub key: String,

    #[serde(default)]
    pub title: String,

    /// Assignee display name; empty when unassigned.
    #[serde(default)]
    pub assignee: String,

    #[serde(default)]
    pub status: ItemStatus,

    #[serde(default, rename = "type")]
    pub item_type: ItemType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    /// Changelog in the order the tracker returned it.
    #[serde(default)]
    pub changelog: Vec<ChangeEvent>,
}

impl Item {
    /// The first changelog timestamp that parses, in changelog order.
    pub fn first_change_at(&self) -> Option<DateTime<Utc>> {
        self.changelog.iter().find_map(ChangeEvent::created_at)
    }
}

/// Builder for [`Item`], mostly used by fixtures and tests.
#[derive(Debug, Clone)]
pub struct ItemBuilder {
    item: Item,
}

impl ItemBuilder {
    /// Creates a builder for the given item key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            item: Item {
                key: key.into(),
                title: String::new(),
                assignee: String::new(),
                status: ItemStatus::default(),
                item_type: ItemType::default(),
                labels: Vec::new(),
                changelog: Vec::new(),
            },
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.item.title = title.into();
        self
    }

    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.item.assignee = assignee.into();
        self
    }

    pub fn status(mut self, status: impl Into<ItemStatus>) -> Self {
        self.item.status = status.into();
        self
    }

    pub fn item_type(mut self, item_type: impl Into<ItemType>) -> Self {
        self.item.item_type = item_type.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.item.labels.push(label.into());
        self
    }

    /// Appends a changelog entry.
    pub fn event(mut self, event: ChangeEvent) -> Self {
        self.item.changelog.push(event);
        self
    }

    /// Appends a single status transition at `created`.
    pub fn transition(self, created: &str, from: &str, to: &str) -> Self {
        self.event(ChangeEvent::status(created, from, to))
    }

    pub fn build(self) -> Item {
        self.item
    }
}
