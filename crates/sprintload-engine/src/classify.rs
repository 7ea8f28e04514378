//! Work classification and asset association for report rows.

use sprintload_core::Item;
use sprintload_core::enums::ItemType;

/// Labels of the form `work:<name>` pin an item's work classification.
pub const WORK_LABEL_PREFIX: &str = "work:";

/// Assigns a work classification to an item.
pub trait WorkClassifier {
    fn classify(&self, item: &Item) -> String;
}

/// Classifies by item type, unless a `work:` label says otherwise.
///
/// | type           | classification |
/// |----------------|----------------|
/// | Bug            | Maintenance    |
/// | Story, Epic    | Feature        |
/// | Task           | Operations     |
/// | anything else  | Other          |
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeClassifier;

impl WorkClassifier for TypeClassifier {
    fn classify(&self, item: &Item) -> String {
        if let Some(pinned) = work_label(item) {
            return pinned.to_string();
        }
        let class = match item.item_type {
            ItemType::Bug => "Maintenance",
            ItemType::Story | ItemType::Epic => "Feature",
            ItemType::Task => "Operations",
            ItemType::SubTask | ItemType::Custom(_) => "Other",
        };
        class.to_string()
    }
}

fn work_label(item: &Item) -> Option<&str> {
    item.labels
        .iter()
        .filter_map(|l| l.strip_prefix(WORK_LABEL_PREFIX))
        .map(str::trim)
        .find(|l| !l.is_empty())
}

/// The asset an item belongs to: its first label that is not a `work:` label.
pub fn asset_name(item: &Item) -> String {
    item.labels
        .iter()
        .find(|l| !l.starts_with(WORK_LABEL_PREFIX))
        .cloned()
        .unwrap_or_default()
}
