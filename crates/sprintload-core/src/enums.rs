//! Enum types for tracker fields.
//!
//! Each enum has:
//! - Serialize as the tracker's display string (`"In Progress"`, `"Sub-task"`)
//! - Deserialize of known variants plus a catch-all `Custom(String)`
//! - `as_str()`, `is_default()`, `Display` impl

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Macro: defines an enum with known string variants + a Custom(String) fallback.
// ---------------------------------------------------------------------------
macro_rules! define_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident,
        variants: [
            $( ($variant:ident, $str:expr) ),+ $(,)?
        ]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
            Custom(String),
        }

        impl $name {
            /// Returns the string representation.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $str, )+
                    Self::Custom(s) => s.as_str(),
                }
            }

            /// Returns `true` if this is the default variant.
            pub fn is_default(&self) -> bool {
                *self == Self::$default
            }

            /// Returns `true` if this is a built-in (non-custom) variant.
            pub fn is_builtin(&self) -> bool {
                !matches!(self, Self::Custom(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok(Self::from(s))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                match s {
                    $( $str => Self::$variant, )+
                    other => Self::Custom(other.to_owned()),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                match s.as_str() {
                    $( $str => Self::$variant, )+
                    _ => Self::Custom(s),
                }
            }
        }
    };
}

// ===========================================================================
// ItemStatus
// ===========================================================================

define_enum! {
    /// Workflow status of a tracked item, using the tracker's display names.
    ItemStatus, default = ToDo,
    variants: [
        (ToDo, "To Do"),
        (InProgress, "In Progress"),
        (Blocked, "Blocked"),
        (InReview, "In Review"),
        (Done, "Done"),
        (WontDo, "Won't Do"),
    ]
}

impl ItemStatus {
    /// Returns `true` for the resolution statuses `Done` and `Won't Do`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::WontDo)
    }

    /// Returns `true` for `In Progress`.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }
}

// ===========================================================================
// ItemType
// ===========================================================================

define_enum! {
    /// Categorises the kind of tracked work.
    ItemType, default = Task,
    variants: [
        (Story, "Story"),
        (Task, "Task"),
        (Bug, "Bug"),
        (Epic, "Epic"),
        (SubTask, "Sub-task"),
    ]
}

impl ItemType {
    /// Returns `true` for sub-tasks, which never count towards a person's load.
    ///
    /// Trackers spell this type several ways, so custom values are matched
    /// case-insensitively against `sub-task` and `subtask`.
    pub fn is_subtask(&self) -> bool {
        match self {
            Self::SubTask => true,
            Self::Custom(s) => {
                let lower = s.to_ascii_lowercase();
                lower == "sub-task" || lower == "subtask"
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_round_trips_display_names() {
        for s in ["To Do", "In Progress", "Blocked", "In Review", "Done", "Won't Do"] {
            let status = ItemStatus::from(s);
            assert!(status.is_builtin(), "{s} should be builtin");
            assert_eq!(status.as_str(), s);
        }
    }

    #[test]
    fn unknown_status_is_custom() {
        let status = ItemStatus::from("QA Verify");
        assert_eq!(status, ItemStatus::Custom("QA Verify".into()));
        assert!(!status.is_terminal());
    }

    #[test]
    fn terminal_statuses() {
        assert!(ItemStatus::Done.is_terminal());
        assert!(ItemStatus::WontDo.is_terminal());
        assert!(!ItemStatus::InProgress.is_terminal());
        assert!(!ItemStatus::Blocked.is_terminal());
    }

    #[test]
    fn subtask_spellings() {
        assert!(ItemType::from("Sub-task").is_subtask());
        assert!(ItemType::from("Subtask").is_subtask());
        assert!(ItemType::from("sub-task").is_subtask());
        assert!(!ItemType::from("Story").is_subtask());
        assert!(!ItemType::from("Subtasks board").is_subtask());
    }

    #[test]
    fn serde_uses_display_strings() {
        let json = serde_json::to_string(&ItemStatus::WontDo).unwrap();
        assert_eq!(json, "\"Won't Do\"");
        let back: ItemType = serde_json::from_str("\"Sub-task\"").unwrap();
        assert_eq!(back, ItemType::SubTask);
    }

    #[test]
    fn defaults() {
        assert!(ItemStatus::default().is_default());
        assert_eq!(ItemType::default(), ItemType::Task);
    }
}
