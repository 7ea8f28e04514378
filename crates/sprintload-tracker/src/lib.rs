//! Issue sources for the sprintload system.
//!
//! The report engine works over a plain item slice; this crate is where those
//! items come from. [`IssueSource`] is the seam the CLI injects:
//!
//! - [`JiraSource`] pages through a sprint's issues over HTTP, changelogs
//!   expanded, and maps them into core [`Item`](sprintload_core::Item)s.
//! - [`SnapshotSource`] reads a previously captured snapshot file.

pub mod error;
pub mod jira;
pub mod source;

pub use error::TrackerError;
pub use jira::{JiraAuth, JiraSource};
pub use source::{IssueSource, SnapshotSource};
