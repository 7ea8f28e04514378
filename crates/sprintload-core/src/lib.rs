//! Core types for the sprintload system.
//!
//! This crate holds the read-only snapshot a report run works over: items and
//! their status changelogs, the team roster, manual hour overrides, and the
//! report rows produced from them.

pub mod enums;
pub mod error;
pub mod item;
pub mod overrides;
pub mod row;
pub mod snapshot;
pub mod team;

pub use error::CoreError;
pub use item::{ChangeEvent, FieldChange, Item, ItemBuilder};
pub use overrides::Overrides;
pub use row::ReportRow;
pub use team::Team;
