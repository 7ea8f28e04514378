//! Roster persistence for the sprintload system.
//!
//! Team rosters and a small key-value area live in one JSON document,
//! `.sprintload/teams.json`, accessed through [`RosterStore`].

pub mod error;
pub mod roster;

pub use error::StoreError;
pub use roster::{ROSTER_FILE, RosterStore};
