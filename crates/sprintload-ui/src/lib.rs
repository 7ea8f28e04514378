//! Terminal styling for the sprintload CLI.
//!
//! Colour is applied only to human-facing output; report CSV and `--json`
//! output are never styled.

pub mod styles;
pub mod terminal;
