//! Time-allocation engine for the sprintload system.
//!
//! Turns a sprint's items into per-person load percentages:
//!
//! 1. [`interval`] walks each item's status changelog into a work interval.
//! 2. [`duration`] converts an interval into hours, honouring manual overrides.
//! 3. [`aggregate`] sums hours per team member.
//! 4. [`normalize`] produces percentage-of-load rows in two passes.
//! 5. [`report`] renders rows as quoted CSV.
//!
//! Everything here is a pure function of its inputs: no I/O, no logging, and
//! the clock is passed in by the caller.

pub mod aggregate;
pub mod classify;
pub mod duration;
pub mod engine;
pub mod interval;
pub mod normalize;
pub mod report;

pub use aggregate::{PersonTotals, aggregate};
pub use classify::{TypeClassifier, WorkClassifier};
pub use duration::resolve_duration;
pub use engine::ReportEngine;
pub use interval::{ActiveSpan, Walk, WalkState, WorkInterval, resolve_interval, walk};
pub use normalize::{ItemLoad, item_load, normalize};
pub use report::{build_report, header_columns};
