//! [`ReportEngine`] -- one report run over a read-only item snapshot.

use chrono::{DateTime, Utc};
use sprintload_core::{Item, Overrides, ReportRow, Team};

use crate::aggregate::{PersonTotals, aggregate};
use crate::classify::{TypeClassifier, WorkClassifier};
use crate::interval::{Walk, walk};
use crate::normalize::{ItemLoad, item_load, normalize};
use crate::report::build_report;

/// Bundles the inputs shared by every stage of a report run.
///
/// The engine borrows its roster and overrides and never mutates them, so
/// concurrent runs only need their own item slices. `now` is fixed at
/// construction; it is the end of every still-open interval.
pub struct ReportEngine<'a> {
    team: &'a Team,
    overrides: &'a Overrides,
    now: DateTime<Utc>,
    classifier: Box<dyn WorkClassifier + 'a>,
}

impl<'a> ReportEngine<'a> {
    /// Creates an engine using the default [`TypeClassifier`].
    pub fn new(team: &'a Team, overrides: &'a Overrides, now: DateTime<Utc>) -> Self {
        Self {
            team,
            overrides,
            now,
            classifier: Box::new(TypeClassifier),
        }
    }

    /// Replaces the work classifier.
    pub fn with_classifier(mut self, classifier: impl WorkClassifier + 'a) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn team(&self) -> &Team {
        self.team
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// The changelog walk for one item.
    pub fn walk(&self, item: &Item) -> Walk {
        walk(item)
    }

    /// The credited span and hours for one item.
    pub fn load(&self, item: &Item) -> ItemLoad {
        item_load(item, self.overrides, self.now)
    }

    /// Raw per-person totals (no floor, unstarted items skipped).
    pub fn totals(&self, items: &[Item]) -> PersonTotals {
        aggregate(self.team, items, self.overrides, self.now)
    }

    /// Percentage rows for `sprint`.
    pub fn rows(&self, sprint: &str, items: &[Item]) -> Vec<ReportRow> {
        normalize(
            sprint,
            self.team,
            items,
            self.overrides,
            self.now,
            self.classifier.as_ref(),
        )
    }

    /// The rendered CSV report for `sprint`.
    pub fn render(&self, sprint: &str, items: &[Item]) -> String {
        build_report(self.team, &self.rows(sprint, items))
    }
}
