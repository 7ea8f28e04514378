//! Team roster.

use serde::{Deserialize, Serialize};

/// The members of a project team, in roster order.
///
/// Membership is what filters items into a report; the order only decides
/// the order of the per-member report columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub project: String,

    #[serde(default)]
    pub members: Vec<String>,
}

impl Team {
    pub fn new<I, S>(project: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut team = Self {
            project: project.into(),
            members: Vec::new(),
        };
        for member in members {
            team.add(member);
        }
        team
    }

    /// Returns `true` if `name` is on the roster.
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    /// Adds a member, ignoring duplicates and blank names. Returns `true` if added.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.members.push(name.to_string());
        true
    }

    /// Removes a member. Returns `true` if they were on the roster.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m != name);
        self.members.len() != before
    }

    /// Position of `name` in roster order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|m| m == name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
