//! Manual per-item hour overrides.

use std::collections::HashMap;

use crate::error::{CoreError, Result};

/// Caller-supplied hours that replace the computed duration of an item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    hours: HashMap<String, f64>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a flat JSON object of item key -> hours, e.g. `{"SL-1": 4.5}`.
    ///
    /// Blank input yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidOverrides`] if the payload is not a JSON
    /// object whose values are all numbers.
    pub fn from_json(payload: &str) -> Result<Self> {
        if payload.trim().is_empty() {
            return Ok(Self::default());
        }
        let hours: HashMap<String, f64> =
            serde_json::from_str(payload).map_err(CoreError::InvalidOverrides)?;
        Ok(Self { hours })
    }

    pub fn insert(&mut self, key: impl Into<String>, hours: f64) {
        self.hours.insert(key.into(), hours);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.hours.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Overrides {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self {
            hours: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
