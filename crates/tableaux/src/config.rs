//! Tableau configuration types.

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

/// Options recognized by [`crate::Tableau`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableauConfig {
    /// Prefer targets with lower branching complexity and fewer prior
    /// applications, among all candidates that compete for a step
    pub is_rank_optim: bool,
    /// Let every rule of the first non-empty group compete, preferring targets
    /// that close branches, instead of taking the first rule with targets
    pub is_group_optim: bool,
    /// Hand open branches to the model builder once the build is invalid
    pub is_build_models: bool,
    /// Hard cap on applied steps; reaching it makes the result premature
    pub max_steps: Option<usize>,
    /// Wall-clock cap on `build`, serialized as milliseconds
    #[serde(with = "millis")]
    pub build_timeout: Option<Duration>,
}

impl Default for TableauConfig {
    fn default() -> Self {
        TableauConfig {
            is_rank_optim: true,
            is_group_optim: true,
            is_build_models: false,
            max_steps: None,
            build_timeout: None,
        }
    }
}

impl TableauConfig {
    /// Parse a (possibly partial) JSON object; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_build_timeout(mut self, timeout: Duration) -> Self {
        self.build_timeout = Some(timeout);
        self
    }
}

mod millis {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> std::result::Result<S::Ok, S::Error> {
        value.map(|d| d.as_millis() as u64).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }
}
