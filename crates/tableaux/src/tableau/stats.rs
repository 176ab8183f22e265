//! Build statistics and step history
//!
//! All `Duration` fields are serialized as `f64` seconds.

use super::node::{BranchId, NodeId};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

fn secs(d: &Duration) -> f64 {
    d.as_secs_f64()
}

fn serialize_secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(secs(d))
}

/// Final result of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Every branch closed.
    Valid,
    /// Some open branch is finished with no rule left to apply.
    Invalid,
    /// The build stopped on a step or time budget, or every open branch
    /// carries a quit flag.
    Premature,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Valid => "valid",
            Outcome::Invalid => "invalid",
            Outcome::Premature => "premature",
        };
        write!(f, "{}", s)
    }
}

/// One applied step.
#[derive(Debug, Clone, Serialize)]
pub struct StepEntry {
    pub step: usize,
    pub rule: &'static str,
    pub branch: BranchId,
    pub node: Option<NodeId>,
    /// Branches the step left behind (1 when it did not fork).
    pub branches: usize,
    #[serde(serialize_with = "serialize_secs")]
    pub duration: Duration,
}

/// Statistics for one rule.
#[derive(Debug, Clone, Default)]
pub struct RuleStats {
    pub applied: usize,
    pub time: Duration,
}

impl Serialize for RuleStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("RuleStats", 2)?;
        s.serialize_field("applied", &self.applied)?;
        s.serialize_field("time", &secs(&self.time))?;
        s.end()
    }
}

/// Statistics collected while building a tableau.
#[derive(Debug, Clone, Default)]
pub struct TableauStats {
    pub result: Option<Outcome>,
    pub steps: usize,
    pub branches: usize,
    pub open_branches: usize,
    pub closed_branches: usize,
    /// Distinct nodes created, including flags.
    pub nodes: usize,
    pub trunk_time: Duration,
    /// Time spent searching for targets.
    pub search_time: Duration,
    /// Time spent applying targets.
    pub apply_time: Duration,
    pub build_time: Duration,
    /// Per-rule counts, in rule declaration order.
    pub rules: Vec<(&'static str, RuleStats)>,
}

impl TableauStats {
    pub(crate) fn with_rules(names: &[&'static str]) -> Self {
        TableauStats {
            rules: names.iter().map(|n| (*n, RuleStats::default())).collect(),
            ..TableauStats::default()
        }
    }

    pub(crate) fn record_rule(&mut self, name: &'static str, time: Duration) {
        if let Some((_, stats)) = self.rules.iter_mut().find(|(n, _)| *n == name) {
            stats.applied += 1;
            stats.time += time;
        }
    }

    pub fn rule(&self, name: &str) -> Option<&RuleStats> {
        self.rules.iter().find(|(n, _)| *n == name).map(|(_, s)| s)
    }
}

impl Serialize for TableauStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rules: indexmap::IndexMap<&str, &RuleStats> =
            self.rules.iter().map(|(n, s)| (*n, s)).collect();
        let mut s = serializer.serialize_struct("TableauStats", 11)?;
        s.serialize_field("result", &self.result)?;
        s.serialize_field("steps", &self.steps)?;
        s.serialize_field("branches", &self.branches)?;
        s.serialize_field("open_branches", &self.open_branches)?;
        s.serialize_field("closed_branches", &self.closed_branches)?;
        s.serialize_field("nodes", &self.nodes)?;
        s.serialize_field("trunk_time", &secs(&self.trunk_time))?;
        s.serialize_field("search_time", &secs(&self.search_time))?;
        s.serialize_field("apply_time", &secs(&self.apply_time))?;
        s.serialize_field("build_time", &secs(&self.build_time))?;
        s.serialize_field("rules", &rules)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_rule_and_serialize() {
        let mut stats = TableauStats::with_rules(&["Conjunction", "Disjunction"]);
        stats.record_rule("Disjunction", Duration::from_millis(500));
        stats.record_rule("Unknown", Duration::from_millis(1));
        stats.result = Some(Outcome::Invalid);
        assert_eq!(stats.rule("Disjunction").map(|r| r.applied), Some(1));
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["result"], "invalid");
        assert_eq!(json["rules"]["Disjunction"]["time"], 0.5);
        assert_eq!(json["rules"]["Conjunction"]["applied"], 0);
    }
}
