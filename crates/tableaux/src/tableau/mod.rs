//! Tableau engine
//!
//! A [`Tableau`] grows a tree of [`Branch`]es from a trunk by repeatedly
//! selecting and applying the best rule [`Target`]:
//!
//! 1. **Trunk**: the logic turns the argument into the initial nodes of the
//!    single trunk branch. This happens exactly once.
//! 2. **Step**: for the first open branch that any rule group has targets
//!    for, collect the targets of the first non-empty group (or, without
//!    `is_group_optim`, of its first rule with targets) and apply the
//!    best-scoring one. Applying may fork the branch, adds nodes, checks
//!    closure after every node, and ticks the consumed node.
//! 3. **Finish**: when no open branch has a target left, or a step or time
//!    budget runs out, the outcome is fixed.
//!
//! Rule groups and branches are scanned in a fixed order and ties keep the
//! earliest candidate, so two builds of the same argument with the same
//! configuration produce the same tree.

pub mod branch;
pub mod helpers;
pub mod node;
pub mod rule;
pub mod stats;
pub mod target;
pub mod tree;

pub use branch::{Branch, Lookahead, NodeLookup};
pub use node::{BranchId, Flag, Node, NodeId, Props, World};
pub use rule::{ClosureRule, Listener, Rule, RuleSet};
pub use stats::{Outcome, RuleStats, StepEntry, TableauStats};
pub use target::Target;
pub use tree::TreeNode;

use crate::argument::Argument;
use crate::config::TableauConfig;
use crate::error::{Result, TableauError};
use crate::lexicals::SentenceCache;
use crate::logics::{Logic, Meta};
use helpers::BranchMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Receives the open branches of an invalid tableau when
/// `is_build_models` is set.
pub trait ModelBuilder {
    fn build_model(&mut self, branch: &Branch);
}

struct Candidate {
    group: usize,
    rule: usize,
    target: Target,
    score: (i64, i64),
}

/// A proof tableau for one argument under one logic.
pub struct Tableau {
    logic: Box<dyn Logic>,
    argument: Option<Argument>,
    config: TableauConfig,
    rules: RuleSet,
    branches: Vec<Branch>,
    next_node: usize,
    cache: SentenceCache,
    history: Vec<StepEntry>,
    /// Times each rule was applied to each node, per branch.
    applications: BranchMap<HashMap<(&'static str, NodeId), usize>>,
    trunk_built: bool,
    stopped_early: bool,
    outcome: Option<Outcome>,
    stats: TableauStats,
    model_builder: Option<Box<dyn ModelBuilder>>,
}

impl Tableau {
    pub fn new(
        logic: impl Logic + 'static,
        argument: Option<Argument>,
        config: TableauConfig,
    ) -> Self {
        let rules = logic.rules();
        let stats = TableauStats::with_rules(&rules.names());
        Tableau {
            logic: Box::new(logic),
            argument,
            config,
            rules,
            branches: Vec::new(),
            next_node: 0,
            cache: SentenceCache::default(),
            history: Vec::new(),
            applications: BranchMap::default(),
            trunk_built: false,
            stopped_early: false,
            outcome: None,
            stats,
            model_builder: None,
        }
    }

    pub fn set_model_builder(&mut self, builder: impl ModelBuilder + 'static) {
        self.model_builder = Some(Box::new(builder));
    }

    /// Build the trunk from the argument.
    pub fn build_trunk(&mut self) -> Result<()> {
        if self.trunk_built {
            return Err(TableauError::TrunkAlreadyBuilt);
        }
        let argument = self.argument.as_ref().ok_or(TableauError::NoArgument)?;
        let nodes = self.logic.build_trunk(argument);
        self.build_trunk_with(nodes)
    }

    /// Build the trunk from explicit nodes.
    pub fn build_trunk_with(&mut self, nodes: impl IntoIterator<Item = Props>) -> Result<()> {
        if self.trunk_built {
            return Err(TableauError::TrunkAlreadyBuilt);
        }
        let start = Instant::now();
        self.branches.push(Branch::new(BranchId(0), None));
        self.rules.branch_added(&self.branches[0]);
        self.applications.branch_added(&self.branches[0]);
        for props in nodes {
            if self.branches[0].is_closed() {
                break;
            }
            self.add_node(0, props)?;
        }
        self.trunk_built = true;
        self.rules.trunk_built(&self.branches[0]);
        self.stats.trunk_time = start.elapsed();
        debug!(
            "built trunk with {} nodes for {}",
            self.branches[0].len(),
            self.logic.meta().name
        );
        Ok(())
    }

    /// Apply one target. Returns `false` once the tableau is finished.
    pub fn step(&mut self) -> Result<bool> {
        if !self.trunk_built {
            return Err(TableauError::TrunkNotBuilt);
        }
        if self.outcome.is_some() {
            return Ok(false);
        }
        let search = Instant::now();
        let candidate = self.next_candidate();
        self.stats.search_time += search.elapsed();
        let Some(candidate) = candidate else {
            self.finish();
            return Ok(false);
        };
        if let Some(max) = self.config.max_steps {
            if self.history.len() >= max {
                warn!("reached max_steps ({}) with work left, stopping", max);
                self.stopped_early = true;
                self.finish();
                return Ok(false);
            }
        }
        self.apply(candidate)?;
        Ok(true)
    }

    /// Build the trunk if needed, then step until finished.
    ///
    /// With `build_timeout` set, the deadline is checked before every step.
    /// On timeout the tableau is left finished as premature, in the state of
    /// its last completed step, and [`TableauError::Timeout`] is returned.
    pub fn build(&mut self) -> Result<Outcome> {
        let start = Instant::now();
        if !self.trunk_built {
            self.build_trunk()?;
        }
        loop {
            if let Some(limit) = self.config.build_timeout {
                let elapsed = start.elapsed();
                if elapsed >= limit && self.outcome.is_none() {
                    warn!("build timed out after {:?} (limit {:?})", elapsed, limit);
                    self.stopped_early = true;
                    self.finish();
                    self.stats.build_time += start.elapsed();
                    return Err(TableauError::Timeout { elapsed, limit });
                }
            }
            if !self.step()? {
                break;
            }
        }
        self.stats.build_time += start.elapsed();
        Ok(self.finish())
    }

    /// The best target of the first group with any target on the first
    /// open branch that has one.
    ///
    /// With `is_group_optim` every target of the group competes. Without it
    /// the first rule with targets wins, and only its own targets compete.
    fn next_candidate(&self) -> Option<Candidate> {
        for branch in self.branches.iter().filter(|b| b.is_open()) {
            for (gi, group) in self.rules.groups.iter().enumerate() {
                let mut best: Option<Candidate> = None;
                for (ri, rule) in group.iter().enumerate() {
                    for target in rule.targets(branch) {
                        let score = self.score(branch, &target);
                        if best.as_ref().map_or(true, |b| score > b.score) {
                            best = Some(Candidate {
                                group: gi,
                                rule: ri,
                                target,
                                score,
                            });
                        }
                    }
                    if best.is_some() && !self.config.is_group_optim {
                        return best;
                    }
                }
                if best.is_some() {
                    return best;
                }
            }
        }
        None
    }

    /// `(closing groups, rank)`, compared lexicographically.
    ///
    /// Closing groups count only under `is_group_optim`. The rank is zero
    /// unless `is_rank_optim` is set, in which case it is minus the
    /// branching complexity of the consumed node's sentence and minus the
    /// number of times the rule was already applied to that node on this
    /// branch.
    fn score(&self, branch: &Branch, target: &Target) -> (i64, i64) {
        let closing = if self.config.is_group_optim {
            target
                .adds
                .iter()
                .filter(|group| {
                    self.rules
                        .closure
                        .iter()
                        .any(|c| c.nodes_will_close_branch(group, branch))
                })
                .count() as i64
        } else {
            0
        };
        if !self.config.is_rank_optim {
            return (closing, 0);
        }
        let complexity = target
            .node
            .and_then(|id| branch.node(id))
            .and_then(|n| n.sentence())
            .map_or(0, |s| self.logic.branching_complexity(s)) as i64;
        let applied = target
            .node
            .and_then(|id| {
                self.applications
                    .get(branch.id())
                    .and_then(|counts| counts.get(&(target.rule, id)))
            })
            .copied()
            .unwrap_or(0) as i64;
        (closing, -complexity - applied)
    }

    fn apply(&mut self, candidate: Candidate) -> Result<()> {
        let start = Instant::now();
        let Candidate {
            group, rule, target, ..
        } = candidate;
        let index = self.branch_index(target.branch)?;
        if self.branches[index].is_closed() {
            return Err(TableauError::BranchClosed(target.branch));
        }
        let ticking = self.rules.groups[group][rule].ticking();
        let groups: Vec<Vec<Props>> = if target.adds.is_empty() {
            vec![Vec::new()]
        } else {
            target.adds.clone()
        };

        let mut indices = vec![index];
        for _ in 1..groups.len() {
            let id = BranchId(self.branches.len());
            let child = self.branches[index].fork(id);
            self.branches.push(child);
            let child_index = self.branches.len() - 1;
            self.rules.branch_added(&self.branches[child_index]);
            self.applications.branch_added(&self.branches[child_index]);
            debug!("forked {} from {}", id, target.branch);
            indices.push(child_index);
        }

        for (&bi, nodes) in indices.iter().zip(groups) {
            for props in nodes {
                if self.branches[bi].is_closed() {
                    break;
                }
                self.add_node(bi, props)?;
            }
            if let (true, Some(node)) = (ticking, target.node) {
                if self.branches[bi].is_open() {
                    self.tick(bi, node)?;
                }
            }
        }

        self.rules.applied(&target);
        if let Some(node) = target.node {
            for &bi in &indices {
                let id = self.branches[bi].id();
                *self
                    .applications
                    .entry(id)
                    .entry((target.rule, node))
                    .or_default() += 1;
            }
        }
        let duration = start.elapsed();
        self.stats.apply_time += duration;
        self.stats.record_rule(target.rule, duration);
        let step = self.history.len() + 1;
        debug!(
            "step {}: {} on {} ({} branch(es))",
            step,
            target.rule,
            target.branch,
            target.branch_count()
        );
        self.history.push(StepEntry {
            step,
            rule: target.rule,
            branch: target.branch,
            node: target.node,
            branches: target.branch_count(),
            duration,
        });
        Ok(())
    }

    fn new_node(&mut self, props: Props) -> Arc<Node> {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        Arc::new(Node::new(id, props))
    }

    fn add_node(&mut self, index: usize, props: Props) -> Result<()> {
        let props = match props {
            Props::Sentence {
                sentence,
                designated,
                world,
            } => Props::Sentence {
                sentence: self.cache.intern(sentence),
                designated,
                world,
            },
            other => other,
        };
        if props.is_quit_flag() {
            warn!("{} raised on {}", props, self.branches[index].id());
        }
        let node = self.new_node(props);
        self.branches[index].push(node.clone())?;
        self.rules.node_added(&node, &self.branches[index]);

        let closed_by = self
            .rules
            .closure
            .iter()
            .find(|c| c.node_will_close_branch(&node, &self.branches[index]))
            .map(|c| c.name());
        if let Some(name) = closed_by {
            let flag = self.new_node(Props::closure_flag(name));
            self.branches[index].close(flag.clone())?;
            self.rules.node_added(&flag, &self.branches[index]);
            debug!("{} closed {} at {}", name, self.branches[index].id(), node.id());
        }
        Ok(())
    }

    fn tick(&mut self, index: usize, node: NodeId) -> Result<()> {
        let found = self.branches[index]
            .node(node)
            .cloned()
            .ok_or(TableauError::UnknownNode(node))?;
        if self.branches[index].tick(node)? {
            self.rules.node_ticked(&found, &self.branches[index]);
        }
        Ok(())
    }

    fn branch_index(&self, id: BranchId) -> Result<usize> {
        if id.0 < self.branches.len() {
            Ok(id.0)
        } else {
            Err(TableauError::UnknownBranch(id))
        }
    }

    fn finish(&mut self) -> Outcome {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        let open: Vec<&Branch> = self.branches.iter().filter(|b| b.is_open()).collect();
        let outcome = if open.is_empty() {
            Outcome::Valid
        } else if self.stopped_early || open.iter().all(|b| b.has_quit_flag()) {
            Outcome::Premature
        } else {
            Outcome::Invalid
        };
        self.outcome = Some(outcome);
        self.stats.result = Some(outcome);
        info!(
            "{} finished {} after {} steps with {} branches",
            self.logic.meta().name,
            outcome,
            self.history.len(),
            self.branches.len()
        );
        if outcome == Outcome::Invalid && self.config.is_build_models {
            if let Some(builder) = self.model_builder.as_mut() {
                for branch in self.branches.iter().filter(|b| b.is_open()) {
                    builder.build_model(branch);
                }
            }
        }
        outcome
    }

    /// `Some(true)` if valid, `Some(false)` if invalid, `None` while
    /// unfinished or when premature.
    pub fn valid(&self) -> Option<bool> {
        match self.outcome? {
            Outcome::Valid => Some(true),
            Outcome::Invalid => Some(false),
            Outcome::Premature => None,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_premature(&self) -> bool {
        self.outcome == Some(Outcome::Premature)
    }

    pub fn is_trunk_built(&self) -> bool {
        self.trunk_built
    }

    /// Statistics as of now.
    pub fn stats(&self) -> TableauStats {
        let closed = self.branches.iter().filter(|b| b.is_closed()).count();
        TableauStats {
            result: self.outcome,
            steps: self.history.len(),
            branches: self.branches.len(),
            open_branches: self.branches.len() - closed,
            closed_branches: closed,
            nodes: self.next_node,
            ..self.stats.clone()
        }
    }

    pub fn history(&self) -> &[StepEntry] {
        &self.history
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn open_branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter().filter(|b| b.is_open())
    }

    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        self.branches.get(id.0)
    }

    pub fn trunk(&self) -> Option<&Branch> {
        self.branches.first()
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&dyn Rule> {
        self.rules.rule(name)
    }

    pub fn closure_rule(&self, name: &str) -> Option<&dyn ClosureRule> {
        self.rules.closure_rule(name)
    }

    pub fn argument(&self) -> Option<&Argument> {
        self.argument.as_ref()
    }

    pub fn config(&self) -> &TableauConfig {
        &self.config
    }

    pub fn meta(&self) -> Meta {
        self.logic.meta()
    }

    pub fn cache(&self) -> &SentenceCache {
        &self.cache
    }

    /// The branches folded into a render tree, once the trunk exists.
    pub fn tree(&self) -> Option<TreeNode> {
        if self.branches.is_empty() {
            return None;
        }
        Some(tree::build(&self.branches))
    }
}
