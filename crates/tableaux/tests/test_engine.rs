//! Tableau lifecycle, budgets, statistics and hooks

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tableaux::{
    logics, Argument, Branch, BranchId, ModelBuilder, Outcome, Props, Sentence, Tableau,
    TableauConfig, TableauError,
};

fn disjunction_elimination() -> Argument {
    let a = Sentence::atomic(0, 0).unwrap();
    let b = Sentence::atomic(1, 0).unwrap();
    Argument::new(b.clone(), [a.disjoin(&b)])
}

fn fde(argument: Option<Argument>, config: TableauConfig) -> Tableau {
    Tableau::new(logics::get("FDE").unwrap(), argument, config)
}

#[test]
fn test_trunk_state_errors() {
    let mut tableau = fde(Some(disjunction_elimination()), TableauConfig::default());
    assert!(matches!(tableau.step(), Err(TableauError::TrunkNotBuilt)));

    tableau.build_trunk().unwrap();
    assert!(tableau.is_trunk_built());
    assert!(matches!(
        tableau.build_trunk(),
        Err(TableauError::TrunkAlreadyBuilt)
    ));

    let mut empty = fde(None, TableauConfig::default());
    assert!(matches!(empty.build_trunk(), Err(TableauError::NoArgument)));
    assert!(matches!(empty.build(), Err(TableauError::NoArgument)));
}

#[test]
fn test_trunk_from_explicit_nodes() {
    let a = Sentence::atomic(0, 0).unwrap();
    let mut tableau = fde(None, TableauConfig::default());
    tableau
        .build_trunk_with([Props::sdnode(a.conjoin(&a), true)])
        .unwrap();
    assert_eq!(tableau.trunk().map(Branch::len), Some(1));
    assert_eq!(tableau.build().unwrap(), Outcome::Invalid);
}

#[test]
fn test_step_by_step_until_finished() {
    let mut tableau = fde(Some(disjunction_elimination()), TableauConfig::default());
    tableau.build_trunk().unwrap();
    let mut steps = 0;
    while tableau.step().unwrap() {
        steps += 1;
        assert!(!tableau.is_finished());
    }
    assert!(tableau.is_finished());
    assert_eq!(tableau.history().len(), steps);
    assert!(!tableau.step().unwrap());
}

#[test]
fn test_max_steps_makes_premature() {
    let config = TableauConfig::default().with_max_steps(0);
    let mut tableau = fde(Some(disjunction_elimination()), config);
    assert_eq!(tableau.build().unwrap(), Outcome::Premature);
    assert!(tableau.is_premature());
    assert_eq!(tableau.valid(), None);
    assert!(tableau.history().is_empty());
}

#[test]
fn test_timeout_leaves_inspectable_tableau() {
    let config = TableauConfig::default().with_build_timeout(Duration::ZERO);
    let mut tableau = fde(Some(disjunction_elimination()), config);
    match tableau.build() {
        Err(TableauError::Timeout { limit, .. }) => assert_eq!(limit, Duration::ZERO),
        other => panic!("expected timeout, got {:?}", other.map(|o| o.to_string())),
    }
    assert_eq!(tableau.outcome(), Some(Outcome::Premature));
    assert!(tableau.is_trunk_built());
    assert_eq!(tableau.branches().len(), 1);
}

#[test]
fn test_config_from_partial_json() {
    let config = TableauConfig::from_json(r#"{"max_steps": 5, "build_timeout": 250}"#).unwrap();
    assert_eq!(config.max_steps, Some(5));
    assert_eq!(config.build_timeout, Some(Duration::from_millis(250)));
    assert!(config.is_rank_optim);

    assert!(matches!(
        TableauConfig::from_json("{\"max_steps\": \"many\"}"),
        Err(TableauError::Config(_))
    ));
}

#[test]
fn test_stats_and_json() {
    let mut tableau = fde(Some(disjunction_elimination()), TableauConfig::default());
    tableau.build().unwrap();
    let stats = tableau.stats();
    assert_eq!(stats.result, Some(Outcome::Invalid));
    assert_eq!(stats.branches, 2);
    assert_eq!(stats.open_branches, 1);
    assert_eq!(stats.closed_branches, 1);
    assert_eq!(stats.steps, tableau.history().len());
    assert_eq!(stats.rule("DisjunctionDesignated").map(|r| r.applied), Some(1));

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["result"], "invalid");
    assert_eq!(json["rules"]["DisjunctionDesignated"]["applied"], 1);
    assert_eq!(json["rules"]["ConjunctionDesignated"]["applied"], 0);
}

#[test]
fn test_history_records_forks() {
    let mut tableau = fde(Some(disjunction_elimination()), TableauConfig::default());
    tableau.build().unwrap();
    let entry = &tableau.history()[0];
    assert_eq!(entry.rule, "DisjunctionDesignated");
    assert_eq!(Some(entry.branch), tableau.trunk().map(Branch::id));
    assert_eq!(entry.branches, 2);
    assert!(entry.node.is_some());
}

#[test]
fn test_tree_folds_branches() {
    let mut tableau = fde(Some(disjunction_elimination()), TableauConfig::default());
    assert!(tableau.tree().is_none());
    tableau.build().unwrap();
    let tree = tableau.tree().unwrap();
    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(tree.depth(), 2);
    assert_eq!(tree.nodes.len(), 2);
    assert_eq!(tree.children.iter().filter(|c| c.closed).count(), 1);
}

#[test]
fn test_optimizations_do_not_change_validity() {
    let a = Sentence::atomic(0, 0).unwrap();
    let b = Sentence::atomic(1, 0).unwrap();
    let c = Sentence::atomic(2, 0).unwrap();
    let arguments = [
        disjunction_elimination(),
        Argument::new(
            a.conjoin(&b).disjoin(&a.conjoin(&c)),
            [a.clone(), b.disjoin(&c)],
        ),
        Argument::new(a.disjoin(&b), [b.disjoin(&a)]),
    ];
    for argument in arguments {
        let mut plain = TableauConfig::default();
        plain.is_group_optim = false;
        plain.is_rank_optim = false;
        let mut optimized = fde(Some(argument.clone()), TableauConfig::default());
        let mut unoptimized = fde(Some(argument.clone()), plain);
        assert_eq!(
            optimized.build().unwrap(),
            unoptimized.build().unwrap(),
            "{}",
            argument
        );
    }
}

struct Recorder(Rc<RefCell<Vec<BranchId>>>);

impl ModelBuilder for Recorder {
    fn build_model(&mut self, branch: &Branch) {
        self.0.borrow_mut().push(branch.id());
    }
}

#[test]
fn test_model_builder_sees_open_branches() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut config = TableauConfig::default();
    config.is_build_models = true;
    let mut tableau = fde(Some(disjunction_elimination()), config);
    tableau.set_model_builder(Recorder(seen.clone()));
    tableau.build().unwrap();

    let open: Vec<_> = tableau.open_branches().map(Branch::id).collect();
    assert_eq!(*seen.borrow(), open);
}

#[test]
fn test_model_builder_skipped_when_disabled() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut tableau = fde(Some(disjunction_elimination()), TableauConfig::default());
    tableau.set_model_builder(Recorder(seen.clone()));
    tableau.build().unwrap();
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_closed_branch_carries_closure_flag() {
    let mut tableau = fde(Some(disjunction_elimination()), TableauConfig::default());
    tableau.build().unwrap();
    let closed: Vec<_> = tableau.branches().iter().filter(|b| b.is_closed()).collect();
    assert_eq!(closed.len(), 1);
    let flag = closed[0].closure_node().unwrap();
    assert_eq!(
        flag.props().flag().map(|(_, info)| info.to_string()),
        Some("DesignationClosure".to_string())
    );
    assert_eq!(closed[0].leaf().map(|n| n.id()), Some(flag.id()));
}

#[test]
fn test_sentences_are_interned() {
    let mut tableau = fde(Some(disjunction_elimination()), TableauConfig::default());
    tableau.build().unwrap();
    let b = Sentence::atomic(1, 0).unwrap();
    assert!(!tableau.cache().is_empty());
    assert!(tableau.cache().contains(&b));
}

#[test]
fn test_rank_applies_with_and_without_group_scoring() {
    let a = Sentence::atomic(0, 0).unwrap();
    let b = Sentence::atomic(1, 0).unwrap();
    let c = Sentence::atomic(2, 0).unwrap();
    let trunk = [
        Props::sdnode(a.disjoin(&b).disjoin(&c), true),
        Props::sdnode(a.disjoin(&b), true),
    ];
    // (is_group_optim, is_rank_optim, index of the trunk node consumed first)
    let cases = [(true, true, 1), (false, true, 1), (true, false, 0), (false, false, 0)];
    for (group, rank, expected) in cases {
        let mut config = TableauConfig::default();
        config.is_group_optim = group;
        config.is_rank_optim = rank;
        let mut tableau = fde(None, config);
        tableau.build_trunk_with(trunk.clone()).unwrap();
        assert!(tableau.step().unwrap());

        let trunk_node = tableau.trunk().unwrap().nodes()[expected].id();
        assert_eq!(
            tableau.history()[0].node,
            Some(trunk_node),
            "group {} rank {}",
            group,
            rank
        );
    }
}
