//! Every rule of every logic applies to its own example trunk, and every
//! closure rule closes its own example.

use tableaux::tableau::Flag;
use tableaux::{logics, Tableau, TableauConfig};

#[test]
fn test_rules_apply_to_their_examples() {
    for logic in logics::all() {
        let meta = logic.meta();
        let names: Vec<&'static str> = logic.rules().rules().map(|r| r.name()).collect();
        for name in names {
            let example = logic
                .rules()
                .rule(name)
                .map(|r| r.example_nodes())
                .unwrap();
            let mut tableau = Tableau::new(logics::get(meta.name).unwrap(), None, TableauConfig::default());
            tableau.build_trunk_with(example).unwrap();

            let trunk = tableau.trunk().unwrap();
            assert!(trunk.is_open(), "{}: {} example closed", meta.name, name);
            let rule = tableau.rule(name).unwrap();
            assert!(
                !rule.targets(trunk).is_empty(),
                "{}: {} has no target on its example",
                meta.name,
                name
            );
        }
    }
}

#[test]
fn test_closure_rules_close_their_examples() {
    for logic in logics::all() {
        let meta = logic.meta();
        let rules = logic.rules();
        for closure in &rules.closure {
            let mut tableau = Tableau::new(logics::get(meta.name).unwrap(), None, TableauConfig::default());
            tableau.build_trunk_with(closure.example_nodes()).unwrap();

            let trunk = tableau.trunk().unwrap();
            assert!(trunk.is_closed(), "{}: {}", meta.name, closure.name());
            let flag = trunk.closure_node().and_then(|n| n.props().flag());
            assert_eq!(
                flag,
                Some((Flag::Closure, closure.name())),
                "{}",
                meta.name
            );
        }
    }
}
