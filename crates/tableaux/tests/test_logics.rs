//! End-to-end proofs across the supplied logics

use tableaux::tableau::Flag;
use tableaux::{
    logics, Argument, Constant, Outcome, Parameter, Predicate, Props, Quantifier, Sentence, Tableau,
    TableauConfig, Variable,
};

fn atoms() -> (Sentence, Sentence) {
    (
        Sentence::atomic(0, 0).unwrap(),
        Sentence::atomic(1, 0).unwrap(),
    )
}

fn prove(logic: &str, argument: Argument) -> Tableau {
    let logic = logics::get(logic).unwrap();
    let mut tableau = Tableau::new(logic, Some(argument), TableauConfig::default());
    tableau.build().unwrap();
    tableau
}

fn no_premises() -> Vec<Sentence> {
    Vec::new()
}

#[test]
fn test_fde_conjunction_elimination_is_valid() {
    let (a, b) = atoms();
    let tableau = prove("FDE", Argument::new(a.clone(), [a.conjoin(&b)]));
    assert_eq!(tableau.valid(), Some(true));
    assert_eq!(tableau.branches().len(), 1);
    let closure = tableau.branches()[0].closure_node().unwrap();
    assert_eq!(closure.props().flag().map(|(_, info)| info), Some("DesignationClosure"));
}

#[test]
fn test_fde_disjunction_elimination_is_invalid() {
    let (a, b) = atoms();
    let tableau = prove("FDE", Argument::new(b.clone(), [a.disjoin(&b)]));
    assert_eq!(tableau.valid(), Some(false));
    assert_eq!(tableau.outcome(), Some(Outcome::Invalid));
    assert_eq!(tableau.branches().len(), 2);

    // The open branch makes a designated and b undesignated.
    let open: Vec<_> = tableau.open_branches().collect();
    assert_eq!(open.len(), 1);
    assert!(open[0].nodes().iter().any(|n| n.props() == &Props::sdnode(a.clone(), true)));
    assert!(open[0].nodes().iter().any(|n| n.props() == &Props::sdnode(b.clone(), false)));
}

#[test]
fn test_excluded_middle_by_logic() {
    let (a, _) = atoms();
    let lem = a.disjoin(&a.negate());
    for (logic, expected) in [("FDE", false), ("K3", false), ("LP", true), ("CFOL", true)] {
        let tableau = prove(logic, Argument::new(lem.clone(), no_premises()));
        assert_eq!(tableau.valid(), Some(expected), "{}", logic);
    }
}

#[test]
fn test_explosion_by_logic() {
    let (a, b) = atoms();
    for (logic, expected) in [("FDE", false), ("K3", true), ("LP", false), ("CFOL", true)] {
        let argument = Argument::new(b.clone(), [a.clone(), a.negate()]);
        let tableau = prove(logic, argument);
        assert_eq!(tableau.valid(), Some(expected), "{}", logic);
    }
}

#[test]
fn test_cfol_modus_ponens() {
    let (a, b) = atoms();
    let argument = Argument::new(b.clone(), [a.material_conditional(&b), a.clone()]);
    assert_eq!(prove("CFOL", argument).valid(), Some(true));

    let affirming = Argument::new(a.clone(), [a.material_conditional(&b), b.clone()]);
    assert_eq!(prove("CFOL", affirming).valid(), Some(false));
}

#[test]
fn test_cfol_quantifiers() {
    let x = Variable::first();
    let m = Constant::first();
    let fx = Sentence::monadic(x);

    let universal = Argument::new(Sentence::monadic(m), [fx.quantify(Quantifier::Universal, x)]);
    assert_eq!(prove("CFOL", universal).valid(), Some(true));

    let existential = Argument::new(Sentence::monadic(m), [fx.quantify(Quantifier::Existential, x)]);
    assert_eq!(prove("CFOL", existential).valid(), Some(false));

    let duality = Argument::new(
        fx.negate().quantify(Quantifier::Existential, x),
        [fx.quantify(Quantifier::Universal, x).negate()],
    );
    assert_eq!(prove("CFOL", duality).valid(), Some(true));
}

#[test]
fn test_cfol_identity() {
    let m = Constant::first();
    let n = Constant::new(1, 0).unwrap();
    let argument = Argument::new(
        Sentence::monadic(n),
        [Sentence::identity(m, n), Sentence::monadic(m)],
    );
    assert_eq!(prove("CFOL", argument).valid(), Some(true));

    let reflexive = Argument::new(Sentence::identity(m, m), no_premises());
    assert_eq!(prove("CFOL", reflexive).valid(), Some(true));
}

#[test]
fn test_unbounded_instantiation_is_premature() {
    let x = Variable::first();
    let y = Variable::new(1, 0).unwrap();
    let r = Predicate::new(1, 0, 2).unwrap();
    let rxy = Sentence::predicated(r, vec![Parameter::from(x), Parameter::from(y)]).unwrap();
    let premise = rxy
        .quantify(Quantifier::Existential, y)
        .quantify(Quantifier::Universal, x);
    let (a, _) = atoms();

    let tableau = prove("CFOL", Argument::new(a, [premise]));
    assert_eq!(tableau.outcome(), Some(Outcome::Premature));
    assert_eq!(tableau.valid(), None);
    assert!(tableau.open_branches().all(|b| b.has_quit_flag()));
}

#[test]
fn test_modal_distribution() {
    let (a, b) = atoms();
    let argument = Argument::new(
        b.necessarily(),
        [a.material_conditional(&b).necessarily(), a.necessarily()],
    );
    for logic in ["K", "D", "T", "S4", "S5"] {
        assert_eq!(prove(logic, argument.clone()).valid(), Some(true), "{}", logic);
    }
}

#[test]
fn test_frame_conditions() {
    let (a, _) = atoms();
    let t_axiom = Argument::new(a.clone(), [a.necessarily()]);
    let d_axiom = Argument::new(a.possibly(), [a.necessarily()]);
    let four = Argument::new(a.necessarily().necessarily(), [a.necessarily()]);
    let five = Argument::new(a.possibly().necessarily(), [a.possibly()]);

    let cases = [
        ("K", &t_axiom, false),
        ("T", &t_axiom, true),
        ("K", &d_axiom, false),
        ("D", &d_axiom, true),
        ("T", &d_axiom, true),
        ("K", &four, false),
        ("S4", &four, true),
        ("S4", &five, false),
        ("S5", &five, true),
    ];
    for (logic, argument, expected) in cases {
        let tableau = prove(logic, argument.clone());
        assert_eq!(tableau.valid(), Some(expected), "{} {}", logic, argument);
    }
}

#[test]
fn test_modal_nodes_carry_worlds() {
    let (a, _) = atoms();
    let tableau = prove("K", Argument::new(a.clone(), [a.necessarily()]));
    let trunk = tableau.trunk().unwrap();
    assert!(trunk
        .nodes()
        .iter()
        .filter_map(|n| n.sentence().map(|_| n.world()))
        .all(|w| w == Some(0)));
}

#[test]
fn test_builds_are_deterministic() {
    let (a, b) = atoms();
    let argument = Argument::new(
        a.conjoin(&b).necessarily(),
        [a.necessarily().disjoin(&b.possibly()), b.necessarily()],
    );
    for logic in ["K", "S5"] {
        let first = prove(logic, argument.clone());
        let second = prove(logic, argument.clone());
        assert_eq!(first.outcome(), second.outcome());
        assert_eq!(first.history().len(), second.history().len());
        assert_eq!(first.branches().len(), second.branches().len());
        let rules = |t: &Tableau| t.history().iter().map(|e| e.rule).collect::<Vec<_>>();
        assert_eq!(rules(&first), rules(&second), "{}", logic);
    }
}

#[test]
fn test_unbounded_worlds_is_premature() {
    let (a, _) = atoms();
    let argument = Argument::new(a.clone(), [a.possibly().necessarily()]);
    let tableau = prove("S4", argument);

    assert_eq!(tableau.outcome(), Some(Outcome::Premature));
    assert!(tableau.history().len() < 100, "{} steps", tableau.history().len());
    assert!(tableau.open_branches().count() > 0);
    for branch in tableau.open_branches() {
        assert!(branch.has_quit_flag());
        assert!(branch
            .nodes()
            .iter()
            .any(|n| n.props().flag() == Some((Flag::Quit, "Possibility"))));
    }
}
