//! Closure rules.

use crate::lexicals::{Atomic, Constant, Predicate, Sentence};
use crate::tableau::{ClosureRule, NodeLookup, Props};

fn atomic() -> Sentence {
    Atomic::first().into()
}

/// The same sentence both designated and undesignated.
pub struct DesignationClosure;

impl ClosureRule for DesignationClosure {
    fn name(&self) -> &'static str {
        "DesignationClosure"
    }

    fn closes(&self, props: &Props, lookup: &dyn NodeLookup) -> bool {
        match props {
            Props::Sentence {
                sentence,
                designated: Some(d),
                world,
            } => lookup.has_sentence(sentence, Some(!d), *world),
            _ => false,
        }
    }

    fn example_nodes(&self) -> Vec<Props> {
        vec![Props::sdnode(atomic(), true), Props::sdnode(atomic(), false)]
    }
}

/// A sentence and its negation with the same designation.
fn same_designation_pair(props: &Props, designated: bool, lookup: &dyn NodeLookup) -> bool {
    match props {
        Props::Sentence {
            sentence,
            designated: Some(d),
            world,
        } if *d == designated => lookup.has_sentence(&sentence.negative(), Some(designated), *world),
        _ => false,
    }
}

/// A sentence and its negation both designated.
pub struct GlutClosure;

impl ClosureRule for GlutClosure {
    fn name(&self) -> &'static str {
        "GlutClosure"
    }

    fn closes(&self, props: &Props, lookup: &dyn NodeLookup) -> bool {
        same_designation_pair(props, true, lookup)
    }

    fn example_nodes(&self) -> Vec<Props> {
        vec![
            Props::sdnode(atomic(), true),
            Props::sdnode(atomic().negate(), true),
        ]
    }
}

/// A sentence and its negation both undesignated.
pub struct GapClosure;

impl ClosureRule for GapClosure {
    fn name(&self) -> &'static str {
        "GapClosure"
    }

    fn closes(&self, props: &Props, lookup: &dyn NodeLookup) -> bool {
        same_designation_pair(props, false, lookup)
    }

    fn example_nodes(&self) -> Vec<Props> {
        vec![
            Props::sdnode(atomic(), false),
            Props::sdnode(atomic().negate(), false),
        ]
    }
}

/// A sentence and its negation at the same world.
pub struct ContradictionClosure;

impl ClosureRule for ContradictionClosure {
    fn name(&self) -> &'static str {
        "ContradictionClosure"
    }

    fn closes(&self, props: &Props, lookup: &dyn NodeLookup) -> bool {
        match props {
            Props::Sentence {
                sentence,
                designated,
                world,
            } => lookup.has_sentence(&sentence.negative(), *designated, *world),
            _ => false,
        }
    }

    fn example_nodes(&self) -> Vec<Props> {
        vec![Props::sentence(atomic()), Props::sentence(atomic().negate())]
    }
}

fn negated_predicated(props: &Props, predicate: &Predicate) -> Option<Sentence> {
    let sentence = props.as_sentence().filter(|s| s.is_negated())?;
    let inner = sentence.operands().first()?;
    (inner.predicate() == Some(predicate)).then(|| inner.clone())
}

/// `¬a = a`.
pub struct SelfIdentityClosure;

impl ClosureRule for SelfIdentityClosure {
    fn name(&self) -> &'static str {
        "SelfIdentityClosure"
    }

    fn closes(&self, props: &Props, _lookup: &dyn NodeLookup) -> bool {
        negated_predicated(props, &Predicate::identity())
            .and_then(|s| match s.as_predicated()?.params() {
                [a, b] => Some(a == b),
                _ => None,
            })
            .unwrap_or(false)
    }

    fn example_nodes(&self) -> Vec<Props> {
        let m = Constant::first();
        vec![Props::sentence(Sentence::identity(m, m).negate())]
    }
}

/// `¬Jm`: every constant denotes.
pub struct NonExistenceClosure;

impl ClosureRule for NonExistenceClosure {
    fn name(&self) -> &'static str {
        "NonExistenceClosure"
    }

    fn closes(&self, props: &Props, _lookup: &dyn NodeLookup) -> bool {
        negated_predicated(props, &Predicate::existence()).is_some()
    }

    fn example_nodes(&self) -> Vec<Props> {
        vec![Props::sentence(
            Sentence::existence(Constant::first()).negate(),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tableau::{Branch, BranchId, Lookahead};

    fn closes_example(rule: &dyn ClosureRule) -> bool {
        let empty = Branch::new(BranchId(0), None);
        let nodes = rule.example_nodes();
        let lookahead = Lookahead::new(&empty, &nodes);
        nodes.iter().any(|p| rule.closes(p, &lookahead))
    }

    #[test]
    fn test_examples_close() {
        let rules: Vec<Box<dyn ClosureRule>> = vec![
            Box::new(DesignationClosure),
            Box::new(GlutClosure),
            Box::new(GapClosure),
            Box::new(ContradictionClosure),
            Box::new(SelfIdentityClosure),
            Box::new(NonExistenceClosure),
        ];
        for rule in &rules {
            assert!(closes_example(rule.as_ref()), "{}", rule.name());
        }
    }

    #[test]
    fn test_glut_needs_both_designated() {
        let empty = Branch::new(BranchId(0), None);
        let nodes = [
            Props::sdnode(atomic(), true),
            Props::sdnode(atomic().negate(), false),
        ];
        let lookahead = Lookahead::new(&empty, &nodes);
        assert!(!nodes.iter().any(|p| GlutClosure.closes(p, &lookahead)));
        assert!(!nodes.iter().any(|p| DesignationClosure.closes(p, &lookahead)));
    }

    #[test]
    fn test_contradiction_respects_worlds() {
        let empty = Branch::new(BranchId(0), None);
        let nodes = [
            Props::swnode(atomic(), Some(0)),
            Props::swnode(atomic().negate(), Some(1)),
        ];
        let lookahead = Lookahead::new(&empty, &nodes);
        assert!(!nodes.iter().any(|p| ContradictionClosure.closes(p, &lookahead)));
    }

    #[test]
    fn test_distinct_identity_does_not_close() {
        let m = Constant::first();
        let n = Constant::new(1, 0).unwrap();
        let empty = Branch::new(BranchId(0), None);
        let props = Props::sentence(Sentence::identity(m, n).negate());
        assert!(!SelfIdentityClosure.closes(&props, &empty));
    }
}
