//! Normal modal logics over classical first-order logic.
//!
//! The logics differ only in the frame conditions imposed on the access
//! relation.

use super::cfol::{branching_rules, negation_trunk, plain_rules, OPERATORS};
use super::{Logic, Meta};
use crate::argument::Argument;
use crate::lexicals::Operator;
use crate::rules::{
    modal_conversions, ContradictionClosure, ExtendedQuantifierRule, IdentityRule,
    NarrowQuantifierRule, NecessityRule, PossibilityRule, ReflexiveRule, SelfIdentityClosure,
    SerialRule, SymmetricRule, TransitiveRule,
};
use crate::tableau::{Props, Rule, RuleSet};

const MODAL_OPERATORS: [Operator; 9] = [
    OPERATORS[0],
    OPERATORS[1],
    OPERATORS[2],
    OPERATORS[3],
    OPERATORS[4],
    OPERATORS[5],
    OPERATORS[6],
    Operator::Possibility,
    Operator::Necessity,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    /// No condition.
    K,
    /// Serial.
    D,
    /// Reflexive.
    T,
    /// Reflexive and transitive.
    S4,
    /// Reflexive, transitive and symmetric.
    S5,
}

impl Frame {
    pub fn is_serial(self) -> bool {
        self == Frame::D
    }

    pub fn is_reflexive(self) -> bool {
        matches!(self, Frame::T | Frame::S4 | Frame::S5)
    }

    pub fn is_transitive(self) -> bool {
        matches!(self, Frame::S4 | Frame::S5)
    }

    pub fn is_symmetric(self) -> bool {
        self == Frame::S5
    }
}

pub struct ModalLogic {
    frame: Frame,
}

impl ModalLogic {
    pub fn new(frame: Frame) -> Self {
        ModalLogic { frame }
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }
}

impl Logic for ModalLogic {
    fn meta(&self) -> Meta {
        let (name, title) = match self.frame {
            Frame::K => ("K", "Kripke Normal Modal Logic"),
            Frame::D => ("D", "Deontic Normal Modal Logic"),
            Frame::T => ("T", "Reflexive Normal Modal Logic"),
            Frame::S4 => ("S4", "S4 Normal Modal Logic"),
            Frame::S5 => ("S5", "S5 Normal Modal Logic"),
        };
        Meta {
            name,
            title,
            values: &["F", "T"],
            designated_values: &["T"],
            native_operators: &MODAL_OPERATORS,
            modal: true,
            quantified: true,
        }
    }

    fn rules(&self) -> RuleSet {
        let mut plain = plain_rules();
        plain.extend(modal_conversions());

        let mut delta: Vec<Box<dyn Rule>> = vec![
            Box::new(NarrowQuantifierRule::existential("Existential")),
            Box::new(PossibilityRule::new()),
        ];
        if self.frame.is_serial() {
            delta.push(Box::new(SerialRule::new()));
        }

        let mut gamma: Vec<Box<dyn Rule>> = vec![
            Box::new(ExtendedQuantifierRule::universal("Universal")),
            Box::new(NecessityRule::new()),
            Box::new(IdentityRule::new()),
        ];
        if self.frame.is_reflexive() {
            gamma.push(Box::new(ReflexiveRule));
        }
        if self.frame.is_transitive() {
            gamma.push(Box::new(TransitiveRule::default()));
        }
        if self.frame.is_symmetric() {
            gamma.push(Box::new(SymmetricRule::default()));
        }

        RuleSet::new()
            .with_closure(ContradictionClosure)
            .with_closure(SelfIdentityClosure)
            .with_group(plain)
            .with_group(branching_rules())
            .with_group(delta)
            .with_group(gamma)
    }

    fn build_trunk(&self, argument: &Argument) -> Vec<Props> {
        negation_trunk(argument, Some(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rules_by_logic() {
        let has = |frame, name| ModalLogic::new(frame).rules().rule(name).is_some();
        assert!(!has(Frame::K, "Reflexive"));
        assert!(has(Frame::D, "Serial"));
        assert!(has(Frame::T, "Reflexive"));
        assert!(has(Frame::S4, "Transitive"));
        assert!(!has(Frame::S4, "Symmetric"));
        assert!(has(Frame::S5, "Symmetric"));
    }
}
