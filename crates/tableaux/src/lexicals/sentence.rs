//! Sentences: atomic, predicated, quantified and operated.
//!
//! A [`Sentence`] is an `Arc` handle to an immutable node. Everything derived
//! from the structure (the identity tuple, the predicate/constant/variable/
//! atomic sets, and the operator and quantifier sequences) is computed once,
//! bottom-up, when the node is constructed.
//!
//! Equality, hashing and ordering all go through the identity tuple
//! ([`Sentence::ident`]). The tuple starts with the [`LexType`] rank and
//! contains numbers only, and its encoding is prefix-free, so plain
//! lexicographic comparison is a strict total order that agrees with
//! structural equality.

use super::operator::{LexType, Operator, Quantifier};
use super::parameter::{Constant, Coords, Parameter, Variable};
use super::predicate::Predicate;
use crate::error::LexicalError;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A zero-ary sentence letter, `a` through `e` plus a subscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Atomic(Coords);

impl Atomic {
    pub const MAX_INDEX: u8 = 4;

    pub fn new(index: u8, subscript: u32) -> Result<Self, LexicalError> {
        Coords::checked(LexType::Atomic, index, subscript, Self::MAX_INDEX).map(Atomic)
    }

    pub fn first() -> Self {
        Atomic(Coords {
            index: 0,
            subscript: 0,
        })
    }

    pub fn next(&self) -> Result<Self, LexicalError> {
        self.0.next(LexType::Atomic, Self::MAX_INDEX).map(Atomic)
    }

    pub fn gen(n: usize) -> impl Iterator<Item = Atomic> {
        std::iter::successors(Some(Atomic::first()), |a| a.next().ok()).take(n)
    }

    pub fn index(&self) -> u8 {
        self.0.index
    }

    pub fn subscript(&self) -> u32 {
        self.0.subscript
    }

    pub fn spec(&self) -> (u8, u32) {
        (self.0.index, self.0.subscript)
    }

    pub fn sort_tuple(&self) -> [i64; 3] {
        [
            LexType::Atomic.rank() as i64,
            self.0.subscript as i64,
            self.0.index as i64,
        ]
    }
}

impl fmt::Display for Atomic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ['a', 'b', 'c', 'd', 'e'][self.0.index as usize])?;
        if self.0.subscript > 0 {
            write!(f, "{}", self.0.subscript)?;
        }
        Ok(())
    }
}

/// A predicate applied to parameters, arity-checked on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicated {
    predicate: Predicate,
    params: Vec<Parameter>,
}

impl Predicated {
    pub fn new(
        predicate: Predicate,
        params: impl Into<Vec<Parameter>>,
    ) -> Result<Self, LexicalError> {
        let params = params.into();
        if params.len() != predicate.arity() {
            return Err(LexicalError::ArityMismatch {
                predicate: predicate.to_string(),
                expected: predicate.arity(),
                found: params.len(),
            });
        }
        Ok(Predicated { predicate, params })
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// `Fm`
    pub fn first() -> Self {
        Predicated {
            predicate: Predicate::first(),
            params: vec![Constant::first().into()],
        }
    }

    /// The same parameters under the next predicate of the same arity.
    pub fn next(&self) -> Result<Self, LexicalError> {
        let predicate = self
            .predicate
            .next()
            .map_err(|_| LexicalError::DomainEdge(LexType::Predicated))?;
        Ok(Predicated {
            predicate,
            params: self.params.clone(),
        })
    }
}

/// A quantifier binding a variable over an inner sentence.
///
/// The constructor does not check that the variable occurs free in the inner
/// sentence; see [`Sentence::free_variables`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quantified {
    quantifier: Quantifier,
    variable: Variable,
    sentence: Sentence,
}

impl Quantified {
    pub fn new(quantifier: Quantifier, variable: Variable, sentence: Sentence) -> Self {
        Quantified {
            quantifier,
            variable,
            sentence,
        }
    }

    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    pub fn variable(&self) -> Variable {
        self.variable
    }

    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    /// The inner sentence with every occurrence of the bound variable
    /// replaced by `constant`.
    pub fn unquantify(&self, constant: Constant) -> Sentence {
        self.sentence.substitute(constant, self.variable)
    }

    /// `∃xFx`
    pub fn first() -> Self {
        let x = Variable::first();
        Quantified::new(Quantifier::first(), x, Sentence::monadic(x))
    }

    /// Same quantifier and variable over the successor of the inner sentence.
    pub fn next(&self) -> Result<Self, LexicalError> {
        let sentence = self
            .sentence
            .next()
            .map_err(|_| LexicalError::DomainEdge(LexType::Quantified))?;
        Ok(Quantified::new(self.quantifier, self.variable, sentence))
    }
}

/// An operator applied to exactly `operator.arity()` operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operated {
    operator: Operator,
    operands: Vec<Sentence>,
}

impl Operated {
    pub fn new(
        operator: Operator,
        operands: impl Into<Vec<Sentence>>,
    ) -> Result<Self, LexicalError> {
        let operands = operands.into();
        if operands.len() != operator.arity() {
            return Err(LexicalError::OperandCount {
                operator,
                expected: operator.arity(),
                found: operands.len(),
            });
        }
        Ok(Operated { operator, operands })
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operands(&self) -> &[Sentence] {
        &self.operands
    }

    pub fn lhs(&self) -> &Sentence {
        &self.operands[0]
    }

    /// The last operand; the only one for unary operators.
    pub fn rhs(&self) -> &Sentence {
        &self.operands[self.operands.len() - 1]
    }

    /// `Ta`
    pub fn first() -> Self {
        let operator = Operator::first();
        Operated {
            operator,
            operands: vec![Sentence::first(); operator.arity()],
        }
    }

    /// Same operator with the last operand advanced.
    pub fn next(&self) -> Result<Self, LexicalError> {
        let edge = || LexicalError::DomainEdge(LexType::Operated);
        let mut operands = self.operands.clone();
        let last = operands.last_mut().ok_or_else(edge)?;
        *last = last.next().map_err(|_| edge())?;
        Ok(Operated {
            operator: self.operator,
            operands,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SentenceKind {
    Atomic(Atomic),
    Predicated(Predicated),
    Quantified(Quantified),
    Operated(Operated),
}

impl SentenceKind {
    pub fn lex_type(&self) -> LexType {
        match self {
            SentenceKind::Atomic(_) => LexType::Atomic,
            SentenceKind::Predicated(_) => LexType::Predicated,
            SentenceKind::Quantified(_) => LexType::Quantified,
            SentenceKind::Operated(_) => LexType::Operated,
        }
    }
}

#[derive(Debug, Default)]
struct Derived {
    ident: Vec<i64>,
    predicates: BTreeSet<Predicate>,
    constants: BTreeSet<Constant>,
    variables: BTreeSet<Variable>,
    atomics: BTreeSet<Atomic>,
    operators: Vec<Operator>,
    quantifiers: Vec<Quantifier>,
}

impl Derived {
    fn absorb(&mut self, child: &Sentence) {
        let other = &child.0.derived;
        self.ident.extend_from_slice(&other.ident);
        self.predicates.extend(other.predicates.iter().cloned());
        self.constants.extend(other.constants.iter().copied());
        self.variables.extend(other.variables.iter().copied());
        self.atomics.extend(other.atomics.iter().copied());
        self.operators.extend_from_slice(&other.operators);
        self.quantifiers.extend_from_slice(&other.quantifiers);
    }

    fn add_param(&mut self, param: &Parameter) {
        self.ident.extend_from_slice(&param.sort_tuple());
        match param {
            Parameter::Constant(c) => {
                self.constants.insert(*c);
            }
            Parameter::Variable(v) => {
                self.variables.insert(*v);
            }
        }
    }
}

#[derive(Debug)]
struct Inner {
    kind: SentenceKind,
    derived: Derived,
}

/// A shared, immutable sentence.
#[derive(Clone)]
pub struct Sentence(Arc<Inner>);

impl Sentence {
    fn build(kind: SentenceKind) -> Self {
        let mut derived = Derived::default();
        derived.ident.push(kind.lex_type().rank() as i64);
        match &kind {
            SentenceKind::Atomic(a) => {
                derived.ident.extend_from_slice(&a.sort_tuple()[1..]);
                derived.atomics.insert(*a);
            }
            SentenceKind::Predicated(p) => {
                derived.ident.extend_from_slice(&p.predicate.sort_tuple());
                derived.predicates.insert(p.predicate.clone());
                for param in &p.params {
                    derived.add_param(param);
                }
            }
            SentenceKind::Quantified(q) => {
                derived.ident.push(q.quantifier.rank() as i64);
                derived.ident.extend_from_slice(&q.variable.sort_tuple());
                derived.variables.insert(q.variable);
                derived.quantifiers.push(q.quantifier);
                derived.absorb(&q.sentence);
            }
            SentenceKind::Operated(o) => {
                derived.ident.push(o.operator.rank() as i64);
                derived.operators.push(o.operator);
                for operand in &o.operands {
                    derived.absorb(operand);
                }
            }
        }
        Sentence(Arc::new(Inner { kind, derived }))
    }

    pub fn atomic(index: u8, subscript: u32) -> Result<Self, LexicalError> {
        Atomic::new(index, subscript).map(Sentence::from)
    }

    pub fn predicated(
        predicate: Predicate,
        params: impl Into<Vec<Parameter>>,
    ) -> Result<Self, LexicalError> {
        Predicated::new(predicate, params).map(Sentence::from)
    }

    pub fn quantified(quantifier: Quantifier, variable: Variable, sentence: Sentence) -> Self {
        Quantified::new(quantifier, variable, sentence).into()
    }

    pub fn operated(
        operator: Operator,
        operands: impl Into<Vec<Sentence>>,
    ) -> Result<Self, LexicalError> {
        Operated::new(operator, operands).map(Sentence::from)
    }

    /// The least sentence in canonical order.
    pub fn first() -> Self {
        Atomic::first().into()
    }

    /// The canonical successor within the same kind of sentence.
    pub fn next(&self) -> Result<Self, LexicalError> {
        match self.kind() {
            SentenceKind::Atomic(a) => a.next().map(Sentence::from),
            SentenceKind::Predicated(p) => p.next().map(Sentence::from),
            SentenceKind::Quantified(q) => q.next().map(Sentence::from),
            SentenceKind::Operated(o) => o.next().map(Sentence::from),
        }
    }

    /// `a = b`, using the system identity predicate.
    pub fn identity(a: impl Into<Parameter>, b: impl Into<Parameter>) -> Self {
        Sentence::build(SentenceKind::Predicated(Predicated {
            predicate: Predicate::identity(),
            params: vec![a.into(), b.into()],
        }))
    }

    /// `a exists`, using the system existence predicate.
    pub fn existence(a: impl Into<Parameter>) -> Self {
        Sentence::build(SentenceKind::Predicated(Predicated {
            predicate: Predicate::existence(),
            params: vec![a.into()],
        }))
    }

    /// The first predicate applied to a single parameter.
    pub fn monadic(param: impl Into<Parameter>) -> Self {
        Sentence::build(SentenceKind::Predicated(Predicated {
            predicate: Predicate::first(),
            params: vec![param.into()],
        }))
    }

    fn unary(operator: Operator, operand: &Sentence) -> Self {
        Sentence::build(SentenceKind::Operated(Operated {
            operator,
            operands: vec![operand.clone()],
        }))
    }

    fn binary(operator: Operator, lhs: &Sentence, rhs: &Sentence) -> Self {
        Sentence::build(SentenceKind::Operated(Operated {
            operator,
            operands: vec![lhs.clone(), rhs.clone()],
        }))
    }

    pub fn negate(&self) -> Self {
        Sentence::unary(Operator::Negation, self)
    }

    /// Strips one negation if present, otherwise adds one.
    pub fn negative(&self) -> Self {
        match self.negated_operand() {
            Some(operand) => operand.clone(),
            None => self.negate(),
        }
    }

    pub fn asserted(&self) -> Self {
        Sentence::unary(Operator::Assertion, self)
    }

    pub fn possibly(&self) -> Self {
        Sentence::unary(Operator::Possibility, self)
    }

    pub fn necessarily(&self) -> Self {
        Sentence::unary(Operator::Necessity, self)
    }

    pub fn conjoin(&self, rhs: &Sentence) -> Self {
        Sentence::binary(Operator::Conjunction, self, rhs)
    }

    pub fn disjoin(&self, rhs: &Sentence) -> Self {
        Sentence::binary(Operator::Disjunction, self, rhs)
    }

    pub fn material_conditional(&self, rhs: &Sentence) -> Self {
        Sentence::binary(Operator::MaterialConditional, self, rhs)
    }

    pub fn material_biconditional(&self, rhs: &Sentence) -> Self {
        Sentence::binary(Operator::MaterialBiconditional, self, rhs)
    }

    pub fn conditional(&self, rhs: &Sentence) -> Self {
        Sentence::binary(Operator::Conditional, self, rhs)
    }

    pub fn biconditional(&self, rhs: &Sentence) -> Self {
        Sentence::binary(Operator::Biconditional, self, rhs)
    }

    /// Binds `variable` in `self` with `quantifier`.
    pub fn quantify(&self, quantifier: Quantifier, variable: Variable) -> Self {
        Sentence::quantified(quantifier, variable, self.clone())
    }

    pub fn kind(&self) -> &SentenceKind {
        &self.0.kind
    }

    pub fn lex_type(&self) -> LexType {
        self.0.kind.lex_type()
    }

    pub fn as_atomic(&self) -> Option<&Atomic> {
        match &self.0.kind {
            SentenceKind::Atomic(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_predicated(&self) -> Option<&Predicated> {
        match &self.0.kind {
            SentenceKind::Predicated(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_quantified(&self) -> Option<&Quantified> {
        match &self.0.kind {
            SentenceKind::Quantified(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_operated(&self) -> Option<&Operated> {
        match &self.0.kind {
            SentenceKind::Operated(o) => Some(o),
            _ => None,
        }
    }

    /// The main operator, if this is an operated sentence.
    pub fn operator(&self) -> Option<Operator> {
        self.as_operated().map(Operated::operator)
    }

    /// The main quantifier, if this is a quantified sentence.
    pub fn quantifier(&self) -> Option<Quantifier> {
        self.as_quantified().map(Quantified::quantifier)
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.as_predicated().map(Predicated::predicate)
    }

    /// Operands of an operated sentence; empty otherwise.
    pub fn operands(&self) -> &[Sentence] {
        self.as_operated().map(Operated::operands).unwrap_or(&[])
    }

    pub fn is_negated(&self) -> bool {
        self.operator() == Some(Operator::Negation)
    }

    fn negated_operand(&self) -> Option<&Sentence> {
        match &self.0.kind {
            SentenceKind::Operated(o) if o.operator == Operator::Negation => Some(&o.operands[0]),
            _ => None,
        }
    }

    /// The canonical identity tuple. Also the sort tuple.
    pub fn ident(&self) -> &[i64] {
        &self.0.derived.ident
    }

    pub fn predicates(&self) -> &BTreeSet<Predicate> {
        &self.0.derived.predicates
    }

    pub fn constants(&self) -> &BTreeSet<Constant> {
        &self.0.derived.constants
    }

    /// Every variable occurring in the sentence, bound or free.
    pub fn variables(&self) -> &BTreeSet<Variable> {
        &self.0.derived.variables
    }

    pub fn atomics(&self) -> &BTreeSet<Atomic> {
        &self.0.derived.atomics
    }

    /// Operators in pre-order.
    pub fn operators(&self) -> &[Operator] {
        &self.0.derived.operators
    }

    /// Quantifiers in pre-order.
    pub fn quantifiers(&self) -> &[Quantifier] {
        &self.0.derived.quantifiers
    }

    pub fn free_variables(&self) -> BTreeSet<Variable> {
        match &self.0.kind {
            SentenceKind::Atomic(_) => BTreeSet::new(),
            SentenceKind::Predicated(p) => p.params.iter().filter_map(Parameter::as_variable).collect(),
            SentenceKind::Quantified(q) => {
                let mut free = q.sentence.free_variables();
                free.remove(&q.variable);
                free
            }
            SentenceKind::Operated(o) => o
                .operands
                .iter()
                .flat_map(|s| s.free_variables())
                .collect(),
        }
    }

    /// Whether two handles share the same allocation.
    pub fn ptr_eq(&self, other: &Sentence) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn mentions(&self, param: Parameter) -> bool {
        match param {
            Parameter::Constant(c) => self.constants().contains(&c),
            Parameter::Variable(v) => self.variables().contains(&v),
        }
    }

    /// Replaces every occurrence of `old` with `new`.
    ///
    /// Returns a clone of `self` (the same allocation) when nothing changes.
    /// Occurrences of a variable bound by an inner quantifier are left alone.
    pub fn substitute(&self, new: impl Into<Parameter>, old: impl Into<Parameter>) -> Sentence {
        let (new, old) = (new.into(), old.into());
        if new == old {
            return self.clone();
        }
        self.substituted(new, old).unwrap_or_else(|| self.clone())
    }

    fn substituted(&self, new: Parameter, old: Parameter) -> Option<Sentence> {
        if !self.mentions(old) {
            return None;
        }
        match &self.0.kind {
            SentenceKind::Atomic(_) => None,
            SentenceKind::Predicated(p) => {
                let params = p
                    .params
                    .iter()
                    .map(|param| if *param == old { new } else { *param })
                    .collect();
                Some(Sentence::build(SentenceKind::Predicated(Predicated {
                    predicate: p.predicate.clone(),
                    params,
                })))
            }
            SentenceKind::Quantified(q) => {
                if old == Parameter::Variable(q.variable) {
                    return None;
                }
                let inner = q.sentence.substituted(new, old)?;
                Some(Sentence::quantified(q.quantifier, q.variable, inner))
            }
            SentenceKind::Operated(o) => {
                let mut changed = false;
                let operands = o
                    .operands
                    .iter()
                    .map(|operand| match operand.substituted(new, old) {
                        Some(replaced) => {
                            changed = true;
                            replaced
                        }
                        None => operand.clone(),
                    })
                    .collect();
                if !changed {
                    return None;
                }
                Some(Sentence::build(SentenceKind::Operated(Operated {
                    operator: o.operator,
                    operands,
                })))
            }
        }
    }

    /// Rebuilds a sentence from its identity tuple, validating every
    /// coordinate along the way.
    pub fn from_ident(ident: &[i64]) -> Result<Sentence, LexicalError> {
        let mut reader = IdentReader { ident, pos: 0 };
        let sentence = reader.sentence()?;
        if reader.pos != ident.len() {
            return Err(reader.malformed("trailing elements"));
        }
        Ok(sentence)
    }
}

struct IdentReader<'a> {
    ident: &'a [i64],
    pos: usize,
}

impl IdentReader<'_> {
    fn malformed(&self, reason: &str) -> LexicalError {
        LexicalError::MalformedIdent {
            position: self.pos,
            reason: reason.to_string(),
        }
    }

    fn take(&mut self) -> Result<i64, LexicalError> {
        let value = self
            .ident
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.malformed("unexpected end"))?;
        self.pos += 1;
        Ok(value)
    }

    fn take_as<T: TryFrom<i64>>(&mut self, what: &str) -> Result<T, LexicalError> {
        let value = self.take()?;
        T::try_from(value).map_err(|_| {
            self.pos -= 1;
            self.malformed(&format!("{} out of range: {}", what, value))
        })
    }

    fn expect_rank(&mut self, lex_type: LexType) -> Result<(), LexicalError> {
        let rank = self.take()?;
        if rank != lex_type.rank() as i64 {
            self.pos -= 1;
            return Err(self.malformed(&format!("expected {:?} rank, got {}", lex_type, rank)));
        }
        Ok(())
    }

    fn coords(&mut self) -> Result<(u8, u32), LexicalError> {
        let subscript = self.take_as("subscript")?;
        let index = self.take_as("index")?;
        Ok((index, subscript))
    }

    fn parameter(&mut self) -> Result<Parameter, LexicalError> {
        let rank = self.take()?;
        let (index, subscript) = self.coords()?;
        if rank == LexType::Constant.rank() as i64 {
            Ok(Constant::new(index, subscript)?.into())
        } else if rank == LexType::Variable.rank() as i64 {
            Ok(Variable::new(index, subscript)?.into())
        } else {
            Err(self.malformed("expected a parameter rank"))
        }
    }

    fn sentence(&mut self) -> Result<Sentence, LexicalError> {
        let rank: i32 = self.take_as("rank")?;
        match LexType::from_rank(rank) {
            Some(LexType::Atomic) => {
                let (index, subscript) = self.coords()?;
                Sentence::atomic(index, subscript)
            }
            Some(LexType::Predicated) => {
                self.expect_rank(LexType::Predicate)?;
                let subscript = self.take_as("subscript")?;
                let index = self.take_as("index")?;
                let arity: usize = self.take_as("arity")?;
                let predicate = Predicate::from_spec(index, subscript, arity)?;
                let mut params = Vec::new();
                for _ in 0..arity {
                    params.push(self.parameter()?);
                }
                Sentence::predicated(predicate, params)
            }
            Some(LexType::Quantified) => {
                let rank = self.take_as("quantifier")?;
                let quantifier =
                    Quantifier::from_rank(rank).ok_or_else(|| self.malformed("unknown quantifier"))?;
                self.expect_rank(LexType::Variable)?;
                let (index, subscript) = self.coords()?;
                let variable = Variable::new(index, subscript)?;
                let inner = self.sentence()?;
                Ok(Sentence::quantified(quantifier, variable, inner))
            }
            Some(LexType::Operated) => {
                let rank = self.take_as("operator")?;
                let operator =
                    Operator::from_rank(rank).ok_or_else(|| self.malformed("unknown operator"))?;
                let mut operands = Vec::new();
                for _ in 0..operator.arity() {
                    operands.push(self.sentence()?);
                }
                Sentence::operated(operator, operands)
            }
            _ => Err(self.malformed("expected a sentence rank")),
        }
    }
}

impl From<Atomic> for Sentence {
    fn from(a: Atomic) -> Self {
        Sentence::build(SentenceKind::Atomic(a))
    }
}

impl From<Predicated> for Sentence {
    fn from(p: Predicated) -> Self {
        Sentence::build(SentenceKind::Predicated(p))
    }
}

impl From<Quantified> for Sentence {
    fn from(q: Quantified) -> Self {
        Sentence::build(SentenceKind::Quantified(q))
    }
}

impl From<Operated> for Sentence {
    fn from(o: Operated) -> Self {
        Sentence::build(SentenceKind::Operated(o))
    }
}

impl PartialEq for Sentence {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.ident() == other.ident()
    }
}

impl Eq for Sentence {}

impl Hash for Sentence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ident().hash(state);
    }
}

impl Ord for Sentence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ident().cmp(other.ident())
    }
}

impl PartialOrd for Sentence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            SentenceKind::Atomic(a) => write!(f, "{}", a),
            SentenceKind::Predicated(p) => {
                write!(f, "{}", p.predicate)?;
                for param in &p.params {
                    write!(f, "{}", param)?;
                }
                Ok(())
            }
            SentenceKind::Quantified(q) => {
                write!(f, "{}{}{}", q.quantifier.polish(), q.variable, q.sentence)
            }
            SentenceKind::Operated(o) => {
                write!(f, "{}", o.operator.polish())?;
                for operand in &o.operands {
                    write!(f, "{}", operand)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sentence({})", self)
    }
}

impl Serialize for Sentence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> Sentence {
        Sentence::atomic(0, 0).unwrap()
    }

    fn b() -> Sentence {
        Sentence::atomic(1, 0).unwrap()
    }

    fn fx() -> Sentence {
        Sentence::monadic(Variable::first())
    }

    #[test]
    fn test_successors_stay_in_kind() {
        let starts = [
            Sentence::from(Atomic::first()),
            Predicated::first().into(),
            Quantified::first().into(),
            Operated::first().into(),
        ];
        for first in starts {
            let mut current = first.clone();
            for _ in 0..12 {
                let next = current.next().unwrap();
                assert_eq!(next.lex_type(), first.lex_type());
                assert!(next > current, "{} !< {}", current, next);
                current = next;
            }
        }
        assert_eq!(Predicated::first().next().unwrap().predicate(), &Predicate::new(1, 0, 1).unwrap());
        assert_eq!(Sentence::from(Quantified::first()).to_string(), "SxFx");
        assert_eq!(Operated::first().next().unwrap().rhs(), &b());
    }

    #[test]
    fn test_successor_domain_edges() {
        let identity = Sentence::identity(Constant::first(), Constant::first());
        assert_eq!(identity.next(), Err(LexicalError::DomainEdge(LexType::Predicated)));
        let last = Atomic::new(Atomic::MAX_INDEX, u32::MAX).unwrap();
        assert_eq!(last.next(), Err(LexicalError::DomainEdge(LexType::Atomic)));
        let negated = Sentence::from(last).negate();
        assert_eq!(negated.next(), Err(LexicalError::DomainEdge(LexType::Operated)));
        assert_eq!(Atomic::new(2, 5).unwrap().spec(), (2, 5));
    }

    #[test]
    fn test_display_polish() {
        assert_eq!(a().conjoin(&b()).to_string(), "Kab");
        assert_eq!(a().disjoin(&b()).negate().to_string(), "NAab");
        let all = fx().quantify(Quantifier::Universal, Variable::first());
        assert_eq!(all.to_string(), "VxFx");
        assert_eq!(Sentence::identity(Constant::first(), Constant::first()).to_string(), "Imm");
    }

    #[test]
    fn test_constructors_validate() {
        assert!(Sentence::atomic(5, 0).is_err());
        assert!(matches!(
            Sentence::operated(Operator::Conjunction, vec![a()]),
            Err(LexicalError::OperandCount { expected: 2, found: 1, .. })
        ));
        assert!(matches!(
            Sentence::predicated(Predicate::first(), Vec::<Parameter>::new()),
            Err(LexicalError::ArityMismatch { expected: 1, found: 0, .. })
        ));
    }

    #[test]
    fn test_derived_sets() {
        let m = Constant::first();
        let fm = Sentence::monadic(m);
        let s = fm.conjoin(&a()).negate();
        assert_eq!(s.operators(), &[Operator::Negation, Operator::Conjunction]);
        assert!(s.constants().contains(&m));
        assert!(s.atomics().contains(&Atomic::first()));
        assert_eq!(s.predicates().len(), 1);
        assert!(s.quantifiers().is_empty());
    }

    #[test]
    fn test_negative_strips_one_negation() {
        let na = a().negate();
        assert_eq!(na.negative(), a());
        assert_eq!(a().negative(), na);
        assert_eq!(na.negate().negative(), na);
    }

    #[test]
    fn test_substitute_without_occurrence_is_same_handle() {
        let s = a().conjoin(&b());
        let out = s.substitute(Constant::first(), Constant::new(1, 0).unwrap());
        assert!(out.ptr_eq(&s));
    }

    #[test]
    fn test_unquantify() {
        let x = Variable::first();
        let m = Constant::first();
        let q = fx().conjoin(&a()).quantify(Quantifier::Existential, x);
        let inner = q.as_quantified().unwrap().unquantify(m);
        assert_eq!(inner.to_string(), "KFma");
        assert!(inner.variables().is_empty());
    }

    #[test]
    fn test_substitute_leaves_rebound_variable() {
        let x = Variable::first();
        let m = Constant::first();
        let inner = fx().quantify(Quantifier::Universal, x);
        let s = fx().conjoin(&inner);
        assert_eq!(s.substitute(m, x).to_string(), "KFmVxFx");
        assert_eq!(s.free_variables().len(), 1);
    }

    #[test]
    fn test_ident_roundtrip() {
        let m = Constant::first();
        let fm = Sentence::monadic(m);
        let s = fm.negate().necessarily();
        let back = Sentence::from_ident(s.ident()).unwrap();
        assert_eq!(back, s);
        assert!(!back.ptr_eq(&s));
    }

    #[test]
    fn test_from_ident_rejects_garbage() {
        assert!(Sentence::from_ident(&[]).is_err());
        assert!(Sentence::from_ident(&[60, 0]).is_err());
        assert!(Sentence::from_ident(&[60, 0, 0, 0]).is_err());
        assert!(Sentence::from_ident(&[60, 0, 9]).is_err());
        assert!(Sentence::from_ident(&[20, 0, 0]).is_err());
    }

    #[test]
    fn test_order_by_type_rank_first() {
        let big_atomic = Sentence::atomic(4, 100).unwrap();
        assert!(big_atomic < fx());
        assert!(fx() < fx().quantify(Quantifier::Existential, Variable::first()));
        assert!(a() < b());
        assert!(a().negate() < a().conjoin(&a()));
    }
}
