//! Arguments: a conclusion plus premises.

use crate::lexicals::{Predicate, Sentence};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An argument to be tested for validity.
///
/// Equality, ordering and hashing use the sentence tuple
/// `(conclusion, premises...)` only; the title is ignored.
#[derive(Debug, Clone, Serialize)]
pub struct Argument {
    conclusion: Sentence,
    premises: Vec<Sentence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

impl Argument {
    pub fn new(conclusion: Sentence, premises: impl IntoIterator<Item = Sentence>) -> Self {
        Argument {
            conclusion,
            premises: premises.into_iter().collect(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn conclusion(&self) -> &Sentence {
        &self.conclusion
    }

    pub fn premises(&self) -> &[Sentence] {
        &self.premises
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// All sentences, conclusion first.
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        std::iter::once(&self.conclusion).chain(self.premises.iter())
    }

    /// Every predicate used by the argument.
    pub fn predicates(&self) -> BTreeSet<Predicate> {
        self.sentences()
            .flat_map(|s| s.predicates().iter().cloned())
            .collect()
    }
}

impl PartialEq for Argument {
    fn eq(&self, other: &Self) -> bool {
        self.conclusion == other.conclusion && self.premises == other.premises
    }
}

impl Eq for Argument {}

impl Hash for Argument {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.conclusion.hash(state);
        self.premises.hash(state);
    }
}

impl Ord for Argument {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sentences().cmp(other.sentences())
    }
}

impl PartialOrd for Argument {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let premises: Vec<String> = self.premises.iter().map(|p| p.to_string()).collect();
        write!(f, "{} |- {}", premises.join(", "), self.conclusion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn atom(index: u8) -> Sentence {
        Sentence::atomic(index, 0).unwrap()
    }

    #[test]
    fn test_title_is_ignored() {
        let plain = Argument::new(atom(0), [atom(0).conjoin(&atom(1))]);
        let titled = plain.clone().with_title("Conjunction Elimination");
        assert_eq!(plain, titled);
        let set: HashSet<Argument> = [plain, titled].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_order_conclusion_first() {
        let x = Argument::new(atom(0), [atom(4)]);
        let y = Argument::new(atom(1), [atom(0)]);
        assert!(x < y);
        let z = Argument::new(atom(0), [atom(4), atom(0)]);
        assert!(x < z);
        assert_eq!(x.to_string(), "e |- a");
    }
}
