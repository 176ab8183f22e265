//! Branches: append-only, forkable node sequences with derived indices.

use super::node::{BranchId, Node, NodeId, Props, World};
use crate::error::{LexicalError, Result, TableauError};
use crate::lexicals::{Constant, Sentence};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

/// Read-only membership queries used by closure checks.
pub trait NodeLookup {
    fn has_sentence(&self, sentence: &Sentence, designated: Option<bool>, world: Option<World>) -> bool;

    fn has_access(&self, world1: World, world2: World) -> bool;
}

/// One path through the tableau.
///
/// Nodes are shared with the parent and siblings through `Arc`, but the
/// sequence and every index are copied on fork, so no two branches ever
/// mutate common state.
#[derive(Debug, Clone)]
pub struct Branch {
    id: BranchId,
    parent: Option<BranchId>,
    nodes: Vec<Arc<Node>>,
    positions: HashMap<NodeId, usize>,
    ticked: HashSet<NodeId>,
    closed: bool,
    closure: Option<NodeId>,
    sentences: HashSet<(Sentence, Option<bool>, Option<World>)>,
    access: HashSet<(World, World)>,
    constants: BTreeSet<Constant>,
    worlds: BTreeSet<World>,
    quit: bool,
}

impl Branch {
    pub(crate) fn new(id: BranchId, parent: Option<BranchId>) -> Self {
        Branch {
            id,
            parent,
            nodes: Vec::new(),
            positions: HashMap::new(),
            ticked: HashSet::new(),
            closed: false,
            closure: None,
            sentences: HashSet::new(),
            access: HashSet::new(),
            constants: BTreeSet::new(),
            worlds: BTreeSet::new(),
            quit: false,
        }
    }

    /// An exact copy of this branch under a new id, with `self` as parent.
    pub(crate) fn fork(&self, id: BranchId) -> Branch {
        Branch {
            id,
            parent: Some(self.id),
            ..self.clone()
        }
    }

    pub(crate) fn push(&mut self, node: Arc<Node>) -> Result<()> {
        if self.closed {
            return Err(TableauError::BranchClosed(self.id));
        }
        match node.props() {
            Props::Sentence {
                sentence,
                designated,
                world,
            } => {
                self.constants.extend(sentence.constants().iter().copied());
                self.sentences.insert((sentence.clone(), *designated, *world));
            }
            Props::Access { world1, world2 } => {
                self.access.insert((*world1, *world2));
            }
            Props::Flag { .. } => {
                if node.props().is_quit_flag() {
                    self.quit = true;
                }
            }
        }
        self.worlds.extend(node.props().worlds());
        self.positions.insert(node.id(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Mark a node as processed. Returns `false` if it was already ticked.
    pub(crate) fn tick(&mut self, node: NodeId) -> Result<bool> {
        if self.closed {
            return Err(TableauError::BranchClosed(self.id));
        }
        if !self.positions.contains_key(&node) {
            return Err(TableauError::UnknownNode(node));
        }
        Ok(self.ticked.insert(node))
    }

    /// Append the closure flag node and close.
    pub(crate) fn close(&mut self, flag: Arc<Node>) -> Result<()> {
        let id = flag.id();
        self.push(flag)?;
        self.closure = Some(id);
        self.closed = true;
        Ok(())
    }

    pub fn id(&self) -> BranchId {
        self.id
    }

    pub fn parent(&self) -> Option<BranchId> {
        self.parent
    }

    pub fn nodes(&self) -> &[Arc<Node>] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Arc<Node>> {
        self.positions.get(&id).map(|&i| &self.nodes[i])
    }

    pub fn leaf(&self) -> Option<&Arc<Node>> {
        self.nodes.last()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_open(&self) -> bool {
        !self.closed
    }

    pub fn is_ticked(&self, node: NodeId) -> bool {
        self.ticked.contains(&node)
    }

    pub fn ticked_count(&self) -> usize {
        self.ticked.len()
    }

    /// The closure flag node, once closed.
    pub fn closure_node(&self) -> Option<&Arc<Node>> {
        self.closure.and_then(|id| self.node(id))
    }

    pub fn has_quit_flag(&self) -> bool {
        self.quit
    }

    /// Whether a node with exactly these properties is on the branch.
    pub fn has(&self, props: &Props) -> bool {
        match props {
            Props::Sentence {
                sentence,
                designated,
                world,
            } => self.has_sentence(sentence, *designated, *world),
            Props::Access { world1, world2 } => self.has_access(*world1, *world2),
            Props::Flag { .. } => self.nodes.iter().any(|n| n.props() == props),
        }
    }

    pub fn constants(&self) -> &BTreeSet<Constant> {
        &self.constants
    }

    pub fn worlds(&self) -> &BTreeSet<World> {
        &self.worlds
    }

    /// A constant not yet on the branch: the successor of the greatest one.
    pub fn new_constant(&self) -> std::result::Result<Constant, LexicalError> {
        match self.constants.iter().next_back() {
            Some(last) => last.next(),
            None => Ok(Constant::first()),
        }
    }

    /// A world not yet on the branch.
    pub fn new_world(&self) -> World {
        self.worlds.iter().next_back().map_or(0, |w| w + 1)
    }
}

impl NodeLookup for Branch {
    fn has_sentence(&self, sentence: &Sentence, designated: Option<bool>, world: Option<World>) -> bool {
        self.sentences
            .contains(&(sentence.clone(), designated, world))
    }

    fn has_access(&self, world1: World, world2: World) -> bool {
        self.access.contains(&(world1, world2))
    }
}

/// A branch as it would be after adding a pending group of nodes.
pub struct Lookahead<'a> {
    branch: &'a Branch,
    pending: &'a [Props],
}

impl<'a> Lookahead<'a> {
    pub fn new(branch: &'a Branch, pending: &'a [Props]) -> Self {
        Lookahead { branch, pending }
    }
}

impl NodeLookup for Lookahead<'_> {
    fn has_sentence(&self, sentence: &Sentence, designated: Option<bool>, world: Option<World>) -> bool {
        self.branch.has_sentence(sentence, designated, world)
            || self
                .pending
                .iter()
                .any(|p| p.is_sentence_node(sentence, designated, world))
    }

    fn has_access(&self, world1: World, world2: World) -> bool {
        self.branch.has_access(world1, world2)
            || self
                .pending
                .iter()
                .any(|p| p.access_pair() == Some((world1, world2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: usize, props: Props) -> Arc<Node> {
        Arc::new(Node::new(NodeId(id), props))
    }

    fn fm() -> Sentence {
        Sentence::monadic(Constant::first())
    }

    #[test]
    fn test_indices_follow_pushes() {
        let mut b = Branch::new(BranchId(0), None);
        b.push(node(0, Props::swnode(fm(), Some(0)))).unwrap();
        b.push(node(1, Props::access(0, 2))).unwrap();
        assert!(b.has_sentence(&fm(), None, Some(0)));
        assert!(!b.has_sentence(&fm(), None, None));
        assert!(b.has_access(0, 2));
        assert_eq!(b.worlds().iter().copied().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(b.new_world(), 3);
        assert_eq!(b.new_constant().unwrap(), Constant::new(1, 0).unwrap());
    }

    #[test]
    fn test_fork_copies_then_diverges() {
        let mut parent = Branch::new(BranchId(0), None);
        parent.push(node(0, Props::sentence(fm()))).unwrap();
        parent.tick(NodeId(0)).unwrap();
        let mut child = parent.fork(BranchId(1));
        assert_eq!(child.parent(), Some(BranchId(0)));
        assert!(child.is_ticked(NodeId(0)));
        child.push(node(1, Props::sentence(fm().negate()))).unwrap();
        assert_eq!(child.len(), 2);
        assert_eq!(parent.len(), 1);
    }

    #[test]
    fn test_tick_once_and_closed_branch_rejects_mutation() {
        let mut b = Branch::new(BranchId(0), None);
        b.push(node(0, Props::sentence(fm()))).unwrap();
        assert!(b.tick(NodeId(0)).unwrap());
        assert!(!b.tick(NodeId(0)).unwrap());
        assert!(matches!(b.tick(NodeId(9)), Err(TableauError::UnknownNode(_))));
        b.close(node(1, Props::closure_flag("Test"))).unwrap();
        assert!(b.is_closed());
        assert_eq!(b.closure_node().map(|n| n.id()), Some(NodeId(1)));
        assert!(matches!(
            b.push(node(2, Props::sentence(fm()))),
            Err(TableauError::BranchClosed(_))
        ));
    }

    #[test]
    fn test_lookahead_sees_pending() {
        let b = Branch::new(BranchId(0), None);
        let pending = [Props::sdnode(fm(), true), Props::access(1, 1)];
        let look = Lookahead::new(&b, &pending);
        assert!(look.has_sentence(&fm(), Some(true), None));
        assert!(!look.has_sentence(&fm(), Some(false), None));
        assert!(look.has_access(1, 1));
    }
}
