//! Render tree: branches folded back into a tree of shared node runs.

use super::branch::Branch;
use super::node::{BranchId, Node};
use serde::Serialize;

/// A run of nodes shared by every branch below it.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    pub nodes: Vec<Node>,
    /// Set on leaves: the branch that ends here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<BranchId>,
    pub closed: bool,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            self.children.iter().map(TreeNode::leaf_count).sum()
        }
    }

    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TreeNode::depth).max().unwrap_or(0)
    }
}

/// Fold `branches` into a tree. Children keep the order in which their
/// branches appear.
pub(crate) fn build(branches: &[Branch]) -> TreeNode {
    let all: Vec<&Branch> = branches.iter().collect();
    fold(&all, 0)
}

fn fold(branches: &[&Branch], start: usize) -> TreeNode {
    let mut end = start;
    loop {
        let next = branches.first().and_then(|b| b.nodes().get(end));
        let shared = match next {
            Some(node) => branches
                .iter()
                .all(|b| b.nodes().get(end).is_some_and(|n| n.id() == node.id())),
            None => false,
        };
        if !shared {
            break;
        }
        end += 1;
    }
    let nodes: Vec<Node> = branches
        .first()
        .map(|b| b.nodes()[start..end].iter().map(|n| (**n).clone()).collect())
        .unwrap_or_default();

    // Partition by the next node; a branch that ends here is a leaf.
    let mut groups: Vec<Vec<&Branch>> = Vec::new();
    let mut leaf: Option<&Branch> = None;
    for branch in branches {
        match branch.nodes().get(end) {
            None => leaf = Some(branch),
            Some(node) => {
                let existing = groups
                    .iter_mut()
                    .find(|g| g[0].nodes().get(end).map(|n| n.id()) == Some(node.id()));
                match existing {
                    Some(group) => group.push(branch),
                    None => groups.push(vec![branch]),
                }
            }
        }
    }

    if groups.is_empty() {
        let leaf = leaf.or_else(|| branches.first().copied());
        return TreeNode {
            nodes,
            branch: leaf.map(Branch::id),
            closed: leaf.is_some_and(Branch::is_closed),
            children: Vec::new(),
        };
    }
    let mut children: Vec<TreeNode> = Vec::new();
    if let Some(leaf) = leaf {
        children.push(TreeNode {
            nodes: Vec::new(),
            branch: Some(leaf.id()),
            closed: leaf.is_closed(),
            children: Vec::new(),
        });
    }
    children.extend(groups.iter().map(|g| fold(g, end)));
    let closed = children.iter().all(|c| c.closed);
    TreeNode {
        nodes,
        branch: None,
        closed,
        children,
    }
}
