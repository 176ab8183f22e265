//! Nodes and their properties.

use crate::lexicals::Sentence;
use serde::Serialize;
use std::fmt;

/// A modal world.
pub type World = u32;

/// Identifier of a node, unique within one tableau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Identifier of a branch, its position in the tableau's branch list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BranchId(pub(crate) usize);

impl BranchId {
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    /// The branch closed; `info` names the closure rule.
    Closure,
    /// A rule hit a resource bound; `info` names the rule.
    Quit,
}

/// Node properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Props {
    Sentence {
        sentence: Sentence,
        #[serde(skip_serializing_if = "Option::is_none")]
        designated: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        world: Option<World>,
    },
    Access {
        world1: World,
        world2: World,
    },
    Flag {
        flag: Flag,
        info: String,
    },
}

impl Props {
    pub fn sentence(sentence: Sentence) -> Self {
        Props::Sentence {
            sentence,
            designated: None,
            world: None,
        }
    }

    /// A sentence with a designation, as used by many-valued logics.
    pub fn sdnode(sentence: Sentence, designated: bool) -> Self {
        Props::Sentence {
            sentence,
            designated: Some(designated),
            world: None,
        }
    }

    /// A sentence at a world, as used by modal logics.
    pub fn swnode(sentence: Sentence, world: Option<World>) -> Self {
        Props::Sentence {
            sentence,
            designated: None,
            world,
        }
    }

    pub fn access(world1: World, world2: World) -> Self {
        Props::Access { world1, world2 }
    }

    pub fn quit_flag(info: impl Into<String>) -> Self {
        Props::Flag {
            flag: Flag::Quit,
            info: info.into(),
        }
    }

    pub fn closure_flag(info: impl Into<String>) -> Self {
        Props::Flag {
            flag: Flag::Closure,
            info: info.into(),
        }
    }

    /// A sentence node carrying the same designation and world as `self`.
    pub fn with_sentence(&self, sentence: Sentence) -> Props {
        match self {
            Props::Sentence {
                designated, world, ..
            } => Props::Sentence {
                sentence,
                designated: *designated,
                world: *world,
            },
            _ => Props::sentence(sentence),
        }
    }

    /// Like [`Props::with_sentence`], but at another world.
    pub fn at_world(&self, sentence: Sentence, world: World) -> Props {
        match self.with_sentence(sentence) {
            Props::Sentence {
                sentence,
                designated,
                ..
            } => Props::Sentence {
                sentence,
                designated,
                world: Some(world),
            },
            other => other,
        }
    }

    pub fn as_sentence(&self) -> Option<&Sentence> {
        match self {
            Props::Sentence { sentence, .. } => Some(sentence),
            _ => None,
        }
    }

    pub fn designated(&self) -> Option<bool> {
        match self {
            Props::Sentence { designated, .. } => *designated,
            _ => None,
        }
    }

    pub fn world(&self) -> Option<World> {
        match self {
            Props::Sentence { world, .. } => *world,
            _ => None,
        }
    }

    pub fn access_pair(&self) -> Option<(World, World)> {
        match self {
            Props::Access { world1, world2 } => Some((*world1, *world2)),
            _ => None,
        }
    }

    pub fn flag(&self) -> Option<(Flag, &str)> {
        match self {
            Props::Flag { flag, info } => Some((*flag, info.as_str())),
            _ => None,
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, Props::Flag { .. })
    }

    pub fn is_quit_flag(&self) -> bool {
        matches!(self, Props::Flag { flag: Flag::Quit, .. })
    }

    /// Worlds mentioned by this node.
    pub fn worlds(&self) -> impl Iterator<Item = World> {
        let pair = match self {
            Props::Sentence { world, .. } => [*world, None],
            Props::Access { world1, world2 } => [Some(*world1), Some(*world2)],
            Props::Flag { .. } => [None, None],
        };
        pair.into_iter().flatten()
    }

    /// Whether these are sentence properties for exactly this key.
    pub fn is_sentence_node(
        &self,
        sentence: &Sentence,
        designated: Option<bool>,
        world: Option<World>,
    ) -> bool {
        match self {
            Props::Sentence {
                sentence: s,
                designated: d,
                world: w,
            } => s == sentence && *d == designated && *w == world,
            _ => false,
        }
    }
}

impl fmt::Display for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Props::Sentence {
                sentence,
                designated,
                world,
            } => {
                write!(f, "{}", sentence)?;
                match designated {
                    Some(true) => write!(f, " +")?,
                    Some(false) => write!(f, " -")?,
                    None => {}
                }
                if let Some(w) = world {
                    write!(f, " w{}", w)?;
                }
                Ok(())
            }
            Props::Access { world1, world2 } => write!(f, "w{}Rw{}", world1, world2),
            Props::Flag { flag, info } => write!(f, "{:?}({})", flag, info),
        }
    }
}

/// A node on one or more branches. Never mutated once created.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    id: NodeId,
    #[serde(flatten)]
    props: Props,
}

impl Node {
    pub(crate) fn new(id: NodeId, props: Props) -> Self {
        Node { id, props }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn sentence(&self) -> Option<&Sentence> {
        self.props.as_sentence()
    }

    pub fn designated(&self) -> Option<bool> {
        self.props.designated()
    }

    pub fn world(&self) -> Option<World> {
        self.props.world()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.props)
    }
}
