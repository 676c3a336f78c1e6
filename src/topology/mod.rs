//! Process topology derivation
//!
//! Every participant derives the same global tree from nothing but its own
//! rank and the participant count, so no registry or negotiation step is
//! needed. The layout is the classic implicit heap:
//!
//! ```text
//! parent(r)   = (r - 1) / 2          non-root ranks
//! children(r) = { 2r + 1, 2r + 2 }   root and internal ranks
//! internal    = [1, world/2)
//! leaves      = [world/2, world)
//! ```

use std::fmt;
use std::ops::Range;

/// Unique process identifier in `[0, world_size)`.
pub type Rank = usize;

/// Rank of the designated orchestrator.
pub const ROOT_RANK: Rank = 0;

/// The closed set of responsibilities a rank can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Reads the input, scatters partitions to the leaves, performs the
    /// final merge.
    Root,
    /// Merges the sorted runs of its two children and forwards the result
    /// upward.
    Internal,
    /// Sorts one partition locally.
    Leaf,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Root => write!(f, "Root"),
            Role::Internal => write!(f, "Internal"),
            Role::Leaf => write!(f, "Leaf"),
        }
    }
}

/// The two children of a non-leaf rank.
///
/// Always exactly two: the merge barrier needs both runs before it can
/// fire, so the pair is a fixed two-field relation rather than a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildPair {
    /// Left child, `2 * rank + 1`.
    pub left: Rank,
    /// Right child, `2 * rank + 2`.
    pub right: Rank,
}

impl ChildPair {
    /// Children of `rank` under the heap layout.
    #[inline]
    pub fn of(rank: Rank) -> Self {
        Self {
            left: 2 * rank + 1,
            right: 2 * rank + 2,
        }
    }
}

/// The internal interval, written half-open. Empty below five participants.
fn internal_interval(world_size: usize) -> Range<Rank> {
    1..world_size / 2
}

/// One participant's derived position in the tree.
///
/// Computed once at startup from `(rank, world_size)` and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    rank: Rank,
    world_size: usize,
    role: Role,
    parent: Option<Rank>,
    children: Option<ChildPair>,
}

impl Topology {
    /// Derive role and neighbors from a rank and the participant count.
    ///
    /// Pure and deterministic, which is what lets every process re-derive
    /// the same global tree independently. Participant counts that cannot
    /// form complete child pairs (zero or even) are outside the contract
    /// and are rejected upstream by [`crate::SortConfig`].
    pub fn resolve(rank: Rank, world_size: usize) -> Self {
        let (role, parent, children) = if rank == ROOT_RANK {
            // The root's children are pinned to {1, 2}; a world of one has
            // nobody to delegate to.
            let children = if world_size > 1 {
                Some(ChildPair { left: 1, right: 2 })
            } else {
                None
            };
            (Role::Root, None, children)
        } else if internal_interval(world_size).contains(&rank) {
            (Role::Internal, Some((rank - 1) / 2), Some(ChildPair::of(rank)))
        } else {
            (Role::Leaf, Some((rank - 1) / 2), None)
        };

        Self {
            rank,
            world_size,
            role,
            parent,
            children,
        }
    }

    /// This participant's rank.
    #[inline]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Total number of participants.
    #[inline]
    pub fn world_size(&self) -> usize {
        self.world_size
    }

    /// The responsibility this rank carries.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Parent rank, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<Rank> {
        self.parent
    }

    /// Child ranks, `None` for leaves and for a root running alone.
    #[inline]
    pub fn children(&self) -> Option<ChildPair> {
        self.children
    }

    /// Ranks of the leaf set, `[world/2, world)`, in rank order.
    ///
    /// This is the set the root scatters over; internal ranks are bypassed
    /// on the way down. Empty when the root runs alone.
    pub fn leaf_ranks(&self) -> Range<Rank> {
        if self.world_size == 1 {
            return 0..0;
        }
        self.world_size / 2..self.world_size
    }

    /// Ranks of the internal set, `[1, world/2)`, in rank order.
    pub fn internal_ranks(&self) -> Range<Rank> {
        internal_interval(self.world_size)
    }

    /// Depth of this rank in the tree: `floor(log2(rank + 1))`.
    pub fn level(&self) -> u32 {
        (self.rank + 1).ilog2()
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rank {} ({}) level {}", self.rank, self.role, self.level())?;
        if let Some(parent) = self.parent {
            write!(f, " parent {}", parent)?;
        }
        if let Some(children) = self.children {
            write!(f, " children {{{}, {}}}", children.left, children.right)?;
        }
        Ok(())
    }
}
