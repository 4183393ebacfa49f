/// Handle to a node record inside a [`NodePool`](crate::NodePool).
///
/// Handles are plain indices: cheap to copy, valid until the next
/// `start_search` on the owning engine (which may recycle the record).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The raw slot index behind this handle.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One candidate-state record of an active search.
///
/// There is at most one non-stale record per distinct state; superseded
/// records linger in the open queue flagged stale until they surface and
/// are reclaimed.
#[derive(Debug)]
pub struct Node<S> {
    pub(crate) state: S,
    pub(crate) g: i32,
    pub(crate) f: i32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) closed: bool,
    pub(crate) on_path: bool,
    pub(crate) stale: bool,
}

impl<S: Copy> Node<S> {
    pub(crate) fn new(state: S, g: i32, f: i32, parent: Option<NodeId>) -> Self {
        Self {
            state,
            g,
            f,
            parent,
            closed: false,
            on_path: false,
            stale: false,
        }
    }

    /// The problem state this record stands for.
    #[inline]
    pub fn state(&self) -> S {
        self.state
    }

    /// Accumulated path cost from the start state.
    #[inline]
    pub fn g(&self) -> i32 {
        self.g
    }

    /// Ordering score: `g` plus the heuristic estimate.
    #[inline]
    pub fn f(&self) -> i32 {
        self.f
    }

    /// The predecessor on the best path found so far, `None` for the start.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether this record has been expanded.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether `reconstruct_path` marked this record as part of the solution.
    #[inline]
    pub fn is_on_path(&self) -> bool {
        self.on_path
    }
}
