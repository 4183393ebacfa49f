use crate::node::{Node, NodeId};

/// A pool slot: either a live node record or a link in the free list.
///
/// Making vacancy a distinct variant keeps the free-list link from ever
/// being confused with a live record's parent field.
enum Slot<S> {
    Occupied(Node<S>),
    Vacant { next_free: Option<NodeId> },
}

/// Arena allocator and recycler for node records.
///
/// Records released back to the pool are threaded onto an intrusive free
/// list and handed out again by [`acquire`](NodePool::acquire) before any
/// new slot is allocated, so repeated searches on the same engine settle at
/// the high-water record count of the largest search and stop growing.
///
/// The pool is the sole owner of every record; everything else holds
/// [`NodeId`] handles.
pub struct NodePool<S> {
    slots: Vec<Slot<S>>,
    free_head: Option<NodeId>,
    free_len: usize,
}

impl<S: Copy> NodePool<S> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            free_len: 0,
        }
    }

    /// Take a record off the free list, or allocate a fresh slot.
    ///
    /// The record comes back fully initialized: flags cleared, scores and
    /// parent set to the given values.
    pub fn acquire(&mut self, state: S, g: i32, f: i32, parent: Option<NodeId>) -> NodeId {
        let node = Node::new(state, g, f, parent);
        match self.free_head {
            Some(id) => {
                let slot = &mut self.slots[id.index()];
                match *slot {
                    Slot::Vacant { next_free } => {
                        self.free_head = next_free;
                        self.free_len -= 1;
                        *slot = Slot::Occupied(node);
                        id
                    }
                    Slot::Occupied(_) => panic!("free list points at a live node"),
                }
            }
            None => {
                let id = NodeId(self.slots.len() as u32);
                self.slots.push(Slot::Occupied(node));
                id
            }
        }
    }

    /// Return a record to the free list. The handle must not be used again
    /// until `acquire` hands it back out.
    pub fn release(&mut self, id: NodeId) {
        let slot = &mut self.slots[id.index()];
        match slot {
            Slot::Occupied(_) => {
                *slot = Slot::Vacant {
                    next_free: self.free_head,
                };
                self.free_head = Some(id);
                self.free_len += 1;
            }
            Slot::Vacant { .. } => panic!("double release of node {}", id.index()),
        }
    }

    /// Drop every record, live or cached, and release the arena storage.
    ///
    /// Used when a caller opts out of cross-search caching: the next search
    /// starts from an empty arena.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.slots.shrink_to_fit();
        self.free_head = None;
        self.free_len = 0;
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<S> {
        match &self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("node {} is pooled, not live", id.index()),
        }
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<S> {
        match &mut self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("node {} is pooled, not live", id.index()),
        }
    }

    /// Total slots ever allocated and still held (live + cached).
    #[inline]
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    /// Records currently sitting on the free list.
    #[inline]
    pub fn free_count(&self) -> usize {
        self.free_len
    }

    /// Records currently part of an active search.
    #[inline]
    pub fn live(&self) -> usize {
        self.slots.len() - self.free_len
    }
}

impl<S: Copy> Default for NodePool<S> {
    fn default() -> Self {
        Self::new()
    }
}
