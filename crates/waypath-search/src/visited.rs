use crate::node::NodeId;

/// Capability interface mapping a state to its current node record.
///
/// The engine keeps exactly one non-stale record per state in the index;
/// an implementation never sees two live entries for the same state.
/// Implementations are selected at engine construction and dispatched
/// statically.
pub trait VisitedIndex<S: Copy> {
    /// Record `id` as the current node for `state`.
    ///
    /// Returns `false` when the state cannot be indexed (e.g. outside a
    /// grid index's bounds); the engine then treats the state as
    /// unreachable and reclaims the record.
    fn insert(&mut self, state: S, id: NodeId) -> bool;

    /// Look up the current record for `state`, comparing with `eq`.
    fn find(&self, state: S, eq: impl Fn(S, S) -> bool) -> Option<NodeId>;

    /// Drop the entry for `state`. `id` must be the record the entry holds.
    fn remove(&mut self, state: S, id: NodeId);

    /// Empty the index, invoking `visit` once per present record so the
    /// engine can recycle or drop them.
    fn clear(&mut self, visit: impl FnMut(NodeId));
}

/// Generic linear-scan index: an unordered sequence of `(state, record)`
/// pairs, searched with the strategy's equality predicate.
///
/// O(n) per lookup, which is fine for small or non-spatial state spaces;
/// bounded integer-coordinate spaces should use
/// [`GridIndex`](crate::GridIndex) instead.
pub struct LinearIndex<S> {
    entries: Vec<(S, NodeId)>,
}

impl<S> LinearIndex<S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of states currently indexed.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S> Default for LinearIndex<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Copy> VisitedIndex<S> for LinearIndex<S> {
    fn insert(&mut self, state: S, id: NodeId) -> bool {
        self.entries.push((state, id));
        true
    }

    fn find(&self, state: S, eq: impl Fn(S, S) -> bool) -> Option<NodeId> {
        self.entries
            .iter()
            .find(|(s, _)| eq(*s, state))
            .map(|&(_, id)| id)
    }

    fn remove(&mut self, _state: S, id: NodeId) {
        if let Some(pos) = self.entries.iter().position(|&(_, e)| e == id) {
            self.entries.swap_remove(pos);
        }
    }

    fn clear(&mut self, mut visit: impl FnMut(NodeId)) {
        for (_, id) in self.entries.drain(..) {
            visit(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_find_remove() {
        let mut idx: LinearIndex<u32> = LinearIndex::new();
        assert!(idx.insert(10, NodeId(0)));
        assert!(idx.insert(20, NodeId(1)));
        assert_eq!(idx.find(10, |a, b| a == b), Some(NodeId(0)));
        assert_eq!(idx.find(20, |a, b| a == b), Some(NodeId(1)));
        assert_eq!(idx.find(30, |a, b| a == b), None);

        idx.remove(10, NodeId(0));
        assert_eq!(idx.find(10, |a, b| a == b), None);
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn custom_equality() {
        // Index strings by length only.
        let mut idx: LinearIndex<&str> = LinearIndex::new();
        idx.insert("abc", NodeId(7));
        let eq = |a: &str, b: &str| a.len() == b.len();
        assert_eq!(idx.find("xyz", eq), Some(NodeId(7)));
        assert_eq!(idx.find("wxyz", eq), None);
    }

    #[test]
    fn clear_visits_every_entry() {
        let mut idx: LinearIndex<u32> = LinearIndex::new();
        for i in 0..5 {
            idx.insert(i, NodeId(i));
        }
        let mut seen = Vec::new();
        idx.clear(|id| seen.push(id.0));
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert!(idx.is_empty());
    }
}
