use std::collections::BinaryHeap;

use crate::node::NodeId;

/// Open-queue entry: a node handle plus a snapshot of its scores at the
/// time of insertion.
///
/// Ordered by ascending `f`, ties broken by ascending `g` (prefer the
/// candidate with the smaller accumulated cost). The ordering is reversed
/// so that `BinaryHeap`, a max-heap, pops the minimum first.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct OpenEntry {
    pub(crate) f: i32,
    pub(crate) g: i32,
    pub(crate) id: NodeId,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.f.cmp(&self.f).then_with(|| other.g.cmp(&self.g))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// The open set: discovered-but-not-yet-expanded records.
///
/// There is no decrease-key and no arbitrary removal; score improvements
/// are handled by the engine's reopen / lazy-stale protocol, so the heap
/// may transiently hold several entries for one state.
pub(crate) struct Frontier {
    heap: BinaryHeap<OpenEntry>,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub(crate) fn push(&mut self, entry: OpenEntry) {
        self.heap.push(entry);
    }

    /// Remove and return the minimum entry (smallest `f`, then smallest `g`).
    #[inline]
    pub(crate) fn pop(&mut self) -> Option<OpenEntry> {
        self.heap.pop()
    }

    /// The current minimum, without removing it.
    #[inline]
    pub(crate) fn peek(&self) -> Option<&OpenEntry> {
        self.heap.peek()
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.heap.clear();
    }

    /// Empty the queue, yielding every remaining entry in arbitrary order.
    pub(crate) fn drain(&mut self) -> std::collections::binary_heap::Drain<'_, OpenEntry> {
        self.heap.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(f: i32, g: i32, id: u32) -> OpenEntry {
        OpenEntry { f, g, id: NodeId(id) }
    }

    #[test]
    fn pops_ascending_f() {
        let mut q = Frontier::new();
        q.push(entry(5, 1, 0));
        q.push(entry(2, 1, 1));
        q.push(entry(9, 1, 2));
        q.push(entry(3, 1, 3));
        let fs: Vec<i32> = std::iter::from_fn(|| q.pop()).map(|e| e.f).collect();
        assert_eq!(fs, vec![2, 3, 5, 9]);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_f_prefers_smaller_g() {
        let mut q = Frontier::new();
        q.push(entry(4, 3, 0));
        q.push(entry(4, 1, 1));
        q.push(entry(4, 2, 2));
        assert_eq!(q.pop().map(|e| e.g), Some(1));
        assert_eq!(q.pop().map(|e| e.g), Some(2));
        assert_eq!(q.pop().map(|e| e.g), Some(3));
    }

    #[test]
    fn peek_matches_pop() {
        let mut q = Frontier::new();
        q.push(entry(7, 0, 0));
        q.push(entry(1, 0, 1));
        let top = *q.peek().unwrap();
        assert_eq!(q.pop(), Some(top));
    }

    #[test]
    fn clear_and_drain() {
        let mut q = Frontier::new();
        q.push(entry(1, 0, 0));
        q.push(entry(2, 0, 1));
        assert_eq!(q.drain().count(), 2);
        assert!(q.is_empty());
        q.push(entry(3, 0, 2));
        q.clear();
        assert!(q.pop().is_none());
    }
}
