use waypath_geom::{Point, Range};

use crate::node::NodeId;
use crate::visited::VisitedIndex;

const NIL: u32 = u32::MAX;

#[derive(Clone, Copy)]
struct Cell {
    id: NodeId,
    generation: u32,
    prev: u32,
    next: u32,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            id: NodeId(0),
            generation: 0,
            prev: NIL,
            next: NIL,
        }
    }
}

/// Generation-stamped visited index for bounded integer-coordinate spaces.
///
/// One cell per coordinate in the range; a cell is present iff its stamp
/// equals the current generation counter, so `clear` is a counter bump
/// rather than a rewrite of the whole array (a full re-zero happens only
/// on counter wraparound). Present cells are threaded into an intrusive
/// doubly-linked list so clearing visits O(present) cells, not O(area).
///
/// A record's coordinate is its lookup key; the equality predicate passed
/// to `find` is ignored.
pub struct GridIndex {
    rng: Range,
    width: usize,
    cells: Vec<Cell>,
    generation: u32,
    head: u32,
    present: usize,
}

impl GridIndex {
    /// Create an index covering the given coordinate bounds.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            cells: vec![Cell::default(); rng.len()],
            generation: 1,
            head: NIL,
            present: 0,
        }
    }

    /// The coordinate bounds being indexed.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Number of states currently indexed.
    #[inline]
    pub fn len(&self) -> usize {
        self.present
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.present == 0
    }

    /// Replace the coordinate bounds.
    ///
    /// If the new range fits within the existing cell array the allocation
    /// is kept and only the generation counter is bumped; otherwise the
    /// array is reallocated.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        self.rng = rng;
        self.width = rng.width().max(0) as usize;
        self.head = NIL;
        self.present = 0;
        if new_len <= self.cells.len() {
            self.bump_generation();
        } else {
            self.cells.clear();
            self.cells.resize(new_len, Cell::default());
            self.generation = 1;
        }
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    #[inline]
    fn is_present(&self, i: usize) -> bool {
        self.cells[i].generation == self.generation
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Counter wrapped: old stamps could collide with new ones, so
            // fall back to a full re-zero.
            log::warn!("grid index generation wrapped, re-zeroing {} cells", self.cells.len());
            for cell in self.cells.iter_mut() {
                *cell = Cell::default();
            }
            self.generation = 1;
        }
    }

    fn detach(&mut self, i: usize) {
        let Cell { prev, next, .. } = self.cells[i];
        if prev == NIL {
            self.head = next;
        } else {
            self.cells[prev as usize].next = next;
        }
        if next != NIL {
            self.cells[next as usize].prev = prev;
        }
        self.present -= 1;
    }
}

impl VisitedIndex<Point> for GridIndex {
    fn insert(&mut self, state: Point, id: NodeId) -> bool {
        let Some(i) = self.idx(state) else {
            return false;
        };
        debug_assert!(!self.is_present(i), "state already indexed at {state}");
        let generation = self.generation;
        let head = self.head;
        let cell = &mut self.cells[i];
        cell.id = id;
        cell.generation = generation;
        cell.prev = NIL;
        cell.next = head;
        if head != NIL {
            self.cells[head as usize].prev = i as u32;
        }
        self.head = i as u32;
        self.present += 1;
        true
    }

    fn find(&self, state: Point, _eq: impl Fn(Point, Point) -> bool) -> Option<NodeId> {
        let i = self.idx(state)?;
        if self.is_present(i) {
            Some(self.cells[i].id)
        } else {
            None
        }
    }

    fn remove(&mut self, state: Point, id: NodeId) {
        let Some(i) = self.idx(state) else {
            return;
        };
        if self.is_present(i) && self.cells[i].id == id {
            self.detach(i);
            // Stamp one generation behind so the cell reads as absent.
            self.cells[i].generation = self.generation.wrapping_sub(1);
        }
    }

    fn clear(&mut self, mut visit: impl FnMut(NodeId)) {
        let mut i = self.head;
        while i != NIL {
            let cell = self.cells[i as usize];
            visit(cell.id);
            i = cell.next;
        }
        self.head = NIL;
        self.present = 0;
        self.bump_generation();
    }
}
