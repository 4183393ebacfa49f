use crate::node::{Node, NodeId};
use crate::open::{Frontier, OpenEntry};
use crate::pool::NodePool;
use crate::visited::VisitedIndex;

/// Outcome of a single [`Searcher::search_step`].
///
/// `Success` and `Fail` are absorbing: a finished engine must be restarted
/// with [`Searcher::start_search`] before it can step again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// More expansions are needed.
    Searching,
    /// A goal state was popped; the result's goal node is set.
    Success,
    /// The open set ran dry: no path exists.
    Fail,
}

/// Handles to the endpoints of the current search.
///
/// Both handles stay valid until the next `start_search` on the same
/// engine, which recycles every record of the finished search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// The record acquired for the start state.
    pub start: NodeId,
    /// The goal record, set once a step reports [`Status::Success`].
    pub goal: Option<NodeId>,
}

/// Problem-specific callbacks driving a [`Searcher`].
///
/// All dispatch is static; the engine is generic over the implementing
/// type and never boxes it.
pub trait Strategy: Sized {
    /// The problem's state value. Opaque to the engine beyond copying.
    type State: Copy;

    /// Admissible estimate of remaining cost from `state` to a goal.
    /// Used only for ordering.
    fn heuristic(&self, state: Self::State) -> i32;

    /// Cost of a direct transition. Applied when a neighbor is proposed
    /// without an explicit cost.
    fn step_cost(&self, from: Self::State, to: Self::State) -> i32;

    /// State equality, used by the generic visited index. A grid index
    /// compares coordinates directly and ignores this.
    fn states_eq(&self, a: Self::State, b: Self::State) -> bool;

    /// Whether `state` satisfies the search.
    fn is_goal(&self, state: Self::State) -> bool;

    /// Propose every state reachable from `from` through `exp`.
    ///
    /// This is where the problem consults its world model (walkability,
    /// occupancy) to decide which transitions are legal.
    fn expand<X: VisitedIndex<Self::State>>(
        &self,
        from: Self::State,
        exp: &mut Expander<'_, Self, X>,
    );
}

/// Incremental A* engine.
///
/// One engine serves one search at a time: `start_search` resets it,
/// `search_step` performs one expansion, and the blocking [`search`]
/// convenience drives it to a terminal status. Long searches are
/// time-sliced by the caller stepping across ticks; the engine itself
/// never blocks or yields.
///
/// Node records are recycled across searches (unless caching is turned
/// off), so a long-running simulation issuing many queries settles at the
/// high-water allocation of its largest search.
///
/// [`search`]: Searcher::search
pub struct Searcher<S: Copy, X: VisitedIndex<S>> {
    pub(crate) pool: NodePool<S>,
    pub(crate) open: Frontier,
    pub(crate) visited: X,
    pub(crate) cache_nodes: bool,
    pub(crate) active: bool,
    pub(crate) result: Option<SearchResult>,
}

impl<S: Copy, X: VisitedIndex<S> + Default> Searcher<S, X> {
    pub fn new() -> Self {
        Self::with_index(X::default())
    }
}

impl<S: Copy, X: VisitedIndex<S> + Default> Default for Searcher<S, X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Copy, X: VisitedIndex<S>> Searcher<S, X> {
    /// Build an engine around the given visited-state index.
    pub fn with_index(visited: X) -> Self {
        Self {
            pool: NodePool::new(),
            open: Frontier::new(),
            visited,
            cache_nodes: true,
            active: false,
            result: None,
        }
    }

    /// Whether finished searches return their records to the free list
    /// (default) or drop them outright at the next `start_search`.
    pub fn set_cache_nodes(&mut self, cache: bool) {
        self.cache_nodes = cache;
    }

    /// Read a node record. The handle must come from the current search.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node<S> {
        self.pool.get(id)
    }

    /// Endpoints of the current (or last finished) search.
    #[inline]
    pub fn result(&self) -> Option<SearchResult> {
        self.result
    }

    /// Total node records held by the engine, live and cached.
    #[inline]
    pub fn allocated_nodes(&self) -> usize {
        self.pool.allocated()
    }

    /// Node records sitting on the free list awaiting reuse.
    #[inline]
    pub fn cached_nodes(&self) -> usize {
        self.pool.free_count()
    }

    /// Reset the engine and seed it with `start`.
    ///
    /// Every record of the previous search is reclaimed: returned to the
    /// free list when caching is on, dropped otherwise. Abandoning a
    /// search mid-flight is exactly this call.
    ///
    /// Panics if `start` cannot be stored in the visited index (e.g. a
    /// coordinate outside a grid index's bounds) — a search seeded
    /// outside its own state space is a caller bug, not an exhaustion.
    pub fn start_search(&mut self, start: S) -> SearchResult {
        if self.cache_nodes {
            // Stale records live only in the queue; everything else is
            // reachable through the index.
            let pool = &mut self.pool;
            for entry in self.open.drain() {
                if pool.get(entry.id).stale {
                    pool.release(entry.id);
                }
            }
            self.visited.clear(|id| pool.release(id));
        } else {
            self.open.clear();
            self.visited.clear(|_| {});
            self.pool.reset();
        }
        debug_assert!(self.open.is_empty());

        let id = self.pool.acquire(start, 0, 0, None);
        let indexed = self.visited.insert(start, id);
        assert!(indexed, "start state is outside the visited-index bounds");
        self.open.push(OpenEntry { f: 0, g: 0, id });

        let result = SearchResult {
            start: id,
            goal: None,
        };
        self.result = Some(result);
        self.active = true;
        result
    }

    /// Perform one expansion.
    ///
    /// Pops the best open record (discarding and reclaiming any stale
    /// entries that surface first), closes it, tests it against the goal,
    /// and otherwise hands it to the strategy's expansion callback.
    ///
    /// Panics if called without an active search.
    pub fn search_step<P: Strategy<State = S>>(&mut self, strategy: &P) -> Status {
        assert!(
            self.active,
            "search_step on a finished engine; call start_search first"
        );
        loop {
            let Some(entry) = self.open.peek().copied() else {
                self.active = false;
                return Status::Fail;
            };
            self.open.pop();
            let id = entry.id;

            // Lazily reclaim superseded queue entries.
            if self.pool.get(id).stale {
                self.pool.release(id);
                continue;
            }

            let node = self.pool.get_mut(id);
            node.closed = true;
            let state = node.state;
            let g = node.g;

            if strategy.is_goal(state) {
                if let Some(result) = self.result.as_mut() {
                    result.goal = Some(id);
                }
                self.active = false;
                return Status::Success;
            }

            let mut exp = Expander {
                searcher: self,
                strategy,
                from: id,
                from_state: state,
                from_g: g,
            };
            strategy.expand(state, &mut exp);
            return Status::Searching;
        }
    }

    /// Run a whole search to completion; `true` on success.
    pub fn search<P: Strategy<State = S>>(&mut self, strategy: &P, start: S) -> bool {
        self.start_search(start);
        let mut steps: u64 = 0;
        loop {
            steps += 1;
            match self.search_step(strategy) {
                Status::Searching => {}
                Status::Success => {
                    log::debug!("search succeeded after {steps} expansions");
                    return true;
                }
                Status::Fail => {
                    log::debug!("search exhausted after {steps} expansions");
                    return false;
                }
            }
        }
    }

    /// Walk parent links from `goal` back to the start, invoking `visit`
    /// per node in goal→start order and marking each as on the path.
    /// Returns the number of nodes visited.
    pub fn reconstruct_path(&mut self, goal: NodeId, mut visit: impl FnMut(S)) -> usize {
        let mut count = 0;
        let mut cur = Some(goal);
        while let Some(id) = cur {
            let node = self.pool.get_mut(id);
            node.on_path = true;
            visit(node.state);
            count += 1;
            cur = node.parent;
        }
        count
    }

    /// Collect the solution as a start→goal sequence of states.
    pub fn collect_path(&mut self, goal: NodeId) -> Vec<S> {
        let mut path = Vec::new();
        self.reconstruct_path(goal, |s| path.push(s));
        path.reverse();
        path
    }

    /// The propose-neighbor protocol (reached via [`Expander`]).
    ///
    /// Keeps the invariant that at most one non-stale record per state is
    /// indexed at any time. Returns whether the proposal improved on what
    /// the search already knew.
    fn propose<P: Strategy<State = S>>(
        &mut self,
        strategy: &P,
        parent: NodeId,
        parent_g: i32,
        to: S,
        dist: i32,
    ) -> bool {
        let new_g = parent_g + dist;
        match self.visited.find(to, |a, b| strategy.states_eq(a, b)) {
            Some(id) => {
                if self.pool.get(id).g <= new_g {
                    return false;
                }
                let f = new_g + strategy.heuristic(to);
                if self.pool.get(id).closed {
                    // Reopen in place: the record keeps its identity, so
                    // outstanding handles to it stay valid. Its old queue
                    // entries are gone (closed means it was popped).
                    let node = self.pool.get_mut(id);
                    node.closed = false;
                    node.g = new_g;
                    node.f = f;
                    node.parent = Some(parent);
                    self.open.push(OpenEntry { f, g: new_g, id });
                } else {
                    // The heap has no decrease-key: supersede the open
                    // record and let its queue entry die lazily on pop.
                    self.visited.remove(to, id);
                    self.pool.get_mut(id).stale = true;
                    let fresh = self.pool.acquire(to, new_g, f, Some(parent));
                    let indexed = self.visited.insert(to, fresh);
                    debug_assert!(indexed);
                    self.open.push(OpenEntry {
                        f,
                        g: new_g,
                        id: fresh,
                    });
                }
                true
            }
            None => {
                let f = new_g + strategy.heuristic(to);
                let id = self.pool.acquire(to, new_g, f, Some(parent));
                if !self.visited.insert(to, id) {
                    // Unindexable state (e.g. outside the grid bounds):
                    // treated as unreachable.
                    self.pool.release(id);
                    return false;
                }
                self.open.push(OpenEntry { f, g: new_g, id });
                true
            }
        }
    }
}

/// Propose-neighbor context handed to [`Strategy::expand`].
///
/// The expansion callback calls [`propose`](Expander::propose) once per
/// reachable neighbor; the engine applies its reopen / lazy-stale protocol
/// and reports whether the proposal improved the search.
pub struct Expander<'a, P: Strategy, X: VisitedIndex<P::State>> {
    searcher: &'a mut Searcher<P::State, X>,
    strategy: &'a P,
    from: NodeId,
    from_state: P::State,
    from_g: i32,
}

impl<P: Strategy, X: VisitedIndex<P::State>> Expander<'_, P, X> {
    /// The state being expanded.
    #[inline]
    pub fn from_state(&self) -> P::State {
        self.from_state
    }

    /// Propose `to` at the strategy's step cost from the expanded state.
    pub fn propose(&mut self, to: P::State) -> bool {
        let dist = self.strategy.step_cost(self.from_state, to);
        self.propose_with_cost(to, dist)
    }

    /// Propose `to` at an explicit incremental cost.
    pub fn propose_with_cost(&mut self, to: P::State, dist: i32) -> bool {
        self.searcher
            .propose(self.strategy, self.from, self.from_g, to, dist)
    }
}
