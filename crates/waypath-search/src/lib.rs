//! Incremental A* search engine for grid-based simulations.
//!
//! The engine is a reusable algorithmic kernel: a long-running simulation
//! (city movement, logistics queries) constructs one [`Searcher`] per
//! concurrent query stream and drives it one search at a time, either to
//! completion via [`Searcher::search`] or expansion-by-expansion via
//! [`Searcher::start_search`] / [`Searcher::search_step`] so the caller
//! can time-slice long searches across simulation ticks.
//!
//! Problem specifics — heuristic, step costs, goal test, neighbor
//! expansion — come from a [`Strategy`] implementation; visited-state
//! lookup comes from a [`VisitedIndex`] chosen at construction:
//!
//! | Index | Lookup | Suited to |
//! |---|---|---|
//! | [`LinearIndex`] | O(n) scan with the strategy's equality | small or non-spatial state spaces |
//! | [`GridIndex`] | O(1) generation-stamped array | bounded integer-coordinate spaces |
//!
//! Node records are recycled across searches through an internal pool
//! ([`NodePool`]), so repeated queries settle at the high-water allocation
//! of the largest search. The open queue has no decrease-key; score
//! improvements reopen closed records in place and lazily invalidate
//! superseded open ones.
//!
//! [`GridSearcher`] binds everything together for 2D maps, with
//! [`CardinalStrategy`] providing Manhattan-heuristic 4-way movement over
//! a caller-supplied [`GridWorld`].

mod distance;
mod grid;
mod gridindex;
mod node;
mod open;
mod pool;
mod search;
mod visited;

pub use distance::{chebyshev, manhattan};
pub use grid::{CardinalStrategy, GridSearcher, GridWorld};
pub use gridindex::GridIndex;
pub use node::{Node, NodeId};
pub use pool::NodePool;
pub use search::{Expander, SearchResult, Searcher, Status, Strategy};
pub use visited::{LinearIndex, VisitedIndex};
