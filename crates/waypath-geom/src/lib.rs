//! Integer grid geometry for the waypath search engine.
//!
//! Provides [`Point`], a 2D integer coordinate in screen orientation
//! (x grows right, y grows down), and [`Range`], a half-open rectangle.
//! These are the state and bounds types used by the grid-specialized
//! searcher in `waypath-search`.

mod geom;

pub use geom::{Point, Range, RangeIter};
