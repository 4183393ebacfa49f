use waypath_geom::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible for 4-directional movement with per-step cost ≥ 1.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
///
/// Admissible for 8-directional movement with per-step cost ≥ 1.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}
