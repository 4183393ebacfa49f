use waypath_geom::{Point, Range};

use crate::distance::manhattan;
use crate::gridindex::GridIndex;
use crate::search::{Expander, Searcher, Strategy};
use crate::visited::VisitedIndex;

/// The engine bound to 2D integer-coordinate states with O(1) visited
/// lookups, as used by road/building pathfinders and map debugging tools.
pub type GridSearcher = Searcher<Point, GridIndex>;

impl Searcher<Point, GridIndex> {
    /// Build a grid searcher covering the given coordinate bounds.
    pub fn for_range(rng: Range) -> Self {
        Self::with_index(GridIndex::new(rng))
    }

    /// Replace the coordinate bounds, discarding any search in progress
    /// and all cached node records.
    pub fn set_range(&mut self, rng: Range) {
        self.visited.set_range(rng);
        self.open.clear();
        self.pool.reset();
        self.active = false;
        self.result = None;
    }
}

/// World-model boundary consulted by [`CardinalStrategy`].
///
/// Implemented by whatever owns the tile/building data; the engine only
/// ever asks these two questions.
pub trait GridWorld {
    /// Whether `p` can be entered at all.
    fn walkable(&self, p: Point) -> bool;

    /// Cost of stepping onto `p`. Must be ≥ 1 for the Manhattan heuristic
    /// to stay admissible.
    fn enter_cost(&self, _p: Point) -> i32 {
        1
    }
}

/// Ready-made strategy for 4-directional movement toward a fixed goal
/// cell, with a Manhattan heuristic.
///
/// Per-cell costs come from the world's `enter_cost` (a city pathfinder
/// makes roads cheaper than open ground through that hook).
pub struct CardinalStrategy<W> {
    pub world: W,
    pub goal: Point,
}

impl<W: GridWorld> CardinalStrategy<W> {
    pub fn new(world: W, goal: Point) -> Self {
        Self { world, goal }
    }
}

impl<W: GridWorld> Strategy for CardinalStrategy<W> {
    type State = Point;

    fn heuristic(&self, state: Point) -> i32 {
        manhattan(state, self.goal)
    }

    fn step_cost(&self, _from: Point, to: Point) -> i32 {
        self.world.enter_cost(to)
    }

    fn states_eq(&self, a: Point, b: Point) -> bool {
        a == b
    }

    fn is_goal(&self, state: Point) -> bool {
        state == self.goal
    }

    fn expand<X: VisitedIndex<Point>>(&self, from: Point, exp: &mut Expander<'_, Self, X>) {
        for n in from.neighbors_4() {
            if self.world.walkable(n) {
                exp.propose(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test world: a bounded grid with a blocked-cell list and an
    /// optional set of cheap "road" cells.
    struct MapWorld {
        rng: Range,
        blocked: Vec<Point>,
        roads: Vec<Point>,
        off_road_cost: i32,
    }

    impl MapWorld {
        fn open(rng: Range) -> Self {
            Self {
                rng,
                blocked: Vec::new(),
                roads: Vec::new(),
                off_road_cost: 1,
            }
        }
    }

    impl GridWorld for MapWorld {
        fn walkable(&self, p: Point) -> bool {
            self.rng.contains(p) && !self.blocked.contains(&p)
        }

        fn enter_cost(&self, p: Point) -> i32 {
            if self.roads.is_empty() || self.roads.contains(&p) {
                1
            } else {
                self.off_road_cost
            }
        }
    }

    fn grid5() -> Range {
        Range::new(0, 0, 5, 5)
    }

    #[test]
    fn open_grid_straight_shot() {
        let strategy = CardinalStrategy::new(MapWorld::open(grid5()), Point::new(4, 4));
        let mut searcher = GridSearcher::for_range(grid5());
        assert!(searcher.search(&strategy, Point::ZERO));
        let goal = searcher.result().unwrap().goal.unwrap();
        assert_eq!(searcher.node(goal).g(), 8);

        let path = searcher.collect_path(goal);
        assert_eq!(path.len(), 9);
        assert_eq!(path[0], Point::ZERO);
        assert_eq!(path[8], Point::new(4, 4));
        // Every hop is a single cardinal step.
        for pair in path.windows(2) {
            assert_eq!(manhattan(pair[0], pair[1]), 1);
        }
    }

    #[test]
    fn skirts_a_blocked_center() {
        // Center 3x3 block is unwalkable except its far corner; the
        // border route is still cost-minimal.
        let mut world = MapWorld::open(grid5());
        for p in Range::new(1, 1, 4, 4).iter() {
            if p != Point::new(3, 3) {
                world.blocked.push(p);
            }
        }
        let blocked = world.blocked.clone();
        let strategy = CardinalStrategy::new(world, Point::new(4, 4));
        let mut searcher = GridSearcher::for_range(grid5());
        assert!(searcher.search(&strategy, Point::ZERO));
        let goal = searcher.result().unwrap().goal.unwrap();
        assert_eq!(searcher.node(goal).g(), 8);
        let path = searcher.collect_path(goal);
        for p in &path {
            assert!(!blocked.contains(p), "path crosses blocked cell {p}");
        }
    }

    #[test]
    fn detours_past_a_wall_gap() {
        // Wall at x=2 with its only gap at the bottom: reaching (4,0)
        // costs far more than the Manhattan distance.
        let mut world = MapWorld::open(grid5());
        for y in 0..4 {
            world.blocked.push(Point::new(2, y));
        }
        let strategy = CardinalStrategy::new(world, Point::new(4, 0));
        let mut searcher = GridSearcher::for_range(grid5());
        assert!(searcher.search(&strategy, Point::ZERO));
        let goal = searcher.result().unwrap().goal.unwrap();
        assert_eq!(searcher.node(goal).g(), 12);
        let path = searcher.collect_path(goal);
        assert!(path.contains(&Point::new(2, 4)), "path must use the gap");
    }

    #[test]
    fn walled_off_goal_fails_cleanly() {
        let mut world = MapWorld::open(grid5());
        world.blocked.push(Point::new(3, 4));
        world.blocked.push(Point::new(4, 3));
        let strategy = CardinalStrategy::new(world, Point::new(4, 4));
        let mut searcher = GridSearcher::for_range(grid5());
        assert!(!searcher.search(&strategy, Point::ZERO));
        assert_eq!(searcher.result().unwrap().goal, None);
    }

    #[test]
    fn prefers_cheap_road_cells() {
        // Roads along the top row and right column at cost 1, everything
        // else costs 2: the L-shaped road route wins.
        let mut world = MapWorld::open(grid5());
        world.off_road_cost = 2;
        for x in 0..5 {
            world.roads.push(Point::new(x, 0));
        }
        for y in 1..5 {
            world.roads.push(Point::new(4, y));
        }
        let roads = world.roads.clone();
        let strategy = CardinalStrategy::new(world, Point::new(4, 4));
        let mut searcher = GridSearcher::for_range(grid5());
        assert!(searcher.search(&strategy, Point::ZERO));
        let goal = searcher.result().unwrap().goal.unwrap();
        assert_eq!(searcher.node(goal).g(), 8);
        let path = searcher.collect_path(goal);
        for p in &path {
            assert!(roads.contains(p) || *p == Point::ZERO, "left the road at {p}");
        }
    }

    #[test]
    fn engine_is_reusable_across_queries() {
        let strategy = CardinalStrategy::new(MapWorld::open(grid5()), Point::new(4, 4));
        let mut searcher = GridSearcher::for_range(grid5());
        let starts = [Point::ZERO, Point::new(2, 0), Point::new(0, 3)];
        let mut high_water = 0;
        for start in starts {
            assert!(searcher.search(&strategy, start));
            high_water = high_water.max(searcher.allocated_nodes());
        }
        // A second pass over the same queries allocates nothing new.
        for start in starts {
            assert!(searcher.search(&strategy, start));
            assert!(searcher.allocated_nodes() <= high_water);
        }
    }

    #[test]
    #[should_panic(expected = "outside the visited-index bounds")]
    fn out_of_bounds_start_is_fatal() {
        let strategy = CardinalStrategy::new(MapWorld::open(grid5()), Point::new(4, 4));
        let mut searcher = GridSearcher::for_range(grid5());
        searcher.search(&strategy, Point::new(9, 9));
    }

    #[test]
    fn set_range_resizes_and_resets() {
        let mut searcher = GridSearcher::for_range(grid5());
        let strategy = CardinalStrategy::new(MapWorld::open(grid5()), Point::new(4, 4));
        assert!(searcher.search(&strategy, Point::ZERO));

        let big = Range::new(0, 0, 12, 12);
        searcher.set_range(big);
        assert_eq!(searcher.allocated_nodes(), 0);
        assert!(searcher.result().is_none());

        let strategy = CardinalStrategy::new(MapWorld::open(big), Point::new(11, 11));
        assert!(searcher.search(&strategy, Point::ZERO));
        let goal = searcher.result().unwrap().goal.unwrap();
        assert_eq!(searcher.node(goal).g(), 22);
    }
}
