//! Standalone path-debugging tool.
//!
//! Runs the grid searcher over an ASCII map and prints the result with the
//! found path overlaid. Map legend: `@` start, `>` goal, `#` wall,
//! `.` open ground (cost 1), `~` rough ground (cost 3).
//!
//! Run: cargo run --bin pathdebug
//! Or on a random map: cargo run --bin pathdebug -- --random 30 12 25 [seed]

use rand::{RngExt, SeedableRng};
use waypath_geom::{Point, Range};
use waypath_search::{CardinalStrategy, GridSearcher, GridWorld};

const DEFAULT_MAP: &str = "\
@....#....~~~.......
.....#....~~~..####.
.....#....~~~..#....
..####....~~~..#.##.
..........~~~..#.#>.
..####.....~...#.#..
..#...........##.#..
..#..######........#
.....#.........##..#
.....#..........#...";

struct AsciiMap {
    rng: Range,
    cells: Vec<char>,
    start: Point,
    goal: Point,
}

impl AsciiMap {
    fn parse(text: &str) -> AsciiMap {
        let lines: Vec<&str> = text.lines().collect();
        let height = lines.len() as i32;
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
        let rng = Range::new(0, 0, width, height);

        let mut cells = vec!['#'; rng.len()];
        let mut start = Point::ZERO;
        let mut goal = Point::ZERO;
        for (y, line) in lines.iter().enumerate() {
            for (x, c) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match c {
                    '@' => start = p,
                    '>' => goal = p,
                    _ => {}
                }
                cells[(y as i32 * width + x as i32) as usize] = c;
            }
        }
        AsciiMap {
            rng,
            cells,
            start,
            goal,
        }
    }

    fn random(width: i32, height: i32, wall_pct: u32, seed: u64) -> AsciiMap {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        // A map needs at least one cell for the start/goal markers.
        let bounds = Range::new(0, 0, width.max(1), height.max(1));
        let mut cells: Vec<char> = bounds
            .iter()
            .map(|_| {
                let roll = rng.random_range(0..100u32);
                if roll < wall_pct {
                    '#'
                } else if roll < wall_pct + 10 {
                    '~'
                } else {
                    '.'
                }
            })
            .collect();
        let start = Point::ZERO;
        let goal = Point::new(bounds.max.x - 1, bounds.max.y - 1);
        let last = cells.len() - 1;
        cells[0] = '@';
        cells[last] = '>';
        AsciiMap {
            rng: bounds,
            cells,
            start,
            goal,
        }
    }

    fn at(&self, p: Point) -> char {
        self.cells[(p.y * self.rng.width() + p.x) as usize]
    }

    fn render(&self, path: &[Point]) {
        for y in 0..self.rng.height() {
            let mut line = String::new();
            for x in 0..self.rng.width() {
                let p = Point::new(x, y);
                let c = self.at(p);
                if path.contains(&p) && c != '@' && c != '>' {
                    line.push('*');
                } else {
                    line.push(c);
                }
            }
            println!("{line}");
        }
    }
}

impl GridWorld for &AsciiMap {
    fn walkable(&self, p: Point) -> bool {
        self.rng.contains(p) && self.at(p) != '#'
    }

    fn enter_cost(&self, p: Point) -> i32 {
        if self.at(p) == '~' { 3 } else { 1 }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let map = if args.first().map(String::as_str) == Some("--random") {
        let width: i32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(30);
        let height: i32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(12);
        let wall_pct: u32 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(25);
        let seed: u64 = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(42);
        AsciiMap::random(width, height, wall_pct, seed)
    } else {
        AsciiMap::parse(DEFAULT_MAP)
    };

    let strategy = CardinalStrategy::new(&map, map.goal);
    let mut searcher = GridSearcher::for_range(map.rng);
    if !searcher.search(&strategy, map.start) {
        map.render(&[]);
        println!("no path from {} to {}", map.start, map.goal);
        std::process::exit(1);
    }

    let goal = searcher
        .result()
        .and_then(|r| r.goal)
        .expect("successful search has a goal node");
    let cost = searcher.node(goal).g();
    let path = searcher.collect_path(goal);
    map.render(&path);
    println!(
        "path {} -> {}: cost {cost}, {} steps",
        map.start,
        map.goal,
        path.len() - 1
    );
}
