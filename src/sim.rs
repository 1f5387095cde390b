//! Ground-truth maze generation and simulated hardware collaborators, for
//! demonstrating the navigation core without a physical mouse.
//!
//! The generators here carve a perfect maze (no loops, a unique path between
//! any two cells) directly into a [`MazeMap`]'s wall bits, the same data
//! structure the navigator's own incremental map uses — the only difference
//! is that a ground-truth map has every wall filled in from the start and is
//! never read through its `visited`/`cost` fields, which stay at their
//! defaults and are simply ignored.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_set::RandSetDefault;

use crate::coord::{Coord, Heading};
use crate::maze_map::{MazeCell, MazeMap};
use crate::perception::{Perception, WallReading};
use crate::pose::Actuator;

/// Which carving algorithm to run. The reference visualizer this is
/// descended from offers four; only the two that are genuinely different in
/// character (depth-first vs. frontier-based) are reproduced here, since a
/// demo only needs variety, not the full survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationAlgorithm {
    RecursiveBacktrack,
    Prim,
}

fn seed_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

fn fill_all_walls<const N: usize>(map: &mut MazeMap<N>) {
    let wall = MazeCell {
        north: true,
        east: true,
        south: true,
        west: true,
    };
    for y in 0..N as u8 {
        for x in 0..N as u8 {
            map.set_walls(Coord::new(x, y), wall);
        }
    }
}

fn set_wall(cell: &mut MazeCell, heading: Heading, present: bool) {
    match heading {
        Heading::North => cell.north = present,
        Heading::East => cell.east = present,
        Heading::South => cell.south = present,
        Heading::West => cell.west = present,
    }
}

/// Carves a passage between two adjacent cells by clearing the matching wall
/// bit on both sides — ground truth is physical, so unlike the navigator's
/// own map (which only ever records what it has locally sensed), it must
/// stay symmetric.
fn carve<const N: usize>(map: &mut MazeMap<N>, from: Coord, heading: Heading) {
    let mut a = map.walls(from);
    set_wall(&mut a, heading, false);
    map.set_walls(from, a);

    let to = from
        .neighbor(heading)
        .expect("carve: heading must point to an in-range neighbor");
    let mut b = map.walls(to);
    set_wall(&mut b, heading.opposite(), false);
    map.set_walls(to, b);
}

fn neighbors<const N: usize>(map: &MazeMap<N>, at: Coord) -> impl Iterator<Item = (Heading, Coord)> + '_ {
    Heading::ALL.into_iter().filter_map(move |heading| {
        at.neighbor(heading)
            .filter(|&c| map.is_in_range(c))
            .map(|c| (heading, c))
    })
}

/// Randomized depth-first carve: a stack of cells still being explored, each
/// popped cell trying a random unvisited neighbor and pushing both back so
/// the other neighbors get a turn later. Grounded on the same "push current,
/// then push the neighbor" shape as a standard recursive-backtracker maze
/// generator, adapted to carve wall bits instead of a double-resolution
/// display grid.
fn carve_recursive_backtrack<const N: usize>(map: &mut MazeMap<N>, seed: Option<u64>) {
    let mut rng = seed_rng(seed);
    let mut carved = vec![false; N * N];
    let index = |c: Coord| c.y as usize * N + c.x as usize;

    let start = Coord::new(rng.random_range(0..N as u8), rng.random_range(0..N as u8));
    carved[index(start)] = true;
    let mut stack = vec![start];

    while let Some(cell) = stack.pop() {
        let candidates: Vec<(Heading, Coord)> = neighbors(map, cell)
            .filter(|&(_, c)| !carved[index(c)])
            .collect();
        if candidates.is_empty() {
            continue;
        }
        let (heading, next) = candidates[rng.random_range(0..candidates.len())];
        carve(map, cell, heading);
        carved[index(next)] = true;
        stack.push(cell);
        stack.push(next);
    }
}

/// Randomized Prim's: grow a frontier set of cells adjacent to the carved
/// region, repeatedly picking a random frontier cell and connecting it to
/// one random already-carved neighbor. `rand_set::RandSetDefault` gives O(1)
/// random removal from that frontier, the same role it plays in the
/// reference visualizer's version of this algorithm.
fn carve_prim<const N: usize>(map: &mut MazeMap<N>, seed: Option<u64>) {
    let mut rng = seed_rng(seed);
    let mut carved = vec![false; N * N];
    let index = |c: Coord| c.y as usize * N + c.x as usize;

    let start = Coord::new(rng.random_range(0..N as u8), rng.random_range(0..N as u8));
    carved[index(start)] = true;

    let mut frontier: RandSetDefault<Coord> = neighbors(map, start)
        .map(|(_, c)| c)
        .filter(|&c| !carved[index(c)])
        .collect();

    while let Some(&cell) = frontier.get_rand() {
        frontier.remove(&cell);
        if carved[index(cell)] {
            continue;
        }

        let carved_neighbors: Vec<(Heading, Coord)> = neighbors(map, cell)
            .filter(|&(_, c)| carved[index(c)])
            .collect();
        if let Some(&(heading, _)) = carved_neighbors.get(rng.random_range(0..carved_neighbors.len().max(1))) {
            if !carved_neighbors.is_empty() {
                carve(map, cell, heading.opposite());
                carved[index(cell)] = true;
            }
        }

        for (_, next) in neighbors(map, cell) {
            if !carved[index(next)] {
                frontier.insert(next);
            }
        }
    }
}

/// Generates a fresh perfect maze of side length `N`. A fixed `seed`
/// reproduces the same layout across runs; `None` draws from the OS RNG.
pub fn generate<const N: usize>(algorithm: GenerationAlgorithm, seed: Option<u64>) -> MazeMap<N> {
    let mut map = MazeMap::new();
    fill_all_walls(&mut map);
    match algorithm {
        GenerationAlgorithm::RecursiveBacktrack => carve_recursive_backtrack(&mut map, seed),
        GenerationAlgorithm::Prim => carve_prim(&mut map, seed),
    }
    map
}

/// A `Perception` backed directly by a ground-truth map instead of IR
/// rangefinders. Constructed fresh for each sensing call with the mouse's
/// current pose, since it borrows the ground truth rather than owning it.
pub struct SimulatedPerception<'a, const N: usize> {
    truth: &'a MazeMap<N>,
    heading: Heading,
    coord: Coord,
}

impl<'a, const N: usize> SimulatedPerception<'a, N> {
    pub fn new(truth: &'a MazeMap<N>, coord: Coord, heading: Heading) -> Self {
        SimulatedPerception {
            truth,
            heading,
            coord,
        }
    }
}

impl<'a, const N: usize> Perception for SimulatedPerception<'a, N> {
    fn check_front_wall(&mut self) -> WallReading {
        reading(self.truth.wall_between(self.coord, self.heading))
    }
    fn check_left_wall(&mut self) -> WallReading {
        reading(self.truth.wall_between(self.coord, self.heading.left()))
    }
    fn check_right_wall(&mut self) -> WallReading {
        reading(self.truth.wall_between(self.coord, self.heading.right()))
    }
}

fn reading(is_wall: bool) -> WallReading {
    if is_wall {
        WallReading::Found
    } else {
        WallReading::NotFound
    }
}

/// An `Actuator` with nothing to drive. The simulation's pose already
/// advances inside `Pose::step` regardless of what the actuator does; this
/// exists purely to satisfy the trait bound `Mission::iterate` requires.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedActuator;

impl Actuator for SimulatedActuator {
    fn move_forward_one_cell(&mut self) {}
    fn turn_left_90(&mut self) {}
    fn turn_right_90(&mut self) {}
    fn turn_180(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_open_edges<const N: usize>(map: &MazeMap<N>) -> usize {
        let mut count = 0;
        for y in 0..N as u8 {
            for x in 0..N as u8 {
                let c = Coord::new(x, y);
                for heading in [Heading::North, Heading::East] {
                    if !map.wall_between(c, heading) && c.neighbor(heading).is_some_and(|n| map.is_in_range(n))
                    {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    fn reachable_count<const N: usize>(map: &MazeMap<N>, start: Coord) -> usize {
        let mut seen = vec![false; N * N];
        let index = |c: Coord| c.y as usize * N + c.x as usize;
        let mut stack = vec![start];
        seen[index(start)] = true;
        let mut total = 1;
        while let Some(cell) = stack.pop() {
            for heading in Heading::ALL {
                if map.wall_between(cell, heading) {
                    continue;
                }
                if let Some(n) = cell.neighbor(heading).filter(|&n| map.is_in_range(n)) {
                    if !seen[index(n)] {
                        seen[index(n)] = true;
                        total += 1;
                        stack.push(n);
                    }
                }
            }
        }
        total
    }

    #[test]
    fn recursive_backtrack_produces_a_fully_connected_perfect_maze() {
        let map: MazeMap<8> = generate(GenerationAlgorithm::RecursiveBacktrack, Some(42));
        assert_eq!(reachable_count(&map, Coord::new(0, 0)), 64);
        // A perfect maze on N*N cells has exactly N*N - 1 open edges.
        assert_eq!(count_open_edges(&map), 63);
    }

    #[test]
    fn prim_produces_a_fully_connected_maze() {
        let map: MazeMap<8> = generate(GenerationAlgorithm::Prim, Some(7));
        assert_eq!(reachable_count(&map, Coord::new(0, 0)), 64);
    }

    #[test]
    fn generated_walls_are_symmetric() {
        let map: MazeMap<6> = generate(GenerationAlgorithm::RecursiveBacktrack, Some(1));
        for y in 0..6u8 {
            for x in 0..6u8 {
                let c = Coord::new(x, y);
                for heading in Heading::ALL {
                    if let Some(n) = c.neighbor(heading).filter(|&n| map.is_in_range(n)) {
                        assert_eq!(
                            map.wall_between(c, heading),
                            map.wall_between(n, heading.opposite()),
                            "wall between {c} and {n} must agree from both sides"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_maze() {
        let a: MazeMap<8> = generate(GenerationAlgorithm::RecursiveBacktrack, Some(99));
        let b: MazeMap<8> = generate(GenerationAlgorithm::RecursiveBacktrack, Some(99));
        for y in 0..8u8 {
            for x in 0..8u8 {
                let c = Coord::new(x, y);
                assert_eq!(a.walls(c), b.walls(c));
            }
        }
    }
}
