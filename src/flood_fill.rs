//! Recomputes the cost field as a breadth-first shortest path from a target
//! set, in either open or closed mode.
//!
//! The reference firmware computes this recursively, which is fine on a
//! desktop but stack-hungry on a microcontroller; this is the iterative,
//! explicit-queue rendition the design notes call preferable. Any algorithm
//! producing an identical cost field is conformant — this one is a plain
//! level-order BFS over a `VecDeque`.

use std::collections::VecDeque;

use crate::coord::{Coord, Heading};
use crate::maze_map::MazeMap;

/// Which cells flood-fill is allowed to traverse through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloodMode {
    /// Unvisited cells are treated as reachable (unknown walls are absent).
    /// Used during exploration so unexplored regions look attractively
    /// reachable.
    Open,
    /// Only visited cells are traversable. Used during speed runs, where
    /// every step must be on verified ground.
    Closed,
}

impl FloodMode {
    fn admits<const N: usize>(self, map: &MazeMap<N>, p: Coord) -> bool {
        match self {
            FloodMode::Open => true,
            FloodMode::Closed => map.visited(p),
        }
    }
}

/// Recomputes `map`'s entire cost field from scratch: every cell becomes the
/// minimum number of cell-to-cell transitions from some cell in `targets`,
/// using only edges `mode` admits, or stays `UNREACHED` if no such path
/// exists. Targets that do not themselves qualify under `mode` (a target
/// that isn't visited, in closed mode) are skipped as seeds.
pub fn flood_fill<const N: usize>(map: &mut MazeMap<N>, targets: &[Coord], mode: FloodMode) {
    map.reset_costs();
    let mut queue: VecDeque<Coord> = VecDeque::new();

    for &target in targets {
        if !map.is_in_range(target) || !mode.admits(map, target) {
            continue;
        }
        if map.cost(target) != 0 {
            map.set_cost(target, 0);
            queue.push_back(target);
        }
    }

    while let Some(current) = queue.pop_front() {
        let next_cost = map.cost(current) + 1;
        for heading in Heading::ALL {
            let Some(neighbor) = current.neighbor(heading) else {
                continue;
            };
            if !map.is_in_range(neighbor) {
                continue;
            }
            // Only the wall bits recorded at `current` are consulted, per
            // the wall-symmetry design note: this is correct because every
            // caller that walks an edge does so from the cell it is
            // physically standing in.
            if map.wall_between(current, heading) {
                continue;
            }
            if !mode.admits(map, neighbor) {
                continue;
            }
            if map.cost(neighbor) > next_cost {
                map.set_cost(neighbor, next_cost);
                queue.push_back(neighbor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze_map::UNREACHED;

    fn visit_all<const N: usize>(map: &mut MazeMap<N>) {
        for y in 0..N as u8 {
            for x in 0..N as u8 {
                map.mark_visited(Coord::new(x, y));
            }
        }
    }

    #[test]
    fn open_mode_on_empty_maze_matches_manhattan_distance() {
        let mut map: MazeMap<5> = MazeMap::new();
        flood_fill(&mut map, &[Coord::new(2, 2)], FloodMode::Open);
        for y in 0..5u8 {
            for x in 0..5u8 {
                let expected = (x as i32 - 2).unsigned_abs() + (y as i32 - 2).unsigned_abs();
                assert_eq!(map.cost(Coord::new(x, y)), expected as u16);
            }
        }
    }

    #[test]
    fn closed_mode_on_fresh_map_leaves_everything_unreached() {
        let mut map: MazeMap<5> = MazeMap::new();
        flood_fill(&mut map, &[Coord::new(2, 2)], FloodMode::Closed);
        for y in 0..5u8 {
            for x in 0..5u8 {
                assert_eq!(map.cost(Coord::new(x, y)), UNREACHED);
            }
        }
    }

    #[test]
    fn closed_mode_on_fully_visited_map_matches_manhattan_distance() {
        let mut map: MazeMap<5> = MazeMap::new();
        visit_all(&mut map);
        flood_fill(&mut map, &[Coord::new(2, 2)], FloodMode::Closed);
        for y in 0..5u8 {
            for x in 0..5u8 {
                let expected = (x as i32 - 2).unsigned_abs() + (y as i32 - 2).unsigned_abs();
                assert_eq!(map.cost(Coord::new(x, y)), expected as u16);
            }
        }
    }

    #[test]
    fn wall_blocks_traversal() {
        let mut map: MazeMap<3> = MazeMap::new();
        // Wall off (0,0) from (1,0) and (0,1): the only way out is nowhere.
        map.set_walls(
            Coord::new(0, 0),
            crate::maze_map::MazeCell {
                north: true,
                east: true,
                south: true,
                west: true,
            },
        );
        flood_fill(&mut map, &[Coord::new(2, 2)], FloodMode::Open);
        assert_eq!(map.cost(Coord::new(0, 0)), UNREACHED);
    }

    #[test]
    fn repeated_flood_fill_is_idempotent() {
        let mut map: MazeMap<5> = MazeMap::new();
        flood_fill(&mut map, &[Coord::new(2, 2)], FloodMode::Open);
        let first: Vec<u16> = (0..5u8)
            .flat_map(|y| (0..5u8).map(move |x| Coord::new(x, y)))
            .map(|c| map.cost(c))
            .collect();
        flood_fill(&mut map, &[Coord::new(2, 2)], FloodMode::Open);
        let second: Vec<u16> = (0..5u8)
            .flat_map(|y| (0..5u8).map(move |x| Coord::new(x, y)))
            .map(|c| map.cost(c))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn unreachable_target_in_closed_mode_is_skipped_as_seed() {
        let mut map: MazeMap<5> = MazeMap::new();
        map.mark_visited(Coord::new(0, 0));
        // (2,2) is not visited, so closed mode must not seed from it.
        flood_fill(&mut map, &[Coord::new(2, 2)], FloodMode::Closed);
        assert_eq!(map.cost(Coord::new(0, 0)), UNREACHED);
    }
}
