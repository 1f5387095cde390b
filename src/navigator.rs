//! Per-step decision logic: `search_step` explores with backtracking via the
//! move stack, `run_step` follows a precomputed cost gradient through
//! verified ground only.

use crate::coord::{Coord, GoalSet, Heading};
use crate::error::NavError;
use crate::flood_fill::{flood_fill, FloodMode};
use crate::maze_map::MazeMap;
use crate::move_stack::MoveStack;
use crate::perception::{sense_walls, Perception};
use crate::pose::{Actuator, Pose};

/// Exploration-with-backtracking and gradient-following step logic, plus the
/// move stack that makes backtracking possible. `N` is the maze side length
/// and `CAP` the move stack's fixed capacity (at least `N * N`).
pub struct Navigator<const N: usize, const CAP: usize> {
    stack: MoveStack<CAP>,
}

impl<const N: usize, const CAP: usize> Navigator<N, CAP> {
    pub fn new() -> Self {
        const {
            assert!(CAP >= N * N, "STACK_SIZE must be at least MAZE_LENGTH * MAZE_LENGTH");
        }
        Navigator {
            stack: MoveStack::new(),
        }
    }

    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    /// Picks the strictly-lowest-cost open neighbor whose visited state
    /// matches `require_visited`, scanning in the fixed N-E-S-W order so
    /// ties resolve to the first (lowest-indexed-by-scan) candidate.
    fn best_neighbor(map: &MazeMap<N>, at: Coord, require_visited: bool) -> Option<Heading> {
        let walls = map.walls(at);
        let mut best: Option<(Heading, u16)> = None;
        for heading in Heading::ALL {
            if walls.wall(heading) {
                continue;
            }
            let Some(neighbor) = at.neighbor(heading) else {
                continue;
            };
            if !map.is_in_range(neighbor) {
                continue;
            }
            if map.visited(neighbor) != require_visited {
                continue;
            }
            let cost = map.cost(neighbor);
            match best {
                Some((_, best_cost)) if cost >= best_cost => {}
                _ => best = Some((heading, cost)),
            }
        }
        best.map(|(heading, _)| heading)
    }

    /// Exploration step: advances toward the lowest-cost unvisited open
    /// neighbor, discovering and flood-filling as it goes, and backtracks
    /// along the move stack when no such neighbor exists. Returns `true`
    /// once the mouse occupies a cell in `goals`.
    pub fn search_step(
        &mut self,
        map: &mut MazeMap<N>,
        pose: &mut Pose,
        actuator: &mut impl Actuator,
        perception: &mut impl Perception,
        goals: &GoalSet,
    ) -> Result<bool, NavError> {
        if goals.contains(pose.coord) {
            return Ok(true);
        }

        if !map.visited(pose.coord) {
            let walls = sense_walls(perception, pose.heading, pose.coord);
            map.set_walls(pose.coord, walls);
            map.mark_visited(pose.coord);
            flood_fill(map, goals.as_slice(), FloodMode::Open);
            tracing::debug!(cell = %pose.coord, ?walls, "search: discovered new cell");
        }

        match Self::best_neighbor(map, pose.coord, false) {
            Some(heading) => {
                pose.step(actuator, heading);
                self.stack.push(heading)?;
                tracing::debug!(%heading, to = %pose.coord, "search: advanced to unvisited neighbor");
            }
            None => {
                let reverse = self.stack.pop()?.opposite();
                pose.step(actuator, reverse);
                tracing::debug!(%reverse, to = %pose.coord, "search: backtracked");
            }
        }

        if goals.contains(pose.coord) {
            let walls = sense_walls(perception, pose.heading, pose.coord);
            map.set_walls(pose.coord, walls);
            map.mark_visited(pose.coord);
            return Ok(true);
        }
        Ok(false)
    }

    /// Speed-run step: follows the cost gradient through visited cells only.
    /// Never touches flood-fill or the move stack. Precondition: the cost
    /// field was freshly computed in closed mode toward `goals` when this
    /// phase began, and the goal is still reachable from the current cell —
    /// a violation is a caller bug (a malformed map), not a recoverable
    /// runtime condition, the same way an out-of-range neighbor is.
    pub fn run_step(
        &self,
        map: &MazeMap<N>,
        pose: &mut Pose,
        actuator: &mut impl Actuator,
        goals: &GoalSet,
    ) -> bool {
        if goals.contains(pose.coord) {
            return true;
        }

        let heading = Self::best_neighbor(map, pose.coord, true)
            .expect("run_step precondition violated: no reachable visited neighbor toward goal");
        pose.step(actuator, heading);
        tracing::debug!(%heading, to = %pose.coord, "run: advanced along gradient");

        goals.contains(pose.coord)
    }
}

impl<const N: usize, const CAP: usize> Default for Navigator<N, CAP> {
    fn default() -> Self {
        Self::new()
    }
}
