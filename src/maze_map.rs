//! The persistent knowledge store: per-cell wall bits, the visited flag, and
//! the scratch cost field flood-fill writes into.
//!
//! Storage is a single dense `N*N` array allocated once at construction,
//! mirroring the way the teacher's own `Grid` type backs a maze with one
//! `Box<[_]>` sized at construction and never reallocated. The mapping from
//! `(x, y)` to array index mirrors the y axis, so storage row 0 is the
//! northernmost row; this is a display-order convention only and has no
//! effect on navigation behavior.

use crate::coord::{Coord, Heading};

/// Sentinel cost meaning "no known path from any target reaches this cell
/// under the current mode."
pub const UNREACHED: u16 = u16::MAX;

/// The four wall bits of a single cell, in the allocentric frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MazeCell {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl MazeCell {
    pub const fn wall(self, heading: Heading) -> bool {
        match heading {
            Heading::North => self.north,
            Heading::East => self.east,
            Heading::South => self.south,
            Heading::West => self.west,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CellRecord {
    walls: MazeCell,
    visited: bool,
    cost: u16,
}

impl Default for CellRecord {
    fn default() -> Self {
        CellRecord {
            walls: MazeCell::default(),
            visited: false,
            cost: UNREACHED,
        }
    }
}

/// An `N`-by-`N` maze map. `N` is fixed at compile time, matching the
/// "dimension is fixed at build time" non-goal: there is no dynamic maze
/// resize in this design.
pub struct MazeMap<const N: usize> {
    cells: Box<[CellRecord]>,
}

impl<const N: usize> MazeMap<N> {
    pub fn new() -> Self {
        assert!(N >= 2, "MAZE_LENGTH must be at least 2");
        assert!(N <= u8::MAX as usize + 1, "MAZE_LENGTH must fit in a Coord axis");
        MazeMap {
            cells: vec![CellRecord::default(); N * N].into_boxed_slice(),
        }
    }

    pub fn is_in_range(&self, p: Coord) -> bool {
        (p.x as usize) < N && (p.y as usize) < N
    }

    fn index(&self, p: Coord) -> usize {
        debug_assert!(self.is_in_range(p), "coordinate {p} out of range for N={N}");
        let row = N - 1 - p.y as usize;
        row * N + p.x as usize
    }

    pub fn walls(&self, p: Coord) -> MazeCell {
        self.cells[self.index(p)].walls
    }

    pub fn set_walls(&mut self, p: Coord, walls: MazeCell) {
        let i = self.index(p);
        self.cells[i].walls = walls;
    }

    pub fn visited(&self, p: Coord) -> bool {
        self.cells[self.index(p)].visited
    }

    pub fn mark_visited(&mut self, p: Coord) {
        let i = self.index(p);
        self.cells[i].visited = true;
    }

    pub fn cost(&self, p: Coord) -> u16 {
        self.cells[self.index(p)].cost
    }

    pub fn set_cost(&mut self, p: Coord, v: u16) {
        let i = self.index(p);
        self.cells[i].cost = v;
    }

    pub fn reset_costs(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.cost = UNREACHED;
        }
    }

    /// True iff a known wall separates `p` from its `heading` neighbor, as
    /// recorded at `p` itself. Per the wall-symmetry design note, this crate
    /// never eagerly mirrors a wall write to the neighboring cell; every
    /// caller that needs "is there a wall between A and B" consults the
    /// wall bits of the cell it is standing in, exactly as the reference
    /// algorithm does.
    pub fn wall_between(&self, p: Coord, heading: Heading) -> bool {
        self.walls(p).wall(heading)
    }
}

impl<const N: usize> Default for MazeMap<N> {
    fn default() -> Self {
        Self::new()
    }
}
