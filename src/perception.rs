//! The perception collaborator and the egocentric-to-allocentric wall
//! sensing it feeds into.
//!
//! The mouse's rangefinders report walls relative to its own body
//! (front/left/right); the rear has no sensor at all. [`sense_walls`]
//! rotates that egocentric reading into the allocentric north/east/south/west
//! frame [`crate::maze_map::MazeMap`] stores, using the current heading as
//! the rotation.

use crate::coord::{Coord, Heading};
use crate::maze_map::MazeCell;

/// A single rangefinder reading. `Unavailable` covers both "sensor disabled"
/// and "out of reliable range"; the navigator treats it identically to
/// `NotFound`, though the actuator-level wall-following PID (out of scope
/// here) may care about the distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallReading {
    Found,
    NotFound,
    Unavailable,
}

impl WallReading {
    fn is_wall(self) -> bool {
        matches!(self, WallReading::Found)
    }
}

/// The perception collaborator: wall-distance sensing via IR rangefinders in
/// the real firmware. Out of scope here; this trait is the seam a test or
/// simulation plugs a fake implementation into.
pub trait Perception {
    fn check_front_wall(&mut self) -> WallReading;
    fn check_left_wall(&mut self) -> WallReading;
    fn check_right_wall(&mut self) -> WallReading;
}

/// Reads the three available sensors and rotates them into the allocentric
/// frame for `coord`, given the mouse is currently facing `heading`.
///
/// There is no rear sensor. The convention — preserved verbatim from the
/// source firmware rather than synthesized — is that the back wall is
/// considered present iff `coord` is the start cell `(0, 0)`; at every other
/// cell the back wall reads as absent regardless of what is actually there.
/// The navigator never needs to know the true back wall of any cell other
/// than the start, so this never surfaces as a bug.
pub fn sense_walls(perception: &mut impl Perception, heading: Heading, coord: Coord) -> MazeCell {
    let front = perception.check_front_wall().is_wall();
    let left = perception.check_left_wall().is_wall();
    let right = perception.check_right_wall().is_wall();
    let back = coord == Coord::new(0, 0);

    match heading {
        Heading::North => MazeCell {
            north: front,
            east: right,
            south: back,
            west: left,
        },
        Heading::East => MazeCell {
            north: left,
            east: front,
            south: right,
            west: back,
        },
        Heading::South => MazeCell {
            north: back,
            east: left,
            south: front,
            west: right,
        },
        Heading::West => MazeCell {
            north: right,
            east: back,
            south: left,
            west: front,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPerception {
        front: WallReading,
        left: WallReading,
        right: WallReading,
    }

    impl Perception for FixedPerception {
        fn check_front_wall(&mut self) -> WallReading {
            self.front
        }
        fn check_left_wall(&mut self) -> WallReading {
            self.left
        }
        fn check_right_wall(&mut self) -> WallReading {
            self.right
        }
    }

    #[test]
    fn facing_north_maps_front_right_left_directly() {
        let mut p = FixedPerception {
            front: WallReading::Found,
            left: WallReading::NotFound,
            right: WallReading::Found,
        };
        let walls = sense_walls(&mut p, Heading::North, Coord::new(2, 2));
        assert_eq!(
            walls,
            MazeCell {
                north: true,
                east: true,
                south: false,
                west: false,
            }
        );
    }

    #[test]
    fn back_wall_true_only_at_origin() {
        let mut p = FixedPerception {
            front: WallReading::NotFound,
            left: WallReading::NotFound,
            right: WallReading::NotFound,
        };
        let at_origin = sense_walls(&mut p, Heading::North, Coord::new(0, 0));
        assert!(at_origin.south);

        let elsewhere = sense_walls(&mut p, Heading::North, Coord::new(1, 1));
        assert!(!elsewhere.south);
    }

    #[test]
    fn unavailable_reads_as_no_wall() {
        let mut p = FixedPerception {
            front: WallReading::Unavailable,
            left: WallReading::Unavailable,
            right: WallReading::Unavailable,
        };
        let walls = sense_walls(&mut p, Heading::East, Coord::new(3, 3));
        assert!(!walls.north && !walls.east && !walls.south && !walls.west);
    }

    #[test]
    fn rotation_table_matches_all_headings() {
        let mut found_front = FixedPerception {
            front: WallReading::Found,
            left: WallReading::NotFound,
            right: WallReading::NotFound,
        };
        // A "found" front-wall reading lands on the heading itself.
        assert!(sense_walls(&mut found_front, Heading::North, Coord::new(1, 1)).north);
        assert!(sense_walls(&mut found_front, Heading::East, Coord::new(1, 1)).east);
        assert!(sense_walls(&mut found_front, Heading::South, Coord::new(1, 1)).south);
        assert!(sense_walls(&mut found_front, Heading::West, Coord::new(1, 1)).west);
    }
}
