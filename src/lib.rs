//! Flood-fill navigation core for an autonomous micromouse.
//!
//! This crate is the algorithm layer only: an incremental map of a square
//! maze, a breadth-first flood-fill over it, a per-step navigator that
//! explores with backtracking or follows a cost gradient, and the mission
//! state machine that sequences first traversal, return-to-start, and the
//! closed-mode speed run. Everything that actually drives motors or reads
//! rangefinders lives behind the [`pose::Actuator`] and [`perception::Perception`]
//! traits, which this crate only calls through — a real binary supplies the
//! hardware-backed implementations, and a simulation can supply fakes.
//!
//! Maze dimension and move-stack capacity are const generics rather than
//! runtime fields: both are fixed at build time for a given robot, the same
//! way the reference firmware compiles them in as preprocessor constants.

pub mod coord;
pub mod error;
pub mod flood_fill;
pub mod maze_map;
pub mod mission;
pub mod move_stack;
pub mod navigator;
pub mod perception;
pub mod pose;
pub mod sim;

pub use coord::{Coord, GoalSet, Heading};
pub use error::NavError;
pub use flood_fill::{flood_fill, FloodMode};
pub use maze_map::{MazeCell, MazeMap, UNREACHED};
pub use mission::{Mission, MissionState};
pub use move_stack::MoveStack;
pub use navigator::Navigator;
pub use perception::{sense_walls, Perception, WallReading};
pub use pose::{Actuator, Maneuver, Pose};
