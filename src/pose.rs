//! The mouse's current cell and heading, and the sole bridge between the
//! navigation layer and the actuator collaborator.

use crate::coord::{Coord, Heading};

/// The physical maneuver required to move from the current heading to a
/// requested heading and then one cell forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Maneuver {
    Forward,
    TurnRightThenForward,
    TurnLeftThenForward,
    UTurnThenForward,
}

impl Maneuver {
    /// The maneuver needed to go from facing `from` to moving in `to`.
    pub fn for_turn(from: Heading, to: Heading) -> Maneuver {
        if to == from {
            Maneuver::Forward
        } else if to == from.right() {
            Maneuver::TurnRightThenForward
        } else if to == from.left() {
            Maneuver::TurnLeftThenForward
        } else {
            Maneuver::UTurnThenForward
        }
    }
}

/// The actuator collaborator: blocking motion primitives the real firmware
/// implements with motor PID and encoder feedback. Out of scope here (see
/// the crate's top-level docs); this trait is the seam a test or simulation
/// plugs a fake implementation into.
pub trait Actuator {
    /// Advance one maze-square forward. Blocks until the maneuver completes.
    fn move_forward_one_cell(&mut self);
    /// Rotate in place 90 degrees left. Blocks until complete.
    fn turn_left_90(&mut self);
    /// Rotate in place 90 degrees right. Blocks until complete.
    fn turn_right_90(&mut self);
    /// Rotate in place 180 degrees. Blocks until complete.
    fn turn_180(&mut self);
    /// Optional alignment against a sensed front wall. Invoked
    /// opportunistically between navigation ticks, never by `Pose::step`
    /// itself.
    fn adjust_to_front_wall(&mut self) {}
}

/// The mouse's current cell coordinate and heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pose {
    pub coord: Coord,
    pub heading: Heading,
}

impl Pose {
    pub const fn new(coord: Coord, heading: Heading) -> Self {
        Pose { coord, heading }
    }

    pub const fn start() -> Self {
        Pose::new(Coord::new(0, 0), Heading::North)
    }

    /// Advances one cell in `direction`, driving the actuator collaborator
    /// through the maneuver that requires. The actuator call is blocking and
    /// strictly precedes the coordinate/heading update, so a sensor read
    /// concurrent with the maneuver still observes the pre-move pose.
    ///
    /// # Panics
    /// Panics if `direction` would step off the coordinate type's range
    /// (underflow past `(0, 0)`). Callers (the navigator) are expected to
    /// have already checked `MazeMap::is_in_range` on the destination before
    /// calling this; that check is the real precondition from the spec, and
    /// violating it is a caller bug, not a recoverable runtime condition.
    pub fn step(&mut self, actuator: &mut impl Actuator, direction: Heading) {
        let maneuver = Maneuver::for_turn(self.heading, direction);
        match maneuver {
            Maneuver::Forward => actuator.move_forward_one_cell(),
            Maneuver::TurnRightThenForward => {
                actuator.turn_right_90();
                actuator.move_forward_one_cell();
            }
            Maneuver::TurnLeftThenForward => {
                actuator.turn_left_90();
                actuator.move_forward_one_cell();
            }
            Maneuver::UTurnThenForward => {
                actuator.turn_180();
                actuator.move_forward_one_cell();
            }
        }

        self.coord = self
            .coord
            .neighbor(direction)
            .expect("Pose::step precondition: destination cell must be in range");
        self.heading = direction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingActuator {
        calls: Vec<&'static str>,
    }

    impl Actuator for RecordingActuator {
        fn move_forward_one_cell(&mut self) {
            self.calls.push("forward");
        }
        fn turn_left_90(&mut self) {
            self.calls.push("left");
        }
        fn turn_right_90(&mut self) {
            self.calls.push("right");
        }
        fn turn_180(&mut self) {
            self.calls.push("uturn");
        }
    }

    #[test]
    fn heading_rotation_sanity_scenario() {
        let mut actuator = RecordingActuator::default();
        let mut pose = Pose::start(); // (0,0) facing NORTH

        pose.step(&mut actuator, Heading::East);
        assert_eq!(pose.coord, Coord::new(1, 0));
        assert_eq!(pose.heading, Heading::East);
        assert_eq!(actuator.calls, vec!["right", "forward"]);

        actuator.calls.clear();
        pose.step(&mut actuator, Heading::North);
        assert_eq!(pose.coord, Coord::new(1, 1));
        assert_eq!(pose.heading, Heading::North);
        assert_eq!(actuator.calls, vec!["left", "forward"]);
    }

    #[test]
    fn straight_forward_issues_only_forward() {
        let mut actuator = RecordingActuator::default();
        let mut pose = Pose::start();
        pose.step(&mut actuator, Heading::North);
        assert_eq!(actuator.calls, vec!["forward"]);
    }

    #[test]
    fn reversing_issues_uturn() {
        let mut actuator = RecordingActuator::default();
        let mut pose = Pose::new(Coord::new(0, 1), Heading::North);
        pose.step(&mut actuator, Heading::South);
        assert_eq!(actuator.calls, vec!["uturn", "forward"]);
        assert_eq!(pose.coord, Coord::new(0, 0));
        assert_eq!(pose.heading, Heading::South);
    }

    #[test]
    fn heading_after_step_always_equals_requested_direction() {
        let mut actuator = RecordingActuator::default();
        for start_heading in Heading::ALL {
            for dir in Heading::ALL {
                let mut pose = Pose::new(Coord::new(2, 2), start_heading);
                pose.step(&mut actuator, dir);
                assert_eq!(pose.heading, dir);
            }
        }
    }
}
