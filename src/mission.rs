//! The top-level phase sequencer: first traversal to the center, backtrack to
//! the start, then a closed-mode speed run back to the center.
//!
//! Mirrors the reference firmware's `algoIterate` dispatch: each phase is a
//! tagged variant rather than a trait object (no virtual dispatch needed for
//! four fixed phases), and the flood-fill reseed on each transition is the
//! mission's responsibility, not the navigator's — `run_step` in particular
//! never reflloods on its own, so the field it reads must already be correct
//! for the new target by the time the phase starts.

use crate::coord::GoalSet;
use crate::error::NavError;
use crate::flood_fill::{flood_fill, FloodMode};
use crate::maze_map::MazeMap;
use crate::navigator::Navigator;
use crate::perception::Perception;
use crate::pose::{Actuator, Pose};

/// The mission's current phase. Only the four phases the algorithm actually
/// uses; the reference firmware's `MouseState` carries a few additional
/// variants (manual-reset and resume-from-last-point states) that belong to
/// operator recovery flows and have no counterpart here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionState {
    /// Exploring outward from the start toward the center, discovering walls
    /// and backtracking through dead ends as needed.
    FirstTraversal,
    /// Following the closed-mode cost gradient from the center straight back
    /// to the start, touching only cells already visited during the first
    /// traversal.
    BackToStart,
    /// Following the closed-mode cost gradient from the start straight to
    /// the center, touching only verified ground.
    RunToGoal,
    /// The mission is complete; further iterations are no-ops.
    Finished,
}

/// The full mission: map, pose, exploration state, and phase, for a maze of
/// fixed side length `N` with a move stack of capacity `CAP`.
pub struct Mission<const N: usize, const CAP: usize> {
    map: MazeMap<N>,
    pose: Pose,
    navigator: Navigator<N, CAP>,
    state: MissionState,
    goals: GoalSet,
    start: GoalSet,
}

impl<const N: usize, const CAP: usize> Mission<N, CAP> {
    pub fn new() -> Self {
        Mission {
            map: MazeMap::new(),
            pose: Pose::start(),
            navigator: Navigator::new(),
            state: MissionState::FirstTraversal,
            goals: GoalSet::center::<N>(),
            start: GoalSet::start(),
        }
    }

    pub fn state(&self) -> MissionState {
        self.state
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn map(&self) -> &MazeMap<N> {
        &self.map
    }

    /// Number of forward moves currently recorded on the exploration move
    /// stack. Frozen at whatever `FirstTraversal` left it once `BackToStart`
    /// begins, since `run_step` never pushes or pops it.
    pub fn stack_len(&self) -> usize {
        self.navigator.stack_len()
    }

    pub fn is_finished(&self) -> bool {
        self.state == MissionState::Finished
    }

    /// Runs one phase-appropriate step. In `Finished`, this does nothing.
    pub fn iterate(
        &mut self,
        actuator: &mut impl Actuator,
        perception: &mut impl Perception,
    ) -> Result<(), NavError> {
        self.iterate_inner(actuator, perception).inspect_err(|err| {
            tracing::error!(%err, "mission: fatal navigation error");
            self.state = MissionState::Finished;
        })
    }

    fn iterate_inner(
        &mut self,
        actuator: &mut impl Actuator,
        perception: &mut impl Perception,
    ) -> Result<(), NavError> {
        match self.state {
            MissionState::FirstTraversal => {
                let reached = self.navigator.search_step(
                    &mut self.map,
                    &mut self.pose,
                    actuator,
                    perception,
                    &self.goals,
                )?;
                if reached {
                    flood_fill(&mut self.map, self.start.as_slice(), FloodMode::Closed);
                    self.transition(MissionState::BackToStart)?;
                }
            }
            MissionState::BackToStart => {
                let reached = self
                    .navigator
                    .run_step(&self.map, &mut self.pose, actuator, &self.start);
                if reached {
                    flood_fill(&mut self.map, self.goals.as_slice(), FloodMode::Closed);
                    self.transition(MissionState::RunToGoal)?;
                }
            }
            MissionState::RunToGoal => {
                let reached = self
                    .navigator
                    .run_step(&self.map, &mut self.pose, actuator, &self.goals);
                if reached {
                    self.transition(MissionState::Finished)?;
                }
            }
            MissionState::Finished => {}
        }
        Ok(())
    }

    /// Moves to `to`, or fails with [`NavError::IllegalTransition`] if the
    /// fixed phase table doesn't allow it. The match arms in `iterate` only
    /// ever request the one legal next phase, so this should be
    /// unreachable in practice; the check is kept anyway rather than
    /// assumed away, per the same "typed error over silent corruption"
    /// stance as the move stack's bounds checks.
    fn transition(&mut self, to: MissionState) -> Result<(), NavError> {
        let legal = matches!(
            (self.state, to),
            (MissionState::FirstTraversal, MissionState::BackToStart)
                | (MissionState::BackToStart, MissionState::RunToGoal)
                | (MissionState::RunToGoal, MissionState::Finished)
        );
        if !legal {
            return Err(NavError::IllegalTransition {
                from: self.state,
                to,
            });
        }
        tracing::info!(from = ?self.state, to = ?to, "mission: phase transition");
        self.state = to;
        Ok(())
    }
}

impl<const N: usize, const CAP: usize> Default for Mission<N, CAP> {
    fn default() -> Self {
        Self::new()
    }
}
