//! Movement and rotation: validated grid transitions plus the timed
//! interpolation that animates them.
//!
//! A step is validated in a fixed order (terrain, doors, occupancy) and, on
//! success, the destination cell is committed to `grid_pos` *before* any
//! interpolation begins. Actors queried later in the same frame therefore
//! already see the mover at its destination, which is what keeps two actors
//! from committing into the same cell in one decision round. A transition,
//! once committed, always completes its interpolation; there is no abort.

use crawl_core::{Facing, Point, TurnDir, ease_in_out, wrap_angle};
use glam::Vec3;

use crate::entity::{Actor, ActorId, CRITTER_ANIM_DURATION, PLAYER_ANIM_DURATION, PLAYER_ID, Role};
use crate::events::GameEvent;
use crate::game::Game;
use crate::map::grid_to_world;

/// Step direction relative to the actor's facing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepDir {
    Forward,
    Backward,
}

/// Result of a step attempt. All rejections are expected outcomes, not
/// errors; the caller decides whether anything is said about them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    BlockedByWall,
    BlockedByDoor,
    BlockedByActor,
    /// The actor is mid-animation, or the player is cooling down.
    Busy,
}

impl StepOutcome {
    /// Whether the step was committed.
    pub fn moved(self) -> bool {
        self == StepOutcome::Moved
    }
}

// ---------------------------------------------------------------------------
// Actor animation state machine
// ---------------------------------------------------------------------------

impl Actor {
    /// Seconds a full step or turn animation takes for this actor.
    pub(crate) fn anim_duration(&self) -> f32 {
        match &self.role {
            Role::Player(_) => PLAYER_ANIM_DURATION,
            Role::Monster(m) => 1.0 / m.move_speed,
            Role::Critter(_) => CRITTER_ANIM_DURATION,
        }
    }

    /// Point the actor at a new facing without starting an animation; the
    /// yaw change rides along with the next animation that does start.
    pub(crate) fn face(&mut self, facing: Facing) {
        self.facing = facing;
        self.target_yaw = facing.yaw();
    }

    /// Commit a grid transition and start interpolating toward it.
    pub(crate) fn begin_move(&mut self, dest: Point) {
        self.grid_pos = dest;
        self.target_world_pos = grid_to_world(dest);
        self.animating = true;
        self.animation_progress = 0.0;
    }

    /// Turn 90 degrees and start the rotation animation.
    pub(crate) fn begin_turn(&mut self, dir: TurnDir) {
        self.face(self.facing.turned(dir));
        self.begin_face_anim();
    }

    /// Start a pure rotation animation toward the current target yaw.
    pub(crate) fn begin_face_anim(&mut self) {
        self.animating = true;
        self.animation_progress = 0.0;
    }

    /// Advance the interpolation by `dt`. Progress is monotonic and clamps
    /// at 1.0, at which point state snaps to the target and the actor is
    /// free to act again. Returns true when the animation completes on
    /// this call.
    pub(crate) fn advance_animation(&mut self, dt: f32) -> bool {
        if !self.animating {
            return false;
        }
        self.animation_progress = (self.animation_progress + dt / self.anim_duration()).min(1.0);
        if self.animation_progress >= 1.0 {
            self.world_pos = self.target_world_pos;
            self.start_yaw = self.target_yaw;
            self.animating = false;
            true
        } else {
            false
        }
    }

    /// World-space position for the renderer, eased while animating.
    pub fn render_pos(&self) -> Vec3 {
        if self.animating {
            self.world_pos
                .lerp(self.target_world_pos, ease_in_out(self.animation_progress))
        } else {
            self.world_pos
        }
    }

    /// Yaw for the renderer, eased along the shortest arc while animating.
    pub fn render_yaw(&self) -> f32 {
        if self.animating {
            self.start_yaw
                + wrap_angle(self.target_yaw - self.start_yaw) * ease_in_out(self.animation_progress)
        } else {
            self.target_yaw
        }
    }
}

// ---------------------------------------------------------------------------
// Step / rotate
// ---------------------------------------------------------------------------

impl Game {
    /// Attempt a single-cell step. Forward steps use the actor's facing,
    /// backward steps its opposite; the facing itself never changes.
    ///
    /// Validation order: terrain (out-of-bounds counts as wall), closed
    /// doors, then occupancy against every other actor's *committed* cell.
    /// An actor mid-animation has already vacated its old cell.
    pub fn try_step(&mut self, id: ActorId, dir: StepDir) -> StepOutcome {
        let (from, facing, blocks, busy) = match self.actor(id) {
            Some(a) => (
                a.grid_pos,
                a.facing,
                a.blocks(),
                a.animating || a.player_state().is_some_and(|p| !p.can_move),
            ),
            None => return StepOutcome::Busy,
        };
        if busy {
            return StepOutcome::Busy;
        }

        let step_facing = match dir {
            StepDir::Forward => facing,
            StepDir::Backward => facing.opposite(),
        };
        let dest = from + step_facing.delta();

        if !self.map.is_walkable(dest) {
            return StepOutcome::BlockedByWall;
        }
        if self.doors.is_blocking(dest) {
            return StepOutcome::BlockedByDoor;
        }
        if blocks && self.blocking_actor_at(dest).is_some() {
            return StepOutcome::BlockedByActor;
        }

        if let Some(actor) = self.actor_mut(id) {
            actor.begin_move(dest);
            if let Some(p) = actor.player_state_mut() {
                p.can_move = false;
            }
        }
        if id == PLAYER_ID {
            self.advance_turn();
        }
        self.events.push(GameEvent::Moved { id, from, to: dest });
        if id == PLAYER_ID {
            self.check_win();
        }
        StepOutcome::Moved
    }

    /// Turn 90 degrees in place. Purely visual apart from the facing
    /// change: no grid mutation and no collision check. Fails only while
    /// the actor is busy.
    pub fn try_rotate(&mut self, id: ActorId, dir: TurnDir) -> bool {
        let busy = match self.actor(id) {
            Some(a) => a.animating || a.player_state().is_some_and(|p| !p.can_move),
            None => true,
        };
        if busy {
            return false;
        }
        if let Some(actor) = self.actor_mut(id) {
            actor.begin_turn(dir);
            if let Some(p) = actor.player_state_mut() {
                p.can_move = false;
            }
        }
        true
    }

    /// Point an actor at a new facing without animating.
    pub(crate) fn face_actor(&mut self, id: ActorId, facing: Facing) {
        if let Some(a) = self.actor_mut(id) {
            a.face(facing);
        }
    }
}
