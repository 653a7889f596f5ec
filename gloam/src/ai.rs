//! Monster and critter decision loops.
//!
//! Each monster runs a two-state machine: **wandering** (the initial state)
//! and **aggro** pursuit. Aggro is sticky: once acquired it is dropped only
//! when the player dies. Decisions fire on a per-monster cadence
//! accumulated from frame time; a monster mid-animation skips its decision
//! rather than queueing it.

use crawl_core::{Facing, Point, TurnDir};
use rand::RngExt;

use crate::entity::{ActorId, PLAYER_ID, Role};
use crate::game::Game;
use crate::movement::StepDir;

/// Aggro acquisition radius, in Manhattan cells.
const AGGRO_RANGE: i32 = 5;
/// Chance per decision tick to aggro while the player is in range.
const AGGRO_CHANCE: f32 = 0.2;
/// Decision cadence bounds while aggroed, seconds.
const AGGRO_CADENCE_MIN: f32 = 0.5;
const AGGRO_CADENCE_MAX: f32 = 1.5;
/// Decision cadence bounds while wandering, seconds.
pub(crate) const WANDER_CADENCE_MIN: f32 = 2.0;
pub(crate) const WANDER_CADENCE_MAX: f32 = 6.0;
/// Share of the non-move remainder spent turning each way on a wander tick.
const WANDER_TURN_SHARE: f32 = 0.2;
/// Chance a glow-worm hops forward on its decision tick.
const CRITTER_MOVE_CHANCE: f32 = 0.5;

impl Game {
    /// Per-frame monster update: advance a running animation, else
    /// accumulate the decision timer and fire at most one decision.
    pub(crate) fn monster_frame(&mut self, id: ActorId, dt: f32) {
        let Some(actor) = self.actor_mut(id) else {
            return;
        };
        if actor.animating {
            actor.advance_animation(dt);
            // The cadence keeps running; the decision itself is what is
            // blocked while animating.
            if let Some(m) = actor.monster_state_mut() {
                m.time_since_last_move += dt;
            }
            return;
        }
        let due = match actor.monster_state_mut() {
            Some(m) => {
                m.time_since_last_move += dt;
                m.time_since_last_move >= m.next_move_time
            }
            None => return,
        };
        if !due {
            return;
        }

        self.monster_decide(id);

        // Redraw the cadence from the post-decision state: pursuit thinks
        // faster than idling.
        let aggro = self
            .actor(id)
            .and_then(|a| a.monster_state())
            .is_some_and(|m| m.aggro);
        let next = if aggro {
            self.rng.random_range(AGGRO_CADENCE_MIN..AGGRO_CADENCE_MAX)
        } else {
            self.rng.random_range(WANDER_CADENCE_MIN..WANDER_CADENCE_MAX)
        };
        if let Some(m) = self.actor_mut(id).and_then(|a| a.monster_state_mut()) {
            m.time_since_last_move = 0.0;
            m.next_move_time = next;
        }
    }

    /// One decision tick: at most one action.
    pub(crate) fn monster_decide(&mut self, id: ActorId) {
        let Some((pos, facing, name)) = self
            .actor(id)
            .map(|a| (a.grid_pos, a.facing, a.name.clone()))
        else {
            return;
        };

        // A dead player breaks every aggro; the monster goes back to
        // wandering without any pursuit logic this tick.
        if !self.player_alive() {
            if let Some(m) = self.actor_mut(id).and_then(|a| a.monster_state_mut()) {
                m.aggro = false;
            }
            self.monster_wander(id);
            return;
        }
        let Some(pp) = self.player_pos() else {
            return;
        };

        let mut aggro = self
            .actor(id)
            .and_then(|a| a.monster_state())
            .is_some_and(|m| m.aggro);
        if !aggro && pos.manhattan(pp) <= AGGRO_RANGE && self.rng.random::<f32>() < AGGRO_CHANCE {
            if let Some(m) = self.actor_mut(id).and_then(|a| a.monster_state_mut()) {
                m.aggro = true;
            }
            self.log.log(&format!("The {name} fixes its eyes on you."));
            aggro = true;
        }

        // Attack in place, aggro or not: a player standing right in front
        // is fair game.
        if pos + facing.delta() == pp {
            self.melee(id, PLAYER_ID);
            return;
        }

        if aggro {
            self.monster_pursue(id, pp);
        } else {
            self.monster_wander(id);
        }
    }

    /// Greedy pursuit: prefer the axis with the larger offset toward the
    /// player (ties go to X), face that way and step. If blocked, retry
    /// once along the other axis. A double-blocked monster just turns.
    fn monster_pursue(&mut self, id: ActorId, pp: Point) {
        let Some((pos, initial)) = self.actor(id).map(|a| (a.grid_pos, a.facing)) else {
            return;
        };
        let d = pp - pos;
        let (primary, secondary) = if d.x.abs() >= d.y.abs() {
            (Facing::along_x(d.x), Facing::along_y(d.y))
        } else {
            (Facing::along_y(d.y), Facing::along_x(d.x))
        };
        let Some(first) = primary else {
            return;
        };
        self.face_actor(id, first);
        if self.try_step(id, StepDir::Forward).moved() {
            return;
        }
        if let Some(second) = secondary {
            self.face_actor(id, second);
            if self.try_step(id, StepDir::Forward).moved() {
                return;
            }
        }
        // No second retry; animate the turn so the monster visibly tracks.
        if let Some(actor) = self.actor_mut(id) {
            if actor.facing != initial {
                actor.begin_face_anim();
            }
        }
    }

    /// Wander roll: step forward with the archetype's move chance, else a
    /// fifth of the remainder turns left, a fifth turns right, and the rest
    /// stands idle. A blocked wander step is not retried.
    fn monster_wander(&mut self, id: ActorId) {
        let Some(move_chance) = self
            .actor(id)
            .and_then(|a| a.monster_state())
            .map(|m| m.move_chance)
        else {
            return;
        };
        let roll: f32 = self.rng.random();
        if roll < move_chance {
            let _ = self.try_step(id, StepDir::Forward);
            return;
        }
        let r = (roll - move_chance) / (1.0 - move_chance);
        if r < WANDER_TURN_SHARE {
            self.try_rotate(id, TurnDir::Left);
        } else if r < 2.0 * WANDER_TURN_SHARE {
            self.try_rotate(id, TurnDir::Right);
        }
    }

    /// Per-frame glow-worm update. Critters only hop and turn; they check
    /// terrain and doors but ignore actor occupancy entirely.
    pub(crate) fn critter_frame(&mut self, id: ActorId, dt: f32) {
        let Some(actor) = self.actor_mut(id) else {
            return;
        };
        if actor.animating {
            actor.advance_animation(dt);
            if let Role::Critter(c) = &mut actor.role {
                c.time_since_last_move += dt;
            }
            return;
        }
        let due = match &mut actor.role {
            Role::Critter(c) => {
                c.time_since_last_move += dt;
                c.time_since_last_move >= c.next_move_time
            }
            _ => return,
        };
        if !due {
            return;
        }

        let roll: f32 = self.rng.random();
        if roll < CRITTER_MOVE_CHANCE {
            let _ = self.try_step(id, StepDir::Forward);
        } else if roll < CRITTER_MOVE_CHANCE + (1.0 - CRITTER_MOVE_CHANCE) / 2.0 {
            self.try_rotate(id, TurnDir::Left);
        } else {
            self.try_rotate(id, TurnDir::Right);
        }

        let next = self
            .rng
            .random_range(WANDER_CADENCE_MIN..WANDER_CADENCE_MAX);
        if let Some(actor) = self.actor_mut(id) {
            if let Role::Critter(c) = &mut actor.role {
                c.time_since_last_move = 0.0;
                c.next_move_time = next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Actor, MonsterKind};
    use crate::game::testutil::game_from;
    use crate::map::DungeonMap;
    use crawl_core::Point;

    const ARENA: &str = "\
#########
#.......#
#...@...#
#......>#
#########";

    fn force_aggro(game: &mut Game, id: ActorId) {
        game.actor_mut(id)
            .unwrap()
            .monster_state_mut()
            .unwrap()
            .aggro = true;
    }

    #[test]
    fn pursuit_prefers_larger_axis() {
        let mut game = game_from(ARENA, 11);
        // Player at (4,2); monster at (7,1): offset (-3, 1), X wins.
        let id = game.spawn_monster(MonsterKind::Skeleton, Point::new(7, 1));
        force_aggro(&mut game, id);
        game.monster_decide(id);
        let m = game.actor(id).unwrap();
        assert_eq!(m.facing, Facing::West);
        assert_eq!(m.grid_pos, Point::new(6, 1));
    }

    #[test]
    fn pursuit_tie_breaks_toward_x() {
        let map = "\
#######
#.....#
#.@...#
#.....#
#>...##
#######";
        let mut game = game_from(map, 11);
        // Player at (2,2); monster at (4,4): offset (-2, -2). Ties go to
        // the X axis.
        let id = game.spawn_monster(MonsterKind::Skeleton, Point::new(4, 4));
        force_aggro(&mut game, id);
        game.monster_decide(id);
        let m = game.actor(id).unwrap();
        assert_eq!(m.facing, Facing::West);
        assert_eq!(m.grid_pos, Point::new(3, 4));
    }

    #[test]
    fn pursuit_falls_back_to_other_axis() {
        let map = "\
######
#@...#
#..#.#
#.>.##
######";
        let mut game = game_from(map, 3);
        // Player at (1,1); monster at (4,2): offset (-3, -1). The X step
        // into (3,2) hits a wall; the fallback Y step north is open.
        let id = game.spawn_monster(MonsterKind::Ghoul, Point::new(4, 2));
        force_aggro(&mut game, id);
        game.monster_decide(id);
        let m = game.actor(id).unwrap();
        assert_eq!(m.facing, Facing::North);
        assert_eq!(m.grid_pos, Point::new(4, 1));
    }

    #[test]
    fn double_blocked_pursuit_turns_in_place() {
        let map = "\
######
#@..##
#..#.#
#.>.##
######";
        let mut game = game_from(map, 3);
        // Player at (1,1); monster at (4,2): offset (-3, -1). Both the X
        // step (3,2) and the Y step (4,1) are walls.
        let id = game.spawn_monster(MonsterKind::Skeleton, Point::new(4, 2));
        force_aggro(&mut game, id);
        game.monster_decide(id);
        let m = game.actor(id).unwrap();
        assert_eq!(m.grid_pos, Point::new(4, 2));
        // It still turned toward the player, animated.
        assert_eq!(m.facing, Facing::North);
        assert!(m.animating);
    }

    #[test]
    fn aggro_is_sticky_even_outside_the_radius() {
        let mut game = Game::from_map_seeded(DungeonMap::builtin(), 5);
        // Clear the generated population so the spawn cell is free.
        for slot in game.entities.iter_mut().skip(1) {
            if slot.as_ref().is_some_and(|a| a.is_monster()) {
                *slot = None;
            }
        }
        let id = game.spawn_monster(MonsterKind::Wraith, Point::new(18, 18));
        force_aggro(&mut game, id);
        game.actor_mut(PLAYER_ID).unwrap().hp = 1_000_000;
        // The player starts 34 cells away, far beyond the 5-cell radius;
        // aggro never reverts while the player lives.
        for _ in 0..40 {
            game.monster_decide(id);
            assert!(game.actor(id).unwrap().monster_state().unwrap().aggro);
        }
    }

    #[test]
    fn aggro_breaks_when_player_dies() {
        let mut game = game_from(ARENA, 5);
        let id = game.spawn_monster(MonsterKind::Wraith, Point::new(7, 1));
        force_aggro(&mut game, id);
        game.actor_mut(PLAYER_ID).unwrap().hp = 0;
        game.monster_decide(id);
        assert!(!game.actor(id).unwrap().monster_state().unwrap().aggro);
    }

    #[test]
    fn wandering_monster_still_attacks_player_in_front() {
        let mut game = game_from(ARENA, 5);
        let pp = game.player().unwrap().grid_pos;
        let mpos = pp + Facing::East.delta();
        let id = game.spawn_monster(MonsterKind::OrcBrute, mpos);
        game.face_actor(id, Facing::West);
        assert!(!game.actor(id).unwrap().monster_state().unwrap().aggro);
        let hp_before = game.player().unwrap().hp;
        game.monster_decide(id);
        assert!(game.player().unwrap().hp < hp_before);
        // Attacking was the whole tick: the monster did not move.
        assert_eq!(game.actor(id).unwrap().grid_pos, mpos);
    }

    #[test]
    fn boxed_monster_never_walks_through_walls() {
        let map = "\
#####
#@#.#
#>###
#####";
        let mut game = game_from(map, 8);
        // The pocket at (3,1) has walls on all four sides.
        let id = game.spawn_monster(MonsterKind::Rat, Point::new(3, 1));
        for _ in 0..100 {
            game.monster_decide(id);
            for _ in 0..60 {
                game.update(1.0 / 60.0);
            }
            assert_eq!(game.actor(id).unwrap().grid_pos, Point::new(3, 1));
        }
    }

    #[test]
    fn critters_ignore_occupancy_both_ways() {
        let mut game = game_from(ARENA, 2);
        let pp = game.player().unwrap().grid_pos;
        let cpos = pp + Facing::East.delta();
        let critter = Actor::new_critter(cpos, Facing::East, 100.0);
        game.entities.push(Some(critter));
        let cid = game.entities.len() - 1;
        // The player steps straight into the critter's cell.
        game.face_actor(PLAYER_ID, Facing::East);
        assert!(game.try_step(PLAYER_ID, StepDir::Forward).moved());
        assert_eq!(game.player().unwrap().grid_pos, cpos);
        assert_eq!(game.actor(cid).unwrap().grid_pos, cpos);
        // And the critter may hop out through the occupied neighborhood.
        game.face_actor(cid, Facing::West);
        assert!(game.try_step(cid, StepDir::Forward).moved());
    }

    #[test]
    fn decision_is_blocked_not_queued_while_animating() {
        let mut game = game_from(ARENA, 6);
        let id = game.spawn_monster(MonsterKind::Rat, Point::new(6, 1));
        force_aggro(&mut game, id);
        game.actor_mut(id)
            .unwrap()
            .monster_state_mut()
            .unwrap()
            .next_move_time = 0.0;
        game.monster_frame(id, 0.01);
        let after_first = game.actor(id).unwrap().grid_pos;
        assert!(game.actor(id).unwrap().animating);
        // The timer is due again immediately, but the running animation
        // blocks the next decision instead of queueing it.
        game.actor_mut(id)
            .unwrap()
            .monster_state_mut()
            .unwrap()
            .next_move_time = 0.0;
        game.monster_frame(id, 0.01);
        assert_eq!(game.actor(id).unwrap().grid_pos, after_first);
        assert!(game.actor(id).unwrap().animating);
    }
}
