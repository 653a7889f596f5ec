//! Melee combat: the difficulty→stats formula and attack resolution.
//!
//! There is no to-hit roll. An attack is valid when the defender stands in
//! the single cell the attacker faces, and a valid attack always lands for
//! the attacker's full attack power.

use rand::{Rng, RngExt};

use crate::entity::{ActorId, PLAYER_ID, archetype};
use crate::events::GameEvent;
use crate::game::{Game, Status};
use crate::log::MsgStyle;

/// Combat stats rolled for a monster at spawn time.
#[derive(Copy, Clone, Debug)]
pub struct MonsterStats {
    pub health: i32,
    pub attack: i32,
}

/// Roll combat stats for a difficulty tier (1..=12).
///
/// Health jitters by up to ±difficulty around `10 + 8d`, attack by up to
/// ±difficulty/2 around `5 + 2d`; health never rolls under 5, attack never
/// under 3.
pub fn stats_for_difficulty(rng: &mut impl Rng, difficulty: i32) -> MonsterStats {
    let d = difficulty as f32;
    let health = ((10.0 + 8.0 * d + jitter(rng) * d).floor() as i32).max(5);
    let attack = ((5.0 + 2.0 * d + jitter(rng) * 0.5 * d).floor() as i32).max(3);
    MonsterStats { health, attack }
}

/// One uniform draw in (−1, 1).
fn jitter(rng: &mut impl Rng) -> f32 {
    (rng.random::<f32>() - 0.5) * 2.0
}

impl Game {
    /// The live blocking actor in the cell `id` faces, if any.
    pub(crate) fn melee_target(&self, id: ActorId) -> Option<ActorId> {
        let actor = self.actor(id)?;
        let faced = actor.grid_pos + actor.facing.delta();
        self.blocking_actor_at(faced)
    }

    /// Land a hit from `attacker` on `defender`.
    ///
    /// Geometry has been validated by the caller; the hit is guaranteed and
    /// deals the attacker's full attack power. Health clamps at zero. A
    /// dying monster is tombstoned by the end-of-frame sweep, never here,
    /// so an in-progress scan over the actors is safe.
    pub(crate) fn melee(&mut self, attacker: ActorId, defender: ActorId) {
        let Some((atk_name, power)) = self.actor(attacker).map(|a| (a.name.clone(), a.attack))
        else {
            return;
        };
        let (damage, killed, def_name, def_pos, def_kind) = {
            let Some(def) = self.actor_mut(defender) else {
                return;
            };
            if !def.is_alive() {
                return;
            }
            def.hp = (def.hp - power).max(0);
            (
                power,
                def.hp == 0,
                def.name.clone(),
                def.grid_pos,
                def.monster_state().map(|m| m.kind),
            )
        };

        self.events.push(GameEvent::AttackHit {
            attacker,
            defender,
            damage,
        });
        if attacker == PLAYER_ID {
            self.log.log_styled(
                &format!("You hit the {def_name} for {damage} damage."),
                MsgStyle::Combat,
            );
        } else if defender == PLAYER_ID {
            self.log.log_styled(
                &format!("The {atk_name} hits you for {damage} damage."),
                MsgStyle::Combat,
            );
        }

        if !killed {
            return;
        }
        if defender == PLAYER_ID {
            self.status = Status::Dead;
            self.log
                .log_styled("You die in the dark...", MsgStyle::Notable);
            self.events.push(GameEvent::PlayerDied);
        } else if let Some(kind) = def_kind {
            self.log
                .log_styled(&format!("The {def_name} collapses."), MsgStyle::Combat);
            self.events.push(GameEvent::MonsterDied {
                pos: def_pos,
                kind,
                torch_bearer: archetype(kind).torch_bearer,
            });
        }
    }
}
