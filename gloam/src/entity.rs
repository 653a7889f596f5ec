//! Actors: the player, monsters, and glow-worm critters.
//!
//! Every actor shares one record: an authoritative grid cell, a facing,
//! world-space interpolation state, and combat stats. What differs lives in
//! the [`Role`] enum. Monster combat stats are rolled from the archetype's
//! difficulty tier at spawn time; everything else a monster needs is
//! pure data in the [`MonsterArchetype`] table.

use crawl_core::{Facing, Point};
use glam::Vec3;

use crate::combat::MonsterStats;
use crate::map::grid_to_world;

/// Index into the game's entity vec.
pub type ActorId = usize;

/// The player always occupies slot 0.
pub const PLAYER_ID: ActorId = 0;

/// Seconds one player step or turn takes to animate.
pub const PLAYER_ANIM_DURATION: f32 = 0.25;
/// Seconds the player must wait after an action's animation completes.
pub const POST_ACTION_COOLDOWN: f32 = 0.2;
/// Seconds one glow-worm hop takes to animate.
pub const CRITTER_ANIM_DURATION: f32 = 0.6;

/// Player starting health.
pub const PLAYER_MAX_HP: i32 = 100;
/// Player melee damage.
pub const PLAYER_ATTACK: i32 = 20;

// ---------------------------------------------------------------------------
// Archetypes
// ---------------------------------------------------------------------------

/// Monster archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonsterKind {
    Rat,
    CaveSpider,
    Skeleton,
    Lampwight,
    Ghoul,
    OrcBrute,
    Wraith,
    BoneHulk,
}

/// Pure-data monster template. The simulation never branches on kind for
/// anything except reading this table; visuals are an external concern
/// keyed by the same tag.
pub struct MonsterArchetype {
    pub kind: MonsterKind,
    pub name: &'static str,
    /// Cells per second while animating; inverse of step duration.
    pub move_speed: f32,
    /// Chance to step forward on a wander decision tick.
    pub move_chance: f32,
    /// Difficulty tier (1..=12) feeding the combat-stat formula.
    pub difficulty: i32,
    /// Torch-carriers always drop a torch on death.
    pub torch_bearer: bool,
    /// Whether hits on this monster show blood.
    pub bleeds: bool,
}

/// Static table of monster definitions.
pub const ARCHETYPES: &[MonsterArchetype] = &[
    MonsterArchetype {
        kind: MonsterKind::Rat,
        name: "rat",
        move_speed: 2.4,
        move_chance: 0.85,
        difficulty: 1,
        torch_bearer: false,
        bleeds: true,
    },
    MonsterArchetype {
        kind: MonsterKind::CaveSpider,
        name: "cave spider",
        move_speed: 2.2,
        move_chance: 0.7,
        difficulty: 2,
        torch_bearer: false,
        bleeds: true,
    },
    MonsterArchetype {
        kind: MonsterKind::Skeleton,
        name: "skeleton",
        move_speed: 1.5,
        move_chance: 0.5,
        difficulty: 3,
        torch_bearer: false,
        bleeds: false,
    },
    MonsterArchetype {
        kind: MonsterKind::Lampwight,
        name: "lampwight",
        move_speed: 1.4,
        move_chance: 0.55,
        difficulty: 4,
        torch_bearer: true,
        bleeds: false,
    },
    MonsterArchetype {
        kind: MonsterKind::Ghoul,
        name: "ghoul",
        move_speed: 1.2,
        move_chance: 0.45,
        difficulty: 5,
        torch_bearer: false,
        bleeds: true,
    },
    MonsterArchetype {
        kind: MonsterKind::OrcBrute,
        name: "orc brute",
        move_speed: 1.6,
        move_chance: 0.6,
        difficulty: 7,
        torch_bearer: false,
        bleeds: true,
    },
    MonsterArchetype {
        kind: MonsterKind::Wraith,
        name: "wraith",
        move_speed: 1.8,
        move_chance: 0.35,
        difficulty: 9,
        torch_bearer: false,
        bleeds: false,
    },
    MonsterArchetype {
        kind: MonsterKind::BoneHulk,
        name: "bone hulk",
        move_speed: 0.9,
        move_chance: 0.3,
        difficulty: 12,
        torch_bearer: false,
        bleeds: false,
    },
];

/// Spawn pool for the shallow tier and for respawns.
pub const COMMON_SPAWNS: &[MonsterKind] = &[
    MonsterKind::Rat,
    MonsterKind::CaveSpider,
    MonsterKind::Skeleton,
    MonsterKind::Lampwight,
];

/// Spawn pool for the nastier tier placed at generation time.
pub const FIERCE_SPAWNS: &[MonsterKind] = &[
    MonsterKind::Ghoul,
    MonsterKind::OrcBrute,
    MonsterKind::Wraith,
    MonsterKind::BoneHulk,
];

/// Get the archetype record for a kind.
pub fn archetype(kind: MonsterKind) -> &'static MonsterArchetype {
    ARCHETYPES
        .iter()
        .find(|a| a.kind == kind)
        .expect("unknown monster kind")
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Player-only state.
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Whether a new command is currently accepted.
    pub can_move: bool,
    /// Remaining post-action cooldown, seconds.
    pub cooldown: f32,
}

/// Monster-only state.
#[derive(Debug, Clone)]
pub struct MonsterState {
    pub kind: MonsterKind,
    pub move_speed: f32,
    pub move_chance: f32,
    pub difficulty: i32,
    /// Pursuit state. Sticky until the player dies.
    pub aggro: bool,
    /// Seconds until the next decision tick fires.
    pub next_move_time: f32,
    /// Seconds accumulated since the last decision.
    pub time_since_last_move: f32,
}

/// Glow-worm state. Critters only wander and ignore actor occupancy.
#[derive(Debug, Clone)]
pub struct CritterState {
    pub next_move_time: f32,
    pub time_since_last_move: f32,
}

/// An actor's polymorphic role.
#[derive(Debug, Clone)]
pub enum Role {
    Player(PlayerState),
    Monster(MonsterState),
    Critter(CritterState),
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// A creature in the dungeon.
///
/// `grid_pos` is the authoritative location, mutated only on a committed,
/// validated transition. The world-space fields exist for the renderer:
/// while `animating`, presentation interpolates from `world_pos` toward
/// `target_world_pos` (and `start_yaw` toward `target_yaw`) by the eased
/// `animation_progress`.
#[derive(Debug, Clone)]
pub struct Actor {
    pub name: String,
    pub grid_pos: Point,
    pub facing: Facing,
    pub world_pos: Vec3,
    pub target_world_pos: Vec3,
    pub start_yaw: f32,
    pub target_yaw: f32,
    pub animating: bool,
    pub animation_progress: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub role: Role,
}

impl Actor {
    fn spawn(name: String, pos: Point, facing: Facing, hp: i32, attack: i32, role: Role) -> Self {
        let world = grid_to_world(pos);
        Self {
            name,
            grid_pos: pos,
            facing,
            world_pos: world,
            target_world_pos: world,
            start_yaw: facing.yaw(),
            target_yaw: facing.yaw(),
            animating: false,
            animation_progress: 0.0,
            hp,
            max_hp: hp,
            attack,
            role,
        }
    }

    /// Create the player at its starting cell.
    pub fn new_player(pos: Point, facing: Facing) -> Self {
        Self::spawn(
            "you".to_string(),
            pos,
            facing,
            PLAYER_MAX_HP,
            PLAYER_ATTACK,
            Role::Player(PlayerState {
                can_move: true,
                cooldown: 0.0,
            }),
        )
    }

    /// Create a monster of the given kind with pre-rolled combat stats.
    pub fn new_monster(
        kind: MonsterKind,
        pos: Point,
        facing: Facing,
        stats: MonsterStats,
        next_move_time: f32,
    ) -> Self {
        let data = archetype(kind);
        Self::spawn(
            data.name.to_string(),
            pos,
            facing,
            stats.health,
            stats.attack,
            Role::Monster(MonsterState {
                kind,
                move_speed: data.move_speed,
                move_chance: data.move_chance,
                difficulty: data.difficulty,
                aggro: false,
                next_move_time,
                time_since_last_move: 0.0,
            }),
        )
    }

    /// Create a glow-worm critter on its perch.
    pub fn new_critter(pos: Point, facing: Facing, next_move_time: f32) -> Self {
        Self::spawn(
            "glow-worm".to_string(),
            pos,
            facing,
            1,
            0,
            Role::Critter(CritterState {
                next_move_time,
                time_since_last_move: 0.0,
            }),
        )
    }

    /// Whether this actor is still in play.
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Whether this actor participates in occupancy: it cannot share a cell
    /// and cannot be stepped through. Critters are decoration and do not.
    pub fn blocks(&self) -> bool {
        !matches!(self.role, Role::Critter(_))
    }

    pub fn is_player(&self) -> bool {
        matches!(self.role, Role::Player(_))
    }

    pub fn is_monster(&self) -> bool {
        matches!(self.role, Role::Monster(_))
    }

    /// Monster state, if this actor is a monster.
    pub fn monster_state(&self) -> Option<&MonsterState> {
        match &self.role {
            Role::Monster(m) => Some(m),
            _ => None,
        }
    }

    pub fn monster_state_mut(&mut self) -> Option<&mut MonsterState> {
        match &mut self.role {
            Role::Monster(m) => Some(m),
            _ => None,
        }
    }

    /// Player state, if this actor is the player.
    pub fn player_state(&self) -> Option<&PlayerState> {
        match &self.role {
            Role::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn player_state_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.role {
            Role::Player(p) => Some(p),
            _ => None,
        }
    }
}
