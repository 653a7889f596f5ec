//! Core simulation state and the frame driver.
//!
//! `Game` owns everything the simulation touches: the map, the doors, the
//! actor arena, the turn clock, the rng, the message log, and the event
//! queue. There are no globals; tests build isolated instances from ASCII
//! maps and fixed seeds.
//!
//! The model is single-threaded and frame-driven. Within one frame the
//! player's pending command (applied by the caller before [`Game::update`])
//! runs first, then every monster and critter in id order, then the
//! tombstone sweep and population maintenance. No actor's partial update is
//! observable by another actor in the same frame except through committed
//! state.

use rand::rngs::{SmallRng, SysRng};
use rand::{RngExt, SeedableRng};

use crawl_core::{Facing, Point, TurnDir};

use crate::ai::{WANDER_CADENCE_MAX, WANDER_CADENCE_MIN};
use crate::combat::stats_for_difficulty;
use crate::door::DoorSet;
use crate::entity::{
    Actor, ActorId, COMMON_SPAWNS, FIERCE_SPAWNS, MonsterKind, PLAYER_ID, POST_ACTION_COOLDOWN,
    Role, archetype,
};
use crate::events::{EventQueue, GameEvent};
use crate::log::{MessageLog, MsgStyle};
use crate::map::DungeonMap;
use crate::movement::{StepDir, StepOutcome};
use crate::turn::TurnClock;

/// Discrete player commands. One live command is accepted at a time; a
/// command arriving while the player is busy is rejected, never queued.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    StepForward,
    StepBackward,
    RotateLeft,
    RotateRight,
    Wait,
    Attack,
    ToggleDoor,
}

/// Session state. `Dead` and `Won` are one-way: no player command is
/// accepted after either.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    Dead,
    Won,
}

/// Monsters are replenished when the living count drops below the floor,
/// up to the ceiling.
const POPULATION_FLOOR: usize = 3;
const POPULATION_CEILING: usize = 7;
/// Monsters placed at generation time.
const INITIAL_MONSTERS: usize = 5;
/// Minimum Manhattan distance between a spawn cell and the player.
const SPAWN_DISTANCE: i32 = 5;
/// Random placement attempts before giving up on a spawn.
const SPAWN_TRIES: usize = 200;

/// The whole simulation.
pub struct Game {
    /// Sparse id-indexed actor arena. Slot 0 is always the player; dead
    /// monsters leave tombstones that later spawns may reuse.
    pub entities: Vec<Option<Actor>>,
    pub map: DungeonMap,
    pub doors: DoorSet,
    pub clock: TurnClock,
    pub status: Status,
    pub log: MessageLog,
    pub events: EventQueue,
    pub rng: SmallRng,
}

impl Game {
    /// New game on the built-in dungeon with an OS-seeded rng.
    pub fn new() -> Self {
        Self::from_map(DungeonMap::builtin(), SmallRng::try_from_rng(&mut SysRng).unwrap())
    }

    /// New game on a specific map with a fixed seed, for tests and
    /// headless harnesses.
    pub fn from_map_seeded(map: DungeonMap, seed: u64) -> Self {
        Self::from_map(map, SmallRng::seed_from_u64(seed))
    }

    /// New game on the given map.
    pub fn from_map(map: DungeonMap, rng: SmallRng) -> Self {
        let mut game = Self {
            entities: Vec::new(),
            doors: DoorSet::from_specs(map.doors()),
            map,
            clock: TurnClock::new(),
            status: Status::Playing,
            log: MessageLog::new(),
            events: EventQueue::new(),
            rng,
        };
        game.init();
        game
    }

    fn init(&mut self) {
        log::debug!(
            "dungeon {}x{}, {} doors, {} perches",
            self.map.width(),
            self.map.height(),
            self.map.doors().len(),
            self.map.perches().len()
        );
        let start = self.map.start();
        let facing = self.map.start_facing();
        self.entities.push(Some(Actor::new_player(start, facing)));

        for i in 0..self.map.perches().len() {
            let perch = self.map.perches()[i];
            let facing = self.random_facing();
            let next = self.rng.random_range(WANDER_CADENCE_MIN..WANDER_CADENCE_MAX);
            self.entities
                .push(Some(Actor::new_critter(perch, facing, next)));
        }

        self.populate();
        self.log
            .log("You descend into the gloom. The air is cold and still.");
    }

    /// Place the generation-time monster population: a shallow tier close
    /// to the spawn pools' weak end and a fiercer remainder, all at least
    /// [`SPAWN_DISTANCE`] cells from the player's start.
    fn populate(&mut self) {
        let n_common = INITIAL_MONSTERS.div_ceil(2);
        for i in 0..INITIAL_MONSTERS {
            let Some(pos) = self.random_spawn_cell() else {
                break;
            };
            let pool = if i < n_common {
                COMMON_SPAWNS
            } else {
                FIERCE_SPAWNS
            };
            let kind = pool[self.rng.random_range(0..pool.len())];
            self.spawn_monster(kind, pos);
        }
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// Get an actor by id.
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.entities.get(id).and_then(|slot| slot.as_ref())
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.entities.get_mut(id).and_then(|slot| slot.as_mut())
    }

    /// The player entity.
    pub fn player(&self) -> Option<&Actor> {
        self.actor(PLAYER_ID)
    }

    /// Whether the player is alive.
    pub fn player_alive(&self) -> bool {
        self.player().is_some_and(|p| p.is_alive())
    }

    /// The player's committed grid cell.
    pub fn player_pos(&self) -> Option<Point> {
        self.player().map(|p| p.grid_pos)
    }

    /// Whether a new player command would currently be accepted.
    pub fn player_can_act(&self) -> bool {
        matches!(self.status, Status::Playing)
            && self.player().is_some_and(|p| {
                !p.animating && p.player_state().is_some_and(|s| s.can_move)
            })
    }

    /// Iterate live actors. The renderer reads `render_pos`/`render_yaw`
    /// and health off this snapshot each frame.
    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.entities
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().filter(|a| a.is_alive()).map(|a| (i, a)))
    }

    /// Iterate live monsters.
    pub fn monsters(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.actors().filter(|(_, a)| a.is_monster())
    }

    /// Count of live monsters.
    pub fn living_monsters(&self) -> usize {
        self.monsters().count()
    }

    /// Live occupancy-blocking actor at a cell, if any. Mid-animation
    /// actors count at their committed cell only.
    pub fn blocking_actor_at(&self, p: Point) -> Option<ActorId> {
        self.actors()
            .find(|(_, a)| a.blocks() && a.grid_pos == p)
            .map(|(i, _)| i)
    }

    /// Current turn count.
    pub fn turn(&self) -> u64 {
        self.clock.count()
    }

    /// Take all events pending since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    // -------------------------------------------------------------------
    // Player commands
    // -------------------------------------------------------------------

    /// Apply a player command. Returns whether the command was accepted as
    /// a committed action; rejections only produce a log message.
    pub fn command(&mut self, cmd: Command) -> bool {
        if !self.player_can_act() {
            return false;
        }
        match cmd {
            Command::StepForward => self.player_step(StepDir::Forward),
            Command::StepBackward => self.player_step(StepDir::Backward),
            Command::RotateLeft => self.player_rotate(TurnDir::Left),
            Command::RotateRight => self.player_rotate(TurnDir::Right),
            Command::Wait => {
                self.advance_turn();
                self.start_player_cooldown();
                self.log.log("You wait.");
                true
            }
            Command::Attack => self.player_attack(),
            Command::ToggleDoor => self.player_toggle_door(),
        }
    }

    fn player_step(&mut self, dir: StepDir) -> bool {
        let outcome = self.try_step(PLAYER_ID, dir);
        match outcome {
            StepOutcome::Moved => true,
            StepOutcome::Busy => false,
            blocked => {
                match blocked {
                    StepOutcome::BlockedByWall => self.log.log("You bump into the wall."),
                    StepOutcome::BlockedByDoor => {
                        self.log.log_styled("The door is shut fast.", MsgStyle::Door)
                    }
                    StepOutcome::BlockedByActor => self
                        .log
                        .log_styled("Something blocks your way.", MsgStyle::Combat),
                    _ => {}
                }
                self.events.push(GameEvent::Bumped {
                    id: PLAYER_ID,
                    outcome: blocked,
                });
                false
            }
        }
    }

    fn player_rotate(&mut self, dir: TurnDir) -> bool {
        if self.try_rotate(PLAYER_ID, dir) {
            self.advance_turn();
            true
        } else {
            false
        }
    }

    fn player_attack(&mut self) -> bool {
        match self.melee_target(PLAYER_ID) {
            Some(target) => {
                self.advance_turn();
                self.melee(PLAYER_ID, target);
                self.start_player_cooldown();
                true
            }
            None => {
                self.log
                    .log_styled("You swing at empty air.", MsgStyle::Combat);
                false
            }
        }
    }

    fn player_toggle_door(&mut self) -> bool {
        let Some(faced) = self.player().map(|p| p.grid_pos + p.facing.delta()) else {
            return false;
        };
        if self.doors.door_at(faced).is_none() {
            self.log
                .log_styled("There is nothing there to open.", MsgStyle::Door);
            return false;
        }
        self.advance_turn();
        let open = self.doors.toggle(faced) == Some(true);
        self.events.push(GameEvent::DoorToggled { pos: faced, open });
        if open {
            self.log.log_styled("The door creaks open.", MsgStyle::Door);
        } else {
            self.log.log_styled("The door bangs shut.", MsgStyle::Door);
        }
        self.start_player_cooldown();
        true
    }

    /// Record one committed player action, before its side effects.
    pub(crate) fn advance_turn(&mut self) {
        let turn = self.clock.advance();
        self.log.new_turn();
        self.events.push(GameEvent::TurnAdvanced { turn });
    }

    fn start_player_cooldown(&mut self) {
        if let Some(p) = self.actor_mut(PLAYER_ID).and_then(|a| a.player_state_mut()) {
            p.can_move = false;
            p.cooldown = POST_ACTION_COOLDOWN;
        }
    }

    /// Flip to `Won` the moment the player's committed cell is the ladder.
    /// One-way: further commands are rejected for the rest of the session.
    pub(crate) fn check_win(&mut self) {
        if !matches!(self.status, Status::Playing) {
            return;
        }
        let Some(player) = self.player() else {
            return;
        };
        if player.grid_pos == self.map.ladder() {
            self.status = Status::Won;
            self.log
                .log_styled("You climb the ladder, up into daylight!", MsgStyle::Notable);
            self.events.push(GameEvent::Won);
        }
    }

    // -------------------------------------------------------------------
    // Frame driver
    // -------------------------------------------------------------------

    /// Advance the simulation by one frame of `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.player_frame(dt);

        for id in 1..self.entities.len() {
            let is_monster = self
                .actor(id)
                .is_some_and(|a| a.is_alive() && a.is_monster());
            let is_critter = self
                .actor(id)
                .is_some_and(|a| a.is_alive() && matches!(a.role, Role::Critter(_)));
            if is_monster {
                self.monster_frame(id, dt);
            } else if is_critter {
                self.critter_frame(id, dt);
            }
        }

        self.sweep_dead();
        self.maintain_population();
    }

    fn player_frame(&mut self, dt: f32) {
        let playing = matches!(self.status, Status::Playing);
        let Some(actor) = self.actor_mut(PLAYER_ID) else {
            return;
        };
        if actor.animating {
            if actor.advance_animation(dt) {
                if let Some(p) = actor.player_state_mut() {
                    p.cooldown = POST_ACTION_COOLDOWN;
                }
            }
            return;
        }
        let alive = actor.is_alive();
        if let Some(p) = actor.player_state_mut() {
            if !p.can_move && p.cooldown > 0.0 {
                p.cooldown -= dt;
                if p.cooldown <= 0.0 {
                    p.cooldown = 0.0;
                    // Dead or victorious players never regain control.
                    if playing && alive {
                        p.can_move = true;
                    }
                }
            }
        }
    }

    /// Clear tombstones for monsters that died this frame. Removal is
    /// deferred here so no in-progress scan over the actors is invalidated
    /// mid-frame.
    fn sweep_dead(&mut self) {
        for slot in self.entities.iter_mut().skip(1) {
            if slot.as_ref().is_some_and(|a| !a.is_alive()) {
                *slot = None;
            }
        }
    }

    // -------------------------------------------------------------------
    // Spawning
    // -------------------------------------------------------------------

    /// Insert a monster into play at a cell. Combat stats are rolled from
    /// the archetype's difficulty tier; the factory listening for
    /// [`GameEvent::MonsterSpawned`] attaches visuals.
    pub fn spawn_monster(&mut self, kind: MonsterKind, pos: Point) -> ActorId {
        let stats = stats_for_difficulty(&mut self.rng, archetype(kind).difficulty);
        let facing = self.random_facing();
        let next = self.rng.random_range(WANDER_CADENCE_MIN..WANDER_CADENCE_MAX);
        let actor = Actor::new_monster(kind, pos, facing, stats, next);
        let id = self.insert(actor);
        self.events.push(GameEvent::MonsterSpawned { id, kind, pos });
        id
    }

    fn insert(&mut self, actor: Actor) -> ActorId {
        for (i, slot) in self.entities.iter_mut().enumerate().skip(1) {
            if slot.is_none() {
                *slot = Some(actor);
                return i;
            }
        }
        self.entities.push(Some(actor));
        self.entities.len() - 1
    }

    fn random_facing(&mut self) -> Facing {
        Facing::ALL[self.rng.random_range(0..4)]
    }

    /// Find a free spawn cell: walkable, no door, unoccupied, not the
    /// ladder, and far enough from the player.
    fn random_spawn_cell(&mut self) -> Option<Point> {
        let pp = self.player_pos()?;
        let (w, h) = (self.map.width(), self.map.height());
        for _ in 0..SPAWN_TRIES {
            let p = Point::new(self.rng.random_range(0..w), self.rng.random_range(0..h));
            if self.map.is_walkable(p)
                && self.doors.door_at(p).is_none()
                && self.blocking_actor_at(p).is_none()
                && p != self.map.ladder()
                && p.manhattan(pp) >= SPAWN_DISTANCE
            {
                return Some(p);
            }
        }
        None
    }

    /// Keep the monster pool topped up: when the living count falls below
    /// the floor, respawn from the common pool up to the ceiling.
    fn maintain_population(&mut self) {
        if !matches!(self.status, Status::Playing) {
            return;
        }
        let living = self.living_monsters();
        if living >= POPULATION_FLOOR {
            return;
        }
        log::debug!("monster population {living} under floor, replenishing");
        for _ in living..POPULATION_CEILING {
            let Some(pos) = self.random_spawn_cell() else {
                log::warn!("no free spawn cell for a replacement monster");
                break;
            };
            let kind = COMMON_SPAWNS[self.rng.random_range(0..COMMON_SPAWNS.len())];
            self.spawn_monster(kind, pos);
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;

    /// Build a game from an ASCII map with a fixed seed.
    ///
    /// Guards against accidental monster spawns: every walkable cell must
    /// be closer to the start than the spawn distance, so the population
    /// stays exactly what the test places.
    pub(crate) fn game_from(map_text: &str, seed: u64) -> Game {
        let map = DungeonMap::parse(map_text).expect("test map");
        let start = map.start();
        for p in map.terrain().bounds().iter() {
            if map.is_walkable(p) {
                assert!(
                    p.manhattan(start) < SPAWN_DISTANCE,
                    "test map has a spawn-eligible cell at {p}"
                );
            }
        }
        Game::from_map_seeded(map, seed)
    }

    /// Step frames until the player can act again.
    pub(crate) fn settle(game: &mut Game) {
        for _ in 0..600 {
            if game.player_can_act() {
                return;
            }
            game.update(1.0 / 60.0);
        }
        panic!("player never became ready");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::testutil::{game_from, settle};

    const DT: f32 = 1.0 / 60.0;

    const HALL: &str = "\
#########
#.......#
#...@...#
#.>.....#
#########";

    #[test]
    fn no_two_blocking_actors_share_a_cell() {
        let mut game = Game::from_map_seeded(DungeonMap::builtin(), 42);
        let commands = [
            Command::StepForward,
            Command::StepForward,
            Command::RotateRight,
            Command::StepForward,
            Command::RotateLeft,
            Command::StepBackward,
            Command::Attack,
            Command::Wait,
            Command::ToggleDoor,
        ];
        let mut ci = 0;
        for frame in 0..4000 {
            if frame % 7 == 0 && game.player_can_act() {
                game.command(commands[ci % commands.len()]);
                ci += 1;
            }
            game.update(DT);

            let mut cells = std::collections::HashSet::new();
            for (_, a) in game.actors() {
                if a.blocks() {
                    assert!(
                        cells.insert(a.grid_pos),
                        "two actors share {} on frame {frame}",
                        a.grid_pos
                    );
                }
            }
        }
    }

    #[test]
    fn actors_never_rest_behind_closed_doors_or_walls() {
        let mut game = Game::from_map_seeded(DungeonMap::builtin(), 7);
        for _ in 0..2000 {
            game.update(DT);
            for (_, a) in game.actors() {
                assert!(game.map.is_walkable(a.grid_pos));
                assert!(!game.doors.is_blocking(a.grid_pos));
            }
        }
    }

    #[test]
    fn turn_clock_counts_each_committed_action_once() {
        let map = "\
#######
#..@|.#
#.>...#
#######";
        let mut game = game_from(map, 9);
        assert_eq!(game.turn(), 0);

        // Start facing the door cell to the east.
        game.face_actor(PLAYER_ID, Facing::East);
        assert!(game.command(Command::ToggleDoor));
        assert_eq!(game.turn(), 1);
        settle(&mut game);

        assert!(game.command(Command::Wait));
        assert_eq!(game.turn(), 2);
        settle(&mut game);

        assert!(game.command(Command::RotateLeft));
        assert_eq!(game.turn(), 3);
        settle(&mut game);
        assert!(game.command(Command::RotateRight));
        assert_eq!(game.turn(), 4);
        settle(&mut game);

        assert!(game.command(Command::StepForward));
        assert_eq!(game.turn(), 5);
        settle(&mut game);

        // Rejected actions do not advance the clock.
        assert!(!game.command(Command::Attack));
        game.face_actor(PLAYER_ID, Facing::North);
        assert!(!game.command(Command::StepForward));
        assert!(!game.command(Command::ToggleDoor));
        assert_eq!(game.turn(), 5);
    }

    #[test]
    fn door_blocks_until_toggled() {
        let map = "\
#######
#..@|.#
#.>...#
#######";
        let mut game = game_from(map, 1);
        game.face_actor(PLAYER_ID, Facing::East);

        assert_eq!(
            game.try_step(PLAYER_ID, StepDir::Forward),
            StepOutcome::BlockedByDoor
        );
        assert!(game.command(Command::ToggleDoor));
        settle(&mut game);
        assert_eq!(game.try_step(PLAYER_ID, StepDir::Forward), StepOutcome::Moved);
        assert!(game.events.pending().iter().any(|e| matches!(
            e,
            GameEvent::DoorToggled { open: true, .. }
        )));
    }

    #[test]
    fn door_toggle_is_directional_only() {
        let map = "\
#######
#..@..#
#.>.|.#
#######";
        let mut game = game_from(map, 1);
        // The door is south-east of the player, never in the faced cell.
        game.face_actor(PLAYER_ID, Facing::East);
        assert!(!game.command(Command::ToggleDoor));
        assert!(game.doors.is_blocking(Point::new(4, 2)));
        assert_eq!(game.turn(), 0);
    }

    #[test]
    fn door_blocks_monsters_too() {
        let map = "\
######
#.@|.#
#..>.#
######";
        let mut game = game_from(map, 2);
        let id = game.spawn_monster(MonsterKind::Rat, Point::new(4, 1));
        game.face_actor(id, Facing::West);
        assert_eq!(
            game.try_step(id, StepDir::Forward),
            StepOutcome::BlockedByDoor
        );
    }

    #[test]
    fn win_fires_once_and_locks_input() {
        let mut game = game_from(HALL, 3);
        // Walk onto the ladder at (2,3) from (4,2): south, then west twice.
        game.face_actor(PLAYER_ID, Facing::South);
        assert!(game.command(Command::StepForward));
        settle(&mut game);
        game.face_actor(PLAYER_ID, Facing::West);
        assert!(game.command(Command::StepForward));
        settle(&mut game);
        game.events.drain();
        assert!(game.command(Command::StepForward));
        assert_eq!(game.status, Status::Won);
        let wins = game
            .events
            .pending()
            .iter()
            .filter(|e| matches!(e, GameEvent::Won))
            .count();
        assert_eq!(wins, 1);

        // Re-delivered commands are permanently rejected, and no second
        // win event can ever fire.
        for _ in 0..300 {
            game.update(DT);
        }
        assert!(!game.command(Command::StepForward));
        assert!(!game.command(Command::Wait));
        assert!(
            !game
                .events
                .pending()
                .iter()
                .any(|e| matches!(e, GameEvent::Won))
        );
    }

    #[test]
    fn mutually_facing_combatants_co_resolve() {
        let mut game = game_from(HALL, 13);
        let pp = game.player().unwrap().grid_pos;
        let mpos = pp + Facing::East.delta();
        let id = game.spawn_monster(MonsterKind::Skeleton, mpos);
        game.face_actor(PLAYER_ID, Facing::East);
        game.face_actor(id, Facing::West);
        let mhp = game.actor(id).unwrap().hp;
        let php = game.player().unwrap().hp;

        assert!(game.command(Command::Attack));
        let matk = game.actor(id).unwrap().attack;
        assert_eq!(game.actor(id).unwrap().hp, mhp - game.player().unwrap().attack);

        // The monster's own decision still lands its hit; neither moved,
        // so no occupancy conflict is possible.
        game.monster_decide(id);
        assert_eq!(game.player().unwrap().hp, php - matk);
        assert_eq!(game.player().unwrap().grid_pos, pp);
        assert_eq!(game.actor(id).unwrap().grid_pos, mpos);
    }

    #[test]
    fn population_replenishes_after_deaths() {
        let mut game = Game::from_map_seeded(DungeonMap::builtin(), 21);
        assert_eq!(game.living_monsters(), INITIAL_MONSTERS);
        // Kill everything.
        for slot in game.entities.iter_mut().skip(1) {
            if let Some(a) = slot {
                if a.is_monster() {
                    a.hp = 0;
                }
            }
        }
        game.update(DT);
        let living = game.living_monsters();
        assert!(
            living >= POPULATION_FLOOR && living <= POPULATION_CEILING,
            "living {living}"
        );
        // Replacements keep their distance from the player.
        let pp = game.player_pos().unwrap();
        for (_, m) in game.monsters() {
            assert!(m.grid_pos.manhattan(pp) >= SPAWN_DISTANCE);
        }
    }

    #[test]
    fn initial_monsters_spawn_away_from_start() {
        let game = Game::from_map_seeded(DungeonMap::builtin(), 33);
        let start = game.map.start();
        for (_, m) in game.monsters() {
            assert!(m.grid_pos.manhattan(start) >= SPAWN_DISTANCE);
            assert!(game.map.is_walkable(m.grid_pos));
        }
    }

    #[test]
    fn cooldown_gates_commands_after_non_animated_actions() {
        let mut game = game_from(HALL, 17);
        assert!(game.command(Command::Wait));
        // Immediately after, the cooldown rejects everything.
        assert!(!game.command(Command::Wait));
        assert!(!game.player_can_act());
        for _ in 0..(POST_ACTION_COOLDOWN / DT) as usize + 2 {
            game.update(DT);
        }
        assert!(game.player_can_act());
    }

    #[test]
    fn bumps_log_and_classify() {
        let map = "\
#####
#@.>#
#####";
        let mut game = game_from(map, 1);
        game.face_actor(PLAYER_ID, Facing::North);
        assert!(!game.command(Command::StepForward));
        assert!(game.events.pending().iter().any(|e| matches!(
            e,
            GameEvent::Bumped {
                outcome: StepOutcome::BlockedByWall,
                ..
            }
        )));
        let entry = game.log.last().unwrap();
        assert_eq!(entry.style, MsgStyle::Normal);
        assert_eq!(game.turn(), 0);
    }

    #[test]
    fn glow_worms_perch_on_the_map() {
        let game = Game::from_map_seeded(DungeonMap::builtin(), 2);
        let critters = game
            .actors()
            .filter(|(_, a)| matches!(a.role, Role::Critter(_)))
            .count();
        assert_eq!(critters, game.map.perches().len());
    }
}
