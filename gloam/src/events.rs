//! Typed simulation events consumed by the presentation layer.
//!
//! The core never hands presentation preformatted text: every notable
//! outcome is a classified event carrying the data needed to render,
//! flash, localize, or play audio for it. The external loot system listens
//! for [`GameEvent::MonsterDied`], the torch system for
//! [`GameEvent::TurnAdvanced`], and the monster factory for
//! [`GameEvent::MonsterSpawned`].

use crawl_core::Point;

use crate::entity::{ActorId, MonsterKind};
use crate::movement::StepOutcome;

/// A notable simulation outcome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    /// An actor committed a step from one cell to another.
    Moved { id: ActorId, from: Point, to: Point },
    /// The player's step was rejected.
    Bumped { id: ActorId, outcome: StepOutcome },
    /// The player completed an action.
    TurnAdvanced { turn: u64 },
    /// A melee hit landed.
    AttackHit {
        attacker: ActorId,
        defender: ActorId,
        damage: i32,
    },
    /// A monster was removed from play. The loot system owns the drop roll;
    /// torch-carriers always yield a torch.
    MonsterDied {
        pos: Point,
        kind: MonsterKind,
        torch_bearer: bool,
    },
    /// A monster entered play; the factory attaches visuals.
    MonsterSpawned {
        id: ActorId,
        kind: MonsterKind,
        pos: Point,
    },
    /// The player's health reached zero. Terminal.
    PlayerDied,
    /// A door was opened or closed.
    DoorToggled { pos: Point, open: bool },
    /// The player reached the exit ladder. Terminal.
    Won,
}

/// Per-frame buffer of events, drained by the presentation layer.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event.
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Peek at pending events without draining.
    pub fn pending(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
