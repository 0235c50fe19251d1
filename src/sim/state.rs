//! Match state and core simulation types
//!
//! [`GameState`] owns everything the round needs: the entity registry, the
//! gesture trail, the wave schedule, the delayed-task queue and the
//! presentation event queue. Entity kinematics are host-integrated; this
//! core only reads positions.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

use super::scheduler::{Task, TaskQueue};
use super::trail::GestureTrail;
use super::waves::{DEFAULT_TAIL_COUNT, Schedule};

/// Unique handle to a spawned entity, stable for its lifetime
pub type EntityId = u32;

/// The two entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Slicing it scores a point
    SafeTarget,
    /// Slicing it ends the match
    Hazard,
}

/// Per-entity lifecycle state
///
/// `Alive -> Struck -> Removed` on the slice path, `Alive -> Removed` when an
/// entity crosses the lower boundary. No transition leaves `Removed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StruckState {
    Alive,
    Struck,
    Removed,
}

/// One spawned object
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Integrated by the host's simulation step each frame
    pub pos: Vec2,
    pub vel: Vec2,
    /// Visual spin only, no gameplay effect
    pub angular_vel: f32,
    pub struck: StruckState,
}

impl Entity {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.struck == StruckState::Alive
    }
}

/// Named sound effects, resolved by the host's audio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Entity launched
    Launch,
    /// Swipe in progress
    Whoosh,
    /// Safe target sliced
    Slice,
    /// Hazard sliced
    Detonation,
    /// Life lost
    Penalty,
}

/// Fire-and-forget presentation notifications, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Spawn a visual for the entity
    EntitySpawned {
        id: EntityId,
        kind: EntityKind,
        pos: Vec2,
    },
    /// Trigger the entity's disappearance effect
    EntitySliced {
        id: EntityId,
        kind: EntityKind,
        pos: Vec2,
    },
    /// Entity crossed the lower boundary; stop its pending animations
    EntityExpired { id: EntityId, kind: EntityKind },
    /// Update the score display
    ScoreChanged(u32),
    /// Mark life indicator `indicator` as lost (0-based, oldest loss first)
    LifeLost { indicator: u8 },
    /// Play a named sound effect
    Sound(SoundEffect),
    /// Start the looping fuse sound, owned by this hazard
    FuseStarted { id: EntityId },
    /// Stop the fuse sound; safe to receive with no fuse playing
    FuseStopped,
    /// Gesture started: restore trail alpha, cancel any in-flight fade
    TrailReset,
    /// Gesture ended: fade trail visuals over `TRAIL_FADE_SECS`
    TrailFade,
    /// Show the end-of-round UI
    MatchEnded { triggered_by_hazard: bool },
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Match seed, kept for reproducibility
    pub seed: u64,
    /// Spawn-kinematics RNG, decoupled from the schedule stream
    pub(super) rng: Pcg32,
    /// Precomputed wave schedule with its cursor
    pub schedule: Schedule,
    /// Active entity registry, insertion order
    pub entities: Vec<Entity>,
    /// The player's current swipe
    pub trail: GestureTrail,
    pub score: u32,
    pub lives: u8,
    /// Delay between a cleared registry and the next wave (seconds)
    pub popup_interval: f32,
    /// Window over which chain waves spread their spawns (seconds)
    pub chain_delay: f32,
    /// Scales launch vertical velocity upward each wave
    pub fall_speed_multiplier: f32,
    /// Guards against double-scheduling the next wave
    pub wave_queued: bool,
    pub ended: bool,
    /// Whether the round ended on a sliced hazard, for the end screen
    pub ended_by_hazard: bool,
    /// Seconds since match start
    pub clock: f64,
    /// Delayed spawns and wave scheduling
    pub tasks: TaskQueue,
    /// Presentation queue, drained by the host
    pub events: Vec<GameEvent>,
    /// Most recently spawned live hazard, owner of the fuse sound
    pub(super) fuse_entity: Option<EntityId>,
    /// At most one whoosh sound in flight
    pub(super) swoosh_active: bool,
    next_id: EntityId,
}

impl GameState {
    /// Create a fresh match. The opening wave is pre-scheduled at a fixed
    /// delay rather than through the empty-registry rule.
    pub fn new(seed: u64) -> Self {
        let mut tasks = TaskQueue::new();
        tasks.schedule(f64::from(FIRST_WAVE_DELAY), Task::NextWave);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed.wrapping_mul(2654435761).wrapping_add(1)),
            schedule: Schedule::generate(seed, DEFAULT_TAIL_COUNT),
            entities: Vec::new(),
            trail: GestureTrail::new(),
            score: 0,
            lives: LIVES_START,
            popup_interval: POPUP_INTERVAL_START,
            chain_delay: CHAIN_DELAY_START,
            fall_speed_multiplier: FALL_SPEED_START,
            wave_queued: true,
            ended: false,
            ended_by_hazard: false,
            clock: 0.0,
            tasks,
            events: Vec::new(),
            fuse_entity: None,
            swoosh_active: false,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Number of Alive entities in the registry
    pub fn alive_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_alive()).count()
    }

    /// True if any hazard is still Alive
    pub fn hazard_alive(&self) -> bool {
        self.entities
            .iter()
            .any(|e| e.kind == EntityKind::Hazard && e.is_alive())
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take this frame's presentation events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match_initial_state() {
        let state = GameState::new(12345);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert!(!state.ended);
        assert!(state.wave_queued);
        assert!(state.entities.is_empty());
        // Opening wave pre-scheduled at the fixed delay
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks.next_fire_at(), Some(f64::from(FIRST_WAVE_DELAY)));
        assert_eq!(state.schedule.remaining(), state.schedule.len());
    }

    #[test]
    fn test_entity_ids_are_unique_and_stable() {
        let mut state = GameState::new(1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(1);
        state.push_event(GameEvent::ScoreChanged(1));
        state.push_event(GameEvent::FuseStopped);
        let events = state.drain_events();
        assert_eq!(events.len(), 2);
        assert!(state.events.is_empty());
    }
}
