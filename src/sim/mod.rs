//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (registry order is insertion order)
//! - No rendering, audio or platform dependencies
//!
//! The host applies pointer events as they arrive, then calls [`tick`] once
//! per frame. Presentation is driven entirely by the [`GameEvent`] queue.

pub mod scheduler;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod trail;
pub mod waves;

pub use scheduler::{Task, TaskQueue};
pub use spawn::{ForceHazard, run_wave, spawn_entity};
pub use state::{Entity, EntityId, EntityKind, GameEvent, GameState, SoundEffect, StruckState};
pub use tick::{
    end_match, gesture_end, gesture_move, gesture_start, on_hit, subtract_life, swoosh_finished,
    tick,
};
pub use trail::GestureTrail;
pub use waves::{OutOfWaves, Schedule, WaveKind};
