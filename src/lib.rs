//! Slice Rush - a slice-the-falling-object arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic gameplay simulation (entities, waves, trail, match state)
//!
//! Rendering, audio playback, input capture and physics integration are host
//! concerns: the host integrates each Alive entity's velocity into its
//! position once per frame, calls [`sim::tick`], and drains
//! [`sim::GameState::drain_events`] to drive its presentation layer.

pub mod sim;

pub use sim::{GameEvent, GameState, WaveKind, tick};

/// Game configuration constants
pub mod consts {
    /// Maximum number of points kept in the gesture trail
    pub const TRAIL_CAPACITY: usize = 12;
    /// Duration of the host-side trail fade after a gesture ends (seconds)
    pub const TRAIL_FADE_SECS: f32 = 0.25;

    /// Radius of an entity's bounding circle for slice hit-testing
    pub const ENTITY_RADIUS: f32 = 64.0;

    /// Horizontal launch band (scene units)
    pub const LAUNCH_X_MIN: f32 = 64.0;
    pub const LAUNCH_X_MAX: f32 = 960.0;
    /// Fixed launch height, just below the visible area
    pub const LAUNCH_Y: f32 = -128.0;
    /// Entities falling below this line leave the registry
    pub const LOWER_BOUND_Y: f32 = -140.0;
    /// Width of one horizontal-velocity zone (four zones across the scene)
    pub const LAUNCH_ZONE_WIDTH: f32 = 256.0;
    /// Converts sampled launch velocities into scene units per second
    pub const LAUNCH_SPEED_SCALE: f32 = 40.0;

    /// One in this many default-kind spawns is a hazard
    pub const HAZARD_ODDS: u32 = 7;

    /// Lives at match start
    pub const LIVES_START: u8 = 3;
    /// Delay before the opening wave (seconds)
    pub const FIRST_WAVE_DELAY: f32 = 2.0;

    /// Starting delay between a cleared registry and the next wave (seconds)
    pub const POPUP_INTERVAL_START: f32 = 0.9;
    /// Starting window over which chain waves spread their spawns (seconds)
    pub const CHAIN_DELAY_START: f32 = 3.0;
    /// Starting launch-speed multiplier
    pub const FALL_SPEED_START: f32 = 1.0;

    /// Per-wave decay of the next-wave delay
    pub const POPUP_INTERVAL_DECAY: f32 = 0.991;
    /// Per-wave decay of the chain window
    pub const CHAIN_DELAY_DECAY: f32 = 0.99;
    /// Per-wave growth of the launch-speed multiplier
    pub const FALL_SPEED_GROWTH: f32 = 1.02;
}
