//! Slice Rush entry point
//!
//! Headless demo driver standing in for a real host: it integrates entity
//! kinematics each frame (the external simulation step the core expects),
//! scripts a simple player that swipes at falling safe targets, and logs the
//! presentation event stream. Pass a seed as the first argument to replay a
//! specific match.

use glam::Vec2;

use slice_rush::sim::{self, EntityKind, GameEvent, GameState, SoundEffect};

const FRAME_DT: f32 = 1.0 / 60.0;
/// Demo-side gravity, scene units per second squared
const GRAVITY: f32 = -900.0;
/// Give up after two minutes of scripted play
const MAX_FRAMES: u64 = 60 * 120;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);
    log::info!("starting demo match, seed {seed}");

    let mut state = GameState::new(seed);
    let mut frame = 0u64;

    while !state.ended && frame < MAX_FRAMES {
        integrate(&mut state, FRAME_DT);

        // Scripted player: every 20 frames, swipe across the lowest safe
        // target still on screen
        if frame % 20 == 0 {
            let target = state
                .entities
                .iter()
                .filter(|e| e.is_alive() && e.kind == EntityKind::SafeTarget)
                .filter(|e| e.pos.y > 0.0)
                .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|e| e.pos);
            if let Some(center) = target {
                sim::gesture_start(&mut state, center - Vec2::new(80.0, 0.0));
                sim::gesture_move(&mut state, center + Vec2::new(80.0, 0.0));
                sim::gesture_end(&mut state);
            }
        }

        sim::tick(&mut state, FRAME_DT);

        for event in state.drain_events() {
            log::debug!("{event:?}");
            // A headless host finishes every whoosh instantly
            if event == GameEvent::Sound(SoundEffect::Whoosh) {
                sim::swoosh_finished(&mut state);
            }
        }
        frame += 1;
    }

    println!(
        "score {} after {:.1}s, lives {}, ended by hazard: {}",
        state.score,
        state.clock,
        state.lives,
        state.ended_by_hazard
    );
}

/// The host-side simulation step the core never performs itself
fn integrate(state: &mut GameState, dt: f32) {
    for entity in state.entities.iter_mut().filter(|e| e.is_alive()) {
        entity.vel.y += GRAVITY * dt;
        entity.pos += entity.vel * dt;
    }
}
