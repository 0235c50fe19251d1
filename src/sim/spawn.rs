//! Spawn sequencer - launch kinematics, wave dispatch, difficulty ramp
//!
//! Entities launch from just below the visible area with a horizontal
//! velocity banded by launch position, so the stream converges toward the
//! screen center in a fountain pattern. Every wave tightens the timing knobs
//! and speeds up launches.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

use super::scheduler::Task;
use super::state::{Entity, EntityKind, GameEvent, GameState, SoundEffect, StruckState};
use super::waves::WaveKind;

/// Kind override for a single spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceHazard {
    /// Always a safe target
    Never,
    /// Always a hazard
    Always,
    /// Weighted draw: one in [`HAZARD_ODDS`] spawns is a hazard
    Default,
}

/// Launch one entity into the registry.
///
/// No-op once the match has ended; a delayed spawn must never resurrect a
/// finished round.
pub fn spawn_entity(state: &mut GameState, force: ForceHazard) {
    if state.ended {
        return;
    }

    let kind = match force {
        ForceHazard::Never => EntityKind::SafeTarget,
        ForceHazard::Always => EntityKind::Hazard,
        ForceHazard::Default => {
            if state.rng.random_range(0..HAZARD_ODDS) == 0 {
                EntityKind::Hazard
            } else {
                EntityKind::SafeTarget
            }
        }
    };

    let x = state.rng.random_range(LAUNCH_X_MIN..=LAUNCH_X_MAX);
    let pos = Vec2::new(x, LAUNCH_Y);

    // Sampled as an integer then halved: spin steps of 0.5 in [-3, 3]
    let angular_vel = state.rng.random_range(-6..=6) as f32 / 2.0;

    // Outer zones push hard toward the center, inner zones gently
    let vx = if x < LAUNCH_ZONE_WIDTH {
        state.rng.random_range(8..=15) as f32
    } else if x < 2.0 * LAUNCH_ZONE_WIDTH {
        state.rng.random_range(3..=5) as f32
    } else if x < 3.0 * LAUNCH_ZONE_WIDTH {
        -(state.rng.random_range(3..=5) as f32)
    } else {
        -(state.rng.random_range(8..=15) as f32)
    };
    let vy = state.rng.random_range(24..=32) as f32 * state.fall_speed_multiplier;
    let vel = Vec2::new(vx, vy) * LAUNCH_SPEED_SCALE;

    let id = state.next_entity_id();
    state.entities.push(Entity {
        id,
        kind,
        pos,
        vel,
        angular_vel,
        struck: StruckState::Alive,
    });

    state.push_event(GameEvent::EntitySpawned { id, kind, pos });
    state.push_event(GameEvent::Sound(SoundEffect::Launch));

    if kind == EntityKind::Hazard {
        // The fuse sound always belongs to the newest live hazard
        if state.fuse_entity.take().is_some() {
            state.push_event(GameEvent::FuseStopped);
        }
        state.fuse_entity = Some(id);
        state.push_event(GameEvent::FuseStarted { id });
    }
}

/// Dispatch one wave, then tighten the difficulty knobs.
pub fn run_wave(state: &mut GameState, kind: WaveKind) {
    if state.ended {
        return;
    }

    log::info!(
        "wave {:?} (popup {:.3}s, chain {:.2}s, launch x{:.2})",
        kind,
        state.popup_interval,
        state.chain_delay,
        state.fall_speed_multiplier
    );

    match kind {
        WaveKind::OneSafe => spawn_entity(state, ForceHazard::Never),
        WaveKind::One => spawn_entity(state, ForceHazard::Default),
        WaveKind::TwoWithOneHazard => {
            spawn_entity(state, ForceHazard::Never);
            spawn_entity(state, ForceHazard::Always);
        }
        WaveKind::Two => spawn_many(state, 2),
        WaveKind::Three => spawn_many(state, 3),
        WaveKind::Four => spawn_many(state, 4),
        WaveKind::Chain => spawn_chain(state, f64::from(state.chain_delay) / 5.0),
        WaveKind::FastChain => spawn_chain(state, f64::from(state.chain_delay) / 10.0),
    }

    state.popup_interval *= POPUP_INTERVAL_DECAY;
    state.chain_delay *= CHAIN_DELAY_DECAY;
    state.fall_speed_multiplier *= FALL_SPEED_GROWTH;
    state.wave_queued = false;
}

fn spawn_many(state: &mut GameState, count: u32) {
    for _ in 0..count {
        spawn_entity(state, ForceHazard::Default);
    }
}

/// One spawn now, four more spread over the chain window
fn spawn_chain(state: &mut GameState, step: f64) {
    spawn_entity(state, ForceHazard::Default);
    for i in 1..=4u32 {
        state.tasks.schedule(
            state.clock + step * f64::from(i),
            Task::SpawnEntity {
                force: ForceHazard::Default,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::end_match;

    #[test]
    fn test_forced_kinds() {
        let mut state = GameState::new(7);
        spawn_entity(&mut state, ForceHazard::Never);
        spawn_entity(&mut state, ForceHazard::Always);
        assert_eq!(state.entities[0].kind, EntityKind::SafeTarget);
        assert_eq!(state.entities[1].kind, EntityKind::Hazard);
        assert!(state.entities.iter().all(|e| e.is_alive()));
    }

    #[test]
    fn test_launch_kinematics_within_bands() {
        let mut state = GameState::new(4242);
        for _ in 0..200 {
            spawn_entity(&mut state, ForceHazard::Default);
        }
        for e in &state.entities {
            let x = e.pos.x;
            assert!((LAUNCH_X_MIN..=LAUNCH_X_MAX).contains(&x));
            assert_eq!(e.pos.y, LAUNCH_Y);

            let vx = e.vel.x / LAUNCH_SPEED_SCALE;
            if x < LAUNCH_ZONE_WIDTH {
                assert!((8.0..=15.0).contains(&vx), "x={x} vx={vx}");
            } else if x < 2.0 * LAUNCH_ZONE_WIDTH {
                assert!((3.0..=5.0).contains(&vx), "x={x} vx={vx}");
            } else if x < 3.0 * LAUNCH_ZONE_WIDTH {
                assert!((-5.0..=-3.0).contains(&vx), "x={x} vx={vx}");
            } else {
                assert!((-15.0..=-8.0).contains(&vx), "x={x} vx={vx}");
            }

            let vy = e.vel.y / LAUNCH_SPEED_SCALE;
            assert!((24.0..=32.0).contains(&vy), "vy={vy}");

            assert!((-3.0..=3.0).contains(&e.angular_vel));
            // Half-steps only
            assert_eq!((e.angular_vel * 2.0).fract(), 0.0);
        }
    }

    #[test]
    fn test_default_kind_hazard_rate() {
        let mut state = GameState::new(2024);
        for _ in 0..700 {
            spawn_entity(&mut state, ForceHazard::Default);
        }
        let hazards = state
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::Hazard)
            .count();
        // Expectation is 100 of 700; generous band for one fixed seed
        assert!((60..=140).contains(&hazards), "hazards={hazards}");
    }

    #[test]
    fn test_run_wave_ramps_once_for_every_kind() {
        for kind in [
            WaveKind::OneSafe,
            WaveKind::One,
            WaveKind::TwoWithOneHazard,
            WaveKind::Two,
            WaveKind::Three,
            WaveKind::Four,
            WaveKind::Chain,
            WaveKind::FastChain,
        ] {
            let mut state = GameState::new(1);
            run_wave(&mut state, kind);
            assert_eq!(state.popup_interval, POPUP_INTERVAL_START * POPUP_INTERVAL_DECAY);
            assert_eq!(state.chain_delay, CHAIN_DELAY_START * CHAIN_DELAY_DECAY);
            assert_eq!(state.fall_speed_multiplier, FALL_SPEED_START * FALL_SPEED_GROWTH);
            assert!(!state.wave_queued, "wave_queued left set for {kind:?}");
        }
    }

    #[test]
    fn test_two_with_one_hazard_composition() {
        let mut state = GameState::new(9);
        run_wave(&mut state, WaveKind::TwoWithOneHazard);
        assert_eq!(state.alive_count(), 2);
        let hazards = state
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::Hazard)
            .count();
        assert_eq!(hazards, 1);
    }

    #[test]
    fn test_chain_schedules_four_delayed_spawns() {
        let mut state = GameState::new(5);
        state.tasks.clear();
        run_wave(&mut state, WaveKind::Chain);

        // One immediate spawn, four pending at chain_delay/5 steps
        assert_eq!(state.entities.len(), 1);
        assert_eq!(state.tasks.len(), 4);
        let step = f64::from(CHAIN_DELAY_START) / 5.0;
        assert_eq!(state.tasks.next_fire_at(), Some(step));
    }

    #[test]
    fn test_fast_chain_uses_half_the_window() {
        let mut state = GameState::new(5);
        state.tasks.clear();
        run_wave(&mut state, WaveKind::FastChain);
        assert_eq!(state.tasks.len(), 4);
        let step = f64::from(CHAIN_DELAY_START) / 10.0;
        assert_eq!(state.tasks.next_fire_at(), Some(step));
    }

    #[test]
    fn test_new_hazard_supersedes_fuse() {
        let mut state = GameState::new(3);
        spawn_entity(&mut state, ForceHazard::Always);
        spawn_entity(&mut state, ForceHazard::Always);
        let events = state.drain_events();

        let first = state.entities[0].id;
        let second = state.entities[1].id;
        let fuse_events: Vec<_> = events
            .iter()
            .filter(|e| {
                matches!(e, GameEvent::FuseStarted { .. } | GameEvent::FuseStopped)
            })
            .collect();
        assert_eq!(
            fuse_events,
            vec![
                &GameEvent::FuseStarted { id: first },
                &GameEvent::FuseStopped,
                &GameEvent::FuseStarted { id: second },
            ]
        );
    }

    #[test]
    fn test_spawns_are_noops_after_match_end() {
        let mut state = GameState::new(11);
        end_match(&mut state, false);
        state.drain_events();

        spawn_entity(&mut state, ForceHazard::Always);
        run_wave(&mut state, WaveKind::Four);
        assert!(state.entities.is_empty());
        assert!(state.drain_events().is_empty());
    }
}
