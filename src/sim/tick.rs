//! Per-frame update and gesture entry points
//!
//! Ordering contract with the host, fixed and relied upon by the tests:
//! pointer events ([`gesture_start`], [`gesture_move`], [`gesture_end`]) are
//! applied as they arrive, then [`tick`] runs once per frame, after the
//! host's simulation step has integrated entity kinematics. Once the match
//! has ended every entry point here is a no-op.

use glam::Vec2;

use crate::consts::*;

use super::scheduler::Task;
use super::spawn::{run_wave, spawn_entity};
use super::state::{EntityId, EntityKind, GameEvent, GameState, SoundEffect, StruckState};

/// Advance the match by one frame.
pub fn tick(state: &mut GameState, dt: f32) {
    if state.ended {
        return;
    }
    state.clock += f64::from(dt);

    // Delayed work first, so chained spawns land before this frame's sweep
    while let Some(task) = state.tasks.pop_due(state.clock) {
        if state.ended {
            break;
        }
        match task {
            Task::SpawnEntity { force } => spawn_entity(state, force),
            Task::NextWave => match state.schedule.next() {
                Ok(kind) => run_wave(state, kind),
                Err(err) => {
                    // Unreachable with production sizing; hard stop if hit
                    log::error!("{err}, ending match");
                    end_match(state, false);
                }
            },
        }
    }
    if state.ended {
        return;
    }

    // Sweep entities that fell below the removal line. Unsliced hazards are
    // free; only a safe target slipping past the player costs a life.
    let expired: Vec<(EntityId, EntityKind)> = state
        .entities
        .iter()
        .filter(|e| e.is_alive() && e.pos.y < LOWER_BOUND_Y)
        .map(|e| (e.id, e.kind))
        .collect();
    for (id, kind) in expired {
        if let Some(entity) = state.entity_mut(id) {
            entity.struck = StruckState::Removed;
        }
        state.push_event(GameEvent::EntityExpired { id, kind });
        if kind == EntityKind::SafeTarget {
            subtract_life(state);
        }
    }
    state.entities.retain(|e| e.struck == StruckState::Alive);

    if state.ended {
        return;
    }

    // Cleared registry: queue the next wave once
    if state.entities.is_empty() && !state.wave_queued {
        state
            .tasks
            .schedule(state.clock + f64::from(state.popup_interval), Task::NextWave);
        state.wave_queued = true;
    }

    // Fuse upkeep: the sound dies with the last live hazard
    if state.fuse_entity.is_some() && !state.hazard_alive() {
        state.fuse_entity = None;
        state.push_event(GameEvent::FuseStopped);
    }
}

/// A new gesture begins: reset the trail and its visuals.
pub fn gesture_start(state: &mut GameState, point: Vec2) {
    if state.ended {
        return;
    }
    state.trail.begin(point);
    state.push_event(GameEvent::TrailReset);
}

/// A gesture sample arrives: extend the trail and hit-test the polyline.
///
/// Silent no-op when no gesture has begun.
pub fn gesture_move(state: &mut GameState, point: Vec2) {
    if state.ended {
        return;
    }
    if !state.trail.extend(point) {
        return;
    }
    if !state.swoosh_active {
        state.swoosh_active = true;
        state.push_event(GameEvent::Sound(SoundEffect::Whoosh));
    }
    let hits = state.trail.hit_entities(&state.entities);
    on_hit(state, &hits);
}

/// The gesture ends; the host fades the trail visuals.
pub fn gesture_end(state: &mut GameState) {
    if state.ended {
        return;
    }
    state.trail.end();
    state.push_event(GameEvent::TrailFade);
}

/// Host callback: the whoosh sound finished playing.
pub fn swoosh_finished(state: &mut GameState) {
    state.swoosh_active = false;
}

/// Apply a hit-test result: slice every listed entity still Alive.
pub fn on_hit(state: &mut GameState, ids: &[EntityId]) {
    if state.ended {
        return;
    }
    for &id in ids {
        if state.ended {
            break;
        }
        let Some(entity) = state.entity_mut(id) else {
            continue;
        };
        if !entity.is_alive() {
            continue;
        }
        entity.struck = StruckState::Struck;
        let kind = entity.kind;
        let pos = entity.pos;
        state.push_event(GameEvent::EntitySliced { id, kind, pos });

        match kind {
            EntityKind::SafeTarget => {
                state.score += 1;
                let score = state.score;
                state.push_event(GameEvent::ScoreChanged(score));
                state.push_event(GameEvent::Sound(SoundEffect::Slice));
            }
            EntityKind::Hazard => {
                state.push_event(GameEvent::Sound(SoundEffect::Detonation));
                end_match(state, true);
            }
        }
    }
    state.entities.retain(|e| e.struck != StruckState::Struck);
}

/// Take one life; at zero the round is over.
pub fn subtract_life(state: &mut GameState) {
    if state.ended {
        return;
    }
    state.lives = state.lives.saturating_sub(1);
    state.push_event(GameEvent::Sound(SoundEffect::Penalty));
    state.push_event(GameEvent::LifeLost {
        indicator: LIVES_START - state.lives - 1,
    });
    if state.lives == 0 {
        end_match(state, false);
    }
}

/// Terminal state: freeze scheduling, scoring and input. Idempotent.
pub fn end_match(state: &mut GameState, triggered_by_hazard: bool) {
    if state.ended {
        return;
    }
    state.ended = true;
    state.ended_by_hazard = triggered_by_hazard;
    state.tasks.clear();
    if state.fuse_entity.take().is_some() {
        state.push_event(GameEvent::FuseStopped);
    }
    state.push_event(GameEvent::MatchEnded { triggered_by_hazard });
    log::info!(
        "match ended at {:.2}s, score {}, hazard: {}",
        state.clock,
        state.score,
        triggered_by_hazard
    );
}
