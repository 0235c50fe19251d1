//! Gesture trail - bounded pointer-sample buffer and slice polyline
//!
//! The trail keeps at most the 12 most recent pointer samples of the active
//! gesture. Rendered and hit-tested as a polyline through the samples in
//! insertion order; with fewer than 2 samples there is nothing to draw or
//! hit-test.

use glam::Vec2;

use crate::consts::{ENTITY_RADIUS, TRAIL_CAPACITY};

use super::state::{Entity, EntityId};

/// The player's current swipe, as an ordered point buffer
#[derive(Debug, Clone, Default)]
pub struct GestureTrail {
    points: Vec<Vec2>,
    /// True between gesture start and gesture end
    active: bool,
}

impl GestureTrail {
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(TRAIL_CAPACITY),
            active: false,
        }
    }

    /// Start a fresh gesture: drop all buffered points, keep the first sample
    pub fn begin(&mut self, point: Vec2) {
        self.points.clear();
        self.points.push(point);
        self.active = true;
    }

    /// Append a sample, evicting the oldest past capacity.
    ///
    /// Returns false (and does nothing) when no gesture has begun.
    pub fn extend(&mut self, point: Vec2) -> bool {
        if !self.active {
            return false;
        }
        self.points.push(point);
        while self.points.len() > TRAIL_CAPACITY {
            let _ = self.points.remove(0);
        }
        true
    }

    /// Finish the gesture. The buffer is kept for the host's fade-out.
    pub fn end(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Buffered samples in insertion order
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Polyline segments in insertion order; empty with fewer than 2 samples
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Ids of every Alive entity whose bounding circle the polyline crosses.
    ///
    /// Entities already Struck or Removed never match.
    pub fn hit_entities(&self, entities: &[Entity]) -> Vec<EntityId> {
        entities
            .iter()
            .filter(|e| e.is_alive())
            .filter(|e| {
                self.segments()
                    .any(|(a, b)| segment_hits_circle(a, b, e.pos, ENTITY_RADIUS))
            })
            .map(|e| e.id)
            .collect()
    }
}

/// Check whether the segment a->b passes within `radius` of `center`
pub fn segment_hits_circle(a: Vec2, b: Vec2, center: Vec2, radius: f32) -> bool {
    let ab = b - a;
    let len_sq = ab.length_squared();
    // Degenerate segment: two identical samples
    let closest = if len_sq <= f32::EPSILON {
        a
    } else {
        let t = ((center - a).dot(ab) / len_sq).clamp(0.0, 1.0);
        a + ab * t
    };
    center.distance_squared(closest) <= radius * radius
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn trail_keeps_most_recent_points_in_order(
            samples in prop::collection::vec((0.0f32..1024.0, 0.0f32..768.0), 0..48)
        ) {
            let mut trail = GestureTrail::new();
            let start = Vec2::new(512.0, 384.0);
            trail.begin(start);

            let mut pushed = vec![start];
            for (x, y) in &samples {
                let p = Vec2::new(*x, *y);
                trail.extend(p);
                pushed.push(p);
            }

            prop_assert!(trail.len() <= TRAIL_CAPACITY);
            let tail_start = pushed.len().saturating_sub(TRAIL_CAPACITY);
            prop_assert_eq!(trail.points(), &pushed[tail_start..]);
        }
    }
}
