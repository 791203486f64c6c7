//! Minimal rigid-body and trigger-volume world
//!
//! Stand-in for the external physics library the scene delegates to. Bodies
//! are keyed by their game object, integrated with explicit Euler, and
//! trigger overlaps are detected with bounding-sphere tests. Enter events
//! are edges between the previous and current overlap sets.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;

use crate::foundation::math::Vec3;
use crate::scene::GameObjectId;

/// How a body responds to the simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Never moves
    Static,
    /// Moves under its velocity
    Dynamic,
    /// Moves under its velocity but is driven from outside the simulation
    Kinematic,
}

/// Collider shapes supported by the built-in world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Sphere around the body origin
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Axis-aligned box around the body origin
    Box {
        /// Half-extent along each axis
        half_extents: Vec3,
    },
    /// Upright cylinder around the body origin
    Cylinder {
        /// Cylinder radius
        radius: f32,
        /// Half the cylinder height
        half_height: f32,
    },
}

impl ColliderShape {
    /// Conservative bounding radius used for overlap tests
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Self::Sphere { radius } => *radius,
            Self::Box { half_extents } => half_extents.magnitude(),
            Self::Cylinder {
                radius,
                half_height,
            } => (radius * radius + half_height * half_height).sqrt(),
        }
    }
}

/// A trigger volume began overlapping another body this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEnter {
    /// The object carrying the trigger volume
    pub trigger: GameObjectId,
    /// The body that entered it
    pub other: GameObjectId,
}

#[derive(Debug, Clone)]
struct Body {
    kind: BodyKind,
    shape: ColliderShape,
    position: Vec3,
    velocity: Vec3,
    is_trigger: bool,
}

/// The simulation world stepped once per frame by the scene
#[derive(Default)]
pub struct PhysicsWorld {
    bodies: SecondaryMap<GameObjectId, Body>,
    current_pairs: HashSet<(GameObjectId, GameObjectId)>,
    previous_pairs: HashSet<(GameObjectId, GameObjectId)>,
    events: Vec<TriggerEnter>,
}

impl PhysicsWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or refresh the body for an object
    pub fn upsert_body(
        &mut self,
        id: GameObjectId,
        kind: BodyKind,
        shape: ColliderShape,
        position: Vec3,
        velocity: Vec3,
        is_trigger: bool,
    ) {
        self.bodies.insert(
            id,
            Body {
                kind,
                shape,
                position,
                velocity,
                is_trigger,
            },
        );
    }

    /// Remove the body for an object, if present
    pub fn remove_body(&mut self, id: GameObjectId) {
        self.bodies.remove(id);
        self.current_pairs.retain(|&(a, b)| a != id && b != id);
        self.previous_pairs.retain(|&(a, b)| a != id && b != id);
    }

    /// Position of a body after the latest step
    pub fn body_position(&self, id: GameObjectId) -> Option<Vec3> {
        self.bodies.get(id).map(|b| b.position)
    }

    /// Number of registered bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// Integrates non-static bodies, then recomputes trigger overlaps and
    /// records enter events for pairs absent last step.
    pub fn step(&mut self, dt: f32) {
        for body in self.bodies.values_mut() {
            if body.kind != BodyKind::Static {
                body.position += body.velocity * dt;
            }
        }

        std::mem::swap(&mut self.previous_pairs, &mut self.current_pairs);
        self.current_pairs.clear();

        let ids: Vec<GameObjectId> = self.bodies.keys().collect();
        for &trigger_id in &ids {
            if !self.bodies[trigger_id].is_trigger {
                continue;
            }
            for &other_id in &ids {
                if other_id == trigger_id || self.bodies[other_id].is_trigger {
                    continue;
                }
                if self.overlaps(trigger_id, other_id) {
                    let pair = (trigger_id, other_id);
                    self.current_pairs.insert(pair);
                    if !self.previous_pairs.contains(&pair) {
                        self.events.push(TriggerEnter {
                            trigger: trigger_id,
                            other: other_id,
                        });
                    }
                }
            }
        }
    }

    /// Take the trigger-enter events recorded by the latest steps
    pub fn drain_events(&mut self) -> Vec<TriggerEnter> {
        std::mem::take(&mut self.events)
    }

    fn overlaps(&self, a: GameObjectId, b: GameObjectId) -> bool {
        let (body_a, body_b) = (&self.bodies[a], &self.bodies[b]);
        let distance_squared = (body_a.position - body_b.position).magnitude_squared();
        let radius_sum = body_a.shape.bounding_radius() + body_b.shape.bounding_radius();
        distance_squared <= radius_sum * radius_sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<GameObjectId> {
        let mut arena: SlotMap<GameObjectId, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn test_dynamic_body_integrates_velocity() {
        let keys = ids(1);
        let mut world = PhysicsWorld::new();
        world.upsert_body(
            keys[0],
            BodyKind::Dynamic,
            ColliderShape::Sphere { radius: 0.5 },
            Vec3::zeros(),
            Vec3::new(2.0, 0.0, 0.0),
            false,
        );

        world.step(0.5);
        let pos = world.body_position(keys[0]).unwrap();
        assert_relative_eq!(pos.x, 1.0);
    }

    #[test]
    fn test_static_body_does_not_move() {
        let keys = ids(1);
        let mut world = PhysicsWorld::new();
        world.upsert_body(
            keys[0],
            BodyKind::Static,
            ColliderShape::Sphere { radius: 0.5 },
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(9.0, 9.0, 9.0),
            false,
        );

        world.step(1.0);
        assert_eq!(world.body_position(keys[0]).unwrap(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_trigger_enter_fires_once_per_entry() {
        let keys = ids(2);
        let mut world = PhysicsWorld::new();
        world.upsert_body(
            keys[0],
            BodyKind::Static,
            ColliderShape::Cylinder {
                radius: 1.0,
                half_height: 1.0,
            },
            Vec3::zeros(),
            Vec3::zeros(),
            true,
        );
        world.upsert_body(
            keys[1],
            BodyKind::Dynamic,
            ColliderShape::Sphere { radius: 0.5 },
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(-10.0, 0.0, 0.0),
            false,
        );

        // Far away: no events
        world.step(0.1);
        assert!(world.drain_events().is_empty());

        // Arrives inside the trigger
        world.step(0.9);
        let events = world.drain_events();
        assert_eq!(
            events,
            vec![TriggerEnter {
                trigger: keys[0],
                other: keys[1],
            }]
        );

        // Still overlapping: no repeated enter event
        world.upsert_body(
            keys[1],
            BodyKind::Dynamic,
            ColliderShape::Sphere { radius: 0.5 },
            world.body_position(keys[1]).unwrap(),
            Vec3::zeros(),
            false,
        );
        world.step(0.1);
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_removed_body_clears_pairs() {
        let keys = ids(2);
        let mut world = PhysicsWorld::new();
        world.upsert_body(
            keys[0],
            BodyKind::Static,
            ColliderShape::Sphere { radius: 2.0 },
            Vec3::zeros(),
            Vec3::zeros(),
            true,
        );
        world.upsert_body(
            keys[1],
            BodyKind::Static,
            ColliderShape::Sphere { radius: 0.5 },
            Vec3::zeros(),
            Vec3::zeros(),
            false,
        );

        world.step(0.1);
        assert_eq!(world.drain_events().len(), 1);

        world.remove_body(keys[1]);
        world.step(0.1);
        assert!(world.drain_events().is_empty());
    }
}
