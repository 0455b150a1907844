//! Per-step collision resolution
//!
//! One step moves every body by its velocity, tests every pair of bodies in
//! creation order, rolls the chosen body of each colliding pair back to its
//! point of contact, then writes positions into transforms and refreshes
//! world matrices.

use crate::core::config::PhysicsConfig;
use crate::ecs::{Entity, World};
use crate::events::{Event, EventSystem};
use crate::foundation::math::Mat4;
use crate::physics::collision::{is_collision, CollisionEvent, CollisionResult};
use crate::physics::transform::assemble_world_matrix;

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Pairs handed to collision detection (ghost pairs excluded)
    pub pairs_tested: usize,
    /// Pairs where either half reported contact
    pub collisions: usize,
    /// Bodies moved back to their point of contact
    pub rollbacks: usize,
    /// Bodies whose position could not be written to a transform
    pub skipped_bodies: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    A,
    B,
}

impl Operand {
    fn other(self) -> Self {
        match self {
            Operand::A => Operand::B,
            Operand::B => Operand::A,
        }
    }
}

/// Pick the body that gives way.
///
/// A lone mover is rolled back. When both moved the lighter one is, and on
/// equal weights the second operand. If the chosen half reports no contact
/// the other half is used when that body moved too.
fn select_rollback(
    result: &CollisionResult,
    moved: (bool, bool),
    weights: (f32, f32),
) -> Option<Operand> {
    let preferred = match moved {
        (true, true) if weights.0 < weights.1 => Operand::A,
        (true, true) => Operand::B,
        (true, false) => Operand::A,
        (false, true) => Operand::B,
        (false, false) => return None,
    };

    let collided = |operand| match operand {
        Operand::A => result.a.is_collision,
        Operand::B => result.b.is_collision,
    };
    let has_moved = |operand| match operand {
        Operand::A => moved.0,
        Operand::B => moved.1,
    };

    if collided(preferred) {
        Some(preferred)
    } else if has_moved(preferred.other()) && collided(preferred.other()) {
        Some(preferred.other())
    } else {
        None
    }
}

/// Swept collision resolution over the bodies of a [`World`]
pub struct PhysicsSystem {
    config: PhysicsConfig,
    steps: u64,
}

impl PhysicsSystem {
    /// Create a physics system
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config, steps: 0 }
    }

    /// Current configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Pause or resume the simulation
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    /// Steps run so far, disabled steps excluded
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Run one step.
    ///
    /// Collision notifications are queued on `events`; call
    /// [`EventSystem::dispatch`] afterwards to deliver them.
    pub fn update(&mut self, world: &mut World, events: &mut EventSystem) -> StepReport {
        let mut report = StepReport::default();

        if self.config.enabled {
            let bodies = world.bodies();
            Self::advance(world, &bodies);

            for (i, &a) in bodies.iter().enumerate() {
                for &b in &bodies[i + 1..] {
                    self.resolve_pair(world, events, a, b, &mut report);
                }
            }

            report.skipped_bodies = Self::write_positions(world, &bodies);
            self.steps += 1;
        }

        self.refresh_matrices(world);

        log::trace!(
            "Physics step {}: {} pairs tested, {} collisions, {} rollbacks",
            self.steps,
            report.pairs_tested,
            report.collisions,
            report.rollbacks
        );

        report
    }

    /// Remember every body's position and apply its velocity
    fn advance(world: &mut World, bodies: &[Entity]) {
        for &entity in bodies {
            if let Some(body) = world.physics_mut(entity) {
                body.begin_step();
                let velocity = body.velocity;
                body.shape.advance(velocity);
            }
        }
    }

    fn resolve_pair(
        &self,
        world: &mut World,
        events: &mut EventSystem,
        a: Entity,
        b: Entity,
        report: &mut StepReport,
    ) {
        let (Some(body_a), Some(body_b)) = (world.physics(a), world.physics(b)) else {
            return;
        };

        // ghosts neither collide nor block
        if body_a.is_ghost() || body_b.is_ghost() {
            return;
        }

        let (shape_a, shape_b) = (body_a.shape, body_b.shape);
        let weights = (body_a.weight, body_b.weight);

        report.pairs_tested += 1;
        let result = is_collision(&shape_a, &shape_b);
        if !result.is_any() {
            return;
        }
        report.collisions += 1;

        let moved = (shape_a.is_moved(), shape_b.is_moved());
        let Some(operand) = select_rollback(&result, moved, weights) else {
            log::error!(
                "Could not resolve collision between {:?} ({}) and {:?} ({}), moved: {:?}",
                a,
                shape_a.kind(),
                b,
                shape_b.kind(),
                moved
            );
            return;
        };

        let (entity, event): (Entity, CollisionEvent) = match operand {
            Operand::A => (a, result.a),
            Operand::B => (b, result.b),
        };
        let normal = event.colliding_shape.normal;

        if let Some(body) = world.physics_mut(entity) {
            let contact = body.shape.previous_center() + body.velocity * event.this_shape.time;
            body.shape.set_center(contact);
            body.add_collision(normal);

            if self.config.log_collisions {
                log::debug!(
                    "Collision: {:?} ({}): time: {}, normal: {}, {}",
                    entity,
                    body.shape.kind(),
                    event.this_shape.time,
                    normal.x,
                    normal.y
                );
            }
        }
        report.rollbacks += 1;

        let timestamp = events.current_time();
        for (participant, other) in [(a, b), (b, a)] {
            if let Some(body) = world.physics_mut(participant) {
                body.notify_collision();
            }
            events.send(Event::collision(
                timestamp,
                participant,
                other,
                event.this_shape.time,
                (normal.x, normal.y),
            ));
        }
    }

    /// Copy resolved shape positions into transforms, returning how many
    /// bodies had no transform to write to
    fn write_positions(world: &mut World, bodies: &[Entity]) -> usize {
        let mut skipped = 0;

        for &entity in bodies {
            let Some(center) = world.physics(entity).map(|body| body.shape.center()) else {
                continue;
            };

            match world.transform_mut(entity) {
                Some(transform) => transform.set_planar_position(center),
                None => {
                    log::warn!("Physics body {:?} has no transform, position not written", entity);
                    skipped += 1;
                }
            }
        }

        skipped
    }

    /// Recompose the world matrix of every transform
    fn refresh_matrices(&self, world: &mut World) {
        let matrices: Vec<(Entity, Mat4)> = world
            .transformed()
            .into_iter()
            .filter_map(|entity| {
                let transform = world.transform(entity)?;

                let parent = match transform.parent {
                    Some(parent) if self.config.compose_parent_transforms => {
                        let parent_transform = world.transform(parent);
                        if parent_transform.is_none() {
                            log::warn!("Parent {:?} of {:?} has no transform, composing without it", parent, entity);
                        }
                        parent_transform
                    }
                    _ => None,
                };

                Some((entity, assemble_world_matrix(transform, parent, transform.inheritance)))
            })
            .collect();

        for (entity, matrix) in matrices {
            if let Some(transform) = world.transform_mut(entity) {
                transform.matrix = matrix;
            }
        }
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}
