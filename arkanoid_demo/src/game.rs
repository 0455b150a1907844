//! Arkanoid scene
//!
//! Walls, a paddle that follows the ball, a ball and a grid of bricks. The
//! ball reflects its direction across every contact normal the physics step
//! recorded on it; bricks lose a life whenever they are told about a
//! collision and leave the world when none are left.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use swept_engine::ecs::WorldError;
use swept_engine::foundation::math::utils::rotate_clockwise;
use swept_engine::physics::collision::ShapeParseError;
use swept_engine::prelude::*;

use crate::config::GameplayConfig;

const WALL_THICKNESS: f32 = 1.0;
const WALL_WEIGHT: f32 = 100.0;
const PADDLE_SIZE: (f32, f32) = (4.0, 0.5);
const PADDLE_WEIGHT: f32 = 10.0;
const PADDLE_LIFT: f32 = 2.0;
const BALL_DIAMETER: f32 = 1.0;
const BALL_WEIGHT: f32 = 1.0;
const BRICK_SIZE: (f32, f32) = (2.0, 0.8);
const BRICK_GAP: f32 = 0.2;
const BRICK_WEIGHT: f32 = 50.0;
const BRICK_HIT_SCORE: u32 = 100;

/// Scene setup and bookkeeping errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// World bookkeeping failed
    #[error("world error: {0}")]
    World(#[from] WorldError),

    /// A collider kind name was not recognised
    #[error("shape error: {0}")]
    Shape(#[from] ShapeParseError),
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every brick was broken
    Cleared,
    /// The last ball fell past the paddle
    Lost,
    /// The step limit ran out
    OutOfTime,
}

/// Reflect `direction` across a contact normal
pub fn reflect(direction: Vec2, normal: Vec2) -> Vec2 {
    direction - 2.0 * normal * normal.dot(&direction)
}

struct Brick {
    starting_lives: u32,
    remaining_lives: u32,
}

/// Records both participants of every collision notification
struct ContactRecorder {
    contacts: Rc<RefCell<Vec<(Entity, Entity)>>>,
}

impl EventHandler for ContactRecorder {
    fn on_event(&mut self, event: &Event) -> bool {
        if let (Some(entity), Some(other)) = (event.get_entity(), event.get_other()) {
            self.contacts.borrow_mut().push((entity, other));
        }
        false
    }
}

/// A running game
pub struct Arkanoid {
    config: GameplayConfig,
    world: World,
    events: EventSystem,
    physics: PhysicsSystem,
    contacts: Rc<RefCell<Vec<(Entity, Entity)>>>,
    rng: StdRng,
    ball: Entity,
    paddle: Entity,
    losing_wall: Entity,
    ball_start: Vec2,
    direction: Vec2,
    bricks: HashMap<Entity, Brick>,
    score: u32,
    lives: u32,
    steps: u32,
}

fn spawn_box(world: &mut World, center: Vec2, size: Vec2, weight: f32) -> Entity {
    let transform = TransformComponent::from_position(Vec3::new(center.x, center.y, 0.0))
        .with_scale(Vec3::new(size.x, size.y, 1.0));
    let body = PhysicsComponent::from_transform(ShapeKind::Aabb, &transform).with_weight(weight);
    world.spawn_body(transform, body)
}

impl Arkanoid {
    /// Build the scene
    pub fn new(config: GameplayConfig, physics: PhysicsConfig) -> Result<Self, SceneError> {
        let mut world = World::new();
        let half_width = config.field_width * 0.5;
        let half_height = config.field_height * 0.5;
        let side = half_width + WALL_THICKNESS * 0.5;
        let cap = half_height + WALL_THICKNESS * 0.5;
        let side_size = Vec2::new(WALL_THICKNESS, config.field_height + 2.0 * WALL_THICKNESS);
        let cap_size = Vec2::new(config.field_width + 2.0 * WALL_THICKNESS, WALL_THICKNESS);

        spawn_box(&mut world, Vec2::new(-side, 0.0), side_size, WALL_WEIGHT);
        spawn_box(&mut world, Vec2::new(side, 0.0), side_size, WALL_WEIGHT);
        spawn_box(&mut world, Vec2::new(0.0, cap), cap_size, WALL_WEIGHT);
        let losing_wall = spawn_box(&mut world, Vec2::new(0.0, -cap), cap_size, WALL_WEIGHT);

        let paddle_y = -half_height + PADDLE_LIFT;
        let paddle = spawn_box(
            &mut world,
            Vec2::new(0.0, paddle_y),
            Vec2::new(PADDLE_SIZE.0, PADDLE_SIZE.1),
            PADDLE_WEIGHT,
        );

        let ball_start = Vec2::new(0.0, paddle_y + (PADDLE_SIZE.1 + BALL_DIAMETER) * 0.5 + 0.25);
        let ball_transform = TransformComponent::from_position(Vec3::new(ball_start.x, ball_start.y, 0.0))
            .with_scale(Vec3::new(BALL_DIAMETER, BALL_DIAMETER, 1.0));
        let ball_body = PhysicsComponent::from_kind_name("Circle", &ball_transform)?.with_weight(BALL_WEIGHT);
        let ball = world.spawn_body(ball_transform, ball_body);

        let mut bricks = HashMap::new();
        let pitch = Vec2::new(BRICK_SIZE.0 + BRICK_GAP, BRICK_SIZE.1 + BRICK_GAP);
        let first_column = (config.brick_columns.saturating_sub(1)) as f32 * 0.5;
        let top_row = half_height - PADDLE_LIFT;
        for row in 0..config.brick_rows {
            for column in 0..config.brick_columns {
                let center = Vec2::new(
                    (column as f32 - first_column) * pitch.x,
                    top_row - row as f32 * pitch.y,
                );
                let brick = spawn_box(&mut world, center, Vec2::new(BRICK_SIZE.0, BRICK_SIZE.1), BRICK_WEIGHT);
                bricks.insert(
                    brick,
                    Brick {
                        starting_lives: config.brick_lives,
                        remaining_lives: config.brick_lives,
                    },
                );
            }
        }

        let contacts = Rc::new(RefCell::new(Vec::new()));
        let mut events = EventSystem::new();
        events.register_handler(
            EventType::CollisionOccurred,
            Box::new(ContactRecorder {
                contacts: Rc::clone(&contacts),
            }),
        );

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        log::info!(
            "Scene ready: {} bricks, {} entities, {} lives",
            bricks.len(),
            world.len(),
            config.starting_lives
        );

        let mut game = Self {
            lives: config.starting_lives,
            config,
            world,
            events,
            physics: PhysicsSystem::new(physics),
            contacts,
            rng,
            ball,
            paddle,
            losing_wall,
            ball_start,
            direction: Vec2::new(0.0, 1.0),
            bricks,
            score: 0,
            steps: 0,
        };
        game.direction = game.launch_direction();
        Ok(game)
    }

    /// Run until the game ends or the step limit is reached
    pub fn run(&mut self) -> Result<Outcome, SceneError> {
        while self.steps < self.config.max_steps {
            if let Some(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
        Ok(Outcome::OutOfTime)
    }

    /// Advance the game by one physics step
    pub fn step(&mut self) -> Result<Option<Outcome>, SceneError> {
        self.steps += 1;
        self.events
            .update_time(f64::from(self.steps) * f64::from(self.config.physics_timestep));

        self.steer_ball();
        self.steer_paddle();

        let report = self.physics.update(&mut self.world, &mut self.events);
        if report.skipped_bodies > 0 {
            log::warn!("{} bodies were not written back", report.skipped_bodies);
        }
        self.events.dispatch();

        let contacts = std::mem::take(&mut *self.contacts.borrow_mut());
        let mut ball_lost = false;
        for (entity, other) in contacts {
            if entity == self.ball && other == self.losing_wall {
                ball_lost = true;
            } else if self.bricks.contains_key(&entity) {
                self.hit_brick(entity)?;
            }
        }

        if self.bricks.is_empty() {
            return Ok(Some(Outcome::Cleared));
        }
        if ball_lost && self.lose_ball() {
            return Ok(Some(Outcome::Lost));
        }
        Ok(None)
    }

    /// Reflect the ball across last step's contacts and set its velocity
    fn steer_ball(&mut self) {
        let speed = self.config.ball_speed * self.config.physics_timestep;
        let Some(body) = self.world.physics_mut(self.ball) else {
            return;
        };

        let reflected = body
            .collisions()
            .iter()
            .fold(self.direction, |direction, &normal| reflect(direction, normal));
        self.direction = reflected.try_normalize(f32::EPSILON).unwrap_or(self.direction);

        body.velocity = self.direction * speed;
        body.reset_collisions();
    }

    /// Move the paddle under the ball, no faster than its speed allows
    fn steer_paddle(&mut self) {
        let Some(ball_x) = self.world.physics(self.ball).map(|body| body.shape.center().x) else {
            return;
        };
        let reach = self.config.paddle_speed.max(0.0) * self.config.physics_timestep;
        let Some(paddle) = self.world.physics_mut(self.paddle) else {
            return;
        };

        let offset = (ball_x - paddle.shape.center().x).clamp(-reach, reach);
        paddle.velocity = Vec2::new(offset, 0.0);
        paddle.reset_collisions();
    }

    fn hit_brick(&mut self, brick: Entity) -> Result<(), SceneError> {
        let Some(state) = self.bricks.get_mut(&brick) else {
            return Ok(());
        };

        state.remaining_lives = state.remaining_lives.saturating_sub(1);
        // every hit on the same brick scores more
        self.score += BRICK_HIT_SCORE * (state.starting_lives - state.remaining_lives);

        if state.remaining_lives == 0 {
            self.bricks.remove(&brick);
            self.world.remove_entity(brick)?;
            log::info!("Brick {:?} broken, {} left, score {}", brick, self.bricks.len(), self.score);
        } else {
            log::debug!("Brick {:?} hit, {} lives left", brick, state.remaining_lives);
        }

        Ok(())
    }

    /// Take a life and put the ball back above the paddle, returning true
    /// when no lives are left
    fn lose_ball(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            log::info!("Last ball lost after {} steps", self.steps);
            return true;
        }

        log::info!("Ball lost, {} lives left", self.lives);
        let start = self.ball_start;
        if let Some(body) = self.world.physics_mut(self.ball) {
            body.shape.teleport(start);
            body.reset_collisions();
        }
        if let Some(transform) = self.world.transform_mut(self.ball) {
            transform.set_planar_position(start);
        }
        self.direction = self.launch_direction();
        false
    }

    /// Straight up, turned by a random angle within the configured jitter
    fn launch_direction(&mut self) -> Vec2 {
        let jitter = self.config.launch_jitter_degrees.abs();
        let deviation = if jitter > 0.0 {
            self.rng.gen_range(-jitter..=jitter)
        } else {
            0.0
        };
        rotate_clockwise(Vec2::new(0.0, 1.0), deviation)
    }

    /// The scene's world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Current score
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Balls left
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Bricks still standing
    pub fn bricks_remaining(&self) -> usize {
        self.bricks.len()
    }

    /// Steps simulated so far
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Ball center
    pub fn ball_position(&self) -> Option<Vec2> {
        self.world.physics(self.ball).map(|body| body.shape.center())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_launch() -> GameplayConfig {
        GameplayConfig {
            launch_jitter_degrees: 0.0,
            seed: Some(1),
            ..GameplayConfig::default()
        }
    }

    #[test]
    fn test_reflect() {
        let reflected = reflect(Vec2::new(1.0, -1.0), Vec2::new(0.0, 1.0));
        assert_eq!(reflected, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_scene_layout() {
        let game = Arkanoid::new(GameplayConfig::default(), PhysicsConfig::default()).unwrap();
        assert_eq!(game.bricks_remaining(), 32);
        // four walls, paddle and ball
        assert_eq!(game.world().len(), 38);
        assert_eq!(game.lives(), 3);
    }

    #[test]
    fn test_ball_bounces_off_ceiling() {
        let config = GameplayConfig {
            brick_rows: 0,
            ..straight_launch()
        };
        let mut game = Arkanoid::new(config, PhysicsConfig::default()).unwrap();
        assert_eq!(game.direction, Vec2::new(0.0, 1.0));

        for _ in 0..120 {
            game.step().unwrap();
        }

        assert!(game.direction.y < 0.0);
        assert!(game.ball_position().unwrap().y < 14.5);
    }

    #[test]
    fn test_single_brick_is_cleared() {
        let config = GameplayConfig {
            brick_rows: 1,
            brick_columns: 1,
            max_steps: 200,
            ..straight_launch()
        };
        let mut game = Arkanoid::new(config, PhysicsConfig::default()).unwrap();

        assert_eq!(game.run().unwrap(), Outcome::Cleared);
        assert_eq!(game.score(), BRICK_HIT_SCORE);
        assert_eq!(game.bricks_remaining(), 0);
        assert_eq!(game.world().len(), 6);
    }

    #[test]
    fn test_losing_the_last_ball_ends_the_game() {
        let config = GameplayConfig {
            starting_lives: 2,
            ..straight_launch()
        };
        let mut game = Arkanoid::new(config, PhysicsConfig::default()).unwrap();

        assert!(!game.lose_ball());
        assert_eq!(game.lives(), 1);
        assert_eq!(game.ball_position(), Some(game.ball_start));
        assert!(game.lose_ball());
    }

    #[test]
    fn test_tough_brick_scores_more_per_hit() {
        let config = GameplayConfig {
            brick_lives: 2,
            ..straight_launch()
        };
        let mut game = Arkanoid::new(config, PhysicsConfig::default()).unwrap();
        let brick = *game.bricks.keys().next().unwrap();

        game.hit_brick(brick).unwrap();
        assert_eq!(game.score(), 100);
        assert!(game.world().contains(brick));

        game.hit_brick(brick).unwrap();
        assert_eq!(game.score(), 300);
        assert!(!game.world().contains(brick));
    }
}
