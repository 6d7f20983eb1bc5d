//! The player entity: a single gravity/velocity/position integrator

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::PhysicsConfig;

/// Position and vertical velocity for the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (positive = falling)
    pub vel_y: f32,
    pub size: Vec2,
    gravity: f32,
    impulse: f32,
    ground: Option<f32>,
    grounded: bool,
}

impl PhysicsBody {
    pub fn new(config: &PhysicsConfig) -> Self {
        let mut body = Self {
            pos: Vec2::new(config.start_x, config.start_y),
            vel_y: 0.0,
            size: Vec2::new(config.width, config.height),
            gravity: config.gravity,
            impulse: config.impulse,
            ground: config.ground,
            grounded: false,
        };
        body.settle();
        body
    }

    /// Integrate one tick: velocity picks up gravity, then moves the body
    pub fn apply_gravity(&mut self) {
        self.vel_y += self.gravity;
        self.pos.y += self.vel_y;
        self.settle();
    }

    /// Override velocity with the upward impulse, discarding any fall speed
    pub fn impulse(&mut self) {
        self.vel_y = self.impulse;
        self.grounded = false;
    }

    /// Whether the body is resting on the ground line
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    /// Whether this body lands on a ground line at all
    pub fn has_ground(&self) -> bool {
        self.ground.is_some()
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }

    /// Clamp to the ground line (if any) and update the grounded flag
    fn settle(&mut self) {
        let Some(ground) = self.ground else { return };
        if self.pos.y + self.size.y >= ground {
            self.pos.y = ground - self.size.y;
            self.vel_y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, Preset};

    fn flappy_body() -> PhysicsBody {
        PhysicsBody::new(&GameConfig::from_preset(Preset::Flappy).physics)
    }

    #[test]
    fn test_gravity_accumulates() {
        let mut body = flappy_body();
        let y0 = body.pos.y;
        body.apply_gravity();
        assert_eq!(body.vel_y, 0.25);
        assert_eq!(body.pos.y, y0 + 0.25);
        body.apply_gravity();
        assert_eq!(body.vel_y, 0.5);
        assert_eq!(body.pos.y, y0 + 0.75);
    }

    #[test]
    fn test_impulse_overrides_fall_speed() {
        let mut body = flappy_body();
        body.vel_y = 5.0;
        body.impulse();
        assert_eq!(body.vel_y, -6.0);
    }

    #[test]
    fn test_impulse_is_not_additive() {
        let mut body = flappy_body();
        body.impulse();
        body.impulse();
        assert_eq!(body.vel_y, -6.0);
    }

    #[test]
    fn test_ground_clamps_and_stops() {
        let config = GameConfig::from_preset(Preset::Runner).physics;
        let mut body = PhysicsBody::new(&config);
        assert!(body.grounded());
        for _ in 0..10 {
            body.apply_gravity();
        }
        assert!(body.grounded());
        assert_eq!(body.vel_y, 0.0);
        assert_eq!(body.bounds().bottom(), 550.0);
    }

    #[test]
    fn test_jump_leaves_and_returns_to_ground() {
        let config = GameConfig::from_preset(Preset::Runner).physics;
        let mut body = PhysicsBody::new(&config);
        body.impulse();
        body.apply_gravity();
        assert!(!body.grounded());
        assert!(body.pos.y < config.start_y);

        let mut ticks = 0;
        while !body.grounded() {
            body.apply_gravity();
            ticks += 1;
            assert!(ticks < 100, "body never landed");
        }
        assert_eq!(body.bounds().bottom(), 550.0);
    }

    #[test]
    fn test_no_ground_falls_freely() {
        let mut body = flappy_body();
        for _ in 0..1000 {
            body.apply_gravity();
        }
        assert!(!body.grounded());
        assert!(body.bounds().top() > 600.0);
    }
}
