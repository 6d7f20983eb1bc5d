//! Obstacles and the field that spawns, scrolls and culls them
//!
//! Obstacles enter at the right edge and scroll left at a uniform speed, so
//! spawn order is also left-to-right screen order. Updates are two-phase:
//! `advance` moves everything, `cull` then sweeps out whatever left the screen.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::{GameConfig, ShapeConfig, gap_start_range};

/// Blocking geometry of one obstacle, fixed at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleShape {
    /// Two segments with an opening `[gap_start, gap_start + gap_size)` between them.
    /// The lower segment reaches down to `floor`.
    Gap {
        gap_start: f32,
        gap_size: f32,
        floor: f32,
    },
    /// A single solid block
    Block { top: f32, height: f32 },
}

/// A scrolling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Units moved left per tick
    pub speed: f32,
    shape: ObstacleShape,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, width: f32, speed: f32, shape: ObstacleShape) -> Self {
        Self {
            id,
            x,
            width,
            speed,
            shape,
        }
    }

    pub fn shape(&self) -> ObstacleShape {
        self.shape
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Scroll left by one tick
    pub fn advance(&mut self) {
        self.x -= self.speed;
    }

    /// True once the trailing edge has passed the left screen boundary
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }

    /// The one or two rects the player must not touch
    pub fn blocking_rects(&self) -> impl Iterator<Item = Rect> {
        let (first, second) = match self.shape {
            ObstacleShape::Gap {
                gap_start,
                gap_size,
                floor,
            } => {
                let gap_end = gap_start + gap_size;
                (
                    Rect::new(self.x, 0.0, self.width, gap_start),
                    Some(Rect::new(self.x, gap_end, self.width, floor - gap_end)),
                )
            }
            ObstacleShape::Block { top, height } => {
                (Rect::new(self.x, top, self.width, height), None)
            }
        };
        std::iter::once(first)
            .chain(second)
            .filter(|rect| !rect.is_empty())
    }
}

/// Owns the live obstacles in spawn order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    /// Ticks left until the next spawn is due (0 = due now)
    ticks_until_spawn: u32,
    scroll_speed: f32,
    next_id: u32,
    // Tuning, copied from config at construction
    spawn_x: f32,
    width: f32,
    floor: f32,
    shape: ShapeConfig,
    base_speed: f32,
    spawn_interval_ticks: u32,
    first_spawn_ticks: u32,
    min_spacing: f32,
}

impl ObstacleField {
    pub fn new(config: &GameConfig) -> Self {
        let obstacles = &config.obstacles;
        Self {
            obstacles: Vec::new(),
            ticks_until_spawn: obstacles.first_spawn_ticks,
            scroll_speed: obstacles.base_speed,
            next_id: 1,
            spawn_x: config.screen.width,
            width: obstacles.width,
            floor: config.floor(),
            shape: obstacles.shape.clone(),
            base_speed: obstacles.base_speed,
            spawn_interval_ticks: obstacles.spawn_interval_ticks,
            first_spawn_ticks: obstacles.first_spawn_ticks,
            min_spacing: obstacles.min_spacing,
        }
    }

    /// Back to the creation-time state: empty, base speed, first-spawn delay
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.ticks_until_spawn = self.first_spawn_ticks;
        self.scroll_speed = self.base_speed;
        self.next_id = 1;
    }

    /// Live obstacles, left to right
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    /// Change the scroll speed of the field and every live obstacle together
    pub fn set_scroll_speed(&mut self, speed: f32) {
        self.scroll_speed = speed;
        for obstacle in &mut self.obstacles {
            obstacle.speed = speed;
        }
    }

    /// Count down the spawn cadence and spawn at the right edge when due.
    ///
    /// A due spawn that would crowd the previous obstacle is held back and
    /// retried next tick. Returns the id of the spawned obstacle.
    pub fn spawn_if_due<R: Rng>(&mut self, rng: &mut R) -> Option<u32> {
        self.ticks_until_spawn = self.ticks_until_spawn.saturating_sub(1);
        if self.ticks_until_spawn > 0 {
            return None;
        }

        if let Some(last) = self.obstacles.last() {
            let clearance = self.spawn_x - last.right();
            if clearance < self.min_spacing {
                log::debug!(
                    "Spawn held back: clearance {:.1} < {:.1}",
                    clearance,
                    self.min_spacing
                );
                return None;
            }
        }

        let shape = match self.shape {
            ShapeConfig::Gap { gap_size, margin } => {
                let (min_start, max_start) = gap_start_range(self.floor, gap_size, margin);
                ObstacleShape::Gap {
                    gap_start: rng.random_range(min_start..=max_start),
                    gap_size,
                    floor: self.floor,
                }
            }
            ShapeConfig::Block {
                min_height,
                max_height,
            } => {
                let height = rng.random_range(min_height..=max_height);
                ObstacleShape::Block {
                    top: self.floor - height,
                    height,
                }
            }
        };

        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle::new(
            id,
            self.spawn_x,
            self.width,
            self.scroll_speed,
            shape,
        ));
        self.ticks_until_spawn = self.spawn_interval_ticks;
        log::debug!("Spawned obstacle {} {:?}", id, shape);
        Some(id)
    }

    /// Move every obstacle left by one tick
    pub fn advance(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.advance();
        }
    }

    /// Remove every obstacle that has left the screen.
    ///
    /// Returns the removed ids in removal (left-to-right) order.
    pub fn cull(&mut self) -> Vec<u32> {
        let mut culled = Vec::new();
        self.obstacles.retain(|obstacle| {
            if obstacle.is_offscreen() {
                culled.push(obstacle.id);
                false
            } else {
                true
            }
        });
        if !culled.is_empty() {
            log::debug!("Culled obstacles {:?}", culled);
        }
        culled
    }

    /// Smallest clearance between neighbouring obstacles, if there are two or more
    pub fn tightest_spacing(&self) -> Option<f32> {
        self.obstacles
            .windows(2)
            .map(|pair| pair[1].left() - pair[0].right())
            .reduce(f32::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn terminal_field() -> ObstacleField {
        ObstacleField::new(&GameConfig::from_preset(Preset::Terminal))
    }

    #[test]
    fn test_spawns_on_cadence() {
        let mut field = terminal_field();
        let mut rng = Pcg32::seed_from_u64(7);

        // first_spawn_ticks = 0: due on the very first tick
        assert!(field.spawn_if_due(&mut rng).is_some());
        for _ in 0..19 {
            assert!(field.spawn_if_due(&mut rng).is_none());
            field.advance();
        }
        assert!(field.spawn_if_due(&mut rng).is_some());
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_first_spawn_delay() {
        let config = GameConfig::from_preset(Preset::Runner);
        let mut field = ObstacleField::new(&config);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..89 {
            assert!(field.spawn_if_due(&mut rng).is_none());
        }
        assert!(field.spawn_if_due(&mut rng).is_some());
        let obstacle = &field.obstacles()[0];
        assert_eq!(obstacle.left(), 800.0);
        match obstacle.shape() {
            ObstacleShape::Block { top, height } => {
                assert!((60.0..=100.0).contains(&height));
                assert_eq!(top + height, 550.0);
            }
            ObstacleShape::Gap { .. } => panic!("runner spawns blocks"),
        }
    }

    #[test]
    fn test_gap_lies_within_margins() {
        let config = GameConfig::from_preset(Preset::Flappy);
        let (min_start, max_start) = config.gap_start_range().unwrap();
        let mut field = ObstacleField::new(&config);
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..2000 {
            field.spawn_if_due(&mut rng);
            field.advance();
            field.cull();
        }
        for obstacle in field.obstacles() {
            let ObstacleShape::Gap {
                gap_start,
                gap_size,
                ..
            } = obstacle.shape()
            else {
                panic!("flappy spawns gaps");
            };
            assert!((min_start..=max_start).contains(&gap_start));
            assert!(gap_start >= 50.0);
            assert!(gap_start + gap_size <= 550.0);
        }
    }

    #[test]
    fn test_spawn_held_back_when_crowded() {
        let mut config = GameConfig::from_preset(Preset::Terminal);
        config.obstacles.spawn_interval_ticks = 1;
        config.obstacles.min_spacing = 10.0;
        let mut field = ObstacleField::new(&config);
        let mut rng = Pcg32::seed_from_u64(1);

        let mut spawned = 0;
        for _ in 0..100 {
            if field.spawn_if_due(&mut rng).is_some() {
                spawned += 1;
            }
            field.advance();
            field.cull();
        }
        // One spawn every 11 ticks at speed 1 with width 1 and spacing 10
        assert!(spawned <= 10, "spawned {spawned}");
        assert!(field.tightest_spacing().unwrap() >= 10.0);
    }

    #[test]
    fn test_cull_removes_exactly_offscreen() {
        let mut field = terminal_field();
        let shape = ObstacleShape::Gap {
            gap_start: 5.0,
            gap_size: 6.0,
            floor: 24.0,
        };
        field.obstacles.push(Obstacle::new(1, -1.5, 1.0, 1.0, shape));
        field.obstacles.push(Obstacle::new(2, -1.0, 1.0, 1.0, shape));
        field.obstacles.push(Obstacle::new(3, 30.0, 1.0, 1.0, shape));

        // right edges: -0.5 (gone), 0.0 (still on the boundary), 31.0
        assert_eq!(field.cull(), vec![1]);
        let ids: Vec<u32> = field.obstacles().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert!(field.cull().is_empty());
    }

    #[test]
    fn test_every_obstacle_is_eventually_culled() {
        let mut field = terminal_field();
        let mut rng = Pcg32::seed_from_u64(3);
        field.spawn_if_due(&mut rng);
        let mut culled = Vec::new();
        for _ in 0..200 {
            field.advance();
            culled.extend(field.cull());
        }
        assert_eq!(culled, vec![1]);
        assert!(field.is_empty());
    }

    #[test]
    fn test_set_scroll_speed_is_uniform() {
        let mut field = terminal_field();
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..45 {
            field.spawn_if_due(&mut rng);
            field.advance();
        }
        field.set_scroll_speed(2.5);
        assert!(field.obstacles().iter().all(|o| o.speed == 2.5));
        let before = field.tightest_spacing();
        field.advance();
        assert_eq!(field.tightest_spacing(), before);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut field = terminal_field();
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..50 {
            field.spawn_if_due(&mut rng);
            field.advance();
        }
        field.set_scroll_speed(4.0);
        field.reset();
        assert!(field.is_empty());
        assert_eq!(field.scroll_speed(), 1.0);
        assert_eq!(field.spawn_if_due(&mut rng), Some(1));
    }

    #[test]
    fn test_gap_blocking_rects() {
        let shape = ObstacleShape::Gap {
            gap_start: 10.0,
            gap_size: 6.0,
            floor: 24.0,
        };
        let obstacle = Obstacle::new(1, 5.0, 1.0, 1.0, shape);
        let rects: Vec<Rect> = obstacle.blocking_rects().collect();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0], Rect::new(5.0, 0.0, 1.0, 10.0));
        assert_eq!(rects[1], Rect::new(5.0, 16.0, 1.0, 8.0));
    }
}
