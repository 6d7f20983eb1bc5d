//! Game tuning and presets
//!
//! All balance values live here so the simulation stays data-driven. A config
//! is validated once when a session is built; nothing is checked mid-tick.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{CONFIG_ENV, PRESET_ENV};
use crate::error::ConfigError;

/// Built-in tunings, one per game variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Endless runner: jump blocks on the ground, level up over time
    #[default]
    Runner,
    /// Gap threader: flap through pipes, one point per pipe
    Flappy,
    /// Gap threader sized for an 80x24 terminal
    Terminal,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Runner => "Runner",
            Preset::Flappy => "Flappy",
            Preset::Terminal => "Terminal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "runner" | "run" => Some(Preset::Runner),
            "flappy" | "flap" => Some(Preset::Flappy),
            "terminal" | "term" | "tui" => Some(Preset::Terminal),
            _ => None,
        }
    }
}

/// World dimensions and tick rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
    /// Fixed simulation rate
    pub tick_rate_hz: u32,
}

/// Player entity physics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Start position (top-left corner)
    pub start_x: f32,
    pub start_y: f32,
    pub width: f32,
    pub height: f32,
    /// Added to velocity every tick (y grows downward)
    pub gravity: f32,
    /// Velocity set by a jump/flap; must be negative
    pub impulse: f32,
    /// Floor line the body lands on. When set, impulses only fire while grounded.
    #[serde(default)]
    pub ground: Option<f32>,
}

/// Obstacle geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeConfig {
    /// Pipe pair with an opening of `gap_size`, kept `margin` away from both edges
    Gap { gap_size: f32, margin: f32 },
    /// Solid block standing on the ground, height drawn from `[min_height, max_height]`
    Block { min_height: f32, max_height: f32 },
}

/// Obstacle spawning and scrolling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleConfig {
    pub width: f32,
    pub shape: ShapeConfig,
    /// Scroll speed at level 1 (units per tick)
    pub base_speed: f32,
    /// Extra scroll speed per level above 1
    #[serde(default)]
    pub speed_per_level: f32,
    /// Ticks between spawns
    pub spawn_interval_ticks: u32,
    /// Ticks before the first spawn of a round
    #[serde(default)]
    pub first_spawn_ticks: u32,
    /// Minimum clearance between one obstacle's right edge and the next one's left edge
    pub min_spacing: f32,
}

/// How score accrues. Exactly one policy applies per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScorePolicy {
    /// One point per obstacle that scrolls fully off screen
    PerObstacle,
    /// One point per `ticks_per_point` ticks survived
    Survival { ticks_per_point: u32 },
}

/// Score and level progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub policy: ScorePolicy,
    /// Points per level
    pub level_threshold: u64,
    /// Reaching this level completes the session; `None` plays forever
    #[serde(default)]
    pub level_cap: Option<u32>,
}

/// Complete game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub physics: PhysicsConfig,
    pub obstacles: ObstacleConfig,
    pub scoring: ScoringConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl GameConfig {
    /// Create a config from a preset
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Runner => Self {
                screen: ScreenConfig {
                    width: 800.0,
                    height: 600.0,
                    tick_rate_hz: 60,
                },
                physics: PhysicsConfig {
                    start_x: 70.0,
                    start_y: 510.0,
                    width: 60.0,
                    height: 40.0,
                    gravity: 0.8,
                    impulse: -15.0,
                    ground: Some(550.0),
                },
                obstacles: ObstacleConfig {
                    width: 50.0,
                    shape: ShapeConfig::Block {
                        min_height: 60.0,
                        max_height: 100.0,
                    },
                    base_speed: 5.0,
                    speed_per_level: 1.0,
                    spawn_interval_ticks: 90, // 1.5s at 60 Hz
                    first_spawn_ticks: 90,
                    min_spacing: 150.0,
                },
                scoring: ScoringConfig {
                    policy: ScorePolicy::Survival { ticks_per_point: 60 },
                    level_threshold: 100,
                    level_cap: Some(10),
                },
            },
            Preset::Flappy => Self {
                screen: ScreenConfig {
                    width: 400.0,
                    height: 600.0,
                    tick_rate_hz: 60,
                },
                physics: PhysicsConfig {
                    start_x: 33.0,
                    start_y: 288.0,
                    width: 34.0,
                    height: 24.0,
                    gravity: 0.25,
                    impulse: -6.0,
                    ground: None,
                },
                obstacles: ObstacleConfig {
                    width: 70.0,
                    shape: ShapeConfig::Gap {
                        gap_size: 150.0,
                        margin: 50.0,
                    },
                    base_speed: 3.0,
                    speed_per_level: 0.0,
                    spawn_interval_ticks: 67, // ~200px apart
                    first_spawn_ticks: 0,
                    min_spacing: 120.0,
                },
                scoring: ScoringConfig {
                    policy: ScorePolicy::PerObstacle,
                    level_threshold: 10,
                    level_cap: None,
                },
            },
            Preset::Terminal => Self {
                screen: ScreenConfig {
                    width: 80.0,
                    height: 24.0,
                    tick_rate_hz: 20,
                },
                physics: PhysicsConfig {
                    start_x: 20.0,
                    start_y: 12.0,
                    width: 1.0,
                    height: 1.0,
                    gravity: 0.1,
                    impulse: -2.0,
                    ground: None,
                },
                obstacles: ObstacleConfig {
                    width: 1.0,
                    shape: ShapeConfig::Gap {
                        gap_size: 6.0,
                        margin: 2.0,
                    },
                    base_speed: 1.0,
                    speed_per_level: 0.0,
                    spawn_interval_ticks: 20,
                    first_spawn_ticks: 0,
                    min_spacing: 10.0,
                },
                scoring: ScoringConfig {
                    policy: ScorePolicy::PerObstacle,
                    level_threshold: 10,
                    level_cap: None,
                },
            },
        }
    }

    /// Line obstacles rest on: the ground if there is one, else the screen bottom
    pub fn floor(&self) -> f32 {
        self.physics.ground.unwrap_or(self.screen.height)
    }

    /// Valid range for a gap's top edge, `None` for block obstacles
    pub fn gap_start_range(&self) -> Option<(f32, f32)> {
        match self.obstacles.shape {
            ShapeConfig::Gap { gap_size, margin } => {
                Some(gap_start_range(self.floor(), gap_size, margin))
            }
            ShapeConfig::Block { .. } => None,
        }
    }

    /// Check every value that would otherwise break the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        let screen = &self.screen;
        if screen.width <= 0.0 || screen.height <= 0.0 || screen.tick_rate_hz == 0 {
            return Err(ConfigError::InvalidScreen {
                width: screen.width,
                height: screen.height,
                tick_rate_hz: screen.tick_rate_hz,
            });
        }

        let physics = &self.physics;
        if physics.gravity <= 0.0 {
            return Err(ConfigError::InvalidGravity(physics.gravity));
        }
        if physics.impulse >= 0.0 {
            return Err(ConfigError::InvalidImpulse(physics.impulse));
        }
        if physics.width <= 0.0 || physics.height <= 0.0 {
            return Err(ConfigError::InvalidEntitySize {
                width: physics.width,
                height: physics.height,
            });
        }

        let obstacles = &self.obstacles;
        if obstacles.width <= 0.0 {
            return Err(ConfigError::InvalidObstacleWidth(obstacles.width));
        }
        for (field, value) in [
            ("base_speed", obstacles.base_speed),
            ("speed_per_level", obstacles.speed_per_level),
            ("min_spacing", obstacles.min_spacing),
        ] {
            if value < 0.0 {
                return Err(ConfigError::NegativeObstacleValue { field, value });
            }
        }
        if obstacles.spawn_interval_ticks == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        match obstacles.shape {
            ShapeConfig::Gap { gap_size, margin } => {
                let (min, max) = gap_start_range(self.floor(), gap_size, margin);
                if gap_size <= 0.0 || margin < 0.0 || min > max {
                    return Err(ConfigError::InvalidSpawnRange { min, max });
                }
            }
            ShapeConfig::Block {
                min_height,
                max_height,
            } => {
                let ground = self.floor();
                if min_height <= 0.0 || min_height > max_height || max_height > ground {
                    return Err(ConfigError::InvalidBlockHeight {
                        min: min_height,
                        max: max_height,
                        ground,
                    });
                }
            }
        }

        let scoring = &self.scoring;
        if scoring.level_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if let Some(cap) = scoring.level_cap.filter(|&cap| cap < 2) {
            return Err(ConfigError::InvalidLevelCap(cap));
        }
        if let ScorePolicy::Survival { ticks_per_point: 0 } = scoring.policy {
            return Err(ConfigError::ZeroTicksPerPoint);
        }

        Ok(())
    }

    /// Every float in the screen, physics and obstacle groups, by name
    fn float_fields(&self) -> Vec<(&'static str, f32)> {
        let physics = &self.physics;
        let obstacles = &self.obstacles;
        let mut fields = vec![
            ("screen.width", self.screen.width),
            ("screen.height", self.screen.height),
            ("physics.start_x", physics.start_x),
            ("physics.start_y", physics.start_y),
            ("physics.width", physics.width),
            ("physics.height", physics.height),
            ("physics.gravity", physics.gravity),
            ("physics.impulse", physics.impulse),
            ("obstacles.width", obstacles.width),
            ("obstacles.base_speed", obstacles.base_speed),
            ("obstacles.speed_per_level", obstacles.speed_per_level),
            ("obstacles.min_spacing", obstacles.min_spacing),
        ];
        if let Some(ground) = physics.ground {
            fields.push(("physics.ground", ground));
        }
        match obstacles.shape {
            ShapeConfig::Gap { gap_size, margin } => {
                fields.push(("obstacles.shape.gap_size", gap_size));
                fields.push(("obstacles.shape.margin", margin));
            }
            ShapeConfig::Block {
                min_height,
                max_height,
            } => {
                fields.push(("obstacles.shape.min_height", min_height));
                fields.push(("obstacles.shape.max_height", max_height));
            }
        }
        fields
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a JSON config file
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the config from the environment: a JSON file if one is named,
    /// otherwise a preset (default when unset or unknown).
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load_file(Path::new(&path));
        }

        let preset = match std::env::var(PRESET_ENV) {
            Ok(name) => Preset::from_str(&name).unwrap_or_else(|| {
                log::warn!("Unknown preset {:?}, using {}", name, Preset::default().as_str());
                Preset::default()
            }),
            Err(_) => Preset::default(),
        };
        log::info!("Using {} preset", preset.as_str());

        let config = Self::from_preset(preset);
        config.validate()?;
        Ok(config)
    }
}

/// Range a gap's top edge is drawn from: `margin` clear of the top and of `floor`
pub fn gap_start_range(floor: f32, gap_size: f32, margin: f32) -> (f32, f32) {
    (margin, floor - gap_size - margin)
}
