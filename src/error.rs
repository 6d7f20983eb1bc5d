//! Configuration errors
//!
//! Everything here is raised while building a session, never mid-tick.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("screen must have positive width, height and tick rate (got {width}x{height} @ {tick_rate_hz} Hz)")]
    InvalidScreen {
        width: f32,
        height: f32,
        tick_rate_hz: u32,
    },

    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f32 },

    #[error("gravity must be positive (got {0})")]
    InvalidGravity(f32),

    #[error("impulse must be negative (upward), got {0}")]
    InvalidImpulse(f32),

    #[error("entity size must be positive (got {width}x{height})")]
    InvalidEntitySize { width: f32, height: f32 },

    #[error("spawn range is empty: gap_start would have to lie in [{min}, {max}]")]
    InvalidSpawnRange { min: f32, max: f32 },

    #[error("block height range [{min}, {max}] is invalid for ground at {ground}")]
    InvalidBlockHeight { min: f32, max: f32, ground: f32 },

    #[error("spawn interval must be at least one tick")]
    ZeroSpawnInterval,

    #[error("obstacle {field} must be non-negative (got {value})")]
    NegativeObstacleValue { field: &'static str, value: f32 },

    #[error("obstacle width must be positive (got {0})")]
    InvalidObstacleWidth(f32),

    #[error("level threshold must be positive")]
    ZeroThreshold,

    #[error("level cap must be at least 2 (got {0})")]
    InvalidLevelCap(u32),

    #[error("survival scoring needs at least one tick per point")]
    ZeroTicksPerPoint,

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
