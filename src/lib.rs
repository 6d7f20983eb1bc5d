//! Arcade Runner - an endless-runner / gap-threader arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, session state)
//! - `config`: Data-driven game tuning and presets
//! - `audio`: Event-driven sound cues
//! - `platform`: Terminal host (fixed timestep, input mapping, rendering)

pub mod audio;
pub mod config;
pub mod error;
pub mod platform;
pub mod sim;

pub use config::{GameConfig, Preset};
pub use error::ConfigError;

/// Host loop constants
pub mod consts {
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Seed used when the host is not given one
    pub const DEFAULT_SEED: u64 = 0x5EA1_F00D;

    /// Environment variable selecting a preset (`runner`, `flappy`, `terminal`)
    pub const PRESET_ENV: &str = "ARCADE_PRESET";
    /// Environment variable pointing at a JSON config file
    pub const CONFIG_ENV: &str = "ARCADE_CONFIG";
}
