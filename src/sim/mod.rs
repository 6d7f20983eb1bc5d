//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order = left-to-right)
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod collision;
pub mod obstacle;
pub mod rect;
pub mod score;
pub mod state;
pub mod tick;

pub use body::PhysicsBody;
pub use collision::{collides, first_hit, out_of_bounds};
pub use obstacle::{Obstacle, ObstacleField, ObstacleShape};
pub use rect::Rect;
pub use score::{ScoreTracker, level_for};
pub use state::{FailCause, GameEvent, GamePhase, LogNotifier, Notifier, Snapshot};
pub use tick::{GameSession, TickInput};
