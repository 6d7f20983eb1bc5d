//! Session phases, events and read-only views
//!
//! Everything a collaborator (renderer, audio, logger) sees of the simulation
//! is defined here. Collaborators get events pushed through a [`Notifier`] and
//! pull [`Snapshot`]s; neither gives write access to the session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for the activate input
    #[default]
    Idle,
    /// Active simulation
    Playing,
    /// Hit an obstacle or left the play area
    Failed,
    /// Reached the level cap
    Completed,
}

impl GamePhase {
    /// Whether the round is over and waiting for a restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Failed | GamePhase::Completed)
    }
}

/// Why a round was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailCause {
    /// Overlapped an obstacle
    Obstacle { id: u32 },
    /// Left the vertical play area
    OutOfBounds,
}

/// Discrete notifications emitted by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Left `Idle` for a fresh round
    Started,
    /// Jump/flap applied
    Impulse,
    /// A point was scored
    Scored { score: u64 },
    /// Level increased (once per tick, even across several thresholds)
    LevelUp { level: u32 },
    /// Round lost
    Failed { cause: FailCause, score: u64 },
    /// Level cap reached
    Completed { level: u32, score: u64 },
    /// Back on the start screen after a finished round
    Restarted,
}

/// Receives session events. Called synchronously inside `tick`, so
/// implementations must not block and must keep their own failures to
/// themselves.
pub trait Notifier {
    fn notify(&mut self, event: &GameEvent);
}

/// Discards every event
impl Notifier for () {
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Records events in order
impl Notifier for Vec<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        self.push(*event);
    }
}

/// Fans out to two notifiers
impl<A: Notifier, B: Notifier> Notifier for (A, B) {
    fn notify(&mut self, event: &GameEvent) {
        self.0.notify(event);
        self.1.notify(event);
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&mut self, event: &GameEvent) {
        (**self).notify(event);
    }
}

/// Logs every event through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Impulse | GameEvent::Scored { .. } => log::trace!("{:?}", event),
            _ => log::info!("{:?}", event),
        }
    }
}

/// Read-only view of one frame for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    /// World width and height
    pub world: Vec2,
    /// Ground line, if the world has one
    pub ground: Option<f32>,
    pub body: Rect,
    /// Every blocking rect of every live obstacle, left to right
    pub obstacles: Vec<Rect>,
    pub score: u64,
    pub level: u32,
    pub level_cap: Option<u32>,
    /// Ticks simulated in the current round
    pub round_ticks: u64,
    /// Set while `Failed`
    pub fail_cause: Option<FailCause>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_phases() {
        assert!(!GamePhase::Idle.is_terminal());
        assert!(!GamePhase::Playing.is_terminal());
        assert!(GamePhase::Failed.is_terminal());
        assert!(GamePhase::Completed.is_terminal());
    }

    #[test]
    fn test_pair_notifier_fans_out() {
        let mut pair = (Vec::new(), Vec::new());
        pair.notify(&GameEvent::Started);
        pair.notify(&GameEvent::LevelUp { level: 2 });
        assert_eq!(pair.0, pair.1);
        assert_eq!(pair.0.len(), 2);
    }

    #[test]
    fn test_boxed_notifier() {
        let mut boxed: Box<dyn Notifier> = Box::new(LogNotifier);
        boxed.notify(&GameEvent::Impulse);
    }
}
