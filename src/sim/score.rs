//! Score and level progression
//!
//! The level is derived from the score, `floor(score / threshold) + 1`, and
//! cached only so level-up detection is cheap.

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u64,
    level: u32,
    /// Level when the current tick began
    tick_start_level: u32,
    threshold: u64,
    cap: Option<u32>,
}

impl ScoreTracker {
    /// `threshold` must be non-zero; configs are validated before this is built.
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            score: 0,
            level: 1,
            tick_start_level: 1,
            threshold: config.level_threshold.max(1),
            cap: config.level_cap,
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.level = 1;
        self.tick_start_level = 1;
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn cap(&self) -> Option<u32> {
        self.cap
    }

    /// Add points. Score never decreases.
    pub fn add_progress(&mut self, delta: u64) {
        self.score = self.score.saturating_add(delta);
        self.level = level_for(self.score, self.threshold);
    }

    pub fn current_level(&self) -> u32 {
        self.level
    }

    /// Mark the start of a tick for [`leveled_up`](Self::leveled_up)
    pub fn begin_tick(&mut self) {
        self.tick_start_level = self.level;
    }

    /// True if the level rose since the last `begin_tick`, however many
    /// thresholds were crossed
    pub fn leveled_up(&self) -> bool {
        self.level > self.tick_start_level
    }

    /// True once the level reaches the configured cap
    pub fn reached_cap(&self) -> bool {
        self.cap.is_some_and(|cap| self.level >= cap)
    }
}

/// `floor(score / threshold) + 1`, saturating at `u32::MAX`
pub fn level_for(score: u64, threshold: u64) -> u32 {
    let level = (score / threshold.max(1)).saturating_add(1);
    u32::try_from(level).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScorePolicy;

    fn tracker(threshold: u64, cap: Option<u32>) -> ScoreTracker {
        ScoreTracker::new(&ScoringConfig {
            policy: ScorePolicy::PerObstacle,
            level_threshold: threshold,
            level_cap: cap,
        })
    }

    #[test]
    fn test_starts_at_level_one() {
        let t = tracker(100, Some(10));
        assert_eq!(t.score(), 0);
        assert_eq!(t.current_level(), 1);
        assert!(!t.leveled_up());
        assert!(!t.reached_cap());
    }

    #[test]
    fn test_cap_boundary() {
        let mut t = tracker(100, Some(10));
        t.add_progress(899);
        assert_eq!(t.current_level(), 9);
        assert!(!t.reached_cap());
        t.add_progress(1);
        assert_eq!(t.current_level(), 10);
        assert!(t.reached_cap());
    }

    #[test]
    fn test_level_up_fires_once_per_tick() {
        let mut t = tracker(10, None);
        t.begin_tick();
        t.add_progress(9);
        assert!(!t.leveled_up());

        t.begin_tick();
        t.add_progress(1);
        assert!(t.leveled_up());
        assert_eq!(t.current_level(), 2);

        t.begin_tick();
        assert!(!t.leveled_up());
    }

    #[test]
    fn test_multi_threshold_jump_is_one_level_up() {
        let mut t = tracker(10, None);
        t.begin_tick();
        t.add_progress(35);
        assert!(t.leveled_up());
        assert_eq!(t.current_level(), 4);
    }

    #[test]
    fn test_no_cap_never_completes() {
        let mut t = tracker(1, None);
        t.add_progress(1_000_000);
        assert!(!t.reached_cap());
    }

    #[test]
    fn test_saturates() {
        let mut t = tracker(1, None);
        t.add_progress(u64::MAX);
        t.add_progress(5);
        assert_eq!(t.score(), u64::MAX);
        assert_eq!(t.current_level(), u32::MAX);
    }

    #[test]
    fn test_reset() {
        let mut t = tracker(10, Some(3));
        t.add_progress(25);
        t.reset();
        assert_eq!(t, tracker(10, Some(3)));
    }
}
