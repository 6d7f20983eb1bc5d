//! Collision detection between the player and the obstacle field
//!
//! Pure functions, no mutation. Overlap is strict everywhere (see
//! [`Rect::overlaps`]): sharing an edge with a pipe or block is not a hit.

use super::obstacle::Obstacle;
use super::rect::Rect;

/// Check one obstacle against the entity bounds
#[inline]
pub fn hits_obstacle(entity: &Rect, obstacle: &Obstacle) -> bool {
    obstacle.blocking_rects().any(|rect| entity.overlaps(&rect))
}

/// Index of the first obstacle the entity overlaps.
///
/// Obstacles must be ordered left to right (the field guarantees this), which
/// lets the scan stop at the first obstacle starting at or beyond the
/// entity's right edge.
pub fn first_hit(entity: &Rect, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .enumerate()
        .take_while(|(_, obstacle)| obstacle.left() < entity.right())
        .filter(|(_, obstacle)| obstacle.right() > entity.left())
        .find(|(_, obstacle)| hits_obstacle(entity, obstacle))
        .map(|(index, _)| index)
}

/// Whether the entity overlaps any obstacle's blocking region
pub fn collides(entity: &Rect, obstacles: &[Obstacle]) -> bool {
    first_hit(entity, obstacles).is_some()
}

/// Whether the entity has left the vertical play area `[0, height]`
pub fn out_of_bounds(entity: &Rect, height: f32) -> bool {
    entity.top() < 0.0 || entity.bottom() > height
}
