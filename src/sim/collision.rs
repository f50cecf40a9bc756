//! Collision queries against the room grid
//!
//! Entities are approximated by nine sample points: the center, one radius out on
//! each axis and four diagonals at radius·cos45°. Cheaper than a true circle test,
//! at the cost of some leakage at diagonal cell corners.

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;

use super::grid::GridMap;
use crate::consts::COLLISION_RADIUS;

/// Sample offsets for a footprint of the given radius
#[inline]
fn footprint(radius: f32) -> [Vec2; 9] {
    let d = radius * FRAC_1_SQRT_2;
    [
        Vec2::ZERO,
        Vec2::new(radius, 0.0),
        Vec2::new(-radius, 0.0),
        Vec2::new(0.0, radius),
        Vec2::new(0.0, -radius),
        Vec2::new(d, d),
        Vec2::new(-d, d),
        Vec2::new(d, -d),
        Vec2::new(-d, -d),
    ]
}

/// Whether an entity centered at `pos` fits in the room.
///
/// Every sample must land in an in-bounds floor cell.
pub fn can_occupy(grid: &GridMap, pos: Vec2) -> bool {
    can_occupy_with_radius(grid, pos, COLLISION_RADIUS)
}

pub fn can_occupy_with_radius(grid: &GridMap, pos: Vec2, radius: f32) -> bool {
    footprint(radius)
        .iter()
        .all(|&offset| !grid.is_wall_at(pos + offset))
}

/// Per-axis point test for a move from `from` to `to`.
///
/// Returns (x_blocked, y_blocked). A move that only hits a wall diagonally
/// (both single-axis moves clear, the combined move blocked) blocks both axes.
pub fn blocked_axes(grid: &GridMap, from: Vec2, to: Vec2) -> (bool, bool) {
    let x_blocked = grid.is_wall_at(Vec2::new(to.x, from.y));
    let y_blocked = grid.is_wall_at(Vec2::new(from.x, to.y));
    if !x_blocked && !y_blocked && grid.is_wall_at(to) {
        return (true, true);
    }
    (x_blocked, y_blocked)
}
