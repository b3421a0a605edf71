//! Avatar vs obstacle overlap test
//!
//! Axis-aligned boxes on integer coordinates. An obstacle is solid over its
//! whole width except for the vertical gap `[gap_top, gap_top + OBSTACLE_GAP]`.

use super::avatar::Avatar;
use super::obstacle::Obstacle;
use crate::consts::*;

/// Half-open horizontal spans `[a, a + a_len)` and `[b, b + b_len)` intersect
#[inline]
fn spans_intersect(a: i32, a_len: i32, b: i32, b_len: i32) -> bool {
    a + a_len > b && a < b + b_len
}

/// Box `[top, top + size)` pokes out of the gap above or below
#[inline]
fn outside_gap(top: i32, size: i32, gap_top: i32) -> bool {
    top < gap_top || top + size > gap_top + OBSTACLE_GAP
}

/// True when the avatar touches the solid part of the obstacle
pub fn overlaps(avatar: &Avatar, obstacle: &Obstacle) -> bool {
    spans_intersect(avatar.x(), avatar.size(), obstacle.x(), obstacle.width())
        && outside_gap(avatar.y(), avatar.size(), obstacle.gap_top())
}
