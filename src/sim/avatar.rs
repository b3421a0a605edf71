//! The player-controlled square

use super::collision;
use super::obstacle::Obstacle;
use crate::consts::*;

/// Vertical body with integer position and velocity.
///
/// Velocity only changes through [`Avatar::advance`] (gravity) and
/// [`Avatar::jump`]. There is no floor: falling past the canvas is left
/// for the session to detect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    x: i32,
    y: i32,
    velocity: i32,
}

impl Default for Avatar {
    fn default() -> Self {
        Self {
            x: AVATAR_START_X,
            y: AVATAR_START_Y,
            velocity: 0,
        }
    }
}

impl Avatar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the start point, at rest
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// One tick of gravity integration
    pub fn advance(&mut self) {
        self.velocity += GRAVITY;
        self.y += self.velocity;
    }

    /// Overrides the current velocity, it does not add to it
    pub fn jump(&mut self) {
        self.velocity = JUMP_VELOCITY;
    }

    pub fn overlaps(&self, obstacle: &Obstacle) -> bool {
        collision::overlaps(self, obstacle)
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn velocity(&self) -> i32 {
        self.velocity
    }

    pub fn size(&self) -> i32 {
        AVATAR_SIZE
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, y: i32, velocity: i32) {
        self.y = y;
        self.velocity = velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reset_restores_start() {
        let mut avatar = Avatar::new();
        avatar.jump();
        avatar.advance();
        avatar.advance();
        avatar.reset();
        assert_eq!((avatar.x(), avatar.y(), avatar.velocity()), (100, 200, 0));
    }

    #[test]
    fn test_advance_integrates_velocity_first() {
        let mut avatar = Avatar::new();
        avatar.advance();
        assert_eq!(avatar.velocity(), 1);
        assert_eq!(avatar.y(), 201);
        avatar.advance();
        assert_eq!(avatar.y(), 203);
    }

    #[test]
    fn test_no_floor_clamp() {
        let mut avatar = Avatar::new();
        for _ in 0..100 {
            avatar.advance();
        }
        // 200 + 1 + 2 + ... + 100
        assert_eq!(avatar.y(), 200 + 5050);
        assert!(avatar.y() > CANVAS_HEIGHT);
    }

    #[test]
    fn test_x_never_moves() {
        let mut avatar = Avatar::new();
        avatar.jump();
        for _ in 0..10 {
            avatar.advance();
        }
        assert_eq!(avatar.x(), AVATAR_START_X);
    }

    proptest! {
        #[test]
        fn prop_gravity_accumulates(v0 in -50i32..50, ticks in 0i32..200) {
            let mut avatar = Avatar::new();
            avatar.place(0, v0);
            for _ in 0..ticks {
                avatar.advance();
            }
            prop_assert_eq!(avatar.velocity(), v0 + ticks * GRAVITY);
        }

        #[test]
        fn prop_jump_overrides_velocity(v0 in -1000i32..1000, y in -500i32..1500) {
            let mut avatar = Avatar::new();
            avatar.place(y, v0);
            avatar.jump();
            prop_assert_eq!(avatar.velocity(), JUMP_VELOCITY);
            avatar.jump();
            prop_assert_eq!(avatar.velocity(), JUMP_VELOCITY);
            prop_assert_eq!(avatar.y(), y);
        }
    }
}
