//! Gapped barriers that scroll left and recycle themselves

use rand::Rng;

use crate::consts::*;

/// A barrier spanning the full canvas height except for one gap.
///
/// `gap_top` always lies in `GAP_MARGIN..CANVAS_HEIGHT - GAP_MARGIN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obstacle {
    x: i32,
    gap_top: i32,
    /// Set once the avatar has passed this obstacle; cleared on recycle
    scored: bool,
}

fn random_gap_top<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.random_range(GAP_MARGIN..CANVAS_HEIGHT - GAP_MARGIN)
}

impl Obstacle {
    pub fn new<R: Rng + ?Sized>(x: i32, rng: &mut R) -> Self {
        Self {
            x,
            gap_top: random_gap_top(rng),
            scored: false,
        }
    }

    /// Scroll left by `speed`. Once fully off the left edge the obstacle
    /// jumps back to the right edge with a fresh gap.
    pub fn advance<R: Rng + ?Sized>(&mut self, speed: i32, rng: &mut R) {
        self.x -= speed;
        if self.x < -OBSTACLE_WIDTH {
            self.x = CANVAS_WIDTH;
            self.gap_top = random_gap_top(rng);
            self.scored = false;
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn gap_top(&self) -> i32 {
        self.gap_top
    }

    pub fn gap_bottom(&self) -> i32 {
        self.gap_top + OBSTACLE_GAP
    }

    pub fn width(&self) -> i32 {
        OBSTACLE_WIDTH
    }

    pub fn is_scored(&self) -> bool {
        self.scored
    }

    pub(crate) fn mark_scored(&mut self) {
        self.scored = true;
    }

    #[cfg(test)]
    pub(crate) fn at(x: i32, gap_top: i32) -> Self {
        Self {
            x,
            gap_top,
            scored: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_advance_moves_left() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut obstacle = Obstacle::at(300, 250);
        obstacle.advance(OBSTACLE_SPEED, &mut rng);
        assert_eq!(obstacle.x(), 295);
        assert_eq!(obstacle.gap_top(), 250);
    }

    #[test]
    fn test_exactly_minus_width_is_not_recycled() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut obstacle = Obstacle::at(-OBSTACLE_WIDTH + OBSTACLE_SPEED, 250);
        obstacle.advance(OBSTACLE_SPEED, &mut rng);
        assert_eq!(obstacle.x(), -OBSTACLE_WIDTH);
    }

    #[test]
    fn test_recycle_clears_scored() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut obstacle = Obstacle::at(-OBSTACLE_WIDTH, 250);
        obstacle.mark_scored();
        obstacle.advance(OBSTACLE_SPEED, &mut rng);
        assert_eq!(obstacle.x(), CANVAS_WIDTH);
        assert!(!obstacle.is_scored());
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(Obstacle::new(0, &mut a), Obstacle::new(0, &mut b));
        }
    }

    proptest! {
        #[test]
        fn prop_new_gap_in_range(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let obstacle = Obstacle::new(CANVAS_WIDTH, &mut rng);
            prop_assert!(obstacle.gap_top() >= 100);
            prop_assert!(obstacle.gap_top() < CANVAS_HEIGHT - 100);
        }

        #[test]
        fn prop_recycles_to_right_edge(seed in any::<u64>(), x in -OBSTACLE_WIDTH - 10..-OBSTACLE_WIDTH + OBSTACLE_SPEED) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut obstacle = Obstacle::at(x, 250);
            obstacle.advance(OBSTACLE_SPEED, &mut rng);
            prop_assert_eq!(obstacle.x(), CANVAS_WIDTH);
            prop_assert!((100..CANVAS_HEIGHT - 100).contains(&obstacle.gap_top()));
        }
    }
}
