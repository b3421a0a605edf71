//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Integer world units, one fixed tick at a time
//! - Seeded RNG only
//! - Obstacles processed in collection order
//! - No rendering, audio or file access

pub mod avatar;
pub mod collision;
pub mod obstacle;
pub mod session;

pub use avatar::Avatar;
pub use collision::overlaps;
pub use obstacle::Obstacle;
pub use session::{GameOver, GameOverCause, Session, TickOutcome};
