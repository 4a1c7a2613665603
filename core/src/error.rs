use thiserror::Error;

use crate::types::FighterId;

/// Rejected match configuration. Raised once, when a match is created; the
/// running simulation itself never fails.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("arena must have a positive size, got {width}x{height}")]
    InvalidArenaSize { width: f64, height: f64 },

    #[error("ground line {ground_y} lies outside the arena height {height}")]
    GroundOutsideArena { ground_y: f64, height: f64 },

    #[error("platform bounds [{left}, {right}] are inverted or outside the arena")]
    InvalidPlatform { left: f64, right: f64 },

    #[error("fighter {fighter}: a human-controlled fighter needs a control binding")]
    MissingBinding { fighter: FighterId },

    #[error("fighter {fighter}: sprite frame size must be non-zero")]
    EmptySpriteFrame { fighter: FighterId },

    #[error("fighter {fighter}: sprite strip has no frames")]
    EmptySpriteStrip { fighter: FighterId },

    #[error("fighter {fighter}: sprite strip frame counts overflow")]
    SpriteStripTooLong { fighter: FighterId },

    #[error("fighter {fighter}: body of {width}x{height} does not fit the arena")]
    FighterTooLarge {
        fighter: FighterId,
        width: i32,
        height: i32,
    },

    #[error("round duration must be positive, got {0}")]
    InvalidRoundDuration(f64),

    #[error("rounds_to_win must be at least 1")]
    NoRoundsToWin,
}
