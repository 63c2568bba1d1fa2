//! Game-logic error taxonomy
//!
//! None of these are fatal. The tick loop logs and drops them; callers that
//! drive the simulation directly can inspect why an action was refused.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameError {
    /// Fire attempted from a battery with no missiles left (or destroyed)
    OutOfAmmo,
    /// Projectile path cannot be built (non-finite target)
    InvalidDestination,
    /// Player input with no living, loaded battery to service it
    NoLivingTarget,
    /// Input delivered while paused, before a game starts or after game over
    NotPlaying,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfAmmo => write!(f, "battery is out of ammunition"),
            Self::InvalidDestination => write!(f, "invalid projectile destination"),
            Self::NoLivingTarget => write!(f, "no living battery with missiles left"),
            Self::NotPlaying => write!(f, "game is not accepting input"),
        }
    }
}

impl std::error::Error for GameError {}
