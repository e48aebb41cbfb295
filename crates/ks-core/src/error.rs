//! Generation errors
//!
//! Phases report recoverable problems as [`RetryReason`] or [`OutOfSpace`];
//! only the orchestrator turns those into a fatal [`GenerationError`].

use thiserror::Error;

/// Why a generation attempt has to start over
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    #[error("no leaf room can hold the boss")]
    NoBossCandidate,

    #[error("no branching room on the solution path for a switch")]
    NoSwitchBranch,

    #[error("could not place a switch and its locks")]
    SwitchPlacementFailed,

    #[error("no room at level {level} can hold its key")]
    NoKeyRoom { level: usize },

    #[error("expected {expected} key levels, generated {found}")]
    KeyLevelMismatch { expected: usize, found: usize },

    #[error("layout rejected the finished dungeon")]
    Unacceptable,
}

/// Room growth ran out of free slots
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("ran out of free room slots after {rooms} rooms")]
pub struct OutOfSpace {
    pub rooms: usize,
}

/// Fatal generation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("dungeon generation failed after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: RetryReason },

    #[error(
        "failed to place rooms: rooms per lock shrank to zero after running out of space \
         at {rooms} rooms (is the boss room lock starving the layout?)"
    )]
    OutOfSpace { rooms: usize },
}

/// Invalid constraints or generator configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("entrance ({x}, {y}) lies outside the {width}x{height} grid")]
    EntranceOutOfBounds { x: i32, y: i32, width: u32, height: u32 },

    #[error("{rooms} rooms do not fit in a grid of {slots} slots")]
    TooManyRooms { rooms: usize, slots: usize },

    #[error("graphify probability {0} is not within [0, 1]")]
    InvalidProbability(f64),

    #[error("max_rooms must be at least 1")]
    NoRooms,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_reason_display() {
        let err = RetryReason::NoKeyRoom { level: 2 };
        assert!(err.to_string().contains("level 2"));
    }

    #[test]
    fn test_generation_error_carries_context() {
        let err = GenerationError::RetriesExhausted {
            attempts: 21,
            last: RetryReason::Unacceptable,
        };
        let msg = err.to_string();
        assert!(msg.contains("21 attempts"));
        assert!(msg.contains("rejected"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::TooManyRooms { rooms: 50, slots: 16 };
        assert_eq!(err.to_string(), "50 rooms do not fit in a grid of 16 slots");
    }
}
