//! This module defines the core data structures and types shared by the simulator: symbols,
//! states, head moves, the dead-end policy, run outcomes and the crate error type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::configuration::ConfigId;

/// A tape symbol. Any printable character, or the distinguished [`BLANK`].
pub type Symbol = char;
/// A machine state label. The simulator only ever compares states for equality.
pub type State = String;

/// The blank symbol filling every tape cell that was never written.
pub const BLANK: Symbol = '_';
/// Step budget for callers that have no preference.
pub const DEFAULT_STEP_BUDGET: usize = 10000;

/// Represents the possible directions the head can move. Every transition moves the head
/// by exactly one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
}

/// Controls how the explorer treats a configuration for which no rule is defined.
///
/// - `Prune` (default): the branch is dropped silently and counted as a dead end.
/// - `Reject`: the branch takes an implicit transition into rejection. That transition
///   consumes one unit of the step budget and is counted as a rejected branch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Undefined transitions are dead ends.
    #[default]
    Prune,
    /// Undefined transitions reject.
    Reject,
}

/// The final verdict of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Some branch reached an accept state.
    Accepted,
    /// Every branch was pruned or rejected before the budget ran out.
    Rejected,
    /// The step budget ran out before either of the above.
    Inconclusive,
}

/// Represents the result of expanding one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The next generation is ready to be expanded.
    Continue,
    /// Exploration is over.
    Halt(Outcome),
}

/// Represents the errors the simulator can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NtmError {
    /// The machine description is structurally inconsistent.
    #[error("Machine validation error: {0}")]
    ValidationError(String),
    /// The input string contains a symbol outside the input alphabet.
    #[error("Input symbol {symbol:?} at position {position} is not in the input alphabet")]
    InvalidInput { symbol: Symbol, position: usize },
    /// A path was requested from a run that has no accepting configuration.
    #[error("No accepting configuration to reconstruct a path from")]
    NoWitness,
    /// A configuration id does not belong to the history it was looked up in.
    #[error("Unknown configuration: {0}")]
    UnknownConfiguration(ConfigId),
    /// No built-in program has the requested name or index.
    #[error("Program not found: {0}")]
    ProgramNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_serialization() {
        let left_json = serde_json::to_string(&Move::Left).unwrap();
        let right_json = serde_json::to_string(&Move::Right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left: Move = serde_json::from_str(&left_json).unwrap();
        assert_eq!(left, Move::Left);
    }

    #[test]
    fn test_default_mode_prunes() {
        assert_eq!(Mode::default(), Mode::Prune);
    }

    #[test]
    fn test_error_display() {
        let error = NtmError::InvalidInput {
            symbol: 'z',
            position: 3,
        };

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("'z'"));
        assert!(error_msg.contains("position 3"));
    }
}
