//! Error types

use thiserror::Error;

use crate::circuit::{GateId, GateKind, WireId};

/// Errors reported by circuit mutations
///
/// None of them leave the circuit in an inconsistent state; callers such as the
/// editor treat them as rejected commands.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CircuitError {
    /// The gate handle does not refer to a live gate
    #[error("Gate {0} does not exist")]
    UnknownGate(GateId),

    /// The wire handle does not refer to a live wire
    #[error("Wire {0} does not exist")]
    UnknownWire(WireId),

    /// Only input probes can be toggled
    #[error("Gate {0} is a {1} gate, only INPUT gates can be toggled")]
    NotAnInput(GateId, GateKind),
}

/// Unknown gate keyword
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown gate kind {0}")]
pub struct ParseKindError(pub String);

/// Errors when reading an editor script
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ScriptError {
    /// The command keyword is not recognized
    #[error("line {line}: unknown command {command}")]
    UnknownCommand {
        /// 1-based line number
        line: usize,
        /// Offending keyword
        command: String,
    },

    /// The command has the wrong number of arguments
    #[error("line {line}: {command} expects {expected}")]
    Arguments {
        /// 1-based line number
        line: usize,
        /// Command keyword
        command: String,
        /// Description of the expected arguments
        expected: &'static str,
    },

    /// An argument is not a valid integer
    #[error("line {line}: invalid number {value}")]
    Number {
        /// 1-based line number
        line: usize,
        /// Offending argument
        value: String,
    },

    /// The gate keyword is not recognized
    #[error("line {line}: {source}")]
    Kind {
        /// 1-based line number
        line: usize,
        /// Underlying error
        source: ParseKindError,
    },

    /// Reading the script failed
    #[error("error during script IO: {0}")]
    Io(String),
}

impl From<std::io::Error> for ScriptError {
    fn from(err: std::io::Error) -> Self {
        ScriptError::Io(err.to_string())
    }
}
