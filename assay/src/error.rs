use crate::intent::{Intent, Slot};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("{intent} requires a {slot} but none was recognized")]
    MissingSlot { intent: Intent, slot: Slot },
}

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("graph store unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("graph store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("query failed ({code}): {message}")]
    Query { code: String, message: String },

    #[error("malformed store response: {0}")]
    Malformed(String),

    #[error("graph store connection already closed")]
    Closed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("row {row} is missing field `{field}`")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row} field `{field}` has unexpected type")]
    InvalidField { row: usize, field: &'static str },
}

#[derive(Debug, Error)]
pub enum RecognizerError {
    #[error("entity service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("entity service returned {status}: {body}")]
    Status { status: u16, body: String },
}
