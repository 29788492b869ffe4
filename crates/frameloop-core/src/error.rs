//! Error types for frameloop-core

use crate::ids::{CallId, ChannelId};
use thiserror::Error;

/// A failure raised by a collaborator operation
///
/// Surfaces at the `call` site of the process that issued the operation; it
/// is that process's decision to recover it locally or let it terminate the
/// process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("collaborator failed: {0}")]
    Failed(String),
}

/// An uncaught failure that terminates a single process
///
/// Termination never propagates to siblings or to the scheduler itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// Contract breach by a message producer; intentionally unrecovered
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// A collaborator call failure the process chose not to recover
    #[error(transparent)]
    Call(#[from] CallError),
}

/// Scheduler API error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown channel: {0}")]
    UnknownChannel(ChannelId),

    #[error("unknown call: {0}")]
    UnknownCall(CallId),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
