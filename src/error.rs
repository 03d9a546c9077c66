//! Unified error types for the chassis controller.
//!
//! A single top-level `Error` enum that every subsystem converts into,
//! keeping the dispatch loop's error handling uniform.  Variants are
//! `Copy` so they can be handed to event sinks without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level controller error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A task request violated a pod-attachment precondition.
    Task(TaskError),
    /// An inbound wire frame could not be decoded.
    Codec(CodecError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task(e) => write!(f, "task: {e}"),
            Self::Codec(e) => write!(f, "codec: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Task request errors
// ---------------------------------------------------------------------------

/// Precondition violations raised by the idle-state task dispatcher.
///
/// These are local and non-fatal: the request is rejected and the status
/// record is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskError {
    /// Drop-off requested while no pod is attached.
    PodNotAttached,
    /// Pickup requested while a pod is already attached.
    PodAlreadyAttached,
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PodNotAttached => write!(f, "not docked to any pod, cannot drop off"),
            Self::PodAlreadyAttached => write!(f, "already docked to pod, cannot pick up"),
        }
    }
}

impl std::error::Error for TaskError {}

impl From<TaskError> for Error {
    fn from(e: TaskError) -> Self {
        Self::Task(e)
    }
}

// ---------------------------------------------------------------------------
// Wire codec errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// The frame is not valid JSON for any known message kind.
    Malformed,
    /// The frame is not valid UTF-8.
    InvalidUtf8,
    /// Snapshot encoding failed.
    EncodeFailed,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed frame"),
            Self::InvalidUtf8 => write!(f, "frame is not valid UTF-8"),
            Self::EncodeFailed => write!(f, "snapshot encoding failed"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        Self::Codec(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Controller-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
