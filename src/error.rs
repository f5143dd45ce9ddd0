//! Error taxonomy and the last-error stack.
//!
//! Library calls return `Result<_, HookError>`. The facade additionally pushes
//! every error onto an [`ErrorStack`] so C-style callers can poll it later
//! with `get_error()`.
//!
//! Notes:
//! - "not found" on remove and "unhandled" on dispatch are not errors and
//!   never reach the stack.

use std::collections::VecDeque;

use crate::consts::{
    DEFAULT_ERROR_STACK_DEPTH, ERR_ILLEGAL_OPERATION, ERR_INVALID_ENUM, ERR_INVALID_EXTENSION,
    ERR_INVALID_PARAM, ERR_OUT_OF_MEMORY,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    #[error("out of memory")]
    OutOfMemory,

    #[error("invalid {what} value 0x{value:04X}")]
    InvalidEnum { what: &'static str, value: u32 },

    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error("illegal operation: {0}")]
    IllegalOperation(String),

    #[error("no handler for extension of {0:?}")]
    InvalidExtension(String),

    #[error("requested chain of {requested} nodes exceeds max_chain_len {max}")]
    ChainTooLong { requested: usize, max: usize },
}

impl HookError {
    /// Host-compatible numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            HookError::OutOfMemory => ERR_OUT_OF_MEMORY,
            HookError::InvalidEnum { .. } => ERR_INVALID_ENUM,
            HookError::InvalidParam(_) | HookError::ChainTooLong { .. } => ERR_INVALID_PARAM,
            HookError::IllegalOperation(_) => ERR_ILLEGAL_OPERATION,
            HookError::InvalidExtension(_) => ERR_INVALID_EXTENSION,
        }
    }
}

pub type HookResult<T> = Result<T, HookError>;

/// Bounded LIFO of recent errors. On overflow the oldest entry is dropped.
#[derive(Debug)]
pub struct ErrorStack {
    depth: usize,
    errors: VecDeque<HookError>,
}

impl Default for ErrorStack {
    fn default() -> Self {
        Self::with_depth(DEFAULT_ERROR_STACK_DEPTH)
    }
}

impl ErrorStack {
    pub fn with_depth(depth: usize) -> Self {
        let depth = depth.max(1);
        Self {
            depth,
            errors: VecDeque::with_capacity(depth),
        }
    }

    pub fn push(&mut self, e: HookError) {
        if self.errors.len() == self.depth {
            self.errors.pop_front();
        }
        self.errors.push_back(e);
    }

    /// Pop the most recent error; `None` means "no error".
    pub fn pop(&mut self) -> Option<HookError> {
        self.errors.pop_back()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
