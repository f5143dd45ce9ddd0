//! Route a filename to the handler registered for its extension.
//!
//! The handler's verdict is returned as-is. "No handler" is a normal outcome
//! (`Dispatch::Unhandled`), not an error: callers fall back to another path.

use log::debug;

use crate::ext::extract_extension;
use crate::metrics;
use crate::registry::{Direction, FormatRegistry};
use crate::state::ImageState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A handler ran; its result.
    Handled(bool),
    /// The filename has an extension nobody registered.
    Unhandled,
    /// The filename has no extension; the registry was not consulted.
    NoExtension,
}

impl Dispatch {
    pub fn succeeded(self) -> bool {
        matches!(self, Dispatch::Handled(true))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dispatch::Handled(_) => "handled",
            Dispatch::Unhandled => "unhandled",
            Dispatch::NoExtension => "no-extension",
        }
    }
}

pub fn dispatch(
    reg: &FormatRegistry,
    dir: Direction,
    state: &mut ImageState,
    filename: &str,
) -> Dispatch {
    let Some(ext) = extract_extension(filename) else {
        metrics::record_dispatch_no_ext();
        return Dispatch::NoExtension;
    };

    match reg.lookup(dir, ext) {
        Some(entry) => {
            metrics::record_dispatch_hit();
            let ok = (entry.handler())(state, filename);
            debug!("dispatch {} {} -> .{} handler, ok={}", dir.as_str(), filename, entry.ext(), ok);
            Dispatch::Handled(ok)
        }
        None => {
            metrics::record_dispatch_miss();
            debug!("dispatch {} {}: no handler for .{}", dir.as_str(), filename, ext);
            Dispatch::Unhandled
        }
    }
}

pub fn dispatch_load(reg: &FormatRegistry, state: &mut ImageState, filename: &str) -> Dispatch {
    dispatch(reg, Direction::Load, state, filename)
}

pub fn dispatch_save(reg: &FormatRegistry, state: &mut ImageState, filename: &str) -> Dispatch {
    dispatch(reg, Direction::Save, state, filename)
}
