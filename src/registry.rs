//! Registry of user-supplied load/save handlers, keyed by file extension.
//!
//! Semantics:
//! - Two independent tables (Load, Save). Within a table extensions are unique
//!   under `ext::ext_eq`; re-registering an existing extension is a no-op that
//!   reports success (the first handler stays).
//! - Scan order = registration order.
//! - Handlers are shared (`Arc`); the registry owns its own copy of the
//!   extension token.
//! - Handlers run synchronously on the caller's thread. Keep them fast.

use std::sync::Arc;

use log::debug;

use crate::error::{HookError, HookResult};
use crate::ext::{ext_eq, normalize_ext};
use crate::metrics;
use crate::state::ImageState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Load,
    Save,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Load => "load",
            Direction::Save => "save",
        }
    }
}

/// A format handler: receives the host state and the full filename,
/// returns true on success.
pub type Handler = Arc<dyn Fn(&mut ImageState, &str) -> bool + Send + Sync + 'static>;

/// Wrap a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&mut ImageState, &str) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

#[derive(Clone)]
pub struct HandlerEntry {
    ext: String,
    handler: Handler,
}

impl HandlerEntry {
    /// Normalized (lowercase) extension token.
    pub fn ext(&self) -> &str {
        &self.ext
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }
}

impl std::fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerEntry").field("ext", &self.ext).finish()
    }
}

#[derive(Debug, Default)]
pub struct FormatRegistry {
    load: Vec<HandlerEntry>,
    save: Vec<HandlerEntry>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, dir: Direction) -> &Vec<HandlerEntry> {
        match dir {
            Direction::Load => &self.load,
            Direction::Save => &self.save,
        }
    }

    fn table_mut(&mut self, dir: Direction) -> &mut Vec<HandlerEntry> {
        match dir {
            Direction::Load => &mut self.load,
            Direction::Save => &mut self.save,
        }
    }

    /// Register `handler` for `ext`. Idempotent per extension.
    /// Fails only with OutOfMemory, leaving the table unchanged.
    pub fn register(&mut self, dir: Direction, ext: &str, handler: Handler) -> HookResult<()> {
        if ext.is_empty() {
            return Err(HookError::InvalidParam("empty extension".to_string()));
        }
        let table = self.table_mut(dir);
        if table.iter().any(|e| ext_eq(&e.ext, ext)) {
            debug!("register {}: .{} already present", dir.as_str(), ext);
            return Ok(());
        }

        table
            .try_reserve(1)
            .map_err(|_| HookError::OutOfMemory)?;
        table.push(HandlerEntry {
            ext: normalize_ext(ext),
            handler,
        });
        metrics::record_handler_registered();
        debug!("register {}: .{}", dir.as_str(), ext);
        Ok(())
    }

    /// Unregister `ext`. Returns whether an entry was removed.
    pub fn remove(&mut self, dir: Direction, ext: &str) -> bool {
        let table = self.table_mut(dir);
        match table.iter().position(|e| ext_eq(&e.ext, ext)) {
            Some(idx) => {
                table.remove(idx);
                metrics::record_handlers_removed(1);
                debug!("remove {}: .{}", dir.as_str(), ext);
                true
            }
            None => false,
        }
    }

    /// Drop every entry of both tables.
    pub fn clear_all(&mut self) {
        let n = self.load.len() + self.save.len();
        self.load.clear();
        self.save.clear();
        if n > 0 {
            metrics::record_handlers_removed(n);
            debug!("clear_all: {} handler(s) removed", n);
        }
    }

    /// First entry whose extension matches `ext`.
    pub fn lookup(&self, dir: Direction, ext: &str) -> Option<&HandlerEntry> {
        self.table(dir).iter().find(|e| ext_eq(&e.ext, ext))
    }

    pub fn contains(&self, dir: Direction, ext: &str) -> bool {
        self.lookup(dir, ext).is_some()
    }

    pub fn len(&self, dir: Direction) -> usize {
        self.table(dir).len()
    }

    pub fn is_empty(&self) -> bool {
        self.load.is_empty() && self.save.is_empty()
    }

    /// Registered extensions in scan order.
    pub fn extensions(&self, dir: Direction) -> impl Iterator<Item = &str> {
        self.table(dir).iter().map(|e| e.ext.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_handler() -> Handler {
        handler(|_, _| true)
    }

    #[test]
    fn duplicate_registration_is_noop() {
        let mut r = FormatRegistry::new();
        r.register(Direction::Load, "png", ok_handler()).unwrap();
        r.register(Direction::Load, "PNG", handler(|_, _| false)).unwrap();
        assert_eq!(r.len(Direction::Load), 1);
        assert_eq!(r.len(Direction::Save), 0);
        assert_eq!(r.extensions(Direction::Load).collect::<Vec<_>>(), vec!["png"]);
    }

    #[test]
    fn directions_are_independent() {
        let mut r = FormatRegistry::new();
        r.register(Direction::Load, "tga", ok_handler()).unwrap();
        r.register(Direction::Save, "tga", ok_handler()).unwrap();
        assert!(r.remove(Direction::Save, "TGA"));
        assert!(r.contains(Direction::Load, "tga"));
        assert!(!r.contains(Direction::Save, "tga"));
    }

    #[test]
    fn remove_middle_keeps_order() {
        let mut r = FormatRegistry::new();
        for e in ["a", "b", "c"] {
            r.register(Direction::Save, e, ok_handler()).unwrap();
        }
        assert!(r.remove(Direction::Save, "B"));
        assert!(!r.remove(Direction::Save, "b"));
        assert_eq!(r.extensions(Direction::Save).collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn empty_extension_rejected() {
        let mut r = FormatRegistry::new();
        assert!(r.register(Direction::Load, "", ok_handler()).is_err());
        assert!(r.is_empty());
    }
}
