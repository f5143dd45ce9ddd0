//! `ImageLib` — the host-side facade: one registry plus the image state.
//!
//! Constructed at library init, torn down on drop (all handlers removed, all
//! chain nodes released). Not internally synchronized; wrap it in a Mutex if
//! several threads register handlers or rebuild chains.

use log::{debug, warn};

use crate::config::{HooksBuilder, HooksConfig};
use crate::dispatch::{dispatch, Dispatch};
use crate::error::{HookError, HookResult};
use crate::registry::{Direction, FormatRegistry, Handler};
use crate::state::ImageState;

pub struct ImageLib {
    registry: FormatRegistry,
    state: ImageState,
}

impl Default for ImageLib {
    fn default() -> Self {
        Self::with_config(HooksConfig::from_env())
    }
}

impl ImageLib {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> HooksBuilder {
        HooksBuilder::new()
    }

    pub fn with_config(cfg: HooksConfig) -> Self {
        debug!("ImageLib init: {}", cfg);
        Self {
            registry: FormatRegistry::new(),
            state: ImageState::new(cfg),
        }
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Direct table access, e.g. for `HandlerManifest::apply`.
    pub fn registry_mut(&mut self) -> &mut FormatRegistry {
        &mut self.registry
    }

    pub fn state(&self) -> &ImageState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ImageState {
        &mut self.state
    }

    // ----- registration -----

    pub fn register_load(&mut self, ext: &str, h: Handler) -> HookResult<()> {
        let r = self.registry.register(Direction::Load, ext, h);
        self.state.note(r)
    }

    pub fn register_save(&mut self, ext: &str, h: Handler) -> HookResult<()> {
        let r = self.registry.register(Direction::Save, ext, h);
        self.state.note(r)
    }

    pub fn remove_load(&mut self, ext: &str) -> bool {
        self.registry.remove(Direction::Load, ext)
    }

    pub fn remove_save(&mut self, ext: &str) -> bool {
        self.registry.remove(Direction::Save, ext)
    }

    /// Remove every registered handler, both directions.
    pub fn remove_registered(&mut self) {
        self.registry.clear_all();
    }

    // ----- dispatch -----

    pub fn dispatch_load(&mut self, filename: &str) -> Dispatch {
        dispatch(&self.registry, Direction::Load, &mut self.state, filename)
    }

    pub fn dispatch_save(&mut self, filename: &str) -> Dispatch {
        dispatch(&self.registry, Direction::Save, &mut self.state, filename)
    }

    /// Load through a registered handler. There are no built-in codecs, so
    /// an unhandled extension is InvalidExtension.
    pub fn load(&mut self, filename: &str) -> HookResult<()> {
        let r = self.finish(Direction::Load, filename);
        self.state.note(r)
    }

    pub fn save(&mut self, filename: &str) -> HookResult<()> {
        let r = self.finish(Direction::Save, filename);
        self.state.note(r)
    }

    fn finish(&mut self, dir: Direction, filename: &str) -> HookResult<()> {
        match dispatch(&self.registry, dir, &mut self.state, filename) {
            Dispatch::Handled(true) => Ok(()),
            Dispatch::Handled(false) => {
                warn!("{} handler failed for {}", dir.as_str(), filename);
                Err(HookError::IllegalOperation(format!(
                    "{} handler failed for {}",
                    dir.as_str(),
                    filename
                )))
            }
            Dispatch::Unhandled | Dispatch::NoExtension => {
                Err(HookError::InvalidExtension(filename.to_string()))
            }
        }
    }

    // ----- image state passthroughs -----

    pub fn gen_image(&mut self) -> u32 {
        self.state.gen_image()
    }

    pub fn bind_image(&mut self, name: u32) -> HookResult<()> {
        self.state.bind_image(name)
    }

    pub fn delete_image(&mut self, name: u32) -> HookResult<()> {
        self.state.delete_image(name)
    }

    pub fn register_mip_num(&mut self, count: usize) -> HookResult<()> {
        self.state.register_mip_num(count)
    }

    pub fn register_num_images(&mut self, count: usize) -> HookResult<()> {
        self.state.register_num_images(count)
    }

    pub fn get_error(&mut self) -> Option<HookError> {
        self.state.get_error()
    }
}

impl Drop for ImageLib {
    fn drop(&mut self) {
        self.registry.clear_all();
        self.state.reset_images();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::handler;

    #[test]
    fn load_maps_outcomes_to_errors() {
        let mut lib = ImageLib::with_config(HooksConfig::default());
        lib.register_load("ok", handler(|_, _| true)).unwrap();
        lib.register_load("bad", handler(|_, _| false)).unwrap();

        assert!(lib.load("x.ok").is_ok());
        assert!(matches!(lib.load("x.bad"), Err(HookError::IllegalOperation(_))));
        assert!(matches!(lib.load("x.zzz"), Err(HookError::InvalidExtension(_))));
        assert!(matches!(lib.get_error(), Some(HookError::InvalidExtension(_))));
        assert!(matches!(lib.get_error(), Some(HookError::IllegalOperation(_))));
        assert_eq!(lib.get_error(), None);
    }

    #[test]
    fn handler_reports_into_state() {
        let mut lib = ImageLib::with_config(HooksConfig::default());
        lib.register_load(
            "gif",
            handler(|st, _| {
                st.register_num_images(3).is_ok() && st.set_duration(100).is_ok()
            }),
        )
        .unwrap();
        assert!(lib.load("anim.GIF").is_ok());
        let img = lib.state().current().unwrap();
        assert_eq!(img.frames.len(), 3);
        assert_eq!(img.duration, 100);
    }
}
