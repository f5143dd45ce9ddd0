//! Image slots addressed by name, with one "currently bound" slot.
//!
//! Name 0 is the default image: always present, never deleted. Binding an
//! unknown name is an illegal operation and leaves the binding unchanged.

use std::collections::BTreeMap;

use crate::consts::DEFAULT_IMAGE;
use crate::error::{HookError, HookResult};
use crate::image::Image;

#[derive(Debug)]
pub struct ImageStore {
    images: BTreeMap<u32, Image>,
    next_name: u32,
    current: u32,
}

impl Default for ImageStore {
    fn default() -> Self {
        let mut images = BTreeMap::new();
        images.insert(DEFAULT_IMAGE, Image::new());
        Self {
            images,
            next_name: DEFAULT_IMAGE + 1,
            current: DEFAULT_IMAGE,
        }
    }
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh image slot and return its name. Does not bind it.
    /// After the counter wraps, names still in use are skipped.
    pub fn gen_image(&mut self) -> u32 {
        while self.images.contains_key(&self.next_name) {
            self.advance_name();
        }
        let name = self.next_name;
        self.advance_name();
        self.images.insert(name, Image::new());
        name
    }

    fn advance_name(&mut self) {
        self.next_name = self.next_name.wrapping_add(1).max(DEFAULT_IMAGE + 1);
    }

    pub fn is_image(&self, name: u32) -> bool {
        self.images.contains_key(&name)
    }

    pub fn bind(&mut self, name: u32) -> HookResult<()> {
        if !self.images.contains_key(&name) {
            return Err(HookError::IllegalOperation(format!(
                "bind: image {} does not exist",
                name
            )));
        }
        self.current = name;
        Ok(())
    }

    pub fn current_name(&self) -> u32 {
        self.current
    }

    /// Re-validate the bound name. Callers that mutate the bound image's
    /// chains go through this first.
    pub fn rebind_current(&mut self) -> HookResult<&mut Image> {
        let name = self.current;
        self.images.get_mut(&name).ok_or_else(|| {
            HookError::IllegalOperation(format!("bound image {} is gone", name))
        })
    }

    pub fn current(&self) -> Option<&Image> {
        self.images.get(&self.current)
    }

    pub fn current_mut(&mut self) -> Option<&mut Image> {
        self.images.get_mut(&self.current)
    }

    pub fn get(&self, name: u32) -> Option<&Image> {
        self.images.get(&name)
    }

    /// Remove an image slot and hand back its record for cleanup.
    /// Deleting the bound image rebinds the default image.
    pub fn delete(&mut self, name: u32) -> HookResult<Image> {
        if name == DEFAULT_IMAGE {
            return Err(HookError::IllegalOperation(
                "the default image cannot be deleted".to_string(),
            ));
        }
        let img = self.images.remove(&name).ok_or_else(|| {
            HookError::IllegalOperation(format!("delete: image {} does not exist", name))
        })?;
        if self.current == name {
            self.current = DEFAULT_IMAGE;
        }
        Ok(img)
    }

    /// Remove every generated image, keeping a fresh default image.
    pub fn drain(&mut self) -> Vec<Image> {
        let old = std::mem::take(&mut self.images);
        self.images.insert(DEFAULT_IMAGE, Image::new());
        self.current = DEFAULT_IMAGE;
        old.into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_image_is_bound() {
        let s = ImageStore::new();
        assert_eq!(s.current_name(), DEFAULT_IMAGE);
        assert!(s.current().is_some());
    }

    #[test]
    fn bind_unknown_keeps_binding() {
        let mut s = ImageStore::new();
        let n = s.gen_image();
        s.bind(n).unwrap();
        assert!(s.bind(999).is_err());
        assert_eq!(s.current_name(), n);
    }

    #[test]
    fn wrapped_counter_skips_live_names() {
        let mut s = ImageStore::new();
        let first = s.gen_image();
        let second = s.gen_image();
        s.delete(second).unwrap();

        s.next_name = u32::MAX;
        assert_eq!(s.gen_image(), u32::MAX);
        // счётчик перешёл через ноль: 1 занят, 2 свободен
        let n = s.gen_image();
        assert_eq!(n, second);
        assert_ne!(n, first);
        assert!(s.is_image(first));
        assert!(s.get(first).is_some());
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn delete_bound_falls_back_to_default() {
        let mut s = ImageStore::new();
        let n = s.gen_image();
        s.bind(n).unwrap();
        s.delete(n).unwrap();
        assert_eq!(s.current_name(), DEFAULT_IMAGE);
        assert!(s.delete(DEFAULT_IMAGE).is_err());
        assert!(s.delete(n).is_err());
    }
}
