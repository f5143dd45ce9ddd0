//! Host-side image state that handlers report into.
//!
//! `ImageState` bundles the image slots, the chain node pool and the last-error
//! stack. Handlers receive `&mut ImageState` and describe what they loaded via
//! the `register_*` calls; every failure is also pushed onto the error stack.

use log::debug;

use crate::chain::{rebuild_chain, ChainKind, NodePool};
use crate::config::HooksConfig;
use crate::error::{ErrorStack, HookError, HookResult};
use crate::image::{ComponentType, Image, Origin, Palette, PaletteType, PixelFormat};
use crate::store::ImageStore;

#[derive(Debug)]
pub struct ImageState {
    cfg: HooksConfig,
    store: ImageStore,
    pool: NodePool,
    errors: ErrorStack,
}

impl ImageState {
    pub fn new(cfg: HooksConfig) -> Self {
        Self {
            store: ImageStore::new(),
            pool: NodePool::new(cfg.node_budget),
            errors: ErrorStack::with_depth(cfg.error_stack_depth),
            cfg,
        }
    }

    pub fn config(&self) -> &HooksConfig {
        &self.cfg
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    pub fn pool(&self) -> &NodePool {
        &self.pool
    }

    // ----- last error -----

    pub(crate) fn note<T>(&mut self, r: HookResult<T>) -> HookResult<T> {
        if let Err(ref e) = r {
            self.errors.push(e.clone());
        }
        r
    }

    pub fn set_error(&mut self, e: HookError) {
        self.errors.push(e);
    }

    /// Pop the most recent error (None = no error).
    pub fn get_error(&mut self) -> Option<HookError> {
        self.errors.pop()
    }

    // ----- image slots -----

    pub fn gen_image(&mut self) -> u32 {
        self.store.gen_image()
    }

    pub fn bind_image(&mut self, name: u32) -> HookResult<()> {
        let r = self.store.bind(name);
        self.note(r)
    }

    pub fn current_name(&self) -> u32 {
        self.store.current_name()
    }

    pub fn current(&self) -> Option<&Image> {
        self.store.current()
    }

    /// Delete an image slot; its chains go back to the pool.
    pub fn delete_image(&mut self, name: u32) -> HookResult<()> {
        let r = self.store.delete(name);
        let img = self.note(r)?;
        let n = self.pool.close_image(img);
        debug!("delete_image: {} removed, {} chain node(s) released", name, n);
        Ok(())
    }

    /// Drop every image and release all chain nodes.
    pub fn reset_images(&mut self) {
        for img in self.store.drain() {
            self.pool.close_image(img);
        }
    }

    fn bound(&mut self, op: &str) -> HookResult<&mut Image> {
        self.store.current_mut().ok_or_else(|| {
            HookError::IllegalOperation(format!("{}: no image bound", op))
        })
    }

    // ----- reporting -----

    pub fn register_origin(&mut self, code: u32) -> HookResult<()> {
        let r = Origin::try_from(code).and_then(|o| {
            self.bound("register_origin")?.origin = o;
            Ok(())
        });
        self.note(r)
    }

    pub fn register_format(&mut self, code: u32) -> HookResult<()> {
        let r = PixelFormat::try_from(code).and_then(|f| {
            self.bound("register_format")?.format = f;
            Ok(())
        });
        self.note(r)
    }

    pub fn register_type(&mut self, code: u32) -> HookResult<()> {
        let r = ComponentType::try_from(code).and_then(|t| {
            self.bound("register_type")?.ty = t;
            Ok(())
        });
        self.note(r)
    }

    /// Replace the bound image's palette. The previous palette is released
    /// first. Missing data leaves an empty palette of the requested type and
    /// reports InvalidParam.
    pub fn register_pal(&mut self, data: Option<&[u8]>, pal_type: u32) -> HookResult<()> {
        let r = PaletteType::try_from(pal_type).and_then(|ty| {
            let img = self.bound("register_pal")?;
            img.palette = Palette {
                ty,
                data: data.map(<[u8]>::to_vec).unwrap_or_default(),
            };
            match data {
                Some(_) => Ok(()),
                None => Err(HookError::InvalidParam("register_pal: no palette data".into())),
            }
        });
        self.note(r)
    }

    pub fn set_duration(&mut self, ms: u32) -> HookResult<()> {
        let r = self.bound("set_duration").map(|img| img.duration = ms);
        self.note(r)
    }

    // ----- chains -----

    /// Give the bound image exactly `count` nodes in the selected chain.
    pub fn rebuild_chain(&mut self, kind: ChainKind, count: usize) -> HookResult<()> {
        let max = self.cfg.max_chain_len;
        let r = match self.store.rebind_current() {
            Ok(img) => rebuild_chain(&mut self.pool, kind.slot_mut(img), count, max),
            Err(e) => Err(e),
        };
        if r.is_ok() {
            debug!(
                "rebuild_chain: image {} {} -> {}",
                self.store.current_name(),
                kind.as_str(),
                count
            );
        }
        self.note(r)
    }

    pub fn register_mip_num(&mut self, count: usize) -> HookResult<()> {
        self.rebuild_chain(ChainKind::Mipmaps, count)
    }

    pub fn register_num_images(&mut self, count: usize) -> HookResult<()> {
        self.rebuild_chain(ChainKind::Frames, count)
    }

    pub fn chain_len(&self, kind: ChainKind) -> usize {
        self.store
            .current()
            .map(|img| kind.slot(img).len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn state() -> ImageState {
        ImageState::new(HooksConfig::default())
    }

    #[test]
    fn invalid_enum_does_not_mutate() {
        let mut st = state();
        st.register_format(FMT_BGRA).unwrap();
        let err = st.register_format(0xDEAD).unwrap_err();
        assert_eq!(err.code(), ERR_INVALID_ENUM);
        assert_eq!(st.current().unwrap().format, PixelFormat::Bgra);
        assert_eq!(st.get_error(), Some(err));
        assert_eq!(st.get_error(), None);
    }

    #[test]
    fn origin_and_type_are_recorded() {
        let mut st = state();
        st.register_origin(ORIGIN_UPPER_LEFT).unwrap();
        st.register_type(TYPE_FLOAT).unwrap();
        let img = st.current().unwrap();
        assert_eq!(img.origin, Origin::UpperLeft);
        assert_eq!(img.ty, ComponentType::Float);
        assert!(st.register_origin(0).is_err());
    }

    #[test]
    fn palette_replace_and_missing_data() {
        let mut st = state();
        st.register_pal(Some(&[1u8, 2, 3][..]), PAL_RGB24).unwrap();
        assert_eq!(st.current().unwrap().palette.data, vec![1, 2, 3]);

        let err = st.register_pal(None, PAL_BGR24).unwrap_err();
        assert_eq!(err.code(), ERR_INVALID_PARAM);
        let pal = &st.current().unwrap().palette;
        assert!(pal.is_empty());
        assert_eq!(pal.ty, PaletteType::Bgr24);

        assert!(st.register_pal(Some(&[0u8][..]), 0x9999).is_err());
        assert_eq!(st.current().unwrap().palette.ty, PaletteType::Bgr24);
    }

    #[test]
    fn duration_on_bound_image() {
        let mut st = state();
        let n = st.gen_image();
        st.bind_image(n).unwrap();
        st.set_duration(40).unwrap();
        assert_eq!(st.current().unwrap().duration, 40);
    }

    #[test]
    fn delete_returns_nodes_to_pool() {
        let mut st = state();
        let n = st.gen_image();
        st.bind_image(n).unwrap();
        st.register_mip_num(4).unwrap();
        st.register_num_images(2).unwrap();
        assert_eq!(st.pool().live(), 6);
        st.delete_image(n).unwrap();
        assert_eq!(st.pool().live(), 0);
        assert_eq!(st.current_name(), DEFAULT_IMAGE);
    }
}
