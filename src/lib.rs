#![allow(non_snake_case)]

// Базовые модули
pub mod consts;
pub mod config;
pub mod error;
pub mod metrics;

// Расширения и реестр обработчиков
pub mod ext;
pub mod registry;
pub mod dispatch;
pub mod manifest;

// Изображения, слоты и цепочки (mipmaps / frames)
pub mod image;
pub mod chain;
pub mod store;
pub mod state;

// Фасад
pub mod imagelib;

// Удобные реэкспорты
pub use chain::{Chain, ChainKind, ChainNode, NodePool};
pub use config::{HooksBuilder, HooksConfig};
pub use dispatch::Dispatch;
pub use error::{HookError, HookResult};
pub use imagelib::ImageLib;
pub use registry::{handler, Direction, FormatRegistry, Handler};
pub use state::ImageState;
