//! Numeric codes shared with the host image library, plus tunable defaults.
//!
//! Коды совпадают с перечислениями хоста (GL-совместимые значения), чтобы
//! обработчики могли передавать их «как есть».

// ----- Origin -----
pub const ORIGIN_LOWER_LEFT: u32 = 0x0601;
pub const ORIGIN_UPPER_LEFT: u32 = 0x0602;

// ----- Pixel formats -----
pub const FMT_COLOUR_INDEX: u32 = 0x1900;
pub const FMT_RGB: u32 = 0x1907;
pub const FMT_RGBA: u32 = 0x1908;
pub const FMT_LUMINANCE: u32 = 0x1909;
pub const FMT_BGR: u32 = 0x80E0;
pub const FMT_BGRA: u32 = 0x80E1;

// ----- Component types -----
pub const TYPE_BYTE: u32 = 0x1400;
pub const TYPE_UNSIGNED_BYTE: u32 = 0x1401;
pub const TYPE_SHORT: u32 = 0x1402;
pub const TYPE_UNSIGNED_SHORT: u32 = 0x1403;
pub const TYPE_INT: u32 = 0x1404;
pub const TYPE_UNSIGNED_INT: u32 = 0x1405;
pub const TYPE_FLOAT: u32 = 0x1406;
pub const TYPE_DOUBLE: u32 = 0x140A;

// ----- Palette types -----
pub const PAL_NONE: u32 = 0x0400;
pub const PAL_RGB24: u32 = 0x0401;
pub const PAL_RGB32: u32 = 0x0402;
pub const PAL_RGBA32: u32 = 0x0403;
pub const PAL_BGR24: u32 = 0x0404;
pub const PAL_BGR32: u32 = 0x0405;
pub const PAL_BGRA32: u32 = 0x0406;

// ----- Error codes -----
pub const ERR_INVALID_ENUM: u32 = 0x0501;
pub const ERR_OUT_OF_MEMORY: u32 = 0x0502;
pub const ERR_ILLEGAL_OPERATION: u32 = 0x0505;
pub const ERR_INVALID_PARAM: u32 = 0x0509;
pub const ERR_INVALID_EXTENSION: u32 = 0x0514;

// ----- Defaults -----
pub const DEFAULT_MAX_CHAIN_LEN: usize = 1 << 16;
pub const DEFAULT_ERROR_STACK_DEPTH: usize = 32;

/// Name of the always-present default image slot.
pub const DEFAULT_IMAGE: u32 = 0;
