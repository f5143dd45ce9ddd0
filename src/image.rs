//! Image records and the enumerations handlers report through.
//!
//! Enum values are validated on the way in (`TryFrom<u32>`); an unknown code
//! is `HookError::InvalidEnum` and never reaches an `Image`.

use serde::Serialize;

use crate::chain::Chain;
use crate::consts::*;
use crate::error::HookError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Origin {
    #[default]
    LowerLeft,
    UpperLeft,
}

impl TryFrom<u32> for Origin {
    type Error = HookError;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        match v {
            ORIGIN_LOWER_LEFT => Ok(Origin::LowerLeft),
            ORIGIN_UPPER_LEFT => Ok(Origin::UpperLeft),
            _ => Err(HookError::InvalidEnum { what: "origin", value: v }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PixelFormat {
    ColourIndex,
    #[default]
    Rgb,
    Rgba,
    Bgr,
    Bgra,
    Luminance,
}

impl TryFrom<u32> for PixelFormat {
    type Error = HookError;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        match v {
            FMT_COLOUR_INDEX => Ok(PixelFormat::ColourIndex),
            FMT_RGB => Ok(PixelFormat::Rgb),
            FMT_RGBA => Ok(PixelFormat::Rgba),
            FMT_BGR => Ok(PixelFormat::Bgr),
            FMT_BGRA => Ok(PixelFormat::Bgra),
            FMT_LUMINANCE => Ok(PixelFormat::Luminance),
            _ => Err(HookError::InvalidEnum { what: "format", value: v }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ComponentType {
    Byte,
    #[default]
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Float,
    Double,
}

impl TryFrom<u32> for ComponentType {
    type Error = HookError;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        match v {
            TYPE_BYTE => Ok(ComponentType::Byte),
            TYPE_UNSIGNED_BYTE => Ok(ComponentType::UnsignedByte),
            TYPE_SHORT => Ok(ComponentType::Short),
            TYPE_UNSIGNED_SHORT => Ok(ComponentType::UnsignedShort),
            TYPE_INT => Ok(ComponentType::Int),
            TYPE_UNSIGNED_INT => Ok(ComponentType::UnsignedInt),
            TYPE_FLOAT => Ok(ComponentType::Float),
            TYPE_DOUBLE => Ok(ComponentType::Double),
            _ => Err(HookError::InvalidEnum { what: "type", value: v }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PaletteType {
    #[default]
    None,
    Rgb24,
    Rgb32,
    Rgba32,
    Bgr24,
    Bgr32,
    Bgra32,
}

impl TryFrom<u32> for PaletteType {
    type Error = HookError;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        match v {
            PAL_NONE => Ok(PaletteType::None),
            PAL_RGB24 => Ok(PaletteType::Rgb24),
            PAL_RGB32 => Ok(PaletteType::Rgb32),
            PAL_RGBA32 => Ok(PaletteType::Rgba32),
            PAL_BGR24 => Ok(PaletteType::Bgr24),
            PAL_BGR32 => Ok(PaletteType::Bgr32),
            PAL_BGRA32 => Ok(PaletteType::Bgra32),
            _ => Err(HookError::InvalidEnum { what: "palette type", value: v }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    pub ty: PaletteType,
    pub data: Vec<u8>,
}

impl Palette {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// One image record. Both chains are owned exclusively by the image; dropping
/// the image drops them.
#[derive(Debug, Default)]
pub struct Image {
    pub origin: Origin,
    pub format: PixelFormat,
    pub ty: ComponentType,
    pub palette: Palette,
    /// Frame display time in milliseconds.
    pub duration: u32,
    pub mipmaps: Chain,
    pub frames: Chain,
}

impl Image {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chain nodes reachable from this image, nested chains included.
    pub fn owned_nodes(&self) -> u64 {
        self.mipmaps.total_nodes() + self.frames.total_nodes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_parse() {
        assert_eq!(Origin::try_from(ORIGIN_UPPER_LEFT), Ok(Origin::UpperLeft));
        assert_eq!(PixelFormat::try_from(FMT_BGRA), Ok(PixelFormat::Bgra));
        assert_eq!(ComponentType::try_from(TYPE_DOUBLE), Ok(ComponentType::Double));
        assert_eq!(PaletteType::try_from(PAL_BGR32), Ok(PaletteType::Bgr32));
    }

    #[test]
    fn unknown_codes_are_invalid_enum() {
        for (res, what) in [
            (Origin::try_from(0x0600).map(|_| ()), "origin"),
            (PixelFormat::try_from(0x190A).map(|_| ()), "format"),
            (ComponentType::try_from(0x1407).map(|_| ()), "type"),
            (PaletteType::try_from(0x0407).map(|_| ()), "palette type"),
        ] {
            match res {
                Err(HookError::InvalidEnum { what: w, .. }) => assert_eq!(w, what),
                other => panic!("expected InvalidEnum for {what}, got {other:?}"),
            }
        }
    }
}
