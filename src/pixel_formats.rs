// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Abstract pixel format descriptions for array texture uploads.
//!
//! A texture upload is described by two independent values:
//!
//! - [`PixelFormat`] - the channel layout of the source bytes (R, RG, RGBA, integer variants...)
//! - [`ComponentType`] - the numeric type of each component (unsigned byte, float, half float,
//!   or one of the packed types where several channels share a single word)
//!
//! An optional [`CompressionScheme`] replaces both when the source bytes are already
//! block-compressed.
//!
//! None of these types carry backend codes directly.  The [`translate`] module maps them
//! onto the GL enum space in [`codes`], which is what a [`crate::GraphicsContext`] consumes.
//!
//! # Examples
//!
//! ```
//! use texture_arrays::pixel_formats::{ComponentType, PixelFormat, translate};
//! use texture_arrays::pixel_formats::codes;
//!
//! let upload = translate::translate(PixelFormat::Rgba, ComponentType::UnsignedByte);
//! assert_eq!(upload.sized_internal_format, codes::RGBA8);
//! assert_eq!(PixelFormat::Rgba.bytes_per_pixel(ComponentType::UnsignedByte), 4);
//! ```

pub mod codes;
pub mod png_support;
pub mod translate;

use std::fmt::Display;
use std::str::FromStr;

pub use half::f16;

/// Channel layout of uploaded pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    Alpha,
    Luminance,
    LuminanceAlpha,
    Red,
    Rg,
    Rgb,
    #[default]
    Rgba,
    RedInteger,
    RgInteger,
    RgbInteger,
    RgbaInteger,
}

impl PixelFormat {
    /// Number of channels stored per pixel.
    pub const fn channel_count(self) -> u32 {
        match self {
            PixelFormat::Alpha | PixelFormat::Luminance | PixelFormat::Red | PixelFormat::RedInteger => 1,
            PixelFormat::LuminanceAlpha | PixelFormat::Rg | PixelFormat::RgInteger => 2,
            PixelFormat::Rgb | PixelFormat::RgbInteger => 3,
            PixelFormat::Rgba | PixelFormat::RgbaInteger => 4,
        }
    }

    /// Whether the shader sees unnormalized integers rather than floats.
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            PixelFormat::RedInteger
                | PixelFormat::RgInteger
                | PixelFormat::RgbInteger
                | PixelFormat::RgbaInteger
        )
    }

    /// Size of one source pixel in bytes when stored with `component_type`.
    ///
    /// Packed component types describe the whole pixel, so the channel count
    /// does not participate.
    pub const fn bytes_per_pixel(self, component_type: ComponentType) -> u32 {
        match component_type.packed_pixel_bytes() {
            Some(bytes) => bytes,
            None => self.channel_count() * component_type.bytes_per_component(),
        }
    }
}

/// Numeric type of each pixel component.
///
/// [`ComponentType::UnsignedByte`] is the default "unsigned int" texture type:
/// 8-bit components normalized to `0.0..=1.0` when sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentType {
    Byte,
    #[default]
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInteger,
    Float,
    HalfFloat,
    UnsignedShort4444,
    UnsignedShort5551,
    UnsignedShort565,
    UnsignedInt2101010Rev,
    UnsignedInt248,
    UnsignedInt10f11f11fRev,
    UnsignedInt5999Rev,
    Float32UnsignedInt248Rev,
}

impl ComponentType {
    /// Size of a single component in bytes.
    ///
    /// For packed types this is the size of the packed word.
    pub const fn bytes_per_component(self) -> u32 {
        match self {
            ComponentType::Byte | ComponentType::UnsignedByte => 1,
            ComponentType::Short | ComponentType::UnsignedShort | ComponentType::HalfFloat => 2,
            ComponentType::Int | ComponentType::UnsignedInteger | ComponentType::Float => 4,
            ComponentType::UnsignedShort4444
            | ComponentType::UnsignedShort5551
            | ComponentType::UnsignedShort565 => 2,
            ComponentType::UnsignedInt2101010Rev
            | ComponentType::UnsignedInt248
            | ComponentType::UnsignedInt10f11f11fRev
            | ComponentType::UnsignedInt5999Rev => 4,
            ComponentType::Float32UnsignedInt248Rev => 8,
        }
    }

    /// For packed types, the size of a whole pixel.
    pub const fn packed_pixel_bytes(self) -> Option<u32> {
        match self {
            ComponentType::UnsignedShort4444
            | ComponentType::UnsignedShort5551
            | ComponentType::UnsignedShort565
            | ComponentType::UnsignedInt2101010Rev
            | ComponentType::UnsignedInt248
            | ComponentType::UnsignedInt10f11f11fRev
            | ComponentType::UnsignedInt5999Rev
            | ComponentType::Float32UnsignedInt248Rev => Some(self.bytes_per_component()),
            _ => None,
        }
    }
}

/// Block-compression family of pre-encoded upload bytes.
///
/// The bytes are uploaded verbatim; the backend code is looked up from
/// [`crate::Capabilities::compressed_format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionScheme {
    /// S3TC DXT1 without alpha (BC1).
    Dxt1Rgb,
    /// S3TC DXT1 with 1-bit alpha (BC1).
    Dxt1Rgba,
    /// S3TC DXT3 (BC2).
    Dxt3,
    /// S3TC DXT5 (BC3).
    Dxt5,
    /// BPTC unorm (BC7).
    Bc7Rgba,
}

impl CompressionScheme {
    /// Bytes per 4x4 block.
    pub const fn block_bytes(self) -> u32 {
        match self {
            CompressionScheme::Dxt1Rgb | CompressionScheme::Dxt1Rgba => 8,
            CompressionScheme::Dxt3 | CompressionScheme::Dxt5 | CompressionScheme::Bc7Rgba => 16,
        }
    }

    /// Byte length of an encoded array with the given per-layer size and layer count.
    pub const fn encoded_len(self, width: u32, height: u32, depth: u32) -> usize {
        let blocks_wide = width.div_ceil(4) as usize;
        let blocks_high = height.div_ceil(4) as usize;
        blocks_wide * blocks_high * depth as usize * self.block_bytes() as usize
    }

    /// The GL extension constant name for this scheme.
    pub const fn extension_name(self) -> &'static str {
        match self {
            CompressionScheme::Dxt1Rgb => "COMPRESSED_RGB_S3TC_DXT1_EXT",
            CompressionScheme::Dxt1Rgba => "COMPRESSED_RGBA_S3TC_DXT1_EXT",
            CompressionScheme::Dxt3 => "COMPRESSED_RGBA_S3TC_DXT3_EXT",
            CompressionScheme::Dxt5 => "COMPRESSED_RGBA_S3TC_DXT5_EXT",
            CompressionScheme::Bc7Rgba => "COMPRESSED_RGBA_BPTC_UNORM_EXT",
        }
    }
}

impl Display for CompressionScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension_name())
    }
}

/// Returned when a compression name does not match any known scheme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown compression scheme {0:?}")]
pub struct UnknownCompression(pub String);

impl FromStr for CompressionScheme {
    type Err = UnknownCompression;

    /// Accepts short names ("DXT1", "DXT5", "BC7") and GL extension names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let scheme = match s.to_ascii_uppercase().as_str() {
            "DXT1" | "BC1" | "COMPRESSED_RGB_S3TC_DXT1_EXT" => CompressionScheme::Dxt1Rgb,
            "DXT1A" | "COMPRESSED_RGBA_S3TC_DXT1_EXT" => CompressionScheme::Dxt1Rgba,
            "DXT3" | "BC2" | "COMPRESSED_RGBA_S3TC_DXT3_EXT" => CompressionScheme::Dxt3,
            "DXT5" | "BC3" | "COMPRESSED_RGBA_S3TC_DXT5_EXT" => CompressionScheme::Dxt5,
            "BC7" | "BPTC" | "COMPRESSED_RGBA_BPTC_UNORM_EXT" => CompressionScheme::Bc7Rgba,
            _ => return Err(UnknownCompression(s.to_string())),
        };
        Ok(scheme)
    }
}
