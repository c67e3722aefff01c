// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::imp::wgpu::mipmap::MipKind;
use crate::pixel_formats::codes::{self, Code};

/// Maps a sized internal format to the wgpu format with the same texel layout.
///
/// Three-channel, luminance, alpha and 16-bit packed formats have no wgpu counterpart.
pub(super) const fn wgpu_format(sized_internal_format: Code) -> Option<wgpu::TextureFormat> {
    use wgpu::TextureFormat as F;
    Some(match sized_internal_format {
        codes::R8 => F::R8Unorm,
        codes::RG8 => F::Rg8Unorm,
        codes::RGBA8 => F::Rgba8Unorm,
        codes::R8_SNORM => F::R8Snorm,
        codes::RG8_SNORM => F::Rg8Snorm,
        codes::RGBA8_SNORM => F::Rgba8Snorm,
        codes::R8I => F::R8Sint,
        codes::R8UI => F::R8Uint,
        codes::RG8I => F::Rg8Sint,
        codes::RG8UI => F::Rg8Uint,
        codes::RGBA8I => F::Rgba8Sint,
        codes::RGBA8UI => F::Rgba8Uint,
        codes::R16I => F::R16Sint,
        codes::R16UI => F::R16Uint,
        codes::RG16I => F::Rg16Sint,
        codes::RG16UI => F::Rg16Uint,
        codes::RGBA16I => F::Rgba16Sint,
        codes::RGBA16UI => F::Rgba16Uint,
        codes::R32I => F::R32Sint,
        codes::R32UI => F::R32Uint,
        codes::RG32I => F::Rg32Sint,
        codes::RG32UI => F::Rg32Uint,
        codes::RGBA32I => F::Rgba32Sint,
        codes::RGBA32UI => F::Rgba32Uint,
        codes::R16F => F::R16Float,
        codes::RG16F => F::Rg16Float,
        codes::RGBA16F => F::Rgba16Float,
        codes::R32F => F::R32Float,
        codes::RG32F => F::Rg32Float,
        codes::RGBA32F => F::Rgba32Float,
        codes::RGB10_A2 => F::Rgb10a2Unorm,
        codes::RGB10_A2UI => F::Rgb10a2Uint,
        codes::R11F_G11F_B10F => F::Rg11b10Ufloat,
        codes::RGB9_E5 => F::Rgb9e5Ufloat,
        _ => return None,
    })
}

pub(super) const fn wgpu_compressed_format(internal_format: Code) -> Option<wgpu::TextureFormat> {
    use wgpu::TextureFormat as F;
    Some(match internal_format {
        codes::COMPRESSED_RGB_S3TC_DXT1_EXT | codes::COMPRESSED_RGBA_S3TC_DXT1_EXT => F::Bc1RgbaUnorm,
        codes::COMPRESSED_RGBA_S3TC_DXT3_EXT => F::Bc2RgbaUnorm,
        codes::COMPRESSED_RGBA_S3TC_DXT5_EXT => F::Bc3RgbaUnorm,
        codes::COMPRESSED_RGBA_BPTC_UNORM_EXT => F::Bc7RgbaUnorm,
        _ => return None,
    })
}

/// How texels of `format` are averaged on the CPU, if at all.
pub(super) const fn mip_kind(format: wgpu::TextureFormat) -> Option<MipKind> {
    use wgpu::TextureFormat as F;
    Some(match format {
        F::R8Unorm => MipKind::Unorm8 { channels: 1 },
        F::Rg8Unorm => MipKind::Unorm8 { channels: 2 },
        F::Rgba8Unorm => MipKind::Unorm8 { channels: 4 },
        F::R16Float => MipKind::Half { channels: 1 },
        F::Rg16Float => MipKind::Half { channels: 2 },
        F::Rgba16Float => MipKind::Half { channels: 4 },
        F::R32Float => MipKind::Float { channels: 1 },
        F::Rg32Float => MipKind::Float { channels: 2 },
        F::Rgba32Float => MipKind::Float { channels: 4 },
        _ => return None,
    })
}
