// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Backend format, type and filter codes.
//!
//! Values are the GL / WebGL2 enums.  Every [`crate::GraphicsContext`] speaks this code
//! space; the wgpu backend maps it onto `wgpu::TextureFormat` on its side.

pub type Code = u32;

// Upload formats
pub const ALPHA: Code = 0x1906;
pub const RGB: Code = 0x1907;
pub const RGBA: Code = 0x1908;
pub const LUMINANCE: Code = 0x1909;
pub const LUMINANCE_ALPHA: Code = 0x190A;
pub const RED: Code = 0x1903;
pub const RG: Code = 0x8227;
pub const RED_INTEGER: Code = 0x8D94;
pub const RG_INTEGER: Code = 0x8228;
pub const RGB_INTEGER: Code = 0x8D98;
pub const RGBA_INTEGER: Code = 0x8D99;

// Upload types
pub const BYTE: Code = 0x1400;
pub const UNSIGNED_BYTE: Code = 0x1401;
pub const SHORT: Code = 0x1402;
pub const UNSIGNED_SHORT: Code = 0x1403;
pub const INT: Code = 0x1404;
pub const UNSIGNED_INT: Code = 0x1405;
pub const FLOAT: Code = 0x1406;
pub const HALF_FLOAT: Code = 0x140B;
pub const UNSIGNED_SHORT_4_4_4_4: Code = 0x8033;
pub const UNSIGNED_SHORT_5_5_5_1: Code = 0x8034;
pub const UNSIGNED_SHORT_5_6_5: Code = 0x8363;
pub const UNSIGNED_INT_2_10_10_10_REV: Code = 0x8368;
pub const UNSIGNED_INT_24_8: Code = 0x84FA;
pub const UNSIGNED_INT_10F_11F_11F_REV: Code = 0x8C3B;
pub const UNSIGNED_INT_5_9_9_9_REV: Code = 0x8C3E;
pub const FLOAT_32_UNSIGNED_INT_24_8_REV: Code = 0x8DAD;

// Sized internal formats
pub const R8: Code = 0x8229;
pub const RG8: Code = 0x822B;
pub const RGB8: Code = 0x8051;
pub const RGBA8: Code = 0x8058;
pub const R8_SNORM: Code = 0x8F94;
pub const RG8_SNORM: Code = 0x8F95;
pub const RGB8_SNORM: Code = 0x8F96;
pub const RGBA8_SNORM: Code = 0x8F97;
pub const R8I: Code = 0x8231;
pub const R8UI: Code = 0x8232;
pub const R16I: Code = 0x8233;
pub const R16UI: Code = 0x8234;
pub const R32I: Code = 0x8235;
pub const R32UI: Code = 0x8236;
pub const RG8I: Code = 0x8237;
pub const RG8UI: Code = 0x8238;
pub const RG16I: Code = 0x8239;
pub const RG16UI: Code = 0x823A;
pub const RG32I: Code = 0x823B;
pub const RG32UI: Code = 0x823C;
pub const RGB8I: Code = 0x8D8F;
pub const RGB8UI: Code = 0x8D7D;
pub const RGBA8I: Code = 0x8D8E;
pub const RGBA8UI: Code = 0x8D7C;
pub const RGB16I: Code = 0x8D89;
pub const RGB16UI: Code = 0x8D77;
pub const RGBA16I: Code = 0x8D88;
pub const RGBA16UI: Code = 0x8D76;
pub const RGB32I: Code = 0x8D83;
pub const RGB32UI: Code = 0x8D71;
pub const RGBA32I: Code = 0x8D82;
pub const RGBA32UI: Code = 0x8D70;
pub const R16F: Code = 0x822D;
pub const RG16F: Code = 0x822F;
pub const RGB16F: Code = 0x881B;
pub const RGBA16F: Code = 0x881A;
pub const R32F: Code = 0x822E;
pub const RG32F: Code = 0x8230;
pub const RGB32F: Code = 0x8815;
pub const RGBA32F: Code = 0x8814;
pub const RGB565: Code = 0x8D62;
pub const RGBA4: Code = 0x8056;
pub const RGB5_A1: Code = 0x8057;
pub const RGB10_A2: Code = 0x8059;
pub const RGB10_A2UI: Code = 0x906F;
pub const R11F_G11F_B10F: Code = 0x8C3A;
pub const RGB9_E5: Code = 0x8C3D;
pub const DEPTH24_STENCIL8: Code = 0x88F0;
pub const DEPTH32F_STENCIL8: Code = 0x8CAD;

// Compressed internal formats
pub const COMPRESSED_RGB_S3TC_DXT1_EXT: Code = 0x83F0;
pub const COMPRESSED_RGBA_S3TC_DXT1_EXT: Code = 0x83F1;
pub const COMPRESSED_RGBA_S3TC_DXT3_EXT: Code = 0x83F2;
pub const COMPRESSED_RGBA_S3TC_DXT5_EXT: Code = 0x83F3;
pub const COMPRESSED_RGBA_BPTC_UNORM_EXT: Code = 0x8E8C;

// Texture filters
pub const NEAREST: Code = 0x2600;
pub const LINEAR: Code = 0x2601;
pub const NEAREST_MIPMAP_NEAREST: Code = 0x2700;
pub const LINEAR_MIPMAP_NEAREST: Code = 0x2701;
pub const NEAREST_MIPMAP_LINEAR: Code = 0x2702;
pub const LINEAR_MIPMAP_LINEAR: Code = 0x2703;

/// Bytes a single pixel occupies in the source buffer for an upload format/type pair.
///
/// Returns `None` for codes outside the tables above.
pub fn upload_bytes_per_pixel(format: Code, ty: Code) -> Option<u32> {
    let packed = match ty {
        UNSIGNED_SHORT_4_4_4_4 | UNSIGNED_SHORT_5_5_5_1 | UNSIGNED_SHORT_5_6_5 => Some(2),
        UNSIGNED_INT_2_10_10_10_REV
        | UNSIGNED_INT_24_8
        | UNSIGNED_INT_10F_11F_11F_REV
        | UNSIGNED_INT_5_9_9_9_REV => Some(4),
        FLOAT_32_UNSIGNED_INT_24_8_REV => Some(8),
        _ => None,
    };
    if packed.is_some() {
        return packed;
    }
    let component = match ty {
        BYTE | UNSIGNED_BYTE => 1,
        SHORT | UNSIGNED_SHORT | HALF_FLOAT => 2,
        INT | UNSIGNED_INT | FLOAT => 4,
        _ => return None,
    };
    let channels = match format {
        ALPHA | LUMINANCE | RED | RED_INTEGER => 1,
        LUMINANCE_ALPHA | RG | RG_INTEGER => 2,
        RGB | RGB_INTEGER => 3,
        RGBA | RGBA_INTEGER => 4,
        _ => return None,
    };
    Some(component * channels)
}

/// Bytes per 4x4 block of a compressed internal format.
pub fn compressed_block_bytes(internal_format: Code) -> Option<u32> {
    match internal_format {
        COMPRESSED_RGB_S3TC_DXT1_EXT | COMPRESSED_RGBA_S3TC_DXT1_EXT => Some(8),
        COMPRESSED_RGBA_S3TC_DXT3_EXT
        | COMPRESSED_RGBA_S3TC_DXT5_EXT
        | COMPRESSED_RGBA_BPTC_UNORM_EXT => Some(16),
        _ => None,
    }
}

/// Byte length of a block-compressed image, with partial blocks rounded up.
pub fn compressed_image_len(block_bytes: u32, width: u32, height: u32, depth: u32) -> usize {
    width.div_ceil(4) as usize * height.div_ceil(4) as usize * depth as usize * block_bytes as usize
}

/// Whether `filter` samples from lower mip levels.
pub fn is_mipmap_filter(filter: Code) -> bool {
    matches!(
        filter,
        NEAREST_MIPMAP_NEAREST | LINEAR_MIPMAP_NEAREST | NEAREST_MIPMAP_LINEAR | LINEAR_MIPMAP_LINEAR
    )
}
