// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Translation from abstract pixel descriptions to backend upload codes.

use super::codes::{self, Code};
use super::{ComponentType, PixelFormat};

/// Backend codes for one `tex_image_3d` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadCodes {
    /// Unsized internal format; equal to [`UploadCodes::upload_format`].
    pub internal_format: Code,
    /// Sized internal format the storage is allocated with.
    pub sized_internal_format: Code,
    /// Layout of the source bytes.
    pub upload_format: Code,
    /// Component type of the source bytes.
    pub upload_type: Code,
}

/// Resolves the upload codes for a format/type pair.
///
/// Total over its inputs.  Whether the backend accepts the resulting combination is
/// checked by the backend at upload time.
pub fn translate(format: PixelFormat, component_type: ComponentType) -> UploadCodes {
    let internal_format = internal_format(format);
    UploadCodes {
        internal_format,
        sized_internal_format: sized_internal_format(component_type, format),
        upload_format: internal_format,
        upload_type: upload_type(component_type),
    }
}

/// The component type code for the source bytes.
pub const fn upload_type(component_type: ComponentType) -> Code {
    match component_type {
        ComponentType::Byte => codes::BYTE,
        ComponentType::UnsignedByte => codes::UNSIGNED_BYTE,
        ComponentType::Short => codes::SHORT,
        ComponentType::UnsignedShort => codes::UNSIGNED_SHORT,
        ComponentType::Int => codes::INT,
        ComponentType::UnsignedInteger => codes::UNSIGNED_INT,
        ComponentType::Float => codes::FLOAT,
        ComponentType::HalfFloat => codes::HALF_FLOAT,
        ComponentType::UnsignedShort4444 => codes::UNSIGNED_SHORT_4_4_4_4,
        ComponentType::UnsignedShort5551 => codes::UNSIGNED_SHORT_5_5_5_1,
        ComponentType::UnsignedShort565 => codes::UNSIGNED_SHORT_5_6_5,
        ComponentType::UnsignedInt2101010Rev => codes::UNSIGNED_INT_2_10_10_10_REV,
        ComponentType::UnsignedInt248 => codes::UNSIGNED_INT_24_8,
        ComponentType::UnsignedInt10f11f11fRev => codes::UNSIGNED_INT_10F_11F_11F_REV,
        ComponentType::UnsignedInt5999Rev => codes::UNSIGNED_INT_5_9_9_9_REV,
        ComponentType::Float32UnsignedInt248Rev => codes::FLOAT_32_UNSIGNED_INT_24_8_REV,
    }
}

/// The unsized format code for the source layout.
pub const fn internal_format(format: PixelFormat) -> Code {
    match format {
        PixelFormat::Alpha => codes::ALPHA,
        PixelFormat::Luminance => codes::LUMINANCE,
        PixelFormat::LuminanceAlpha => codes::LUMINANCE_ALPHA,
        PixelFormat::Red => codes::RED,
        PixelFormat::Rg => codes::RG,
        PixelFormat::Rgb => codes::RGB,
        PixelFormat::Rgba => codes::RGBA,
        PixelFormat::RedInteger => codes::RED_INTEGER,
        PixelFormat::RgInteger => codes::RG_INTEGER,
        PixelFormat::RgbInteger => codes::RGB_INTEGER,
        PixelFormat::RgbaInteger => codes::RGBA_INTEGER,
    }
}

/// The sized storage format for a type/layout pair.
///
/// Unknown layouts within a type fall back to that type's four channel format;
/// unrelated combinations fall back to `RGBA8`.
pub const fn sized_internal_format(component_type: ComponentType, format: PixelFormat) -> Code {
    use PixelFormat as P;
    match component_type {
        ComponentType::Byte => match format {
            P::Red => codes::R8_SNORM,
            P::Rg => codes::RG8_SNORM,
            P::Rgb => codes::RGB8_SNORM,
            P::RedInteger => codes::R8I,
            P::RgInteger => codes::RG8I,
            P::RgbInteger => codes::RGB8I,
            P::RgbaInteger => codes::RGBA8I,
            _ => codes::RGBA8_SNORM,
        },
        ComponentType::UnsignedByte => match format {
            P::Red => codes::R8,
            P::Rg => codes::RG8,
            P::Rgb => codes::RGB8,
            P::Rgba => codes::RGBA8,
            P::RedInteger => codes::R8UI,
            P::RgInteger => codes::RG8UI,
            P::RgbInteger => codes::RGB8UI,
            P::RgbaInteger => codes::RGBA8UI,
            P::Alpha => codes::ALPHA,
            P::Luminance => codes::LUMINANCE,
            P::LuminanceAlpha => codes::LUMINANCE_ALPHA,
        },
        ComponentType::Short => match format {
            P::RedInteger => codes::R16I,
            P::RgInteger => codes::RG16I,
            P::RgbInteger => codes::RGB16I,
            _ => codes::RGBA16I,
        },
        ComponentType::UnsignedShort => match format {
            P::RedInteger => codes::R16UI,
            P::RgInteger => codes::RG16UI,
            P::RgbInteger => codes::RGB16UI,
            _ => codes::RGBA16UI,
        },
        ComponentType::Int => match format {
            P::RedInteger => codes::R32I,
            P::RgInteger => codes::RG32I,
            P::RgbInteger => codes::RGB32I,
            _ => codes::RGBA32I,
        },
        ComponentType::UnsignedInteger => match format {
            P::RedInteger => codes::R32UI,
            P::RgInteger => codes::RG32UI,
            P::RgbInteger => codes::RGB32UI,
            _ => codes::RGBA32UI,
        },
        ComponentType::Float => match format {
            P::Red => codes::R32F,
            P::Rg => codes::RG32F,
            P::Rgb => codes::RGB32F,
            _ => codes::RGBA32F,
        },
        ComponentType::HalfFloat => match format {
            P::Red => codes::R16F,
            P::Rg => codes::RG16F,
            P::Rgb => codes::RGB16F,
            _ => codes::RGBA16F,
        },
        ComponentType::UnsignedShort565 => codes::RGB565,
        ComponentType::UnsignedInt10f11f11fRev => codes::R11F_G11F_B10F,
        ComponentType::UnsignedInt5999Rev => codes::RGB9_E5,
        ComponentType::UnsignedShort4444 => codes::RGBA4,
        ComponentType::UnsignedShort5551 => codes::RGB5_A1,
        ComponentType::UnsignedInt2101010Rev => match format {
            P::RgbaInteger => codes::RGB10_A2UI,
            _ => codes::RGB10_A2,
        },
        ComponentType::UnsignedInt248 => codes::DEPTH24_STENCIL8,
        ComponentType::Float32UnsignedInt248Rev => codes::DEPTH32F_STENCIL8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_unsigned_byte() {
        let codes = translate(PixelFormat::Rgba, ComponentType::UnsignedByte);
        assert_eq!(
            codes,
            UploadCodes {
                internal_format: codes::RGBA,
                sized_internal_format: codes::RGBA8,
                upload_format: codes::RGBA,
                upload_type: codes::UNSIGNED_BYTE,
            }
        );
    }

    #[test]
    fn float_and_half_float_sizes() {
        assert_eq!(translate(PixelFormat::Red, ComponentType::Float).sized_internal_format, codes::R32F);
        assert_eq!(translate(PixelFormat::Rg, ComponentType::HalfFloat).sized_internal_format, codes::RG16F);
        assert_eq!(translate(PixelFormat::Rgba, ComponentType::HalfFloat).upload_type, codes::HALF_FLOAT);
    }

    #[test]
    fn signed_bytes_are_snorm_unless_integer() {
        assert_eq!(translate(PixelFormat::Red, ComponentType::Byte).sized_internal_format, codes::R8_SNORM);
        assert_eq!(translate(PixelFormat::RedInteger, ComponentType::Byte).sized_internal_format, codes::R8I);
        assert_eq!(translate(PixelFormat::Rgba, ComponentType::Byte).sized_internal_format, codes::RGBA8_SNORM);
    }

    #[test]
    fn packed_types() {
        assert_eq!(translate(PixelFormat::Rgb, ComponentType::UnsignedShort565).sized_internal_format, codes::RGB565);
        assert_eq!(
            translate(PixelFormat::RgbaInteger, ComponentType::UnsignedInt2101010Rev).sized_internal_format,
            codes::RGB10_A2UI
        );
        assert_eq!(
            translate(PixelFormat::Rgba, ComponentType::UnsignedInt2101010Rev).sized_internal_format,
            codes::RGB10_A2
        );
    }

    #[test]
    fn legacy_formats_stay_unsized() {
        let codes = translate(PixelFormat::Luminance, ComponentType::UnsignedByte);
        assert_eq!(codes.sized_internal_format, codes::LUMINANCE);
        assert_eq!(codes.internal_format, codes::LUMINANCE);
    }

    #[test]
    fn translation_agrees_with_byte_sizes() {
        let formats = [PixelFormat::Red, PixelFormat::Rg, PixelFormat::Rgb, PixelFormat::Rgba];
        let types = [ComponentType::UnsignedByte, ComponentType::Float, ComponentType::HalfFloat];
        for format in formats {
            for ty in types {
                let codes = translate(format, ty);
                assert_eq!(
                    codes::upload_bytes_per_pixel(codes.upload_format, codes.upload_type),
                    Some(format.bytes_per_pixel(ty)),
                    "{format:?} {ty:?}"
                );
            }
        }
    }
}
