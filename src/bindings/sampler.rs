// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Derives magnification/minification filters from a sampling mode.

use crate::pixel_formats::codes::{self, Code};

/// How a texture is filtered when magnified, minified and between mip levels.
///
/// Names read as `<mag><min>Mip<mip filter>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SamplingMode {
    /// Nearest magnification and minification, linear between mips.
    Nearest,
    /// Linear magnification and minification, nearest mip.
    Bilinear,
    /// Linear everywhere.
    #[default]
    Trilinear,
    NearestNearestMipNearest,
    NearestLinearMipNearest,
    NearestLinearMipLinear,
    NearestLinear,
    NearestNearest,
    LinearNearestMipNearest,
    LinearNearestMipLinear,
    LinearLinear,
    LinearNearest,
}

/// Filter codes applied to the bound texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplingFilters {
    pub mag: Code,
    pub min: Code,
}

/// Resolves filters for `mode`.
///
/// Mip-based minification is only selected when the texture gets a mip chain.
pub fn sampling_parameters(mode: SamplingMode, generate_mipmaps: bool) -> SamplingFilters {
    let pick = |mipped: Code, plain: Code| if generate_mipmaps { mipped } else { plain };
    let (mag, min) = match mode {
        SamplingMode::Bilinear => (codes::LINEAR, pick(codes::LINEAR_MIPMAP_NEAREST, codes::LINEAR)),
        SamplingMode::Trilinear => (codes::LINEAR, pick(codes::LINEAR_MIPMAP_LINEAR, codes::LINEAR)),
        SamplingMode::Nearest => (codes::NEAREST, pick(codes::NEAREST_MIPMAP_LINEAR, codes::NEAREST)),
        SamplingMode::NearestNearestMipNearest => {
            (codes::NEAREST, pick(codes::NEAREST_MIPMAP_NEAREST, codes::NEAREST))
        }
        SamplingMode::NearestLinearMipNearest => {
            (codes::NEAREST, pick(codes::LINEAR_MIPMAP_NEAREST, codes::LINEAR))
        }
        SamplingMode::NearestLinearMipLinear => {
            (codes::NEAREST, pick(codes::LINEAR_MIPMAP_LINEAR, codes::LINEAR))
        }
        SamplingMode::NearestLinear => (codes::NEAREST, codes::LINEAR),
        SamplingMode::NearestNearest => (codes::NEAREST, codes::NEAREST),
        SamplingMode::LinearNearestMipNearest => {
            (codes::LINEAR, pick(codes::NEAREST_MIPMAP_NEAREST, codes::NEAREST))
        }
        SamplingMode::LinearNearestMipLinear => {
            (codes::LINEAR, pick(codes::NEAREST_MIPMAP_LINEAR, codes::NEAREST))
        }
        SamplingMode::LinearLinear => (codes::LINEAR, codes::LINEAR),
        SamplingMode::LinearNearest => (codes::LINEAR, codes::NEAREST),
    };
    SamplingFilters { mag, min }
}
