// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Graphics backends.
//!
//! Everything above this module talks to a [`GraphicsContext`], a small bind-then-mutate
//! interface in the GL style.  Two implementations ship with the crate:
//!
//! - [`HeadlessContext`], a software context that validates and records calls.  Always
//!   available.
//! - `WgpuContext`, on top of a host's `wgpu::Device` and `wgpu::Queue`.  Requires the
//!   `backend_wgpu` feature (on by default).

mod error;
mod headless;

#[cfg(feature = "backend_wgpu")]
mod wgpu;

pub use error::BackendError;
pub use headless::{ContextCall, HeadlessContext, HeadlessStorage, HeadlessTexture};

#[cfg(feature = "backend_wgpu")]
pub use self::wgpu::WgpuContext;

use crate::bindings::RowAlignment;
use crate::bindings::sampler::SamplingFilters;
use crate::pixel_formats::CompressionScheme;
use crate::pixel_formats::codes::{self, Code};

/// Backend handle of a texture object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(u64);

impl TextureId {
    /// Wraps a backend-assigned handle.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// What a backend can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// Largest width or height of a layer.
    pub max_texture_size: u32,
    /// Largest layer count of an array texture.
    pub max_array_texture_layers: u32,
    /// S3TC (BC1-3) compressed formats.
    pub s3tc: bool,
    /// BPTC (BC7) compressed formats.
    pub bptc: bool,
}

impl Default for Capabilities {
    /// Guaranteed WebGL2 minimums, no compression.
    fn default() -> Self {
        Self {
            max_texture_size: 2048,
            max_array_texture_layers: 256,
            s3tc: false,
            bptc: false,
        }
    }
}

impl Capabilities {
    /// The backend code for `scheme`, if the backend supports it.
    pub fn compressed_format(&self, scheme: CompressionScheme) -> Option<Code> {
        match scheme {
            CompressionScheme::Dxt1Rgb if self.s3tc => Some(codes::COMPRESSED_RGB_S3TC_DXT1_EXT),
            CompressionScheme::Dxt1Rgba if self.s3tc => Some(codes::COMPRESSED_RGBA_S3TC_DXT1_EXT),
            CompressionScheme::Dxt3 if self.s3tc => Some(codes::COMPRESSED_RGBA_S3TC_DXT3_EXT),
            CompressionScheme::Dxt5 if self.s3tc => Some(codes::COMPRESSED_RGBA_S3TC_DXT5_EXT),
            CompressionScheme::Bc7Rgba if self.bptc => Some(codes::COMPRESSED_RGBA_BPTC_UNORM_EXT),
            _ => None,
        }
    }

    /// Whether `code` is one of the compressed formats this backend advertises.
    pub fn supports_compressed_code(&self, code: Code) -> bool {
        match code {
            codes::COMPRESSED_RGB_S3TC_DXT1_EXT
            | codes::COMPRESSED_RGBA_S3TC_DXT1_EXT
            | codes::COMPRESSED_RGBA_S3TC_DXT3_EXT
            | codes::COMPRESSED_RGBA_S3TC_DXT5_EXT => self.s3tc,
            codes::COMPRESSED_RGBA_BPTC_UNORM_EXT => self.bptc,
            _ => false,
        }
    }

    pub(crate) fn check_limits(&self, width: u32, height: u32, depth: u32) -> Result<(), BackendError> {
        if width > self.max_texture_size
            || height > self.max_texture_size
            || depth > self.max_array_texture_layers
        {
            return Err(BackendError::ExceedsLimits {
                width,
                height,
                depth,
                max_size: self.max_texture_size,
                max_layers: self.max_array_texture_layers,
            });
        }
        Ok(())
    }
}

/// Level 0 upload of a whole array texture.
#[derive(Debug, Clone, Copy)]
pub struct TexImage3D<'a> {
    pub sized_internal_format: Code,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub format: Code,
    pub ty: Code,
    /// `None` allocates uninitialized storage.
    pub data: Option<&'a [u8]>,
}

/// Level 0 upload of pre-encoded blocks.
#[derive(Debug, Clone, Copy)]
pub struct CompressedTexImage3D<'a> {
    pub internal_format: Code,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub data: &'a [u8],
}

/// One graphics context.
///
/// Mutating calls act on the texture bound to the 2D-array binding point and fail with
/// [`BackendError::NoTextureBound`] when nothing is bound.  Binding and unpack state are
/// context-global and persist between calls.
pub trait GraphicsContext {
    fn capabilities(&self) -> &Capabilities;

    fn create_texture(&mut self) -> Result<TextureId, BackendError>;
    fn delete_texture(&mut self, texture: TextureId);

    fn bind_texture_2d_array(&mut self, texture: Option<TextureId>);
    fn bound_texture_2d_array(&self) -> Option<TextureId>;

    /// Read source rows of each layer bottom-up.
    fn set_unpack_flip_y(&mut self, flip: bool);
    fn set_unpack_alignment(&mut self, alignment: RowAlignment);

    fn tex_image_3d(&mut self, image: &TexImage3D<'_>) -> Result<(), BackendError>;
    fn compressed_tex_image_3d(&mut self, image: &CompressedTexImage3D<'_>) -> Result<(), BackendError>;

    /// Sets the magnification and minification filters.
    fn set_filters(&mut self, filters: SamplingFilters) -> Result<(), BackendError>;
    /// Derives every mip level below level 0.
    fn generate_mipmap(&mut self) -> Result<(), BackendError>;
}
