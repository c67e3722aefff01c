// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! A software graphics context.
//!
//! Validates every call the way a GL driver would and keeps the resulting texture
//! state in memory, along with a log of every call.  Useful for headless hosts and for
//! asserting call sequences in tests.  Context loss can be simulated with
//! [`HeadlessContext::lose_context`].

use std::collections::BTreeMap;

use crate::bindings::RowAlignment;
use crate::bindings::sampler::SamplingFilters;
use crate::bindings::unpack::{UnpackLayout, unpack_rows};
use crate::imp::{BackendError, Capabilities, CompressedTexImage3D, GraphicsContext, TexImage3D, TextureId};
use crate::pixel_formats::codes::{self, Code};

/// One call issued against a [`HeadlessContext`], in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextCall {
    CreateTexture(TextureId),
    DeleteTexture(TextureId),
    BindTexture2DArray(Option<TextureId>),
    UnpackFlipY(bool),
    UnpackAlignment(RowAlignment),
    TexImage3D {
        texture: Option<TextureId>,
        sized_internal_format: Code,
        format: Code,
        ty: Code,
        width: u32,
        height: u32,
        depth: u32,
        data_len: Option<usize>,
    },
    CompressedTexImage3D {
        texture: Option<TextureId>,
        internal_format: Code,
        width: u32,
        height: u32,
        depth: u32,
        data_len: usize,
    },
    SetFilters {
        texture: Option<TextureId>,
        filters: SamplingFilters,
    },
    GenerateMipmap(Option<TextureId>),
}

/// Level 0 storage of a headless texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessStorage {
    pub internal_format: Code,
    pub compressed: bool,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    /// Texel rows as stored: tightly packed, top-down, after flip-Y.
    /// Compressed blocks are kept verbatim.  `None` for uninitialized storage.
    pub data: Option<Vec<u8>>,
    pub has_mipmaps: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeadlessTexture {
    pub storage: Option<HeadlessStorage>,
    pub filters: Option<SamplingFilters>,
    /// Number of successful `generate_mipmap` calls.
    pub mipmap_generations: u32,
}

#[derive(Debug)]
pub struct HeadlessContext {
    capabilities: Capabilities,
    textures: BTreeMap<TextureId, HeadlessTexture>,
    next_id: u64,
    bound: Option<TextureId>,
    flip_y: bool,
    alignment: RowAlignment,
    lost: bool,
    calls: Vec<ContextCall>,
}

impl Default for HeadlessContext {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessContext {
    /// A context with [`Capabilities::default`].
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::default())
    }

    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            textures: BTreeMap::new(),
            next_id: 1,
            bound: None,
            flip_y: false,
            alignment: RowAlignment::default(),
            lost: false,
            calls: Vec::new(),
        }
    }

    pub fn texture(&self, texture: TextureId) -> Option<&HeadlessTexture> {
        self.textures.get(&texture)
    }

    /// Number of live texture objects.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn calls(&self) -> &[ContextCall] {
        &self.calls
    }

    /// Drains the call log.
    pub fn take_calls(&mut self) -> Vec<ContextCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn unpack_flip_y(&self) -> bool {
        self.flip_y
    }

    pub fn unpack_alignment(&self) -> RowAlignment {
        self.alignment
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    /// Drops every texture object and fails all calls until [`Self::restore_context`].
    pub fn lose_context(&mut self) {
        logwise::warn_sync!("headless context lost");
        self.lost = true;
        self.textures.clear();
        self.bound = None;
    }

    /// Brings the context back with default state and no textures.
    pub fn restore_context(&mut self) {
        logwise::info_sync!("headless context restored");
        self.lost = false;
        self.flip_y = false;
        self.alignment = RowAlignment::default();
    }

    fn check_alive(&self) -> Result<(), BackendError> {
        if self.lost {
            Err(BackendError::ContextLost)
        } else {
            Ok(())
        }
    }

    fn bound_mut(&mut self) -> Result<&mut HeadlessTexture, BackendError> {
        self.check_alive()?;
        let id = self.bound.ok_or(BackendError::NoTextureBound)?;
        self.textures.get_mut(&id).ok_or(BackendError::UnknownTexture(id))
    }
}

fn is_known_internal_format(code: Code) -> bool {
    matches!(
        code,
        codes::ALPHA
            | codes::LUMINANCE
            | codes::LUMINANCE_ALPHA
            | codes::R8
            | codes::RG8
            | codes::RGB8
            | codes::RGBA8
            | codes::R8_SNORM
            | codes::RG8_SNORM
            | codes::RGB8_SNORM
            | codes::RGBA8_SNORM
            | codes::R8I
            | codes::R8UI
            | codes::R16I
            | codes::R16UI
            | codes::R32I
            | codes::R32UI
            | codes::RG8I
            | codes::RG8UI
            | codes::RG16I
            | codes::RG16UI
            | codes::RG32I
            | codes::RG32UI
            | codes::RGB8I
            | codes::RGB8UI
            | codes::RGBA8I
            | codes::RGBA8UI
            | codes::RGB16I
            | codes::RGB16UI
            | codes::RGBA16I
            | codes::RGBA16UI
            | codes::RGB32I
            | codes::RGB32UI
            | codes::RGBA32I
            | codes::RGBA32UI
            | codes::R16F
            | codes::RG16F
            | codes::RGB16F
            | codes::RGBA16F
            | codes::R32F
            | codes::RG32F
            | codes::RGB32F
            | codes::RGBA32F
            | codes::RGB565
            | codes::RGBA4
            | codes::RGB5_A1
            | codes::RGB10_A2
            | codes::RGB10_A2UI
            | codes::R11F_G11F_B10F
            | codes::RGB9_E5
            | codes::DEPTH24_STENCIL8
            | codes::DEPTH32F_STENCIL8
    )
}

impl GraphicsContext for HeadlessContext {
    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn create_texture(&mut self) -> Result<TextureId, BackendError> {
        self.check_alive()?;
        let id = TextureId::from_raw(self.next_id);
        self.next_id += 1;
        self.textures.insert(id, HeadlessTexture::default());
        self.calls.push(ContextCall::CreateTexture(id));
        Ok(id)
    }

    fn delete_texture(&mut self, texture: TextureId) {
        self.calls.push(ContextCall::DeleteTexture(texture));
        self.textures.remove(&texture);
        if self.bound == Some(texture) {
            self.bound = None;
        }
    }

    fn bind_texture_2d_array(&mut self, texture: Option<TextureId>) {
        self.calls.push(ContextCall::BindTexture2DArray(texture));
        self.bound = texture;
    }

    fn bound_texture_2d_array(&self) -> Option<TextureId> {
        self.bound
    }

    fn set_unpack_flip_y(&mut self, flip: bool) {
        self.calls.push(ContextCall::UnpackFlipY(flip));
        self.flip_y = flip;
    }

    fn set_unpack_alignment(&mut self, alignment: RowAlignment) {
        self.calls.push(ContextCall::UnpackAlignment(alignment));
        self.alignment = alignment;
    }

    fn tex_image_3d(&mut self, image: &TexImage3D<'_>) -> Result<(), BackendError> {
        self.calls.push(ContextCall::TexImage3D {
            texture: self.bound,
            sized_internal_format: image.sized_internal_format,
            format: image.format,
            ty: image.ty,
            width: image.width,
            height: image.height,
            depth: image.depth,
            data_len: image.data.map(<[u8]>::len),
        });
        self.check_alive()?;
        self.capabilities.check_limits(image.width, image.height, image.depth)?;
        let unsupported = BackendError::UnsupportedFormat {
            internal_format: image.sized_internal_format,
            format: image.format,
            ty: image.ty,
        };
        if !is_known_internal_format(image.sized_internal_format) {
            return Err(unsupported);
        }
        let bytes_per_pixel = codes::upload_bytes_per_pixel(image.format, image.ty).ok_or(unsupported)?;
        let layout = UnpackLayout {
            width: image.width,
            height: image.height,
            depth: image.depth,
            bytes_per_pixel,
            alignment: self.alignment,
            flip_y: self.flip_y,
        };
        let data = image.data.map(|data| unpack_rows(data, layout)).transpose()?;
        let texture = self.bound_mut()?;
        texture.storage = Some(HeadlessStorage {
            internal_format: image.sized_internal_format,
            compressed: false,
            width: image.width,
            height: image.height,
            depth: image.depth,
            data,
            has_mipmaps: false,
        });
        Ok(())
    }

    fn compressed_tex_image_3d(&mut self, image: &CompressedTexImage3D<'_>) -> Result<(), BackendError> {
        self.calls.push(ContextCall::CompressedTexImage3D {
            texture: self.bound,
            internal_format: image.internal_format,
            width: image.width,
            height: image.height,
            depth: image.depth,
            data_len: image.data.len(),
        });
        self.check_alive()?;
        if !self.capabilities.supports_compressed_code(image.internal_format) {
            return Err(BackendError::UnsupportedCompressedFormat(image.internal_format));
        }
        self.capabilities.check_limits(image.width, image.height, image.depth)?;
        let block_bytes = codes::compressed_block_bytes(image.internal_format)
            .ok_or(BackendError::UnsupportedCompressedFormat(image.internal_format))?;
        let required = codes::compressed_image_len(block_bytes, image.width, image.height, image.depth);
        if image.data.len() < required {
            return Err(BackendError::PayloadTooSmall {
                required,
                provided: image.data.len(),
            });
        }
        let texture = self.bound_mut()?;
        texture.storage = Some(HeadlessStorage {
            internal_format: image.internal_format,
            compressed: true,
            width: image.width,
            height: image.height,
            depth: image.depth,
            data: Some(image.data[..required].to_vec()),
            has_mipmaps: false,
        });
        Ok(())
    }

    fn set_filters(&mut self, filters: SamplingFilters) -> Result<(), BackendError> {
        self.calls.push(ContextCall::SetFilters {
            texture: self.bound,
            filters,
        });
        self.bound_mut()?.filters = Some(filters);
        Ok(())
    }

    fn generate_mipmap(&mut self) -> Result<(), BackendError> {
        self.calls.push(ContextCall::GenerateMipmap(self.bound));
        let texture = self.bound_mut()?;
        let storage = texture.storage.as_mut().ok_or(BackendError::MissingStorage)?;
        storage.has_mipmaps = true;
        texture.mipmap_generations += 1;
        Ok(())
    }
}
