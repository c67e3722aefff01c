// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! [`GraphicsContext`] over a host's wgpu device.
//!
//! wgpu has no bind-to-edit model, so the binding point and unpack state are kept here
//! and applied when calls arrive.  Uploads are repacked into tight rows before
//! `Queue::write_texture`.  Mip chains are computed on the CPU from a copy of level 0.

mod mipmap;
mod pixel_format;
mod sampler;
mod texture;

use std::collections::HashMap;

use crate::bindings::RowAlignment;
use crate::bindings::sampler::SamplingFilters;
use crate::bindings::unpack::{UnpackLayout, unpack_rows};
use crate::imp::{BackendError, Capabilities, CompressedTexImage3D, GraphicsContext, TexImage3D, TextureId};
use crate::pixel_formats::codes;
use mipmap::MipLevel;
use texture::{GpuStorage, TextureState};

pub struct WgpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    capabilities: Capabilities,
    textures: HashMap<TextureId, TextureState>,
    next_id: u64,
    bound: Option<TextureId>,
    flip_y: bool,
    alignment: RowAlignment,
}

impl std::fmt::Debug for WgpuContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuContext")
            .field("capabilities", &self.capabilities)
            .field("textures", &self.textures.len())
            .field("bound", &self.bound)
            .finish()
    }
}

impl WgpuContext {
    /// Wraps an existing device.  Capabilities are read from the device's limits and features.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        let limits = device.limits();
        let bc = device.features().contains(wgpu::Features::TEXTURE_COMPRESSION_BC);
        let capabilities = Capabilities {
            max_texture_size: limits.max_texture_dimension_2d,
            max_array_texture_layers: limits.max_texture_array_layers,
            s3tc: bc,
            bptc: bc,
        };
        logwise::info_sync!(
            "wgpu context: max size {size}, max layers {layers}, bc {bc}",
            size = capabilities.max_texture_size,
            layers = capabilities.max_array_texture_layers,
            bc = logwise::privacy::LogIt(&bc)
        );
        Self {
            device,
            queue,
            capabilities,
            textures: HashMap::new(),
            next_id: 1,
            bound: None,
            flip_y: false,
            alignment: RowAlignment::default(),
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// The current wgpu texture behind `texture`.
    ///
    /// Generating mipmaps replaces the underlying texture, so views made earlier go stale.
    pub fn texture(&self, texture: TextureId) -> Option<&wgpu::Texture> {
        self.textures.get(&texture)?.storage.as_ref().map(|s| &s.texture)
    }

    /// A `D2Array` view over every layer and mip level.
    pub fn texture_view(&self, texture: TextureId) -> Option<wgpu::TextureView> {
        self.texture(texture).map(|t| {
            t.create_view(&wgpu::TextureViewDescriptor {
                dimension: Some(wgpu::TextureViewDimension::D2Array),
                ..Default::default()
            })
        })
    }

    /// Sampler matching the filters last set on `texture`.
    pub fn sampler(&self, texture: TextureId) -> Option<wgpu::Sampler> {
        let state = self.textures.get(&texture)?;
        Some(self.device.create_sampler(&sampler::sampler_descriptor(state.filters)))
    }

    fn bound_state(&mut self) -> Result<&mut TextureState, BackendError> {
        let id = self.bound.ok_or(BackendError::NoTextureBound)?;
        self.textures.get_mut(&id).ok_or(BackendError::UnknownTexture(id))
    }
}

impl GraphicsContext for WgpuContext {
    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn create_texture(&mut self) -> Result<TextureId, BackendError> {
        let id = TextureId::from_raw(self.next_id);
        self.next_id += 1;
        self.textures.insert(id, TextureState::default());
        Ok(id)
    }

    fn delete_texture(&mut self, texture: TextureId) {
        if let Some(storage) = self.textures.remove(&texture).and_then(|state| state.storage) {
            storage.texture.destroy();
        }
        if self.bound == Some(texture) {
            self.bound = None;
        }
    }

    fn bind_texture_2d_array(&mut self, texture: Option<TextureId>) {
        self.bound = texture;
    }

    fn bound_texture_2d_array(&self) -> Option<TextureId> {
        self.bound
    }

    fn set_unpack_flip_y(&mut self, flip: bool) {
        self.flip_y = flip;
    }

    fn set_unpack_alignment(&mut self, alignment: RowAlignment) {
        self.alignment = alignment;
    }

    fn tex_image_3d(&mut self, image: &TexImage3D<'_>) -> Result<(), BackendError> {
        self.capabilities.check_limits(image.width, image.height, image.depth)?;
        let unsupported = BackendError::UnsupportedFormat {
            internal_format: image.sized_internal_format,
            format: image.format,
            ty: image.ty,
        };
        let format = pixel_format::wgpu_format(image.sized_internal_format).ok_or(unsupported.clone())?;
        let bytes_per_pixel = codes::upload_bytes_per_pixel(image.format, image.ty).ok_or(unsupported.clone())?;
        if format.block_copy_size(None) != Some(bytes_per_pixel) {
            return Err(unsupported);
        }
        let layout = UnpackLayout {
            width: image.width,
            height: image.height,
            depth: image.depth,
            bytes_per_pixel,
            alignment: self.alignment,
            flip_y: self.flip_y,
        };
        let packed = match image.data {
            Some(data) => unpack_rows(data, layout)?,
            None => vec![0; layout.packed_len()],
        };

        let (device, queue) = (self.device.clone(), self.queue.clone());
        let state = self.bound_state()?;
        let reuse = state.storage.as_ref().is_some_and(|s| {
            s.matches(image.sized_internal_format, format, image.width, image.height, image.depth)
        });
        if !reuse {
            if let Some(old) = state.storage.take() {
                old.texture.destroy();
            }
            state.storage = Some(GpuStorage {
                texture: texture::allocate(&device, format, image.width, image.height, image.depth, 1),
                internal_format: image.sized_internal_format,
                width: image.width,
                height: image.height,
                depth: image.depth,
                shadow: None,
            });
        }
        let storage = state.storage.as_mut().ok_or(BackendError::MissingStorage)?;
        let level = MipLevel {
            width: image.width,
            height: image.height,
            data: packed,
        };
        texture::write_level(&queue, &storage.texture, 0, &level, image.depth, bytes_per_pixel);
        storage.shadow = Some(level.data);
        logwise::trace_sync!(
            "wgpu: wrote {w}x{h}x{d} level 0",
            w = image.width,
            h = image.height,
            d = image.depth
        );
        Ok(())
    }

    fn compressed_tex_image_3d(&mut self, image: &CompressedTexImage3D<'_>) -> Result<(), BackendError> {
        if !self.capabilities.supports_compressed_code(image.internal_format) {
            return Err(BackendError::UnsupportedCompressedFormat(image.internal_format));
        }
        self.capabilities.check_limits(image.width, image.height, image.depth)?;
        let format = pixel_format::wgpu_compressed_format(image.internal_format)
            .ok_or(BackendError::UnsupportedCompressedFormat(image.internal_format))?;
        let block_bytes = codes::compressed_block_bytes(image.internal_format)
            .ok_or(BackendError::UnsupportedCompressedFormat(image.internal_format))?;
        if image.width % 4 != 0 || image.height % 4 != 0 {
            return Err(BackendError::UnalignedBlocks {
                width: image.width,
                height: image.height,
            });
        }
        let required = codes::compressed_image_len(block_bytes, image.width, image.height, image.depth);
        if image.data.len() < required {
            return Err(BackendError::PayloadTooSmall {
                required,
                provided: image.data.len(),
            });
        }

        let (device, queue) = (self.device.clone(), self.queue.clone());
        let state = self.bound_state()?;
        if let Some(old) = state.storage.take() {
            old.texture.destroy();
        }
        let texture = texture::allocate(&device, format, image.width, image.height, image.depth, 1);
        texture::write_blocks(
            &queue,
            &texture,
            image.width,
            image.height,
            image.depth,
            block_bytes,
            &image.data[..required],
        );
        state.storage = Some(GpuStorage {
            texture,
            internal_format: image.internal_format,
            width: image.width,
            height: image.height,
            depth: image.depth,
            shadow: None,
        });
        Ok(())
    }

    fn set_filters(&mut self, filters: SamplingFilters) -> Result<(), BackendError> {
        self.bound_state()?.filters = Some(filters);
        Ok(())
    }

    fn generate_mipmap(&mut self) -> Result<(), BackendError> {
        let (device, queue) = (self.device.clone(), self.queue.clone());
        let storage = self
            .bound_state()?
            .storage
            .as_mut()
            .ok_or(BackendError::MissingStorage)?;
        storage.generate_mipmap(&device, &queue)
    }
}
