// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use wgpu::{Extent3d, TexelCopyBufferLayout, TexelCopyTextureInfo};

use crate::bindings::sampler::SamplingFilters;
use crate::imp::BackendError;
use crate::imp::wgpu::mipmap::{self, MipLevel};
use crate::imp::wgpu::pixel_format::mip_kind;
use crate::pixel_formats::codes::Code;

/// Per-texture state of a [`super::WgpuContext`].
#[derive(Debug, Default)]
pub(super) struct TextureState {
    pub(super) storage: Option<GpuStorage>,
    pub(super) filters: Option<SamplingFilters>,
}

#[derive(Debug)]
pub(super) struct GpuStorage {
    pub(super) texture: wgpu::Texture,
    pub(super) internal_format: Code,
    pub(super) width: u32,
    pub(super) height: u32,
    pub(super) depth: u32,
    /// Tightly packed level 0, kept to derive mips from.  `None` for compressed storage.
    pub(super) shadow: Option<Vec<u8>>,
}

impl GpuStorage {
    pub(super) fn matches(&self, internal_format: Code, format: wgpu::TextureFormat, width: u32, height: u32, depth: u32) -> bool {
        self.internal_format == internal_format
            && self.texture.format() == format
            && self.width == width
            && self.height == height
            && self.depth == depth
    }

    /// Replaces the texture with one holding a full mip chain computed on the CPU.
    pub(super) fn generate_mipmap(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) -> Result<(), BackendError> {
        let format = self.texture.format();
        let kind = mip_kind(format).ok_or(BackendError::MipmapUnsupported(self.internal_format))?;
        let shadow = self
            .shadow
            .as_ref()
            .ok_or(BackendError::MipmapUnsupported(self.internal_format))?;
        let base = MipLevel {
            width: self.width,
            height: self.height,
            data: shadow.clone(),
        };
        let chain = mipmap::mip_chain(kind, &base, self.depth);
        let texture = allocate(
            device,
            format,
            self.width,
            self.height,
            self.depth,
            mipmap::mip_level_count(self.width, self.height),
        );
        write_level(queue, &texture, 0, &base, self.depth, kind.texel_bytes() as u32);
        for (index, level) in chain.iter().enumerate() {
            write_level(queue, &texture, index as u32 + 1, level, self.depth, kind.texel_bytes() as u32);
        }
        logwise::trace_sync!(
            "wgpu: regenerated mip chain with {levels} levels",
            levels = chain.len() + 1
        );
        self.texture.destroy();
        self.texture = texture;
        Ok(())
    }
}

pub(super) fn allocate(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
    depth: u32,
    mip_level_count: u32,
) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("texture_arrays array texture"),
        size: Extent3d {
            width,
            height,
            depth_or_array_layers: depth,
        },
        mip_level_count,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    })
}

/// Writes all layers of one uncompressed level.
pub(super) fn write_level(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    mip_level: u32,
    level: &MipLevel,
    depth: u32,
    texel_bytes: u32,
) {
    queue.write_texture(
        TexelCopyTextureInfo {
            texture,
            mip_level,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &level.data,
        TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(level.width * texel_bytes),
            rows_per_image: Some(level.height),
        },
        Extent3d {
            width: level.width,
            height: level.height,
            depth_or_array_layers: depth,
        },
    );
}

/// Writes level 0 of a block-compressed texture.  Blocks are 4x4 texels.
pub(super) fn write_blocks(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    width: u32,
    height: u32,
    depth: u32,
    block_bytes: u32,
    data: &[u8],
) {
    queue.write_texture(
        TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        data,
        TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width.div_ceil(4) * block_bytes),
            rows_per_image: Some(height.div_ceil(4)),
        },
        Extent3d {
            width,
            height,
            depth_or_array_layers: depth,
        },
    );
}
