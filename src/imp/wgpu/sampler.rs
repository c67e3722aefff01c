// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use wgpu::{AddressMode, FilterMode, SamplerDescriptor};

use crate::bindings::sampler::SamplingFilters;
use crate::pixel_formats::codes;

/// Builds a sampler equivalent to the GL filter state of a texture.
///
/// Without a mip filter only level 0 is sampled.
pub(super) fn sampler_descriptor(filters: Option<SamplingFilters>) -> SamplerDescriptor<'static> {
    let filters = filters.unwrap_or(SamplingFilters {
        mag: codes::LINEAR,
        min: codes::NEAREST_MIPMAP_LINEAR,
    });
    let mag_filter = match filters.mag {
        codes::LINEAR => FilterMode::Linear,
        _ => FilterMode::Nearest,
    };
    let min_filter = match filters.min {
        codes::LINEAR | codes::LINEAR_MIPMAP_NEAREST | codes::LINEAR_MIPMAP_LINEAR => FilterMode::Linear,
        _ => FilterMode::Nearest,
    };
    let mipmap_filter = match filters.min {
        codes::NEAREST_MIPMAP_LINEAR | codes::LINEAR_MIPMAP_LINEAR => FilterMode::Linear,
        _ => FilterMode::Nearest,
    };
    let lod_max_clamp = if codes::is_mipmap_filter(filters.min) { 32.0 } else { 0.0 };
    SamplerDescriptor {
        label: Some("texture_arrays sampler"),
        address_mode_u: AddressMode::ClampToEdge,
        address_mode_v: AddressMode::ClampToEdge,
        address_mode_w: AddressMode::ClampToEdge,
        mag_filter,
        min_filter,
        mipmap_filter,
        lod_min_clamp: 0.0,
        lod_max_clamp,
        compare: None,
        anisotropy_clamp: 1,
        border_color: None,
    }
}
