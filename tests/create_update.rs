use texture_arrays::bindings::RowAlignment;
use texture_arrays::bindings::sampler::{SamplingFilters, SamplingMode};
use texture_arrays::images::{RetainedUpload, TextureArrayDescriptor, TextureArrayKey, TextureArrayUpdate};
use texture_arrays::pixel_formats::codes;
use texture_arrays::pixel_formats::{ComponentType, CompressionScheme, PixelFormat};
use texture_arrays::{
    BackendError, Capabilities, ContextCall, ContextLossPolicy, Error, GraphicsContext, HeadlessContext,
    TextureArrayService,
};

fn service() -> TextureArrayService<HeadlessContext> {
    TextureArrayService::new(HeadlessContext::new(), ContextLossPolicy::Retain)
}

fn s3tc_service() -> TextureArrayService<HeadlessContext> {
    let context = HeadlessContext::with_capabilities(Capabilities {
        s3tc: true,
        ..Capabilities::default()
    });
    TextureArrayService::new(context, ContextLossPolicy::Retain)
}

fn mip_generations(service: &TextureArrayService<HeadlessContext>) -> usize {
    service
        .context()
        .calls()
        .iter()
        .filter(|call| matches!(call, ContextCall::GenerateMipmap(_)))
        .count()
}

fn rgba_layers(width: u32, height: u32, depth: u32) -> Vec<u8> {
    (0..width * height * depth * 4).map(|i| i as u8).collect()
}

fn empty_texture(service: &mut TextureArrayService<HeadlessContext>, width: u32, mipmaps: bool) -> TextureArrayKey {
    service
        .create(&TextureArrayDescriptor::new(width, 4, 1, PixelFormat::Rgba).with_mipmaps(mipmaps))
        .unwrap()
}

#[test]
fn four_by_four_by_two_rgba() {
    let mut service = service();
    let layers = rgba_layers(4, 4, 2);
    let key = service
        .create(&TextureArrayDescriptor::new(4, 4, 2, PixelFormat::Rgba).with_data(&layers))
        .unwrap();

    let texture = service.get(key).unwrap();
    assert!(texture.is_ready());
    assert_eq!(texture.depth(), 2);
    assert_eq!(texture.component_type(), ComponentType::UnsignedByte);
    assert_eq!(mip_generations(&service), 0);
    assert_eq!(service.context().bound_texture_2d_array(), None);

    let stored = service.context().texture(texture.id()).unwrap();
    let storage = stored.storage.as_ref().unwrap();
    assert_eq!(storage.internal_format, codes::RGBA8);
    assert_eq!((storage.width, storage.height, storage.depth), (4, 4, 2));
    assert_eq!(storage.data.as_deref(), Some(&layers[..]));
    assert_eq!(
        stored.filters,
        Some(SamplingFilters {
            mag: codes::LINEAR,
            min: codes::LINEAR,
        })
    );
}

#[test]
fn create_then_update_retains_last_upload() {
    let mut service = service();
    let first = rgba_layers(4, 4, 2);
    let key = service
        .create(&TextureArrayDescriptor::new(4, 4, 2, PixelFormat::Rgba).with_data(&first))
        .unwrap();

    let second: Vec<u8> = first.iter().map(|b| b.wrapping_mul(3)).collect();
    service
        .update(key, Some(&second), PixelFormat::Rgba, Some(false), None, ComponentType::UnsignedByte)
        .unwrap();

    let texture = service.get(key).unwrap();
    assert!(texture.is_ready());
    assert_eq!(
        texture.retained(),
        Some(&RetainedUpload {
            data: Some(second.clone()),
            format: PixelFormat::Rgba,
            invert_y: Some(false),
            compression: None,
            component_type: ComponentType::UnsignedByte,
        })
    );
}

#[test]
fn discard_policy_keeps_no_snapshot() {
    let mut service = TextureArrayService::new(HeadlessContext::new(), ContextLossPolicy::Discard);
    let layers = rgba_layers(4, 4, 1);
    let key = service
        .create(&TextureArrayDescriptor::new(4, 4, 1, PixelFormat::Rgba).with_data(&layers))
        .unwrap();
    assert!(service.get(key).unwrap().retained().is_none());
}

#[test]
fn dxt1_on_width_five_uses_compressed_path_with_tight_rows() {
    let mut service = s3tc_service();
    let key = empty_texture(&mut service, 5, false);
    service.context_mut().take_calls();

    let blocks = vec![0xAB; CompressionScheme::Dxt1Rgb.encoded_len(5, 4, 1)];
    let scheme: CompressionScheme = "DXT1".parse().unwrap();
    service
        .update(key, Some(&blocks), PixelFormat::Rgba, None, Some(scheme), ComponentType::UnsignedByte)
        .unwrap();

    let calls = service.context().calls();
    assert!(calls.contains(&ContextCall::UnpackAlignment(RowAlignment::One)));
    assert!(calls.iter().any(|call| matches!(
        call,
        ContextCall::CompressedTexImage3D {
            internal_format: codes::COMPRESSED_RGB_S3TC_DXT1_EXT,
            width: 5,
            data_len: 16,
            ..
        }
    )));
    assert!(!calls.iter().any(|call| matches!(call, ContextCall::TexImage3D { .. })));
    assert_eq!(service.get(key).unwrap().compression(), Some(CompressionScheme::Dxt1Rgb));
}

#[test]
fn compression_without_payload_allocates_uncompressed() {
    let mut service = s3tc_service();
    let key = empty_texture(&mut service, 8, false);
    service.context_mut().take_calls();
    service
        .update_with(key, &TextureArrayUpdate::new(PixelFormat::Rgba).with_compression(CompressionScheme::Dxt5))
        .unwrap();
    let calls = service.context().calls();
    assert!(calls.iter().any(|call| matches!(call, ContextCall::TexImage3D { data_len: None, .. })));
    assert!(!calls.iter().any(|call| matches!(call, ContextCall::CompressedTexImage3D { .. })));
}

#[test]
fn mips_follow_the_flag_on_both_paths() {
    let mut service = s3tc_service();
    let with = empty_texture(&mut service, 8, true);
    assert_eq!(mip_generations(&service), 2);
    let without = empty_texture(&mut service, 8, false);
    assert_eq!(mip_generations(&service), 2);

    let blocks = vec![0; CompressionScheme::Dxt5.encoded_len(8, 4, 1)];
    let compressed = TextureArrayUpdate::new(PixelFormat::Rgba)
        .with_data(&blocks)
        .with_compression(CompressionScheme::Dxt5);
    service.update_with(with, &compressed).unwrap();
    assert_eq!(mip_generations(&service), 3);
    service.update_with(without, &compressed).unwrap();
    assert_eq!(mip_generations(&service), 3);

    let pixels = rgba_layers(8, 4, 1);
    service
        .update_with(with, &TextureArrayUpdate::new(PixelFormat::Rgba).with_data(&pixels))
        .unwrap();
    assert_eq!(mip_generations(&service), 4);
}

#[test]
fn mipmapped_textures_get_mip_filters() {
    let mut service = service();
    let key = service
        .create(
            &TextureArrayDescriptor::new(4, 4, 1, PixelFormat::Rgba)
                .with_mipmaps(true)
                .with_sampling_mode(SamplingMode::Bilinear),
        )
        .unwrap();
    let id = service.get(key).unwrap().id();
    let texture = service.context().texture(id).unwrap();
    assert_eq!(
        texture.filters,
        Some(SamplingFilters {
            mag: codes::LINEAR,
            min: codes::LINEAR_MIPMAP_NEAREST,
        })
    );
    assert_eq!(texture.mipmap_generations, 2);
}

#[test]
fn create_generates_mips_again_after_filters() {
    let mut service = service();
    let key = empty_texture(&mut service, 4, true);
    let id = service.get(key).unwrap().id();
    let calls = service.context().calls();
    let filters = calls
        .iter()
        .position(|call| matches!(call, ContextCall::SetFilters { .. }))
        .unwrap();
    assert_eq!(
        &calls[filters - 1..],
        &[
            ContextCall::BindTexture2DArray(Some(id)),
            ContextCall::SetFilters {
                texture: Some(id),
                filters: SamplingFilters {
                    mag: codes::LINEAR,
                    min: codes::LINEAR_MIPMAP_LINEAR,
                },
            },
            ContextCall::GenerateMipmap(Some(id)),
            ContextCall::BindTexture2DArray(None),
        ]
    );
}

#[test]
fn uncompressed_update_call_order() {
    let mut service = service();
    let key = empty_texture(&mut service, 4, true);
    let id = service.get(key).unwrap().id();
    service.context_mut().take_calls();

    let pixels = rgba_layers(4, 4, 1);
    service
        .update_with(key, &TextureArrayUpdate::new(PixelFormat::Rgba).with_data(&pixels))
        .unwrap();
    assert_eq!(
        service.context().calls(),
        &[
            ContextCall::BindTexture2DArray(Some(id)),
            ContextCall::UnpackFlipY(true),
            ContextCall::UnpackAlignment(RowAlignment::Four),
            ContextCall::TexImage3D {
                texture: Some(id),
                sized_internal_format: codes::RGBA8,
                format: codes::RGBA,
                ty: codes::UNSIGNED_BYTE,
                width: 4,
                height: 4,
                depth: 1,
                data_len: Some(pixels.len()),
            },
            ContextCall::GenerateMipmap(Some(id)),
            ContextCall::BindTexture2DArray(None),
        ]
    );
}

#[test]
fn compressed_update_call_order() {
    let mut service = s3tc_service();
    let key = empty_texture(&mut service, 8, true);
    let id = service.get(key).unwrap().id();
    service.context_mut().take_calls();

    let blocks = vec![0x5A; CompressionScheme::Dxt5.encoded_len(8, 4, 1)];
    service
        .update_with(
            key,
            &TextureArrayUpdate::new(PixelFormat::Rgba)
                .with_data(&blocks)
                .with_compression(CompressionScheme::Dxt5)
                .with_invert_y(false),
        )
        .unwrap();
    assert_eq!(
        service.context().calls(),
        &[
            ContextCall::BindTexture2DArray(Some(id)),
            ContextCall::UnpackFlipY(false),
            ContextCall::UnpackAlignment(RowAlignment::Four),
            ContextCall::CompressedTexImage3D {
                texture: Some(id),
                internal_format: codes::COMPRESSED_RGBA_S3TC_DXT5_EXT,
                width: 8,
                height: 4,
                depth: 1,
                data_len: blocks.len(),
            },
            ContextCall::GenerateMipmap(Some(id)),
            ContextCall::BindTexture2DArray(None),
        ]
    );
}

#[test]
fn update_is_idempotent() {
    let mut service = service();
    let key = empty_texture(&mut service, 4, true);
    let pixels = rgba_layers(4, 4, 1);
    let request = TextureArrayUpdate::new(PixelFormat::Rgba).with_data(&pixels);

    service.update_with(key, &request).unwrap();
    let once = service.get(key).unwrap().clone();
    let stored_once = service.context().texture(once.id()).unwrap().storage.clone();

    service.update_with(key, &request).unwrap();
    let twice = service.get(key).unwrap();
    assert_eq!(&once, twice);
    assert_eq!(service.context().texture(twice.id()).unwrap().storage, stored_once);
}

#[test]
fn missing_invert_y_flips_rows() {
    let mut service = service();
    let key = empty_texture(&mut service, 4, false);
    let pixels = rgba_layers(4, 4, 1);
    service
        .update_with(key, &TextureArrayUpdate::new(PixelFormat::Rgba).with_data(&pixels))
        .unwrap();

    let texture = service.get(key).unwrap();
    assert!(texture.invert_y());
    let stored = service.context().texture(texture.id()).unwrap().storage.as_ref().unwrap();
    let data = stored.data.as_deref().unwrap();
    assert_eq!(&data[..16], &pixels[48..64]);
    assert_eq!(&data[48..64], &pixels[..16]);
}

#[test]
fn alignment_is_reset_for_aligned_widths() {
    let mut service = service();
    let odd = empty_texture(&mut service, 3, false);
    let even = empty_texture(&mut service, 4, false);
    service.context_mut().take_calls();

    let odd_pixels = rgba_layers(3, 4, 1);
    service
        .update_with(odd, &TextureArrayUpdate::new(PixelFormat::Rgba).with_data(&odd_pixels))
        .unwrap();
    let even_pixels = rgba_layers(4, 4, 1);
    service
        .update_with(even, &TextureArrayUpdate::new(PixelFormat::Rgba).with_data(&even_pixels))
        .unwrap();

    let alignments: Vec<_> = service
        .context()
        .calls()
        .iter()
        .filter_map(|call| match call {
            ContextCall::UnpackAlignment(alignment) => Some(*alignment),
            _ => None,
        })
        .collect();
    assert_eq!(alignments, vec![RowAlignment::One, RowAlignment::Four]);
}

#[test]
fn failed_update_clears_binding_and_keeps_attempt() {
    let mut service = service();
    let layers = rgba_layers(4, 4, 1);
    let key = service
        .create(&TextureArrayDescriptor::new(4, 4, 1, PixelFormat::Rgba).with_data(&layers))
        .unwrap();

    let short = [0u8; 10];
    let err = service
        .update(key, Some(&short), PixelFormat::Red, Some(true), None, ComponentType::Float)
        .unwrap_err();
    assert_eq!(
        err,
        Error::BackendRejected(BackendError::PayloadTooSmall {
            required: 64,
            provided: 10,
        })
    );
    assert_eq!(service.context().bound_texture_2d_array(), None);

    let texture = service.get(key).unwrap();
    assert!(texture.is_ready());
    assert_eq!(texture.format(), PixelFormat::Rgba);
    let retained = texture.retained().unwrap();
    assert_eq!(retained.format, PixelFormat::Red);
    assert_eq!(retained.data.as_deref(), Some(&short[..]));
}

#[test]
fn unsupported_compression_is_reported() {
    let mut service = service();
    let key = empty_texture(&mut service, 8, false);
    let blocks = vec![0; CompressionScheme::Dxt5.encoded_len(8, 4, 1)];
    let err = service
        .update(key, Some(&blocks), PixelFormat::Rgba, None, Some(CompressionScheme::Dxt5), ComponentType::UnsignedByte)
        .unwrap_err();
    assert_eq!(err, Error::UnsupportedCompression(CompressionScheme::Dxt5));
    assert_eq!(service.context().bound_texture_2d_array(), None);
}

#[test]
fn failed_create_registers_nothing() {
    let mut service = service();
    let short = [0u8; 32];
    let err = service
        .create(&TextureArrayDescriptor::new(4, 4, 2, PixelFormat::Rgba).with_data(&short))
        .unwrap_err();
    assert!(matches!(err, Error::BackendRejected(BackendError::PayloadTooSmall { .. })));
    assert!(service.cache().is_empty());
    assert_eq!(service.context().texture_count(), 0);
    assert_eq!(service.context().bound_texture_2d_array(), None);
    assert!(service.context().calls().iter().any(|call| matches!(call, ContextCall::DeleteTexture(_))));
}

#[test]
fn empty_dimensions_are_rejected_before_allocation() {
    let mut service = service();
    let err = service
        .create(&TextureArrayDescriptor::new(4, 0, 2, PixelFormat::Rgba))
        .unwrap_err();
    assert_eq!(
        err,
        Error::InvalidDimensions {
            width: 4,
            height: 0,
            depth: 2,
        }
    );
    assert!(service.context().calls().is_empty());
}

#[test]
fn oversized_textures_are_rejected() {
    let mut service = service();
    let err = service
        .create(&TextureArrayDescriptor::new(4, 4, 300, PixelFormat::Rgba))
        .unwrap_err();
    assert!(matches!(err, Error::BackendRejected(BackendError::ExceedsLimits { .. })));
    assert!(service.cache().is_empty());
}

#[test]
fn release_deletes_the_backend_texture() {
    let mut service = service();
    let key = empty_texture(&mut service, 4, false);
    let id = service.get(key).unwrap().id();
    service.release(key).unwrap();

    assert!(service.get(key).is_none());
    assert!(service.context().texture(id).is_none());
    assert_eq!(service.release(key), Err(Error::UnknownTexture(key)));
    assert_eq!(
        service.update_with(key, &TextureArrayUpdate::new(PixelFormat::Rgba)),
        Err(Error::UnknownTexture(key))
    );
}

#[test]
fn float_textures_use_sized_formats() {
    let mut service = service();
    let key = service
        .create(&TextureArrayDescriptor::new(2, 2, 3, PixelFormat::Rg).with_component_type(ComponentType::HalfFloat))
        .unwrap();
    let id = service.get(key).unwrap().id();
    let storage = service.context().texture(id).unwrap().storage.clone().unwrap();
    assert_eq!(storage.internal_format, codes::RG16F);
    assert!(storage.data.is_none());
}
