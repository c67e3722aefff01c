// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Creates, updates and rebuilds array textures on a [`GraphicsContext`].

use crate::bindings::sampler::sampling_parameters;
use crate::bindings::upload_plan::plan;
use crate::bindings::with_binding;
use crate::images::{
    Error, RetainedUpload, TextureArray, TextureArrayDescriptor, TextureArrayKey, TextureArrayUpdate, TextureCache,
};
use crate::imp::{CompressedTexImage3D, GraphicsContext, TexImage3D};
use crate::pixel_formats::translate::translate;
use crate::pixel_formats::{ComponentType, CompressionScheme, PixelFormat};

/// Whether textures keep a copy of their last upload so they can be rebuilt after the
/// graphics context is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContextLossPolicy {
    /// Keep a [`RetainedUpload`] on every texture.
    #[default]
    Retain,
    /// Keep nothing.  Rebuilt textures come back uninitialized.
    Discard,
}

/// Owns a graphics context and the array textures created on it.
///
/// ```
/// use texture_arrays::{ContextLossPolicy, HeadlessContext, TextureArrayService};
/// use texture_arrays::images::TextureArrayDescriptor;
/// use texture_arrays::pixel_formats::PixelFormat;
///
/// let mut service = TextureArrayService::new(HeadlessContext::new(), ContextLossPolicy::Retain);
/// let pixels = vec![0u8; 4 * 4 * 4 * 2];
/// let key = service
///     .create(&TextureArrayDescriptor::new(4, 4, 2, PixelFormat::Rgba).with_data(&pixels))
///     .unwrap();
/// assert!(service.get(key).unwrap().is_ready());
/// ```
#[derive(Debug)]
pub struct TextureArrayService<C> {
    context: C,
    cache: TextureCache,
    policy: ContextLossPolicy,
}

impl<C: GraphicsContext> TextureArrayService<C> {
    pub fn new(context: C, policy: ContextLossPolicy) -> Self {
        Self {
            context,
            cache: TextureCache::new(),
            policy,
        }
    }

    pub fn policy(&self) -> ContextLossPolicy {
        self.policy
    }

    /// Creates an array texture and uploads its initial contents.
    ///
    /// Nothing is allocated when the dimensions are empty.  When the upload fails the
    /// backend texture is deleted again and nothing is registered.
    pub fn create(&mut self, descriptor: &TextureArrayDescriptor<'_>) -> Result<TextureArrayKey, Error> {
        if descriptor.width == 0 || descriptor.height == 0 || descriptor.depth == 0 {
            return Err(Error::InvalidDimensions {
                width: descriptor.width,
                height: descriptor.height,
                depth: descriptor.depth,
            });
        }
        let id = self.context.create_texture()?;
        let mut texture = TextureArray::new(id, descriptor);
        let request = TextureArrayUpdate {
            data: descriptor.data,
            format: descriptor.format,
            invert_y: Some(descriptor.invert_y),
            compression: descriptor.compression,
            component_type: descriptor.component_type,
        };
        let result = upload(&mut self.context, self.policy, &mut texture, &request)
            .and_then(|()| apply_sampling(&mut self.context, &texture));
        if let Err(e) = result {
            logwise::error_sync!(
                "create {w}x{h}x{d} failed: {error}",
                w = descriptor.width,
                h = descriptor.height,
                d = descriptor.depth,
                error = logwise::privacy::LogIt(&e)
            );
            self.context.delete_texture(id);
            return Err(e);
        }
        logwise::info_sync!(
            "created array texture {w}x{h}x{d}",
            w = descriptor.width,
            h = descriptor.height,
            d = descriptor.depth
        );
        Ok(self.cache.register(texture))
    }

    /// Replaces the contents of a texture.  Dimensions never change.
    ///
    /// `invert_y` of `None` flips rows.
    pub fn update(
        &mut self,
        key: TextureArrayKey,
        data: Option<&[u8]>,
        format: PixelFormat,
        invert_y: Option<bool>,
        compression: Option<CompressionScheme>,
        component_type: ComponentType,
    ) -> Result<(), Error> {
        self.update_with(
            key,
            &TextureArrayUpdate {
                data,
                format,
                invert_y,
                compression,
                component_type,
            },
        )
    }

    pub fn update_with(&mut self, key: TextureArrayKey, request: &TextureArrayUpdate<'_>) -> Result<(), Error> {
        let texture = self.cache.get_mut(key).ok_or(Error::UnknownTexture(key))?;
        upload(&mut self.context, self.policy, texture, request)
    }

    pub fn get(&self, key: TextureArrayKey) -> Option<&TextureArray> {
        self.cache.get(key)
    }

    /// Unregisters a texture and deletes its backend storage.
    pub fn release(&mut self, key: TextureArrayKey) -> Result<(), Error> {
        let texture = self.cache.remove(key).ok_or(Error::UnknownTexture(key))?;
        self.context.delete_texture(texture.id());
        Ok(())
    }

    /// Recreates every registered texture on a restored context.
    ///
    /// Textures with a retained upload get their contents back; the rest get
    /// uninitialized storage of the same shape.  The backend texture each one replaces is
    /// deleted first.  Stops at the first failure.
    /// Returns the number of textures rebuilt.
    pub fn rebuild_after_context_loss(&mut self) -> Result<usize, Error> {
        let mut rebuilt = 0;
        for (key, texture) in self.cache.iter_mut() {
            self.context.delete_texture(texture.id());
            let id = self.context.create_texture()?;
            texture.rebind(id);
            let retained = texture.retained().cloned();
            match &retained {
                Some(snapshot) => {
                    upload(&mut self.context, self.policy, texture, &TextureArrayUpdate::from_retained(snapshot))?
                }
                None => {
                    logwise::warn_sync!(
                        "texture {key} has no retained upload, rebuilding it uninitialized",
                        key = key.index()
                    );
                    let request = TextureArrayUpdate {
                        data: None,
                        format: texture.format(),
                        invert_y: Some(texture.invert_y()),
                        compression: texture.compression(),
                        component_type: texture.component_type(),
                    };
                    upload(&mut self.context, self.policy, texture, &request)?
                }
            }
            apply_sampling(&mut self.context, texture)?;
            rebuilt += 1;
        }
        logwise::info_sync!("rebuilt {count} array textures", count = rebuilt);
        Ok(rebuilt)
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn cache(&self) -> &TextureCache {
        &self.cache
    }

    pub fn into_context(self) -> C {
        self.context
    }
}

/// Uploads `request` into `texture`, updating its description when the backend accepts.
///
/// Under [`ContextLossPolicy::Retain`] the request is recorded before the backend is
/// called, so the snapshot reflects the attempted upload even if it fails.
pub fn upload<C: GraphicsContext + ?Sized>(
    context: &mut C,
    policy: ContextLossPolicy,
    texture: &mut TextureArray,
    request: &TextureArrayUpdate<'_>,
) -> Result<(), Error> {
    let codes = translate(request.format, request.component_type);
    let invert_y = request.invert_y.unwrap_or(true);
    let result = with_binding(context, texture.id(), |context| -> Result<(), Error> {
        context.set_unpack_flip_y(invert_y);
        if policy == ContextLossPolicy::Retain {
            texture.retain(RetainedUpload::from_update(request));
        }
        let plan = plan(texture, request.data.is_some(), request.compression);
        context.set_unpack_alignment(plan.row_alignment);
        match (plan.use_compressed_path, request.compression, request.data) {
            (true, Some(scheme), Some(data)) => {
                let internal_format = context
                    .capabilities()
                    .compressed_format(scheme)
                    .ok_or(Error::UnsupportedCompression(scheme))?;
                logwise::trace_sync!(
                    "compressed upload {scheme}, {len} bytes",
                    scheme = logwise::privacy::LogIt(&scheme),
                    len = data.len()
                );
                context.compressed_tex_image_3d(&CompressedTexImage3D {
                    internal_format,
                    width: texture.width(),
                    height: texture.height(),
                    depth: texture.depth(),
                    data,
                })?;
            }
            _ => {
                context.tex_image_3d(&TexImage3D {
                    sized_internal_format: codes.sized_internal_format,
                    width: texture.width(),
                    height: texture.height(),
                    depth: texture.depth(),
                    format: codes.upload_format,
                    ty: codes.upload_type,
                    data: request.data,
                })?;
            }
        }
        if plan.should_generate_mips {
            context.generate_mipmap()?;
        }
        Ok(())
    });
    match result {
        Ok(()) => {
            texture.mark_uploaded(request);
            Ok(())
        }
        Err(e) => {
            logwise::error_sync!(
                "upload to texture {id} failed: {error}",
                id = texture.id().raw(),
                error = logwise::privacy::LogIt(&e)
            );
            Err(e)
        }
    }
}

/// Sets the filters derived from the texture's sampling mode, then regenerates the mip
/// chain of mipmapped textures under those filters.
pub fn apply_sampling<C: GraphicsContext + ?Sized>(context: &mut C, texture: &TextureArray) -> Result<(), Error> {
    let filters = sampling_parameters(texture.sampling_mode(), texture.generate_mipmaps());
    with_binding(context, texture.id(), |context| -> Result<(), Error> {
        context.set_filters(filters)?;
        if texture.generate_mipmaps() {
            context.generate_mipmap()?;
        }
        Ok(())
    })
}
