/*! texture_arrays manages 2D array textures on a GPU backend.

An array texture is a single GPU resource holding N same-sized 2D images, addressed by
layer index.  This crate handles:

* negotiating backend formats from a [`PixelFormat`](pixel_formats::PixelFormat) and
  [`ComponentType`](pixel_formats::ComponentType),
* uploading pre-encoded block-compressed payloads,
* generating mip chains,
* keeping enough of each upload around to rebuild the texture after the graphics context
  is lost.

# Backends

Everything goes through the [`GraphicsContext`] trait, a small bind-then-mutate
interface in the GL style.  [`HeadlessContext`] validates and records calls in memory and
is always available.  With the `backend_wgpu` feature (on by default), `WgpuContext`
drives a host's `wgpu::Device`.

# Example

```
use texture_arrays::{ContextLossPolicy, HeadlessContext, TextureArrayService};
use texture_arrays::images::TextureArrayDescriptor;
use texture_arrays::pixel_formats::PixelFormat;

let mut service = TextureArrayService::new(HeadlessContext::new(), ContextLossPolicy::Retain);
let layers = vec![255u8; 4 * 4 * 4 * 2];
let key = service
    .create(&TextureArrayDescriptor::new(4, 4, 2, PixelFormat::Rgba).with_data(&layers))
    .unwrap();

service.context_mut().lose_context();
service.context_mut().restore_context();
assert_eq!(service.rebuild_after_context_loss().unwrap(), 1);
assert!(service.get(key).unwrap().is_ready());
```
*/

pub mod bindings;
pub mod images;
mod imp;
pub mod pixel_formats;

pub use images::{ContextLossPolicy, Error, TextureArrayService};
pub use imp::{
    BackendError, Capabilities, CompressedTexImage3D, ContextCall, GraphicsContext, HeadlessContext, HeadlessStorage,
    HeadlessTexture, TexImage3D, TextureId,
};

#[cfg(feature = "backend_wgpu")]
pub use imp::WgpuContext;
