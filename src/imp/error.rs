use crate::imp::TextureId;
use crate::pixel_formats::codes::Code;

/// A backend refused a call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("graphics context is lost")]
    ContextLost,
    #[error("no texture is bound to the 2D array binding point")]
    NoTextureBound,
    #[error("texture {0:?} does not exist in this context")]
    UnknownTexture(TextureId),
    #[error("payload has {provided} bytes, upload needs {required}")]
    PayloadTooSmall { required: usize, provided: usize },
    #[error("format {internal_format:#x} cannot be uploaded from format {format:#x} type {ty:#x}")]
    UnsupportedFormat {
        internal_format: Code,
        format: Code,
        ty: Code,
    },
    #[error("compressed format {0:#x} is not supported")]
    UnsupportedCompressedFormat(Code),
    #[error("{width}x{height}x{depth} exceeds limits ({max_size} texels per side, {max_layers} layers)")]
    ExceedsLimits {
        width: u32,
        height: u32,
        depth: u32,
        max_size: u32,
        max_layers: u32,
    },
    #[error("{width}x{height} is not a whole number of 4x4 blocks")]
    UnalignedBlocks { width: u32, height: u32 },
    #[error("texture has no storage to generate mipmaps from")]
    MissingStorage,
    #[error("mipmaps cannot be generated for format {0:#x}")]
    MipmapUnsupported(Code),
}
