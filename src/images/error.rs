use crate::images::TextureArrayKey;
use crate::imp::BackendError;
use crate::pixel_formats::CompressionScheme;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("array texture must be at least 1x1x1, got {width}x{height}x{depth}")]
    InvalidDimensions { width: u32, height: u32, depth: u32 },
    #[error("backend does not support {0} compression")]
    UnsupportedCompression(CompressionScheme),
    #[error("backend rejected the call: {0}")]
    BackendRejected(#[from] BackendError),
    #[error("no array texture is registered for {0:?}")]
    UnknownTexture(TextureArrayKey),
}
