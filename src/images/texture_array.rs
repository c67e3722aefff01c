// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::bindings::sampler::SamplingMode;
use crate::imp::TextureId;
use crate::pixel_formats::{ComponentType, CompressionScheme, PixelFormat};

/// Describes an array texture to create.
///
/// ```
/// use texture_arrays::images::TextureArrayDescriptor;
/// use texture_arrays::pixel_formats::PixelFormat;
///
/// let pixels = [0u8; 4 * 4 * 4 * 2];
/// let descriptor = TextureArrayDescriptor::new(4, 4, 2, PixelFormat::Rgba)
///     .with_data(&pixels)
///     .with_mipmaps(true);
/// assert_eq!(descriptor.depth, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureArrayDescriptor<'a> {
    /// Layers in order, each `height` rows of `width` pixels.  `None` allocates
    /// uninitialized storage.
    pub data: Option<&'a [u8]>,
    pub width: u32,
    pub height: u32,
    /// Number of layers.
    pub depth: u32,
    pub format: PixelFormat,
    pub component_type: ComponentType,
    pub generate_mipmaps: bool,
    /// Read source rows bottom-up.
    pub invert_y: bool,
    pub sampling_mode: SamplingMode,
    /// Scheme `data` is already encoded with.
    pub compression: Option<CompressionScheme>,
}

impl<'a> TextureArrayDescriptor<'a> {
    pub fn new(width: u32, height: u32, depth: u32, format: PixelFormat) -> Self {
        Self {
            data: None,
            width,
            height,
            depth,
            format,
            component_type: ComponentType::default(),
            generate_mipmaps: false,
            invert_y: false,
            sampling_mode: SamplingMode::default(),
            compression: None,
        }
    }

    pub fn with_data(mut self, data: &'a [u8]) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_component_type(mut self, component_type: ComponentType) -> Self {
        self.component_type = component_type;
        self
    }

    pub fn with_mipmaps(mut self, generate_mipmaps: bool) -> Self {
        self.generate_mipmaps = generate_mipmaps;
        self
    }

    pub fn with_invert_y(mut self, invert_y: bool) -> Self {
        self.invert_y = invert_y;
        self
    }

    pub fn with_sampling_mode(mut self, sampling_mode: SamplingMode) -> Self {
        self.sampling_mode = sampling_mode;
        self
    }

    pub fn with_compression(mut self, compression: CompressionScheme) -> Self {
        self.compression = Some(compression);
        self
    }
}

/// New contents for an existing array texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureArrayUpdate<'a> {
    pub data: Option<&'a [u8]>,
    pub format: PixelFormat,
    /// `None` flips rows, matching what most image sources need.
    pub invert_y: Option<bool>,
    pub compression: Option<CompressionScheme>,
    pub component_type: ComponentType,
}

impl<'a> TextureArrayUpdate<'a> {
    pub fn new(format: PixelFormat) -> Self {
        Self {
            data: None,
            format,
            invert_y: None,
            compression: None,
            component_type: ComponentType::default(),
        }
    }

    pub fn with_data(mut self, data: &'a [u8]) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_invert_y(mut self, invert_y: bool) -> Self {
        self.invert_y = Some(invert_y);
        self
    }

    pub fn with_compression(mut self, compression: CompressionScheme) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn with_component_type(mut self, component_type: ComponentType) -> Self {
        self.component_type = component_type;
        self
    }

    /// Rebuilds the request a snapshot was taken from.
    pub fn from_retained(retained: &'a RetainedUpload) -> Self {
        Self {
            data: retained.data.as_deref(),
            format: retained.format,
            invert_y: retained.invert_y,
            compression: retained.compression,
            component_type: retained.component_type,
        }
    }
}

/// Copy of the arguments of the most recent update, kept to rebuild the texture after
/// context loss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetainedUpload {
    pub data: Option<Vec<u8>>,
    pub format: PixelFormat,
    pub invert_y: Option<bool>,
    pub compression: Option<CompressionScheme>,
    pub component_type: ComponentType,
}

impl RetainedUpload {
    pub fn from_update(update: &TextureArrayUpdate<'_>) -> Self {
        Self {
            data: update.data.map(<[u8]>::to_vec),
            format: update.format,
            invert_y: update.invert_y,
            compression: update.compression,
            component_type: update.component_type,
        }
    }
}

/// A 2D array texture on a backend.
///
/// Dimensions are fixed at creation.  Everything else describes the most recent
/// successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureArray {
    id: TextureId,
    width: u32,
    height: u32,
    depth: u32,
    format: PixelFormat,
    component_type: ComponentType,
    compression: Option<CompressionScheme>,
    generate_mipmaps: bool,
    sampling_mode: SamplingMode,
    invert_y: bool,
    is_ready: bool,
    retained: Option<RetainedUpload>,
}

impl TextureArray {
    /// A texture described by `descriptor`, backed by `id` and not yet ready.
    pub fn new(id: TextureId, descriptor: &TextureArrayDescriptor<'_>) -> Self {
        Self {
            id,
            width: descriptor.width,
            height: descriptor.height,
            depth: descriptor.depth,
            format: descriptor.format,
            component_type: descriptor.component_type,
            compression: descriptor.compression,
            generate_mipmaps: descriptor.generate_mipmaps,
            sampling_mode: descriptor.sampling_mode,
            invert_y: descriptor.invert_y,
            is_ready: false,
            retained: None,
        }
    }

    /// Backend texture currently holding the contents.
    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    pub fn compression(&self) -> Option<CompressionScheme> {
        self.compression
    }

    pub fn generate_mipmaps(&self) -> bool {
        self.generate_mipmaps
    }

    pub fn sampling_mode(&self) -> SamplingMode {
        self.sampling_mode
    }

    pub fn invert_y(&self) -> bool {
        self.invert_y
    }

    /// Whether an update has completed since the texture was created or rebuilt.
    pub fn is_ready(&self) -> bool {
        self.is_ready
    }

    /// Snapshot of the most recent update, when retained.
    pub fn retained(&self) -> Option<&RetainedUpload> {
        self.retained.as_ref()
    }

    pub(crate) fn retain(&mut self, snapshot: RetainedUpload) {
        self.retained = Some(snapshot);
    }

    pub(crate) fn mark_uploaded(&mut self, update: &TextureArrayUpdate<'_>) {
        self.format = update.format;
        self.component_type = update.component_type;
        self.compression = update.compression;
        self.invert_y = update.invert_y.unwrap_or(true);
        self.is_ready = true;
    }

    /// Points at a fresh backend texture whose contents are not uploaded yet.
    pub(crate) fn rebind(&mut self, id: TextureId) {
        self.id = id;
        self.is_ready = false;
    }
}
