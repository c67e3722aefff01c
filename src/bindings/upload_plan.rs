// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Decides how an update reaches the backend.

use crate::images::TextureArray;
use crate::pixel_formats::CompressionScheme;

/// Byte alignment the backend assumes for the start of each source row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowAlignment {
    /// Rows are tightly packed.
    One,
    /// Rows start on 4-byte boundaries.  Backend default.
    #[default]
    Four,
}

impl RowAlignment {
    pub const fn bytes(self) -> u32 {
        match self {
            RowAlignment::One => 1,
            RowAlignment::Four => 4,
        }
    }

    /// Alignment for rows of a texture `width` pixels wide.
    pub const fn for_width(width: u32) -> Self {
        if width % 4 != 0 {
            RowAlignment::One
        } else {
            RowAlignment::Four
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPlan {
    /// Upload the bytes verbatim as compressed blocks.
    pub use_compressed_path: bool,
    pub row_alignment: RowAlignment,
    pub should_generate_mips: bool,
}

/// Plans an upload onto `texture`.
///
/// A compression scheme only selects the compressed path when bytes are present;
/// allocating storage without data always goes through the uncompressed path.
pub fn plan(
    texture: &TextureArray,
    bytes_provided: bool,
    compression: Option<CompressionScheme>,
) -> UploadPlan {
    UploadPlan {
        use_compressed_path: compression.is_some() && bytes_provided,
        row_alignment: RowAlignment::for_width(texture.width()),
        should_generate_mips: texture.generate_mipmaps(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextureId;
    use crate::images::TextureArrayDescriptor;
    use crate::pixel_formats::PixelFormat;

    fn texture(width: u32, mipmaps: bool) -> TextureArray {
        let descriptor = TextureArrayDescriptor::new(width, 4, 2, PixelFormat::Rgba).with_mipmaps(mipmaps);
        TextureArray::new(TextureId::from_raw(1), &descriptor)
    }

    #[test]
    fn odd_widths_are_tightly_packed() {
        for width in [1, 2, 3, 5, 6, 7, 9, 13, 255, 1023] {
            assert_eq!(plan(&texture(width, false), true, None).row_alignment, RowAlignment::One);
        }
        for width in [4, 8, 12, 16, 256, 1024] {
            assert_eq!(plan(&texture(width, false), true, None).row_alignment, RowAlignment::Four);
        }
    }

    #[test]
    fn compressed_path_needs_bytes() {
        let t = texture(8, false);
        assert!(plan(&t, true, Some(CompressionScheme::Dxt1Rgb)).use_compressed_path);
        assert!(!plan(&t, false, Some(CompressionScheme::Dxt1Rgb)).use_compressed_path);
        assert!(!plan(&t, true, None).use_compressed_path);
        assert!(!plan(&t, false, None).use_compressed_path);
    }

    #[test]
    fn mips_follow_the_flag_on_both_paths() {
        let with = texture(8, true);
        let without = texture(8, false);
        for compression in [None, Some(CompressionScheme::Dxt5)] {
            assert!(plan(&with, true, compression).should_generate_mips);
            assert!(!plan(&without, true, compression).should_generate_mips);
        }
    }

    #[test]
    fn dxt1_on_width_five() {
        let p = plan(&texture(5, false), true, Some(CompressionScheme::Dxt1Rgb));
        assert!(p.use_compressed_path);
        assert_eq!(p.row_alignment, RowAlignment::One);
    }
}
