// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Reads source rows the way the backend's unpack state describes them.
//!
//! Source rows start on [`RowAlignment`] boundaries and the last row of the buffer
//! is not padded.  With flip-Y set, rows of every layer are stored bottom-up.

use crate::bindings::RowAlignment;
use crate::imp::BackendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnpackLayout {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub bytes_per_pixel: u32,
    pub alignment: RowAlignment,
    pub flip_y: bool,
}

impl UnpackLayout {
    /// Bytes of pixel data in one row.
    pub const fn row_bytes(&self) -> usize {
        self.width as usize * self.bytes_per_pixel as usize
    }

    /// Distance between the starts of consecutive source rows.
    pub const fn source_stride(&self) -> usize {
        let align = self.alignment.bytes() as usize;
        self.row_bytes().div_ceil(align) * align
    }

    /// Smallest source buffer that covers every row.
    pub const fn required_len(&self) -> usize {
        let rows = self.height as usize * self.depth as usize;
        if rows == 0 {
            return 0;
        }
        self.source_stride() * (rows - 1) + self.row_bytes()
    }

    /// Length of the tightly packed result.
    pub const fn packed_len(&self) -> usize {
        self.row_bytes() * self.height as usize * self.depth as usize
    }
}

/// Copies `data` into tightly packed, top-down rows.
pub fn unpack_rows(data: &[u8], layout: UnpackLayout) -> Result<Vec<u8>, BackendError> {
    let required = layout.required_len();
    if data.len() < required {
        return Err(BackendError::PayloadTooSmall {
            required,
            provided: data.len(),
        });
    }
    let row_bytes = layout.row_bytes();
    let stride = layout.source_stride();
    let height = layout.height as usize;
    let mut packed = Vec::with_capacity(layout.packed_len());
    for layer in 0..layout.depth as usize {
        for y in 0..height {
            let source_row = if layout.flip_y { height - 1 - y } else { y };
            let start = (layer * height + source_row) * stride;
            packed.extend_from_slice(&data[start..start + row_bytes]);
        }
    }
    Ok(packed)
}
