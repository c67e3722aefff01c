// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Decode PNG images into a layered RGBA8 payload.
//!
//! The result is tightly packed, layer after layer, which is the layout
//! [`crate::TextureArrayService::create`] expects for [`super::PixelFormat::Rgba`] and
//! [`super::ComponentType::UnsignedByte`].

use std::io::Cursor;

use png::{ColorType, Transformations};

#[derive(Debug, thiserror::Error)]
pub enum PngError {
    #[error("no PNG layers were provided")]
    NoLayers,
    #[error("layer {layer} is {width}x{height}, expected {expected_width}x{expected_height}")]
    MismatchedLayer {
        layer: usize,
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },
    #[error("layer {layer}: {source}")]
    Decoding {
        layer: usize,
        #[source]
        source: png::DecodingError,
    },
}

/// A decoded stack of same-sized RGBA8 layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngLayers {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub data: Vec<u8>,
}

/// Decodes each source into one array layer.
///
/// Palette, grayscale and 16-bit images are normalized to 8-bit RGBA.
pub fn layers_from_png<S: AsRef<[u8]>>(sources: &[S]) -> Result<PngLayers, PngError> {
    let mut size = None;
    let mut data = Vec::new();
    for (layer, source) in sources.iter().enumerate() {
        let (width, height, rgba) = decode_rgba8(source.as_ref())
            .map_err(|source| PngError::Decoding { layer, source })?;
        match size {
            None => size = Some((width, height)),
            Some((expected_width, expected_height)) => {
                if (width, height) != (expected_width, expected_height) {
                    return Err(PngError::MismatchedLayer {
                        layer,
                        width,
                        height,
                        expected_width,
                        expected_height,
                    });
                }
            }
        }
        data.extend_from_slice(&rgba);
    }
    let (width, height) = size.ok_or(PngError::NoLayers)?;
    logwise::trace_sync!(
        "decoded {depth} PNG layers of {width}x{height}",
        depth = sources.len(),
        width = width,
        height = height
    );
    Ok(PngLayers {
        width,
        height,
        depth: sources.len() as u32,
        data,
    })
}

fn decode_rgba8(bytes: &[u8]) -> Result<(u32, u32, Vec<u8>), png::DecodingError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;
    let (color_type, _) = reader.output_color_type();
    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let samples = color_type.samples();
    let mut buf = vec![0u8; width as usize * height as usize * samples];
    let frame = reader.next_frame(&mut buf)?;
    buf.truncate(frame.buffer_size());

    let rgba = match color_type {
        ColorType::Rgba => buf,
        ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], u8::MAX])
            .collect(),
        ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, u8::MAX]).collect(),
        // palette images are expanded by normalize_to_color8
        ColorType::Indexed => buf,
    };
    Ok((width, height, rgba))
}
