// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! CPU box filter for mip chains.
//!
//! Each texel of a level averages the 2x2 footprint below it.  Footprints that run off
//! an odd edge reuse the edge texel.

use half::f16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MipKind {
    Unorm8 { channels: usize },
    Half { channels: usize },
    Float { channels: usize },
}

impl MipKind {
    const fn channels(self) -> usize {
        match self {
            MipKind::Unorm8 { channels } | MipKind::Half { channels } | MipKind::Float { channels } => channels,
        }
    }

    const fn component_bytes(self) -> usize {
        match self {
            MipKind::Unorm8 { .. } => 1,
            MipKind::Half { .. } => 2,
            MipKind::Float { .. } => 4,
        }
    }

    pub(super) const fn texel_bytes(self) -> usize {
        self.channels() * self.component_bytes()
    }

    fn average(self, samples: [&[u8]; 4], out: &mut Vec<u8>) {
        match self {
            MipKind::Unorm8 { channels } => {
                for c in 0..channels {
                    let sum: u16 = samples.iter().map(|s| s[c] as u16).sum();
                    out.push(((sum + 2) / 4) as u8);
                }
            }
            MipKind::Half { channels } => {
                for c in 0..channels {
                    let sum: f32 = samples
                        .iter()
                        .map(|s| f16::from_le_bytes([s[c * 2], s[c * 2 + 1]]).to_f32())
                        .sum();
                    out.extend_from_slice(&f16::from_f32(sum / 4.0).to_le_bytes());
                }
            }
            MipKind::Float { channels } => {
                for c in 0..channels {
                    let at = c * 4;
                    let sum: f32 = samples
                        .iter()
                        .map(|s| f32::from_le_bytes([s[at], s[at + 1], s[at + 2], s[at + 3]]))
                        .sum();
                    out.extend_from_slice(&(sum / 4.0).to_le_bytes());
                }
            }
        }
    }
}

/// Number of levels in a full chain for a `width` x `height` base.
pub(super) fn mip_level_count(width: u32, height: u32) -> u32 {
    width.max(height).max(1).ilog2() + 1
}

/// One level of a mip chain, all layers tightly packed.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct MipLevel {
    pub(super) width: u32,
    pub(super) height: u32,
    pub(super) data: Vec<u8>,
}

/// Halves `level` in each dimension, layer by layer.
pub(super) fn downsample(kind: MipKind, level: &MipLevel, depth: u32) -> MipLevel {
    let texel = kind.texel_bytes();
    let (width, height) = (level.width as usize, level.height as usize);
    let mip_width = (width / 2).max(1);
    let mip_height = (height / 2).max(1);
    let layer_bytes = width * height * texel;
    let mut data = Vec::with_capacity(mip_width * mip_height * texel * depth as usize);
    for layer in 0..depth as usize {
        let base = &level.data[layer * layer_bytes..(layer + 1) * layer_bytes];
        let at = |x: usize, y: usize| {
            let x = x.min(width - 1);
            let y = y.min(height - 1);
            let start = (y * width + x) * texel;
            &base[start..start + texel]
        };
        for mip_y in 0..mip_height {
            for mip_x in 0..mip_width {
                let (x, y) = (mip_x * 2, mip_y * 2);
                kind.average([at(x, y), at(x + 1, y), at(x, y + 1), at(x + 1, y + 1)], &mut data);
            }
        }
    }
    MipLevel {
        width: mip_width as u32,
        height: mip_height as u32,
        data,
    }
}

/// Every level below `base`, largest first.
pub(super) fn mip_chain(kind: MipKind, base: &MipLevel, depth: u32) -> Vec<MipLevel> {
    let count = mip_level_count(base.width, base.height);
    let mut levels: Vec<MipLevel> = Vec::with_capacity(count.saturating_sub(1) as usize);
    for _ in 1..count {
        let next = downsample(kind, levels.last().unwrap_or(base), depth);
        levels.push(next);
    }
    levels
}
