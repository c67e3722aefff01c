// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Registry of live array textures.

use crate::images::TextureArray;

/// Stable handle to a texture in a [`TextureCache`].  Keys are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureArrayKey(usize);

impl TextureArrayKey {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Append-only slots; removal leaves a hole.
#[derive(Debug, Default)]
pub struct TextureCache {
    slots: Vec<Option<TextureArray>>,
    live: usize,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&mut self, texture: TextureArray) -> TextureArrayKey {
        self.slots.push(Some(texture));
        self.live += 1;
        TextureArrayKey(self.slots.len() - 1)
    }

    pub fn get(&self, key: TextureArrayKey) -> Option<&TextureArray> {
        self.slots.get(key.0)?.as_ref()
    }

    pub(crate) fn get_mut(&mut self, key: TextureArrayKey) -> Option<&mut TextureArray> {
        self.slots.get_mut(key.0)?.as_mut()
    }

    pub(crate) fn remove(&mut self, key: TextureArrayKey) -> Option<TextureArray> {
        let removed = self.slots.get_mut(key.0)?.take();
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    /// Live textures in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TextureArrayKey, &TextureArray)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|t| (TextureArrayKey(index), t)))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (TextureArrayKey, &mut TextureArray)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|t| (TextureArrayKey(index), t)))
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::TextureArrayDescriptor;
    use crate::imp::TextureId;
    use crate::pixel_formats::PixelFormat;

    fn texture(id: u64) -> TextureArray {
        TextureArray::new(
            TextureId::from_raw(id),
            &TextureArrayDescriptor::new(1, 1, 1, PixelFormat::Rgba),
        )
    }

    #[test]
    fn keys_are_not_reused() {
        let mut cache = TextureCache::new();
        let a = cache.register(texture(1));
        let b = cache.register(texture(2));
        assert_eq!(cache.remove(a).map(|t| t.id()), Some(TextureId::from_raw(1)));
        let c = cache.register(texture(3));
        assert_ne!(a, c);
        assert!(cache.get(a).is_none());
        assert_eq!(cache.get(b).map(|t| t.id()), Some(TextureId::from_raw(2)));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn iteration_skips_holes() {
        let mut cache = TextureCache::new();
        let keys: Vec<_> = (1..=3).map(|id| cache.register(texture(id))).collect();
        cache.remove(keys[1]);
        assert!(cache.remove(keys[1]).is_none());
        let seen: Vec<_> = cache.iter().map(|(key, _)| key).collect();
        assert_eq!(seen, vec![keys[0], keys[2]]);
        assert_eq!(cache.len(), 2);
        assert!(!cache.is_empty());
    }
}
