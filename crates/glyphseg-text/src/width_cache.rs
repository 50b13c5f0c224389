#![forbid(unsafe_code)]

//! LRU cache of measured text widths.
//!
//! Renderers measure the same labels every frame. The cache keys each
//! text by its 64-bit FxHash and remembers the lossy display width, so
//! repeat lookups skip cluster segmentation entirely.
//!
//! # Example
//! ```
//! use glyphseg_text::WidthCache;
//!
//! let mut cache = WidthCache::new(64);
//! assert_eq!(cache.get_or_compute("中文 ok".as_bytes()), 7);
//! assert_eq!(cache.get_or_compute("中文 ok".as_bytes()), 7);
//!
//! let stats = cache.stats();
//! assert_eq!((stats.hits, stats.misses), (1, 1));
//! ```

use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use lru::LruCache;
use rustc_hash::FxHasher;

/// Default cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Hit/miss counters and occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache (0.0 when unused).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache from text to display width.
///
/// Keys are hashes, not the texts themselves; a 64-bit collision would
/// return another text's width. Not thread-safe; wrap in a mutex or keep
/// one per thread.
#[derive(Debug)]
pub struct WidthCache {
    cache: LruCache<u64, usize>,
    hits: u64,
    misses: u64,
}

impl WidthCache {
    /// Cache holding up to `capacity` entries (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(non_zero(capacity)),
            hits: 0,
            misses: 0,
        }
    }

    /// Width of `text`, measured with [`display_width_lossy`](crate::display_width_lossy)
    /// on a miss.
    pub fn get_or_compute(&mut self, text: &[u8]) -> usize {
        self.get_or_compute_with(text, crate::display_width_lossy)
    }

    /// Width of `text`, measured with `compute` on a miss.
    ///
    /// Use this to cache widths under a non-default
    /// [`ClusterDecoder`](glyphseg_core::ClusterDecoder).
    pub fn get_or_compute_with<F>(&mut self, text: &[u8], compute: F) -> usize
    where
        F: FnOnce(&[u8]) -> usize,
    {
        let key = hash_text(text);
        if let Some(&width) = self.cache.get(&key) {
            self.hits += 1;
            return width;
        }
        self.misses += 1;
        let width = compute(text);
        self.cache.put(key, width);
        width
    }

    /// Cached width without touching LRU order or statistics.
    #[must_use]
    pub fn peek(&self, text: &[u8]) -> Option<usize> {
        self.cache.peek(&hash_text(text)).copied()
    }

    #[must_use]
    pub fn contains(&self, text: &[u8]) -> bool {
        self.cache.contains(&hash_text(text))
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Change capacity, evicting least-recently-used entries if shrinking.
    pub fn resize(&mut self, capacity: usize) {
        self.cache.resize(non_zero(capacity));
    }
}

impl Default for WidthCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

fn non_zero(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}

#[inline]
fn hash_text(text: &[u8]) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    hasher.finish()
}
