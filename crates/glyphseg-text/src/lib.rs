#![forbid(unsafe_code)]

//! Terminal text segmentation built on `glyphseg-core`.
//!
//! The core decodes one cluster per call; this crate runs that call in a
//! loop the way a renderer does:
//! - [`Clusters`] - iterator of [`ClusterSpan`]s with byte-skip resynchronization
//! - [`display_width`] / [`display_width_lossy`] - total columns of a buffer
//! - [`truncate_to_width`] - longest prefix that fits, never splitting a cluster
//! - [`WidthCache`] - LRU cache for repeated measurements
//!
//! # Example
//! ```
//! use glyphseg_text::{Clusters, display_width, truncate_to_width};
//!
//! let text = "e\u{301}中!";
//! assert_eq!(display_width(text.as_bytes()), Ok(4));
//!
//! let widths: Vec<usize> = Clusters::new(text.as_bytes())
//!     .map(|span| span.unwrap().width)
//!     .collect();
//! assert_eq!(widths, vec![1, 2, 1]);
//!
//! let (prefix, cols) = truncate_to_width(text.as_bytes(), 2).unwrap();
//! assert_eq!((prefix, cols), ("e\u{301}".as_bytes(), 1));
//! ```

pub mod measure;
pub mod segment;
pub mod width_cache;

pub use measure::{
    REPLACEMENT_WIDTH, cluster_count, display_width, display_width_lossy,
    display_width_lossy_with, display_width_with, truncate_to_width, truncate_to_width_with,
};
pub use segment::{ClusterSpan, Clusters};
pub use width_cache::{CacheStats, DEFAULT_CACHE_CAPACITY, WidthCache};
