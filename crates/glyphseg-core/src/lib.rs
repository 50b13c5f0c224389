#![forbid(unsafe_code)]

//! Extended grapheme cluster decoding for terminal rendering.
//!
//! `glyphseg-core` answers one question per call: given UTF-8 bytes, how
//! many of them form the first extended grapheme cluster, and how many
//! terminal columns does that cluster occupy? A renderer calls it in a
//! loop, advancing its own cursor by the returned length.
//!
//! # Primary responsibilities
//!
//! - **Decode**: strict UTF-8 decoding of one codepoint at the cursor.
//! - **Boundary**: whether a codepoint extends the cluster or starts the next.
//! - **Width**: the cluster's column count from its first width-bearing codepoint.
//! - **Cluster**: the state machine tying the three together.
//! - **Oracle**: swappable Unicode property queries.
//!
//! # Example
//! ```
//! use glyphseg_core::{Cluster, egc_len};
//!
//! // 'e' + COMBINING ACUTE ACCENT, then 'x'
//! let cluster = egc_len("e\u{301}x".as_bytes()).unwrap();
//! assert_eq!(cluster, Cluster { len: 3, width: 1 });
//!
//! // person + ZWJ + laptop
//! let text = "\u{1F469}\u{200D}\u{1F4BB}";
//! assert_eq!(egc_len(text.as_bytes()).unwrap(), Cluster { len: 11, width: 2 });
//!
//! assert_eq!(egc_len(b"\tx").unwrap(), Cluster { len: 1, width: 1 });
//! assert!(egc_len(&[0x01]).is_err());
//! ```

pub mod boundary;
pub mod cluster;
pub mod decode;
pub mod error;
pub mod input;
pub mod logging;
pub mod oracle;
pub mod policy;
pub mod width;

pub use cluster::{Cluster, ClusterDecoder, egc_len};
pub use error::ClusterError;
pub use oracle::{StandardOracle, UnicodeOracle, ZWJ, is_variation_selector, is_whitespace_control};
pub use policy::{ClusterPolicy, DanglingJoin, JoinScope};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace};
