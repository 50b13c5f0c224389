#![forbid(unsafe_code)]

//! Cluster decoding errors.

/// Why a cluster could not be decoded.
///
/// Offsets are byte offsets into the buffer handed to the failing call.
/// No partial cluster accompanies an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterError {
    /// Malformed or truncated UTF-8 at `offset`.
    InvalidEncoding { offset: usize },
    /// Control character outside the whitespace-control set.
    ProhibitedCharacter { ch: char, offset: usize },
    /// Text ended right after a zero-width joiner. `len` is the byte length
    /// the cluster would have claimed.
    IncompleteCluster { len: usize },
}

impl ClusterError {
    /// Byte offset where decoding stopped.
    ///
    /// For [`IncompleteCluster`](Self::IncompleteCluster) this is the end of
    /// the dangling cluster.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match *self {
            Self::InvalidEncoding { offset } | Self::ProhibitedCharacter { offset, .. } => offset,
            Self::IncompleteCluster { len } => len,
        }
    }

    /// Shift the reported position by `base` bytes, for callers that decode
    /// from the middle of a larger buffer.
    #[must_use]
    pub const fn rebase(self, base: usize) -> Self {
        match self {
            Self::InvalidEncoding { offset } => Self::InvalidEncoding {
                offset: offset + base,
            },
            Self::ProhibitedCharacter { ch, offset } => Self::ProhibitedCharacter {
                ch,
                offset: offset + base,
            },
            Self::IncompleteCluster { len } => Self::IncompleteCluster { len: len + base },
        }
    }
}

impl std::fmt::Display for ClusterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEncoding { offset } => {
                write!(f, "invalid UTF-8 sequence at byte {offset}")
            }
            Self::ProhibitedCharacter { ch, offset } => write!(
                f,
                "prohibited control character U+{:04X} at byte {offset}",
                u32::from(*ch)
            ),
            Self::IncompleteCluster { len } => {
                write!(f, "cluster ends on a dangling zero-width joiner at byte {len}")
            }
        }
    }
}

impl std::error::Error for ClusterError {}
