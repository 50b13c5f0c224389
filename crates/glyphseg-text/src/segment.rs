#![forbid(unsafe_code)]

//! Cluster-by-cluster iteration over a byte buffer.
//!
//! [`Clusters`] is the caller-side loop around
//! [`ClusterDecoder::decode`]: it decodes the cluster at the cursor,
//! advances by its length, and repeats until end-of-text.
//!
//! # Resynchronization
//!
//! A failed decode yields the error with its offset made absolute, then
//! resumes past the offending input:
//!
//! | Error | Resumes at |
//! |---|---|
//! | `InvalidEncoding { offset }` | `offset + 1` |
//! | `ProhibitedCharacter { ch, offset }` | `offset + ch.len_utf8()` |
//! | `IncompleteCluster { len }` | end of the dangling cluster |
//!
//! The decoder looks one codepoint past a cluster before ending it, so a
//! failure can land after complete clusters. When it does, the bytes before
//! the failure are segmented again with the failure point as end-of-text
//! and those clusters are yielded first.

use std::ops::Range;

use glyphseg_core::{Cluster, ClusterDecoder, ClusterError, StandardOracle, UnicodeOracle};

/// Shared decoder with the default policy.
pub(crate) static DEFAULT_DECODER: ClusterDecoder = ClusterDecoder::new();

/// One cluster located within a larger buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterSpan {
    /// Byte offset of the cluster's first byte.
    pub offset: usize,
    /// Byte length.
    pub len: usize,
    /// Terminal columns.
    pub width: usize,
}

impl ClusterSpan {
    /// Byte offset one past the cluster's last byte.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Byte range covered by the cluster.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

/// Iterator over the clusters of a buffer.
#[derive(Debug, Clone)]
pub struct Clusters<'a, O = StandardOracle> {
    decoder: &'a ClusterDecoder<O>,
    bytes: &'a [u8],
    pos: usize,
    /// Failure waiting behind the clusters that precede it, with its
    /// absolute start.
    deferred: Option<(usize, ClusterError)>,
}

impl<'a> Clusters<'a> {
    /// Iterate with the default policy.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_decoder(&DEFAULT_DECODER, bytes)
    }
}

impl<'a, O: UnicodeOracle> Clusters<'a, O> {
    /// Iterate using `decoder`.
    #[must_use]
    pub fn with_decoder(decoder: &'a ClusterDecoder<O>, bytes: &'a [u8]) -> Self {
        Self {
            decoder,
            bytes,
            pos: 0,
            deferred: None,
        }
    }

    /// Byte offset the next cluster will be decoded from.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet segmented.
    #[must_use]
    pub fn remainder(&self) -> &'a [u8] {
        self.bytes.get(self.pos..).unwrap_or_default()
    }
}

impl<O: UnicodeOracle> Clusters<'_, O> {
    fn advance(&mut self, cluster: Cluster) -> ClusterSpan {
        let offset = self.pos;
        self.pos += cluster.len;
        ClusterSpan {
            offset,
            len: cluster.len,
            width: cluster.width,
        }
    }

    /// Next cluster before a deferred failure at `limit`, if any remain.
    fn salvage(&mut self, limit: usize) -> Option<ClusterSpan> {
        let chunk = self.bytes.get(self.pos..limit)?;
        match self.decoder.decode(chunk) {
            Ok(cluster) if !cluster.is_empty() => Some(self.advance(cluster)),
            _ => None,
        }
    }

    fn fail(&mut self, err: ClusterError) -> ClusterError {
        self.pos = resume_after(&err);
        glyphseg_core::debug!(
            offset = err.offset(),
            resume = self.pos,
            "resynchronizing after decode failure"
        );
        err
    }
}

impl<O: UnicodeOracle> Iterator for Clusters<'_, O> {
    type Item = Result<ClusterSpan, ClusterError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((limit, err)) = self.deferred {
            if let Some(span) = self.salvage(limit) {
                return Some(Ok(span));
            }
            self.deferred = None;
            return Some(Err(self.fail(err)));
        }

        let rest = self.remainder();
        if rest.first().is_none_or(|&b| b == 0) {
            return None;
        }
        let offset = self.pos;
        match self.decoder.decode(rest) {
            Ok(cluster) => Some(Ok(self.advance(cluster))),
            Err(err) => {
                let err = err.rebase(offset);
                match failure_start(&err) {
                    Some(start) if start > offset => {
                        self.deferred = Some((start, err));
                        self.next()
                    }
                    _ => Some(Err(self.fail(err))),
                }
            }
        }
    }
}

/// Where the offending input begins, for failures that can follow
/// complete clusters.
fn failure_start(err: &ClusterError) -> Option<usize> {
    match *err {
        ClusterError::InvalidEncoding { offset } | ClusterError::ProhibitedCharacter { offset, .. } => {
            Some(offset)
        }
        ClusterError::IncompleteCluster { .. } => None,
    }
}

fn resume_after(err: &ClusterError) -> usize {
    match *err {
        ClusterError::InvalidEncoding { offset } => offset + 1,
        ClusterError::ProhibitedCharacter { ch, offset } => offset + ch.len_utf8(),
        ClusterError::IncompleteCluster { len } => len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphseg_core::{ClusterPolicy, DanglingJoin, JoinScope};

    fn spans(bytes: &[u8]) -> Vec<Result<(usize, usize, usize), ClusterError>> {
        Clusters::new(bytes)
            .map(|r| r.map(|s| (s.offset, s.len, s.width)))
            .collect()
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(spans(b"").is_empty());
        assert!(spans(b"\0abc").is_empty());
    }

    #[test]
    fn ascii_segments_per_byte() {
        assert_eq!(
            spans(b"hi!"),
            vec![Ok((0, 1, 1)), Ok((1, 1, 1)), Ok((2, 1, 1))]
        );
    }

    #[test]
    fn mixed_text() {
        let text = "a中e\u{0301}\t😀";
        assert_eq!(
            spans(text.as_bytes()),
            vec![
                Ok((0, 1, 1)),
                Ok((1, 3, 2)),
                Ok((4, 3, 1)),
                Ok((7, 1, 1)),
                Ok((8, 4, 2)),
            ]
        );
    }

    #[test]
    fn stops_at_sentinel() {
        assert_eq!(spans(b"ab\0cd"), vec![Ok((0, 1, 1)), Ok((1, 1, 1))]);
    }

    #[test]
    fn invalid_byte_is_skipped() {
        assert_eq!(
            spans(b"a\xFFb"),
            vec![
                Ok((0, 1, 1)),
                Err(ClusterError::InvalidEncoding { offset: 1 }),
                Ok((2, 1, 1)),
            ]
        );
    }

    #[test]
    fn cluster_before_trailing_garbage_is_kept() {
        assert_eq!(
            spans(b"abc\xFF"),
            vec![
                Ok((0, 1, 1)),
                Ok((1, 1, 1)),
                Ok((2, 1, 1)),
                Err(ClusterError::InvalidEncoding { offset: 3 }),
            ]
        );
    }

    #[test]
    fn multibyte_clusters_before_garbage_are_kept() {
        let mut bytes = "e\u{0301}中".as_bytes().to_vec();
        bytes.extend_from_slice(b"\xC3x");
        assert_eq!(
            spans(&bytes),
            vec![
                Ok((0, 3, 1)),
                Ok((3, 3, 2)),
                Err(ClusterError::InvalidEncoding { offset: 6 }),
                Ok((7, 1, 1)),
            ]
        );
    }

    /// Never reports a boundary, so a control can land inside a call.
    struct Gluey;

    impl UnicodeOracle for Gluey {
        fn is_break(&self, _prev: char, _cur: char) -> bool {
            false
        }

        fn width_of(&self, ch: char) -> Option<usize> {
            StandardOracle::new().width_of(ch)
        }
    }

    #[test]
    fn cluster_before_prohibited_control_is_kept() {
        let decoder = ClusterDecoder::with_oracle(Gluey, ClusterPolicy::default());
        let items: Vec<_> = Clusters::with_decoder(&decoder, b"ab\x01c").collect();
        assert_eq!(
            items,
            vec![
                Ok(ClusterSpan {
                    offset: 0,
                    len: 2,
                    width: 1
                }),
                Err(ClusterError::ProhibitedCharacter {
                    ch: '\u{1}',
                    offset: 2
                }),
                Ok(ClusterSpan {
                    offset: 3,
                    len: 1,
                    width: 1
                }),
            ]
        );
    }

    #[test]
    fn prohibited_multibyte_control_is_skipped_whole() {
        let text = "x\u{9B}y";
        assert_eq!(
            spans(text.as_bytes()),
            vec![
                Ok((0, 1, 1)),
                Err(ClusterError::ProhibitedCharacter {
                    ch: '\u{9B}',
                    offset: 1
                }),
                Ok((3, 1, 1)),
            ]
        );
    }

    #[test]
    fn dangling_joiner_rejection_ends_iteration() {
        let decoder = ClusterDecoder::with_policy(
            ClusterPolicy::default().with_dangling_join(DanglingJoin::Reject),
        );
        let text = "ab\u{200D}";
        let items: Vec<_> = Clusters::with_decoder(&decoder, text.as_bytes()).collect();
        assert_eq!(
            items,
            vec![
                Ok(ClusterSpan {
                    offset: 0,
                    len: 1,
                    width: 1
                }),
                Err(ClusterError::IncompleteCluster { len: text.len() }),
            ]
        );
    }

    #[test]
    fn next_codepoint_scope_splits_after_join() {
        let decoder = ClusterDecoder::with_policy(
            ClusterPolicy::default().with_join_scope(JoinScope::NextCodepoint),
        );
        let text = "👩\u{200D}💻ok";
        let widths: Vec<usize> = Clusters::with_decoder(&decoder, text.as_bytes())
            .map(|r| r.map_or(0, |s| s.width))
            .collect();
        assert_eq!(widths, vec![2, 1, 1]);
    }

    #[test]
    fn position_and_remainder_track_progress() {
        let mut it = Clusters::new("中a".as_bytes());
        assert_eq!(it.position(), 0);
        let first = it.next().and_then(Result::ok);
        assert_eq!(first.map(|s| s.range()), Some(0..3));
        assert_eq!(it.position(), 3);
        assert_eq!(it.remainder(), b"a");
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.remainder().is_empty());
    }
}
