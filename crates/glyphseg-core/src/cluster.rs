#![forbid(unsafe_code)]

//! Extended grapheme cluster decoding at the head of a buffer.
//!
//! Each call recognizes exactly one cluster starting at byte 0 and reports
//! its byte length and column width. Decoding is a small state machine:
//!
//! ```text
//! Start ──► Scanning ──► Done
//!               │
//!               └──────► Failed
//! ```
//!
//! While scanning, every codepoint is decoded, tested for a boundary
//! against the cluster's first codepoint, and then fed to the width
//! resolver. The loop ends at a boundary, after a variation selector, at a
//! whitespace control, at end-of-text, or on an error. Nothing survives the
//! call.

use crate::boundary::{self, Boundary};
use crate::decode::{self, Decoded};
use crate::error::ClusterError;
use crate::oracle::{StandardOracle, UnicodeOracle};
use crate::policy::{ClusterPolicy, DanglingJoin};
use crate::width::{self, WidthState, WidthStep};

/// A recognized cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cluster {
    /// Bytes occupied by the cluster, excluding any sentinel.
    pub len: usize,
    /// Terminal columns: 0, 1, or 2.
    pub width: usize,
}

impl Cluster {
    /// Whether the buffer held no cluster at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Decodes one cluster per call.
///
/// The decoder is immutable and holds no per-call state, so one instance
/// can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ClusterDecoder<O = StandardOracle> {
    oracle: O,
    policy: ClusterPolicy,
}

impl ClusterDecoder {
    /// Decoder with the default policy and the standard Unicode tables.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_policy(ClusterPolicy {
            cjk_width: false,
            join_scope: crate::policy::JoinScope::Cluster,
            dangling_join: DanglingJoin::Accept,
        })
    }

    /// Decoder with the standard Unicode tables configured by `policy`.
    #[must_use]
    pub const fn with_policy(policy: ClusterPolicy) -> Self {
        Self {
            oracle: StandardOracle::from_policy(&policy),
            policy,
        }
    }

    /// Decoder configured from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_policy(ClusterPolicy::from_env())
    }
}

impl<O: UnicodeOracle> ClusterDecoder<O> {
    /// Decoder backed by a caller-supplied oracle.
    #[must_use]
    pub const fn with_oracle(oracle: O, policy: ClusterPolicy) -> Self {
        Self { oracle, policy }
    }

    #[must_use]
    pub const fn oracle(&self) -> &O {
        &self.oracle
    }

    #[must_use]
    pub const fn policy(&self) -> &ClusterPolicy {
        &self.policy
    }

    /// Recognize the cluster at the head of `buf`.
    ///
    /// Text ends at the end of the slice or at the first zero byte. An empty
    /// buffer yields an empty cluster.
    ///
    /// # Errors
    ///
    /// - [`ClusterError::InvalidEncoding`] for malformed or truncated UTF-8.
    /// - [`ClusterError::ProhibitedCharacter`] for a control character other
    ///   than a whitespace control.
    /// - [`ClusterError::IncompleteCluster`] when text ends on a zero-width
    ///   joiner and the policy rejects dangling joins.
    pub fn decode(&self, buf: &[u8]) -> Result<Cluster, ClusterError> {
        let mut scan = Scan::new(&self.policy);
        loop {
            match scan.step(&self.oracle, buf)? {
                Step::Scanning => {}
                Step::Done(cluster) => return Ok(cluster),
                Step::EndOfText => return self.finish(&scan),
            }
        }
    }

    fn finish(&self, scan: &Scan) -> Result<Cluster, ClusterError> {
        let cluster = scan.cluster();
        if scan.width.ends_on_joiner() && self.policy.dangling_join == DanglingJoin::Reject {
            crate::debug!(len = cluster.len, "cluster ends on a dangling joiner");
            return Err(ClusterError::IncompleteCluster { len: cluster.len });
        }
        Ok(cluster)
    }
}

/// Recognize the cluster at the head of `buf` with the default policy.
///
/// # Errors
///
/// See [`ClusterDecoder::decode`].
pub fn egc_len(buf: &[u8]) -> Result<Cluster, ClusterError> {
    ClusterDecoder::new().decode(buf)
}

enum Step {
    Scanning,
    EndOfText,
    Done(Cluster),
}

/// State threaded through one decode call.
struct Scan {
    consumed: usize,
    anchor: Option<char>,
    width: WidthState,
}

impl Scan {
    fn new(policy: &ClusterPolicy) -> Self {
        Self {
            consumed: 0,
            anchor: None,
            width: WidthState::new(policy.join_scope),
        }
    }

    fn cluster(&self) -> Cluster {
        Cluster {
            len: self.consumed,
            width: self.width.columns(),
        }
    }

    fn step<O>(&mut self, oracle: &O, buf: &[u8]) -> Result<Step, ClusterError>
    where
        O: UnicodeOracle + ?Sized,
    {
        let offset = self.consumed;
        let cp = match decode::decode_codepoint(&buf[offset..]) {
            Ok(Decoded::Codepoint(cp)) => cp,
            Ok(Decoded::EndOfText) => return Ok(Step::EndOfText),
            Err(_) => {
                crate::debug!(offset, "invalid UTF-8 sequence");
                return Err(ClusterError::InvalidEncoding { offset });
            }
        };

        match boundary::classify(oracle, self.anchor, cp.ch, self.width.joined()) {
            Boundary::Break => return Ok(Step::Done(self.cluster())),
            Boundary::ContinueThenStop => {
                self.consumed += cp.len;
                return Ok(Step::Done(self.cluster()));
            }
            Boundary::Continue => {}
        }

        match width::resolve(oracle, cp.ch, &mut self.width) {
            WidthStep::Continue => {}
            WidthStep::ForceEnd => {
                // Claims the control's full encoded length, not a fixed
                // single byte, so multibyte controls like NEL stay whole.
                self.consumed += cp.len;
                crate::trace!(offset, ch = u32::from(cp.ch), "whitespace control ends cluster");
                return Ok(Step::Done(self.cluster()));
            }
            WidthStep::Prohibited => {
                crate::debug!(offset, ch = u32::from(cp.ch), "prohibited control character");
                return Err(ClusterError::ProhibitedCharacter { ch: cp.ch, offset });
            }
        }

        self.consumed += cp.len;
        self.anchor.get_or_insert(cp.ch);
        Ok(Step::Scanning)
    }
}
