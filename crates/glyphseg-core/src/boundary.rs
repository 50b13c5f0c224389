#![forbid(unsafe_code)]

//! Cluster boundary classification.

use crate::oracle::UnicodeOracle;

/// What to do with the codepoint under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Part of the current cluster; keep scanning.
    Continue,
    /// Part of the current cluster, and the cluster ends right after it.
    /// Variation selectors always close the cluster they complete.
    ContinueThenStop,
    /// Starts the next cluster. The codepoint is not consumed.
    Break,
}

/// Classify `cur` against the cluster's anchor codepoint.
///
/// `anchor` is the first codepoint of the cluster, or `None` when `cur` is
/// the first. `joined` is the join state.
pub fn classify<O>(oracle: &O, anchor: Option<char>, cur: char, joined: bool) -> Boundary
where
    O: UnicodeOracle + ?Sized,
{
    if oracle.is_variation_selector(cur) {
        return Boundary::ContinueThenStop;
    }
    match anchor {
        Some(prev) if !joined && oracle.is_break(prev, cur) => Boundary::Break,
        _ => Boundary::Continue,
    }
}
