#![forbid(unsafe_code)]

//! Column measurement and width-bounded truncation.

use glyphseg_core::{ClusterDecoder, ClusterError, UnicodeOracle};

use crate::segment::{Clusters, DEFAULT_DECODER};

/// Columns a replacement glyph occupies for input that failed to decode.
pub const REPLACEMENT_WIDTH: usize = 1;

/// Total columns of `bytes`, failing on the first undecodable cluster.
///
/// # Errors
///
/// Returns the first [`ClusterError`] encountered.
pub fn display_width(bytes: &[u8]) -> Result<usize, ClusterError> {
    display_width_with(&DEFAULT_DECODER, bytes)
}

/// [`display_width`] with a caller-supplied decoder.
///
/// # Errors
///
/// Returns the first [`ClusterError`] encountered.
pub fn display_width_with<O: UnicodeOracle>(
    decoder: &ClusterDecoder<O>,
    bytes: &[u8],
) -> Result<usize, ClusterError> {
    Clusters::with_decoder(decoder, bytes)
        .map(|span| span.map(|s| s.width))
        .sum()
}

/// Total columns of `bytes`, counting [`REPLACEMENT_WIDTH`] for every
/// undecodable run.
#[must_use]
pub fn display_width_lossy(bytes: &[u8]) -> usize {
    display_width_lossy_with(&DEFAULT_DECODER, bytes)
}

/// [`display_width_lossy`] with a caller-supplied decoder.
#[must_use]
pub fn display_width_lossy_with<O: UnicodeOracle>(decoder: &ClusterDecoder<O>, bytes: &[u8]) -> usize {
    Clusters::with_decoder(decoder, bytes)
        .map(|span| span.map_or(REPLACEMENT_WIDTH, |s| s.width))
        .sum()
}

/// Number of clusters in `bytes`.
///
/// # Errors
///
/// Returns the first [`ClusterError`] encountered.
pub fn cluster_count(bytes: &[u8]) -> Result<usize, ClusterError> {
    Clusters::new(bytes).try_fold(0, |count, span| span.map(|_| count + 1))
}

/// Longest cluster-aligned prefix of `bytes` that fits in `max_width`
/// columns, with its width.
///
/// A cluster that would straddle the limit is left out whole, so the
/// returned width may be less than `max_width`.
///
/// # Errors
///
/// Returns the first [`ClusterError`] met while there is still room for a
/// replacement glyph.
pub fn truncate_to_width(bytes: &[u8], max_width: usize) -> Result<(&[u8], usize), ClusterError> {
    truncate_to_width_with(&DEFAULT_DECODER, bytes, max_width)
}

/// [`truncate_to_width`] with a caller-supplied decoder.
///
/// # Errors
///
/// Returns the first [`ClusterError`] met while there is still room for a
/// replacement glyph.
pub fn truncate_to_width_with<'a, O: UnicodeOracle>(
    decoder: &ClusterDecoder<O>,
    bytes: &'a [u8],
    max_width: usize,
) -> Result<(&'a [u8], usize), ClusterError> {
    let mut end = 0;
    let mut width = 0;
    for span in Clusters::with_decoder(decoder, bytes) {
        let span = match span {
            Ok(span) => span,
            // Not even a replacement glyph would fit.
            Err(_) if width + REPLACEMENT_WIDTH > max_width => break,
            Err(err) => return Err(err),
        };
        if width + span.width > max_width {
            break;
        }
        width += span.width;
        end = span.end();
    }
    Ok((&bytes[..end], width))
}
