#![forbid(unsafe_code)]

//! Unicode property queries consumed by the cluster decoder.
//!
//! The decoder never consults Unicode tables directly. Everything it needs
//! to know about a codepoint goes through [`UnicodeOracle`], so tests can
//! swap in fixed answers and hosts can supply their own width tables.
//!
//! [`StandardOracle`] is the production implementation, backed by
//! `unicode-segmentation` for grapheme breaks and `unicode-width` for
//! column widths.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use crate::policy::ClusterPolicy;

/// U+200D ZERO WIDTH JOINER.
pub const ZWJ: char = '\u{200D}';

/// Codepoint property queries.
///
/// Only [`is_break`](Self::is_break) and [`width_of`](Self::width_of) are
/// required; the remaining predicates default to the standard answers.
pub trait UnicodeOracle {
    /// Whether an extended grapheme cluster boundary falls between `prev`
    /// and `cur`.
    fn is_break(&self, prev: char, cur: char) -> bool;

    /// Intrinsic monospace width of `ch`, or `None` when it has none
    /// (control characters).
    fn width_of(&self, ch: char) -> Option<usize>;

    /// Whether `ch` is a variation selector.
    fn is_variation_selector(&self, ch: char) -> bool {
        is_variation_selector(ch)
    }

    /// Whether `ch` is a whitespace control (tab, newline, and friends).
    fn is_whitespace_control(&self, ch: char) -> bool {
        is_whitespace_control(ch)
    }

    /// Whether `ch` is a control character (general category `Cc`).
    fn is_control(&self, ch: char) -> bool {
        ch.is_control()
    }
}

impl<O: UnicodeOracle + ?Sized> UnicodeOracle for &O {
    fn is_break(&self, prev: char, cur: char) -> bool {
        (**self).is_break(prev, cur)
    }

    fn width_of(&self, ch: char) -> Option<usize> {
        (**self).width_of(ch)
    }

    fn is_variation_selector(&self, ch: char) -> bool {
        (**self).is_variation_selector(ch)
    }

    fn is_whitespace_control(&self, ch: char) -> bool {
        (**self).is_whitespace_control(ch)
    }

    fn is_control(&self, ch: char) -> bool {
        (**self).is_control(ch)
    }
}

/// Oracle backed by the `unicode-segmentation` and `unicode-width` tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardOracle {
    cjk_width: bool,
}

impl StandardOracle {
    /// Oracle with narrow East Asian Ambiguous widths.
    #[must_use]
    pub const fn new() -> Self {
        Self { cjk_width: false }
    }

    /// Oracle that treats East Asian Ambiguous characters as two columns.
    #[must_use]
    pub const fn cjk() -> Self {
        Self { cjk_width: true }
    }

    /// Oracle matching the width settings of `policy`.
    #[must_use]
    pub const fn from_policy(policy: &ClusterPolicy) -> Self {
        Self {
            cjk_width: policy.cjk_width,
        }
    }

    /// Whether ambiguous-width characters are measured as wide.
    #[must_use]
    pub const fn cjk_width(&self) -> bool {
        self.cjk_width
    }
}

impl UnicodeOracle for StandardOracle {
    fn is_break(&self, prev: char, cur: char) -> bool {
        let mut buf = [0u8; 8];
        let split = prev.encode_utf8(&mut buf).len();
        let end = split + cur.encode_utf8(&mut buf[split..]).len();
        // The pair is tested in isolation: two codepoints form one cluster
        // exactly when segmentation yields a single grapheme.
        std::str::from_utf8(&buf[..end]).map_or(true, |pair| pair.graphemes(true).nth(1).is_some())
    }

    fn width_of(&self, ch: char) -> Option<usize> {
        if ch.is_control() {
            return None;
        }
        if self.cjk_width {
            ch.width_cjk()
        } else {
            ch.width()
        }
    }
}

/// Whether `ch` is a variation selector (Mongolian free variation selectors,
/// VS1–VS16, and the supplementary VS17–VS256 block).
#[must_use]
pub const fn is_variation_selector(ch: char) -> bool {
    matches!(
        ch as u32,
        0x180B..=0x180D | 0x180F | 0xFE00..=0xFE0F | 0xE0100..=0xE01EF
    )
}

/// Whether `ch` is both `White_Space` and a control character:
/// U+0009..=U+000D and U+0085.
#[must_use]
pub fn is_whitespace_control(ch: char) -> bool {
    ch.is_control() && ch.is_whitespace()
}
