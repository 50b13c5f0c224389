//! Cluster segmentation corpus tests.
//!
//! Covers the categories a renderer meets in practice:
//! - Basic ASCII (one byte, one column)
//! - CJK and fullwidth forms (two columns)
//! - Combining marks (absorbed into the base)
//! - Emoji with modifiers, ZWJ sequences, and variation selectors
//! - Whitespace and prohibited controls
//! - Malformed UTF-8
//!
//! plus property checks against `unicode-segmentation` and `unicode-width`
//! on an alphabet where the anchor-based boundary test and full UAX #29
//! segmentation agree.

use glyphseg_core::{ClusterDecoder, ClusterError, ClusterPolicy, JoinScope};
use glyphseg_text::{Clusters, display_width, display_width_lossy};
use proptest::prelude::*;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

// =============================================================================
// Test Corpus Data Structures
// =============================================================================

/// Expected segmentation of one input.
#[derive(Debug, Clone)]
struct ClusterCase {
    input: &'static str,
    description: &'static str,
    /// (byte length, width) for each cluster, in order.
    expected: &'static [(usize, usize)],
}

impl ClusterCase {
    const fn new(
        input: &'static str,
        description: &'static str,
        expected: &'static [(usize, usize)],
    ) -> Self {
        Self {
            input,
            description,
            expected,
        }
    }
}

fn run_cases(category: &str, cases: &[ClusterCase]) {
    for case in cases {
        let got: Vec<(usize, usize)> = Clusters::new(case.input.as_bytes())
            .map(|span| {
                let span = span.unwrap_or_else(|err| {
                    panic!("{category} '{}' ({}) failed: {err}", case.input, case.description)
                });
                (span.len, span.width)
            })
            .collect();
        assert_eq!(
            got, case.expected,
            "{category} '{}' ({}) - expected {:?}, got {:?}",
            case.input, case.description, case.expected, got
        );
    }
}

// =============================================================================
// Category 1: Basic ASCII
// =============================================================================

const ASCII_CASES: &[ClusterCase] = &[
    ClusterCase::new("a", "lowercase letter", &[(1, 1)]),
    ClusterCase::new("Z9", "letter and digit", &[(1, 1), (1, 1)]),
    ClusterCase::new(" ", "space", &[(1, 1)]),
    ClusterCase::new("{}", "brackets", &[(1, 1), (1, 1)]),
    ClusterCase::new("~!", "punctuation", &[(1, 1), (1, 1)]),
];

#[test]
fn ascii_clusters() {
    run_cases("ASCII", ASCII_CASES);
}

// =============================================================================
// Category 2: Wide characters
// =============================================================================

const WIDE_CASES: &[ClusterCase] = &[
    ClusterCase::new("\u{4E2D}", "CJK U+4E2D", &[(3, 2)]),
    ClusterCase::new("\u{4F60}\u{597D}", "ni hao", &[(3, 2), (3, 2)]),
    ClusterCase::new("\u{D55C}", "Hangul syllable", &[(3, 2)]),
    ClusterCase::new("\u{FF21}", "fullwidth A", &[(3, 2)]),
    ClusterCase::new("\u{FF71}", "halfwidth katakana A", &[(3, 1)]),
    ClusterCase::new("\u{20000}", "CJK Extension B", &[(4, 2)]),
    ClusterCase::new("a\u{4E2D}b", "wide between narrow", &[(1, 1), (3, 2), (1, 1)]),
];

#[test]
fn wide_clusters() {
    run_cases("Wide", WIDE_CASES);
}

// =============================================================================
// Category 3: Combining marks
// =============================================================================

const COMBINING_CASES: &[ClusterCase] = &[
    ClusterCase::new("e\u{0301}", "e + acute", &[(3, 1)]),
    ClusterCase::new("a\u{0300}\u{0316}", "a + grave + grave below", &[(5, 1)]),
    ClusterCase::new("\u{4E2D}\u{0301}", "wide base keeps width", &[(5, 2)]),
    ClusterCase::new("\u{0301}x", "leading mark stands alone", &[(2, 0), (1, 1)]),
    ClusterCase::new("\u{0915}\u{093F}", "Devanagari ka + vowel sign i", &[(6, 1)]),
];

#[test]
fn combining_clusters() {
    run_cases("Combining", COMBINING_CASES);
}

// =============================================================================
// Category 4: Emoji
// =============================================================================

const EMOJI_CASES: &[ClusterCase] = &[
    ClusterCase::new("\u{1F600}", "grinning face", &[(4, 2)]),
    ClusterCase::new("\u{1F44D}\u{1F3FD}", "thumbs up + medium skin tone", &[(8, 2)]),
    ClusterCase::new(
        "\u{1F469}\u{200D}\u{1F4BB}",
        "woman technologist (ZWJ)",
        &[(11, 2)],
    ),
    ClusterCase::new(
        "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}",
        "family (ZWJ)",
        &[(18, 2)],
    ),
    ClusterCase::new("\u{2764}\u{FE0F}", "heart + VS16", &[(6, 1)]),
    ClusterCase::new("\u{2764}\u{FE0F}\u{2764}", "VS16 ends cluster", &[(6, 1), (3, 1)]),
    ClusterCase::new("1\u{FE0F}\u{20E3}", "keycap: VS16 splits off the enclosing mark", &[(4, 1), (3, 0)]),
    ClusterCase::new("\u{1F600}\u{1F600}", "two emoji", &[(4, 2), (4, 2)]),
];

#[test]
fn emoji_clusters() {
    run_cases("Emoji", EMOJI_CASES);
}

// =============================================================================
// Category 5: Whitespace controls
// =============================================================================

const WHITESPACE_CASES: &[ClusterCase] = &[
    ClusterCase::new("\t", "tab", &[(1, 1)]),
    ClusterCase::new("\n", "newline", &[(1, 1)]),
    ClusterCase::new("\r\n", "CRLF splits", &[(1, 1), (1, 1)]),
    ClusterCase::new("a\tb", "tab between letters", &[(1, 1), (1, 1), (1, 1)]),
    ClusterCase::new("\u{85}", "next line (two bytes)", &[(2, 1)]),
];

#[test]
fn whitespace_clusters() {
    run_cases("Whitespace", WHITESPACE_CASES);
}

// =============================================================================
// Category 6: Failures
// =============================================================================

#[test]
fn prohibited_controls_fail() {
    for (input, ch) in [("\u{1}", '\u{1}'), ("\u{1B}", '\u{1B}'), ("\u{7F}", '\u{7F}'), ("\u{9B}", '\u{9B}')] {
        assert_eq!(
            display_width(input.as_bytes()),
            Err(ClusterError::ProhibitedCharacter { ch, offset: 0 }),
            "{input:?}"
        );
    }
}

#[test]
fn malformed_utf8_fails() {
    let cases: &[(&[u8], usize)] = &[
        (b"\x80", 0),
        (b"ab\xC3", 2),
        (b"\xE4\xB8", 0),
        (b"\xED\xA0\x80", 0),
        (b"\xF4\x90\x80\x80", 0),
        (b"ok\xC0\xAF", 2),
    ];
    for &(input, offset) in cases {
        assert_eq!(
            display_width(input),
            Err(ClusterError::InvalidEncoding { offset }),
            "{input:?}"
        );
    }
}

#[test]
fn lossy_width_survives_garbage() {
    assert_eq!(display_width_lossy(b"\x80\x80ok"), 4);
    assert_eq!(display_width_lossy("\u{1B}[1m\u{4E2D}".as_bytes()), 6);
}

// =============================================================================
// Category 7: Join scope
// =============================================================================

#[test]
fn join_scope_determines_what_follows_a_sequence() {
    let text = "\u{1F469}\u{200D}\u{1F4BB} ok";

    let cluster_scope = ClusterDecoder::new();
    let spans: Vec<_> = Clusters::with_decoder(&cluster_scope, text.as_bytes()).collect();
    assert_eq!(spans.len(), 1);

    let next_scope = ClusterDecoder::with_policy(
        ClusterPolicy::default().with_join_scope(JoinScope::NextCodepoint),
    );
    let widths: Vec<usize> = Clusters::with_decoder(&next_scope, text.as_bytes())
        .map(|span| span.map_or(0, |s| s.width))
        .collect();
    assert_eq!(widths, vec![2, 1, 1, 1]);
}

// =============================================================================
// Properties
// =============================================================================

/// Alphabet on which anchor-based pair testing matches full segmentation.
const SIMPLE: &[char] = &[
    'a', 'b', 'Z', ' ', '.', 'é', '\u{4E2D}', '\u{6587}', '\u{FF21}', '\u{0301}', '\u{0308}',
    '\u{0316}',
];

fn simple_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(SIMPLE), 0..40)
        .prop_map(|chars| chars.into_iter().collect())
}

fn any_text() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..24).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn matches_unicode_segmentation(text in simple_text()) {
        let ours: Vec<&str> = Clusters::new(text.as_bytes())
            .map(|span| {
                let span = span.expect("simple alphabet always decodes");
                &text[span.range()]
            })
            .collect();
        let reference: Vec<&str> = text.graphemes(true).collect();
        prop_assert_eq!(ours, reference);
    }

    #[test]
    fn matches_unicode_width(text in simple_text()) {
        prop_assert_eq!(display_width(text.as_bytes()), Ok(text.width()));
    }

    #[test]
    fn spans_tile_valid_text(text in any_text()) {
        // Without errors the spans cover the text exactly, in order.
        let mut next = 0;
        let mut clean = true;
        for span in Clusters::new(text.as_bytes()) {
            match span {
                Ok(span) => {
                    prop_assert_eq!(span.offset, next);
                    prop_assert!(span.len > 0);
                    prop_assert!(span.width <= 2);
                    prop_assert!(text.is_char_boundary(span.end()));
                    next = span.end();
                }
                Err(_) => {
                    clean = false;
                    break;
                }
            }
        }
        let text_end = text.find('\0').unwrap_or(text.len());
        if clean {
            prop_assert_eq!(next, text_end);
        }
    }

    #[test]
    fn iteration_always_terminates(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let items = Clusters::new(&bytes).count();
        prop_assert!(items <= bytes.len());
    }
}
