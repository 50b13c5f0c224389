#![forbid(unsafe_code)]

//! UTF-8 codepoint decoding at the head of a byte buffer.
//!
//! End-of-text is the end of the slice or the first zero byte, whichever
//! comes first. Sequences are validated strictly: overlong forms, UTF-16
//! surrogates, values above U+10FFFF, stray continuation bytes, and
//! sequences cut short by end-of-text are all rejected.

/// Longest encoded form of a single codepoint, in bytes.
pub const MAX_UTF8_LEN: usize = 4;

/// A decoded scalar value plus the number of source bytes it occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codepoint {
    pub ch: char,
    pub len: usize,
}

/// Result of decoding at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// One codepoint was decoded.
    Codepoint(Codepoint),
    /// The cursor sits on the zero sentinel or past the last byte.
    EndOfText,
}

/// The bytes at the cursor are not a well-formed UTF-8 sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSequence;

/// Decode one codepoint from the start of `bytes`.
///
/// # Errors
///
/// Returns [`InvalidSequence`] for malformed or truncated sequences.
pub fn decode_codepoint(bytes: &[u8]) -> Result<Decoded, InvalidSequence> {
    let Some(&lead) = bytes.first() else {
        return Ok(Decoded::EndOfText);
    };

    // Legal range of the second byte narrows for E0, ED, F0 and F4 so that
    // overlongs, surrogates and out-of-range values never decode.
    let (len, second_range) = match lead {
        0x00 => return Ok(Decoded::EndOfText),
        0x01..=0x7F => {
            return Ok(Decoded::Codepoint(Codepoint {
                ch: char::from(lead),
                len: 1,
            }));
        }
        0xC2..=0xDF => (2, 0x80..=0xBF),
        0xE0 => (3, 0xA0..=0xBF),
        0xE1..=0xEC | 0xEE..=0xEF => (3, 0x80..=0xBF),
        0xED => (3, 0x80..=0x9F),
        0xF0 => (4, 0x90..=0xBF),
        0xF1..=0xF3 => (4, 0x80..=0xBF),
        0xF4 => (4, 0x80..=0x8F),
        // Continuation bytes, overlong leads C0/C1, and F5..FF.
        _ => return Err(InvalidSequence),
    };

    let tail = bytes.get(1..len).ok_or(InvalidSequence)?;
    let Some((second, rest)) = tail.split_first() else {
        return Err(InvalidSequence);
    };
    if !second_range.contains(second) || rest.iter().any(|&b| !is_continuation(b)) {
        return Err(InvalidSequence);
    }

    let scalar = tail.iter().fold(u32::from(lead & (0x7F >> len)), |acc, &b| {
        (acc << 6) | u32::from(b & 0x3F)
    });
    char::from_u32(scalar)
        .map(|ch| Decoded::Codepoint(Codepoint { ch, len }))
        .ok_or(InvalidSequence)
}

#[inline]
const fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}
