use crate::codepoint::is_valid;
use crate::error::DecodeError;
use crate::form::{Form, FormKind};
use crate::sink::{emit, Sink};
use crate::unit::CodeUnit;

/// UTF-8 encoding form marker.
///
/// Natural form of `u8`. Decoding is strict: overlong forms, surrogates and
/// scalars above U+10FFFF are rejected even when their bit pattern parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Utf8;

/// Smallest scalar that needs a sequence of the index's length.
const MIN_SCALAR: [u32; 5] = [0, 0, 0x80, 0x800, 0x10000];

impl Form for Utf8 {
    const NAME: &'static str = "UTF-8";
    const KIND: FormKind = FormKind::Utf8;
    const UNIT_BITS: u32 = 8;
    const MAX_UNITS: usize = 4;

    fn decode<U: CodeUnit>(units: &[U]) -> Result<(u32, usize), DecodeError> {
        let Some(first) = units.first() else {
            return Err(DecodeError::truncated(0));
        };

        // Lead byte gives the sequence length and the payload bits it carries
        let lead = first.to_u32();
        let (len, mut cp) = match lead {
            0x00..=0x7F => return Ok((lead, 1)),
            0xC0..=0xDF => (2, lead & 0x1F),
            0xE0..=0xEF => (3, lead & 0x0F),
            0xF0..=0xF7 => (4, lead & 0x07),
            // Stray continuation byte, 0xF8 and above, or a unit wider than a byte
            _ => return Err(DecodeError::malformed(1)),
        };

        for unit in &units[1..len.min(units.len())] {
            let byte = unit.to_u32();
            if !is_utf8_continuation(byte) {
                // Resume at the offending unit: it may start a new sequence
                return Err(DecodeError::malformed(1));
            }
            cp = (cp << 6) | (byte & 0x3F);
        }

        // Every unit present continues the sequence, but input ends early
        if units.len() < len {
            return Err(DecodeError::truncated(1));
        }

        if cp < MIN_SCALAR[len] || !is_valid(cp) {
            return Err(DecodeError::malformed(len));
        }

        Ok((cp, len))
    }

    #[inline]
    fn encoded_len(cp: u32) -> usize {
        match cp {
            0..=0x7F => 1,
            0x80..=0x7FF => 2,
            0x800..=0xFFFF => 3,
            _ => 4,
        }
    }

    fn encode<O: Sink + ?Sized>(cp: u32, out: &mut O) -> usize {
        match Self::encoded_len(cp) {
            1 => emit(out, cp),
            2 => {
                emit(out, 0xC0 | (cp >> 6));
                emit(out, 0x80 | (cp & 0x3F));
            }
            3 => {
                emit(out, 0xE0 | (cp >> 12));
                emit(out, 0x80 | ((cp >> 6) & 0x3F));
                emit(out, 0x80 | (cp & 0x3F));
            }
            _ => {
                emit(out, 0xF0 | ((cp >> 18) & 0x07));
                emit(out, 0x80 | ((cp >> 12) & 0x3F));
                emit(out, 0x80 | ((cp >> 6) & 0x3F));
                emit(out, 0x80 | (cp & 0x3F));
            }
        }
        Self::encoded_len(cp)
    }
}

/// Returns true if the unit is a UTF-8 continuation byte (10xxxxxx).
#[inline]
fn is_utf8_continuation(unit: u32) -> bool {
    (unit & !0x3F) == 0x80
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;

    fn encode_vec(cp: u32) -> Vec<u8> {
        let mut out = Vec::new();
        Utf8::encode(cp, &mut out);
        out
    }

    #[test]
    fn test_encode_each_length() {
        assert_eq!(encode_vec(0x61), b"a");
        assert_eq!(encode_vec(0x40B), b"\xD0\x8B");
        assert_eq!(encode_vec(0x1234), b"\xE1\x88\xB4");
        assert_eq!(encode_vec(0x12345), b"\xF0\x92\x8D\x85");
        assert_eq!(encode_vec(0xFFFD), b"\xEF\xBF\xBD");
    }

    #[test]
    fn test_encoded_len_boundaries() {
        assert_eq!(Utf8::encoded_len(0x7F), 1);
        assert_eq!(Utf8::encoded_len(0x80), 2);
        assert_eq!(Utf8::encoded_len(0x7FF), 2);
        assert_eq!(Utf8::encoded_len(0x800), 3);
        assert_eq!(Utf8::encoded_len(0xFFFF), 3);
        assert_eq!(Utf8::encoded_len(0x10000), 4);
        assert_eq!(Utf8::encoded_len(0x10FFFF), 4);
    }

    #[test]
    fn test_decode_valid() {
        assert_eq!(Utf8::decode(b"abc"), Ok((0x61, 1)));
        assert_eq!(Utf8::decode(b"\xD0\x8B!"), Ok((0x40B, 2)));
        assert_eq!(Utf8::decode(b"\xE1\x88\xB4"), Ok((0x1234, 3)));
        assert_eq!(Utf8::decode(b"\xF0\x92\x8D\x85"), Ok((0x12345, 4)));
        assert_eq!(Utf8::decode(b"\xF4\x8F\xBF\xBF"), Ok((0x10FFFF, 4)));
    }

    #[test]
    fn test_decode_empty_is_truncated() {
        let e = Utf8::decode::<u8>(&[]).unwrap_err();
        assert_eq!(e.kind(), DecodeErrorKind::Truncated);
        assert_eq!(e.len(), 0);
    }

    #[test]
    fn test_decode_bad_lead_bytes() {
        for lead in [0x80u8, 0xBF, 0xF8, 0xFC, 0xFF] {
            assert_eq!(
                Utf8::decode(&[lead, 0x80, 0x80, 0x80]),
                Err(DecodeError::malformed(1)),
                "lead {:#X}",
                lead
            );
        }
    }

    #[test]
    fn test_decode_truncated() {
        assert_eq!(Utf8::decode(b"\xE1\x88"), Err(DecodeError::truncated(1)));
        assert_eq!(Utf8::decode(b"\xF0"), Err(DecodeError::truncated(1)));
        assert_eq!(Utf8::decode(b"\xD0"), Err(DecodeError::truncated(1)));
    }

    #[test]
    fn test_decode_bad_continuation_consumes_lead_only() {
        assert_eq!(Utf8::decode(b"\xE1\x41\x42"), Err(DecodeError::malformed(1)));
        assert_eq!(Utf8::decode(b"\xF0\x92\x8D\xC3"), Err(DecodeError::malformed(1)));
    }

    #[test]
    fn test_decode_short_with_bad_continuation_is_malformed() {
        // Too short for the lead, but the bytes present already break the sequence
        assert_eq!(Utf8::decode(b"\xE1\x41"), Err(DecodeError::malformed(1)));
        assert_eq!(Utf8::decode(b"\xF0\x92\x41"), Err(DecodeError::malformed(1)));
        assert_eq!(Utf8::decode(b"\xF0\x92\x8D"), Err(DecodeError::truncated(1)));
    }

    #[test]
    fn test_decode_overlong() {
        assert_eq!(Utf8::decode(b"\xC0\x80"), Err(DecodeError::malformed(2)));
        assert_eq!(Utf8::decode(b"\xC1\xBF"), Err(DecodeError::malformed(2)));
        assert_eq!(Utf8::decode(b"\xE0\x9F\xBF"), Err(DecodeError::malformed(3)));
        assert_eq!(Utf8::decode(b"\xF0\x8F\xBF\xBF"), Err(DecodeError::malformed(4)));
    }

    #[test]
    fn test_decode_surrogates_and_out_of_range() {
        assert_eq!(Utf8::decode(b"\xED\xA0\x80"), Err(DecodeError::malformed(3)));
        assert_eq!(Utf8::decode(b"\xED\xBF\xBF"), Err(DecodeError::malformed(3)));
        assert_eq!(Utf8::decode(b"\xF4\x90\x80\x80"), Err(DecodeError::malformed(4)));
        assert_eq!(Utf8::decode(b"\xF7\xBF\xBF\xBF"), Err(DecodeError::malformed(4)));
    }

    #[test]
    fn test_decode_wide_units() {
        // Bytes stored in wider units decode the same
        assert_eq!(Utf8::decode(&[0xD0u16, 0x8B]), Ok((0x40B, 2)));
        // A unit that cannot be a byte is never part of a sequence
        assert_eq!(Utf8::decode(&[0x100u16]), Err(DecodeError::malformed(1)));
        assert_eq!(Utf8::decode(&[0xD0u32, 0x18B]), Err(DecodeError::malformed(1)));
    }

    #[test]
    fn test_agrees_with_std() {
        let mut buf = [0u8; 4];
        for cp in (0u32..=0x10FFFF).step_by(31) {
            let Some(c) = char::from_u32(cp) else {
                continue;
            };
            let expected = c.encode_utf8(&mut buf).as_bytes().to_vec();
            assert_eq!(encode_vec(cp), expected, "U+{:04X}", cp);
            assert_eq!(Utf8::decode(&expected), Ok((cp, expected.len())));
        }
    }

    #[test]
    fn test_roundtrip_all_scalars() {
        let mut out: Vec<u8> = Vec::with_capacity(4);
        for cp in (0u32..=0x10FFFF).filter(|&cp| is_valid(cp)) {
            out.clear();
            let len = Utf8::encode(cp, &mut out);
            assert_eq!(Utf8::decode(&out), Ok((cp, len)), "roundtrip failed for U+{:04X}", cp);
        }
    }
}
