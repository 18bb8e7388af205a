use crate::codepoint::{
    is_high_surrogate, is_low_surrogate, HIGH_SURROGATE_START, LOW_SURROGATE_START,
};
use crate::error::DecodeError;
use crate::form::{Form, FormKind};
use crate::sink::{emit, Sink};
use crate::unit::CodeUnit;

/// UTF-16 encoding form marker.
///
/// Natural form of `u16`. Supplementary-plane codepoints are stored as a
/// high/low surrogate pair; an unpaired surrogate is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Utf16;

const SUPPLEMENTARY_START: u32 = 0x10000;

impl Form for Utf16 {
    const NAME: &'static str = "UTF-16";
    const KIND: FormKind = FormKind::Utf16;
    const UNIT_BITS: u32 = 16;
    const MAX_UNITS: usize = 2;

    fn decode<U: CodeUnit>(units: &[U]) -> Result<(u32, usize), DecodeError> {
        let Some(first) = units.first() else {
            return Err(DecodeError::truncated(0));
        };

        let unit = first.to_u32();
        if unit > 0xFFFF || is_low_surrogate(unit) {
            // Out of range for 16-bit storage, or a lone low surrogate
            return Err(DecodeError::malformed(1));
        }
        if !is_high_surrogate(unit) {
            return Ok((unit, 1));
        }

        // High surrogate - must be followed by low surrogate
        let Some(second) = units.get(1) else {
            return Err(DecodeError::truncated(1));
        };
        let low = second.to_u32();
        if !is_low_surrogate(low) {
            return Err(DecodeError::malformed(1));
        }

        let high = unit - HIGH_SURROGATE_START;
        let low = low - LOW_SURROGATE_START;
        Ok((SUPPLEMENTARY_START + (high << 10) + low, 2))
    }

    #[inline]
    fn encoded_len(cp: u32) -> usize {
        if cp < SUPPLEMENTARY_START { 1 } else { 2 }
    }

    fn encode<O: Sink + ?Sized>(cp: u32, out: &mut O) -> usize {
        if cp < SUPPLEMENTARY_START {
            emit(out, cp);
            1
        } else {
            // Surrogate pair
            let cp = cp - SUPPLEMENTARY_START;
            emit(out, HIGH_SURROGATE_START + ((cp >> 10) & 0x3FF));
            emit(out, LOW_SURROGATE_START + (cp & 0x3FF));
            2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_vec(cp: u32) -> Vec<u16> {
        let mut out = Vec::new();
        Utf16::encode(cp, &mut out);
        out
    }

    #[test]
    fn test_encode_bmp() {
        assert_eq!(encode_vec(0x68), [0x68]);
        assert_eq!(encode_vec(0xFFFF), [0xFFFF]);
    }

    #[test]
    fn test_encode_surrogate_pair() {
        // U+1F600
        assert_eq!(encode_vec(0x1F600), [0xD83D, 0xDE00]);
        assert_eq!(encode_vec(0x12345), [0xD808, 0xDF45]);
        assert_eq!(encode_vec(0x10FFFF), [0xDBFF, 0xDFFF]);
    }

    #[test]
    fn test_decode_bmp() {
        assert_eq!(Utf16::decode(&[0x0068u16, 0x0069]), Ok((0x68, 1)));
        assert_eq!(Utf16::decode(&[0xE000u16]), Ok((0xE000, 1)));
    }

    #[test]
    fn test_decode_surrogate_pair() {
        assert_eq!(Utf16::decode(&[0xD83Du16, 0xDE00]), Ok((0x1F600, 2)));
        assert_eq!(Utf16::decode(&[0xD800u16, 0xDC00]), Ok((0x10000, 2)));
    }

    #[test]
    fn test_decode_lone_surrogates() {
        // Lone low surrogate
        assert_eq!(Utf16::decode(&[0xDE00u16, 0x68]), Err(DecodeError::malformed(1)));
        // High surrogate followed by a non-surrogate: only the high one is consumed
        assert_eq!(Utf16::decode(&[0xD83Du16, 0x68]), Err(DecodeError::malformed(1)));
        // Two high surrogates
        assert_eq!(Utf16::decode(&[0xD83Du16, 0xD83D, 0xDE00]), Err(DecodeError::malformed(1)));
    }

    #[test]
    fn test_decode_truncated_pair() {
        assert_eq!(Utf16::decode(&[0xD83Du16]), Err(DecodeError::truncated(1)));
        assert_eq!(Utf16::decode::<u16>(&[]), Err(DecodeError::truncated(0)));
    }

    #[test]
    fn test_decode_from_wide_units() {
        assert_eq!(Utf16::decode(&[0xD83Du32, 0xDE00]), Ok((0x1F600, 2)));
        assert_eq!(Utf16::decode(&[0x1F600u32]), Err(DecodeError::malformed(1)));
    }

    #[test]
    fn test_roundtrip_all_bmp() {
        for cp in 0u32..0x10000 {
            // Skip surrogates
            if (0xD800..=0xDFFF).contains(&cp) {
                continue;
            }
            let units = encode_vec(cp);
            assert_eq!(Utf16::decode(&units), Ok((cp, 1)), "roundtrip failed for U+{:04X}", cp);
        }
    }

    #[test]
    fn test_roundtrip_supplementary() {
        for cp in 0x10000u32..=0x10FFFF {
            let units = encode_vec(cp);
            assert_eq!(Utf16::decode(&units), Ok((cp, 2)), "roundtrip failed for U+{:04X}", cp);
        }
    }

    #[test]
    fn test_agrees_with_std() {
        let mut buf = [0u16; 2];
        for c in ['h', '\u{FFFD}', '😀', '\u{10FFFF}'] {
            assert_eq!(encode_vec(c as u32), c.encode_utf16(&mut buf));
        }
    }
}
