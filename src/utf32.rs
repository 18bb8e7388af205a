use crate::codepoint::is_valid;
use crate::error::DecodeError;
use crate::form::{Form, FormKind};
use crate::sink::{emit, Sink};
use crate::unit::CodeUnit;

/// UTF-32 encoding form marker.
///
/// Natural form of `u32`: one unit per codepoint. Named explicitly with
/// narrower units, each scalar is truncated to the unit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Utf32;

impl Form for Utf32 {
    const NAME: &'static str = "UTF-32";
    const KIND: FormKind = FormKind::Utf32;
    const UNIT_BITS: u32 = 32;
    const MAX_UNITS: usize = 1;

    #[inline]
    fn decode<U: CodeUnit>(units: &[U]) -> Result<(u32, usize), DecodeError> {
        let Some(first) = units.first() else {
            return Err(DecodeError::truncated(0));
        };

        // Surrogates and out-of-range scalars are invalid in UTF-32
        let cp = first.to_u32();
        if !is_valid(cp) {
            return Err(DecodeError::malformed(1));
        }
        Ok((cp, 1))
    }

    #[inline]
    fn encoded_len(_cp: u32) -> usize {
        1
    }

    #[inline]
    fn encode<O: Sink + ?Sized>(cp: u32, out: &mut O) -> usize {
        emit(out, cp);
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid() {
        assert_eq!(Utf32::decode(&[0x61u32, 0x62]), Ok((0x61, 1)));
        assert_eq!(Utf32::decode(&[0x10FFFFu32]), Ok((0x10FFFF, 1)));
    }

    #[test]
    fn test_decode_invalid_scalars() {
        assert_eq!(Utf32::decode(&[0xDD00u32]), Err(DecodeError::malformed(1)));
        assert_eq!(Utf32::decode(&[0x110000u32]), Err(DecodeError::malformed(1)));
        assert_eq!(Utf32::decode(&[u32::MAX]), Err(DecodeError::malformed(1)));
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(Utf32::decode::<u32>(&[]), Err(DecodeError::truncated(0)));
    }

    #[test]
    fn test_decode_narrow_units() {
        // Each byte is taken as a scalar of its own
        assert_eq!(Utf32::decode(&[0xE9u8]), Ok((0xE9, 1)));
        assert_eq!(Utf32::decode(&[0xD800u16]), Err(DecodeError::malformed(1)));
    }

    #[test]
    fn test_encode_truncates_to_unit_width() {
        let mut wide: Vec<u32> = Vec::new();
        let mut half: Vec<u16> = Vec::new();
        let mut byte: Vec<u8> = Vec::new();
        for cp in [0x61, 0x1234, 0x12345] {
            assert_eq!(Utf32::encode(cp, &mut wide), 1);
            assert_eq!(Utf32::encode(cp, &mut half), 1);
            assert_eq!(Utf32::encode(cp, &mut byte), 1);
        }
        assert_eq!(wide, [0x61, 0x1234, 0x12345]);
        assert_eq!(half, [0x61, 0x1234, 0x2345]);
        assert_eq!(byte, [0x61, 0x34, 0x45]);
    }
}
