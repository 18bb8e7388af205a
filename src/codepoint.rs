//! Unicode scalar value checks.
//!
//! Codepoints travel through the engine as plain `u32` values so that
//! out-of-range input can be represented, inspected and rejected. A value is
//! *valid* when it is a Unicode scalar value: at most [`MAX_CODEPOINT`] and
//! outside the surrogate block.
//!
//! ```
//! use codeunits::codepoint::{is_valid, REPLACEMENT_CHARACTER};
//!
//! assert!(is_valid(0x41));
//! assert!(is_valid(REPLACEMENT_CHARACTER));
//! assert!(!is_valid(0xD800));
//! assert!(!is_valid(0x110000));
//! ```

/// The largest Unicode codepoint, U+10FFFF.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// U+FFFD REPLACEMENT CHARACTER, written in place of malformed input.
pub const REPLACEMENT_CHARACTER: u32 = 0xFFFD;

/// First high (leading) surrogate.
pub const HIGH_SURROGATE_START: u32 = 0xD800;
/// Last high (leading) surrogate.
pub const HIGH_SURROGATE_END: u32 = 0xDBFF;
/// First low (trailing) surrogate.
pub const LOW_SURROGATE_START: u32 = 0xDC00;
/// Last low (trailing) surrogate.
pub const LOW_SURROGATE_END: u32 = 0xDFFF;

/// Returns `true` if `cp` is a Unicode scalar value.
///
/// That is `cp <= 0x10FFFF` and `cp` is not in `0xD800..=0xDFFF`.
#[inline]
pub const fn is_valid(cp: u32) -> bool {
    cp <= MAX_CODEPOINT && !is_surrogate(cp)
}

/// Returns `true` if `cp` lies in the surrogate block `0xD800..=0xDFFF`.
#[inline]
pub const fn is_surrogate(cp: u32) -> bool {
    cp >= HIGH_SURROGATE_START && cp <= LOW_SURROGATE_END
}

/// Returns `true` if `cp` is a high (leading) surrogate.
#[inline]
pub const fn is_high_surrogate(cp: u32) -> bool {
    cp >= HIGH_SURROGATE_START && cp <= HIGH_SURROGATE_END
}

/// Returns `true` if `cp` is a low (trailing) surrogate.
#[inline]
pub const fn is_low_surrogate(cp: u32) -> bool {
    cp >= LOW_SURROGATE_START && cp <= LOW_SURROGATE_END
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_boundaries() {
        assert!(is_valid(0));
        assert!(is_valid(1000));
        assert!(is_valid(0xD7FF));
        assert!(!is_valid(0xD800));
        assert!(!is_valid(0xDFFF));
        assert!(is_valid(0xE000));
        assert!(is_valid(0xFFFF));
        assert!(is_valid(0x10000));
        assert!(is_valid(0xFFFFF));
        assert!(is_valid(0x100000));
        assert!(is_valid(0x10FFFF));
        assert!(!is_valid(0x110000));
        assert!(!is_valid(0x1E0000));
        assert!(!is_valid(u32::MAX));
    }

    #[test]
    fn test_is_valid_matches_char_from_u32() {
        for cp in (0..0x11_0400u32).step_by(7) {
            assert_eq!(is_valid(cp), char::from_u32(cp).is_some(), "U+{:04X}", cp);
        }
    }

    #[test]
    fn test_surrogate_halves() {
        assert!(is_high_surrogate(0xD800));
        assert!(is_high_surrogate(0xDBFF));
        assert!(!is_high_surrogate(0xDC00));
        assert!(is_low_surrogate(0xDC00));
        assert!(is_low_surrogate(0xDFFF));
        assert!(!is_low_surrogate(0xE000));
        assert!(!is_surrogate(0xD7FF));
    }
}
