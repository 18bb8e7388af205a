use core::fmt;

/// The reason a sequence of code units failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorKind {
    /// The units present do not form a legal encoding of a codepoint.
    ///
    /// Covers stray continuation bytes, invalid lead bytes, overlong UTF-8,
    /// unpaired surrogates and out-of-range scalars.
    Malformed,
    /// The input ended before a multi-unit codepoint was complete.
    Truncated,
}

/// An error produced while decoding a single codepoint.
///
/// Shaped after `std::str::Utf8Error`: besides the kind it reports how many
/// units the bad sequence covers, which is how far a decoding cursor moves
/// past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    len: usize,
}

impl DecodeError {
    /// Creates a new decode error.
    #[inline]
    pub const fn new(kind: DecodeErrorKind, len: usize) -> Self {
        Self { kind, len }
    }

    /// A malformed sequence of `len` units.
    #[inline]
    pub const fn malformed(len: usize) -> Self {
        Self::new(DecodeErrorKind::Malformed, len)
    }

    /// A truncated sequence; `len` units are skipped to resynchronize.
    #[inline]
    pub const fn truncated(len: usize) -> Self {
        Self::new(DecodeErrorKind::Truncated, len)
    }

    /// Returns what went wrong.
    #[inline]
    pub const fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    /// Returns the number of units the error covers.
    ///
    /// This is at least one unless the input was empty.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the error covers no units, which only happens on empty input.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` for [`DecodeErrorKind::Malformed`].
    #[inline]
    pub const fn is_malformed(&self) -> bool {
        matches!(self.kind, DecodeErrorKind::Malformed)
    }

    /// Returns `true` for [`DecodeErrorKind::Truncated`].
    #[inline]
    pub const fn is_truncated(&self) -> bool {
        matches!(self.kind, DecodeErrorKind::Truncated)
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DecodeErrorKind::Malformed => {
                write!(f, "malformed sequence of {} code units", self.len)
            }
            DecodeErrorKind::Truncated => write!(f, "incomplete sequence at end of input"),
        }
    }
}

impl core::error::Error for DecodeError {}

/// An error returned when the destination buffer of a checked copy is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    capacity: usize,
    read: usize,
}

impl CapacityError {
    /// Creates a new capacity error.
    #[inline]
    pub const fn new(capacity: usize, read: usize) -> Self {
        Self { capacity, read }
    }

    /// Returns the size of the destination buffer, in units.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns how many source units had been consumed when the buffer ran out.
    ///
    /// The codepoint that did not fit is not counted.
    #[inline]
    pub const fn read(&self) -> usize {
        self.read
    }
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "destination of {} units is full after reading {} source units",
            self.capacity, self.read
        )
    }
}

impl core::error::Error for CapacityError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let e = DecodeError::malformed(3);
        assert_eq!(e.kind(), DecodeErrorKind::Malformed);
        assert_eq!(e.len(), 3);
        assert!(e.is_malformed());
        assert!(!e.is_truncated());

        let e = DecodeError::truncated(0);
        assert!(e.is_truncated());
        assert!(e.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            DecodeError::malformed(2).to_string(),
            "malformed sequence of 2 code units"
        );
        assert_eq!(
            DecodeError::truncated(1).to_string(),
            "incomplete sequence at end of input"
        );
        assert_eq!(
            CapacityError::new(4, 3).to_string(),
            "destination of 4 units is full after reading 3 source units"
        );
    }
}
