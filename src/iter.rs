use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::error::DecodeError;
use crate::form::Form;
use crate::unit::CodeUnit;

/// An iterator decoding the codepoints of a code-unit slice.
///
/// Yields one `Result` per [`Form::get`] step: decode failures are reported
/// in place and iteration continues after them.
///
/// ```
/// use codeunits::{codepoints, Utf16};
///
/// let units: [u16; 4] = [0x61, 0xD808, 0xDF45, 0xDC00];
/// let mut iter = codepoints::<Utf16, _>(&units);
/// assert_eq!(iter.next(), Some(Ok(0x61)));
/// assert_eq!(iter.next(), Some(Ok(0x12345)));
/// assert!(iter.next().unwrap().is_err());
/// assert_eq!(iter.next(), None);
/// ```
pub struct Codepoints<'a, F, U> {
    units: &'a [U],
    _marker: PhantomData<F>,
}

impl<F, U> Clone for Codepoints<'_, F, U> {
    fn clone(&self) -> Self {
        Self {
            units: self.units,
            _marker: PhantomData,
        }
    }
}

impl<'a, F: Form, U: CodeUnit> Codepoints<'a, F, U> {
    /// Creates an iterator over `units` decoded as form `F`.
    #[inline]
    pub fn new(units: &'a [U]) -> Self {
        Self {
            units,
            _marker: PhantomData,
        }
    }

    /// Views the units not decoded yet.
    #[inline]
    pub fn as_slice(&self) -> &'a [U] {
        self.units
    }
}

impl<F: Form, U: CodeUnit> Iterator for Codepoints<'_, F, U> {
    type Item = Result<u32, DecodeError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.units.is_empty() {
            return None;
        }
        Some(F::get(&mut self.units))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.units.len();
        // At least 1 unit per step, at most MAX_UNITS units per step
        (remaining.div_ceil(F::MAX_UNITS), Some(remaining))
    }
}

impl<F: Form, U: CodeUnit> FusedIterator for Codepoints<'_, F, U> {}

impl<F: Form, U: CodeUnit> core::fmt::Debug for Codepoints<'_, F, U> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Codepoints")
            .field("form", &F::NAME)
            .field("units", &self.units)
            .finish()
    }
}

/// Returns an iterator decoding `units` as form `F`.
#[inline]
pub fn codepoints<F: Form, U: CodeUnit>(units: &[U]) -> Codepoints<'_, F, U> {
    Codepoints::new(units)
}
