//! Encoding forms and the per-codepoint decode/encode primitives.
//!
//! This module provides the core trait that defines how codepoints are
//! stored in code units:
//!
//! - [`Form`]: implemented by the zero-sized markers [`Utf8`], [`Utf16`]
//!   and [`Utf32`]
//! - [`FormKind`]: the same three forms as a runtime value
//!
//! A form's operations are generic over the unit type. Normally the unit
//! type's own form is used ([`get`] and [`put`] infer it), but naming a form
//! explicitly stores it in any width. Encoding UTF-32 into 16-bit or 8-bit
//! units narrows each scalar to the low bits; this is a deliberate packing
//! mode and loses data silently.
//!
//! # Example
//!
//! ```
//! use codeunits::{put, Form, Utf32, Utf8};
//! use codeunits::sink::SliceCursor;
//!
//! assert_eq!(Utf8::NAME, "UTF-8");
//! assert_eq!(Utf8::MAX_UNITS, 4);
//!
//! // Inferred form: bytes are UTF-8.
//! let mut buf = [0u8; 8];
//! let mut out = SliceCursor::new(&mut buf);
//! put(&mut out, 0x12345);
//! assert_eq!(out.written(), b"\xF0\x92\x8D\x85");
//!
//! // Explicit form: UTF-32 packed into 16-bit units.
//! let mut buf = [0u16; 8];
//! let mut out = SliceCursor::new(&mut buf);
//! Utf32::put(&mut out, 0x12345);
//! assert_eq!(out.written(), &[0x2345]);
//! ```
//!
//! [`Utf8`]: crate::Utf8
//! [`Utf16`]: crate::Utf16
//! [`Utf32`]: crate::Utf32

use core::fmt;

use crate::error::DecodeError;
use crate::sink::Sink;
use crate::unit::{CodeUnit, Wide};

/// A Unicode encoding form.
///
/// Implementors are zero-sized types that serve as type-level markers. All
/// operations are associated functions.
pub trait Form: Sized + Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// The human-readable name of this form (e.g. "UTF-16").
    const NAME: &'static str;

    /// The runtime tag of this form.
    const KIND: FormKind;

    /// The unit width, in bits, this form is defined over.
    const UNIT_BITS: u32;

    /// The fewest units a codepoint occupies.
    const MIN_UNITS: usize = 1;

    /// The most units a codepoint occupies.
    const MAX_UNITS: usize;

    /// Decodes the codepoint at the start of `units`.
    ///
    /// Returns the codepoint and the number of units it occupies. On failure
    /// the error's [`len`](DecodeError::len) is the number of units to skip,
    /// which is at least one unless `units` is empty.
    fn decode<U: CodeUnit>(units: &[U]) -> Result<(u32, usize), DecodeError>;

    /// Returns the number of units [`encode`](Self::encode) writes for `cp`.
    fn encoded_len(cp: u32) -> usize;

    /// Writes `cp` to `out` and returns the number of units written.
    ///
    /// `cp` is not validated. Units are narrowed to the sink's width by
    /// truncation.
    fn encode<O: Sink + ?Sized>(cp: u32, out: &mut O) -> usize;

    /// Decodes one codepoint and advances `cursor` past it.
    ///
    /// On failure the cursor moves past the units the error covers, so
    /// repeated calls always make progress.
    #[inline]
    fn get<U: CodeUnit>(cursor: &mut &[U]) -> Result<u32, DecodeError> {
        let units: &[U] = *cursor;
        match Self::decode(units) {
            Ok((cp, len)) => {
                *cursor = &units[len..];
                Ok(cp)
            }
            Err(e) => {
                *cursor = &units[e.len()..];
                Err(e)
            }
        }
    }

    /// Encodes `cp` into `out`.
    #[inline]
    fn put<O: Sink + ?Sized>(out: &mut O, cp: u32) {
        Self::encode(cp, out);
    }
}

/// The encoding forms, as a runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    /// UTF-8, 8-bit units.
    Utf8,
    /// UTF-16, 16-bit units.
    Utf16,
    /// UTF-32, 32-bit units.
    Utf32,
}

impl FormKind {
    /// The form of the platform wide character type.
    pub const WIDE: FormKind = <Wide as Form>::KIND;

    /// Returns the form's name.
    pub const fn name(self) -> &'static str {
        match self {
            FormKind::Utf8 => crate::Utf8::NAME,
            FormKind::Utf16 => crate::Utf16::NAME,
            FormKind::Utf32 => crate::Utf32::NAME,
        }
    }

    /// Returns the most units a codepoint occupies in this form.
    pub const fn max_units(self) -> usize {
        match self {
            FormKind::Utf8 => crate::Utf8::MAX_UNITS,
            FormKind::Utf16 => crate::Utf16::MAX_UNITS,
            FormKind::Utf32 => crate::Utf32::MAX_UNITS,
        }
    }

    /// Returns the natural unit width in bits.
    pub const fn unit_bits(self) -> u32 {
        match self {
            FormKind::Utf8 => crate::Utf8::UNIT_BITS,
            FormKind::Utf16 => crate::Utf16::UNIT_BITS,
            FormKind::Utf32 => crate::Utf32::UNIT_BITS,
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decodes one codepoint in the natural form of `U` and advances `cursor`.
///
/// ```
/// use codeunits::{get, DecodeErrorKind};
///
/// let mut input: &[u8] = b"\xD0\x8B\x80";
/// assert_eq!(get(&mut input), Ok(0x40B));
/// assert_eq!(get(&mut input).unwrap_err().kind(), DecodeErrorKind::Malformed);
/// assert!(input.is_empty());
/// ```
#[inline]
pub fn get<U: CodeUnit>(cursor: &mut &[U]) -> Result<u32, DecodeError> {
    U::Form::get(cursor)
}

/// Encodes `cp` in the natural form of the sink's unit type.
#[inline]
pub fn put<O: Sink + ?Sized>(out: &mut O, cp: u32) {
    <O::Unit as CodeUnit>::Form::put(out, cp)
}
