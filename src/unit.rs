//! Code-unit types and their natural encoding forms.
//!
//! Every storage width maps to exactly one form: bytes are UTF-8, 16-bit
//! words are UTF-16 and 32-bit words are UTF-32. The inferred entry points
//! ([`get`](crate::get), [`put`](crate::put), [`copy`](crate::copy) and
//! friends) pick the form through [`CodeUnit::Form`]. To store a form in
//! some other width, name the form explicitly instead (see
//! [`Form`](crate::Form)).

use crate::form::Form;
use crate::utf16::Utf16;
use crate::utf32::Utf32;
use crate::utf8::Utf8;

mod private {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// A fixed-width storage element of an encoded sequence.
///
/// Implemented for `u8`, `u16` and `u32`. This trait is sealed.
pub trait CodeUnit:
    Copy + Eq + Ord + Default + core::fmt::Debug + Send + Sync + 'static + private::Sealed
{
    /// The encoding form this unit width stores by default.
    type Form: Form;

    /// Width of the unit in bits.
    const BITS: u32;

    /// Widens the unit to a `u32`.
    fn to_u32(self) -> u32;

    /// Narrows `value` to this width, keeping only the low [`BITS`](Self::BITS) bits.
    fn truncate_from(value: u32) -> Self;
}

impl CodeUnit for u8 {
    type Form = Utf8;
    const BITS: u32 = 8;

    #[inline]
    fn to_u32(self) -> u32 {
        self as u32
    }

    #[inline]
    fn truncate_from(value: u32) -> Self {
        value as u8
    }
}

impl CodeUnit for u16 {
    type Form = Utf16;
    const BITS: u32 = 16;

    #[inline]
    fn to_u32(self) -> u32 {
        self as u32
    }

    #[inline]
    fn truncate_from(value: u32) -> Self {
        value as u16
    }
}

impl CodeUnit for u32 {
    type Form = Utf32;
    const BITS: u32 = 32;

    #[inline]
    fn to_u32(self) -> u32 {
        self
    }

    #[inline]
    fn truncate_from(value: u32) -> Self {
        value
    }
}

/// The platform wide character unit, matching the width of C's `wchar_t`.
///
/// 16 bits on Windows, 32 bits everywhere else.
#[cfg(windows)]
pub type WideChar = u16;

/// The platform wide character unit, matching the width of C's `wchar_t`.
///
/// 16 bits on Windows, 32 bits everywhere else.
#[cfg(not(windows))]
pub type WideChar = u32;

/// The encoding form of [`WideChar`]: UTF-16 on Windows, UTF-32 elsewhere.
pub type Wide = <WideChar as CodeUnit>::Form;
