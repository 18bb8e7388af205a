//! Whole-range transcoding.
//!
//! The algorithms decode the source one codepoint at a time, re-validate
//! it, and encode it into the destination sink. They differ only in what
//! happens to input that fails to decode:
//!
//! - [`copy_s`]: skip it, concatenating the good parts around it
//! - [`copy_m`]: write one U+FFFD per contiguous bad region
//! - [`copy`]: ask a [`Handler`], which may also stop the copy early
//!
//! Source and destination forms are inferred from the unit types. Use
//! [`Transcoder`] to name them explicitly.
//!
//! # Example
//!
//! ```
//! use codeunits::{copy_m, copy_s};
//! use codeunits::sink::SliceCursor;
//!
//! let src: [u32; 8] = [0x61, 0x62, 0x63, 0xDD00, 0x40B, 0x110000, 0x1234, 0x12345];
//!
//! let mut buf = [0u8; 32];
//! let mut out = SliceCursor::new(&mut buf);
//! copy_s(&src, &mut out);
//! assert_eq!(out.written(), b"abc\xD0\x8B\xE1\x88\xB4\xF0\x92\x8D\x85");
//!
//! let mut buf = [0u8; 32];
//! let mut out = SliceCursor::new(&mut buf);
//! copy_m(&src, &mut out);
//! assert_eq!(
//!     out.written(),
//!     b"abc\xEF\xBF\xBD\xD0\x8B\xEF\xBF\xBD\xE1\x88\xB4\xF0\x92\x8D\x85"
//! );
//! ```

use core::fmt;
use core::marker::PhantomData;

use crate::codepoint::{is_valid, REPLACEMENT_CHARACTER};
use crate::error::{CapacityError, DecodeError};
use crate::form::Form;
use crate::sink::{CheckedCursor, Counted, Sink};
use crate::unit::CodeUnit;

/// What a transcoding algorithm does with input that failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Drop the bad units and continue.
    Skip,
    /// Stop before the bad units.
    Stop,
    /// Write this codepoint once for the bad region and continue.
    Replace(u32),
}

/// Decides the [`Action`] for each decode failure.
///
/// Handlers are consulted once per failure, in input order. A contiguous
/// run of failures gets at most one replacement however many times the
/// handler answers [`Action::Replace`].
pub trait Handler {
    /// Returns the action to take for `error`.
    fn handle(&self, error: &DecodeError) -> Action;
}

/// The fixed error policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Policy {
    /// Drop malformed and truncated input.
    #[default]
    Skip,
    /// Stop at the first malformed or truncated input.
    Stop,
    /// Replace each malformed or truncated region with U+FFFD.
    Mark,
}

impl Handler for Policy {
    #[inline]
    fn handle(&self, _error: &DecodeError) -> Action {
        match self {
            Policy::Skip => Action::Skip,
            Policy::Stop => Action::Stop,
            Policy::Mark => Action::Replace(REPLACEMENT_CHARACTER),
        }
    }
}

impl<F: Fn(&DecodeError) -> Action> Handler for F {
    #[inline]
    fn handle(&self, error: &DecodeError) -> Action {
        self(error)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Policy::Skip => "skip",
            Policy::Stop => "stop",
            Policy::Mark => "mark",
        })
    }
}

/// How far a transcoding call got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Copied {
    /// Source units consumed. Less than the source length only after a stop.
    pub read: usize,
    /// Units written to the sink.
    pub written: usize,
}

/// Transcoding from form `S` to form `D`, independent of the unit types.
///
/// The free functions [`copy`], [`copy_s`] and [`copy_m`] use the natural
/// forms of the unit types; this type overrides either side.
///
/// ```
/// use codeunits::{Transcoder, Utf32, Utf8};
///
/// // UTF-8 bytes stored in 16-bit units, written as raw UTF-32 into bytes.
/// let src: [u16; 3] = [0x61, 0xC3, 0xA9];
/// let mut out: Vec<u8> = Vec::new();
/// Transcoder::<Utf8, Utf32>::copy_s(&src, &mut out);
/// assert_eq!(out, [0x61, 0xE9]);
/// ```
pub struct Transcoder<S, D> {
    _marker: PhantomData<fn() -> (S, D)>,
}

impl<S: Form, D: Form> Transcoder<S, D> {
    /// Transcodes `src` into `out`, consulting `handler` on bad input.
    pub fn copy<U, O, H>(src: &[U], out: &mut O, handler: H) -> Copied
    where
        U: CodeUnit,
        O: Sink + ?Sized,
        H: Handler,
    {
        run::<S, D, U, O, H>(src, out, handler).copied
    }

    /// Transcodes `src` into `out`, dropping bad input.
    #[inline]
    pub fn copy_s<U: CodeUnit, O: Sink + ?Sized>(src: &[U], out: &mut O) -> Copied {
        Self::copy(src, out, Policy::Skip)
    }

    /// Transcodes `src` into `out`, marking each bad region with U+FFFD.
    #[inline]
    pub fn copy_m<U: CodeUnit, O: Sink + ?Sized>(src: &[U], out: &mut O) -> Copied {
        Self::copy(src, out, Policy::Mark)
    }

    /// Transcodes `src` into `dst`, failing instead of overflowing it.
    ///
    /// On error, `dst` holds the output for every codepoint before the one
    /// that did not fit (plus possibly a partial encoding of it).
    pub fn try_copy<U, V, H>(src: &[U], dst: &mut [V], handler: H) -> Result<Copied, CapacityError>
    where
        U: CodeUnit,
        V: CodeUnit,
        H: Handler,
    {
        let capacity = dst.len();
        let mut cursor = CheckedCursor::new(dst);
        let run = run::<S, D, U, _, H>(src, &mut cursor, handler);
        if run.overflowed {
            return Err(CapacityError::new(capacity, run.copied.read));
        }
        Ok(run.copied)
    }
}

impl<S, D> Clone for Transcoder<S, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, D> Copy for Transcoder<S, D> {}

impl<S, D> Default for Transcoder<S, D> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S: Form, D: Form> fmt::Debug for Transcoder<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transcoder<{}, {}>", S::NAME, D::NAME)
    }
}

struct Run {
    copied: Copied,
    overflowed: bool,
}

fn run<S, D, U, O, H>(src: &[U], out: &mut O, handler: H) -> Run
where
    S: Form,
    D: Form,
    U: CodeUnit,
    O: Sink + ?Sized,
    H: Handler,
{
    let mut out = Counted::new(out);
    let mut rest = src;
    let mut in_error = false;

    while !rest.is_empty() {
        let at = rest;
        let error = match S::get(&mut rest) {
            Ok(cp) if is_valid(cp) => {
                let mark = out.count();
                D::encode(cp, &mut out);
                if out.overflowed() {
                    return overflow(src, at, mark);
                }
                in_error = false;
                continue;
            }
            // Decoders reject invalid scalars already; keep the guarantee anyway
            Ok(_) => DecodeError::malformed(at.len() - rest.len()),
            Err(e) => e,
        };

        match handler.handle(&error) {
            Action::Skip => {}
            Action::Stop => {
                rest = at;
                break;
            }
            Action::Replace(cp) => {
                if !in_error {
                    let mark = out.count();
                    D::encode(cp, &mut out);
                    if out.overflowed() {
                        return overflow(src, at, mark);
                    }
                }
            }
        }
        in_error = true;
    }

    Run {
        copied: Copied {
            read: src.len() - rest.len(),
            written: out.count(),
        },
        overflowed: false,
    }
}

#[inline]
fn overflow<U>(src: &[U], at: &[U], written: usize) -> Run {
    Run {
        copied: Copied {
            read: src.len() - at.len(),
            written,
        },
        overflowed: true,
    }
}

/// Transcodes `src` into `out` in the natural forms of the unit types,
/// consulting `handler` on bad input.
///
/// ```
/// use codeunits::{copy, Action, DecodeError, Policy};
///
/// let src = b"ab\xFFcd";
/// let mut out: Vec<u16> = Vec::new();
/// let copied = copy(src, &mut out, Policy::Stop);
/// assert_eq!(out, [0x61, 0x62]);
/// assert_eq!(copied.read, 2);
///
/// // Any `Fn(&DecodeError) -> Action` is a handler.
/// let mut out: Vec<u16> = Vec::new();
/// copy(src, &mut out, |_: &DecodeError| Action::Replace('?' as u32));
/// assert_eq!(out, [0x61, 0x62, 0x3F, 0x63, 0x64]);
/// ```
#[inline]
pub fn copy<U, O, H>(src: &[U], out: &mut O, handler: H) -> Copied
where
    U: CodeUnit,
    O: Sink + ?Sized,
    H: Handler,
{
    Transcoder::<U::Form, <O::Unit as CodeUnit>::Form>::copy(src, out, handler)
}

/// Transcodes `src` into `out`, dropping bad input.
#[inline]
pub fn copy_s<U: CodeUnit, O: Sink + ?Sized>(src: &[U], out: &mut O) -> Copied {
    copy(src, out, Policy::Skip)
}

/// Transcodes `src` into `out`, replacing each bad region with U+FFFD.
#[inline]
pub fn copy_m<U: CodeUnit, O: Sink + ?Sized>(src: &[U], out: &mut O) -> Copied {
    copy(src, out, Policy::Mark)
}

/// Transcodes `src` into `dst` in the natural forms of the unit types,
/// returning [`CapacityError`] rather than overflowing `dst`.
#[inline]
pub fn try_copy<U, V, H>(src: &[U], dst: &mut [V], handler: H) -> Result<Copied, CapacityError>
where
    U: CodeUnit,
    V: CodeUnit,
    H: Handler,
{
    Transcoder::<U::Form, V::Form>::try_copy(src, dst, handler)
}

/// Returns a destination size, in units of form `D`, that any transcoding
/// of `input_units` source units fits in, whatever the source form and
/// policy.
///
/// Every codepoint and every bad region consumes at least one source unit
/// and produces at most `D::MAX_UNITS` units.
#[inline]
pub const fn max_encoded_len<D: Form>(input_units: usize) -> usize {
    input_units.saturating_mul(D::MAX_UNITS)
}
