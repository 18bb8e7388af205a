//! Codepoint-level transcoding between Unicode encoding forms.
//!
//! This crate converts sequences of code units between UTF-8, UTF-16,
//! UTF-32 and the platform wide encoding (`wchar_t`), one codepoint at a
//! time, without allocating. Malformed input is handled by a policy chosen
//! per call: skip it, stop at it, or mark it with U+FFFD.
//!
//! The pieces, from the bottom up:
//!
//! - [`codepoint::is_valid`]: is a `u32` a Unicode scalar value?
//! - [`CodeUnit`]: `u8`, `u16` and `u32`, each with a natural [`Form`]
//! - [`Form`]: [`Utf8`], [`Utf16`], [`Utf32`] (and [`Wide`]) with their
//!   `get` (decode one) and `put` (encode one) primitives
//! - [`Sink`](sink::Sink): where encoded units go (buffers, closures, `Vec`)
//! - [`copy`], [`copy_s`], [`copy_m`]: whole-range transcoding
//!
//! # Example
//!
//! ```
//! use codeunits::{copy_m, get, put, Form, Utf32};
//! use codeunits::sink::call_sink;
//!
//! // Decode and encode single codepoints; forms follow the unit types.
//! let mut input: &[u16] = &[0xD808, 0xDF45];
//! let cp = get(&mut input).unwrap();
//! assert_eq!(cp, 0x12345);
//!
//! let mut utf8: Vec<u8> = Vec::new();
//! put(&mut utf8, cp);
//! assert_eq!(utf8, b"\xF0\x92\x8D\x85");
//!
//! // Transcode a whole range into a callback.
//! let mut out = String::new();
//! {
//!     let mut sink = call_sink(|unit: u32| out.push(char::from_u32(unit).unwrap()));
//!     copy_m(b"caf\xC3\xA9 \xFF!", &mut sink);
//! }
//! assert_eq!(out, "café \u{FFFD}!");
//!
//! // Naming the form explicitly overrides the unit type.
//! let mut packed: Vec<u8> = Vec::new();
//! Utf32::put(&mut packed, 0x1234);
//! assert_eq!(packed, [0x34]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

/// Unicode scalar value checks.
pub mod codepoint;
/// Error types for decoding and checked copies.
pub mod error;
/// Encoding form trait and decode/encode primitives.
pub mod form;
/// Iterator decoding a code-unit slice.
pub mod iter;
/// Output sinks.
pub mod sink;
/// Whole-range transcoding algorithms.
pub mod transcode;
/// Code-unit types.
pub mod unit;
/// UTF-16 encoding form.
pub mod utf16;
/// UTF-32 encoding form.
pub mod utf32;
/// UTF-8 encoding form.
pub mod utf8;

/// Runtime encoding registry for dynamic encoding selection.
#[cfg(feature = "registry")]
pub mod registry;

// Re-export main types
pub use codepoint::{is_valid, MAX_CODEPOINT, REPLACEMENT_CHARACTER};
pub use error::{CapacityError, DecodeError, DecodeErrorKind};
pub use form::{get, put, Form, FormKind};
pub use iter::{codepoints, Codepoints};
pub use sink::{call_sink, CallSink, Sink};
pub use transcode::{
    copy, copy_m, copy_s, max_encoded_len, try_copy, Action, Copied, Handler, Policy, Transcoder,
};
pub use unit::{CodeUnit, Wide, WideChar};
pub use utf16::Utf16;
pub use utf32::Utf32;
pub use utf8::Utf8;
