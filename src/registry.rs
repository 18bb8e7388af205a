//! Encodings selected by name at run time.
//!
//! The transcoding API works on typed code units. Tools such as `iconv`
//! receive byte streams and encoding *names* instead; this module maps the
//! names to byte-serialized forms (with their byte order) and transcodes
//! whole byte buffers.
//!
//! # Example
//!
//! ```
//! use codeunits::{registry, Policy};
//!
//! // Every registered encoding, with the form its bytes carry
//! for enc in registry::encodings() {
//!     println!("{} ({})", enc.name(), enc.form());
//! }
//!
//! // Bytes in, bytes out
//! let output = registry::transcode(b"h\xC3\xA9", "UTF-8", "UTF-16LE", Policy::Stop)?;
//! assert_eq!(output, b"h\x00\xE9\x00");
//! # Ok::<(), registry::TranscodeError>(())
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;

use crate::codepoint::REPLACEMENT_CHARACTER;
use crate::error::DecodeError;
use crate::form::FormKind;
use crate::sink::call_sink;
use crate::transcode::{copy, Handler, Policy};
use crate::unit::{CodeUnit, WideChar};

/// No registered encoding has this name or alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEncodingError(pub String);

impl fmt::Display for UnknownEncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown encoding: {}", self.0)
    }
}

impl core::error::Error for UnknownEncodingError {}

/// Failure of [`transcode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscodeError {
    /// The source encoding is unknown.
    UnknownSourceEncoding(UnknownEncodingError),
    /// The target encoding is unknown.
    UnknownTargetEncoding(UnknownEncodingError),
    /// The input is not valid in the source encoding (only under [`Policy::Stop`]).
    InvalidInput {
        /// Byte offset of the first bad unit.
        position: usize,
        /// What was wrong with it.
        error: DecodeError,
    },
}

impl fmt::Display for TranscodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSourceEncoding(e) => write!(f, "source {}", e),
            Self::UnknownTargetEncoding(e) => write!(f, "target {}", e),
            Self::InvalidInput { position, error } => {
                write!(f, "invalid input at byte {}: {}", position, error)
            }
        }
    }
}

impl core::error::Error for TranscodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::UnknownSourceEncoding(e) | Self::UnknownTargetEncoding(e) => Some(e),
            Self::InvalidInput { error, .. } => Some(error),
        }
    }
}

/// A byte serialization of one encoding form.
///
/// Collected with `inventory`; see the `register!` invocations below.
pub struct EncodingEntry {
    /// The canonical name of the encoding (e.g., "UTF-16LE").
    pub name: &'static str,
    /// Alternative names for the encoding (e.g., &["UTF16LE"]).
    pub aliases: &'static [&'static str],
    /// The encoding form the bytes carry.
    pub form: FormKind,
    /// Bytes per code unit.
    pub unit_bytes: usize,
    /// Decode bytes to codepoints under a policy.
    pub decode: fn(&[u8], Policy) -> Result<Vec<u32>, TranscodeError>,
    /// Append the bytes of one codepoint.
    pub encode: fn(u32, &mut Vec<u8>),
}

impl EncodingEntry {
    /// The canonical name, as listed by `iconv -l`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the encoding form the bytes carry.
    pub fn form(&self) -> FormKind {
        self.form
    }

    /// The canonical name followed by the aliases.
    pub fn all_names(&self) -> impl Iterator<Item = &'static str> {
        core::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    /// Whether `name` is one of [`all_names`](Self::all_names), ignoring ASCII case.
    pub fn matches(&self, name: &str) -> bool {
        self.all_names().any(|n| n.eq_ignore_ascii_case(name))
    }
}

impl fmt::Debug for EncodingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodingEntry")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("form", &self.form)
            .field("unit_bytes", &self.unit_bytes)
            .finish_non_exhaustive()
    }
}

inventory::collect!(EncodingEntry);

/// Iterates the registered encodings in link order.
pub fn encodings() -> impl Iterator<Item = &'static EncodingEntry> {
    inventory::iter::<EncodingEntry>()
}

/// Looks up an encoding by canonical name or alias, ignoring ASCII case.
pub fn find_encoding(name: &str) -> Result<&'static EncodingEntry, UnknownEncodingError> {
    encodings()
        .find(|e| e.matches(name))
        .ok_or_else(|| UnknownEncodingError(name.to_string()))
}

/// Re-encodes `input` from the encoding named `from` into the one named `to`.
///
/// Bad input is skipped, marked or reported according to `policy`.
///
/// A trailing partial code unit (e.g. an odd byte count in UTF-16) is a
/// bad region of its own.
pub fn transcode(
    input: &[u8],
    from: &str,
    to: &str,
    policy: Policy,
) -> Result<Vec<u8>, TranscodeError> {
    let from_enc = find_encoding(from).map_err(TranscodeError::UnknownSourceEncoding)?;
    let to_enc = find_encoding(to).map_err(TranscodeError::UnknownTargetEncoding)?;

    let codepoints = (from_enc.decode)(input, policy)?;

    let mut output = Vec::with_capacity(codepoints.len() * to_enc.unit_bytes);
    for cp in codepoints {
        (to_enc.encode)(cp, &mut output);
    }
    Ok(output)
}

#[derive(Debug, Clone, Copy)]
enum Order {
    Little,
    Big,
    Native,
}

/// Code units with a byte serialization.
trait Wire: CodeUnit {
    const BYTES: usize;

    fn read(bytes: &[u8], order: Order) -> Self;

    fn append(self, order: Order, out: &mut Vec<u8>);
}

macro_rules! impl_wire {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Wire for $t {
                const BYTES: usize = core::mem::size_of::<$t>();

                #[inline]
                fn read(bytes: &[u8], order: Order) -> Self {
                    let mut raw = [0u8; core::mem::size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    match order {
                        Order::Little => <$t>::from_le_bytes(raw),
                        Order::Big => <$t>::from_be_bytes(raw),
                        Order::Native => <$t>::from_ne_bytes(raw),
                    }
                }

                #[inline]
                fn append(self, order: Order, out: &mut Vec<u8>) {
                    let raw = match order {
                        Order::Little => self.to_le_bytes(),
                        Order::Big => self.to_be_bytes(),
                        Order::Native => self.to_ne_bytes(),
                    };
                    out.extend_from_slice(&raw);
                }
            }
        )+
    };
}

impl_wire!(u8, u16, u32);

fn decode_with<U: Wire>(
    order: Order,
    input: &[u8],
    policy: Policy,
) -> Result<Vec<u32>, TranscodeError> {
    let whole = input.len() - input.len() % U::BYTES;
    let units: Vec<U> = input[..whole]
        .chunks_exact(U::BYTES)
        .map(|chunk| U::read(chunk, order))
        .collect();

    let first_error = Cell::new(None);
    let failed = Cell::new(false);
    let handler = |e: &DecodeError| {
        if first_error.get().is_none() {
            first_error.set(Some(*e));
        }
        failed.set(true);
        policy.handle(e)
    };

    // Set when the last codepoint written was a replacement, or a failure
    // came after it: the bad region then reaches the partial tail.
    let bad_before_tail = Cell::new(false);
    let mut codepoints: Vec<u32> = Vec::with_capacity(units.len());
    let copied = copy(
        &units,
        &mut call_sink(|cp: u32| {
            bad_before_tail.set(failed.replace(false));
            codepoints.push(cp);
        }),
        handler,
    );
    if copied.read < units.len() {
        let error = first_error.get().unwrap_or(DecodeError::malformed(1));
        return Err(TranscodeError::InvalidInput {
            position: copied.read * U::BYTES,
            error,
        });
    }

    if whole < input.len() {
        match policy {
            Policy::Skip => {}
            Policy::Stop => {
                return Err(TranscodeError::InvalidInput {
                    position: whole,
                    error: DecodeError::truncated(input.len() - whole),
                });
            }
            Policy::Mark => {
                if !(failed.get() || bad_before_tail.get()) {
                    codepoints.push(REPLACEMENT_CHARACTER);
                }
            }
        }
    }

    Ok(codepoints)
}

fn encode_with<U: Wire>(order: Order, cp: u32, out: &mut Vec<u8>) {
    let mut sink = call_sink(|unit: U| unit.append(order, out));
    crate::put(&mut sink, cp);
}

// Built-in encodings

macro_rules! register {
    ($name:literal, [$($alias:literal),* $(,)?], $unit:ty, $order:expr) => {
        inventory::submit! {
            EncodingEntry {
                name: $name,
                aliases: &[$($alias),*],
                form: <<$unit as CodeUnit>::Form as crate::form::Form>::KIND,
                unit_bytes: core::mem::size_of::<$unit>(),
                decode: |input, policy| decode_with::<$unit>($order, input, policy),
                encode: |cp, out| encode_with::<$unit>($order, cp, out),
            }
        }
    };
}

register!("UTF-8", ["UTF8", "utf-8", "utf8"], u8, Order::Big);
register!("UTF-16LE", ["UTF16LE", "utf-16le", "utf16le"], u16, Order::Little);
register!("UTF-16BE", ["UTF16BE", "UTF-16", "UTF16"], u16, Order::Big);
register!("UTF-32LE", ["UTF32LE", "utf-32le", "utf32le"], u32, Order::Little);
register!("UTF-32BE", ["UTF32BE", "UTF-32", "UTF32", "UCS-4", "UCS-4BE"], u32, Order::Big);
register!("WCHAR_T", ["wchar_t", "WCHAR"], WideChar, Order::Native);
