//! Output sinks: the write side of the engine.
//!
//! Encoding and transcoding never see a concrete destination. They write
//! through a [`Sink`], which accepts one code unit at a time and advances.
//! The provided sinks cover the common destinations:
//!
//! - [`SliceCursor`]: a write position in a caller-sized buffer. The caller
//!   guarantees the capacity; running past the end panics.
//! - [`CheckedCursor`]: the same, but overflow is latched and reported so
//!   that [`try_copy`](crate::try_copy) can return a
//!   [`CapacityError`](crate::CapacityError).
//! - [`RawCursor`]: a bare pointer with no checks at all.
//! - [`CallSink`]: hands each unit to a closure, for streams and other
//!   non-contiguous destinations.
//! - `Vec<U>`: appends (requires the `alloc` feature).
//!
//! ```
//! use codeunits::{put, sink::{call_sink, SliceCursor}};
//!
//! let mut buf = [0u8; 8];
//! let mut cursor = SliceCursor::new(&mut buf);
//! put(&mut cursor, 0x40B);
//! assert_eq!(cursor.written(), b"\xD0\x8B");
//!
//! let mut collected = Vec::new();
//! put(&mut call_sink(|unit: u8| collected.push(unit)), 0x40B);
//! assert_eq!(collected, b"\xD0\x8B");
//! ```

use core::marker::PhantomData;

use crate::unit::CodeUnit;

/// A destination that accepts code units one at a time.
pub trait Sink {
    /// The unit type this sink stores.
    type Unit: CodeUnit;

    /// Writes one unit and advances.
    fn write(&mut self, unit: Self::Unit);

    /// Returns `true` once the sink has dropped a unit for lack of space.
    ///
    /// Sinks that cannot run out (or that panic instead) keep the default.
    #[inline]
    fn overflowed(&self) -> bool {
        false
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    type Unit = S::Unit;

    #[inline]
    fn write(&mut self, unit: Self::Unit) {
        (**self).write(unit);
    }

    #[inline]
    fn overflowed(&self) -> bool {
        (**self).overflowed()
    }
}

#[cfg(feature = "alloc")]
impl<U: CodeUnit> Sink for alloc::vec::Vec<U> {
    type Unit = U;

    #[inline]
    fn write(&mut self, unit: U) {
        self.push(unit);
    }
}

/// Narrows `value` to the sink's unit width and writes it.
#[inline]
pub(crate) fn emit<O: Sink + ?Sized>(out: &mut O, value: u32) {
    out.write(<O::Unit as CodeUnit>::truncate_from(value));
}

/// A write position inside a caller-supplied buffer.
///
/// The buffer must be large enough for everything written through the
/// cursor; [`max_encoded_len`](crate::max_encoded_len) gives a safe size.
///
/// # Panics
///
/// [`Sink::write`] panics when the buffer is already full.
#[derive(Debug)]
pub struct SliceCursor<'a, U> {
    buf: &'a mut [U],
    pos: usize,
}

impl<'a, U: CodeUnit> SliceCursor<'a, U> {
    /// Creates a cursor at the start of `buf`.
    #[inline]
    pub fn new(buf: &'a mut [U]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the number of units written so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of units that still fit.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Returns the units written so far.
    #[inline]
    pub fn written(&self) -> &[U] {
        &self.buf[..self.pos]
    }

    /// Consumes the cursor, returning the written prefix of the buffer.
    #[inline]
    pub fn into_written(self) -> &'a mut [U] {
        let Self { buf, pos } = self;
        &mut buf[..pos]
    }
}

impl<U: CodeUnit> Sink for SliceCursor<'_, U> {
    type Unit = U;

    #[inline]
    fn write(&mut self, unit: U) {
        self.buf[self.pos] = unit;
        self.pos += 1;
    }
}

/// A write position inside a buffer that refuses to overflow.
///
/// Units that do not fit are dropped and the cursor reports
/// [`overflowed`](Sink::overflowed) from then on.
#[derive(Debug)]
pub struct CheckedCursor<'a, U> {
    buf: &'a mut [U],
    pos: usize,
    overflowed: bool,
}

impl<'a, U: CodeUnit> CheckedCursor<'a, U> {
    /// Creates a cursor at the start of `buf`.
    #[inline]
    pub fn new(buf: &'a mut [U]) -> Self {
        Self {
            buf,
            pos: 0,
            overflowed: false,
        }
    }

    /// Returns the number of units written so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the capacity of the underlying buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the units written so far.
    #[inline]
    pub fn written(&self) -> &[U] {
        &self.buf[..self.pos]
    }
}

impl<U: CodeUnit> Sink for CheckedCursor<'_, U> {
    type Unit = U;

    #[inline]
    fn write(&mut self, unit: U) {
        match self.buf.get_mut(self.pos) {
            Some(slot) => {
                *slot = unit;
                self.pos += 1;
            }
            None => self.overflowed = true,
        }
    }

    #[inline]
    fn overflowed(&self) -> bool {
        self.overflowed
    }
}

/// A bare pointer into caller-owned memory.
///
/// Writes are completely unchecked. Prefer [`SliceCursor`] unless the
/// destination is only available as a pointer.
#[derive(Debug)]
pub struct RawCursor<U> {
    ptr: *mut U,
}

impl<U: CodeUnit> RawCursor<U> {
    /// Creates a cursor writing at `ptr`.
    ///
    /// # Safety
    ///
    /// Every unit written through the cursor must land in memory that is
    /// valid for writes of `U` and properly aligned. The caller sizes the
    /// destination, e.g. with [`max_encoded_len`](crate::max_encoded_len).
    #[inline]
    pub unsafe fn new(ptr: *mut U) -> Self {
        Self { ptr }
    }

    /// Returns the current write position.
    #[inline]
    pub fn position(&self) -> *mut U {
        self.ptr
    }
}

impl<U: CodeUnit> Sink for RawCursor<U> {
    type Unit = U;

    #[inline]
    fn write(&mut self, unit: U) {
        // SAFETY: the constructor's contract makes the caller responsible for
        // every position this cursor reaches.
        unsafe {
            self.ptr.write(unit);
            self.ptr = self.ptr.add(1);
        }
    }
}

/// A sink that calls a function once per unit.
pub struct CallSink<U, F> {
    f: F,
    _marker: PhantomData<fn(U)>,
}

impl<U: CodeUnit, F: FnMut(U)> CallSink<U, F> {
    /// Wraps `f` as a sink.
    #[inline]
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }

    /// Returns the wrapped function.
    #[inline]
    pub fn into_inner(self) -> F {
        self.f
    }
}

impl<U: CodeUnit, F: FnMut(U)> Sink for CallSink<U, F> {
    type Unit = U;

    #[inline]
    fn write(&mut self, unit: U) {
        (self.f)(unit);
    }
}

impl<U, F> core::fmt::Debug for CallSink<U, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CallSink").finish_non_exhaustive()
    }
}

/// Wraps a unit-consuming function as a [`Sink`].
///
/// The unit type, and with it the natural encoding form, comes from the
/// function's argument type.
#[inline]
pub fn call_sink<U: CodeUnit, F: FnMut(U)>(f: F) -> CallSink<U, F> {
    CallSink::new(f)
}

/// Counts the units passing through to another sink.
pub(crate) struct Counted<'s, O: ?Sized> {
    inner: &'s mut O,
    count: usize,
}

impl<'s, O: Sink + ?Sized> Counted<'s, O> {
    #[inline]
    pub(crate) fn new(inner: &'s mut O) -> Self {
        Self { inner, count: 0 }
    }

    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.count
    }
}

impl<O: Sink + ?Sized> Sink for Counted<'_, O> {
    type Unit = O::Unit;

    #[inline]
    fn write(&mut self, unit: Self::Unit) {
        self.inner.write(unit);
        if !self.inner.overflowed() {
            self.count += 1;
        }
    }

    #[inline]
    fn overflowed(&self) -> bool {
        self.inner.overflowed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_cursor_tracks_position() {
        let mut buf = [0u16; 4];
        let mut cursor = SliceCursor::new(&mut buf);
        cursor.write(1);
        cursor.write(2);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.remaining(), 2);
        assert_eq!(cursor.written(), &[1, 2]);
        assert_eq!(cursor.into_written(), &mut [1, 2]);
    }

    #[test]
    #[should_panic]
    fn test_slice_cursor_panics_when_full() {
        let mut buf = [0u8; 1];
        let mut cursor = SliceCursor::new(&mut buf);
        cursor.write(1);
        cursor.write(2);
    }

    #[test]
    fn test_checked_cursor_latches_overflow() {
        let mut buf = [0u8; 2];
        let mut cursor = CheckedCursor::new(&mut buf);
        cursor.write(b'a');
        cursor.write(b'b');
        assert!(!cursor.overflowed());
        cursor.write(b'c');
        assert!(cursor.overflowed());
        assert_eq!(cursor.written(), b"ab");
        assert_eq!(cursor.capacity(), 2);
    }

    #[test]
    fn test_raw_cursor_advances() {
        let mut buf = [0u32; 3];
        let start = buf.as_mut_ptr();
        let mut cursor = unsafe { RawCursor::new(start) };
        cursor.write(7);
        cursor.write(8);
        let written = unsafe { cursor.position().offset_from(start) };
        assert_eq!(written, 2);
        assert_eq!(buf, [7, 8, 0]);
    }

    #[test]
    fn test_call_sink_forwards_each_unit() {
        let mut seen = Vec::new();
        {
            let mut sink = call_sink(|unit: u16| seen.push(unit));
            sink.write(0xD808);
            sink.write(0xDF45);
        }
        assert_eq!(seen, [0xD808, 0xDF45]);
    }

    #[test]
    fn test_vec_sink_appends() {
        let mut v: Vec<u8> = b"ab".to_vec();
        v.write(b'c');
        assert_eq!(v, b"abc");
    }

    #[test]
    fn test_counted_ignores_dropped_units() {
        let mut buf = [0u8; 1];
        let mut cursor = CheckedCursor::new(&mut buf);
        let mut counted = Counted::new(&mut cursor);
        counted.write(1);
        counted.write(2);
        assert_eq!(counted.count(), 1);
        assert!(counted.overflowed());
    }
}
