//! Growable byte buffer used to accumulate one output file's worth of rows.
//!
//! The splitter re-serializes every field it sees into a single reusable
//! buffer and only copies data out when a file boundary is reached, so the
//! growth policy matters: below [`MAX_PREALLOC`] the buffer grows to twice
//! the requested size, amortizing many small per-field appends to O(1)
//! average cost; at or above it the buffer grows to exactly the requested
//! size, so a one-time multi-megabyte write does not double an already
//! large allocation.

/// Ceiling below which capacity requests are doubled rather than sized
/// exactly (1 MiB).
pub const MAX_PREALLOC: usize = 1024 * 1024;

/// A length-tracked byte buffer with amortized growth.
///
/// The write position is the number of bytes currently considered live;
/// it never exceeds the capacity, and the capacity is never implicitly
/// shrunk. [`clear`](RecordBuffer::clear) resets the position to zero while
/// retaining the allocation for the next batch.
#[derive(Debug)]
pub struct RecordBuffer {
    buf: Vec<u8>,
}

impl RecordBuffer {
    /// Create a buffer with at least `initial` bytes of capacity and a
    /// write position of zero.
    pub fn with_capacity(initial: usize) -> Self {
        Self {
            buf: Vec::with_capacity(initial.max(1)),
        }
    }

    /// Current write position (bytes of live content).
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Total allocated capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Bytes of room left before the next append would have to grow.
    pub fn remaining(&self) -> usize {
        self.buf.capacity() - self.buf.len()
    }

    /// The live contents, `position` bytes long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Grow so that at least `min` bytes fit.
    ///
    /// No-op when `min` is below the current capacity. Otherwise the new
    /// capacity is `2 * min` when `min` is under [`MAX_PREALLOC`] and
    /// exactly `min` when it is not. Content is preserved.
    pub fn ensure_capacity(&mut self, min: usize) {
        if min < self.buf.capacity() {
            return;
        }
        let target = if min < MAX_PREALLOC { min * 2 } else { min };
        self.buf.reserve_exact(target - self.buf.len());
    }

    /// Grow to at least twice the current capacity.
    pub fn grow_double(&mut self) {
        self.ensure_capacity(self.buf.capacity().saturating_mul(2));
    }

    /// Append a single byte, doubling first when no room remains.
    pub fn push_byte(&mut self, c: u8) {
        if self.remaining() == 0 {
            self.grow_double();
        }
        self.buf.push(c);
    }

    /// Serialize one CSV field at the write position.
    ///
    /// Fields containing the delimiter, a quote, CR or LF are wrapped in
    /// quotes with embedded quotes doubled; anything else is written
    /// verbatim. The escaped size is computed up front and the buffer is
    /// doubled in a loop until the write fits.
    pub fn push_escaped(&mut self, field: &[u8], delimiter: u8) {
        let needed = escaped_len(field, delimiter);
        while needed > self.remaining() {
            self.grow_double();
        }
        if needed == field.len() {
            self.buf.extend_from_slice(field);
            return;
        }
        self.buf.push(b'"');
        for &b in field {
            if b == b'"' {
                self.buf.push(b'"');
            }
            self.buf.push(b);
        }
        self.buf.push(b'"');
    }

    /// Overwrite the buffer from offset zero and set the position to
    /// `bytes.len()`.
    pub fn set_contents(&mut self, bytes: &[u8]) {
        self.ensure_capacity(bytes.len());
        self.buf.clear();
        self.buf.extend_from_slice(bytes);
    }

    /// A fresh, independently allocated copy of the live contents.
    ///
    /// The copy never aliases this buffer's storage; mutating one after
    /// the call cannot affect the other.
    pub fn duplicate(&self) -> Vec<u8> {
        self.buf[..].to_vec()
    }

    /// Like [`duplicate`](RecordBuffer::duplicate) but copying at most
    /// `max_len` bytes; `max_len` is clamped down to the position.
    pub fn duplicate_up_to(&self, max_len: usize) -> Vec<u8> {
        let len = max_len.min(self.buf.len());
        self.buf[..len].to_vec()
    }

    /// Drop the first `len` bytes, shifting any remainder to the front.
    /// The capacity is retained.
    pub fn discard_front(&mut self, len: usize) {
        self.buf.drain(..len.min(self.buf.len()));
    }

    /// Reset the position to zero, retaining the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

/// Bytes `field` occupies once escaped for the given delimiter.
fn escaped_len(field: &[u8], delimiter: u8) -> usize {
    let mut quotes = 0usize;
    let mut needs_quoting = false;
    for &b in field {
        if b == b'"' {
            quotes += 1;
            needs_quoting = true;
        } else if b == delimiter || b == b'\r' || b == b'\n' {
            needs_quoting = true;
        }
    }
    if needs_quoting {
        field.len() + quotes + 2
    } else {
        field.len()
    }
}
