//! Wrap-around index arithmetic shared by the slideshow and the lightbox.
//!
//! A [`Cursor`] pairs a position with the length of the list it points into.
//! Every constructor and step keeps `index < len` (or `index == 0` for an
//! empty list), so callers never have to re-check bounds before indexing.

use serde::Serialize;

/// A position inside a fixed-length ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    /// Cursor at the start of a list of `len` entries.
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Cursor at `seed mod len`. Used for the minute-of-hour slide seed.
    pub fn seeded(len: usize, seed: usize) -> Self {
        let index = if len == 0 { 0 } else { seed % len };
        Self { index, len }
    }

    /// Cursor at `index`, clamped to the last entry when out of range.
    pub fn clamped(len: usize, index: usize) -> Self {
        let index = if len == 0 { 0 } else { index.min(len - 1) };
        Self { index, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `(index + 1) mod len`; unchanged for an empty list.
    pub fn forward(self) -> Self {
        self.step(1)
    }

    /// `(index - 1 + len) mod len`; unchanged for an empty list.
    pub fn back(self) -> Self {
        if self.len == 0 {
            return self;
        }
        Self {
            index: (self.index + self.len - 1) % self.len,
            len: self.len,
        }
    }

    /// `(index + k) mod len`, without overflowing for large `k`.
    pub fn step(self, k: usize) -> Self {
        if self.len == 0 {
            return self;
        }
        Self {
            index: (self.index + k % self.len) % self.len,
            len: self.len,
        }
    }
}
