// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
use alloc::boxed::Box;
use core::cell::Cell;
use core::{fmt, mem};

use crate::texel::{MaxAligned, MaxCell, Texel, MAX_ALIGN};

/// An allocated, maximally aligned, byte sized block of memory.
///
/// The block remembers the byte size it was requested with, which may be smaller than its
/// capacity as storage is handed out in units of [`MaxAligned`]. A fresh block is zeroed. The
/// block is untyped; reinterpret it as samples through a [`Texel`] witness.
///
/// [`MaxAligned`]: crate::texels::MaxAligned
pub struct Block {
    cells: Box<[MaxCell]>,
    size: usize,
}

impl Block {
    /// Allocate a new, zeroed block holding at least `size` bytes.
    pub fn new(size: usize) -> Self {
        let cells = (0..Self::cell_len(size)).map(|_| MaxCell::zero()).collect();
        Block { cells, size }
    }

    /// A block without any storage.
    pub fn empty() -> Self {
        Block {
            cells: Box::default(),
            size: 0,
        }
    }

    /// The number of bytes requested for this block.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The number of bytes actually backing this block.
    fn capacity(&self) -> usize {
        self.cells.len() * MAX_ALIGN
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The address of the first byte, for identity comparisons.
    pub fn as_ptr(&self) -> *const u8 {
        self.cells.as_ptr() as *const u8
    }

    /// View the requested bytes as shared-mutable texels.
    pub fn as_cells<P>(&self, texel: Texel<P>) -> &[Cell<P>] {
        let cells = texel.cast_cells(&self.cells);
        &cells[..texel.count_in(self.size)]
    }

    /// View the requested bytes as a mutable slice of texels.
    pub fn as_mut_slice<P>(&mut self, texel: Texel<P>) -> &mut [P] {
        let count = texel.count_in(self.size);
        let slice = texel.cast_cells_mut(&mut self.cells);
        &mut slice[..count]
    }

    fn cell_len(size: usize) -> usize {
        const CHUNK_SIZE: usize = mem::size_of::<MaxAligned>();
        assert!(CHUNK_SIZE > 1);
        size / CHUNK_SIZE + usize::from(size % CHUNK_SIZE != 0)
    }
}

impl Default for Block {
    fn default() -> Self {
        Block::empty()
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Block")
            .field("size", &self.size)
            .field("capacity", &self.capacity())
            .field("ptr", &self.as_ptr())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texels::{F64, U16, U8};

    #[test]
    fn rounded_to_chunks() {
        let block = Block::new(MAX_ALIGN + 1);
        assert_eq!(block.size(), MAX_ALIGN + 1);
        assert_eq!(block.capacity(), 2 * MAX_ALIGN);
        assert_eq!(block.as_cells(U8).len(), MAX_ALIGN + 1);
    }

    #[test]
    fn aligned_start() {
        let block = Block::new(17);
        assert_eq!(block.as_ptr() as usize % MAX_ALIGN, 0);
        assert_eq!(block.as_cells(F64).len(), 2);
    }

    #[test]
    fn shared_writes_visible() {
        let block = Block::new(8);
        let a = block.as_cells(U16);
        let b = block.as_cells(U16);
        a[3].set(0xbeef);
        assert_eq!(b[3].get(), 0xbeef);
        let bytes = block.as_cells(U8);
        assert_eq!([bytes[6].get(), bytes[7].get()], 0xbeef_u16.to_ne_bytes());
    }
}
