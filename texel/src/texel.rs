// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
#![allow(unsafe_code)]

use core::cell::Cell;
use core::marker::PhantomData;
use core::{fmt, mem, slice};

/// Marker struct to denote a texel type.
///
/// Can be constructed only for types that have expected alignment and no byte invariants. It
/// always implements `Copy` and `Clone`, regardless of the underlying type and is zero-sized.
///
/// This is the central encapsulation of unsafety in this crate. Holding a `Texel<P>` certifies
/// that any maximally aligned block of bytes can be reinterpreted as a slice of `P`, which is what
/// lets a single untyped [`Block`] back images of any sample type.
///
/// [`Block`]: crate::Block
pub struct Texel<P: ?Sized>(PhantomData<P>);

/// Describes a type which can represent a `Texel` and for which this is statically known.
pub trait AsTexel {
    /// Get the texel struct for this type.
    fn texel() -> Texel<Self>;
}

/// A chunk of bytes with the largest alignment any sample type needs on this target.
#[derive(Clone, Copy)]
#[cfg_attr(any(target_arch = "x86", target_arch = "x86_64"), repr(C, align(32)))]
#[cfg_attr(
    any(target_arch = "arm", target_arch = "aarch64", target_arch = "wasm32"),
    repr(C, align(16))
)]
#[cfg_attr(
    not(any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "arm",
        target_arch = "aarch64",
        target_arch = "wasm32"
    )),
    repr(C, align(8))
)]
pub struct MaxAligned(pub(crate) [u8; MAX_ALIGN]);

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) const MAX_ALIGN: usize = 32;

#[cfg(any(target_arch = "arm", target_arch = "aarch64", target_arch = "wasm32"))]
pub(crate) const MAX_ALIGN: usize = 16;

#[cfg(not(any(
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "arm",
    target_arch = "aarch64",
    target_arch = "wasm32"
)))]
pub(crate) const MAX_ALIGN: usize = 8;

const _: () = assert!(core::mem::align_of::<MaxAligned>() == MAX_ALIGN);

unsafe impl bytemuck::Zeroable for MaxAligned {}
unsafe impl bytemuck::Pod for MaxAligned {}

impl MaxAligned {
    pub(crate) const ZERO: Self = MaxAligned([0; MAX_ALIGN]);
}

/// A maximally aligned unit of shared-mutable storage.
///
/// Blocks are slices of these. Since every byte sits behind a `Cell`, a shared reference to a
/// block can hand out `&[Cell<P>]` for any texel `P` and several views may write the same memory.
#[repr(transparent)]
pub struct MaxCell(Cell<MaxAligned>);

impl MaxCell {
    pub const fn zero() -> Self {
        MaxCell(Cell::new(MaxAligned::ZERO))
    }
}

impl Clone for MaxCell {
    fn clone(&self) -> Self {
        MaxCell(Cell::new(self.0.get()))
    }
}

/// Witnesses for the primitive sample types, checked at compile time.
pub(crate) mod constants {
    use super::{AsTexel, MaxAligned, Texel};

    macro_rules! builtin_texels {
        ($($name:ident: $ty:ty),* $(,)?) => {
            $(
                pub const $name: Texel<$ty> = {
                    assert!(Texel::<$ty>::check_invariants());
                    Texel(core::marker::PhantomData)
                };

                impl AsTexel for $ty {
                    fn texel() -> Texel<Self> {
                        $name
                    }
                }
            )*
        };
    }

    builtin_texels! {
        I8: i8,
        U8: u8,
        I16: i16,
        U16: u16,
        I32: i32,
        U32: u32,
        F32: f32,
        F64: f64,
        MAX: MaxAligned,
    }
}

impl<P: bytemuck::Pod> Texel<P> {
    /// The witness for `P`, if its size and alignment allow reinterpreting blocks as `P`.
    pub fn for_type() -> Option<Self> {
        if Texel::<P>::check_invariants() {
            Some(Texel(PhantomData))
        } else {
            None
        }
    }
}

impl<P> Texel<P> {
    /// Whether `P` fits the texel requirements that can be checked at compile time.
    ///
    /// Padding cannot be detected here, that is what the `Pod` bound of [`Texel::for_type`] is for.
    pub(crate) const fn check_invariants() -> bool {
        mem::align_of::<P>() <= MAX_ALIGN && mem::size_of::<P>() > 0 && !mem::needs_drop::<P>()
    }

    pub const fn align(self) -> usize {
        mem::align_of::<P>()
    }

    pub const fn size(self) -> usize {
        mem::size_of::<P>()
    }

    /// Number of whole texels that fit into `bytes`.
    pub const fn count_in(self, bytes: usize) -> usize {
        // Never zero, see `check_invariants`.
        bytes / self.size()
    }

    /// Reinterpret maximally aligned cells as a slice of texel cells.
    ///
    /// The result covers as many whole texels as fit into the cells.
    pub fn cast_cells<'buf>(self, cells: &'buf [MaxCell]) -> &'buf [Cell<P>] {
        let len = self.count_in(mem::size_of_val(cells));
        debug_assert_eq!(cells.as_ptr() as usize % mem::align_of::<P>(), 0);
        // Safety:
        // * `MaxCell` is a transparent `Cell<MaxAligned>` and `Cell<P>` has the layout of `P`.
        // * both sides are shared-mutable, no `&P` into the cells is ever created.
        // * `len` texels fit into the byte size of `cells`.
        // * every bit pattern is a valid `P`, and its alignment is at most `MAX_ALIGN`, both
        //   certified by the existence of `self`.
        unsafe { slice::from_raw_parts(cells.as_ptr() as *const Cell<P>, len) }
    }

    /// Reinterpret exclusively borrowed cells as a mutable slice of texels.
    pub fn cast_cells_mut<'buf>(self, cells: &'buf mut [MaxCell]) -> &'buf mut [P] {
        let len = self.count_in(mem::size_of_val(cells));
        debug_assert_eq!(cells.as_ptr() as usize % mem::align_of::<P>(), 0);
        // Safety: as in `cast_cells`, with the unique borrow of `cells` held for `'buf`.
        unsafe { slice::from_raw_parts_mut(cells.as_mut_ptr() as *mut P, len) }
    }
}

impl<P> Clone for Texel<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Texel<P> {}

impl<P> PartialEq for Texel<P> {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl<P> Eq for Texel<P> {}

impl<P> fmt::Debug for Texel<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Texel")
            .field("size", &self.size())
            .field("align", &self.align())
            .finish()
    }
}
