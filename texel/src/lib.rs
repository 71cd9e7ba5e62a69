// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! # Texel
//!
//! Untyped, maximally aligned storage for pixel buffers.
//!
//! Image buffers hold samples of many types: 8- and 16-bit integers from sensors and codecs,
//! 32-bit floats in processing pipelines. The storage itself need not care. A [`Block`] is a
//! byte-sized allocation aligned for every supported sample type, and a [`Texel`] witness
//! reinterprets it as a slice of samples without copying.
//!
//! This library is strictly `no_std` and only depends on `alloc`.
//!
//! ## Usage
//!
//! ```
//! use planebuf_texel::{AsTexel, Block};
//!
//! let mut block = Block::new(64);
//! block.as_mut_slice(u16::texel())[0] = 0x3ff;
//!
//! // Shared views write through cells.
//! let samples = block.as_cells(u16::texel());
//! samples[1].set(samples[0].get() >> 2);
//! assert_eq!(samples.len(), 32);
//! assert_eq!(samples[1].get(), 0xff);
//! ```
// Be std for doctests, avoids a weird warning about missing allocator.
#![cfg_attr(not(doctest), no_std)]
// The only module allowed to be `unsafe` is `texel`. It owns the reinterpretation of aligned
// cells as typed samples.
#![deny(unsafe_code)]
extern crate alloc;

mod buf;
mod texel;

pub use self::buf::Block;
pub use self::texel::{AsTexel, Texel};

/// Constants for predefined texel types.
///
/// Holding an instance of `Texel<T>` certifies that the type `T` is compatible with the texel
/// concept, that is: its alignment requirement is *small* enough, its size is non-zero, it does
/// not contain any padding, and it is a plain old data type without any inner invariants.
///
/// # Extending
///
/// The recommended method of extending this with a custom type is by implementing `bytemuck::Pod`
/// for this type. This applies a number of consistency checks.
///
/// ```rust
/// use bytemuck::{Pod, Zeroable};
/// use planebuf_texel::{AsTexel, Texel};
///
/// #[derive(Clone, Copy, Pod, Zeroable)]
/// #[repr(C)]
/// struct Half(pub u16);
///
/// impl AsTexel for Half {
///     fn texel() -> Texel<Half> {
///         Texel::for_type().expect("verified by bytemuck and planebuf_texel")
///     }
/// }
/// ```
pub mod texels {
    pub use crate::texel::constants::*;
    pub use crate::texel::{MaxAligned, MaxCell};
}
