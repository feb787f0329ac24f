//! Low-level primitives for typed views over arena bytes.
//!
//! This is the only module in `strata-arena` allowed to contain `unsafe`.
//! It holds the [`Pod`] marker and the two casts that reinterpret an
//! aligned byte range as a slice of `Pod` elements. Every other module
//! works purely in offsets and byte slices.

#![allow(unsafe_code)]

use std::mem::{align_of, size_of};

/// Plain-old-data element types that may live inside an arena.
///
/// # Safety
///
/// Implementors must be `Copy`, contain no padding bytes and no pointers,
/// and every bit pattern (in particular all-zero) must be a valid value.
/// The arena hands out zero-filled memory and reinterprets raw bytes as
/// `Self`, so any type violating this contract causes undefined behaviour.
pub unsafe trait Pod: Copy + 'static {}

macro_rules! impl_pod {
    ($($t:ty),* $(,)?) => {
        $(
            // SAFETY: primitive integers and floats have no padding and accept
            // every bit pattern.
            unsafe impl Pod for $t {}
        )*
    };
}

impl_pod!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

// SAFETY: an array of `Pod` has no padding between elements and inherits
// the element's bit-pattern validity.
unsafe impl<T: Pod, const N: usize> Pod for [T; N] {}

/// Reinterpret `bytes` as a slice of `T`.
///
/// Returns `None` if the start address is not aligned for `T` or the length
/// is not a whole number of elements.
pub(crate) fn cast_slice<T: Pod>(bytes: &[u8]) -> Option<&[T]> {
    let size = size_of::<T>();
    if size == 0 || bytes.len() % size != 0 || (bytes.as_ptr() as usize) % align_of::<T>() != 0 {
        return None;
    }
    // SAFETY: the pointer is non-null, aligned for `T` (checked above), and
    // covers exactly `len / size` elements of initialised memory. `T: Pod`
    // guarantees every bit pattern is a valid `T`. The lifetime is tied to
    // the input borrow.
    Some(unsafe { std::slice::from_raw_parts(bytes.as_ptr().cast::<T>(), bytes.len() / size) })
}

/// Mutable counterpart of [`cast_slice`].
pub(crate) fn cast_slice_mut<T: Pod>(bytes: &mut [u8]) -> Option<&mut [T]> {
    let size = size_of::<T>();
    if size == 0
        || bytes.len() % size != 0
        || (bytes.as_mut_ptr() as usize) % align_of::<T>() != 0
    {
        return None;
    }
    let len = bytes.len() / size;
    // SAFETY: same argument as `cast_slice`; the exclusive borrow of `bytes`
    // is transferred to the returned slice so no aliasing is introduced.
    Some(unsafe { std::slice::from_raw_parts_mut(bytes.as_mut_ptr().cast::<T>(), len) })
}

/// View a slice of `T` as its underlying bytes.
pub(crate) fn as_bytes<T: Pod>(values: &[T]) -> &[u8] {
    let len = std::mem::size_of_val(values);
    // SAFETY: `T: Pod` has no padding, so every byte of the slice is
    // initialised. `u8` has alignment 1 and the length is exact.
    unsafe { std::slice::from_raw_parts(values.as_ptr().cast::<u8>(), len) }
}
