//! Owned contiguous allocation with explicit capacity.
//!
//! [`RawBuf`] owns exactly one heap allocation sized for `capacity`
//! elements of `T`. It knows nothing about which slots are initialized:
//! the owner tracks the live prefix and drops elements itself. Dropping a
//! `RawBuf` only releases the memory.

use core::mem::size_of;
use core::ptr::{self, NonNull};
use std::alloc::{Layout, alloc, dealloc};
use std::marker::PhantomData;

use crate::ContainerError;

pub(crate) struct RawBuf<T> {
    /// Dangling (never dereferenced) when no allocation exists.
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

impl<T> RawBuf<T> {
    const IS_ZST: bool = size_of::<T>() == 0;

    /// An unallocated buffer with zero capacity.
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates room for exactly `cap` elements.
    ///
    /// # Errors
    ///
    /// `LengthError` if `cap` exceeds [`max_size`](Self::max_size),
    /// `AllocationError` if the allocator returns null.
    pub(crate) fn with_capacity(cap: usize) -> Result<Self, ContainerError> {
        let max = Self::max_size();
        if cap > max {
            return Err(ContainerError::LengthError {
                requested: cap,
                max,
            });
        }

        if cap == 0 || Self::IS_ZST {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap,
                _marker: PhantomData,
            });
        }

        let layout = Layout::array::<T>(cap).map_err(|_| ContainerError::LengthError {
            requested: cap,
            max,
        })?;

        // Safety: layout has non-zero size (cap > 0, T is not zero-sized)
        let ptr = unsafe { alloc(layout) } as *mut T;
        let ptr = NonNull::new(ptr).ok_or(ContainerError::AllocationError { requested: cap })?;

        Ok(Self {
            ptr,
            cap,
            _marker: PhantomData,
        })
    }

    /// Largest element count whose byte size fits in an allocation.
    #[inline]
    pub(crate) const fn max_size() -> usize {
        if Self::IS_ZST {
            usize::MAX
        } else {
            isize::MAX as usize / size_of::<T>()
        }
    }

    #[inline]
    pub(crate) const fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub(crate) const fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Moves the first `len` elements into a fresh allocation of exactly
    /// `new_cap` slots and releases the old one.
    ///
    /// The new buffer is acquired before anything is moved, so on error
    /// `self` is untouched.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` must be initialized and `len <= new_cap`.
    pub(crate) unsafe fn relocate(
        &mut self,
        len: usize,
        new_cap: usize,
    ) -> Result<(), ContainerError> {
        debug_assert!(len <= new_cap);

        let mut fresh = Self::with_capacity(new_cap)?;

        // Safety: both buffers hold at least `len` slots and never overlap;
        // the moved-from slots are treated as uninitialized afterwards.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr(), fresh.ptr(), len);
        }

        trace_relocate::<T>(self.cap, new_cap);

        core::mem::swap(self, &mut fresh);
        // `fresh` now owns the old allocation, freed on drop
        Ok(())
    }

    /// Releases the allocation, leaving an empty buffer.
    ///
    /// Elements are not dropped.
    #[inline]
    pub(crate) fn release(&mut self) {
        drop(core::mem::replace(self, Self::new()));
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.cap == 0 || Self::IS_ZST {
            return;
        }

        // Safety: an allocation with this layout was made in `with_capacity`
        unsafe {
            let layout = Layout::array::<T>(self.cap).unwrap_unchecked();
            dealloc(self.ptr.as_ptr() as *mut u8, layout);
        }
    }
}

// Safety: RawBuf uniquely owns its allocation
unsafe impl<T: Send> Send for RawBuf<T> {}
unsafe impl<T: Sync> Sync for RawBuf<T> {}

#[inline]
fn trace_relocate<T>(old_cap: usize, new_cap: usize) {
    #[cfg(feature = "tracing")]
    tracing::trace!(
        target: "nexus_containers::raw",
        old_cap,
        new_cap,
        elem_size = size_of::<T>(),
        "relocated buffer"
    );

    #[cfg(not(feature = "tracing"))]
    let _ = (old_cap, new_cap);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_unallocated() {
        let buf: RawBuf<u64> = RawBuf::new();
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn with_capacity_exact() {
        let buf: RawBuf<u64> = RawBuf::with_capacity(7).unwrap();
        assert_eq!(buf.capacity(), 7);
    }

    #[test]
    fn over_max_is_length_error() {
        let max = RawBuf::<u64>::max_size();
        let err = RawBuf::<u64>::with_capacity(max + 1).err();
        assert_eq!(
            err,
            Some(ContainerError::LengthError {
                requested: max + 1,
                max,
            })
        );
    }

    #[test]
    fn zst_never_allocates() {
        let buf: RawBuf<()> = RawBuf::with_capacity(1 << 40).unwrap();
        assert_eq!(buf.capacity(), 1 << 40);
        assert_eq!(RawBuf::<()>::max_size(), usize::MAX);
    }

    #[test]
    fn relocate_preserves_prefix() {
        let mut buf: RawBuf<u32> = RawBuf::with_capacity(2).unwrap();
        unsafe {
            buf.ptr().write(10);
            buf.ptr().add(1).write(20);
            buf.relocate(2, 8).unwrap();
            assert_eq!(buf.capacity(), 8);
            assert_eq!(*buf.ptr(), 10);
            assert_eq!(*buf.ptr().add(1), 20);
        }
    }

    #[test]
    fn failed_relocate_leaves_buffer() {
        let mut buf: RawBuf<u64> = RawBuf::with_capacity(1).unwrap();
        unsafe {
            buf.ptr().write(5);
            assert!(buf.relocate(1, usize::MAX).is_err());
            assert_eq!(buf.capacity(), 1);
            assert_eq!(*buf.ptr(), 5);
        }
    }

    #[test]
    fn release_resets_capacity() {
        let mut buf: RawBuf<u8> = RawBuf::with_capacity(32).unwrap();
        buf.release();
        assert_eq!(buf.capacity(), 0);
    }
}
