//! Growable contiguous array with observable capacity.
//!
//! [`DynArray`] manages its own buffer instead of delegating to `Vec`, so
//! the growth contract is explicit and testable:
//!
//! - Appending at capacity doubles the capacity (`max(1, cap * 2)`), giving
//!   amortized O(1) `push_back`.
//! - `clear` and `pop_back` never release memory.
//! - `reserve(n)` with `n <= capacity()` does nothing.
//! - Reallocation acquires the new buffer before touching any element, so a
//!   failed growth leaves the array exactly as it was.
//!
//! # Example
//!
//! ```
//! use nexus_containers::DynArray;
//!
//! let mut arr = DynArray::from([1, 2, 3]);
//! assert_eq!(arr.capacity(), 3);
//!
//! arr.push_back(4);
//! assert_eq!(arr.capacity(), 6);
//! assert_eq!(arr, [1, 2, 3, 4]);
//!
//! assert_eq!(arr.erase(1), Ok(2));
//! assert_eq!(arr, [1, 3, 4]);
//! assert_eq!(arr.capacity(), 6);
//! ```
//!
//! # Positions and Invalidation
//!
//! Positions are plain indices. Shared and mutable borrows obtained from
//! [`iter`](DynArray::iter), [`as_slice`](DynArray::as_slice) or indexing
//! cannot outlive a mutation; the borrow checker rejects that statically.
//! Raw pointers from [`as_ptr`](DynArray::as_ptr) are not tracked: any
//! reallocating call (`insert`/`push_back` at capacity, `reserve`,
//! `shrink_to_fit`) invalidates all of them, and `erase`/`pop_back`
//! invalidate those at or after the removal point.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::mem::ManuallyDrop;
use core::ops::{Index, IndexMut};
use core::ptr;
use core::slice;

use crate::{ContainerError, Rejected};
use crate::raw::RawBuf;

/// A contiguous growable array that owns its elements.
///
/// See the [module documentation](self) for the growth contract.
pub struct DynArray<T> {
    buf: RawBuf<T>,
    len: usize,
}

impl<T> DynArray<T> {
    /// Creates an empty array without allocating.
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    /// Creates an empty array with capacity for exactly `capacity` elements.
    ///
    /// # Errors
    ///
    /// `LengthError` if `capacity` exceeds [`max_size`](Self::max_size),
    /// `AllocationError` if the allocator fails.
    pub fn with_capacity(capacity: usize) -> Result<Self, ContainerError> {
        Ok(Self {
            buf: RawBuf::with_capacity(capacity)?,
            len: 0,
        })
    }

    /// Creates an array of `n` default values with capacity exactly `n`.
    ///
    /// # Errors
    ///
    /// `AllocationError` if `n` exceeds [`max_size`](Self::max_size) or the
    /// allocator fails.
    ///
    /// ```
    /// use nexus_containers::DynArray;
    ///
    /// let arr: DynArray<u32> = DynArray::with_len(4).unwrap();
    /// assert_eq!(arr, [0, 0, 0, 0]);
    /// assert_eq!(arr.capacity(), 4);
    /// ```
    pub fn with_len(n: usize) -> Result<Self, ContainerError>
    where
        T: Default,
    {
        let mut arr = Self::with_capacity(n).map_err(|err| match err {
            ContainerError::LengthError { requested, .. } => {
                ContainerError::AllocationError { requested }
            }
            other => other,
        })?;

        for _ in 0..n {
            // Safety: capacity is exactly n
            unsafe { arr.push_unchecked(T::default()) };
        }
        Ok(arr)
    }

    // ========================================================================
    // Capacity
    // ========================================================================

    /// Returns the number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the buffer can hold without
    /// reallocating.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Largest element count an array of `T` can address.
    ///
    /// `isize::MAX / size_of::<T>()`, or `usize::MAX` for zero-sized types.
    #[inline]
    pub const fn max_size(&self) -> usize {
        RawBuf::<T>::max_size()
    }

    /// Grows the capacity to exactly `n` if `n > capacity()`.
    ///
    /// A request at or below the current capacity is a no-op.
    ///
    /// # Errors
    ///
    /// `LengthError` if `n` exceeds [`max_size`](Self::max_size),
    /// `AllocationError` if the allocator fails. The array is unchanged on
    /// error.
    pub fn reserve(&mut self, n: usize) -> Result<(), ContainerError> {
        if n <= self.capacity() {
            return Ok(());
        }
        // Safety: the first `len` slots are initialized and len < n
        unsafe { self.buf.relocate(self.len, n) }
    }

    /// Reallocates so that `capacity() == len()`.
    ///
    /// Releases the buffer entirely when the array is empty. No-op if the
    /// buffer is already tight.
    ///
    /// # Errors
    ///
    /// `AllocationError` if the allocator fails; the array is unchanged.
    pub fn shrink_to_fit(&mut self) -> Result<(), ContainerError> {
        if self.len == self.capacity() {
            return Ok(());
        }
        if self.len == 0 {
            self.buf.release();
            return Ok(());
        }
        // Safety: the first `len` slots are initialized
        unsafe { self.buf.relocate(self.len, self.len) }
    }

    // ========================================================================
    // Element access
    // ========================================================================

    /// Returns a reference to the element at `pos`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `pos >= len()`.
    #[inline]
    pub fn at(&self, pos: usize) -> Result<&T, ContainerError> {
        let len = self.len;
        self.as_slice()
            .get(pos)
            .ok_or(ContainerError::OutOfRange { pos, len })
    }

    /// Returns a mutable reference to the element at `pos`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `pos >= len()`.
    #[inline]
    pub fn at_mut(&mut self, pos: usize) -> Result<&mut T, ContainerError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(pos)
            .ok_or(ContainerError::OutOfRange { pos, len })
    }

    /// Returns a reference to the element at `pos`, or `None` if out of range.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<&T> {
        self.as_slice().get(pos)
    }

    /// Returns a mutable reference to the element at `pos`, or `None`.
    #[inline]
    pub fn get_mut(&mut self, pos: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(pos)
    }

    /// Returns a reference without bounds checking.
    ///
    /// # Safety
    ///
    /// `pos` must be less than `len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, pos: usize) -> &T {
        debug_assert!(pos < self.len);
        unsafe { &*self.buf.ptr().add(pos) }
    }

    /// Returns a mutable reference without bounds checking.
    ///
    /// # Safety
    ///
    /// `pos` must be less than `len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, pos: usize) -> &mut T {
        debug_assert!(pos < self.len);
        unsafe { &mut *self.buf.ptr().add(pos) }
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if the array is empty.
    #[inline]
    pub fn front(&self) -> Result<&T, ContainerError> {
        self.as_slice().first().ok_or(ContainerError::EmptyContainer)
    }

    /// Returns the first element mutably.
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if the array is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T, ContainerError> {
        self.as_mut_slice()
            .first_mut()
            .ok_or(ContainerError::EmptyContainer)
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if the array is empty.
    #[inline]
    pub fn back(&self) -> Result<&T, ContainerError> {
        self.as_slice().last().ok_or(ContainerError::EmptyContainer)
    }

    /// Returns the last element mutably.
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if the array is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T, ContainerError> {
        self.as_mut_slice()
            .last_mut()
            .ok_or(ContainerError::EmptyContainer)
    }

    /// Raw pointer to the buffer.
    ///
    /// Dangling (but aligned) when `capacity() == 0`. Invalidated by any
    /// reallocating call.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Mutable raw pointer to the buffer.
    ///
    /// Same validity rules as [`as_ptr`](Self::as_ptr).
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    /// Views the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // Safety: [0, len) is initialized; the pointer is aligned and
        // non-null even when unallocated
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// Views the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: as for `as_slice`, and `&mut self` guarantees uniqueness
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    /// Returns an iterator over references, front to back.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns an iterator over mutable references, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Inserts `value` before the element at `pos`, or at the end when
    /// `pos == len()`.
    ///
    /// Grows to `max(1, capacity() * 2)` first if the array is full.
    /// Elements in `[pos, len)` shift one slot right. Returns `pos`, which
    /// now refers to the inserted element.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `pos > len()`; `LengthError` or `AllocationError` if
    /// growth fails. The array is unchanged and `value` comes back inside
    /// the [`Rejected`].
    pub fn insert(&mut self, pos: usize, value: T) -> Result<usize, Rejected<T>> {
        let len = self.len;
        if pos > len {
            return Err(Rejected {
                value,
                error: ContainerError::OutOfRange { pos, len },
            });
        }

        if len == self.capacity() {
            if let Err(error) = self.grow_one() {
                return Err(Rejected { value, error });
            }
        }

        // Safety: capacity > len after growth; [pos, len) is initialized
        // and moves into [pos + 1, len + 1), then slot `pos` is rewritten
        unsafe {
            let slot = self.buf.ptr().add(pos);
            if pos < len {
                ptr::copy(slot, slot.add(1), len - pos);
            }
            slot.write(value);
        }
        self.len = len + 1;

        Ok(pos)
    }

    /// Removes and returns the element at `pos`, shifting the tail left.
    ///
    /// Capacity is unchanged.
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if the array is empty, `OutOfRange` if
    /// `pos >= len()`.
    pub fn erase(&mut self, pos: usize) -> Result<T, ContainerError> {
        let len = self.len;
        if len == 0 {
            return Err(ContainerError::EmptyContainer);
        }
        if pos >= len {
            return Err(ContainerError::OutOfRange { pos, len });
        }

        // Safety: pos < len; the value is read out before its slot is
        // overwritten by the shifted tail
        let value = unsafe {
            let slot = self.buf.ptr().add(pos);
            let value = slot.read();
            ptr::copy(slot.add(1), slot, len - pos - 1);
            value
        };
        self.len = len - 1;

        Ok(value)
    }

    /// Appends `value` to the back, doubling the capacity when full.
    ///
    /// # Panics
    ///
    /// Panics if the capacity cannot grow (length overflow or allocator
    /// failure). Use [`try_push_back`](Self::try_push_back) to handle that.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        if let Err(rejected) = self.try_push_back(value) {
            capacity_failure(rejected.error);
        }
    }

    /// Appends `value` to the back, doubling the capacity when full.
    ///
    /// # Errors
    ///
    /// `LengthError` or `AllocationError` if growth fails. The array is
    /// unchanged and `value` comes back inside the [`Rejected`].
    #[inline]
    pub fn try_push_back(&mut self, value: T) -> Result<(), Rejected<T>> {
        if self.len == self.capacity() {
            if let Err(error) = self.grow_one() {
                return Err(Rejected { value, error });
            }
        }
        // Safety: len < capacity
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Removes and returns the last element. Capacity is unchanged.
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if the array is empty; nothing changes.
    #[inline]
    pub fn pop_back(&mut self) -> Result<T, ContainerError> {
        if self.len == 0 {
            return Err(ContainerError::EmptyContainer);
        }
        self.len -= 1;
        // Safety: slot `len` was initialized and is now outside the live prefix
        Ok(unsafe { self.buf.ptr().add(self.len).read() })
    }

    /// Drops every element past the first `len`. Capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = ptr::slice_from_raw_parts_mut(
            // Safety: len < self.len <= capacity
            unsafe { self.buf.ptr().add(len) },
            self.len - len,
        );
        // Shrink first so a panicking destructor cannot cause a double drop
        self.len = len;
        // Safety: the tail was initialized and is no longer reachable
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Drops all elements, keeping the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Exchanges buffers, lengths and capacities with `other` in O(1).
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// Moves the contents out, leaving `self` empty with no allocation.
    ///
    /// ```
    /// use nexus_containers::DynArray;
    ///
    /// let mut src = DynArray::from([1, 2, 3]);
    /// let dst = src.take();
    ///
    /// assert_eq!(dst, [1, 2, 3]);
    /// assert!(src.is_empty());
    /// assert_eq!(src.capacity(), 0);
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    // ========================================================================
    // Internal
    // ========================================================================

    /// Doubles the capacity (minimum 1), clamped to `max_size`.
    fn grow_one(&mut self) -> Result<(), ContainerError> {
        let cap = self.capacity();
        let max = RawBuf::<T>::max_size();
        if cap == max {
            return Err(ContainerError::LengthError {
                requested: cap.saturating_add(1),
                max,
            });
        }

        let new_cap = cap.saturating_mul(2).clamp(1, max);
        // Safety: the first `len` slots are initialized and len <= cap < new_cap
        unsafe { self.buf.relocate(self.len, new_cap) }
    }

    /// # Safety
    ///
    /// `len` must be less than `capacity()`.
    #[inline]
    unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        unsafe { self.buf.ptr().add(self.len).write(value) };
        self.len += 1;
    }
}

#[cold]
#[inline(never)]
fn capacity_failure(err: ContainerError) -> ! {
    panic!("DynArray capacity failure: {err}")
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        // Safety: [0, len) is initialized; `buf` frees the memory afterwards
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr(), self.len));
        }
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynArray<T> {
    /// Deep copy with the same capacity as `self`.
    ///
    /// If an element's `clone` panics, the clones made so far are dropped
    /// and `self` is untouched.
    fn clone(&self) -> Self {
        let mut out =
            Self::with_capacity(self.capacity()).unwrap_or_else(|err| capacity_failure(err));
        for item in self.iter() {
            // Safety: out.capacity() == self.capacity() >= self.len
            unsafe { out.push_unchecked(item.clone()) };
        }
        out
    }

    /// Reuses `self`'s buffer when it can hold `source.capacity()` elements.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        if let Err(err) = self.reserve(source.capacity()) {
            capacity_failure(err);
        }
        for item in source.iter() {
            // Safety: reserved at least source.capacity() >= source.len
            unsafe { self.push_unchecked(item.clone()) };
        }
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {
    /// Builds an array whose length and capacity both equal `N`.
    fn from(items: [T; N]) -> Self {
        let mut arr = Self::with_capacity(N).unwrap_or_else(|err| capacity_failure(err));
        for item in items {
            // Safety: capacity is exactly N
            unsafe { arr.push_unchecked(item) };
        }
        arr
    }
}

impl<T: Clone> From<&[T]> for DynArray<T> {
    fn from(items: &[T]) -> Self {
        let mut arr =
            Self::with_capacity(items.len()).unwrap_or_else(|err| capacity_failure(err));
        for item in items {
            // Safety: capacity is exactly items.len()
            unsafe { arr.push_unchecked(item.clone()) };
        }
        arr
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(*item);
        }
    }
}

impl<T> Index<usize> for DynArray<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `pos >= len()`. Use [`DynArray::at`] for a checked
    /// `Result` or [`DynArray::get_unchecked`] to skip the check.
    #[inline]
    fn index(&self, pos: usize) -> &T {
        &self.as_slice()[pos]
    }
}

impl<T> IndexMut<usize> for DynArray<T> {
    #[inline]
    fn index_mut(&mut self, pos: usize) -> &mut T {
        &mut self.as_mut_slice()[pos]
    }
}

impl<T> AsRef<[T]> for DynArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynArray<T> {
    /// Compares elements only; capacity is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T: PartialEq> PartialEq<[T]> for DynArray<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for DynArray<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Hash> Hash for DynArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let mut this = ManuallyDrop::new(self);
        let end = this.len;
        // The placeholder left behind owns no allocation
        let buf = core::mem::replace(&mut this.buf, RawBuf::new());
        IntoIter { buf, start: 0, end }
    }
}

// =============================================================================
// Owning iterator
// =============================================================================

/// Owning iterator over the elements of a [`DynArray`].
///
/// Elements not yielded are dropped with the iterator, then the buffer is
/// released.
pub struct IntoIter<T> {
    buf: RawBuf<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// Returns the elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // Safety: [start, end) is initialized and not yet yielded
        unsafe { slice::from_raw_parts(self.buf.ptr().add(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // Safety: start < end, slot is initialized and yielded exactly once
        let value = unsafe { self.buf.ptr().add(self.start).read() };
        self.start += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // Safety: as in `next`
        Some(unsafe { self.buf.ptr().add(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // Safety: [start, end) still holds unyielded elements
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.ptr().add(self.start),
                self.end - self.start,
            ));
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
