//! Doubly-linked list with individually allocated nodes.
//!
//! Each node is a separate heap allocation. Ownership runs along the `next`
//! chain; `prev` is a non-owning back link. Because nodes never move,
//! relinking operations (splice, merge, sort, reverse) touch only pointers
//! and never clone or reallocate elements.
//!
//! # Example
//!
//! ```
//! use nexus_containers::LinkedSeq;
//!
//! let mut list = LinkedSeq::from([3, 1, 2]);
//! list.push_front(0);
//! list.sort();
//! assert!(list.iter().eq([0, 1, 2, 3].iter()));
//!
//! let mut other = LinkedSeq::from([10, 11]);
//! list.splice(2, &mut other).unwrap();
//! assert!(other.is_empty());
//! assert!(list.iter().eq([0, 1, 10, 11, 2, 3].iter()));
//! ```
//!
//! # Positions
//!
//! O(1) insertion, removal and splicing at a known position go through
//! [`CursorMut`]. A cursor sits on an element or on the past-the-end
//! position between the tail and the head. The index-based
//! [`insert`](LinkedSeq::insert), [`erase`](LinkedSeq::erase) and
//! [`splice`](LinkedSeq::splice) first walk from the nearer end.
//!
//! ```
//! use nexus_containers::LinkedSeq;
//!
//! let mut list = LinkedSeq::from([1, 2, 4]);
//! let mut cursor = list.cursor_front_mut();
//!
//! while let Some(&mut value) = cursor.current() {
//!     if value == 4 {
//!         cursor.insert_before(3);
//!     }
//!     if value == 1 {
//!         cursor.remove_current();
//!     } else {
//!         cursor.move_next();
//!     }
//! }
//!
//! assert!(list.iter().eq([2, 3, 4].iter()));
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem::{self, size_of};
use core::ptr::NonNull;

use crate::{ContainerError, Rejected};

type Link<T> = Option<NonNull<Node<T>>>;

struct Node<T> {
    value: T,
    prev: Link<T>,
    next: Link<T>,
}

impl<T> Node<T> {
    /// Allocates an unlinked node.
    #[inline]
    fn alloc(value: T) -> NonNull<Self> {
        NonNull::from(Box::leak(Box::new(Self {
            value,
            prev: None,
            next: None,
        })))
    }
}

/// A doubly-linked list that owns its elements.
///
/// See the [module documentation](self) for positions and cursors.
pub struct LinkedSeq<T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

impl<T> LinkedSeq<T> {
    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Creates a list of `n` default values.
    ///
    /// # Errors
    ///
    /// `AllocationError` if `n` exceeds [`max_size`](Self::max_size).
    pub fn with_len(n: usize) -> Result<Self, ContainerError>
    where
        T: Default,
    {
        if n > Self::max_nodes() {
            return Err(ContainerError::AllocationError { requested: n });
        }
        let mut list = Self::new();
        for _ in 0..n {
            list.push_back(T::default());
        }
        Ok(list)
    }

    /// Returns the number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Largest node count that fits in the address space.
    #[inline]
    pub const fn max_size(&self) -> usize {
        Self::max_nodes()
    }

    #[inline]
    const fn max_nodes() -> usize {
        isize::MAX as usize / size_of::<Node<T>>()
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if the list is empty.
    #[inline]
    pub fn front(&self) -> Result<&T, ContainerError> {
        match self.head {
            // Safety: head is a live node owned by this list
            Some(node) => Ok(unsafe { &(*node.as_ptr()).value }),
            None => Err(ContainerError::EmptyContainer),
        }
    }

    /// Returns the first element mutably.
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if the list is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T, ContainerError> {
        match self.head {
            // Safety: head is live, `&mut self` guarantees uniqueness
            Some(node) => Ok(unsafe { &mut (*node.as_ptr()).value }),
            None => Err(ContainerError::EmptyContainer),
        }
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if the list is empty.
    #[inline]
    pub fn back(&self) -> Result<&T, ContainerError> {
        match self.tail {
            // Safety: tail is a live node owned by this list
            Some(node) => Ok(unsafe { &(*node.as_ptr()).value }),
            None => Err(ContainerError::EmptyContainer),
        }
    }

    /// Returns the last element mutably.
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if the list is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T, ContainerError> {
        match self.tail {
            // Safety: tail is live, `&mut self` guarantees uniqueness
            Some(node) => Ok(unsafe { &mut (*node.as_ptr()).value }),
            None => Err(ContainerError::EmptyContainer),
        }
    }

    /// Returns `true` if some element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|item| item == value)
    }

    // ========================================================================
    // Push / pop
    // ========================================================================

    /// Appends `value` to the back.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        // Safety: a fresh node, `None` means the back
        unsafe { self.link_before(None, Node::alloc(value)) };
    }

    /// Prepends `value` to the front.
    #[inline]
    pub fn push_front(&mut self, value: T) {
        let head = self.head;
        // Safety: a fresh node, head belongs to this list
        unsafe { self.link_before(head, Node::alloc(value)) };
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if the list is empty; nothing changes.
    #[inline]
    pub fn pop_back(&mut self) -> Result<T, ContainerError> {
        let node = self.tail.ok_or(ContainerError::EmptyContainer)?;
        // Safety: tail belongs to this list
        Ok(unsafe { self.unlink(node) }.value)
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if the list is empty; nothing changes.
    #[inline]
    pub fn pop_front(&mut self) -> Result<T, ContainerError> {
        let node = self.head.ok_or(ContainerError::EmptyContainer)?;
        // Safety: head belongs to this list
        Ok(unsafe { self.unlink(node) }.value)
    }

    // ========================================================================
    // Positional operations
    // ========================================================================

    /// Inserts `value` before the element at `pos`, or at the back when
    /// `pos == len()`. Returns `pos`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `pos > len()`; `value` comes back inside the
    /// [`Rejected`].
    pub fn insert(&mut self, pos: usize, value: T) -> Result<usize, Rejected<T>> {
        let len = self.len;
        if pos > len {
            return Err(Rejected {
                value,
                error: ContainerError::OutOfRange { pos, len },
            });
        }
        let at = self.node_at(pos);
        // Safety: `at` is a node of this list or `None` for the back
        unsafe { self.link_before(at, Node::alloc(value)) };
        Ok(pos)
    }

    /// Removes and returns the element at `pos`.
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if the list is empty, `OutOfRange` if
    /// `pos >= len()`.
    pub fn erase(&mut self, pos: usize) -> Result<T, ContainerError> {
        let len = self.len;
        if len == 0 {
            return Err(ContainerError::EmptyContainer);
        }
        let Some(node) = self.node_at(pos) else {
            return Err(ContainerError::OutOfRange { pos, len });
        };
        // Safety: node_at only yields nodes of this list
        Ok(unsafe { self.unlink(node) }.value)
    }

    /// Moves every node of `other` before the element at `pos` (or to the
    /// back when `pos == len()`), leaving `other` empty.
    ///
    /// The relink is O(1) once the position is found.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `pos > len()`; neither list changes.
    pub fn splice(&mut self, pos: usize, other: &mut Self) -> Result<(), ContainerError> {
        let len = self.len;
        if pos > len {
            return Err(ContainerError::OutOfRange { pos, len });
        }
        let at = self.node_at(pos);
        // Safety: `at` is a node of this list or `None`
        unsafe { self.splice_before_node(at, other) };
        Ok(())
    }

    /// Moves every node of `other` to the back of `self` in O(1).
    #[inline]
    pub fn append(&mut self, other: &mut Self) {
        // Safety: `None` means the back
        unsafe { self.splice_before_node(None, other) };
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Drops all elements.
    pub fn clear(&mut self) {
        while self.pop_front().is_ok() {}
    }

    /// Exchanges contents with `other` in O(1).
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Moves the contents out, leaving `self` empty.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Reverses the list in place by swapping every node's links.
    pub fn reverse(&mut self) {
        let mut current = self.head;
        while let Some(node) = current {
            // Safety: node belongs to this list
            unsafe {
                let node = &mut *node.as_ptr();
                mem::swap(&mut node.prev, &mut node.next);
                current = node.prev;
            }
        }
        mem::swap(&mut self.head, &mut self.tail);
    }

    /// Removes consecutive duplicates, keeping the first of each run.
    ///
    /// Returns the number of elements removed.
    pub fn unique(&mut self) -> usize
    where
        T: PartialEq,
    {
        self.unique_by(|a, b| a == b)
    }

    /// Removes consecutive elements for which `same(kept, candidate)` holds.
    ///
    /// Returns the number of elements removed.
    pub fn unique_by<F>(&mut self, mut same: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut removed = 0;
        let mut current = self.head;

        while let Some(node) = current {
            // Safety: node and its successor belong to this list
            let next = unsafe { (*node.as_ptr()).next };
            match next {
                Some(candidate)
                    if same(unsafe { &(*node.as_ptr()).value }, unsafe {
                        &(*candidate.as_ptr()).value
                    }) =>
                {
                    drop(unsafe { self.unlink(candidate) });
                    removed += 1;
                }
                _ => current = next,
            }
        }

        removed
    }

    /// Merges the sorted `other` into the sorted `self`, leaving `other`
    /// empty.
    ///
    /// Stable: among equal elements those from `self` come first. Nodes are
    /// relinked, never reallocated.
    pub fn merge(&mut self, other: &mut Self)
    where
        T: Ord,
    {
        self.merge_by(other, T::cmp);
    }

    /// Like [`merge`](Self::merge) with a custom comparison.
    pub fn merge_by<F>(&mut self, other: &mut Self, mut cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut current = self.head;

        while let Some(incoming) = other.head {
            match current {
                // Safety: both nodes are live; `current` belongs to self
                Some(node)
                    if cmp(unsafe { &(*node.as_ptr()).value }, unsafe {
                        &(*incoming.as_ptr()).value
                    }) != Ordering::Greater =>
                {
                    current = unsafe { (*node.as_ptr()).next };
                }
                _ => {
                    // Safety: incoming is other's head; after unlinking it
                    // is owned by nobody until linked into self
                    unsafe {
                        let node = other.detach(incoming);
                        self.link_before(current, node);
                    }
                }
            }
        }
    }

    /// Sorts the list stably in O(n log n) without allocating.
    ///
    /// If the comparison panics the elements are leaked and the list is
    /// left empty.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    /// Like [`sort`](Self::sort) with a custom comparison.
    pub fn sort_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len < 2 {
            return;
        }

        // Detach so a panicking comparison cannot leave a half-sorted chain
        // reachable from `self`
        let mut head = self.head.take();
        self.tail = None;
        let len = mem::replace(&mut self.len, 0);

        // Bottom-up merge over the `next` chain; `prev` is rebuilt after
        let mut width = 1;
        loop {
            let mut remaining = head;
            let mut sorted_head: Link<T> = None;
            let mut sorted_tail: Link<T> = None;
            let mut merges = 0;

            while remaining.is_some() {
                merges += 1;
                let left = remaining;
                // Safety: all runs are disjoint `None`-terminated chains of
                // nodes detached from this list
                let right = unsafe { cut_after(left, width) };
                remaining = unsafe { cut_after(right, width) };
                let (run_head, run_tail) = unsafe { merge_runs(left, right, &mut cmp) };

                match sorted_tail {
                    Some(tail) => unsafe { (*tail.as_ptr()).next = run_head },
                    None => sorted_head = run_head,
                }
                sorted_tail = run_tail;
            }

            head = sorted_head;
            if merges <= 1 {
                break;
            }
            width *= 2;
        }

        // Restore back links
        let mut prev: Link<T> = None;
        let mut current = head;
        while let Some(node) = current {
            // Safety: node is part of the sorted chain
            unsafe {
                (*node.as_ptr()).prev = prev;
                current = (*node.as_ptr()).next;
            }
            prev = Some(node);
        }

        self.head = head;
        self.tail = prev;
        self.len = len;
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over references, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            front: self.head,
            back: self.tail,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over mutable references, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            front: self.head,
            back: self.tail,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns a read-only cursor at the front (past-the-end if empty).
    #[inline]
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        Cursor {
            list: self,
            current: self.head,
            index: 0,
        }
    }

    /// Returns a read-only cursor at the back (past-the-end if empty).
    #[inline]
    pub fn cursor_back(&self) -> Cursor<'_, T> {
        Cursor {
            list: self,
            current: self.tail,
            index: self.len.saturating_sub(1),
        }
    }

    /// Returns a mutable cursor at the front (past-the-end if empty).
    #[inline]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        let head = self.head;
        CursorMut {
            list: self,
            current: head,
            index: 0,
        }
    }

    /// Returns a mutable cursor at the back (past-the-end if empty).
    #[inline]
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T> {
        let tail = self.tail;
        let index = self.len.saturating_sub(1);
        CursorMut {
            list: self,
            current: tail,
            index,
        }
    }

    /// Returns a mutable cursor at the past-the-end position.
    ///
    /// Inserting or splicing "before" this position appends.
    #[inline]
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let index = self.len;
        CursorMut {
            list: self,
            current: None,
            index,
        }
    }

    // ========================================================================
    // Internal linking
    // ========================================================================

    /// Returns the node at `pos`, walking from the nearer end.
    fn node_at(&self, pos: usize) -> Link<T> {
        if pos >= self.len {
            return None;
        }

        // Safety: every step follows links between live nodes of this list
        if pos < self.len / 2 {
            let mut current = self.head;
            for _ in 0..pos {
                current = current.and_then(|node| unsafe { (*node.as_ptr()).next });
            }
            current
        } else {
            let mut current = self.tail;
            for _ in 0..(self.len - 1 - pos) {
                current = current.and_then(|node| unsafe { (*node.as_ptr()).prev });
            }
            current
        }
    }

    /// Links an unlinked `node` before `at`, or at the back when `at` is
    /// `None`.
    ///
    /// # Safety
    ///
    /// `at` must be a node of this list; `node` must be live and unlinked.
    unsafe fn link_before(&mut self, at: Link<T>, node: NonNull<Node<T>>) {
        unsafe {
            let prev = match at {
                Some(at) => (*at.as_ptr()).prev,
                None => self.tail,
            };

            (*node.as_ptr()).prev = prev;
            (*node.as_ptr()).next = at;

            match prev {
                Some(prev) => (*prev.as_ptr()).next = Some(node),
                None => self.head = Some(node),
            }
            match at {
                Some(at) => (*at.as_ptr()).prev = Some(node),
                None => self.tail = Some(node),
            }
        }

        self.len += 1;
    }

    /// Unlinks `node` without freeing it and clears its links.
    ///
    /// # Safety
    ///
    /// `node` must belong to this list.
    unsafe fn detach(&mut self, node: NonNull<Node<T>>) -> NonNull<Node<T>> {
        unsafe {
            let prev = (*node.as_ptr()).prev;
            let next = (*node.as_ptr()).next;

            match prev {
                Some(prev) => (*prev.as_ptr()).next = next,
                None => self.head = next,
            }
            match next {
                Some(next) => (*next.as_ptr()).prev = prev,
                None => self.tail = prev,
            }

            (*node.as_ptr()).prev = None;
            (*node.as_ptr()).next = None;
        }

        self.len -= 1;
        node
    }

    /// Unlinks `node` and takes back ownership of its allocation.
    ///
    /// # Safety
    ///
    /// `node` must belong to this list.
    #[inline]
    unsafe fn unlink(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        unsafe {
            let node = self.detach(node);
            Box::from_raw(node.as_ptr())
        }
    }

    /// Relinks all of `other` before `at` (or at the back) in O(1).
    ///
    /// # Safety
    ///
    /// `at` must be a node of this list or `None`.
    unsafe fn splice_before_node(&mut self, at: Link<T>, other: &mut Self) {
        let (Some(first), Some(last)) = (other.head.take(), other.tail.take()) else {
            return;
        };
        let count = mem::replace(&mut other.len, 0);

        unsafe {
            let prev = match at {
                Some(at) => (*at.as_ptr()).prev,
                None => self.tail,
            };

            (*first.as_ptr()).prev = prev;
            (*last.as_ptr()).next = at;

            match prev {
                Some(prev) => (*prev.as_ptr()).next = Some(first),
                None => self.head = Some(first),
            }
            match at {
                Some(at) => (*at.as_ptr()).prev = Some(last),
                None => self.tail = Some(last),
            }
        }

        self.len += count;
    }
}

/// Splits a `next`-chain after `n` nodes and returns the remainder.
///
/// # Safety
///
/// `start` must head a `None`-terminated chain of live nodes.
unsafe fn cut_after<T>(start: Link<T>, n: usize) -> Link<T> {
    let mut current = start;
    for _ in 1..n {
        match current {
            Some(node) => current = unsafe { (*node.as_ptr()).next },
            None => return None,
        }
    }
    let node = current?;
    unsafe { (*node.as_ptr()).next.take() }
}

/// Merges two sorted `next`-chains, returning the merged head and tail.
///
/// Ties take from `left`, which keeps the sort stable.
///
/// # Safety
///
/// Both chains must be disjoint, `None`-terminated chains of live nodes.
unsafe fn merge_runs<T, F>(mut left: Link<T>, mut right: Link<T>, cmp: &mut F) -> (Link<T>, Link<T>)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut head: Link<T> = None;
    let mut tail: Link<T> = None;

    loop {
        let next = match (left, right) {
            (Some(l), Some(r)) => unsafe {
                if cmp(&(*r.as_ptr()).value, &(*l.as_ptr()).value) == Ordering::Less {
                    right = (*r.as_ptr()).next;
                    r
                } else {
                    left = (*l.as_ptr()).next;
                    l
                }
            },
            (Some(rest), None) | (None, Some(rest)) => {
                match tail {
                    Some(tail) => unsafe { (*tail.as_ptr()).next = Some(rest) },
                    None => head = Some(rest),
                }
                let mut last = rest;
                while let Some(node) = unsafe { (*last.as_ptr()).next } {
                    last = node;
                }
                return (head, Some(last));
            }
            (None, None) => return (head, tail),
        };

        match tail {
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(next) },
            None => head = Some(next),
        }
        tail = Some(next);
    }
}

impl<T> Drop for LinkedSeq<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for LinkedSeq<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedSeq<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for LinkedSeq<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T> FromIterator<T> for LinkedSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinkedSeq<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for LinkedSeq<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(*item);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedSeq<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedSeq<T> {}

impl<T: Hash> Hash for LinkedSeq<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for item in self.iter() {
            item.hash(state);
        }
    }
}

impl<'a, T> IntoIterator for &'a LinkedSeq<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedSeq<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for LinkedSeq<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

// Safety: the list uniquely owns its nodes, like Box<Node<T>>
unsafe impl<T: Send> Send for LinkedSeq<T> {}
unsafe impl<T: Sync> Sync for LinkedSeq<T> {}

// =============================================================================
// Cursors
// =============================================================================

/// A read-only position in a [`LinkedSeq`].
///
/// The position is either an element or the past-the-end slot that sits
/// between the tail and the head.
pub struct Cursor<'a, T> {
    list: &'a LinkedSeq<T>,
    current: Link<T>,
    index: usize,
}

impl<'a, T> Cursor<'a, T> {
    /// Returns the current element, or `None` at past-the-end.
    #[inline]
    pub fn current(&self) -> Option<&'a T> {
        // Safety: current is a live node of the borrowed list
        self.current.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns the current index, or `None` at past-the-end.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.current.map(|_| self.index)
    }

    /// Moves to the next element; from the tail this reaches past-the-end,
    /// and from past-the-end the head.
    #[inline]
    pub fn move_next(&mut self) {
        match self.current {
            Some(node) => {
                // Safety: node is live
                self.current = unsafe { (*node.as_ptr()).next };
                self.index += 1;
            }
            None => {
                self.current = self.list.head;
                self.index = 0;
            }
        }
    }

    /// Moves to the previous element; from the head this reaches
    /// past-the-end, and from past-the-end the tail.
    #[inline]
    pub fn move_prev(&mut self) {
        match self.current {
            Some(node) => {
                // Safety: node is live
                self.current = unsafe { (*node.as_ptr()).prev };
                self.index = match self.current {
                    Some(_) => self.index - 1,
                    None => self.list.len,
                };
            }
            None => {
                self.current = self.list.tail;
                self.index = self.list.len.saturating_sub(1);
            }
        }
    }

    /// Returns the element after the current one without moving.
    #[inline]
    pub fn peek_next(&self) -> Option<&'a T> {
        let next = match self.current {
            // Safety: node is live
            Some(node) => unsafe { (*node.as_ptr()).next },
            None => self.list.head,
        };
        next.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns the element before the current one without moving.
    #[inline]
    pub fn peek_prev(&self) -> Option<&'a T> {
        let prev = match self.current {
            // Safety: node is live
            Some(node) => unsafe { (*node.as_ptr()).prev },
            None => self.list.tail,
        };
        prev.map(|node| unsafe { &(*node.as_ptr()).value })
    }
}

// Safety: a Cursor only hands out shared references, like &LinkedSeq<T>
unsafe impl<T: Sync> Send for Cursor<'_, T> {}
unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            current: self.current,
            index: self.index,
        }
    }
}

/// A position in a [`LinkedSeq`] with O(1) insert, remove and splice.
///
/// Same movement rules as [`Cursor`].
pub struct CursorMut<'a, T> {
    list: &'a mut LinkedSeq<T>,
    current: Link<T>,
    index: usize,
}

impl<T> CursorMut<'_, T> {
    /// Returns the current element, or `None` at past-the-end.
    #[inline]
    pub fn current(&mut self) -> Option<&mut T> {
        // Safety: current is live; the cursor borrows the list uniquely
        self.current.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Returns the current index, or `None` at past-the-end.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.current.map(|_| self.index)
    }

    /// Returns `true` at the past-the-end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// See [`Cursor::move_next`].
    #[inline]
    pub fn move_next(&mut self) {
        match self.current {
            Some(node) => {
                // Safety: node is live
                self.current = unsafe { (*node.as_ptr()).next };
                self.index += 1;
            }
            None => {
                self.current = self.list.head;
                self.index = 0;
            }
        }
    }

    /// See [`Cursor::move_prev`].
    #[inline]
    pub fn move_prev(&mut self) {
        match self.current {
            Some(node) => {
                // Safety: node is live
                self.current = unsafe { (*node.as_ptr()).prev };
                self.index = match self.current {
                    Some(_) => self.index - 1,
                    None => self.list.len,
                };
            }
            None => {
                self.current = self.list.tail;
                self.index = self.list.len.saturating_sub(1);
            }
        }
    }

    /// Returns the element after the current one without moving.
    #[inline]
    pub fn peek_next(&mut self) -> Option<&mut T> {
        let next = match self.current {
            // Safety: node is live
            Some(node) => unsafe { (*node.as_ptr()).next },
            None => self.list.head,
        };
        next.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Inserts `value` before the current element (at the back when at
    /// past-the-end). The cursor stays on the same element.
    #[inline]
    pub fn insert_before(&mut self, value: T) {
        // Safety: current is a node of the list or `None`
        unsafe { self.list.link_before(self.current, Node::alloc(value)) };
        self.index += 1;
    }

    /// Inserts `value` after the current element (at the front when at
    /// past-the-end). The cursor stays on the same element.
    #[inline]
    pub fn insert_after(&mut self, value: T) {
        match self.current {
            Some(node) => {
                // Safety: node is live; its successor is a node or `None`
                let next = unsafe { (*node.as_ptr()).next };
                unsafe { self.list.link_before(next, Node::alloc(value)) };
            }
            None => {
                let head = self.list.head;
                // Safety: head belongs to the list
                unsafe { self.list.link_before(head, Node::alloc(value)) };
                self.index += 1;
            }
        }
    }

    /// Removes the current element and moves to the next one.
    ///
    /// Returns `None` at past-the-end.
    #[inline]
    pub fn remove_current(&mut self) -> Option<T> {
        let node = self.current?;
        // Safety: node is live
        self.current = unsafe { (*node.as_ptr()).next };
        Some(unsafe { self.list.unlink(node) }.value)
    }

    /// Moves all of `other` before the current element in O(1), leaving
    /// `other` empty. The cursor stays on the same element.
    #[inline]
    pub fn splice_before(&mut self, other: &mut LinkedSeq<T>) {
        let count = other.len;
        // Safety: current is a node of the list or `None`
        unsafe { self.list.splice_before_node(self.current, other) };
        self.index += count;
    }
}

// Safety: a CursorMut is a unique borrow of the list, like &mut LinkedSeq<T>
unsafe impl<T: Send> Send for CursorMut<'_, T> {}
unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to list elements.
pub struct Iter<'a, T> {
    front: Link<T>,
    back: Link<T>,
    remaining: usize,
    _marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?;
        // Safety: node is live for the borrow of the list
        let node = unsafe { &*node.as_ptr() };
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?;
        // Safety: node is live for the borrow of the list
        let node = unsafe { &*node.as_ptr() };
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

// Safety: Iter yields shared references only
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

/// Iterator over mutable references to list elements.
pub struct IterMut<'a, T> {
    front: Link<T>,
    back: Link<T>,
    remaining: usize,
    _marker: PhantomData<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?;
        // Safety: each node is visited exactly once, front and back never
        // cross because `remaining` stops them
        let node = unsafe { &mut *node.as_ptr() };
        self.front = node.next;
        self.remaining -= 1;
        Some(&mut node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?;
        // Safety: as in `next`
        let node = unsafe { &mut *node.as_ptr() };
        self.back = node.prev;
        self.remaining -= 1;
        Some(&mut node.value)
    }
}

// Safety: IterMut behaves like &mut T for each yielded element
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over the elements of a [`LinkedSeq`].
pub struct IntoIter<T> {
    list: LinkedSeq<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    fn values<T: Copy>(list: &LinkedSeq<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    /// Walks the back links and checks they mirror the forward chain.
    fn assert_links<T: Copy + PartialEq + fmt::Debug>(list: &LinkedSeq<T>) {
        let forward = values(list);
        let mut backward: Vec<T> = list.iter().rev().copied().collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), list.len());
    }

    #[test]
    fn new_list_is_empty() {
        let list: LinkedSeq<u64> = LinkedSeq::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.front(), Err(ContainerError::EmptyContainer));
        assert_eq!(list.back(), Err(ContainerError::EmptyContainer));
    }

    #[test]
    fn with_len_defaults() {
        let list: LinkedSeq<u32> = LinkedSeq::with_len(3).unwrap();
        assert_eq!(values(&list), vec![0, 0, 0]);
    }

    #[test]
    fn with_len_over_max() {
        let max = LinkedSeq::<u64>::new().max_size();
        assert_eq!(
            LinkedSeq::<u64>::with_len(max + 1).unwrap_err(),
            ContainerError::AllocationError { requested: max + 1 }
        );
    }

    #[test]
    fn push_back_multiple() {
        let mut list = LinkedSeq::new();
        list.push_back(1);
        list.push_back(2);
        list.push_back(3);

        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Ok(&1));
        assert_eq!(list.back(), Ok(&3));
        assert_links(&list);
    }

    #[test]
    fn push_front_multiple() {
        let mut list = LinkedSeq::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);

        // Order should be 3, 2, 1
        assert_eq!(values(&list), vec![3, 2, 1]);
        assert_links(&list);
    }

    #[test]
    fn pop_front_and_back() {
        let mut list = LinkedSeq::from([1, 2, 3]);

        assert_eq!(list.pop_front(), Ok(1));
        assert_eq!(list.pop_back(), Ok(3));
        assert_eq!(list.pop_back(), Ok(2));
        assert_eq!(list.pop_back(), Err(ContainerError::EmptyContainer));
        assert_eq!(list.pop_front(), Err(ContainerError::EmptyContainer));
        assert!(list.is_empty());
    }

    #[test]
    fn front_mut_and_back_mut() {
        let mut list = LinkedSeq::from([1, 2]);
        *list.front_mut().unwrap() = 10;
        *list.back_mut().unwrap() = 20;
        assert_eq!(values(&list), vec![10, 20]);
    }

    #[test]
    fn insert_by_index() {
        let mut list = LinkedSeq::from([1, 3]);

        assert_eq!(list.insert(1, 2), Ok(1));
        assert_eq!(list.insert(0, 0), Ok(0));
        assert_eq!(list.insert(4, 4), Ok(4));
        assert_eq!(
            list.insert(9, 9),
            Err(Rejected {
                value: 9,
                error: ContainerError::OutOfRange { pos: 9, len: 5 },
            })
        );

        assert_eq!(values(&list), vec![0, 1, 2, 3, 4]);
        assert_links(&list);
    }

    #[test]
    fn erase_by_index() {
        let mut list = LinkedSeq::from([1, 2, 3, 4]);

        assert_eq!(list.erase(1), Ok(2));
        assert_eq!(list.erase(2), Ok(4));
        assert_eq!(
            list.erase(2),
            Err(ContainerError::OutOfRange { pos: 2, len: 2 })
        );
        assert_eq!(values(&list), vec![1, 3]);

        let mut empty: LinkedSeq<u8> = LinkedSeq::new();
        assert_eq!(empty.erase(0), Err(ContainerError::EmptyContainer));
    }

    #[test]
    fn insert_then_erase_round_trip() {
        let mut list = LinkedSeq::from([5, 6, 7]);
        list.insert(2, 99).unwrap();
        assert_eq!(list.erase(2), Ok(99));
        assert_eq!(values(&list), vec![5, 6, 7]);
    }

    #[test]
    fn splice_middle() {
        let mut list = LinkedSeq::from([1, 4]);
        let mut other = LinkedSeq::from([2, 3]);

        list.splice(1, &mut other).unwrap();

        assert!(other.is_empty());
        assert_eq!(values(&list), vec![1, 2, 3, 4]);
        assert_links(&list);
    }

    #[test]
    fn splice_front_end_and_empty() {
        let mut list = LinkedSeq::from([2]);
        list.splice(0, &mut LinkedSeq::from([1])).unwrap();
        list.splice(2, &mut LinkedSeq::from([3])).unwrap();
        list.splice(1, &mut LinkedSeq::new()).unwrap();
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_links(&list);

        let mut empty = LinkedSeq::new();
        empty.splice(0, &mut list).unwrap();
        assert_eq!(values(&empty), vec![1, 2, 3]);
        assert!(list.is_empty());
    }

    #[test]
    fn splice_out_of_range_changes_nothing() {
        let mut list = LinkedSeq::from([1]);
        let mut other = LinkedSeq::from([2]);
        assert_eq!(
            list.splice(2, &mut other),
            Err(ContainerError::OutOfRange { pos: 2, len: 1 })
        );
        assert_eq!(other.len(), 1);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn append_moves_all() {
        let mut a = LinkedSeq::from([1, 2]);
        let mut b = LinkedSeq::from([3]);
        a.append(&mut b);
        assert_eq!(values(&a), vec![1, 2, 3]);
        assert!(b.is_empty());
    }

    #[test]
    fn reverse_in_place() {
        let mut list = LinkedSeq::from([1, 2, 3, 4]);
        list.reverse();
        assert_eq!(values(&list), vec![4, 3, 2, 1]);
        assert_eq!(list.front(), Ok(&4));
        assert_eq!(list.back(), Ok(&1));
        assert_links(&list);

        let mut single = LinkedSeq::from([1]);
        single.reverse();
        assert_eq!(values(&single), vec![1]);
    }

    #[test]
    fn unique_removes_runs() {
        let mut list = LinkedSeq::from([1, 1, 2, 3, 3, 3, 1, 1]);
        assert_eq!(list.unique(), 4);
        assert_eq!(values(&list), vec![1, 2, 3, 1]);
        assert_links(&list);
    }

    #[test]
    fn merge_sorted_lists() {
        let mut a = LinkedSeq::from([1, 3, 5, 7]);
        let mut b = LinkedSeq::from([0, 2, 3, 8, 9]);

        a.merge(&mut b);

        assert!(b.is_empty());
        assert_eq!(values(&a), vec![0, 1, 2, 3, 3, 5, 7, 8, 9]);
        assert_links(&a);
    }

    #[test]
    fn merge_is_stable() {
        let mut a = LinkedSeq::from([(1, 'a'), (2, 'a')]);
        let mut b = LinkedSeq::from([(1, 'b'), (2, 'b')]);

        a.merge_by(&mut b, |x, y| x.0.cmp(&y.0));

        assert_eq!(
            values(&a),
            vec![(1, 'a'), (1, 'b'), (2, 'a'), (2, 'b')]
        );
    }

    #[test]
    fn merge_into_empty() {
        let mut a = LinkedSeq::new();
        let mut b = LinkedSeq::from([1, 2]);
        a.merge(&mut b);
        assert_eq!(values(&a), vec![1, 2]);
        assert_links(&a);
    }

    #[test]
    fn sort_orders_elements() {
        let mut list = LinkedSeq::from([5, 1, 4, 2, 3, 0, 9, 7, 8, 6, 2]);
        list.sort();
        assert_eq!(values(&list), vec![0, 1, 2, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(list.len(), 11);
        assert_links(&list);
    }

    #[test]
    fn sort_is_stable() {
        let mut list = LinkedSeq::from([(2, 0), (1, 1), (2, 2), (1, 3), (0, 4)]);
        list.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            values(&list),
            vec![(0, 4), (1, 1), (1, 3), (2, 0), (2, 2)]
        );
    }

    #[test]
    fn sort_small_lists() {
        let mut empty: LinkedSeq<u8> = LinkedSeq::new();
        empty.sort();
        assert!(empty.is_empty());

        let mut two = LinkedSeq::from([2, 1]);
        two.sort();
        assert_eq!(values(&two), vec![1, 2]);
        assert_links(&two);
    }

    #[test]
    fn swap_and_take() {
        let mut a = LinkedSeq::from([1, 2]);
        let mut b = LinkedSeq::from([3]);
        a.swap(&mut b);
        assert_eq!(values(&a), vec![3]);
        assert_eq!(values(&b), vec![1, 2]);

        let c = b.take();
        assert!(b.is_empty());
        assert_eq!(values(&c), vec![1, 2]);
    }

    #[test]
    fn clone_is_deep() {
        let original = LinkedSeq::from([1, 2, 3]);
        let mut copy = original.clone();
        *copy.front_mut().unwrap() = 100;
        copy.push_back(4);

        assert_eq!(values(&original), vec![1, 2, 3]);
        assert_eq!(values(&copy), vec![100, 2, 3, 4]);
    }

    #[test]
    fn iter_both_ends() {
        let list = LinkedSeq::from([1, 2, 3, 4]);
        let mut iter = list.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn iter_mut() {
        let mut list = LinkedSeq::from([1, 2, 3]);
        for value in list.iter_mut() {
            *value *= 10;
        }
        assert_eq!(values(&list), vec![10, 20, 30]);
    }

    #[test]
    fn into_iter_owned() {
        let list = LinkedSeq::from([String::from("a"), String::from("b")]);
        let collected: Vec<String> = list.into_iter().rev().collect();
        assert_eq!(collected, vec!["b", "a"]);
    }

    #[test]
    fn cursor_walks_with_wraparound() {
        let list = LinkedSeq::from([1, 2]);
        let mut cursor = list.cursor_front();

        assert_eq!(cursor.current(), Some(&1));
        assert_eq!(cursor.index(), Some(0));
        cursor.move_next();
        assert_eq!(cursor.current(), Some(&2));
        cursor.move_next();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.index(), None);
        assert_eq!(cursor.peek_next(), Some(&1));
        assert_eq!(cursor.peek_prev(), Some(&2));
        cursor.move_next();
        assert_eq!(cursor.current(), Some(&1));
        cursor.move_prev();
        assert_eq!(cursor.current(), None);
        cursor.move_prev();
        assert_eq!(cursor.current(), Some(&2));
        assert_eq!(cursor.index(), Some(1));
    }

    #[test]
    fn cursor_mut_insert_and_remove() {
        let mut list = LinkedSeq::from([1, 3]);
        {
            let mut cursor = list.cursor_front_mut();
            cursor.insert_after(2);
            assert_eq!(cursor.index(), Some(0));
            cursor.insert_before(0);
            assert_eq!(cursor.index(), Some(1));
            assert_eq!(cursor.current(), Some(&mut 1));

            assert_eq!(cursor.remove_current(), Some(1));
            assert_eq!(cursor.current(), Some(&mut 2));
        }
        assert_eq!(values(&list), vec![0, 2, 3]);
        assert_links(&list);
    }

    #[test]
    fn cursor_end_appends() {
        let mut list = LinkedSeq::from([1]);
        {
            let mut cursor = list.cursor_end_mut();
            assert!(cursor.is_end());
            cursor.insert_before(2);
            cursor.insert_after(0);
            assert!(cursor.remove_current().is_none());
            cursor.move_prev();
            assert_eq!(cursor.index(), Some(2));
        }
        assert_eq!(values(&list), vec![0, 1, 2]);
        assert_links(&list);
    }

    #[test]
    fn cursor_splice_before() {
        let mut list = LinkedSeq::from([1, 4]);
        let mut other = LinkedSeq::from([2, 3]);
        {
            let mut cursor = list.cursor_back_mut();
            cursor.splice_before(&mut other);
            assert_eq!(cursor.index(), Some(3));
            assert_eq!(cursor.current(), Some(&mut 4));
        }
        assert!(other.is_empty());
        assert_eq!(values(&list), vec![1, 2, 3, 4]);
        assert_links(&list);
    }

    #[test]
    fn borrowing_views_cross_threads() {
        fn assert_send_sync<S: Send + Sync>(_: &S) {}

        let mut list = LinkedSeq::from([1, 2, 3]);
        assert_send_sync(&list.iter());
        assert_send_sync(&list.cursor_front());
        assert_send_sync(&list.iter_mut());
        assert_send_sync(&list.cursor_front_mut());

        let sum = std::thread::scope(|s| {
            let iter = list.iter();
            s.spawn(move || iter.sum::<i32>()).join().unwrap()
        });
        assert_eq!(sum, 6);

        std::thread::scope(|s| {
            let iter = list.iter_mut();
            s.spawn(move || iter.for_each(|v| *v += 1));
        });
        assert_eq!(values(&list), vec![2, 3, 4]);
    }

    #[test]
    fn equality_and_debug() {
        let a = LinkedSeq::from([1, 2]);
        let b: LinkedSeq<i32> = [1, 2].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(format!("{a:?}"), "[1, 2]");
        assert!(a.contains(&2));
        assert!(!a.contains(&3));
    }

    #[test]
    fn drop_cleans_up() {
        static DROP_COUNT: AtomicUsize = AtomicUsize::new(0);

        struct DropCounter;
        impl Drop for DropCounter {
            fn drop(&mut self) {
                DROP_COUNT.fetch_add(1, AtomicOrdering::SeqCst);
            }
        }

        {
            let mut list = LinkedSeq::new();
            for _ in 0..4 {
                list.push_back(DropCounter);
            }
            list.erase(1).unwrap();
            assert_eq!(DROP_COUNT.load(AtomicOrdering::SeqCst), 1);
        }

        assert_eq!(DROP_COUNT.load(AtomicOrdering::SeqCst), 4);
    }

    #[test]
    fn unique_drops_removed() {
        static DROP_COUNT: AtomicUsize = AtomicUsize::new(0);

        #[derive(PartialEq)]
        struct Tracked(u8);
        impl Drop for Tracked {
            fn drop(&mut self) {
                DROP_COUNT.fetch_add(1, AtomicOrdering::SeqCst);
            }
        }

        let mut list = LinkedSeq::from([Tracked(1), Tracked(1), Tracked(2)]);
        assert_eq!(list.unique(), 1);
        assert_eq!(DROP_COUNT.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(list.len(), 2);
    }
}
