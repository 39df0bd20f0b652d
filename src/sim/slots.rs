//! Fixed-capacity entity storage
//!
//! Memory is reserved once when the world is built. The live count is the
//! length of the backing vector and removal swaps the last entry into the
//! vacated slot, so order is not stable.

use std::collections::TryReserveError;

#[derive(Debug, Clone)]
pub struct Slots<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Slots<T> {
    /// Reserve storage for exactly `capacity` entries
    pub fn with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut items = Vec::new();
        items.try_reserve_exact(capacity)?;
        Ok(Self { items, capacity })
    }

    /// Live count
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Append an entry, handing it back if the slots are full
    pub fn try_push(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove the entry at `index` by moving the last entry into its slot.
    ///
    /// Callers scanning by index must revisit `index` afterwards.
    pub fn remove_swap(&mut self, index: usize) -> T {
        self.items.swap_remove(index)
    }

    /// Exchange two live entries
    pub fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T> std::ops::Index<usize> for Slots<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> std::ops::IndexMut<usize> for Slots<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}
