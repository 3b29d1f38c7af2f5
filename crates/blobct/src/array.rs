//! Ordered, growable sequence of same-typed values.
//!
//! Written inline where it appears in a parent, or as a pointer target once
//! moved into an [`Arena`](crate::Arena).

use std::ops::{Index, IndexMut};

use crate::arena::PointerTarget;
use crate::{BlobError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Array<T> {
    items: Vec<T>,
}

impl<T> Array<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Element at `index`, or `BoundsViolation`.
    pub fn try_get(&self, index: usize) -> Result<&T> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(BlobError::BoundsViolation { index, len })
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Insert at `index`, shifting later elements. `index == len()` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.items.len();
        if index > len {
            return Err(BlobError::BoundsViolation { index, len });
        }
        self.items.insert(index, value);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<T> {
        let len = self.items.len();
        if index >= len {
            return Err(BlobError::BoundsViolation { index, len });
        }
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Default> Array<T> {
    /// Array of `len` default values.
    pub fn with_len(len: usize) -> Self {
        Self {
            items: std::iter::repeat_with(T::default).take(len).collect(),
        }
    }
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Array<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T> {
    fn from(items: [T; N]) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Index<usize> for Array<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for Array<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T: 'static> PointerTarget for Array<T> {
    type Elem = T;

    fn len(&self) -> usize {
        self.items.len()
    }

    fn element(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }
}
