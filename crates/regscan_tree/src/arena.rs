//! Append-only storage addressed by typed IDs.
//!
//! A reconstructed tree is written once while the dump is read and then only
//! traversed, so nodes and leaves live in dense vectors instead of behind
//! shared pointers.

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// A typed position in an [`Arena`].
pub trait ArenaId: Copy {
    /// The ID of the item at `index`.
    fn from_index(index: usize) -> Self;

    /// The position this ID addresses.
    fn index(self) -> usize;
}

/// Items of type `T` addressed by IDs of type `I`.
///
/// Nothing is ever removed, so an ID returned by [`alloc`](Self::alloc)
/// stays valid for the life of the arena. Indexing with an ID from another
/// arena may panic.
#[derive(Debug, Clone)]
pub struct Arena<I, T> {
    items: Vec<T>,
    _ids: PhantomData<fn() -> I>,
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _ids: PhantomData,
        }
    }

    /// Stores `item` and returns its ID.
    pub fn alloc(&mut self, item: T) -> I {
        self.items.push(item);
        I::from_index(self.items.len() - 1)
    }

    /// The item behind `id`, if the ID is in range.
    pub fn get(&self, id: I) -> Option<&T> {
        self.items.get(id.index())
    }

    /// Number of items stored.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        &self.items[id.index()]
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, id: I) -> &mut T {
        &mut self.items[id.index()]
    }
}
