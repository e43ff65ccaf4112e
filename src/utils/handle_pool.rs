use std::cmp::Reverse;
use std::collections::binary_heap::BinaryHeap;
use std::marker::PhantomData;

use super::handle::{HandleIndex, HandleLike};

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct FreeIndex(Reverse<HandleIndex>);

/// `HandlePool` hands out versioned handles with densely packed indices, and
/// tells whether a given handle is still alive.
///
/// A slot is alive while its version is odd. Freeing a handle bumps the version
/// to an even number, and reusing the slot bumps it again, so stale copies of a
/// freed handle never compare equal to the new occupant.
pub struct HandlePool<H: HandleLike> {
    versions: Vec<HandleIndex>,
    frees: BinaryHeap<FreeIndex>,
    _phantom: PhantomData<H>,
}

impl<H: HandleLike> Default for HandlePool<H> {
    fn default() -> Self {
        HandlePool::new()
    }
}

impl<H: HandleLike> HandlePool<H> {
    pub fn new() -> Self {
        HandlePool {
            versions: Vec::new(),
            frees: BinaryHeap::new(),
            _phantom: PhantomData,
        }
    }

    /// Creates an unused handle, recycling the lowest freed index first.
    pub fn create(&mut self) -> H {
        if let Some(FreeIndex(Reverse(index))) = self.frees.pop() {
            let version = &mut self.versions[index as usize];
            *version += 1;
            H::new(index, *version)
        } else {
            self.versions.push(1);
            H::new(self.versions.len() as HandleIndex - 1, 1)
        }
    }

    /// Returns true if `handle` was created by this pool and has not been
    /// freed yet.
    pub fn contains(&self, handle: H) -> bool {
        let index = handle.index() as usize;
        self.versions
            .get(index)
            .map(|&v| v & 0x1 == 1 && v == handle.version())
            .unwrap_or(false)
    }

    /// Recycles the index of `handle` and marks its version as dead. Returns
    /// false if the handle was not alive.
    pub fn free(&mut self, handle: H) -> bool {
        if !self.contains(handle) {
            return false;
        }

        self.versions[handle.index() as usize] += 1;
        self.frees.push(FreeIndex(Reverse(handle.index())));
        true
    }

    /// Returns the number of alive handles.
    #[inline]
    pub fn len(&self) -> usize {
        self.versions.len() - self.frees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
