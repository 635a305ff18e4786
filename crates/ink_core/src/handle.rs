//! Generational handles for simulation objects
//!
//! A `Handle<T>` pairs a slot index with a generation counter. Freeing a slot
//! bumps its generation, so every handle taken before the free fails
//! validation afterwards. Deferred callbacks (timers, perception bindings)
//! hold handles instead of references and treat a stale handle as "the owner
//! is gone" - a silent no-op, never a dangling access.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// A generational handle to a resource of type `T`
pub struct Handle<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<*const T>,
}

impl<T> Handle<T> {
    /// Create a handle from index and generation
    #[inline]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self {
            index,
            generation,
            _marker: PhantomData,
        }
    }

    /// Get the slot index
    #[inline]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Get the generation
    #[inline]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Pack into an opaque u64 (index in the low half, generation in the high)
    ///
    /// Used where a reference must cross an untyped boundary, e.g. the `u64`
    /// actor ids carried by perception stimuli.
    #[inline]
    pub const fn to_bits(&self) -> u64 {
        (self.generation as u64) << 32 | self.index as u64
    }

    /// Unpack from the `to_bits` encoding
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
            _marker: PhantomData,
        }
    }
}

// Manual trait implementations to avoid bounds on T
impl<T> Clone for Handle<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Handle<{}>({}v{})",
            core::any::type_name::<T>(),
            self.index,
            self.generation
        )
    }
}

/// Allocates handles with generation tracking
pub struct HandleAllocator<T> {
    /// Current generation per slot
    generations: Vec<u32>,
    /// Freed indices available for reuse
    free_list: Vec<u32>,
    _marker: PhantomData<T>,
}

impl<T> HandleAllocator<T> {
    /// Create a new allocator
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free_list: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Allocate a new handle, reusing freed slots first
    ///
    /// Generations start at 1, so no allocated handle ever packs to the
    /// zero bit pattern - callers can use 0 as "no actor".
    pub fn allocate(&mut self) -> Handle<T> {
        if let Some(index) = self.free_list.pop() {
            Handle::new(index, self.generations[index as usize])
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(1);
            Handle::new(index, 1)
        }
    }

    /// Free a handle, invalidating all copies of it
    ///
    /// Returns false if the handle was already stale.
    pub fn free(&mut self, handle: Handle<T>) -> bool {
        let index = handle.index() as usize;
        if index >= self.generations.len() {
            return false;
        }
        if self.generations[index] != handle.generation() {
            return false;
        }
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.free_list.push(handle.index());
        true
    }

    /// Check whether a handle still refers to a live slot
    pub fn is_valid(&self, handle: Handle<T>) -> bool {
        let index = handle.index() as usize;
        index < self.generations.len() && self.generations[index] == handle.generation()
    }

    /// Number of live handles
    pub fn len(&self) -> usize {
        self.generations.len() - self.free_list.len()
    }

    /// Check if no handles are live
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for HandleAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle-keyed storage
pub struct HandleMap<T> {
    allocator: HandleAllocator<T>,
    values: Vec<Option<T>>,
}

impl<T> HandleMap<T> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            allocator: HandleAllocator::new(),
            values: Vec::new(),
        }
    }

    /// Insert a value, returning its handle
    pub fn insert(&mut self, value: T) -> Handle<T> {
        let handle = self.allocator.allocate();
        let index = handle.index() as usize;
        if index >= self.values.len() {
            self.values.resize_with(index + 1, || None);
        }
        self.values[index] = Some(value);
        handle
    }

    /// Remove a value by handle; stale handles return None
    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        if !self.allocator.is_valid(handle) {
            return None;
        }
        self.allocator.free(handle);
        self.values[handle.index() as usize].take()
    }

    /// Get a value by handle; stale handles return None
    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        if !self.allocator.is_valid(handle) {
            return None;
        }
        self.values.get(handle.index() as usize)?.as_ref()
    }

    /// Get a value mutably; stale handles return None
    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        if !self.allocator.is_valid(handle) {
            return None;
        }
        self.values.get_mut(handle.index() as usize)?.as_mut()
    }

    /// Check whether a handle is still live
    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.allocator.is_valid(handle)
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.allocator.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.allocator.is_empty()
    }

    /// Iterate over live handles and values
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        let gens = &self.allocator.generations;
        self.values.iter().enumerate().filter_map(move |(i, slot)| {
            slot.as_ref()
                .map(|v| (Handle::new(i as u32, gens[i]), v))
        })
    }

    /// Iterate over live handles and mutable values
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle<T>, &mut T)> {
        let gens = &self.allocator.generations;
        self.values
            .iter_mut()
            .enumerate()
            .filter_map(move |(i, slot)| {
                slot.as_mut()
                    .map(|v| (Handle::new(i as u32, gens[i]), v))
            })
    }

    /// Collect the live handles (useful when mutation during iteration is needed)
    pub fn handles(&self) -> Vec<Handle<T>> {
        self.iter().map(|(h, _)| h).collect()
    }
}

impl<T> Default for HandleMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_and_reuse() {
        let mut alloc: HandleAllocator<i32> = HandleAllocator::new();
        let h1 = alloc.allocate();
        let h2 = alloc.allocate();

        assert!(alloc.is_valid(h1));
        assert!(alloc.is_valid(h2));
        assert_ne!(h1, h2);

        alloc.free(h1);
        assert!(!alloc.is_valid(h1));

        // Slot reuse bumps the generation
        let h3 = alloc.allocate();
        assert_eq!(h3.index(), h1.index());
        assert_ne!(h3.generation(), h1.generation());
        assert!(!alloc.is_valid(h1));
    }

    #[test]
    fn test_double_free_rejected() {
        let mut alloc: HandleAllocator<i32> = HandleAllocator::new();
        let h = alloc.allocate();
        assert!(alloc.free(h));
        assert!(!alloc.free(h));
    }

    #[test]
    fn test_map_stale_access() {
        let mut map: HandleMap<String> = HandleMap::new();
        let h1 = map.insert("alpha".to_string());
        let h2 = map.insert("beta".to_string());

        assert_eq!(map.get(h1).map(String::as_str), Some("alpha"));
        map.remove(h1);
        assert_eq!(map.get(h1), None);
        assert!(map.contains(h2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_bits_roundtrip() {
        let h: Handle<u8> = Handle::new(42, 7);
        let bits = h.to_bits();
        let back: Handle<u8> = Handle::from_bits(bits);
        assert_eq!(h, back);
    }

    #[test]
    fn test_allocated_handles_never_pack_to_zero() {
        let mut alloc: HandleAllocator<i32> = HandleAllocator::new();
        let first = alloc.allocate();
        assert_ne!(first.to_bits(), 0);
    }
}
