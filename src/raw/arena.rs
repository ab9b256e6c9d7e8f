use alloc::vec::Vec;

use super::handle::Handle;

/// Append-only node storage. Nothing is ever removed individually, so there
/// is no free list: a handle stays valid until the whole arena is cleared.
pub(crate) struct Arena<T> {
    slots: Vec<T>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        // `slots.len() < Handle::MAX + 1` before the push keeps the new index <= `Handle::MAX`.
        assert!(
            self.slots.len() <= Handle::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Handle::MAX + 1
        );
        self.slots.push(element);
        Handle::from_index(self.slots.len() - 1)
    }

    #[inline]
    #[track_caller]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots.get(handle.to_index()).expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    #[track_caller]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots.get_mut(handle.to_index()).expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Moves every element out, leaving the arena empty but keeping its allocation.
    pub(crate) fn drain(&mut self) -> alloc::vec::Drain<'_, T> {
        self.slots.drain(..)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn arena_capacity() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert_eq!(arena.capacity(), 10);
        assert!(arena.is_empty());
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn stale_handle_after_clear() {
        let mut arena = Arena::new();
        let handle = arena.alloc(1u8);
        arena.clear();
        let _ = arena.get(handle);
    }

    #[test]
    #[should_panic(expected = "`Arena::alloc()` - arena is at maximum capacity")]
    fn alloc_past_handle_space() {
        // Handles are `u16` under test, so the limit is cheap to reach.
        let mut arena = Arena::with_capacity(Handle::MAX + 1);
        for _ in 0..=Handle::MAX {
            arena.alloc(());
        }
        assert_eq!(arena.len(), Handle::MAX + 1);
        arena.alloc(());
    }

    proptest! {
        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.alloc(value);
                        model.push((handle, value));
                    }
                    Operation::GetMut(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        *arena.get_mut(handle) = value;
                        model[index].1 = value;
                    }
                    Operation::Drain => {
                        let drained: Vec<u32> = arena.drain().collect();
                        let expected: Vec<u32> = model.drain(..).map(|(_, value)| value).collect();
                        prop_assert_eq!(drained, expected);
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());
                prop_assert_eq!(arena.is_empty(), model.is_empty());

                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        GetMut(usize, u32),
        Drain,
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            1 => Just(Operation::Drain),
            1 => Just(Operation::Clear),
        ]
    }
}
