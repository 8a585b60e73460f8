//! # Generational arena backing hub and listener storage.
//!
//! Every cross reference in the registry is a [`Handle`]: a slot index plus the
//! generation the slot had when the value was inserted. Freeing a slot bumps its
//! generation, so old handles stop resolving even after the slot is reused.
//!
//! ```text
//! insert(a) ──► Handle{0, g0} ──► get() = Some(a)
//! remove(Handle{0, g0})          (slot 0 freed, generation → g1)
//! insert(b) ──► Handle{0, g1} ──► get() = Some(b)
//! get(Handle{0, g0})          ──► None   (stale)
//! ```
//!
//! A slot whose generation reaches `u32::MAX` is retired instead of reused, so
//! a generation never wraps back to a value an old handle still carries.

/// Existence-checkable reference into an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    pub(crate) fn index(self) -> u32 {
        self.index
    }

    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

struct Slot<T> {
    value: Option<T>,
    generation: u32,
}

/// Slot storage with free-list reuse.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// # Panics
    /// If the arena would need more than `u32::MAX` slots.
    pub(crate) fn insert(&mut self, value: T) -> Handle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            self.len += 1;
            return Handle {
                index,
                generation: slot.generation,
            };
        }

        let Ok(index) = u32::try_from(self.slots.len()) else {
            panic!("arena capacity overflow: {} slots", self.slots.len());
        };
        self.len += 1;
        self.slots.push(Slot {
            value: Some(value),
            generation: 0,
        });
        Handle {
            index,
            generation: 0,
        }
    }

    pub(crate) fn get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub(crate) fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Frees the slot and invalidates every outstanding handle to it.
    ///
    /// A slot at the last generation is retired rather than put back on the
    /// free list.
    pub(crate) fn remove(&mut self, handle: Handle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let value = slot.value.take()?;
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            self.free.push(handle.index);
        }
        self.len -= 1;
        Some(value)
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}
