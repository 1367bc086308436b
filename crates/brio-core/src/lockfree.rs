//! Lock-free primitives for real-time audio.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Cache-line aligned atomic bool.
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicFlag {
    value: AtomicBool,
}

impl AtomicFlag {
    pub fn new(value: bool) -> Self {
        Self {
            value: AtomicBool::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.value.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, value: bool) {
        self.value.store(value, Ordering::Release);
    }

    #[inline]
    pub fn swap(&self, value: bool) -> bool {
        self.value.swap(value, Ordering::AcqRel)
    }
}

impl Clone for AtomicFlag {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl Default for AtomicFlag {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Bounded single-producer/single-consumer ring buffer.
///
/// `capacity` usable slots are backed by `capacity + 1` physical slots; the
/// queue is full when advancing the write index would collide with the read
/// index. The producer publishes its write index with release ordering and
/// the consumer mirrors that on the read index, so a popped payload is fully
/// visible to the consumer without locks.
///
/// At most one thread may push and at most one thread may pop at any time;
/// mutual exclusion between multiple producers is the caller's
/// responsibility.
pub struct SpscRing<T> {
    slots: Box<[UnsafeCell<MaybeUninit<T>>]>,
    read_index: AtomicUsize,
    write_index: AtomicUsize,
}

// Slots are only touched through the index protocol above.
unsafe impl<T: Send> Send for SpscRing<T> {}
unsafe impl<T: Send> Sync for SpscRing<T> {}

impl<T> SpscRing<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "ring capacity must be positive");
        let slots = (0..capacity + 1)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect();
        Self {
            slots,
            read_index: AtomicUsize::new(0),
            write_index: AtomicUsize::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.read_index.load(Ordering::Acquire) == self.write_index.load(Ordering::Acquire)
    }

    #[inline]
    fn next_index(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.slots.len() {
            0
        } else {
            next
        }
    }

    /// Producer side. Returns the value back when the queue is full.
    pub fn push(&self, value: T) -> std::result::Result<(), T> {
        let write = self.write_index.load(Ordering::Relaxed);
        let next = self.next_index(write);
        if next == self.read_index.load(Ordering::Acquire) {
            return Err(value);
        }
        // Safety: `write` is not visible to the consumer until the store
        // below, and no other producer may run concurrently.
        unsafe {
            (*self.slots[write].get()).write(value);
        }
        self.write_index.store(next, Ordering::Release);
        Ok(())
    }

    /// Consumer side. Pops the head element only when `take` approves it.
    pub fn pop_if(&self, take: impl FnOnce(&T) -> bool) -> Option<T> {
        let read = self.read_index.load(Ordering::Relaxed);
        if read == self.write_index.load(Ordering::Acquire) {
            return None;
        }
        let slot = self.slots[read].get();
        // Safety: the slot at `read` was initialised by a push that
        // happened-before the acquire load above, and the producer will not
        // reuse it until the read index moves past it.
        let head = unsafe { (*slot).assume_init_ref() };
        if !take(head) {
            return None;
        }
        let value = unsafe { (*slot).assume_init_read() };
        self.read_index.store(self.next_index(read), Ordering::Release);
        Some(value)
    }
}

impl<T> Drop for SpscRing<T> {
    fn drop(&mut self) {
        while self.pop_if(|_| true).is_some() {}
    }
}
