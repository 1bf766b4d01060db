//! Lock-free single-producer/single-consumer word FIFO
//!
//! This is the only structure shared between the main polling context and
//! the timer-tick (interrupt) context. It stays safe under preemption as
//! long as each index has exactly one writer: the producer writes only the
//! write index, the consumer only the read index, and every index access
//! is a single atomic load or store - never a read-modify-write across the
//! producer/consumer boundary. [`split`] hands out one handle per side so
//! the type system enforces that discipline.
//!
//! Indices run free modulo `2 * N`, which distinguishes the full buffer
//! from the empty one without a separate flag.
//!
//! [`split`]: WordFifo::split

use core::sync::atomic::{AtomicU16, AtomicUsize, Ordering};

/// Words queued for transmission per channel in the reference sizing
pub const TX_FIFO_CAPACITY: usize = 16;

/// Fixed-capacity SPSC queue of 16-bit words
///
/// Enqueueing into a full queue drops the new word and leaves the
/// contents untouched; that is the explicit overflow policy of the bus
/// bridge, surfaced to the caller only as the `false` return.
#[derive(Debug)]
pub struct WordFifo<const N: usize> {
    slots: [AtomicU16; N],
    /// Next slot to read; written only by the consumer side
    read: AtomicUsize,
    /// Next slot to write; written only by the producer side
    write: AtomicUsize,
}

impl<const N: usize> Default for WordFifo<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> WordFifo<N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            slots: [const { AtomicU16::new(0) }; N],
            read: AtomicUsize::new(0),
            write: AtomicUsize::new(0),
        }
    }

    /// Advance an index by one step, modulo `2 * N`
    const fn advance(index: usize) -> usize {
        (index + 1) % (2 * N)
    }

    /// Number of queued words
    pub fn len(&self) -> usize {
        let write = self.write.load(Ordering::Acquire);
        let read = self.read.load(Ordering::Acquire);
        (write + 2 * N - read) % (2 * N)
    }

    /// No words are queued
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// No further word can be accepted
    pub fn is_full(&self) -> bool {
        self.len() == N
    }

    /// Append a word; returns whether it was accepted
    ///
    /// A full queue drops the word without overwriting anything.
    /// Producer-side only.
    pub fn enqueue(&self, word: u16) -> bool {
        let write = self.write.load(Ordering::Relaxed);
        let read = self.read.load(Ordering::Acquire);
        if (write + 2 * N - read) % (2 * N) == N {
            return false;
        }
        self.slots[write % N].store(word, Ordering::Relaxed);
        self.write.store(Self::advance(write), Ordering::Release);
        true
    }

    /// Remove and return the oldest word, if any. Consumer-side only.
    pub fn dequeue(&self) -> Option<u16> {
        let read = self.read.load(Ordering::Relaxed);
        let write = self.write.load(Ordering::Acquire);
        if read == write {
            return None;
        }
        let word = self.slots[read % N].load(Ordering::Relaxed);
        self.read.store(Self::advance(read), Ordering::Release);
        Some(word)
    }

    /// Split into the two single-writer handles
    ///
    /// The exclusive borrow guarantees no other handles exist, so each
    /// side of the producer/consumer contract gets exactly one owner.
    /// For embeddings that hand the two sides to separate owners; a
    /// caller that keeps the whole queue can equally call
    /// [`enqueue`]/[`dequeue`] directly as long as it honors the same
    /// one-producer/one-consumer contract.
    ///
    /// [`enqueue`]: WordFifo::enqueue
    /// [`dequeue`]: WordFifo::dequeue
    pub fn split(&mut self) -> (Producer<'_, N>, Consumer<'_, N>) {
        (Producer { fifo: self }, Consumer { fifo: self })
    }
}

/// Enqueue-only handle; the side that owns the write index
#[derive(Debug)]
pub struct Producer<'a, const N: usize> {
    fifo: &'a WordFifo<N>,
}

impl<const N: usize> Producer<'_, N> {
    /// Append a word; returns whether it was accepted
    pub fn enqueue(&mut self, word: u16) -> bool {
        self.fifo.enqueue(word)
    }

    /// No further word can be accepted
    pub fn is_full(&self) -> bool {
        self.fifo.is_full()
    }
}

/// Dequeue-only handle; the side that owns the read index
#[derive(Debug)]
pub struct Consumer<'a, const N: usize> {
    fifo: &'a WordFifo<N>,
}

impl<const N: usize> Consumer<'_, N> {
    /// Remove and return the oldest word, if any
    pub fn dequeue(&mut self) -> Option<u16> {
        self.fifo.dequeue()
    }

    /// No words are queued
    pub fn is_empty(&self) -> bool {
        self.fifo.is_empty()
    }
}
