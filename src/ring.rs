//! Fixed-capacity SPSC ring buffer.
//!
//! Foundation for all data crossing between the cyclic executive and the
//! codec interrupt. Exactly one producer and one consumer mutate each
//! instance; they may live in different execution contexts.
//!
//! # Contract
//!
//! The buffer itself performs no synchronization. When one side of a
//! buffer runs in interrupt context, the *non-interrupt* side must wrap
//! every individual `push`/`pop` in an interrupt-masked critical section
//! (see [`InterruptMask`](crate::board::InterruptMask)). The interrupt
//! side needs no bracketing: nothing preempts it.
//!
//! # Invariants
//!
//! - Usable capacity is N−1 slots.
//! - Empty ⇔ write cursor == read cursor.
//! - Full ⇔ (write cursor + 1) mod N == read cursor.
//! - A failed operation never mutates state.

use crate::error::BufferError;

/// Fixed-capacity single-producer/single-consumer queue.
///
/// Cursors are taken modulo N. Construction allows non-zero initial
/// cursors so a transmit buffer can start pre-filled with silence.
pub struct RingBuffer<T, const N: usize> {
    buf: [T; N],
    write: usize,
    read: usize,
}

impl<T: Copy + Default, const N: usize> RingBuffer<T, N> {
    /// Create a buffer with explicit initial cursor positions.
    ///
    /// Slots between `initial_read` and `initial_write` count as already
    /// occupied and hold `T::default()` (silence for audio samples).
    pub fn new(initial_write: usize, initial_read: usize) -> Self {
        Self {
            buf: [T::default(); N],
            write: initial_write % N,
            read: initial_read % N,
        }
    }

    /// True when no samples are queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.write == self.read
    }

    /// True when all N−1 usable slots are occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        (self.write + 1) % N == self.read
    }

    /// Number of queued samples (0 ..= N−1).
    #[inline]
    pub fn len(&self) -> usize {
        (self.write + N - self.read) % N
    }

    /// Queue one sample.
    ///
    /// Fails with [`BufferError::Full`] without mutating state; the
    /// caller decides whether that is backpressure or a fault.
    #[inline]
    pub fn push(&mut self, item: T) -> Result<(), BufferError> {
        if self.is_full() {
            return Err(BufferError::Full);
        }
        self.buf[self.write] = item;
        self.write = (self.write + 1) % N;
        Ok(())
    }

    /// Dequeue the oldest sample.
    ///
    /// Fails with [`BufferError::Empty`] without mutating state.
    #[inline]
    pub fn pop(&mut self) -> Result<T, BufferError> {
        if self.is_empty() {
            return Err(BufferError::Empty);
        }
        let item = self.buf[self.read];
        self.read = (self.read + 1) % N;
        Ok(item)
    }
}

impl<T: Copy + Default, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefill_counts_as_occupied() {
        let buf: RingBuffer<i16, 8> = RingBuffer::new(4, 0);
        assert_eq!(buf.len(), 4);
        assert!(!buf.is_empty());
        assert!(!buf.is_full());
    }

    #[test]
    fn test_failed_ops_do_not_mutate() {
        let mut buf: RingBuffer<i16, 4> = RingBuffer::new(0, 0);
        assert_eq!(buf.pop(), Err(BufferError::Empty));
        assert_eq!(buf.len(), 0);

        for v in 0..3 {
            buf.push(v).unwrap();
        }
        assert_eq!(buf.push(99), Err(BufferError::Full));
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.pop(), Ok(0));
    }
}
