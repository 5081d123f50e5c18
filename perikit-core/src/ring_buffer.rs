//! Single-producer/single-consumer byte ring
//!
//! Hands received bytes from interrupt context to the poll loop without
//! locks. The producer only ever stores `head`, the consumer only ever
//! stores `tail`, and each store is a single word. Since the producer can
//! preempt the consumer but never the reverse, that discipline is enough.
//!
//! `head == tail` means empty, so a buffer over `N` bytes of storage holds at
//! most `N - 1` bytes. A block write stops one slot short of catching up with
//! `tail` and silently drops the rest of the block (the producer runs in
//! interrupt context and must never wait). Dropped bytes are counted.
//!
//! ```ignore
//! static RX_STORAGE: RingStorage<256> = RingStorage::new();
//!
//! let mut ring = RingBuffer::new(RX_STORAGE.as_slice())?;
//! let (producer, consumer) = ring.split();
//! // producer -> receive interrupt, consumer -> Uart::init
//! ```

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, AtomicUsize, Ordering};

use perikit_hal::{Error, Result};

/// Application-owned backing storage for a [`RingBuffer`]
///
/// Atomic bytes let the producer and consumer share the array without
/// `unsafe`; on the targets perikit runs on a relaxed byte load/store is a
/// plain memory access.
pub struct RingStorage<const N: usize> {
    bytes: [AtomicU8; N],
}

impl<const N: usize> RingStorage<N> {
    /// Create zeroed storage (usable in a `static`)
    pub const fn new() -> Self {
        Self {
            bytes: [const { AtomicU8::new(0) }; N],
        }
    }

    /// Borrow the storage as a slice
    pub fn as_slice(&self) -> &[AtomicU8] {
        &self.bytes
    }
}

impl<const N: usize> Default for RingStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte ring over borrowed storage
pub struct RingBuffer<'s> {
    storage: &'s [AtomicU8],
    /// Next write index, stored only by the producer
    head: AtomicUsize,
    /// Next read index, stored only by the consumer
    tail: AtomicUsize,
    /// Bytes discarded because the ring was full, stored only by the producer
    dropped: AtomicU32,
    /// Set by the consumer when its device is deinitialized
    closed: AtomicBool,
}

impl<'s> RingBuffer<'s> {
    /// Create an empty ring over `storage`
    ///
    /// Fails with [`Error::InvalidArgument`] for empty storage.
    pub fn new(storage: &'s [AtomicU8]) -> Result<Self> {
        if storage.is_empty() {
            return Err(Error::InvalidArgument);
        }
        Ok(Self {
            storage,
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            dropped: AtomicU32::new(0),
            closed: AtomicBool::new(false),
        })
    }

    /// Usable capacity in bytes (one less than the storage length)
    pub fn capacity(&self) -> usize {
        self.storage.len() - 1
    }

    /// Split into the interrupt-side producer and the poll-side consumer
    ///
    /// Resets the ring to empty and open.
    pub fn split(&mut self) -> (RxProducer<'_, 's>, RxConsumer<'_, 's>) {
        *self.head.get_mut() = 0;
        *self.tail.get_mut() = 0;
        *self.dropped.get_mut() = 0;
        *self.closed.get_mut() = false;
        let ring = &*self;
        (RxProducer { ring }, RxConsumer { ring })
    }

    fn len(&self) -> usize {
        self.storage.len()
    }

    fn available(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        (head + self.len() - tail) % self.len()
    }
}

/// Writing half of a [`RingBuffer`]
///
/// Owned by the receive interrupt. It carries the ring it feeds, so several
/// ports can each own their own ring with no global lookup.
pub struct RxProducer<'r, 's> {
    ring: &'r RingBuffer<'s>,
}

impl RxProducer<'_, '_> {
    /// Append a received block
    ///
    /// Returns how many bytes were accepted. Once the ring is full the rest
    /// of the block is dropped and counted. After the consumer closes the
    /// ring every byte is dropped.
    pub fn push_block(&mut self, data: &[u8]) -> usize {
        let ring = self.ring;
        if ring.closed.load(Ordering::Acquire) {
            return 0;
        }

        let len = ring.len();
        let mut head = ring.head.load(Ordering::Relaxed);
        let mut written = 0;

        for &byte in data {
            let next_head = (head + 1) % len;
            if next_head == ring.tail.load(Ordering::Acquire) {
                break;
            }
            ring.storage[head].store(byte, Ordering::Relaxed);
            head = next_head;
            written += 1;
        }
        ring.head.store(head, Ordering::Release);

        let lost = data.len() - written;
        if lost > 0 {
            let dropped = ring.dropped.load(Ordering::Relaxed);
            ring.dropped
                .store(dropped.saturating_add(lost as u32), Ordering::Relaxed);
            trace!("rx ring full, dropped {} bytes", lost);
        }

        written
    }

    /// Append a single byte, returning whether it fit
    pub fn push(&mut self, byte: u8) -> bool {
        self.push_block(&[byte]) == 1
    }

    /// Whether the consumer has closed the ring
    pub fn is_closed(&self) -> bool {
        self.ring.closed.load(Ordering::Acquire)
    }
}

/// Reading half of a [`RingBuffer`]
pub struct RxConsumer<'r, 's> {
    ring: &'r RingBuffer<'s>,
}

impl RxConsumer<'_, '_> {
    /// Read up to `buf.len()` bytes
    ///
    /// Returns the number of bytes copied; stops early when the ring runs
    /// empty. Never blocks and never fails.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        let ring = self.ring;
        let len = ring.len();
        let head = ring.head.load(Ordering::Acquire);
        let mut tail = ring.tail.load(Ordering::Relaxed);
        let mut count = 0;

        for slot in buf.iter_mut() {
            if tail == head {
                break;
            }
            *slot = ring.storage[tail].load(Ordering::Relaxed);
            tail = (tail + 1) % len;
            count += 1;
        }

        ring.tail.store(tail, Ordering::Release);
        count
    }

    /// Bytes currently waiting to be read
    pub fn available(&self) -> usize {
        self.ring.available()
    }

    /// Check if nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.available() == 0
    }

    /// Usable capacity in bytes
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Total bytes the producer has dropped on overflow
    pub fn dropped(&self) -> u32 {
        self.ring.dropped.load(Ordering::Relaxed)
    }

    /// Discard everything currently waiting
    pub fn clear(&mut self) {
        let head = self.ring.head.load(Ordering::Acquire);
        self.ring.tail.store(head, Ordering::Release);
    }

    /// Stop accepting data; later producer pushes are discarded
    pub fn close(&mut self) {
        self.ring.closed.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::vec::Vec;

    #[test]
    fn test_empty_storage_rejected() {
        let storage: RingStorage<0> = RingStorage::new();
        assert_eq!(
            RingBuffer::new(storage.as_slice()).err(),
            Some(Error::InvalidArgument)
        );
    }

    #[test]
    fn test_fifo_order() {
        let storage: RingStorage<16> = RingStorage::new();
        let mut ring = RingBuffer::new(storage.as_slice()).unwrap();
        let (mut tx, mut rx) = ring.split();

        assert_eq!(tx.push_block(b"hello"), 5);
        assert_eq!(tx.push_block(b" world"), 6);
        assert_eq!(rx.available(), 11);

        let mut buf = [0u8; 32];
        let n = rx.read(&mut buf);
        assert_eq!(&buf[..n], b"hello world");
        assert!(rx.is_empty());
    }

    #[test]
    fn test_one_slot_unusable() {
        let storage: RingStorage<8> = RingStorage::new();
        let mut ring = RingBuffer::new(storage.as_slice()).unwrap();
        assert_eq!(ring.capacity(), 7);
        let (mut tx, rx) = ring.split();

        assert_eq!(tx.push_block(&[1, 2, 3, 4, 5, 6, 7, 8, 9]), 7);
        assert_eq!(rx.available(), 7);
        assert_eq!(rx.dropped(), 2);
        assert!(!tx.push(10));
        assert_eq!(rx.dropped(), 3);
    }

    #[test]
    fn test_overflow_truncates_at_boundary() {
        let storage: RingStorage<8> = RingStorage::new();
        let mut ring = RingBuffer::new(storage.as_slice()).unwrap();
        let (mut tx, mut rx) = ring.split();

        tx.push_block(&[1, 2, 3, 4, 5]);
        // Only two slots remain
        assert_eq!(tx.push_block(&[6, 7, 8, 9]), 2);

        let mut buf = [0u8; 16];
        let n = rx.read(&mut buf);
        assert_eq!(&buf[..n], &[1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_wraparound() {
        let storage: RingStorage<5> = RingStorage::new();
        let mut ring = RingBuffer::new(storage.as_slice()).unwrap();
        let (mut tx, mut rx) = ring.split();
        let mut buf = [0u8; 4];

        tx.push_block(&[1, 2, 3]);
        assert_eq!(rx.read(&mut buf[..2]), 2);
        assert_eq!(&buf[..2], &[1, 2]);

        // head wraps past the end of storage
        assert_eq!(tx.push_block(&[4, 5, 6]), 3);
        assert_eq!(rx.available(), 4);

        let n = rx.read(&mut buf);
        assert_eq!(&buf[..n], &[3, 4, 5, 6]);
        assert_eq!(rx.available(), 0);
    }

    #[test]
    fn test_partial_read() {
        let storage: RingStorage<16> = RingStorage::new();
        let mut ring = RingBuffer::new(storage.as_slice()).unwrap();
        let (mut tx, mut rx) = ring.split();

        tx.push_block(&[9, 8, 7]);
        let mut buf = [0u8; 2];
        assert_eq!(rx.read(&mut buf), 2);
        assert_eq!(rx.available(), 1);
        assert_eq!(rx.read(&mut []), 0);
        assert_eq!(rx.read(&mut buf), 1);
        assert_eq!(buf[0], 7);
        assert_eq!(rx.read(&mut buf), 0);
    }

    #[test]
    fn test_closed_ring_drops_everything() {
        let storage: RingStorage<16> = RingStorage::new();
        let mut ring = RingBuffer::new(storage.as_slice()).unwrap();
        let (mut tx, mut rx) = ring.split();

        tx.push_block(&[1, 2]);
        rx.close();
        assert!(tx.is_closed());
        assert_eq!(tx.push_block(&[3, 4]), 0);
        assert_eq!(rx.available(), 2);
    }

    #[test]
    fn test_split_resets() {
        let storage: RingStorage<8> = RingStorage::new();
        let mut ring = RingBuffer::new(storage.as_slice()).unwrap();
        {
            let (mut tx, mut rx) = ring.split();
            tx.push_block(&[1, 2, 3]);
            rx.close();
        }
        let (mut tx, rx) = ring.split();
        assert_eq!(rx.available(), 0);
        assert_eq!(tx.push_block(&[4]), 1);
    }

    #[test]
    fn test_clear_discards_pending() {
        let storage: RingStorage<8> = RingStorage::new();
        let mut ring = RingBuffer::new(storage.as_slice()).unwrap();
        let (mut tx, mut rx) = ring.split();

        tx.push_block(&[1, 2, 3]);
        rx.clear();
        assert!(rx.is_empty());

        tx.push_block(&[4]);
        let mut buf = [0u8; 4];
        assert_eq!(rx.read(&mut buf), 1);
        assert_eq!(buf[0], 4);
    }

    proptest! {
        #[test]
        fn prop_fifo_within_capacity(
            blocks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..8), 0..8),
        ) {
            let storage: RingStorage<64> = RingStorage::new();
            let mut ring = RingBuffer::new(storage.as_slice()).unwrap();
            let (mut tx, mut rx) = ring.split();

            let mut expected = Vec::new();
            for block in &blocks {
                let accepted = tx.push_block(block);
                prop_assert_eq!(accepted, block.len());
                expected.extend_from_slice(block);
            }

            let mut out = Vec::new();
            let mut buf = [0u8; 5];
            loop {
                let before = rx.available();
                let n = rx.read(&mut buf);
                prop_assert_eq!(rx.available(), before - n);
                if n == 0 {
                    break;
                }
                out.extend_from_slice(&buf[..n]);
            }
            prop_assert_eq!(out, expected);
        }

        #[test]
        fn prop_interleaved_never_invents_bytes(
            ops in prop::collection::vec((prop::collection::vec(any::<u8>(), 0..10), 0usize..10), 0..40),
        ) {
            let storage: RingStorage<8> = RingStorage::new();
            let mut ring = RingBuffer::new(storage.as_slice()).unwrap();
            let (mut tx, mut rx) = ring.split();

            let mut accepted_bytes = Vec::new();
            let mut read_bytes = Vec::new();
            for (block, read_len) in &ops {
                let n = tx.push_block(block);
                accepted_bytes.extend_from_slice(&block[..n]);
                prop_assert!(rx.available() <= rx.capacity());

                let mut buf = [0u8; 10];
                let before = rx.available();
                let got = rx.read(&mut buf[..*read_len]);
                prop_assert_eq!(rx.available(), before - got);
                read_bytes.extend_from_slice(&buf[..got]);
            }

            prop_assert!(read_bytes.len() <= accepted_bytes.len());
            prop_assert_eq!(&read_bytes[..], &accepted_bytes[..read_bytes.len()]);
        }
    }
}
