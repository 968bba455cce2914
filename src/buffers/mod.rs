// Ring buffer for the rolling reading history.
// Invariants: the cursor always points at the next slot to overwrite (the
// oldest survivor once wrapped); the logical length is min(writes, capacity).

#[derive(Debug)]
pub struct RingBuffer<T> {
    buf: Vec<T>,
    cap: usize,
    cursor: usize,
    writes: u64,
}

impl<T: Clone> RingBuffer<T> {
    pub fn new(cap: usize) -> Self {
        assert!(cap > 0, "ring capacity must be nonzero");
        Self {
            buf: Vec::with_capacity(cap),
            cap,
            cursor: 0,
            writes: 0,
        }
    }

    /// Replace the slot at the cursor and advance. O(1), never fails.
    pub fn append(&mut self, item: T) {
        if self.buf.len() < self.cap {
            self.buf.push(item);
        } else {
            self.buf[self.cursor] = item;
        }
        self.cursor = (self.cursor + 1) % self.cap;
        self.writes += 1;
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Full logical copy in chronological order, oldest first.
    /// Before the first wrap storage order is already chronological; after it
    /// the copy is rotated so the entry at the cursor comes first.
    pub fn snapshot(&self) -> Vec<T> {
        if self.buf.len() < self.cap {
            return self.buf.clone();
        }

        let mut out = Vec::with_capacity(self.cap);
        out.extend(self.buf[self.cursor..].iter().cloned());
        out.extend(self.buf[..self.cursor].iter().cloned());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_preserves_append_order_before_wrap() {
        let mut ring = RingBuffer::new(8);
        for value in 1..=5u32 {
            ring.append(value);
        }
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.snapshot(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn snapshot_rotates_to_chronological_after_wrap() {
        let mut ring = RingBuffer::new(3);
        for value in 1..=4u32 {
            ring.append(value);
        }
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.snapshot(), vec![2, 3, 4]);
    }

    #[test]
    fn oldest_survivor_is_nth_appended_item() {
        let mut ring = RingBuffer::new(4);
        for value in 1..=10u32 {
            ring.append(value);
        }
        let snapshot = ring.snapshot();
        assert_eq!(snapshot.len(), 4);
        // 10 appends into capacity 4: the first survivor is append #7.
        assert_eq!(snapshot, vec![7, 8, 9, 10]);
    }

    #[test]
    fn snapshot_at_exact_capacity_is_storage_order() {
        let mut ring = RingBuffer::new(3);
        for value in 1..=3u32 {
            ring.append(value);
        }
        assert_eq!(ring.snapshot(), vec![1, 2, 3]);
    }

    #[test]
    fn snapshot_is_idempotent() {
        let mut ring = RingBuffer::new(3);
        for value in 1..=5u32 {
            ring.append(value);
        }
        assert_eq!(ring.snapshot(), ring.snapshot());
    }

    #[test]
    fn empty_ring_snapshots_to_empty_vec() {
        let ring: RingBuffer<u32> = RingBuffer::new(4);
        assert!(ring.is_empty());
        assert!(ring.snapshot().is_empty());
    }

    #[test]
    fn writes_counter_keeps_total_while_len_caps() {
        let mut ring = RingBuffer::new(2);
        for value in 0..7u32 {
            ring.append(value);
        }
        assert_eq!(ring.writes(), 7);
        assert_eq!(ring.len(), 2);
        assert_eq!(ring.capacity(), 2);
    }
}
