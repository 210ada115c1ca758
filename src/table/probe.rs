/// Linear-probe candidate slots: `start, start + 1, ...` reduced modulo the
/// table capacity, exhausted after one full pass.
///
/// Insert and find build the identical sequence from the same home slot, so
/// any record placed by an insert probe is reachable by the matching find.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    start: u64,
    capacity: u64,
    issued: u64,
}

impl ProbeSequence {
    pub fn new(start: u64, capacity: u64) -> Self {
        Self {
            start: start % capacity,
            capacity,
            issued: 0,
        }
    }
}

impl Iterator for ProbeSequence {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.issued == self.capacity {
            return None;
        }
        let slot = (self.start + self.issued) % self.capacity;
        self.issued += 1;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.capacity - self.issued) as usize;
        (remaining, Some(remaining))
    }
}
