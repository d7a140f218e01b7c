/// Fixed-capacity ring of the most recent bytes. Oldest byte is evicted first.
#[derive(Debug, Clone)]
pub struct RecentBytes<const N: usize> {
    bytes: [u8; N],
    pos: usize,
    len: usize,
}

impl<const N: usize> Default for RecentBytes<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RecentBytes<N> {
    pub fn new() -> Self {
        Self {
            bytes: [0; N],
            pos: 0,
            len: 0,
        }
    }

    pub fn push(&mut self, byte: u8) {
        if N == 0 {
            return;
        }
        self.bytes[self.pos] = byte;
        self.pos = (self.pos + 1) % N;
        if self.len < N {
            self.len += 1;
        }
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.push(byte);
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        let start = (self.pos + N - self.len) % N.max(1);
        (0..self.len).map(move |i| self.bytes[(start + i) % N])
    }

    pub fn matches(&self, expected: &[u8]) -> bool {
        self.len == expected.len() && self.iter().eq(expected.iter().copied())
    }
}
