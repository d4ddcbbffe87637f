//! Running 16-bit attribute checksum.

/// Wrapping sum of the bytes of one attribute value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checksum(u16);

impl Checksum {
    pub fn new() -> Self {
        Self(0)
    }

    /// Fold `bytes` into the sum, modulo 65536.
    pub fn fold(&mut self, bytes: &[u8]) {
        self.0 = bytes
            .iter()
            .fold(self.0, |acc, &b| acc.wrapping_add(u16::from(b)));
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// Compare with the signed word stored after an attribute value.
    pub fn matches(self, stored: i16) -> bool {
        self.0 == stored as u16
    }

    /// Checksum of a complete byte run.
    pub fn of(bytes: &[u8]) -> Self {
        let mut sum = Self::new();
        sum.fold(bytes);
        sum
    }
}
