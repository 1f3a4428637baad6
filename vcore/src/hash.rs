//! Checksums for reporting, not integrity.

use std::hash::Hasher as StdHasher;

use twox_hash::XxHash32;

/// Streaming xxhash32, for fingerprinting blobs before and after a rewrite.
pub struct Checksum(XxHash32);

impl Checksum {
    pub fn new() -> Checksum {
        Checksum(XxHash32::with_seed(0))
    }

    pub fn update(&mut self, data: &[u8]) {
        self.0.write(data);
    }

    pub fn finalize(self) -> u32 {
        self.0.finish() as u32
    }
}

impl Default for Checksum {
    fn default() -> Self {
        Checksum::new()
    }
}

/// Fingerprint of a whole buffer, for reporting whether a rewrite changed it.
pub fn checksum(data: &[u8]) -> u32 {
    let mut hash = Checksum::new();
    hash.update(data);
    hash.finalize()
}

pub fn to_hex(checksum: u32) -> String {
    hex::encode(checksum.to_be_bytes())
}
