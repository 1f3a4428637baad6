use std::fmt;

/// A fixed size block of bytes whose meaning is not known.
///
/// These are carried through decode and encode untouched, the only thing
/// known about them is their width.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opaque<const N: usize>([u8; N]);

impl<const N: usize> Opaque<N> {
    pub const LEN: usize = N;

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> From<[u8; N]> for Opaque<N> {
    fn from(bytes: [u8; N]) -> Self {
        Opaque(bytes)
    }
}

impl<const N: usize> Default for Opaque<N> {
    fn default() -> Self {
        Opaque([0; N])
    }
}

impl<const N: usize> fmt::Debug for Opaque<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque<{}>({})", N, hex::encode(self.0))
    }
}
