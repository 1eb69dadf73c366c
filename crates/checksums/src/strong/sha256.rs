use digest::Digest as _;
use std::fmt;

use super::StrongDigest;
use crate::value::Digest;

/// Streaming SHA-256 hasher.
///
/// # Examples
///
/// ```
/// use checksums::strong::Sha256;
///
/// let mut hasher = Sha256::new();
/// hasher.update(b"chunk 1");
/// hasher.update(b"chunk 2");
/// assert_eq!(hasher.finalize(), Sha256::digest(b"chunk 1chunk 2"));
/// ```
#[derive(Clone, Default)]
pub struct Sha256 {
    inner: sha2::Sha256,
}

impl Sha256 {
    /// Creates a hasher with an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds additional bytes into the digest state.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finalises the digest and returns the 256-bit output.
    #[must_use]
    pub fn finalize(self) -> Digest {
        Digest::from_bytes(self.inner.finalize().into())
    }

    /// Computes the SHA-256 digest of `data` in one shot.
    #[must_use]
    pub fn digest(data: &[u8]) -> Digest {
        <Self as StrongDigest>::digest(data)
    }
}

impl fmt::Debug for Sha256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sha256").finish_non_exhaustive()
    }
}

impl StrongDigest for Sha256 {
    type Digest = Digest;
    const DIGEST_LEN: usize = Digest::LEN;

    fn new() -> Self {
        Self::new()
    }

    fn update(&mut self, data: &[u8]) {
        self.update(data);
    }

    fn finalize(self) -> Self::Digest {
        self.finalize()
    }
}
