//! Cryptographic digests used to confirm round-trip fidelity.

mod sha256;

pub use sha256::Sha256;

/// Streaming hash algorithm with a fixed-size output.
///
/// Implementors accept input incrementally through [`update`](Self::update)
/// and produce their digest once via [`finalize`](Self::finalize).
pub trait StrongDigest: Sized {
    /// Digest value produced by [`finalize`](Self::finalize).
    type Digest: AsRef<[u8]> + Copy + Eq;

    /// Length of the digest in bytes.
    const DIGEST_LEN: usize;

    /// Creates a hasher with an empty state.
    fn new() -> Self;

    /// Feeds additional bytes into the digest state.
    fn update(&mut self, data: &[u8]);

    /// Consumes the hasher and returns the digest.
    fn finalize(self) -> Self::Digest;

    /// Computes the digest of `data` in one shot.
    fn digest(data: &[u8]) -> Self::Digest {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}
