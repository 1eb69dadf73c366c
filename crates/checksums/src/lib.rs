#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `checksums` provides the SHA-256 digests zpipe uses to confirm that a
//! compressed stream decodes back to exactly the bytes it was built from.
//!
//! - [`strong::Sha256`] is a streaming hasher behind the
//!   [`strong::StrongDigest`] trait.
//! - [`Digest`] is the 32-byte value, rendered and parsed as hex.
//! - [`DigestVerifier`] hashes readers in fixed-size chunks;
//!   [`HashingWriter`] hashes bytes as they are written.
//!
//! # Examples
//!
//! ```
//! use checksums::{DigestVerifier, HashingWriter};
//! use std::io::Write;
//!
//! let baseline = DigestVerifier::new().digest(&mut &b"payload"[..]).unwrap();
//!
//! let mut writer = HashingWriter::new(std::io::sink());
//! writer.write_all(b"payload").unwrap();
//! let (_, produced) = writer.finalize();
//!
//! assert!(DigestVerifier::equal(&baseline, &produced));
//! ```

pub mod strong;
mod value;
mod verifier;

pub use value::{Digest, DigestParseError};
pub use verifier::{DEFAULT_CHUNK_SIZE, DigestVerifier, HashingWriter};
