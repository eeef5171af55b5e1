//! Cryptographic layer for OpenSig.
//!
//! Provides:
//! - [`CryptoProvider`] — the injected capability boundary for SHA-256,
//!   AES-256-GCM, and secure random bytes
//! - [`SoftwareCrypto`] — the default pure-software provider
//! - [`EncryptionKey`] — per-document symmetric key (zeroized on drop)
//! - [`ChainSeed`] — network-scoped root of a document's pseudonym chain
//! - [`HashChain`] — the lazy, cached pseudonym generator
//!
//! All crypto operations wrap established libraries — no custom cryptography.

pub mod chain;
pub mod error;
pub mod key;
pub mod provider;
pub mod seed;

pub use chain::HashChain;
pub use error::CryptoError;
pub use key::EncryptionKey;
pub use provider::{CryptoProvider, SoftwareCrypto};
pub use seed::ChainSeed;
