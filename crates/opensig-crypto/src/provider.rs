use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use sha2::{Digest, Sha256};

use crate::error::CryptoError;
use crate::key::EncryptionKey;

/// Injected capability boundary for the cryptographic primitives the
/// protocol consumes: SHA-256 digests, AES-256-GCM authenticated
/// encryption, and cryptographically secure random bytes.
///
/// Implementations must be deterministic for `sha256` and must use the
/// supplied IV verbatim for the AEAD operations; the protocol layers
/// above own IV generation and framing.
pub trait CryptoProvider: Send + Sync {
    /// Whether the underlying primitives are usable in this environment.
    ///
    /// Pure-software providers are always ready; providers wrapping a
    /// platform capability may report `false`, which callers treat as a
    /// fatal environment error rather than retrying.
    fn ready(&self) -> bool {
        true
    }

    /// SHA-256 digest of `data`.
    fn sha256(&self, data: &[u8]) -> [u8; 32];

    /// AES-256-GCM encrypt. Returns ciphertext with the 16-byte
    /// authentication tag appended.
    fn encrypt(
        &self,
        key: &EncryptionKey,
        iv: &[u8; 12],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    /// AES-256-GCM decrypt and verify. Fails on tag mismatch, wrong key,
    /// or truncated ciphertext.
    fn decrypt(
        &self,
        key: &EncryptionKey,
        iv: &[u8; 12],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    /// Fill `buf` with cryptographically secure random bytes.
    fn random_bytes(&self, buf: &mut [u8]);
}

/// Default pure-software provider backed by `sha2`, `aes-gcm`, and the
/// OS random number generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct SoftwareCrypto;

impl CryptoProvider for SoftwareCrypto {
    fn sha256(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    fn encrypt(
        &self,
        key: &EncryptionKey,
        iv: &[u8; 12],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
        cipher
            .encrypt(Nonce::from_slice(iv), plaintext)
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
    }

    fn decrypt(
        &self,
        key: &EncryptionKey,
        iv: &[u8; 12],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
        cipher
            .decrypt(Nonce::from_slice(iv), ciphertext)
            .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
    }

    fn random_bytes(&self, buf: &mut [u8]) {
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), buf);
    }
}
