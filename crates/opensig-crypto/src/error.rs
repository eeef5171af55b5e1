use thiserror::Error;

/// Errors produced by cryptographic operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// Authentication-tag mismatch, wrong key, or truncated ciphertext.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}
