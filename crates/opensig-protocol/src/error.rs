use thiserror::Error;

/// Errors produced when encoding a payload. Decoding never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// `DataContent::Invalid` exists only as a decode outcome and cannot
    /// be published.
    #[error("invalid content cannot be encoded")]
    UnencodableContent,

    #[error("crypto error: {0}")]
    Crypto(#[from] opensig_crypto::CryptoError),
}
