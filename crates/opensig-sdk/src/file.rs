use std::path::Path;

use opensig_crypto::CryptoProvider;
use opensig_types::DocumentHash;

use crate::error::SdkResult;

/// Establish a document identity from raw bytes.
pub fn hash_bytes(data: &[u8], crypto: &dyn CryptoProvider) -> DocumentHash {
    DocumentHash::from_bytes(crypto.sha256(data))
}

/// Establish a document identity by hashing file contents.
pub async fn hash_file(path: &Path, crypto: &dyn CryptoProvider) -> SdkResult<DocumentHash> {
    let contents = tokio::fs::read(path).await?;
    Ok(hash_bytes(&contents, crypto))
}
