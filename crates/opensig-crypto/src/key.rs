use opensig_types::DocumentHash;
use zeroize::Zeroize;

/// Per-document AES-256-GCM key.
///
/// The raw 32-byte document hash is imported directly as the symmetric
/// key — no separate KDF round. The key is reused across all signatures
/// of one document; that reuse is safe only because every encryption uses
/// a fresh random IV (see [`crate::CryptoProvider`]).
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct EncryptionKey([u8; 32]);

impl EncryptionKey {
    /// Derive the document's encryption key from its identity.
    pub fn from_document(hash: &DocumentHash) -> Self {
        Self(*hash.as_bytes())
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        write!(f, "EncryptionKey(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_the_document_hash() {
        let doc = DocumentHash::from_bytes([0x42; 32]);
        let key = EncryptionKey::from_document(&doc);
        assert_eq!(key.as_bytes(), doc.as_bytes());
    }

    #[test]
    fn debug_hides_key_material() {
        let key = EncryptionKey::from_bytes([0x42; 32]);
        assert_eq!(format!("{key:?}"), "EncryptionKey(..)");
    }
}
