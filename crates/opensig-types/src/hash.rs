use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

fn parse_hex32(s: &str) -> Result<[u8; 32], TypeError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
    if bytes.len() != 32 {
        return Err(TypeError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        });
    }
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}

/// The 32-byte SHA-256 identity of a document.
///
/// Derived either directly from caller-supplied bytes or by hashing file
/// contents. Immutable once set; all downstream state keys off it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentHash([u8; 32]);

impl DocumentHash {
    /// Wrap a raw 32-byte digest.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from a hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        parse_hex32(s).map(Self)
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// `0x`-prefixed hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Short identifier (first 8 hex characters) for log output.
    pub fn short_id(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for DocumentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentHash({})", self.short_id())
    }
}

impl fmt::Display for DocumentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// One entry in a document's deterministic hash chain.
///
/// A pseudonym is the public, unlinkable on-ledger handle for exactly one
/// signature. It is published as the `0x`-hex indexed log topic of the
/// registry contract's signature event. Without the chain seed it cannot
/// be linked to the document or to any other pseudonym in the chain.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pseudonym([u8; 32]);

impl Pseudonym {
    /// Wrap a raw 32-byte digest.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from a hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        parse_hex32(s).map(Self)
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// `0x`-prefixed hex string, the wire form used as a log topic.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Pseudonym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pseudonym({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Pseudonym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_hash_hex_roundtrip() {
        let h = DocumentHash::from_bytes([0xAB; 32]);
        let parsed = DocumentHash::from_hex(&h.to_hex()).unwrap();
        assert_eq!(h, parsed);
    }

    #[test]
    fn document_hash_accepts_unprefixed_hex() {
        let h = DocumentHash::from_bytes([7; 32]);
        let unprefixed = hex::encode(h.as_bytes());
        assert_eq!(DocumentHash::from_hex(&unprefixed).unwrap(), h);
    }

    #[test]
    fn document_hash_rejects_wrong_length() {
        let err = DocumentHash::from_hex("0xabcd").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 32,
                actual: 2
            }
        );
    }

    #[test]
    fn document_hash_rejects_bad_hex() {
        let err = DocumentHash::from_hex("0xzz").unwrap_err();
        assert!(matches!(err, TypeError::InvalidHex(_)));
    }

    #[test]
    fn pseudonym_wire_form_is_0x_prefixed() {
        let p = Pseudonym::from_bytes([0; 32]);
        assert!(p.to_hex().starts_with("0x"));
        assert_eq!(p.to_hex().len(), 66);
    }

    #[test]
    fn pseudonym_hex_roundtrip() {
        let p = Pseudonym::from_bytes([0xC4; 32]);
        assert_eq!(Pseudonym::from_hex(&p.to_hex()).unwrap(), p);
    }

    #[test]
    fn serde_roundtrip() {
        let h = DocumentHash::from_bytes([9; 32]);
        let json = serde_json::to_string(&h).unwrap();
        let parsed: DocumentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, parsed);
    }
}
