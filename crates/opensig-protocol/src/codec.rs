use opensig_crypto::{CryptoError, CryptoProvider, EncryptionKey};
use opensig_types::{DataContent, SignatureData, DATA_VERSION};
use tracing::warn;

use crate::error::CodecError;

/// Bit 7 of the flags byte: content is AEAD-encrypted.
pub const ENCRYPTED_FLAG: u8 = 0x80;
/// Content type: UTF-16BE string (2 bytes per code unit).
pub const TYPE_STRING: u8 = 0x00;
/// Content type: raw bytes.
pub const TYPE_BYTES: u8 = 0x01;
/// Length of the random IV prepended to encrypted content.
pub const IV_LEN: usize = 12;

/// Codec for the OpenSig v0.1 signature-data format.
///
/// Wire layout: byte 0 = format version (`0x00`); byte 1 = flags
/// (bit 7 encrypted, low bits content type); remaining bytes = content.
/// Encrypted content is `IV ∥ ciphertext+tag`. An empty payload encodes
/// to the empty byte string, with no version or flags bytes at all.
pub struct SignatureCodec;

impl SignatureCodec {
    /// Encode a payload for publication.
    pub fn encode(
        data: &SignatureData,
        key: &EncryptionKey,
        crypto: &dyn CryptoProvider,
    ) -> Result<Vec<u8>, CodecError> {
        let (content_type, content): (u8, Vec<u8>) = match &data.content {
            DataContent::None => return Ok(Vec::new()),
            DataContent::Text(s) if s.is_empty() => return Ok(Vec::new()),
            DataContent::Bytes(b) if b.is_empty() => return Ok(Vec::new()),
            DataContent::Text(s) => (TYPE_STRING, utf16_be_bytes(s)),
            DataContent::Bytes(b) => (TYPE_BYTES, b.clone()),
            DataContent::Invalid(_) => return Err(CodecError::UnencodableContent),
        };

        let mut flags = content_type;
        let body = if data.encrypted {
            flags |= ENCRYPTED_FLAG;
            let mut iv = [0u8; IV_LEN];
            crypto.random_bytes(&mut iv);
            let ciphertext = crypto.encrypt(key, &iv, &content)?;
            let mut body = Vec::with_capacity(IV_LEN + ciphertext.len());
            body.extend_from_slice(&iv);
            body.extend_from_slice(&ciphertext);
            body
        } else {
            content
        };

        let mut bytes = Vec::with_capacity(2 + body.len());
        bytes.push(DATA_VERSION);
        bytes.push(flags);
        bytes.extend_from_slice(&body);
        Ok(bytes)
    }

    /// Decode payload bytes found on the ledger.
    ///
    /// Never fails: short payloads and unknown content types become
    /// `DataContent::Invalid`, and encrypted content that cannot be
    /// decrypted (wrong key, tampering) becomes empty content of the
    /// declared type so the signature itself still counts.
    pub fn decode(bytes: &[u8], key: &EncryptionKey, crypto: &dyn CryptoProvider) -> SignatureData {
        if bytes.is_empty() {
            return SignatureData::none();
        }
        if bytes.len() < 3 {
            return SignatureData {
                version: bytes[0],
                encrypted: false,
                content: DataContent::Invalid(format!(
                    "data is {} bytes, minimum is 3",
                    bytes.len()
                )),
            };
        }

        let version = bytes[0];
        let flags = bytes[1];
        let encrypted = flags & ENCRYPTED_FLAG != 0;
        let content_type = flags & !ENCRYPTED_FLAG;

        let mut content = bytes[2..].to_vec();
        if encrypted && !content.is_empty() {
            content = match decrypt_content(&content, key, crypto) {
                Ok(plaintext) => plaintext,
                Err(e) => {
                    warn!(error = %e, "failed to decrypt signature data");
                    Vec::new()
                }
            };
        }

        let content = match content_type {
            TYPE_STRING => DataContent::Text(utf16_be_string(&content)),
            TYPE_BYTES => DataContent::Bytes(content),
            other => {
                DataContent::Invalid(format!("unrecognised type: {other} (version={version})"))
            }
        };

        SignatureData {
            version,
            encrypted,
            content,
        }
    }
}

fn decrypt_content(
    body: &[u8],
    key: &EncryptionKey,
    crypto: &dyn CryptoProvider,
) -> Result<Vec<u8>, CryptoError> {
    if body.len() < IV_LEN {
        return Err(CryptoError::DecryptionFailed(
            "content shorter than IV".into(),
        ));
    }
    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&body[..IV_LEN]);
    crypto.decrypt(key, &iv, &body[IV_LEN..])
}

/// UTF-16 code units, big-endian, two bytes per unit. This matches the
/// original wire form of four hex digits per code unit.
fn utf16_be_bytes(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|u| u.to_be_bytes()).collect()
}

fn utf16_be_string(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks(2)
        .map(|c| {
            if c.len() == 2 {
                u16::from_be_bytes([c[0], c[1]])
            } else {
                c[0] as u16
            }
        })
        .collect();
    String::from_utf16_lossy(&units)
}

#[cfg(test)]
mod tests {
    use opensig_crypto::SoftwareCrypto;

    use super::*;

    fn key() -> EncryptionKey {
        EncryptionKey::from_bytes([0x51; 32])
    }

    fn encode(data: &SignatureData) -> Vec<u8> {
        SignatureCodec::encode(data, &key(), &SoftwareCrypto).unwrap()
    }

    fn decode(bytes: &[u8]) -> SignatureData {
        SignatureCodec::decode(bytes, &key(), &SoftwareCrypto)
    }

    #[test]
    fn none_encodes_to_empty() {
        assert!(encode(&SignatureData::none()).is_empty());
        assert!(encode(&SignatureData::text("")).is_empty());
        assert!(encode(&SignatureData::bytes(Vec::new())).is_empty());
    }

    #[test]
    fn empty_decodes_to_none() {
        assert_eq!(decode(&[]), SignatureData::none());
    }

    #[test]
    fn plaintext_string_wire_layout() {
        let bytes = encode(&SignatureData::text("Hi"));
        // version, flags, then UTF-16BE "Hi"
        assert_eq!(bytes, vec![0x00, TYPE_STRING, 0x00, b'H', 0x00, b'i']);
    }

    #[test]
    fn plaintext_bytes_wire_layout() {
        let bytes = encode(&SignatureData::bytes(vec![0xDE, 0xAD]));
        assert_eq!(bytes, vec![0x00, TYPE_BYTES, 0xDE, 0xAD]);
    }

    #[test]
    fn roundtrip_plaintext() {
        for data in [
            SignatureData::text("hello"),
            SignatureData::bytes(vec![0xDE, 0xAD, 0xBE, 0xEF]),
        ] {
            assert_eq!(decode(&encode(&data)), data);
        }
    }

    #[test]
    fn roundtrip_encrypted() {
        for data in [
            SignatureData::text("hello").encrypted(),
            SignatureData::bytes(vec![0xDE, 0xAD, 0xBE, 0xEF]).encrypted(),
        ] {
            assert_eq!(decode(&encode(&data)), data);
        }
    }

    #[test]
    fn roundtrip_none_loses_nothing_observable() {
        // An empty payload has no wire presence, so the encrypted flag
        // cannot survive; both variants normalize to `none`.
        assert_eq!(decode(&encode(&SignatureData::none())), SignatureData::none());
        assert_eq!(
            decode(&encode(&SignatureData::none().encrypted())),
            SignatureData::none()
        );
    }

    #[test]
    fn roundtrip_unicode_beyond_ascii() {
        let data = SignatureData::text("héllo ☃");
        assert_eq!(decode(&encode(&data)), data);
    }

    #[test]
    fn encrypted_wire_is_not_plaintext() {
        let bytes = encode(&SignatureData::text("secret").encrypted());
        assert_eq!(bytes[0], 0x00);
        assert_eq!(bytes[1], ENCRYPTED_FLAG | TYPE_STRING);
        // IV + ciphertext + tag follow the header; the UTF-16BE plaintext
        // must not appear anywhere in the body.
        assert!(bytes.len() >= 2 + IV_LEN + 16);
        let plaintext = utf16_be_bytes("secret");
        assert!(!bytes
            .windows(plaintext.len())
            .any(|w| w == plaintext.as_slice()));
    }

    #[test]
    fn short_payload_is_invalid() {
        for bytes in [&[0x00][..], &[0x00, 0x00][..]] {
            let data = decode(bytes);
            assert!(data.content.is_invalid());
        }
    }

    #[test]
    fn unknown_type_is_invalid_with_diagnostic() {
        let data = decode(&[0x00, 0x07, 0xAA]);
        match data.content {
            DataContent::Invalid(msg) => assert!(msg.contains("unrecognised type: 7")),
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[test]
    fn tampered_ciphertext_decodes_to_empty_declared_type() {
        let mut bytes = encode(&SignatureData::text("v1").encrypted());
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let data = decode(&bytes);
        assert!(data.encrypted);
        assert_eq!(data.content, DataContent::Text(String::new()));
    }

    #[test]
    fn every_ciphertext_bit_flip_hides_plaintext() {
        let bytes = encode(&SignatureData::text("v1").encrypted());
        for i in 2..bytes.len() {
            let mut tampered = bytes.clone();
            tampered[i] ^= 0x01;
            let data = decode(&tampered);
            assert_ne!(
                data.content,
                DataContent::Text("v1".into()),
                "flip at byte {i} leaked plaintext"
            );
        }
    }

    #[test]
    fn wrong_key_decodes_to_empty_declared_type() {
        let bytes = encode(&SignatureData::bytes(vec![1, 2, 3]).encrypted());
        let data = SignatureCodec::decode(
            &bytes,
            &EncryptionKey::from_bytes([0xFF; 32]),
            &SoftwareCrypto,
        );
        assert_eq!(data.content, DataContent::Bytes(Vec::new()));
    }

    #[test]
    fn truncated_encrypted_body_decodes_to_empty() {
        // Encrypted flag set but body shorter than the IV.
        let bytes = [0x00, ENCRYPTED_FLAG | TYPE_STRING, 0x01, 0x02];
        let data = decode(&bytes);
        assert_eq!(data.content, DataContent::Text(String::new()));
    }

    #[test]
    fn invalid_content_cannot_be_encoded() {
        let data = SignatureData {
            version: 0,
            encrypted: false,
            content: DataContent::Invalid("x".into()),
        };
        let err = SignatureCodec::encode(&data, &key(), &SoftwareCrypto).unwrap_err();
        assert_eq!(err, CodecError::UnencodableContent);
    }

    #[test]
    fn fresh_iv_per_encryption() {
        let data = SignatureData::text("same").encrypted();
        let a = encode(&data);
        let b = encode(&data);
        assert_ne!(a, b);
    }
}
