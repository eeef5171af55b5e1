//! Framing for signature-registration calls.
//!
//! The client boundary is `send_transaction(to, from, data)`, so the
//! registration call itself is carried inside `data`: a 4-byte tag,
//! the 32-byte pseudonym, then the encoded payload. A chain-specific
//! [`LedgerClient`](crate::LedgerClient) maps this framing onto its
//! registry contract's actual ABI.

use opensig_types::Pseudonym;

use crate::error::LedgerError;

/// Tag identifying a `registerSignature` call in this framing.
pub const REGISTER_TAG: [u8; 4] = [0x6f, 0x73, 0x01, 0x52];

/// Encode a registration call: tag ∥ pseudonym ∥ payload.
pub fn encode_registration(pseudonym: &Pseudonym, payload: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + 32 + payload.len());
    data.extend_from_slice(&REGISTER_TAG);
    data.extend_from_slice(pseudonym.as_bytes());
    data.extend_from_slice(payload);
    data
}

/// Decode a registration call back into pseudonym and payload.
pub fn decode_registration(data: &[u8]) -> Result<(Pseudonym, Vec<u8>), LedgerError> {
    if data.len() < 4 + 32 {
        return Err(LedgerError::InvalidCalldata(format!(
            "calldata is {} bytes, minimum is 36",
            data.len()
        )));
    }
    if data[..4] != REGISTER_TAG {
        return Err(LedgerError::InvalidCalldata(format!(
            "unknown call tag 0x{}",
            hex::encode(&data[..4])
        )));
    }
    let mut pseudonym = [0u8; 32];
    pseudonym.copy_from_slice(&data[4..36]);
    Ok((Pseudonym::from_bytes(pseudonym), data[36..].to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let pseudonym = Pseudonym::from_bytes([0x33; 32]);
        let payload = vec![0x00, 0x01, 0xAB];
        let data = encode_registration(&pseudonym, &payload);
        let (p, d) = decode_registration(&data).unwrap();
        assert_eq!(p, pseudonym);
        assert_eq!(d, payload);
    }

    #[test]
    fn empty_payload_is_allowed() {
        let pseudonym = Pseudonym::from_bytes([0x33; 32]);
        let data = encode_registration(&pseudonym, &[]);
        assert_eq!(data.len(), 36);
        let (_, d) = decode_registration(&data).unwrap();
        assert!(d.is_empty());
    }

    #[test]
    fn short_calldata_rejected() {
        let err = decode_registration(&[0x6f, 0x73]).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidCalldata(_)));
    }

    #[test]
    fn wrong_tag_rejected() {
        let mut data = encode_registration(&Pseudonym::from_bytes([0; 32]), &[]);
        data[0] = 0xFF;
        let err = decode_registration(&data).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidCalldata(_)));
    }
}
