use std::fmt;

use opensig_types::DocumentHash;
use serde::{Deserialize, Serialize};

use crate::provider::CryptoProvider;

/// Network-scoped root of a document's pseudonym chain.
///
/// seed = SHA-256( chain-id-digit-bytes ∥ document hash )
///
/// The chain id contributes one byte per decimal digit, each holding the
/// digit's numeric value (chain 137 → bytes `[1, 3, 7]`). This exact
/// derivation is part of the wire protocol: any party holding the
/// document hash must arrive at the same seed to find its signatures.
/// Scoping by chain id makes the same document produce unlinkable,
/// network-specific chains.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSeed([u8; 32]);

impl ChainSeed {
    /// Derive the seed for `document` on the network with `chain_id`.
    pub fn derive(chain_id: u64, document: &DocumentHash, crypto: &dyn CryptoProvider) -> Self {
        let mut input = chain_id_digits(chain_id);
        input.extend_from_slice(document.as_bytes());
        Self(crypto.sha256(&input))
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for ChainSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainSeed({})", hex::encode(&self.0[..4]))
    }
}

/// Decimal digits of the chain id as byte values 0–9.
fn chain_id_digits(chain_id: u64) -> Vec<u8> {
    chain_id.to_string().bytes().map(|b| b - b'0').collect()
}
