use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::data::SignatureData;
use crate::hash::Pseudonym;

/// A signature discovered on the ledger.
///
/// Produced only by decoding registry log entries; immutable once
/// constructed. `time` is the timestamp the registry contract recorded
/// when the signature was registered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEvent {
    pub time: u64,
    pub signatory: Address,
    pub pseudonym: Pseudonym,
    pub data: SignatureData,
}
