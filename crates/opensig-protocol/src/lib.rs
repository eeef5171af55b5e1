//! OpenSig v0.1 signature-data wire codec.
//!
//! Encodes the optional payload attached to a signature event into the
//! compact versioned binary form published to the ledger, and decodes
//! whatever comes back. Decoding is total: malformed or foreign entries
//! become [`DataContent::Invalid`](opensig_types::DataContent) data, not
//! errors, because a verifier must tolerate anything it finds on-chain.

pub mod codec;
pub mod error;

pub use codec::{SignatureCodec, ENCRYPTED_FLAG, IV_LEN, TYPE_BYTES, TYPE_STRING};
pub use error::CodecError;
