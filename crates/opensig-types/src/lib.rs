//! Foundation types for OpenSig.
//!
//! This crate provides the value types shared by every other OpenSig crate:
//!
//! - [`DocumentHash`] — 32-byte SHA-256 identity of a document
//! - [`Pseudonym`] — one entry in a document's deterministic hash chain,
//!   the public on-ledger handle for a single signature
//! - [`Address`] / [`TxHash`] — ledger identities and transaction handles
//! - [`SignatureData`] — the tagged, versioned payload attached to a signature
//! - [`SignatureEvent`] — a decoded on-ledger signature

pub mod address;
pub mod data;
pub mod error;
pub mod event;
pub mod hash;

pub use address::{Address, TxHash};
pub use data::{DataContent, SignatureData, DATA_VERSION};
pub use error::TypeError;
pub use event::SignatureEvent;
pub use hash::{DocumentHash, Pseudonym};
