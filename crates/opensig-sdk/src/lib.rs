//! High-level OpenSig API.
//!
//! A [`Document`] proves that a specific file or hash existed and was
//! signed by an identity at a point in time, using an append-only public
//! ledger as the timestamping and discovery medium — without publishing
//! the document or any persistent linkable identifier for it.
//!
//! Typical flow:
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use std::time::Duration;
//! # use opensig_sdk::{Document, SdkResult};
//! # use opensig_types::{Address, SignatureData};
//! # use opensig_crypto::SoftwareCrypto;
//! # use opensig_ledger::{InMemoryLedger, Network};
//! # async fn run() -> SdkResult<()> {
//! # let contract = Address::from_bytes([0; 20]);
//! # let ledger = Arc::new(InMemoryLedger::new(contract, Address::from_bytes([1; 20])));
//! # let network = Network::new(1, "test", contract, 0, Duration::from_secs(1));
//! let mut doc = Document::from_file("contract.pdf", network, ledger, Arc::new(SoftwareCrypto))?;
//! let signatures = doc.verify().await?;      // discover existing signatures
//! let signed = doc.sign(SignatureData::text("approved")).await?;
//! let receipt = signed.confirmation.wait().await?;
//! # Ok(())
//! # }
//! ```

pub mod confirm;
pub mod discovery;
pub mod document;
pub mod error;
pub mod file;

pub use confirm::{Confirmation, ConfirmOptions};
pub use discovery::{discover, DISCOVERY_BATCH_SIZE};
pub use document::{Document, SignedSignature};
pub use error::{SdkError, SdkResult};
pub use file::{hash_bytes, hash_file};
