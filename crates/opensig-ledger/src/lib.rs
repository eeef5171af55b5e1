//! Ledger client boundary for OpenSig.
//!
//! This crate defines the capability interface the signing and discovery
//! logic consumes, without committing to any particular chain client:
//!
//! - [`LedgerClient`] — async trait boundary: submit transactions, poll
//!   receipts, query past registry logs, report the selected identity
//! - [`Network`] / [`NetworkRegistry`] — per-chain registry configuration
//! - [`calldata`] — framing for signature-registration calls
//! - [`InMemoryLedger`] — deterministic fake for tests and embedding

pub mod calldata;
pub mod client;
pub mod error;
pub mod memory;
pub mod network;

pub use client::{LedgerClient, LogEntry, TxReceipt};
pub use error::LedgerError;
pub use memory::InMemoryLedger;
pub use network::{Network, NetworkRegistry};
