use thiserror::Error;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// No registry contract is known for this chain. Distinct so callers
    /// can branch on "network not supported".
    #[error("no known registry contract for chain {chain_id}")]
    UnsupportedNetwork { chain_id: u64 },

    #[error("no identity selected in the connected wallet")]
    NoSelectedIdentity,

    #[error("transaction send failed: {0}")]
    SendFailed(String),

    #[error("malformed registration calldata: {0}")]
    InvalidCalldata(String),

    #[error("transport error: {0}")]
    Transport(String),
}
