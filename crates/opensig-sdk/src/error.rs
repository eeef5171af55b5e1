use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the high-level API.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Environment error: the injected crypto provider reported itself
    /// unusable. Fatal, never retried.
    #[error("crypto capability unavailable in this environment")]
    CryptoUnavailable,

    /// Usage error: `sign` requires a prior successful `verify`.
    #[error("must verify before signing")]
    MustVerifyBeforeSigning,

    #[error("ledger error: {0}")]
    Ledger(#[from] opensig_ledger::LedgerError),

    #[error("codec error: {0}")]
    Codec(#[from] opensig_protocol::CodecError),

    /// The signing transaction was mined but reverted.
    #[error("transaction reverted in block {block_number}")]
    TransactionReverted { block_number: u64 },

    /// The confirmation deadline elapsed with the transaction still
    /// pending. The transaction may yet be mined.
    #[error("transaction unconfirmed after {0:?}")]
    ConfirmationTimeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
