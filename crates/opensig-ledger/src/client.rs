use async_trait::async_trait;
use opensig_types::{Address, Pseudonym, TxHash};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Receipt for a mined transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
    /// False if the transaction was mined but reverted.
    pub success: bool,
}

/// A raw signature-registration log entry, as served by the ledger.
///
/// The client implementation is responsible for ABI-level decoding of its
/// chain's log format into this shape; everything above this boundary
/// works with structured entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub block_number: u64,
    /// Registration timestamp recorded by the contract.
    pub time: u64,
    pub signatory: Address,
    pub pseudonym: Pseudonym,
    /// Encoded signature-data payload (may be empty).
    pub data: Vec<u8>,
}

/// Consumed capability: the connected ledger and wallet.
///
/// Implementations wrap a concrete chain client (RPC endpoint, browser
/// wallet, embedded node). All methods may suspend; none are retried at
/// this layer.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Submit a transaction. Returns the transaction handle immediately;
    /// confirmation is tracked separately via [`transaction_receipt`].
    ///
    /// [`transaction_receipt`]: LedgerClient::transaction_receipt
    async fn send_transaction(
        &self,
        to: Address,
        from: Address,
        data: Vec<u8>,
    ) -> Result<TxHash, LedgerError>;

    /// Receipt for a submitted transaction, or `None` while still pending.
    async fn transaction_receipt(&self, tx: &TxHash) -> Result<Option<TxReceipt>, LedgerError>;

    /// All registry log entries from `from_block` onward whose indexed
    /// pseudonym topic matches any of `topics`, in ledger event order.
    async fn past_logs(
        &self,
        contract: Address,
        from_block: u64,
        topics: &[Pseudonym],
    ) -> Result<Vec<LogEntry>, LedgerError>;

    /// The identity that will sign submitted transactions.
    async fn selected_identity(&self) -> Result<Address, LedgerError>;
}
