use std::sync::Arc;
use std::time::Duration;

use opensig_ledger::{LedgerClient, Network, TxReceipt};
use opensig_types::TxHash;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

use crate::error::{SdkError, SdkResult};

/// Interval between receipt polls once the initial delay has passed.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Polling schedule for [`Confirmation::wait`].
#[derive(Clone, Debug)]
pub struct ConfirmOptions {
    /// Wait this long before the first poll — one nominal block time,
    /// since the transaction cannot be mined sooner.
    pub initial_delay: Duration,
    pub poll_interval: Duration,
    /// Give up after this long with the transaction still pending.
    /// `None` polls indefinitely.
    pub deadline: Option<Duration>,
}

impl ConfirmOptions {
    pub fn for_network(network: &Network) -> Self {
        Self {
            initial_delay: network.block_time,
            poll_interval: POLL_INTERVAL,
            deadline: None,
        }
    }
}

/// Tracks a submitted signing transaction to finality.
///
/// Resolves with the receipt once the ledger reports the transaction
/// mined and successful; fails with [`SdkError::TransactionReverted`]
/// if it mined but failed.
pub struct Confirmation {
    ledger: Arc<dyn LedgerClient>,
    tx_hash: TxHash,
    options: ConfirmOptions,
}

impl Confirmation {
    pub(crate) fn new(ledger: Arc<dyn LedgerClient>, tx_hash: TxHash, options: ConfirmOptions) -> Self {
        Self {
            ledger,
            tx_hash,
            options,
        }
    }

    pub fn tx_hash(&self) -> &TxHash {
        &self.tx_hash
    }

    /// Bound the wait; a pending transaction past the deadline yields
    /// [`SdkError::ConfirmationTimeout`].
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.options.deadline = Some(deadline);
        self
    }

    /// Poll until the transaction is mined.
    pub async fn wait(self) -> SdkResult<TxReceipt> {
        let started = Instant::now();
        sleep(self.options.initial_delay).await;
        loop {
            if let Some(receipt) = self.ledger.transaction_receipt(&self.tx_hash).await? {
                debug!(tx = %self.tx_hash, block = receipt.block_number, success = receipt.success, "transaction mined");
                if receipt.success {
                    return Ok(receipt);
                }
                return Err(SdkError::TransactionReverted {
                    block_number: receipt.block_number,
                });
            }
            trace!(tx = %self.tx_hash, "transaction still pending");
            if let Some(deadline) = self.options.deadline {
                if started.elapsed() >= deadline {
                    return Err(SdkError::ConfirmationTimeout(deadline));
                }
            }
            sleep(self.options.poll_interval).await;
        }
    }
}
