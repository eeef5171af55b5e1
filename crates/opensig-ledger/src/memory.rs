use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use opensig_types::{Address, Pseudonym, TxHash};
use tracing::debug;

use crate::calldata;
use crate::client::{LedgerClient, LogEntry, TxReceipt};
use crate::error::LedgerError;

const GENESIS_TIME: u64 = 1_700_000_000;
const BLOCK_INTERVAL_SECS: u64 = 12;

/// In-memory ledger for tests, local demos, and embedding.
///
/// Understands the registration calldata framing: a transaction sent to
/// the registry address is decoded and appended as a [`LogEntry`], so
/// end-to-end sign → verify flows run without a real chain. Test hooks
/// inject send failures, reverted transactions, and delayed receipts.
pub struct InMemoryLedger {
    registry: Address,
    identity: Address,
    inner: RwLock<State>,
    queries: AtomicUsize,
}

#[derive(Default)]
struct State {
    logs: Vec<LogEntry>,
    receipts: HashMap<TxHash, Pending>,
    next_block: u64,
    tx_counter: u64,
    fail_next_send: Option<String>,
    revert_next: bool,
    withhold_polls: u32,
}

struct Pending {
    receipt: TxReceipt,
    remaining_polls: u32,
}

impl InMemoryLedger {
    pub fn new(registry: Address, identity: Address) -> Self {
        Self {
            registry,
            identity,
            inner: RwLock::new(State {
                next_block: 1,
                ..State::default()
            }),
            queries: AtomicUsize::new(0),
        }
    }

    /// Make the next `send_transaction` fail before submission.
    pub fn fail_next_send(&self, reason: &str) {
        if let Ok(mut state) = self.inner.write() {
            state.fail_next_send = Some(reason.into());
        }
    }

    /// Make the next transaction mine but revert (no log emitted).
    pub fn revert_next(&self) {
        if let Ok(mut state) = self.inner.write() {
            state.revert_next = true;
        }
    }

    /// Report the next transaction as pending for `polls` receipt queries
    /// before serving its receipt.
    pub fn withhold_receipt(&self, polls: u32) {
        if let Ok(mut state) = self.inner.write() {
            state.withhold_polls = polls;
        }
    }

    /// Append a log entry directly, bypassing the transaction path.
    /// Used to seed pre-existing or foreign signatures.
    pub fn append_log(&self, signatory: Address, pseudonym: Pseudonym, data: Vec<u8>) {
        if let Ok(mut state) = self.inner.write() {
            let block = state.next_block;
            state.next_block += 1;
            state.logs.push(LogEntry {
                block_number: block,
                time: GENESIS_TIME + block * BLOCK_INTERVAL_SECS,
                signatory,
                pseudonym,
                data,
            });
        }
    }

    /// Number of `past_logs` queries served so far.
    pub fn past_log_queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn log_count(&self) -> usize {
        self.inner.read().map(|s| s.logs.len()).unwrap_or(0)
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>, LedgerError> {
        self.inner
            .write()
            .map_err(|_| LedgerError::Transport("ledger lock poisoned".into()))
    }

    fn read_lock(&self) -> Result<std::sync::RwLockReadGuard<'_, State>, LedgerError> {
        self.inner
            .read()
            .map_err(|_| LedgerError::Transport("ledger lock poisoned".into()))
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn send_transaction(
        &self,
        to: Address,
        from: Address,
        data: Vec<u8>,
    ) -> Result<TxHash, LedgerError> {
        let mut state = self.write_lock()?;

        if let Some(reason) = state.fail_next_send.take() {
            return Err(LedgerError::SendFailed(reason));
        }
        if to != self.registry {
            return Err(LedgerError::SendFailed(format!(
                "no contract at {to}"
            )));
        }
        let (pseudonym, payload) = calldata::decode_registration(&data)?;

        state.tx_counter += 1;
        let mut hash = [0u8; 32];
        hash[..8].copy_from_slice(&state.tx_counter.to_be_bytes());
        let tx_hash = TxHash::from_bytes(hash);

        let block = state.next_block;
        state.next_block += 1;
        let success = !std::mem::take(&mut state.revert_next);

        if success {
            state.logs.push(LogEntry {
                block_number: block,
                time: GENESIS_TIME + block * BLOCK_INTERVAL_SECS,
                signatory: from,
                pseudonym,
                data: payload,
            });
        }

        let remaining_polls = std::mem::take(&mut state.withhold_polls);
        state.receipts.insert(
            tx_hash,
            Pending {
                receipt: TxReceipt {
                    tx_hash,
                    block_number: block,
                    success,
                },
                remaining_polls,
            },
        );

        debug!(tx = %tx_hash, block, success, "transaction accepted");
        Ok(tx_hash)
    }

    async fn transaction_receipt(&self, tx: &TxHash) -> Result<Option<TxReceipt>, LedgerError> {
        let mut state = self.write_lock()?;
        match state.receipts.get_mut(tx) {
            Some(pending) if pending.remaining_polls > 0 => {
                pending.remaining_polls -= 1;
                Ok(None)
            }
            Some(pending) => Ok(Some(pending.receipt.clone())),
            None => Ok(None),
        }
    }

    async fn past_logs(
        &self,
        contract: Address,
        from_block: u64,
        topics: &[Pseudonym],
    ) -> Result<Vec<LogEntry>, LedgerError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let state = self.read_lock()?;
        if contract != self.registry {
            return Ok(Vec::new());
        }
        let matches: Vec<LogEntry> = state
            .logs
            .iter()
            .filter(|log| log.block_number >= from_block && topics.contains(&log.pseudonym))
            .cloned()
            .collect();
        debug!(
            topics = topics.len(),
            matched = matches.len(),
            "past_logs query"
        );
        Ok(matches)
    }

    async fn selected_identity(&self) -> Result<Address, LedgerError> {
        Ok(self.identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Address {
        Address::from_bytes([0xEE; 20])
    }

    fn signer() -> Address {
        Address::from_bytes([0x01; 20])
    }

    fn ledger() -> InMemoryLedger {
        InMemoryLedger::new(registry(), signer())
    }

    fn pseudonym(b: u8) -> Pseudonym {
        Pseudonym::from_bytes([b; 32])
    }

    #[tokio::test]
    async fn register_then_query() {
        let ledger = ledger();
        let data = calldata::encode_registration(&pseudonym(1), &[0xAB]);
        let tx = ledger
            .send_transaction(registry(), signer(), data)
            .await
            .unwrap();

        let receipt = ledger.transaction_receipt(&tx).await.unwrap().unwrap();
        assert!(receipt.success);

        let logs = ledger
            .past_logs(registry(), 0, &[pseudonym(1)])
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].signatory, signer());
        assert_eq!(logs[0].data, vec![0xAB]);
    }

    #[tokio::test]
    async fn topic_filter_excludes_other_pseudonyms() {
        let ledger = ledger();
        ledger.append_log(signer(), pseudonym(1), vec![]);
        ledger.append_log(signer(), pseudonym(2), vec![]);
        let logs = ledger
            .past_logs(registry(), 0, &[pseudonym(2)])
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].pseudonym, pseudonym(2));
    }

    #[tokio::test]
    async fn from_block_filter() {
        let ledger = ledger();
        ledger.append_log(signer(), pseudonym(1), vec![]); // block 1
        ledger.append_log(signer(), pseudonym(2), vec![]); // block 2
        let logs = ledger
            .past_logs(registry(), 2, &[pseudonym(1), pseudonym(2)])
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].block_number, 2);
    }

    #[tokio::test]
    async fn unknown_contract_yields_no_logs() {
        let ledger = ledger();
        ledger.append_log(signer(), pseudonym(1), vec![]);
        let logs = ledger
            .past_logs(Address::from_bytes([0; 20]), 0, &[pseudonym(1)])
            .await
            .unwrap();
        assert!(logs.is_empty());
    }

    #[tokio::test]
    async fn query_counter_increments() {
        let ledger = ledger();
        assert_eq!(ledger.past_log_queries(), 0);
        ledger.past_logs(registry(), 0, &[]).await.unwrap();
        ledger.past_logs(registry(), 0, &[]).await.unwrap();
        assert_eq!(ledger.past_log_queries(), 2);
    }

    #[tokio::test]
    async fn injected_send_failure() {
        let ledger = ledger();
        ledger.fail_next_send("wallet rejected");
        let data = calldata::encode_registration(&pseudonym(1), &[]);
        let err = ledger
            .send_transaction(registry(), signer(), data.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::SendFailed(_)));
        // Failure is one-shot.
        ledger
            .send_transaction(registry(), signer(), data)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn reverted_transaction_emits_no_log() {
        let ledger = ledger();
        ledger.revert_next();
        let data = calldata::encode_registration(&pseudonym(1), &[]);
        let tx = ledger
            .send_transaction(registry(), signer(), data)
            .await
            .unwrap();
        let receipt = ledger.transaction_receipt(&tx).await.unwrap().unwrap();
        assert!(!receipt.success);
        assert_eq!(ledger.log_count(), 0);
    }

    #[tokio::test]
    async fn withheld_receipt_appears_after_polls() {
        let ledger = ledger();
        ledger.withhold_receipt(2);
        let data = calldata::encode_registration(&pseudonym(1), &[]);
        let tx = ledger
            .send_transaction(registry(), signer(), data)
            .await
            .unwrap();
        assert!(ledger.transaction_receipt(&tx).await.unwrap().is_none());
        assert!(ledger.transaction_receipt(&tx).await.unwrap().is_none());
        assert!(ledger.transaction_receipt(&tx).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_tx_is_pending() {
        let ledger = ledger();
        let tx = TxHash::from_bytes([9; 32]);
        assert!(ledger.transaction_receipt(&tx).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_calldata_rejected() {
        let ledger = ledger();
        let err = ledger
            .send_transaction(registry(), signer(), vec![1, 2, 3])
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidCalldata(_)));
    }
}
