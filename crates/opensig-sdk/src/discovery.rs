use opensig_crypto::{CryptoProvider, EncryptionKey, HashChain};
use opensig_ledger::{LedgerClient, Network};
use opensig_protocol::SignatureCodec;
use opensig_types::SignatureEvent;
use tracing::{debug, trace};

use crate::error::SdkResult;

/// Pseudonyms queried per discovery round.
pub const DISCOVERY_BATCH_SIZE: usize = 10;

/// Paginated search for the signatures already published on `chain`.
///
/// Each round takes the next batch of pseudonyms from the generator and
/// asks the ledger for matching registry logs over the contract's full
/// history. A round that matches strictly fewer entries than the batch
/// size means the chain's used prefix is exhausted — pseudonyms are
/// consumed in order with no gaps, so nothing past it can exist. On
/// termination the generator cursor is left on the highest used index,
/// ready for the next `sign` to consume exactly the following pseudonym.
///
/// Returned events are in ledger order, not pseudonym order. Decode
/// failures become `Invalid`/empty payload data; discovery itself only
/// fails on transport errors.
pub async fn discover(
    ledger: &dyn LedgerClient,
    network: &Network,
    crypto: &dyn CryptoProvider,
    key: &EncryptionKey,
    chain: &mut HashChain,
) -> SdkResult<Vec<SignatureEvent>> {
    let mut events: Vec<SignatureEvent> = Vec::new();
    let mut last_index: Option<usize> = None;

    loop {
        let batch = chain.next(DISCOVERY_BATCH_SIZE, crypto).to_vec();
        trace!(
            from = ?batch.first().and_then(|p| chain.index_of(p)),
            "querying ledger for signature batch"
        );

        let logs = ledger
            .past_logs(network.contract, network.creation_block, &batch)
            .await?;
        debug!(matched = logs.len(), "discovery batch complete");

        for log in &logs {
            let data = SignatureCodec::decode(&log.data, key, crypto);
            if let Some(index) = chain.index_of(&log.pseudonym) {
                if last_index.map_or(true, |last| index > last) {
                    last_index = Some(index);
                }
            }
            events.push(SignatureEvent {
                time: log.time,
                signatory: log.signatory,
                pseudonym: log.pseudonym,
                data,
            });
        }

        if logs.len() != DISCOVERY_BATCH_SIZE {
            chain.reset(last_index);
            debug!(
                signatures = events.len(),
                cursor = ?last_index,
                "discovery complete"
            );
            return Ok(events);
        }
    }
}
