use std::path::PathBuf;
use std::sync::Arc;

use opensig_crypto::{ChainSeed, CryptoProvider, EncryptionKey, HashChain};
use opensig_ledger::{calldata, LedgerClient, Network};
use opensig_protocol::SignatureCodec;
use opensig_types::{Address, DocumentHash, Pseudonym, SignatureData, SignatureEvent, TxHash};
use tracing::debug;

use crate::confirm::{ConfirmOptions, Confirmation};
use crate::discovery::discover;
use crate::error::{SdkError, SdkResult};
use crate::file::hash_file;

/// Where a document's identity comes from.
///
/// A file source is resolved to a hash on the first `verify()`; after
/// that the two variants behave identically.
#[derive(Clone, Debug)]
enum DocumentSource {
    Hash(DocumentHash),
    File(PathBuf),
}

struct Identity {
    hash: DocumentHash,
    key: EncryptionKey,
}

impl Identity {
    fn new(hash: DocumentHash) -> Self {
        Self {
            key: EncryptionKey::from_document(&hash),
            hash,
        }
    }
}

/// Result of publishing a signature.
pub struct SignedSignature {
    pub tx_hash: TxHash,
    pub signatory: Address,
    /// The pseudonym consumed by this signature.
    pub pseudonym: Pseudonym,
    /// Awaitable tracking the transaction to finality.
    pub confirmation: Confirmation,
}

impl std::fmt::Debug for SignedSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedSignature")
            .field("tx_hash", &self.tx_hash)
            .field("signatory", &self.signatory)
            .field("pseudonym", &self.pseudonym)
            .finish_non_exhaustive()
    }
}

/// A document that can be verified and signed on a ledger.
///
/// State machine: unidentified → identified (hash established, encryption
/// key derived) → verified (chain discovered). `verify()` is re-entrant —
/// calling it again re-queries the ledger and is the way to pick up newly
/// added signatures. `sign()` requires a prior successful `verify()`.
///
/// Not designed for concurrent mutation: `&mut self` on the state-changing
/// operations serializes callers.
pub struct Document {
    source: DocumentSource,
    network: Network,
    ledger: Arc<dyn LedgerClient>,
    crypto: Arc<dyn CryptoProvider>,
    identity: Option<Identity>,
    chain: Option<HashChain>,
    events: Vec<SignatureEvent>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("source", &self.source)
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create a document from an already-computed 32-byte hash. The
    /// encryption key is derived immediately.
    pub fn from_hash(
        hash: DocumentHash,
        network: Network,
        ledger: Arc<dyn LedgerClient>,
        crypto: Arc<dyn CryptoProvider>,
    ) -> SdkResult<Self> {
        if !crypto.ready() {
            return Err(SdkError::CryptoUnavailable);
        }
        Ok(Self {
            source: DocumentSource::Hash(hash),
            network,
            ledger,
            crypto,
            identity: Some(Identity::new(hash)),
            chain: None,
            events: Vec::new(),
        })
    }

    /// Create a document from a file path. The file is read and hashed
    /// on the first `verify()`; the hash is immutable afterwards.
    pub fn from_file(
        path: impl Into<PathBuf>,
        network: Network,
        ledger: Arc<dyn LedgerClient>,
        crypto: Arc<dyn CryptoProvider>,
    ) -> SdkResult<Self> {
        if !crypto.ready() {
            return Err(SdkError::CryptoUnavailable);
        }
        Ok(Self {
            source: DocumentSource::File(path.into()),
            network,
            ledger,
            crypto,
            identity: None,
            chain: None,
            events: Vec::new(),
        })
    }

    /// Discover all signatures for this document on the configured
    /// network and leave the chain positioned for the next `sign()`.
    ///
    /// Returns the events in ledger order. Malformed or undecryptable
    /// on-chain payloads come back as `Invalid`/empty data, never as
    /// errors. A transport failure drops back to the unverified state.
    pub async fn verify(&mut self) -> SdkResult<Vec<SignatureEvent>> {
        if !self.crypto.ready() {
            return Err(SdkError::CryptoUnavailable);
        }
        let (hash, key) = self.resolve_identity().await?;
        debug!(document = %hash.short_id(), chain_id = self.network.chain_id, "verifying document");

        // Reuse the cached pseudonym prefix from any earlier verify;
        // discovery must restart from index 0 to honor the no-gap rule.
        let mut chain = match self.chain.take() {
            Some(mut chain) => {
                chain.reset(None);
                chain
            }
            None => {
                let seed = ChainSeed::derive(self.network.chain_id, &hash, self.crypto.as_ref());
                HashChain::new(seed)
            }
        };

        let events = discover(
            self.ledger.as_ref(),
            &self.network,
            self.crypto.as_ref(),
            &key,
            &mut chain,
        )
        .await?;

        self.chain = Some(chain);
        self.events = events.clone();
        Ok(events)
    }

    /// Publish a signature consuming the next pseudonym in the chain.
    ///
    /// Fails with [`SdkError::MustVerifyBeforeSigning`] unless a
    /// successful `verify()` has run. If publication fails, the chain
    /// cursor is rewound so the same pseudonym is retried on the next
    /// call — the on-ledger prefix stays contiguous.
    pub async fn sign(&mut self, data: SignatureData) -> SdkResult<SignedSignature> {
        if !self.crypto.ready() {
            return Err(SdkError::CryptoUnavailable);
        }
        let pseudonym = match self.chain.as_mut() {
            Some(chain) => chain.next(1, self.crypto.as_ref())[0],
            None => return Err(SdkError::MustVerifyBeforeSigning),
        };

        match self.publish(&data, pseudonym).await {
            Ok(signed) => Ok(signed),
            Err(e) => {
                if let Some(chain) = self.chain.as_mut() {
                    chain.rewind();
                }
                Err(e)
            }
        }
    }

    async fn publish(
        &self,
        data: &SignatureData,
        pseudonym: Pseudonym,
    ) -> SdkResult<SignedSignature> {
        let identity = match &self.identity {
            Some(identity) => identity,
            None => return Err(SdkError::MustVerifyBeforeSigning),
        };
        let payload = SignatureCodec::encode(data, &identity.key, self.crypto.as_ref())?;
        let call = calldata::encode_registration(&pseudonym, &payload);
        let signatory = self.ledger.selected_identity().await?;

        debug!(pseudonym = %pseudonym, signatory = %signatory, "publishing signature");
        let tx_hash = self
            .ledger
            .send_transaction(self.network.contract, signatory, call)
            .await?;

        Ok(SignedSignature {
            tx_hash,
            signatory,
            pseudonym,
            confirmation: Confirmation::new(
                Arc::clone(&self.ledger),
                tx_hash,
                ConfirmOptions::for_network(&self.network),
            ),
        })
    }

    async fn resolve_identity(&mut self) -> SdkResult<(DocumentHash, EncryptionKey)> {
        if let Some(identity) = &self.identity {
            return Ok((identity.hash, identity.key.clone()));
        }
        let hash = match &self.source {
            DocumentSource::Hash(hash) => *hash,
            DocumentSource::File(path) => {
                debug!(path = %path.display(), "hashing file contents");
                hash_file(path, self.crypto.as_ref()).await?
            }
        };
        let identity = Identity::new(hash);
        let key = identity.key.clone();
        self.identity = Some(identity);
        Ok((hash, key))
    }

    /// The document's identity, if established.
    pub fn document_hash(&self) -> Option<DocumentHash> {
        self.identity.as_ref().map(|i| i.hash)
    }

    /// Signatures found by the most recent `verify()`.
    pub fn signatures(&self) -> &[SignatureEvent] {
        &self.events
    }

    /// Whether a successful `verify()` has run.
    pub fn is_verified(&self) -> bool {
        self.chain.is_some()
    }

    /// Index of the last pseudonym confirmed used on the ledger.
    pub fn chain_cursor(&self) -> Option<usize> {
        self.chain.as_ref().and_then(|c| c.current_index())
    }

    pub fn network(&self) -> &Network {
        &self.network
    }
}
