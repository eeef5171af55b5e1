use std::collections::HashMap;
use std::time::Duration;

use opensig_types::Address;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Configuration for one supported ledger network: where the registry
/// contract lives and how the chain behaves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub chain_id: u64,
    pub name: String,
    /// Address of the signature registry contract.
    pub contract: Address,
    /// Block the registry contract was deployed in; past-log queries
    /// never need to look earlier.
    pub creation_block: u64,
    /// Nominal block time, used as the initial confirmation delay.
    pub block_time: Duration,
}

impl Network {
    pub fn new(
        chain_id: u64,
        name: impl Into<String>,
        contract: Address,
        creation_block: u64,
        block_time: Duration,
    ) -> Self {
        Self {
            chain_id,
            name: name.into(),
            contract,
            creation_block,
            block_time,
        }
    }
}

/// Lookup table from chain id to [`Network`].
///
/// An unknown chain id yields [`LedgerError::UnsupportedNetwork`], the
/// distinct error kind callers branch on.
#[derive(Clone, Debug, Default)]
pub struct NetworkRegistry {
    networks: HashMap<u64, Network>,
}

impl NetworkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, network: Network) {
        self.networks.insert(network.chain_id, network);
    }

    pub fn network_for(&self, chain_id: u64) -> Result<&Network, LedgerError> {
        self.networks
            .get(&chain_id)
            .ok_or(LedgerError::UnsupportedNetwork { chain_id })
    }

    pub fn is_supported(&self, chain_id: u64) -> bool {
        self.networks.contains_key(&chain_id)
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}
