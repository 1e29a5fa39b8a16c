//! Block header value validated by the rule engine

use serde::{Deserialize, Serialize};

/// 32-byte Keccak-256 digest
pub type Hash = [u8; 32];

/// Block header containing the consensus metadata of a block
///
/// The engine only ever reads headers; callers own them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: u32,
    pub number: u64,
    pub parent_hash: Hash,
    /// Unix epoch seconds
    pub timestamp: u64,
    pub proposer: [u8; 32],
    pub gas_limit: u64,
    pub gas_used: u64,
    #[serde(default)]
    pub extra_data: Vec<u8>,
}

impl BlockHeader {
    /// Compute the hash of this block header
    pub fn hash(&self) -> Hash {
        use sha3::{Digest, Keccak256};
        let mut hasher = Keccak256::new();
        hasher.update(self.version.to_le_bytes());
        hasher.update(self.number.to_le_bytes());
        hasher.update(self.parent_hash);
        hasher.update(self.timestamp.to_le_bytes());
        hasher.update(self.proposer);
        hasher.update(self.gas_limit.to_le_bytes());
        hasher.update(self.gas_used.to_le_bytes());
        hasher.update(&self.extra_data);
        let result = hasher.finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    /// Check if this is a genesis header
    pub fn is_genesis(&self) -> bool {
        self.number == 0 && self.parent_hash == [0u8; 32]
    }

    /// Build the child template of this header: next number, linked parent
    /// hash, same gas limit and `timestamp + spacing`.
    ///
    /// Number and timestamp saturate at `u64::MAX`.
    pub fn child(&self, spacing_secs: u64) -> Self {
        Self {
            version: self.version,
            number: self.number.saturating_add(1),
            parent_hash: self.hash(),
            timestamp: self.timestamp.saturating_add(spacing_secs),
            proposer: self.proposer,
            gas_limit: self.gas_limit,
            gas_used: 0,
            extra_data: Vec::new(),
        }
    }
}
