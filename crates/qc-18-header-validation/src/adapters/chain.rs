//! In-memory chain context
//!
//! Implements the ChainContext port over a hash-indexed header map

use crate::domain::{BlockHeader, Hash};
use crate::ports::{ChainContext, SystemTimeSource, TimeSource};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct ChainIndex {
    known_blocks: HashMap<Hash, BlockHeader>,
    height_index: HashMap<u64, Hash>,
    head_number: u64,
}

/// Chain context backed by an in-memory header index
pub struct InMemoryChain {
    index: RwLock<ChainIndex>,
    time_source: Arc<dyn TimeSource>,
}

impl InMemoryChain {
    /// Create chain state with genesis block, using system time
    pub fn new(genesis: BlockHeader) -> Self {
        Self::with_time_source(genesis, Arc::new(SystemTimeSource))
    }

    pub fn with_time_source(genesis: BlockHeader, time_source: Arc<dyn TimeSource>) -> Self {
        let chain = Self {
            index: RwLock::new(ChainIndex::default()),
            time_source,
        };
        chain.insert(genesis);
        chain
    }

    /// Add a header. The head moves to the highest number seen.
    pub fn insert(&self, header: BlockHeader) {
        let hash = header.hash();
        let mut index = self.index.write();
        if header.number > index.head_number {
            index.head_number = header.number;
        }
        index.height_index.insert(header.number, hash);
        index.known_blocks.insert(hash, header);
    }

    pub fn has_block(&self, hash: &Hash) -> bool {
        self.index.read().known_blocks.contains_key(hash)
    }

    pub fn hash_at_height(&self, number: u64) -> Option<Hash> {
        self.index.read().height_index.get(&number).copied()
    }

    pub fn block_count(&self) -> usize {
        self.index.read().known_blocks.len()
    }
}

impl ChainContext for InMemoryChain {
    fn header_by_hash(&self, hash: &Hash) -> Option<BlockHeader> {
        self.index.read().known_blocks.get(hash).cloned()
    }

    fn head_number(&self) -> u64 {
        self.index.read().head_number
    }

    fn now(&self) -> u64 {
        self.time_source.now()
    }
}
