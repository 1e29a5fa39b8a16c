//! Adapters layer - implementations of ports

mod chain;
mod sink;

pub use chain::InMemoryChain;
pub use sink::{ChannelSink, FanoutSink, MemorySink, TracingSink};
