//! Frame transports
//!
//! Concrete `Gateway` implementations. The core never sees bytes; it sends
//! and receives whole frames through one of these.

mod memory;
mod stream;

pub use memory::MemoryGateway;
pub use stream::{StreamGateway, RX_CHUNK_SIZE};
