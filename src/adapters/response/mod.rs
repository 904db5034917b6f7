//! Response Sink Adapters
//!
//! - **ChannelResponseSink** - forwards fragments over a tokio channel
//! - **BufferedResponseSink** - collects fragments in memory

mod buffered_sink;
mod channel_sink;

pub use buffered_sink::BufferedResponseSink;
pub use channel_sink::ChannelResponseSink;
