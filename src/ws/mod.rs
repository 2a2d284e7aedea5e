//! Live test-data feed over WebSocket.

mod feed;

pub use feed::feed_handler;
