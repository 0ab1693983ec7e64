//! Transport abstraction between workers and the aggregator.
//!
//! A worker and the aggregator only ever talk through the
//! [`TransportSender`] / [`TransportReceiver`] traits, so the same
//! worker and aggregation code runs unchanged whether the partial
//! results travel over an in-process channel, a pipe or a Unix-domain
//! socket. Selecting a binding is a deployment decision:
//!
//! - [`channel`]: std mpsc pair for thread-per-worker deployments
//! - [`FramedSender`] / [`FramedReceiver`]: the textual wire format
//!   over any `Write`/`Read` byte stream (pipes, sockets)

mod channel;
mod framed;
pub mod wire;

pub use channel::{channel, ChannelReceiver, ChannelSender};
pub use framed::{FramedReceiver, FramedSender};

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// One worker's final tally, produced exactly once and immutable after
/// sending. `inside <= processed` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PartialResult {
    /// Identifier of the reporting worker.
    pub worker_id: usize,
    /// Points the worker tested.
    pub processed: usize,
    /// Points that fell inside the polygon.
    pub inside: usize,
}

/// A message travelling from a worker to the aggregator.
///
/// Within one worker's stream, every `InsidePoint` event precedes the
/// terminal `Partial`. No ordering holds between different workers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Message {
    /// Verbose-mode event: one point found inside the polygon.
    InsidePoint {
        /// Identifier of the reporting worker.
        worker_id: usize,
        /// x coordinate of the point.
        x: f64,
        /// y coordinate of the point.
        y: f64,
    },
    /// A worker's terminal result.
    Partial(PartialResult),
}

/// Failures of a worker/aggregator channel.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The peer end is gone; nothing can be sent any more.
    #[error("transport closed by peer")]
    Closed,

    /// A received record did not parse as any known message.
    #[error("malformed wire record: {line:?}")]
    Malformed {
        /// The offending line, without its newline.
        line: String,
    },

    /// Underlying byte-stream failure.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of polling a receiver.
#[derive(Debug)]
pub enum Polled {
    /// A message arrived.
    Message(Message),
    /// Nothing arrived within the wait slice; the channel is still open.
    Idle,
    /// The sender finished and the channel is drained.
    Closed,
}

/// Sending half of a worker's channel.
pub trait TransportSender: Send {
    /// Sends one message to the aggregator.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the channel is closed or the
    /// underlying stream fails; the worker must abort on this, never
    /// swallow it.
    fn send(&mut self, msg: Message) -> Result<(), TransportError>;
}

/// Receiving half of a worker's channel, as seen by the aggregator.
pub trait TransportReceiver {
    /// Waits up to `wait` for the next message.
    ///
    /// Returns [`Polled::Idle`] on a quiet but open channel, so the
    /// aggregator can move on to the next receiver instead of blocking
    /// on one slow worker.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on malformed records or stream
    /// failure; the channel should be treated as dead afterwards.
    fn poll(&mut self, wait: Duration) -> Result<Polled, TransportError>;
}
