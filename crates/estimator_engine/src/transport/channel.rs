//! In-process channel binding (std mpsc).

use super::{Message, Polled, TransportError, TransportReceiver, TransportSender};
use std::sync::mpsc;
use std::time::Duration;

/// Sending half of an in-process transport.
pub struct ChannelSender {
    tx: mpsc::Sender<Message>,
}

/// Receiving half of an in-process transport.
pub struct ChannelReceiver {
    rx: mpsc::Receiver<Message>,
}

/// Creates a connected transport pair for one worker.
///
/// End-of-stream is signalled by dropping the sender, which happens
/// naturally when the worker returns.
pub fn channel() -> (ChannelSender, ChannelReceiver) {
    let (tx, rx) = mpsc::channel();
    (ChannelSender { tx }, ChannelReceiver { rx })
}

impl TransportSender for ChannelSender {
    fn send(&mut self, msg: Message) -> Result<(), TransportError> {
        self.tx.send(msg).map_err(|_| TransportError::Closed)
    }
}

impl TransportReceiver for ChannelReceiver {
    fn poll(&mut self, wait: Duration) -> Result<Polled, TransportError> {
        match self.rx.recv_timeout(wait) {
            Ok(msg) => Ok(Polled::Message(msg)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(Polled::Idle),
            Err(mpsc::RecvTimeoutError::Disconnected) => Ok(Polled::Closed),
        }
    }
}
