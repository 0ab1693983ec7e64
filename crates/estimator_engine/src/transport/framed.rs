//! Line-framed binding over arbitrary byte streams.
//!
//! Wraps a `Write`/`Read` pair (pipe ends, Unix-domain sockets) in
//! the textual wire format of [`super::wire`]. The deployment owns the
//! underlying streams and their lifetimes; this binding only frames.

use super::{wire, Message, Polled, TransportError, TransportReceiver, TransportSender};
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::time::Duration;

/// Writes wire records to a byte stream.
pub struct FramedSender<W: Write + Send> {
    inner: W,
}

impl<W: Write + Send> FramedSender<W> {
    /// Wraps the writing end of a stream.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Unwraps the underlying stream.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write + Send> TransportSender for FramedSender<W> {
    fn send(&mut self, msg: Message) -> Result<(), TransportError> {
        self.inner.write_all(wire::encode(&msg).as_bytes())?;
        self.inner.flush()?;
        Ok(())
    }
}

/// Reads wire records from a byte stream.
///
/// Blocking behaviour follows the underlying stream: the `wait`
/// argument of [`TransportReceiver::poll`] is honoured only insofar as
/// the stream has a read timeout configured (e.g.
/// `UnixStream::set_read_timeout`); timed-out and would-block reads are
/// reported as [`Polled::Idle`].
pub struct FramedReceiver<R: Read> {
    inner: BufReader<R>,
}

impl<R: Read> FramedReceiver<R> {
    /// Wraps the reading end of a stream.
    pub fn new(inner: R) -> Self {
        Self {
            inner: BufReader::new(inner),
        }
    }
}

impl<R: Read> TransportReceiver for FramedReceiver<R> {
    fn poll(&mut self, _wait: Duration) -> Result<Polled, TransportError> {
        let mut line = String::new();
        match self.inner.read_line(&mut line) {
            Ok(0) => Ok(Polled::Closed),
            Ok(_) => Ok(Polled::Message(wire::decode(&line)?)),
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                Ok(Polled::Idle)
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => Ok(Polled::Idle),
            Err(err) => Err(TransportError::Io(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::PartialResult;

    #[test]
    fn test_framed_roundtrip_over_buffer() {
        let mut sender = FramedSender::new(Vec::new());
        let partial = Message::Partial(PartialResult {
            worker_id: 1,
            processed: 50,
            inside: 20,
        });
        sender
            .send(Message::InsidePoint {
                worker_id: 1,
                x: 0.5,
                y: 0.25,
            })
            .unwrap();
        sender.send(partial).unwrap();

        let bytes = sender.into_inner();
        let mut receiver = FramedReceiver::new(bytes.as_slice());

        let first = receiver.poll(Duration::from_millis(1)).unwrap();
        assert!(matches!(
            first,
            Polled::Message(Message::InsidePoint { worker_id: 1, .. })
        ));

        let second = receiver.poll(Duration::from_millis(1)).unwrap();
        match second {
            Polled::Message(got) => assert_eq!(got, partial),
            other => panic!("expected partial, got {:?}", other),
        }

        assert!(matches!(
            receiver.poll(Duration::from_millis(1)).unwrap(),
            Polled::Closed
        ));
    }

    #[test]
    fn test_framed_receiver_rejects_garbage() {
        let mut receiver = FramedReceiver::new("no semicolons here\n".as_bytes());
        assert!(matches!(
            receiver.poll(Duration::from_millis(1)),
            Err(TransportError::Malformed { .. })
        ));
    }
}
