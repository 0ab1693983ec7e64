//! Textual wire format for worker messages.
//!
//! One record per line, semicolon-separated:
//!
//! - partial result: `<worker_id>;<processed>;<inside>`
//! - verbose point event: `<worker_id>;<x>;<y>`
//!
//! Both records carry three fields; a line is classified as a partial
//! result iff all three fields parse as unsigned integers. A verbose
//! point with exactly integral coordinates would therefore be misread,
//! a known limitation of the textual format.

use super::{Message, PartialResult, TransportError};

/// Encodes a message as one newline-terminated record.
///
/// # Examples
///
/// ```rust
/// use estimator_engine::transport::{wire, Message, PartialResult};
///
/// let record = wire::encode(&Message::Partial(PartialResult {
///     worker_id: 3,
///     processed: 2500,
///     inside: 1311,
/// }));
/// assert_eq!(record, "3;2500;1311\n");
/// ```
pub fn encode(msg: &Message) -> String {
    match msg {
        Message::InsidePoint { worker_id, x, y } => format!("{};{};{}\n", worker_id, x, y),
        Message::Partial(pr) => format!("{};{};{}\n", pr.worker_id, pr.processed, pr.inside),
    }
}

/// Decodes one record (with or without its trailing newline).
///
/// # Errors
///
/// Returns [`TransportError::Malformed`] when the line does not have
/// three `;`-separated fields with a leading worker id.
pub fn decode(line: &str) -> Result<Message, TransportError> {
    let line = line.trim_end_matches('\n');
    let malformed = || TransportError::Malformed {
        line: line.to_string(),
    };

    let mut fields = line.splitn(3, ';');
    let (Some(id), Some(second), Some(third)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed());
    };

    let worker_id: usize = id.trim().parse().map_err(|_| malformed())?;

    if let (Ok(processed), Ok(inside)) =
        (second.trim().parse::<usize>(), third.trim().parse::<usize>())
    {
        return Ok(Message::Partial(PartialResult {
            worker_id,
            processed,
            inside,
        }));
    }

    let x: f64 = second.trim().parse().map_err(|_| malformed())?;
    let y: f64 = third.trim().parse().map_err(|_| malformed())?;
    Ok(Message::InsidePoint { worker_id, x, y })
}
