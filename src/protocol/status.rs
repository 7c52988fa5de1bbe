//! Status frame decoding.
//!
//! The first response frame carries the exit status as decimal text. It is
//! validated strictly: digits only, not an ambiguous zero, at most 255.

use bytes::BytesMut;
use tokio::io::AsyncRead;

use super::wire_format::{read_terminated, Boundary, STATUS_BUFFER_SIZE, STATUS_CAPACITY};
use crate::error::{AmError, Result};

/// Read and validate the status frame.
///
/// # Errors
///
/// - [`AmError::StatusTooLong`] if nine bytes arrive without a terminator
/// - [`AmError::InvalidStatus`] / [`AmError::StatusOutOfRange`] from
///   [`parse_status`]
/// - [`AmError::Read`] on a read failure
pub async fn read_status<R>(reader: &mut R) -> Result<u8>
where
    R: AsyncRead + Unpin,
{
    let mut buf = BytesMut::with_capacity(STATUS_BUFFER_SIZE);

    if read_terminated(reader, &mut buf, STATUS_CAPACITY).await? == Boundary::BufferFull {
        return Err(AmError::StatusTooLong {
            literal: literal(&buf),
        });
    }

    let status = parse_status(&buf)?;
    tracing::debug!(status, "status frame decoded");
    Ok(status)
}

/// Parse a status literal.
///
/// A literal that is numerically zero must be exactly `"0"`, so `"00"` is
/// rejected while `"007"` is accepted as 7.
pub fn parse_status(text: &[u8]) -> Result<u8> {
    if text.is_empty() || !text.iter().all(u8::is_ascii_digit) {
        return Err(AmError::InvalidStatus {
            literal: literal(text),
        });
    }

    // At most STATUS_CAPACITY digits, so u32 cannot overflow.
    let value = text
        .iter()
        .fold(0u32, |acc, digit| acc * 10 + u32::from(digit - b'0'));

    if value == 0 && text != b"0" {
        return Err(AmError::InvalidStatus {
            literal: literal(text),
        });
    }

    u8::try_from(value).map_err(|_| AmError::StatusOutOfRange {
        literal: literal(text),
    })
}

fn literal(text: &[u8]) -> String {
    String::from_utf8_lossy(text).into_owned()
}
