use std::io::{self, BufRead};

use super::{status, ResponseError, ResponseKind};

/// Upper bound on a response header line, including the CRLF.
///
/// Not enforced by the parsers; exposed for callers that want to cap reads.
pub const MAX_HEADER_LEN: usize = 1024;

/// A validated header line, borrowing its payload from the raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Header<'a> {
    /// Status code after folding into the kind's canonical class.
    pub status: u8,
    /// Bytes between the separator and the CRLF.
    pub payload: &'a [u8],
}

/// Reads up to and including the first `\n`.
///
/// Hitting end of stream before a `\n` is an `UnexpectedEof` error.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;

    if line.last() != Some(&b'\n') {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stream ended before the response header line did",
        ));
    }

    Ok(line)
}

pub(crate) fn read_header<R: BufRead>(reader: &mut R) -> Result<Vec<u8>, ResponseError> {
    let line = read_line(reader).map_err(ResponseError::UnderlyingStreamFailed)?;
    log::trace!("response header: {:?}", String::from_utf8_lossy(&line));
    Ok(line)
}

/// Checks the `SS P...\r\n` shape of a header line against `kind`.
pub(crate) fn validate(line: &[u8], kind: ResponseKind) -> Result<Header<'_>, ResponseError> {
    if line.len() < 2 {
        return Err(ResponseError::HeaderTooShort { kind: Some(kind) });
    }

    let code = status::decode_status([line[0], line[1]])
        .ok_or(ResponseError::StatusCodeUndecodable { kind })?;
    let status = kind
        .classify(code)
        .ok_or(ResponseError::StatusCodeOutOfBand { kind, code })?;

    if line.get(2) != Some(&b' ') {
        return Err(ResponseError::SeparatorInvalid { kind });
    }

    if !line.ends_with(b"\r\n") {
        return Err(ResponseError::TerminatorInvalid { kind });
    }

    let payload = line
        .get(3..line.len() - 2)
        .ok_or(ResponseError::TerminatorInvalid { kind })?;

    Ok(Header { status, payload })
}
