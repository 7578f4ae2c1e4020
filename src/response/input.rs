use std::io::BufRead;

use super::{header, ResponseError, ResponseKind};

/// The server wants a line of user input before it can answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputResponse {
    pub status: u8,
    /// Text to show the user, verbatim from the header.
    pub prompt: String,
}

impl InputResponse {
    /// Reads exactly one header line from `reader`.
    pub fn parse<R: BufRead>(reader: &mut R) -> Result<Self, ResponseError> {
        let line = header::read_header(reader)?;
        Self::from_header(&line)
    }

    pub fn from_raw(mut input: &[u8]) -> Result<Self, ResponseError> {
        Self::parse(&mut input)
    }

    pub(crate) fn from_header(line: &[u8]) -> Result<Self, ResponseError> {
        let header = header::validate(line, ResponseKind::Input)?;
        let prompt = std::str::from_utf8(header.payload)
            .map_err(|_| ResponseError::PromptNotUtf8)?
            .to_owned();

        log::debug!("input response {}: {:?}", header.status, prompt);

        Ok(Self {
            status: header.status,
            prompt,
        })
    }
}
