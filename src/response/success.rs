use std::{
    collections::HashMap,
    io::{BufRead, Cursor, Read},
};

use super::{header, media_type::MediaType, ResponseError, ResponseKind};

/// Media types a success response may carry.
pub const ALLOWED_MIME_TYPES: [&str; 2] = ["text/gemini", "text/plain"];

/// Content delivered by the server, body fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessResponse {
    pub status: u8,
    /// Lowercased `type/subtype`.
    pub mime_type: String,
    pub mime_type_params: HashMap<String, String>,
    body: Vec<u8>,
}

impl SuccessResponse {
    /// Reads the header line, then drains `reader` into the body.
    pub fn parse<R: BufRead>(reader: &mut R) -> Result<Self, ResponseError> {
        let line = header::read_header(reader)?;
        Self::from_header(&line, reader)
    }

    /// Validates an already read header line, then drains `rest` into the body.
    pub(crate) fn from_header<R: Read>(line: &[u8], rest: &mut R) -> Result<Self, ResponseError> {
        let header = header::validate(line, ResponseKind::Success)?;
        let (mime_type, mime_type_params) = negotiate(header.payload)?;

        let mut body = Vec::new();
        rest.read_to_end(&mut body)
            .map_err(ResponseError::BodyReadFailed)?;

        log::debug!(
            "success response {}: {} ({} byte body)",
            header.status,
            mime_type,
            body.len()
        );

        Ok(Self {
            status: header.status,
            mime_type,
            mime_type_params,
            body,
        })
    }

    pub fn from_raw(mut input: &[u8]) -> Result<Self, ResponseError> {
        Self::parse(&mut input)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// A fresh cursor over the body; each call starts at the beginning.
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(&self.body)
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

fn negotiate(payload: &[u8]) -> Result<(String, HashMap<String, String>), ResponseError> {
    let rejected = || ResponseError::MimeTypeRejected(String::from_utf8_lossy(payload).into_owned());

    let raw = std::str::from_utf8(payload).map_err(|_| rejected())?;
    let media_type = MediaType::parse(raw).map_err(|err| {
        log::debug!("media type {:?} rejected: {}", raw, err);
        rejected()
    })?;

    if !ALLOWED_MIME_TYPES.contains(&media_type.essence()) {
        return Err(rejected());
    }

    Ok(media_type.into_parts())
}
