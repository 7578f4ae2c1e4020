use std::io::BufRead;

mod error;
mod header;
mod input;
pub mod media_type;
mod redirect;
mod status;
mod success;

pub use error::ResponseError;
pub use header::{read_line, MAX_HEADER_LEN};
pub use input::InputResponse;
pub use redirect::RedirectResponse;
pub use status::{decode_status, ResponseKind, StatusBand};
pub use success::{SuccessResponse, ALLOWED_MIME_TYPES};

/// Any response this crate can parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Input(InputResponse),
    Success(SuccessResponse),
    Redirect(RedirectResponse),
}

impl Response {
    /// Reads the header line and hands it to the parser its leading status
    /// digit selects.
    pub fn parse<R: BufRead>(reader: &mut R) -> Result<Self, ResponseError> {
        let line = header::read_header(reader)?;
        if line.len() < 2 {
            return Err(ResponseError::HeaderTooShort { kind: None });
        }

        match ResponseKind::from_leading_digit(line[0]) {
            Some(ResponseKind::Input) => InputResponse::from_header(&line).map(Response::Input),
            Some(ResponseKind::Success) => {
                SuccessResponse::from_header(&line, reader).map(Response::Success)
            }
            Some(ResponseKind::Redirect) => {
                RedirectResponse::from_header(&line).map(Response::Redirect)
            }
            None => {
                let shown = line.iter().take(2).map(|&b| b as char).collect();
                Err(ResponseError::UnsupportedStatus(shown))
            }
        }
    }

    pub fn from_raw(mut input: &[u8]) -> Result<Self, ResponseError> {
        Self::parse(&mut input)
    }

    pub fn kind(&self) -> ResponseKind {
        match self {
            Response::Input(_) => ResponseKind::Input,
            Response::Success(_) => ResponseKind::Success,
            Response::Redirect(_) => ResponseKind::Redirect,
        }
    }

    pub fn status(&self) -> u8 {
        match self {
            Response::Input(r) => r.status,
            Response::Success(r) => r.status,
            Response::Redirect(r) => r.status,
        }
    }
}
