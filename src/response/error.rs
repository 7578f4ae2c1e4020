use std::io;

use super::ResponseKind;

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// `kind` is `None` when the line was too short to pick a parser.
    #[error("response header is too short")]
    HeaderTooShort { kind: Option<ResponseKind> },

    #[error("{kind} response status code is not two decimal digits")]
    StatusCodeUndecodable { kind: ResponseKind },

    #[error("invalid {kind} response status code {code}")]
    StatusCodeOutOfBand { kind: ResponseKind, code: u8 },

    #[error("invalid {kind} response separator")]
    SeparatorInvalid { kind: ResponseKind },

    #[error("invalid {kind} response CRLF terminator")]
    TerminatorInvalid { kind: ResponseKind },

    #[error("input response prompt is not valid UTF-8")]
    PromptNotUtf8,

    #[error("invalid redirect response URI {uri:?}")]
    UriUnparseable {
        uri: String,
        #[source]
        source: Option<url::ParseError>,
    },

    #[error("invalid success response MIME type {0:?}")]
    MimeTypeRejected(String),

    #[error("could not read success response body")]
    BodyReadFailed(#[source] io::Error),

    #[error("could not read response header")]
    UnderlyingStreamFailed(#[source] io::Error),

    #[error("unsupported response status {0:?}")]
    UnsupportedStatus(String),
}

impl ResponseError {
    /// The response kind the failing parser was handling, if any.
    pub fn kind(&self) -> Option<ResponseKind> {
        match self {
            ResponseError::HeaderTooShort { kind } => *kind,
            ResponseError::StatusCodeUndecodable { kind }
            | ResponseError::StatusCodeOutOfBand { kind, .. }
            | ResponseError::SeparatorInvalid { kind }
            | ResponseError::TerminatorInvalid { kind } => Some(*kind),
            ResponseError::PromptNotUtf8 => Some(ResponseKind::Input),
            ResponseError::UriUnparseable { .. } => Some(ResponseKind::Redirect),
            ResponseError::MimeTypeRejected(_) | ResponseError::BodyReadFailed(_) => {
                Some(ResponseKind::Success)
            }
            ResponseError::UnderlyingStreamFailed(_) | ResponseError::UnsupportedStatus(_) => None,
        }
    }
}
