use std::io::BufRead;

use url::{Position, Url};

use super::{header, ResponseError, ResponseKind};

/// Base relative targets are joined onto before being re-serialized.
const RELATIVE_BASE: &str = "gemini://relative.invalid/";

/// The server points the client somewhere else.
///
/// The target is checked for URI syntax only. Whether it uses the `gemini`
/// scheme, carries user info or names an IP literal is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectResponse {
    pub status: u8,
    pub uri: String,
}

impl RedirectResponse {
    pub fn parse<R: BufRead>(reader: &mut R) -> Result<Self, ResponseError> {
        let line = header::read_header(reader)?;
        Self::from_header(&line)
    }

    pub fn from_raw(mut input: &[u8]) -> Result<Self, ResponseError> {
        Self::parse(&mut input)
    }

    /// Resolves the target against the URL that produced this response.
    pub fn resolve(&self, base: &Url) -> Result<Url, ResponseError> {
        base.join(&self.uri).map_err(|err| ResponseError::UriUnparseable {
            uri: self.uri.clone(),
            source: Some(err),
        })
    }

    pub(crate) fn from_header(line: &[u8]) -> Result<Self, ResponseError> {
        let header = header::validate(line, ResponseKind::Redirect)?;
        let raw = std::str::from_utf8(header.payload).map_err(|_| ResponseError::UriUnparseable {
            uri: String::from_utf8_lossy(header.payload).into_owned(),
            source: None,
        })?;
        let uri = normalize_uri(raw)?;

        log::debug!("redirect response {}: {}", header.status, uri);

        Ok(Self {
            status: header.status,
            uri,
        })
    }
}

/// Parses `raw` and returns its serialized form.
///
/// Relative references stay relative, with dot segments resolved.
fn normalize_uri(raw: &str) -> Result<String, ResponseError> {
    let rejected = |source: Option<url::ParseError>| {
        log::debug!("redirect target {:?} rejected", raw);
        ResponseError::UriUnparseable {
            uri: raw.to_owned(),
            source,
        }
    };

    // the url parser drops these silently instead of failing
    if raw.bytes().any(|b| b.is_ascii_control()) || raw.trim() != raw {
        return Err(rejected(None));
    }

    match Url::parse(raw) {
        Ok(url) => Ok(url.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(RELATIVE_BASE).map_err(|err| rejected(Some(err)))?;
            let joined = base.join(raw).map_err(|err| rejected(Some(err)))?;
            Ok(relative_form(raw, &joined))
        }
        Err(err) => Err(rejected(Some(err))),
    }
}

/// Strips the placeholder base back off a joined reference.
fn relative_form(raw: &str, joined: &Url) -> String {
    if raw.starts_with("//") {
        format!("//{}", &joined[Position::BeforeUsername..])
    } else if raw.starts_with('/') {
        joined[Position::BeforePath..].to_owned()
    } else {
        let from_path = &joined[Position::BeforePath..];
        from_path.strip_prefix('/').unwrap_or(from_path).to_owned()
    }
}
